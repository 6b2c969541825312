// Sat Oct 17 2026 - Alex

pub mod error;
pub mod json;
pub mod report;
pub mod table;

pub use error::ReportError;
pub use json::{JsonReporter, TypeReport, UnitReport};
pub use report::TextReporter;
pub use table::SizeTable;

use crate::config::{Config, OutputFormat};
use crate::engine::UnitAnalysis;
use std::io::Write;

pub trait Reporter {
    fn write_report(&self, out: &mut dyn Write, analyses: &[UnitAnalysis]) -> Result<(), ReportError>;
}

/// The reporter selected by `config.format`.
pub fn reporter_for(config: &Config) -> Box<dyn Reporter> {
    match config.format {
        OutputFormat::Text => Box::new(
            TextReporter::new()
                .with_color(config.use_color())
                .with_padded_only(config.padded_only),
        ),
        OutputFormat::Json => Box::new(
            JsonReporter::new()
                .with_pretty_print(config.pretty_json)
                .with_padded_only(config.padded_only),
        ),
    }
}
