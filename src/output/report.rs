// Sat Oct 17 2026 - Alex

use crate::engine::UnitAnalysis;
use crate::output::error::ReportError;
use crate::output::table::SizeTable;
use crate::output::Reporter;
use colored::*;
use std::io::Write;

/// Human-readable report: a size table per unit followed by one diagnostic
/// block per padded type.
pub struct TextReporter {
    use_color: bool,
    padded_only: bool,
}

impl TextReporter {
    pub fn new() -> Self {
        Self {
            use_color: true,
            padded_only: false,
        }
    }

    pub fn with_color(mut self, use_color: bool) -> Self {
        self.use_color = use_color;
        self
    }

    pub fn with_padded_only(mut self, padded_only: bool) -> Self {
        self.padded_only = padded_only;
        self
    }

    fn banner(&self, name: &str) -> String {
        let text = format!("Processing {}", name);
        if self.use_color {
            text.green().bold().to_string()
        } else {
            text
        }
    }

    fn size_table(&self, analysis: &UnitAnalysis) -> SizeTable {
        let mut table = SizeTable::new().with_color(self.use_color);
        for (id, ty) in analysis.types.iter() {
            let padded = analysis.types.has_padding(id);
            if self.padded_only && !padded {
                continue;
            }
            table.add_row(ty.offset, analysis.types.describe(id), ty.byte_size, padded);
        }
        table
    }

    pub fn write_unit(&self, out: &mut dyn Write, analysis: &UnitAnalysis) -> Result<(), ReportError> {
        writeln!(out, "{}", self.banner(&analysis.name))?;
        writeln!(out, "{}", self.size_table(analysis).build())?;
        writeln!(out)?;

        for (id, ty) in analysis.types.padded_types() {
            writeln!(
                out,
                "Found padded type '{}' at {}",
                analysis.types.label(id),
                analysis.declaration(ty.decl_line)
            )?;
            for gap in analysis.types.padding_gaps(id) {
                writeln!(out, "\t{}", gap)?;
            }
        }
        Ok(())
    }
}

impl Default for TextReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl Reporter for TextReporter {
    fn write_report(&self, out: &mut dyn Write, analyses: &[UnitAnalysis]) -> Result<(), ReportError> {
        for analysis in analyses {
            self.write_unit(out, analysis)?;
        }
        Ok(())
    }
}
