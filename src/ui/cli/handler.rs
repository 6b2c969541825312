// Sat Oct 17 2026 - Alex

use crate::config::Config;
use crate::engine::{Pipeline, UnitAnalysis};
use crate::output::reporter_for;
use crate::ui::cli::args::Args;
use anyhow::Context;
use std::fs::File;
use std::io::{self, BufWriter, Write};

pub struct CommandHandler;

impl CommandHandler {
    pub fn new() -> Self {
        Self
    }

    pub fn execute(&self, args: Args) -> anyhow::Result<()> {
        let config = args.to_config()?;
        config.validate().map_err(|e| anyhow::anyhow!(e))?;

        self.setup_logging(&config);
        self.setup_color(&config);

        let analyses = Pipeline::from_config(&config).run(&args.object)?;
        self.log_summary(&analyses);

        let reporter = reporter_for(&config);
        match &args.output {
            Some(path) => {
                let file = File::create(path).with_context(|| format!("Failed to create {}", path.display()))?;
                let mut writer = BufWriter::new(file);
                reporter.write_report(&mut writer, &analyses)?;
                writer.flush()?;
                log::info!("Report written to {}", path.display());
            }
            None => {
                let stdout = io::stdout();
                let mut writer = stdout.lock();
                reporter.write_report(&mut writer, &analyses)?;
                writer.flush()?;
            }
        }

        Ok(())
    }

    fn setup_logging(&self, config: &Config) {
        let _ = env_logger::Builder::new()
            .filter_level(config.log_filter())
            .format_timestamp(None)
            .try_init();
    }

    fn setup_color(&self, config: &Config) {
        colored::control::set_override(config.use_color());
    }

    fn log_summary(&self, analyses: &[UnitAnalysis]) {
        let types: usize = analyses.iter().map(|a| a.types.len()).sum();
        let padded: usize = analyses.iter().map(UnitAnalysis::padded_count).sum();
        let wasted: u64 = analyses.iter().map(UnitAnalysis::wasted_bytes).sum();
        log::info!(
            "{} units, {} types, {} padded, {} bytes of padding",
            analyses.len(),
            types,
            padded,
            wasted
        );
    }
}

impl Default for CommandHandler {
    fn default() -> Self {
        Self::new()
    }
}
