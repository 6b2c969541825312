// Sat Oct 17 2026 - Alex

use crate::config::{ColorMode, Config, OutputFormat};
use anyhow::Context;
use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "padding-finder")]
#[command(author = "Alex")]
#[command(version = "1.0.0")]
#[command(about = "Reports padded struct layouts from DWARF debug info", long_about = None)]
pub struct Args {
    /// ELF or Mach-O object file with DWARF debug info
    pub object: PathBuf,

    #[arg(short, long, value_enum)]
    pub format: Option<OutputFormat>,

    #[arg(long, value_enum)]
    pub color: Option<ColorMode>,

    /// Only list padded types in the size table
    #[arg(long)]
    pub padded_only: bool,

    #[arg(short, long)]
    pub jobs: Option<usize>,

    #[arg(long)]
    pub no_parallel: bool,

    /// JSON config file; flags given here take precedence
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    #[arg(short, long)]
    pub log_level: Option<String>,

    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

impl Args {
    /// Config file (or defaults) with every explicit flag applied on top.
    pub fn to_config(&self) -> anyhow::Result<Config> {
        let mut config = match &self.config {
            Some(path) => Config::from_file(path)
                .with_context(|| format!("Failed to load config from {}", path.display()))?,
            None => Config::default(),
        };

        if let Some(format) = self.format {
            config = config.with_format(format);
        }
        if let Some(color) = self.color {
            config = config.with_color(color);
        } else if self.output.is_some() && config.color == ColorMode::Auto {
            config = config.with_color(ColorMode::Never);
        }
        if self.padded_only {
            config = config.with_padded_only(true);
        }
        if let Some(jobs) = self.jobs {
            config = config.with_max_threads(jobs);
        }
        if self.no_parallel {
            config = config.with_parallel(false);
        }
        if let Some(level) = &self.log_level {
            config = config.with_log_level(level);
        }

        Ok(config)
    }
}
