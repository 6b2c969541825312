// Sat Oct 17 2026 - Alex

use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

const LOG_LEVELS: &[&str] = &["off", "error", "warn", "info", "debug", "trace"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ColorMode {
    Auto,
    Always,
    Never,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub color: ColorMode,
    pub format: OutputFormat,
    pub padded_only: bool,
    pub parallel: bool,
    pub max_threads: usize,
    pub log_level: String,
    pub pretty_json: bool,
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Parse error: {0}")]
    ParseError(#[from] serde_json::Error),
}

impl Default for Config {
    fn default() -> Self {
        Self {
            color: ColorMode::Auto,
            format: OutputFormat::Text,
            padded_only: false,
            parallel: true,
            max_threads: num_cpus::get(),
            log_level: "warn".to_string(),
            pretty_json: true,
        }
    }
}

impl Config {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reads a JSON config file. Missing keys keep their defaults.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&text)?)
    }

    pub fn with_color(mut self, color: ColorMode) -> Self {
        self.color = color;
        self
    }

    pub fn with_format(mut self, format: OutputFormat) -> Self {
        self.format = format;
        self
    }

    pub fn with_padded_only(mut self, padded_only: bool) -> Self {
        self.padded_only = padded_only;
        self
    }

    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    pub fn with_max_threads(mut self, max_threads: usize) -> Self {
        self.max_threads = max_threads;
        self
    }

    pub fn with_log_level(mut self, level: &str) -> Self {
        self.log_level = level.to_string();
        self
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.max_threads == 0 {
            return Err("max_threads must be greater than 0".to_string());
        }
        if !LOG_LEVELS.contains(&self.log_level.to_lowercase().as_str()) {
            return Err(format!("unknown log level '{}'", self.log_level));
        }
        Ok(())
    }

    pub fn log_filter(&self) -> log::LevelFilter {
        match self.log_level.to_lowercase().as_str() {
            "off" => log::LevelFilter::Off,
            "error" => log::LevelFilter::Error,
            "info" => log::LevelFilter::Info,
            "debug" => log::LevelFilter::Debug,
            "trace" => log::LevelFilter::Trace,
            _ => log::LevelFilter::Warn,
        }
    }

    /// Whether report output should carry ANSI colors.
    pub fn use_color(&self) -> bool {
        match self.color {
            ColorMode::Always => true,
            ColorMode::Never => false,
            ColorMode::Auto => atty::is(atty::Stream::Stdout),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        let config = Config::default();
        assert!(config.validate().is_ok());
        assert!(config.max_threads > 0);
        assert_eq!(config.format, OutputFormat::Text);
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        assert!(Config::new().with_max_threads(0).validate().is_err());
        assert!(Config::new().with_log_level("loud").validate().is_err());
        assert!(Config::new().with_log_level("DEBUG").validate().is_ok());
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let config: Config = serde_json::from_str(r#"{ "format": "json", "padded_only": true }"#).unwrap();
        assert_eq!(config.format, OutputFormat::Json);
        assert!(config.padded_only);
        assert!(config.parallel);
        assert_eq!(config.color, ColorMode::Auto);
    }

    #[test]
    fn test_explicit_color_modes() {
        assert!(Config::new().with_color(ColorMode::Always).use_color());
        assert!(!Config::new().with_color(ColorMode::Never).use_color());
    }

    #[test]
    fn test_log_filter() {
        assert_eq!(Config::new().log_filter(), log::LevelFilter::Warn);
        assert_eq!(Config::new().with_log_level("Trace").log_filter(), log::LevelFilter::Trace);
    }
}
