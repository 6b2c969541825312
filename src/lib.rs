// Sat Oct 17 2026 - Alex

pub mod binary;
pub mod config;
pub mod dwarf;
pub mod engine;
pub mod layout;
pub mod output;
pub mod ui;

pub use config::Config;
pub use engine::{Pipeline, UnitAnalysis};
pub use layout::{analyze_unit, ResolvedRegistry, TypeRegistry};
pub use output::{JsonReporter, Reporter, TextReporter};
