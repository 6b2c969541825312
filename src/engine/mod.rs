// Sat Oct 17 2026 - Alex

pub mod error;
pub mod pipeline;

pub use error::PipelineError;
pub use pipeline::{Pipeline, UnitAnalysis};
