// Sat Oct 17 2026 - Alex

use thiserror::Error;

#[derive(Error, Debug)]
pub enum BinaryError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Binary parse error: {0}")]
    ParseError(String),
    #[error("Not supported: {0}")]
    Unsupported(String),
    #[error("Compressed debug section {0} is not supported")]
    CompressedSection(String),
    #[error("Section {0} lies outside the file")]
    SectionOutOfBounds(String),
    #[error("Object file has no dwarf info!")]
    NoDebugInfo,
}

impl From<goblin::error::Error> for BinaryError {
    fn from(e: goblin::error::Error) -> Self {
        BinaryError::ParseError(e.to_string())
    }
}
