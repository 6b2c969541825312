// Sat Oct 17 2026 - Alex

use crate::binary::BinaryError;
use crate::dwarf::DwarfError;
use crate::layout::LayoutError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum PipelineError {
    #[error(transparent)]
    Binary(#[from] BinaryError),
    #[error("DWARF error: {0}")]
    Dwarf(#[from] DwarfError),
    #[error("Failed to analyze {unit}: {source}")]
    Layout {
        unit: String,
        #[source]
        source: LayoutError,
    },
    #[error("Thread pool error: {0}")]
    ThreadPool(String),
}

impl PipelineError {
    pub fn is_missing_debug_info(&self) -> bool {
        matches!(self, PipelineError::Binary(BinaryError::NoDebugInfo))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::binary::{DebugSections, ObjectFormat};

    #[test]
    fn test_object_without_debug_info() {
        let line: &[u8] = &[1, 2, 3];
        let sections = DebugSections::from_parts(ObjectFormat::Elf, true, vec![(".debug_line", line)]);

        let err: PipelineError = sections.require_debug_info().unwrap_err().into();
        assert!(err.is_missing_debug_info());
        assert_eq!(err.to_string(), "Object file has no dwarf info!");
    }

    #[test]
    fn test_object_with_debug_info() {
        let info: &[u8] = &[4];
        let sections = DebugSections::from_parts(ObjectFormat::Elf, true, vec![(".debug_info", info)]);
        assert!(sections.require_debug_info().is_ok());
    }

    #[test]
    fn test_layout_error_names_unit() {
        let err = PipelineError::Layout {
            unit: "a.c".to_string(),
            source: LayoutError::Cycle(0x20),
        };
        assert!(!err.is_missing_debug_info());
        assert_eq!(err.to_string(), "Failed to analyze a.c: Type cycle detected at 0x20");
    }
}
