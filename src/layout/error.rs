// Sat Oct 17 2026 - Alex

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LayoutError {
    #[error("Duplicate type offset: 0x{0:x}")]
    DuplicateOffset(u64),
    #[error("Array type at 0x{0:x} has no dimensions")]
    EmptyArray(u64),
    #[error("Type cycle detected at 0x{0:x}")]
    Cycle(u64),
    #[error("Type at 0x{from:x} references unknown type 0x{target:x}")]
    UnresolvedReference { from: u64, target: u64 },
    #[error("Size of type at 0x{0:x} does not fit in 64 bits")]
    SizeOverflow(u64),
    #[error("Type at 0x{0:x} was not finalized")]
    Unfinalized(u64),
    #[error("Invalid type id: {0}")]
    InvalidTypeId(usize),
}
