// Sat Oct 17 2026 - Alex

use thiserror::Error;

#[derive(Error, Debug)]
pub enum DwarfError {
    #[error("DWARF read error: {0}")]
    Read(#[from] gimli::Error),
    #[error("DIE at 0x{offset:x} has no {attribute}")]
    MissingAttribute { offset: u64, attribute: &'static str },
    #[error("DIE at 0x{0:x} uses an unsupported type reference form")]
    UnsupportedReference(u64),
    #[error("DIE offset lies outside .debug_info")]
    InvalidOffset,
}
