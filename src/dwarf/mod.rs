// Sat Oct 17 2026 - Alex

pub mod error;
pub mod extract;
pub mod record;

pub use error::DwarfError;
pub use extract::extract_units;
pub use record::{CompileUnit, MemberKind, MemberRecord, RecordKind, Subrange, TypeRecord};
