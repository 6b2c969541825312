// Sat Oct 17 2026 - Alex

pub mod error;
pub mod object;
pub mod sections;

pub use error::BinaryError;
pub use object::ObjectFile;
pub use sections::{DebugSections, ObjectFormat};
