// Sat Oct 17 2026 - Alex

pub mod error;
pub mod node;
pub mod padding;
pub mod registry;
pub mod resolver;

pub use error::LayoutError;
pub use node::{Field, NodeKind, ResolutionState, ResolvedType, TypeId, TypeNode};
pub use padding::PaddingGap;
pub use registry::{ResolvedRegistry, TypeRegistry};
pub use resolver::{resolve, Resolver};

use crate::dwarf::CompileUnit;

/// Builds and resolves the type graph of one compile unit.
pub fn analyze_unit(unit: &CompileUnit) -> Result<ResolvedRegistry, LayoutError> {
    log::debug!("Analyzing {} ({} records)", unit.name, unit.records.len());
    let registry = TypeRegistry::from_records(&unit.records)?;
    resolve(registry)
}
