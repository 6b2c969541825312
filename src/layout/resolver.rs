// Sat Oct 17 2026 - Alex

use crate::layout::error::LayoutError;
use crate::layout::node::{NodeKind, NodeState, Resolved, TypeId, TypeNode};
use crate::layout::registry::{ResolvedRegistry, TypeRegistry};
use std::mem;

/// Resolves a registry in place and hands back its resolved form.
pub fn resolve(mut registry: TypeRegistry) -> Result<ResolvedRegistry, LayoutError> {
    let order = {
        let mut resolver = Resolver::new(&mut registry);
        resolver.resolve_all()?;
        resolver.into_order()
    };
    registry.into_resolved(&order)
}

/// Binds raw DIE references to registry nodes and computes sizes.
///
/// Each node moves `Initial -> InProcess -> Finalized` exactly once. Meeting
/// a node that is still `InProcess` means its size depends on itself.
pub struct Resolver<'a> {
    registry: &'a mut TypeRegistry,
    order: Vec<TypeId>,
}

impl<'a> Resolver<'a> {
    pub fn new(registry: &'a mut TypeRegistry) -> Self {
        Self {
            registry,
            order: Vec::new(),
        }
    }

    /// Finalizes every node, walking the registry in insertion order.
    pub fn resolve_all(&mut self) -> Result<(), LayoutError> {
        let ids: Vec<TypeId> = self.registry.ids().collect();
        for id in ids {
            self.finalize(id)?;
        }
        log::debug!("Resolved {} types", self.order.len());
        Ok(())
    }

    /// Finalizes `id` and everything it references, returning its byte size.
    /// Calling this on a finalized node returns the memoized size.
    pub fn finalize(&mut self, id: TypeId) -> Result<u64, LayoutError> {
        let node = self.node_mut(id)?;
        let offset = node.offset;

        let kind = match mem::replace(&mut node.state, NodeState::InProcess) {
            NodeState::Initial(kind) => kind,
            NodeState::InProcess => return Err(LayoutError::Cycle(offset)),
            NodeState::Finalized(resolved) => {
                let byte_size = resolved.byte_size;
                node.state = NodeState::Finalized(resolved);
                return Ok(byte_size);
            }
        };

        let resolved = match kind {
            NodeKind::Primitive { byte_size } => Resolved {
                byte_size,
                kind: NodeKind::Primitive { byte_size },
            },
            NodeKind::Struct { byte_size, fields } => {
                let mut bound = Vec::with_capacity(fields.len());
                for field in &fields {
                    let (target, _) = self.bind(offset, field.ty)?;
                    bound.push(field.bind(target));
                }
                Resolved {
                    byte_size,
                    kind: NodeKind::Struct { byte_size, fields: bound },
                }
            }
            NodeKind::Array { item, dimensions } => {
                let (item, item_size) = self.bind(offset, item)?;
                let byte_size = dimensions
                    .iter()
                    .try_fold(item_size, |size, &extent| size.checked_mul(extent))
                    .ok_or(LayoutError::SizeOverflow(offset))?;
                Resolved {
                    byte_size,
                    kind: NodeKind::Array { item, dimensions },
                }
            }
            NodeKind::Typedef { alias } => {
                let (alias, byte_size) = self.bind(offset, alias)?;
                Resolved {
                    byte_size,
                    kind: NodeKind::Typedef { alias },
                }
            }
        };

        let byte_size = resolved.byte_size;
        log::trace!("Finalized {} at 0x{:x}: {} bytes", resolved.kind.variant_name(), offset, byte_size);

        self.node_mut(id)?.state = NodeState::Finalized(resolved);
        self.order.push(id);
        Ok(byte_size)
    }

    /// Completion order, dependencies before dependents.
    pub fn order(&self) -> &[TypeId] {
        &self.order
    }

    pub fn into_order(self) -> Vec<TypeId> {
        self.order
    }

    fn bind(&mut self, from: u64, target: u64) -> Result<(TypeId, u64), LayoutError> {
        let id = self
            .registry
            .lookup(target)
            .ok_or(LayoutError::UnresolvedReference { from, target })?;
        let byte_size = self.finalize(id)?;
        Ok((id, byte_size))
    }

    fn node_mut(&mut self, id: TypeId) -> Result<&mut TypeNode, LayoutError> {
        self.registry.get_mut(id).ok_or(LayoutError::InvalidTypeId(id.index()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dwarf::record::{MemberRecord, Subrange, TypeRecord};
    use crate::layout::node::ResolutionState;

    fn registry(records: Vec<TypeRecord>) -> TypeRegistry {
        TypeRegistry::from_records(&records).unwrap()
    }

    #[test]
    fn test_finalize_is_idempotent() {
        let mut types = registry(vec![
            TypeRecord::primitive(0x10, "char", 1),
            TypeRecord::primitive(0x18, "int", 4),
            TypeRecord::aggregate(
                0x20,
                Some("S"),
                8,
                vec![MemberRecord::field(0, 0x10, "a"), MemberRecord::field(4, 0x18, "b")],
            ),
        ]);
        let s = types.lookup(0x20).unwrap();

        let mut resolver = Resolver::new(&mut types);
        let first = resolver.finalize(s).unwrap();
        let second = resolver.finalize(s).unwrap();
        assert_eq!(first, 8);
        assert_eq!(first, second);
        assert_eq!(resolver.order().len(), 3);

        resolver.resolve_all().unwrap();
        let order = resolver.into_order();
        assert_eq!(order.len(), 3);

        let resolved = types.into_resolved(&order).unwrap();
        assert_eq!(resolved.byte_size(s), 8);
        assert!(resolved.has_padding(s));
    }

    #[test]
    fn test_state_transitions() {
        let mut types = registry(vec![
            TypeRecord::primitive(0x10, "int", 4),
            TypeRecord::typedef(0x20, "int_t", 0x10),
        ]);
        let alias = types.lookup(0x20).unwrap();
        let base = types.lookup(0x10).unwrap();

        Resolver::new(&mut types).finalize(alias).unwrap();
        assert_eq!(types.get(alias).unwrap().state(), ResolutionState::Finalized);
        assert_eq!(types.get(base).unwrap().state(), ResolutionState::Finalized);
        assert_eq!(types.get(alias).unwrap().resolved_size(), Some(4));
    }

    #[test]
    fn test_mutual_cycle_is_fatal() {
        let types = registry(vec![
            TypeRecord::primitive(0x10, "int", 4),
            TypeRecord::aggregate(
                0x20,
                Some("A"),
                8,
                vec![MemberRecord::field(0, 0x10, "x"), MemberRecord::field(4, 0x30, "b")],
            ),
            TypeRecord::aggregate(0x30, Some("B"), 8, vec![MemberRecord::field(0, 0x20, "a")]),
        ]);
        assert_eq!(resolve(types).unwrap_err(), LayoutError::Cycle(0x20));
    }

    #[test]
    fn test_typedef_self_cycle_is_fatal() {
        let types = registry(vec![
            TypeRecord::typedef(0x10, "loop_a", 0x20),
            TypeRecord::typedef(0x20, "loop_b", 0x10),
        ]);
        assert_eq!(resolve(types).unwrap_err(), LayoutError::Cycle(0x10));
    }

    #[test]
    fn test_unresolved_reference_is_fatal() {
        let types = registry(vec![TypeRecord::aggregate(
            0x20,
            Some("Dangling"),
            8,
            vec![MemberRecord::field(0, 0x99, "ptr")],
        )]);
        assert_eq!(
            resolve(types).unwrap_err(),
            LayoutError::UnresolvedReference { from: 0x20, target: 0x99 }
        );
    }

    #[test]
    fn test_reference_to_skipped_record_is_fatal() {
        let types = registry(vec![
            TypeRecord::other(0x10, "DW_TAG_pointer_type"),
            TypeRecord::typedef(0x20, "ptr_t", 0x10),
        ]);
        assert_eq!(
            resolve(types).unwrap_err(),
            LayoutError::UnresolvedReference { from: 0x20, target: 0x10 }
        );
    }

    #[test]
    fn test_diamond_resolves_shared_node_once() {
        let mut types = registry(vec![
            TypeRecord::aggregate(0x40, Some("Left"), 4, vec![MemberRecord::field(0, 0x20, "v")]),
            TypeRecord::aggregate(0x50, Some("Right"), 4, vec![MemberRecord::field(0, 0x20, "v")]),
            TypeRecord::typedef(0x20, "word", 0x10),
            TypeRecord::primitive(0x10, "int", 4),
            TypeRecord::aggregate(
                0x60,
                Some("Both"),
                8,
                vec![MemberRecord::field(0, 0x40, "l"), MemberRecord::field(4, 0x50, "r")],
            ),
        ]);
        let mut resolver = Resolver::new(&mut types);
        resolver.resolve_all().unwrap();

        let order = resolver.into_order();
        assert_eq!(order.len(), 5);
        let mut unique = order.clone();
        unique.sort();
        unique.dedup();
        assert_eq!(unique.len(), 5);

        // dependencies complete before their dependents
        let word = types.lookup(0x20).unwrap();
        let left = types.lookup(0x40).unwrap();
        let pos = |id| order.iter().position(|&o| o == id).unwrap();
        assert!(pos(word) < pos(left));
    }

    #[test]
    fn test_array_size_is_product_of_extents() {
        let types = resolve(registry(vec![
            TypeRecord::primitive(0x10, "short", 2),
            TypeRecord::array(0x20, 0x10, vec![Subrange::UpperBound(2), Subrange::Count(4)]),
            TypeRecord::array(0x30, 0x10, vec![Subrange::Count(0)]),
        ]))
        .unwrap();
        assert_eq!(types.byte_size(types.lookup(0x20).unwrap()), 24);
        assert_eq!(types.byte_size(types.lookup(0x30).unwrap()), 0);
    }

    #[test]
    fn test_zero_length_array() {
        let types = resolve(registry(vec![
            TypeRecord::primitive(0x10, "int", 4),
            TypeRecord::array(0x20, 0x10, vec![Subrange::UpperBound(u64::MAX)]),
        ]))
        .unwrap();
        let array = types.lookup(0x20).unwrap();
        assert_eq!(types.byte_size(array), 0);
        assert_eq!(types.describe(array), "int[0]");
    }

    #[test]
    fn test_oversized_array_is_an_error() {
        let types = registry(vec![
            TypeRecord::primitive(0x10, "long", 8),
            TypeRecord::array(0x20, 0x10, vec![Subrange::Count(1 << 62)]),
        ]);
        assert_eq!(resolve(types).unwrap_err(), LayoutError::SizeOverflow(0x20));

        let types = registry(vec![
            TypeRecord::primitive(0x10, "char", 1),
            TypeRecord::array(0x20, 0x10, vec![Subrange::Count(1 << 32), Subrange::Count(1 << 32)]),
        ]);
        assert_eq!(resolve(types).unwrap_err(), LayoutError::SizeOverflow(0x20));
    }

    #[test]
    fn test_foreign_type_id_is_rejected() {
        let mut larger = registry(vec![
            TypeRecord::primitive(0x10, "char", 1),
            TypeRecord::primitive(0x18, "int", 4),
        ]);
        let int = larger.lookup(0x18).unwrap();
        Resolver::new(&mut larger).finalize(int).unwrap();

        let mut smaller = registry(vec![TypeRecord::primitive(0x10, "char", 1)]);
        assert_eq!(
            Resolver::new(&mut smaller).finalize(int).unwrap_err(),
            LayoutError::InvalidTypeId(1)
        );
    }

    #[test]
    fn test_empty_registry() {
        let types = resolve(TypeRegistry::new()).unwrap();
        assert!(types.is_empty());
    }
}
