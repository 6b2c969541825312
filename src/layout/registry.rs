// Sat Oct 17 2026 - Alex

use crate::dwarf::record::{MemberKind, RecordKind, TypeRecord};
use crate::layout::error::LayoutError;
use crate::layout::node::{
    Field, NodeKind, NodeState, ResolvedType, TypeId, TypeNode, ANONYMOUS_NAME, BASE_FIELD_NAME,
};
use crate::layout::padding::{self, PaddingGap};
use indexmap::map::Entry;
use indexmap::{IndexMap, IndexSet};

/// All modeled type nodes of one compile unit, keyed by DIE offset in the
/// order they were first seen.
#[derive(Debug, Default)]
pub struct TypeRegistry {
    nodes: IndexMap<u64, TypeNode>,
}

impl TypeRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds the registry from a unit's records in one pass. Records that
    /// are not aggregates, primitives, typedefs or arrays are skipped.
    pub fn from_records<'a, I>(records: I) -> Result<Self, LayoutError>
    where
        I: IntoIterator<Item = &'a TypeRecord>,
    {
        let mut registry = Self::new();
        let mut skipped = 0usize;

        for record in records {
            match Self::node_from_record(record)? {
                Some(node) => {
                    registry.insert(node)?;
                }
                None => {
                    log::trace!("Skipping {} record at 0x{:x}", record.kind_name(), record.offset);
                    skipped += 1;
                }
            }
        }

        log::debug!("Registered {} types, skipped {} records", registry.len(), skipped);
        Ok(registry)
    }

    fn node_from_record(record: &TypeRecord) -> Result<Option<TypeNode>, LayoutError> {
        let (name, kind) = match &record.kind {
            RecordKind::Primitive { name, byte_size } => {
                (Some(name.clone()), NodeKind::Primitive { byte_size: *byte_size })
            }
            RecordKind::Aggregate { name, byte_size, members } => {
                let fields = members
                    .iter()
                    .map(|member| {
                        let field_name = match member.kind {
                            MemberKind::Base => BASE_FIELD_NAME,
                            MemberKind::Field => member.name.as_deref().unwrap_or(ANONYMOUS_NAME),
                        };
                        Field::new(member.offset, member.type_ref, field_name)
                    })
                    .collect();
                (name.clone(), NodeKind::Struct { byte_size: *byte_size, fields })
            }
            RecordKind::Typedef { name, alias } => (Some(name.clone()), NodeKind::Typedef { alias: *alias }),
            RecordKind::Array { item, dimensions } => {
                if dimensions.is_empty() {
                    return Err(LayoutError::EmptyArray(record.offset));
                }
                let dimensions = dimensions.iter().map(|d| d.extent()).collect();
                (None, NodeKind::Array { item: *item, dimensions })
            }
            RecordKind::Other { .. } => return Ok(None),
        };

        Ok(Some(TypeNode::new(record.offset, name, kind).with_decl_line(record.decl_line)))
    }

    pub fn insert(&mut self, node: TypeNode) -> Result<TypeId, LayoutError> {
        match self.nodes.entry(node.offset) {
            Entry::Occupied(_) => Err(LayoutError::DuplicateOffset(node.offset)),
            Entry::Vacant(slot) => {
                let id = TypeId(slot.index());
                slot.insert(node);
                Ok(id)
            }
        }
    }

    pub fn lookup(&self, offset: u64) -> Option<TypeId> {
        self.nodes.get_index_of(&offset).map(TypeId)
    }

    pub fn get(&self, id: TypeId) -> Option<&TypeNode> {
        self.nodes.get_index(id.0).map(|(_, node)| node)
    }

    pub(crate) fn get_mut(&mut self, id: TypeId) -> Option<&mut TypeNode> {
        self.nodes.get_index_mut(id.0).map(|(_, node)| node)
    }

    pub fn ids(&self) -> impl Iterator<Item = TypeId> {
        (0..self.nodes.len()).map(TypeId)
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Converts a fully finalized registry into its resolved form.
    /// `order` lists nodes dependencies-first, as the resolver completed them.
    pub(crate) fn into_resolved(self, order: &[TypeId]) -> Result<ResolvedRegistry, LayoutError> {
        let offsets: IndexSet<u64> = self.nodes.keys().copied().collect();
        let types = self
            .nodes
            .into_iter()
            .map(|(offset, node)| match node.state {
                NodeState::Finalized(resolved) => Ok(ResolvedType {
                    offset,
                    name: node.name,
                    decl_line: node.decl_line,
                    byte_size: resolved.byte_size,
                    kind: resolved.kind,
                }),
                _ => Err(LayoutError::Unfinalized(offset)),
            })
            .collect::<Result<Vec<_>, _>>()?;

        let mut padded = vec![false; types.len()];
        for &id in order {
            padded[id.0] = padding::has_padding(&types[id.0], &types, &padded);
        }

        Ok(ResolvedRegistry { offsets, types, padded })
    }
}

/// Registry whose nodes are all finalized. Sizes, padding and descriptions
/// are only available here.
#[derive(Debug, Clone)]
pub struct ResolvedRegistry {
    // same order as `types`, so a set index is a `TypeId`
    offsets: IndexSet<u64>,
    types: Vec<ResolvedType>,
    padded: Vec<bool>,
}

impl ResolvedRegistry {
    pub fn len(&self) -> usize {
        self.types.len()
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }

    pub fn get(&self, id: TypeId) -> &ResolvedType {
        &self.types[id.0]
    }

    pub fn lookup(&self, offset: u64) -> Option<TypeId> {
        self.offsets.get_index_of(&offset).map(TypeId)
    }

    pub fn iter(&self) -> impl Iterator<Item = (TypeId, &ResolvedType)> {
        self.types.iter().enumerate().map(|(i, t)| (TypeId(i), t))
    }

    pub fn byte_size(&self, id: TypeId) -> u64 {
        self.types[id.0].byte_size
    }

    pub fn has_padding(&self, id: TypeId) -> bool {
        self.padded[id.0]
    }

    pub fn padding_gaps(&self, id: TypeId) -> Vec<PaddingGap> {
        padding::padding_gaps(&self.types[id.0], &self.types)
    }

    pub fn padded_types(&self) -> impl Iterator<Item = (TypeId, &ResolvedType)> {
        self.iter().filter(move |(id, _)| self.padded[id.0])
    }

    /// Full description: structs list their members, arrays their extents.
    pub fn describe(&self, id: TypeId) -> String {
        let ty = self.get(id);
        match &ty.kind {
            NodeKind::Primitive { .. } | NodeKind::Typedef { .. } => ty.display_name().to_string(),
            NodeKind::Struct { fields, .. } => {
                if fields.is_empty() {
                    return ty.display_name().to_string();
                }
                let members: Vec<String> = fields.iter().map(|f| self.label(f.ty)).collect();
                format!("{}({})", ty.display_name(), members.join(", "))
            }
            NodeKind::Array { item, dimensions } => {
                let mut text = self.get(*item).display_name().to_string();
                for d in dimensions {
                    text.push_str(&format!("[{}]", d));
                }
                text
            }
        }
    }

    /// Short form used inside other descriptions and in diagnostics: a
    /// struct is just its name.
    pub fn label(&self, id: TypeId) -> String {
        let ty = self.get(id);
        if ty.is_struct() {
            ty.display_name().to_string()
        } else {
            self.describe(id)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dwarf::record::{MemberRecord, Subrange};
    use crate::layout::node::ResolutionState;
    use crate::layout::resolver::resolve;

    #[test]
    fn test_registry_keeps_first_seen_order() {
        let records = vec![
            TypeRecord::typedef(0x40, "u32", 0x10),
            TypeRecord::primitive(0x10, "unsigned int", 4),
            TypeRecord::primitive(0x20, "char", 1),
        ];
        let registry = TypeRegistry::from_records(&records).unwrap();
        let offsets: Vec<u64> = registry.ids().map(|id| registry.get(id).unwrap().offset).collect();
        assert_eq!(offsets, vec![0x40, 0x10, 0x20]);
        assert_eq!(registry.lookup(0x10), Some(TypeId(1)));
        assert_eq!(registry.lookup(0x99), None);
    }

    #[test]
    fn test_resolved_lookup_matches_registry_ids() {
        let records = vec![
            TypeRecord::typedef(0x40, "u32", 0x10),
            TypeRecord::primitive(0x10, "unsigned int", 4),
            TypeRecord::other(0x18, "DW_TAG_pointer_type"),
            TypeRecord::primitive(0x20, "char", 1),
        ];
        let registry = TypeRegistry::from_records(&records).unwrap();
        let expected: Vec<(u64, TypeId)> = [0x40, 0x10, 0x20]
            .iter()
            .map(|&offset| (offset, registry.lookup(offset).unwrap()))
            .collect();

        let types = resolve(registry).unwrap();
        for (offset, id) in expected {
            assert_eq!(types.lookup(offset), Some(id));
            assert_eq!(types.get(id).offset, offset);
        }
        assert_eq!(types.lookup(0x18), None);
    }

    #[test]
    fn test_registry_skips_unmodeled_records() {
        let records = vec![
            TypeRecord::primitive(0x10, "int", 4),
            TypeRecord::other(0x18, "DW_TAG_pointer_type"),
            TypeRecord::other(0x20, "DW_TAG_subprogram"),
            TypeRecord::other(0x28, "DW_TAG_union_type"),
        ];
        let registry = TypeRegistry::from_records(&records).unwrap();
        assert_eq!(registry.len(), 1);
        assert!(registry.ids().all(|id| registry.get(id).unwrap().state() == ResolutionState::Initial));
    }

    #[test]
    fn test_duplicate_offset_is_rejected() {
        let records = vec![
            TypeRecord::primitive(0x10, "int", 4),
            TypeRecord::primitive(0x10, "long", 8),
        ];
        let err = TypeRegistry::from_records(&records).unwrap_err();
        assert_eq!(err, LayoutError::DuplicateOffset(0x10));
    }

    #[test]
    fn test_array_without_dimensions_is_rejected() {
        let records = vec![
            TypeRecord::primitive(0x10, "int", 4),
            TypeRecord::array(0x20, 0x10, Vec::new()),
        ];
        let err = TypeRegistry::from_records(&records).unwrap_err();
        assert_eq!(err, LayoutError::EmptyArray(0x20));
    }

    #[test]
    fn test_member_names() {
        let records = vec![
            TypeRecord::primitive(0x10, "int", 4),
            TypeRecord::aggregate(0x20, Some("Base"), 4, vec![MemberRecord::field(0, 0x10, "id")]),
            TypeRecord::aggregate(
                0x30,
                Some("Derived"),
                12,
                vec![
                    MemberRecord::base(0, 0x20),
                    MemberRecord::unnamed(4, 0x10),
                    MemberRecord::field(8, 0x10, "count"),
                ],
            ),
        ];
        let types = resolve(TypeRegistry::from_records(&records).unwrap()).unwrap();
        let derived = types.get(types.lookup(0x30).unwrap());
        let names: Vec<&str> = derived.fields().iter().map(|f| f.name.as_str()).collect();
        assert_eq!(names, vec!["<base>", "<anonymous>", "count"]);
    }

    #[test]
    fn test_describe() {
        let records = vec![
            TypeRecord::primitive(0x10, "int", 4),
            TypeRecord::primitive(0x18, "char", 1),
            TypeRecord::aggregate(
                0x20,
                Some("Inner"),
                8,
                vec![MemberRecord::field(0, 0x18, "tag"), MemberRecord::field(4, 0x10, "value")],
            ),
            TypeRecord::array(0x30, 0x10, vec![Subrange::UpperBound(1), Subrange::UpperBound(2)]),
            TypeRecord::typedef(0x38, "inner_t", 0x20),
            TypeRecord::aggregate(
                0x40,
                Some("Outer"),
                32,
                vec![
                    MemberRecord::field(0, 0x20, "inner"),
                    MemberRecord::field(8, 0x30, "grid"),
                    MemberRecord::field(32, 0x38, "alias"),
                ],
            ),
            TypeRecord::aggregate(0x50, None, 0, Vec::new()),
            TypeRecord::array(0x58, 0x30, vec![Subrange::Count(2)]),
        ];
        let types = resolve(TypeRegistry::from_records(&records).unwrap()).unwrap();
        let describe = |offset| types.describe(types.lookup(offset).unwrap());

        assert_eq!(describe(0x10), "int");
        assert_eq!(describe(0x20), "Inner(char, int)");
        assert_eq!(describe(0x30), "int[2][3]");
        assert_eq!(describe(0x38), "inner_t");
        assert_eq!(describe(0x40), "Outer(Inner, int[2][3], inner_t)");
        assert_eq!(describe(0x50), "<anonymous>");
        assert_eq!(describe(0x58), "<anonymous>[2]");
        assert_eq!(types.label(types.lookup(0x40).unwrap()), "Outer");
    }
}
