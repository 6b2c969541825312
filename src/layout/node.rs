// Sat Oct 17 2026 - Alex

use std::fmt;

/// Name given to inheritance-base fields, which carry no name of their own.
pub const BASE_FIELD_NAME: &str = "<base>";
pub const ANONYMOUS_NAME: &str = "<anonymous>";

/// Index of a node inside its compile unit's registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TypeId(pub(crate) usize);

impl TypeId {
    pub fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for TypeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A struct member. `R` is the raw DIE offset before resolution and a
/// [`TypeId`] afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Field<R> {
    pub offset: u64,
    pub ty: R,
    pub name: String,
}

impl<R> Field<R> {
    pub fn new(offset: u64, ty: R, name: &str) -> Self {
        Self {
            offset,
            ty,
            name: name.to_string(),
        }
    }

    pub(crate) fn bind<T>(&self, ty: T) -> Field<T> {
        Field {
            offset: self.offset,
            ty,
            name: self.name.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NodeKind<R> {
    Primitive {
        byte_size: u64,
    },
    Struct {
        byte_size: u64,
        fields: Vec<Field<R>>,
    },
    Array {
        item: R,
        dimensions: Vec<u64>,
    },
    Typedef {
        alias: R,
    },
}

impl<R> NodeKind<R> {
    pub fn variant_name(&self) -> &'static str {
        match self {
            NodeKind::Primitive { .. } => "primitive",
            NodeKind::Struct { .. } => "struct",
            NodeKind::Array { .. } => "array",
            NodeKind::Typedef { .. } => "typedef",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResolutionState {
    Initial,
    InProcess,
    Finalized,
}

/// Resolution progress of a node. The raw kind is consumed when resolution
/// starts; the byte size only exists once the node is finalized.
#[derive(Debug, Clone)]
pub(crate) enum NodeState {
    Initial(NodeKind<u64>),
    InProcess,
    Finalized(Resolved),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Resolved {
    pub byte_size: u64,
    pub kind: NodeKind<TypeId>,
}

#[derive(Debug, Clone)]
pub struct TypeNode {
    pub offset: u64,
    pub name: Option<String>,
    pub decl_line: Option<u64>,
    pub(crate) state: NodeState,
}

impl TypeNode {
    pub fn new(offset: u64, name: Option<String>, kind: NodeKind<u64>) -> Self {
        Self {
            offset,
            name,
            decl_line: None,
            state: NodeState::Initial(kind),
        }
    }

    pub fn with_decl_line(mut self, line: Option<u64>) -> Self {
        self.decl_line = line;
        self
    }

    pub fn state(&self) -> ResolutionState {
        match self.state {
            NodeState::Initial(_) => ResolutionState::Initial,
            NodeState::InProcess => ResolutionState::InProcess,
            NodeState::Finalized(_) => ResolutionState::Finalized,
        }
    }

    /// Resolved size, `None` until the node has been finalized.
    pub fn resolved_size(&self) -> Option<u64> {
        match &self.state {
            NodeState::Finalized(resolved) => Some(resolved.byte_size),
            _ => None,
        }
    }
}

/// A finalized node, as exposed by [`ResolvedRegistry`](super::ResolvedRegistry).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedType {
    pub offset: u64,
    pub name: Option<String>,
    pub decl_line: Option<u64>,
    pub byte_size: u64,
    pub kind: NodeKind<TypeId>,
}

impl ResolvedType {
    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or(ANONYMOUS_NAME)
    }

    pub fn fields(&self) -> &[Field<TypeId>] {
        match &self.kind {
            NodeKind::Struct { fields, .. } => fields,
            _ => &[],
        }
    }

    pub fn is_struct(&self) -> bool {
        matches!(self.kind, NodeKind::Struct { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_variant_names() {
        let kind: NodeKind<u64> = NodeKind::Struct {
            byte_size: 8,
            fields: vec![Field::new(0, 0x30, "a"), Field::new(4, 0x20, "b")],
        };
        assert_eq!(kind.variant_name(), "struct");
        assert_eq!(NodeKind::Typedef { alias: 0x10u64 }.variant_name(), "typedef");
    }

    #[test]
    fn test_field_bind_keeps_layout() {
        let raw = Field::new(4, 0x20u64, "b");
        let bound = raw.bind(TypeId(2));
        assert_eq!(bound, Field::new(4, TypeId(2), "b"));
    }

    #[test]
    fn test_new_node_is_initial() {
        let node = TypeNode::new(0x10, Some("int".into()), NodeKind::Primitive { byte_size: 4 });
        assert_eq!(node.state(), ResolutionState::Initial);
        assert_eq!(node.resolved_size(), None);
    }
}
