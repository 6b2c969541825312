// Sat Oct 17 2026 - Alex

use std::fmt;
use std::path::PathBuf;

/// One compile unit as handed over by the extractor: a flat list of type
/// records in DIE order plus enough of the root DIE to name the unit.
#[derive(Debug, Clone, Default)]
pub struct CompileUnit {
    pub name: String,
    pub comp_dir: Option<String>,
    pub records: Vec<TypeRecord>,
}

impl CompileUnit {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            comp_dir: None,
            records: Vec::new(),
        }
    }

    pub fn with_comp_dir(mut self, comp_dir: &str) -> Self {
        self.comp_dir = Some(comp_dir.to_string());
        self
    }

    pub fn with_records(mut self, records: Vec<TypeRecord>) -> Self {
        self.records = records;
        self
    }

    pub fn push(&mut self, record: TypeRecord) {
        self.records.push(record);
    }

    /// Source path of the unit, joined onto the compilation directory when
    /// the producer recorded one.
    pub fn location(&self) -> PathBuf {
        match &self.comp_dir {
            Some(dir) => PathBuf::from(dir).join(&self.name),
            None => PathBuf::from(&self.name),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeRecord {
    pub offset: u64,
    pub decl_line: Option<u64>,
    pub kind: RecordKind,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecordKind {
    Aggregate {
        name: Option<String>,
        byte_size: u64,
        members: Vec<MemberRecord>,
    },
    Primitive {
        name: String,
        byte_size: u64,
    },
    Typedef {
        name: String,
        alias: u64,
    },
    Array {
        item: u64,
        dimensions: Vec<Subrange>,
    },
    Other {
        tag: String,
    },
}

impl TypeRecord {
    pub fn primitive(offset: u64, name: &str, byte_size: u64) -> Self {
        Self::new(offset, RecordKind::Primitive {
            name: name.to_string(),
            byte_size,
        })
    }

    pub fn aggregate(offset: u64, name: Option<&str>, byte_size: u64, members: Vec<MemberRecord>) -> Self {
        Self::new(offset, RecordKind::Aggregate {
            name: name.map(str::to_string),
            byte_size,
            members,
        })
    }

    pub fn typedef(offset: u64, name: &str, alias: u64) -> Self {
        Self::new(offset, RecordKind::Typedef {
            name: name.to_string(),
            alias,
        })
    }

    pub fn array(offset: u64, item: u64, dimensions: Vec<Subrange>) -> Self {
        Self::new(offset, RecordKind::Array { item, dimensions })
    }

    pub fn other(offset: u64, tag: &str) -> Self {
        Self::new(offset, RecordKind::Other { tag: tag.to_string() })
    }

    pub fn with_decl_line(mut self, line: u64) -> Self {
        self.decl_line = Some(line);
        self
    }

    fn new(offset: u64, kind: RecordKind) -> Self {
        Self {
            offset,
            decl_line: None,
            kind,
        }
    }

    pub fn kind_name(&self) -> &str {
        match &self.kind {
            RecordKind::Aggregate { .. } => "aggregate",
            RecordKind::Primitive { .. } => "primitive",
            RecordKind::Typedef { .. } => "typedef",
            RecordKind::Array { .. } => "array",
            RecordKind::Other { tag } => tag,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MemberKind {
    Field,
    Base,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemberRecord {
    pub offset: u64,
    pub type_ref: u64,
    pub name: Option<String>,
    pub kind: MemberKind,
}

impl MemberRecord {
    pub fn field(offset: u64, type_ref: u64, name: &str) -> Self {
        Self {
            offset,
            type_ref,
            name: Some(name.to_string()),
            kind: MemberKind::Field,
        }
    }

    pub fn unnamed(offset: u64, type_ref: u64) -> Self {
        Self {
            offset,
            type_ref,
            name: None,
            kind: MemberKind::Field,
        }
    }

    pub fn base(offset: u64, type_ref: u64) -> Self {
        Self {
            offset,
            type_ref,
            name: None,
            kind: MemberKind::Base,
        }
    }
}

/// Array dimension. Producers give either an inclusive upper bound or an
/// element count; a flexible array member is a zero count. GCC writes
/// `T a[0]` as an upper bound of -1, which wraps to an extent of 0.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Subrange {
    UpperBound(u64),
    Count(u64),
}

impl Subrange {
    pub fn extent(self) -> u64 {
        match self {
            Subrange::UpperBound(bound) => bound.wrapping_add(1),
            Subrange::Count(count) => count,
        }
    }
}

impl fmt::Display for Subrange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}]", self.extent())
    }
}
