// Sat Oct 17 2026 - Alex

use crate::layout::node::{Field, NodeKind, ResolvedType, TypeId};
use itertools::Itertools;
use serde::Serialize;
use std::fmt;

/// One run of unused bytes inside a struct.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PaddingGap {
    Between {
        field: String,
        start: u64,
        end: u64,
        next_field: String,
        next_offset: u64,
        size: u64,
    },
    Trailing {
        field: String,
        start: u64,
        end: u64,
        size: u64,
    },
}

impl PaddingGap {
    pub fn size(&self) -> u64 {
        match self {
            PaddingGap::Between { size, .. } | PaddingGap::Trailing { size, .. } => *size,
        }
    }

    pub fn field(&self) -> &str {
        match self {
            PaddingGap::Between { field, .. } | PaddingGap::Trailing { field, .. } => field,
        }
    }

    pub fn is_trailing(&self) -> bool {
        matches!(self, PaddingGap::Trailing { .. })
    }
}

impl fmt::Display for PaddingGap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PaddingGap::Between { field, start, end, next_field, next_offset, .. } => write!(
                f,
                "Padding between '{}', which spans {}:{}, and '{}', which starts at {}",
                field, start, end, next_field, next_offset
            ),
            PaddingGap::Trailing { field, start, end, .. } => {
                write!(f, "Trailing padding after member '{}', which spans {}:{}", field, start, end)
            }
        }
    }
}

/// Padding rule for a finalized node. `padded` must already hold the answer
/// for every node `ty` references.
///
/// A struct is padded when its declared size differs from the sum of its
/// member sizes, or when any member is itself padded; nested padding marks
/// every enclosing aggregate.
pub fn has_padding(ty: &ResolvedType, types: &[ResolvedType], padded: &[bool]) -> bool {
    match &ty.kind {
        NodeKind::Primitive { .. } => false,
        NodeKind::Typedef { alias } => padded[alias.index()],
        NodeKind::Array { item, .. } => padded[item.index()],
        NodeKind::Struct { byte_size, fields } => {
            let occupied: u128 = fields.iter().map(|f| u128::from(types[f.ty.index()].byte_size)).sum();
            u128::from(*byte_size) != occupied || fields.iter().any(|f| padded[f.ty.index()])
        }
    }
}

/// Gaps between consecutive fields and after the last one, in declaration
/// order. Only structs have gaps of their own.
pub fn padding_gaps(ty: &ResolvedType, types: &[ResolvedType]) -> Vec<PaddingGap> {
    let fields = match &ty.kind {
        NodeKind::Struct { fields, .. } => fields,
        _ => return Vec::new(),
    };

    // Ends may pass u64::MAX; a positive gap always ends below it.
    let end_of = |field: &Field<TypeId>| i128::from(field.offset) + i128::from(types[field.ty.index()].byte_size);

    let mut gaps: Vec<PaddingGap> = fields
        .iter()
        .tuple_windows()
        .filter_map(|(cur, next)| {
            let end = end_of(cur);
            let gap = i128::from(next.offset) - end;
            (gap > 0).then(|| PaddingGap::Between {
                field: cur.name.clone(),
                start: cur.offset,
                end: end as u64,
                next_field: next.name.clone(),
                next_offset: next.offset,
                size: gap as u64,
            })
        })
        .collect();

    if let Some(last) = fields.last() {
        let end = end_of(last);
        let trailing = i128::from(ty.byte_size) - end;
        if trailing > 0 {
            gaps.push(PaddingGap::Trailing {
                field: last.name.clone(),
                start: last.offset,
                end: end as u64,
                size: trailing as u64,
            });
        }
    }

    gaps
}
