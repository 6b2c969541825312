// Sat Oct 17 2026 - Alex

use crate::binary::DebugSections;
use crate::dwarf::error::DwarfError;
use crate::dwarf::record::{CompileUnit, MemberRecord, RecordKind, Subrange, TypeRecord};
use gimli::{AttributeValue, EndianSlice, Reader, RunTimeEndian, UnitOffset};

type Slice<'a> = EndianSlice<'a, RunTimeEndian>;
type Entry<'e, 'a> = gimli::DebuggingInformationEntry<'e, 'e, Slice<'a>>;

const UNKNOWN_UNIT: &str = "<unknown>";

/// Walks every unit in `.debug_info` and flattens its DIE tree into type
/// records, in DIE order.
pub fn extract_units<'a>(sections: &DebugSections<'a>) -> Result<Vec<CompileUnit>, DwarfError> {
    let endian = sections.endian();
    let dwarf = gimli::Dwarf::load(|id| -> Result<Slice<'a>, gimli::Error> {
        Ok(EndianSlice::new(sections.section(id.name()), endian))
    })?;

    let mut units = Vec::new();
    let mut headers = dwarf.units();
    while let Some(header) = headers.next()? {
        let unit = dwarf.unit(header)?;
        let extracted = UnitExtractor::new(&dwarf, &unit).extract()?;
        log::debug!("Extracted {} records from {}", extracted.records.len(), extracted.name);
        units.push(extracted);
    }

    log::info!("Found {} compile units", units.len());
    Ok(units)
}

struct UnitExtractor<'d, 'a> {
    dwarf: &'d gimli::Dwarf<Slice<'a>>,
    unit: &'d gimli::Unit<Slice<'a>>,
}

impl<'d, 'a> UnitExtractor<'d, 'a> {
    fn new(dwarf: &'d gimli::Dwarf<Slice<'a>>, unit: &'d gimli::Unit<Slice<'a>>) -> Self {
        Self { dwarf, unit }
    }

    fn extract(&self) -> Result<CompileUnit, DwarfError> {
        let name = self
            .unit
            .name
            .as_ref()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| UNKNOWN_UNIT.to_string());
        let mut compile_unit = CompileUnit::new(&name);
        compile_unit.comp_dir = self.unit.comp_dir.as_ref().map(|dir| dir.to_string_lossy().into_owned());

        let mut records: Vec<TypeRecord> = Vec::new();
        // (depth, record index) of aggregates and arrays whose children are
        // still being visited
        let mut open: Vec<(isize, usize)> = Vec::new();
        let mut depth: isize = 0;

        let mut entries = self.unit.entries();
        while let Some((delta, entry)) = entries.next_dfs()? {
            depth += delta;
            while matches!(open.last(), Some(&(open_depth, _)) if open_depth >= depth) {
                open.pop();
            }
            let parent = match open.last() {
                Some(&(open_depth, index)) if open_depth == depth - 1 => Some(index),
                _ => None,
            };

            let tag = entry.tag();
            if tag == gimli::DW_TAG_compile_unit || tag == gimli::DW_TAG_partial_unit {
                continue;
            }

            let offset = self.global_offset(entry.offset())?;
            match (tag, parent) {
                (gimli::DW_TAG_member, Some(index)) | (gimli::DW_TAG_inheritance, Some(index)) => {
                    self.add_member(&mut records[index], entry, offset)?;
                    continue;
                }
                (gimli::DW_TAG_subrange_type, Some(index)) => {
                    self.add_subrange(&mut records[index], entry)?;
                    continue;
                }
                _ => {}
            }

            let record = self.record(entry, offset)?;
            let container = matches!(record.kind, RecordKind::Aggregate { .. } | RecordKind::Array { .. });
            records.push(record);
            if container && entry.has_children() {
                open.push((depth, records.len() - 1));
            }
        }

        compile_unit.records = records;
        Ok(compile_unit)
    }

    fn record(&self, entry: &Entry<'_, 'a>, offset: u64) -> Result<TypeRecord, DwarfError> {
        let kind = match entry.tag() {
            gimli::DW_TAG_structure_type | gimli::DW_TAG_class_type => {
                let declaration = matches!(
                    entry.attr_value(gimli::DW_AT_declaration)?,
                    Some(AttributeValue::Flag(true))
                );
                match self.udata(entry, gimli::DW_AT_byte_size)? {
                    Some(byte_size) if !declaration => RecordKind::Aggregate {
                        name: self.name(entry)?,
                        byte_size,
                        members: Vec::new(),
                    },
                    _ => RecordKind::Other {
                        tag: entry.tag().to_string(),
                    },
                }
            }
            gimli::DW_TAG_base_type => RecordKind::Primitive {
                name: self.name(entry)?.ok_or(DwarfError::MissingAttribute {
                    offset,
                    attribute: "DW_AT_name",
                })?,
                byte_size: self.udata(entry, gimli::DW_AT_byte_size)?.ok_or(DwarfError::MissingAttribute {
                    offset,
                    attribute: "DW_AT_byte_size",
                })?,
            },
            gimli::DW_TAG_typedef => {
                let name = self.name(entry)?.ok_or(DwarfError::MissingAttribute {
                    offset,
                    attribute: "DW_AT_name",
                })?;
                match self.type_ref(entry, offset)? {
                    Some(alias) => RecordKind::Typedef { name, alias },
                    // typedef of void
                    None => RecordKind::Other {
                        tag: entry.tag().to_string(),
                    },
                }
            }
            gimli::DW_TAG_array_type => RecordKind::Array {
                item: self.type_ref(entry, offset)?.ok_or(DwarfError::MissingAttribute {
                    offset,
                    attribute: "DW_AT_type",
                })?,
                dimensions: Vec::new(),
            },
            tag => RecordKind::Other { tag: tag.to_string() },
        };

        Ok(TypeRecord {
            offset,
            decl_line: self.udata(entry, gimli::DW_AT_decl_line)?,
            kind,
        })
    }

    fn add_member(&self, record: &mut TypeRecord, entry: &Entry<'_, 'a>, offset: u64) -> Result<(), DwarfError> {
        let RecordKind::Aggregate { members, .. } = &mut record.kind else {
            return Ok(());
        };

        let location = match self.member_location(entry)? {
            Some(location) => location,
            None => {
                log::trace!("Skipping member without data location at 0x{:x}", offset);
                return Ok(());
            }
        };
        let type_ref = self.type_ref(entry, offset)?.ok_or(DwarfError::MissingAttribute {
            offset,
            attribute: "DW_AT_type",
        })?;

        let member = if entry.tag() == gimli::DW_TAG_inheritance {
            MemberRecord::base(location, type_ref)
        } else {
            match self.name(entry)? {
                Some(name) => MemberRecord::field(location, type_ref, &name),
                None => MemberRecord::unnamed(location, type_ref),
            }
        };
        members.push(member);
        Ok(())
    }

    fn add_subrange(&self, record: &mut TypeRecord, entry: &Entry<'_, 'a>) -> Result<(), DwarfError> {
        let RecordKind::Array { dimensions, .. } = &mut record.kind else {
            return Ok(());
        };

        let subrange = if let Some(count) = self.udata(entry, gimli::DW_AT_count)? {
            Subrange::Count(count)
        } else if let Some(bound) = self.udata(entry, gimli::DW_AT_upper_bound)? {
            Subrange::UpperBound(bound)
        } else {
            Subrange::Count(0)
        };
        dimensions.push(subrange);
        Ok(())
    }

    fn member_location(&self, entry: &Entry<'_, 'a>) -> Result<Option<u64>, DwarfError> {
        Ok(match entry.attr_value(gimli::DW_AT_data_member_location)? {
            None => None,
            Some(AttributeValue::Exprloc(expr)) => eval_member_location(&expr),
            Some(AttributeValue::Sdata(value)) => u64::try_from(value).ok(),
            Some(value) => value.udata_value(),
        })
    }

    fn name(&self, entry: &Entry<'_, 'a>) -> Result<Option<String>, DwarfError> {
        match entry.attr_value(gimli::DW_AT_name)? {
            Some(value) => {
                let name = self.dwarf.attr_string(self.unit, value)?;
                Ok(Some(name.to_string_lossy().into_owned()))
            }
            None => Ok(None),
        }
    }

    fn udata(&self, entry: &Entry<'_, 'a>, attr: gimli::DwAt) -> Result<Option<u64>, DwarfError> {
        Ok(entry.attr_value(attr)?.and_then(|value| value.udata_value()))
    }

    fn type_ref(&self, entry: &Entry<'_, 'a>, offset: u64) -> Result<Option<u64>, DwarfError> {
        match entry.attr_value(gimli::DW_AT_type)? {
            None => Ok(None),
            Some(AttributeValue::UnitRef(target)) => self.global_offset(target).map(Some),
            Some(AttributeValue::DebugInfoRef(target)) => Ok(Some(target.0 as u64)),
            Some(_) => Err(DwarfError::UnsupportedReference(offset)),
        }
    }

    /// Unit-relative offsets are rebased onto `.debug_info` so identities
    /// and references share one space.
    fn global_offset(&self, offset: UnitOffset) -> Result<u64, DwarfError> {
        offset
            .to_debug_info_offset(&self.unit.header)
            .map(|global| global.0 as u64)
            .ok_or(DwarfError::InvalidOffset)
    }
}

/// Decodes the single-operation location expressions compilers emit for
/// member offsets (`DW_OP_plus_uconst N`, `DW_OP_constu N`, `DW_OP_consts N`).
fn eval_member_location(expr: &gimli::Expression<Slice<'_>>) -> Option<u64> {
    let mut reader = expr.0;
    let op = gimli::DwOp(reader.read_u8().ok()?);
    let value = match op {
        gimli::DW_OP_plus_uconst | gimli::DW_OP_constu => reader.read_uleb128().ok()?,
        gimli::DW_OP_consts => u64::try_from(reader.read_sleb128().ok()?).ok()?,
        _ => return None,
    };
    reader.is_empty().then_some(value)
}
