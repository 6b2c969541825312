// Sat Oct 17 2026 - Alex

use crate::binary::error::BinaryError;
use goblin::elf::section_header::{SHF_COMPRESSED, SHT_NOBITS};
use goblin::elf::Elf;
use goblin::mach::{Mach, MachO};
use goblin::Object;
use std::collections::HashMap;

/// Mach-O section names are limited to 16 bytes, so `__debug_str_offsets`
/// is stored as `__debug_str_offs`; normalized that is 15 bytes.
const MACHO_NORMALIZED_NAME_LEN: usize = 15;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ObjectFormat {
    Elf,
    MachO,
}

/// The `.debug_*` sections of an object file, borrowed from its bytes.
/// Mach-O `__debug_*` names are stored in their ELF spelling.
#[derive(Debug, Clone)]
pub struct DebugSections<'a> {
    format: ObjectFormat,
    little_endian: bool,
    sections: HashMap<String, &'a [u8]>,
}

impl<'a> DebugSections<'a> {
    pub fn parse(data: &'a [u8]) -> Result<Self, BinaryError> {
        match Object::parse(data)? {
            Object::Elf(elf) => Self::from_elf(&elf, data),
            Object::Mach(Mach::Binary(macho)) => Self::from_macho(&macho),
            Object::Mach(Mach::Fat(_)) => Err(BinaryError::Unsupported("Fat binaries not supported".to_string())),
            _ => Err(BinaryError::Unsupported("only ELF and Mach-O objects are supported".to_string())),
        }
    }

    fn from_elf(elf: &Elf<'_>, data: &'a [u8]) -> Result<Self, BinaryError> {
        let mut sections = HashMap::new();

        for header in &elf.section_headers {
            let name = match elf.shdr_strtab.get_at(header.sh_name) {
                Some(name) if name.starts_with(".debug_") => name,
                _ => continue,
            };
            if header.sh_type == SHT_NOBITS {
                continue;
            }
            if header.sh_flags & SHF_COMPRESSED as u64 != 0 {
                return Err(BinaryError::CompressedSection(name.to_string()));
            }

            let bytes = header
                .file_range()
                .and_then(|range| data.get(range))
                .ok_or_else(|| BinaryError::SectionOutOfBounds(name.to_string()))?;

            log::trace!("Found {} ({} bytes)", name, bytes.len());
            sections.insert(name.to_string(), bytes);
        }

        Ok(Self {
            format: ObjectFormat::Elf,
            little_endian: elf.little_endian,
            sections,
        })
    }

    fn from_macho(macho: &MachO<'a>) -> Result<Self, BinaryError> {
        let mut sections = HashMap::new();

        for segment in &macho.segments {
            for (section, bytes) in segment.sections()? {
                if let Some(name) = normalize_macho_name(section.name()?) {
                    log::trace!("Found {} ({} bytes)", name, bytes.len());
                    sections.insert(name, bytes);
                }
            }
        }

        Ok(Self {
            format: ObjectFormat::MachO,
            little_endian: macho.little_endian,
            sections,
        })
    }

    pub fn endian(&self) -> gimli::RunTimeEndian {
        if self.little_endian {
            gimli::RunTimeEndian::Little
        } else {
            gimli::RunTimeEndian::Big
        }
    }

    /// Contents of the named section, empty when the object lacks it.
    pub fn section(&self, name: &str) -> &'a [u8] {
        if let Some(bytes) = self.sections.get(name) {
            return *bytes;
        }
        if self.format == ObjectFormat::MachO && name.len() > MACHO_NORMALIZED_NAME_LEN {
            if let Some(bytes) = self.sections.get(&name[..MACHO_NORMALIZED_NAME_LEN]) {
                return *bytes;
            }
        }
        &[]
    }

    pub fn has_debug_info(&self) -> bool {
        !self.section(".debug_info").is_empty()
    }

    pub fn require_debug_info(self) -> Result<Self, BinaryError> {
        if self.has_debug_info() {
            Ok(self)
        } else {
            Err(BinaryError::NoDebugInfo)
        }
    }

    #[cfg(test)]
    pub(crate) fn from_parts(format: ObjectFormat, little_endian: bool, sections: Vec<(&str, &'a [u8])>) -> Self {
        Self {
            format,
            little_endian,
            sections: sections.into_iter().map(|(name, bytes)| (name.to_string(), bytes)).collect(),
        }
    }
}

fn normalize_macho_name(name: &str) -> Option<String> {
    name.strip_prefix("__debug_").map(|rest| format!(".debug_{}", rest))
}
