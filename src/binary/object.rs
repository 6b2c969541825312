// Sat Oct 17 2026 - Alex

use crate::binary::error::BinaryError;
use crate::binary::sections::DebugSections;
use memmap2::Mmap;
use std::fs::File;
use std::path::{Path, PathBuf};

/// A memory-mapped object file on disk.
pub struct ObjectFile {
    mmap: Mmap,
    path: PathBuf,
}

impl ObjectFile {
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, BinaryError> {
        let path_buf = path.as_ref().to_path_buf();
        let file = File::open(path.as_ref())?;
        // The mapping is read-only and lives as long as this value.
        let mmap = unsafe { Mmap::map(&file) }?;
        log::debug!("Mapped {} ({} bytes)", path_buf.display(), mmap.len());
        Ok(Self { mmap, path: path_buf })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn size(&self) -> usize {
        self.mmap.len()
    }

    pub fn as_slice(&self) -> &[u8] {
        self.mmap.as_ref()
    }

    /// Debug sections of the object, failing when it carries none.
    pub fn debug_sections(&self) -> Result<DebugSections<'_>, BinaryError> {
        DebugSections::parse(self.as_slice())?.require_debug_info()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_open_missing_file() {
        let err = ObjectFile::open("/nonexistent/padding-finder-object").err().unwrap();
        assert!(matches!(err, BinaryError::Io(_)));
    }
}
