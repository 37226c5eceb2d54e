//! File handles and extent management

pub mod extent;
pub mod metadata;
pub mod reader;

use crate::directory;
use crate::error::{Iso9660Error, Result};
use crate::image::ImageInner;
use crate::options::DotEntries;
use crate::source::SectorSource;
use crate::types::{FileEntry, FileFlags};
use alloc::string::String;
use alloc::sync::Arc;
use alloc::vec::Vec;
use chrono::{DateTime, Utc};
use core::fmt;

use extent::Extent;
use reader::FileReader;

/// A file or directory inside an opened image
///
/// Handles are immutable and keep the image alive. Two handles compare equal
/// when their entries do, whichever image they came from.
pub struct File<S> {
    entry: FileEntry,
    image: Arc<ImageInner<S>>,
}

impl<S> File<S> {
    pub(crate) fn new(entry: FileEntry, image: Arc<ImageInner<S>>) -> Self {
        Self { entry, image }
    }

    /// Name without version suffix; `"\0"` and `"\u{1}"` for self/parent
    pub fn name(&self) -> &str {
        &self.entry.name
    }

    /// Raw on-disk identifier
    pub fn identifier(&self) -> &[u8] {
        &self.entry.identifier
    }

    /// Is this a directory?
    pub fn is_dir(&self) -> bool {
        self.entry.is_directory()
    }

    /// Is this the "this directory" entry?
    pub fn is_self(&self) -> bool {
        self.entry.identifier == [crate::types::SELF_IDENTIFIER]
    }

    /// Is this the "parent directory" entry?
    pub fn is_parent(&self) -> bool {
        self.entry.identifier == [crate::types::PARENT_IDENTIFIER]
    }

    /// Total size in bytes over every extent
    pub fn size(&self) -> u64 {
        self.entry.size()
    }

    /// Recording time of the first record, in UTC
    pub fn mod_time(&self) -> DateTime<Utc> {
        self.entry.modified
    }

    /// Was this file stored as more than one extent?
    pub fn has_multi_extent(&self) -> bool {
        self.entry.has_multi_extent()
    }

    /// Data extents in logical order
    pub fn extents(&self) -> &[Extent] {
        &self.entry.extents
    }

    /// Flags of the last record
    pub fn flags(&self) -> FileFlags {
        self.entry.flags
    }

    /// Underlying merged entry
    pub fn entry(&self) -> &FileEntry {
        &self.entry
    }
}

impl<S: SectorSource> File<S> {
    /// List the directory's entries in on-disk order
    ///
    /// Re-reads the directory on every call. Self/parent entries are left out
    /// unless the image was opened with [`DotEntries::Include`].
    pub fn children(&self) -> Result<Vec<File<S>>> {
        if !self.is_dir() {
            return Err(Iso9660Error::NotADirectory(String::from(self.name())));
        }
        let extent = self.entry.extents[0];
        let options = &self.image.options;

        let entries = directory::read_directory(&self.image.source, extent, options.dual_endian)?;
        Ok(entries
            .into_iter()
            .filter(|entry| options.dot_entries == DotEntries::Include || !entry.is_dot())
            .map(|entry| File::new(entry, Arc::clone(&self.image)))
            .collect())
    }

    /// Sequential reader over the file's bytes
    ///
    /// Each call starts a fresh, independent reader at offset 0.
    pub fn reader(&self) -> FileReader<S> {
        FileReader::new(Arc::clone(&self.image), self.entry.extents.clone())
    }

    /// Read the whole file into memory
    pub fn read_to_vec(&self) -> Result<Vec<u8>> {
        let size = usize::try_from(self.size())
            .map_err(|_| Iso9660Error::decode(0, "file larger than address space"))?;
        let mut data = alloc::vec![0u8; size];
        let mut reader = self.reader();
        let mut filled = 0;
        while filled < size {
            let n = reader.read(&mut data[filled..])?;
            if n == 0 {
                break;
            }
            filled += n;
        }
        data.truncate(filled);
        Ok(data)
    }
}

impl<S> Clone for File<S> {
    fn clone(&self) -> Self {
        Self {
            entry: self.entry.clone(),
            image: Arc::clone(&self.image),
        }
    }
}

impl<S> PartialEq for File<S> {
    fn eq(&self, other: &Self) -> bool {
        self.entry == other.entry
    }
}

impl<S> Eq for File<S> {}

impl<S> fmt::Debug for File<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("File")
            .field("name", &self.entry.name)
            .field("size", &self.size())
            .field("dir", &self.is_dir())
            .field("extents", &self.entry.extents)
            .finish()
    }
}
