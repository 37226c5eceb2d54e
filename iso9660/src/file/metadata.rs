//! File metadata extraction

use crate::directory::record::DirectoryRecord;
use crate::error::Result;
use crate::types::FileEntry;
use crate::utils::string;
use alloc::vec;

impl FileEntry {
    /// Start an entry from the first (or only) record of a file
    ///
    /// `offset` locates the record for error context.
    pub fn from_record(record: &DirectoryRecord, offset: u64) -> Result<Self> {
        Ok(Self {
            identifier: record.identifier.clone(),
            name: record.name(),
            flags: record.flags,
            modified: record.recording_time(offset)?,
            extents: vec![record.extent],
        })
    }

    /// Get file name as string
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Get file extension
    pub fn extension(&self) -> Option<&str> {
        match self.name.rsplit_once('.') {
            Some((_, ext)) if !ext.is_empty() => Some(ext),
            _ => None,
        }
    }

    /// Total byte length over all extents
    pub fn size(&self) -> u64 {
        self.extents.iter().map(|e| u64::from(e.length)).sum()
    }

    /// Is this a regular file?
    pub fn is_file(&self) -> bool {
        !self.flags.directory
    }

    /// Is this a directory?
    pub fn is_directory(&self) -> bool {
        self.flags.directory
    }

    /// Self or parent directory record
    pub fn is_dot(&self) -> bool {
        string::is_dot_identifier(&self.identifier)
    }

    /// Was this entry merged from more than one record?
    pub fn has_multi_extent(&self) -> bool {
        self.extents.len() > 1
    }
}
