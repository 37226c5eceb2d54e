//! Multi-extent merging
//!
//! A file larger than one extent is stored as consecutive records sharing an
//! identifier, every record but the last carrying the "not final" flag.
//! Records are fed in physical order and folded into [`FileEntry`] values.

use crate::directory::record::DirectoryRecord;
use crate::error::Result;
use crate::types::FileEntry;
use alloc::vec::Vec;
use tracing::{debug, warn};

/// Accumulates raw records into logical entries
#[derive(Debug, Default)]
pub struct ExtentMerger {
    open: Option<FileEntry>,
    done: Vec<FileEntry>,
}

impl ExtentMerger {
    /// Create an empty merger
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed the next record of the directory
    ///
    /// `offset` is the record's absolute position; a record whose timestamp
    /// cannot be decoded fails here.
    pub fn push(&mut self, offset: u64, record: DirectoryRecord) -> Result<()> {
        if let Some(open) = self.open.as_mut() {
            if open.identifier == record.identifier && !record.is_directory() {
                open.extents.push(record.extent);
                open.flags = record.flags;
                if !record.is_multi_extent() {
                    self.seal();
                }
                return Ok(());
            }
            warn!(
                offset,
                name = %open.name,
                "multi-extent chain interrupted by a different record"
            );
            self.seal();
        }

        let entry = FileEntry::from_record(&record, offset)?;
        if !record.is_multi_extent() || record.is_self() || record.is_parent() {
            self.done.push(entry);
        } else if record.is_directory() {
            warn!(offset, name = %entry.name, "multi-extent flag on a directory record, ignored");
            self.done.push(entry);
        } else {
            self.open = Some(entry);
        }
        Ok(())
    }

    /// Close any open chain and return the entries in directory order
    pub fn finish(mut self) -> Vec<FileEntry> {
        self.seal();
        self.done
    }

    fn seal(&mut self) {
        if let Some(entry) = self.open.take() {
            debug!(
                name = %entry.name,
                extents = entry.extents.len(),
                size = entry.size(),
                "sealed multi-extent file"
            );
            self.done.push(entry);
        }
    }
}
