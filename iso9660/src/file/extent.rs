//! File extent management
//!
//! Extents represent contiguous data regions on disk.

use crate::types::SectorAddress;
use crate::utils::sector::sector_to_byte;

/// File extent (contiguous data region)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Extent {
    /// Starting sector
    pub location: SectorAddress,

    /// Length in bytes
    pub length: u32,
}

impl Extent {
    /// Create new extent
    pub fn new(location: SectorAddress, length: u32) -> Self {
        Self { location, length }
    }

    /// Absolute byte offset of the first data byte
    pub fn byte_offset(&self) -> u64 {
        sector_to_byte(self.location)
    }
}
