//! Sector alignment and calculation utilities

use crate::types::{SectorAddress, SECTOR_SIZE};

/// Convert sector number to byte offset
pub fn sector_to_byte(sector: SectorAddress) -> u64 {
    sector as u64 * SECTOR_SIZE as u64
}

/// Offset of the next sector boundary strictly after `offset`
pub fn next_sector_boundary(offset: usize) -> usize {
    (offset / SECTOR_SIZE + 1) * SECTOR_SIZE
}
