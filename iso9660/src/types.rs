//! Common types and constants for ISO9660

use crate::file::extent::Extent;
use alloc::string::String;
use alloc::vec::Vec;
use chrono::{DateTime, Utc};

/// ISO9660 sector size (always 2048 bytes)
pub const SECTOR_SIZE: usize = 2048;

/// Volume descriptor set starts at sector 16
pub const VOLUME_DESCRIPTOR_START: SectorAddress = 16;

/// Maximum directory depth
pub const MAX_DIRECTORY_DEPTH: usize = 8;

/// Logical block number; one unit is [`SECTOR_SIZE`] bytes from the start of the image
pub type SectorAddress = u32;

/// Identifier byte of the "this directory" record
pub const SELF_IDENTIFIER: u8 = 0x00;

/// Identifier byte of the "parent directory" record
pub const PARENT_IDENTIFIER: u8 = 0x01;

/// Volume descriptor type codes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VolumeDescriptorType {
    /// Boot Record (El Torito)
    BootRecord,
    /// Primary Volume Descriptor
    Primary,
    /// Supplementary Volume Descriptor (Joliet)
    Supplementary,
    /// Volume Partition Descriptor
    Partition,
    /// Volume Descriptor Set Terminator
    Terminator,
    /// Reserved type code
    Other(u8),
}

impl VolumeDescriptorType {
    /// Map the descriptor's first byte
    pub fn from_code(code: u8) -> Self {
        match code {
            0 => Self::BootRecord,
            1 => Self::Primary,
            2 => Self::Supplementary,
            3 => Self::Partition,
            255 => Self::Terminator,
            other => Self::Other(other),
        }
    }

    /// Type byte as stored on disk
    pub fn code(self) -> u8 {
        match self {
            Self::BootRecord => 0,
            Self::Primary => 1,
            Self::Supplementary => 2,
            Self::Partition => 3,
            Self::Terminator => 255,
            Self::Other(code) => code,
        }
    }
}

/// File flags from directory record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FileFlags {
    /// Hidden file
    pub hidden: bool,

    /// Directory (not a file)
    pub directory: bool,

    /// Associated file
    pub associated: bool,

    /// Extended attribute record format
    pub extended_format: bool,

    /// Owner/group permissions in extended attributes
    pub extended_permissions: bool,

    /// Not final directory record for this file
    pub not_final: bool,

    /// Reserved bits 5 and 6, kept so the byte round-trips
    pub reserved: u8,
}

/// Logical directory entry
///
/// One per file or directory, after the records of a multi-extent file have
/// been merged. `extents` is never empty and keeps on-disk order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileEntry {
    /// Raw identifier bytes of the first record
    pub identifier: Vec<u8>,

    /// Name with the version suffix stripped
    pub name: String,

    /// Flags of the last record in the chain
    pub flags: FileFlags,

    /// Recording time of the first record
    pub modified: DateTime<Utc>,

    /// Data extents in logical order
    pub extents: Vec<Extent>,
}
