//! File flags parsing and manipulation

use crate::types::FileFlags;

/// Bit 1: record describes a directory
pub const FLAG_DIRECTORY: u8 = 0x02;

/// Bit 7: further records for this file follow
pub const FLAG_MULTI_EXTENT: u8 = 0x80;

const FLAG_RESERVED: u8 = 0x60;

impl FileFlags {
    /// Parse from raw byte
    pub fn from_byte(byte: u8) -> Self {
        Self {
            hidden: byte & 0x01 != 0,
            directory: byte & FLAG_DIRECTORY != 0,
            associated: byte & 0x04 != 0,
            extended_format: byte & 0x08 != 0,
            extended_permissions: byte & 0x10 != 0,
            not_final: byte & FLAG_MULTI_EXTENT != 0,
            reserved: byte & FLAG_RESERVED,
        }
    }

    /// Convert to raw byte
    pub fn to_byte(&self) -> u8 {
        let mut byte = self.reserved & FLAG_RESERVED;
        if self.hidden { byte |= 0x01; }
        if self.directory { byte |= FLAG_DIRECTORY; }
        if self.associated { byte |= 0x04; }
        if self.extended_format { byte |= 0x08; }
        if self.extended_permissions { byte |= 0x10; }
        if self.not_final { byte |= FLAG_MULTI_EXTENT; }
        byte
    }

    /// Flags of a plain directory record
    pub fn dir() -> Self {
        Self {
            directory: true,
            ..Self::default()
        }
    }

    /// Flags of a non-final multi-extent file record
    pub fn continued() -> Self {
        Self {
            not_final: true,
            ..Self::default()
        }
    }
}
