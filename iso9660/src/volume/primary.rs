//! Primary Volume Descriptor parsing
//!
//! The Primary Volume Descriptor (PVD) is always present and describes
//! the basic ISO9660 filesystem structure.
//!
//! | Offset | Field |
//! |---|---|
//! | 8 | system identifier (32) |
//! | 40 | volume identifier (32) |
//! | 80 | volume space size (both-endian 32) |
//! | 120 | volume set size (both-endian 16) |
//! | 124 | volume sequence number (both-endian 16) |
//! | 128 | logical block size (both-endian 16) |
//! | 132 | path table size (both-endian 32) |
//! | 156 | root directory record (34) |
//! | 190 | volume set identifier (128) |
//! | 318 | publisher identifier (128) |
//! | 446 | data preparer identifier (128) |
//! | 574 | application identifier (128) |
//! | 813 | creation time (17) |
//! | 830 | modification time (17) |
//! | 881 | file structure version |

use crate::directory::record::DirectoryRecord;
use crate::error::{Iso9660Error, Result};
use crate::file::extent::Extent;
use crate::options::DualEndianPolicy;
use crate::types::{SectorAddress, SECTOR_SIZE};
use crate::utils::datetime::parse_volume_timestamp;
use crate::utils::sector::sector_to_byte;
use crate::utils::{endian, string};
use alloc::string::String;
use chrono::{DateTime, Utc};

const ROOT_RECORD_OFFSET: usize = 156;

/// Primary Volume Descriptor (type 1)
///
/// See ECMA-119 8.4 for full specification
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrimaryVolumeDescriptor {
    /// Sector the descriptor was read from
    pub sector: SectorAddress,

    /// System identifier (32 a-characters)
    pub system_id: String,

    /// Volume identifier (32 d-characters)
    pub volume_id: String,

    /// Volume space size in logical blocks
    pub volume_space_size: u32,

    /// Volume set size
    pub volume_set_size: u16,

    /// Volume sequence number
    pub volume_sequence_number: u16,

    /// Logical block size (always 2048 once parsed)
    pub logical_block_size: u16,

    /// Path table size in bytes
    pub path_table_size: u32,

    /// Root directory record
    pub root: DirectoryRecord,

    /// Volume set identifier
    pub volume_set_id: String,

    /// Publisher identifier
    pub publisher_id: String,

    /// Data preparer identifier
    pub preparer_id: String,

    /// Application identifier
    pub application_id: String,

    /// Volume creation time, if specified
    pub created: Option<DateTime<Utc>>,

    /// Volume modification time, if specified
    pub modified: Option<DateTime<Utc>>,

    /// File structure version (1)
    pub file_structure_version: u8,
}

impl PrimaryVolumeDescriptor {
    /// Parse Primary Volume Descriptor from sector data
    ///
    /// The header must already have been checked by the caller.
    pub fn parse(
        data: &[u8; SECTOR_SIZE],
        sector: SectorAddress,
        policy: DualEndianPolicy,
    ) -> Result<Self> {
        let offset = sector_to_byte(sector);

        let volume_space_size = endian::read_u32(&data[80..88]);
        let volume_set_size = endian::read_u16(&data[120..124]);
        let volume_sequence_number = endian::read_u16(&data[124..128]);
        let logical_block_size = endian::read_u16(&data[128..132]);
        let path_table_size = endian::read_u32(&data[132..140]);

        let mismatch = [
            ("volume space size", volume_space_size.consistent),
            ("volume set size", volume_set_size.consistent),
            ("volume sequence number", volume_sequence_number.consistent),
            ("logical block size", logical_block_size.consistent),
            ("path table size", path_table_size.consistent),
        ]
        .into_iter()
        .find_map(|(field, consistent)| (!consistent).then_some(field));
        policy.check(offset, mismatch)?;

        if logical_block_size.get() as usize != SECTOR_SIZE {
            return Err(Iso9660Error::UnsupportedBlockSize(logical_block_size.get()));
        }

        let root_offset = offset + ROOT_RECORD_OFFSET as u64;
        let root = DirectoryRecord::parse(
            &data[ROOT_RECORD_OFFSET..ROOT_RECORD_OFFSET + DirectoryRecord::MIN_LENGTH as usize],
            root_offset,
        )?;
        policy.check(root_offset, root.endian_mismatch)?;
        if !root.is_directory() {
            return Err(Iso9660Error::decode(root_offset, "root record is not a directory"));
        }

        Ok(Self {
            sector,
            system_id: string::padded_to_string(&data[8..40]),
            volume_id: string::padded_to_string(&data[40..72]),
            volume_space_size: volume_space_size.get(),
            volume_set_size: volume_set_size.get(),
            volume_sequence_number: volume_sequence_number.get(),
            logical_block_size: logical_block_size.get(),
            path_table_size: path_table_size.get(),
            root,
            volume_set_id: string::padded_to_string(&data[190..318]),
            publisher_id: string::padded_to_string(&data[318..446]),
            preparer_id: string::padded_to_string(&data[446..574]),
            application_id: string::padded_to_string(&data[574..702]),
            created: parse_volume_timestamp(&timestamp_field(data, 813)),
            modified: parse_volume_timestamp(&timestamp_field(data, 830)),
            file_structure_version: data[881],
        })
    }

    /// Extent of the root directory
    pub fn root_extent(&self) -> Extent {
        self.root.extent
    }

    /// Absolute byte offset of the root directory record
    pub fn root_record_offset(&self) -> u64 {
        sector_to_byte(self.sector) + ROOT_RECORD_OFFSET as u64
    }
}

fn timestamp_field(data: &[u8; SECTOR_SIZE], at: usize) -> [u8; 17] {
    let mut field = [0u8; 17];
    field.copy_from_slice(&data[at..at + 17]);
    field
}
