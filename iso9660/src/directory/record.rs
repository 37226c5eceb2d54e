//! Directory Record structure
//!
//! Directory records describe files and subdirectories. Layout (byte offsets):
//!
//! | Offset | Field |
//! |---|---|
//! | 0 | record length |
//! | 1 | extended attribute record length |
//! | 2-9 | extent location (both-endian 32) |
//! | 10-17 | data length (both-endian 32) |
//! | 18-24 | recording date and time |
//! | 25 | file flags |
//! | 26 | file unit size |
//! | 27 | interleave gap size |
//! | 28-31 | volume sequence number (both-endian 16) |
//! | 32 | file identifier length |
//! | 33.. | file identifier, pad byte if its length is even, system use |

use crate::error::{Iso9660Error, Result};
use crate::file::extent::Extent;
use crate::types::{FileFlags, PARENT_IDENTIFIER, SELF_IDENTIFIER};
use crate::utils::datetime::RecordingTimestamp;
use crate::utils::{endian, string};
use alloc::string::String;
use alloc::vec;
use alloc::vec::Vec;
use chrono::{DateTime, Utc};

/// Length of the fixed part preceding the identifier
const FIXED_LENGTH: usize = 33;

/// One decoded on-disk directory record
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirectoryRecord {
    /// Length of directory record as declared on disk
    pub length: u8,

    /// Extended attribute record length
    pub extended_attr_length: u8,

    /// Location and byte length of this record's data
    pub extent: Extent,

    /// Recording date and time
    pub recorded: RecordingTimestamp,

    /// File flags
    pub flags: FileFlags,

    /// File unit size (interleaved files)
    pub file_unit_size: u8,

    /// Interleave gap size
    pub interleave_gap: u8,

    /// Volume sequence number
    pub volume_sequence: u16,

    /// Raw identifier bytes, version suffix included
    pub identifier: Vec<u8>,

    /// Trailing system use area
    pub system_use: Vec<u8>,

    /// First both-endian field whose halves disagreed, if any
    pub endian_mismatch: Option<&'static str>,
}

impl DirectoryRecord {
    /// Minimum record length (fixed part plus a one-byte identifier)
    pub const MIN_LENGTH: u8 = 34;

    /// Record with the given identifier and extent; every other field zeroed
    pub fn new(identifier: &[u8], extent: Extent, flags: FileFlags) -> Self {
        Self {
            length: 0,
            extended_attr_length: 0,
            extent,
            recorded: RecordingTimestamp::default(),
            flags,
            file_unit_size: 0,
            interleave_gap: 0,
            volume_sequence: 1,
            identifier: identifier.to_vec(),
            system_use: Vec::new(),
            endian_mismatch: None,
        }
    }

    /// Parse directory record from bytes
    ///
    /// `data` starts at the record's length byte and may extend past it;
    /// `offset` is its absolute position, used for error context only.
    pub fn parse(data: &[u8], offset: u64) -> Result<Self> {
        let declared = *data
            .first()
            .ok_or(Iso9660Error::decode(offset, "empty record window"))? as usize;

        if declared == 0 {
            return Err(Iso9660Error::decode(offset, "zero-length record"));
        }
        if declared > data.len() {
            return Err(Iso9660Error::TruncatedRecord {
                offset,
                declared,
                available: data.len(),
            });
        }
        if declared < Self::MIN_LENGTH as usize {
            return Err(Iso9660Error::decode(offset, "record shorter than fixed header"));
        }

        let data = &data[..declared];
        let id_len = data[32] as usize;
        if id_len == 0 {
            return Err(Iso9660Error::decode(offset, "empty file identifier"));
        }
        let id_end = FIXED_LENGTH + id_len;
        if id_end > declared {
            return Err(Iso9660Error::decode(offset, "file identifier overruns record"));
        }
        let system_use_start = (id_end + padding(id_len)).min(declared);

        let location = endian::read_u32(&data[2..10]);
        let length = endian::read_u32(&data[10..18]);
        let volume_sequence = endian::read_u16(&data[28..32]);
        let endian_mismatch = [
            ("extent location", location.consistent),
            ("data length", length.consistent),
            ("volume sequence number", volume_sequence.consistent),
        ]
        .into_iter()
        .find_map(|(field, consistent)| (!consistent).then_some(field));

        let mut recorded = [0u8; 7];
        recorded.copy_from_slice(&data[18..25]);

        Ok(Self {
            length: data[0],
            extended_attr_length: data[1],
            extent: Extent::new(location.get(), length.get()),
            recorded: RecordingTimestamp::from_bytes(&recorded),
            flags: FileFlags::from_byte(data[25]),
            file_unit_size: data[26],
            interleave_gap: data[27],
            volume_sequence: volume_sequence.get(),
            identifier: data[FIXED_LENGTH..id_end].to_vec(),
            system_use: data[system_use_start..].to_vec(),
            endian_mismatch,
        })
    }

    /// Serialize to the byte-exact on-disk form
    ///
    /// The length byte is recomputed from the identifier and system use
    /// area; the stored `length` field is ignored. An odd-sized system use
    /// area gets one trailing zero so the record stays even-length.
    pub fn encode(&self) -> Result<Vec<u8>> {
        let id_len = self.identifier.len();
        if id_len == 0 {
            return Err(Iso9660Error::Encode("empty file identifier"));
        }
        let id_end = FIXED_LENGTH + id_len;
        let system_use_start = id_end + padding(id_len);
        let unpadded = system_use_start + self.system_use.len();
        let total = unpadded + unpadded % 2;
        let record_len =
            u8::try_from(total).map_err(|_| Iso9660Error::Encode("record exceeds 255 bytes"))?;

        let mut out = vec![0u8; total];
        out[0] = record_len;
        out[1] = self.extended_attr_length;
        endian::write_u32(&mut out[2..10], self.extent.location);
        endian::write_u32(&mut out[10..18], self.extent.length);
        out[18..25].copy_from_slice(&self.recorded.to_bytes());
        out[25] = self.flags.to_byte();
        out[26] = self.file_unit_size;
        out[27] = self.interleave_gap;
        endian::write_u16(&mut out[28..32], self.volume_sequence);
        out[32] = id_len as u8;
        out[FIXED_LENGTH..id_end].copy_from_slice(&self.identifier);
        out[system_use_start..unpadded].copy_from_slice(&self.system_use);
        Ok(out)
    }

    /// Is this the "this directory" record?
    pub fn is_self(&self) -> bool {
        self.identifier == [SELF_IDENTIFIER]
    }

    /// Is this the "parent directory" record?
    pub fn is_parent(&self) -> bool {
        self.identifier == [PARENT_IDENTIFIER]
    }

    /// Is this a directory?
    pub fn is_directory(&self) -> bool {
        self.flags.directory
    }

    /// Do more records of the same file follow this one?
    pub fn is_multi_extent(&self) -> bool {
        self.flags.not_final
    }

    /// Externally visible name (version suffix stripped)
    pub fn name(&self) -> String {
        string::identifier_to_name(&self.identifier)
    }

    /// Recording time as a UTC instant
    pub fn recording_time(&self, offset: u64) -> Result<DateTime<Utc>> {
        self.recorded.to_utc(offset)
    }
}

/// Pad byte present when the identifier length is even
fn padding(id_len: usize) -> usize {
    usize::from(id_len % 2 == 0)
}
