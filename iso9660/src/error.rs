//! Error types for ISO9660 operations

use alloc::string::String;
use core::fmt;

/// Result type for ISO9660 operations
pub type Result<T> = core::result::Result<T, Iso9660Error>;

/// Errors that can occur while reading an ISO9660 image
///
/// Offsets are absolute byte offsets from the start of the image, sectors
/// are 2048-byte logical block numbers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Iso9660Error {
    /// The sector source failed to deliver the requested bytes
    Io {
        /// Offset of the failed read
        offset: u64,
        /// Message reported by the underlying source
        reason: String,
    },

    /// Volume descriptor is not tagged "CD001"
    InvalidMagic {
        /// Sector holding the bad descriptor
        sector: u32,
    },

    /// Descriptor set ended without a Primary Volume Descriptor
    NoPrimaryDescriptor,

    /// Logical block size other than 2048
    UnsupportedBlockSize(u16),

    /// Directory record declares more bytes than are available
    TruncatedRecord {
        /// Offset of the record
        offset: u64,
        /// Length byte of the record
        declared: usize,
        /// Bytes left in the sector/extent window
        available: usize,
    },

    /// Structurally inconsistent on-disk data
    Decode {
        /// Offset of the offending structure
        offset: u64,
        /// What was wrong with it
        reason: &'static str,
    },

    /// Little- and big-endian halves of a dual-endian field disagree
    MalformedDualEndianField {
        /// Offset of the record or descriptor holding the field
        offset: u64,
        /// Field name
        field: &'static str,
    },

    /// Children requested from a regular file
    NotADirectory(String),

    /// Path lookup found no matching entry
    NotFound(String),

    /// Path has more components than ISO9660 allows
    PathTooLong,

    /// Value cannot be represented in the on-disk format
    Encode(&'static str),
}

impl Iso9660Error {
    pub(crate) fn io(offset: u64, reason: impl Into<String>) -> Self {
        Self::Io {
            offset,
            reason: reason.into(),
        }
    }

    pub(crate) fn decode(offset: u64, reason: &'static str) -> Self {
        Self::Decode { offset, reason }
    }

    /// Whether this error came from the sector source rather than the image contents
    pub fn is_io(&self) -> bool {
        matches!(self, Self::Io { .. })
    }
}

impl fmt::Display for Iso9660Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io { offset, reason } => {
                write!(f, "I/O error reading image at byte {}: {}", offset, reason)
            }
            Self::InvalidMagic { sector } => {
                write!(f, "Invalid volume descriptor signature in sector {}", sector)
            }
            Self::NoPrimaryDescriptor => write!(f, "No primary volume descriptor found"),
            Self::UnsupportedBlockSize(size) => {
                write!(f, "Unsupported logical block size {}", size)
            }
            Self::TruncatedRecord {
                offset,
                declared,
                available,
            } => write!(
                f,
                "Directory record at byte {} declares {} bytes but only {} are available",
                offset, declared, available
            ),
            Self::Decode { offset, reason } => {
                write!(f, "Corrupted structure at byte {}: {}", offset, reason)
            }
            Self::MalformedDualEndianField { offset, field } => write!(
                f,
                "Both-endian field {} at byte {} has mismatched halves",
                field, offset
            ),
            Self::NotADirectory(name) => write!(f, "Not a directory: {}", name),
            Self::NotFound(path) => write!(f, "File or directory not found: {}", path),
            Self::PathTooLong => write!(f, "Path exceeds maximum directory depth"),
            Self::Encode(reason) => write!(f, "Cannot encode record: {}", reason),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for Iso9660Error {}

#[cfg(feature = "std")]
impl From<Iso9660Error> for std::io::Error {
    fn from(err: Iso9660Error) -> Self {
        std::io::Error::new(std::io::ErrorKind::Other, err)
    }
}
