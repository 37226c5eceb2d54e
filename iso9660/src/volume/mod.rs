//! Volume descriptor parsing
//!
//! ISO9660 volume descriptors start at sector 16 and describe the filesystem layout.
//! Multiple descriptors may be present (Primary, Supplementary, Boot Record);
//! only the first Primary is used.

pub mod primary;

use crate::error::{Iso9660Error, Result};
use crate::options::OpenOptions;
use crate::source::SectorSource;
use crate::types::{SectorAddress, VolumeDescriptorType, SECTOR_SIZE, VOLUME_DESCRIPTOR_START};
use tracing::debug;

pub use primary::PrimaryVolumeDescriptor;

/// Walk the descriptor set and return the first Primary Volume Descriptor
///
/// Scans sector 16 onward until the set terminator, or until
/// `options.max_descriptors` sectors have been examined.
pub fn read_primary_descriptor<S: SectorSource + ?Sized>(
    source: &S,
    options: &OpenOptions,
) -> Result<PrimaryVolumeDescriptor> {
    let mut buffer = [0u8; SECTOR_SIZE];
    let mut primary: Option<PrimaryVolumeDescriptor> = None;

    for index in 0..options.max_descriptors {
        let sector: SectorAddress = VOLUME_DESCRIPTOR_START + index;
        source.read_sector(sector, &mut buffer)?;

        let header = VolumeDescriptorHeader::from_bytes(&buffer);
        if !header.validate() {
            return Err(Iso9660Error::InvalidMagic { sector });
        }

        let kind = header.kind();
        debug!(sector, ?kind, version = header.version, "volume descriptor");

        match kind {
            VolumeDescriptorType::Primary if primary.is_none() => {
                primary = Some(PrimaryVolumeDescriptor::parse(
                    &buffer,
                    sector,
                    options.dual_endian,
                )?);
            }
            VolumeDescriptorType::Terminator => {
                return primary.ok_or(Iso9660Error::NoPrimaryDescriptor);
            }
            _ => {}
        }
    }

    debug!(limit = options.max_descriptors, "descriptor scan limit reached");
    primary.ok_or(Iso9660Error::NoPrimaryDescriptor)
}

/// Volume Descriptor header (first 7 bytes of each descriptor)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VolumeDescriptorHeader {
    /// Type code (0=boot, 1=primary, 2=supplementary, 255=terminator)
    pub type_code: u8,

    /// Standard identifier "CD001"
    pub identifier: [u8; 5],

    /// Version (normally 1, not enforced)
    pub version: u8,
}

impl VolumeDescriptorHeader {
    /// CD001 magic bytes
    pub const MAGIC: &'static [u8; 5] = b"CD001";

    /// Read the header from the start of a descriptor sector
    pub fn from_bytes(data: &[u8; SECTOR_SIZE]) -> Self {
        let mut identifier = [0u8; 5];
        identifier.copy_from_slice(&data[1..6]);
        Self {
            type_code: data[0],
            identifier,
            version: data[6],
        }
    }

    /// Check if header carries the standard identifier
    pub fn validate(&self) -> bool {
        &self.identifier == Self::MAGIC
    }

    /// Descriptor type
    pub fn kind(&self) -> VolumeDescriptorType {
        VolumeDescriptorType::from_code(self.type_code)
    }
}
