//! ISO9660 Filesystem Reader
//!
//! A read-only ISO9660 image reader that works in `no_std + alloc`
//! environments, with `std` conveniences enabled by default.
//!
//! # Overview
//!
//! ISO9660 is the standard filesystem for CD-ROMs and DVDs. This crate provides:
//! - Volume descriptor parsing (Primary Volume Descriptor)
//! - A byte-exact directory record codec with both-endian validation
//! - Directory listing with multi-extent files merged into one entry
//! - Sequential reading of file data spread over several extents
//! - Path lookup from the root directory
//!
//! # Architecture
//!
//! The implementation is layered:
//! 1. **Source layer** - Positioned reads from slices, block devices or streams
//! 2. **Volume layer** - Parses volume descriptors from sectors 16+
//! 3. **Directory layer** - Decodes records and merges multi-extent chains
//! 4. **File layer** - Reads file data from extents
//!
//! # Usage
//!
//! ```ignore
//! use iso9660::Image;
//!
//! let image = Image::open(std::fs::read("disc.iso")?)?;
//! for child in image.root_dir().children()? {
//!     println!("{} {} bytes", child.name(), child.size());
//! }
//!
//! let kernel = image.find("/isolinux/vmlinuz")?.read_to_vec()?;
//! ```
//!
//! Files on a block device are opened through [`BlockDevice`]:
//!
//! ```ignore
//! use iso9660::{BlockDevice, OpenOptions, DualEndianPolicy};
//!
//! let source = BlockDevice::with_start_lba(block_io, start_lba);
//! let image = OpenOptions::new()
//!     .dual_endian(DualEndianPolicy::Reject)
//!     .open(source)?;
//! ```

#![cfg_attr(not(feature = "std"), no_std)]
#![warn(missing_docs)]

extern crate alloc;

pub mod directory;
pub mod error;
pub mod file;
pub mod image;
pub mod options;
pub mod source;
pub mod types;
pub mod utils;
pub mod volume;

pub use directory::record::DirectoryRecord;
pub use error::{Iso9660Error, Result};
pub use file::extent::Extent;
pub use file::reader::FileReader;
pub use file::File;
pub use image::Image;
pub use options::{DotEntries, DualEndianPolicy, OpenOptions};
pub use source::{BlockDevice, SectorSource};
#[cfg(feature = "std")]
pub use source::StreamSource;
pub use types::{FileEntry, FileFlags};
pub use volume::PrimaryVolumeDescriptor;
