//! Sector sources
//!
//! Everything above this layer addresses the image by absolute byte offset
//! or 2048-byte sector. A source must answer positioned reads through `&self`
//! so independent readers over one image never share a cursor; sources built
//! on a single movable cursor lock it for the duration of one read.

mod block;
#[cfg(feature = "std")]
mod stream;

pub use block::BlockDevice;
#[cfg(feature = "std")]
pub use stream::StreamSource;

use crate::error::{Iso9660Error, Result};
use crate::types::{SectorAddress, SECTOR_SIZE};
use crate::utils::sector::sector_to_byte;
use alloc::boxed::Box;
use alloc::sync::Arc;
use alloc::vec::Vec;

/// Random-access provider of image bytes
pub trait SectorSource {
    /// Fill all of `buf` with the bytes starting at `offset`
    fn read_at(&self, offset: u64, buf: &mut [u8]) -> Result<()>;

    /// Read one full logical sector
    fn read_sector(&self, sector: SectorAddress, buf: &mut [u8; SECTOR_SIZE]) -> Result<()> {
        self.read_at(sector_to_byte(sector), buf)
    }
}

impl SectorSource for [u8] {
    fn read_at(&self, offset: u64, buf: &mut [u8]) -> Result<()> {
        let start = usize::try_from(offset)
            .map_err(|_| Iso9660Error::io(offset, "offset exceeds address space"))?;
        let src = start
            .checked_add(buf.len())
            .and_then(|end| self.get(start..end))
            .ok_or_else(|| Iso9660Error::io(offset, "read beyond end of image"))?;
        buf.copy_from_slice(src);
        Ok(())
    }
}

impl SectorSource for Vec<u8> {
    fn read_at(&self, offset: u64, buf: &mut [u8]) -> Result<()> {
        self.as_slice().read_at(offset, buf)
    }
}

impl<T: SectorSource + ?Sized> SectorSource for &T {
    fn read_at(&self, offset: u64, buf: &mut [u8]) -> Result<()> {
        (**self).read_at(offset, buf)
    }
}

impl<T: SectorSource + ?Sized> SectorSource for Box<T> {
    fn read_at(&self, offset: u64, buf: &mut [u8]) -> Result<()> {
        (**self).read_at(offset, buf)
    }
}

impl<T: SectorSource + ?Sized> SectorSource for Arc<T> {
    fn read_at(&self, offset: u64, buf: &mut [u8]) -> Result<()> {
        (**self).read_at(offset, buf)
    }
}
