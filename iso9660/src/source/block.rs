//! `gpt_disk_io::BlockIo` adapter

use super::SectorSource;
use crate::error::{Iso9660Error, Result};
use alloc::{format, vec};
use gpt_disk_io::BlockIo;
use gpt_disk_types::Lba;
use spin::Mutex;

/// Sector source over a block device
///
/// `BlockIo::read_blocks` needs `&mut self`, so the device sits behind a
/// spinlock held for exactly one read. Reads are widened to whole device
/// blocks, which lets an ISO be served from a 512-byte-block disk.
pub struct BlockDevice<B: BlockIo> {
    device: Mutex<B>,
    start_lba: u64,
    block_size: u64,
}

impl<B: BlockIo> BlockDevice<B> {
    /// Wrap a device holding a raw ISO starting at block 0
    pub fn new(device: B) -> Self {
        Self::with_start_lba(device, 0)
    }

    /// Wrap a device holding an ISO that starts at device block `start_lba`
    pub fn with_start_lba(device: B, start_lba: u64) -> Self {
        let block_size = device.block_size().to_u64();
        Self {
            device: Mutex::new(device),
            start_lba,
            block_size,
        }
    }

    /// Release the wrapped device
    pub fn into_inner(self) -> B {
        self.device.into_inner()
    }
}

impl<B: BlockIo> SectorSource for BlockDevice<B> {
    fn read_at(&self, offset: u64, buf: &mut [u8]) -> Result<()> {
        if buf.is_empty() {
            return Ok(());
        }
        let end = offset
            .checked_add(buf.len() as u64)
            .ok_or_else(|| Iso9660Error::io(offset, "range overflow"))?;

        let bs = self.block_size;
        let first_block = offset / bs;
        let aligned_start = first_block * bs;
        let aligned_len = (end.div_ceil(bs) * bs - aligned_start) as usize;
        let head = (offset - aligned_start) as usize;

        let lba = Lba(self.start_lba + first_block);
        if head == 0 && aligned_len == buf.len() {
            return self
                .device
                .lock()
                .read_blocks(lba, buf)
                .map_err(|e| Iso9660Error::io(offset, format!("{:?}", e)));
        }

        let mut scratch = vec![0u8; aligned_len];
        self.device
            .lock()
            .read_blocks(lba, &mut scratch)
            .map_err(|e| Iso9660Error::io(offset, format!("{:?}", e)))?;
        buf.copy_from_slice(&scratch[head..head + buf.len()]);
        Ok(())
    }
}
