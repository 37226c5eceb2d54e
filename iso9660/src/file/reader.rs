//! File reader implementation
//!
//! Presents the extents of one file as a single byte stream. Extents are
//! visited in order; zero-length extents contribute nothing.

use crate::error::Result;
use crate::image::ImageInner;
use crate::source::SectorSource;
use alloc::sync::Arc;
use alloc::vec::Vec;
use tracing::trace;

use super::extent::Extent;

/// Sequential reader over a file's extents
///
/// Forward-only. Create a new reader from the [`File`](crate::File) to start
/// over.
pub struct FileReader<S> {
    image: Arc<ImageInner<S>>,
    extents: Vec<Extent>,
    index: usize,
    offset: u32,
    position: u64,
    size: u64,
}

impl<S: SectorSource> FileReader<S> {
    pub(crate) fn new(image: Arc<ImageInner<S>>, extents: Vec<Extent>) -> Self {
        let size = extents.iter().map(|e| u64::from(e.length)).sum();
        Self {
            image,
            extents,
            index: 0,
            offset: 0,
            position: 0,
            size,
        }
    }

    /// Read bytes from current position
    ///
    /// Fills as much of `buffer` as the remaining extents allow and returns
    /// the count; `Ok(0)` means end of file.
    pub fn read(&mut self, buffer: &mut [u8]) -> Result<usize> {
        let mut filled = 0;

        while filled < buffer.len() {
            let Some(extent) = self.extents.get(self.index).copied() else {
                break;
            };

            let remaining = extent.length - self.offset;
            if remaining == 0 {
                self.index += 1;
                self.offset = 0;
                if let Some(next) = self.extents.get(self.index) {
                    trace!(
                        index = self.index,
                        location = next.location,
                        length = next.length,
                        "advancing to next extent"
                    );
                }
                continue;
            }

            let want = remaining.min(u32::try_from(buffer.len() - filled).unwrap_or(u32::MAX));
            let start = extent.byte_offset() + u64::from(self.offset);
            let dst = &mut buffer[filled..filled + want as usize];
            self.image.source.read_at(start, dst)?;

            self.offset += want;
            self.position += u64::from(want);
            filled += want as usize;
        }

        Ok(filled)
    }

    /// Get current position
    pub fn position(&self) -> u64 {
        self.position
    }

    /// Get file size
    pub fn size(&self) -> u64 {
        self.size
    }

    /// Bytes left before end of file
    pub fn remaining(&self) -> u64 {
        self.size - self.position
    }

    /// Has the whole file been read?
    pub fn is_eof(&self) -> bool {
        self.position >= self.size
    }
}

#[cfg(feature = "std")]
impl<S: SectorSource> std::io::Read for FileReader<S> {
    fn read(&mut self, buf: &mut [u8]) -> std::io::Result<usize> {
        FileReader::read(self, buf).map_err(std::io::Error::from)
    }
}
