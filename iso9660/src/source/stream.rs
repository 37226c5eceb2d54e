//! Seekable stream adapter (host builds)

use super::SectorSource;
use crate::error::{Iso9660Error, Result};
use std::io::{Read, Seek, SeekFrom};
use std::sync::{Mutex, PoisonError};

/// Sector source over anything `Read + Seek`, such as an open `.iso` file
///
/// The stream has a single cursor; seek and read happen under one lock so
/// concurrent readers never see each other's partial results. Every read
/// seeks first, so a lock poisoned by a panicking reader is still usable.
pub struct StreamSource<R> {
    inner: Mutex<R>,
}

impl<R: Read + Seek> StreamSource<R> {
    /// Wrap a stream
    pub fn new(inner: R) -> Self {
        Self {
            inner: Mutex::new(inner),
        }
    }

    /// Release the wrapped stream
    pub fn into_inner(self) -> R {
        self.inner.into_inner().unwrap_or_else(PoisonError::into_inner)
    }
}

impl<R: Read + Seek> SectorSource for StreamSource<R> {
    fn read_at(&self, offset: u64, buf: &mut [u8]) -> Result<()> {
        let mut inner = self.inner.lock().unwrap_or_else(PoisonError::into_inner);
        inner
            .seek(SeekFrom::Start(offset))
            .map_err(|e| Iso9660Error::io(offset, e.to_string()))?;
        inner
            .read_exact(buf)
            .map_err(|e| Iso9660Error::io(offset, e.to_string()))
    }
}
