//! Directory iteration
//!
//! Iterator for reading directory records sequentially, in physical order,
//! one sector at a time.

use crate::directory::record::DirectoryRecord;
use crate::error::Result;
use crate::file::extent::Extent;
use crate::options::DualEndianPolicy;
use crate::source::SectorSource;
use crate::types::SECTOR_SIZE;
use crate::utils::sector::next_sector_boundary;
use alloc::boxed::Box;
use tracing::trace;

/// Iterator over the raw records of one directory extent
///
/// Yields each record with its absolute byte offset. A zero length byte ends
/// the records of the current sector; scanning resumes at the next sector
/// boundary. Stops for good after the first error.
pub struct DirectoryIterator<'a, S: SectorSource + ?Sized> {
    source: &'a S,
    extent: Extent,
    policy: DualEndianPolicy,
    offset: usize,
    current_sector: Box<[u8; SECTOR_SIZE]>,
    current_index: Option<u32>,
    failed: bool,
}

impl<'a, S: SectorSource + ?Sized> DirectoryIterator<'a, S> {
    /// Create new directory iterator
    pub fn new(source: &'a S, extent: Extent, policy: DualEndianPolicy) -> Self {
        Self {
            source,
            extent,
            policy,
            offset: 0,
            current_sector: Box::new([0u8; SECTOR_SIZE]),
            current_index: None,
            failed: false,
        }
    }

    fn next_record(&mut self) -> Result<Option<(u64, DirectoryRecord)>> {
        let extent_len = self.extent.length as usize;
        loop {
            // Check if we've read all directory data
            if self.offset >= extent_len {
                return Ok(None);
            }

            let index = (self.offset / SECTOR_SIZE) as u32;
            let offset_in_sector = self.offset % SECTOR_SIZE;

            // Read sector if needed
            if self.current_index != Some(index) {
                self.source
                    .read_sector(self.extent.location + index, &mut self.current_sector)?;
                self.current_index = Some(index);
            }

            // The last sector of the extent may be partly outside it
            let window_end = SECTOR_SIZE.min(extent_len - index as usize * SECTOR_SIZE);
            let window = &self.current_sector[offset_in_sector..window_end];

            // Zero-length record: skip to next sector
            if window[0] == 0 {
                self.offset = next_sector_boundary(self.offset);
                continue;
            }

            let position = self.extent.byte_offset() + self.offset as u64;
            let record = DirectoryRecord::parse(window, position)?;
            self.policy.check(position, record.endian_mismatch)?;

            trace!(
                position,
                length = record.length,
                flags = record.flags.to_byte(),
                "decoded directory record"
            );

            self.offset += record.length as usize;
            return Ok(Some((position, record)));
        }
    }
}

impl<'a, S: SectorSource + ?Sized> Iterator for DirectoryIterator<'a, S> {
    type Item = Result<(u64, DirectoryRecord)>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed {
            return None;
        }
        match self.next_record() {
            Ok(record) => record.map(Ok),
            Err(e) => {
                self.failed = true;
                Some(Err(e))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Iso9660Error;
    use crate::types::FileFlags;
    use alloc::vec;
    use alloc::vec::Vec;

    fn record(name: &[u8], location: u32) -> Vec<u8> {
        DirectoryRecord::new(name, Extent::new(location, 10), FileFlags::default())
            .encode()
            .unwrap()
    }

    fn names(image: &Vec<u8>, extent: Extent) -> Vec<Vec<u8>> {
        DirectoryIterator::new(image, extent, DualEndianPolicy::Warn)
            .map(|r| r.map(|(_, rec)| rec.identifier))
            .collect::<Result<_>>()
            .unwrap()
    }

    #[test]
    fn test_zero_length_resumes_at_next_sector() {
        let mut image = vec![0u8; 4 * SECTOR_SIZE];
        let a = record(b"A.TXT;1", 30);
        let b = record(b"B.TXT;1", 31);
        image[2 * SECTOR_SIZE..2 * SECTOR_SIZE + a.len()].copy_from_slice(&a);
        image[3 * SECTOR_SIZE..3 * SECTOR_SIZE + b.len()].copy_from_slice(&b);

        let listed = names(&image, Extent::new(2, 2 * SECTOR_SIZE as u32));
        assert_eq!(listed, vec![b"A.TXT;1".to_vec(), b"B.TXT;1".to_vec()]);
    }

    #[test]
    fn test_offsets_are_absolute() {
        let mut image = vec![0u8; 2 * SECTOR_SIZE];
        let a = record(b"A;1", 5);
        let b = record(b"B;1", 6);
        image[SECTOR_SIZE..SECTOR_SIZE + a.len()].copy_from_slice(&a);
        image[SECTOR_SIZE + a.len()..SECTOR_SIZE + a.len() + b.len()].copy_from_slice(&b);

        let extent = Extent::new(1, 2048);
        let offsets: Vec<u64> = DirectoryIterator::new(&image, extent, DualEndianPolicy::Warn)
            .map(|r| r.unwrap().0)
            .collect();
        assert_eq!(offsets, vec![2048, 2048 + a.len() as u64]);
    }

    #[test]
    fn test_record_straddling_extent_end_is_truncated() {
        let mut image = vec![0u8; 2 * SECTOR_SIZE];
        let a = record(b"LONGNAME.TXT;1", 5);
        image[SECTOR_SIZE..SECTOR_SIZE + a.len()].copy_from_slice(&a);

        let mut iter = DirectoryIterator::new(&image, Extent::new(1, 20), DualEndianPolicy::Warn);
        assert!(matches!(
            iter.next(),
            Some(Err(Iso9660Error::TruncatedRecord { offset: 2048, available: 20, .. }))
        ));
        assert!(iter.next().is_none());
    }

    #[test]
    fn test_read_failure_is_io_error() {
        let image = vec![0u8; SECTOR_SIZE];
        let mut iter = DirectoryIterator::new(&image, Extent::new(5, 2048), DualEndianPolicy::Warn);
        assert!(iter.next().unwrap().unwrap_err().is_io());
    }

    #[test]
    fn test_reject_policy_fails_on_mismatch() {
        let mut image = vec![0u8; 2 * SECTOR_SIZE];
        let mut a = record(b"A;1", 5);
        a[9] = 0x77; // corrupt big-endian extent location
        image[SECTOR_SIZE..SECTOR_SIZE + a.len()].copy_from_slice(&a);

        let extent = Extent::new(1, 2048);
        let mut iter = DirectoryIterator::new(&image, extent, DualEndianPolicy::Reject);
        assert_eq!(
            iter.next().unwrap().unwrap_err(),
            Iso9660Error::MalformedDualEndianField { offset: 2048, field: "extent location" }
        );

        let mut lenient = DirectoryIterator::new(&image, extent, DualEndianPolicy::Ignore);
        assert_eq!(lenient.next().unwrap().unwrap().1.extent.location, 5);
    }
}
