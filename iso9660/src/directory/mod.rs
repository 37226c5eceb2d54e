//! Directory record parsing and navigation

pub mod flags;
pub mod iterator;
pub mod merge;
pub mod record;

use crate::error::{Iso9660Error, Result};
use crate::file::extent::Extent;
use crate::options::DualEndianPolicy;
use crate::source::SectorSource;
use crate::types::{FileEntry, MAX_DIRECTORY_DEPTH};
use crate::utils::string::names_match;
use alloc::string::String;
use alloc::vec::Vec;
use tracing::trace;

use iterator::DirectoryIterator;
use merge::ExtentMerger;

/// Read every entry of the directory stored at `extent`
///
/// Multi-extent files come back merged; self/parent entries are included at
/// their on-disk position. Any decode or I/O failure fails the whole listing.
pub fn read_directory<S: SectorSource + ?Sized>(
    source: &S,
    extent: Extent,
    policy: DualEndianPolicy,
) -> Result<Vec<FileEntry>> {
    let mut merger = ExtentMerger::new();
    for result in DirectoryIterator::new(source, extent, policy) {
        let (offset, record) = result?;
        merger.push(offset, record)?;
    }
    let entries = merger.finish();
    trace!(
        location = extent.location,
        entries = entries.len(),
        "read directory"
    );
    Ok(entries)
}

/// Find a file or directory by path
///
/// Navigates the directory tree from `root` to locate a file/directory.
/// Paths are case-insensitive, ignore version suffixes, and accept both `/`
/// and `\` separators. An empty path or `/` yields `root` itself.
///
/// # Example
/// ```ignore
/// let entry = find_entry(&source, &root, "/boot/vmlinuz", DualEndianPolicy::Warn)?;
/// println!("File size: {} bytes", entry.size());
/// ```
pub fn find_entry<S: SectorSource + ?Sized>(
    source: &S,
    root: &FileEntry,
    path: &str,
    policy: DualEndianPolicy,
) -> Result<FileEntry> {
    let components: Vec<&str> = path
        .split(|c| c == '/' || c == '\\')
        .filter(|c| !c.is_empty() && *c != ".")
        .collect();

    if components.len() > MAX_DIRECTORY_DEPTH {
        return Err(Iso9660Error::PathTooLong);
    }

    let not_found = || Iso9660Error::NotFound(String::from(path));
    let mut current = root.clone();

    for component in components {
        if !current.is_directory() {
            return Err(not_found());
        }
        let extent = *current.extents.first().ok_or_else(not_found)?;
        current = read_directory(source, extent, policy)?
            .into_iter()
            .find(|entry| !entry.is_dot() && names_match(&entry.name, component))
            .ok_or_else(not_found)?;
    }

    Ok(current)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::directory::record::DirectoryRecord;
    use crate::types::{FileFlags, SECTOR_SIZE};
    use alloc::vec;

    fn put(image: &mut [u8], at: usize, records: &[DirectoryRecord]) {
        let mut pos = at;
        for record in records {
            let bytes = record.encode().unwrap();
            image[pos..pos + bytes.len()].copy_from_slice(&bytes);
            pos += bytes.len();
        }
    }

    /// Root at sector 1 holding `DOCS/`, which holds `README.TXT;1`
    fn tree() -> (Vec<u8>, FileEntry) {
        let mut image = vec![0u8; 4 * SECTOR_SIZE];
        let root = Extent::new(1, 2048);
        let docs = Extent::new(2, 2048);
        put(
            &mut image,
            SECTOR_SIZE,
            &[
                DirectoryRecord::new(&[0], root, FileFlags::dir()),
                DirectoryRecord::new(&[1], root, FileFlags::dir()),
                DirectoryRecord::new(b"DOCS", docs, FileFlags::dir()),
            ],
        );
        put(
            &mut image,
            2 * SECTOR_SIZE,
            &[
                DirectoryRecord::new(&[0], docs, FileFlags::dir()),
                DirectoryRecord::new(&[1], root, FileFlags::dir()),
                DirectoryRecord::new(b"README.TXT;1", Extent::new(3, 5), FileFlags::default()),
            ],
        );
        image[3 * SECTOR_SIZE..3 * SECTOR_SIZE + 5].copy_from_slice(b"hello");

        let root_record = DirectoryRecord::new(&[0], root, FileFlags::dir());
        (image, FileEntry::from_record(&root_record, 0).unwrap())
    }

    #[test]
    fn test_read_directory_keeps_dot_entries() {
        let (image, root) = tree();
        let entries = read_directory(&image, root.extents[0], DualEndianPolicy::Warn).unwrap();
        let names: Vec<_> = entries.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, vec!["\0", "\u{1}", "DOCS"]);
    }

    #[test]
    fn test_find_nested_file() {
        let (image, root) = tree();
        let found = find_entry(&image, &root, "/docs/readme.txt", DualEndianPolicy::Warn).unwrap();
        assert_eq!(found.name, "README.TXT");
        assert_eq!(found.extents, vec![Extent::new(3, 5)]);

        let backslash =
            find_entry(&image, &root, "DOCS\\README.TXT", DualEndianPolicy::Warn).unwrap();
        assert_eq!(backslash, found);
    }

    #[test]
    fn test_find_root() {
        let (image, root) = tree();
        assert_eq!(find_entry(&image, &root, "/", DualEndianPolicy::Warn).unwrap(), root);
        assert_eq!(find_entry(&image, &root, "", DualEndianPolicy::Warn).unwrap(), root);
    }

    #[test]
    fn test_find_missing() {
        let (image, root) = tree();
        assert_eq!(
            find_entry(&image, &root, "/docs/nothing", DualEndianPolicy::Warn),
            Err(Iso9660Error::NotFound(String::from("/docs/nothing")))
        );
        // descending through a regular file
        assert!(matches!(
            find_entry(&image, &root, "/docs/readme.txt/x", DualEndianPolicy::Warn),
            Err(Iso9660Error::NotFound(_))
        ));
    }

    #[test]
    fn test_path_too_long() {
        let (image, root) = tree();
        let deep = "/a/b/c/d/e/f/g/h/i";
        assert_eq!(
            find_entry(&image, &root, deep, DualEndianPolicy::Warn),
            Err(Iso9660Error::PathTooLong)
        );
    }
}
