//! Opened image handle

use crate::directory;
use crate::error::Result;
use crate::file::File;
use crate::options::OpenOptions;
use crate::source::SectorSource;
use crate::types::FileEntry;
use crate::volume::{self, PrimaryVolumeDescriptor};
use alloc::sync::Arc;
use core::fmt;
use tracing::debug;

/// State shared by an image and every file handle derived from it
pub(crate) struct ImageInner<S> {
    pub(crate) source: S,
    pub(crate) options: OpenOptions,
    pub(crate) volume: PrimaryVolumeDescriptor,
    pub(crate) root: FileEntry,
}

/// An opened ISO9660 image
///
/// Cloning is cheap; clones and every [`File`] obtained from them share the
/// underlying source, which lives as long as the longest-lived of them.
pub struct Image<S> {
    inner: Arc<ImageInner<S>>,
}

impl<S: SectorSource> Image<S> {
    /// Open `source` with default [`OpenOptions`]
    pub fn open(source: S) -> Result<Self> {
        Self::open_with(source, OpenOptions::default())
    }

    /// Open `source`, reading and validating the volume descriptor set
    pub fn open_with(source: S, options: OpenOptions) -> Result<Self> {
        let volume = volume::read_primary_descriptor(&source, &options)?;
        let root = FileEntry::from_record(&volume.root, volume.root_record_offset())?;

        debug!(
            volume_id = %volume.volume_id,
            blocks = volume.volume_space_size,
            root = volume.root.extent.location,
            "opened image"
        );

        Ok(Self {
            inner: Arc::new(ImageInner {
                source,
                options,
                volume,
                root,
            }),
        })
    }

    /// The Primary Volume Descriptor
    pub fn volume(&self) -> &PrimaryVolumeDescriptor {
        &self.inner.volume
    }

    /// Volume identifier, trailing padding removed
    pub fn volume_id(&self) -> &str {
        &self.inner.volume.volume_id
    }

    /// Options the image was opened with
    pub fn options(&self) -> &OpenOptions {
        &self.inner.options
    }

    /// Underlying sector source
    pub fn source(&self) -> &S {
        &self.inner.source
    }

    /// Root directory; named `"\0"` like any self record
    pub fn root_dir(&self) -> File<S> {
        File::new(self.inner.root.clone(), Arc::clone(&self.inner))
    }

    /// Look up a file or directory by absolute path
    ///
    /// Matching is case-insensitive and ignores `;N` version suffixes.
    pub fn find(&self, path: &str) -> Result<File<S>> {
        let entry = directory::find_entry(
            &self.inner.source,
            &self.inner.root,
            path,
            self.inner.options.dual_endian,
        )?;
        Ok(File::new(entry, Arc::clone(&self.inner)))
    }
}

impl<S> Clone for Image<S> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<S> fmt::Debug for Image<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Image")
            .field("volume_id", &self.inner.volume.volume_id)
            .field("options", &self.inner.options)
            .finish_non_exhaustive()
    }
}
