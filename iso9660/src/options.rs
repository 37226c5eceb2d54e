//! Open-time configuration

use crate::error::{Iso9660Error, Result};
use crate::image::Image;
use crate::source::SectorSource;
use tracing::warn;

/// What to do when the two halves of a both-endian field disagree
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DualEndianPolicy {
    /// Use the little-endian half silently
    Ignore,
    /// Use the little-endian half and log a warning
    #[default]
    Warn,
    /// Fail with [`MalformedDualEndianField`](crate::Iso9660Error::MalformedDualEndianField)
    Reject,
}

impl DualEndianPolicy {
    /// Apply the policy to a structure at `offset` whose first mismatched field is `mismatch`
    pub(crate) fn check(self, offset: u64, mismatch: Option<&'static str>) -> Result<()> {
        let Some(field) = mismatch else {
            return Ok(());
        };
        match self {
            Self::Ignore => Ok(()),
            Self::Warn => {
                warn!(offset, field, "both-endian field halves disagree, using little-endian");
                Ok(())
            }
            Self::Reject => Err(Iso9660Error::MalformedDualEndianField { offset, field }),
        }
    }
}

/// Whether [`File::children`](crate::File::children) returns the self/parent records
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DotEntries {
    /// Leave `\0` and `\u{1}` out of listings
    #[default]
    Skip,
    /// Return them as ordinary children, in on-disk position
    Include,
}

/// Options used when opening an image
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OpenOptions {
    /// Both-endian mismatch handling
    pub dual_endian: DualEndianPolicy,
    /// Self/parent record handling in listings
    pub dot_entries: DotEntries,
    /// Upper bound on descriptors scanned from sector 16
    pub max_descriptors: u32,
}

impl Default for OpenOptions {
    fn default() -> Self {
        Self {
            dual_endian: DualEndianPolicy::Warn,
            dot_entries: DotEntries::Skip,
            max_descriptors: 100,
        }
    }
}

impl OpenOptions {
    /// Default options
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the both-endian mismatch policy
    pub fn dual_endian(mut self, policy: DualEndianPolicy) -> Self {
        self.dual_endian = policy;
        self
    }

    /// Set self/parent record handling
    pub fn dot_entries(mut self, dot_entries: DotEntries) -> Self {
        self.dot_entries = dot_entries;
        self
    }

    /// Bound the volume descriptor scan
    pub fn max_descriptors(mut self, count: u32) -> Self {
        self.max_descriptors = count;
        self
    }

    /// Open `source` with these options
    pub fn open<S: SectorSource>(self, source: S) -> Result<Image<S>> {
        Image::open_with(source, self)
    }
}
