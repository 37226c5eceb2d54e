//! Date/time parsing
//!
//! ISO9660 has two datetime formats: the 7-byte binary form used by
//! directory records and the 17-byte ASCII form used by volume descriptors.
//! Both carry a signed GMT offset in 15-minute units; decoding subtracts it
//! so every instant handed out is UTC.

use crate::error::{Iso9660Error, Result};
use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime, TimeDelta, Timelike, Utc};

/// Seconds from the Unix epoch back to 1900-01-01T00:00:00Z
const ERA_EPOCH_SECS: i64 = -2_208_988_800;

/// Instant an unset recording timestamp decodes to (1900-01-01T00:00:00Z)
pub fn era_epoch() -> DateTime<Utc> {
    DateTime::<Utc>::from_timestamp(ERA_EPOCH_SECS, 0).unwrap_or_default()
}

fn apply_gmt_offset(local: NaiveDateTime, gmt_offset: i8) -> DateTime<Utc> {
    (local - TimeDelta::minutes(i64::from(gmt_offset) * 15)).and_utc()
}

/// 7-byte directory record datetime
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RecordingTimestamp {
    /// Years since 1900
    pub year: u8,

    /// Month (1-12)
    pub month: u8,

    /// Day (1-31)
    pub day: u8,

    /// Hour (0-23)
    pub hour: u8,

    /// Minute (0-59)
    pub minute: u8,

    /// Second (0-59)
    pub second: u8,

    /// GMT offset in 15-minute intervals (-48 to +52)
    pub gmt_offset: i8,
}

impl RecordingTimestamp {
    /// Parse from 7-byte array
    pub fn from_bytes(bytes: &[u8; 7]) -> Self {
        Self {
            year: bytes[0],
            month: bytes[1],
            day: bytes[2],
            hour: bytes[3],
            minute: bytes[4],
            second: bytes[5],
            gmt_offset: bytes[6] as i8,
        }
    }

    /// Serialize back to the on-disk 7 bytes
    pub fn to_bytes(&self) -> [u8; 7] {
        [
            self.year,
            self.month,
            self.day,
            self.hour,
            self.minute,
            self.second,
            self.gmt_offset as u8,
        ]
    }

    /// Get full year (1900 + year)
    pub fn full_year(&self) -> u16 {
        1900 + self.year as u16
    }

    /// All seven bytes zero: the field was never set
    pub fn is_unset(&self) -> bool {
        *self == Self::default()
    }

    /// Resolve to a UTC instant
    ///
    /// `offset` is only used to locate the error. An unset timestamp decodes
    /// to [`era_epoch`].
    pub fn to_utc(&self, offset: u64) -> Result<DateTime<Utc>> {
        if self.is_unset() {
            return Ok(era_epoch());
        }

        let local = NaiveDate::from_ymd_opt(
            i32::from(self.full_year()),
            u32::from(self.month),
            u32::from(self.day),
        )
        .and_then(|date| {
            date.and_hms_opt(
                u32::from(self.hour),
                u32::from(self.minute),
                u32::from(self.second),
            )
        })
        .ok_or(Iso9660Error::decode(offset, "impossible recording date"))?;

        Ok(apply_gmt_offset(local, self.gmt_offset))
    }

    /// Build a GMT-offset-zero timestamp for `instant`
    pub fn from_utc(instant: &DateTime<Utc>) -> Result<Self> {
        let year = u8::try_from(instant.year() - 1900)
            .map_err(|_| Iso9660Error::Encode("recording year outside 1900..=2155"))?;

        Ok(Self {
            year,
            month: instant.month() as u8,
            day: instant.day() as u8,
            hour: instant.hour() as u8,
            minute: instant.minute() as u8,
            second: instant.second() as u8,
            gmt_offset: 0,
        })
    }
}

/// Parse the 17-byte ASCII volume datetime (`YYYYMMDDHHMMSScc` + GMT offset)
///
/// Returns `None` for the "not specified" form (all `'0'` digits or all zero
/// bytes) and for digits that do not form a real date.
pub fn parse_volume_timestamp(bytes: &[u8; 17]) -> Option<DateTime<Utc>> {
    let digits = &bytes[..16];
    if digits.iter().all(|&b| b == b'0' || b == 0) {
        return None;
    }

    let number = |range: core::ops::Range<usize>| -> Option<u32> {
        digits[range].iter().try_fold(0u32, |acc, &b| {
            b.is_ascii_digit().then(|| acc * 10 + u32::from(b - b'0'))
        })
    };

    let local = NaiveDate::from_ymd_opt(number(0..4)? as i32, number(4..6)?, number(6..8)?)?
        .and_hms_milli_opt(
            number(8..10)?,
            number(10..12)?,
            number(12..14)?,
            number(14..16)? * 10,
        )?;

    Some(apply_gmt_offset(local, bytes[16] as i8))
}
