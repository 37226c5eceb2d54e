//! Both-endian integer fields
//!
//! ISO9660 stores most integers twice: little-endian followed by big-endian.
//! The little-endian half is authoritative; the big-endian half is only
//! compared so callers can flag sloppy encoders.

/// A decoded both-endian value
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DualEndian<T> {
    /// Value taken from the little-endian half
    pub value: T,
    /// Whether the big-endian half agreed
    pub consistent: bool,
}

impl<T: Copy> DualEndian<T> {
    /// Get value (uses little-endian)
    pub fn get(&self) -> T {
        self.value
    }
}

/// Decode a both-endian 32-bit field (8 bytes)
pub fn read_u32(bytes: &[u8]) -> DualEndian<u32> {
    let le = u32::from_le_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]);
    let be = u32::from_be_bytes([bytes[4], bytes[5], bytes[6], bytes[7]]);
    DualEndian {
        value: le,
        consistent: le == be,
    }
}

/// Decode a both-endian 16-bit field (4 bytes)
pub fn read_u16(bytes: &[u8]) -> DualEndian<u16> {
    let le = u16::from_le_bytes([bytes[0], bytes[1]]);
    let be = u16::from_be_bytes([bytes[2], bytes[3]]);
    DualEndian {
        value: le,
        consistent: le == be,
    }
}

/// Encode a both-endian 32-bit field into the first 8 bytes of `dst`
pub fn write_u32(dst: &mut [u8], value: u32) {
    dst[0..4].copy_from_slice(&value.to_le_bytes());
    dst[4..8].copy_from_slice(&value.to_be_bytes());
}

/// Encode a both-endian 16-bit field into the first 4 bytes of `dst`
pub fn write_u16(dst: &mut [u8], value: u16) {
    dst[0..2].copy_from_slice(&value.to_le_bytes());
    dst[2..4].copy_from_slice(&value.to_be_bytes());
}
