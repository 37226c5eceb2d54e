//! String handling utilities
//!
//! ISO9660 uses various string encodings: ASCII, d-characters, a-characters.

use crate::types::{PARENT_IDENTIFIER, SELF_IDENTIFIER};
use alloc::string::String;

/// Trim trailing spaces from byte slice
pub fn trim_trailing_spaces(bytes: &[u8]) -> &[u8] {
    let mut end = bytes.len();
    while end > 0 && (bytes[end - 1] == b' ' || bytes[end - 1] == 0) {
        end -= 1;
    }
    &bytes[..end]
}

/// Decode a space-padded descriptor string field (a- or d-characters)
pub fn padded_to_string(bytes: &[u8]) -> String {
    String::from_utf8_lossy(trim_trailing_spaces(bytes)).into_owned()
}

/// Strip version suffix from filename (e.g., "FILE.TXT;1" -> "FILE.TXT")
///
/// Only a `;` followed by one or more digits counts as a version.
pub fn strip_version(name: &str) -> &str {
    match name.rsplit_once(';') {
        Some((base, version))
            if !version.is_empty() && version.bytes().all(|b| b.is_ascii_digit()) =>
        {
            base
        }
        _ => name,
    }
}

/// Whether `identifier` is one of the single-byte self/parent markers
pub fn is_dot_identifier(identifier: &[u8]) -> bool {
    matches!(identifier, [SELF_IDENTIFIER] | [PARENT_IDENTIFIER])
}

/// Externally visible name for a raw record identifier
///
/// Self/parent markers are preserved as `"\0"` and `"\u{1}"`; anything else
/// loses its version suffix.
pub fn identifier_to_name(identifier: &[u8]) -> String {
    if is_dot_identifier(identifier) {
        return String::from(char::from(identifier[0]));
    }
    let name = String::from_utf8_lossy(identifier);
    String::from(strip_version(&name))
}

/// Case-insensitive name match used by path lookup
///
/// `"README."` (extension-less ISO name) matches `"readme"`.
pub fn names_match(entry: &str, wanted: &str) -> bool {
    let entry = entry.strip_suffix('.').unwrap_or(entry);
    let wanted = wanted.strip_suffix('.').unwrap_or(wanted);
    entry.eq_ignore_ascii_case(wanted)
}
