//! Stable identifiers for saved desktop contexts.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;
use uuid::Uuid;

/// Error raised when a string is not a canonically formatted desktop id.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ParseIdError {
    /// The string is not in `XXXXXXXX-XXXX-XXXX-XXXX-XXXXXXXXXXXX` form.
    #[error("desktop id is not in canonical GUID form: {0:?}")]
    NotCanonical(String),
}

/// Unique identifier of a desktop context.
///
/// A 128-bit id rendered in canonical hyphenated 8-4-4-4-12 hexadecimal form
/// everywhere it is persisted or displayed. Parsing accepts only that form
/// (hex digits case-insensitive); looser spellings that a general UUID parser
/// would tolerate are rejected, because the save format stores ids
/// canonically.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct DesktopId(Uuid);

impl DesktopId {
    /// Generates a fresh random identifier.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// The underlying UUID value.
    pub fn as_uuid(&self) -> Uuid {
        self.0
    }
}

impl Default for DesktopId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for DesktopId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.hyphenated())
    }
}

impl FromStr for DesktopId {
    type Err = ParseIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if !is_canonical(s) {
            return Err(ParseIdError::NotCanonical(s.to_string()));
        }
        // After the shape check the UUID parse cannot fail, but keep the error
        // path honest rather than unwrapping.
        Uuid::parse_str(s)
            .map(Self)
            .map_err(|_| ParseIdError::NotCanonical(s.to_string()))
    }
}

impl From<Uuid> for DesktopId {
    fn from(uuid: Uuid) -> Self {
        Self(uuid)
    }
}

impl From<DesktopId> for Uuid {
    fn from(id: DesktopId) -> Self {
        id.0
    }
}

/// Checks the hyphenated 8-4-4-4-12 hexadecimal shape.
fn is_canonical(s: &str) -> bool {
    let bytes = s.as_bytes();
    if bytes.len() != 36 {
        return false;
    }
    bytes.iter().enumerate().all(|(i, b)| match i {
        8 | 13 | 18 | 23 => *b == b'-',
        _ => b.is_ascii_hexdigit(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Asserts the canonical 8-4-4-4-12 hyphenated hex shape.
    fn assert_canonical(s: &str) {
        let groups: Vec<&str> = s.split('-').collect();
        let lengths: Vec<usize> = groups.iter().map(|g| g.len()).collect();
        assert_eq!(lengths, [8, 4, 4, 4, 12], "group lengths of {s:?}");
        assert!(
            groups.iter().all(|g| g.chars().all(|c| c.is_ascii_hexdigit())),
            "non-hex digit in {s:?}"
        );
    }

    #[test]
    fn test_new_ids_render_in_canonical_form() {
        for _ in 0..16 {
            assert_canonical(&DesktopId::new().to_string());
        }
    }

    #[test]
    fn test_new_ids_are_unique() {
        let a = DesktopId::new();
        let b = DesktopId::new();
        assert_ne!(a, b);
    }

    #[test]
    fn test_display_round_trips_through_from_str() {
        let id = DesktopId::new();
        let parsed: DesktopId = id.to_string().parse().unwrap();
        assert_eq!(parsed, id);
    }

    #[test]
    fn test_parse_accepts_uppercase_hex() {
        let id: DesktopId = "A1B2C3D4-E5F6-4A0B-8C9D-0123456789AB".parse().unwrap();
        assert_eq!(id.to_string(), "a1b2c3d4-e5f6-4a0b-8c9d-0123456789ab");
    }

    #[test]
    fn test_parse_rejects_missing_hyphens() {
        // A general UUID parser would accept this spelling; the save format
        // does not.
        let err = "a1b2c3d4e5f64a0b8c9d0123456789ab".parse::<DesktopId>().unwrap_err();
        assert!(matches!(err, ParseIdError::NotCanonical(_)));
    }

    #[test]
    fn test_parse_rejects_braced_form() {
        let err = "{a1b2c3d4-e5f6-4a0b-8c9d-0123456789ab}"
            .parse::<DesktopId>()
            .unwrap_err();
        assert!(matches!(err, ParseIdError::NotCanonical(_)));
    }

    #[test]
    fn test_parse_rejects_non_hex_digits() {
        let err = "g1b2c3d4-e5f6-4a0b-8c9d-0123456789ab"
            .parse::<DesktopId>()
            .unwrap_err();
        assert!(matches!(err, ParseIdError::NotCanonical(_)));
    }

    #[test]
    fn test_uuid_conversions_preserve_value() {
        let uuid = Uuid::new_v4();
        let id = DesktopId::from(uuid);
        assert_eq!(Uuid::from(id), uuid);
        assert_eq!(id.as_uuid(), uuid);
    }
}
