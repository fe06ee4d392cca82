//! Domain primitive types used across the labware workspace.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::constants::{MAX_COLUMNS, NAME_SEPARATOR};
use crate::error::{LabwareError, Result};

/// Hierarchical name of a container definition, e.g. `example_plate.deepwell.red`.
///
/// The first segment is the root container (a file's base name); every
/// following segment names a subset of the previous one.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct DefinitionName(String);

impl DefinitionName {
    /// Parses a dot-joined name.
    ///
    /// # Errors
    ///
    /// Returns [`LabwareError::Config`] if the name is empty or has an
    /// empty segment (`plate..deep`, `.plate`, `plate.`).
    pub fn parse(name: impl Into<String>) -> Result<Self> {
        let name = name.into();
        if name.split(NAME_SEPARATOR).any(str::is_empty) {
            return Err(LabwareError::Config {
                message: format!("invalid definition name: \"{name}\""),
            });
        }
        Ok(Self(name))
    }

    /// Returns the root container segment.
    #[must_use]
    pub fn root(&self) -> &str {
        self.segments().next().unwrap_or_default()
    }

    /// Iterates the path segments from root to leaf.
    pub fn segments(&self) -> impl Iterator<Item = &str> {
        self.0.split(NAME_SEPARATOR)
    }

    /// Number of subset levels below the root.
    #[must_use]
    pub fn depth(&self) -> usize {
        self.segments().count() - 1
    }

    /// Returns the name of a direct subset of this definition.
    #[must_use]
    pub fn child(&self, segment: &str) -> Self {
        Self(format!("{}{NAME_SEPARATOR}{segment}", self.0))
    }

    /// Returns the inner string representation.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for DefinitionName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for DefinitionName {
    type Err = LabwareError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl TryFrom<String> for DefinitionName {
    type Error = LabwareError;

    fn try_from(value: String) -> Result<Self> {
        Self::parse(value)
    }
}

impl From<DefinitionName> for String {
    fn from(name: DefinitionName) -> Self {
        name.0
    }
}

/// Position of a single well in a container grid.
///
/// Written as a column letter followed by a 1-based row number: `A1` is
/// column 0, row 0 and `b222` is column 1, row 221.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct WellPosition {
    col: u32,
    row: u32,
}

impl WellPosition {
    /// Creates a position from zero-based column and row indices.
    ///
    /// # Errors
    ///
    /// Returns [`LabwareError::Config`] if the column cannot be written as
    /// a single letter.
    pub fn new(col: u32, row: u32) -> Result<Self> {
        if col >= MAX_COLUMNS {
            return Err(LabwareError::Config {
                message: format!("column index {col} has no letter (maximum {MAX_COLUMNS})"),
            });
        }
        Ok(Self { col, row })
    }

    /// Zero-based column index (the letter).
    #[must_use]
    pub const fn col(self) -> u32 {
        self.col
    }

    /// Zero-based row index (the number minus one).
    #[must_use]
    pub const fn row(self) -> u32 {
        self.row
    }

    /// Returns the column letter.
    #[must_use]
    pub fn column_letter(self) -> char {
        // col < MAX_COLUMNS, so the offset always stays inside A..=Z.
        char::from(b'A' + u8::try_from(self.col).unwrap_or(0))
    }
}

impl FromStr for WellPosition {
    type Err = LabwareError;

    fn from_str(s: &str) -> Result<Self> {
        let invalid = || LabwareError::Config {
            message: format!("invalid well position: \"{s}\""),
        };

        let mut chars = s.chars();
        let letter = chars.next().ok_or_else(invalid)?.to_ascii_uppercase();
        if !letter.is_ascii_uppercase() {
            return Err(invalid());
        }
        let digits = chars.as_str();
        if digits.is_empty() || !digits.chars().all(|c| c.is_ascii_digit()) {
            return Err(invalid());
        }
        let number: u32 = digits.parse().map_err(|_| invalid())?;
        if number == 0 {
            return Err(invalid());
        }

        Self::new(u32::from(letter) - u32::from('A'), number - 1)
    }
}

impl fmt::Display for WellPosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.column_letter(), self.row + 1)
    }
}

impl Serialize for WellPosition {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for WellPosition {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pos(s: &str) -> (u32, u32) {
        let p: WellPosition = s.parse().expect("valid position");
        (p.col(), p.row())
    }

    #[test]
    fn normalizes_coordinate_strings() {
        assert_eq!(pos("A1"), (0, 0));
        assert_eq!(pos("B1"), (1, 0));
        assert_eq!(pos("C2"), (2, 1));
    }

    #[test]
    fn accepts_lowercase_letters() {
        assert_eq!(pos("c2"), (2, 1));
    }

    #[test]
    fn accepts_multidigit_rows() {
        assert_eq!(pos("b222"), (1, 221));
    }

    #[test]
    fn accepts_full_letter_range() {
        assert_eq!(pos("A1"), (0, 0));
        assert_eq!(pos("Z1"), (25, 0));
    }

    #[test]
    fn rejects_characters_outside_letters() {
        assert!("]1".parse::<WellPosition>().is_err());
        assert!("@1".parse::<WellPosition>().is_err());
    }

    #[test]
    fn rejects_malformed_strings() {
        for bad in ["11", "", "A", "A0", "A1x", "AA1", "A-1"] {
            assert!(bad.parse::<WellPosition>().is_err(), "accepted {bad:?}");
        }
    }

    #[test]
    fn humanizes_back_to_name() {
        let p = WellPosition::new(1, 3).expect("valid");
        assert_eq!(p.to_string(), "B4");
        assert_eq!("a1".parse::<WellPosition>().expect("valid").to_string(), "A1");
    }

    #[test]
    fn column_beyond_alphabet_is_rejected() {
        assert!(WellPosition::new(26, 0).is_err());
    }

    #[test]
    fn definition_name_segments() {
        let name = DefinitionName::parse("example_plate.deepwell.red").expect("valid");
        assert_eq!(name.root(), "example_plate");
        assert_eq!(name.depth(), 2);
        assert_eq!(
            name.segments().collect::<Vec<_>>(),
            vec!["example_plate", "deepwell", "red"]
        );
    }

    #[test]
    fn definition_name_child() {
        let name = DefinitionName::parse("plate").expect("valid");
        assert_eq!(name.child("deep").as_str(), "plate.deep");
        assert_eq!(name.depth(), 0);
    }

    #[test]
    fn definition_name_rejects_empty_segments() {
        for bad in ["", ".plate", "plate.", "plate..deep"] {
            assert!(DefinitionName::parse(bad).is_err(), "accepted {bad:?}");
        }
    }

    #[test]
    fn definition_name_serde_roundtrip() {
        let name = DefinitionName::parse("plate.deep").expect("valid");
        let json = serde_json::to_string(&name).expect("serialize");
        assert_eq!(json, "\"plate.deep\"");
        assert!(serde_json::from_str::<DefinitionName>("\"plate..deep\"").is_err());
    }
}
