//! Human-readable serial numbers such as `BR20240001`.
//!
//! A serial number is a two-letter prefix naming the record kind, the four-digit calendar
//! year and a four-digit sequence that restarts every year.

use crate::engine::LifecycleError;
use serde::{Deserialize, Serialize};
use std::fmt::Display;
use std::str::FromStr;

/// Highest sequence that still fits in four digits.
pub const MAX_SEQUENCE: u32 = 9999;

/// The record kind a serial number belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum NumberKind {
    Borrowing,
    Reservation,
}

impl NumberKind {
    pub fn prefix(self) -> &'static str {
        match self {
            NumberKind::Borrowing => "BR",
            NumberKind::Reservation => "RS",
        }
    }

    fn from_prefix(prefix: &str) -> Option<Self> {
        match prefix {
            "BR" => Some(NumberKind::Borrowing),
            "RS" => Some(NumberKind::Reservation),
            _ => None,
        }
    }
}

/// A validated serial number.
///
/// Ordering follows (kind, year, sequence), so sorting numbers of one kind sorts them by
/// issue order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub struct SerialNumber {
    kind: NumberKind,
    year: i32,
    sequence: u32,
}

impl SerialNumber {
    /// Builds a serial number, rejecting years and sequences that do not fit four digits.
    pub fn new(kind: NumberKind, year: i32, sequence: u32) -> Result<Self, LifecycleError> {
        if !(0..=9999).contains(&year) {
            return Err(LifecycleError::invalid_input(format!(
                "year {year} does not fit a {} number",
                kind.prefix()
            )));
        }
        if !(1..=MAX_SEQUENCE).contains(&sequence) {
            return Err(LifecycleError::invalid_input(format!(
                "sequence {sequence} for {} numbers of {year} is outside 1..={MAX_SEQUENCE}",
                kind.prefix()
            )));
        }
        Ok(Self {
            kind,
            year,
            sequence,
        })
    }

    pub fn kind(&self) -> NumberKind {
        self.kind
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn sequence(&self) -> u32 {
        self.sequence
    }
}

impl Display for SerialNumber {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}{:04}{:04}", self.kind.prefix(), self.year, self.sequence)
    }
}

impl FromStr for SerialNumber {
    type Err = LifecycleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let malformed = || LifecycleError::invalid_input(format!("malformed serial number {s:?}"));

        if s.len() != 10 || !s.is_ascii() {
            return Err(malformed());
        }
        let (prefix, digits) = s.split_at(2);
        let kind = NumberKind::from_prefix(prefix).ok_or_else(malformed)?;
        if !digits.bytes().all(|b| b.is_ascii_digit()) {
            return Err(malformed());
        }
        let year = digits[..4].parse().map_err(|_| malformed())?;
        let sequence = digits[4..].parse().map_err(|_| malformed())?;
        Self::new(kind, year, sequence)
    }
}

impl From<SerialNumber> for String {
    fn from(number: SerialNumber) -> Self {
        number.to_string()
    }
}

impl TryFrom<String> for SerialNumber {
    type Error = LifecycleError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_with_zero_padding() {
        let number = SerialNumber::new(NumberKind::Borrowing, 2024, 1).unwrap();
        assert_eq!(number.to_string(), "BR20240001");

        let number = SerialNumber::new(NumberKind::Reservation, 2025, 321).unwrap();
        assert_eq!(number.to_string(), "RS20250321");
    }

    #[test]
    fn parses_its_own_output() {
        let number: SerialNumber = "RS20249999".parse().unwrap();
        assert_eq!(number.kind(), NumberKind::Reservation);
        assert_eq!(number.year(), 2024);
        assert_eq!(number.sequence(), 9999);
    }

    #[test]
    fn rejects_sequences_beyond_four_digits() {
        assert!(SerialNumber::new(NumberKind::Borrowing, 2024, 10_000).is_err());
        assert!(SerialNumber::new(NumberKind::Borrowing, 2024, 0).is_err());
    }

    #[test]
    fn rejects_malformed_strings() {
        for input in ["", "BR2024001", "XX20240001", "BR2024000A", "BR20240000", "BR-0240001"] {
            assert!(input.parse::<SerialNumber>().is_err(), "{input} should not parse");
        }
    }

    #[test]
    fn orders_by_year_then_sequence() {
        let a = SerialNumber::new(NumberKind::Borrowing, 2023, 42).unwrap();
        let b = SerialNumber::new(NumberKind::Borrowing, 2024, 1).unwrap();
        let c = SerialNumber::new(NumberKind::Borrowing, 2024, 2).unwrap();
        assert!(a < b && b < c);
    }
}
