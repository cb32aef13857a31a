// SPDX-License-Identifier: MIT OR Apache-2.0
//! Sized interpreter arguments: `-Xmx`, `-Xms`, and `-Xss`.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::FlagError;

/// Unit of a sized argument magnitude.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SizeUnit {
    /// Raw bytes, rendered with no suffix.
    Bytes,
    /// 1024 bytes, rendered with a `k` suffix.
    Kilobytes,
    /// 1024² bytes, rendered with an `m` suffix.
    Megabytes,
    /// 1024³ bytes, rendered with a `g` suffix.
    Gigabytes,
}

impl SizeUnit {
    /// Suffix appended to the magnitude in a rendered flag.
    #[must_use]
    pub fn suffix(self) -> &'static str {
        match self {
            Self::Bytes => "",
            Self::Kilobytes => "k",
            Self::Megabytes => "m",
            Self::Gigabytes => "g",
        }
    }

    fn factor(self) -> u64 {
        match self {
            Self::Bytes => 1,
            Self::Kilobytes => 1 << 10,
            Self::Megabytes => 1 << 20,
            Self::Gigabytes => 1 << 30,
        }
    }

    /// Convert a magnitude in this unit into bytes.
    #[must_use]
    pub fn to_bytes(self, magnitude: u64) -> u64 {
        magnitude * self.factor()
    }

    /// Convert a byte count into a truncating magnitude in this unit.
    #[must_use]
    pub fn from_bytes(self, bytes: u64) -> u64 {
        bytes / self.factor()
    }

    /// Convert a magnitude expressed in `other` into this unit.
    #[must_use]
    pub fn convert(self, magnitude: u64, other: SizeUnit) -> u64 {
        self.from_bytes(other.to_bytes(magnitude))
    }
}

/// Which sized parameter a [`SizeArg`] renders as.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SizeKind {
    /// Maximum heap space, `-Xmx`.
    MaxHeap,
    /// Initial heap space, `-Xms`.
    InitialHeap,
    /// Thread stack size, `-Xss`.
    StackSize,
}

impl SizeKind {
    /// Flag prefix for this parameter.
    #[must_use]
    pub fn prefix(self) -> &'static str {
        match self {
            Self::MaxHeap => "-Xmx",
            Self::InitialHeap => "-Xms",
            Self::StackSize => "-Xss",
        }
    }
}

/// An immutable (magnitude, unit) pair for a sized interpreter argument.
///
/// Construction validates the magnitude; rendering is infallible.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SizeArg {
    magnitude: u64,
    unit: SizeUnit,
}

impl SizeArg {
    /// Create a sized argument.
    ///
    /// Fails with [`FlagError::InvalidMagnitude`] when `magnitude` is zero.
    pub fn new(magnitude: u64, unit: SizeUnit) -> Result<Self, FlagError> {
        if magnitude == 0 {
            return Err(FlagError::InvalidMagnitude);
        }
        Ok(Self { magnitude, unit })
    }

    /// The magnitude in the argument's own unit.
    #[must_use]
    pub fn magnitude(self) -> u64 {
        self.magnitude
    }

    /// The argument's unit.
    #[must_use]
    pub fn unit(self) -> SizeUnit {
        self.unit
    }

    /// Total size in bytes.
    #[must_use]
    pub fn in_bytes(self) -> u64 {
        self.unit.to_bytes(self.magnitude)
    }

    /// Render the flag for the given parameter, e.g. `-Xmx256m`.
    #[must_use]
    pub fn render(self, kind: SizeKind) -> String {
        format!("{}{}{}", kind.prefix(), self.magnitude, self.unit.suffix())
    }
}

impl fmt::Display for SizeArg {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.magnitude, self.unit.suffix())
    }
}

impl FromStr for SizeArg {
    type Err = FlagError;

    /// Parse a `<magnitude><b|k|m|g>` literal; a bare magnitude is bytes.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let unrecognized = || FlagError::UnrecognizedSize {
            literal: s.to_string(),
        };
        let (digits, unit) = match s.chars().last() {
            Some('b' | 'B') => (&s[..s.len() - 1], SizeUnit::Bytes),
            Some('k' | 'K') => (&s[..s.len() - 1], SizeUnit::Kilobytes),
            Some('m' | 'M') => (&s[..s.len() - 1], SizeUnit::Megabytes),
            Some('g' | 'G') => (&s[..s.len() - 1], SizeUnit::Gigabytes),
            Some(c) if c.is_ascii_digit() => (s, SizeUnit::Bytes),
            _ => return Err(unrecognized()),
        };
        if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
            return Err(unrecognized());
        }
        let magnitude: u64 = digits.parse().map_err(|_| unrecognized())?;
        Self::new(magnitude, unit)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unit_conversion_round_trips_through_bytes() {
        assert_eq!(SizeUnit::Megabytes.to_bytes(2), 2 * 1024 * 1024);
        assert_eq!(SizeUnit::Kilobytes.convert(2, SizeUnit::Megabytes), 2048);
        assert_eq!(SizeUnit::Gigabytes.convert(512, SizeUnit::Megabytes), 0);
    }

    #[test]
    fn zero_magnitude_is_rejected() {
        assert_eq!(
            SizeArg::new(0, SizeUnit::Bytes),
            Err(FlagError::InvalidMagnitude)
        );
    }

    #[test]
    fn parse_accepts_suffixed_and_bare_literals() {
        assert_eq!(
            "256m".parse::<SizeArg>().unwrap(),
            SizeArg::new(256, SizeUnit::Megabytes).unwrap()
        );
        assert_eq!(
            "4096".parse::<SizeArg>().unwrap(),
            SizeArg::new(4096, SizeUnit::Bytes).unwrap()
        );
        assert!("".parse::<SizeArg>().is_err());
        assert!("m".parse::<SizeArg>().is_err());
        assert!("12q".parse::<SizeArg>().is_err());
    }
}
