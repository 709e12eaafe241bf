//! Lengths and their display formatting.
//!
//! Measurements are always reported in metres. Only the unit label style and
//! the number of fraction digits are configurable.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// A non-negative distance in metres.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default)]
pub struct Length(f64);

impl Length {
    /// Zero length.
    pub const ZERO: Self = Self(0.0);

    /// Wrap a value in metres. Negative inputs are clamped to zero; NaN is
    /// kept so it cannot pass for a real zero.
    pub fn from_meters(meters: f64) -> Self {
        if meters.is_nan() {
            return Self(meters);
        }
        Self(meters.max(0.0))
    }

    /// Whether the value is a usable measurement.
    pub fn is_finite(self) -> bool {
        self.0.is_finite()
    }

    /// Value in metres.
    pub fn meters(self) -> f64 {
        self.0
    }
}

/// How the unit label is rendered after the number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UnitStyle {
    /// Symbol with no separator: `5.00m`.
    Short,
    /// Symbol separated by a space: `5.00 m`.
    #[default]
    Medium,
    /// Spelled out: `5.00 meters`.
    Long,
}

impl UnitStyle {
    /// Canonical string key used in configs/logs.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Short => "short",
            Self::Medium => "medium",
            Self::Long => "long",
        }
    }
}

impl fmt::Display for UnitStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned when a unit style key is not recognised.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown unit style `{0}` (expected short, medium or long)")]
pub struct UnknownUnitStyle(pub String);

impl FromStr for UnitStyle {
    type Err = UnknownUnitStyle;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "short" => Ok(Self::Short),
            "medium" => Ok(Self::Medium),
            "long" => Ok(Self::Long),
            _ => Err(UnknownUnitStyle(s.to_string())),
        }
    }
}

/// Renders a [`Length`] in metres with a fixed number of fraction digits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LengthFormatter {
    /// Unit label style.
    pub unit_style: UnitStyle,
    /// Digits after the decimal point.
    pub fraction_digits: usize,
}

impl Default for LengthFormatter {
    fn default() -> Self {
        Self {
            unit_style: UnitStyle::Medium,
            fraction_digits: 2,
        }
    }
}

impl LengthFormatter {
    /// Largest supported fraction digit count.
    pub const MAX_FRACTION_DIGITS: usize = 6;

    /// Create a formatter, clamping `fraction_digits` to [`Self::MAX_FRACTION_DIGITS`].
    pub fn new(unit_style: UnitStyle, fraction_digits: usize) -> Self {
        Self {
            unit_style,
            fraction_digits: fraction_digits.min(Self::MAX_FRACTION_DIGITS),
        }
    }

    /// Format `length`, e.g. `5.00 m`.
    pub fn format(&self, length: Length) -> String {
        let digits = self.fraction_digits;
        let number = format!("{:.digits$}", length.meters());
        match self.unit_style {
            UnitStyle::Short => format!("{number}m"),
            UnitStyle::Medium => format!("{number} m"),
            UnitStyle::Long => {
                // Singular only when the displayed number reads as exactly one.
                let unit = if number.parse::<f64>() == Ok(1.0) {
                    "meter"
                } else {
                    "meters"
                };
                format!("{number} {unit}")
            }
        }
    }
}
