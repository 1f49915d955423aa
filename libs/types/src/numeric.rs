//! Fixed-point price representation
//!
//! Prices are stored as an integer count of cents (hundredths of the quote
//! unit). Integer representation makes equality and ordering exact, which
//! matters because the crossing test and the book's map keys both compare
//! prices. `rust_decimal` is used only at the boundaries: parsing decimal
//! input and formatting output.

use rust_decimal::prelude::*;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A limit price in integer cents.
///
/// Construction from decimal input rounds sub-cent precision half-up.
/// A `Price` may hold a non-positive value (e.g. straight from a wire
/// message); validation happens at order submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Price(i64);

impl Price {
    /// Create a Price from a raw cent count
    pub const fn from_cents(cents: i64) -> Self {
        Self(cents)
    }

    /// Create a Price from whole quote units (convenience for tests)
    pub const fn from_units(units: i64) -> Self {
        Self(units * 100)
    }

    /// Convert a decimal quote-unit price to cents, rounding half-up.
    ///
    /// Returns `None` for non-positive input.
    pub fn try_from_decimal(value: Decimal) -> Option<Self> {
        let cents = (value * Decimal::ONE_HUNDRED)
            .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
            .to_i64()?;
        if cents > 0 {
            Some(Self(cents))
        } else {
            None
        }
    }

    /// Raw cent count
    pub const fn as_cents(&self) -> i64 {
        self.0
    }

    /// Whether this price is valid for submission
    pub const fn is_positive(&self) -> bool {
        self.0 > 0
    }

    /// Decimal quote-unit value (scale 2)
    pub fn to_decimal(&self) -> Decimal {
        Decimal::new(self.0, 2)
    }
}

impl fmt::Display for Price {
    /// Formats with exactly two fractional digits, `.` separator.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_decimal())
    }
}

// Serialized as a decimal string to avoid float precision loss on the wire.
impl Serialize for Price {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for Price {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        let decimal = Decimal::from_str(&s).map_err(serde::de::Error::custom)?;
        Self::try_from_decimal(decimal)
            .ok_or_else(|| serde::de::Error::custom("price must be positive"))
    }
}
