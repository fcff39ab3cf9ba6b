//! Percentage value object (0-100 scale).

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

use super::ValidationError;

/// Decimal places a percentage may carry; matches the `NUMERIC(5, 2)` column.
pub const PERCENTAGE_SCALE: u32 = 2;

/// A percent-complete value between 0 and 100 inclusive.
///
/// Fractional values are allowed (`12.5%`) up to [`PERCENTAGE_SCALE`] decimal places.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "Decimal", into = "Decimal")]
pub struct Percentage(Decimal);

impl Percentage {
    /// Zero percent.
    pub const ZERO: Self = Self(Decimal::ZERO);

    /// One hundred percent.
    pub const HUNDRED: Self = Self(Decimal::ONE_HUNDRED);

    /// Creates a Percentage from a whole number, clamping to 100.
    pub fn from_whole(value: u8) -> Self {
        Self(Decimal::from(value.min(100)))
    }

    /// Creates a Percentage, returning error if out of range or finer than
    /// [`PERCENTAGE_SCALE`] decimal places.
    pub fn try_new(value: Decimal) -> Result<Self, ValidationError> {
        if value < Decimal::ZERO || value > Decimal::ONE_HUNDRED {
            return Err(ValidationError::out_of_range("percentage", 0, 100, value));
        }
        if value.normalize().scale() > PERCENTAGE_SCALE {
            return Err(ValidationError::invalid_format(
                "percentage",
                format!("at most {} decimal places allowed, got {}", PERCENTAGE_SCALE, value),
            ));
        }
        Ok(Self(value))
    }

    /// Returns the decimal value.
    pub fn value(&self) -> Decimal {
        self.0
    }

    /// Returns the value as a fraction (0 to 1).
    pub fn as_fraction(&self) -> Decimal {
        self.0 / Decimal::ONE_HUNDRED
    }
}

impl Default for Percentage {
    fn default() -> Self {
        Self::ZERO
    }
}

impl TryFrom<Decimal> for Percentage {
    type Error = ValidationError;

    fn try_from(value: Decimal) -> Result<Self, Self::Error> {
        Self::try_new(value)
    }
}

impl From<Percentage> for Decimal {
    fn from(pct: Percentage) -> Self {
        pct.0
    }
}

impl fmt::Display for Percentage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}%", self.0.normalize())
    }
}
