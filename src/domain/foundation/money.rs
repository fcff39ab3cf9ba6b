//! Money value object and currency rounding.

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign};

/// Decimal places kept by every derived monetary or percentage metric.
pub const CURRENCY_SCALE: u32 = 2;

/// Rounds to two decimal places, midpoints away from zero.
pub fn round_currency(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(CURRENCY_SCALE, RoundingStrategy::MidpointAwayFromZero)
}

/// A monetary amount in the reporting currency (EUR).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Money(Decimal);

impl Money {
    /// Zero euros.
    pub const ZERO: Self = Self(Decimal::ZERO);

    /// Wraps a decimal amount.
    pub fn new(amount: Decimal) -> Self {
        Self(amount)
    }

    /// Builds an amount from whole euros.
    pub fn from_euros(euros: i64) -> Self {
        Self(Decimal::from(euros))
    }

    /// Builds an amount from cents.
    pub fn from_cents(cents: i64) -> Self {
        Self(Decimal::new(cents, CURRENCY_SCALE))
    }

    /// Returns the inner decimal amount.
    pub fn amount(&self) -> Decimal {
        self.0
    }

    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    /// Returns the amount rounded to cents.
    pub fn rounded(&self) -> Self {
        Self(round_currency(self.0))
    }
}

impl From<Decimal> for Money {
    fn from(amount: Decimal) -> Self {
        Self(amount)
    }
}

impl Add for Money {
    type Output = Money;

    fn add(self, rhs: Money) -> Money {
        Money(self.0 + rhs.0)
    }
}

impl AddAssign for Money {
    fn add_assign(&mut self, rhs: Money) {
        self.0 += rhs.0;
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Money {
        iter.fold(Money::ZERO, Add::add)
    }
}

impl<'a> Sum<&'a Money> for Money {
    fn sum<I: Iterator<Item = &'a Money>>(iter: I) -> Money {
        iter.copied().sum()
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_currency_rounds_midpoints_away_from_zero() {
        assert_eq!(round_currency(Decimal::new(12345, 3)), Decimal::new(1235, 2));
        assert_eq!(round_currency(Decimal::new(-12345, 3)), Decimal::new(-1235, 2));
        assert_eq!(round_currency(Decimal::new(12344, 3)), Decimal::new(1234, 2));
    }

    #[test]
    fn money_sums_amounts() {
        let total: Money = [Money::from_euros(10), Money::from_cents(250)].iter().sum();
        assert_eq!(total, Money::from_cents(1250));
    }

    #[test]
    fn money_displays_two_decimals() {
        assert_eq!(Money::from_euros(1500).to_string(), "1500.00");
        assert_eq!(Money::from_cents(1999).to_string(), "19.99");
    }

    #[test]
    fn money_rounded_keeps_cents() {
        assert_eq!(Money::new(Decimal::new(33335, 3)).rounded(), Money::from_cents(3334));
        assert_eq!(Money::new(Decimal::new(333335, 4)).rounded(), Money::from_cents(3333));
    }
}
