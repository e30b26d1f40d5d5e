//! Exact money amounts stored as whole cents.
//!
//! Every amount the ledger persists or adds up is a [`Money`]. Budget `spent` totals are
//! moved with integer arithmetic in the database, so adding and later removing the same
//! transaction always restores the previous total exactly.
//!
//! Amounts cross the caller boundary as decimal numbers (`12.34`). Converting one into
//! [`Money`] fails if it is not finite or carries fractions of a cent.

use sea_orm::DeriveValueType;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Neg, Sub};

/// Cents per currency unit.
const CENTS_PER_UNIT: i64 = 100;

/// Largest magnitude accepted from a decimal amount, in currency units.
const MAX_AMOUNT: f64 = 1_000_000_000_000.0;

/// Slack allowed when checking that a decimal amount is a whole number of cents.
/// `0.1 * 100.0` is `10.000000000000002`, so an exact comparison would reject it.
const CENT_TOLERANCE: f64 = 1e-6;

/// Why a decimal amount could not become [`Money`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoneyError {
    /// NaN or infinite
    NotFinite,
    /// Outside the supported range
    OutOfRange,
    /// More than two decimal places
    FractionalCents,
}

impl fmt::Display for MoneyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::NotFinite => "Amount must be a finite number",
            Self::OutOfRange => "Amount is too large",
            Self::FractionalCents => "Amount cannot have more than 2 decimal places",
        })
    }
}

impl std::error::Error for MoneyError {}

/// A signed amount of money in cents.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, DeriveValueType,
    Serialize, Deserialize,
)]
#[serde(into = "f64", try_from = "f64")]
pub struct Money(pub i64);

impl Money {
    /// Zero cents.
    pub const ZERO: Self = Self(0);

    /// Wraps a whole number of cents.
    #[must_use]
    pub const fn from_cents(cents: i64) -> Self {
        Self(cents)
    }

    /// The amount in cents.
    #[must_use]
    pub const fn cents(self) -> i64 {
        self.0
    }

    /// Converts a decimal amount with at most two decimal places.
    #[allow(clippy::cast_possible_truncation)]
    pub fn from_decimal(amount: f64) -> Result<Self, MoneyError> {
        if !amount.is_finite() {
            return Err(MoneyError::NotFinite);
        }
        if amount.abs() > MAX_AMOUNT {
            return Err(MoneyError::OutOfRange);
        }

        #[allow(clippy::cast_precision_loss)]
        let scaled = amount * CENTS_PER_UNIT as f64;
        let rounded = scaled.round();
        if (scaled - rounded).abs() > CENT_TOLERANCE {
            return Err(MoneyError::FractionalCents);
        }
        Ok(Self(rounded as i64))
    }

    /// The amount as a decimal number, for ratios and display.
    #[allow(clippy::cast_precision_loss)]
    #[must_use]
    pub fn to_decimal(self) -> f64 {
        self.0 as f64 / CENTS_PER_UNIT as f64
    }

    /// Magnitude of the amount.
    #[must_use]
    pub const fn abs(self) -> Self {
        Self(self.0.abs())
    }

    /// Returns true for amounts below zero.
    #[must_use]
    pub const fn is_negative(self) -> bool {
        self.0 < 0
    }
}

impl TryFrom<f64> for Money {
    type Error = MoneyError;

    fn try_from(amount: f64) -> Result<Self, Self::Error> {
        Self::from_decimal(amount)
    }
}

impl From<Money> for f64 {
    fn from(money: Money) -> Self {
        money.to_decimal()
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        let cents = self.0.unsigned_abs();
        write!(f, "{sign}{}.{:02}", cents / 100, cents % 100)
    }
}

impl Add for Money {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self(self.0 + rhs.0)
    }
}

impl AddAssign for Money {
    fn add_assign(&mut self, rhs: Self) {
        self.0 += rhs.0;
    }
}

impl Sub for Money {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        Self(self.0 - rhs.0)
    }
}

impl Neg for Money {
    type Output = Self;

    fn neg(self) -> Self {
        Self(-self.0)
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::ZERO, Add::add)
    }
}

impl<'a> Sum<&'a Money> for Money {
    fn sum<I: Iterator<Item = &'a Self>>(iter: I) -> Self {
        iter.copied().sum()
    }
}
