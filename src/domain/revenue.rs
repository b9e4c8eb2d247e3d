//! Fixed-point revenue amounts.
//!
//! Amounts are stored in cents so sums never drift the way `f64` totals do,
//! and always render with exactly two decimals. Entered amounts are capped at
//! [`Revenue::MAX`]; sums saturate instead of wrapping.

use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign};

use serde::{Deserialize, Serialize};

use crate::errors::RevenueParseError;

/// A non-negative monetary amount with two decimal digits.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Revenue(u64);

impl Revenue {
    /// Largest amount `parse` accepts: 999,999,999,999.99.
    pub const MAX: Revenue = Revenue(99_999_999_999_999);

    pub const fn from_cents(cents: u64) -> Self {
        Self(cents)
    }

    pub const fn zero() -> Self {
        Self(0)
    }

    pub const fn cents(&self) -> u64 {
        self.0
    }

    pub const fn units(&self) -> u64 {
        self.0 / 100
    }

    pub const fn cents_part(&self) -> u64 {
        self.0 % 100
    }

    /// Parses user input such as `"10"`, `"10.2"` or `"500,20"`.
    ///
    /// Either `.` or `,` is accepted as decimal separator; at most two
    /// fractional digits are allowed; negative amounts and amounts above
    /// [`Revenue::MAX`] are rejected.
    pub fn parse(input: &str) -> Result<Self, RevenueParseError> {
        let raw = input.trim();
        let invalid = || RevenueParseError(input.to_string());

        let (units_text, cents_text) = match raw.find(['.', ',']) {
            Some(index) => (&raw[..index], &raw[index + 1..]),
            None => (raw, ""),
        };

        let all_digits = |text: &str| text.bytes().all(|byte| byte.is_ascii_digit());
        if units_text.is_empty() || !all_digits(units_text) || !all_digits(cents_text) {
            return Err(invalid());
        }
        if cents_text.len() > 2 {
            return Err(invalid());
        }

        let units: u64 = units_text.parse().map_err(|_| invalid())?;
        let cents: u64 = match cents_text.len() {
            0 => 0,
            1 => cents_text.parse::<u64>().map_err(|_| invalid())? * 10,
            _ => cents_text.parse().map_err(|_| invalid())?,
        };

        units
            .checked_mul(100)
            .and_then(|value| value.checked_add(cents))
            .map(Self)
            .filter(|amount| *amount <= Self::MAX)
            .ok_or_else(invalid)
    }
}

impl fmt::Display for Revenue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{:02}", self.units(), self.cents_part())
    }
}

impl Add for Revenue {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        Self(self.0.saturating_add(other.0))
    }
}

impl AddAssign for Revenue {
    fn add_assign(&mut self, other: Self) {
        self.0 = self.0.saturating_add(other.0);
    }
}

impl Sum for Revenue {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::zero(), Add::add)
    }
}

impl<'a> Sum<&'a Revenue> for Revenue {
    fn sum<I: Iterator<Item = &'a Revenue>>(iter: I) -> Self {
        iter.copied().sum()
    }
}
