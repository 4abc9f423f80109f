//! Card value representation using decimal arithmetic.
//!
//! The backend speaks plain JSON numbers for card values, so unlike most
//! decimal fields this one is (de)serialized as a number, not a string.

use core::fmt;
use core::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// The asking price of a card.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CardValue(#[serde(with = "rust_decimal::serde::float")] Decimal);

impl fmt::Display for CardValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2}", self.0)
    }
}

impl FromStr for CardValue {
    type Err = rust_decimal::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Decimal::from_str(s.trim()).map(Self)
    }
}

impl From<Decimal> for CardValue {
    fn from(amount: Decimal) -> Self {
        Self(amount)
    }
}

impl From<i32> for CardValue {
    fn from(amount: i32) -> Self {
        Self(Decimal::from(amount))
    }
}

impl From<i64> for CardValue {
    fn from(amount: i64) -> Self {
        Self(Decimal::from(amount))
    }
}
