//! Token amounts.
//!
//! Amounts are fixed-point integers counted in stroops: one whole unit is
//! 10^7 stroops, so every amount has at most seven decimal places. The ledger
//! stores them as signed 64-bit integers, which also bounds the largest
//! representable balance and the default trustline limit.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Stroops per whole unit.
pub const STROOPS_PER_UNIT: i64 = 10_000_000;
/// Maximum number of fractional digits.
pub const DECIMALS: usize = 7;

/// An amount of any asset, in stroops.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Amount(i64);

#[derive(Debug, Error, PartialEq, Eq)]
pub enum AmountError {
    #[error("amount is empty")]
    Empty,

    #[error("invalid character in amount: {0:?}")]
    InvalidCharacter(char),

    #[error("amount has more than {DECIMALS} decimal places")]
    TooManyDecimals,

    #[error("amount exceeds the representable maximum")]
    Overflow,

    #[error("malformed amount: {0}")]
    Malformed(String),
}

impl Amount {
    pub const ZERO: Self = Self(0);
    /// The largest representable amount; also the "unlimited" trustline limit.
    pub const MAX: Self = Self(i64::MAX);

    pub fn from_stroops(stroops: i64) -> Self {
        Self(stroops)
    }

    /// Whole units, without a fractional part.
    pub fn from_units(units: i64) -> Option<Self> {
        units.checked_mul(STROOPS_PER_UNIT).map(Self)
    }

    pub fn stroops(&self) -> i64 {
        self.0
    }

    pub fn is_zero(&self) -> bool {
        self.0 == 0
    }

    pub fn is_positive(&self) -> bool {
        self.0 > 0
    }

    pub fn checked_add(self, other: Self) -> Option<Self> {
        self.0.checked_add(other.0).map(Self)
    }

    pub fn checked_sub(self, other: Self) -> Option<Self> {
        self.0.checked_sub(other.0).map(Self)
    }

    pub fn checked_mul(self, factor: i64) -> Option<Self> {
        self.0.checked_mul(factor).map(Self)
    }

    pub fn saturating_sub(self, other: Self) -> Self {
        Self(self.0.saturating_sub(other.0))
    }
}

impl FromStr for Amount {
    type Err = AmountError;

    /// Parse a non-negative decimal such as `1000`, `0.5` or `12.0000001`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.is_empty() {
            return Err(AmountError::Empty);
        }
        if let Some(c) = s.chars().find(|c| !c.is_ascii_digit() && *c != '.') {
            return Err(AmountError::InvalidCharacter(c));
        }

        let (whole, frac) = match s.split_once('.') {
            Some((whole, frac)) => (whole, Some(frac)),
            None => (s, None),
        };
        if whole.is_empty() {
            return Err(AmountError::Malformed(s.to_string()));
        }

        let mut stroops: i64 = 0;
        for digit in whole.bytes() {
            stroops = stroops
                .checked_mul(10)
                .and_then(|v| v.checked_add((digit - b'0') as i64))
                .ok_or(AmountError::Overflow)?;
        }
        stroops = stroops
            .checked_mul(STROOPS_PER_UNIT)
            .ok_or(AmountError::Overflow)?;

        if let Some(frac) = frac {
            if frac.is_empty() || frac.contains('.') {
                return Err(AmountError::Malformed(s.to_string()));
            }
            if frac.len() > DECIMALS {
                return Err(AmountError::TooManyDecimals);
            }
            let mut frac_stroops: i64 = 0;
            for digit in frac.bytes() {
                frac_stroops = frac_stroops * 10 + (digit - b'0') as i64;
            }
            frac_stroops *= 10i64.pow((DECIMALS - frac.len()) as u32);
            stroops = stroops
                .checked_add(frac_stroops)
                .ok_or(AmountError::Overflow)?;
        }

        Ok(Self(stroops))
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        let abs = self.0.unsigned_abs();
        let unit = STROOPS_PER_UNIT as u64;
        write!(f, "{}{}.{:07}", sign, abs / unit, abs % unit)
    }
}

impl Serialize for Amount {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for Amount {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}
