//! Token amount type.
//!
//! Amounts are fixed-point integers (u128) with 18 decimal places, so that no
//! floating-point value ever touches balance or reward arithmetic. The smallest
//! unit is 1 raw; one whole token is [`TOKEN_UNIT`] raw.

use crate::error::TypesError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Number of decimal places carried by every amount.
pub const TOKEN_DECIMALS: u32 = 18;

/// Raw units in one whole token (10^18).
pub const TOKEN_UNIT: u128 = 10u128.pow(TOKEN_DECIMALS);

/// A token amount in raw units.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct TokenAmount(u128);

impl TokenAmount {
    pub const ZERO: Self = Self(0);

    pub const fn new(raw: u128) -> Self {
        Self(raw)
    }

    /// Whole tokens, scaled to raw units. `None` on overflow.
    pub fn from_tokens(whole: u128) -> Option<Self> {
        whole.checked_mul(TOKEN_UNIT).map(Self)
    }

    pub fn raw(&self) -> u128 {
        self.0
    }

    pub fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Integer part in whole tokens.
    pub fn whole_tokens(&self) -> u128 {
        self.0 / TOKEN_UNIT
    }

    /// Fractional part in raw units (always `< TOKEN_UNIT`).
    pub fn fraction_raw(&self) -> u128 {
        self.0 % TOKEN_UNIT
    }

    pub fn checked_add(self, other: Self) -> Option<Self> {
        self.0.checked_add(other.0).map(Self)
    }

    pub fn checked_sub(self, other: Self) -> Option<Self> {
        self.0.checked_sub(other.0).map(Self)
    }

    pub fn saturating_sub(self, other: Self) -> Self {
        Self(self.0.saturating_sub(other.0))
    }
}

impl fmt::Display for TokenAmount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let frac = self.fraction_raw();
        if frac == 0 {
            return write!(f, "{}", self.whole_tokens());
        }
        let digits = format!("{:0width$}", frac, width = TOKEN_DECIMALS as usize);
        write!(f, "{}.{}", self.whole_tokens(), digits.trim_end_matches('0'))
    }
}

impl FromStr for TokenAmount {
    type Err = TypesError;

    /// Parse a decimal token string such as `"100"` or `"1.0206"`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || TypesError::InvalidAmount(s.to_string());
        let (whole, frac) = match s.split_once('.') {
            Some((w, f)) => (w, f),
            None => (s, ""),
        };
        if whole.is_empty() && frac.is_empty() {
            return Err(invalid());
        }
        if frac.len() > TOKEN_DECIMALS as usize {
            return Err(invalid());
        }
        if !whole.chars().chain(frac.chars()).all(|c| c.is_ascii_digit()) {
            return Err(invalid());
        }

        let whole: u128 = if whole.is_empty() {
            0
        } else {
            whole.parse().map_err(|_| invalid())?
        };
        let frac_raw: u128 = if frac.is_empty() {
            0
        } else {
            let scale = 10u128.pow(TOKEN_DECIMALS - frac.len() as u32);
            frac.parse::<u128>().map_err(|_| invalid())? * scale
        };

        Self::from_tokens(whole)
            .and_then(|w| w.checked_add(Self(frac_raw)))
            .ok_or_else(invalid)
    }
}
