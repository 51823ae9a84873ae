//! Amount normalization.
//!
//! Razorpay expects amounts in the smallest currency unit (paise for INR).
//! Customers type amounts in major units, so the value received from the
//! storefront is converted here.
//!
//! # Rounding
//!
//! Conversion happens in decimal arithmetic on the decimal text of the
//! input, never on binary floating point. The product `amount × 100` is
//! rounded half away from zero, so `1.005` becomes `101` paise and `0.125`
//! becomes `13`. A binary `f64` multiplication would give `100` for the
//! first case because `1.005` is stored as `1.00499999...`.
//!
//! An order must carry at least one minor unit. Positive amounts below half
//! a paisa (including values too small for a 28-digit decimal scale) are
//! rejected like zero.

use std::fmt;
use std::str::FromStr;

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::errors::CheckoutError;

/// Minor units per major unit for two-decimal currencies.
pub const MINOR_UNITS_PER_MAJOR: u32 = 100;

/// An amount in the currency's smallest unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MinorUnits(u64);

impl MinorUnits {
    /// Wraps an already-converted minor unit amount.
    pub fn new(value: u64) -> Self {
        Self(value)
    }

    /// Returns the raw integer value.
    pub fn value(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for MinorUnits {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Validates a storefront amount and converts it to minor units.
///
/// Accepts JSON numbers and numeric strings (surrounding whitespace is
/// ignored). Everything else, including booleans, `null`, NaN, infinities,
/// zero, negative values and amounts that round to zero minor units, fails
/// with [`CheckoutError::InvalidAmount`].
pub fn normalize_amount(input: Option<&Value>) -> Result<MinorUnits, CheckoutError> {
    let major = input
        .and_then(parse_major_units)
        .ok_or(CheckoutError::InvalidAmount)?;
    to_minor_units(major)
}

/// Converts a positive major-unit decimal to a non-zero count of minor units.
pub fn to_minor_units(major: Decimal) -> Result<MinorUnits, CheckoutError> {
    if major <= Decimal::ZERO {
        return Err(CheckoutError::InvalidAmount);
    }

    major
        .checked_mul(Decimal::from(MINOR_UNITS_PER_MAJOR))
        .map(|scaled| scaled.round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero))
        .and_then(|rounded| rounded.to_u64())
        .filter(|&minor| minor > 0)
        .map(MinorUnits)
        .ok_or(CheckoutError::InvalidAmount)
}

fn parse_major_units(value: &Value) -> Option<Decimal> {
    match value {
        Value::Number(number) => {
            if let Some(unsigned) = number.as_u64() {
                Some(Decimal::from(unsigned))
            } else if let Some(signed) = number.as_i64() {
                Some(Decimal::from(signed))
            } else {
                parse_decimal_text(&number.to_string())
            }
        }
        Value::String(text) => parse_decimal_text(text.trim()),
        _ => None,
    }
}

fn parse_decimal_text(text: &str) -> Option<Decimal> {
    if text.is_empty() {
        return None;
    }
    Decimal::from_str(text)
        .or_else(|_| Decimal::from_scientific(text))
        .ok()
}
