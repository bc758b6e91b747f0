//! Utility functions for SQLite storage operations.
//!
//! Amounts are stored as integer minor units (cents). Filter bounds are
//! converted outward-safe: a minimum rounds up and a maximum rounds down, so
//! the integer comparison selects exactly the cent amounts the decimal bound
//! would.

use diesel::define_sql_function;
use diesel::sql_types::{Integer, Text};
use fintrack_core::constants::AMOUNT_SCALE;
use fintrack_core::errors::{Error, Result};
use num_traits::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};

use crate::errors::StorageError;

define_sql_function! {
    /// Unicode-aware lowercase, registered on every pooled connection.
    fn fold_case(value: Text) -> Text;
}

define_sql_function! {
    /// SQLite built-in: 1-based position of `needle` in `haystack`, 0 if absent.
    fn instr(haystack: Text, needle: Text) -> Integer;
}

const MINOR_PER_UNIT: Decimal = Decimal::ONE_HUNDRED;

/// Exact conversion of a stored amount. Fails when the value has more than
/// two decimals or does not fit in an `i64`.
pub fn to_minor_units(amount: Decimal) -> Result<i64> {
    let scaled = amount
        .checked_mul(MINOR_PER_UNIT)
        .filter(|v| v.fract().is_zero())
        .and_then(|v| v.to_i64());
    scaled.ok_or_else(|| Error::invalid_input(format!("Amount {} cannot be stored", amount)))
}

pub fn from_minor_units(minor: i64) -> Decimal {
    Decimal::new(minor, AMOUNT_SCALE)
}

/// Smallest cent count that is `>= bound`.
pub fn min_bound_minor(bound: Decimal) -> i64 {
    bound_minor(bound, RoundingStrategy::ToPositiveInfinity)
}

/// Largest cent count that is `<= bound`.
pub fn max_bound_minor(bound: Decimal) -> i64 {
    bound_minor(bound, RoundingStrategy::ToNegativeInfinity)
}

fn bound_minor(bound: Decimal, strategy: RoundingStrategy) -> i64 {
    let saturated = if bound.is_sign_negative() {
        i64::MIN
    } else {
        i64::MAX
    };
    bound
        .checked_mul(MINOR_PER_UNIT)
        .and_then(|v| v.round_dp_with_strategy(0, strategy).to_i64())
        .unwrap_or(saturated)
}

/// Parses a stored enum-like text column.
pub fn parse_stored<T>(column: &str, raw: &str) -> std::result::Result<T, StorageError>
where
    T: std::str::FromStr,
{
    raw.parse::<T>().map_err(|_| {
        StorageError::InvalidData(format!("{} has unexpected value '{}'", column, raw))
    })
}
