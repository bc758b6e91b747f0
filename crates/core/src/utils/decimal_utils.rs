use rust_decimal::{Decimal, RoundingStrategy};

use crate::constants::{AMOUNT_SCALE, PERCENT_SCALE};

/// Rounds a monetary amount to the ledger scale.
pub fn round_amount(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(AMOUNT_SCALE, RoundingStrategy::MidpointAwayFromZero)
}

/// `part / whole * 100` rounded to the percent scale; zero when `whole` is zero.
pub fn percentage_of(part: Decimal, whole: Decimal) -> Decimal {
    if whole.is_zero() {
        return Decimal::ZERO;
    }
    (part / whole * Decimal::ONE_HUNDRED)
        .round_dp_with_strategy(PERCENT_SCALE, RoundingStrategy::MidpointAwayFromZero)
}
