use rust_decimal::Decimal;

use crate::constants::{DISPLAY_DECIMAL_PRECISION, MONEY_DECIMAL_PLACES};

/// Returns `part / whole * 100` rounded to two places, or zero when `whole` is zero.
///
/// Every derived percentage (budget usage, goal progress, savings rate,
/// category share) goes through this helper so they all share one rounding
/// rule. Rounding is `round_dp`, i.e. banker's rounding on the exact decimal.
pub fn percentage_of(part: Decimal, whole: Decimal) -> Decimal {
    if whole.is_zero() {
        return Decimal::ZERO;
    }
    match part
        .checked_div(whole)
        .and_then(|ratio| ratio.checked_mul(Decimal::ONE_HUNDRED))
    {
        Some(pct) => pct.round_dp(DISPLAY_DECIMAL_PRECISION),
        None => {
            log::warn!("Percentage overflow for {} / {}", part, whole);
            Decimal::ZERO
        }
    }
}

/// Percentage of income kept after expenses; zero when there is no income.
pub fn savings_rate(income: Decimal, expense: Decimal) -> Decimal {
    if income.is_zero() {
        return Decimal::ZERO;
    }
    percentage_of(income - expense, income)
}

/// True when the amount has no more fractional digits than money allows.
pub fn has_money_precision(amount: Decimal) -> bool {
    amount.normalize().scale() <= MONEY_DECIMAL_PLACES
}
