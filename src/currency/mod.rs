use rust_decimal::{Decimal, RoundingStrategy};

/// Symbol used when no configuration overrides it.
pub const DEFAULT_SYMBOL: &str = "₱";

/// Number of fractional digits shown for every amount.
pub const DISPLAY_SCALE: u32 = 2;

/// Rounds a decimal to its display precision, half away from zero.
pub fn round_for_display(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(DISPLAY_SCALE, RoundingStrategy::MidpointAwayFromZero)
}

/// Formats a magnitude as `{symbol}{value}` with two decimals.
///
/// Negative values keep their sign in front of the symbol, so a net deficit
/// renders as `-₱12.00`.
pub fn format_currency_value(value: Decimal, symbol: &str) -> String {
    let rounded = round_for_display(value);
    if rounded.is_sign_negative() && !rounded.is_zero() {
        format!("-{}{:.2}", symbol, rounded.abs())
    } else {
        format!("{}{:.2}", symbol, rounded.abs())
    }
}
