//! Decimal amount conversion
//!
//! The ledger stores values in base units; humans write decimal amounts.
//! Conversion is checked: an amount the 128-bit value domain cannot hold is
//! a `ValueOverflow`, not a wrapped number.

use crate::ledger::LedgerError;

/// Decimal places of the value unit
pub const DECIMALS: usize = 18;

/// Base units per whole unit (10^DECIMALS)
pub const UNIT: u128 = 1_000_000_000_000_000_000;

/// Parse a decimal amount like "1.5" into base units
///
/// # Errors
/// `InvalidAmount` for malformed input or more than [`DECIMALS`] fractional
/// digits, `ValueOverflow` when the amount exceeds the 128-bit domain.
pub fn parse_units(amount: &str) -> Result<u128, LedgerError> {
    let s = amount.trim();

    let (whole_str, frac_str) = match s.split_once('.') {
        Some((whole, frac)) => (whole, frac),
        None => (s, ""),
    };

    if whole_str.is_empty() && frac_str.is_empty() {
        return Err(LedgerError::InvalidAmount(amount.to_string()));
    }

    let all_digits =
        |part: &str| part.chars().all(|c| c.is_ascii_digit());
    if !all_digits(whole_str) || !all_digits(frac_str) {
        return Err(LedgerError::InvalidAmount(amount.to_string()));
    }

    if frac_str.len() > DECIMALS {
        return Err(LedgerError::InvalidAmount(format!(
            "{}: more than {} decimal places",
            amount, DECIMALS
        )));
    }

    let whole: u128 = if whole_str.is_empty() {
        0
    } else {
        // Digits already validated, so the only parse failure is overflow
        whole_str.parse().map_err(|_| LedgerError::ValueOverflow)?
    };

    let frac: u128 = if frac_str.is_empty() {
        0
    } else {
        let padded = format!("{:0<width$}", frac_str, width = DECIMALS);
        padded
            .parse()
            .map_err(|_| LedgerError::InvalidAmount(amount.to_string()))?
    };

    whole
        .checked_mul(UNIT)
        .and_then(|w| w.checked_add(frac))
        .ok_or(LedgerError::ValueOverflow)
}

/// Format base units as a decimal amount, trimming trailing zeros
pub fn format_units(value: u128) -> String {
    let whole = value / UNIT;
    let frac = value % UNIT;

    if frac == 0 {
        return whole.to_string();
    }

    let frac_str = format!("{:0>width$}", frac, width = DECIMALS);
    format!("{}.{}", whole, frac_str.trim_end_matches('0'))
}
