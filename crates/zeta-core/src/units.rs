//! Base-unit to display-unit conversion.
//!
//! Quantities are kept as `u128` end to end and rounded half-up to a fixed
//! number of fractional digits. No floating point is involved.

use crate::error::{Result, ZetaError};

/// Fractional digits shown for display amounts.
pub const DISPLAY_PRECISION: u32 = 6;

/// Decimals of the native ZETA token.
pub const NATIVE_DECIMALS: u32 = 18;

/// Decimals of gwei relative to wei.
pub const GWEI_DECIMALS: u32 = 9;

/// Parses a `0x`-prefixed hex quantity as returned by JSON-RPC.
///
/// # Errors
///
/// Returns `ZetaError::MalformedResponse` if the string is not a hex
/// quantity or does not fit into `u128`.
pub fn parse_hex_quantity(value: &str) -> Result<u128> {
    let digits = value
        .strip_prefix("0x")
        .or_else(|| value.strip_prefix("0X"))
        .ok_or_else(|| ZetaError::MalformedResponse(format!("expected hex quantity, got '{value}'")))?;
    if digits.is_empty() {
        return Ok(0);
    }
    u128::from_str_radix(digits, 16)
        .map_err(|e| ZetaError::MalformedResponse(format!("invalid hex quantity '{value}': {e}")))
}

/// Formats `amount` base units with `decimals` decimals as a display string
/// with exactly `precision` fractional digits.
///
/// # Examples
///
/// ```
/// use zeta_core::units::format_units;
///
/// assert_eq!(format_units(1_000_000_000_000_000_000, 18, 6), "1.000000");
/// assert_eq!(format_units(1_234_567_890, 9, 6), "1.234568");
/// assert_eq!(format_units(0, 18, 6), "0.000000");
/// ```
pub fn format_units(amount: u128, decimals: u32, precision: u32) -> String {
    let scaled = if decimals >= precision {
        let divisor = 10u128.pow(decimals - precision);
        let quotient = amount / divisor;
        let remainder = amount % divisor;
        if divisor > 1 && remainder >= divisor - remainder {
            quotient + 1
        } else {
            quotient
        }
    } else {
        amount.saturating_mul(10u128.pow(precision - decimals))
    };

    if precision == 0 {
        return scaled.to_string();
    }
    let unit = 10u128.pow(precision);
    format!(
        "{}.{:0width$}",
        scaled / unit,
        scaled % unit,
        width = precision as usize
    )
}

/// Formats an amount of the native token (18 decimals) for display.
pub fn format_native(amount: u128) -> String {
    format_units(amount, NATIVE_DECIMALS, DISPLAY_PRECISION)
}
