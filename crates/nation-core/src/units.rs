//! Fixed-point unit conversion
//!
//! Token amounts live on chain as integers scaled by `10^decimals`. These
//! helpers convert between that representation and the decimal strings users
//! type and read.

use crate::{AmountError, Wei};

/// Largest scale that still fits `10^decimals` in a `u128`
pub const MAX_DECIMALS: u8 = 38;

fn pow10(exp: u8) -> Wei {
    10u128.pow(u32::from(exp.min(MAX_DECIMALS)))
}

/// Parse a decimal string (e.g. `"1.5"`) into base units.
///
/// Accepts an optional fractional part; rejects signs, exponents, separators,
/// more fractional digits than `decimals` and values that overflow `u128`.
pub fn parse_units(input: &str, decimals: u8) -> Result<Wei, AmountError> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(AmountError::Empty);
    }
    let malformed = || AmountError::Malformed {
        input: input.to_string(),
    };
    if decimals > MAX_DECIMALS {
        return Err(malformed());
    }

    let (int_part, frac_part) = match trimmed.split_once('.') {
        Some((int_part, frac_part)) => (int_part, frac_part),
        None => (trimmed, ""),
    };
    if int_part.is_empty() && frac_part.is_empty() {
        return Err(malformed());
    }
    let all_digits = |s: &str| s.bytes().all(|b| b.is_ascii_digit());
    if !all_digits(int_part) || !all_digits(frac_part) {
        return Err(malformed());
    }
    if frac_part.len() > decimals as usize {
        return Err(AmountError::TooManyDecimals {
            places: frac_part.len(),
            max: decimals,
        });
    }

    let whole: Wei = if int_part.is_empty() {
        0
    } else {
        int_part.parse().map_err(|_| AmountError::Overflow)?
    };
    let fraction: Wei = if frac_part.is_empty() {
        0
    } else {
        let padded = format!("{:0<width$}", frac_part, width = decimals as usize);
        padded.parse().map_err(|_| AmountError::Overflow)?
    };

    whole
        .checked_mul(pow10(decimals))
        .and_then(|scaled| scaled.checked_add(fraction))
        .ok_or(AmountError::Overflow)
}

/// Format base units as a decimal string with trailing zeros trimmed.
///
/// Always keeps at least one fractional digit: `0` formats as `"0.0"`.
pub fn format_units(value: Wei, decimals: u8) -> String {
    let decimals = decimals.min(MAX_DECIMALS);
    if decimals == 0 {
        return format!("{}.0", value);
    }
    let unit = pow10(decimals);
    let frac = format!("{:0width$}", value % unit, width = decimals as usize);
    let frac = frac.trim_end_matches('0');
    format!(
        "{}.{}",
        value / unit,
        if frac.is_empty() { "0" } else { frac }
    )
}

/// Format base units with exactly `places` fractional digits, rounding half up.
pub fn format_units_fixed(value: Wei, decimals: u8, places: u8) -> String {
    let decimals = decimals.min(MAX_DECIMALS);

    if places >= decimals {
        let unit = pow10(decimals);
        let mut frac = if decimals == 0 {
            String::new()
        } else {
            format!("{:0width$}", value % unit, width = decimals as usize)
        };
        frac.extend(std::iter::repeat('0').take((places - decimals) as usize));
        return if places == 0 {
            (value / unit).to_string()
        } else {
            format!("{}.{}", value / unit, frac)
        };
    }

    let scale = pow10(decimals - places);
    let mut rounded = value / scale;
    if value % scale >= scale / 2 {
        rounded = rounded.saturating_add(1);
    }

    let unit = pow10(places);
    if places == 0 {
        rounded.to_string()
    } else {
        format!(
            "{}.{:0width$}",
            rounded / unit,
            rounded % unit,
            width = places as usize
        )
    }
}

/// Lossy conversion to a floating point token quantity, for display math.
pub fn wei_to_f64(value: Wei, decimals: u8) -> f64 {
    value as f64 / 10f64.powi(i32::from(decimals.min(MAX_DECIMALS)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::{TOKEN_DECIMALS, WEI_PER_TOKEN};

    #[test]
    fn test_parse_whole_and_fractional() {
        assert_eq!(parse_units("1", TOKEN_DECIMALS).unwrap(), WEI_PER_TOKEN);
        assert_eq!(
            parse_units("1.5", TOKEN_DECIMALS).unwrap(),
            1_500_000_000_000_000_000
        );
        assert_eq!(
            parse_units(".25", TOKEN_DECIMALS).unwrap(),
            250_000_000_000_000_000
        );
        assert_eq!(parse_units("0.000000000000000001", TOKEN_DECIMALS).unwrap(), 1);
        assert_eq!(parse_units(" 20 ", TOKEN_DECIMALS).unwrap(), 20 * WEI_PER_TOKEN);
    }

    #[test]
    fn test_parse_rejects_bad_input() {
        assert_eq!(parse_units("", 18), Err(AmountError::Empty));
        assert!(matches!(parse_units("-1", 18), Err(AmountError::Malformed { .. })));
        assert!(matches!(parse_units("1e18", 18), Err(AmountError::Malformed { .. })));
        assert!(matches!(parse_units("1.2.3", 18), Err(AmountError::Malformed { .. })));
        assert!(matches!(parse_units(".", 18), Err(AmountError::Malformed { .. })));
        assert_eq!(
            parse_units("0.0000000000000000001", 18),
            Err(AmountError::TooManyDecimals { places: 19, max: 18 })
        );
        assert_eq!(
            parse_units("999999999999999999999999999999", 18),
            Err(AmountError::Overflow)
        );
    }

    #[test]
    fn test_format_units_trims_zeros() {
        assert_eq!(format_units(0, 18), "0.0");
        assert_eq!(format_units(WEI_PER_TOKEN, 18), "1.0");
        assert_eq!(format_units(1_500_000_000_000_000_000, 18), "1.5");
        assert_eq!(format_units(1, 18), "0.000000000000000001");
        assert_eq!(format_units(7, 0), "7.0");
    }

    #[test]
    fn test_format_units_fixed_rounds_half_up() {
        assert_eq!(format_units_fixed(1_234_000_000_000_000_000, 18, 2), "1.23");
        assert_eq!(format_units_fixed(1_235_000_000_000_000_000, 18, 2), "1.24");
        assert_eq!(format_units_fixed(999_999_000_000_000_000, 18, 2), "1.00");
        assert_eq!(format_units_fixed(123_456_789_000_000, 18, 6), "0.000123");
        assert_eq!(format_units_fixed(2 * WEI_PER_TOKEN, 18, 0), "2");
        assert_eq!(format_units_fixed(15, 1, 3), "1.500");
    }

    #[test]
    fn test_wei_to_f64() {
        assert_eq!(wei_to_f64(WEI_PER_TOKEN / 2, 18), 0.5);
        assert_eq!(wei_to_f64(0, 18), 0.0);
    }
}
