//! Decimal amount parsing.

use alloy_primitives::U256;

use crate::error::{CloakError, Result};

/// Parses a human decimal amount (e.g. `"1.5"`) into token base units.
///
/// Rejects empty input, non-digit characters, and fractional parts longer
/// than `decimals`. Trailing fractional zeros are allowed.
pub fn parse_units(amount: &str, decimals: u8) -> Result<U256> {
    let amount = amount.trim();
    if amount.is_empty() {
        return Err(CloakError::InvalidAmount("empty amount".into()));
    }

    let (whole, frac) = match amount.split_once('.') {
        Some((w, f)) => (w, f),
        None => (amount, ""),
    };

    if whole.is_empty() && frac.is_empty() {
        return Err(CloakError::InvalidAmount(amount.into()));
    }
    if !whole.chars().all(|c| c.is_ascii_digit()) || !frac.chars().all(|c| c.is_ascii_digit()) {
        return Err(CloakError::InvalidAmount(amount.into()));
    }
    if frac.len() > decimals as usize {
        return Err(CloakError::InvalidAmount(format!(
            "{amount} has more than {decimals} fractional digits"
        )));
    }

    let scale = U256::from(10u64).pow(U256::from(decimals));
    let whole_units = if whole.is_empty() {
        U256::ZERO
    } else {
        U256::from_str_radix(whole, 10)
            .map_err(|_| CloakError::InvalidAmount(amount.into()))?
            .checked_mul(scale)
            .ok_or_else(|| CloakError::InvalidAmount(format!("{amount} overflows")))?
    };

    let frac_units = if frac.is_empty() {
        U256::ZERO
    } else {
        let padding = decimals as usize - frac.len();
        U256::from_str_radix(frac, 10)
            .map_err(|_| CloakError::InvalidAmount(amount.into()))?
            * U256::from(10u64).pow(U256::from(padding))
    };

    whole_units
        .checked_add(frac_units)
        .ok_or_else(|| CloakError::InvalidAmount(format!("{amount} overflows")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test_case("1", 18, "1000000000000000000"; "whole ether")]
    #[test_case("1.5", 18, "1500000000000000000"; "fractional ether")]
    #[test_case("0.000001", 6, "1"; "smallest usdc unit")]
    #[test_case("2.50", 6, "2500000"; "trailing zero")]
    #[test_case("0", 18, "0"; "zero")]
    #[test_case(".5", 18, "500000000000000000"; "bare fraction")]
    fn test_parse_units(amount: &str, decimals: u8, expected: &str) {
        let got = parse_units(amount, decimals).unwrap();
        assert_eq!(got, U256::from_str_radix(expected, 10).unwrap());
    }

    #[test_case(""; "empty")]
    #[test_case("."; "lone dot")]
    #[test_case("-1"; "negative")]
    #[test_case("1.2.3"; "double dot")]
    #[test_case("1e18"; "scientific")]
    #[test_case("abc"; "letters")]
    fn test_parse_units_rejects(amount: &str) {
        assert!(matches!(
            parse_units(amount, 18),
            Err(CloakError::InvalidAmount(_))
        ));
    }

    #[test]
    fn test_too_many_fractional_digits() {
        assert!(parse_units("1.1234567", 6).is_err());
    }
}
