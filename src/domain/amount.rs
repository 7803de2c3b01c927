//! Monetary amounts
//!
//! Amounts are exact decimals. They are stored with two fractional digits,
//! so every amount entering the system is rounded the same way the database
//! column would round it.

use rust_decimal::{Decimal, RoundingStrategy};

use super::error::DomainError;

/// Number of fractional digits kept for stored amounts
pub const MONEY_SCALE: u32 = 2;

/// Integer digits available in the stored column, `NUMERIC(19, 2)`
pub const MONEY_INTEGER_DIGITS: u32 = 17;

/// Round an amount to [`MONEY_SCALE`] digits, half away from zero.
pub fn normalize_amount(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(MONEY_SCALE, RoundingStrategy::MidpointAwayFromZero)
}

/// Reject amounts whose integer part does not fit the stored column.
pub fn check_amount(value: Decimal) -> Result<(), DomainError> {
    let limit = Decimal::from(10_i64.pow(MONEY_INTEGER_DIGITS));
    if value.abs() >= limit {
        return Err(DomainError::InvalidField {
            field: "amount",
            reason: format!("must be smaller than {limit} in magnitude"),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_normalize_keeps_exact_cents() {
        assert_eq!(normalize_amount(dec!(100.25)), dec!(100.25));
        assert_eq!(normalize_amount(dec!(40)), dec!(40));
    }

    #[test]
    fn test_normalize_rounds_half_away_from_zero() {
        assert_eq!(normalize_amount(dec!(0.125)), dec!(0.13));
        assert_eq!(normalize_amount(dec!(-0.125)), dec!(-0.13));
        assert_eq!(normalize_amount(dec!(2.344)), dec!(2.34));
    }

    #[test]
    fn test_check_amount_limit() {
        assert!(check_amount(dec!(99999999999999999.99)).is_ok());
        assert!(check_amount(dec!(-99999999999999999.99)).is_ok());
        assert!(matches!(
            check_amount(dec!(100000000000000000)),
            Err(DomainError::InvalidField { field: "amount", .. })
        ));
        assert!(check_amount(dec!(-100000000000000000)).is_err());
    }

    #[test]
    fn test_negative_amounts_are_not_rejected() {
        // Sign is a convention, not validated
        assert_eq!(normalize_amount(dec!(-5)), dec!(-5));
    }
}
