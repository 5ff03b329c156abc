//! Discounts

use decimal_percentage::Percentage;
use rust_decimal::{
    Decimal, RoundingStrategy,
    prelude::{FromPrimitive, ToPrimitive},
};
use rusty_money::{Money, MoneyError};
use thiserror::Error;

use crate::{errors::ErrorKind, pricing::Amount};

/// Errors specific to discount calculations.
#[derive(Debug, Error)]
pub enum DiscountError {
    /// Discount rates must lie in `[0, 1)`.
    #[error("discount rate {0} is outside [0, 1)")]
    OutOfRange(Decimal),

    /// Percentage calculation could not be safely converted.
    #[error("percentage conversion overflowed or was not finite")]
    PercentConversion,

    /// Wrapped money arithmetic or currency mismatch error.
    #[error(transparent)]
    Money(#[from] MoneyError),
}

impl DiscountError {
    /// Error category for callers that only need the broad kind.
    pub fn kind(&self) -> ErrorKind {
        ErrorKind::InvalidInput
    }
}

/// Returns the fractional value of a percentage (0.25 for 25%).
pub fn fraction(percent: &Percentage) -> Decimal {
    // decimal_percentage doesn't expose the underlying Decimal
    (*percent) * Decimal::ONE
}

/// Converts a fractional percentage to percent points for display.
pub fn percent_points(percent: &Percentage) -> Decimal {
    (fraction(percent) * Decimal::ONE_HUNDRED).round_dp(2)
}

/// Checks that a discount rate lies in `[0, 1)`.
///
/// # Errors
///
/// Returns [`DiscountError::OutOfRange`] for negative rates and rates of 100% or more.
pub fn validate_rate(percent: &Percentage) -> Result<(), DiscountError> {
    let rate = fraction(percent);

    if rate < Decimal::ZERO || rate >= Decimal::ONE {
        return Err(DiscountError::OutOfRange(rate));
    }

    Ok(())
}

/// Calculate the discount amount in minor units based on a percentage and a minor unit amount.
///
/// # Errors
///
/// Returns an error if the percentage calculation overflows or cannot be safely represented
/// (`DiscountError::PercentConversion`).
pub fn percent_of_minor(percent: &Percentage, minor: i64) -> Result<i64, DiscountError> {
    let minor = Decimal::from_i64(minor).ok_or(DiscountError::PercentConversion)?;

    fraction(percent)
        .checked_mul(minor)
        .ok_or(DiscountError::PercentConversion)?
        .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
        .to_i64()
        .ok_or(DiscountError::PercentConversion)
}

/// Calculate the discount amount on a price for a percentage.
///
/// # Errors
///
/// Returns [`DiscountError::PercentConversion`] when the amount cannot be represented.
pub fn discount_on(price: &Amount, percent: &Percentage) -> Result<Amount, DiscountError> {
    let discount_minor = percent_of_minor(percent, price.to_minor_units())?;

    Ok(Money::from_minor(discount_minor, price.currency()))
}

/// Returns `price * (1 - percent)`.
///
/// # Errors
///
/// Returns an error if the discount cannot be represented or the subtraction fails.
pub fn apply_discount(price: &Amount, percent: &Percentage) -> Result<Amount, DiscountError> {
    let discount = discount_on(price, percent)?;

    Ok(price.sub(discount)?)
}

#[cfg(test)]
mod tests {
    use std::convert::TryFrom;

    use testresult::TestResult;

    use crate::pricing::amount;

    use super::*;

    #[test]
    fn percent_of_minor_calculates_correctly() -> TestResult {
        let percent = Percentage::from(0.25);
        let result = percent_of_minor(&percent, 200)?;

        assert_eq!(result, 50);

        Ok(())
    }

    #[test]
    fn percent_of_minor_overflow_returns_error() {
        let percent = Percentage::from(2.0);
        let result = percent_of_minor(&percent, i64::MAX);

        assert!(matches!(result, Err(DiscountError::PercentConversion)));
    }

    #[test]
    fn percent_of_minor_checked_mul_overflow_returns_error() -> TestResult {
        let percent = Percentage::try_from("100000000000000000000")?;
        let result = percent_of_minor(&percent, i64::MAX);

        assert!(matches!(result, Err(DiscountError::PercentConversion)));

        Ok(())
    }

    #[test]
    fn apply_discount_takes_ten_percent_off() -> TestResult {
        let discounted = apply_discount(&amount(3_000), &Percentage::from(0.1))?;

        assert_eq!(discounted, amount(2_700));

        Ok(())
    }

    #[test]
    fn apply_zero_discount_keeps_price() -> TestResult {
        let discounted = apply_discount(&amount(3_000), &Percentage::from(0.0))?;

        assert_eq!(discounted, amount(3_000));

        Ok(())
    }

    #[test]
    fn discount_on_negative_price_stays_negative() -> TestResult {
        let discount = discount_on(&amount(-1_000), &Percentage::from(0.5))?;

        assert_eq!(discount, amount(-500));

        Ok(())
    }

    #[test]
    fn validate_rate_bounds() {
        assert!(validate_rate(&Percentage::from(0.0)).is_ok());
        assert!(validate_rate(&Percentage::from(0.99)).is_ok());
        assert!(matches!(
            validate_rate(&Percentage::from(1.0)),
            Err(DiscountError::OutOfRange(_))
        ));
        assert!(matches!(
            validate_rate(&Percentage::from(-0.1)),
            Err(DiscountError::OutOfRange(_))
        ));
    }

    #[test]
    fn percent_points_scales_fraction() {
        assert_eq!(percent_points(&Percentage::from(0.125)), Decimal::new(1250, 2));
    }
}
