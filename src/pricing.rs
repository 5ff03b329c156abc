//! Pricing

use rusty_money::{Money, MoneyError, iso};
use thiserror::Error;

/// Currency every agency amount is held in.
pub const CURRENCY: &iso::Currency = iso::USD;

/// A money amount in the agency currency.
pub type Amount = Money<'static, iso::Currency>;

/// Errors that can occur while totalling amounts.
#[derive(Debug, Error, PartialEq)]
pub enum TotalPriceError {
    /// Wrapped money arithmetic or currency mismatch error.
    #[error(transparent)]
    Money(#[from] MoneyError),
}

/// Creates an amount from whole currency units.
pub fn amount(major: i64) -> Amount {
    Money::from_major(major, CURRENCY)
}

/// Returns a zero amount.
pub fn zero() -> Amount {
    Money::from_minor(0, CURRENCY)
}

/// Multiplies a daily rate by a (possibly negative) number of days.
///
/// Whole day counts against per-day rates never need rounding, so the product
/// is taken directly in minor units.
pub fn daily_total(rate: &Amount, days: i32) -> Amount {
    Money::from_minor(rate.to_minor_units() * i64::from(days), rate.currency())
}

/// Calculates the total of a list of amounts.
///
/// # Errors
///
/// - [`TotalPriceError::Money`]: Wrapped money arithmetic or currency mismatch error.
pub fn total_price(amounts: &[Amount]) -> Result<Amount, TotalPriceError> {
    let total = amounts
        .iter()
        .try_fold(zero(), |acc, amount| acc.add(*amount))?;

    Ok(total)
}
