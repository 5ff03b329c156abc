//! Billing
//!
//! Settlement of a contract: the VIP discount is applied to the base cost
//! first, then the damage insurance fee is added.

use std::{fmt, str::FromStr};

use decimal_percentage::Percentage;
use rusty_money::MoneyError;
use thiserror::Error;

use crate::{
    contracts::RentalContract,
    discounts::DiscountError,
    errors::ErrorKind,
    pricing::{Amount, TotalPriceError, amount, total_price, zero},
};

/// Errors raised while settling a contract.
#[derive(Debug, Error)]
pub enum BillingError {
    /// The damage tier letter is not A, B or C.
    #[error("unknown damage tier '{0}' (expected A, B, C or none)")]
    UnknownTier(String),

    /// The discount could not be applied.
    #[error(transparent)]
    Discount(#[from] DiscountError),

    /// The total could not be summed.
    #[error(transparent)]
    TotalPrice(#[from] TotalPriceError),
}

impl BillingError {
    /// Error category for callers that only need the broad kind.
    pub fn kind(&self) -> ErrorKind {
        ErrorKind::InvalidInput
    }
}

/// Damage found when the vehicle comes back.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Hash)]
pub enum DamageTier {
    /// No damage.
    #[default]
    None,

    /// Severe damage.
    A,

    /// Moderate damage.
    B,

    /// Minor damage.
    C,
}

impl DamageTier {
    /// Insurance fee charged for this tier.
    pub fn insurance_fee(self) -> Amount {
        match self {
            DamageTier::None => zero(),
            DamageTier::A => amount(500),
            DamageTier::B => amount(200),
            DamageTier::C => amount(100),
        }
    }
}

impl fmt::Display for DamageTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            DamageTier::None => "none",
            DamageTier::A => "A",
            DamageTier::B => "B",
            DamageTier::C => "C",
        };

        f.write_str(label)
    }
}

impl FromStr for DamageTier {
    type Err = BillingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let tier = s.trim();

        match tier.to_ascii_uppercase().as_str() {
            "A" => Ok(DamageTier::A),
            "B" => Ok(DamageTier::B),
            "C" => Ok(DamageTier::C),
            "NONE" => Ok(DamageTier::None),
            _ => Err(BillingError::UnknownTier(tier.to_string())),
        }
    }
}

/// Amounts due when a contract is settled.
#[derive(Debug, Clone, PartialEq)]
pub struct Settlement {
    base_cost: Amount,
    rental_cost: Amount,
    insurance_fee: Amount,
    total_due: Amount,
    discount: Option<Percentage>,
    tier: DamageTier,
}

impl Settlement {
    /// Duration times daily rate, before any discount.
    pub fn base_cost(&self) -> Amount {
        self.base_cost
    }

    /// Rental cost after the VIP discount.
    pub fn rental_cost(&self) -> Amount {
        self.rental_cost
    }

    /// Damage insurance fee.
    pub fn insurance_fee(&self) -> Amount {
        self.insurance_fee
    }

    /// Rental cost plus insurance fee.
    pub fn total_due(&self) -> Amount {
        self.total_due
    }

    /// VIP discount that was applied, if any.
    pub fn discount(&self) -> Option<Percentage> {
        self.discount
    }

    /// Damage tier the fee was charged for.
    pub fn tier(&self) -> DamageTier {
        self.tier
    }

    /// Amount saved through the discount.
    ///
    /// # Errors
    ///
    /// Returns a [`MoneyError`] if the subtraction fails.
    pub fn savings(&self) -> Result<Amount, MoneyError> {
        self.base_cost.sub(self.rental_cost)
    }
}

/// Computes the amounts due for a contract. Does not modify the contract.
///
/// # Errors
///
/// Returns a [`BillingError`] if the discount or money arithmetic fails.
pub fn settle(contract: &RentalContract, tier: DamageTier) -> Result<Settlement, BillingError> {
    let base_cost = contract.base_cost();
    let rental_cost = contract.final_cost()?;
    let insurance_fee = tier.insurance_fee();
    let total_due = total_price(&[rental_cost, insurance_fee])?;

    Ok(Settlement {
        base_cost,
        rental_cost,
        insurance_fee,
        total_due,
        discount: contract.discount(),
        tier,
    })
}
