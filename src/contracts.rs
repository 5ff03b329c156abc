//! Rental contracts
//!
//! A contract binds a customer to one fleet vehicle over a date range. Creating
//! a contract reserves the vehicle; closing it (see
//! [`ContractRegistry::close`](crate::registry::ContractRegistry::close))
//! releases it again.

use decimal_percentage::Percentage;
use jiff::civil::Date;
use thiserror::Error;
use tracing::{info, warn};

use crate::{
    categories::{CarCategory, CategoryError},
    discounts::{DiscountError, apply_discount, validate_rate},
    errors::ErrorKind,
    fleet::{Fleet, FleetError},
    pricing::{Amount, daily_total},
    vehicles::VehicleKey,
};

/// Errors raised while creating or pricing a contract.
#[derive(Debug, Error)]
pub enum ContractError {
    /// The category name is not recognized.
    #[error(transparent)]
    InvalidCategory(#[from] CategoryError),

    /// The plate is unknown or the vehicle is already rented.
    #[error("vehicle '{0}' is not available or the plate is invalid")]
    VehicleUnavailable(String),

    /// Invalid discount rate or discount arithmetic failure.
    #[error(transparent)]
    Discount(#[from] DiscountError),

    /// Fleet bookkeeping failed.
    #[error(transparent)]
    Fleet(#[from] FleetError),
}

impl ContractError {
    /// Error category for callers that only need the broad kind.
    pub fn kind(&self) -> ErrorKind {
        match self {
            ContractError::InvalidCategory(error) => error.kind(),
            ContractError::VehicleUnavailable(_) => ErrorKind::VehicleUnavailable,
            ContractError::Discount(error) => error.kind(),
            ContractError::Fleet(error) => error.kind(),
        }
    }
}

/// Customer contact details.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Customer {
    /// Full name
    pub name: String,

    /// Postal address
    pub address: String,

    /// Phone number
    pub phone: String,
}

impl Customer {
    /// Creates customer details.
    pub fn new(
        name: impl Into<String>,
        address: impl Into<String>,
        phone: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            address: address.into(),
            phone: phone.into(),
        }
    }
}

/// Partial update of a customer's contact details. `None` fields are left alone.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContactUpdate {
    /// New name
    pub name: Option<String>,

    /// New address
    pub address: Option<String>,

    /// New phone number
    pub phone: Option<String>,
}

impl ContactUpdate {
    /// Whether the update changes nothing.
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.address.is_none() && self.phone.is_none()
    }
}

/// Discount policy of a contract, fixed at creation.
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum Pricing {
    /// Pays the base cost.
    Standard,

    /// Pays the base cost less a discount in `[0, 1)`.
    Vip {
        /// Fraction taken off the base cost
        discount: Percentage,
    },
}

/// Intake data for a new contract, as collected by the clerk.
#[derive(Debug, Clone)]
pub struct NewContract {
    /// Customer contact details
    pub customer: Customer,

    /// Brand the customer asked for; informational only
    pub desired_brand: String,

    /// Reason for the rental
    pub reason: String,

    /// Category name, e.g. `4-seater`
    pub category: String,

    /// Plate of the vehicle to rent
    pub plate: String,

    /// First day of the rental
    pub rental_date: Date,

    /// Day the vehicle is due back
    pub return_date: Date,

    /// Discount policy
    pub pricing: Pricing,
}

/// An active rental agreement.
#[derive(Debug, Clone)]
pub struct RentalContract {
    customer: Customer,
    desired_brand: String,
    reason: String,
    category: CarCategory,
    vehicle: VehicleKey,
    plate: String,
    rental_date: Date,
    return_date: Date,
    pricing: Pricing,
}

impl RentalContract {
    /// Creates a contract and reserves its vehicle.
    ///
    /// Category and discount are validated before the fleet is touched, so a
    /// failed creation never changes vehicle availability.
    ///
    /// # Errors
    ///
    /// - [`ContractError::InvalidCategory`]: the category name is unknown.
    /// - [`ContractError::Discount`]: a VIP discount outside `[0, 1)`.
    /// - [`ContractError::VehicleUnavailable`]: the plate is unknown or already rented.
    pub fn create(fleet: &mut Fleet, new: NewContract) -> Result<Self, ContractError> {
        let category: CarCategory = new.category.parse()?;

        if let Pricing::Vip { discount } = &new.pricing {
            validate_rate(discount)?;
        }

        let Ok(vehicle) = fleet.find_available(&new.plate) else {
            return Err(ContractError::VehicleUnavailable(new.plate));
        };

        let key = vehicle.key();

        fleet.reserve(key)?;

        let contract = Self {
            customer: new.customer,
            desired_brand: new.desired_brand,
            reason: new.reason,
            category,
            vehicle: key,
            plate: new.plate,
            rental_date: new.rental_date,
            return_date: new.return_date,
            pricing: new.pricing,
        };

        info!(
            customer = %contract.customer.name,
            plate = %contract.plate,
            %category,
            vip = contract.is_vip(),
            "contract opened"
        );

        contract.warn_if_inverted();

        Ok(contract)
    }

    /// Customer contact details.
    pub fn customer(&self) -> &Customer {
        &self.customer
    }

    /// Brand the customer asked for.
    pub fn desired_brand(&self) -> &str {
        &self.desired_brand
    }

    /// Reason for the rental.
    pub fn reason(&self) -> &str {
        &self.reason
    }

    /// Rental category.
    pub fn category(&self) -> CarCategory {
        self.category
    }

    /// Key of the rented vehicle in the fleet.
    pub fn vehicle(&self) -> VehicleKey {
        self.vehicle
    }

    /// Plate of the rented vehicle.
    pub fn plate(&self) -> &str {
        &self.plate
    }

    /// First day of the rental.
    pub fn rental_date(&self) -> Date {
        self.rental_date
    }

    /// Day the vehicle is due back.
    pub fn return_date(&self) -> Date {
        self.return_date
    }

    /// Discount policy.
    pub fn pricing(&self) -> Pricing {
        self.pricing
    }

    /// Whether this is a VIP contract.
    pub fn is_vip(&self) -> bool {
        matches!(self.pricing, Pricing::Vip { .. })
    }

    /// VIP discount, if any.
    pub fn discount(&self) -> Option<Percentage> {
        match self.pricing {
            Pricing::Standard => None,
            Pricing::Vip { discount } => Some(discount),
        }
    }

    /// Whole days from rental date to return date.
    ///
    /// Negative when the return date precedes the rental date; this is not
    /// clamped.
    pub fn duration_days(&self) -> i32 {
        (self.return_date - self.rental_date).get_days()
    }

    /// Whether the return date precedes the rental date.
    pub fn has_inverted_period(&self) -> bool {
        self.return_date < self.rental_date
    }

    /// Duration multiplied by the category's daily rate.
    pub fn base_cost(&self) -> Amount {
        daily_total(&self.category.daily_rate(), self.duration_days())
    }

    /// Base cost after the VIP discount; equal to the base cost for standard contracts.
    ///
    /// # Errors
    ///
    /// Returns a [`DiscountError`] if the discount cannot be represented in minor units.
    pub fn final_cost(&self) -> Result<Amount, DiscountError> {
        let base = self.base_cost();

        match &self.pricing {
            Pricing::Standard => Ok(base),
            Pricing::Vip { discount } => apply_discount(&base, discount),
        }
    }

    /// Moves the return date. The new date is not checked against the rental date.
    pub fn extend(&mut self, return_date: Date) {
        info!(
            plate = %self.plate,
            from = %self.return_date,
            to = %return_date,
            "rental period changed"
        );

        self.return_date = return_date;
        self.warn_if_inverted();
    }

    /// Applies a partial contact update; vehicle, category, dates and pricing are untouched.
    pub fn update_contact(&mut self, update: ContactUpdate) {
        let ContactUpdate {
            name,
            address,
            phone,
        } = update;

        if let Some(name) = name {
            self.customer.name = name;
        }

        if let Some(address) = address {
            self.customer.address = address;
        }

        if let Some(phone) = phone {
            self.customer.phone = phone;
        }
    }

    fn warn_if_inverted(&self) {
        if self.has_inverted_period() {
            warn!(
                plate = %self.plate,
                rental_date = %self.rental_date,
                return_date = %self.return_date,
                days = self.duration_days(),
                "return date precedes rental date; billing will be negative"
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use jiff::civil::date;
    use testresult::TestResult;

    use crate::{pricing::amount, vehicles::NewVehicle};

    use super::*;

    fn test_fleet() -> Result<Fleet, FleetError> {
        Fleet::with_vehicles([
            NewVehicle::new("4S1234", "Toyota", "Red", "Good"),
            NewVehicle::new("7S2345", "Ford", "Black", "Good"),
        ])
    }

    fn intake(category: &str, plate: &str, pricing: Pricing) -> NewContract {
        NewContract {
            customer: Customer::new("An Nguyen", "12 Le Loi", "0901234567"),
            desired_brand: "Toyota".to_string(),
            reason: "Business trip".to_string(),
            category: category.to_string(),
            plate: plate.to_string(),
            rental_date: date(2024, 1, 1),
            return_date: date(2024, 1, 4),
            pricing,
        }
    }

    #[test]
    fn create_reserves_vehicle() -> TestResult {
        let mut fleet = test_fleet()?;

        let contract =
            RentalContract::create(&mut fleet, intake("4-seater", "4S1234", Pricing::Standard))?;

        assert_eq!(contract.plate(), "4S1234");
        assert_eq!(contract.vehicle(), fleet.get("4S1234")?.key());
        assert!(!fleet.get("4S1234")?.is_available());

        Ok(())
    }

    #[test]
    fn standard_costs_for_three_days() -> TestResult {
        let mut fleet = test_fleet()?;

        let contract =
            RentalContract::create(&mut fleet, intake("4-seater", "4S1234", Pricing::Standard))?;

        assert_eq!(contract.duration_days(), 3);
        assert_eq!(contract.base_cost(), amount(3_000));
        assert_eq!(contract.final_cost()?, amount(3_000));
        assert!(!contract.is_vip());
        assert_eq!(contract.discount(), None);

        Ok(())
    }

    #[test]
    fn vip_discount_applies_after_base() -> TestResult {
        let mut fleet = test_fleet()?;
        let pricing = Pricing::Vip {
            discount: Percentage::from(0.1),
        };

        let contract = RentalContract::create(&mut fleet, intake("4-seater", "4S1234", pricing))?;

        assert_eq!(contract.base_cost(), amount(3_000));
        assert_eq!(contract.final_cost()?, amount(2_700));
        assert!(contract.is_vip());

        Ok(())
    }

    #[test]
    fn seven_seater_rate_is_used() -> TestResult {
        let mut fleet = test_fleet()?;

        let contract =
            RentalContract::create(&mut fleet, intake("7-seater", "7S2345", Pricing::Standard))?;

        assert_eq!(contract.base_cost(), amount(6_000));

        Ok(())
    }

    #[test]
    fn unknown_category_leaves_vehicle_available() -> TestResult {
        let mut fleet = test_fleet()?;

        let result =
            RentalContract::create(&mut fleet, intake("bus", "4S1234", Pricing::Standard));

        assert!(matches!(result, Err(ContractError::InvalidCategory(_))));
        assert!(fleet.get("4S1234")?.is_available());

        Ok(())
    }

    #[test]
    fn second_contract_on_same_vehicle_is_unavailable() -> TestResult {
        let mut fleet = test_fleet()?;
        let first =
            RentalContract::create(&mut fleet, intake("4-seater", "4S1234", Pricing::Standard))?;

        let second =
            RentalContract::create(&mut fleet, intake("4-seater", "4S1234", Pricing::Standard));

        assert!(matches!(
            second,
            Err(ContractError::VehicleUnavailable(ref plate)) if plate == "4S1234"
        ));
        assert!(!fleet.get("4S1234")?.is_available());
        assert_eq!(first.customer().name, "An Nguyen");

        Ok(())
    }

    #[test]
    fn unknown_plate_is_unavailable() -> TestResult {
        let mut fleet = test_fleet()?;

        let result =
            RentalContract::create(&mut fleet, intake("4-seater", "ZZ9999", Pricing::Standard));

        assert!(
            matches!(result, Err(ref error) if error.kind() == ErrorKind::VehicleUnavailable),
            "unknown plate should report an unavailable vehicle"
        );

        Ok(())
    }

    #[test]
    fn full_discount_is_rejected_before_reserving() -> TestResult {
        let mut fleet = test_fleet()?;
        let pricing = Pricing::Vip {
            discount: Percentage::from(1.0),
        };

        let result = RentalContract::create(&mut fleet, intake("4-seater", "4S1234", pricing));

        assert!(matches!(
            result,
            Err(ContractError::Discount(DiscountError::OutOfRange(_)))
        ));
        assert!(fleet.get("4S1234")?.is_available());

        Ok(())
    }

    #[test]
    fn inverted_period_bills_negative() -> TestResult {
        let mut fleet = test_fleet()?;
        let mut new = intake("4-seater", "4S1234", Pricing::Standard);
        new.return_date = date(2023, 12, 30);

        let contract = RentalContract::create(&mut fleet, new)?;

        assert!(contract.has_inverted_period());
        assert_eq!(contract.duration_days(), -2);
        assert_eq!(contract.base_cost(), amount(-2_000));

        Ok(())
    }

    #[test]
    fn same_day_return_is_zero_days() -> TestResult {
        let mut fleet = test_fleet()?;
        let mut new = intake("4-seater", "4S1234", Pricing::Standard);
        new.return_date = new.rental_date;

        let contract = RentalContract::create(&mut fleet, new)?;

        assert_eq!(contract.duration_days(), 0);
        assert_eq!(contract.base_cost(), amount(0));

        Ok(())
    }

    #[test]
    fn extend_moves_return_date() -> TestResult {
        let mut fleet = test_fleet()?;
        let mut contract =
            RentalContract::create(&mut fleet, intake("4-seater", "4S1234", Pricing::Standard))?;

        contract.extend(date(2024, 1, 11));

        assert_eq!(contract.return_date(), date(2024, 1, 11));
        assert_eq!(contract.duration_days(), 10);
        assert_eq!(contract.base_cost(), amount(10_000));

        Ok(())
    }

    #[test]
    fn update_contact_changes_only_given_fields() -> TestResult {
        let mut fleet = test_fleet()?;
        let mut contract =
            RentalContract::create(&mut fleet, intake("4-seater", "4S1234", Pricing::Standard))?;

        contract.update_contact(ContactUpdate {
            phone: Some("0911111111".to_string()),
            ..ContactUpdate::default()
        });

        assert_eq!(
            contract.customer(),
            &Customer::new("An Nguyen", "12 Le Loi", "0911111111")
        );
        assert_eq!(contract.plate(), "4S1234");
        assert_eq!(contract.rental_date(), date(2024, 1, 1));

        Ok(())
    }

    #[test]
    fn empty_contact_update() {
        assert!(ContactUpdate::default().is_empty());
        assert!(
            !ContactUpdate {
                name: Some("B".to_string()),
                ..ContactUpdate::default()
            }
            .is_empty()
        );
    }
}
