//! Rentdesk prelude.
//!
//! Convenience exports for common library consumers.

pub use crate::{
    agency::{Agency, AgencyError, CheckIn},
    archive::{ArchiveError, ArchivedContract, ContractArchive, FileArchive, MemoryArchive},
    auth::{AuthError, PasswordFile},
    billing::{BillingError, DamageTier, Settlement, settle},
    categories::{CarCategory, CategoryError},
    console::{Console, ConsoleError},
    contracts::{ContactUpdate, ContractError, Customer, NewContract, Pricing, RentalContract},
    discounts::DiscountError,
    errors::ErrorKind,
    fixtures::{FixtureError, FleetFixture},
    fleet::{Fleet, FleetError},
    maintenance::{MaintenanceError, MaintenanceSchedule, MaintenanceTask},
    pricing::{Amount, CURRENCY},
    receipt::ReceiptError,
    registry::{ContractRegistry, RegistryError},
    vehicles::{NewVehicle, Vehicle, VehicleKey},
};
