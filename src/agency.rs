//! Agency
//!
//! One counter session: the fleet and the active contracts, plus the
//! operations the clerk performs on them.

use jiff::civil::Date;
use thiserror::Error;
use tracing::debug;

use crate::{
    archive::{ArchiveError, ContractArchive},
    billing::{BillingError, DamageTier, Settlement, settle},
    contracts::{ContactUpdate, ContractError, NewContract, RentalContract},
    errors::ErrorKind,
    fleet::{Fleet, FleetError},
    maintenance::{MaintenanceError, MaintenanceSchedule, MaintenanceTask},
    registry::{ContractRegistry, RegistryError},
    vehicles::{NewVehicle, Vehicle},
};

/// Errors raised by agency operations.
#[derive(Debug, Error)]
pub enum AgencyError {
    /// Vehicle lookup failed.
    #[error(transparent)]
    Fleet(#[from] FleetError),

    /// Contract creation failed.
    #[error(transparent)]
    Contract(#[from] ContractError),

    /// Position lookup or close failed.
    #[error(transparent)]
    Registry(#[from] RegistryError),

    /// Maintenance task not found.
    #[error(transparent)]
    Maintenance(#[from] MaintenanceError),

    /// Settlement failed.
    #[error(transparent)]
    Billing(#[from] BillingError),

    /// Archiving failed.
    #[error(transparent)]
    Archive(#[from] ArchiveError),
}

impl AgencyError {
    /// Error category for callers that only need the broad kind.
    pub fn kind(&self) -> ErrorKind {
        match self {
            AgencyError::Fleet(error) => error.kind(),
            AgencyError::Contract(error) => error.kind(),
            AgencyError::Registry(error) => error.kind(),
            AgencyError::Maintenance(error) => error.kind(),
            AgencyError::Billing(error) => error.kind(),
            AgencyError::Archive(error) => error.kind(),
        }
    }
}

/// Result of returning a vehicle.
#[derive(Debug, Clone)]
pub struct CheckIn {
    /// The closed contract
    pub contract: RentalContract,

    /// Amounts billed
    pub settlement: Settlement,
}

/// Fleet and active contracts of one session.
#[derive(Debug, Default)]
pub struct Agency {
    fleet: Fleet,
    contracts: ContractRegistry,
}

impl Agency {
    /// Creates a session over a fleet with no contracts.
    pub fn new(fleet: Fleet) -> Self {
        Self {
            fleet,
            contracts: ContractRegistry::new(),
        }
    }

    /// Vehicle inventory.
    pub fn vehicles(&self) -> &Fleet {
        &self.fleet
    }

    /// Active contracts.
    pub fn contracts(&self) -> &ContractRegistry {
        &self.contracts
    }

    /// Adds a vehicle to the fleet; it starts out available.
    ///
    /// # Errors
    ///
    /// Returns an [`AgencyError::Fleet`] if the plate is already registered.
    pub fn register_vehicle(&mut self, details: NewVehicle) -> Result<(), AgencyError> {
        self.fleet.add(details)?;

        Ok(())
    }

    /// Removes a vehicle that is not under an active contract.
    ///
    /// # Errors
    ///
    /// Returns an [`AgencyError::Fleet`] if the plate is unknown or the vehicle is rented.
    pub fn retire_vehicle(&mut self, plate: &str) -> Result<Vehicle, AgencyError> {
        Ok(self.fleet.retire(plate)?)
    }

    /// Opens a contract and returns its 1-based position.
    ///
    /// # Errors
    ///
    /// Returns an [`AgencyError::Contract`] if the category, discount or vehicle is rejected.
    pub fn open_contract(&mut self, new: NewContract) -> Result<usize, AgencyError> {
        let contract = RentalContract::create(&mut self.fleet, new)?;

        Ok(self.contracts.add(contract))
    }

    /// Contract at a 1-based position.
    ///
    /// # Errors
    ///
    /// Returns an [`AgencyError::Registry`] if the position is out of range.
    pub fn contract(&self, position: usize) -> Result<&RentalContract, AgencyError> {
        Ok(self.contracts.get(position)?)
    }

    /// Moves a contract's return date.
    ///
    /// # Errors
    ///
    /// Returns an [`AgencyError::Registry`] if the position is out of range.
    pub fn extend(&mut self, position: usize, return_date: Date) -> Result<(), AgencyError> {
        self.contracts.get_mut(position)?.extend(return_date);

        Ok(())
    }

    /// Changes a customer's contact details.
    ///
    /// # Errors
    ///
    /// Returns an [`AgencyError::Registry`] if the position is out of range.
    pub fn update_contact(
        &mut self,
        position: usize,
        update: ContactUpdate,
    ) -> Result<(), AgencyError> {
        self.contracts.get_mut(position)?.update_contact(update);

        Ok(())
    }

    /// Computes the bill for a contract without closing it.
    ///
    /// # Errors
    ///
    /// Returns an error if the position is out of range or settlement fails.
    pub fn quote(&self, position: usize, tier: DamageTier) -> Result<Settlement, AgencyError> {
        Ok(settle(self.contracts.get(position)?, tier)?)
    }

    /// Settles, archives and closes a contract, releasing its vehicle.
    ///
    /// Nothing changes if settlement or archiving fails.
    ///
    /// # Errors
    ///
    /// Returns an error if the position is out of range, settlement fails or the
    /// archive cannot be written.
    pub fn check_in(
        &mut self,
        position: usize,
        tier: DamageTier,
        archive: &mut impl ContractArchive,
    ) -> Result<CheckIn, AgencyError> {
        let contract = self.contracts.get(position)?;
        let settlement = settle(contract, tier)?;

        archive.record(contract, &settlement)?;

        let contract = self.contracts.close(position, &mut self.fleet)?;

        Ok(CheckIn {
            contract,
            settlement,
        })
    }

    /// Adds a maintenance task to any vehicle, rented or not.
    ///
    /// # Errors
    ///
    /// Returns an [`AgencyError::Fleet`] if the plate is unknown.
    pub fn schedule_maintenance(
        &mut self,
        plate: &str,
        description: &str,
        due_date: Date,
    ) -> Result<(), AgencyError> {
        self.fleet
            .get_mut(plate)?
            .maintenance_mut()
            .add(description, due_date);

        debug!(%plate, %description, %due_date, "maintenance scheduled");

        Ok(())
    }

    /// Removes the first maintenance task with this exact description.
    ///
    /// # Errors
    ///
    /// - [`AgencyError::Fleet`]: the plate is unknown.
    /// - [`AgencyError::Maintenance`]: no task has this description.
    pub fn cancel_maintenance(
        &mut self,
        plate: &str,
        description: &str,
    ) -> Result<MaintenanceTask, AgencyError> {
        let task = self
            .fleet
            .get_mut(plate)?
            .maintenance_mut()
            .remove(description)?;

        debug!(%plate, %description, "maintenance cancelled");

        Ok(task)
    }

    /// Maintenance schedule of a vehicle.
    ///
    /// # Errors
    ///
    /// Returns an [`AgencyError::Fleet`] if the plate is unknown.
    pub fn maintenance(&self, plate: &str) -> Result<&MaintenanceSchedule, AgencyError> {
        Ok(self.fleet.get(plate)?.maintenance())
    }
}
