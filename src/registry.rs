//! Contract registry
//!
//! Active contracts in display order. Operators address contracts by 1-based
//! position.

use std::slice;

use thiserror::Error;
use tracing::info;

use crate::{
    contracts::RentalContract,
    errors::ErrorKind,
    fleet::{Fleet, FleetError},
};

/// Errors raised by registry operations.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RegistryError {
    /// The position is outside `[1, len]`.
    #[error("position {position} is out of range (1..={len})")]
    OutOfRange {
        /// Requested 1-based position
        position: usize,

        /// Number of contracts at the time of the request
        len: usize,
    },

    /// Releasing the contract's vehicle failed.
    #[error(transparent)]
    Fleet(#[from] FleetError),
}

impl RegistryError {
    /// Error category for callers that only need the broad kind.
    pub fn kind(&self) -> ErrorKind {
        match self {
            RegistryError::OutOfRange { .. } => ErrorKind::OutOfRange,
            RegistryError::Fleet(error) => error.kind(),
        }
    }
}

/// Ordered list of active contracts.
#[derive(Debug, Default)]
pub struct ContractRegistry {
    contracts: Vec<RentalContract>,
}

impl ContractRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a contract and returns its 1-based position.
    pub fn add(&mut self, contract: RentalContract) -> usize {
        self.contracts.push(contract);
        self.contracts.len()
    }

    /// Contract at a 1-based position.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::OutOfRange`] if the position is outside `[1, len]`.
    pub fn get(&self, position: usize) -> Result<&RentalContract, RegistryError> {
        let idx = self.index_of(position)?;

        self.contracts
            .get(idx)
            .ok_or(RegistryError::OutOfRange {
                position,
                len: self.contracts.len(),
            })
    }

    /// Mutable contract at a 1-based position.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::OutOfRange`] if the position is outside `[1, len]`.
    pub fn get_mut(&mut self, position: usize) -> Result<&mut RentalContract, RegistryError> {
        let idx = self.index_of(position)?;
        let len = self.contracts.len();

        self.contracts
            .get_mut(idx)
            .ok_or(RegistryError::OutOfRange { position, len })
    }

    /// Removes and returns the contract at a 1-based position. Later contracts
    /// shift down by one.
    ///
    /// The vehicle is not released; use [`ContractRegistry::close`] for that.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::OutOfRange`] if the position is outside `[1, len]`.
    pub fn remove_at(&mut self, position: usize) -> Result<RentalContract, RegistryError> {
        let idx = self.index_of(position)?;

        Ok(self.contracts.remove(idx))
    }

    /// Removes the contract at a 1-based position and releases its vehicle.
    ///
    /// # Errors
    ///
    /// - [`RegistryError::OutOfRange`]: the position is outside `[1, len]`.
    /// - [`RegistryError::Fleet`]: the vehicle is no longer in the fleet.
    ///
    /// Nothing changes when an error is returned.
    pub fn close(
        &mut self,
        position: usize,
        fleet: &mut Fleet,
    ) -> Result<RentalContract, RegistryError> {
        let vehicle = self.get(position)?.vehicle();

        fleet.release(vehicle)?;

        let contract = self.remove_at(position)?;

        info!(
            customer = %contract.customer().name,
            plate = %contract.plate(),
            "contract closed"
        );

        Ok(contract)
    }

    /// Contracts in registry order.
    pub fn iter(&self) -> slice::Iter<'_, RentalContract> {
        self.contracts.iter()
    }

    /// Number of contracts.
    pub fn len(&self) -> usize {
        self.contracts.len()
    }

    /// Whether the registry is empty.
    pub fn is_empty(&self) -> bool {
        self.contracts.is_empty()
    }

    fn index_of(&self, position: usize) -> Result<usize, RegistryError> {
        position
            .checked_sub(1)
            .filter(|idx| *idx < self.contracts.len())
            .ok_or(RegistryError::OutOfRange {
                position,
                len: self.contracts.len(),
            })
    }
}

impl<'a> IntoIterator for &'a ContractRegistry {
    type Item = &'a RentalContract;
    type IntoIter = slice::Iter<'a, RentalContract>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
