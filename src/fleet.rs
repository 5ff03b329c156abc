//! Fleet
//!
//! Owns every vehicle for the lifetime of a session. Contracts refer to
//! vehicles by [`VehicleKey`] and never own them.

use rustc_hash::FxHashMap;
use slotmap::SlotMap;
use thiserror::Error;
use tracing::{debug, info};

use crate::{
    errors::ErrorKind,
    vehicles::{NewVehicle, Vehicle, VehicleKey},
};

/// Errors raised by fleet operations.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum FleetError {
    /// No vehicle with this plate, or (for availability lookups) it is rented.
    #[error("vehicle '{0}' is not available or the plate is invalid")]
    NotFound(String),

    /// The vehicle exists but is currently rented.
    #[error("vehicle '{0}' is currently rented")]
    Rented(String),

    /// A vehicle with this plate is already in the fleet.
    #[error("a vehicle with plate '{0}' already exists")]
    DuplicatePlate(String),

    /// The key does not belong to this fleet (or the vehicle was retired).
    #[error("vehicle key does not belong to this fleet")]
    UnknownVehicle,
}

impl FleetError {
    /// Error category for callers that only need the broad kind.
    pub fn kind(&self) -> ErrorKind {
        match self {
            FleetError::NotFound(_) | FleetError::UnknownVehicle => ErrorKind::NotFound,
            FleetError::Rented(_) => ErrorKind::VehicleUnavailable,
            FleetError::DuplicatePlate(_) => ErrorKind::InvalidInput,
        }
    }
}

/// Vehicle inventory.
#[derive(Debug, Default)]
pub struct Fleet {
    vehicles: SlotMap<VehicleKey, Vehicle>,
    plates: FxHashMap<String, VehicleKey>,
    order: Vec<VehicleKey>,
}

impl Fleet {
    /// Creates an empty fleet.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a fleet from a list of vehicles, in order.
    ///
    /// # Errors
    ///
    /// Returns [`FleetError::DuplicatePlate`] if two vehicles share a plate.
    pub fn with_vehicles(
        vehicles: impl IntoIterator<Item = NewVehicle>,
    ) -> Result<Self, FleetError> {
        let mut fleet = Self::new();

        for vehicle in vehicles {
            fleet.add(vehicle)?;
        }

        Ok(fleet)
    }

    /// Registers a vehicle; it starts out available.
    ///
    /// # Errors
    ///
    /// Returns [`FleetError::DuplicatePlate`] if the plate is already registered.
    pub fn add(&mut self, details: NewVehicle) -> Result<VehicleKey, FleetError> {
        if self.plates.contains_key(&details.plate) {
            return Err(FleetError::DuplicatePlate(details.plate));
        }

        let plate = details.plate.clone();
        let key = self
            .vehicles
            .insert_with_key(|key| Vehicle::new(key, details));

        self.plates.insert(plate.clone(), key);
        self.order.push(key);

        debug!(%plate, "vehicle added to fleet");

        Ok(key)
    }

    /// Removes a vehicle from the fleet.
    ///
    /// # Errors
    ///
    /// - [`FleetError::NotFound`]: no vehicle has this plate.
    /// - [`FleetError::Rented`]: the vehicle is under an active contract.
    pub fn retire(&mut self, plate: &str) -> Result<Vehicle, FleetError> {
        let key = self.key_of(plate)?;

        if !self.get(plate)?.is_available() {
            return Err(FleetError::Rented(plate.to_string()));
        }

        let vehicle = self
            .vehicles
            .remove(key)
            .ok_or(FleetError::UnknownVehicle)?;

        self.plates.remove(plate);
        self.order.retain(|k| *k != key);

        info!(%plate, "vehicle retired from fleet");

        Ok(vehicle)
    }

    /// Looks up an available vehicle by plate.
    ///
    /// A rented vehicle is reported exactly like a plate that does not exist.
    ///
    /// # Errors
    ///
    /// Returns [`FleetError::NotFound`] if the plate is unknown or the vehicle is rented.
    pub fn find_available(&self, plate: &str) -> Result<&Vehicle, FleetError> {
        self.get(plate)
            .ok()
            .filter(|vehicle| vehicle.is_available())
            .ok_or_else(|| FleetError::NotFound(plate.to_string()))
    }

    /// Looks up any vehicle by plate, rented or not.
    ///
    /// # Errors
    ///
    /// Returns [`FleetError::NotFound`] if the plate is unknown.
    pub fn get(&self, plate: &str) -> Result<&Vehicle, FleetError> {
        let key = self.key_of(plate)?;

        self.vehicles.get(key).ok_or(FleetError::UnknownVehicle)
    }

    /// Mutable lookup of any vehicle by plate.
    ///
    /// # Errors
    ///
    /// Returns [`FleetError::NotFound`] if the plate is unknown.
    pub fn get_mut(&mut self, plate: &str) -> Result<&mut Vehicle, FleetError> {
        let key = self.key_of(plate)?;

        self.vehicles.get_mut(key).ok_or(FleetError::UnknownVehicle)
    }

    /// Vehicles in the order they were added.
    pub fn iter(&self) -> impl Iterator<Item = &Vehicle> + '_ {
        self.order.iter().filter_map(|key| self.vehicles.get(*key))
    }

    /// Available vehicles in fleet order.
    pub fn available(&self) -> impl Iterator<Item = &Vehicle> + '_ {
        self.iter().filter(|vehicle| vehicle.is_available())
    }

    /// Number of vehicles.
    pub fn len(&self) -> usize {
        self.vehicles.len()
    }

    /// Whether the fleet has no vehicles.
    pub fn is_empty(&self) -> bool {
        self.vehicles.is_empty()
    }

    /// Marks a vehicle as rented.
    pub(crate) fn reserve(&mut self, key: VehicleKey) -> Result<(), FleetError> {
        let vehicle = self
            .vehicles
            .get_mut(key)
            .ok_or(FleetError::UnknownVehicle)?;

        if !vehicle.is_available() {
            return Err(FleetError::Rented(vehicle.plate().to_string()));
        }

        vehicle.set_available(false);

        Ok(())
    }

    /// Marks a vehicle as available again.
    pub(crate) fn release(&mut self, key: VehicleKey) -> Result<(), FleetError> {
        let vehicle = self
            .vehicles
            .get_mut(key)
            .ok_or(FleetError::UnknownVehicle)?;

        vehicle.set_available(true);

        Ok(())
    }

    fn key_of(&self, plate: &str) -> Result<VehicleKey, FleetError> {
        self.plates
            .get(plate)
            .copied()
            .ok_or_else(|| FleetError::NotFound(plate.to_string()))
    }
}
