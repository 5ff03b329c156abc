//! Vehicles

use slotmap::new_key_type;

use crate::maintenance::MaintenanceSchedule;

new_key_type! {
    /// Vehicle Key
    pub struct VehicleKey;
}

/// Details needed to register a vehicle with the fleet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewVehicle {
    /// License plate, unique within the fleet
    pub plate: String,

    /// Manufacturer
    pub brand: String,

    /// Paint colour
    pub color: String,

    /// Free-text condition note
    pub condition: String,
}

impl NewVehicle {
    /// Creates vehicle details.
    pub fn new(
        plate: impl Into<String>,
        brand: impl Into<String>,
        color: impl Into<String>,
        condition: impl Into<String>,
    ) -> Self {
        Self {
            plate: plate.into(),
            brand: brand.into(),
            color: color.into(),
            condition: condition.into(),
        }
    }
}

/// A physical rental unit.
#[derive(Debug, Clone)]
pub struct Vehicle {
    key: VehicleKey,
    plate: String,
    brand: String,
    color: String,
    condition: String,
    available: bool,
    maintenance: MaintenanceSchedule,
}

impl Vehicle {
    pub(crate) fn new(key: VehicleKey, details: NewVehicle) -> Self {
        Self {
            key,
            plate: details.plate,
            brand: details.brand,
            color: details.color,
            condition: details.condition,
            available: true,
            maintenance: MaintenanceSchedule::new(),
        }
    }

    /// Key of this vehicle within its fleet.
    pub fn key(&self) -> VehicleKey {
        self.key
    }

    /// License plate
    pub fn plate(&self) -> &str {
        &self.plate
    }

    /// Manufacturer
    pub fn brand(&self) -> &str {
        &self.brand
    }

    /// Paint colour
    pub fn color(&self) -> &str {
        &self.color
    }

    /// Condition note
    pub fn condition(&self) -> &str {
        &self.condition
    }

    /// Whether the vehicle can be rented right now.
    pub fn is_available(&self) -> bool {
        self.available
    }

    /// Availability label used in listings.
    pub fn status(&self) -> &'static str {
        if self.available { "Available" } else { "Rented" }
    }

    /// Maintenance tasks scheduled for this vehicle.
    pub fn maintenance(&self) -> &MaintenanceSchedule {
        &self.maintenance
    }

    /// Mutable access to the maintenance schedule.
    pub fn maintenance_mut(&mut self) -> &mut MaintenanceSchedule {
        &mut self.maintenance
    }

    /// Only contract creation and closure flip availability.
    pub(crate) fn set_available(&mut self, available: bool) {
        self.available = available;
    }
}
