//! Fixtures
//!
//! Fleet definitions in YAML. A fixture lists vehicles in display order, each
//! optionally carrying pending maintenance tasks.

use std::{fs, path::Path};

use jiff::civil::Date;
use serde::Deserialize;
use thiserror::Error;

use crate::{
    errors::ErrorKind,
    fleet::{Fleet, FleetError},
    vehicles::NewVehicle,
};

const DEFAULT_FLEET: &str = include_str!("../fixtures/fleet.yml");

/// Fixture Parsing Errors
#[derive(Debug, Error)]
pub enum FixtureError {
    /// IO error reading fixture files
    #[error("Failed to read fixture file: {0}")]
    Io(#[from] std::io::Error),

    /// YAML parsing error
    #[error("Failed to parse YAML: {0}")]
    Yaml(#[from] serde_norway::Error),

    /// Fleet could not be built from the fixture
    #[error("Invalid fleet fixture: {0}")]
    Fleet(#[from] FleetError),
}

impl FixtureError {
    /// Error category for callers that only need the broad kind.
    pub fn kind(&self) -> ErrorKind {
        match self {
            FixtureError::Io(_) => ErrorKind::Storage,
            FixtureError::Yaml(_) | FixtureError::Fleet(_) => ErrorKind::InvalidInput,
        }
    }
}

/// Wrapper for vehicles in YAML
#[derive(Debug, Deserialize)]
pub struct FleetFixture {
    /// Vehicles in display order
    pub vehicles: Vec<VehicleFixture>,
}

/// Vehicle fixture from YAML
#[derive(Debug, Deserialize)]
pub struct VehicleFixture {
    /// Licence plate
    pub plate: String,

    /// Manufacturer
    pub brand: String,

    /// Paint colour
    pub color: String,

    /// Free-text condition, `Good` when omitted
    #[serde(default = "default_condition")]
    pub condition: String,

    /// Pending maintenance
    #[serde(default)]
    pub maintenance: Vec<TaskFixture>,
}

/// Maintenance task fixture from YAML
#[derive(Debug, Deserialize)]
pub struct TaskFixture {
    /// What needs doing
    pub description: String,

    /// Due date, `YYYY-MM-DD`
    pub due: Date,
}

fn default_condition() -> String {
    "Good".to_string()
}

impl FleetFixture {
    /// Load a fleet fixture from a YAML file
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, FixtureError> {
        let contents = fs::read_to_string(path)?;

        Self::parse(&contents)
    }

    /// Parse a fleet fixture from YAML text
    ///
    /// # Errors
    ///
    /// Returns an error if the YAML is malformed.
    pub fn parse(contents: &str) -> Result<Self, FixtureError> {
        Ok(serde_norway::from_str(contents)?)
    }

    /// Built-in four-vehicle fleet.
    ///
    /// # Errors
    ///
    /// Returns an error if the bundled fixture is malformed.
    pub fn default_fleet() -> Result<Self, FixtureError> {
        Self::parse(DEFAULT_FLEET)
    }

    /// Builds a fleet with every vehicle available.
    ///
    /// # Errors
    ///
    /// Returns [`FixtureError::Fleet`] if two vehicles share a plate.
    pub fn into_fleet(self) -> Result<Fleet, FixtureError> {
        let mut fleet = Fleet::new();

        for vehicle in self.vehicles {
            let VehicleFixture {
                plate,
                brand,
                color,
                condition,
                maintenance,
            } = vehicle;

            fleet.add(NewVehicle::new(plate.clone(), brand, color, condition))?;

            let schedule = fleet.get_mut(&plate)?.maintenance_mut();

            for task in maintenance {
                schedule.add(task.description, task.due);
            }
        }

        Ok(fleet)
    }
}
