//! Archive of removed contracts
//!
//! When a customer is removed, a snapshot of the contract and its settlement is
//! handed to a [`ContractArchive`]. The file archive appends a human-readable
//! block and never reads it back.

use std::{
    fs::OpenOptions,
    io::{self, Write},
    path::PathBuf,
};

use jiff::civil::Date;
use thiserror::Error;
use tracing::debug;

use crate::{
    billing::{DamageTier, Settlement},
    categories::CarCategory,
    contracts::{Customer, RentalContract},
    errors::ErrorKind,
    pricing::Amount,
};

const SEPARATOR: &str = "-----------------------------------------";

/// Errors raised while archiving a contract.
#[derive(Debug, Error)]
pub enum ArchiveError {
    /// The archive file could not be opened or written.
    #[error("failed to write archive file {}", path.display())]
    Io {
        /// Archive file path
        path: PathBuf,

        /// Underlying IO error
        #[source]
        source: io::Error,
    },
}

impl ArchiveError {
    /// Error category for callers that only need the broad kind.
    pub fn kind(&self) -> ErrorKind {
        ErrorKind::Storage
    }
}

/// Snapshot of a removed contract.
#[derive(Debug, Clone, PartialEq)]
pub struct ArchivedContract {
    /// Customer contact details
    pub customer: Customer,

    /// Brand the customer asked for
    pub desired_brand: String,

    /// Rental category
    pub category: CarCategory,

    /// Plate of the rented vehicle
    pub plate: String,

    /// First day of the rental
    pub rental_date: Date,

    /// Day the vehicle was due back
    pub return_date: Date,

    /// Whole rental days billed
    pub days: i32,

    /// Damage tier charged at check-in
    pub tier: DamageTier,

    /// Amount billed
    pub total_due: Amount,
}

impl ArchivedContract {
    /// Builds a snapshot from a contract and its settlement.
    pub fn new(contract: &RentalContract, settlement: &Settlement) -> Self {
        Self {
            customer: contract.customer().clone(),
            desired_brand: contract.desired_brand().to_string(),
            category: contract.category(),
            plate: contract.plate().to_string(),
            rental_date: contract.rental_date(),
            return_date: contract.return_date(),
            days: contract.duration_days(),
            tier: settlement.tier(),
            total_due: settlement.total_due(),
        }
    }

    /// Writes the human-readable record, ending with a separator line.
    ///
    /// # Errors
    ///
    /// Returns an error if writing fails.
    pub fn write_to(&self, mut out: impl Write) -> io::Result<()> {
        writeln!(out, "Name: {}", self.customer.name)?;
        writeln!(out, "Address: {}", self.customer.address)?;
        writeln!(out, "Phone: {}", self.customer.phone)?;
        writeln!(out, "Desired brand: {}", self.desired_brand)?;
        writeln!(out, "Category: {}", self.category)?;
        writeln!(out, "Plate: {}", self.plate)?;
        writeln!(out, "Rental date: {}", self.rental_date)?;
        writeln!(out, "Return date: {}", self.return_date)?;
        writeln!(out, "Days: {}", self.days)?;
        writeln!(out, "Damage tier: {}", self.tier)?;
        writeln!(out, "Total due: {}", self.total_due)?;
        writeln!(out, "{SEPARATOR}")
    }
}

/// Destination for removed contracts.
pub trait ContractArchive {
    /// Records a contract that is about to be closed.
    ///
    /// # Errors
    ///
    /// Returns an [`ArchiveError`] if the record cannot be stored.
    fn record(
        &mut self,
        contract: &RentalContract,
        settlement: &Settlement,
    ) -> Result<(), ArchiveError>;
}

/// Appends records to a text file, creating it when missing.
#[derive(Debug, Clone)]
pub struct FileArchive {
    path: PathBuf,
}

impl FileArchive {
    /// Creates an archive writing to `path`.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    fn io_error(&self, source: io::Error) -> ArchiveError {
        ArchiveError::Io {
            path: self.path.clone(),
            source,
        }
    }
}

impl ContractArchive for FileArchive {
    fn record(
        &mut self,
        contract: &RentalContract,
        settlement: &Settlement,
    ) -> Result<(), ArchiveError> {
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .map_err(|error| self.io_error(error))?;

        let mut buffer = Vec::new();

        ArchivedContract::new(contract, settlement)
            .write_to(&mut buffer)
            .and_then(|()| file.write_all(&buffer))
            .map_err(|error| self.io_error(error))?;

        debug!(path = %self.path.display(), plate = %contract.plate(), "contract archived");

        Ok(())
    }
}

/// Keeps records in memory.
#[derive(Debug, Clone, Default)]
pub struct MemoryArchive {
    records: Vec<ArchivedContract>,
}

impl MemoryArchive {
    /// Creates an empty archive.
    pub fn new() -> Self {
        Self::default()
    }

    /// Records in the order they were archived.
    pub fn records(&self) -> &[ArchivedContract] {
        &self.records
    }
}

impl ContractArchive for MemoryArchive {
    fn record(
        &mut self,
        contract: &RentalContract,
        settlement: &Settlement,
    ) -> Result<(), ArchiveError> {
        self.records
            .push(ArchivedContract::new(contract, settlement));

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use jiff::civil::date;
    use testresult::TestResult;

    use crate::{
        billing::settle,
        contracts::{NewContract, Pricing},
        fleet::Fleet,
        pricing::amount,
        vehicles::NewVehicle,
    };

    use super::*;

    fn contract() -> Result<RentalContract, Box<dyn std::error::Error>> {
        let mut fleet =
            Fleet::with_vehicles([NewVehicle::new("7S6789", "Chevrolet", "White", "Good")])?;

        let contract = RentalContract::create(
            &mut fleet,
            NewContract {
                customer: Customer::new("Dung", "5 Hang Bai", "0987"),
                desired_brand: "Chevrolet".to_string(),
                reason: "Family holiday".to_string(),
                category: "7-seater".to_string(),
                plate: "7S6789".to_string(),
                rental_date: date(2024, 5, 1),
                return_date: date(2024, 5, 3),
                pricing: Pricing::Standard,
            },
        )?;

        Ok(contract)
    }

    #[test]
    fn file_archive_appends_records() -> TestResult {
        let dir = tempfile::tempdir()?;
        let path = dir.path().join("savedcustomer.txt");
        let mut archive = FileArchive::new(&path);
        let contract = contract()?;
        let settlement = settle(&contract, DamageTier::C)?;

        archive.record(&contract, &settlement)?;
        archive.record(&contract, &settlement)?;

        let contents = fs::read_to_string(&path)?;

        assert_eq!(contents.matches("Name: Dung").count(), 2);
        assert_eq!(contents.matches(SEPARATOR).count(), 2);
        assert!(contents.contains("Rental date: 2024-05-01"));
        assert!(contents.contains("Category: 7-seater"));
        assert!(contents.contains("Days: 2"));

        Ok(())
    }

    #[test]
    fn file_archive_reports_unwritable_path() -> TestResult {
        let dir = tempfile::tempdir()?;
        let mut archive = FileArchive::new(dir.path().join("missing").join("log.txt"));
        let contract = contract()?;
        let settlement = settle(&contract, DamageTier::None)?;

        let result = archive.record(&contract, &settlement);

        assert!(matches!(result, Err(ArchiveError::Io { .. })));

        Ok(())
    }

    #[test]
    fn memory_archive_keeps_snapshot() -> TestResult {
        let mut archive = MemoryArchive::new();
        let contract = contract()?;
        let settlement = settle(&contract, DamageTier::A)?;

        archive.record(&contract, &settlement)?;

        let record = archive.records().first();

        assert_eq!(record.map(|r| r.plate.as_str()), Some("7S6789"));
        assert_eq!(record.map(|r| r.total_due), Some(amount(4_500)));

        Ok(())
    }
}
