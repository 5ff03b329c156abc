//! Receipt
//!
//! Tables and bills written to the operator's terminal.

use std::{fmt::Write as _, io};

use jiff::civil::Date;
use rusty_money::MoneyError;
use tabled::{
    builder::Builder,
    settings::{
        Alignment, Color, Style, Theme,
        object::{Columns, Rows},
    },
};
use thiserror::Error;

use crate::{
    billing::Settlement,
    contracts::RentalContract,
    discounts::{DiscountError, percent_points},
    fleet::Fleet,
    maintenance::{MaintenanceSchedule, MaintenanceTask},
    pricing::zero,
    registry::ContractRegistry,
};

/// Errors that can occur when writing a receipt.
#[derive(Debug, Error)]
pub enum ReceiptError {
    /// Wrapper for money errors.
    #[error(transparent)]
    Money(#[from] MoneyError),

    /// A contract's discounted cost could not be computed.
    #[error(transparent)]
    Discount(#[from] DiscountError),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
}

/// Writes the vehicle list with availability and pending maintenance count.
///
/// # Errors
///
/// Returns an error if writing fails.
pub fn write_vehicles(mut out: impl io::Write, fleet: &Fleet) -> Result<(), ReceiptError> {
    if fleet.is_empty() {
        writeln!(out, "No vehicles in the fleet.")?;

        return Ok(());
    }

    let mut builder = Builder::default();

    builder.push_record([
        "#",
        "Plate",
        "Brand",
        "Color",
        "Condition",
        "Status",
        "Maintenance",
    ]);

    for (idx, vehicle) in fleet.iter().enumerate() {
        builder.push_record([
            format!("{}", idx + 1),
            vehicle.plate().to_string(),
            vehicle.brand().to_string(),
            vehicle.color().to_string(),
            vehicle.condition().to_string(),
            vehicle.status().to_string(),
            format!("{}", vehicle.maintenance().len()),
        ]);
    }

    write_table(&mut out, builder, 6..7)
}

/// Writes active contracts with their 1-based positions.
///
/// # Errors
///
/// Returns an error if a discounted cost cannot be computed or writing fails.
pub fn write_contracts(
    mut out: impl io::Write,
    contracts: &ContractRegistry,
) -> Result<(), ReceiptError> {
    if contracts.is_empty() {
        writeln!(out, "No customers.")?;

        return Ok(());
    }

    let mut builder = Builder::default();

    builder.push_record([
        "#", "Customer", "Address", "Phone", "Brand", "Reason", "Category", "Plate", "Rented",
        "Return", "Days", "Pricing", "Cost",
    ]);

    for (idx, contract) in contracts.iter().enumerate() {
        let customer = contract.customer();

        builder.push_record([
            format!("{}", idx + 1),
            customer.name.clone(),
            customer.address.clone(),
            customer.phone.clone(),
            contract.desired_brand().to_string(),
            contract.reason().to_string(),
            contract.category().to_string(),
            contract.plate().to_string(),
            contract.rental_date().to_string(),
            contract.return_date().to_string(),
            format!("{}", contract.duration_days()),
            pricing_label(contract),
            format!("{}", contract.final_cost()?),
        ]);
    }

    write_table(&mut out, builder, 10..13)
}

/// Writes the maintenance schedule of one vehicle. Pending tasks due on or
/// before `today` are marked `Due`.
///
/// # Errors
///
/// Returns an error if writing fails.
pub fn write_maintenance(
    mut out: impl io::Write,
    plate: &str,
    schedule: &MaintenanceSchedule,
    today: Date,
) -> Result<(), ReceiptError> {
    if schedule.is_empty() {
        writeln!(out, "No maintenance scheduled for {plate}.")?;

        return Ok(());
    }

    let due: Vec<&MaintenanceTask> = schedule.due_by(today).collect();
    let mut builder = Builder::default();

    builder.push_record(["Description", "Due", "Status"]);

    for task in schedule {
        let status = if due.contains(&task) {
            "Due"
        } else {
            task.status()
        };

        builder.push_record([
            task.description().to_string(),
            task.due_date().to_string(),
            status.to_string(),
        ]);
    }

    writeln!(out, "\nMaintenance for {plate}")?;

    write_table(&mut out, builder, 1..2)?;

    if !due.is_empty() {
        writeln!(out, "{} task(s) due by {today}.", due.len())?;
    }

    Ok(())
}

/// Writes the bill shown when a customer returns a vehicle.
///
/// # Errors
///
/// Returns an error if the discount amount cannot be computed or writing fails.
pub fn write_bill(
    mut out: impl io::Write,
    contract: &RentalContract,
    settlement: &Settlement,
) -> Result<(), ReceiptError> {
    let customer = contract.customer();

    writeln!(out, "\nBill for {}", customer.name)?;
    writeln!(out, "  Address:  {}", customer.address)?;
    writeln!(out, "  Phone:    {}", customer.phone)?;
    writeln!(out, "  Vehicle:  {} ({})", contract.plate(), contract.category())?;
    writeln!(out, "  Wanted:   {}", contract.desired_brand())?;
    writeln!(out, "  Reason:   {}", contract.reason())?;
    writeln!(
        out,
        "  Period:   {} to {} ({} days)",
        contract.rental_date(),
        contract.return_date(),
        contract.duration_days()
    )?;

    let mut lines: Vec<(String, String)> = vec![(
        "Base cost:".to_string(),
        settlement.base_cost().to_string(),
    )];

    if let Some(discount) = settlement.discount() {
        lines.push((
            format!("VIP discount ({}%):", percent_points(&discount)),
            zero().sub(settlement.savings()?)?.to_string(),
        ));
        lines.push((
            "Rental cost:".to_string(),
            settlement.rental_cost().to_string(),
        ));
    }

    lines.push((
        format!("Insurance (tier {}):", settlement.tier()),
        settlement.insurance_fee().to_string(),
    ));
    lines.push(("Total due:".to_string(), settlement.total_due().to_string()));

    let label_width = lines
        .iter()
        .map(|(label, _)| label.len())
        .max()
        .unwrap_or_default();

    let value_width = lines
        .iter()
        .map(|(_, value)| value.len())
        .max()
        .unwrap_or_default();

    let mut summary = String::new();

    for (label, value) in &lines {
        _ = writeln!(summary, "  {label:>label_width$}  {value:>value_width$}");
    }

    writeln!(out, "\n{summary}")?;

    Ok(())
}

fn pricing_label(contract: &RentalContract) -> String {
    match contract.discount() {
        Some(discount) => format!("VIP {}%", percent_points(&discount)),
        None => "Standard".to_string(),
    }
}

fn write_table(
    out: &mut impl io::Write,
    builder: Builder,
    numeric_columns: std::ops::Range<usize>,
) -> Result<(), ReceiptError> {
    let mut table = builder.build();
    let mut theme = Theme::from(Style::modern_rounded());

    theme.remove_horizontal_lines();

    table.with(theme);
    table.modify(Rows::first(), Color::BOLD);
    table.modify(Columns::new(numeric_columns), Alignment::right());

    writeln!(out, "\n{table}")?;

    Ok(())
}
