//! Menu actions

use std::{
    io::{BufRead, Write},
    str::FromStr,
};

use jiff::Zoned;
use tracing::debug;

use super::{Console, ConsoleError};
use crate::{
    agency::AgencyError,
    archive::ContractArchive,
    billing::DamageTier,
    contracts::{ContactUpdate, Customer, NewContract, Pricing},
    receipt::{write_bill, write_contracts, write_maintenance, write_vehicles},
    vehicles::NewVehicle,
};

const MENU: &str = "\
-----------------------------------------
|         CAR RENTAL MANAGEMENT         |
-----------------------------------------
|  1. Add customer                      |
|  2. Add VIP customer                  |
|  3. Remove customer                   |
|  4. List customers                    |
|  5. List vehicles                     |
|  6. Add maintenance task              |
|  7. Remove maintenance task           |
|  8. Show maintenance schedule         |
|  9. Extend rental                     |
| 10. Change customer information       |
| 11. Add vehicle                       |
| 12. Retire vehicle                    |
|  0. Exit                              |
-----------------------------------------";

/// Menu entries by number.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
enum MenuChoice {
    AddCustomer,
    AddVipCustomer,
    RemoveCustomer,
    ListCustomers,
    ListVehicles,
    AddMaintenance,
    RemoveMaintenance,
    ShowMaintenance,
    ExtendRental,
    ChangeCustomer,
    AddVehicle,
    RetireVehicle,
    Exit,
}

impl FromStr for MenuChoice {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "1" => Ok(MenuChoice::AddCustomer),
            "2" => Ok(MenuChoice::AddVipCustomer),
            "3" => Ok(MenuChoice::RemoveCustomer),
            "4" => Ok(MenuChoice::ListCustomers),
            "5" => Ok(MenuChoice::ListVehicles),
            "6" => Ok(MenuChoice::AddMaintenance),
            "7" => Ok(MenuChoice::RemoveMaintenance),
            "8" => Ok(MenuChoice::ShowMaintenance),
            "9" => Ok(MenuChoice::ExtendRental),
            "10" => Ok(MenuChoice::ChangeCustomer),
            "11" => Ok(MenuChoice::AddVehicle),
            "12" => Ok(MenuChoice::RetireVehicle),
            "0" => Ok(MenuChoice::Exit),
            _ => Err(()),
        }
    }
}

impl<R: BufRead, W: Write, A: ContractArchive> Console<R, W, A> {
    pub(super) fn write_menu(&mut self) -> Result<(), ConsoleError> {
        writeln!(self.out, "{MENU}")?;

        Ok(())
    }

    /// Handles one menu choice. Returns `false` when the clerk exits.
    pub(super) fn step(&mut self) -> Result<bool, ConsoleError> {
        let answer = self.ask("\nEnter your choice")?;

        let Ok(choice) = answer.parse::<MenuChoice>() else {
            writeln!(self.out, "Invalid choice!")?;

            return Ok(true);
        };

        debug!(?choice, "menu choice");

        match choice {
            MenuChoice::AddCustomer => self.add_customer(false)?,
            MenuChoice::AddVipCustomer => self.add_customer(true)?,
            MenuChoice::RemoveCustomer => self.remove_customer()?,
            MenuChoice::ListCustomers => write_contracts(&mut self.out, self.agency.contracts())?,
            MenuChoice::ListVehicles => write_vehicles(&mut self.out, self.agency.vehicles())?,
            MenuChoice::AddMaintenance => self.add_maintenance()?,
            MenuChoice::RemoveMaintenance => self.remove_maintenance()?,
            MenuChoice::ShowMaintenance => self.show_maintenance()?,
            MenuChoice::ExtendRental => self.extend_rental()?,
            MenuChoice::ChangeCustomer => self.change_customer()?,
            MenuChoice::AddVehicle => self.add_vehicle()?,
            MenuChoice::RetireVehicle => self.retire_vehicle()?,
            MenuChoice::Exit => return Ok(false),
        }

        Ok(true)
    }

    fn report(&mut self, error: &AgencyError) -> Result<(), ConsoleError> {
        writeln!(self.out, "Error ({}): {error}", error.kind())?;

        Ok(())
    }

    fn add_customer(&mut self, vip: bool) -> Result<(), ConsoleError> {
        let name = self.ask("Customer name")?;
        let address = self.ask("Address")?;
        let phone = self.ask("Phone number")?;
        let desired_brand = self.ask("Desired brand")?;
        let reason = self.ask("Reason for rental")?;
        let category = self.ask("Category (4-seater/7-seater)")?;
        let plate = self.ask("Licence plate")?;
        let rental_date = self.ask_date("Rental date")?;
        let return_date = self.ask_date("Return date")?;

        let pricing = if vip {
            Pricing::Vip {
                discount: self.ask_discount()?,
            }
        } else {
            Pricing::Standard
        };

        let new = NewContract {
            customer: Customer::new(name, address, phone),
            desired_brand,
            reason,
            category,
            plate,
            rental_date,
            return_date,
            pricing,
        };

        match self.agency.open_contract(new) {
            Ok(position) => writeln!(self.out, "Customer added at position {position}.")?,
            Err(error) => self.report(&error)?,
        }

        Ok(())
    }

    fn remove_customer(&mut self) -> Result<(), ConsoleError> {
        let position = self.ask_position("Position of the customer to remove")?;

        if let Err(error) = self.agency.contract(position) {
            return self.report(&error);
        }

        let tier = if self.ask_yes_no("Was the vehicle damaged?")? {
            let answer = self.ask("Damage tier (A/B/C)")?;

            match answer.parse::<DamageTier>() {
                Ok(tier) => tier,
                Err(error) => {
                    writeln!(self.out, "{error}; no insurance fee charged.")?;

                    DamageTier::None
                }
            }
        } else {
            DamageTier::None
        };

        match self
            .agency
            .check_in(position, tier, &mut self.archive)
        {
            Ok(check_in) => {
                write_bill(&mut self.out, &check_in.contract, &check_in.settlement)?;
                writeln!(self.out, "Customer removed.")?;
            }
            Err(error) => self.report(&error)?,
        }

        Ok(())
    }

    fn add_maintenance(&mut self) -> Result<(), ConsoleError> {
        let plate = self.ask("Licence plate")?;

        if let Err(error) = self.agency.maintenance(&plate) {
            return self.report(&error);
        }

        let description = self.ask("Maintenance description")?;
        let due_date = self.ask_date("Due date")?;

        match self
            .agency
            .schedule_maintenance(&plate, &description, due_date)
        {
            Ok(()) => writeln!(self.out, "Maintenance added for {plate}.")?,
            Err(error) => self.report(&error)?,
        }

        Ok(())
    }

    fn remove_maintenance(&mut self) -> Result<(), ConsoleError> {
        let plate = self.ask("Licence plate")?;

        if let Err(error) = self.agency.maintenance(&plate) {
            return self.report(&error);
        }

        let description = self.ask("Maintenance description")?;

        match self.agency.cancel_maintenance(&plate, &description) {
            Ok(task) => writeln!(
                self.out,
                "Removed '{}' due {} from {plate}.",
                task.description(),
                task.due_date()
            )?,
            Err(error) => self.report(&error)?,
        }

        Ok(())
    }

    fn show_maintenance(&mut self) -> Result<(), ConsoleError> {
        let plate = self.ask("Licence plate")?;

        match self.agency.maintenance(&plate) {
            Ok(schedule) => {
                write_maintenance(&mut self.out, &plate, schedule, Zoned::now().date())?;
            }
            Err(error) => self.report(&error)?,
        }

        Ok(())
    }

    fn extend_rental(&mut self) -> Result<(), ConsoleError> {
        let position = self.ask_position("Position of the customer")?;

        if let Err(error) = self.agency.contract(position) {
            return self.report(&error);
        }

        let return_date = self.ask_date("New return date")?;

        if let Err(error) = self.agency.extend(position, return_date) {
            return self.report(&error);
        }

        if let Ok(contract) = self.agency.contract(position) {
            writeln!(
                self.out,
                "Rental now ends {} ({} days).",
                contract.return_date(),
                contract.duration_days()
            )?;
        }

        Ok(())
    }

    fn change_customer(&mut self) -> Result<(), ConsoleError> {
        let position = self.ask_position("Position of the customer")?;

        let customer = match self.agency.contract(position) {
            Ok(contract) => contract.customer().clone(),
            Err(error) => return self.report(&error),
        };

        writeln!(self.out, "Leave blank to keep the current value.")?;

        let update = ContactUpdate {
            name: self.ask_optional("Name", &customer.name)?,
            address: self.ask_optional("Address", &customer.address)?,
            phone: self.ask_optional("Phone number", &customer.phone)?,
        };

        if update.is_empty() {
            writeln!(self.out, "Nothing changed.")?;

            return Ok(());
        }

        match self.agency.update_contact(position, update) {
            Ok(()) => writeln!(self.out, "Customer information updated.")?,
            Err(error) => self.report(&error)?,
        }

        Ok(())
    }

    fn add_vehicle(&mut self) -> Result<(), ConsoleError> {
        let plate = self.ask("Licence plate")?;
        let brand = self.ask("Brand")?;
        let color = self.ask("Color")?;
        let condition = self.ask("Condition")?;

        match self
            .agency
            .register_vehicle(NewVehicle::new(plate.clone(), brand, color, condition))
        {
            Ok(()) => writeln!(self.out, "Vehicle {plate} added.")?,
            Err(error) => self.report(&error)?,
        }

        Ok(())
    }

    fn retire_vehicle(&mut self) -> Result<(), ConsoleError> {
        let plate = self.ask("Licence plate")?;

        match self.agency.retire_vehicle(&plate) {
            Ok(vehicle) => writeln!(
                self.out,
                "Vehicle {} ({}) retired.",
                vehicle.plate(),
                vehicle.brand()
            )?,
            Err(error) => self.report(&error)?,
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use testresult::TestResult;

    use crate::{
        agency::Agency, archive::MemoryArchive, fixtures::FleetFixture, pricing::amount,
    };

    use super::*;

    type TestConsole = Console<Cursor<Vec<u8>>, Vec<u8>, MemoryArchive>;

    fn console(script: &str) -> Result<TestConsole, Box<dyn std::error::Error>> {
        let fleet = FleetFixture::default_fleet()?.into_fleet()?;

        Ok(Console::new(
            Agency::new(fleet),
            MemoryArchive::new(),
            Cursor::new(script.as_bytes().to_vec()),
            Vec::new(),
        ))
    }

    fn output(console: TestConsole) -> Result<String, std::string::FromUtf8Error> {
        String::from_utf8(console.out)
    }

    #[test]
    fn menu_numbers() {
        assert_eq!("1".parse(), Ok(MenuChoice::AddCustomer));
        assert_eq!(" 10 ".parse(), Ok(MenuChoice::ChangeCustomer));
        assert_eq!("12".parse(), Ok(MenuChoice::RetireVehicle));
        assert_eq!("0".parse(), Ok(MenuChoice::Exit));
        assert_eq!("13".parse::<MenuChoice>(), Err(()));
    }

    #[test]
    fn invalid_choice_keeps_running() -> TestResult {
        let mut console = console("42\n0\n")?;

        console.run()?;

        let text = output(console)?;

        assert!(text.contains("Invalid choice!"));
        assert!(text.contains("Goodbye"));

        Ok(())
    }

    #[test]
    fn invalid_date_is_reprompted() -> TestResult {
        let mut console = console(
            "1\nAn\nHanoi\n090\nToyota\nTrip\n4-seater\n4S1234\n01/01/2024\n2024-01-01\n2024-01-04\n0\n",
        )?;

        console.run()?;

        assert_eq!(console.agency().contracts().len(), 1);
        assert!(output(console)?.contains("expected a date like"));

        Ok(())
    }

    #[test]
    fn extend_rental_moves_return_date() -> TestResult {
        let mut console = console(
            "1\nAn\nHanoi\n090\nToyota\n\n4-seater\n4S1234\n2024-01-01\n2024-01-04\n9\n1\n2024-01-08\n0\n",
        )?;

        console.run()?;

        assert_eq!(
            console.agency().contract(1)?.base_cost(),
            amount(7_000)
        );

        Ok(())
    }

    #[test]
    fn change_customer_keeps_blank_fields() -> TestResult {
        let mut console = console(
            "1\nAn\nHanoi\n090\nToyota\n\n4-seater\n4S1234\n2024-01-01\n2024-01-04\n10\n1\n\nDa Nang\n\n0\n",
        )?;

        console.run()?;

        let customer = console.agency().contract(1)?.customer().clone();

        assert_eq!(customer, Customer::new("An", "Da Nang", "090"));

        Ok(())
    }

    #[test]
    fn unknown_tier_bills_no_insurance() -> TestResult {
        let mut console = console(
            "1\nAn\nHanoi\n090\nToyota\n\n4-seater\n4S1234\n2024-01-01\n2024-01-04\n3\n1\ny\nZ\n0\n",
        )?;

        console.run()?;

        let record = console.archive().records().first().cloned();

        assert_eq!(record.map(|r| r.tier), Some(DamageTier::None));
        assert!(output(console)?.contains("unknown damage tier 'Z'"));

        Ok(())
    }

    #[test]
    fn add_then_retire_vehicle() -> TestResult {
        let mut console = console("11\n4S0001\nKia\nGrey\nGood\n11\n4S0001\nKia\nGrey\nGood\n12\n4S1234\n0\n")?;

        console.run()?;

        let fleet = console.agency().vehicles();

        assert!(fleet.get("4S0001").is_ok());
        assert!(fleet.get("4S1234").is_err());
        assert_eq!(fleet.len(), 4);
        assert!(output(console)?.contains("already exists"));

        Ok(())
    }
}
