//! Rentdesk counter terminal

use std::{
    io::{self, Write},
    process::ExitCode,
};

use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use rentdesk::{
    agency::Agency,
    archive::FileArchive,
    auth::PasswordFile,
    config::RentalConfig,
    console::{Console, ConsoleError},
    fixtures::{FixtureError, FleetFixture},
    fleet::Fleet,
};

fn main() -> ExitCode {
    let config = match RentalConfig::load() {
        Ok(config) => config,
        Err(error) => {
            _ = error.print();

            return ExitCode::from(2);
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log_level)),
        )
        .with_writer(io::stderr)
        .init();

    let fleet = match load_fleet(&config) {
        Ok(fleet) => fleet,
        Err(error) => {
            error!(%error, "failed to load fleet");

            return ExitCode::FAILURE;
        }
    };

    let gate = match PasswordFile::load(&config.password_file) {
        Ok(gate) => gate,
        Err(error) => {
            error!(%error, "password file unavailable, access denied");

            return deny();
        }
    };

    let stdin = io::stdin();
    let stdout = io::stdout();

    let mut console = Console::new(
        Agency::new(fleet),
        FileArchive::new(&config.archive_file),
        stdin.lock(),
        stdout.lock(),
    );

    match run(&mut console, &gate) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(error) => {
            error!(%error, "console session failed");

            ExitCode::FAILURE
        }
    }
}

fn load_fleet(config: &RentalConfig) -> Result<Fleet, FixtureError> {
    let fixture = match &config.fleet_file {
        Some(path) => {
            info!(path = %path.display(), "loading fleet");

            FleetFixture::from_path(path)?
        }
        None => FleetFixture::default_fleet()?,
    };

    fixture.into_fleet()
}

fn run<R, W>(
    console: &mut Console<R, W, FileArchive>,
    gate: &PasswordFile,
) -> Result<bool, ConsoleError>
where
    R: io::BufRead,
    W: Write,
{
    if !console.authenticate(gate)? {
        return Ok(false);
    }

    console.run()?;

    Ok(true)
}

fn deny() -> ExitCode {
    let mut stdout = io::stdout();

    _ = writeln!(stdout, "Incorrect password. Exiting.");

    ExitCode::FAILURE
}
