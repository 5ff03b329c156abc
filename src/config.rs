//! Counter configuration module

use std::path::PathBuf;

use clap::Parser;

/// Rental counter configuration
#[derive(Debug, Parser)]
#[command(name = "rentdesk", about = "Car rental counter", long_about = None)]
pub struct RentalConfig {
    /// File whose first line is the clerk password
    #[arg(long, env = "RENTDESK_PASSWORD_FILE", default_value = "pass.txt")]
    pub password_file: PathBuf,

    /// File that removed customers are appended to
    #[arg(long, env = "RENTDESK_ARCHIVE_FILE", default_value = "savedcustomer.txt")]
    pub archive_file: PathBuf,

    /// YAML fleet definition; the built-in fleet is used when omitted
    #[arg(long, env = "RENTDESK_FLEET_FILE")]
    pub fleet_file: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, env = "RUST_LOG", default_value = "warn")]
    pub log_level: String,
}

impl RentalConfig {
    /// Load configuration from environment and CLI arguments
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be parsed
    pub fn load() -> Result<Self, clap::Error> {
        _ = dotenvy::dotenv();

        Self::try_parse()
    }
}
