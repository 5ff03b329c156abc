//! Car categories
//!
//! The pricing class of a vehicle. The registry is fixed: categories cannot be
//! added or re-priced at runtime.

use std::{fmt, str::FromStr};

use thiserror::Error;

use crate::{
    errors::ErrorKind,
    pricing::{Amount, amount},
};

/// Errors raised when resolving a category name.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CategoryError {
    /// The name does not match any known category.
    #[error("unknown car category '{0}' (expected 4-seater or 7-seater)")]
    Unknown(String),
}

impl CategoryError {
    /// Error category for callers that only need the broad kind.
    pub fn kind(&self) -> ErrorKind {
        ErrorKind::InvalidInput
    }
}

/// Rental class of a vehicle.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum CarCategory {
    /// Four seats, 1000 per day.
    FourSeater,

    /// Seven seats, 2000 per day.
    SevenSeater,
}

impl CarCategory {
    /// All categories, cheapest first.
    pub const ALL: [CarCategory; 2] = [CarCategory::FourSeater, CarCategory::SevenSeater];

    /// Unique category name, as entered at intake.
    pub const fn name(self) -> &'static str {
        match self {
            CarCategory::FourSeater => "4-seater",
            CarCategory::SevenSeater => "7-seater",
        }
    }

    /// Fixed daily rental rate.
    pub fn daily_rate(self) -> Amount {
        match self {
            CarCategory::FourSeater => amount(1_000),
            CarCategory::SevenSeater => amount(2_000),
        }
    }
}

impl fmt::Display for CarCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for CarCategory {
    type Err = CategoryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = s.trim();

        CarCategory::ALL
            .into_iter()
            .find(|category| category.name() == name)
            .ok_or_else(|| CategoryError::Unknown(name.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use super::*;

    #[test]
    fn daily_rates_match_price_list() {
        assert_eq!(CarCategory::FourSeater.daily_rate(), amount(1_000));
        assert_eq!(CarCategory::SevenSeater.daily_rate(), amount(2_000));
    }

    #[test]
    fn parses_known_names() -> TestResult {
        assert_eq!("4-seater".parse::<CarCategory>()?, CarCategory::FourSeater);
        assert_eq!(" 7-seater ".parse::<CarCategory>()?, CarCategory::SevenSeater);

        Ok(())
    }

    #[test]
    fn rejects_unknown_names() {
        let result = "9-seater".parse::<CarCategory>();

        assert_eq!(result, Err(CategoryError::Unknown("9-seater".to_string())));
        assert!(
            matches!(result, Err(ref error) if error.kind() == ErrorKind::InvalidInput),
            "unknown category should be invalid input"
        );
    }

    #[test]
    fn display_round_trips_name() -> TestResult {
        for category in CarCategory::ALL {
            assert_eq!(category.to_string().parse::<CarCategory>()?, category);
        }

        Ok(())
    }
}
