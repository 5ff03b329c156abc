//! Error kinds
//!
//! Every module reports its own error enum; this is the shared classification
//! the console uses to decide how to word a failure.

use std::fmt;

/// Broad category of a recoverable failure.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Unrecognized category, damage tier, discount rate or similar input.
    InvalidInput,

    /// No vehicle or maintenance task matches.
    NotFound,

    /// The vehicle exists but is currently rented.
    VehicleUnavailable,

    /// A registry position is outside `[1, len]`.
    OutOfRange,

    /// Reading or writing an external file failed.
    Storage,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            ErrorKind::InvalidInput => "invalid input",
            ErrorKind::NotFound => "not found",
            ErrorKind::VehicleUnavailable => "vehicle unavailable",
            ErrorKind::OutOfRange => "out of range",
            ErrorKind::Storage => "storage",
        };

        f.write_str(label)
    }
}
