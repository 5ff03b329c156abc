//! Console
//!
//! Numbered menu for the counter clerk, driven over any line reader and
//! writer so sessions can be scripted in tests.

use std::io::{self, BufRead, Write};

use thiserror::Error;
use tracing::warn;

use crate::{agency::Agency, archive::ContractArchive, auth::PasswordFile, receipt::ReceiptError};

mod input;
mod menu;

/// Errors that end a console session.
#[derive(Debug, Error)]
pub enum ConsoleError {
    /// Reading from or writing to the terminal failed.
    #[error("terminal IO error: {0}")]
    Io(#[from] io::Error),

    /// A table or bill could not be rendered.
    #[error(transparent)]
    Receipt(#[from] ReceiptError),

    /// Input ended before the prompt was answered.
    #[error("input closed")]
    InputClosed,
}

/// Interactive session over a reader and a writer.
#[derive(Debug)]
pub struct Console<R, W, A> {
    agency: Agency,
    archive: A,
    input: R,
    out: W,
}

impl<R: BufRead, W: Write, A: ContractArchive> Console<R, W, A> {
    /// Creates a session.
    pub fn new(agency: Agency, archive: A, input: R, out: W) -> Self {
        Self {
            agency,
            archive,
            input,
            out,
        }
    }

    /// Session state.
    pub fn agency(&self) -> &Agency {
        &self.agency
    }

    /// Archive receiving removed contracts.
    pub fn archive(&self) -> &A {
        &self.archive
    }

    /// Asks once for the password.
    ///
    /// # Errors
    ///
    /// Returns an error if the terminal cannot be read or written.
    pub fn authenticate(&mut self, gate: &PasswordFile) -> Result<bool, ConsoleError> {
        let candidate = match self.ask("Enter password") {
            Ok(candidate) => candidate,
            Err(ConsoleError::InputClosed) => return Ok(false),
            Err(error) => return Err(error),
        };

        if gate.verify(&candidate) {
            return Ok(true);
        }

        warn!("wrong password entered");

        writeln!(self.out, "Incorrect password. Exiting.")?;

        Ok(false)
    }

    /// Runs the menu until the clerk exits or input ends.
    ///
    /// # Errors
    ///
    /// Returns an error if the terminal cannot be read or written.
    pub fn run(&mut self) -> Result<(), ConsoleError> {
        self.write_menu()?;

        loop {
            match self.step() {
                Ok(true) => {}
                Ok(false) | Err(ConsoleError::InputClosed) => break,
                Err(error) => return Err(error),
            }
        }

        writeln!(self.out, "Goodbye, have a nice day.")?;

        Ok(())
    }

    /// Consumes the session, returning its state.
    pub fn into_parts(self) -> (Agency, A) {
        (self.agency, self.archive)
    }
}
