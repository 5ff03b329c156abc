//! Prompt helpers

use std::{
    io::{BufRead, Write},
    str::FromStr,
};

use decimal_percentage::Percentage;
use jiff::civil::Date;
use rust_decimal::Decimal;

use super::{Console, ConsoleError};
use crate::archive::ContractArchive;

impl<R: BufRead, W: Write, A: ContractArchive> Console<R, W, A> {
    /// Reads one line without its line ending.
    ///
    /// Bytes that are not valid UTF-8 are replaced with `U+FFFD`.
    pub(super) fn read_line(&mut self) -> Result<String, ConsoleError> {
        let mut line = Vec::new();

        if self.input.read_until(b'\n', &mut line)? == 0 {
            return Err(ConsoleError::InputClosed);
        }

        Ok(String::from_utf8_lossy(&line)
            .trim_end_matches(['\r', '\n'])
            .to_string())
    }

    /// Prints `label: ` and reads a trimmed answer.
    pub(super) fn ask(&mut self, label: &str) -> Result<String, ConsoleError> {
        write!(self.out, "{label}: ")?;
        self.out.flush()?;

        Ok(self.read_line()?.trim().to_string())
    }

    /// Asks until the answer parses.
    pub(super) fn ask_parsed<T: FromStr>(
        &mut self,
        label: &str,
        hint: &str,
    ) -> Result<T, ConsoleError> {
        loop {
            let answer = self.ask(label)?;

            if let Ok(value) = answer.parse::<T>() {
                return Ok(value);
            }

            writeln!(self.out, "Invalid value '{answer}', {hint}.")?;
        }
    }

    /// Asks for a `YYYY-MM-DD` date until one parses.
    pub(super) fn ask_date(&mut self, label: &str) -> Result<Date, ConsoleError> {
        self.ask_parsed(&format!("{label} (YYYY-MM-DD)"), "expected a date like 2024-01-31")
    }

    /// Asks for a 1-based list position.
    pub(super) fn ask_position(&mut self, label: &str) -> Result<usize, ConsoleError> {
        self.ask_parsed(label, "expected a whole number")
    }

    /// Asks for a discount written as a fraction (`0.1`) or in percent (`10%`).
    pub(super) fn ask_discount(&mut self) -> Result<Percentage, ConsoleError> {
        loop {
            let answer = self.ask("VIP discount rate (e.g. 0.1 for 10%)")?;

            if let Some(rate) = parse_discount(&answer) {
                return Ok(rate);
            }

            writeln!(self.out, "Invalid rate '{answer}', expected e.g. 0.1 or 10%.")?;
        }
    }

    /// Asks a yes/no question until answered.
    pub(super) fn ask_yes_no(&mut self, label: &str) -> Result<bool, ConsoleError> {
        loop {
            let answer = self.ask(&format!("{label} (y/n)"))?;

            match answer.to_ascii_lowercase().as_str() {
                "y" | "yes" => return Ok(true),
                "n" | "no" => return Ok(false),
                _ => writeln!(self.out, "Please answer y or n.")?,
            }
        }
    }

    /// Asks for a replacement value; blank keeps the current one.
    pub(super) fn ask_optional(
        &mut self,
        label: &str,
        current: &str,
    ) -> Result<Option<String>, ConsoleError> {
        let answer = self.ask(&format!("{label} [{current}]"))?;

        Ok((!answer.is_empty()).then_some(answer))
    }
}

fn parse_discount(answer: &str) -> Option<Percentage> {
    let (number, scale) = match answer.strip_suffix('%') {
        Some(points) => (points.trim(), Decimal::ONE_HUNDRED),
        None => (answer, Decimal::ONE),
    };

    let value = Decimal::from_str(number).ok()?;

    Some(Percentage::from(value.checked_div(scale)?))
}
