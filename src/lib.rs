//! Rentdesk
//!
//! Rentdesk is the bookkeeping core of a car rental counter: fleet inventory,
//! rental contracts, maintenance schedules and billing, with a numbered-menu
//! console on top.

pub mod agency;
pub mod archive;
pub mod auth;
pub mod billing;
pub mod categories;
pub mod config;
pub mod console;
pub mod contracts;
pub mod discounts;
pub mod errors;
pub mod fixtures;
pub mod fleet;
pub mod maintenance;
pub mod prelude;
pub mod pricing;
pub mod receipt;
pub mod registry;
pub mod vehicles;
