//! Core domain + application logic for the currency bot.
//!
//! This crate is intentionally framework-agnostic. Telegram and the rate
//! provider live behind ports (traits) implemented in adapter crates.

pub mod chart;
pub mod command;
pub mod config;
pub mod dispatcher;
pub mod domain;
pub mod engine;
pub mod errors;
pub mod favorites;
pub mod formatting;
pub mod logging;
pub mod messaging;
pub mod ports;

pub use errors::{Error, Result};
