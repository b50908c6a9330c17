//! `clearing-prices` library crate.
//!
//! The binary (`prices`) is a thin wrapper around this library so that:
//!
//! - the pipeline is testable without spawning processes or touching the network
//! - each stage (fetch, extract, aggregate, forecast, report) is reusable on its own

pub mod aggregate;
pub mod app;
pub mod cli;
pub mod data;
pub mod domain;
pub mod error;
pub mod io;
pub mod math;
pub mod models;
pub mod report;

#[cfg(test)]
mod test_support;
