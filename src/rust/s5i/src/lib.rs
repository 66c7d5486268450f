// Copyright 2025 Zurich Instruments AG
// SPDX-License-Identifier: Apache-2.0

//! Adapter for the QuTech S5i RF generator module of the SPI rack.
//!
//! Communication with the module is left to the vendor SDK, which enters
//! through [`S5iModule`]. This crate owns the parameter ranges and the
//! startup sequence.

pub mod driver;
pub mod module;

pub use driver::{Idn, S5i, S5iSettings};
pub use module::{S5iModule, S5iModuleFactory};

#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("The {sdk} SDK could not be found. Try installing it using {hint}")]
    MissingDependency {
        sdk: &'static str,
        hint: &'static str,
    },
    #[error("{parameter} = {value} {unit} is outside of [{min}, {max}] {unit}")]
    OutOfRange {
        parameter: &'static str,
        value: f64,
        min: f64,
        max: f64,
        unit: &'static str,
    },
    #[error(transparent)]
    Anyhow(#[from] anyhow::Error),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
