// Copyright 2025 Zurich Instruments AG
// SPDX-License-Identifier: Apache-2.0

use crate::Result;
use crate::driver::S5iSettings;

/// Operations of the vendor SDK on an opened S5i module.
///
/// Frequencies and step sizes are in Hz, power levels in dBm.
pub trait S5iModule {
    fn enable_output(&mut self, enable: bool) -> Result<()>;
    fn set_frequency(&mut self, frequency: f64) -> Result<()>;
    /// The RF frequency the module actually synthesizes.
    fn rf_frequency(&self) -> f64;
    fn set_output_power(&mut self, level: f64) -> Result<()>;
    fn set_stepsize(&mut self, stepsize: f64) -> Result<()>;
    fn stepsize(&self) -> f64;
    /// The largest step size that still reaches `frequency`, which gives the
    /// lowest phase noise.
    fn optimal_stepsize(&self, frequency: f64) -> f64;
}

/// Entry point of the vendor SDK.
pub trait S5iModuleFactory {
    type Module: S5iModule;

    /// Whether the SDK is installed and usable on this host.
    fn sdk_available(&self) -> bool;

    /// Open module number `module` on the SPI rack, applying `settings`.
    fn open(&self, module: u8, settings: &S5iSettings) -> Result<Self::Module>;
}
