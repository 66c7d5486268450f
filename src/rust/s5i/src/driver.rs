// Copyright 2025 Zurich Instruments AG
// SPDX-License-Identifier: Apache-2.0

use driver_log::info;

use crate::module::{S5iModule, S5iModuleFactory};
use crate::{Error, Result};

const MIN_FREQUENCY: f64 = 40e6;
const MAX_FREQUENCY: f64 = 4e9;
const MIN_POWER: f64 = -14.0;
const MAX_POWER: f64 = 20.0;

const SDK_NAME: &str = "spirack";
const SDK_INSTALL_HINT: &str = "pip install spirack";

/// Startup state of the module.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct S5iSettings {
    /// RF frequency in Hz.
    pub frequency: f64,
    pub enable_output: bool,
    /// RF output level in dBm.
    pub output_level: f64,
}

impl Default for S5iSettings {
    fn default() -> Self {
        S5iSettings {
            frequency: 41e6,
            enable_output: true,
            output_level: 0.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Idn {
    pub vendor: String,
    pub model: String,
    pub serial: String,
    pub firmware: String,
}

fn check_range(
    parameter: &'static str,
    value: f64,
    min: f64,
    max: f64,
    unit: &'static str,
) -> Result<()> {
    if !(min..=max).contains(&value) {
        return Err(Error::OutOfRange {
            parameter,
            value,
            min,
            max,
            unit,
        });
    }
    Ok(())
}

/// S5i RF generator module.
///
/// Output state and power level cannot be read back from the module; their
/// getters return the last value set.
pub struct S5i<M: S5iModule> {
    name: String,
    module: M,
    output_enabled: bool,
    power: f64,
}

impl<M: S5iModule> S5i<M> {
    /// Open module number `module` through the vendor SDK.
    ///
    /// Fails with [`Error::MissingDependency`] before any communication if the
    /// SDK is not available.
    pub fn connect<F, S>(name: S, factory: &F, module: u8, settings: S5iSettings) -> Result<Self>
    where
        F: S5iModuleFactory<Module = M>,
        S: Into<String>,
    {
        if !factory.sdk_available() {
            return Err(Error::MissingDependency {
                sdk: SDK_NAME,
                hint: SDK_INSTALL_HINT,
            });
        }
        check_range("frequency", settings.frequency, MIN_FREQUENCY, MAX_FREQUENCY, "Hz")?;
        check_range("power", settings.output_level, MIN_POWER, MAX_POWER, "dBm")?;
        let handle = factory.open(module, &settings)?;
        let name = name.into();
        info!("Connected S5i '{}' on SPI rack module {}", name, module);
        Ok(S5i {
            name,
            module: handle,
            output_enabled: settings.enable_output,
            power: settings.output_level,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn output_enabled(&self) -> bool {
        self.output_enabled
    }

    /// Switch the RF output on or off.
    pub fn set_output_enabled(&mut self, enable: bool) -> Result<()> {
        self.module.enable_output(enable)?;
        self.output_enabled = enable;
        info!("{}: output_enabled = {}", self.name, enable);
        Ok(())
    }

    /// RF frequency in Hz.
    pub fn frequency(&self) -> f64 {
        self.module.rf_frequency()
    }

    pub fn set_frequency(&mut self, frequency: f64) -> Result<()> {
        check_range("frequency", frequency, MIN_FREQUENCY, MAX_FREQUENCY, "Hz")?;
        self.module.set_frequency(frequency)?;
        info!("{}: frequency = {} Hz", self.name, frequency);
        Ok(())
    }

    /// Output power in dBm.
    pub fn power(&self) -> f64 {
        self.power
    }

    pub fn set_power(&mut self, level: f64) -> Result<()> {
        check_range("power", level, MIN_POWER, MAX_POWER, "dBm")?;
        self.module.set_output_power(level)?;
        self.power = level;
        info!("{}: power = {} dBm", self.name, level);
        Ok(())
    }

    /// Frequency step size in Hz.
    pub fn frequency_stepsize(&self) -> f64 {
        self.module.stepsize()
    }

    /// Smaller step sizes give higher phase noise.
    pub fn set_frequency_stepsize(&mut self, stepsize: f64) -> Result<()> {
        if !stepsize.is_finite() {
            return Err(Error::OutOfRange {
                parameter: "frequency_stepsize",
                value: stepsize,
                min: f64::MIN,
                max: f64::MAX,
                unit: "Hz",
            });
        }
        self.module.set_stepsize(stepsize)?;
        info!("{}: frequency_stepsize = {} Hz", self.name, stepsize);
        Ok(())
    }

    /// Use the largest step size that reaches the current RF frequency.
    pub fn optimize_for_frequency(&mut self) -> Result<()> {
        let stepsize = self.module.optimal_stepsize(self.module.rf_frequency());
        self.set_frequency_stepsize(stepsize)
    }

    pub fn idn(&self) -> Idn {
        Idn {
            vendor: "QuTech".to_string(),
            model: "S5i".to_string(),
            serial: String::new(),
            firmware: String::new(),
        }
    }
}
