// Copyright 2025 Zurich Instruments AG
// SPDX-License-Identifier: Apache-2.0

//! Logging front-end shared by the driver crates.
//!
//! All records go through the `log` facade with a target of the form
//! `drivers.rust::<module path>`, so a host can route driver output
//! independently of its own logging with [`is_driver_target`].

use std::sync::{atomic::AtomicBool, atomic::Ordering};

extern crate self as driver_log;

#[doc(hidden)]
pub use log as _log;

/// Prefix of the target of every record logged through this crate.
pub const TARGET_PREFIX: &str = "drivers.rust::";

/// Target for records logged from the calling module.
#[macro_export]
macro_rules! target {
    () => {
        concat!("drivers.rust::", module_path!())
    };
}

#[macro_export]
macro_rules! info {
    ($msg:literal, $($arg:tt)+) => {
        driver_log::_log::info!(target: driver_log::target!(), $msg, $($arg)+);
    };
    ($msg:literal) => {
        driver_log::_log::info!(target: driver_log::target!(), $msg);
    };
}

#[macro_export]
macro_rules! warn {
    ($msg:literal, $($arg:tt)+) => {
        driver_log::_log::warn!(target: driver_log::target!(), $msg, $($arg)+);
    };
    ($msg:literal) => {
        driver_log::_log::warn!(target: driver_log::target!(), $msg);
    };
}

/// Log a diagnostic message at debug level if diagnostics logging is enabled.
#[macro_export]
macro_rules! diagnostic {
    ($msg:literal, $($arg:tt)+) => {
        if driver_log::is_diagnostics_enabled() {
            driver_log::_log::debug!(target: driver_log::target!(), $msg, $($arg)+);
        }
    };
    ($msg:literal) => {
        if driver_log::is_diagnostics_enabled() {
            driver_log::_log::debug!(target: driver_log::target!(), $msg);
        }
    };
}

/// Whether a record with `target` was emitted by one of the driver crates.
pub fn is_driver_target(target: &str) -> bool {
    target.starts_with(TARGET_PREFIX)
}

static DIAGNOSTICS_ENABLED: AtomicBool = AtomicBool::new(false);

#[inline]
pub fn is_diagnostics_enabled() -> bool {
    DIAGNOSTICS_ENABLED.load(Ordering::Acquire)
}

/// Initialize the logging.
///
/// Only the diagnostics switch is owned here; the concrete logger is
/// installed by the host application through the `log` facade.
pub fn init_logging(with_diagnostics: bool) {
    DIAGNOSTICS_ENABLED.store(with_diagnostics, Ordering::Release);
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use log::{Level, LevelFilter, Log, Metadata, Record};

    use super::*;

    struct CaptureLogger {
        records: Mutex<Vec<(Level, String, String)>>,
    }

    impl Log for CaptureLogger {
        fn enabled(&self, _metadata: &Metadata<'_>) -> bool {
            true
        }

        fn log(&self, record: &Record<'_>) {
            self.records.lock().unwrap().push((
                record.level(),
                record.target().to_string(),
                record.args().to_string(),
            ));
        }

        fn flush(&self) {}
    }

    static LOGGER: CaptureLogger = CaptureLogger {
        records: Mutex::new(Vec::new()),
    };

    #[test]
    fn test_record_targets_and_diagnostics() {
        log::set_logger(&LOGGER).unwrap();
        log::set_max_level(LevelFilter::Trace);

        init_logging(false);
        info!("connected {}", 1);
        warn!("skipped");
        diagnostic!("hidden");
        init_logging(true);
        assert!(is_diagnostics_enabled());
        diagnostic!("shown {}", 2);
        init_logging(false);
        assert!(!is_diagnostics_enabled());

        let records = LOGGER.records.lock().unwrap().clone();
        let target = "drivers.rust::driver_log::tests";
        assert_eq!(
            records,
            vec![
                (Level::Info, target.to_string(), "connected 1".to_string()),
                (Level::Warn, target.to_string(), "skipped".to_string()),
                (Level::Debug, target.to_string(), "shown 2".to_string()),
            ]
        );
        assert!(records.iter().all(|(_, target, _)| is_driver_target(target)));
        assert!(target!().starts_with(TARGET_PREFIX));
    }

    #[test]
    fn test_is_driver_target() {
        assert!(is_driver_target("drivers.rust::seqc_program::csv_program"));
        assert!(!is_driver_target("laboneq.rust::codegenerator"));
        assert!(!is_driver_target("drivers"));
    }
}
