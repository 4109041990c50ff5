// Copyright 2025 the Parley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Routing of log records to an injected host logger or the `log` facade.

use core::fmt;

use log::{Level, Log, Metadata, Record};

/// Target used for every record this crate emits.
pub const LOG_TARGET: &str = "text_texture";

/// Sends records to the host logger when one was injected, otherwise to
/// whatever logger is installed globally.
#[derive(Default)]
pub(crate) struct Diagnostics {
    host: Option<Box<dyn Log>>,
}

impl fmt::Debug for Diagnostics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Diagnostics")
            .field("host", &self.host.is_some())
            .finish()
    }
}

impl Diagnostics {
    pub(crate) fn new(host: Option<Box<dyn Log>>) -> Self {
        Self { host }
    }

    fn emit(&self, level: Level, args: fmt::Arguments<'_>) {
        let metadata = Metadata::builder().level(level).target(LOG_TARGET).build();
        let record = Record::builder()
            .metadata(metadata)
            .args(args)
            .module_path_static(Some(module_path!()))
            .build();
        match &self.host {
            Some(host) => {
                if host.enabled(record.metadata()) {
                    host.log(&record);
                }
            }
            None => {
                if level <= log::max_level() {
                    let logger = log::logger();
                    if logger.enabled(record.metadata()) {
                        logger.log(&record);
                    }
                }
            }
        }
    }

    pub(crate) fn warn(&self, args: fmt::Arguments<'_>) {
        self.emit(Level::Warn, args);
    }

    pub(crate) fn debug(&self, args: fmt::Arguments<'_>) {
        self.emit(Level::Debug, args);
    }

    pub(crate) fn trace(&self, args: fmt::Arguments<'_>) {
        self.emit(Level::Trace, args);
    }

    /// Flushes the host logger, if any.
    pub(crate) fn flush(&self) {
        if let Some(host) = &self.host {
            host.flush();
        }
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    /// Collects formatted records for assertions.
    #[derive(Clone, Default)]
    pub(crate) struct CaptureLogger {
        pub(crate) records: Arc<Mutex<Vec<(Level, String, String)>>>,
    }

    impl Log for CaptureLogger {
        fn enabled(&self, _metadata: &Metadata<'_>) -> bool {
            true
        }

        fn log(&self, record: &Record<'_>) {
            let entry = (
                record.level(),
                record.target().to_owned(),
                record.args().to_string(),
            );
            self.records.lock().unwrap().push(entry);
        }

        fn flush(&self) {}
    }

    #[test]
    fn host_logger_receives_records() {
        let capture = CaptureLogger::default();
        let diagnostics = Diagnostics::new(Some(Box::new(capture.clone())));
        diagnostics.warn(format_args!("disk is {}", "full"));
        diagnostics.trace(format_args!("scan"));

        let records = capture.records.lock().unwrap();
        assert_eq!(records.len(), 2);
        let (level, target, message) = &records[0];
        assert_eq!(*level, Level::Warn);
        assert_eq!(target, LOG_TARGET);
        assert_eq!(message, "disk is full");
        assert_eq!(records[1].0, Level::Trace);
    }

    #[test]
    fn missing_host_is_fine() {
        let diagnostics = Diagnostics::default();
        diagnostics.debug(format_args!("nobody listens"));
        diagnostics.flush();
    }
}
