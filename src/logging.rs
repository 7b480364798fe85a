#![cfg(feature = "std")]

use std::env;
use log::{self, LevelFilter, Metadata, Record};

/// Environment variable holding the log level (`error` .. `trace`, or `off`).
pub const LOG_ENV: &str = "BROADSIDE_LOG";

struct SimpleLogger;

impl log::Log for SimpleLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record) {
        // stderr keeps the console board output clean
        if self.enabled(record.metadata()) {
            eprintln!("{} - {}", record.level(), record.args());
        }
    }

    fn flush(&self) {}
}

static LOGGER: SimpleLogger = SimpleLogger;

/// Initialize logging with a level taken from the `BROADSIDE_LOG` environment variable.
/// Defaults to `info` if the variable is not set or invalid.
pub fn init_logging() {
    init_logging_with_default(LevelFilter::Info);
}

/// Like [`init_logging`] but with a caller-chosen fallback level.
pub fn init_logging_with_default(default: LevelFilter) {
    let level = env::var(LOG_ENV)
        .ok()
        .and_then(|lvl| lvl.parse().ok())
        .unwrap_or(default);
    let _ = log::set_logger(&LOGGER).map(|()| log::set_max_level(level));
}
