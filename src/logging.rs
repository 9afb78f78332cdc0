//! Process-wide log level for diagnostic messages.
//!
//! User-facing output goes through [`crate::output::Output`]; these macros
//! are for tracing what dflow does under the hood (git invocations, config
//! paths) and only show up with `--verbose`.

use std::sync::OnceLock;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum LogLevel {
    Error,
    Warning,
    Info,
    Debug,
}

static LOG_LEVEL: OnceLock<LogLevel> = OnceLock::new();

/// Set the level once at startup. Later calls are ignored.
pub fn init_logging(quiet: bool, verbose: bool) {
    let level = match (quiet, verbose) {
        (_, true) => LogLevel::Debug,
        (true, false) => LogLevel::Warning,
        (false, false) => LogLevel::Info,
    };
    LOG_LEVEL.set(level).ok();
}

pub fn get_log_level() -> LogLevel {
    *LOG_LEVEL.get().unwrap_or(&LogLevel::Info)
}

pub fn enabled(level: LogLevel) -> bool {
    level <= get_log_level()
}

pub fn log(level: LogLevel, message: &str) {
    if !enabled(level) {
        return;
    }
    // Diagnostics go to stderr so they never mix with machine-readable stdout
    // such as completion scripts.
    match level {
        LogLevel::Error => eprintln!("error: {message}"),
        LogLevel::Warning => eprintln!("warning: {message}"),
        LogLevel::Info => eprintln!("{message}"),
        LogLevel::Debug => eprintln!("debug: {message}"),
    }
}

#[macro_export]
macro_rules! log_error {
    ($($arg:tt)*) => {
        $crate::logging::log($crate::logging::LogLevel::Error, &format!($($arg)*))
    };
}

#[macro_export]
macro_rules! log_warning {
    ($($arg:tt)*) => {
        $crate::logging::log($crate::logging::LogLevel::Warning, &format!($($arg)*))
    };
}

#[macro_export]
macro_rules! log_info {
    ($($arg:tt)*) => {
        $crate::logging::log($crate::logging::LogLevel::Info, &format!($($arg)*))
    };
}

#[macro_export]
macro_rules! log_debug {
    ($($arg:tt)*) => {
        $crate::logging::log($crate::logging::LogLevel::Debug, &format!($($arg)*))
    };
}
