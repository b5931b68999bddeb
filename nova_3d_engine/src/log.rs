//! Internal logging system for Nova3D Engine
//!
//! This module provides:
//! - Customizable logger via the `Logger` trait
//! - Severity levels (Trace, Debug, Info, Warn, Error) with a global minimum filter
//! - Colored console output by default
//! - File and line information for ERROR logs
//!
//! The engine runs its frame loop on a single thread, but the logger can be
//! replaced from anywhere, so it is stored behind an `RwLock` in `Engine`.

use colored::*;
use std::time::SystemTime;
use chrono::{DateTime, Local};

/// Logger trait for custom logging implementations
///
/// # Example
///
/// ```no_run
/// use nova_3d_engine::nova3d::log::{Logger, LogEntry};
///
/// struct FrameLogger;
///
/// impl Logger for FrameLogger {
///     fn log(&self, entry: &LogEntry) {
///         eprintln!("{}", entry.message);
///     }
/// }
/// ```
pub trait Logger: Send + Sync {
    /// Log an entry
    fn log(&self, entry: &LogEntry);
}

/// Log entry containing all information about a log message
#[derive(Debug, Clone)]
pub struct LogEntry {
    /// Severity level
    pub severity: LogSeverity,

    /// Timestamp when the log was created
    pub timestamp: SystemTime,

    /// Source component (e.g., "nova3d::Scene", "nova3d::PipelineManager")
    pub source: String,

    /// Log message
    pub message: String,

    /// Source file (only for ERROR logs)
    pub file: Option<&'static str>,

    /// Source line (only for ERROR logs)
    pub line: Option<u32>,
}

/// Log severity levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum LogSeverity {
    /// Per-entity / per-draw detail (culling decisions, cache hits)
    Trace,

    /// Development information (degenerate frustum planes, cache misses)
    Debug,

    /// Lifecycle events
    Info,

    /// Recovered problems (shader fallback, unknown vertex layout)
    Warn,

    /// Failures, logged with file:line
    Error,
}

impl LogSeverity {
    /// Fixed-width label used by the default logger
    pub fn label(&self) -> &'static str {
        match self {
            LogSeverity::Trace => "TRACE",
            LogSeverity::Debug => "DEBUG",
            LogSeverity::Info => "INFO ",
            LogSeverity::Warn => "WARN ",
            LogSeverity::Error => "ERROR",
        }
    }

    pub(crate) fn as_u8(self) -> u8 {
        self as u8
    }

    pub(crate) fn from_u8(value: u8) -> Self {
        match value {
            0 => LogSeverity::Trace,
            1 => LogSeverity::Debug,
            2 => LogSeverity::Info,
            3 => LogSeverity::Warn,
            _ => LogSeverity::Error,
        }
    }
}

/// Default logger implementation using colored console output
///
/// Format:
/// - Normal: `[timestamp] [SEVERITY] [source] message`
/// - Error: `[timestamp] [ERROR] [source] message (file:line)`
///
/// Warnings and errors go to stderr, everything else to stdout.
pub struct DefaultLogger;

impl Logger for DefaultLogger {
    fn log(&self, entry: &LogEntry) {
        let datetime: DateTime<Local> = entry.timestamp.into();
        let timestamp = datetime.format("%Y-%m-%d %H:%M:%S%.3f").to_string();

        let label = entry.severity.label();
        let severity_str = match entry.severity {
            LogSeverity::Trace => label.bright_black(),
            LogSeverity::Debug => label.cyan(),
            LogSeverity::Info => label.green(),
            LogSeverity::Warn => label.yellow(),
            LogSeverity::Error => label.red().bold(),
        };
        let source = entry.source.bright_blue();

        let line = match (entry.file, entry.line) {
            (Some(file), Some(line)) => format!(
                "[{}] [{}] [{}] {} ({}:{})",
                timestamp, severity_str, source, entry.message, file, line
            ),
            _ => format!(
                "[{}] [{}] [{}] {}",
                timestamp, severity_str, source, entry.message
            ),
        };

        if entry.severity >= LogSeverity::Warn {
            eprintln!("{}", line);
        } else {
            println!("{}", line);
        }
    }
}

// ===== LOGGING MACROS =====

/// Log a TRACE message
///
/// ```no_run
/// # use nova_3d_engine::engine_trace;
/// engine_trace!("nova3d::Scene", "Culled entity {}", 42);
/// ```
#[macro_export]
macro_rules! engine_trace {
    ($source:expr, $($arg:tt)*) => {
        $crate::nova3d::Engine::log(
            $crate::nova3d::log::LogSeverity::Trace,
            $source,
            format!($($arg)*)
        )
    };
}

/// Log a DEBUG message
#[macro_export]
macro_rules! engine_debug {
    ($source:expr, $($arg:tt)*) => {
        $crate::nova3d::Engine::log(
            $crate::nova3d::log::LogSeverity::Debug,
            $source,
            format!($($arg)*)
        )
    };
}

/// Log an INFO message
#[macro_export]
macro_rules! engine_info {
    ($source:expr, $($arg:tt)*) => {
        $crate::nova3d::Engine::log(
            $crate::nova3d::log::LogSeverity::Info,
            $source,
            format!($($arg)*)
        )
    };
}

/// Log a WARN message
///
/// ```no_run
/// # use nova_3d_engine::engine_warn;
/// engine_warn!("nova3d::ShaderLibrary", "Unknown shader '{}', using default", "toon");
/// ```
#[macro_export]
macro_rules! engine_warn {
    ($source:expr, $($arg:tt)*) => {
        $crate::nova3d::Engine::log(
            $crate::nova3d::log::LogSeverity::Warn,
            $source,
            format!($($arg)*)
        )
    };
}

/// Log an ERROR message with file:line information
#[macro_export]
macro_rules! engine_error {
    ($source:expr, $($arg:tt)*) => {
        $crate::nova3d::Engine::log_detailed(
            $crate::nova3d::log::LogSeverity::Error,
            $source,
            format!($($arg)*),
            file!(),
            line!()
        )
    };
}

#[cfg(test)]
#[path = "log_tests.rs"]
mod tests;
