/// Nova3D Engine - process-wide logging front
///
/// The frame pipeline (Scene update, RenderSystem draw) is single-threaded
/// and owns its own state; the only process-wide state is the logger and
/// the minimum severity filter, both reachable through `Engine`.

use std::sync::{OnceLock, RwLock};
use std::sync::atomic::{AtomicU8, Ordering};
use std::time::SystemTime;
use crate::log::{Logger, LogEntry, LogSeverity, DefaultLogger};

/// Global logger (initialized with DefaultLogger on first use)
static LOGGER: OnceLock<RwLock<Box<dyn Logger>>> = OnceLock::new();

/// Entries below this severity are dropped before reaching the logger
static MIN_SEVERITY: AtomicU8 = AtomicU8::new(0);

fn logger_lock() -> &'static RwLock<Box<dyn Logger>> {
    LOGGER.get_or_init(|| RwLock::new(Box::new(DefaultLogger)))
}

/// Engine-wide logging facade
///
/// # Example
///
/// ```no_run
/// use nova_3d_engine::nova3d::{Engine, log::{Logger, LogEntry, LogSeverity}};
///
/// struct FileLogger;
/// impl Logger for FileLogger {
///     fn log(&self, entry: &LogEntry) {
///         // Write to file...
///     }
/// }
///
/// Engine::set_logger(FileLogger);
/// Engine::set_min_severity(LogSeverity::Info);
/// ```
pub struct Engine;

impl Engine {
    /// Replace the current logger
    pub fn set_logger<L: Logger + 'static>(logger: L) {
        if let Ok(mut lock) = logger_lock().write() {
            *lock = Box::new(logger);
        }
    }

    /// Restore the default colored console logger
    pub fn reset_logger() {
        if let Ok(mut lock) = logger_lock().write() {
            *lock = Box::new(DefaultLogger);
        }
    }

    /// Drop every entry below `severity`
    pub fn set_min_severity(severity: LogSeverity) {
        MIN_SEVERITY.store(severity.as_u8(), Ordering::Relaxed);
    }

    /// Current minimum severity
    pub fn min_severity() -> LogSeverity {
        LogSeverity::from_u8(MIN_SEVERITY.load(Ordering::Relaxed))
    }

    /// Log without source location (used by engine_trace! .. engine_warn!)
    pub fn log(severity: LogSeverity, source: &str, message: String) {
        Self::dispatch(severity, source, message, None, None);
    }

    /// Log with file:line (used by engine_error!)
    pub fn log_detailed(
        severity: LogSeverity,
        source: &str,
        message: String,
        file: &'static str,
        line: u32,
    ) {
        Self::dispatch(severity, source, message, Some(file), Some(line));
    }

    fn dispatch(
        severity: LogSeverity,
        source: &str,
        message: String,
        file: Option<&'static str>,
        line: Option<u32>,
    ) {
        if severity < Self::min_severity() {
            return;
        }
        if let Ok(lock) = logger_lock().read() {
            lock.log(&LogEntry {
                severity,
                timestamp: SystemTime::now(),
                source: source.to_string(),
                message,
                file,
                line,
            });
        }
    }
}

#[cfg(test)]
#[path = "engine_tests.rs"]
mod tests;
