//! Unit tests for the Engine logging facade
//!
//! IMPORTANT: the logger and the severity filter are process-wide.
//! All tests are marked with #[serial] and restore the defaults.

use crate::nova3d::Engine;
use crate::nova3d::log::{Logger, LogEntry, LogSeverity};
use std::sync::{Arc, Mutex};
use serial_test::serial;

// ============================================================================
// TEST HELPERS
// ============================================================================

/// Test logger that captures log entries for verification
struct TestLogger {
    entries: Arc<Mutex<Vec<LogEntry>>>,
}

impl TestLogger {
    fn new() -> (Self, Arc<Mutex<Vec<LogEntry>>>) {
        let entries = Arc::new(Mutex::new(Vec::new()));
        (Self { entries: entries.clone() }, entries)
    }
}

impl Logger for TestLogger {
    fn log(&self, entry: &LogEntry) {
        // Other tests may log concurrently; keep only this module's entries
        if entry.source == "nova3d::Test" {
            self.entries.lock().unwrap().push(entry.clone());
        }
    }
}

fn teardown() {
    Engine::reset_logger();
    Engine::set_min_severity(LogSeverity::Trace);
}

// ============================================================================
// LOGGER REPLACEMENT
// ============================================================================

#[test]
#[serial]
fn test_custom_logger_receives_logs() {
    let (logger, entries) = TestLogger::new();
    Engine::set_logger(logger);

    Engine::log(LogSeverity::Info, "nova3d::Test", "hello".to_string());

    let captured = entries.lock().unwrap().clone();
    teardown();

    assert_eq!(captured.len(), 1);
    assert_eq!(captured[0].source, "nova3d::Test");
    assert_eq!(captured[0].message, "hello");
    assert!(captured[0].file.is_none());
}

#[test]
#[serial]
fn test_log_detailed_carries_location() {
    let (logger, entries) = TestLogger::new();
    Engine::set_logger(logger);

    Engine::log_detailed(LogSeverity::Error, "nova3d::Test", "boom".to_string(), "x.rs", 12);

    let captured = entries.lock().unwrap().clone();
    teardown();

    assert_eq!(captured[0].file, Some("x.rs"));
    assert_eq!(captured[0].line, Some(12));
}

#[test]
#[serial]
fn test_reset_logger_detaches_custom_logger() {
    let (logger, entries) = TestLogger::new();
    Engine::set_logger(logger);
    Engine::reset_logger();

    Engine::log(LogSeverity::Info, "nova3d::Test", "to console".to_string());

    assert!(entries.lock().unwrap().is_empty());
    teardown();
}

#[test]
#[serial]
fn test_macros_route_through_engine() {
    let (logger, entries) = TestLogger::new();
    Engine::set_logger(logger);

    crate::engine_trace!("nova3d::Test", "trace {}", 1);
    crate::engine_debug!("nova3d::Test", "debug {}", 2);
    crate::engine_info!("nova3d::Test", "info {}", 3);
    crate::engine_warn!("nova3d::Test", "warn {}", 4);
    crate::engine_error!("nova3d::Test", "error {}", 5);

    let captured = entries.lock().unwrap().clone();
    teardown();

    let severities: Vec<LogSeverity> = captured.iter().map(|e| e.severity).collect();
    assert_eq!(severities, vec![
        LogSeverity::Trace,
        LogSeverity::Debug,
        LogSeverity::Info,
        LogSeverity::Warn,
        LogSeverity::Error,
    ]);
    assert_eq!(captured[4].message, "error 5");
    assert!(captured[4].file.is_some());
}

// ============================================================================
// SEVERITY FILTER
// ============================================================================

#[test]
#[serial]
fn test_min_severity_filters_lower_entries() {
    let (logger, entries) = TestLogger::new();
    Engine::set_logger(logger);
    Engine::set_min_severity(LogSeverity::Warn);

    crate::engine_debug!("nova3d::Test", "hidden");
    crate::engine_info!("nova3d::Test", "hidden");
    crate::engine_warn!("nova3d::Test", "shown");

    let captured = entries.lock().unwrap().clone();
    let min = Engine::min_severity();
    teardown();

    assert_eq!(min, LogSeverity::Warn);
    assert_eq!(captured.len(), 1);
    assert_eq!(captured[0].message, "shown");
}
