//! Unit tests for error.rs
//!
//! Display formatting, trait implementations, and the logging error macros.

use crate::error::{Error, Result};
use crate::engine::Engine;
use crate::log::{Logger, LogEntry, LogSeverity};
use serial_test::serial;
use std::sync::{Arc, Mutex};

struct CaptureLogger {
    entries: Arc<Mutex<Vec<(LogSeverity, String)>>>,
}

impl Logger for CaptureLogger {
    fn log(&self, entry: &LogEntry) {
        if entry.source == "nova3d::Test" {
            self.entries.lock().unwrap().push((entry.severity, entry.message.clone()));
        }
    }
}

// ============================================================================
// DISPLAY
// ============================================================================

#[test]
fn test_backend_error_display() {
    let err = Error::BackendError("pipeline compilation failed".to_string());
    let display = format!("{}", err);
    assert!(display.contains("Backend error"));
    assert!(display.contains("pipeline compilation failed"));
}

#[test]
fn test_out_of_memory_display() {
    assert_eq!(format!("{}", Error::OutOfMemory), "Out of GPU memory");
}

#[test]
fn test_invalid_resource_display() {
    let err = Error::InvalidResource("stale entity".to_string());
    assert_eq!(format!("{}", err), "Invalid resource: stale entity");
}

#[test]
fn test_unsupported_capability_display() {
    let err = Error::UnsupportedCapability("storage buffers".to_string());
    let display = format!("{}", err);
    assert!(display.starts_with("Unsupported capability"));
    assert!(display.contains("storage buffers"));
}

#[test]
fn test_error_is_std_error() {
    let err = Error::InitializationFailed("no context".to_string());
    let _: &dyn std::error::Error = &err;
}

#[test]
fn test_error_clone_preserves_message() {
    let err = Error::InvalidResource("texture".to_string());
    let cloned = err.clone();
    assert_eq!(format!("{}", err), format!("{}", cloned));
}

// ============================================================================
// MACROS
// ============================================================================

fn failing_operation(fail: bool) -> Result<u32> {
    if fail {
        crate::engine_bail!("nova3d::Test", "operation failed with code {}", 7);
    }
    Ok(1)
}

#[test]
#[serial]
fn test_engine_bail_returns_backend_error_and_logs() {
    let entries = Arc::new(Mutex::new(Vec::new()));
    Engine::set_logger(CaptureLogger { entries: entries.clone() });

    let result = failing_operation(true);
    match result {
        Err(Error::BackendError(msg)) => assert_eq!(msg, "operation failed with code 7"),
        other => panic!("unexpected result: {:?}", other),
    }

    let logged = entries.lock().unwrap().clone();
    Engine::reset_logger();

    assert_eq!(logged.len(), 1);
    assert_eq!(logged[0].0, LogSeverity::Error);
    assert_eq!(logged[0].1, "operation failed with code 7");
}

#[test]
#[serial]
fn test_engine_bail_passes_through_on_success() {
    assert_eq!(failing_operation(false).unwrap(), 1);
}
