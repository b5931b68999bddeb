//! Error types for the Nova3D engine
//!
//! This module defines the error type shared by every subsystem
//! (resource cache, pipeline manager, entity store, render system),
//! plus the `engine_err!` / `engine_bail!` helpers that log an error
//! before handing it back to the caller.

use std::fmt;

/// Result type for Nova3D engine operations
pub type Result<T> = std::result::Result<T, Error>;

/// Nova3D engine errors
#[derive(Debug, Clone)]
pub enum Error {
    /// Backend-specific error (OpenGL, WebGPU, or a failed engine-side check)
    BackendError(String),

    /// Out of GPU memory
    OutOfMemory,

    /// Invalid resource (stale entity, unknown mesh, out-of-range texture region, ...)
    InvalidResource(String),

    /// Initialization failed (engine, device, subsystems)
    InitializationFailed(String),

    /// The active graphics device lacks a capability the engine requires
    UnsupportedCapability(String),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::BackendError(msg) => write!(f, "Backend error: {}", msg),
            Error::OutOfMemory => write!(f, "Out of GPU memory"),
            Error::InvalidResource(msg) => write!(f, "Invalid resource: {}", msg),
            Error::InitializationFailed(msg) => write!(f, "Initialization failed: {}", msg),
            Error::UnsupportedCapability(msg) => write!(f, "Unsupported capability: {}", msg),
        }
    }
}

impl std::error::Error for Error {}

// ===== ERROR MACROS =====

/// Log an ERROR (with file:line) and build an `Error::BackendError` from the same message.
///
/// # Example
///
/// ```no_run
/// # use nova_3d_engine::engine_err;
/// let err = engine_err!("nova3d::Scene", "Mesh {} not found", 3);
/// ```
#[macro_export]
macro_rules! engine_err {
    ($source:expr, $($arg:tt)*) => {{
        let message = format!($($arg)*);
        $crate::engine_error!($source, "{}", message);
        $crate::nova3d::Error::BackendError(message)
    }};
}

/// Log an ERROR and return early with `Err(Error::BackendError(..))`.
#[macro_export]
macro_rules! engine_bail {
    ($source:expr, $($arg:tt)*) => {
        return Err($crate::engine_err!($source, $($arg)*))
    };
}

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;
