//! Error types for the Portal3D engine
//!
//! This module defines the error types used throughout the engine,
//! including render-state backends, portal configuration and scene resources.

use std::fmt;

/// Result type for Portal3D engine operations
pub type Result<T> = std::result::Result<T, Error>;

/// Portal3D engine errors
#[derive(Debug, Clone)]
pub enum Error {
    /// Backend-specific error (software rasterizer, GPU backend, etc.)
    BackendError(String),

    /// The rendering context was lost; not recoverable inside the engine
    DeviceLost(String),

    /// Invalid resource (portal key, scene object, mesh, etc.)
    InvalidResource(String),

    /// Initialization failed (backend, demo environment)
    InitializationFailed(String),

    /// A configuration value could not be used as given
    InvalidConfiguration(String),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::BackendError(msg) => write!(f, "Backend error: {}", msg),
            Error::DeviceLost(msg) => write!(f, "Device lost: {}", msg),
            Error::InvalidResource(msg) => write!(f, "Invalid resource: {}", msg),
            Error::InitializationFailed(msg) => write!(f, "Initialization failed: {}", msg),
            Error::InvalidConfiguration(msg) => write!(f, "Invalid configuration: {}", msg),
        }
    }
}

impl std::error::Error for Error {}

// ===== ERROR MACROS =====

/// Log an ERROR (with file:line) and build an `Error::BackendError` from the message
///
/// # Example
///
/// ```no_run
/// use portal_3d_engine::engine_err;
///
/// let err = engine_err!("portal3d::soft", "Framebuffer size {}x{} is empty", 0, 0);
/// ```
#[macro_export]
macro_rules! engine_err {
    ($source:expr, $($arg:tt)*) => {{
        let message = format!($($arg)*);
        $crate::engine_error!($source, "{}", message);
        $crate::portal3d::Error::BackendError(message)
    }};
}

/// Log an ERROR and return early with an `Error::BackendError`
///
/// # Example
///
/// ```no_run
/// use portal_3d_engine::engine_bail;
///
/// fn check(width: u32) -> portal_3d_engine::portal3d::Result<()> {
///     if width == 0 {
///         engine_bail!("portal3d::soft", "Framebuffer width must be non-zero");
///     }
///     Ok(())
/// }
/// ```
#[macro_export]
macro_rules! engine_bail {
    ($source:expr, $($arg:tt)*) => {
        return Err($crate::engine_err!($source, $($arg)*))
    };
}

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;
