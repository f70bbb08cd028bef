//! Error types for the Orrery engine
//!
//! Allocation failures and name lookups are recoverable and always surface
//! as `Err` values. Device failures are reported as `BackendError`; callers
//! are expected to abandon the frame when they see one.

use std::fmt;

/// Result type for Orrery engine operations
pub type Result<T> = std::result::Result<T, Error>;

/// Orrery engine errors
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// Graphics device or backend API failure
    BackendError(String),

    /// Allocation failed or a fixed capacity is exhausted
    OutOfMemory,

    /// No mesh is registered under the given name
    MeshNotFound(String),

    /// No material is registered under the given name
    MaterialNotFound(String),

    /// Malformed or unsupported asset (mesh, texture, material document)
    InvalidResource(String),

    /// File system failure while reading assets
    Io(String),

    /// Invalid configuration or failed subsystem setup
    InitializationFailed(String),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::BackendError(msg) => write!(f, "Backend error: {}", msg),
            Error::OutOfMemory => write!(f, "Out of memory"),
            Error::MeshNotFound(name) => write!(f, "Mesh not found: {}", name),
            Error::MaterialNotFound(name) => write!(f, "Material not found: {}", name),
            Error::InvalidResource(msg) => write!(f, "Invalid resource: {}", msg),
            Error::Io(msg) => write!(f, "I/O error: {}", msg),
            Error::InitializationFailed(msg) => write!(f, "Initialization failed: {}", msg),
        }
    }
}

impl std::error::Error for Error {}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::Io(err.to_string())
    }
}

impl From<std::collections::TryReserveError> for Error {
    fn from(_: std::collections::TryReserveError) -> Self {
        Error::OutOfMemory
    }
}

// ===== ERROR MACROS =====

/// Log an ERROR with file:line and build an `Error::BackendError`
///
/// # Example
///
/// ```ignore
/// let buffer = buffers.get(0)
///     .ok_or_else(|| engine_err!("orrery::Upload", "Missing buffer {}", 0))?;
/// ```
#[macro_export]
macro_rules! engine_err {
    ($source:expr, $($arg:tt)*) => {{
        let message = format!($($arg)*);
        $crate::engine_error!($source, "{}", message);
        $crate::orrery::Error::BackendError(message)
    }};
}

/// Log an ERROR and return early with an `Error::BackendError`
///
/// # Example
///
/// ```ignore
/// if !self.in_copy_pass {
///     engine_bail!("orrery::mock", "upload outside of a copy pass");
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
