//! Annotation error types
//!
//! Unified error handling for all annotation operations.

use thiserror::Error;

use crate::native::NativeError;

/// Errors reported by the public annotation operations.
#[derive(Debug, Error)]
pub enum AnnotError {
    /// A required input was missing or out of domain.
    ///
    /// Raised eagerly, before the document lock is acquired. Rust
    /// references subsume the engine-side null checks; what remains is
    /// non-finite scalar input and empty match targets.
    #[error("invalid arguments: {0}")]
    InvalidArguments(&'static str),

    /// Allocation for a result container failed.
    #[error("out of memory")]
    OutOfMemory,

    /// Engine fault, unsupported document type, or no match found for a
    /// delete/update target. Callers cannot tell these apart.
    #[error("document error: {0}")]
    Unknown(String),
}

impl From<NativeError> for AnnotError {
    fn from(err: NativeError) -> Self {
        AnnotError::Unknown(err.to_string())
    }
}

/// Result type alias for annotation operations.
pub type Result<T> = std::result::Result<T, AnnotError>;

/// Eager page-height validation shared by the operations that transform
/// coordinates.
pub(crate) fn ensure_page_height(page_height: f64) -> Result<()> {
    if page_height.is_finite() && page_height > 0.0 {
        Ok(())
    } else {
        Err(AnnotError::InvalidArguments(
            "page height must be a positive, finite number",
        ))
    }
}

/// Eager anchor-coordinate validation for note operations.
pub(crate) fn ensure_finite_point(x: f64, y: f64) -> Result<()> {
    if x.is_finite() && y.is_finite() {
        Ok(())
    } else {
        Err(AnnotError::InvalidArguments(
            "anchor coordinates must be finite",
        ))
    }
}
