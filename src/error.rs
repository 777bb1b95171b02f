//! Error types for mpsnum operations.
//!
//! Two failure tiers exist: allocation failure (a fatal resource condition,
//! surfaced as a value so callers and tests can observe it without the
//! process dying) and precondition violations (caller errors such as
//! mismatched shapes or out-of-bounds indices). Floating-point edge cases
//! like division by zero are not errors; they propagate IEEE-754 values.

use std::fmt;

/// Errors that can occur during mpsnum operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MpsnumError {
    /// Memory allocation failed.
    AllocationError {
        /// The size that was requested to be allocated.
        requested_size: usize,
        /// The alignment that was requested.
        requested_alignment: usize,
        /// Human-readable error message.
        message: String,
    },
    /// Invalid layout parameters were produced while sizing an allocation.
    LayoutError {
        /// The size parameter that caused the error.
        size: usize,
        /// The alignment parameter that caused the error.
        alignment: usize,
        /// Human-readable error message.
        message: String,
    },
    /// A shape or count precondition was violated.
    ValidationError {
        /// Human-readable error message.
        message: String,
    },
    /// A row, column or element index fell outside the container.
    OutOfBounds {
        /// The offending index.
        index: usize,
        /// The exclusive upper bound it had to stay under.
        bound: usize,
    },
}

impl fmt::Display for MpsnumError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MpsnumError::AllocationError {
                requested_size,
                requested_alignment,
                message,
            } => write!(
                f,
                "Memory allocation failed: {} (requested {} bytes with {} byte alignment)",
                message, requested_size, requested_alignment
            ),
            MpsnumError::LayoutError {
                size,
                alignment,
                message,
            } => write!(
                f,
                "Invalid memory layout: {} (size: {}, alignment: {})",
                message, size, alignment
            ),
            MpsnumError::ValidationError { message } => {
                write!(f, "Validation error: {}", message)
            }
            MpsnumError::OutOfBounds { index, bound } => {
                write!(f, "Index out of bounds: {} is not below {}", index, bound)
            }
        }
    }
}

impl std::error::Error for MpsnumError {}

/// Result type alias for mpsnum operations.
pub type Result<T> = std::result::Result<T, MpsnumError>;

/// Creates an allocation error.
pub fn allocation_error(size: usize, alignment: usize, message: impl Into<String>) -> MpsnumError {
    MpsnumError::AllocationError {
        requested_size: size,
        requested_alignment: alignment,
        message: message.into(),
    }
}

/// Creates a layout error.
pub fn layout_error(size: usize, alignment: usize, message: impl Into<String>) -> MpsnumError {
    MpsnumError::LayoutError {
        size,
        alignment,
        message: message.into(),
    }
}

/// Creates a validation error.
pub fn validation_error(message: impl Into<String>) -> MpsnumError {
    MpsnumError::ValidationError {
        message: message.into(),
    }
}

/// Creates an out-of-bounds error.
pub fn out_of_bounds(index: usize, bound: usize) -> MpsnumError {
    MpsnumError::OutOfBounds { index, bound }
}
