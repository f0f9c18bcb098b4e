//! Error types for the buffer core
//!
//! Every recoverable failure of a buffer operation is reported through
//! [`Error`]. A failed operation leaves its target untouched, so callers can
//! decide whether to retry (e.g. with a larger output buffer) or skip.
//! We use `thiserror` for automatic `Display` and `Error` trait implementations.

use crate::limits::LimitError;
use crate::types::DataType;
use std::io;
use thiserror::Error;

/// Result type alias for buffer operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for the buffer core
#[derive(Debug, Error)]
pub enum Error {
    /// Operation is only defined for scalar kinds, got an opaque one
    #[error("Unsupported kind: {0}")]
    UnsupportedKind(DataType),

    /// Two operands disagree on their per-sample layout
    #[error("Shape mismatch: expected dim={expected_dim} byte={expected_byte}, got dim={actual_dim} byte={actual_byte}")]
    ShapeMismatch {
        /// Dimension of the receiving operand
        expected_dim: usize,
        /// Element width of the receiving operand
        expected_byte: usize,
        /// Dimension of the other operand
        actual_dim: usize,
        /// Element width of the other operand
        actual_byte: usize,
    },

    /// Sample range does not lie inside the logical extent
    #[error("Invalid range [{from}, {to}) for {num} samples")]
    InvalidRange {
        /// First sample (inclusive)
        from: usize,
        /// Last sample (exclusive)
        to: usize,
        /// Logical sample count of the source
        num: usize,
    },

    /// Output buffer cannot hold the rendered text
    #[error("Buffer too small: need {needed} bytes, have {available}")]
    BufferTooSmall {
        /// Bytes required
        needed: usize,
        /// Bytes available
        available: usize,
    },

    /// Payload size is not a multiple of its element size
    #[error("Payload of {tot} bytes is not a multiple of {element} bytes")]
    PayloadMisaligned {
        /// Payload size in bytes
        tot: usize,
        /// Element size in bytes
        element: usize,
    },

    /// Payload accessor does not match the event type
    #[error("Payload type mismatch: expected {expected}, got {actual}")]
    PayloadType {
        /// Type required by the accessor
        expected: &'static str,
        /// Type declared by the event
        actual: &'static str,
    },

    /// Data does not match its declared layout
    #[error("Invalid data: {0}")]
    InvalidData(String),

    /// Size limit violated
    #[error(transparent)]
    Limit(#[from] LimitError),

    /// Configuration could not be read or parsed
    #[error("Configuration error: {0}")]
    Config(String),

    /// I/O error (config files, stream printing)
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

impl Error {
    /// Build a shape mismatch from two `(dim, byte)` pairs
    pub fn shape_mismatch(expected: (usize, usize), actual: (usize, usize)) -> Self {
        Error::ShapeMismatch {
            expected_dim: expected.0,
            expected_byte: expected.1,
            actual_dim: actual.0,
            actual_byte: actual.1,
        }
    }

    /// Whether retrying with different inputs could succeed
    ///
    /// Only a too-small output buffer is worth retrying as-is.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Error::BufferTooSmall { .. })
    }
}
