//! Size limits for streams, events and samples
//!
//! Limits guard the checked constructors (`try_new`) of the buffer types.
//! The plain constructors always succeed; producers that build buffers from
//! untrusted headers (file codecs, network transports) go through the
//! checked path so a corrupt `num`/`dim` cannot trigger a huge allocation.
//!
//! All size arithmetic is overflow-checked: an overflowing `num*dim*byte`
//! is reported as [`LimitError::SizeOverflow`].

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Size limits for buffer allocations
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Limits {
    /// Maximum values per sample (default: 65536)
    pub max_dim: usize,

    /// Maximum stream payload in bytes (default: 1GB)
    pub max_stream_bytes: usize,

    /// Maximum event payload in bytes (default: 16MB)
    pub max_event_bytes: usize,

    /// Maximum parallel streams in one sample (default: 256)
    pub max_sample_streams: usize,
}

impl Default for Limits {
    fn default() -> Self {
        Limits {
            max_dim: 65_536,
            max_stream_bytes: 1024 * 1024 * 1024, // 1GB
            max_event_bytes: 16 * 1024 * 1024,    // 16MB
            max_sample_streams: 256,
        }
    }
}

impl Limits {
    /// Tight limits for exercising the rejection paths
    pub fn with_small_limits() -> Self {
        Limits {
            max_dim: 16,
            max_stream_bytes: 4096,
            max_event_bytes: 256,
            max_sample_streams: 4,
        }
    }

    /// Byte size of `num * dim * byte`, checked for overflow
    pub fn stream_bytes(num: usize, dim: usize, byte: usize) -> Result<usize, LimitError> {
        num.checked_mul(dim)
            .and_then(|n| n.checked_mul(byte))
            .ok_or(LimitError::SizeOverflow { num, dim, byte })
    }

    /// Validate a stream shape and return its payload size
    pub fn validate_stream(&self, num: usize, dim: usize, byte: usize) -> Result<usize, LimitError> {
        if dim > self.max_dim {
            return Err(LimitError::DimTooLarge {
                actual: dim,
                max: self.max_dim,
            });
        }
        let tot = Self::stream_bytes(num, dim, byte)?;
        if tot > self.max_stream_bytes {
            return Err(LimitError::TooLarge {
                reason: "stream_too_large",
                actual: tot,
                max: self.max_stream_bytes,
            });
        }
        Ok(tot)
    }

    /// Validate an event payload size
    pub fn validate_event(&self, tot: usize) -> Result<(), LimitError> {
        if tot > self.max_event_bytes {
            return Err(LimitError::TooLarge {
                reason: "event_too_large",
                actual: tot,
                max: self.max_event_bytes,
            });
        }
        Ok(())
    }

    /// Validate the number of streams in a sample
    pub fn validate_sample(&self, num: usize) -> Result<(), LimitError> {
        if num > self.max_sample_streams {
            return Err(LimitError::TooLarge {
                reason: "sample_too_many_streams",
                actual: num,
                max: self.max_sample_streams,
            });
        }
        Ok(())
    }
}

/// Limit validation errors
#[derive(Debug, Error, PartialEq, Eq)]
pub enum LimitError {
    /// Dimension exceeds maximum
    #[error("Dimension too large: {actual} exceeds maximum {max}")]
    DimTooLarge {
        /// Requested dimension
        actual: usize,
        /// Maximum allowed dimension
        max: usize,
    },

    /// Allocation exceeds size limits
    #[error("Too large ({reason}): {actual} exceeds maximum {max}")]
    TooLarge {
        /// Reason code for the violation
        reason: &'static str,
        /// Requested size
        actual: usize,
        /// Maximum allowed size
        max: usize,
    },

    /// Size computation overflowed
    #[error("Size overflow: {num} x {dim} x {byte}")]
    SizeOverflow {
        /// Sample count
        num: usize,
        /// Values per sample
        dim: usize,
        /// Bytes per value
        byte: usize,
    },
}

impl LimitError {
    /// Get the reason code
    pub fn reason_code(&self) -> &'static str {
        match self {
            LimitError::DimTooLarge { .. } => "dim_too_large",
            LimitError::TooLarge { reason, .. } => reason,
            LimitError::SizeOverflow { .. } => "size_overflow",
        }
    }
}
