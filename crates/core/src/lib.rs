//! Core types for the SSI buffer model
//!
//! This crate defines the foundations shared by streams, samples and events:
//! - ScalarKind / DataType: the element type registry and canonical names
//! - ScalarValue / Scalar: decoded elements and typed, alignment-free access
//! - format: printf-style value and array rendering
//! - convert: the single element conversion point between scalar kinds
//! - ByteBuffer: owned storage with separate logical and allocated sizes
//! - StringId / StringResolver: interned sender and event names
//! - Limits / SsiConfig: allocation limits and `ssi.toml` configuration
//! - Error: error type hierarchy

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod buffer;
pub mod config;
pub mod convert;
pub mod error;
pub mod format;
pub mod intern;
pub mod limits;
pub mod types;
pub mod value;

pub use buffer::ByteBuffer;
pub use config::{SsiConfig, CONFIG_FILE_NAME};
pub use convert::convert;
pub use error::{Error, Result};
pub use format::{format_array, format_value, format_value_into, FormatOptions};
pub use intern::{StringId, StringResolver, StringTable};
pub use limits::{LimitError, Limits};
pub use types::{DataType, ScalarKind};
pub use value::{Scalar, ScalarValue};
