//! Value rendering
//!
//! Renders raw element bytes as text with printf-like rules:
//! - integers print every digit; a precision zero-pads to that many digits
//! - floats print with `precision` decimals (default 6, like `%f`)
//! - bools print the literals `true` / `false`
//! - chars print the character itself; in `String` output a byte is read
//!   as a Latin-1 code point, while [`format_value_into`] writes the raw
//!   byte like `%c`
//!
//! Opaque types cannot be rendered and fail with `UnsupportedKind`.

use crate::error::{Error, Result};
use crate::types::{DataType, ScalarKind};
use crate::value::ScalarValue;
use serde::{Deserialize, Serialize};
use std::fmt::Write;

/// Default float decimals, matching `%f`
pub const DEFAULT_FLOAT_PRECISION: usize = 6;

/// Rendering options shared by array and stream printing
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormatOptions {
    /// Digits for value rendering (`None` = kind default)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub precision: Option<usize>,
    /// Separator placed between values of one row
    #[serde(default = "default_delimiter")]
    pub delimiter: String,
    /// Maximum number of rows written by stream printing (`None` = all)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_rows: Option<usize>,
}

fn default_delimiter() -> String {
    " ".to_string()
}

impl Default for FormatOptions {
    fn default() -> Self {
        Self {
            precision: None,
            delimiter: default_delimiter(),
            max_rows: None,
        }
    }
}

fn scalar_kind(kind: DataType) -> Result<ScalarKind> {
    kind.scalar().ok_or(Error::UnsupportedKind(kind))
}

fn write_int(out: &mut String, v: i128, precision: Option<usize>) {
    let digits = v.unsigned_abs().to_string();
    if v < 0 {
        out.push('-');
    }
    let width = precision.unwrap_or(0);
    for _ in digits.len()..width {
        out.push('0');
    }
    out.push_str(&digits);
}

fn write_scalar(out: &mut String, value: ScalarValue, precision: Option<usize>) {
    let decimals = precision.unwrap_or(DEFAULT_FLOAT_PRECISION);
    let int = match value {
        ScalarValue::Char(c) => return out.push(c as char),
        ScalarValue::Bool(b) => return out.push_str(if b { "true" } else { "false" }),
        // Writing into a String cannot fail.
        ScalarValue::Float32(f) => {
            let _ = write!(out, "{:.*}", decimals, f);
            return;
        }
        ScalarValue::Float64(f) => {
            let _ = write!(out, "{:.*}", decimals, f);
            return;
        }
        ScalarValue::Int8(v) => v as i128,
        ScalarValue::UInt8(v) => v as i128,
        ScalarValue::Int16(v) => v as i128,
        ScalarValue::UInt16(v) => v as i128,
        ScalarValue::Int32(v) => v as i128,
        ScalarValue::UInt32(v) => v as i128,
        ScalarValue::Int64(v) => v as i128,
        ScalarValue::UInt64(v) => v as i128,
    };
    write_int(out, int, precision);
}

/// Render the first element of `bytes` as `kind`
///
/// # Errors
///
/// `UnsupportedKind` for opaque types, `BufferTooSmall` if `bytes` holds
/// less than one element.
pub fn format_value(kind: DataType, bytes: &[u8], precision: Option<usize>) -> Result<String> {
    let scalar = scalar_kind(kind)?;
    if bytes.len() < scalar.byte_width() {
        return Err(Error::BufferTooSmall {
            needed: scalar.byte_width(),
            available: bytes.len(),
        });
    }
    let mut out = String::new();
    write_scalar(&mut out, ScalarValue::read(scalar, bytes), precision);
    Ok(out)
}

/// Render one value into a caller-provided byte buffer
///
/// Returns the number of bytes written. When the text does not fit, `out`
/// is left untouched and `BufferTooSmall` reports the size needed.
/// A char is written as its single raw byte.
pub fn format_value_into(
    kind: DataType,
    bytes: &[u8],
    precision: Option<usize>,
    out: &mut [u8],
) -> Result<usize> {
    if kind == DataType::Scalar(ScalarKind::Char) {
        let Some(&byte) = bytes.first() else {
            return Err(Error::BufferTooSmall {
                needed: 1,
                available: 0,
            });
        };
        let Some(slot) = out.first_mut() else {
            return Err(Error::BufferTooSmall {
                needed: 1,
                available: 0,
            });
        };
        *slot = byte;
        return Ok(1);
    }
    let text = format_value(kind, bytes, precision)?;
    if text.len() > out.len() {
        return Err(Error::BufferTooSmall {
            needed: text.len(),
            available: out.len(),
        });
    }
    out[..text.len()].copy_from_slice(text.as_bytes());
    Ok(text.len())
}

/// Render a run of elements separated by `delimiter`
///
/// # Errors
///
/// `UnsupportedKind` for opaque types, `PayloadMisaligned` if `bytes` is not
/// a whole number of elements.
pub fn format_array(
    kind: DataType,
    bytes: &[u8],
    precision: Option<usize>,
    delimiter: &str,
) -> Result<String> {
    let scalar = scalar_kind(kind)?;
    let width = scalar.byte_width();
    if bytes.len() % width != 0 {
        return Err(Error::PayloadMisaligned {
            tot: bytes.len(),
            element: width,
        });
    }
    let mut out = String::new();
    for (i, chunk) in bytes.chunks_exact(width).enumerate() {
        if i > 0 {
            out.push_str(delimiter);
        }
        write_scalar(&mut out, ScalarValue::read(scalar, chunk), precision);
    }
    Ok(out)
}
