//! Scalar value model
//!
//! This module defines:
//! - ScalarValue: one decoded element, tagged with its kind
//! - Scalar: typed access for the Rust primitive types
//!
//! Buffers store elements as raw native-endian bytes with no alignment
//! guarantee, so every read and write goes through `byteorder` rather than
//! pointer casts.
//!
//! ## Cast Rules
//!
//! [`ScalarValue::cast`] follows the usual numeric conversion rules:
//! - int -> narrower int wraps (two's complement truncation)
//! - float -> int truncates toward zero, saturating at the bounds (NaN -> 0)
//! - int -> float rounds to nearest
//! - anything -> bool maps nonzero to `true`
//! - bool -> numeric maps to 0 / 1
//! - char behaves as a signed 8-bit integer

use crate::types::ScalarKind;
use byteorder::{ByteOrder, NativeEndian};
use std::fmt;

/// One decoded scalar element
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ScalarValue {
    /// Character byte
    Char(u8),
    /// Signed 8-bit integer
    Int8(i8),
    /// Unsigned 8-bit integer
    UInt8(u8),
    /// Signed 16-bit integer
    Int16(i16),
    /// Unsigned 16-bit integer
    UInt16(u16),
    /// Signed 32-bit integer
    Int32(i32),
    /// Unsigned 32-bit integer
    UInt32(u32),
    /// Signed 64-bit integer
    Int64(i64),
    /// Unsigned 64-bit integer
    UInt64(u64),
    /// Single precision float
    Float32(f32),
    /// Double precision float
    Float64(f64),
    /// Boolean
    Bool(bool),
}

impl ScalarValue {
    /// Kind of this value
    pub const fn kind(&self) -> ScalarKind {
        match self {
            ScalarValue::Char(_) => ScalarKind::Char,
            ScalarValue::Int8(_) => ScalarKind::Int8,
            ScalarValue::UInt8(_) => ScalarKind::UInt8,
            ScalarValue::Int16(_) => ScalarKind::Int16,
            ScalarValue::UInt16(_) => ScalarKind::UInt16,
            ScalarValue::Int32(_) => ScalarKind::Int32,
            ScalarValue::UInt32(_) => ScalarKind::UInt32,
            ScalarValue::Int64(_) => ScalarKind::Int64,
            ScalarValue::UInt64(_) => ScalarKind::UInt64,
            ScalarValue::Float32(_) => ScalarKind::Float32,
            ScalarValue::Float64(_) => ScalarKind::Float64,
            ScalarValue::Bool(_) => ScalarKind::Bool,
        }
    }

    /// Decode one element of `kind` from the front of `bytes`
    ///
    /// # Panics
    ///
    /// Panics if `bytes` is shorter than the kind's byte width.
    pub fn read(kind: ScalarKind, bytes: &[u8]) -> Self {
        match kind {
            ScalarKind::Char => ScalarValue::Char(bytes[0]),
            ScalarKind::Int8 => ScalarValue::Int8(bytes[0] as i8),
            ScalarKind::UInt8 => ScalarValue::UInt8(bytes[0]),
            ScalarKind::Int16 => ScalarValue::Int16(NativeEndian::read_i16(bytes)),
            ScalarKind::UInt16 => ScalarValue::UInt16(NativeEndian::read_u16(bytes)),
            ScalarKind::Int32 => ScalarValue::Int32(NativeEndian::read_i32(bytes)),
            ScalarKind::UInt32 => ScalarValue::UInt32(NativeEndian::read_u32(bytes)),
            ScalarKind::Int64 => ScalarValue::Int64(NativeEndian::read_i64(bytes)),
            ScalarKind::UInt64 => ScalarValue::UInt64(NativeEndian::read_u64(bytes)),
            ScalarKind::Float32 => ScalarValue::Float32(NativeEndian::read_f32(bytes)),
            ScalarKind::Float64 => ScalarValue::Float64(NativeEndian::read_f64(bytes)),
            ScalarKind::Bool => ScalarValue::Bool(bytes[0] != 0),
        }
    }

    /// Encode this value into the front of `bytes`
    ///
    /// # Panics
    ///
    /// Panics if `bytes` is shorter than the kind's byte width.
    pub fn write(&self, bytes: &mut [u8]) {
        match *self {
            ScalarValue::Char(v) => bytes[0] = v,
            ScalarValue::Int8(v) => bytes[0] = v as u8,
            ScalarValue::UInt8(v) => bytes[0] = v,
            ScalarValue::Int16(v) => NativeEndian::write_i16(bytes, v),
            ScalarValue::UInt16(v) => NativeEndian::write_u16(bytes, v),
            ScalarValue::Int32(v) => NativeEndian::write_i32(bytes, v),
            ScalarValue::UInt32(v) => NativeEndian::write_u32(bytes, v),
            ScalarValue::Int64(v) => NativeEndian::write_i64(bytes, v),
            ScalarValue::UInt64(v) => NativeEndian::write_u64(bytes, v),
            ScalarValue::Float32(v) => NativeEndian::write_f32(bytes, v),
            ScalarValue::Float64(v) => NativeEndian::write_f64(bytes, v),
            ScalarValue::Bool(v) => bytes[0] = u8::from(v),
        }
    }

    /// Float view of the value, `None` for integer-like kinds
    fn as_float(&self) -> Option<f64> {
        match *self {
            ScalarValue::Float32(v) => Some(v as f64),
            ScalarValue::Float64(v) => Some(v),
            _ => None,
        }
    }

    /// Integer view of the value (floats truncate toward zero)
    fn as_int(&self) -> i128 {
        match *self {
            ScalarValue::Char(v) => (v as i8) as i128,
            ScalarValue::Int8(v) => v as i128,
            ScalarValue::UInt8(v) => v as i128,
            ScalarValue::Int16(v) => v as i128,
            ScalarValue::UInt16(v) => v as i128,
            ScalarValue::Int32(v) => v as i128,
            ScalarValue::UInt32(v) => v as i128,
            ScalarValue::Int64(v) => v as i128,
            ScalarValue::UInt64(v) => v as i128,
            ScalarValue::Float32(v) => v as i128,
            ScalarValue::Float64(v) => v as i128,
            ScalarValue::Bool(v) => v as i128,
        }
    }

    /// Numeric cast to another kind
    pub fn cast(&self, kind: ScalarKind) -> ScalarValue {
        if self.kind() == kind {
            return *self;
        }
        // Float sources cast straight to the target so `as` truncates toward
        // zero and saturates instead of wrapping through i128.
        macro_rules! to_int {
            ($variant:ident, $ty:ty) => {
                match self.as_float() {
                    Some(f) => ScalarValue::$variant(f as $ty),
                    None => ScalarValue::$variant(self.as_int() as $ty),
                }
            };
        }
        match kind {
            ScalarKind::Char => match self.as_float() {
                Some(f) => ScalarValue::Char((f as i8) as u8),
                None => ScalarValue::Char((self.as_int() as i8) as u8),
            },
            ScalarKind::Int8 => to_int!(Int8, i8),
            ScalarKind::UInt8 => to_int!(UInt8, u8),
            ScalarKind::Int16 => to_int!(Int16, i16),
            ScalarKind::UInt16 => to_int!(UInt16, u16),
            ScalarKind::Int32 => to_int!(Int32, i32),
            ScalarKind::UInt32 => to_int!(UInt32, u32),
            ScalarKind::Int64 => to_int!(Int64, i64),
            ScalarKind::UInt64 => to_int!(UInt64, u64),
            ScalarKind::Float32 => match *self {
                ScalarValue::Float64(v) => ScalarValue::Float32(v as f32),
                _ => ScalarValue::Float32(self.as_int() as f32),
            },
            ScalarKind::Float64 => match self.as_float() {
                Some(f) => ScalarValue::Float64(f),
                None => ScalarValue::Float64(self.as_int() as f64),
            },
            ScalarKind::Bool => match self.as_float() {
                Some(f) => ScalarValue::Bool(f != 0.0),
                None => ScalarValue::Bool(self.as_int() != 0),
            },
        }
    }
}

impl fmt::Display for ScalarValue {
    /// Chars map their byte to the Latin-1 code point of the same value
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            ScalarValue::Char(v) => write!(f, "{}", v as char),
            ScalarValue::Int8(v) => write!(f, "{}", v),
            ScalarValue::UInt8(v) => write!(f, "{}", v),
            ScalarValue::Int16(v) => write!(f, "{}", v),
            ScalarValue::UInt16(v) => write!(f, "{}", v),
            ScalarValue::Int32(v) => write!(f, "{}", v),
            ScalarValue::UInt32(v) => write!(f, "{}", v),
            ScalarValue::Int64(v) => write!(f, "{}", v),
            ScalarValue::UInt64(v) => write!(f, "{}", v),
            ScalarValue::Float32(v) => write!(f, "{:.6}", v),
            ScalarValue::Float64(v) => write!(f, "{:.6}", v),
            ScalarValue::Bool(v) => write!(f, "{}", v),
        }
    }
}

/// Rust primitive types that map onto a [`ScalarKind`]
pub trait Scalar: Copy + Send + Sync + 'static {
    /// Kind the type is stored as
    const KIND: ScalarKind;

    /// Wrap as a tagged value
    fn into_value(self) -> ScalarValue;

    /// Extract from a tagged value, casting if the kinds differ
    fn from_value(value: ScalarValue) -> Self;

    /// Decode from the front of `bytes`
    fn read(bytes: &[u8]) -> Self {
        Self::from_value(ScalarValue::read(Self::KIND, bytes))
    }

    /// Encode into the front of `bytes`
    fn write(self, bytes: &mut [u8]) {
        self.into_value().write(bytes)
    }
}

macro_rules! impl_scalar {
    ($ty:ty, $variant:ident) => {
        impl Scalar for $ty {
            const KIND: ScalarKind = ScalarKind::$variant;

            fn into_value(self) -> ScalarValue {
                ScalarValue::$variant(self)
            }

            fn from_value(value: ScalarValue) -> Self {
                match value.cast(Self::KIND) {
                    ScalarValue::$variant(v) => v,
                    other => unreachable!("cast to {} produced {:?}", Self::KIND, other),
                }
            }
        }
    };
}

impl_scalar!(i8, Int8);
impl_scalar!(u8, UInt8);
impl_scalar!(i16, Int16);
impl_scalar!(u16, UInt16);
impl_scalar!(i32, Int32);
impl_scalar!(u32, UInt32);
impl_scalar!(i64, Int64);
impl_scalar!(u64, UInt64);
impl_scalar!(f32, Float32);
impl_scalar!(f64, Float64);
impl_scalar!(bool, Bool);
