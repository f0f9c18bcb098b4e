//! Element type registry
//!
//! This module defines the fixed set of element representations a buffer can
//! declare:
//! - ScalarKind: the enumerated numeric/boolean/character scalars
//! - DataType: a scalar kind, or an opaque payload (undefined/image/struct)
//!
//! ## Canonical Names
//!
//! | Kind | Name | Bytes |
//! |------|------|-------|
//! | Char | `char` | 1 |
//! | Int8 / UInt8 | `int8` / `uint8` | 1 |
//! | Int16 / UInt16 | `int16` / `uint16` | 2 |
//! | Int32 / UInt32 | `int32` / `uint32` | 4 |
//! | Int64 / UInt64 | `int64` / `uint64` | 8 |
//! | Float32 | `float32` | 4 |
//! | Float64 | `float64` | 8 |
//! | Bool | `bool` | 1 |
//!
//! Name lookup is case-sensitive. Stream file codecs round-trip a declared
//! type through these names, so they are frozen.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// Scalar element kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScalarKind {
    /// Single byte character (signed, C `char`)
    Char,
    /// Signed 8-bit integer
    Int8,
    /// Unsigned 8-bit integer
    UInt8,
    /// Signed 16-bit integer
    Int16,
    /// Unsigned 16-bit integer
    UInt16,
    /// Signed 32-bit integer
    Int32,
    /// Unsigned 32-bit integer
    UInt32,
    /// Signed 64-bit integer
    Int64,
    /// Unsigned 64-bit integer
    UInt64,
    /// IEEE-754 single precision
    Float32,
    /// IEEE-754 double precision
    Float64,
    /// Boolean stored as one byte (0 = false)
    Bool,
}

impl ScalarKind {
    /// All scalar kinds (for iteration)
    pub const ALL: [ScalarKind; 12] = [
        ScalarKind::Char,
        ScalarKind::Int8,
        ScalarKind::UInt8,
        ScalarKind::Int16,
        ScalarKind::UInt16,
        ScalarKind::Int32,
        ScalarKind::UInt32,
        ScalarKind::Int64,
        ScalarKind::UInt64,
        ScalarKind::Float32,
        ScalarKind::Float64,
        ScalarKind::Bool,
    ];

    /// Byte width of one element
    pub const fn byte_width(&self) -> usize {
        match self {
            ScalarKind::Char | ScalarKind::Int8 | ScalarKind::UInt8 | ScalarKind::Bool => 1,
            ScalarKind::Int16 | ScalarKind::UInt16 => 2,
            ScalarKind::Int32 | ScalarKind::UInt32 | ScalarKind::Float32 => 4,
            ScalarKind::Int64 | ScalarKind::UInt64 | ScalarKind::Float64 => 8,
        }
    }

    /// Canonical name
    pub const fn name(&self) -> &'static str {
        match self {
            ScalarKind::Char => "char",
            ScalarKind::Int8 => "int8",
            ScalarKind::UInt8 => "uint8",
            ScalarKind::Int16 => "int16",
            ScalarKind::UInt16 => "uint16",
            ScalarKind::Int32 => "int32",
            ScalarKind::UInt32 => "uint32",
            ScalarKind::Int64 => "int64",
            ScalarKind::UInt64 => "uint64",
            ScalarKind::Float32 => "float32",
            ScalarKind::Float64 => "float64",
            ScalarKind::Bool => "bool",
        }
    }

    /// Parse from canonical name (case-sensitive)
    pub fn parse(name: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|k| k.name() == name)
    }

    /// Whether the kind is a floating point representation
    pub const fn is_float(&self) -> bool {
        matches!(self, ScalarKind::Float32 | ScalarKind::Float64)
    }

    /// Whether the kind is a signed integer representation
    pub const fn is_signed_int(&self) -> bool {
        matches!(
            self,
            ScalarKind::Char
                | ScalarKind::Int8
                | ScalarKind::Int16
                | ScalarKind::Int32
                | ScalarKind::Int64
        )
    }
}

impl fmt::Display for ScalarKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Declared element type of a buffer
///
/// Opaque types carry structured data (video frames, packed structs) whose
/// element width is whatever the producer declares. Conversions and value
/// rendering are only defined for [`DataType::Scalar`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum DataType {
    /// No type declared
    #[default]
    Undefined,
    /// One of the enumerated scalars
    Scalar(ScalarKind),
    /// Packed image data
    Image,
    /// Packed user struct
    Struct,
}

impl DataType {
    /// Canonical name
    pub const fn name(&self) -> &'static str {
        match self {
            DataType::Undefined => "undefined",
            DataType::Scalar(kind) => kind.name(),
            DataType::Image => "image",
            DataType::Struct => "struct",
        }
    }

    /// Parse from canonical name (case-sensitive)
    pub fn parse(name: &str) -> Option<Self> {
        match name {
            "undefined" => Some(DataType::Undefined),
            "image" => Some(DataType::Image),
            "struct" => Some(DataType::Struct),
            other => ScalarKind::parse(other).map(DataType::Scalar),
        }
    }

    /// The scalar kind, if this is not an opaque type
    pub const fn scalar(&self) -> Option<ScalarKind> {
        match self {
            DataType::Scalar(kind) => Some(*kind),
            _ => None,
        }
    }

    /// Whether the type is opaque (undefined/image/struct)
    pub const fn is_opaque(&self) -> bool {
        !matches!(self, DataType::Scalar(_))
    }

    /// Element width implied by the type, `None` for opaque types
    pub const fn byte_width(&self) -> Option<usize> {
        match self {
            DataType::Scalar(kind) => Some(kind.byte_width()),
            _ => None,
        }
    }

    /// Stable numeric id for binary headers
    pub const fn to_byte(&self) -> u8 {
        match self {
            DataType::Undefined => 0,
            DataType::Scalar(ScalarKind::Char) => 1,
            DataType::Scalar(ScalarKind::UInt8) => 2,
            DataType::Scalar(ScalarKind::Int16) => 3,
            DataType::Scalar(ScalarKind::UInt16) => 4,
            DataType::Scalar(ScalarKind::Int32) => 5,
            DataType::Scalar(ScalarKind::UInt32) => 6,
            DataType::Scalar(ScalarKind::Int64) => 7,
            DataType::Scalar(ScalarKind::UInt64) => 8,
            DataType::Scalar(ScalarKind::Float32) => 9,
            DataType::Scalar(ScalarKind::Float64) => 10,
            DataType::Struct => 12,
            DataType::Image => 13,
            DataType::Scalar(ScalarKind::Bool) => 14,
            DataType::Scalar(ScalarKind::Int8) => 15,
        }
    }

    /// Decode a numeric id, `None` for ids outside the table
    pub const fn from_byte(b: u8) -> Option<Self> {
        match b {
            0 => Some(DataType::Undefined),
            1 => Some(DataType::Scalar(ScalarKind::Char)),
            2 => Some(DataType::Scalar(ScalarKind::UInt8)),
            3 => Some(DataType::Scalar(ScalarKind::Int16)),
            4 => Some(DataType::Scalar(ScalarKind::UInt16)),
            5 => Some(DataType::Scalar(ScalarKind::Int32)),
            6 => Some(DataType::Scalar(ScalarKind::UInt32)),
            7 => Some(DataType::Scalar(ScalarKind::Int64)),
            8 => Some(DataType::Scalar(ScalarKind::UInt64)),
            9 => Some(DataType::Scalar(ScalarKind::Float32)),
            10 => Some(DataType::Scalar(ScalarKind::Float64)),
            12 => Some(DataType::Struct),
            13 => Some(DataType::Image),
            14 => Some(DataType::Scalar(ScalarKind::Bool)),
            15 => Some(DataType::Scalar(ScalarKind::Int8)),
            _ => None,
        }
    }
}

impl From<ScalarKind> for DataType {
    fn from(kind: ScalarKind) -> Self {
        DataType::Scalar(kind)
    }
}

impl fmt::Display for DataType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

// Serialized as the canonical name so headers stay human-readable.
impl Serialize for DataType {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(self.name())
    }
}

impl<'de> Deserialize<'de> for DataType {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let name = String::deserialize(deserializer)?;
        DataType::parse(&name)
            .ok_or_else(|| serde::de::Error::custom(format!("unknown data type '{}'", name)))
    }
}

// ============================================================================
// Tests
// ============================================================================
