// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Dynamic value type system.
//!
//! [`CodecValue`] is the value side of a schema-driven message: the dynamic
//! decoder produces it and the dynamic encoder consumes it. All variants are
//! serde-serializable.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// Type alias for a decoded message as field name -> value mapping.
///
/// Wire order is always taken from the schema, never from map iteration.
pub type DecodedMessage = HashMap<String, CodecValue>;

/// Nanoseconds per second for time/duration conversion.
const NANOS_PER_SEC: i64 = 1_000_000_000;

/// ROS1 `time`: unsigned seconds and nanoseconds since the epoch.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Time {
    pub secs: u32,
    pub nsecs: u32,
}

impl Time {
    pub const ZERO: Time = Time { secs: 0, nsecs: 0 };

    pub const fn new(secs: u32, nsecs: u32) -> Self {
        Self { secs, nsecs }
    }

    /// Total nanoseconds since the epoch.
    pub fn as_nanos(&self) -> i64 {
        self.secs as i64 * NANOS_PER_SEC + self.nsecs as i64
    }
}

/// ROS1 `duration`: signed seconds and nanoseconds.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Duration {
    pub secs: i32,
    pub nsecs: i32,
}

impl Duration {
    pub const ZERO: Duration = Duration { secs: 0, nsecs: 0 };

    pub const fn new(secs: i32, nsecs: i32) -> Self {
        Self { secs, nsecs }
    }

    /// Total signed nanoseconds.
    pub fn as_nanos(&self) -> i64 {
        self.secs as i64 * NANOS_PER_SEC + self.nsecs as i64
    }
}

/// Unified value type for ROS1 message fields.
///
/// # Equality
///
/// Derived `PartialEq` compares arrays length-first, so arrays of different
/// lengths are simply unequal. Struct equality is field-wise.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum CodecValue {
    // Boolean
    Bool(bool),

    // Signed integers
    Int8(i8),
    Int16(i16),
    Int32(i32),
    Int64(i64),

    // Unsigned integers
    UInt8(u8),
    UInt16(u16),
    UInt32(u32),
    UInt64(u64),

    // Floating point
    Float32(f32),
    Float64(f64),

    // Length-prefixed string
    String(String),

    // Bulk byte array (uint8[] / byte[])
    Bytes(Vec<u8>),

    // ROS1 time
    Time(Time),

    // ROS1 duration
    Duration(Duration),

    // Array of values
    Array(Vec<CodecValue>),

    // Nested message
    Struct(DecodedMessage),

    // Unset field, encoded as the type's default
    Null,
}

impl CodecValue {
    /// Check if this value is a numeric type (integers or floats).
    pub fn is_numeric(&self) -> bool {
        self.is_integer() || self.is_float()
    }

    /// Check if this value is an integer type (signed or unsigned).
    pub fn is_integer(&self) -> bool {
        matches!(
            self,
            CodecValue::Int8(_)
                | CodecValue::Int16(_)
                | CodecValue::Int32(_)
                | CodecValue::Int64(_)
                | CodecValue::UInt8(_)
                | CodecValue::UInt16(_)
                | CodecValue::UInt32(_)
                | CodecValue::UInt64(_)
        )
    }

    /// Check if this value is a floating-point type.
    pub fn is_float(&self) -> bool {
        matches!(self, CodecValue::Float32(_) | CodecValue::Float64(_))
    }

    /// Check if this value is null.
    pub fn is_null(&self) -> bool {
        matches!(self, CodecValue::Null)
    }

    /// Try to convert this value to f64 (for numeric values only).
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            CodecValue::Int8(v) => Some(*v as f64),
            CodecValue::Int16(v) => Some(*v as f64),
            CodecValue::Int32(v) => Some(*v as f64),
            CodecValue::Int64(v) => Some(*v as f64),
            CodecValue::UInt8(v) => Some(*v as f64),
            CodecValue::UInt16(v) => Some(*v as f64),
            CodecValue::UInt32(v) => Some(*v as f64),
            CodecValue::UInt64(v) => Some(*v as f64),
            CodecValue::Float32(v) => Some(*v as f64),
            CodecValue::Float64(v) => Some(*v),
            _ => None,
        }
    }

    /// Try to convert this value to i128 (for integer and bool values).
    ///
    /// i128 holds every ROS integer width without loss, which keeps range
    /// checks in the encoder to a single comparison.
    pub fn as_i128(&self) -> Option<i128> {
        match self {
            CodecValue::Bool(v) => Some(*v as i128),
            CodecValue::Int8(v) => Some(*v as i128),
            CodecValue::Int16(v) => Some(*v as i128),
            CodecValue::Int32(v) => Some(*v as i128),
            CodecValue::Int64(v) => Some(*v as i128),
            CodecValue::UInt8(v) => Some(*v as i128),
            CodecValue::UInt16(v) => Some(*v as i128),
            CodecValue::UInt32(v) => Some(*v as i128),
            CodecValue::UInt64(v) => Some(*v as i128),
            _ => None,
        }
    }

    /// Try to get the inner string value.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            CodecValue::String(s) => Some(s),
            _ => None,
        }
    }

    /// Try to get the inner struct.
    pub fn as_struct(&self) -> Option<&DecodedMessage> {
        match self {
            CodecValue::Struct(s) => Some(s),
            _ => None,
        }
    }

    /// Try to get the inner array.
    pub fn as_array(&self) -> Option<&[CodecValue]> {
        match self {
            CodecValue::Array(arr) => Some(arr),
            _ => None,
        }
    }

    /// Number of elements for arrays and bytes, `None` otherwise.
    pub fn len(&self) -> Option<usize> {
        match self {
            CodecValue::Array(arr) => Some(arr.len()),
            CodecValue::Bytes(b) => Some(b.len()),
            _ => None,
        }
    }

    /// Get the type name of this value as a string.
    pub fn type_name(&self) -> &'static str {
        match self {
            CodecValue::Bool(_) => "bool",
            CodecValue::Int8(_) => "int8",
            CodecValue::Int16(_) => "int16",
            CodecValue::Int32(_) => "int32",
            CodecValue::Int64(_) => "int64",
            CodecValue::UInt8(_) => "uint8",
            CodecValue::UInt16(_) => "uint16",
            CodecValue::UInt32(_) => "uint32",
            CodecValue::UInt64(_) => "uint64",
            CodecValue::Float32(_) => "float32",
            CodecValue::Float64(_) => "float64",
            CodecValue::String(_) => "string",
            CodecValue::Bytes(_) => "bytes",
            CodecValue::Time(_) => "time",
            CodecValue::Duration(_) => "duration",
            CodecValue::Array(_) => "array",
            CodecValue::Struct(_) => "struct",
            CodecValue::Null => "null",
        }
    }
}

impl fmt::Display for CodecValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CodecValue::Bool(v) => write!(f, "{v}"),
            CodecValue::Int8(v) => write!(f, "{v}"),
            CodecValue::Int16(v) => write!(f, "{v}"),
            CodecValue::Int32(v) => write!(f, "{v}"),
            CodecValue::Int64(v) => write!(f, "{v}"),
            CodecValue::UInt8(v) => write!(f, "{v}"),
            CodecValue::UInt16(v) => write!(f, "{v}"),
            CodecValue::UInt32(v) => write!(f, "{v}"),
            CodecValue::UInt64(v) => write!(f, "{v}"),
            CodecValue::Float32(v) => write!(f, "{v}"),
            CodecValue::Float64(v) => write!(f, "{v}"),
            CodecValue::String(v) => write!(f, "\"{v}\""),
            CodecValue::Bytes(v) => write!(f, "<{} bytes>", v.len()),
            CodecValue::Time(t) => write!(f, "Time({}.{:09})", t.secs, t.nsecs),
            CodecValue::Duration(d) => write!(f, "Duration({}s {}ns)", d.secs, d.nsecs),
            CodecValue::Array(v) => write!(f, "[{} elements]", v.len()),
            CodecValue::Struct(v) => write!(f, "{{{} fields}}", v.len()),
            CodecValue::Null => write!(f, "null"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_type_checking() {
        assert!(CodecValue::Int32(42).is_numeric());
        assert!(CodecValue::Int32(42).is_integer());
        assert!(CodecValue::Float64(2.5).is_float());
        assert!(!CodecValue::Float64(2.5).is_integer());
        assert!(!CodecValue::String("hello".to_string()).is_numeric());
        assert!(CodecValue::Null.is_null());
    }

    #[test]
    fn test_as_i128_covers_u64() {
        assert_eq!(CodecValue::UInt64(u64::MAX).as_i128(), Some(u64::MAX as i128));
        assert_eq!(CodecValue::Int8(-3).as_i128(), Some(-3));
        assert_eq!(CodecValue::Bool(true).as_i128(), Some(1));
        assert_eq!(CodecValue::Float32(1.0).as_i128(), None);
    }

    #[test]
    fn test_array_length_mismatch_is_unequal() {
        let a = CodecValue::Array(vec![CodecValue::Int32(1), CodecValue::Int32(2)]);
        let b = CodecValue::Array(vec![CodecValue::Int32(1)]);
        assert_ne!(a, b);
        assert_eq!(a.len(), Some(2));
        assert_eq!(b.len(), Some(1));
    }

    #[test]
    fn test_time_and_duration_nanos() {
        assert_eq!(Time::new(2, 5).as_nanos(), 2_000_000_005);
        assert_eq!(Duration::new(-1, 500).as_nanos(), -999_999_500);
        assert_eq!(Time::default(), Time::ZERO);
    }

    #[test]
    fn test_display() {
        assert_eq!(format!("{}", CodecValue::Bool(true)), "true");
        assert_eq!(format!("{}", CodecValue::String("t".to_string())), "\"t\"");
        assert_eq!(format!("{}", CodecValue::Bytes(vec![1, 2, 3])), "<3 bytes>");
        assert_eq!(
            format!("{}", CodecValue::Time(Time::new(3, 7))),
            "Time(3.000000007)"
        );
        assert_eq!(format!("{}", CodecValue::Array(vec![])), "[0 elements]");
        assert_eq!(format!("{}", CodecValue::Null), "null");
    }

    #[test]
    fn test_serialization() {
        let value = CodecValue::Time(Time::new(10, 20));
        let json = serde_json::to_string(&value).unwrap();
        let decoded: CodecValue = serde_json::from_str(&json).unwrap();
        assert_eq!(decoded, value);
    }
}
