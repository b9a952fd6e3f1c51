// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Statically typed messages.
//!
//! The dynamic face ([`Ros1Decoder`], [`Ros1Encoder`]) walks a
//! [`MessageSchema`] at runtime. This module is the compile-time face: every
//! field type implements [`WireField`], and whole messages implement
//! [`RosMessage`], usually through the [`ros_message!`](crate::ros_message)
//! macro. Both faces produce identical bytes for the same value.
//!
//! # Example
//!
//! ```
//! use roswire::message::RosMessage;
//! use roswire::msgs::geometry_msgs::Point;
//!
//! let point = Point::new(1.0, 2.0, 3.0);
//! let bytes = point.to_bytes();
//! assert_eq!(bytes.len(), 24);
//! assert_eq!(Point::from_bytes(&bytes).unwrap(), point);
//! ```

mod macros;
pub mod random;

use std::fmt;
use std::mem::size_of;

use crate::core::{CodecError, DecodedMessage, Duration, Result as CoreResult, Time};
use crate::encoding::ros1::{Ros1Decoder, Ros1Encoder, WireCursor, WireWriter};
use crate::schema::{parse_schema, MessageSchema, DEFINITION_SEPARATOR};

pub use random::{random_instance, random_message, Randomize, Rng};

/// Dependency list collected while rendering a definition: type name and
/// field body, in first-reference order.
pub type DependencyList = Vec<(&'static str, String)>;

/// A value with a fixed ROS1 wire representation.
///
/// The slice methods exist so that numeric element types can replace the
/// per-element loop with a single little-endian block copy.
pub trait WireField: Sized {
    /// Append this value to `writer`.
    fn write(&self, writer: &mut WireWriter);

    /// Read one value, advancing the cursor.
    fn read(cursor: &mut WireCursor<'_>) -> CoreResult<Self>;

    /// Encoded size of this value in bytes.
    fn wire_size(&self) -> usize;

    /// Smallest encoded size of any value of this type.
    fn min_wire_size() -> usize;

    /// Type as written in a `.msg` field declaration.
    fn ros_type() -> String;

    /// Push the message types this type refers to, depth first.
    fn collect_dependencies(_deps: &mut DependencyList) {}

    fn write_slice(items: &[Self], writer: &mut WireWriter) {
        for item in items {
            item.write(writer);
        }
    }

    fn read_vec(cursor: &mut WireCursor<'_>, count: usize) -> CoreResult<Vec<Self>> {
        let mut items = Vec::with_capacity(count.min(cursor.remaining()));
        for _ in 0..count {
            items.push(Self::read(cursor)?);
        }
        Ok(items)
    }

    fn slice_wire_size(items: &[Self]) -> usize {
        items.iter().map(WireField::wire_size).sum()
    }
}

macro_rules! numeric_field {
    ($ty:ty, $ros:literal, $write:ident, $read:ident, $write_block:ident, $read_block:ident) => {
        impl WireField for $ty {
            #[inline]
            fn write(&self, writer: &mut WireWriter) {
                writer.$write(*self);
            }

            #[inline]
            fn read(cursor: &mut WireCursor<'_>) -> CoreResult<Self> {
                cursor.$read()
            }

            #[inline]
            fn wire_size(&self) -> usize {
                size_of::<$ty>()
            }

            fn min_wire_size() -> usize {
                size_of::<$ty>()
            }

            fn ros_type() -> String {
                $ros.to_string()
            }

            fn write_slice(items: &[Self], writer: &mut WireWriter) {
                writer.$write_block(items);
            }

            fn read_vec(cursor: &mut WireCursor<'_>, count: usize) -> CoreResult<Vec<Self>> {
                cursor.$read_block(count)
            }

            fn slice_wire_size(items: &[Self]) -> usize {
                items.len() * size_of::<$ty>()
            }
        }
    };
}

numeric_field!(i8, "int8", int8, read_i8, int8_array, read_i8_array);
numeric_field!(u8, "uint8", uint8, read_u8, uint8_array, read_u8_array);
numeric_field!(i16, "int16", int16, read_i16, int16_array, read_i16_array);
numeric_field!(u16, "uint16", uint16, read_u16, uint16_array, read_u16_array);
numeric_field!(i32, "int32", int32, read_i32, int32_array, read_i32_array);
numeric_field!(u32, "uint32", uint32, read_u32, uint32_array, read_u32_array);
numeric_field!(i64, "int64", int64, read_i64, int64_array, read_i64_array);
numeric_field!(u64, "uint64", uint64, read_u64, uint64_array, read_u64_array);
numeric_field!(f32, "float32", float32, read_f32, float32_array, read_f32_array);
numeric_field!(f64, "float64", float64, read_f64, float64_array, read_f64_array);

impl WireField for bool {
    fn write(&self, writer: &mut WireWriter) {
        writer.bool(*self);
    }

    fn read(cursor: &mut WireCursor<'_>) -> CoreResult<Self> {
        cursor.read_bool()
    }

    fn wire_size(&self) -> usize {
        1
    }

    fn min_wire_size() -> usize {
        1
    }

    fn ros_type() -> String {
        "bool".to_string()
    }
}

impl WireField for String {
    fn write(&self, writer: &mut WireWriter) {
        writer.string(self);
    }

    fn read(cursor: &mut WireCursor<'_>) -> CoreResult<Self> {
        cursor.read_string()
    }

    fn wire_size(&self) -> usize {
        4 + self.len()
    }

    fn min_wire_size() -> usize {
        4
    }

    fn ros_type() -> String {
        "string".to_string()
    }
}

impl WireField for Time {
    fn write(&self, writer: &mut WireWriter) {
        writer.time(*self);
    }

    fn read(cursor: &mut WireCursor<'_>) -> CoreResult<Self> {
        cursor.read_time()
    }

    fn wire_size(&self) -> usize {
        8
    }

    fn min_wire_size() -> usize {
        8
    }

    fn ros_type() -> String {
        "time".to_string()
    }
}

impl WireField for Duration {
    fn write(&self, writer: &mut WireWriter) {
        writer.duration(*self);
    }

    fn read(cursor: &mut WireCursor<'_>) -> CoreResult<Self> {
        cursor.read_duration()
    }

    fn wire_size(&self) -> usize {
        8
    }

    fn min_wire_size() -> usize {
        8
    }

    fn ros_type() -> String {
        "duration".to_string()
    }
}

/// Dynamic array: u32 count prefix, then the elements.
impl<T: WireField> WireField for Vec<T> {
    fn write(&self, writer: &mut WireWriter) {
        writer.length(self.len());
        T::write_slice(self, writer);
    }

    fn read(cursor: &mut WireCursor<'_>) -> CoreResult<Self> {
        let count = cursor.read_sequence_length(T::min_wire_size())?;
        T::read_vec(cursor, count)
    }

    fn wire_size(&self) -> usize {
        4 + T::slice_wire_size(self)
    }

    fn min_wire_size() -> usize {
        4
    }

    fn ros_type() -> String {
        format!("{}[]", T::ros_type())
    }

    fn collect_dependencies(deps: &mut DependencyList) {
        T::collect_dependencies(deps);
    }
}

/// Fixed array: exactly `N` elements, no prefix.
impl<T: WireField, const N: usize> WireField for [T; N] {
    fn write(&self, writer: &mut WireWriter) {
        T::write_slice(self, writer);
    }

    fn read(cursor: &mut WireCursor<'_>) -> CoreResult<Self> {
        let items = T::read_vec(cursor, N)?;
        let count = items.len();
        <[T; N]>::try_from(items).map_err(|_| {
            CodecError::parse(
                "ROS1",
                format!("expected {N} elements for fixed array, read {count}"),
            )
        })
    }

    fn wire_size(&self) -> usize {
        T::slice_wire_size(self)
    }

    fn min_wire_size() -> usize {
        N * T::min_wire_size()
    }

    fn ros_type() -> String {
        format!("{}[{N}]", T::ros_type())
    }

    fn collect_dependencies(deps: &mut DependencyList) {
        T::collect_dependencies(deps);
    }
}

/// A complete ROS message type.
///
/// Equality is the derived, field-wise `PartialEq`: arrays of different
/// lengths simply compare unequal.
pub trait RosMessage: WireField + Default + Clone + PartialEq + fmt::Debug {
    /// Fully qualified name, e.g. `geometry_msgs/Pose`.
    const TYPE_NAME: &'static str;

    /// Field declarations of this type alone, one per line.
    fn body() -> String;

    /// Push the message types referenced by this type's fields.
    fn collect_field_dependencies(deps: &mut DependencyList);

    /// Full definition text: this type's fields, then each dependency under
    /// a separator and an `MSG:` header.
    fn definition() -> String {
        let mut deps: DependencyList = vec![(Self::TYPE_NAME, Self::body())];
        Self::collect_field_dependencies(&mut deps);

        let mut out = Self::body();
        for (name, body) in deps.iter().skip(1) {
            out.push_str(DEFINITION_SEPARATOR);
            out.push_str("\nMSG: ");
            out.push_str(name);
            out.push('\n');
            out.push_str(body);
        }
        out
    }

    /// Names of every message type this one depends on, root excluded.
    fn dependency_names() -> Vec<&'static str> {
        let mut deps: DependencyList = vec![(Self::TYPE_NAME, String::new())];
        Self::collect_field_dependencies(&mut deps);
        deps.into_iter().skip(1).map(|(name, _)| name).collect()
    }

    fn to_bytes(&self) -> Vec<u8> {
        let mut writer = WireWriter::with_capacity(self.wire_size());
        self.write(&mut writer);
        writer.finish()
    }

    /// Decode one message from the start of `data`. Trailing bytes are
    /// ignored.
    fn from_bytes(data: &[u8]) -> CoreResult<Self> {
        let mut cursor = WireCursor::new(data);
        let message = Self::read(&mut cursor)?;
        if !cursor.is_at_end() {
            tracing::debug!(
                type_name = Self::TYPE_NAME,
                trailing = cursor.remaining(),
                "Ignoring trailing bytes after message"
            );
        }
        Ok(message)
    }

    /// Decode one message starting at `*position` and advance the position
    /// past it. On error the position is left untouched.
    fn from_bytes_at(data: &[u8], position: &mut usize) -> CoreResult<Self> {
        let mut cursor = WireCursor::at(data, *position);
        let message = Self::read(&mut cursor)?;
        *position = cursor.position();
        Ok(message)
    }

    fn serialized_size(&self) -> usize {
        self.wire_size()
    }

    /// Parse [`RosMessage::definition`] into a schema for the dynamic face.
    fn schema() -> CoreResult<MessageSchema> {
        parse_schema(Self::TYPE_NAME, &Self::definition())
    }

    /// Convert to a dynamic message by decoding this value's own bytes.
    fn to_dynamic(&self) -> CoreResult<DecodedMessage> {
        let schema = Self::schema()?;
        Ros1Decoder::new().decode(&schema, &self.to_bytes())
    }

    /// Build a typed value from a dynamic message. Missing fields take their
    /// defaults.
    fn from_dynamic(message: &DecodedMessage) -> CoreResult<Self> {
        let schema = Self::schema()?;
        let bytes = Ros1Encoder::new().encode(message, &schema)?;
        Self::from_bytes(&bytes)
    }
}

/// A request/response pair.
pub trait RosService {
    /// Fully qualified name, e.g. `motion_msgs/PlanCartesianPath`.
    const TYPE_NAME: &'static str;

    type Request: RosMessage;
    type Response: RosMessage;

    /// `.srv` text: request fields, `---`, response fields.
    fn definition() -> String {
        format!(
            "{}---\n{}",
            <Self::Request as RosMessage>::body(),
            <Self::Response as RosMessage>::body()
        )
    }

    /// Request and response back to back in one buffer.
    fn encode_pair(request: &Self::Request, response: &Self::Response) -> Vec<u8> {
        let mut writer = WireWriter::with_capacity(request.wire_size() + response.wire_size());
        request.write(&mut writer);
        response.write(&mut writer);
        writer.finish()
    }

    /// Read a request and then a response through one shared cursor.
    fn decode_pair(data: &[u8]) -> CoreResult<(Self::Request, Self::Response)> {
        let mut position = 0;
        let request = <Self::Request as RosMessage>::from_bytes_at(data, &mut position)?;
        let response = <Self::Response as RosMessage>::from_bytes_at(data, &mut position)?;
        Ok((request, response))
    }
}

#[cfg(test)]
#[allow(clippy::approx_constant)]
mod tests {
    use super::*;

    crate::ros_message! {
        /// Inner test type.
        pub struct Sample("test_msgs/Sample") {
            pub flag: bool,
            pub label: String,
            pub values: Vec<f64>,
        }
    }

    crate::ros_message! {
        pub struct Outer("test_msgs/Outer") {
            pub stamp: Time,
            pub first: Sample,
            pub rest: Vec<Sample>,
            pub corners: [i16; 4],
            pub blob: Vec<u8>,
        }
    }

    #[test]
    fn test_primitive_bytes() {
        let sample = Sample {
            flag: true,
            label: "ab".to_string(),
            values: vec![3.14, -2.0, 0.0],
        };
        let bytes = sample.to_bytes();

        assert_eq!(bytes.len(), sample.serialized_size());
        assert_eq!(bytes[0], 1);
        assert_eq!(&bytes[1..7], &[2, 0, 0, 0, b'a', b'b']);
        assert_eq!(&bytes[7..11], &[3, 0, 0, 0]);
        assert_eq!(&bytes[11..19], &3.14f64.to_le_bytes());
        assert_eq!(bytes.len(), 1 + 6 + 28);
    }

    #[test]
    fn test_definition_text() {
        assert_eq!(Sample::definition(), "bool flag\nstring label\nfloat64[] values\n");

        let def = Outer::definition();
        assert!(def.starts_with(
            "time stamp\ntest_msgs/Sample first\ntest_msgs/Sample[] rest\nint16[4] corners\nuint8[] blob\n"
        ));
        assert_eq!(def.matches("MSG: test_msgs/Sample").count(), 1);
        assert_eq!(Outer::dependency_names(), vec!["test_msgs/Sample"]);
    }

    #[test]
    fn test_definition_matches_schema_rendering() {
        let schema = Outer::schema().unwrap();
        assert_eq!(schema.definition(), Outer::definition());
    }

    #[test]
    fn test_nested_round_trip() {
        let outer = Outer {
            stamp: Time::new(5, 6),
            first: Sample {
                flag: false,
                label: String::new(),
                values: vec![],
            },
            rest: vec![
                Sample {
                    flag: true,
                    label: "x".into(),
                    values: vec![1.0],
                },
                Sample::default(),
            ],
            corners: [1, -2, 3, -4],
            blob: vec![9, 8, 7],
        };

        let bytes = outer.to_bytes();
        assert_eq!(Outer::from_bytes(&bytes).unwrap(), outer);
    }

    #[test]
    fn test_from_bytes_at_back_to_back() {
        let a = Sample {
            flag: true,
            label: "a".into(),
            values: vec![1.0, 2.0],
        };
        let b = Sample::default();
        let mut data = a.to_bytes();
        data.extend(b.to_bytes());

        let mut position = 0;
        assert_eq!(Sample::from_bytes_at(&data, &mut position).unwrap(), a);
        assert_eq!(Sample::from_bytes_at(&data, &mut position).unwrap(), b);
        assert_eq!(position, data.len());
    }

    #[test]
    fn test_truncated_reports_field() {
        let sample = Sample {
            flag: true,
            label: "hello".into(),
            values: vec![],
        };
        let bytes = sample.to_bytes();
        let err = Sample::from_bytes(&bytes[..4]).unwrap_err();

        assert!(err.is_out_of_data());
        match err {
            CodecError::FieldDecodeError { field_name, .. } => assert_eq!(field_name, "label"),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_from_bytes_at_keeps_position_on_error() {
        let mut position = 2;
        assert!(Sample::from_bytes_at(&[0, 0, 0], &mut position).is_err());
        assert_eq!(position, 2);
    }

    #[test]
    fn test_dynamic_bridge() {
        let sample = Sample {
            flag: true,
            label: "dyn".into(),
            values: vec![0.5],
        };
        let dynamic = sample.to_dynamic().unwrap();
        assert_eq!(dynamic["label"].as_str(), Some("dyn"));
        assert_eq!(Sample::from_dynamic(&dynamic).unwrap(), sample);
    }

    #[test]
    fn test_length_mismatch_is_unequal() {
        let a = Sample {
            values: vec![1.0, 2.0],
            ..Default::default()
        };
        let b = Sample {
            values: vec![1.0],
            ..Default::default()
        };
        assert_ne!(a, b);
    }
}
