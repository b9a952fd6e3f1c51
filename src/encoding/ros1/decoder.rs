// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Schema-driven ROS1 decoder.
//!
//! Walks a [`MessageSchema`] field by field and reads each value off a
//! [`WireCursor`]. Numeric arrays are read as one contiguous block;
//! `uint8[]`, `byte[]` and `char[]` come back as [`CodecValue::Bytes`].

use tracing::{debug, trace};

use super::calculator::min_size;
use super::cursor::WireCursor;
use super::MAX_DEPTH;
use crate::config::DecodeLimits;
use crate::core::{CodecError, CodecValue, DecodedMessage, Result as CoreResult};
use crate::schema::{FieldKind, FieldType, MessageSchema, MessageType, PrimitiveType};

/// Decoder for ROS1 serialized messages.
///
/// Stateless apart from its limits; one instance can decode any number of
/// messages against any number of schemas.
///
/// # Example
///
/// ```
/// use roswire::encoding::ros1::Ros1Decoder;
/// use roswire::schema::parse_schema;
/// use roswire::CodecValue;
///
/// let schema = parse_schema("test/Msg", "int32 value\nstring name").unwrap();
/// let data = [7, 0, 0, 0, 2, 0, 0, 0, b'h', b'i'];
/// let decoded = Ros1Decoder::new().decode(&schema, &data).unwrap();
/// assert_eq!(decoded["value"], CodecValue::Int32(7));
/// assert_eq!(decoded["name"], CodecValue::String("hi".into()));
/// ```
#[derive(Debug, Clone, Default)]
pub struct Ros1Decoder {
    limits: DecodeLimits,
}

impl Ros1Decoder {
    /// Create a decoder with default limits.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a decoder with explicit limits.
    pub fn with_limits(limits: DecodeLimits) -> Self {
        Self { limits }
    }

    /// Limits in force.
    pub fn limits(&self) -> &DecodeLimits {
        &self.limits
    }

    /// Decode one instance of the schema's root type from the start of `data`.
    ///
    /// Trailing bytes after the message are ignored.
    pub fn decode(&self, schema: &MessageSchema, data: &[u8]) -> CoreResult<DecodedMessage> {
        let mut position = 0;
        let message = self.decode_at(schema, data, &mut position)?;
        if position < data.len() {
            debug!(
                type_name = %schema.name,
                consumed = position,
                trailing = data.len() - position,
                "ignoring trailing bytes after message"
            );
        }
        Ok(message)
    }

    /// Decode one instance starting at `*position` and advance `*position`
    /// past it.
    ///
    /// Used for buffers that hold several messages back to back. On error
    /// `*position` is left unchanged.
    pub fn decode_at(
        &self,
        schema: &MessageSchema,
        data: &[u8],
        position: &mut usize,
    ) -> CoreResult<DecodedMessage> {
        trace!(
            type_name = %schema.name,
            position = *position,
            len = data.len(),
            "decoding ROS1 message"
        );
        let mut cursor = WireCursor::at(data, *position).with_limits(self.limits);
        let message = self.decode_type(&mut cursor, schema, &schema.name)?;
        *position = cursor.position();
        Ok(message)
    }

    /// Decode one instance of `type_name` from the cursor.
    ///
    /// The cursor's own limits apply.
    pub fn decode_type(
        &self,
        cursor: &mut WireCursor<'_>,
        schema: &MessageSchema,
        type_name: &str,
    ) -> CoreResult<DecodedMessage> {
        let msg_type = schema
            .get_type_variants(type_name)
            .ok_or_else(|| CodecError::type_not_found(type_name))?;
        decode_struct(cursor, schema, msg_type, 0)
    }
}

fn decode_struct(
    cursor: &mut WireCursor<'_>,
    schema: &MessageSchema,
    msg_type: &MessageType,
    depth: usize,
) -> CoreResult<DecodedMessage> {
    let max_depth = cursor.limits().max_depth.min(MAX_DEPTH);
    if depth >= max_depth {
        return Err(CodecError::DepthExceeded { max_depth });
    }

    let mut message = DecodedMessage::with_capacity(msg_type.fields.len());
    for field in &msg_type.fields {
        let position = cursor.position();
        let value = decode_field(cursor, schema, &field.type_name, depth).map_err(|e| {
            e.in_field(&field.name, field.type_name.to_string(), position)
        })?;
        message.insert(field.name.clone(), value);
    }
    Ok(message)
}

fn decode_field(
    cursor: &mut WireCursor<'_>,
    schema: &MessageSchema,
    field_type: &FieldType,
    depth: usize,
) -> CoreResult<CodecValue> {
    match field_type {
        FieldType::Primitive(prim) => decode_primitive(cursor, *prim),
        FieldType::Array { base_type, size } => {
            let element_size = min_size(base_type, schema)?;
            let count = match size {
                Some(n) => cursor.check_fixed_length(*n, element_size)?,
                None => cursor.read_sequence_length(element_size)?,
            };
            decode_array(cursor, schema, field_type, base_type, count, depth)
        }
        FieldType::Nested(type_name) => {
            let nested = schema
                .get_type_variants(type_name)
                .ok_or_else(|| CodecError::type_not_found(type_name))?;
            Ok(CodecValue::Struct(decode_struct(
                cursor,
                schema,
                nested,
                depth + 1,
            )?))
        }
    }
}

fn decode_primitive(cursor: &mut WireCursor<'_>, prim: PrimitiveType) -> CoreResult<CodecValue> {
    Ok(match prim {
        PrimitiveType::Bool => CodecValue::Bool(cursor.read_bool()?),
        PrimitiveType::Int8 | PrimitiveType::Byte => CodecValue::Int8(cursor.read_i8()?),
        PrimitiveType::UInt8 | PrimitiveType::Char => CodecValue::UInt8(cursor.read_u8()?),
        PrimitiveType::Int16 => CodecValue::Int16(cursor.read_i16()?),
        PrimitiveType::UInt16 => CodecValue::UInt16(cursor.read_u16()?),
        PrimitiveType::Int32 => CodecValue::Int32(cursor.read_i32()?),
        PrimitiveType::UInt32 => CodecValue::UInt32(cursor.read_u32()?),
        PrimitiveType::Int64 => CodecValue::Int64(cursor.read_i64()?),
        PrimitiveType::UInt64 => CodecValue::UInt64(cursor.read_u64()?),
        PrimitiveType::Float32 => CodecValue::Float32(cursor.read_f32()?),
        PrimitiveType::Float64 => CodecValue::Float64(cursor.read_f64()?),
        PrimitiveType::String => CodecValue::String(cursor.read_string()?),
        PrimitiveType::Time => CodecValue::Time(cursor.read_time()?),
        PrimitiveType::Duration => CodecValue::Duration(cursor.read_duration()?),
    })
}

fn decode_array(
    cursor: &mut WireCursor<'_>,
    schema: &MessageSchema,
    field_type: &FieldType,
    base_type: &FieldType,
    count: usize,
    depth: usize,
) -> CoreResult<CodecValue> {
    if let FieldKind::FixedNumericArray { element, .. } = field_type.kind() {
        if element.is_octet() {
            return Ok(CodecValue::Bytes(cursor.read_u8_array(count)?));
        }
        let bulk = match element {
            PrimitiveType::Int8 => Some(wrap(cursor.read_i8_array(count)?, CodecValue::Int8)),
            PrimitiveType::Int16 => Some(wrap(cursor.read_i16_array(count)?, CodecValue::Int16)),
            PrimitiveType::UInt16 => Some(wrap(cursor.read_u16_array(count)?, CodecValue::UInt16)),
            PrimitiveType::Int32 => Some(wrap(cursor.read_i32_array(count)?, CodecValue::Int32)),
            PrimitiveType::UInt32 => Some(wrap(cursor.read_u32_array(count)?, CodecValue::UInt32)),
            PrimitiveType::Int64 => Some(wrap(cursor.read_i64_array(count)?, CodecValue::Int64)),
            PrimitiveType::UInt64 => Some(wrap(cursor.read_u64_array(count)?, CodecValue::UInt64)),
            PrimitiveType::Float32 => {
                Some(wrap(cursor.read_f32_array(count)?, CodecValue::Float32))
            }
            PrimitiveType::Float64 => {
                Some(wrap(cursor.read_f64_array(count)?, CodecValue::Float64))
            }
            _ => None,
        };
        if let Some(values) = bulk {
            return Ok(CodecValue::Array(values));
        }
    }

    // Zero-size elements (empty messages) make any count plausible
    let mut items = Vec::with_capacity(count.min(cursor.remaining()));
    for _ in 0..count {
        items.push(decode_field(cursor, schema, base_type, depth)?);
    }
    Ok(CodecValue::Array(items))
}

fn wrap<T>(values: Vec<T>, f: fn(T) -> CodecValue) -> Vec<CodecValue> {
    values.into_iter().map(f).collect()
}
