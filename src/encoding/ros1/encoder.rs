// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Schema-driven ROS1 encoder.
//!
//! Writes a [`DecodedMessage`] in schema field order. Fields that are missing
//! or [`CodecValue::Null`] are written as the type's default (zero, empty
//! string, empty array, all-default nested message), so an incomplete
//! message always encodes.
//!
//! Values are coerced to the declared width with range checks: an `Int64(5)`
//! is accepted for a `uint8` field, an `Int64(300)` is not.
//!
//! A default fixed array is only built when its length is within
//! `max_array_length`; a longer one is an [`CodecError::EncodeError`].

use super::writer::WireWriter;
use super::MAX_DEPTH;
use crate::config::DecodeLimits;
use crate::core::{CodecError, CodecValue, DecodedMessage, Duration, Result as CoreResult, Time};
use crate::schema::{FieldKind, FieldType, MessageSchema, MessageType, PrimitiveType};

/// Nanoseconds per second for time/duration conversion.
const NANOS_PER_SEC: i128 = 1_000_000_000;

/// Encoder for ROS1 serialized messages.
///
/// # Example
///
/// ```
/// use roswire::encoding::ros1::Ros1Encoder;
/// use roswire::schema::parse_schema;
/// use roswire::{CodecValue, DecodedMessage};
///
/// let schema = parse_schema("test/Msg", "uint8 level\nstring name").unwrap();
/// let mut message = DecodedMessage::new();
/// message.insert("level".into(), CodecValue::Int64(3));
///
/// // `name` is unset and encodes as an empty string
/// let bytes = Ros1Encoder::new().encode(&message, &schema).unwrap();
/// assert_eq!(bytes, vec![3, 0, 0, 0, 0]);
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct Ros1Encoder {
    limits: DecodeLimits,
}

impl Ros1Encoder {
    /// Create a new encoder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an encoder whose default fill respects `limits`.
    pub fn with_limits(limits: DecodeLimits) -> Self {
        Self { limits }
    }

    pub fn limits(&self) -> &DecodeLimits {
        &self.limits
    }

    /// Encode `message` as an instance of the schema's root type.
    pub fn encode(&self, message: &DecodedMessage, schema: &MessageSchema) -> CoreResult<Vec<u8>> {
        let mut writer = WireWriter::new();
        self.encode_into(&mut writer, message, schema, &schema.name)?;
        Ok(writer.finish())
    }

    /// Append `message` as an instance of `type_name` to `writer`.
    ///
    /// On error the writer is left as it was before the call.
    pub fn encode_into(
        &self,
        writer: &mut WireWriter,
        message: &DecodedMessage,
        schema: &MessageSchema,
        type_name: &str,
    ) -> CoreResult<()> {
        let msg_type = schema
            .get_type_variants(type_name)
            .ok_or_else(|| CodecError::type_not_found(type_name))?;

        let start = writer.size();
        let result = encode_struct(writer, message, msg_type, schema, &self.limits, 0);
        if result.is_err() {
            writer.truncate(start);
        }
        result
    }
}

/// Fill every missing or `Null` field of `message` with its default value,
/// recursively.
///
/// The result holds exactly the schema's fields; keys the schema does not
/// name are dropped.
pub fn normalize(message: &DecodedMessage, schema: &MessageSchema) -> CoreResult<DecodedMessage> {
    let root = schema
        .root()
        .ok_or_else(|| CodecError::type_not_found(&schema.name))?;
    normalize_struct(message, root, schema, &DecodeLimits::default(), 0)
}

/// The value an unset field of this type encodes as.
pub fn default_value(field_type: &FieldType, schema: &MessageSchema) -> CoreResult<CodecValue> {
    default_value_at(field_type, schema, &DecodeLimits::default(), 0)
}

fn default_value_at(
    field_type: &FieldType,
    schema: &MessageSchema,
    limits: &DecodeLimits,
    depth: usize,
) -> CoreResult<CodecValue> {
    check_depth(depth)?;
    Ok(match field_type {
        FieldType::Primitive(prim) => default_primitive(*prim),
        FieldType::Array { base_type, size } => {
            let count = size.unwrap_or(0);
            if count > limits.max_array_length {
                return Err(CodecError::encode(
                    "",
                    format!(
                        "Default {field_type} needs {count} elements, limit is {}",
                        limits.max_array_length
                    ),
                ));
            }
            match base_type.as_ref() {
                FieldType::Primitive(prim) if prim.is_octet() => CodecValue::Bytes(vec![0; count]),
                base => {
                    let mut items = Vec::with_capacity(count);
                    for _ in 0..count {
                        items.push(default_value_at(base, schema, limits, depth)?);
                    }
                    CodecValue::Array(items)
                }
            }
        }
        FieldType::Nested(type_name) => {
            let nested = schema
                .get_type_variants(type_name)
                .ok_or_else(|| CodecError::type_not_found(type_name))?;
            let mut fields = DecodedMessage::with_capacity(nested.fields.len());
            for field in &nested.fields {
                fields.insert(
                    field.name.clone(),
                    default_value_at(&field.type_name, schema, limits, depth + 1)?,
                );
            }
            CodecValue::Struct(fields)
        }
    })
}

fn default_primitive(prim: PrimitiveType) -> CodecValue {
    match prim {
        PrimitiveType::Bool => CodecValue::Bool(false),
        PrimitiveType::Int8 | PrimitiveType::Byte => CodecValue::Int8(0),
        PrimitiveType::UInt8 | PrimitiveType::Char => CodecValue::UInt8(0),
        PrimitiveType::Int16 => CodecValue::Int16(0),
        PrimitiveType::UInt16 => CodecValue::UInt16(0),
        PrimitiveType::Int32 => CodecValue::Int32(0),
        PrimitiveType::UInt32 => CodecValue::UInt32(0),
        PrimitiveType::Int64 => CodecValue::Int64(0),
        PrimitiveType::UInt64 => CodecValue::UInt64(0),
        PrimitiveType::Float32 => CodecValue::Float32(0.0),
        PrimitiveType::Float64 => CodecValue::Float64(0.0),
        PrimitiveType::String => CodecValue::String(String::new()),
        PrimitiveType::Time => CodecValue::Time(Time::ZERO),
        PrimitiveType::Duration => CodecValue::Duration(Duration::ZERO),
    }
}

fn normalize_struct(
    message: &DecodedMessage,
    msg_type: &MessageType,
    schema: &MessageSchema,
    limits: &DecodeLimits,
    depth: usize,
) -> CoreResult<DecodedMessage> {
    check_depth(depth)?;
    let mut out = DecodedMessage::with_capacity(msg_type.fields.len());
    for field in &msg_type.fields {
        let value = match message.get(&field.name) {
            None | Some(CodecValue::Null) => default_value_at(&field.type_name, schema, limits, depth)?,
            Some(value) => normalize_value(value, &field.type_name, schema, limits, depth)?,
        };
        out.insert(field.name.clone(), value);
    }
    Ok(out)
}

fn normalize_value(
    value: &CodecValue,
    field_type: &FieldType,
    schema: &MessageSchema,
    limits: &DecodeLimits,
    depth: usize,
) -> CoreResult<CodecValue> {
    match (field_type, value) {
        (_, CodecValue::Null) => default_value_at(field_type, schema, limits, depth),
        (FieldType::Nested(type_name), CodecValue::Struct(fields)) => {
            let nested = schema
                .get_type_variants(type_name)
                .ok_or_else(|| CodecError::type_not_found(type_name))?;
            Ok(CodecValue::Struct(normalize_struct(
                fields,
                nested,
                schema,
                limits,
                depth + 1,
            )?))
        }
        (FieldType::Array { base_type, .. }, CodecValue::Array(items)) => {
            let mut out = Vec::with_capacity(items.len());
            for item in items {
                out.push(normalize_value(item, base_type, schema, limits, depth)?);
            }
            Ok(CodecValue::Array(out))
        }
        _ => Ok(value.clone()),
    }
}

fn check_depth(depth: usize) -> CoreResult<()> {
    if depth >= MAX_DEPTH {
        return Err(CodecError::DepthExceeded {
            max_depth: MAX_DEPTH,
        });
    }
    Ok(())
}

/// Prefix an encode error's context with the field or index it occurred in.
fn at_path(segment: &str, err: CodecError) -> CodecError {
    match err {
        CodecError::EncodeError { context, message } => {
            let context = if context.is_empty() {
                segment.to_string()
            } else if context.starts_with('[') {
                format!("{segment}{context}")
            } else {
                format!("{segment}.{context}")
            };
            CodecError::EncodeError { context, message }
        }
        other => other,
    }
}

fn mismatch(expected: &str, actual: &CodecValue) -> CodecError {
    CodecError::encode(
        "",
        format!("Type mismatch: expected {expected}, got {}", actual.type_name()),
    )
}

fn encode_struct(
    writer: &mut WireWriter,
    message: &DecodedMessage,
    msg_type: &MessageType,
    schema: &MessageSchema,
    limits: &DecodeLimits,
    depth: usize,
) -> CoreResult<()> {
    check_depth(depth)?;
    for field in &msg_type.fields {
        let result = match message.get(&field.name) {
            None | Some(CodecValue::Null) => default_value_at(&field.type_name, schema, limits, depth)
                .and_then(|v| encode_value(writer, &v, &field.type_name, schema, limits, depth)),
            Some(value) => encode_value(writer, value, &field.type_name, schema, limits, depth),
        };
        result.map_err(|e| at_path(&field.name, e))?;
    }
    Ok(())
}

fn encode_value(
    writer: &mut WireWriter,
    value: &CodecValue,
    field_type: &FieldType,
    schema: &MessageSchema,
    limits: &DecodeLimits,
    depth: usize,
) -> CoreResult<()> {
    if value.is_null() {
        let default = default_value_at(field_type, schema, limits, depth)?;
        return encode_value(writer, &default, field_type, schema, limits, depth);
    }
    match field_type {
        FieldType::Primitive(prim) => encode_primitive(writer, value, *prim),
        FieldType::Array { .. } => encode_array(writer, value, field_type, schema, limits, depth),
        FieldType::Nested(type_name) => {
            let nested = schema
                .get_type_variants(type_name)
                .ok_or_else(|| CodecError::type_not_found(type_name))?;
            let CodecValue::Struct(fields) = value else {
                return Err(mismatch(type_name, value));
            };
            encode_struct(writer, fields, nested, schema, limits, depth + 1)
        }
    }
}

fn encode_primitive(
    writer: &mut WireWriter,
    value: &CodecValue,
    prim: PrimitiveType,
) -> CoreResult<()> {
    match prim {
        PrimitiveType::Bool => {
            writer.bool(coerce_bool(value)?);
        }
        PrimitiveType::Int8 | PrimitiveType::Byte => {
            writer.int8(coerce_int(value, "int8")?);
        }
        PrimitiveType::UInt8 | PrimitiveType::Char => {
            writer.uint8(coerce_int(value, "uint8")?);
        }
        PrimitiveType::Int16 => {
            writer.int16(coerce_int(value, "int16")?);
        }
        PrimitiveType::UInt16 => {
            writer.uint16(coerce_int(value, "uint16")?);
        }
        PrimitiveType::Int32 => {
            writer.int32(coerce_int(value, "int32")?);
        }
        PrimitiveType::UInt32 => {
            writer.uint32(coerce_int(value, "uint32")?);
        }
        PrimitiveType::Int64 => {
            writer.int64(coerce_int(value, "int64")?);
        }
        PrimitiveType::UInt64 => {
            writer.uint64(coerce_int(value, "uint64")?);
        }
        PrimitiveType::Float32 => {
            // Precision loss from float64 is accepted
            writer.float32(coerce_float(value, "float32")? as f32);
        }
        PrimitiveType::Float64 => {
            writer.float64(coerce_float(value, "float64")?);
        }
        PrimitiveType::String => match value {
            CodecValue::String(s) => {
                writer.string(s);
            }
            other => return Err(mismatch("string", other)),
        },
        PrimitiveType::Time => {
            writer.time(coerce_time(value)?);
        }
        PrimitiveType::Duration => {
            writer.duration(coerce_duration(value)?);
        }
    }
    Ok(())
}

fn encode_array(
    writer: &mut WireWriter,
    value: &CodecValue,
    field_type: &FieldType,
    schema: &MessageSchema,
    limits: &DecodeLimits,
    depth: usize,
) -> CoreResult<()> {
    let FieldType::Array {
        base_type,
        size: fixed_size,
    } = field_type
    else {
        return Err(mismatch("array type", value));
    };
    let count = match value {
        CodecValue::Array(items) => items.len(),
        CodecValue::Bytes(bytes) => bytes.len(),
        other => return Err(mismatch("array", other)),
    };
    if let Some(n) = *fixed_size {
        if count != n {
            return Err(CodecError::encode(
                "",
                format!("Fixed array expects {n} elements, got {count}"),
            ));
        }
    } else {
        writer.length(count);
    }

    match (field_type.kind(), value) {
        (FieldKind::FixedNumericArray { element, .. }, CodecValue::Bytes(bytes))
            if element.is_octet() =>
        {
            writer.uint8_array(bytes);
            Ok(())
        }
        (_, CodecValue::Bytes(_)) => Err(CodecError::encode(
            "",
            format!("Byte buffer given for a {base_type}[] field"),
        )),
        (FieldKind::FixedNumericArray { element, .. }, CodecValue::Array(items)) => {
            encode_numeric_block(writer, items, element)
        }
        (_, CodecValue::Array(items)) => {
            for (index, item) in items.iter().enumerate() {
                encode_value(writer, item, base_type, schema, limits, depth)
                    .map_err(|e| at_path(&format!("[{index}]"), e))?;
            }
            Ok(())
        }
        (_, other) => Err(mismatch("array", other)),
    }
}

/// Coerce every element, then write the whole array as one block.
fn encode_numeric_block(
    writer: &mut WireWriter,
    items: &[CodecValue],
    prim: PrimitiveType,
) -> CoreResult<()> {
    fn collect<T>(
        items: &[CodecValue],
        f: impl Fn(&CodecValue) -> CoreResult<T>,
    ) -> CoreResult<Vec<T>> {
        items
            .iter()
            .enumerate()
            .map(|(index, item)| f(item).map_err(|e| at_path(&format!("[{index}]"), e)))
            .collect()
    }

    match prim {
        PrimitiveType::Int8 | PrimitiveType::Byte => {
            writer.int8_array(&collect::<i8>(items, |v| coerce_int(v, "int8"))?);
        }
        PrimitiveType::UInt8 | PrimitiveType::Char => {
            writer.uint8_array(&collect::<u8>(items, |v| coerce_int(v, "uint8"))?);
        }
        PrimitiveType::Int16 => {
            writer.int16_array(&collect::<i16>(items, |v| coerce_int(v, "int16"))?);
        }
        PrimitiveType::UInt16 => {
            writer.uint16_array(&collect::<u16>(items, |v| coerce_int(v, "uint16"))?);
        }
        PrimitiveType::Int32 => {
            writer.int32_array(&collect::<i32>(items, |v| coerce_int(v, "int32"))?);
        }
        PrimitiveType::UInt32 => {
            writer.uint32_array(&collect::<u32>(items, |v| coerce_int(v, "uint32"))?);
        }
        PrimitiveType::Int64 => {
            writer.int64_array(&collect::<i64>(items, |v| coerce_int(v, "int64"))?);
        }
        PrimitiveType::UInt64 => {
            writer.uint64_array(&collect::<u64>(items, |v| coerce_int(v, "uint64"))?);
        }
        PrimitiveType::Float32 => {
            writer.float32_array(&collect::<f32>(items, |v| {
                coerce_float(v, "float32").map(|f| f as f32)
            })?);
        }
        PrimitiveType::Float64 => {
            writer.float64_array(&collect::<f64>(items, |v| coerce_float(v, "float64"))?);
        }
        PrimitiveType::Bool
        | PrimitiveType::String
        | PrimitiveType::Time
        | PrimitiveType::Duration => {
            return Err(CodecError::encode(
                "",
                format!("{prim} is not a numeric element type"),
            ))
        }
    }
    Ok(())
}

/// Coerce an integer value to the target width with bounds checking.
fn coerce_int<T: TryFrom<i128>>(value: &CodecValue, expected: &str) -> CoreResult<T> {
    if !value.is_integer() {
        return Err(mismatch(expected, value));
    }
    let wide = value.as_i128().ok_or_else(|| mismatch(expected, value))?;
    T::try_from(wide).map_err(|_| {
        CodecError::encode("", format!("Value {wide} overflows target type {expected}"))
    })
}

fn coerce_float(value: &CodecValue, expected: &str) -> CoreResult<f64> {
    if !value.is_numeric() {
        return Err(mismatch(expected, value));
    }
    value.as_f64().ok_or_else(|| mismatch(expected, value))
}

fn coerce_bool(value: &CodecValue) -> CoreResult<bool> {
    match value {
        CodecValue::Bool(b) => Ok(*b),
        other if other.is_integer() => match other.as_i128() {
            Some(0) => Ok(false),
            Some(1) => Ok(true),
            _ => Err(CodecError::encode(
                "",
                format!("Value {other} is not a valid bool (0 or 1)"),
            )),
        },
        other => Err(mismatch("bool", other)),
    }
}

/// `time` accepts a [`Time`] or integer nanoseconds since the epoch.
fn coerce_time(value: &CodecValue) -> CoreResult<Time> {
    match value {
        CodecValue::Time(t) => Ok(*t),
        other if other.is_integer() => {
            let nanos = other.as_i128().ok_or_else(|| mismatch("time", other))?;
            let secs = u32::try_from(nanos.div_euclid(NANOS_PER_SEC)).map_err(|_| {
                CodecError::encode("", format!("Value {nanos} ns is out of range for time"))
            })?;
            Ok(Time::new(secs, nanos.rem_euclid(NANOS_PER_SEC) as u32))
        }
        other => Err(mismatch("time", other)),
    }
}

/// `duration` accepts a [`Duration`] or integer nanoseconds.
fn coerce_duration(value: &CodecValue) -> CoreResult<Duration> {
    match value {
        CodecValue::Duration(d) => Ok(*d),
        other if other.is_integer() => {
            let nanos = other.as_i128().ok_or_else(|| mismatch("duration", other))?;
            let secs = i32::try_from(nanos.div_euclid(NANOS_PER_SEC)).map_err(|_| {
                CodecError::encode("", format!("Value {nanos} ns is out of range for duration"))
            })?;
            Ok(Duration::new(secs, nanos.rem_euclid(NANOS_PER_SEC) as i32))
        }
        other => Err(mismatch("duration", other)),
    }
}
