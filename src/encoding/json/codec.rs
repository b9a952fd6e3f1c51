// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! # JSON codec
//!
//! Converts dynamic messages to and from JSON.
//!
//! Output mapping:
//! - numbers and booleans map directly
//! - `time` and `duration` become `{"secs": .., "nsecs": ..}`
//! - byte arrays become arrays of numbers
//!
//! Input is either untyped ([`JsonCodec::decode`], numbers land on
//! `Int64`/`UInt64`/`Float64`) or schema-guided
//! ([`JsonCodec::from_json_with_schema`]), where every value is converted to
//! the field's declared type. A byte array may also be given as a hex string.
//!
//! ## Example
//!
//! ```
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! use roswire::encoding::json::JsonCodec;
//! use roswire::schema::parse_schema;
//! use roswire::CodecValue;
//!
//! let schema = parse_schema("test/Msg", "uint8 level\nfloat32 gain")?;
//! let codec = JsonCodec::new();
//! let message = codec.from_str_with_schema(r#"{"level": 3, "gain": 0.5}"#, &schema)?;
//! assert_eq!(message["level"], CodecValue::UInt8(3));
//! assert_eq!(message["gain"], CodecValue::Float32(0.5));
//! # Ok(())
//! # }
//! ```

use serde_json::{Map, Number, Value};

use crate::core::{CodecError, CodecValue, DecodedMessage, Duration, Result as CoreResult, Time};
use crate::encoding::ros1::MAX_DEPTH;
use crate::schema::{FieldType, MessageSchema, MessageType, PrimitiveType};

/// Converts between [`DecodedMessage`] and JSON.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonCodec {
    pretty: bool,
}

impl JsonCodec {
    /// Create a codec producing compact output.
    pub fn new() -> Self {
        Self { pretty: false }
    }

    /// Create a codec producing indented output.
    pub fn pretty() -> Self {
        Self { pretty: true }
    }

    /// Decode a JSON object without a schema.
    pub fn decode(&self, json: &str) -> CoreResult<DecodedMessage> {
        let value: Value =
            serde_json::from_str(json).map_err(|e| CodecError::parse("json", format!("{e}")))?;
        self.json_value_to_message(&value)
    }

    fn json_value_to_message(&self, value: &Value) -> CoreResult<DecodedMessage> {
        match value {
            Value::Object(obj) => obj
                .iter()
                .map(|(key, val)| Ok((key.clone(), untyped_value(val)?)))
                .collect(),
            Value::Null => Ok(DecodedMessage::new()),
            other => Err(CodecError::parse(
                "json",
                format!("expected an object, got {}", json_kind(other)),
            )),
        }
    }

    /// Parse JSON text as an instance of the schema's root type.
    pub fn from_str_with_schema(
        &self,
        json: &str,
        schema: &MessageSchema,
    ) -> CoreResult<DecodedMessage> {
        let value: Value =
            serde_json::from_str(json).map_err(|e| CodecError::parse("json", format!("{e}")))?;
        self.from_json_with_schema(&value, schema)
    }

    /// Convert a JSON object to a message of the schema's root type.
    ///
    /// Keys the schema does not name are ignored. Missing keys stay missing
    /// and encode as defaults.
    pub fn from_json_with_schema(
        &self,
        value: &Value,
        schema: &MessageSchema,
    ) -> CoreResult<DecodedMessage> {
        let root = schema
            .root()
            .ok_or_else(|| CodecError::type_not_found(&schema.name))?;
        typed_struct(value, root, schema, "", 0)
    }

    /// Encode a message to JSON text.
    pub fn encode(&self, message: &DecodedMessage) -> CoreResult<String> {
        let value = self.to_json(message)?;
        let text = if self.pretty {
            serde_json::to_string_pretty(&value)
        } else {
            serde_json::to_string(&value)
        };
        text.map_err(|e| CodecError::parse("json encode", format!("{e}")))
    }

    /// Convert a message to a JSON object.
    pub fn to_json(&self, message: &DecodedMessage) -> CoreResult<Value> {
        let mut obj = Map::new();
        for (key, value) in message {
            obj.insert(key.clone(), codec_value_to_json(value)?);
        }
        Ok(Value::Object(obj))
    }
}

fn codec_value_to_json(value: &CodecValue) -> CoreResult<Value> {
    Ok(match value {
        CodecValue::Null => Value::Null,
        CodecValue::Bool(b) => Value::Bool(*b),
        CodecValue::Int8(i) => Value::from(*i),
        CodecValue::Int16(i) => Value::from(*i),
        CodecValue::Int32(i) => Value::from(*i),
        CodecValue::Int64(i) => Value::from(*i),
        CodecValue::UInt8(u) => Value::from(*u),
        CodecValue::UInt16(u) => Value::from(*u),
        CodecValue::UInt32(u) => Value::from(*u),
        CodecValue::UInt64(u) => Value::from(*u),
        CodecValue::Float32(f) => float_to_json(f64::from(*f), "float32")?,
        CodecValue::Float64(f) => float_to_json(*f, "float64")?,
        CodecValue::String(s) => Value::String(s.clone()),
        CodecValue::Time(t) => temporal_to_json(i64::from(t.secs), i64::from(t.nsecs)),
        CodecValue::Duration(d) => temporal_to_json(i64::from(d.secs), i64::from(d.nsecs)),
        CodecValue::Bytes(bytes) => Value::Array(bytes.iter().map(|b| Value::from(*b)).collect()),
        CodecValue::Array(items) => Value::Array(
            items
                .iter()
                .map(codec_value_to_json)
                .collect::<CoreResult<Vec<_>>>()?,
        ),
        CodecValue::Struct(fields) => {
            let mut obj = Map::new();
            for (key, val) in fields {
                obj.insert(key.clone(), codec_value_to_json(val)?);
            }
            Value::Object(obj)
        }
    })
}

fn float_to_json(value: f64, type_name: &str) -> CoreResult<Value> {
    Number::from_f64(value)
        .map(Value::Number)
        .ok_or_else(|| CodecError::parse(type_name, format!("{value} is not representable in JSON")))
}

fn temporal_to_json(secs: i64, nsecs: i64) -> Value {
    let mut obj = Map::new();
    obj.insert("secs".to_string(), Value::from(secs));
    obj.insert("nsecs".to_string(), Value::from(nsecs));
    Value::Object(obj)
}

fn untyped_value(value: &Value) -> CoreResult<CodecValue> {
    Ok(match value {
        Value::Null => CodecValue::Null,
        Value::Bool(b) => CodecValue::Bool(*b),
        Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                CodecValue::Int64(i)
            } else if let Some(u) = n.as_u64() {
                CodecValue::UInt64(u)
            } else if let Some(f) = n.as_f64() {
                CodecValue::Float64(f)
            } else {
                return Err(CodecError::parse("json", "unknown number format"));
            }
        }
        Value::String(s) => CodecValue::String(s.clone()),
        Value::Array(items) => CodecValue::Array(
            items
                .iter()
                .map(untyped_value)
                .collect::<CoreResult<Vec<_>>>()?,
        ),
        Value::Object(obj) => CodecValue::Struct(
            obj.iter()
                .map(|(key, val)| Ok((key.clone(), untyped_value(val)?)))
                .collect::<CoreResult<DecodedMessage>>()?,
        ),
    })
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

fn join_path(path: &str, name: &str) -> String {
    if path.is_empty() {
        name.to_string()
    } else {
        format!("{path}.{name}")
    }
}

fn mismatch(path: &str, expected: &str, got: &Value) -> CodecError {
    CodecError::parse(
        "json",
        format!("{path}: expected {expected}, got {}", json_kind(got)),
    )
}

fn typed_struct(
    value: &Value,
    msg_type: &MessageType,
    schema: &MessageSchema,
    path: &str,
    depth: usize,
) -> CoreResult<DecodedMessage> {
    if depth >= MAX_DEPTH {
        return Err(CodecError::DepthExceeded {
            max_depth: MAX_DEPTH,
        });
    }
    let Value::Object(obj) = value else {
        let at = if path.is_empty() {
            msg_type.name.as_str()
        } else {
            path
        };
        return Err(mismatch(at, "object", value));
    };

    let mut message = DecodedMessage::with_capacity(msg_type.fields.len());
    for field in &msg_type.fields {
        if let Some(val) = obj.get(&field.name) {
            let field_path = join_path(path, &field.name);
            let converted = typed_value(val, &field.type_name, schema, &field_path, depth)?;
            message.insert(field.name.clone(), converted);
        }
    }
    Ok(message)
}

fn typed_value(
    value: &Value,
    field_type: &FieldType,
    schema: &MessageSchema,
    path: &str,
    depth: usize,
) -> CoreResult<CodecValue> {
    if value.is_null() {
        return Ok(CodecValue::Null);
    }
    match field_type {
        FieldType::Primitive(prim) => typed_primitive(value, *prim, path),
        FieldType::Array { base_type, .. } => {
            if let FieldType::Primitive(prim) = base_type.as_ref() {
                if prim.is_octet() {
                    return typed_bytes(value, path);
                }
            }
            let Value::Array(items) = value else {
                return Err(mismatch(path, "array", value));
            };
            items
                .iter()
                .enumerate()
                .map(|(i, item)| typed_value(item, base_type, schema, &format!("{path}[{i}]"), depth))
                .collect::<CoreResult<Vec<_>>>()
                .map(CodecValue::Array)
        }
        FieldType::Nested(type_name) => {
            let nested = schema
                .get_type_variants(type_name)
                .ok_or_else(|| CodecError::type_not_found(type_name))?;
            Ok(CodecValue::Struct(typed_struct(
                value,
                nested,
                schema,
                path,
                depth + 1,
            )?))
        }
    }
}

fn typed_bytes(value: &Value, path: &str) -> CoreResult<CodecValue> {
    match value {
        Value::String(text) => hex::decode(text)
            .map(CodecValue::Bytes)
            .map_err(|e| CodecError::parse("json", format!("{path}: invalid hex: {e}"))),
        Value::Array(items) => items
            .iter()
            .enumerate()
            .map(|(i, item)| {
                item.as_u64()
                    .and_then(|n| u8::try_from(n).ok())
                    .or_else(|| item.as_i64().and_then(|n| i8::try_from(n).ok()).map(|n| n as u8))
                    .ok_or_else(|| mismatch(&format!("{path}[{i}]"), "byte", item))
            })
            .collect::<CoreResult<Vec<u8>>>()
            .map(CodecValue::Bytes),
        other => Err(mismatch(path, "byte array or hex string", other)),
    }
}

fn typed_integer<T: TryFrom<i128>>(value: &Value, path: &str, type_name: &str) -> CoreResult<T> {
    let wide = value
        .as_i64()
        .map(i128::from)
        .or_else(|| value.as_u64().map(i128::from))
        .ok_or_else(|| mismatch(path, type_name, value))?;
    T::try_from(wide).map_err(|_| {
        CodecError::parse("json", format!("{path}: {wide} out of range for {type_name}"))
    })
}

fn typed_primitive(value: &Value, prim: PrimitiveType, path: &str) -> CoreResult<CodecValue> {
    let name = prim.as_str();
    Ok(match prim {
        PrimitiveType::Bool => match value {
            Value::Bool(b) => CodecValue::Bool(*b),
            Value::Number(_) => CodecValue::Bool(typed_integer::<u8>(value, path, name)? != 0),
            other => return Err(mismatch(path, name, other)),
        },
        PrimitiveType::Int8 | PrimitiveType::Byte => CodecValue::Int8(typed_integer(value, path, name)?),
        PrimitiveType::UInt8 | PrimitiveType::Char => CodecValue::UInt8(typed_integer(value, path, name)?),
        PrimitiveType::Int16 => CodecValue::Int16(typed_integer(value, path, name)?),
        PrimitiveType::UInt16 => CodecValue::UInt16(typed_integer(value, path, name)?),
        PrimitiveType::Int32 => CodecValue::Int32(typed_integer(value, path, name)?),
        PrimitiveType::UInt32 => CodecValue::UInt32(typed_integer(value, path, name)?),
        PrimitiveType::Int64 => CodecValue::Int64(typed_integer(value, path, name)?),
        PrimitiveType::UInt64 => CodecValue::UInt64(typed_integer(value, path, name)?),
        PrimitiveType::Float32 => {
            let f = value.as_f64().ok_or_else(|| mismatch(path, name, value))?;
            CodecValue::Float32(f as f32)
        }
        PrimitiveType::Float64 => {
            CodecValue::Float64(value.as_f64().ok_or_else(|| mismatch(path, name, value))?)
        }
        PrimitiveType::String => match value {
            Value::String(s) => CodecValue::String(s.clone()),
            other => return Err(mismatch(path, name, other)),
        },
        PrimitiveType::Time => {
            let (secs, nsecs) = temporal_parts(value, path, name)?;
            CodecValue::Time(Time::new(secs, nsecs))
        }
        PrimitiveType::Duration => {
            let (secs, nsecs) = temporal_parts(value, path, name)?;
            CodecValue::Duration(Duration::new(secs, nsecs))
        }
    })
}

/// Read `{"secs": .., "nsecs": ..}` with each part in range for `T`.
fn temporal_parts<T: TryFrom<i128> + Default>(
    value: &Value,
    path: &str,
    type_name: &str,
) -> CoreResult<(T, T)> {
    let Value::Object(obj) = value else {
        return Err(mismatch(path, type_name, value));
    };
    let part = |key: &str| -> CoreResult<T> {
        match obj.get(key) {
            Some(v) => typed_integer(v, &join_path(path, key), type_name),
            None => Ok(T::default()),
        }
    };
    Ok((part("secs")?, part("nsecs")?))
}

#[cfg(test)]
#[allow(clippy::approx_constant)]
mod tests {
    use super::*;
    use crate::encoding::ros1::{Ros1Decoder, Ros1Encoder};
    use crate::schema::parse_schema;

    #[test]
    fn test_decode_object() {
        let codec = JsonCodec::new();
        let result = codec.decode(r#"{"x": 1, "y": -2, "z": 3.5}"#).unwrap();
        assert_eq!(result.get("x"), Some(&CodecValue::Int64(1)));
        assert_eq!(result.get("y"), Some(&CodecValue::Int64(-2)));
        assert_eq!(result.get("z"), Some(&CodecValue::Float64(3.5)));
    }

    #[test]
    fn test_decode_rejects_non_object() {
        let codec = JsonCodec::new();
        assert!(codec.decode("[1, 2]").is_err());
        assert!(codec.decode("{not json").is_err());
    }

    #[test]
    fn test_encode_array() {
        let codec = JsonCodec::new();
        let mut message = DecodedMessage::new();
        message.insert(
            "values".to_string(),
            CodecValue::Array(vec![CodecValue::Int64(1), CodecValue::Int64(2)]),
        );
        assert_eq!(codec.encode(&message).unwrap(), r#"{"values":[1,2]}"#);
    }

    #[test]
    fn test_encode_pretty() {
        let mut message = DecodedMessage::new();
        message.insert("x".to_string(), CodecValue::UInt8(42));
        assert_eq!(
            JsonCodec::pretty().encode(&message).unwrap(),
            "{\n  \"x\": 42\n}"
        );
    }

    #[test]
    fn test_encode_time_and_bytes() {
        let mut message = DecodedMessage::new();
        message.insert("stamp".to_string(), CodecValue::Time(Time::new(1, 500)));
        message.insert("data".to_string(), CodecValue::Bytes(vec![1, 2, 255]));

        let value = JsonCodec::new().to_json(&message).unwrap();
        assert_eq!(value["stamp"]["secs"], 1);
        assert_eq!(value["stamp"]["nsecs"], 500);
        assert_eq!(value["data"], serde_json::json!([1, 2, 255]));
    }

    #[test]
    fn test_encode_non_finite_fails() {
        let mut message = DecodedMessage::new();
        message.insert("x".to_string(), CodecValue::Float64(f64::NAN));
        assert!(JsonCodec::new().encode(&message).is_err());
    }

    #[test]
    fn test_schema_guided_widths() {
        let schema = parse_schema(
            "test/Msg",
            "Header header\nint16[] offsets\nuint8[] data\nduration wait",
        )
        .unwrap();
        let json = r#"{
            "header": {"seq": 4, "stamp": {"secs": 10, "nsecs": 20}, "frame_id": "map"},
            "offsets": [-1, 2],
            "data": "0aff",
            "wait": {"secs": -1},
            "ignored": true
        }"#;
        let message = JsonCodec::new().from_str_with_schema(json, &schema).unwrap();

        let header = message["header"].as_struct().unwrap();
        assert_eq!(header["seq"], CodecValue::UInt32(4));
        assert_eq!(header["stamp"], CodecValue::Time(Time::new(10, 20)));
        assert_eq!(
            message["offsets"],
            CodecValue::Array(vec![CodecValue::Int16(-1), CodecValue::Int16(2)])
        );
        assert_eq!(message["data"], CodecValue::Bytes(vec![0x0a, 0xff]));
        assert_eq!(message["wait"], CodecValue::Duration(Duration::new(-1, 0)));
        assert!(!message.contains_key("ignored"));
    }

    #[test]
    fn test_schema_guided_range_error_has_path() {
        let schema = parse_schema("test/Msg", "geometry_msgs/Point[] pts\nuint8[2] pair\nint8 small").unwrap();
        let err = JsonCodec::new()
            .from_str_with_schema(r#"{"small": 300}"#, &schema)
            .unwrap_err();
        assert!(err.to_string().contains("small"));

        let err = JsonCodec::new()
            .from_str_with_schema(r#"{"pts": [{"x": "a"}]}"#, &schema)
            .unwrap_err();
        assert!(err.to_string().contains("pts[0].x"));
    }

    #[test]
    fn test_json_round_trip_through_wire() {
        let schema = parse_schema("test/Msg", "string name\nfloat64[] values\ntime stamp").unwrap();
        let codec = JsonCodec::new();
        let message = codec
            .from_str_with_schema(
                r#"{"name": "arm", "values": [3.14, -2.0, 0.0], "stamp": {"secs": 3, "nsecs": 4}}"#,
                &schema,
            )
            .unwrap();

        let bytes = Ros1Encoder::new().encode(&message, &schema).unwrap();
        let decoded = Ros1Decoder::new().decode(&schema, &bytes).unwrap();
        let json = codec.to_json(&decoded).unwrap();
        let again = codec.from_json_with_schema(&json, &schema).unwrap();
        assert_eq!(again, decoded);
    }
}
