// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Unified codec interface over the ROS1 wire format and JSON.
//!
//! [`MessageCodec`] lets callers hold "some way to turn bytes into a
//! [`DecodedMessage`] and back" without caring which representation is
//! behind it. [`Ros1Codec`] additionally caches parsed schemas by type
//! name, for callers that receive the same definition text over and over
//! (one connection header per topic, for instance).
//!
//! ## Example
//!
//! ```
//! use roswire::encoding::{MessageCodec, Ros1Codec};
//! use roswire::CodecValue;
//!
//! let codec = Ros1Codec::new();
//! let data = [3, 0, 0, 0, b'a', b'b', b'c'];
//! let message = codec.decode_definition("demo/Name", "string name", &data).unwrap();
//! assert_eq!(message["name"], CodecValue::String("abc".into()));
//! ```

use std::sync::Arc;

use crate::config::DecodeLimits;
use crate::core::{DecodedMessage, Result, TypeRegistry};
use crate::encoding::json::JsonCodec;
use crate::encoding::ros1::{Ros1Decoder, Ros1Encoder, WireWriter};
use crate::schema::{parse_schema, MessageSchema};

/// Decoding and encoding of dynamic messages against a schema `S`.
pub trait MessageCodec<S>: Send + Sync {
    /// Decode raw message data.
    fn decode(&self, data: &[u8], schema: &S) -> Result<DecodedMessage>;

    /// Encode a message back to raw bytes.
    fn encode(&mut self, message: &DecodedMessage, schema: &S) -> Result<Vec<u8>>;

    /// Short name of the representation, e.g. `"ros1"`.
    fn name(&self) -> &'static str;

    /// Reset encoder state for reuse.
    fn reset(&mut self);
}

/// ROS1 wire codec with a schema cache.
pub struct Ros1Codec {
    decoder: Ros1Decoder,
    encoder: Ros1Encoder,
    /// Reused across `encode` calls.
    writer: WireWriter,
    schemas: TypeRegistry<Arc<MessageSchema>>,
}

impl Ros1Codec {
    pub fn new() -> Self {
        Self::with_limits(DecodeLimits::default())
    }

    /// Create a codec whose decoder and encoder enforce `limits`.
    pub fn with_limits(limits: DecodeLimits) -> Self {
        Self {
            decoder: Ros1Decoder::with_limits(limits),
            encoder: Ros1Encoder::with_limits(limits),
            writer: WireWriter::new(),
            schemas: TypeRegistry::new(),
        }
    }

    pub fn decoder(&self) -> &Ros1Decoder {
        &self.decoder
    }

    /// Parse `definition` once per type name and reuse the result.
    ///
    /// A later call with the same name returns the cached schema even if the
    /// text differs; call [`Ros1Codec::forget`] to replace it.
    pub fn schema_for(&self, type_name: &str, definition: &str) -> Result<Arc<MessageSchema>> {
        if let Some(schema) = self.schemas.get(type_name)? {
            return Ok(schema);
        }
        let schema = Arc::new(parse_schema(type_name, definition)?);
        self.schemas.register(type_name, Arc::clone(&schema))?;
        tracing::debug!(type_name, "Cached parsed schema");
        Ok(schema)
    }

    /// Drop a cached schema.
    pub fn forget(&self, type_name: &str) -> Result<bool> {
        self.schemas.remove(type_name)
    }

    /// Number of cached schemas.
    pub fn cached_schemas(&self) -> Result<usize> {
        self.schemas.len()
    }

    /// Decode `data` against a definition given as text.
    pub fn decode_definition(
        &self,
        type_name: &str,
        definition: &str,
        data: &[u8],
    ) -> Result<DecodedMessage> {
        let schema = self.schema_for(type_name, definition)?;
        self.decoder.decode(&schema, data)
    }
}

impl Default for Ros1Codec {
    fn default() -> Self {
        Self::new()
    }
}

impl MessageCodec<MessageSchema> for Ros1Codec {
    fn decode(&self, data: &[u8], schema: &MessageSchema) -> Result<DecodedMessage> {
        self.decoder.decode(schema, data)
    }

    fn encode(&mut self, message: &DecodedMessage, schema: &MessageSchema) -> Result<Vec<u8>> {
        self.writer.reset();
        self.encoder
            .encode_into(&mut self.writer, message, schema, &schema.name)?;
        Ok(self.writer.data().to_vec())
    }

    fn name(&self) -> &'static str {
        "ros1"
    }

    fn reset(&mut self) {
        self.writer = WireWriter::new();
    }
}

/// JSON text as the byte representation.
impl MessageCodec<MessageSchema> for JsonCodec {
    fn decode(&self, data: &[u8], schema: &MessageSchema) -> Result<DecodedMessage> {
        let value: serde_json::Value = serde_json::from_slice(data)
            .map_err(|e| crate::core::CodecError::parse("json", format!("{e}")))?;
        self.from_json_with_schema(&value, schema)
    }

    fn encode(&mut self, message: &DecodedMessage, _schema: &MessageSchema) -> Result<Vec<u8>> {
        JsonCodec::encode(self, message).map(String::into_bytes)
    }

    fn name(&self) -> &'static str {
        "json"
    }

    fn reset(&mut self) {}
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::CodecValue;

    fn transcode(
        from: &mut dyn MessageCodec<MessageSchema>,
        to: &mut dyn MessageCodec<MessageSchema>,
        data: &[u8],
        schema: &MessageSchema,
    ) -> Vec<u8> {
        let message = from.decode(data, schema).unwrap();
        to.encode(&message, schema).unwrap()
    }

    #[test]
    fn test_schema_cache() {
        let codec = Ros1Codec::new();
        let a = codec.schema_for("demo/A", "int32 x").unwrap();
        let b = codec.schema_for("demo/A", "this is ignored").unwrap();
        assert!(Arc::ptr_eq(&a, &b));
        assert_eq!(codec.cached_schemas().unwrap(), 1);

        assert!(codec.forget("demo/A").unwrap());
        assert!(codec.schema_for("demo/A", "this is ignored").is_err());
    }

    #[test]
    fn test_encode_reuses_writer() {
        let schema = parse_schema("demo/A", "int32 x").unwrap();
        let mut codec = Ros1Codec::new();
        let mut message = DecodedMessage::new();
        message.insert("x".into(), CodecValue::Int32(1));

        let first = codec.encode(&message, &schema).unwrap();
        let second = codec.encode(&message, &schema).unwrap();
        assert_eq!(first, vec![1, 0, 0, 0]);
        assert_eq!(first, second);
    }

    #[test]
    fn test_transcode_json_to_wire_and_back() {
        let schema = parse_schema("demo/A", "string name\nuint16[] ids").unwrap();
        let mut ros1 = Ros1Codec::new();
        let mut json = JsonCodec::new();

        let wire = transcode(
            &mut json,
            &mut ros1,
            br#"{"name": "j1", "ids": [1, 65535]}"#,
            &schema,
        );
        assert_eq!(
            wire,
            vec![2, 0, 0, 0, b'j', b'1', 2, 0, 0, 0, 1, 0, 0xFF, 0xFF]
        );

        let text = transcode(&mut ros1, &mut json, &wire, &schema);
        let value: serde_json::Value = serde_json::from_slice(&text).unwrap();
        assert_eq!(value["ids"], serde_json::json!([1, 65535]));
        assert_eq!(ros1.name(), "ros1");
        assert_eq!(json.name(), "json");
    }
}
