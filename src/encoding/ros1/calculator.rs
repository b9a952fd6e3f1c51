// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! ROS1 size calculator for computing the size of serialized data.
//!
//! ROS1 has no padding, so a message's size is the plain sum of its field
//! sizes: scalars at their natural width, strings and dynamic arrays at 4
//! bytes of prefix plus their content.

use super::MAX_DEPTH;
use crate::core::{CodecError, CodecValue, DecodedMessage, Result as CoreResult};
use crate::schema::{FieldType, MessageSchema, MessageType};

/// ROS1 size calculator.
///
/// Used either incrementally, mirroring the calls one would make on a
/// [`WireWriter`](super::WireWriter), or in one shot over a dynamic message
/// with [`Ros1Calculator::message_size`].
///
/// # Example
///
/// ```
/// use roswire::encoding::ros1::Ros1Calculator;
///
/// let mut calc = Ros1Calculator::new();
/// calc.int32();    // 4 bytes
/// calc.string(5);  // 4 (length) + 5 = 9 bytes
/// calc.bool();     // 1 byte
/// assert_eq!(calc.size(), 14);
/// ```
#[derive(Debug, Clone, Default)]
pub struct Ros1Calculator {
    offset: usize,
}

impl Ros1Calculator {
    /// Create a new calculator.
    #[must_use]
    pub fn new() -> Self {
        Self { offset: 0 }
    }

    /// Get the current calculated size.
    #[must_use]
    pub const fn size(&self) -> usize {
        self.offset
    }

    fn increment_and_return(&mut self, n: usize) -> usize {
        self.offset += n;
        self.offset
    }

    pub fn bool(&mut self) -> usize {
        self.increment_and_return(1)
    }

    pub fn int8(&mut self) -> usize {
        self.increment_and_return(1)
    }

    pub fn int16(&mut self) -> usize {
        self.increment_and_return(2)
    }

    pub fn int32(&mut self) -> usize {
        self.increment_and_return(4)
    }

    pub fn int64(&mut self) -> usize {
        self.increment_and_return(8)
    }

    pub fn float32(&mut self) -> usize {
        self.increment_and_return(4)
    }

    pub fn float64(&mut self) -> usize {
        self.increment_and_return(8)
    }

    /// `time` and `duration` are both two 32-bit words.
    pub fn time(&mut self) -> usize {
        self.increment_and_return(8)
    }

    /// Count prefix of a string or dynamic array.
    pub fn length(&mut self) -> usize {
        self.increment_and_return(4)
    }

    /// Prefix plus `length` bytes of content.
    pub fn string(&mut self, length: usize) -> usize {
        self.length();
        self.increment_and_return(length)
    }

    /// Raw bytes with no prefix.
    pub fn bytes(&mut self, count: usize) -> usize {
        self.increment_and_return(count)
    }

    /// Serialized size of `message` as an instance of the schema's root type.
    ///
    /// Missing and `Null` fields count at their default size, matching what
    /// the encoder writes for them.
    pub fn message_size(message: &DecodedMessage, schema: &MessageSchema) -> CoreResult<usize> {
        let root = schema
            .root()
            .ok_or_else(|| CodecError::type_not_found(&schema.name))?;
        let mut calc = Self::new();
        calc.add_struct(message, root, schema, 0)?;
        Ok(calc.size())
    }

    fn add_struct(
        &mut self,
        message: &DecodedMessage,
        msg_type: &MessageType,
        schema: &MessageSchema,
        depth: usize,
    ) -> CoreResult<()> {
        if depth >= MAX_DEPTH {
            return Err(CodecError::DepthExceeded {
                max_depth: MAX_DEPTH,
            });
        }
        for field in &msg_type.fields {
            match message.get(&field.name) {
                None | Some(CodecValue::Null) => {
                    self.bytes(min_size(&field.type_name, schema)?);
                }
                Some(value) => self.add_value(value, &field.type_name, schema, depth)?,
            }
        }
        Ok(())
    }

    fn add_value(
        &mut self,
        value: &CodecValue,
        field_type: &FieldType,
        schema: &MessageSchema,
        depth: usize,
    ) -> CoreResult<()> {
        if value.is_null() {
            self.bytes(min_size(field_type, schema)?);
            return Ok(());
        }
        match field_type {
            FieldType::Primitive(prim) => match (prim.size(), value) {
                (Some(n), _) => {
                    self.bytes(n);
                }
                (None, CodecValue::String(s)) => {
                    self.string(s.len());
                }
                (None, other) => {
                    return Err(CodecError::encode(
                        "ROS1",
                        format!("Expected string, got {}", other.type_name()),
                    ))
                }
            },
            FieldType::Array { base_type, size } => {
                if size.is_none() {
                    self.length();
                }
                match value {
                    CodecValue::Bytes(bytes) => {
                        let width = match base_type.as_ref() {
                            FieldType::Primitive(prim) => prim.size().unwrap_or(1),
                            _ => 1,
                        };
                        self.bytes(bytes.len() * width);
                    }
                    CodecValue::Array(items) => {
                        for item in items {
                            self.add_value(item, base_type, schema, depth)?;
                        }
                    }
                    other => {
                        return Err(CodecError::encode(
                            "ROS1",
                            format!("Expected array, got {}", other.type_name()),
                        ))
                    }
                }
            }
            FieldType::Nested(type_name) => {
                let nested = schema
                    .get_type_variants(type_name)
                    .ok_or_else(|| CodecError::type_not_found(type_name))?;
                let CodecValue::Struct(fields) = value else {
                    return Err(CodecError::encode(
                        "ROS1",
                        format!("Expected struct for '{type_name}', got {}", value.type_name()),
                    ));
                };
                self.add_struct(fields, nested, schema, depth + 1)?;
            }
        }
        Ok(())
    }
}

/// Smallest possible encoding of a field of this type.
///
/// This is also the size of the field's default value: empty strings and
/// dynamic arrays, zeroed scalars, fixed arrays of defaults.
pub fn min_size(field_type: &FieldType, schema: &MessageSchema) -> CoreResult<usize> {
    min_size_at(field_type, schema, 0)
}

fn min_size_at(field_type: &FieldType, schema: &MessageSchema, depth: usize) -> CoreResult<usize> {
    if depth >= MAX_DEPTH {
        return Err(CodecError::DepthExceeded {
            max_depth: MAX_DEPTH,
        });
    }
    Ok(match field_type {
        FieldType::Primitive(prim) => prim.size().unwrap_or(4),
        FieldType::Array { size: None, .. } => 4,
        FieldType::Array {
            base_type,
            size: Some(n),
        } => n.saturating_mul(min_size_at(base_type, schema, depth)?),
        FieldType::Nested(type_name) => {
            let nested = schema
                .get_type_variants(type_name)
                .ok_or_else(|| CodecError::type_not_found(type_name))?;
            let mut total = 0usize;
            for field in &nested.fields {
                total = total.saturating_add(min_size_at(&field.type_name, schema, depth + 1)?);
            }
            total
        }
    })
}
