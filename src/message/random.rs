// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Random message instances for round-trip testing.
//!
//! Every field gets a valid value: numerics take arbitrary bit patterns
//! (floats are redrawn until finite so that equality holds after a round
//! trip), strings get 1 to 100 non-null ASCII bytes, dynamic arrays get 0 to
//! 9 elements and nested messages recurse.

use rand::rngs::StdRng;
use rand::SeedableRng;

pub use rand::Rng;

use crate::core::{CodecError, CodecValue, DecodedMessage, Duration, Result as CoreResult, Time};
use crate::encoding::ros1::MAX_DEPTH;
use crate::schema::{FieldType, MessageSchema, MessageType, PrimitiveType};

const MAX_STRING_LEN: usize = 100;
const MAX_ARRAY_LEN: usize = 9;
const NANOS_PER_SEC: u32 = 1_000_000_000;

/// Types that can produce a random valid instance of themselves.
pub trait Randomize: Sized {
    fn randomize<R: Rng + ?Sized>(rng: &mut R) -> Self;
}

macro_rules! randomize_standard {
    ($($ty:ty),*) => {
        $(
            impl Randomize for $ty {
                fn randomize<R: Rng + ?Sized>(rng: &mut R) -> Self {
                    rng.random()
                }
            }
        )*
    };
}

randomize_standard!(i8, u8, i16, u16, i32, u32, i64, u64, bool);

impl Randomize for f32 {
    fn randomize<R: Rng + ?Sized>(rng: &mut R) -> Self {
        loop {
            let value = f32::from_bits(rng.random());
            if value.is_finite() {
                return value;
            }
        }
    }
}

impl Randomize for f64 {
    fn randomize<R: Rng + ?Sized>(rng: &mut R) -> Self {
        loop {
            let value = f64::from_bits(rng.random());
            if value.is_finite() {
                return value;
            }
        }
    }
}

impl Randomize for String {
    fn randomize<R: Rng + ?Sized>(rng: &mut R) -> Self {
        random_ascii(rng)
    }
}

impl Randomize for Time {
    fn randomize<R: Rng + ?Sized>(rng: &mut R) -> Self {
        Time::new(rng.random(), rng.random_range(0..NANOS_PER_SEC))
    }
}

impl Randomize for Duration {
    fn randomize<R: Rng + ?Sized>(rng: &mut R) -> Self {
        Duration::new(rng.random(), rng.random_range(0..NANOS_PER_SEC as i32))
    }
}

impl<T: Randomize> Randomize for Vec<T> {
    fn randomize<R: Rng + ?Sized>(rng: &mut R) -> Self {
        let len = rng.random_range(0..=MAX_ARRAY_LEN);
        (0..len).map(|_| T::randomize(rng)).collect()
    }
}

impl<T: Randomize, const N: usize> Randomize for [T; N] {
    fn randomize<R: Rng + ?Sized>(rng: &mut R) -> Self {
        std::array::from_fn(|_| T::randomize(rng))
    }
}

fn random_ascii<R: Rng + ?Sized>(rng: &mut R) -> String {
    let len = rng.random_range(1..=MAX_STRING_LEN);
    (0..len)
        .map(|_| char::from(rng.random_range(1u8..=127)))
        .collect()
}

/// Reproducible random instance from a seed.
pub fn random_instance<T: Randomize>(seed: u64) -> T {
    let mut rng = StdRng::seed_from_u64(seed);
    T::randomize(&mut rng)
}

/// Random dynamic message for the root type of `schema`.
///
/// Values use the same representation the decoder produces, so the result
/// survives an encode/decode round trip unchanged.
pub fn random_message<R: Rng + ?Sized>(
    schema: &MessageSchema,
    rng: &mut R,
) -> CoreResult<DecodedMessage> {
    let root = schema
        .root()
        .ok_or_else(|| CodecError::type_not_found(&schema.name))?;
    random_struct(root, schema, rng, 0)
}

fn random_struct<R: Rng + ?Sized>(
    msg_type: &MessageType,
    schema: &MessageSchema,
    rng: &mut R,
    depth: usize,
) -> CoreResult<DecodedMessage> {
    if depth >= MAX_DEPTH {
        return Err(CodecError::DepthExceeded {
            max_depth: MAX_DEPTH,
        });
    }
    let mut message = DecodedMessage::with_capacity(msg_type.fields.len());
    for field in &msg_type.fields {
        let value = random_value(&field.type_name, schema, rng, depth)?;
        message.insert(field.name.clone(), value);
    }
    Ok(message)
}

fn random_value<R: Rng + ?Sized>(
    field_type: &FieldType,
    schema: &MessageSchema,
    rng: &mut R,
    depth: usize,
) -> CoreResult<CodecValue> {
    match field_type {
        FieldType::Primitive(prim) => Ok(random_primitive(*prim, rng)),
        FieldType::Array { base_type, size } => {
            let count = size.unwrap_or_else(|| rng.random_range(0..=MAX_ARRAY_LEN));
            if let FieldType::Primitive(prim) = base_type.as_ref() {
                if prim.is_octet() {
                    let mut bytes = vec![0u8; count];
                    rng.fill(bytes.as_mut_slice());
                    return Ok(CodecValue::Bytes(bytes));
                }
            }
            let items = (0..count)
                .map(|_| random_value(base_type, schema, rng, depth))
                .collect::<CoreResult<Vec<_>>>()?;
            Ok(CodecValue::Array(items))
        }
        FieldType::Nested(type_name) => {
            let nested = schema
                .get_type_variants(type_name)
                .ok_or_else(|| CodecError::type_not_found(type_name))?;
            Ok(CodecValue::Struct(random_struct(
                nested,
                schema,
                rng,
                depth + 1,
            )?))
        }
    }
}

fn random_primitive<R: Rng + ?Sized>(prim: PrimitiveType, rng: &mut R) -> CodecValue {
    match prim {
        PrimitiveType::Bool => CodecValue::Bool(rng.random()),
        PrimitiveType::Int8 | PrimitiveType::Byte => CodecValue::Int8(rng.random()),
        PrimitiveType::UInt8 | PrimitiveType::Char => CodecValue::UInt8(rng.random()),
        PrimitiveType::Int16 => CodecValue::Int16(rng.random()),
        PrimitiveType::UInt16 => CodecValue::UInt16(rng.random()),
        PrimitiveType::Int32 => CodecValue::Int32(rng.random()),
        PrimitiveType::UInt32 => CodecValue::UInt32(rng.random()),
        PrimitiveType::Int64 => CodecValue::Int64(rng.random()),
        PrimitiveType::UInt64 => CodecValue::UInt64(rng.random()),
        PrimitiveType::Float32 => CodecValue::Float32(f32::randomize(rng)),
        PrimitiveType::Float64 => CodecValue::Float64(f64::randomize(rng)),
        PrimitiveType::String => CodecValue::String(random_ascii(rng)),
        PrimitiveType::Time => CodecValue::Time(Time::randomize(rng)),
        PrimitiveType::Duration => CodecValue::Duration(Duration::randomize(rng)),
    }
}
