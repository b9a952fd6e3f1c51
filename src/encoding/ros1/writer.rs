// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! ROS1 writer for building serialized message data.
//!
//! The mirror of [`WireCursor`](super::WireCursor): values are appended
//! little-endian with no padding. Writes cannot fail, so the methods return
//! `&mut Self` for chaining.

use byteorder::{ByteOrder, LittleEndian};

use crate::core::{Duration, Time};

/// Default initial capacity for the writer buffer.
const DEFAULT_CAPACITY: usize = 64;

/// Growable output buffer for one or more ROS1 messages.
///
/// # Example
///
/// ```
/// use roswire::encoding::ros1::WireWriter;
///
/// let mut writer = WireWriter::new();
/// writer.int32(42).string("hi");
/// assert_eq!(writer.data(), &[42, 0, 0, 0, 2, 0, 0, 0, b'h', b'i']);
/// ```
#[derive(Debug, Clone, Default)]
pub struct WireWriter {
    buffer: Vec<u8>,
}

macro_rules! bulk_writer {
    ($(#[$doc:meta])* $name:ident, $ty:ty, $width:expr, $write_into:ident) => {
        $(#[$doc])*
        pub fn $name(&mut self, values: &[$ty]) -> &mut Self {
            let start = self.buffer.len();
            self.buffer.resize(start + values.len() * $width, 0);
            LittleEndian::$write_into(values, &mut self.buffer[start..]);
            self
        }
    };
}

impl WireWriter {
    /// Create an empty writer.
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }

    /// Create an empty writer with room for `capacity` bytes.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            buffer: Vec::with_capacity(capacity),
        }
    }

    /// Bytes written so far.
    #[inline]
    pub fn size(&self) -> usize {
        self.buffer.len()
    }

    /// The bytes written so far.
    #[inline]
    pub fn data(&self) -> &[u8] {
        &self.buffer
    }

    /// Consume the writer and return the encoded bytes.
    pub fn finish(self) -> Vec<u8> {
        self.buffer
    }

    /// Clear the buffer, keeping its allocation.
    pub fn reset(&mut self) {
        self.buffer.clear();
    }

    /// Drop everything written after `len` bytes.
    pub(crate) fn truncate(&mut self, len: usize) {
        self.buffer.truncate(len);
    }

    pub fn bool(&mut self, value: bool) -> &mut Self {
        self.buffer.push(u8::from(value));
        self
    }

    pub fn int8(&mut self, value: i8) -> &mut Self {
        self.buffer.extend_from_slice(&value.to_le_bytes());
        self
    }

    pub fn uint8(&mut self, value: u8) -> &mut Self {
        self.buffer.push(value);
        self
    }

    pub fn int16(&mut self, value: i16) -> &mut Self {
        self.buffer.extend_from_slice(&value.to_le_bytes());
        self
    }

    pub fn uint16(&mut self, value: u16) -> &mut Self {
        self.buffer.extend_from_slice(&value.to_le_bytes());
        self
    }

    pub fn int32(&mut self, value: i32) -> &mut Self {
        self.buffer.extend_from_slice(&value.to_le_bytes());
        self
    }

    pub fn uint32(&mut self, value: u32) -> &mut Self {
        self.buffer.extend_from_slice(&value.to_le_bytes());
        self
    }

    pub fn int64(&mut self, value: i64) -> &mut Self {
        self.buffer.extend_from_slice(&value.to_le_bytes());
        self
    }

    pub fn uint64(&mut self, value: u64) -> &mut Self {
        self.buffer.extend_from_slice(&value.to_le_bytes());
        self
    }

    pub fn float32(&mut self, value: f32) -> &mut Self {
        self.buffer.extend_from_slice(&value.to_le_bytes());
        self
    }

    pub fn float64(&mut self, value: f64) -> &mut Self {
        self.buffer.extend_from_slice(&value.to_le_bytes());
        self
    }

    /// Write a u32 count prefix.
    ///
    /// Counts above `u32::MAX` are not representable in ROS1 and saturate.
    pub fn length(&mut self, count: usize) -> &mut Self {
        self.uint32(u32::try_from(count).unwrap_or(u32::MAX))
    }

    /// Write a length-prefixed string, no terminator.
    pub fn string(&mut self, value: &str) -> &mut Self {
        self.length(value.len());
        self.buffer.extend_from_slice(value.as_bytes());
        self
    }

    /// Write raw bytes with no prefix.
    pub fn bytes(&mut self, data: &[u8]) -> &mut Self {
        self.buffer.extend_from_slice(data);
        self
    }

    pub fn time(&mut self, value: Time) -> &mut Self {
        self.uint32(value.secs).uint32(value.nsecs)
    }

    pub fn duration(&mut self, value: Duration) -> &mut Self {
        self.int32(value.secs).int32(value.nsecs)
    }

    /// Write signed bytes with no prefix.
    pub fn int8_array(&mut self, values: &[i8]) -> &mut Self {
        self.buffer.extend(values.iter().map(|&v| v as u8));
        self
    }

    /// Write unsigned bytes with no prefix.
    pub fn uint8_array(&mut self, values: &[u8]) -> &mut Self {
        self.bytes(values)
    }

    bulk_writer!(int16_array, i16, 2, write_i16_into);
    bulk_writer!(uint16_array, u16, 2, write_u16_into);
    bulk_writer!(int32_array, i32, 4, write_i32_into);
    bulk_writer!(uint32_array, u32, 4, write_u32_into);
    bulk_writer!(int64_array, i64, 8, write_i64_into);
    bulk_writer!(uint64_array, u64, 8, write_u64_into);
    bulk_writer!(float32_array, f32, 4, write_f32_into);
    bulk_writer!(
        /// Write little-endian doubles as one block with no prefix.
        float64_array,
        f64,
        8,
        write_f64_into
    );
}
