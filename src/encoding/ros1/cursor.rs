// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! ROS1 cursor for reading serialized message data.
//!
//! ROS1 has no encapsulation header and no alignment: every value starts
//! right where the previous one ended. Scalars are little-endian, strings
//! and dynamic arrays carry a u32 count prefix.
//!
//! Every read checks the bytes left in the buffer first, so a truncated
//! buffer surfaces as [`CodecError::OutOfData`] and never as a panic.

use byteorder::{ByteOrder, LittleEndian};

use crate::config::DecodeLimits;
use crate::core::{CodecError, Duration, Result as CoreResult, Time};

/// Read position over a borrowed ROS1 buffer.
///
/// # Example
///
/// ```
/// use roswire::encoding::ros1::WireCursor;
///
/// let data = [0x2A, 0x00, 0x00, 0x00, 0x01];
/// let mut cursor = WireCursor::new(&data);
/// assert_eq!(cursor.read_u32().unwrap(), 42);
/// assert!(cursor.read_bool().unwrap());
/// assert!(cursor.is_at_end());
/// ```
#[derive(Debug, Clone)]
pub struct WireCursor<'a> {
    data: &'a [u8],
    offset: usize,
    limits: DecodeLimits,
}

macro_rules! bulk_reader {
    ($(#[$doc:meta])* $name:ident, $ty:ty, $width:expr, $read_into:ident) => {
        $(#[$doc])*
        pub fn $name(&mut self, count: usize) -> CoreResult<Vec<$ty>> {
            let bytes = self.take_elements(count, $width)?;
            let mut out = vec![<$ty>::default(); count];
            LittleEndian::$read_into(bytes, &mut out);
            Ok(out)
        }
    };
}

impl<'a> WireCursor<'a> {
    /// Create a cursor at the start of `data` with default limits.
    pub fn new(data: &'a [u8]) -> Self {
        Self::at(data, 0)
    }

    /// Create a cursor at `position` within `data`.
    ///
    /// Used to decode one message out of a buffer holding several.
    pub fn at(data: &'a [u8], position: usize) -> Self {
        Self {
            data,
            offset: position.min(data.len()),
            limits: DecodeLimits::default(),
        }
    }

    /// Replace the limits applied to length prefixes.
    pub fn with_limits(mut self, limits: DecodeLimits) -> Self {
        self.limits = limits;
        self
    }

    /// Limits applied to length prefixes and nesting.
    #[inline]
    pub fn limits(&self) -> &DecodeLimits {
        &self.limits
    }

    /// Current read position.
    #[inline]
    pub fn position(&self) -> usize {
        self.offset
    }

    /// Bytes left to read.
    #[inline]
    pub fn remaining(&self) -> usize {
        self.data.len().saturating_sub(self.offset)
    }

    /// Check if at end of buffer.
    #[inline]
    pub fn is_at_end(&self) -> bool {
        self.offset >= self.data.len()
    }

    /// Take the next `count` bytes.
    pub fn read_bytes(&mut self, count: usize) -> CoreResult<&'a [u8]> {
        if count > self.remaining() {
            return Err(CodecError::out_of_data(
                count,
                self.remaining(),
                self.offset,
            ));
        }
        let start = self.offset;
        self.offset += count;
        Ok(&self.data[start..self.offset])
    }

    /// Skip bytes.
    pub fn skip(&mut self, count: usize) -> CoreResult<()> {
        self.read_bytes(count).map(|_| ())
    }

    fn read_array<const N: usize>(&mut self) -> CoreResult<[u8; N]> {
        let bytes = self.read_bytes(N)?;
        let mut out = [0u8; N];
        out.copy_from_slice(bytes);
        Ok(out)
    }

    /// Read a single byte.
    pub fn read_u8(&mut self) -> CoreResult<u8> {
        Ok(self.read_array::<1>()?[0])
    }

    /// Read a signed byte.
    pub fn read_i8(&mut self) -> CoreResult<i8> {
        Ok(i8::from_le_bytes(self.read_array()?))
    }

    /// Read a one-byte bool. Any non-zero byte is `true`.
    pub fn read_bool(&mut self) -> CoreResult<bool> {
        Ok(self.read_u8()? != 0)
    }

    pub fn read_u16(&mut self) -> CoreResult<u16> {
        Ok(u16::from_le_bytes(self.read_array()?))
    }

    pub fn read_i16(&mut self) -> CoreResult<i16> {
        Ok(i16::from_le_bytes(self.read_array()?))
    }

    pub fn read_u32(&mut self) -> CoreResult<u32> {
        Ok(u32::from_le_bytes(self.read_array()?))
    }

    pub fn read_i32(&mut self) -> CoreResult<i32> {
        Ok(i32::from_le_bytes(self.read_array()?))
    }

    pub fn read_u64(&mut self) -> CoreResult<u64> {
        Ok(u64::from_le_bytes(self.read_array()?))
    }

    pub fn read_i64(&mut self) -> CoreResult<i64> {
        Ok(i64::from_le_bytes(self.read_array()?))
    }

    pub fn read_f32(&mut self) -> CoreResult<f32> {
        Ok(f32::from_le_bytes(self.read_array()?))
    }

    pub fn read_f64(&mut self) -> CoreResult<f64> {
        Ok(f64::from_le_bytes(self.read_array()?))
    }

    /// Read a ROS1 `time` (u32 secs, u32 nsecs).
    pub fn read_time(&mut self) -> CoreResult<Time> {
        Ok(Time::new(self.read_u32()?, self.read_u32()?))
    }

    /// Read a ROS1 `duration` (i32 secs, i32 nsecs).
    pub fn read_duration(&mut self) -> CoreResult<Duration> {
        Ok(Duration::new(self.read_i32()?, self.read_i32()?))
    }

    /// Read a u32 element-count prefix.
    ///
    /// Fails with [`CodecError::MalformedLength`] when the count exceeds
    /// `max_array_length`.
    pub fn read_length(&mut self) -> CoreResult<usize> {
        let position = self.offset;
        let length = self.read_u32()? as usize;
        if length > self.limits.max_array_length {
            return Err(CodecError::malformed_length(
                length,
                self.limits.max_array_length,
                position,
            ));
        }
        Ok(length)
    }

    /// Read an element-count prefix and check that `count * min_element_size`
    /// bytes are still available.
    ///
    /// A prefix that promises more data than the buffer holds fails here with
    /// [`CodecError::OutOfData`], before anything is allocated.
    pub fn read_sequence_length(&mut self, min_element_size: usize) -> CoreResult<usize> {
        let count = self.read_length()?;
        self.ensure_elements(count, min_element_size)?;
        Ok(count)
    }

    /// Check a count that comes from the schema (`T[N]`) rather than the
    /// wire, with the same limit and remaining-bytes rules as
    /// [`WireCursor::read_sequence_length`].
    pub fn check_fixed_length(&self, count: usize, min_element_size: usize) -> CoreResult<usize> {
        if count > self.limits.max_array_length {
            return Err(CodecError::malformed_length(
                count,
                self.limits.max_array_length,
                self.offset,
            ));
        }
        self.ensure_elements(count, min_element_size)?;
        Ok(count)
    }

    fn ensure_elements(&self, count: usize, min_element_size: usize) -> CoreResult<()> {
        let needed = count.saturating_mul(min_element_size);
        if needed > self.remaining() {
            return Err(CodecError::out_of_data(
                needed,
                self.remaining(),
                self.offset,
            ));
        }
        Ok(())
    }

    /// Read a length-prefixed string.
    ///
    /// Invalid UTF-8 is replaced rather than rejected.
    pub fn read_string(&mut self) -> CoreResult<String> {
        let position = self.offset;
        let length = self.read_u32()? as usize;
        if length > self.limits.max_string_length {
            return Err(CodecError::malformed_length(
                length,
                self.limits.max_string_length,
                position,
            ));
        }
        let bytes = self.read_bytes(length)?;
        Ok(String::from_utf8_lossy(bytes).into_owned())
    }

    fn take_elements(&mut self, count: usize, width: usize) -> CoreResult<&'a [u8]> {
        let total = count.checked_mul(width).ok_or_else(|| {
            CodecError::out_of_data(usize::MAX, self.remaining(), self.offset)
        })?;
        self.read_bytes(total)
    }

    /// Read `count` signed bytes.
    pub fn read_i8_array(&mut self, count: usize) -> CoreResult<Vec<i8>> {
        let bytes = self.read_bytes(count)?;
        Ok(bytes.iter().map(|&b| b as i8).collect())
    }

    /// Read `count` unsigned bytes.
    pub fn read_u8_array(&mut self, count: usize) -> CoreResult<Vec<u8>> {
        Ok(self.read_bytes(count)?.to_vec())
    }

    bulk_reader!(read_i16_array, i16, 2, read_i16_into);
    bulk_reader!(read_u16_array, u16, 2, read_u16_into);
    bulk_reader!(read_i32_array, i32, 4, read_i32_into);
    bulk_reader!(read_u32_array, u32, 4, read_u32_into);
    bulk_reader!(read_i64_array, i64, 8, read_i64_into);
    bulk_reader!(read_u64_array, u64, 8, read_u64_into);
    bulk_reader!(read_f32_array, f32, 4, read_f32_into);
    bulk_reader!(
        /// Read `count` little-endian doubles as one block.
        read_f64_array,
        f64,
        8,
        read_f64_into
    );
}
