// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! ROS1 wire format.
//!
//! Little-endian, unaligned, no encapsulation header:
//! - `bool` is one byte, integers and floats their natural width
//! - `string` and `T[]` carry a u32 count prefix, `T[N]` carries none
//! - `time` and `duration` are two 32-bit words
//! - nested messages are inlined
//!
//! [`WireCursor`] and [`WireWriter`] are shared by the schema-driven
//! [`Ros1Decoder`]/[`Ros1Encoder`] and by typed messages, so both produce
//! the same bytes for the same value.

pub mod calculator;
pub mod cursor;
pub mod decoder;
pub mod encoder;
pub mod writer;

pub use calculator::{min_size, Ros1Calculator};
pub use cursor::WireCursor;
pub use decoder::Ros1Decoder;
pub use encoder::{default_value, normalize, Ros1Encoder};
pub use writer::WireWriter;

pub use crate::config::MAX_DEPTH;
