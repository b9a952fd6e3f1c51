// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! # roswire
//!
//! ROS1 message wire-format codec.
//!
//! Messages are little-endian with no padding: scalars at their natural
//! width, strings and dynamic arrays behind a `u32` count, fixed arrays
//! without one, nested messages inlined. The library offers two faces over
//! the same format:
//! - **Typed** messages in [`message`] and [`msgs`], generated with
//!   [`ros_message!`], compiled to direct reads and writes
//! - **Dynamic** decoding and encoding in [`encoding::ros1`], driven by a
//!   [`MessageSchema`](schema::MessageSchema) parsed from `.msg` text
//!
//! ## Architecture
//!
//! - `core/` - Error type, dynamic values, thread-safe registry
//! - `config` - Decode limits from TOML or the environment
//! - `schema/` - `.msg` parser and schema AST
//! - `encoding/` - ROS1 wire codec, JSON bridge, message registry
//! - `message/` - Typed message traits, macros and random instances
//! - `msgs/` - Built-in message types
//!
//! ## Example: Typed round trip
//!
//! ```rust
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! use roswire::message::RosMessage;
//! use roswire::msgs::geometry_msgs::{Point, Pose, Quaternion};
//!
//! let pose = Pose {
//!     position: Point::new(1.0, 2.0, 3.0),
//!     orientation: Quaternion::identity(),
//! };
//! let bytes = pose.to_bytes();
//! assert_eq!(Pose::from_bytes(&bytes)?, pose);
//! # Ok(())
//! # }
//! ```
//!
//! ## Example: Decoding from a definition
//!
//! ```rust
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! use roswire::encoding::ros1::Ros1Decoder;
//! use roswire::schema::parse_schema;
//! use roswire::CodecValue;
//!
//! let schema = parse_schema("demo/Sample", "float64[] values")?;
//! let mut data = vec![1, 0, 0, 0];
//! data.extend_from_slice(&2.5f64.to_le_bytes());
//!
//! let message = Ros1Decoder::new().decode(&schema, &data)?;
//! assert_eq!(message["values"], CodecValue::Array(vec![CodecValue::Float64(2.5)]));
//! # Ok(())
//! # }
//! ```

// Core types
pub mod core;

// Re-export core types for convenience
pub use core::{CodecError, CodecValue, DecodedMessage, Duration, Result, Time};

// Decode limits
pub mod config;

pub use config::DecodeLimits;

// Schema parsing
pub mod schema;

pub use schema::{parse_schema, MessageSchema, PrimitiveType};

// Encoding/decoding
pub mod encoding;

// Typed messages
pub mod message;

pub use message::{Randomize, RosMessage, RosService, WireField};

// Built-in message types
pub mod msgs;
