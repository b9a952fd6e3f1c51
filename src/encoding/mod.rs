// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Message encoding/decoding implementations.
//!
//! This module provides:
//! - [`ros1`] - ROS1 wire format cursor, writer, decoder, encoder and size calculator
//! - [`json`] - JSON bridge for dynamic messages
//! - [`codec`] - Unified codec interface
//! - [`registry`] - Registry of built-in message types

pub mod codec;
pub mod json;
pub mod registry;
pub mod ros1;

pub use codec::{MessageCodec, Ros1Codec};
pub use json::JsonCodec;
pub use registry::{global_registry, MessageEntry, MessageRegistry};
pub use ros1::{Ros1Calculator, Ros1Decoder, Ros1Encoder, WireCursor, WireWriter};
