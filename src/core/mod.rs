// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Core types used throughout roswire.
//!
//! This module provides the foundational types for the library:
//! - [`CodecError`] - Error handling for the wire and schema layers
//! - [`CodecValue`] - Dynamic value representation
//! - [`TypeRegistry`] - Thread-safe name -> entry registry

pub mod error;
pub mod registry;
pub mod value;

pub use error::{CodecError, Result};
pub use registry::TypeRegistry;
pub use value::{CodecValue, DecodedMessage, Duration, Time};
