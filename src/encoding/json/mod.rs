// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! JSON codec module.
//!
//! Provides conversion between dynamic messages and JSON.

pub mod codec;

pub use codec::JsonCodec;
