// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Built-in message types.
//!
//! A representative set covering every wire shape: scalars, strings,
//! numeric and string arrays, nested messages, arrays of nested messages and
//! a service pair. Each type is registered in
//! [`global_registry`](crate::encoding::registry::global_registry).

pub mod geometry_msgs;
pub mod motion_msgs;
pub mod sensor_msgs;
pub mod std_msgs;
