// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Schema parsing for ROS1 `.msg` definitions.
//!
//! A [`MessageSchema`] holds the root type and every type it depends on.
//! It drives the dynamic encoder and decoder, and it is what a typed
//! message's `definition()` text parses back into.

pub mod ast;
pub mod builtin_types;
pub mod parser;

pub use ast::{
    Constant, Field, FieldKind, FieldType, MessageSchema, MessageType, PrimitiveType,
    DEFINITION_SEPARATOR,
};
pub use parser::{msg_parser, parse_schema};
