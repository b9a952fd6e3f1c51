// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Schema parser implementations.

pub mod msg_parser;

use crate::core::Result;
use crate::schema::MessageSchema;

/// Parse and validate a ROS1 message definition.
///
/// # Arguments
///
/// * `name` - Fully qualified root type name (e.g., "geometry_msgs/PoseStamped")
/// * `definition` - Definition text, optionally with `MSG:` dependency blocks
///
/// # Returns
///
/// A `MessageSchema` whose nested references all resolve.
pub fn parse_schema(name: &str, definition: &str) -> Result<MessageSchema> {
    let schema = msg_parser::parse(name, definition)?;
    schema.validate()?;
    Ok(schema)
}
