// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Core error types for roswire.
//!
//! Two errors come from the wire itself:
//! - [`CodecError::OutOfData`] when a read runs past the end of the buffer
//! - [`CodecError::MalformedLength`] when a length prefix is implausible
//!
//! Both are "out of data" in the sense of [`CodecError::is_out_of_data`].
//! The remaining variants belong to the schema and dynamic-value layers.

use std::fmt;

/// Errors that can occur while encoding or decoding ROS1 messages.
#[derive(Debug, Clone, PartialEq)]
pub enum CodecError {
    /// Decode attempted to read beyond the end of the buffer
    OutOfData {
        /// Requested bytes
        requested: usize,
        /// Bytes left in the buffer
        available: usize,
        /// Cursor position when the read was attempted
        position: usize,
    },

    /// A length prefix exceeds the configured limit
    MalformedLength {
        /// Length read from the wire
        length: usize,
        /// Limit in force
        limit: usize,
        /// Position of the length prefix
        position: usize,
    },

    /// Parse error in schema text or JSON input
    ParseError {
        /// What was being parsed
        context: String,
        /// Error message
        message: String,
    },

    /// Schema failed validation
    InvalidSchema {
        /// Schema name
        schema_name: String,
        /// Validation error message
        reason: String,
    },

    /// Type not found in a schema or registry
    TypeNotFound {
        /// Type name that was not found
        type_name: String,
    },

    /// Field decode error with context
    FieldDecodeError {
        /// Field name
        field_name: String,
        /// Field type
        field_type: String,
        /// Cursor position when error occurred
        position: usize,
        /// Underlying error
        cause: Box<CodecError>,
    },

    /// Dynamic value does not fit the schema
    EncodeError {
        /// Field path or context
        context: String,
        /// Error message
        message: String,
    },

    /// Nesting deeper than the configured maximum
    DepthExceeded {
        /// Maximum allowed depth
        max_depth: usize,
    },

    /// Other error
    Other(String),
}

impl CodecError {
    /// Create an out-of-data error.
    pub fn out_of_data(requested: usize, available: usize, position: usize) -> Self {
        CodecError::OutOfData {
            requested,
            available,
            position,
        }
    }

    /// Create a malformed length error.
    pub fn malformed_length(length: usize, limit: usize, position: usize) -> Self {
        CodecError::MalformedLength {
            length,
            limit,
            position,
        }
    }

    /// Create a parse error.
    pub fn parse(context: impl Into<String>, message: impl Into<String>) -> Self {
        CodecError::ParseError {
            context: context.into(),
            message: message.into(),
        }
    }

    /// Create an invalid schema error.
    pub fn invalid_schema(schema_name: impl Into<String>, reason: impl Into<String>) -> Self {
        CodecError::InvalidSchema {
            schema_name: schema_name.into(),
            reason: reason.into(),
        }
    }

    /// Create a "type not found" error.
    pub fn type_not_found(type_name: impl Into<String>) -> Self {
        CodecError::TypeNotFound {
            type_name: type_name.into(),
        }
    }

    /// Create an encode error.
    pub fn encode(context: impl Into<String>, message: impl Into<String>) -> Self {
        CodecError::EncodeError {
            context: context.into(),
            message: message.into(),
        }
    }

    /// Wrap an error with the field it occurred in.
    pub fn in_field(
        self,
        field_name: impl Into<String>,
        field_type: impl Into<String>,
        position: usize,
    ) -> Self {
        CodecError::FieldDecodeError {
            field_name: field_name.into(),
            field_type: field_type.into(),
            position,
            cause: Box::new(self),
        }
    }

    /// True for errors caused by a buffer that holds less data than it claims.
    ///
    /// Looks through [`CodecError::FieldDecodeError`] wrappers.
    pub fn is_out_of_data(&self) -> bool {
        match self {
            CodecError::OutOfData { .. } | CodecError::MalformedLength { .. } => true,
            CodecError::FieldDecodeError { cause, .. } => cause.is_out_of_data(),
            _ => false,
        }
    }

    /// Innermost error, skipping field context wrappers.
    pub fn root_cause(&self) -> &CodecError {
        match self {
            CodecError::FieldDecodeError { cause, .. } => cause.root_cause(),
            other => other,
        }
    }

    /// Get structured fields for logging.
    pub fn log_fields(&self) -> Vec<(&'static str, String)> {
        match self {
            CodecError::OutOfData {
                requested,
                available,
                position,
            } => vec![
                ("requested", requested.to_string()),
                ("available", available.to_string()),
                ("position", position.to_string()),
            ],
            CodecError::MalformedLength {
                length,
                limit,
                position,
            } => vec![
                ("length", length.to_string()),
                ("limit", limit.to_string()),
                ("position", position.to_string()),
            ],
            CodecError::ParseError { context, message } => {
                vec![("context", context.clone()), ("message", message.clone())]
            }
            CodecError::InvalidSchema {
                schema_name,
                reason,
            } => vec![("schema", schema_name.clone()), ("reason", reason.clone())],
            CodecError::TypeNotFound { type_name } => vec![("type", type_name.clone())],
            CodecError::FieldDecodeError {
                field_name,
                field_type,
                position,
                cause,
            } => vec![
                ("field", field_name.clone()),
                ("type", field_type.clone()),
                ("position", position.to_string()),
                ("cause", cause.to_string()),
            ],
            CodecError::EncodeError { context, message } => {
                vec![("context", context.clone()), ("message", message.clone())]
            }
            CodecError::DepthExceeded { max_depth } => {
                vec![("max_depth", max_depth.to_string())]
            }
            CodecError::Other(msg) => vec![("message", msg.clone())],
        }
    }
}

impl fmt::Display for CodecError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CodecError::OutOfData {
                requested,
                available,
                position,
            } => write!(
                f,
                "Ran out of bytes to read: requested {requested} bytes at position {position}, but only {available} bytes available"
            ),
            CodecError::MalformedLength {
                length,
                limit,
                position,
            } => write!(
                f,
                "Malformed length {length} at position {position} (limit: {limit})"
            ),
            CodecError::ParseError { context, message } => {
                write!(f, "Parse error in {context}: {message}")
            }
            CodecError::InvalidSchema {
                schema_name,
                reason,
            } => {
                write!(f, "Invalid schema '{schema_name}': {reason}")
            }
            CodecError::TypeNotFound { type_name } => {
                write!(f, "Type not found: '{type_name}'")
            }
            CodecError::FieldDecodeError {
                field_name,
                field_type,
                position,
                cause,
            } => write!(
                f,
                "Failed to decode field '{field_name}' (type: '{field_type}', position: {position}): {cause}"
            ),
            CodecError::EncodeError { context, message } => {
                write!(f, "Encode error in {context}: {message}")
            }
            CodecError::DepthExceeded { max_depth } => {
                write!(f, "Maximum nesting depth exceeded ({max_depth})")
            }
            CodecError::Other(msg) => write!(f, "Other error: {msg}"),
        }
    }
}

impl std::error::Error for CodecError {}

/// Result type for roswire operations.
pub type Result<T> = std::result::Result<T, CodecError>;
