// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! AST types for parsed ROS1 .msg schemas.

use std::collections::{HashMap, HashSet};
use std::fmt;

use crate::core::{CodecError, Result};

/// Separator line between the root message and each dependency block.
pub const DEFINITION_SEPARATOR: &str =
    "================================================================================";

/// A parsed ROS message schema.
#[derive(Debug, Clone, PartialEq)]
pub struct MessageSchema {
    /// Root type name (e.g., "geometry_msgs/PoseStamped")
    pub name: String,
    /// Package name (e.g., "geometry_msgs")
    pub package: Option<String>,
    /// All types defined in this schema (root type + nested types)
    pub types: HashMap<String, MessageType>,
}

/// A message type definition with its fields.
#[derive(Debug, Clone, PartialEq)]
pub struct MessageType {
    /// Type name including package if available
    pub name: String,
    /// Ordered list of fields; this is wire order
    pub fields: Vec<Field>,
    /// Constants declared alongside the fields; not on the wire
    pub constants: Vec<Constant>,
}

/// A field in a message type.
#[derive(Debug, Clone, PartialEq)]
pub struct Field {
    /// Field name
    pub name: String,
    /// Field type
    pub type_name: FieldType,
}

/// A constant declaration (`uint8 LEVEL_DEBUG=1`).
#[derive(Debug, Clone, PartialEq)]
pub struct Constant {
    pub name: String,
    pub type_name: PrimitiveType,
    /// Literal text as written, trimmed
    pub value: String,
}

/// Field type - can be primitive, array, or nested message.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldType {
    /// Primitive type
    Primitive(PrimitiveType),
    /// Array type
    Array {
        /// Base type (element type)
        base_type: Box<FieldType>,
        /// Array size (None = dynamic, Some(N) = fixed)
        size: Option<usize>,
    },
    /// Nested message type
    Nested(String),
}

/// Wire-level classification of a field.
///
/// Every [`FieldType`] maps onto exactly one kind. Array decoding and
/// encoding pick the bulk or per-element path from it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    /// One byte, 0 or 1
    Bool,
    /// Little-endian integer of the given byte width
    FixedInt { width: usize, signed: bool },
    /// Little-endian IEEE-754 float of the given byte width
    FixedFloat { width: usize },
    /// u32 byte-count prefix followed by the bytes
    String,
    /// Two little-endian 32-bit words (secs, nsecs)
    Temporal { signed: bool },
    /// Per-element array (strings, messages, time, bool)
    Array { fixed: Option<usize> },
    /// Numeric array copied as one contiguous block
    FixedNumericArray {
        element: PrimitiveType,
        fixed: Option<usize>,
    },
    /// Inlined sub-message, no prefix
    Nested,
}

/// Primitive ROS1 types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PrimitiveType {
    /// Boolean
    Bool,
    /// 8-bit signed integer
    Int8,
    /// 16-bit signed integer
    Int16,
    /// 32-bit signed integer
    Int32,
    /// 64-bit signed integer
    Int64,
    /// 8-bit unsigned integer
    UInt8,
    /// 16-bit unsigned integer
    UInt16,
    /// 32-bit unsigned integer
    UInt32,
    /// 64-bit unsigned integer
    UInt64,
    /// 32-bit float
    Float32,
    /// 64-bit float
    Float64,
    /// Length-prefixed string
    String,
    /// Deprecated alias for int8
    Byte,
    /// Deprecated alias for uint8
    Char,
    /// Time (secs:uint32, nsecs:uint32)
    Time,
    /// Duration (secs:int32, nsecs:int32)
    Duration,
}

impl PrimitiveType {
    /// Get the size in bytes for this primitive type, if fixed.
    pub fn size(self) -> Option<usize> {
        match self {
            PrimitiveType::Bool
            | PrimitiveType::Int8
            | PrimitiveType::UInt8
            | PrimitiveType::Byte
            | PrimitiveType::Char => Some(1),
            PrimitiveType::Int16 | PrimitiveType::UInt16 => Some(2),
            PrimitiveType::Int32 | PrimitiveType::UInt32 | PrimitiveType::Float32 => Some(4),
            PrimitiveType::Int64 | PrimitiveType::UInt64 | PrimitiveType::Float64 => Some(8),
            PrimitiveType::Time | PrimitiveType::Duration => Some(8),
            PrimitiveType::String => None,
        }
    }

    /// True for integer and float types, the ones eligible for bulk array copies.
    pub fn is_numeric(self) -> bool {
        !matches!(
            self,
            PrimitiveType::Bool
                | PrimitiveType::String
                | PrimitiveType::Time
                | PrimitiveType::Duration
        )
    }

    /// True for one-byte types whose arrays decode as raw bytes.
    pub fn is_octet(self) -> bool {
        matches!(
            self,
            PrimitiveType::UInt8 | PrimitiveType::Byte | PrimitiveType::Char
        )
    }

    /// Parse a primitive type from a string.
    pub fn try_from_str(s: &str) -> Option<Self> {
        match s {
            "bool" => Some(PrimitiveType::Bool),
            "int8" => Some(PrimitiveType::Int8),
            "int16" => Some(PrimitiveType::Int16),
            "int32" => Some(PrimitiveType::Int32),
            "int64" => Some(PrimitiveType::Int64),
            "uint8" => Some(PrimitiveType::UInt8),
            "uint16" => Some(PrimitiveType::UInt16),
            "uint32" => Some(PrimitiveType::UInt32),
            "uint64" => Some(PrimitiveType::UInt64),
            "float32" => Some(PrimitiveType::Float32),
            "float64" => Some(PrimitiveType::Float64),
            "string" => Some(PrimitiveType::String),
            "byte" => Some(PrimitiveType::Byte),
            "char" => Some(PrimitiveType::Char),
            "time" => Some(PrimitiveType::Time),
            "duration" => Some(PrimitiveType::Duration),
            _ => None,
        }
    }

    /// The `.msg` spelling of this type.
    pub fn as_str(self) -> &'static str {
        match self {
            PrimitiveType::Bool => "bool",
            PrimitiveType::Int8 => "int8",
            PrimitiveType::Int16 => "int16",
            PrimitiveType::Int32 => "int32",
            PrimitiveType::Int64 => "int64",
            PrimitiveType::UInt8 => "uint8",
            PrimitiveType::UInt16 => "uint16",
            PrimitiveType::UInt32 => "uint32",
            PrimitiveType::UInt64 => "uint64",
            PrimitiveType::Float32 => "float32",
            PrimitiveType::Float64 => "float64",
            PrimitiveType::String => "string",
            PrimitiveType::Byte => "byte",
            PrimitiveType::Char => "char",
            PrimitiveType::Time => "time",
            PrimitiveType::Duration => "duration",
        }
    }

    /// Wire classification of a scalar of this type.
    pub fn kind(self) -> FieldKind {
        match self {
            PrimitiveType::Bool => FieldKind::Bool,
            PrimitiveType::Int8 | PrimitiveType::Byte => FieldKind::FixedInt {
                width: 1,
                signed: true,
            },
            PrimitiveType::UInt8 | PrimitiveType::Char => FieldKind::FixedInt {
                width: 1,
                signed: false,
            },
            PrimitiveType::Int16 => FieldKind::FixedInt {
                width: 2,
                signed: true,
            },
            PrimitiveType::UInt16 => FieldKind::FixedInt {
                width: 2,
                signed: false,
            },
            PrimitiveType::Int32 => FieldKind::FixedInt {
                width: 4,
                signed: true,
            },
            PrimitiveType::UInt32 => FieldKind::FixedInt {
                width: 4,
                signed: false,
            },
            PrimitiveType::Int64 => FieldKind::FixedInt {
                width: 8,
                signed: true,
            },
            PrimitiveType::UInt64 => FieldKind::FixedInt {
                width: 8,
                signed: false,
            },
            PrimitiveType::Float32 => FieldKind::FixedFloat { width: 4 },
            PrimitiveType::Float64 => FieldKind::FixedFloat { width: 8 },
            PrimitiveType::String => FieldKind::String,
            PrimitiveType::Time => FieldKind::Temporal { signed: false },
            PrimitiveType::Duration => FieldKind::Temporal { signed: true },
        }
    }
}

impl fmt::Display for PrimitiveType {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FieldType {
    /// Wire classification of this field type.
    pub fn kind(&self) -> FieldKind {
        match self {
            FieldType::Primitive(prim) => prim.kind(),
            FieldType::Array { base_type, size } => match base_type.as_ref() {
                FieldType::Primitive(prim) if prim.is_numeric() => FieldKind::FixedNumericArray {
                    element: *prim,
                    fixed: *size,
                },
                _ => FieldKind::Array { fixed: *size },
            },
            FieldType::Nested(_) => FieldKind::Nested,
        }
    }

    /// Name of the nested message this type refers to, looking through arrays.
    pub fn nested_name(&self) -> Option<&str> {
        match self {
            FieldType::Nested(name) => Some(name),
            FieldType::Array { base_type, .. } => base_type.nested_name(),
            FieldType::Primitive(_) => None,
        }
    }

    /// Mutable access to the nested message name, looking through arrays.
    pub(crate) fn nested_name_mut(&mut self) -> Option<&mut String> {
        match self {
            FieldType::Nested(name) => Some(name),
            FieldType::Array { base_type, .. } => base_type.nested_name_mut(),
            FieldType::Primitive(_) => None,
        }
    }
}

impl fmt::Display for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            FieldType::Primitive(prim) => write!(f, "{prim}"),
            FieldType::Array {
                base_type,
                size: Some(n),
            } => write!(f, "{base_type}[{n}]"),
            FieldType::Array {
                base_type,
                size: None,
            } => write!(f, "{base_type}[]"),
            FieldType::Nested(name) => f.write_str(name),
        }
    }
}

impl MessageSchema {
    /// Create an empty schema.
    pub fn new(name: String) -> Self {
        Self {
            package: package_of(&name).map(str::to_string),
            name,
            types: HashMap::new(),
        }
    }

    /// Register a type in this schema.
    pub fn add_type(&mut self, msg_type: MessageType) {
        self.types.insert(msg_type.name.clone(), msg_type);
    }

    /// Look up a type by exact name.
    pub fn get_type(&self, name: &str) -> Option<&MessageType> {
        self.types.get(name)
    }

    /// The root message type.
    pub fn root(&self) -> Option<&MessageType> {
        self.types.get(&self.name)
    }

    /// Look up a type by name with variant resolution.
    ///
    /// Tries, in order:
    /// - Exact match
    /// - `Header` as `std_msgs/Header`
    /// - Without a `/msg/` infix (`std_msgs/msg/Header` -> `std_msgs/Header`)
    /// - Short name match (`Pose` -> `geometry_msgs/Pose`)
    pub fn get_type_variants(&self, name: &str) -> Option<&MessageType> {
        if let Some(t) = self.types.get(name) {
            return Some(t);
        }

        if name == "Header" {
            if let Some(t) = self.types.get("std_msgs/Header") {
                return Some(t);
            }
        }

        if name.contains("/msg/") {
            if let Some(t) = self.types.get(&name.replace("/msg/", "/")) {
                return Some(t);
            }
        }

        if !name.contains('/') {
            let suffix = format!("/{name}");
            let mut matches = self
                .types
                .iter()
                .filter(|(full_name, _)| full_name.ends_with(&suffix));
            if let (Some((_, t)), None) = (matches.next(), matches.next()) {
                return Some(t);
            }
        }

        None
    }

    /// Dependency type names in definition order: depth-first, first
    /// reference wins, root excluded.
    pub fn dependencies(&self) -> Vec<&str> {
        let mut seen: HashSet<&str> = HashSet::new();
        let mut order = Vec::new();
        seen.insert(self.name.as_str());
        if let Some(root) = self.root() {
            self.collect_dependencies(root, &mut seen, &mut order);
        }
        order
    }

    fn collect_dependencies<'a>(
        &'a self,
        msg_type: &'a MessageType,
        seen: &mut HashSet<&'a str>,
        order: &mut Vec<&'a str>,
    ) {
        for field in &msg_type.fields {
            let Some(nested) = field
                .type_name
                .nested_name()
                .and_then(|n| self.get_type_variants(n))
            else {
                continue;
            };
            if seen.insert(nested.name.as_str()) {
                order.push(nested.name.as_str());
                self.collect_dependencies(nested, seen, order);
            }
        }
    }

    /// Render the human-readable definition: root fields first, then each
    /// dependency under a separator and an `MSG:` header.
    ///
    /// The output parses back into an equivalent schema.
    pub fn definition(&self) -> String {
        let mut out = String::new();
        if let Some(root) = self.root() {
            root.write_body(&mut out);
        }
        for dep in self.dependencies() {
            if let Some(msg_type) = self.types.get(dep) {
                out.push_str(DEFINITION_SEPARATOR);
                out.push('\n');
                out.push_str("MSG: ");
                out.push_str(dep);
                out.push('\n');
                msg_type.write_body(&mut out);
            }
        }
        out
    }

    /// Check that every nested reference resolves and no type contains itself.
    pub fn validate(&self) -> Result<()> {
        let root = self
            .root()
            .ok_or_else(|| CodecError::invalid_schema(&self.name, "root type not defined"))?;

        for msg_type in self.types.values() {
            for field in &msg_type.fields {
                if let Some(nested) = field.type_name.nested_name() {
                    if self.get_type_variants(nested).is_none() {
                        return Err(CodecError::invalid_schema(
                            &self.name,
                            format!(
                                "field '{}.{}' references unknown type '{nested}'",
                                msg_type.name, field.name
                            ),
                        ));
                    }
                }
            }
        }

        let mut stack = Vec::new();
        self.check_cycles(root, &mut stack)
    }

    fn check_cycles<'a>(&'a self, msg_type: &'a MessageType, stack: &mut Vec<&'a str>) -> Result<()> {
        if stack.contains(&msg_type.name.as_str()) {
            return Err(CodecError::invalid_schema(
                &self.name,
                format!("type '{}' contains itself", msg_type.name),
            ));
        }
        stack.push(msg_type.name.as_str());
        for field in &msg_type.fields {
            // ROS1 tooling rejects recursive definitions, so any self
            // reference is an error.
            if let Some(nested) = field
                .type_name
                .nested_name()
                .and_then(|n| self.get_type_variants(n))
            {
                self.check_cycles(nested, stack)?;
            }
        }
        stack.pop();
        Ok(())
    }
}

impl MessageType {
    /// Create a new message type.
    pub fn new(name: String) -> Self {
        Self {
            name,
            fields: Vec::new(),
            constants: Vec::new(),
        }
    }

    /// Add a field to this message type.
    pub fn add_field(&mut self, field: Field) {
        self.fields.push(field);
    }

    /// Append the `.msg` body (constants, then fields) to `out`.
    fn write_body(&self, out: &mut String) {
        for constant in &self.constants {
            out.push_str(&format!(
                "{} {}={}\n",
                constant.type_name, constant.name, constant.value
            ));
        }
        for field in &self.fields {
            out.push_str(&format!("{} {}\n", field.type_name, field.name));
        }
    }
}

/// Extract package name from a fully-qualified type name.
pub(crate) fn package_of(name: &str) -> Option<&str> {
    name.split_once('/').map(|(package, _)| package)
}
