// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! MSG format parser using Pest.
//!
//! This module handles parsing of ROS1 .msg definitions, including the
//! concatenated form a publisher ships on the wire:
//! - Simple field lists (root message)
//! - Constants: `uint8 LEVEL=1`, `string NAME=hello # kept verbatim`
//! - Dependency blocks with "MSG: package/Type" headers after a `===` line
//! - Array types: T[] (dynamic) or T[n] (fixed)
//! - Nested types: `package/Type`, `Type` (same package) or `Header`
//! - Comments (# style)
//!
//! After the text is read, nested references are resolved to the fully
//! qualified names of types in the schema. Well-known types that the text
//! references without a dependency block are pulled in from
//! [`builtin_types`](crate::schema::builtin_types).

use crate::core::CodecError;
use crate::core::Result as CoreResult;
use crate::schema::ast::{package_of, Constant, Field, FieldType, MessageSchema, MessageType};
use crate::schema::ast::PrimitiveType;
use crate::schema::builtin_types;
use pest::iterators::Pair;
use pest::Parser;
use pest_derive::Parser;

/// Pest parser for ROS .msg schema files.
#[derive(Parser)]
#[grammar = "schema/parser/msg_parser/msg.pest"] // Path relative to src/ directory
pub struct MsgParser;

/// Parse a ROS1 .msg definition into a schema rooted at `name`.
///
/// Does not validate; see [`parse_schema`](crate::schema::parse_schema) for
/// the checked variant.
pub fn parse(name: &str, definition: &str) -> CoreResult<MessageSchema> {
    let mut pairs = MsgParser::parse(Rule::file, definition)
        .map_err(|e| CodecError::parse("msg schema", format!("{e}")))?;
    let file = pairs
        .next()
        .ok_or_else(|| CodecError::parse("msg schema", "empty parse tree"))?;

    let mut schema = MessageSchema::new(name.to_string());
    let mut current = MessageType::new(name.to_string());
    // Set after a separator line until the next "MSG:" header.
    let mut awaiting_header = false;

    for line in file.into_inner() {
        if line.as_rule() != Rule::line {
            continue;
        }
        let line_no = line.as_span().start_pos().line_col().0;
        for item in line.into_inner() {
            match item.as_rule() {
                Rule::separator => awaiting_header = true,
                Rule::dependency_header => {
                    let dep_name = item
                        .into_inner()
                        .next()
                        .map(|p| p.as_str().to_string())
                        .unwrap_or_default();
                    let finished = std::mem::replace(&mut current, MessageType::new(dep_name));
                    schema.add_type(finished);
                    awaiting_header = false;
                }
                Rule::constant_decl | Rule::field_decl if awaiting_header => {
                    return Err(CodecError::parse(
                        "msg schema",
                        format!("line {line_no}: declaration after separator without MSG: header"),
                    ));
                }
                Rule::constant_decl => {
                    let constant = parse_constant(item, line_no)?;
                    current.constants.push(constant);
                }
                Rule::field_decl => {
                    let field = parse_field(item, line_no)?;
                    if current.fields.iter().any(|f| f.name == field.name) {
                        return Err(CodecError::invalid_schema(
                            &current.name,
                            format!("duplicate field '{}'", field.name),
                        ));
                    }
                    current.add_field(field);
                }
                _ => {}
            }
        }
    }
    schema.add_type(current);

    resolve_references(&mut schema);
    Ok(schema)
}

/// Build a field from `type_name array_suffix? identifier`.
fn parse_field(pair: Pair<Rule>, line_no: usize) -> CoreResult<Field> {
    let mut type_str = "";
    let mut array: Option<Option<usize>> = None;
    let mut field_name = "";

    for part in pair.into_inner() {
        match part.as_rule() {
            Rule::type_name => type_str = part.as_str(),
            Rule::array_suffix => {
                let digits = part.as_str().trim_start_matches('[').trim_end_matches(']');
                let size = if digits.is_empty() {
                    None
                } else {
                    Some(digits.parse::<usize>().map_err(|_| {
                        CodecError::parse(
                            "msg schema",
                            format!("line {line_no}: invalid array size '{digits}'"),
                        )
                    })?)
                };
                array = Some(size);
            }
            Rule::identifier => field_name = part.as_str(),
            _ => {}
        }
    }

    let base = match PrimitiveType::try_from_str(type_str) {
        Some(prim) => FieldType::Primitive(prim),
        None => FieldType::Nested(type_str.to_string()),
    };
    let type_name = match array {
        Some(size) => FieldType::Array {
            base_type: Box::new(base),
            size,
        },
        None => base,
    };

    Ok(Field {
        name: field_name.to_string(),
        type_name,
    })
}

/// Build a constant from `type_name identifier = value`.
///
/// String constants keep everything after `=` (a `#` is part of the value);
/// other constants drop a trailing comment.
fn parse_constant(pair: Pair<Rule>, line_no: usize) -> CoreResult<Constant> {
    let mut type_str = "";
    let mut name = "";
    let mut raw = "";

    for part in pair.into_inner() {
        match part.as_rule() {
            Rule::type_name => type_str = part.as_str(),
            Rule::identifier => name = part.as_str(),
            Rule::constant_value => raw = part.as_str(),
            _ => {}
        }
    }

    let prim = PrimitiveType::try_from_str(type_str)
        .filter(|p| !matches!(p, PrimitiveType::Time | PrimitiveType::Duration))
        .ok_or_else(|| {
            CodecError::parse(
                "msg schema",
                format!("line {line_no}: constant '{name}' has non-primitive type '{type_str}'"),
            )
        })?;

    let value = if prim == PrimitiveType::String {
        raw.trim()
    } else {
        raw.split('#').next().unwrap_or_default().trim()
    };

    if prim != PrimitiveType::String && !constant_value_fits(prim, value) {
        return Err(CodecError::parse(
            "msg schema",
            format!("line {line_no}: invalid {prim} constant '{name}={value}'"),
        ));
    }

    Ok(Constant {
        name: name.to_string(),
        type_name: prim,
        value: value.to_string(),
    })
}

fn constant_value_fits(prim: PrimitiveType, value: &str) -> bool {
    match prim {
        PrimitiveType::Bool => matches!(value, "true" | "false" | "True" | "False" | "0" | "1"),
        PrimitiveType::Int8 | PrimitiveType::Byte => value.parse::<i8>().is_ok(),
        PrimitiveType::Int16 => value.parse::<i16>().is_ok(),
        PrimitiveType::Int32 => value.parse::<i32>().is_ok(),
        PrimitiveType::Int64 => value.parse::<i64>().is_ok(),
        PrimitiveType::UInt8 | PrimitiveType::Char => value.parse::<u8>().is_ok(),
        PrimitiveType::UInt16 => value.parse::<u16>().is_ok(),
        PrimitiveType::UInt32 => value.parse::<u32>().is_ok(),
        PrimitiveType::UInt64 => value.parse::<u64>().is_ok(),
        PrimitiveType::Float32 | PrimitiveType::Float64 => value.parse::<f64>().is_ok(),
        PrimitiveType::String | PrimitiveType::Time | PrimitiveType::Duration => true,
    }
}

/// Rewrite every nested reference to the full name of a type in the schema,
/// pulling in builtin types as needed. References that resolve to nothing are
/// left as written for [`MessageSchema::validate`] to report.
fn resolve_references(schema: &mut MessageSchema) {
    loop {
        let mut added = false;
        let type_names: Vec<String> = schema.types.keys().cloned().collect();

        for type_name in type_names {
            let owner_package = package_of(&type_name).map(str::to_string);
            let Some(msg_type) = schema.types.get(&type_name) else {
                continue;
            };

            let mut rewrites: Vec<(usize, String)> = Vec::new();
            let mut imports: Vec<MessageType> = Vec::new();
            for (index, field) in msg_type.fields.iter().enumerate() {
                let Some(reference) = field.type_name.nested_name() else {
                    continue;
                };
                if let Some(resolved) = resolve_in_schema(schema, owner_package.as_deref(), reference)
                {
                    if resolved != reference {
                        rewrites.push((index, resolved));
                    }
                    continue;
                }
                if let Some(builtin) = resolve_builtin(owner_package.as_deref(), reference) {
                    tracing::debug!(
                        reference = %reference,
                        builtin = %builtin.name,
                        "pulling builtin type into schema"
                    );
                    rewrites.push((index, builtin.name.clone()));
                    if !imports.iter().any(|t| t.name == builtin.name) {
                        imports.push(builtin);
                    }
                }
            }

            if let Some(msg_type) = schema.types.get_mut(&type_name) {
                for (index, resolved) in rewrites {
                    if let Some(name) = msg_type.fields[index].type_name.nested_name_mut() {
                        *name = resolved;
                    }
                }
            }
            for builtin in imports {
                if !schema.types.contains_key(&builtin.name) {
                    schema.add_type(builtin);
                    added = true;
                }
            }
        }

        if !added {
            break;
        }
    }
}

/// Candidate full names for a reference written inside `owner_package`.
fn candidates(owner_package: Option<&str>, reference: &str) -> Vec<String> {
    let mut names = vec![reference.to_string()];
    if reference == "Header" {
        names.push("std_msgs/Header".to_string());
    }
    if reference.contains("/msg/") {
        names.push(reference.replace("/msg/", "/"));
    }
    if !reference.contains('/') {
        if let Some(package) = owner_package {
            names.push(format!("{package}/{reference}"));
        }
    }
    names
}

fn resolve_in_schema(
    schema: &MessageSchema,
    owner_package: Option<&str>,
    reference: &str,
) -> Option<String> {
    for name in candidates(owner_package, reference) {
        if schema.types.contains_key(&name) {
            return Some(name);
        }
    }
    schema
        .get_type_variants(reference)
        .map(|t| t.name.clone())
}

fn resolve_builtin(owner_package: Option<&str>, reference: &str) -> Option<MessageType> {
    for name in candidates(owner_package, reference) {
        if let Some(builtin) = builtin_types::get(&name) {
            return Some(builtin);
        }
    }
    if reference.contains('/') {
        return None;
    }
    let suffix = format!("/{reference}");
    let mut matches = builtin_types::get_all()
        .into_iter()
        .filter(|t| t.name.ends_with(&suffix));
    match (matches.next(), matches.next()) {
        (Some(t), None) => Some(t),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_simple_field() {
        let schema = parse("test/TestMsg", "int32 value").unwrap();
        let msg_type = schema.get_type("test/TestMsg").unwrap();

        assert_eq!(msg_type.fields.len(), 1);
        assert_eq!(msg_type.fields[0].name, "value");
        assert_eq!(
            msg_type.fields[0].type_name,
            FieldType::Primitive(PrimitiveType::Int32)
        );
    }

    #[test]
    fn test_parse_multiple_fields() {
        let schema = parse("test/TestMsg", "int32 x\nint32 y").unwrap();
        let msg_type = schema.get_type("test/TestMsg").unwrap();

        assert_eq!(msg_type.fields.len(), 2);
        assert_eq!(msg_type.fields[0].name, "x");
        assert_eq!(msg_type.fields[1].name, "y");
    }

    #[test]
    fn test_parse_dynamic_array() {
        let schema = parse("test/TestMsg", "int32[] values").unwrap();
        let msg_type = schema.get_type("test/TestMsg").unwrap();

        match &msg_type.fields[0].type_name {
            FieldType::Array { size, .. } => {
                assert!(size.is_none(), "Expected dynamic array");
            }
            _ => panic!("Expected Array type"),
        }
    }

    #[test]
    fn test_parse_fixed_array() {
        let schema = parse("test/TestMsg", "float32[3] position").unwrap();
        let msg_type = schema.get_type("test/TestMsg").unwrap();

        assert_eq!(msg_type.fields[0].name, "position");
        match &msg_type.fields[0].type_name {
            FieldType::Array { size, .. } => {
                assert_eq!(*size, Some(3));
            }
            _ => panic!("Expected Array type"),
        }
    }

    #[test]
    fn test_parse_with_comments_and_blank_lines() {
        let msg = "# This is a comment\n\n  int32 value  # trailing\n\t\n";
        let schema = parse("test/TestMsg", msg).unwrap();
        let msg_type = schema.get_type("test/TestMsg").unwrap();

        assert_eq!(msg_type.fields.len(), 1);
        assert_eq!(msg_type.fields[0].name, "value");
    }

    #[test]
    fn test_parse_crlf_line_endings() {
        let schema = parse("test/TestMsg", "int32 a\r\nint32 b\r\n").unwrap();
        assert_eq!(schema.get_type("test/TestMsg").unwrap().fields.len(), 2);
    }

    #[test]
    fn test_parse_constants() {
        let msg = "uint8 DEBUG=1\nint32 MIN = -5 # lowest\nstring GREETING=hi # there\nuint8 level";
        let schema = parse("test/Log", msg).unwrap();
        let msg_type = schema.get_type("test/Log").unwrap();

        assert_eq!(msg_type.fields.len(), 1);
        assert_eq!(msg_type.constants.len(), 3);
        assert_eq!(msg_type.constants[0].value, "1");
        assert_eq!(msg_type.constants[1].value, "-5");
        assert_eq!(msg_type.constants[2].value, "hi # there");
    }

    #[test]
    fn test_parse_rejects_out_of_range_constant() {
        assert!(parse("test/Log", "uint8 BIG=300").is_err());
        assert!(parse("test/Log", "time T=1").is_err());
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!(parse("test/Bad", "int32 value extra").is_err());
        assert!(parse("test/Bad", "int32").is_err());
        assert!(parse("test/Bad", "int32[x] value").is_err());
    }

    #[test]
    fn test_parse_rejects_duplicate_field() {
        let err = parse("test/Dup", "int32 a\nint32 a").unwrap_err();
        assert!(matches!(err, CodecError::InvalidSchema { .. }));
    }

    #[test]
    fn test_parse_dependency_blocks() {
        let msg = "Header header\nPose pose\n\
                   ================================================================================\n\
                   MSG: std_msgs/Header\nuint32 seq\ntime stamp\nstring frame_id\n\
                   ================================================================================\n\
                   MSG: geometry_msgs/Pose\nPoint position\nQuaternion orientation\n\
                   ================================================================================\n\
                   MSG: geometry_msgs/Point\nfloat64 x\nfloat64 y\nfloat64 z\n\
                   ================================================================================\n\
                   MSG: geometry_msgs/Quaternion\nfloat64 x\nfloat64 y\nfloat64 z\nfloat64 w\n";
        let schema = parse("geometry_msgs/PoseStamped", msg).unwrap();

        assert_eq!(schema.types.len(), 5);
        let root = schema.root().unwrap();
        assert_eq!(root.fields[0].type_name.nested_name(), Some("std_msgs/Header"));
        assert_eq!(root.fields[1].type_name.nested_name(), Some("geometry_msgs/Pose"));

        let pose = schema.get_type("geometry_msgs/Pose").unwrap();
        assert_eq!(pose.fields[0].type_name.nested_name(), Some("geometry_msgs/Point"));
        assert!(schema.validate().is_ok());
    }

    #[test]
    fn test_builtins_are_pulled_in() {
        let schema = parse("motion_msgs/Target", "Header header\ngeometry_msgs/Pose[] poses").unwrap();

        assert!(schema.get_type("std_msgs/Header").is_some());
        assert!(schema.get_type("geometry_msgs/Pose").is_some());
        assert!(schema.get_type("geometry_msgs/Point").is_some());
        assert!(schema.get_type("geometry_msgs/Quaternion").is_some());
        assert!(schema.validate().is_ok());
    }

    #[test]
    fn test_unknown_reference_is_left_for_validation() {
        let schema = parse("test/Msg", "nav_msgs/Path path").unwrap();
        assert!(schema.validate().is_err());
    }

    #[test]
    fn test_declaration_after_separator_requires_header() {
        let msg = "int32 a\n===\nint32 b\n";
        assert!(parse("test/Msg", msg).is_err());
    }

    #[test]
    fn test_parse_definition_round_trip() {
        let msg = "uint8 MODE=2\nHeader header\nstring[] name\nfloat64[6] covariance";
        let schema = parse("test/Msg", msg).unwrap();
        let reparsed = parse("test/Msg", &schema.definition()).unwrap();
        assert_eq!(schema, reparsed);
    }
}
