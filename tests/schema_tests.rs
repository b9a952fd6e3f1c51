// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Schema parsing integration tests.
//!
//! Tests cover:
//! - Full concatenated definitions with `MSG:` dependency blocks
//! - Reference resolution (same package, `Header`, builtins)
//! - Definition rendering and re-parsing
//! - Typed definitions matching parsed schemas
//! - Rejection of malformed and unresolvable definitions

use roswire::encoding::registry::global_registry;
use roswire::message::RosMessage;
use roswire::msgs::geometry_msgs::PoseStamped;
use roswire::msgs::motion_msgs::CartesianPath;
use roswire::schema::{FieldType, DEFINITION_SEPARATOR};
use roswire::{parse_schema, CodecError, PrimitiveType};

const POSE_STAMPED: &str = "\
# A Pose with reference coordinate frame and timestamp
Header header
Pose pose

================================================================================
MSG: std_msgs/Header
# sequence ID
uint32 seq
time stamp
string frame_id

================================================================================
MSG: geometry_msgs/Pose
Point position
Quaternion orientation

================================================================================
MSG: geometry_msgs/Point
float64 x
float64 y
float64 z

================================================================================
MSG: geometry_msgs/Quaternion
float64 x
float64 y
float64 z
float64 w
";

#[test]
fn test_parse_full_definition() {
    let schema = parse_schema("geometry_msgs/PoseStamped", POSE_STAMPED).unwrap();

    assert_eq!(schema.package.as_deref(), Some("geometry_msgs"));
    assert_eq!(schema.types.len(), 5);
    assert_eq!(
        schema.dependencies(),
        vec![
            "std_msgs/Header",
            "geometry_msgs/Pose",
            "geometry_msgs/Point",
            "geometry_msgs/Quaternion",
        ]
    );

    // Same-package and Header references resolve to full names.
    let root = schema.root().unwrap();
    assert_eq!(
        root.fields[0].type_name,
        FieldType::Nested("std_msgs/Header".into())
    );
    let pose = schema.get_type("geometry_msgs/Pose").unwrap();
    assert_eq!(
        pose.fields[1].type_name,
        FieldType::Nested("geometry_msgs/Quaternion".into())
    );
}

#[test]
fn test_rendered_definition_reparses() {
    let schema = parse_schema("geometry_msgs/PoseStamped", POSE_STAMPED).unwrap();
    let rendered = schema.definition();

    assert!(rendered.starts_with("std_msgs/Header header\ngeometry_msgs/Pose pose\n"));
    assert_eq!(rendered.matches(DEFINITION_SEPARATOR).count(), 4);

    let reparsed = parse_schema("geometry_msgs/PoseStamped", &rendered).unwrap();
    assert_eq!(reparsed, schema);
    assert_eq!(reparsed.definition(), rendered);
}

#[test]
fn test_typed_definitions_match_parsed_schemas() {
    let registry = global_registry();
    for name in registry.names().unwrap() {
        let entry = registry.entry(&name).unwrap();
        let schema = entry.schema().unwrap_or_else(|e| panic!("{name}: {e}"));
        assert_eq!(schema.definition(), entry.definition, "{name}");
    }
}

#[test]
fn test_typed_definition_equals_hand_written() {
    let parsed = parse_schema("geometry_msgs/PoseStamped", POSE_STAMPED).unwrap();
    assert_eq!(PoseStamped::definition(), parsed.definition());
}

#[test]
fn test_dependencies_are_listed_once() {
    // Header appears at depth one and again inside every PoseStamped.
    let schema = CartesianPath::schema().unwrap();
    let deps = schema.dependencies();
    assert_eq!(
        deps,
        vec![
            "std_msgs/Header",
            "geometry_msgs/PoseStamped",
            "geometry_msgs/Pose",
            "geometry_msgs/Point",
            "geometry_msgs/Quaternion",
        ]
    );
    assert_eq!(CartesianPath::dependency_names(), deps);
}

#[test]
fn test_builtin_types_fill_missing_blocks() {
    let schema = parse_schema("demo/Stamped", "Header header\ngeometry_msgs/Pose[] poses").unwrap();

    assert!(schema.get_type("std_msgs/Header").is_some());
    assert!(schema.get_type("geometry_msgs/Point").is_some());
    assert!(schema.get_type("geometry_msgs/Quaternion").is_some());
    assert_eq!(schema.types.len(), 5);
}

#[test]
fn test_explicit_block_overrides_builtin() {
    let definition = format!(
        "Header header\n{DEFINITION_SEPARATOR}\nMSG: std_msgs/Header\ntime stamp\nstring frame_id\n"
    );
    let schema = parse_schema("demo/Ros2Style", &definition).unwrap();
    let header = schema.get_type("std_msgs/Header").unwrap();
    assert_eq!(header.fields.len(), 2);
    assert_eq!(header.fields[0].name, "stamp");
}

#[test]
fn test_constants_are_not_fields() {
    let schema = parse_schema(
        "demo/Status",
        "byte OK=0\nbyte ERROR=2\nstring NAME=status # not a comment\nbyte level\nchar[2] code",
    )
    .unwrap();
    let root = schema.root().unwrap();

    assert_eq!(root.constants.len(), 3);
    assert_eq!(root.constants[2].value, "status # not a comment");
    assert_eq!(root.fields.len(), 2);
    assert_eq!(
        root.fields[0].type_name,
        FieldType::Primitive(PrimitiveType::Byte)
    );
    assert!(schema
        .definition()
        .starts_with("byte OK=0\nbyte ERROR=2\nstring NAME=status # not a comment\n"));
}

#[test]
fn test_empty_definition() {
    let schema = parse_schema("std_msgs/Empty", "").unwrap();
    assert!(schema.root().unwrap().fields.is_empty());
    assert_eq!(schema.definition(), "");
}

#[test]
fn test_unknown_reference_is_rejected() {
    let err = parse_schema("demo/Broken", "int32 a\nmissing_msgs/Thing thing").unwrap_err();
    match err {
        CodecError::InvalidSchema { reason, .. } => {
            assert!(reason.contains("missing_msgs/Thing"), "{reason}");
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn test_recursive_type_is_rejected() {
    let definition = format!("Node root\n{DEFINITION_SEPARATOR}\nMSG: demo/Node\nint32 value\nNode[] children\n");
    let err = parse_schema("demo/Tree", &definition).unwrap_err();
    assert!(matches!(err, CodecError::InvalidSchema { .. }));
}

#[test]
fn test_field_after_separator_needs_header() {
    let definition = format!("int32 a\n{DEFINITION_SEPARATOR}\nint32 b\n");
    let err = parse_schema("demo/Orphan", &definition).unwrap_err();
    assert!(matches!(err, CodecError::ParseError { .. }));
}

#[test]
fn test_malformed_lines_are_rejected() {
    for definition in [
        "int32",
        "int32 a b",
        "float64[-1] values",
        "string 1name",
        "uint8 LEVEL=256",
    ] {
        assert!(
            parse_schema("demo/Bad", definition).is_err(),
            "accepted {definition:?}"
        );
    }
}
