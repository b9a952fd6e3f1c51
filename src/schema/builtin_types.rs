// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Predefined ROS1 message types.
//!
//! A `.msg` file may reference these without shipping a dependency block;
//! the parser pulls them in when a reference is otherwise unresolved.
//!
//! ## Supported Types
//!
//! - `std_msgs/Header` - `uint32 seq`, `time stamp`, `string frame_id`
//! - `geometry_msgs/Point`, `geometry_msgs/Vector3` - three `float64`
//! - `geometry_msgs/Quaternion` - four `float64`
//! - `geometry_msgs/Pose` - a `Point` and a `Quaternion`

use crate::schema::ast::{Field, FieldType, MessageType, PrimitiveType};

fn primitive(name: &str, prim: PrimitiveType) -> Field {
    Field {
        name: name.to_string(),
        type_name: FieldType::Primitive(prim),
    }
}

fn float64_struct(type_name: &str, fields: &[&str]) -> MessageType {
    let mut msg_type = MessageType::new(type_name.to_string());
    for name in fields {
        msg_type.add_field(primitive(name, PrimitiveType::Float64));
    }
    msg_type
}

/// Create the predefined std_msgs/Header type.
///
/// ROS1 Header carries a sequence number ahead of the stamp.
fn builtin_header() -> MessageType {
    let mut msg_type = MessageType::new("std_msgs/Header".to_string());
    msg_type.add_field(primitive("seq", PrimitiveType::UInt32));
    msg_type.add_field(primitive("stamp", PrimitiveType::Time));
    msg_type.add_field(primitive("frame_id", PrimitiveType::String));
    msg_type
}

fn builtin_pose() -> MessageType {
    let mut msg_type = MessageType::new("geometry_msgs/Pose".to_string());
    msg_type.add_field(Field {
        name: "position".to_string(),
        type_name: FieldType::Nested("geometry_msgs/Point".to_string()),
    });
    msg_type.add_field(Field {
        name: "orientation".to_string(),
        type_name: FieldType::Nested("geometry_msgs/Quaternion".to_string()),
    });
    msg_type
}

/// Get all predefined builtin message types.
pub fn get_all() -> Vec<MessageType> {
    vec![
        builtin_header(),
        float64_struct("geometry_msgs/Point", &["x", "y", "z"]),
        float64_struct("geometry_msgs/Vector3", &["x", "y", "z"]),
        float64_struct("geometry_msgs/Quaternion", &["x", "y", "z", "w"]),
        builtin_pose(),
    ]
}

/// Look up a single builtin type by its full name.
pub fn get(name: &str) -> Option<MessageType> {
    get_all().into_iter().find(|t| t.name == name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_header_structure() {
        let header = builtin_header();

        assert_eq!(header.name, "std_msgs/Header");
        let names: Vec<&str> = header.fields.iter().map(|f| f.name.as_str()).collect();
        assert_eq!(names, vec!["seq", "stamp", "frame_id"]);
        assert!(matches!(
            header.fields[1].type_name,
            FieldType::Primitive(PrimitiveType::Time)
        ));
    }

    #[test]
    fn test_builtin_pose_nests_point_and_quaternion() {
        let pose = get("geometry_msgs/Pose").unwrap();
        assert_eq!(pose.fields.len(), 2);
        assert_eq!(
            pose.fields[1].type_name.nested_name(),
            Some("geometry_msgs/Quaternion")
        );
    }

    #[test]
    fn test_get_unknown() {
        assert!(get("nav_msgs/Path").is_none());
        assert_eq!(get_all().len(), 5);
    }
}
