// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! `geometry_msgs` types.

use super::std_msgs::Header;

crate::ros_message! {
    /// Position in free space.
    pub struct Point("geometry_msgs/Point") {
        pub x: f64,
        pub y: f64,
        pub z: f64,
    }
}

impl Point {
    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }
}

crate::ros_message! {
    /// Orientation as a quaternion.
    pub struct Quaternion("geometry_msgs/Quaternion") {
        pub x: f64,
        pub y: f64,
        pub z: f64,
        pub w: f64,
    }
}

impl Quaternion {
    pub const fn new(x: f64, y: f64, z: f64, w: f64) -> Self {
        Self { x, y, z, w }
    }

    /// No rotation.
    pub const fn identity() -> Self {
        Self::new(0.0, 0.0, 0.0, 1.0)
    }
}

crate::ros_message! {
    pub struct Pose("geometry_msgs/Pose") {
        pub position: Point,
        pub orientation: Quaternion,
    }
}

crate::ros_message! {
    /// A pose with a reference frame and timestamp.
    pub struct PoseStamped("geometry_msgs/PoseStamped") {
        pub header: Header,
        pub pose: Pose,
    }
}

crate::ros_message! {
    pub struct Vector3("geometry_msgs/Vector3") {
        pub x: f64,
        pub y: f64,
        pub z: f64,
    }
}

impl Vector3 {
    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }
}

crate::ros_message! {
    /// Velocity split into linear and angular parts.
    pub struct Twist("geometry_msgs/Twist") {
        pub linear: Vector3,
        pub angular: Vector3,
    }
}
