// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! `sensor_msgs` types.

use super::std_msgs::Header;

crate::ros_message! {
    /// State of a set of named joints.
    ///
    /// The arrays are parallel; any of `position`, `velocity` and `effort`
    /// may be empty when the source does not report it.
    pub struct JointState("sensor_msgs/JointState") {
        pub header: Header,
        pub name: Vec<String>,
        pub position: Vec<f64>,
        pub velocity: Vec<f64>,
        pub effort: Vec<f64>,
    }
}
