// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! `std_msgs` types.
//!
//! This module defines a message named `String`, so string fields are
//! spelled `std::string::String`.

use crate::core::Time;

crate::ros_message! {
    /// Standard metadata for stamped data.
    pub struct Header("std_msgs/Header") {
        /// Consecutively increasing sequence id.
        pub seq: u32,
        pub stamp: Time,
        pub frame_id: std::string::String,
    }
}

impl Header {
    pub fn new(seq: u32, stamp: Time, frame_id: impl Into<std::string::String>) -> Self {
        Self {
            seq,
            stamp,
            frame_id: frame_id.into(),
        }
    }
}

crate::ros_message! {
    pub struct Empty("std_msgs/Empty") {}
}

crate::ros_message! {
    pub struct Bool("std_msgs/Bool") {
        pub data: bool,
    }
}

crate::ros_message! {
    pub struct Int32("std_msgs/Int32") {
        pub data: i32,
    }
}

crate::ros_message! {
    pub struct Float64("std_msgs/Float64") {
        pub data: f64,
    }
}

crate::ros_message! {
    pub struct String("std_msgs/String") {
        pub data: std::string::String,
    }
}

crate::ros_message! {
    pub struct MultiArrayDimension("std_msgs/MultiArrayDimension") {
        pub label: std::string::String,
        pub size: u32,
        pub stride: u32,
    }
}

crate::ros_message! {
    pub struct MultiArrayLayout("std_msgs/MultiArrayLayout") {
        pub dim: Vec<MultiArrayDimension>,
        pub data_offset: u32,
    }
}

crate::ros_message! {
    pub struct Float64MultiArray("std_msgs/Float64MultiArray") {
        pub layout: MultiArrayLayout,
        pub data: Vec<f64>,
    }
}
