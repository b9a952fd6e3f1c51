// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Motion planning messages and the Cartesian path planning service.

use super::geometry_msgs::{Pose, PoseStamped};
use super::std_msgs::Header;

crate::ros_message! {
    /// A timed sequence of end-effector poses.
    pub struct CartesianPath("motion_msgs/CartesianPath") {
        pub header: Header,
        pub points: Vec<PoseStamped>,
    }
}

crate::ros_message! {
    pub struct PlanCartesianPathRequest("motion_msgs/PlanCartesianPathRequest") {
        /// Planning group to move.
        pub group: String,
        pub waypoints: Vec<Pose>,
        /// Maximum Cartesian distance between consecutive points.
        pub max_step: f64,
    }
}

crate::ros_message! {
    pub struct PlanCartesianPathResponse("motion_msgs/PlanCartesianPathResponse") {
        pub path: CartesianPath,
        /// Fraction of the requested path that was achieved, 0 to 1.
        pub fraction: f64,
        pub success: bool,
    }
}

crate::ros_service! {
    /// Plan a Cartesian path through a list of waypoints.
    pub struct PlanCartesianPath("motion_msgs/PlanCartesianPath") {
        request: PlanCartesianPathRequest,
        response: PlanCartesianPathResponse,
    }
}
