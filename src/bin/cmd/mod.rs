// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! CLI subcommands.

mod decode;
mod encode;
mod random;
mod schema;

pub use decode::DecodeCmd;
pub use encode::EncodeCmd;
pub use random::RandomCmd;
pub use schema::SchemaCmd;
