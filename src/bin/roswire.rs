// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! # roswire CLI
//!
//! Command-line tool for ROS1 serialized messages.
//!
//! ## Usage
//!
//! ```sh
//! # List built-in message types
//! roswire schema list
//!
//! # Show a definition
//! roswire schema show geometry_msgs/PoseStamped
//!
//! # Decode hex bytes to JSON
//! roswire decode geometry_msgs/Point --hex 000000000000f03f...
//!
//! # Encode JSON to hex
//! echo '{"x": 1.0}' | roswire encode geometry_msgs/Point
//!
//! # Generate a random instance
//! roswire random sensor_msgs/JointState --seed 7
//! ```

mod cmd;
mod common;

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};
use cmd::{DecodeCmd, EncodeCmd, RandomCmd, SchemaCmd};
use common::{load_limits, Result};

/// roswire - ROS1 message wire-format toolkit
///
/// Decode, encode and inspect ROS1 serialized messages, using either the
/// built-in message types or a `.msg` definition file.
#[derive(Parser, Clone)]
#[command(name = "roswire")]
#[command(about = "ROS1 message wire-format toolkit", long_about = None)]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(author = "ArcheBase")]
struct Cli {
    /// TOML file with a [decode] table of limits
    #[arg(long, global = true, value_name = "FILE")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

/// Available commands
#[derive(Subcommand, Clone)]
enum Commands {
    /// Schema operations (list, show, validate)
    #[command(subcommand)]
    Schema(SchemaCmd),

    /// Decode serialized bytes to JSON
    Decode(DecodeCmd),

    /// Encode JSON to serialized bytes
    Encode(EncodeCmd),

    /// Generate a random serialized instance
    Random(RandomCmd),
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    let limits = load_limits(cli.config.as_deref())?;

    match cli.command {
        Commands::Schema(cmd) => cmd.run(),
        Commands::Decode(cmd) => cmd.run(&limits),
        Commands::Encode(cmd) => cmd.run(&limits),
        Commands::Random(cmd) => cmd.run(),
    }
}

fn main() {
    let result = run();

    if let Err(e) = result {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}
