// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Common utilities for CLI commands.

use std::io::Read as _;
use std::path::Path;

use anyhow::Context as _;
use serde::Serialize;

use roswire::encoding::registry::global_registry;
use roswire::{parse_schema, DecodeLimits, MessageSchema};

pub use anyhow::Result as CliResult;
pub type Result<T = ()> = CliResult<T>;

/// Load decode limits from an optional TOML file, then apply `ROSWIRE_*`
/// environment overrides.
pub fn load_limits(config: Option<&Path>) -> Result<DecodeLimits> {
    let limits = match config {
        Some(path) => DecodeLimits::from_file(path)?.with_env_overrides()?,
        None => DecodeLimits::from_env()?,
    };
    Ok(limits)
}

/// Schema for `type_name`: parsed from `schema_file` when given, otherwise
/// taken from the built-in registry.
pub fn resolve_schema(type_name: &str, schema_file: Option<&Path>) -> Result<MessageSchema> {
    match schema_file {
        Some(path) => {
            let text = std::fs::read_to_string(path)
                .with_context(|| format!("failed to read {}", path.display()))?;
            Ok(parse_schema(type_name, &text)?)
        }
        None => Ok(global_registry().schema(type_name)?),
    }
}

/// Read a whole file, or stdin when no path is given.
pub fn read_input(path: Option<&Path>) -> Result<Vec<u8>> {
    match path {
        Some(path) => {
            std::fs::read(path).with_context(|| format!("failed to read {}", path.display()))
        }
        None => {
            let mut data = Vec::new();
            std::io::stdin()
                .read_to_end(&mut data)
                .context("failed to read stdin")?;
            Ok(data)
        }
    }
}

/// Parse a hex string, ignoring whitespace and an optional `0x` prefix.
pub fn parse_hex(text: &str) -> Result<Vec<u8>> {
    let compact: String = text.split_whitespace().collect();
    let digits = compact.strip_prefix("0x").unwrap_or(&compact);
    hex::decode(digits).context("invalid hex input")
}

/// Print `value` as pretty JSON, or run the human-readable printer.
pub fn output_json_or<T>(
    json: bool,
    value: &T,
    human_fn: impl FnOnce() -> std::io::Result<()>,
) -> Result<()>
where
    T: Serialize,
{
    if json {
        println!("{}", serde_json::to_string_pretty(value)?);
    } else {
        human_fn()?;
    }
    Ok(())
}
