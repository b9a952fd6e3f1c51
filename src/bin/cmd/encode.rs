// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Encode command - JSON to serialized bytes.

use std::path::PathBuf;

use anyhow::Context as _;
use clap::Args;

use crate::common::{read_input, resolve_schema, Result};
use roswire::encoding::json::JsonCodec;
use roswire::encoding::ros1::Ros1Encoder;
use roswire::DecodeLimits;

/// Encode one message.
///
/// Fields missing from the JSON are written as their defaults.
#[derive(Args, Clone, Debug)]
pub struct EncodeCmd {
    /// Message type, full or unique short name
    #[arg(value_name = "TYPE")]
    type_name: String,

    /// JSON file (stdin when omitted)
    #[arg(short, long, value_name = "FILE")]
    input: Option<PathBuf>,

    /// .msg definition to use instead of the built-in type
    #[arg(short, long, value_name = "FILE")]
    schema: Option<PathBuf>,

    /// Write raw bytes to this file instead of printing hex
    #[arg(short, long, value_name = "FILE")]
    output: Option<PathBuf>,
}

impl EncodeCmd {
    pub fn run(self, limits: &DecodeLimits) -> Result<()> {
        let schema = resolve_schema(&self.type_name, self.schema.as_deref())?;
        let input = read_input(self.input.as_deref())?;
        let text = std::str::from_utf8(&input).context("JSON input is not UTF-8")?;

        let message = JsonCodec::new().from_str_with_schema(text, &schema)?;
        let bytes = Ros1Encoder::with_limits(*limits).encode(&message, &schema)?;

        match &self.output {
            Some(path) => {
                std::fs::write(path, &bytes)
                    .with_context(|| format!("failed to write {}", path.display()))?;
                eprintln!("Wrote {} bytes to {}", bytes.len(), path.display());
            }
            None => println!("{}", hex::encode(&bytes)),
        }
        Ok(())
    }
}
