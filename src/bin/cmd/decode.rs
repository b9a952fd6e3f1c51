// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Decode command - serialized bytes to JSON.

use std::path::PathBuf;

use clap::Args;

use crate::common::{parse_hex, read_input, resolve_schema, Result};
use roswire::encoding::json::JsonCodec;
use roswire::encoding::ros1::Ros1Decoder;
use roswire::DecodeLimits;

/// Decode one message.
#[derive(Args, Clone, Debug)]
pub struct DecodeCmd {
    /// Message type, full or unique short name
    #[arg(value_name = "TYPE")]
    type_name: String,

    /// Raw message file (stdin when neither --input nor --hex is given)
    #[arg(short, long, value_name = "FILE")]
    input: Option<PathBuf>,

    /// Message bytes as hex
    #[arg(long, conflicts_with = "input")]
    hex: Option<String>,

    /// .msg definition to use instead of the built-in type
    #[arg(short, long, value_name = "FILE")]
    schema: Option<PathBuf>,

    /// Single-line JSON output
    #[arg(long)]
    compact: bool,
}

impl DecodeCmd {
    pub fn run(self, limits: &DecodeLimits) -> Result<()> {
        let schema = resolve_schema(&self.type_name, self.schema.as_deref())?;
        let data = match &self.hex {
            Some(text) => parse_hex(text)?,
            None => read_input(self.input.as_deref())?,
        };

        let message = Ros1Decoder::with_limits(*limits).decode(&schema, &data)?;

        let codec = if self.compact {
            JsonCodec::new()
        } else {
            JsonCodec::pretty()
        };
        println!("{}", codec.encode(&message)?);
        Ok(())
    }
}
