// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Random command - reproducible random instances.

use std::path::PathBuf;

use clap::Args;
use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::common::{resolve_schema, Result};
use roswire::encoding::json::JsonCodec;
use roswire::encoding::registry::global_registry;
use roswire::encoding::ros1::{Ros1Decoder, Ros1Encoder};
use roswire::message::random_message;

/// Generate a random message.
#[derive(Args, Clone, Debug)]
pub struct RandomCmd {
    /// Message type, full or unique short name
    #[arg(value_name = "TYPE")]
    type_name: String,

    /// Seed; the same seed always yields the same bytes
    #[arg(long, default_value_t = 0)]
    seed: u64,

    /// .msg definition to use instead of the built-in type
    #[arg(short, long, value_name = "FILE")]
    schema: Option<PathBuf>,

    /// Print the instance as JSON instead of hex
    #[arg(short, long)]
    json: bool,
}

impl RandomCmd {
    pub fn run(self) -> Result<()> {
        let schema = resolve_schema(&self.type_name, self.schema.as_deref())?;

        let bytes = if self.schema.is_some() {
            let mut rng = StdRng::seed_from_u64(self.seed);
            let message = random_message(&schema, &mut rng)?;
            Ros1Encoder::new().encode(&message, &schema)?
        } else {
            let entry = global_registry().entry(&self.type_name)?;
            (entry.random)(self.seed)
        };

        if self.json {
            let message = Ros1Decoder::new().decode(&schema, &bytes)?;
            println!("{}", JsonCodec::pretty().encode(&message)?);
        } else {
            println!("{}", hex::encode(&bytes));
        }
        Ok(())
    }
}
