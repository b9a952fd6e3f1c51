// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Schema command - list, show and validate message definitions.

use std::path::PathBuf;

use clap::Subcommand;
use serde::Serialize;

use crate::common::{output_json_or, resolve_schema, Result};
use roswire::encoding::registry::global_registry;
use roswire::MessageSchema;

/// Schema operations.
#[derive(Subcommand, Clone, Debug)]
pub enum SchemaCmd {
    /// List the built-in message types
    List {
        /// Output as JSON
        #[arg(short, long)]
        json: bool,
    },

    /// Show the full definition of a message type
    Show {
        /// Message type, full (`geometry_msgs/Pose`) or unique short name
        #[arg(value_name = "TYPE")]
        type_name: String,

        /// Output the field list as JSON
        #[arg(short, long)]
        json: bool,
    },

    /// Parse and validate a .msg file
    Validate {
        /// Definition file
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Type name to give the root message
        #[arg(short, long, default_value = "custom_msgs/Message")]
        name: String,

        /// Output as JSON
        #[arg(short, long)]
        json: bool,
    },
}

impl SchemaCmd {
    pub fn run(self) -> Result<()> {
        match self {
            SchemaCmd::List { json } => cmd_list(json),
            SchemaCmd::Show { type_name, json } => cmd_show(&type_name, json),
            SchemaCmd::Validate { input, name, json } => cmd_validate(input, &name, json),
        }
    }
}

fn cmd_list(json: bool) -> Result<()> {
    let names = global_registry().names()?;

    output_json_or(json, &names, || {
        for name in &names {
            println!("{name}");
        }
        Ok(())
    })
}

fn cmd_show(type_name: &str, json: bool) -> Result<()> {
    let schema = resolve_schema(type_name, None)?;

    output_json_or(json, &SchemaInfo::from_schema(&schema), || {
        print!("{}", schema.definition());
        Ok(())
    })
}

fn cmd_validate(input: PathBuf, name: &str, json: bool) -> Result<()> {
    let result = resolve_schema(name, Some(input.as_path()));

    let report = match &result {
        Ok(schema) => ValidationReport {
            file: input.display().to_string(),
            valid: true,
            error: None,
            types: schema_type_names(schema),
        },
        Err(e) => ValidationReport {
            file: input.display().to_string(),
            valid: false,
            error: Some(format!("{e:#}")),
            types: Vec::new(),
        },
    };

    output_json_or(json, &report, || {
        match &report.error {
            None => {
                println!("✓ {} is valid", report.file);
                for type_name in &report.types {
                    println!("  {type_name}");
                }
            }
            Some(error) => println!("✗ {}: {error}", report.file),
        }
        Ok(())
    })?;

    if report.valid {
        Ok(())
    } else {
        Err(anyhow::anyhow!("schema validation failed"))
    }
}

/// Root first, then dependencies in definition order.
fn schema_type_names(schema: &MessageSchema) -> Vec<String> {
    std::iter::once(schema.name.clone())
        .chain(schema.dependencies().into_iter().map(str::to_string))
        .collect()
}

// Output types

#[derive(Serialize)]
struct FieldInfo {
    name: String,
    #[serde(rename = "type")]
    type_name: String,
}

#[derive(Serialize)]
struct SchemaInfo {
    type_name: String,
    fields: Vec<FieldInfo>,
    dependencies: Vec<String>,
}

impl SchemaInfo {
    fn from_schema(schema: &MessageSchema) -> Self {
        let fields = schema
            .root()
            .map(|root| {
                root.fields
                    .iter()
                    .map(|f| FieldInfo {
                        name: f.name.clone(),
                        type_name: f.type_name.to_string(),
                    })
                    .collect()
            })
            .unwrap_or_default();
        Self {
            type_name: schema.name.clone(),
            fields,
            dependencies: schema.dependencies().into_iter().map(str::to_string).collect(),
        }
    }
}

#[derive(Serialize)]
struct ValidationReport {
    file: String,
    valid: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
    types: Vec<String>,
}
