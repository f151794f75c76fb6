//! CLI argument definitions using clap
//!
//! Commands:
//! - abicodec validate --abi <path>
//! - abicodec encode --abi <path> <type> <json-value>
//! - abicodec decode --abi <path> <type> <hex>

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// abicodec - schema-driven binary codec
#[derive(Parser, Debug)]
#[command(name = "abicodec")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Validate an ABI document and print a registry summary
    Validate {
        /// Path to the ABI JSON document
        #[arg(long)]
        abi: PathBuf,
    },

    /// Encode a structured JSON value as hex wire bytes
    Encode {
        /// Path to the ABI JSON document
        #[arg(long)]
        abi: PathBuf,

        /// Type to encode as (suffixes allowed, e.g. `uint32[]`)
        type_name: String,

        /// The value, as JSON text
        value: String,

        /// Wall-clock budget in milliseconds
        #[arg(long)]
        deadline_ms: Option<u64>,
    },

    /// Decode hex wire bytes into a structured JSON value
    Decode {
        /// Path to the ABI JSON document
        #[arg(long)]
        abi: PathBuf,

        /// Type to decode as (suffixes allowed, e.g. `uint32[]`)
        type_name: String,

        /// The wire bytes, as hex text
        hex: String,

        /// Wall-clock budget in milliseconds
        #[arg(long)]
        deadline_ms: Option<u64>,
    },
}

impl Cli {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Cli::parse()
    }
}
