//! Command-line interface
//!
//! Thin wrapper over the library:
//! - validate: build a registry from an ABI document and print a summary
//! - encode: structured JSON value -> hex wire bytes
//! - decode: hex wire bytes -> structured JSON value

mod args;
mod commands;
mod errors;

pub use args::{Cli, Command};
pub use commands::{decode, encode, validate};
pub use errors::{CliError, CliResult};

use tracing_subscriber::EnvFilter;

/// Parses arguments, dispatches the command, prints the result to stdout.
pub fn run() -> CliResult<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse_args();
    let output = match cli.command {
        Command::Validate { abi } => validate(&abi)?,
        Command::Encode {
            abi,
            type_name,
            value,
            deadline_ms,
        } => encode(&abi, &type_name, &value, deadline_ms)?,
        Command::Decode {
            abi,
            type_name,
            hex,
            deadline_ms,
        } => decode(&abi, &type_name, &hex, deadline_ms)?,
    };
    println!("{}", output);
    Ok(())
}
