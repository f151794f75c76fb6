//! abicodec CLI entry point
//!
//! Parses arguments, dispatches to the cli module, prints errors to
//! stderr and exits non-zero on failure. All logic lives in the library.

use abicodec::cli;

fn main() {
    if let Err(e) = cli::run() {
        eprintln!("{}", e);
        std::process::exit(1);
    }
}
