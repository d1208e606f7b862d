//! # angmap
//!
//! A command-line tool for inspecting and rewriting ANG orientation maps.
//!
//! ## Usage
//!
//! ```bash
//! # Summarize a file
//! angmap info scan.ang
//!
//! # Re-encode, choosing which property becomes the confidence index
//! angmap rewrite scan.ang scan_clean.ang --ci reliability
//!
//! # Generate a synthetic map
//! angmap demo demo.ang --rows 20 --cols 30
//! ```

use anyhow::Result;
use clap::Parser;

mod cli;

fn main() -> Result<()> {
    let cli = cli::Cli::parse();
    cli::init_logging(cli.verbosity());
    cli::dispatch(cli)
}
