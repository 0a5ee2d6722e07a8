//! Binary crate for the `weatherlookup` command-line tool.
//!
//! This crate focuses on:
//! - Parsing CLI arguments and setting up logging
//! - Interactive configuration
//! - The interactive lookup loop and human-friendly output

use clap::Parser;

mod app;
mod cli;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cmd = cli::Cli::parse();
    cmd.init_logging();
    cmd.run().await
}
