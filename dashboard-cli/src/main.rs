//! Binary crate for the `weather-dashboard` command-line tool.
//!
//! This crate focuses on:
//! - Parsing CLI arguments
//! - Interactive configuration and the dashboard prompt loop
//! - Human-friendly output formatting

use clap::Parser;

mod charts;
mod cli;
mod interactive;
mod logging;
mod render;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cmd = cli::Cli::parse();
    logging::init(cmd.verbose);
    cmd.run().await
}
