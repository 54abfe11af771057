//! Book Scout - audiobook search from the command line.
//!
//! Classifies queries (ASIN, ISBN or free text), runs debounced cancellable
//! searches against a raw search backend, filters out non-audiobook noise,
//! enriches results from external metadata providers and explains how
//! quality scores add up.

pub mod cli;
pub mod config;
pub mod enrichment;
pub mod error;
pub mod library;
pub mod model;
pub mod scoring;
pub mod search;
#[cfg(test)]
pub mod test_utils;

use clap::{CommandFactory, Parser};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

fn main() -> anyhow::Result<()> {
    let args = cli::Cli::parse();

    // Initialize logging
    tracing_subscriber::registry()
        .with(fmt::layer().with_target(true).with_writer(std::io::stderr))
        .with(EnvFilter::from_default_env().add_directive("book_scout=info".parse()?))
        .init();

    // Try to run a CLI command
    if cli::run_command(&args)? {
        return Ok(());
    }

    // No command specified, show usage
    cli::Cli::command().print_help()?;
    println!();
    Ok(())
}
