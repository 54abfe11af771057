//! Command-line interface for book-scout.
//!
//! This module provides CLI commands for classifying queries, searching,
//! filtering saved results, enriching ASINs and explaining scores.

mod commands;

pub use commands::{Cli, Commands, run_command};
