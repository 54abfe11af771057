//! CLI command definitions and dispatch.
//!
//! Each group of subcommands is implemented in its own submodule:
//! - `search`: Query classification, searching and offline filtering
//! - `enrich`: Metadata lookups and source listing
//! - `explain`: Score explanations
//! - `init`: Default config file

mod enrich;
mod explain;
mod init;
mod search;

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tokio::runtime::Runtime;

use crate::config::{self, Config};
use crate::library::LibraryIndex;

pub use enrich::{cmd_enrich, cmd_sources};
pub use explain::cmd_explain;
pub use init::cmd_init;
pub use search::{cmd_classify, cmd_filter, cmd_interactive, cmd_search};

/// Book Scout CLI
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Use this config file instead of the default location
    #[arg(long, global = true, env = "BOOK_SCOUT_CONFIG")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available subcommands
#[derive(Subcommand)]
pub enum Commands {
    /// Show how a query would be classified
    Classify {
        /// Raw query (ASIN, ISBN, title, or prefixed with ASIN:/ISBN:/AUTHOR:/TITLE:)
        query: String,
    },
    /// Search for audiobooks
    Search {
        /// Raw query
        query: String,
        /// Result language (default from config)
        #[arg(short, long)]
        language: Option<String>,
        /// Enrich results that carry an ASIN from the metadata sources
        #[arg(long)]
        enrich: bool,
        /// Print results as JSON
        #[arg(long)]
        json: bool,
        /// Skip the result filter pipeline
        #[arg(long)]
        all: bool,
    },
    /// Search as you type: every stdin line replaces the pending query
    Interactive {
        /// Result language (default from config)
        #[arg(short, long)]
        language: Option<String>,
    },
    /// Run the filter pipeline over saved search results
    Filter {
        /// JSON file with an array of results or a {"results": [...]} envelope
        path: PathBuf,
        /// Also list dropped results and why
        #[arg(long)]
        reasons: bool,
    },
    /// Look up metadata for an ASIN across the configured sources
    Enrich {
        /// Amazon/Audible ASIN
        asin: String,
        /// Where the ASIN was found (e.g. "Amazon", "Audible")
        #[arg(long)]
        hint: Option<String>,
    },
    /// Explain how a quality score adds up
    Explain {
        /// Total score reported by the scorer
        #[arg(long, allow_negative_numbers = true)]
        total: i64,
        /// Contribution, e.g. --breakdown Seeders=5 (repeatable)
        #[arg(long = "breakdown", value_parser = explain::parse_contribution)]
        breakdown: Vec<(String, i64)>,
        /// Score was explicitly rejected
        #[arg(long)]
        rejected: bool,
        /// Rejection reason (repeatable)
        #[arg(long = "reason")]
        reasons: Vec<String>,
        /// Composite score, when the scorer produced one
        #[arg(long)]
        smart_score: Option<i64>,
        /// Raw composite component, e.g. --smart Quality=9000 (repeatable)
        #[arg(long = "smart", value_parser = explain::parse_contribution)]
        smart: Vec<(String, i64)>,
        /// Print only what a score tooltip would show
        #[arg(long)]
        summary: bool,
    },
    /// List configured metadata sources in priority order
    Sources,
    /// Write a default config file (to --config, or the standard location)
    Init {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}

/// Run the specified CLI command.
///
/// Returns `Ok(true)` if a command was run, `Ok(false)` if no command was
/// specified (meaning help should be shown).
pub fn run_command(cli: &Cli) -> anyhow::Result<bool> {
    let Some(command) = &cli.command else {
        return Ok(false);
    };

    // `init` creates the file, so it must not be read first
    let config = match (command, &cli.config) {
        (Commands::Init { .. }, _) => Config::default(),
        (_, Some(path)) => config::load_from(path)?,
        (_, None) => config::load(),
    };
    let rt = Runtime::new()?;

    match command {
        Commands::Classify { query } => cmd_classify(query)?,
        Commands::Search {
            query,
            language,
            enrich,
            json,
            all,
        } => cmd_search(
            &rt,
            &config,
            query,
            search::SearchOptions {
                language: language.clone(),
                enrich: *enrich,
                json: *json,
                all: *all,
            },
        )?,
        Commands::Interactive { language } => cmd_interactive(&rt, &config, language.as_deref())?,
        Commands::Filter { path, reasons } => cmd_filter(&config, path, *reasons)?,
        Commands::Enrich { asin, hint } => cmd_enrich(&rt, &config, asin, hint.as_deref())?,
        Commands::Explain {
            total,
            breakdown,
            rejected,
            reasons,
            smart_score,
            smart,
            summary,
        } => cmd_explain(
            explain::ScoreArgs {
                total: *total,
                breakdown: breakdown.clone(),
                rejected: *rejected,
                reasons: reasons.clone(),
                smart_score: *smart_score,
                smart: smart.clone(),
            },
            *summary,
        )?,
        Commands::Sources => cmd_sources(&config)?,
        Commands::Init { force } => cmd_init(cli.config.as_deref(), *force)?,
    }

    Ok(true)
}

// ============================================================================
// Shared helper functions
// ============================================================================

/// Load the owned-book index named in the config, if any.
///
/// A missing or unreadable file only costs the "owned" markers, so it is
/// logged and treated as an empty library.
pub(crate) fn load_library(config: &Config) -> LibraryIndex {
    let Some(path) = &config.library.asin_file else {
        return LibraryIndex::default();
    };
    match LibraryIndex::load(path) {
        Ok(index) if index.is_empty() => {
            tracing::warn!("Library index {:?} has no entries", path);
            index
        }
        Ok(index) => {
            tracing::debug!(entries = index.len(), "Library index ready");
            index
        }
        Err(e) => {
            tracing::warn!("Library index unavailable: {}", e);
            LibraryIndex::default()
        }
    }
}

/// Region used for metadata lookups.
pub(crate) fn metadata_region(config: &Config, language: Option<&str>) -> String {
    config
        .metadata
        .effective_region(language.unwrap_or(&config.search.language))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_explain_args() {
        let cli = Cli::try_parse_from([
            "book-scout",
            "explain",
            "--total",
            "-5",
            "--breakdown",
            "Seeders=5",
            "--breakdown",
            "Format=-10",
            "--reason",
            "Too small",
        ])
        .unwrap();

        match cli.command {
            Some(Commands::Explain {
                total,
                breakdown,
                reasons,
                ..
            }) => {
                assert_eq!(total, -5);
                assert_eq!(
                    breakdown,
                    vec![("Seeders".to_string(), 5), ("Format".to_string(), -10)]
                );
                assert_eq!(reasons, vec!["Too small".to_string()]);
            }
            _ => panic!("expected explain command"),
        }
    }

    #[test]
    fn test_global_config_flag() {
        let cli = Cli::try_parse_from(["book-scout", "sources", "--config", "/tmp/bs.toml"]).unwrap();
        assert_eq!(cli.config, Some(PathBuf::from("/tmp/bs.toml")));
        assert!(matches!(cli.command, Some(Commands::Sources)));
    }

    #[test]
    fn test_parse_init() {
        let cli = Cli::try_parse_from(["book-scout", "init", "--force"]).unwrap();
        assert!(matches!(cli.command, Some(Commands::Init { force: true })));
    }

    #[test]
    fn test_metadata_region_prefers_override() {
        let mut config = Config::default();
        assert_eq!(metadata_region(&config, Some("german")), "de");
        assert_eq!(metadata_region(&config, None), "us");
        config.metadata.region = Some("au".to_string());
        assert_eq!(metadata_region(&config, Some("german")), "au");
    }
}
