//! Config file bootstrap command.

use std::path::Path;

use crate::config::{self, Config};

/// Write a default config file.
///
/// Uses `path` when given, else the standard location. An existing file is
/// only replaced with `force`.
pub fn cmd_init(path: Option<&Path>, force: bool) -> anyhow::Result<()> {
    let target = match path {
        Some(path) => path.to_path_buf(),
        None => config::config_path().ok_or(config::ConfigError::NoConfigDir)?,
    };

    if target.exists() && !force {
        println!("Config already exists at {}", target.display());
        println!("Use --force to overwrite it with defaults.");
        return Ok(());
    }

    let defaults = Config::default();
    match path {
        Some(path) => config::save_to(&defaults, path)?,
        None => config::save(&defaults)?,
    }

    println!("✓ Wrote default config to {}", target.display());
    println!();
    println!("  Backend:  {}", defaults.search.backend_url);
    println!("  Language: {}", defaults.search.language);
    for source in &defaults.metadata.sources {
        println!("  Source:   {} <{}>", source.name, source.base_url);
    }
    Ok(())
}
