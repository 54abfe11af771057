//! Metadata lookup and source listing commands.

use tokio::runtime::Runtime;

use crate::config::Config;
use crate::enrichment::MetadataCoordinator;
use crate::enrichment::traits::MetadataStrategy;
use crate::search::validation::is_strict_asin;

use super::metadata_region;

/// Look up metadata for an ASIN across the configured sources
pub fn cmd_enrich(
    rt: &Runtime,
    config: &Config,
    asin: &str,
    hint: Option<&str>,
) -> anyhow::Result<()> {
    let asin = asin.trim().to_ascii_uppercase();
    if !is_strict_asin(&asin) {
        eprintln!("⚠ {} does not look like an Amazon ASIN, trying anyway", asin);
    }

    let region = metadata_region(config, None);
    let coordinator = MetadataCoordinator::with_default_strategies(&region)?;

    println!("Looking up {} (region: {})", asin, region);
    println!();

    let hit = rt.block_on(coordinator.enrich(&asin, &config.metadata.sources, hint));

    let Some(hit) = hit else {
        println!("No metadata found for {}.", asin);
        return Ok(());
    };

    let m = &hit.metadata;
    println!("✓ Found in {}", hit.source_name);
    println!();
    if let Some(title) = &m.title {
        match &m.subtitle {
            Some(subtitle) => println!("  Title:     {}: {}", title, subtitle),
            None => println!("  Title:     {}", title),
        }
    }
    if !m.authors.is_empty() {
        println!("  Author:    {}", m.authors.join(", "));
    }
    if !m.narrators.is_empty() {
        println!("  Narrator:  {}", m.narrators.join(", "));
    }
    if let Some(series) = &m.series {
        match &m.series_number {
            Some(n) => println!("  Series:    {} #{}", series, n),
            None => println!("  Series:    {}", series),
        }
    }
    if let Some(minutes) = m.runtime_minutes {
        println!("  Runtime:   {}h {:02}m", minutes / 60, minutes % 60);
    }
    if let Some(publisher) = &m.publisher {
        println!("  Publisher: {}", publisher);
    }
    if let Some(year) = &m.publish_year {
        println!("  Year:      {}", year);
    }
    if let Some(language) = &m.language {
        println!("  Language:  {}", language);
    }
    if !m.genres.is_empty() {
        println!("  Genres:    {}", m.genres.join(", "));
    }
    if m.abridged {
        println!("  Abridged");
    }
    if let Some(image) = &m.image_url {
        println!("  Cover:     {}", image);
    }

    Ok(())
}

/// List configured metadata sources in priority order
pub fn cmd_sources(config: &Config) -> anyhow::Result<()> {
    let region = metadata_region(config, None);
    let coordinator = MetadataCoordinator::with_default_strategies(&region)?;

    if config.metadata.sources.is_empty() {
        println!("No metadata sources configured.");
        return Ok(());
    }

    println!("Metadata sources (region: {}):", region);
    for (i, source) in config.metadata.sources.iter().enumerate() {
        let strategy = coordinator
            .strategies()
            .iter()
            .find(|s| s.can_handle(source))
            .map_or("no strategy", |s| s.name());
        let status = if source.enabled { "✓" } else { "✗" };
        println!(
            "  {}. {} {} <{}> [{}]",
            i + 1,
            status,
            source.name,
            source.base_url,
            strategy
        );
    }
    Ok(())
}
