//! Query classification, search and offline filtering commands.

use std::path::Path;
use std::sync::Arc;

use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::runtime::Runtime;

use crate::config::Config;
use crate::enrichment::{EnrichmentHit, MetadataCoordinator};
use crate::library::LibraryIndex;
use crate::model::SearchResult;
use crate::search::backend::decode_results;
use crate::search::classify::{SearchType, backend_query, classify, strip_prefix};
use crate::search::validation::{is_strict_asin, region_for_language};
use crate::search::{FilterPipeline, HttpSearchBackend, SearchError, SearchExecutor, SearchOutcome};

use super::{load_library, metadata_region};

/// Options for [`cmd_search`]
pub struct SearchOptions {
    pub language: Option<String>,
    pub enrich: bool,
    pub json: bool,
    pub all: bool,
}

/// Show how a query would be classified
pub fn cmd_classify(query: &str) -> anyhow::Result<()> {
    let search_type = classify(query);
    println!("Type:          {}", search_type);
    println!("Identifier:    {}", strip_prefix(query));
    println!("Backend query: {}", backend_query(query, search_type));
    if search_type == SearchType::Asin && !is_strict_asin(query) {
        println!("⚠ Not a valid Amazon ASIN (expected something like B08G9PRS1K)");
    }
    Ok(())
}

/// Search for audiobooks
pub fn cmd_search(
    rt: &Runtime,
    config: &Config,
    query: &str,
    options: SearchOptions,
) -> anyhow::Result<()> {
    let language = options
        .language
        .clone()
        .unwrap_or_else(|| config.search.language.clone());

    rt.block_on(async {
        let backend = Arc::new(HttpSearchBackend::new(&config.search.backend_url)?);
        let mut executor = SearchExecutor::new(backend, language.clone());

        let (search_type, results) = match executor.run(query).await {
            Ok(found) => found,
            Err(e) => {
                eprintln!("✗ {}", e.user_message());
                return Err(e.into());
            }
        };

        let pipeline = if options.all {
            FilterPipeline::disabled()
        } else {
            FilterPipeline::standard().with_logging(config.search.log_filtered)
        };
        let results = pipeline.apply(results);

        let results = if options.enrich {
            let region = metadata_region(config, Some(&language));
            enrich_results(results, config, &region, &pipeline).await?
        } else {
            results
        };

        if options.json {
            println!("{}", serde_json::to_string_pretty(&results)?);
        } else {
            println!(
                "Search type: {} | region: {} | {} result(s)",
                search_type,
                region_for_language(&language),
                results.len()
            );
            print_results(&results, &load_library(config));
        }
        Ok::<(), anyhow::Error>(())
    })
}

/// Enrich every result that has an ASIN, one after another.
///
/// Enriched results go back through `pipeline`, since provider data can turn
/// a harmless listing into one the filters drop.
async fn enrich_results(
    results: Vec<SearchResult>,
    config: &Config,
    region: &str,
    pipeline: &FilterPipeline,
) -> anyhow::Result<Vec<SearchResult>> {
    let coordinator = MetadataCoordinator::with_default_strategies(region)?;
    let mut enriched = Vec::with_capacity(results.len());

    for result in results {
        let Some(asin) = result.asin.clone().filter(|a| !a.trim().is_empty()) else {
            enriched.push(result);
            continue;
        };
        let hint = (!result.source.is_empty()).then(|| result.source.clone());
        match coordinator
            .enrich(&asin, &config.metadata.sources, hint.as_deref())
            .await
        {
            Some(hit) => enriched.extend(apply_hit(result, &hit, pipeline)),
            None => enriched.push(result),
        }
    }

    Ok(enriched)
}

/// Apply an enrichment hit and re-check the result.
///
/// Provider metadata wins; whatever it lacks is filled from the result.
fn apply_hit(
    result: SearchResult,
    hit: &EnrichmentHit,
    pipeline: &FilterPipeline,
) -> Option<SearchResult> {
    let metadata = hit.metadata.merged_with(&result.known_metadata());
    pipeline.filter_one(result.with_enrichment(&metadata, &hit.source_name))
}

/// Search as you type: each stdin line replaces the pending query.
///
/// `:cancel` cancels the pending search, `:lang <language>` switches the
/// result language, Ctrl-C cancels and exits.
pub fn cmd_interactive(rt: &Runtime, config: &Config, language: Option<&str>) -> anyhow::Result<()> {
    let language = language.unwrap_or(&config.search.language).to_string();

    rt.block_on(async {
        let backend = Arc::new(HttpSearchBackend::new(&config.search.backend_url)?);
        let mut executor =
            SearchExecutor::new(backend, language).with_quiet_period(config.search.debounce());
        let pipeline = FilterPipeline::standard().with_logging(config.search.log_filtered);
        let library = load_library(config);
        let mut lines = BufReader::new(tokio::io::stdin()).lines();

        println!("Type a query (\":cancel\" to cancel, \":lang <language>\" to switch, Ctrl-D to quit)");

        loop {
            tokio::select! {
                line = lines.next_line() => {
                    let Some(line) = line? else { break };
                    let line = line.trim();
                    if line == ":cancel" {
                        executor.cancel();
                        println!("Cancelled ({:?})", executor.state());
                    } else if let Some(language) = line.strip_prefix(":lang ") {
                        executor.set_language(language.trim());
                        println!(
                            "Language: {} (region {})",
                            executor.language(),
                            region_for_language(executor.language())
                        );
                    } else {
                        executor.on_input(line);
                    }
                }
                Some(outcome) = executor.next_outcome() => match outcome {
                    SearchOutcome::Completed { query, search_type, results, .. } => {
                        let results = pipeline.apply(results);
                        println!("── {} [{}]: {} result(s)", query, search_type, results.len());
                        print_results(&results, &library);
                    }
                    SearchOutcome::Cancelled { .. } => {
                        println!("{}", SearchError::Cancelled.user_message());
                    }
                    SearchOutcome::Failed { error, .. } => {
                        eprintln!("✗ {}", error.user_message());
                    }
                },
                _ = tokio::signal::ctrl_c() => {
                    executor.cancel();
                    break;
                }
            }
        }

        Ok::<(), anyhow::Error>(())
    })
}

/// Run the filter pipeline over saved search results
pub fn cmd_filter(config: &Config, path: &Path, show_reasons: bool) -> anyhow::Result<()> {
    let bytes = std::fs::read(path)?;
    let results = decode_results(&bytes)?;
    let total = results.len();

    let report = FilterPipeline::standard()
        .with_logging(config.search.log_filtered)
        .apply_with_report(results);

    println!("Kept {} of {} result(s)", report.kept.len(), total);
    print_results(&report.kept, &load_library(config));

    if show_reasons && !report.dropped.is_empty() {
        println!();
        println!("Dropped:");
        for (result, reason) in &report.dropped {
            println!("  ✗ {} ({})", display_title(result), reason);
        }
    }
    Ok(())
}

fn display_title(result: &SearchResult) -> &str {
    if result.title.trim().is_empty() {
        "(untitled)"
    } else {
        &result.title
    }
}

fn format_runtime(minutes: u32) -> String {
    format!("{}h {:02}m", minutes / 60, minutes % 60)
}

fn print_results(results: &[SearchResult], library: &LibraryIndex) {
    for (i, result) in results.iter().enumerate() {
        let owned = if library.is_owned(result) { " [owned]" } else { "" };
        println!(
            "  {:>2}. {} - {}{}",
            i + 1,
            display_title(result),
            result.artist,
            owned
        );

        let mut details = Vec::new();
        if let Some(narrator) = &result.narrator {
            details.push(format!("Narrator: {}", narrator));
        }
        if let Some(runtime) = result.runtime {
            details.push(format!("Runtime: {}", format_runtime(runtime)));
        }
        if let Some(asin) = &result.asin {
            details.push(format!("ASIN: {}", asin));
        }
        if !result.source.is_empty() {
            details.push(format!("Source: {}", result.source));
        }
        if result.seeders > 0 {
            details.push(format!("Seeders: {}", result.seeders));
        }
        if let Some(source) = result.metadata_source()
            && result.is_enriched()
        {
            details.push(format!("Metadata: {}", source));
        }
        if !details.is_empty() {
            println!("      {}", details.join(" | "));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::enrichment::BookMetadata;

    #[test]
    fn test_format_runtime() {
        assert_eq!(format_runtime(970), "16h 10m");
        assert_eq!(format_runtime(5), "0h 05m");
    }

    #[test]
    fn test_display_title_placeholder() {
        assert_eq!(display_title(&SearchResult::new("  ", "Andy Weir")), "(untitled)");
        assert_eq!(display_title(&SearchResult::new("Artemis", "Andy Weir")), "Artemis");
    }

    fn hit(metadata: BookMetadata) -> EnrichmentHit {
        EnrichmentHit {
            metadata,
            source_name: "Audimeta".to_string(),
        }
    }

    #[test]
    fn test_enriched_result_is_filtered_again() {
        let dune = SearchResult {
            asin: Some("B000000001".to_string()),
            ..SearchResult::new("Dune", "Frank Herbert")
        };
        let kindle = hit(BookMetadata {
            title: Some("Dune Kindle Edition".to_string()),
            ..Default::default()
        });

        assert_eq!(apply_hit(dune.clone(), &kindle, &FilterPipeline::standard()), None);

        let unfiltered = apply_hit(dune, &kindle, &FilterPipeline::disabled()).unwrap();
        assert_eq!(unfiltered.title, "Dune Kindle Edition");
        assert!(unfiltered.is_enriched());
    }

    #[test]
    fn test_enrichment_keeps_result_data_provider_lacks() {
        let dune = SearchResult {
            asin: Some("B002V1OF70".to_string()),
            narrator: Some("Scott Brick".to_string()),
            runtime: Some(1262),
            ..SearchResult::new("Dune", "Frank Herbert")
        };
        let sparse = hit(BookMetadata {
            title: Some("Dune".to_string()),
            publisher: Some("Macmillan Audio".to_string()),
            ..Default::default()
        });

        let enriched = apply_hit(dune, &sparse, &FilterPipeline::standard()).unwrap();
        assert_eq!(enriched.narrator.as_deref(), Some("Scott Brick"));
        assert_eq!(enriched.runtime, Some(1262));
        assert_eq!(enriched.publisher.as_deref(), Some("Macmillan Audio"));
        assert_eq!(enriched.metadata_source(), Some("Audimeta"));
    }

    #[test]
    fn test_filter_command_reads_envelope() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("results.json");
        std::fs::write(
            &path,
            r#"{"results": [{"title": "Dune", "artist": "Frank Herbert"}, {"title": "", "artist": "X"}]}"#,
        )
        .unwrap();
        assert!(cmd_filter(&Config::default(), &path, true).is_ok());
        assert!(cmd_filter(&Config::default(), &dir.path().join("missing.json"), false).is_err());
    }
}
