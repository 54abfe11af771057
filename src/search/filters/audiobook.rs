//! Audiobook-only check: drops print, ebook and box-set listings unless
//! there is evidence the result is audio.

use crate::model::SearchResult;

use super::heuristics::contains_ignore_case;

/// Metadata providers whose data is audiobook data by construction
const TRUSTED_AUDIO_SOURCES: [&str; 3] = ["Audible", "Audimeta", "Audnexus"];

/// Metadata sources that count as a positive audio signal on their own
const AUDIO_METADATA_SOURCES: [&str; 4] = ["Audible", "Audimeta", "Audnexus", "Amazon"];

const SIMPLE_INDICATORS: [&str; 7] = [
    "Paperback",
    "Hardcover",
    "Mass Market Paperback",
    "eBook",
    "Kindle Edition",
    "Audio CD",
    "Board book",
];

const PHRASE_INDICATORS: [&str; 10] = [
    "Box Set",
    "3 Books",
    "3 Book",
    "3-Book",
    "Three Volume",
    "Three Volume Set",
    "Volume Set",
    "Trilogy",
    "Collector's Edition",
    "Slipcase",
];

/// Product-page format suffixes ("Paperback – 12 Mar. 2020")
const SUFFIX_INDICATORS: [&str; 3] = ["Paperback –", "Hardcover –", "Mass Market Paperback –"];

fn has_runtime(result: &SearchResult) -> bool {
    result.runtime.is_some_and(|minutes| minutes > 0)
}

fn has_narrator(result: &SearchResult) -> bool {
    result
        .narrator
        .as_deref()
        .is_some_and(|n| !n.trim().is_empty())
}

fn source_in(source: &str, names: &[&str]) -> bool {
    names.iter().any(|name| contains_ignore_case(source, name))
}

fn has_print_indicator(result: &SearchResult) -> bool {
    [result.title.as_str(), result.format.as_str()]
        .into_iter()
        .any(|field| {
            SIMPLE_INDICATORS
                .iter()
                .chain(PHRASE_INDICATORS.iter())
                .chain(SUFFIX_INDICATORS.iter())
                .any(|indicator| contains_ignore_case(field, indicator))
        })
}

/// Whether `result` should be dropped as a non-audiobook listing.
pub fn is_non_audiobook(result: &SearchResult) -> bool {
    let audio_evidence = has_runtime(result) || has_narrator(result);

    // Enriched from a trusted provider or with audio fields: keep. Anything
    // else enriched (scraped store metadata) falls through to the checks below.
    if result.is_enriched()
        && let Some(source) = result.metadata_source()
        && (source_in(source, &TRUSTED_AUDIO_SOURCES) || audio_evidence)
    {
        return false;
    }

    let metadata_indicates_audio = result
        .metadata_source()
        .is_some_and(|source| source_in(source, &AUDIO_METADATA_SOURCES));

    if audio_evidence || metadata_indicates_audio {
        return false;
    }

    has_print_indicator(result)
}
