//! Result filter pipeline.
//!
//! Filters run in a fixed order and short-circuit: the first filter that
//! matches drops the result and its reason is the only one recorded.
//! Surviving results keep their original order.
//!
//! | Order | Filter              | Reason                    |
//! |-------|---------------------|---------------------------|
//! | 1     | Missing information | `missing_author_or_title` |
//! | 2     | Kindle edition      | `kindle_edition`          |
//! | 3     | Product-like title  | `product_like_listing`    |
//! | 4     | Promotional title   | `promotional_title`       |
//! | 5     | Audiobook only      | `non_audiobook_filtered`  |

pub mod audiobook;
pub mod heuristics;

use serde::Serialize;

use crate::model::SearchResult;

/// A single result predicate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResultFilter {
    MissingInformation,
    KindleEdition,
    ProductLikeTitle,
    PromotionalTitle,
    AudiobookOnly,
}

impl ResultFilter {
    /// All filters in evaluation order.
    pub const ALL: [ResultFilter; 5] = [
        ResultFilter::MissingInformation,
        ResultFilter::KindleEdition,
        ResultFilter::ProductLikeTitle,
        ResultFilter::PromotionalTitle,
        ResultFilter::AudiobookOnly,
    ];

    /// Stable machine-readable reason, for logs and reports.
    pub fn reason(self) -> &'static str {
        match self {
            ResultFilter::MissingInformation => "missing_author_or_title",
            ResultFilter::KindleEdition => "kindle_edition",
            ResultFilter::ProductLikeTitle => "product_like_listing",
            ResultFilter::PromotionalTitle => "promotional_title",
            ResultFilter::AudiobookOnly => "non_audiobook_filtered",
        }
    }

    /// Whether this filter drops `result`.
    pub fn matches(self, result: &SearchResult) -> bool {
        match self {
            ResultFilter::MissingInformation => {
                heuristics::is_missing_information(&result.title, &result.artist)
            }
            ResultFilter::KindleEdition => heuristics::is_kindle_edition(&result.title),
            ResultFilter::ProductLikeTitle => {
                heuristics::is_product_like_title(&result.title)
                    || heuristics::is_seller_artist(&result.artist)
            }
            ResultFilter::PromotionalTitle => heuristics::is_promotional_title(&result.title),
            ResultFilter::AudiobookOnly => audiobook::is_non_audiobook(result),
        }
    }
}

/// Verdict for a single result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum FilterOutcome {
    Keep,
    Drop { reason: &'static str },
}

impl FilterOutcome {
    pub fn is_drop(&self) -> bool {
        matches!(self, FilterOutcome::Drop { .. })
    }

    pub fn reason(&self) -> Option<&'static str> {
        match self {
            FilterOutcome::Keep => None,
            FilterOutcome::Drop { reason } => Some(*reason),
        }
    }
}

/// Survivors plus every dropped result with its reason.
#[derive(Debug, Default)]
pub struct FilterReport {
    pub kept: Vec<SearchResult>,
    pub dropped: Vec<(SearchResult, &'static str)>,
}

/// Ordered chain of [`ResultFilter`]s.
#[derive(Debug, Clone)]
pub struct FilterPipeline {
    filters: Vec<ResultFilter>,
    log_filtered: bool,
}

impl Default for FilterPipeline {
    fn default() -> Self {
        Self::standard()
    }
}

impl FilterPipeline {
    /// The standard five-filter pipeline.
    pub fn standard() -> Self {
        Self {
            filters: ResultFilter::ALL.to_vec(),
            log_filtered: true,
        }
    }

    /// A pipeline that keeps everything.
    pub fn disabled() -> Self {
        Self {
            filters: Vec::new(),
            log_filtered: false,
        }
    }

    /// Toggle info-level logging of dropped results.
    pub fn with_logging(mut self, log_filtered: bool) -> Self {
        self.log_filtered = log_filtered;
        self
    }

    /// Evaluate `result` without consuming it.
    pub fn would_filter(&self, result: &SearchResult) -> FilterOutcome {
        self.filters
            .iter()
            .find(|f| f.matches(result))
            .map_or(FilterOutcome::Keep, |f| FilterOutcome::Drop { reason: f.reason() })
    }

    /// Check a single result, logging it when dropped.
    pub fn filter_one(&self, result: SearchResult) -> Option<SearchResult> {
        match self.would_filter(&result) {
            FilterOutcome::Keep => Some(result),
            FilterOutcome::Drop { reason } => {
                self.log_dropped(&result, reason);
                None
            }
        }
    }

    /// Drop every result some filter matches, preserving order.
    pub fn apply(&self, results: Vec<SearchResult>) -> Vec<SearchResult> {
        self.apply_with_report(results).kept
    }

    /// Like [`apply`](Self::apply) but keep the dropped results and reasons.
    pub fn apply_with_report(&self, results: Vec<SearchResult>) -> FilterReport {
        let mut report = FilterReport::default();

        for result in results {
            match self.would_filter(&result) {
                FilterOutcome::Keep => report.kept.push(result),
                FilterOutcome::Drop { reason } => {
                    self.log_dropped(&result, reason);
                    report.dropped.push((result, reason));
                }
            }
        }

        report
    }

    fn log_dropped(&self, result: &SearchResult, reason: &'static str) {
        if self.log_filtered {
            tracing::info!(
                target: "search::filters",
                title = %result.title,
                asin = result.asin.as_deref().unwrap_or("-"),
                reason,
                "Filtered out result"
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{fixture_results, result};
    use proptest::prelude::*;

    fn reason_of(r: &SearchResult) -> Option<&'static str> {
        FilterPipeline::standard().would_filter(r).reason()
    }

    #[test]
    fn test_each_reason() {
        assert_eq!(reason_of(&result("", "Andy Weir")), Some("missing_author_or_title"));
        assert_eq!(reason_of(&result("Dune Kindle Edition", "Frank Herbert")), Some("kindle_edition"));
        assert_eq!(reason_of(&result("USB Charger, 2 Pack", "Anker")), Some("product_like_listing"));
        assert_eq!(reason_of(&result("Dune", "Visit the Penguin Store")), Some("product_like_listing"));
        assert_eq!(reason_of(&result("Dune", "Penguin Bookstore")), Some("product_like_listing"));
        assert_eq!(
            reason_of(&result("Visit the Penguin Store", "Penguin")),
            Some("product_like_listing")
        );
        assert_eq!(reason_of(&result("Unlock 15% savings", "Audible")), Some("promotional_title"));
        assert_eq!(reason_of(&result("Dune Trilogy Box Set", "Frank Herbert")), Some("non_audiobook_filtered"));
        assert_eq!(reason_of(&result("Dune", "Frank Herbert")), None);
    }

    #[test]
    fn test_filter_one_and_disabled_pipeline() {
        let kindle = result("Dune Kindle Edition", "Frank Herbert");
        assert_eq!(FilterPipeline::standard().filter_one(kindle.clone()), None);
        assert_eq!(FilterPipeline::disabled().filter_one(kindle.clone()), Some(kindle));

        let dune = result("Dune", "Frank Herbert");
        assert_eq!(FilterPipeline::standard().filter_one(dune.clone()), Some(dune));
    }

    #[test]
    fn test_missing_title_short_circuits() {
        // Would also match the Kindle and print checks, but only the first reason counts
        let r = SearchResult {
            format: "Kindle Edition".to_string(),
            ..result("   ", "Frank Herbert")
        };
        assert_eq!(
            FilterPipeline::standard().would_filter(&r),
            FilterOutcome::Drop { reason: "missing_author_or_title" }
        );
    }

    #[test]
    fn test_narrator_overrides_print_heuristic() {
        let r = SearchResult {
            narrator: Some("Scott Brick".to_string()),
            ..result("Foo: Paperback – 2020", "Frank Herbert")
        };
        assert_eq!(FilterPipeline::standard().would_filter(&r), FilterOutcome::Keep);
    }

    #[test]
    fn test_trilogy_box_set_dropped() {
        let r = result("Foo Trilogy Box Set", "Jane Author");
        assert_eq!(reason_of(&r), Some("non_audiobook_filtered"));
    }

    #[test]
    fn test_apply_keeps_order_and_reports_reasons() {
        let report = FilterPipeline::standard().apply_with_report(fixture_results());

        let kept: Vec<_> = report.kept.iter().map(|r| r.title.as_str()).collect();
        assert_eq!(kept, ["Project Hail Mary", "The Martian", "Artemis"]);

        let reasons: Vec<_> = report.dropped.iter().map(|(_, reason)| *reason).collect();
        assert_eq!(
            reasons,
            ["kindle_edition", "missing_author_or_title", "non_audiobook_filtered"]
        );
    }

    #[test]
    fn test_apply_matches_would_filter() {
        let pipeline = FilterPipeline::standard().with_logging(false);
        let results = fixture_results();
        let expected: Vec<_> = results
            .iter()
            .filter(|r| !pipeline.would_filter(r).is_drop())
            .cloned()
            .collect();
        assert_eq!(pipeline.apply(results), expected);
    }

    fn arb_result() -> impl Strategy<Value = SearchResult> {
        let titles = prop::sample::select(vec![
            "Dune",
            "",
            "Dune Kindle Edition",
            "Trilogy Box Set",
            "Unlock 15% savings",
            "LED Lamp",
            "The Martian",
        ]);
        let authors = prop::sample::select(vec!["Andy Weir", "", "Best Shop", "Frank Herbert"]);
        (titles, authors, prop::option::of(0u32..900), any::<u16>()).prop_map(
            |(title, author, runtime, id)| SearchResult {
                id: id.to_string(),
                runtime,
                ..SearchResult::new(title, author)
            },
        )
    }

    proptest! {
        #[test]
        fn prop_apply_preserves_relative_order(results in prop::collection::vec(arb_result(), 0..24)) {
            let pipeline = FilterPipeline::standard().with_logging(false);
            let report = pipeline.apply_with_report(results.clone());

            prop_assert_eq!(report.kept.len() + report.dropped.len(), results.len());

            // Survivors appear as a subsequence of the input
            let mut input = results.iter();
            for kept in &report.kept {
                prop_assert!(input.any(|r| r == kept));
            }

            for (dropped, reason) in &report.dropped {
                prop_assert_eq!(pipeline.would_filter(dropped).reason(), Some(*reason));
            }
        }
    }
}
