//! Additive score reconstruction.

use crate::model::QualityScore;

use super::signed;

/// Every additive score starts here
pub const BASE_SCORE: i64 = 100;

const QUALITY_KEY: &str = "Quality";

/// Contributions listed first, in this order, when present.
const PREFERRED_ORDER: [&str; 6] = ["Seeders", "PreferredWords", "Format", "Language", "Age", "Size"];

/// Explain how a score adds up, one line per contribution.
///
/// ```text
/// Base: 100
/// Seeders: +5
/// Format: +10
/// Quality: 0
/// Computed Total: 115
/// ```
///
/// A raw `Quality` value is shown relative to the base but not folded into
/// the computed total. Without one, the Quality line is derived so the
/// lines add up to the reported total. `Backend Total` appears only when
/// the two totals differ.
pub fn explain(score: &QualityScore) -> Vec<String> {
    let breakdown = &score.score_breakdown;

    let preferred = PREFERRED_ORDER
        .iter()
        .filter_map(|key| breakdown.get(*key).map(|v| (*key, *v)));
    let others = breakdown
        .iter()
        .filter(|(key, _)| key.as_str() != QUALITY_KEY && !PREFERRED_ORDER.contains(&key.as_str()))
        .map(|(key, v)| (key.as_str(), *v));
    let contributions: Vec<(&str, i64)> = preferred.chain(others).collect();

    // Saturating: contributions come straight from user input
    let non_quality_sum = contributions
        .iter()
        .fold(0i64, |sum, (_, v)| sum.saturating_add(*v));

    let raw_quality = breakdown.get(QUALITY_KEY).copied();
    let (quality, computed_total) = match raw_quality {
        Some(raw) => (
            raw.saturating_sub(BASE_SCORE),
            BASE_SCORE.saturating_add(non_quality_sum),
        ),
        None => {
            let derived = score
                .total_score
                .saturating_sub(BASE_SCORE)
                .saturating_sub(non_quality_sum);
            (derived, BASE_SCORE.saturating_add(non_quality_sum).saturating_add(derived))
        }
    };

    let mut lines = Vec::with_capacity(contributions.len() + 6);
    lines.push(format!("Base: {}", BASE_SCORE));
    lines.extend(
        contributions
            .iter()
            .map(|(key, value)| format!("{}: {}", key, signed(*value))),
    );
    lines.push(format!("Quality: {}", signed(quality)));
    lines.push(format!("Computed Total: {}", computed_total));

    if computed_total != score.total_score {
        lines.push(format!("Backend Total: {}", score.total_score));
    }

    if score.rejected() {
        lines.push("Status: Rejected".to_string());
        if !score.rejection_reasons.is_empty() {
            lines.push(format!("Rejection Reasons: {}", score.rejection_reasons.join("; ")));
        }
    }

    lines
}
