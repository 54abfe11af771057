//! Composite ("smart") score normalization.
//!
//! The backend reports smart-score components on wildly different scales.
//! Each component is scaled to a comparable range and the composite total
//! is the rounded mean of the scaled components.

use std::collections::BTreeMap;

use crate::model::QualityScore;

use super::signed;

/// Scaled components and their rounded mean.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NormalizedSmart {
    pub components: BTreeMap<String, i64>,
    pub total: i64,
}

/// Round half up (towards positive infinity), so -1.5 rounds to -1.
fn round_half_up(value: f64) -> i64 {
    (value + 0.5).floor() as i64
}

fn normalize_component(key: &str, raw: i64) -> i64 {
    let raw = raw as f64;
    let divisor = match key.to_lowercase().as_str() {
        "quality" => 1000.0,
        "format" => 100.0,
        "indexer" => 500.0,
        "seed" | "seeds" | "seeders" => 100.0,
        "age" => 10.0,
        "size" => 1.0,
        _ => 1000.0,
    };
    round_half_up(raw / divisor)
}

/// Scale every component of a raw smart breakdown.
pub fn normalize_smart(breakdown: &BTreeMap<String, i64>) -> NormalizedSmart {
    let components: BTreeMap<String, i64> = breakdown
        .iter()
        .map(|(key, raw)| (key.clone(), normalize_component(key, *raw)))
        .collect();

    let total = if components.is_empty() {
        0
    } else {
        // Summed as f64, huge components would overflow i64
        let sum: f64 = components.values().map(|v| *v as f64).sum();
        round_half_up(sum / components.len() as f64)
    };

    NormalizedSmart { components, total }
}

/// Render the composite breakdown, or `None` when the score carries no
/// positive smart score.
pub fn explain_smart(score: &QualityScore) -> Option<Vec<String>> {
    score.smart_score.filter(|s| *s > 0)?;

    let normalized = normalize_smart(&score.smart_score_breakdown);

    let mut lines = vec!["Smart (composite) breakdown:".to_string()];
    lines.extend(
        normalized
            .components
            .iter()
            .map(|(key, value)| format!("{}: {}", key, signed(*value))),
    );
    lines.push(format!("Smart Total: {}", normalized.total));

    if score.rejected() {
        lines.push(String::new());
        lines.push("Status: Rejected".to_string());
        if !score.rejection_reasons.is_empty() {
            lines.push(format!("Rejection Reasons: {}", score.rejection_reasons.join("; ")));
        }
    }

    Some(lines)
}
