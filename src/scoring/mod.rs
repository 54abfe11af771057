//! Score explanations - turn a backend quality score into lines a person
//! can check by hand.
//!
//! Two renderings exist:
//! - [`explain`] reconstructs the legacy additive score from a base of 100
//! - [`explain_smart`] shows the normalized composite score when the backend
//!   produced one

mod breakdown;
mod smart;

pub use breakdown::{BASE_SCORE, explain};
pub use smart::{NormalizedSmart, explain_smart, normalize_smart};

use crate::model::QualityScore;

/// Pick the rendering a UI would show: rejections first, then the composite
/// score when present, otherwise the additive breakdown.
pub fn describe(score: &QualityScore) -> Vec<String> {
    if score.rejected() {
        let mut lines = vec!["Status: Rejected".to_string()];
        if !score.rejection_reasons.is_empty() {
            lines.push(format!("Rejection Reasons: {}", score.rejection_reasons.join("; ")));
        }
        return lines;
    }
    explain_smart(score).unwrap_or_else(|| explain(score))
}

/// Format a contribution with an explicit `+` for positive values.
fn signed(value: i64) -> String {
    if value > 0 {
        format!("+{}", value)
    } else {
        value.to_string()
    }
}
