//! Score explanation command.

use crate::model::QualityScore;
use crate::scoring;

/// Raw score pieces collected from the command line
pub struct ScoreArgs {
    pub total: i64,
    pub breakdown: Vec<(String, i64)>,
    pub rejected: bool,
    pub reasons: Vec<String>,
    pub smart_score: Option<i64>,
    pub smart: Vec<(String, i64)>,
}

impl From<ScoreArgs> for QualityScore {
    fn from(args: ScoreArgs) -> Self {
        QualityScore {
            is_rejected: args.rejected,
            rejection_reasons: args.reasons,
            smart_score: args.smart_score,
            smart_score_breakdown: args.smart.into_iter().collect(),
            ..QualityScore::new(args.total, args.breakdown)
        }
    }
}

/// Parse `Key=Value` with a signed integer value.
pub fn parse_contribution(s: &str) -> Result<(String, i64), String> {
    let (key, value) = s
        .split_once('=')
        .ok_or_else(|| format!("expected Key=Value, got '{}'", s))?;
    let key = key.trim();
    if key.is_empty() {
        return Err(format!("missing key in '{}'", s));
    }
    let value = value
        .trim()
        .trim_start_matches('+')
        .parse::<i64>()
        .map_err(|e| format!("invalid value in '{}': {}", s, e))?;
    Ok((key.to_string(), value))
}

/// Explain how a quality score adds up
pub fn cmd_explain(args: ScoreArgs, summary: bool) -> anyhow::Result<()> {
    let score = QualityScore::from(args);

    if summary {
        for line in scoring::describe(&score) {
            println!("{}", line);
        }
        return Ok(());
    }

    for line in scoring::explain(&score) {
        println!("{}", line);
    }
    if let Some(smart) = scoring::explain_smart(&score) {
        println!();
        for line in smart {
            println!("{}", line);
        }
    }
    Ok(())
}
