use serde_json::Value;
use tracing::debug;

use crate::models::{NormalizedReview, RawReview};

/// Turns raw API records into reviews that are guaranteed to carry a text
/// summary. Records without one are dropped without complaint; order of the
/// survivors is preserved.
pub fn normalize_reviews(raw: Vec<RawReview>) -> Vec<NormalizedReview> {
    let total = raw.len();
    let normalized: Vec<NormalizedReview> = raw.into_iter().filter_map(normalize_review).collect();

    debug!(
        kept = normalized.len(),
        dropped = total - normalized.len(),
        "normalized reviews"
    );
    normalized
}

fn normalize_review(raw: RawReview) -> Option<NormalizedReview> {
    let summary = summary_text(raw.summary?)?;

    Some(NormalizedReview {
        summary,
        job_title: raw.job_title.and_then(|t| t.into_text()),
        pros: raw.pros,
        cons: raw.cons,
        rating_overall: raw.rating_overall,
        career_opportunities_rating: raw.career_opportunities_rating,
        work_life_balance_rating: raw.work_life_balance_rating,
        rating_business_outlook: raw.rating_business_outlook,
        extra: raw.extra,
    })
}

fn summary_text(value: Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) => Some(s),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        other => Some(other.to_string()),
    }
}
