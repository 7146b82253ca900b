use tracing::debug;

use crate::models::{NormalizedReview, ScoredReview, SentimentLabel, SentimentSummary};
use crate::sentiment::SentimentScorer;

pub const POSITIVE_THRESHOLD: f64 = 0.2;
pub const NEGATIVE_THRESHOLD: f64 = -0.2;

#[derive(Debug, Clone, Default)]
pub struct Classification {
    pub reviews: Vec<ScoredReview>,
    pub summary: SentimentSummary,
}

impl Classification {
    pub fn is_empty(&self) -> bool {
        self.reviews.is_empty()
    }

    pub fn with_label(&self, label: SentimentLabel) -> impl Iterator<Item = &ScoredReview> {
        self.reviews.iter().filter(move |r| r.sentiment_label == label)
    }
}

/// Both thresholds belong to their named label, not to Neutral.
pub fn label_for(score: f64) -> SentimentLabel {
    if score >= POSITIVE_THRESHOLD {
        SentimentLabel::Positive
    } else if score <= NEGATIVE_THRESHOLD {
        SentimentLabel::Negative
    } else {
        SentimentLabel::Neutral
    }
}

/// Scores and labels every review, then stamps each one with the number of
/// reviews sharing its label.
pub fn classify(scorer: &dyn SentimentScorer, reviews: Vec<NormalizedReview>) -> Classification {
    let scored: Vec<(NormalizedReview, f64, SentimentLabel)> = reviews
        .into_iter()
        .map(|review| {
            let score = scorer.score(&review.summary);
            (review, score, label_for(score))
        })
        .collect();

    let summary = SentimentSummary::from_labels(scored.iter().map(|(_, _, label)| *label));

    let reviews: Vec<ScoredReview> = scored
        .into_iter()
        .map(|(review, sentiment_score, sentiment_label)| ScoredReview {
            review,
            sentiment_score,
            sentiment_label,
            sentiment_count: summary.count(sentiment_label),
        })
        .collect();

    debug!(
        reviews = reviews.len(),
        positive = summary.count(SentimentLabel::Positive),
        neutral = summary.count(SentimentLabel::Neutral),
        negative = summary.count(SentimentLabel::Negative),
        "classified reviews"
    );

    Classification { reviews, summary }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::RawReview;
    use crate::normalize::normalize_reviews;
    use crate::sentiment::SentimentAnalyzer;
    use serde_json::{json, Value};
    use std::collections::HashMap;

    /// Returns preset scores keyed by summary text.
    struct FixedScorer(HashMap<&'static str, f64>);

    impl SentimentScorer for FixedScorer {
        fn score(&self, text: &str) -> f64 {
            self.0.get(text).copied().unwrap_or(0.0)
        }
    }

    fn reviews(summaries: &[&str]) -> Vec<NormalizedReview> {
        let raw: Vec<RawReview> = summaries
            .iter()
            .map(|s| serde_json::from_value(json!({ "summary": s })).unwrap())
            .collect();
        normalize_reviews(raw)
    }

    fn normalized(value: Value) -> Vec<NormalizedReview> {
        normalize_reviews(serde_json::from_value(value).unwrap())
    }

    #[test]
    fn test_label_thresholds() {
        assert_eq!(label_for(0.2), SentimentLabel::Positive);
        assert_eq!(label_for(-0.2), SentimentLabel::Negative);
        assert_eq!(label_for(0.199999), SentimentLabel::Neutral);
        assert_eq!(label_for(-0.199999), SentimentLabel::Neutral);
        assert_eq!(label_for(0.0), SentimentLabel::Neutral);
        assert_eq!(label_for(1.0), SentimentLabel::Positive);
        assert_eq!(label_for(-1.0), SentimentLabel::Negative);
    }

    #[test]
    fn test_boundaries_through_classify() {
        let scorer = FixedScorer(HashMap::from([("up", 0.2), ("down", -0.2), ("almost", 0.199999)]));
        let result = classify(&scorer, reviews(&["up", "down", "almost"]));
        let labels: Vec<SentimentLabel> = result.reviews.iter().map(|r| r.sentiment_label).collect();
        assert_eq!(
            labels,
            vec![SentimentLabel::Positive, SentimentLabel::Negative, SentimentLabel::Neutral]
        );
    }

    #[test]
    fn test_counts_are_shared_per_label() {
        let scorer = FixedScorer(HashMap::from([("a", 0.9), ("b", 0.5), ("c", -0.7)]));
        let result = classify(&scorer, reviews(&["a", "b", "c", "d"]));
        let counts: Vec<usize> = result.reviews.iter().map(|r| r.sentiment_count).collect();
        assert_eq!(counts, vec![2, 2, 1, 1]);
        assert_eq!(result.summary.total(), result.reviews.len());
        assert_eq!(result.with_label(SentimentLabel::Positive).count(), 2);
    }

    #[test]
    fn test_scenarios_with_lexicon() {
        let analyzer = SentimentAnalyzer::new();

        let result = classify(&analyzer, normalized(json!([{"summary": "Great place to work, excellent benefits"}])));
        assert_eq!(result.reviews[0].sentiment_label, SentimentLabel::Positive);
        assert!(result.reviews[0].sentiment_score > 0.2);

        let result = classify(&analyzer, normalized(json!([{"summary": "Terrible management, toxic culture"}])));
        assert_eq!(result.reviews[0].sentiment_label, SentimentLabel::Negative);
        assert!(result.reviews[0].sentiment_score < -0.2);

        let input = normalized(json!([{"summary": null}, {"summary": "It was fine"}]));
        assert_eq!(input.len(), 1);
        let result = classify(&analyzer, input);
        assert_eq!(result.reviews[0].sentiment_label, SentimentLabel::Neutral);
        assert!(result.reviews[0].sentiment_score.abs() < 0.2);
    }

    #[test]
    fn test_summary_sums_to_review_count() {
        let analyzer = SentimentAnalyzer::new();
        let result = classify(
            &analyzer,
            reviews(&[
                "Love the team",
                "Awful hours and poor pay",
                "Office is downtown",
                "Good benefits but terrible leadership",
                "Supportive managers",
            ]),
        );
        let total: usize = result.summary.iter().map(|(_, count)| count).sum();
        assert_eq!(total, result.reviews.len());
        for review in &result.reviews {
            assert_eq!(review.sentiment_count, result.summary.count(review.sentiment_label));
            assert!((-1.0..=1.0).contains(&review.sentiment_score));
        }
    }

    #[test]
    fn test_rerun_is_identical() {
        let analyzer = SentimentAnalyzer::new();
        let input = reviews(&["Decent pay, long hours", "Not a great culture", "Fun coworkers!"]);
        let first = classify(&analyzer, input.clone());
        let second = classify(&analyzer, input);
        assert_eq!(first.reviews, second.reviews);
        assert_eq!(first.summary, second.summary);
    }

    #[test]
    fn test_empty_input() {
        let result = classify(&SentimentAnalyzer::new(), normalize_reviews(Vec::new()));
        assert!(result.is_empty());
        assert!(result.summary.is_empty());
    }
}
