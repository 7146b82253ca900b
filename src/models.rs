use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use std::fmt;

/// One review record as it comes off the reviews endpoint. Nothing is
/// guaranteed to be present.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawReview {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<Value>,
    #[serde(default, deserialize_with = "lenient_job_title", skip_serializing_if = "Option::is_none")]
    pub job_title: Option<JobTitle>,
    #[serde(default, deserialize_with = "lenient_string", skip_serializing_if = "Option::is_none")]
    pub pros: Option<String>,
    #[serde(default, deserialize_with = "lenient_string", skip_serializing_if = "Option::is_none")]
    pub cons: Option<String>,
    #[serde(default, deserialize_with = "lenient_f64", skip_serializing_if = "Option::is_none")]
    pub rating_overall: Option<f64>,
    #[serde(default, deserialize_with = "lenient_f64", skip_serializing_if = "Option::is_none")]
    pub career_opportunities_rating: Option<f64>,
    #[serde(default, deserialize_with = "lenient_f64", skip_serializing_if = "Option::is_none")]
    pub work_life_balance_rating: Option<f64>,
    #[serde(default, deserialize_with = "lenient_string", skip_serializing_if = "Option::is_none")]
    pub rating_business_outlook: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// `jobTitle` shows up either as a bare string or as `{ "text": ... }`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum JobTitle {
    Plain(String),
    Structured { text: Option<String> },
}

impl JobTitle {
    pub fn into_text(self) -> Option<String> {
        match self {
            JobTitle::Plain(s) => Some(s),
            JobTitle::Structured { text } => text,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NormalizedReview {
    pub summary: String,
    pub job_title: Option<String>,
    pub pros: Option<String>,
    pub cons: Option<String>,
    pub rating_overall: Option<f64>,
    pub career_opportunities_rating: Option<f64>,
    pub work_life_balance_rating: Option<f64>,
    pub rating_business_outlook: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum SentimentLabel {
    Positive,
    Neutral,
    Negative,
}

impl SentimentLabel {
    pub const ALL: [SentimentLabel; 3] = [
        SentimentLabel::Positive,
        SentimentLabel::Neutral,
        SentimentLabel::Negative,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SentimentLabel::Positive => "Positive",
            SentimentLabel::Neutral => "Neutral",
            SentimentLabel::Negative => "Negative",
        }
    }
}

impl fmt::Display for SentimentLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoredReview {
    #[serde(flatten)]
    pub review: NormalizedReview,
    pub sentiment_score: f64,
    pub sentiment_label: SentimentLabel,
    pub sentiment_count: usize, // shared by every review with the same label
}

/// Review count per label. Labels with no reviews are absent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct SentimentSummary(BTreeMap<SentimentLabel, usize>);

impl SentimentSummary {
    pub fn from_labels<I: IntoIterator<Item = SentimentLabel>>(labels: I) -> Self {
        let mut counts = BTreeMap::new();
        for label in labels {
            *counts.entry(label).or_insert(0) += 1;
        }
        Self(counts)
    }

    pub fn count(&self, label: SentimentLabel) -> usize {
        self.0.get(&label).copied().unwrap_or(0)
    }

    pub fn total(&self) -> usize {
        self.0.values().sum()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (SentimentLabel, usize)> + '_ {
        self.0.iter().map(|(label, count)| (*label, *count))
    }

    /// Fraction of all reviews carrying `label`, 0.0 for an empty summary.
    pub fn share(&self, label: SentimentLabel) -> f64 {
        let total = self.total();
        if total == 0 {
            0.0
        } else {
            self.count(label) as f64 / total as f64
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompanyDetails {
    #[serde(default, deserialize_with = "lenient_string")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub square_logo_url: Option<String>,
    #[serde(default)]
    pub year_founded: Option<Value>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub headquarters: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub size: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub website: Option<String>,
    #[serde(default, deserialize_with = "object_or_none")]
    pub overview: Option<Overview>,
    #[serde(default, deserialize_with = "object_or_none")]
    pub primary_industry: Option<Industry>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Overview {
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub mission: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Industry {
    #[serde(default)]
    pub industry_name: Option<String>,
}

impl CompanyDetails {
    pub fn mission(&self) -> &str {
        self.overview
            .as_ref()
            .and_then(|o| o.mission.as_deref())
            .unwrap_or("No mission available.")
    }

    pub fn description(&self) -> &str {
        self.overview
            .as_ref()
            .and_then(|o| o.description.as_deref())
            .unwrap_or("No description available.")
    }

    pub fn industry(&self) -> &str {
        self.primary_industry
            .as_ref()
            .and_then(|i| i.industry_name.as_deref())
            .unwrap_or("No name available.")
    }
}

// Ratings arrive as numbers, numeric strings or null depending on the record.
fn lenient_f64<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::Number(n)) => n.as_f64(),
        Some(Value::String(s)) => s.trim().parse().ok(),
        _ => None,
    })
}

fn lenient_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::String(s)) => Some(s),
        Some(Value::Number(n)) => Some(n.to_string()),
        Some(Value::Bool(b)) => Some(b.to_string()),
        _ => None,
    })
}

// Numbers count as a title; a structured title keeps its `text` the same way.
fn lenient_job_title<'de, D>(deserializer: D) -> Result<Option<JobTitle>, D::Error>
where
    D: Deserializer<'de>,
{
    let text = |value: Option<&Value>| match value {
        Some(Value::String(s)) => Some(s.clone()),
        Some(Value::Number(n)) => Some(n.to_string()),
        _ => None,
    };
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::Object(map)) => Some(JobTitle::Structured { text: text(map.get("text")) }),
        other => text(other.as_ref()).map(JobTitle::Plain),
    })
}

fn object_or_none<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: serde::de::DeserializeOwned,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(v @ Value::Object(_)) => serde_json::from_value(v).ok(),
        _ => None,
    })
}
