use anyhow::{Context, Result};
use serde::Deserialize;
use serde_json::Value;
use tracing::{debug, info, warn};

use crate::config::ApiConfig;
use crate::models::{CompanyDetails, RawReview};

/// Blocking client for the employer review API. Only the first page of
/// reviews is ever requested.
#[derive(Debug)]
pub struct ReviewsClient {
    config: ApiConfig,
    client: reqwest::blocking::Client,
}

impl ReviewsClient {
    pub fn new(config: ApiConfig) -> Self {
        let client = reqwest::blocking::Client::new();
        Self { config, client }
    }

    fn get(&self, path: &str, query: &[(&str, &str)]) -> Result<Option<Value>> {
        let url = format!("{}/{}", self.config.base_url, path);
        debug!(%url, ?query, "GET");

        let response = self
            .client
            .get(&url)
            .header("x-rapidapi-key", &self.config.api_key)
            .header("x-rapidapi-host", &self.config.api_host)
            .query(query)
            .send()
            .with_context(|| format!("Failed to send request to {}", url))?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().unwrap_or_default();
            warn!(%status, path, body = %error_text, "review API request failed");
            return Ok(None);
        }

        let body: Value = response
            .json()
            .with_context(|| format!("Failed to parse response from {}", url))?;
        Ok(Some(body))
    }

    /// Looks a company up by name and returns the id of the best match.
    pub fn search_company_id(&self, company_name: &str) -> Result<Option<String>> {
        let body = self.get("search", &[("query", company_name)])?;
        let id = body.as_ref().and_then(extract_company_id);
        info!(company = company_name, id = ?id, "company search");
        Ok(id)
    }

    pub fn company_details(&self, company_id: &str) -> Result<Option<CompanyDetails>> {
        let body = self.get("overview-details", &[("companyId", company_id)])?;
        match body {
            Some(body) => extract_company_details(&body),
            None => Ok(None),
        }
    }

    pub fn reviews(&self, company_id: &str) -> Result<Vec<RawReview>> {
        let body = self.get("reviews", &[("companyId", company_id), ("page", "1")])?;
        let reviews = match body {
            Some(body) => extract_reviews(&body),
            None => Vec::new(),
        };
        info!(company_id, count = reviews.len(), "fetched reviews");
        Ok(reviews)
    }
}

/// `data.employerResults[0].employer.id`, numeric or string.
pub fn extract_company_id(body: &Value) -> Option<String> {
    match body.pointer("/data/employerResults/0/employer/id")? {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

pub fn extract_company_details(body: &Value) -> Result<Option<CompanyDetails>> {
    match body.get("data") {
        Some(data @ Value::Object(_)) => {
            let details = serde_json::from_value(data.clone())
                .context("Failed to parse company details")?;
            Ok(Some(details))
        }
        _ => Ok(None),
    }
}

/// `data.employerReviewsRG.reviews`; anything missing along the way means no
/// reviews.
pub fn extract_reviews(body: &Value) -> Vec<RawReview> {
    match body.pointer("/data/employerReviewsRG/reviews") {
        Some(Value::Array(items)) => parse_reviews(items),
        _ => Vec::new(),
    }
}

/// Parses each review on its own so a malformed entry is skipped instead of
/// failing the whole page.
pub fn parse_reviews(items: &[Value]) -> Vec<RawReview> {
    items
        .iter()
        .enumerate()
        .filter_map(|(index, item)| match RawReview::deserialize(item) {
            Ok(review) => Some(review),
            Err(e) => {
                warn!(index, error = %e, "Skipping malformed review");
                None
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_extract_company_id_numeric() {
        let body = json!({"data": {"employerResults": [
            {"employer": {"id": 9079, "shortName": "Google"}},
            {"employer": {"id": 1}}
        ]}});
        assert_eq!(extract_company_id(&body).as_deref(), Some("9079"));
    }

    #[test]
    fn test_extract_company_id_string() {
        let body = json!({"data": {"employerResults": [{"employer": {"id": "abc"}}]}});
        assert_eq!(extract_company_id(&body).as_deref(), Some("abc"));
    }

    #[test]
    fn test_extract_company_id_missing() {
        assert_eq!(extract_company_id(&json!({"data": {"employerResults": []}})), None);
        assert_eq!(extract_company_id(&json!({})), None);
        assert_eq!(
            extract_company_id(&json!({"data": {"employerResults": [{"employer": {"id": null}}]}})),
            None
        );
    }

    #[test]
    fn test_extract_company_details() {
        let body = json!({"data": {
            "name": "Acme Corp",
            "yearFounded": 1999,
            "overview": {"description": "Makes anvils", "mission": "More anvils"},
            "primaryIndustry": {"industryName": "Manufacturing"}
        }});
        let details = extract_company_details(&body).unwrap().unwrap();
        assert_eq!(details.name.as_deref(), Some("Acme Corp"));
        assert_eq!(details.description(), "Makes anvils");
        assert_eq!(details.industry(), "Manufacturing");
    }

    #[test]
    fn test_extract_company_details_not_object() {
        assert!(extract_company_details(&json!({"data": []})).unwrap().is_none());
        assert!(extract_company_details(&json!({})).unwrap().is_none());
    }

    #[test]
    fn test_extract_reviews() {
        let body = json!({"data": {"employerReviewsRG": {"reviews": [
            {"summary": "Great team", "jobTitle": {"text": "Engineer"}, "workLifeBalanceRating": 4},
            {"summary": null}
        ]}}});
        let reviews = extract_reviews(&body);
        assert_eq!(reviews.len(), 2);
        assert_eq!(reviews[0].work_life_balance_rating, Some(4.0));
        assert!(reviews[1].summary.is_none());
    }

    #[test]
    fn test_extract_reviews_missing_path() {
        assert!(extract_reviews(&json!({"data": {}})).is_empty());
        assert!(extract_reviews(&json!({"data": {"employerReviewsRG": null}})).is_empty());
    }

    #[test]
    fn test_extract_reviews_odd_job_titles() {
        let body = json!({"data": {"employerReviewsRG": {"reviews": [
            {"summary": "Great team"},
            {"summary": "Awful hours", "jobTitle": 42},
            {"summary": "Long days", "jobTitle": {"text": 7}}
        ]}}});
        let reviews = extract_reviews(&body);
        assert_eq!(reviews.len(), 3);
        assert!(reviews[0].job_title.is_none());
        assert_eq!(reviews[1].job_title.clone().and_then(|t| t.into_text()).as_deref(), Some("42"));
        assert_eq!(reviews[2].job_title.clone().and_then(|t| t.into_text()).as_deref(), Some("7"));
    }

    #[test]
    fn test_malformed_review_is_skipped() {
        let items = vec![
            json!({"summary": "Great team"}),
            json!("not a review"),
            json!(17),
            json!({"summary": "Awful hours"}),
        ];
        let reviews = parse_reviews(&items);
        assert_eq!(reviews.len(), 2);
        assert_eq!(reviews[0].summary, Some(json!("Great team")));
        assert_eq!(reviews[1].summary, Some(json!("Awful hours")));
    }
}
