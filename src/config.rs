use anyhow::{Context, Result};
use std::env;

pub const BASE_URL_VAR: &str = "baseUrl";
pub const API_KEY_VAR: &str = "RAPIDAPI_KEY";
pub const API_HOST_VAR: &str = "RAPIDAPI_HOST";

/// Credentials and endpoint for the review API. Built once in `main` and
/// handed to the client; nothing reads the environment after that.
pub struct ApiConfig {
    pub base_url: String,
    pub api_key: String,
    pub api_host: String,
}

impl std::fmt::Debug for ApiConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiConfig")
            .field("base_url", &self.base_url)
            .field("api_key", &"<redacted>")
            .field("api_host", &self.api_host)
            .finish()
    }
}

impl ApiConfig {
    pub fn new(base_url: &str, api_key: &str, api_host: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.to_string(),
            api_host: api_host.to_string(),
        }
    }

    /// Loads `.env` from the working directory if there is one, then reads
    /// the three API variables.
    pub fn from_env() -> Result<Self> {
        dotenv::dotenv().ok();
        Self::from_lookup(|name| env::var(name).ok())
    }

    fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let require = |name: &str| {
            lookup(name)
                .filter(|v| !v.trim().is_empty())
                .with_context(|| format!("{} environment variable not set. Add it to .env or export it.", name))
        };

        let base_url = require(BASE_URL_VAR)?;
        let api_key = require(API_KEY_VAR)?;
        let api_host = require(API_HOST_VAR)?;
        Ok(Self::new(&base_url, &api_key, &api_host))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> =
            vars.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect();
        move |name| map.get(name).cloned()
    }

    #[test]
    fn test_from_lookup_complete() {
        let config = ApiConfig::from_lookup(lookup(&[
            ("baseUrl", "https://reviews.example.com/api/"),
            ("RAPIDAPI_KEY", "secret"),
            ("RAPIDAPI_HOST", "reviews.example.com"),
        ]))
        .unwrap();
        assert_eq!(config.base_url, "https://reviews.example.com/api");
        assert_eq!(config.api_key, "secret");
        assert_eq!(config.api_host, "reviews.example.com");
    }

    #[test]
    fn test_missing_variable_is_named() {
        let result = ApiConfig::from_lookup(lookup(&[
            ("baseUrl", "https://reviews.example.com"),
            ("RAPIDAPI_HOST", "reviews.example.com"),
        ]));
        let err_msg = result.unwrap_err().to_string();
        assert!(err_msg.contains("RAPIDAPI_KEY"));
    }

    #[test]
    fn test_blank_variable_counts_as_missing() {
        let result = ApiConfig::from_lookup(lookup(&[
            ("baseUrl", "  "),
            ("RAPIDAPI_KEY", "secret"),
            ("RAPIDAPI_HOST", "reviews.example.com"),
        ]));
        assert!(result.unwrap_err().to_string().contains("baseUrl"));
    }

    #[test]
    fn test_debug_redacts_key() {
        let config = ApiConfig::new("https://x", "secret", "x");
        assert!(!format!("{:?}", config).contains("secret"));
    }
}
