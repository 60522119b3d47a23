//! Outbound requests to the REST Countries API
//!
//! Every call is a single GET with no retry. Failures come back as a
//! [`FetchError`] from [`RequestPipeline::try_fetch`] so callers can act on
//! the success branch first, then collapse to an empty list with
//! [`RequestPipeline::fetch`] or [`normalize`].

use std::time::Duration;

use reqwest::{Client, StatusCode};
use thiserror::Error;
use tracing::{debug, warn};

use super::Country;

/// Base URL for the REST Countries v3.1 API
pub const DEFAULT_BASE_URL: &str = "https://restcountries.com/v3.1";

/// Errors that can occur when querying the directory
#[derive(Debug, Error)]
pub enum FetchError {
    /// Network failure, non-success status, or undecodable body
    #[error("HTTP request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// The API answered 404, meaning nothing matched the query
    #[error("No countries matched the query")]
    NotFound,
}

/// Issues requests against the country directory
#[derive(Debug, Clone)]
pub struct RequestPipeline {
    /// HTTP client for making requests
    http_client: Client,
    /// Base URL for the API, without trailing slash
    base_url: String,
}

impl RequestPipeline {
    /// Creates a pipeline for the given base URL
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(Client::new(), base_url)
    }

    /// Creates a pipeline that reuses an existing HTTP client
    pub fn with_client(http_client: Client, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            http_client,
            base_url,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Builds `{base}/{resource}/{term}` with the term encoded as one path segment
    pub fn endpoint(&self, resource: &str, term: &str) -> String {
        format!("{}/{}/{}", self.base_url, resource, urlencoding::encode(term))
    }

    /// Fetches a list of countries, keeping the failure visible
    ///
    /// When `delay` is set, the pipeline waits that long after the response
    /// (or failure) is in hand and before returning it. The wait happens on
    /// both branches.
    pub async fn try_fetch(
        &self,
        url: &str,
        delay: Option<Duration>,
    ) -> Result<Vec<Country>, FetchError> {
        debug!(url, "fetching countries");
        let outcome = self.send(url).await;

        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }

        outcome
    }

    /// Fetches a list of countries, turning any failure into an empty list
    pub async fn fetch(&self, url: &str, delay: Option<Duration>) -> Vec<Country> {
        normalize(url, self.try_fetch(url, delay).await)
    }

    async fn send(&self, url: &str) -> Result<Vec<Country>, FetchError> {
        let response = self.http_client.get(url).send().await?;

        if response.status() == StatusCode::NOT_FOUND {
            return Err(FetchError::NotFound);
        }

        let countries = response
            .error_for_status()?
            .json::<Vec<Country>>()
            .await?;

        Ok(countries)
    }
}

impl Default for RequestPipeline {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL)
    }
}

/// Collapses a fetch outcome into the caller-facing list
pub fn normalize(url: &str, outcome: Result<Vec<Country>, FetchError>) -> Vec<Country> {
    match outcome {
        Ok(countries) => countries,
        Err(FetchError::NotFound) => {
            debug!(url, "no countries matched");
            Vec::new()
        }
        Err(err) => {
            warn!(url, error = %err, "country request failed");
            Vec::new()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Instant;

    /// Nothing listens on port 1, so connections are refused immediately
    const UNREACHABLE_BASE_URL: &str = "http://127.0.0.1:1";

    #[test]
    fn test_endpoint_joins_base_resource_and_term() {
        let pipeline = RequestPipeline::new("https://example.test/v3.1");
        assert_eq!(
            pipeline.endpoint("capital", "paris"),
            "https://example.test/v3.1/capital/paris"
        );
    }

    #[test]
    fn test_trailing_slash_is_trimmed_from_base_url() {
        let pipeline = RequestPipeline::new("https://example.test/v3.1/");
        assert_eq!(pipeline.base_url(), "https://example.test/v3.1");
        assert_eq!(
            pipeline.endpoint("alpha", "fr"),
            "https://example.test/v3.1/alpha/fr"
        );
    }

    #[test]
    fn test_endpoint_encodes_term_as_single_segment() {
        let pipeline = RequestPipeline::new("https://example.test");
        assert_eq!(
            pipeline.endpoint("name", "united states"),
            "https://example.test/name/united%20states"
        );
        assert_eq!(
            pipeline.endpoint("name", "a/b?c#d"),
            "https://example.test/name/a%2Fb%3Fc%23d"
        );
    }

    #[test]
    fn test_endpoint_encodes_utf8_and_punctuation() {
        let pipeline = RequestPipeline::new("https://example.test");
        assert_eq!(
            pipeline.endpoint("capital", "bogotá"),
            "https://example.test/capital/bogot%C3%A1"
        );
        assert_eq!(
            pipeline.endpoint("capital", "St._John's~"),
            "https://example.test/capital/St._John%27s~"
        );
    }

    #[test]
    fn test_default_uses_rest_countries() {
        let pipeline = RequestPipeline::default();
        assert!(pipeline.base_url().contains("restcountries.com"));
    }

    #[test]
    fn test_normalize_keeps_successful_results() {
        let countries = vec![Country::from_value(serde_json::json!({ "cca3": "FRA" }))];
        assert_eq!(normalize("u", Ok(countries.clone())), countries);
    }

    #[test]
    fn test_normalize_collapses_not_found_to_empty() {
        assert!(normalize("u", Err(FetchError::NotFound)).is_empty());
    }

    #[tokio::test]
    async fn test_try_fetch_reports_transport_failure() {
        let pipeline = RequestPipeline::new(UNREACHABLE_BASE_URL);
        let url = pipeline.endpoint("name", "france");

        let result = pipeline.try_fetch(&url, None).await;

        assert!(matches!(result, Err(FetchError::Transport(_))));
    }

    #[tokio::test]
    async fn test_fetch_returns_empty_on_transport_failure() {
        let pipeline = RequestPipeline::new(UNREACHABLE_BASE_URL);
        let url = pipeline.endpoint("name", "france");

        let countries = pipeline.fetch(&url, None).await;

        assert!(countries.is_empty());
    }

    #[tokio::test]
    async fn test_delay_applies_to_failed_requests() {
        let pipeline = RequestPipeline::new(UNREACHABLE_BASE_URL);
        let url = pipeline.endpoint("capital", "paris");
        let delay = Duration::from_millis(50);

        let started = Instant::now();
        let countries = pipeline.fetch(&url, Some(delay)).await;

        assert!(countries.is_empty());
        assert!(
            started.elapsed() >= delay,
            "Delay should hold back failures too"
        );
    }
}
