use anyhow::{Context, Result};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::time::Duration;

use super::{BaseSearchService, SearchResult};
use crate::common::utils::truncate_text;
use crate::common::SecretString;

const TAVILY_SEARCH_URL: &str = "https://api.tavily.com/search";

/// Tavily API client for news search
pub struct TavilyClient {
    api_key: SecretString,
    client: reqwest::Client,
    endpoint: String,
}

/// Tavily search depth
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "lowercase")]
enum SearchDepth {
    Basic,
}

/// Tavily API request. No `Debug`: it carries the key.
#[derive(Serialize)]
struct TavilyRequest<'a> {
    api_key: &'a str,
    query: &'a str,
    topic: &'a str,
    search_depth: SearchDepth,
    max_results: usize,
    days: u32,
}

/// Tavily API response
#[derive(Debug, Deserialize)]
struct TavilyResponse {
    #[serde(default)]
    results: Vec<TavilyResult>,
}

/// Individual search result from Tavily
#[derive(Debug, Deserialize)]
struct TavilyResult {
    #[serde(default)]
    title: String,
    url: String,
    #[serde(default)]
    content: String,
    #[serde(default)]
    score: f64,
    #[serde(default)]
    published_date: Option<String>,
}

impl TavilyClient {
    /// Create a new Tavily client whose requests are bounded by `timeout`.
    pub fn new(api_key: SecretString, timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self {
            api_key,
            client,
            endpoint: TAVILY_SEARCH_URL.to_string(),
        })
    }

    /// Point at a different endpoint (proxies, local stubs).
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }
}

#[async_trait]
impl BaseSearchService for TavilyClient {
    async fn search(&self, query: &str, max_results: usize, days: u32) -> Result<Vec<SearchResult>> {
        let request = TavilyRequest {
            api_key: self.api_key.expose(),
            query,
            topic: "news",
            search_depth: SearchDepth::Basic,
            max_results,
            days,
        };

        let response = self
            .client
            .post(&self.endpoint)
            .json(&request)
            .send()
            .await
            .context("Failed to send Tavily search request")?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            anyhow::bail!("Tavily API error {}: {}", status, truncate_text(&body, 300));
        }

        let tavily_response: TavilyResponse = response
            .json()
            .await
            .context("Failed to parse Tavily response")?;

        let results = tavily_response
            .results
            .into_iter()
            .map(|r| SearchResult {
                title: r.title,
                url: r.url,
                content: r.content,
                score: r.score,
                published_date: r.published_date,
            })
            .collect();

        Ok(results)
    }
}

/// No-op search service for testing or when API key not configured
pub struct NoopSearchService;

#[async_trait]
impl BaseSearchService for NoopSearchService {
    async fn search(&self, _query: &str, _max_results: usize, _days: u32) -> Result<Vec<SearchResult>> {
        tracing::warn!("NoopSearchService: search called but no Tavily API key configured");
        Ok(vec![])
    }

    fn is_configured(&self) -> bool {
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_shape() {
        let request = TavilyRequest {
            api_key: "tvly-test",
            query: "Workday AI",
            topic: "news",
            search_depth: SearchDepth::Basic,
            max_results: 6,
            days: 2,
        };
        let body = serde_json::to_value(&request).unwrap();
        assert_eq!(body["topic"], "news");
        assert_eq!(body["search_depth"], "basic");
        assert_eq!(body["days"], 2);
    }

    #[test]
    fn test_response_tolerates_missing_fields() {
        let parsed: TavilyResponse =
            serde_json::from_str(r#"{"results":[{"url":"https://x.com/a"}]}"#).unwrap();
        assert_eq!(parsed.results.len(), 1);
        assert_eq!(parsed.results[0].title, "");
        assert!(parsed.results[0].published_date.is_none());
    }

    #[tokio::test]
    async fn test_noop_search_is_unconfigured() {
        let noop = NoopSearchService;
        assert!(!noop.is_configured());
        assert!(noop.search("anything", 5, 2).await.unwrap().is_empty());
    }
}
