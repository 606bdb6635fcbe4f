//! Article search via the Google Custom Search JSON API.
//!
//! Endpoint: GET /customsearch/v1?key=..&cx=..&q=..&num=..

use anyhow::{Context, Result};
use async_trait::async_trait;
use serde::Deserialize;
use tracing::debug;

use super::{search_query, Article, ArticleSearch};
use crate::config::ResolvedConfig;
use crate::domain::Note;

pub const DEFAULT_BASE_URL: &str = "https://www.googleapis.com";

/// The API rejects `num` outside 1..=10
const MAX_RESULTS_LIMIT: u32 = 10;

/// Google Custom Search client
pub struct GoogleSearchClient {
    api_key: Option<String>,
    cse_id: Option<String>,
    base_url: String,
    max_results: u32,
    client: reqwest::Client,
}

/// Response from the Custom Search API; `items` is absent when nothing matched
#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    items: Vec<SearchItem>,
}

#[derive(Debug, Deserialize)]
struct SearchItem {
    #[serde(default)]
    title: String,
    #[serde(default)]
    link: String,
    #[serde(default)]
    snippet: String,
}

impl GoogleSearchClient {
    /// Create a client against the public API
    pub fn new(api_key: Option<String>, cse_id: Option<String>) -> Self {
        Self {
            api_key,
            cse_id,
            base_url: DEFAULT_BASE_URL.to_string(),
            max_results: 5,
            client: reqwest::Client::new(),
        }
    }

    /// Create from resolved configuration
    pub fn from_config(config: &ResolvedConfig) -> Result<Self> {
        let client = config
            .discovery
            .http_client()
            .context("Failed to build HTTP client for Google search")?;

        Ok(Self {
            api_key: config.google.api_key.clone(),
            cse_id: config.google.cse_id.clone(),
            base_url: config.google.base_url.clone(),
            max_results: config.discovery.max_results,
            client,
        })
    }

    /// Point the client at a different API host
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_max_results(mut self, max_results: u32) -> Self {
        self.max_results = max_results;
        self
    }

    /// Use a preconfigured HTTP client
    pub fn with_http_client(mut self, client: reqwest::Client) -> Self {
        self.client = client;
        self
    }

    fn endpoint(&self) -> String {
        format!("{}/customsearch/v1", self.base_url.trim_end_matches('/'))
    }

    fn num(&self) -> u32 {
        self.max_results.clamp(1, MAX_RESULTS_LIMIT)
    }
}

/// Parse a Custom Search response body
fn parse_articles(body: &str) -> Result<Vec<Article>> {
    let response: SearchResponse =
        serde_json::from_str(body).context("Failed to parse Google search response")?;

    Ok(response
        .items
        .into_iter()
        .map(|item| Article {
            title: item.title,
            link: item.link,
            snippet: item.snippet,
        })
        .collect())
}

#[async_trait]
impl ArticleSearch for GoogleSearchClient {
    fn name(&self) -> &str {
        "google-search"
    }

    async fn related_articles(&self, note: &Note) -> Result<Vec<Article>> {
        let api_key = self
            .api_key
            .as_deref()
            .context("Google API key is not configured (GOOGLE_API_KEY)")?;
        let cse_id = self
            .cse_id
            .as_deref()
            .context("Google search engine ID is not configured (GOOGLE_CSE_ID)")?;

        let query = search_query(note);
        let num = self.num().to_string();
        debug!(%query, "Searching Google for related articles");

        let body = self
            .client
            .get(self.endpoint())
            .query(&[
                ("key", api_key),
                ("cx", cse_id),
                ("q", query.as_str()),
                ("num", num.as_str()),
            ])
            .send()
            .await
            .context("Failed to send Google search request")?
            .error_for_status()
            .context("Google search request was rejected")?
            .text()
            .await
            .context("Failed to read Google search response")?;

        parse_articles(&body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Difficulty;

    #[test]
    fn test_parse_items() {
        let body = r#"{
            "kind": "customsearch#search",
            "items": [
                {"title": "Merge sort", "link": "https://example.org/merge", "snippet": "Divide and conquer"},
                {"title": "Quicksort", "link": "https://example.org/quick"}
            ]
        }"#;

        let articles = parse_articles(body).unwrap();
        assert_eq!(articles.len(), 2);
        assert_eq!(articles[0].title, "Merge sort");
        assert_eq!(articles[1].snippet, "");
    }

    #[test]
    fn test_missing_items_means_no_results() {
        let articles = parse_articles(r#"{"kind": "customsearch#search"}"#).unwrap();
        assert!(articles.is_empty());
    }

    #[test]
    fn test_invalid_body_is_error() {
        assert!(parse_articles("<html>").is_err());
    }

    #[test]
    fn test_num_is_clamped() {
        let client = GoogleSearchClient::new(None, None).with_max_results(50);
        assert_eq!(client.num(), 10);

        let client = GoogleSearchClient::new(None, None).with_max_results(0);
        assert_eq!(client.num(), 1);
    }

    #[test]
    fn test_endpoint_trims_trailing_slash() {
        let client = GoogleSearchClient::new(None, None).with_base_url("http://localhost:8080/");
        assert_eq!(client.endpoint(), "http://localhost:8080/customsearch/v1");
    }

    #[tokio::test]
    async fn test_missing_api_key_fails() {
        let client = GoogleSearchClient::new(None, Some("cx".to_string()));
        let note = Note::new("Sorting", Difficulty::Basic);

        let err = client.related_articles(&note).await.unwrap_err();
        assert!(err.to_string().contains("GOOGLE_API_KEY"));
    }

    #[tokio::test]
    async fn test_missing_cse_id_fails() {
        let client = GoogleSearchClient::new(Some("key".to_string()), None);
        let note = Note::new("Sorting", Difficulty::Basic);

        let err = client.related_articles(&note).await.unwrap_err();
        assert!(err.to_string().contains("GOOGLE_CSE_ID"));
    }
}
