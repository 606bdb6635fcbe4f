//! Video search via the YouTube Data API v3.
//!
//! Endpoint: GET /youtube/v3/search?part=snippet&type=video&maxResults=..&q=..&key=..

use anyhow::{Context, Result};
use async_trait::async_trait;
use serde::Deserialize;
use tracing::debug;

use super::{search_query, Video, VideoSearch};
use crate::config::ResolvedConfig;
use crate::domain::Note;

pub const DEFAULT_BASE_URL: &str = "https://www.googleapis.com";

/// The API caps `maxResults` at 50
const MAX_RESULTS_LIMIT: u32 = 50;

/// YouTube search client
pub struct YouTubeClient {
    api_key: Option<String>,
    base_url: String,
    max_results: u32,
    client: reqwest::Client,
}

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    items: Vec<SearchItem>,
}

#[derive(Debug, Deserialize)]
struct SearchItem {
    id: ItemId,
    #[serde(default)]
    snippet: Option<Snippet>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ItemId {
    video_id: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Snippet {
    #[serde(default)]
    title: String,
    #[serde(default)]
    channel_title: String,
}

impl YouTubeClient {
    /// Create a client against the public API
    pub fn new(api_key: Option<String>) -> Self {
        Self {
            api_key,
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
            .context("Failed to build HTTP client for YouTube search")?;

        Ok(Self {
            api_key: config.youtube.api_key.clone(),
            base_url: config.youtube.base_url.clone(),
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
        format!("{}/youtube/v3/search", self.base_url.trim_end_matches('/'))
    }
}

/// Parse a search response body, skipping results that are not videos
fn parse_videos(body: &str) -> Result<Vec<Video>> {
    let response: SearchResponse =
        serde_json::from_str(body).context("Failed to parse YouTube search response")?;

    Ok(response
        .items
        .into_iter()
        .filter_map(|item| {
            let video_id = item.id.video_id?;
            let snippet = item.snippet.unwrap_or_default();
            Some(Video {
                title: snippet.title,
                video_id,
                channel_title: snippet.channel_title,
            })
        })
        .collect())
}

#[async_trait]
impl VideoSearch for YouTubeClient {
    fn name(&self) -> &str {
        "youtube"
    }

    async fn related_videos(&self, note: &Note) -> Result<Vec<Video>> {
        let api_key = self
            .api_key
            .as_deref()
            .context("YouTube API key is not configured (YOUTUBE_API_KEY)")?;

        let query = search_query(note);
        let max_results = self.max_results.clamp(1, MAX_RESULTS_LIMIT).to_string();
        debug!(%query, "Searching YouTube for related videos");

        let body = self
            .client
            .get(self.endpoint())
            .query(&[
                ("part", "snippet"),
                ("type", "video"),
                ("maxResults", max_results.as_str()),
                ("q", query.as_str()),
                ("key", api_key),
            ])
            .send()
            .await
            .context("Failed to send YouTube search request")?
            .error_for_status()
            .context("YouTube search request was rejected")?
            .text()
            .await
            .context("Failed to read YouTube search response")?;

        parse_videos(&body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Difficulty;

    #[test]
    fn test_parse_videos() {
        let body = r#"{
            "kind": "youtube#searchListResponse",
            "items": [
                {
                    "id": {"kind": "youtube#video", "videoId": "dQw4"},
                    "snippet": {"title": "Eigenvalues explained", "channelTitle": "3Blue1Brown"}
                },
                {
                    "id": {"kind": "youtube#channel", "channelId": "UC123"},
                    "snippet": {"title": "A channel"}
                }
            ]
        }"#;

        let videos = parse_videos(body).unwrap();
        assert_eq!(videos.len(), 1);
        assert_eq!(videos[0].video_id, "dQw4");
        assert_eq!(videos[0].channel_title, "3Blue1Brown");
    }

    #[test]
    fn test_no_items() {
        let videos = parse_videos(r#"{"kind": "youtube#searchListResponse", "items": []}"#).unwrap();
        assert!(videos.is_empty());
    }

    #[tokio::test]
    async fn test_missing_api_key_fails() {
        let client = YouTubeClient::new(None);
        let note = Note::new("Sorting", Difficulty::Basic);

        let err = client.related_videos(&note).await.unwrap_err();
        assert!(err.to_string().contains("YOUTUBE_API_KEY"));
    }
}
