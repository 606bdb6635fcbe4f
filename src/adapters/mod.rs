//! Content discovery adapters.
//!
//! Adapters look up external material that corroborates a note:
//! articles through Google Custom Search and videos through YouTube.

pub mod google_search;
pub mod youtube;

use anyhow::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::domain::Note;

pub use google_search::GoogleSearchClient;
pub use youtube::YouTubeClient;

/// An article related to a note
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Article {
    pub title: String,
    pub link: String,
    #[serde(default)]
    pub snippet: String,
}

/// A video related to a note
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Video {
    pub title: String,
    pub video_id: String,
    #[serde(default)]
    pub channel_title: String,
}

impl Video {
    /// Watch URL for the video
    pub fn url(&self) -> String {
        format!("https://www.youtube.com/watch?v={}", self.video_id)
    }
}

/// Finds articles related to a note
#[async_trait]
pub trait ArticleSearch: Send + Sync {
    /// Human-readable adapter name
    fn name(&self) -> &str;

    async fn related_articles(&self, note: &Note) -> Result<Vec<Article>>;
}

/// Finds videos related to a note
#[async_trait]
pub trait VideoSearch: Send + Sync {
    /// Human-readable adapter name
    fn name(&self) -> &str;

    async fn related_videos(&self, note: &Note) -> Result<Vec<Video>>;
}

/// Search query for a note: title and subject, space-joined
pub fn search_query(note: &Note) -> String {
    [note.title.trim(), note.subject.trim()]
        .into_iter()
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}
