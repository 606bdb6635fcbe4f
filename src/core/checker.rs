//! Note authenticity checker.
//!
//! Runs the heuristic checks in a fixed order and collects one finding
//! per issue:
//! 1. Subject keywords against the declared difficulty
//! 2. Estimated difficulty against the declared difficulty
//! 3. Related articles
//! 4. Related videos
//! 5. Title and description length
//!
//! The article and video lookups run concurrently, but their findings
//! are appended articles-first regardless of which finishes first.
//! Nothing here returns an error: collaborator failures become findings.

use std::sync::Arc;

use anyhow::Result;
use tracing::{debug, info, instrument, warn};

use crate::adapters::{
    Article, ArticleSearch, GoogleSearchClient, Video, VideoSearch, YouTubeClient,
};
use crate::config::ResolvedConfig;
use crate::domain::{Difficulty, Finding, Note, Verdict};

use super::estimator::{DifficultyEstimator, KeywordEstimator, NoteText};

/// Minimum title length, in UTF-16 code units
pub const MIN_TITLE_LEN: usize = 5;

/// Minimum description length, in UTF-16 code units
pub const MIN_DESCRIPTION_LEN: usize = 20;

/// Checks notes for authenticity and academic relevance
#[derive(Clone)]
pub struct AuthenticityChecker {
    estimator: Arc<dyn DifficultyEstimator>,
    articles: Arc<dyn ArticleSearch>,
    videos: Arc<dyn VideoSearch>,
}

impl AuthenticityChecker {
    /// Create a checker from its collaborators
    pub fn new(
        estimator: Arc<dyn DifficultyEstimator>,
        articles: Arc<dyn ArticleSearch>,
        videos: Arc<dyn VideoSearch>,
    ) -> Self {
        Self {
            estimator,
            articles,
            videos,
        }
    }

    /// Create a checker using the keyword estimator and the configured
    /// Google and YouTube clients
    pub fn from_config(config: &ResolvedConfig) -> Result<Self> {
        Ok(Self::new(
            Arc::new(KeywordEstimator::new()),
            Arc::new(GoogleSearchClient::from_config(config)?),
            Arc::new(YouTubeClient::from_config(config)?),
        ))
    }

    /// Evaluate a note
    #[instrument(skip(self, note), fields(title = %note.title))]
    pub async fn evaluate(&self, note: &Note) -> Verdict {
        let mut findings = difficulty_findings(self.estimator.as_ref(), note);

        let (articles, videos) = tokio::join!(
            self.articles.related_articles(note),
            self.videos.related_videos(note),
        );

        findings.extend(article_finding(self.articles.name(), articles));
        findings.extend(video_finding(self.videos.name(), videos));

        if is_too_short(note) {
            findings.push(Finding::TooShort);
        }

        for finding in &findings {
            debug!(%finding, "Issue found");
        }

        let verdict = Verdict::from_findings(findings);
        info!(
            authentic = verdict.is_authentic(),
            issues = verdict.findings().len(),
            "Authenticity check complete"
        );
        verdict
    }
}

/// Subject-keyword and estimate checks, in order
fn difficulty_findings(estimator: &dyn DifficultyEstimator, note: &Note) -> Vec<Finding> {
    let subject = note.subject.to_lowercase();
    let declared = note.difficulty;
    let mut findings = Vec::new();

    if subject.contains("advanced") && declared == Difficulty::Basic {
        findings.push(Finding::AdvancedSubjectMarkedBasic);
    }
    if subject.contains("beginner") && declared == Difficulty::Advanced {
        findings.push(Finding::BeginnerSubjectMarkedAdvanced);
    }

    match estimator.estimate(&NoteText::from(note)) {
        Ok(estimate) => {
            let estimated = estimate.to_note_scale();
            debug!(%estimate, %estimated, %declared, "Difficulty estimated");
            if estimated != declared {
                findings.push(Finding::DifficultyMismatch { estimated, declared });
            }
        }
        Err(e) => {
            warn!(error = %e, "Difficulty estimation failed");
            findings.push(Finding::DifficultyUnavailable);
        }
    }

    findings
}

fn article_finding(source: &str, result: Result<Vec<Article>>) -> Option<Finding> {
    match result {
        Ok(articles) if articles.is_empty() => Some(Finding::NoRelatedArticles),
        Ok(articles) => {
            debug!(source, count = articles.len(), "Related articles found");
            None
        }
        Err(e) => {
            warn!(source, error = %format!("{:#}", e), "Article lookup failed");
            Some(Finding::ArticleLookupFailed)
        }
    }
}

fn video_finding(source: &str, result: Result<Vec<Video>>) -> Option<Finding> {
    match result {
        Ok(videos) if videos.is_empty() => Some(Finding::NoRelatedVideos),
        Ok(videos) => {
            debug!(
                source,
                count = videos.len(),
                first = %videos[0].url(),
                "Related videos found"
            );
            None
        }
        Err(e) => {
            warn!(source, error = %format!("{:#}", e), "Video lookup failed");
            Some(Finding::VideoLookupFailed)
        }
    }
}

/// Lengths are UTF-16 code units, so characters outside the BMP count twice
fn is_too_short(note: &Note) -> bool {
    note.title.encode_utf16().count() < MIN_TITLE_LEN
        || note.description.encode_utf16().count() < MIN_DESCRIPTION_LEN
}
