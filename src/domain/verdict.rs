//! Findings and the verdict built from them.

use serde::{Serialize, Serializer};

use super::note::Difficulty;

/// A single issue detected while checking a note
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Finding {
    /// Subject mentions "advanced" but the note is declared Basic
    AdvancedSubjectMarkedBasic,

    /// Subject mentions "beginner" but the note is declared Advanced
    BeginnerSubjectMarkedAdvanced,

    /// Estimated difficulty disagrees with the declared one
    DifficultyMismatch {
        estimated: Difficulty,
        declared: Difficulty,
    },

    /// The difficulty estimator failed
    DifficultyUnavailable,

    NoRelatedArticles,
    ArticleLookupFailed,
    NoRelatedVideos,
    VideoLookupFailed,

    /// Title or description below the relevance minimums
    TooShort,
}

impl std::fmt::Display for Finding {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Finding::AdvancedSubjectMarkedBasic => {
                write!(f, "Subject is advanced but difficulty is marked as Basic.")
            }
            Finding::BeginnerSubjectMarkedAdvanced => {
                write!(f, "Subject is beginner but difficulty is marked as Advanced.")
            }
            Finding::DifficultyMismatch { estimated, declared } => write!(
                f,
                "Estimated difficulty ({}) does not match provided difficulty ({}).",
                estimated, declared
            ),
            Finding::DifficultyUnavailable => write!(f, "Could not estimate difficulty."),
            Finding::NoRelatedArticles => write!(f, "No related articles found."),
            Finding::ArticleLookupFailed => write!(f, "Error fetching related articles."),
            Finding::NoRelatedVideos => write!(f, "No related videos found."),
            Finding::VideoLookupFailed => write!(f, "Error fetching related videos."),
            Finding::TooShort => write!(
                f,
                "Title or description is too short to be academically relevant."
            ),
        }
    }
}

impl Serialize for Finding {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Outcome of an authenticity check
///
/// Built only from findings, so `is_authentic` and `flag_for_review`
/// always agree with the reason list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Verdict {
    is_authentic: bool,
    reasons: Vec<Finding>,
    flag_for_review: bool,
}

impl Verdict {
    /// Build a verdict from findings in check order
    pub fn from_findings(findings: Vec<Finding>) -> Self {
        let is_authentic = findings.is_empty();
        Self {
            is_authentic,
            reasons: findings,
            flag_for_review: !is_authentic,
        }
    }

    pub fn is_authentic(&self) -> bool {
        self.is_authentic
    }

    pub fn flag_for_review(&self) -> bool {
        self.flag_for_review
    }

    /// Findings in the order the checks ran
    pub fn findings(&self) -> &[Finding] {
        &self.reasons
    }

    /// Human-readable reasons in the order the checks ran
    pub fn reasons(&self) -> Vec<String> {
        self.reasons.iter().map(ToString::to_string).collect()
    }
}
