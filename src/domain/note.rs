//! Notes submitted for review.

use std::path::Path;

use anyhow::{Context, Result};
use serde::{de::Error as _, Deserialize, Deserializer, Serialize};

/// Difficulty declared by the uploader
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Difficulty {
    Basic,
    Intermediate,
    Advanced,
}

impl std::fmt::Display for Difficulty {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Difficulty::Basic => write!(f, "Basic"),
            Difficulty::Intermediate => write!(f, "Intermediate"),
            Difficulty::Advanced => write!(f, "Advanced"),
        }
    }
}

/// A note as submitted to the platform
///
/// Only `title` and `difficulty` are required; the free-text fields
/// default to empty strings when absent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Note {
    #[serde(deserialize_with = "required_text")]
    pub title: String,

    #[serde(default, deserialize_with = "empty_if_null")]
    pub subject: String,

    #[serde(default, deserialize_with = "empty_if_null")]
    pub description: String,

    #[serde(default, deserialize_with = "empty_if_null")]
    pub summary: String,

    pub difficulty: Difficulty,
}

impl Note {
    /// Create a note with empty subject, description and summary
    pub fn new(title: impl Into<String>, difficulty: Difficulty) -> Self {
        Self {
            title: title.into(),
            subject: String::new(),
            description: String::new(),
            summary: String::new(),
            difficulty,
        }
    }

    pub fn with_subject(mut self, subject: impl Into<String>) -> Self {
        self.subject = subject.into();
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_summary(mut self, summary: impl Into<String>) -> Self {
        self.summary = summary.into();
        self
    }

    /// Parse a note from JSON or YAML content
    pub fn from_str_any(content: &str) -> Result<Self> {
        // YAML is a superset of JSON, so one parser covers both
        serde_yaml::from_str(content).context("Failed to parse note")
    }

    /// Load a note from a JSON or YAML file
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read note file: {}", path.display()))?;

        Self::from_str_any(&content)
            .with_context(|| format!("Invalid note in {}", path.display()))
    }
}

/// Explicit nulls count as empty text
fn empty_if_null<'de, D: Deserializer<'de>>(deserializer: D) -> std::result::Result<String, D::Error> {
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

fn required_text<'de, D: Deserializer<'de>>(deserializer: D) -> std::result::Result<String, D::Error> {
    Option::<String>::deserialize(deserializer)?
        .ok_or_else(|| D::Error::custom("title must not be null"))
}
