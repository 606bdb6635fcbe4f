//! Difficulty estimation from note text.
//!
//! The estimator speaks its own coarse scale (`Easy`/`Medium`/`Hard`),
//! which the checker maps onto the note scale before comparing.

use std::str::FromStr;

use thiserror::Error;

use crate::domain::{Difficulty, Note};

/// Coarse difficulty label produced by an estimator
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EstimatedDifficulty {
    Easy,
    Medium,
    Hard,
}

impl EstimatedDifficulty {
    /// Map onto the vocabulary notes are declared in
    pub fn to_note_scale(self) -> Difficulty {
        match self {
            EstimatedDifficulty::Easy => Difficulty::Basic,
            EstimatedDifficulty::Medium => Difficulty::Intermediate,
            EstimatedDifficulty::Hard => Difficulty::Advanced,
        }
    }
}

impl std::fmt::Display for EstimatedDifficulty {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EstimatedDifficulty::Easy => write!(f, "Easy"),
            EstimatedDifficulty::Medium => write!(f, "Medium"),
            EstimatedDifficulty::Hard => write!(f, "Hard"),
        }
    }
}

impl FromStr for EstimatedDifficulty {
    type Err = EstimateError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "easy" => Ok(EstimatedDifficulty::Easy),
            "medium" => Ok(EstimatedDifficulty::Medium),
            "hard" => Ok(EstimatedDifficulty::Hard),
            _ => Err(EstimateError::UnknownLabel(s.to_string())),
        }
    }
}

/// Estimator failures
#[derive(Debug, Error)]
pub enum EstimateError {
    #[error("Unrecognized difficulty label: {0:?}")]
    UnknownLabel(String),

    #[error("Difficulty estimator failed: {message}")]
    Backend { message: String },
}

/// Text fields an estimator looks at
#[derive(Debug, Clone, Copy)]
pub struct NoteText<'a> {
    pub title: &'a str,
    pub description: &'a str,
    pub summary: &'a str,
}

impl<'a> From<&'a Note> for NoteText<'a> {
    fn from(note: &'a Note) -> Self {
        Self {
            title: &note.title,
            description: &note.description,
            summary: &note.summary,
        }
    }
}

/// Maps note text to a coarse difficulty
pub trait DifficultyEstimator: Send + Sync {
    fn estimate(&self, text: &NoteText<'_>) -> Result<EstimatedDifficulty, EstimateError>;
}

/// Terms that push an estimate towards Hard
const HARD_TERMS: &[&[&str]] = &[
    &["advanced"],
    &["graduate"],
    &["theorem"],
    &["theorems"],
    &["proof"],
    &["proofs"],
    &["derivation"],
    &["calculus"],
    &["differential"],
    &["integral"],
    &["eigenvalue"],
    &["eigenvalues"],
    &["quantum"],
    &["asymptotic"],
    &["topology"],
    &["stochastic"],
    &["thermodynamics"],
    &["linear", "algebra"],
    &["real", "analysis"],
];

/// Terms that push an estimate towards Easy
const EASY_TERMS: &[&[&str]] = &[
    &["introduction"],
    &["intro"],
    &["basic"],
    &["basics"],
    &["beginner"],
    &["beginners"],
    &["fundamentals"],
    &["overview"],
    &["simple"],
    &["elementary"],
    &["primer"],
    &["getting", "started"],
];

/// Keyword-scoring estimator
///
/// Each hard term scores +1, each easy term -1, and long texts get +1.
/// Scores at or above `hard_threshold` are Hard, at or below
/// `easy_threshold` are Easy, everything else is Medium.
#[derive(Debug, Clone)]
pub struct KeywordEstimator {
    pub hard_threshold: i64,
    pub easy_threshold: i64,
    /// Word count above which the text earns the length bonus
    pub long_text_words: usize,
}

impl Default for KeywordEstimator {
    fn default() -> Self {
        Self {
            hard_threshold: 2,
            easy_threshold: -1,
            long_text_words: 150,
        }
    }
}

impl KeywordEstimator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Signed keyword score for a text
    pub fn score(&self, text: &NoteText<'_>) -> i64 {
        let combined = format!("{} {} {}", text.title, text.description, text.summary);
        let words = tokenize(&combined);

        let hard = count_terms(&words, HARD_TERMS) as i64;
        let easy = count_terms(&words, EASY_TERMS) as i64;
        let length_bonus = i64::from(words.len() > self.long_text_words);

        hard - easy + length_bonus
    }
}

impl DifficultyEstimator for KeywordEstimator {
    fn estimate(&self, text: &NoteText<'_>) -> Result<EstimatedDifficulty, EstimateError> {
        let score = self.score(text);

        let estimate = if score >= self.hard_threshold {
            EstimatedDifficulty::Hard
        } else if score <= self.easy_threshold {
            EstimatedDifficulty::Easy
        } else {
            EstimatedDifficulty::Medium
        };

        Ok(estimate)
    }
}

fn tokenize(text: &str) -> Vec<String> {
    text.split(|c: char| !c.is_alphanumeric())
        .filter(|w| !w.is_empty())
        .map(str::to_lowercase)
        .collect()
}

fn count_terms(words: &[String], terms: &[&[&str]]) -> usize {
    terms
        .iter()
        .map(|term| {
            words
                .windows(term.len())
                .filter(|window| {
                    window
                        .iter()
                        .zip(term.iter())
                        .all(|(word, expected)| word.as_str() == *expected)
                })
                .count()
        })
        .sum()
}
