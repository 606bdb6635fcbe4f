//! notecheck - Authenticity checker for shared study notes
//!
//! Cross-checks a note's declared difficulty against its subject and an
//! estimate derived from its text, looks for corroborating articles and
//! videos, and applies a basic length heuristic. The result is a verdict
//! listing every issue found and whether the note needs human review.
//!
//! # Modules
//!
//! - `adapters`: Content discovery (Google Custom Search, YouTube)
//! - `core`: Difficulty estimation and the authenticity checker
//! - `domain`: Data structures (Note, Finding, Verdict)
//! - `config`: Layered configuration
//! - `cli`: Command-line interface
//!
//! # Usage
//!
//! ```bash
//! # Check a note
//! notecheck check --input note.json
//!
//! # Estimate difficulty only
//! cat note.yaml | notecheck estimate
//! ```

pub mod adapters;
pub mod cli;
pub mod config;
pub mod core;
pub mod domain;

// Re-export main types at crate root for convenience
pub use adapters::{Article, ArticleSearch, Video, VideoSearch};
pub use core::{AuthenticityChecker, DifficultyEstimator, EstimatedDifficulty, KeywordEstimator};
pub use domain::{Difficulty, Finding, Note, Verdict};
