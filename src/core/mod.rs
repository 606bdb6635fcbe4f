//! Core checking logic.
//!
//! This module contains:
//! - Estimator: difficulty estimation from note text
//! - Checker: the authenticity pipeline producing a verdict

pub mod checker;
pub mod estimator;

// Re-export commonly used types
pub use checker::{AuthenticityChecker, MIN_DESCRIPTION_LEN, MIN_TITLE_LEN};
pub use estimator::{
    DifficultyEstimator, EstimateError, EstimatedDifficulty, KeywordEstimator, NoteText,
};
