//! Domain types for notecheck.
//!
//! - Note: the submitted note and its declared difficulty
//! - Verdict: findings and the resulting review decision

pub mod note;
pub mod verdict;

pub use note::{Difficulty, Note};
pub use verdict::{Finding, Verdict};
