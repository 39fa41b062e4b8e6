//! Book ratings.
//!
//! # Invariants
//! - `score` is always inside `RATING_MIN..=RATING_MAX`.
//! - At most one rating exists per book title (enforced by the handlers).

use serde::{Deserialize, Serialize};

pub const RATING_MIN: i64 = 1;
pub const RATING_MAX: i64 = 5;

/// Returns whether `score` is an accepted star count.
pub fn is_valid_score(score: i64) -> bool {
    (RATING_MIN..=RATING_MAX).contains(&score)
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rating {
    pub score: u8,
    /// Title of the rated book at the time of the last write.
    pub title: String,
}

impl Rating {
    /// Builds a rating, returning `None` for out-of-range scores.
    pub fn new(score: i64, title: impl Into<String>) -> Option<Self> {
        let score = u8::try_from(score).ok().filter(|s| is_valid_score(i64::from(*s)))?;
        Some(Self {
            score,
            title: title.into(),
        })
    }

    /// Replaces the score; out-of-range values leave the rating untouched.
    pub fn set_score(&mut self, score: i64) -> bool {
        match u8::try_from(score) {
            Ok(value) if is_valid_score(score) => {
                self.score = value;
                true
            }
            _ => false,
        }
    }
}
