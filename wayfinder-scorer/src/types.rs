//! Public configuration and output types for relevance scoring.
#![forbid(unsafe_code)]

use serde::{Deserialize, Serialize};

use crate::RelevanceError;

/// Rating-based social-proof bonus.
///
/// The two bonuses are exclusive: a place earns the high bonus, the good
/// bonus, or nothing.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RatingBoost {
    /// Minimum average rating for [`RatingBoost::high_bonus`].
    pub high_threshold: f64,
    /// Bonus for places at or above [`RatingBoost::high_threshold`].
    pub high_bonus: i32,
    /// Minimum average rating for [`RatingBoost::good_bonus`].
    pub good_threshold: f64,
    /// Bonus for places at or above [`RatingBoost::good_threshold`].
    pub good_bonus: i32,
}

impl Default for RatingBoost {
    fn default() -> Self {
        Self {
            high_threshold: 4.5_f64,
            high_bonus: 2,
            good_threshold: 4.0_f64,
            good_bonus: 1,
        }
    }
}

impl RatingBoost {
    /// Bonus earned by a place with `average_rating`.
    #[must_use]
    pub const fn bonus(&self, average_rating: f64) -> i32 {
        if average_rating >= self.high_threshold {
            self.high_bonus
        } else if average_rating >= self.good_threshold {
            self.good_bonus
        } else {
            0
        }
    }

    const fn is_valid(&self) -> bool {
        self.high_threshold.is_finite()
            && self.good_threshold.is_finite()
            && self.good_threshold <= self.high_threshold
            && self.good_bonus >= 0
            && self.high_bonus >= self.good_bonus
    }
}

/// Points awarded or deducted by each relevance signal.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RelevanceWeights {
    /// Bonus when an interest token appears in the place's category.
    pub interest_match: i32,
    /// Bonus when the visitor's home city appears in the place's city.
    pub location_match: i32,
    /// Adjustment for places already in the visit history; never positive.
    pub history_penalty: i32,
    /// Rating-based bonus.
    pub rating_boost: RatingBoost,
}

impl Default for RelevanceWeights {
    fn default() -> Self {
        Self {
            interest_match: 3,
            location_match: 2,
            history_penalty: -5,
            rating_boost: RatingBoost::default(),
        }
    }
}

impl RelevanceWeights {
    /// Validate the weights and return a copy.
    ///
    /// Bonuses must be non-negative and the history penalty non-positive so
    /// every signal moves the score in one direction only.
    ///
    /// # Errors
    /// Returns [`RelevanceError::InvalidWeights`] when a bonus is negative,
    /// the penalty is positive, or the rating thresholds are not finite and
    /// ordered.
    pub const fn validate(self) -> Result<Self, RelevanceError> {
        let signs_ok =
            self.interest_match >= 0 && self.location_match >= 0 && self.history_penalty <= 0;
        if signs_ok && self.rating_boost.is_valid() {
            Ok(self)
        } else {
            Err(RelevanceError::InvalidWeights)
        }
    }
}

/// Per-signal explanation of a relevance score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct ScoreBreakdown {
    /// An interest token matched the category.
    pub interest_match: bool,
    /// The home city matched the place's city.
    pub location_match: bool,
    /// The place is in the visit history.
    pub visited: bool,
    /// Rating bonus applied.
    pub rating_bonus: i32,
    /// Sum of every applied signal.
    pub total: i32,
}
