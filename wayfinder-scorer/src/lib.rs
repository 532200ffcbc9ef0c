//! Relevance scoring for Wayfinder places.
//!
//! [`RelevanceScorer`] combines four independent signals into a signed integer
//! score for a (visitor, place) pair:
//! - **Interest match**: any interest token, case-folded, is a substring of the
//!   place's category, so "mosque" matches "Historical Mosques".
//! - **Location match**: the visitor's home city, case-folded, is a substring
//!   of the place's city label.
//! - **History penalty**: the place's name or id is in the visit history.
//! - **Social proof**: an exclusive bonus for highly rated places.
//!
//! Each signal applies at most once and none depends on another, so the score
//! is monotonic in every signal. Budget filtering happens before scoring and is
//! not part of the score.
//!
//! # Examples
//!
//! ```
//! use wayfinder_core::{Place, Scorer, UserProfile};
//! use wayfinder_scorer::RelevanceScorer;
//!
//! let scorer = RelevanceScorer::default();
//! let place = Place::new("p1", "Al Fath Mosque")
//!     .with_category("Historical Mosques")
//!     .with_city("Cairo");
//! let profile = UserProfile::new()
//!     .with_interest("mosque")
//!     .with_home_city("cairo");
//!
//! assert_eq!(scorer.score(&place, &profile), 5);
//! ```

#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]

use wayfinder_core::{Place, Scorer, UserProfile};

mod error;
mod types;

pub use error::RelevanceError;
pub use types::{RatingBoost, RelevanceWeights, ScoreBreakdown};

/// Scorer applying interest, location, history and rating signals.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct RelevanceScorer {
    weights: RelevanceWeights,
}

impl RelevanceScorer {
    /// Construct a scorer with custom weights.
    ///
    /// # Errors
    /// Propagates [`RelevanceWeights::validate`] failures.
    pub fn new(weights: RelevanceWeights) -> Result<Self, RelevanceError> {
        Ok(Self {
            weights: weights.validate()?,
        })
    }

    /// The weights in use.
    #[must_use]
    pub const fn weights(&self) -> &RelevanceWeights {
        &self.weights
    }

    /// Evaluate every signal and report which ones fired.
    #[must_use]
    pub fn explain(&self, place: &Place, profile: &UserProfile) -> ScoreBreakdown {
        let interest_match = interest_matches(profile, &place.category);
        let location_match = location_matches(profile, &place.city);
        let visited = profile.has_visited(&place.name) || profile.has_visited(&place.id);
        let rating_bonus = self.weights.rating_boost.bonus(place.average_rating);

        let total = [
            (interest_match, self.weights.interest_match),
            (location_match, self.weights.location_match),
            (visited, self.weights.history_penalty),
        ]
        .into_iter()
        .filter_map(|(fired, points)| fired.then_some(points))
        .fold(rating_bonus, i32::saturating_add);

        log::trace!(
            "place {} scored {total} (interest={interest_match}, location={location_match}, \
             visited={visited}, rating_bonus={rating_bonus})",
            place.id
        );

        ScoreBreakdown {
            interest_match,
            location_match,
            visited,
            rating_bonus,
            total,
        }
    }
}

impl Scorer for RelevanceScorer {
    fn score(&self, place: &Place, profile: &UserProfile) -> i32 {
        self.explain(place, profile).total
    }
}

fn interest_matches(profile: &UserProfile, category: &str) -> bool {
    let haystack = category.to_lowercase();
    profile
        .interests()
        .any(|interest| haystack.contains(interest.trim().to_lowercase().as_str()))
}

fn location_matches(profile: &UserProfile, city: &str) -> bool {
    profile.home_city().is_some_and(|home| {
        city.to_lowercase()
            .contains(home.trim().to_lowercase().as_str())
    })
}

#[cfg(test)]
mod tests;
