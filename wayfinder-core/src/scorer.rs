//! Score places for a visitor profile.
//!
//! The `Scorer` trait assigns a signed relevance score to a
//! [`Place`](crate::Place) given a visitor's
//! [`UserProfile`](crate::UserProfile).

use crate::{Place, UserProfile};

/// Calculate a relevance score for a place.
///
/// Higher scores indicate a better match between the place and the visitor.
/// Scores are signed: penalties (such as an already visited place) may push
/// a score below zero. Implementations must be thread-safe (`Send` + `Sync`)
/// and deterministic for identical inputs, so ranking stays reproducible.
///
/// # Examples
///
/// ```rust
/// use wayfinder_core::{Place, Scorer, UserProfile};
///
/// struct RatingOnly;
///
/// impl Scorer for RatingOnly {
///     fn score(&self, place: &Place, _profile: &UserProfile) -> i32 {
///         i32::from(place.average_rating >= 4.0)
///     }
/// }
///
/// let place = Place::new("p1", "Citadel").with_rating(4.2, 10);
/// assert_eq!(RatingOnly.score(&place, &UserProfile::new()), 1);
/// ```
pub trait Scorer: Send + Sync {
    /// Return a score for `place` according to `profile`.
    fn score(&self, place: &Place, profile: &UserProfile) -> i32;
}
