//! Property-based tests for relevance scoring.
//!
//! # Invariants tested
//!
//! - **Interest monotonicity:** adding a matching interest never lowers a score.
//! - **History penalty:** visiting a place lowers its score by exactly five.
//! - **Determinism:** scoring the same inputs twice yields the same value.

use proptest::prelude::*;
use wayfinder_core::{Place, Scorer, UserProfile};
use wayfinder_scorer::RelevanceScorer;

fn place_strategy() -> impl Strategy<Value = Place> {
    (
        "[A-Za-z ]{1,16}",
        "[A-Za-z ]{0,16}",
        "[A-Za-z ]{0,12}",
        0.0_f64..=5.0_f64,
    )
        .prop_map(|(name, category, city, rating)| {
            Place::new("id", name)
                .with_category(category)
                .with_city(city)
                .with_rating(rating, 1)
        })
}

fn profile_strategy() -> impl Strategy<Value = UserProfile> {
    (
        proptest::collection::vec("[a-z]{1,8}", 0..3),
        proptest::option::of("[a-z]{1,8}"),
    )
        .prop_map(|(interests, home)| {
            let profile = interests
                .into_iter()
                .fold(UserProfile::new(), UserProfile::with_interest);
            match home {
                Some(city) => profile.with_home_city(city),
                None => profile,
            }
        })
}

proptest! {
    #[test]
    fn matching_interest_never_lowers_score(
        place in place_strategy(),
        profile in profile_strategy(),
    ) {
        let scorer = RelevanceScorer::default();
        let before = scorer.score(&place, &profile);
        let token = place.category.clone();
        prop_assume!(!token.trim().is_empty());
        let after = scorer.score(&place, &profile.with_interest(token));
        prop_assert!(after >= before);
    }

    #[test]
    fn visiting_costs_exactly_five(place in place_strategy(), profile in profile_strategy()) {
        let scorer = RelevanceScorer::default();
        prop_assume!(!profile.has_visited(&place.name) && !profile.has_visited(&place.id));
        let fresh = scorer.score(&place, &profile);
        let seen = scorer.score(&place, &profile.clone().with_visited(place.name.clone()));
        prop_assert_eq!(fresh - seen, 5);
    }

    #[test]
    fn scoring_is_deterministic(place in place_strategy(), profile in profile_strategy()) {
        let scorer = RelevanceScorer::default();
        prop_assert_eq!(scorer.score(&place, &profile), scorer.score(&place, &profile));
    }
}
