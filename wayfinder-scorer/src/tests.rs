//! Unit coverage for relevance scoring.
#![forbid(unsafe_code)]

use rstest::{fixture, rstest};
use wayfinder_core::{Place, Scorer, UserProfile};

use crate::{RatingBoost, RelevanceError, RelevanceScorer, RelevanceWeights};

#[fixture]
fn mosque() -> Place {
    Place::new("mosque", "Al Fath Mosque")
        .with_category("Historical Mosques")
        .with_city("Cairo, Ramses Square")
        .with_price("Free")
}

#[fixture]
fn scorer() -> RelevanceScorer {
    RelevanceScorer::default()
}

#[rstest]
fn empty_profile_scores_zero_for_unrated_place(scorer: RelevanceScorer, mosque: Place) {
    assert_eq!(scorer.score(&mosque, &UserProfile::new()), 0);
}

#[rstest]
#[case("mosque")]
#[case("MOSQUE")]
#[case(" historical ")]
fn interest_matches_category_substring(
    scorer: RelevanceScorer,
    mosque: Place,
    #[case] interest: &str,
) {
    let profile = UserProfile::new().with_interest(interest);
    let breakdown = scorer.explain(&mosque, &profile);
    assert!(breakdown.interest_match);
    assert_eq!(breakdown.total, 3);
}

#[rstest]
fn interest_bonus_applies_once(scorer: RelevanceScorer, mosque: Place) {
    let profile = UserProfile::new()
        .with_interest("mosque")
        .with_interest("historical");
    assert_eq!(scorer.score(&mosque, &profile), 3);
}

#[rstest]
fn home_city_matches_city_substring(scorer: RelevanceScorer, mosque: Place) {
    let profile = UserProfile::new().with_home_city("cairo");
    assert_eq!(scorer.score(&mosque, &profile), 2);
}

#[rstest]
fn unrelated_home_city_does_not_match(scorer: RelevanceScorer, mosque: Place) {
    let profile = UserProfile::new().with_home_city("Luxor");
    assert!(!scorer.explain(&mosque, &profile).location_match);
}

#[rstest]
#[case("Al Fath Mosque")]
#[case("mosque")]
fn history_matches_name_or_id(scorer: RelevanceScorer, mosque: Place, #[case] visited: &str) {
    let profile = UserProfile::new().with_visited(visited);
    assert_eq!(scorer.score(&mosque, &profile), -5);
}

#[rstest]
fn history_requires_exact_name(scorer: RelevanceScorer, mosque: Place) {
    let profile = UserProfile::new().with_visited("al fath mosque");
    assert_eq!(scorer.score(&mosque, &profile), 0);
}

#[rstest]
#[case(5.0, 2)]
#[case(4.5, 2)]
#[case(4.4, 1)]
#[case(4.0, 1)]
#[case(3.9, 0)]
#[case(0.0, 0)]
fn rating_bonuses_are_exclusive(
    scorer: RelevanceScorer,
    mosque: Place,
    #[case] rating: f64,
    #[case] bonus: i32,
) {
    let rated = mosque.with_rating(rating, 10);
    assert_eq!(scorer.score(&rated, &UserProfile::new()), bonus);
}

#[rstest]
fn all_signals_combine(scorer: RelevanceScorer, mosque: Place) {
    let rated = mosque.with_rating(4.7, 80);
    let profile = UserProfile::new()
        .with_interest("mosque")
        .with_home_city("Cairo")
        .with_visited("Al Fath Mosque");
    let breakdown = scorer.explain(&rated, &profile);
    assert!(breakdown.interest_match && breakdown.location_match && breakdown.visited);
    assert_eq!(breakdown.rating_bonus, 2);
    assert_eq!(breakdown.total, 3 + 2 - 5 + 2);
}

#[rstest]
#[case(RelevanceWeights { interest_match: -1, ..RelevanceWeights::default() })]
#[case(RelevanceWeights { history_penalty: 5, ..RelevanceWeights::default() })]
#[case(RelevanceWeights {
    rating_boost: RatingBoost { good_threshold: 4.8, ..RatingBoost::default() },
    ..RelevanceWeights::default()
})]
#[case(RelevanceWeights {
    rating_boost: RatingBoost { high_threshold: f64::NAN, ..RatingBoost::default() },
    ..RelevanceWeights::default()
})]
fn invalid_weights_are_rejected(#[case] weights: RelevanceWeights) {
    assert_eq!(
        RelevanceScorer::new(weights),
        Err(RelevanceError::InvalidWeights)
    );
}

#[rstest]
#[expect(clippy::expect_used, reason = "custom weights are valid")]
fn custom_weights_are_applied(mosque: Place) {
    let scorer = RelevanceScorer::new(RelevanceWeights {
        interest_match: 10,
        ..RelevanceWeights::default()
    })
    .expect("valid weights");
    let profile = UserProfile::new().with_interest("mosque");
    assert_eq!(scorer.score(&mosque, &profile), 10);
}
