#![expect(
    clippy::expect_used,
    reason = "tests should fail fast when setup breaks"
)]
#![expect(
    clippy::float_arithmetic,
    reason = "test converts kilometres to degrees and checks distances"
)]

//! Behavioural coverage for recommendation and proximity ranking.

use std::cell::RefCell;

use geo::Coord;
use rstest::fixture;
use rstest_bdd_macros::{given, scenario, then, when};
use wayfinder_core::test_support::MemoryStore;
use wayfinder_core::{BudgetPreference, Place, PlaceStore, UserProfile};
use wayfinder_search::{
    NearbyPlace, Origin, Recommendation, RecommendationPipeline, RecommendationRequest,
    rank_by_distance,
};

const CAIRO: Coord<f64> = Coord {
    x: 31.2357,
    y: 30.0444,
};

/// Aggregate fixtures shared across the BDD scenarios.
pub struct TestContext {
    pipeline: RecommendationPipeline,
    store: RefCell<MemoryStore>,
    profile: RefCell<Option<UserProfile>>,
    recommendations: RefCell<Vec<Recommendation>>,
    nearby: RefCell<Vec<NearbyPlace>>,
}

#[fixture]
/// Build a fresh `TestContext` for each scenario run.
pub fn context() -> TestContext {
    TestContext {
        pipeline: RecommendationPipeline::default(),
        store: RefCell::new(MemoryStore::default()),
        profile: RefCell::new(None),
        recommendations: RefCell::new(Vec::new()),
        nearby: RefCell::new(Vec::new()),
    }
}

fn north_of_cairo(km: f64) -> Coord<f64> {
    Coord {
        x: CAIRO.x,
        y: CAIRO.y + (km / wayfinder_search::EARTH_RADIUS_KM).to_degrees(),
    }
}

#[given("a mosque in Cairo and the Pyramids of Giza")]
fn mosque_and_pyramids(context: &TestContext) {
    *context.store.borrow_mut() = MemoryStore::with_places([
        Place::new("fath", "Al Fath Mosque")
            .with_category("Historical Mosques")
            .with_city("Cairo")
            .with_price("Free"),
        Place::new("giza", "Pyramids of Giza")
            .with_category("Ancient Monuments")
            .with_city("Giza")
            .with_price("540 EGP"),
    ]);
}

#[given("a budget visitor from Cairo who loves mosques and has seen the Pyramids")]
fn budget_mosque_lover(context: &TestContext) {
    *context.profile.borrow_mut() = Some(
        UserProfile::new()
            .with_interest("mosque")
            .with_visited("Pyramids of Giza")
            .with_home_city("Cairo")
            .with_budget(BudgetPreference::Budget),
    );
}

#[given("an anonymous visitor")]
fn anonymous_visitor(context: &TestContext) {
    *context.profile.borrow_mut() = None;
}

#[given("landmarks 500 km and 5 km north of central Cairo")]
fn landmarks_north_of_cairo(context: &TestContext) {
    *context.store.borrow_mut() = MemoryStore::with_places([
        Place::new("far", "Far Landmark").with_location(north_of_cairo(500.0)),
        Place::new("near", "Near Landmark").with_location(north_of_cairo(5.0)),
    ]);
}

fn snapshot(context: &TestContext) -> Vec<Place> {
    context
        .store
        .borrow()
        .load_places()
        .expect("memory store should load")
}

fn recommend(context: &TestContext, query: Option<&str>) {
    let request = RecommendationRequest {
        profile: context.profile.borrow().clone(),
        query: query.map(str::to_owned),
        ..RecommendationRequest::default()
    };
    let results = context
        .pipeline
        .recommend(&snapshot(context), &request);
    *context.recommendations.borrow_mut() = results;
}

#[when("I request recommendations")]
fn request_recommendations(context: &TestContext) {
    recommend(context, None);
}

#[when("I search for piramids")]
fn search_misspelt(context: &TestContext) {
    recommend(context, Some("piramids"));
}

#[when("I ask for the single nearest landmark to central Cairo")]
fn nearest_landmark(context: &TestContext) {
    let origin = Origin::new(CAIRO.x, CAIRO.y).expect("central Cairo is a valid origin");
    *context.nearby.borrow_mut() = rank_by_distance(origin, &snapshot(context), Some(1));
}

fn recommended_ids(context: &TestContext) -> Vec<String> {
    context
        .recommendations
        .borrow()
        .iter()
        .map(|r| r.place.id.clone())
        .collect()
}

#[then("only the mosque is recommended")]
fn only_mosque(context: &TestContext) {
    assert_eq!(recommended_ids(context), ["fath"]);
}

#[then("the mosque scores 5")]
fn mosque_scores_five(context: &TestContext) {
    let results = context.recommendations.borrow();
    let mosque = results.first().expect("a recommendation");
    assert_eq!(mosque.score, 5);
}

#[then("only the Pyramids are recommended")]
fn only_pyramids(context: &TestContext) {
    assert_eq!(recommended_ids(context), ["giza"]);
}

#[then("the landmark 5 km away is returned")]
fn near_landmark_returned(context: &TestContext) {
    let nearby = context.nearby.borrow();
    assert_eq!(nearby.len(), 1);
    let nearest = nearby.first().expect("a nearby landmark");
    assert_eq!(nearest.place.id, "near");
    assert!((nearest.distance_km - 5.0).abs() < 0.01);
}

#[scenario(path = "tests/features/recommendation.feature", index = 0)]
fn budget_mosque_lover_gets_the_mosque(context: TestContext) {
    let _ = context;
}

#[scenario(path = "tests/features/recommendation.feature", index = 1)]
fn misspelt_query_still_matches(context: TestContext) {
    let _ = context;
}

#[scenario(path = "tests/features/recommendation.feature", index = 2)]
fn nearest_landmark_comes_first(context: TestContext) {
    let _ = context;
}
