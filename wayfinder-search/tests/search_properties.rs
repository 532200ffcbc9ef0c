//! Property-based tests for proximity ranking and fuzzy matching.
//!
//! # Invariants tested
//!
//! - **Symmetry:** the Haversine distance from A to B equals B to A.
//! - **Identity:** the distance is zero exactly when the points coincide.
//! - **Ordering:** ranked places appear in non-decreasing distance and never
//!   include places without coordinates.
//! - **Blank query:** fuzzy search with an empty query returns every place.
//! - **Exact name:** a query equal to a place's name always matches it.

#![expect(
    clippy::float_arithmetic,
    reason = "distance properties compare floating-point results"
)]

use geo::Coord;
use proptest::prelude::*;
use wayfinder_core::Place;
use wayfinder_search::{FuzzyMatcher, Origin, haversine_km, rank_by_distance};

fn coord() -> impl Strategy<Value = Coord<f64>> {
    (-180.0_f64..=180.0_f64, -90.0_f64..=90.0_f64).prop_map(|(x, y)| Coord { x, y })
}

fn non_polar_coord() -> impl Strategy<Value = Coord<f64>> {
    (-179.9_f64..179.9_f64, -89.9_f64..89.9_f64).prop_map(|(x, y)| Coord { x, y })
}

fn place_set() -> impl Strategy<Value = Vec<Place>> {
    proptest::collection::vec(
        (
            "[A-Za-z]{1,8}( [A-Za-z]{1,8}){0,2}",
            proptest::option::of(coord()),
        ),
        0..12,
    )
    .prop_map(|rows| {
        rows.into_iter()
            .enumerate()
            .map(|(index, (name, location))| {
                let place = Place::new(format!("p{index}"), name);
                match location {
                    Some(at) => place.with_location(at),
                    None => place,
                }
            })
            .collect()
    })
}

proptest! {
    #[test]
    fn distance_is_symmetric(a in coord(), b in coord()) {
        let there = haversine_km(a, b);
        let back = haversine_km(b, a);
        prop_assert!((there - back).abs() < 1e-6);
        prop_assert!(there >= 0.0);
    }

    #[test]
    fn distance_to_self_is_zero(a in coord()) {
        prop_assert_eq!(haversine_km(a, a), 0.0);
    }

    #[test]
    fn distinct_points_are_apart(a in non_polar_coord(), b in non_polar_coord()) {
        prop_assume!((a.x - b.x).abs() > 1e-9 || (a.y - b.y).abs() > 1e-9);
        prop_assert!(haversine_km(a, b) > 0.0);
    }

    #[test]
    fn ranking_is_sorted_and_located(
        start in coord(),
        places in place_set(),
        limit in 0_usize..15,
    ) {
        let origin = Origin::new(start.x, start.y)
            .map_err(|e| TestCaseError::fail(e.to_string()))?;
        let ranked = rank_by_distance(origin, &places, Some(limit));
        let located = places.iter().filter(|p| p.location.is_some()).count();
        prop_assert_eq!(ranked.len(), located.min(limit));
        prop_assert!(ranked.iter().all(|n| n.place.location.is_some()));
        prop_assert!(ranked
            .windows(2)
            .all(|pair| matches!(pair, [a, b] if a.distance_km <= b.distance_km)));
    }

    #[test]
    fn blank_query_returns_every_place(places in place_set()) {
        let hits = FuzzyMatcher::default().search("", &places);
        let ids: Vec<_> = hits.iter().map(|h| h.place.id.clone()).collect();
        let expected: Vec<_> = places.iter().map(|p| p.id.clone()).collect();
        prop_assert_eq!(ids, expected);
    }

    #[test]
    fn exact_name_always_matches(places in place_set(), pick in any::<prop::sample::Index>()) {
        prop_assume!(!places.is_empty());
        let target = pick.get(&places);
        let hits = FuzzyMatcher::default().search(&target.name, &places);
        prop_assert!(hits.iter().any(|h| h.place.id == target.id));
    }
}
