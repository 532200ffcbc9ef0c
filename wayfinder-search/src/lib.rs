//! Search and recommendation over Wayfinder place snapshots.
//!
//! - [`rank_by_distance`] orders places nearest-first from a validated
//!   [`Origin`] using the Haversine distance.
//! - [`FuzzyMatcher`] matches free-text queries against weighted place fields,
//!   tolerating spelling mistakes.
//! - [`CategoryAliases`] resolves category filters through a fixed synonym
//!   table.
//! - [`RecommendationPipeline`] chains matching, filtering, scoring and
//!   truncation.
//!
//! Every operation is a pure function of its inputs; callers may share one
//! pipeline across threads.
//!
//! # Examples
//!
//! ```
//! use geo::Coord;
//! use wayfinder_core::Place;
//! use wayfinder_search::{Origin, rank_by_distance};
//!
//! let places = [
//!     Place::new("aswan", "Philae Temple").with_location(Coord { x: 32.8844, y: 24.0255 }),
//!     Place::new("giza", "Pyramids of Giza").with_location(Coord { x: 31.1342, y: 29.9792 }),
//! ];
//! let origin = Origin::parse("31.2357", "30.0444").unwrap();
//! let nearest = rank_by_distance(origin, &places, Some(1));
//! assert_eq!(nearest[0].place.id, "giza");
//! ```

#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]

mod categories;
mod fuzzy;
mod pipeline;
mod proximity;

pub use categories::CategoryAliases;
pub use fuzzy::{DEFAULT_THRESHOLD, FieldWeights, FuzzyConfigError, FuzzyMatch, FuzzyMatcher};
pub use pipeline::{
    DEFAULT_RECOMMENDATION_LIMIT, Recommendation, RecommendationPipeline, RecommendationRequest,
    StructuredFilters,
};
pub use proximity::{
    Axis, DEFAULT_NEARBY_LIMIT, EARTH_RADIUS_KM, NearbyPlace, Origin, OriginError, haversine_km,
    rank_by_distance,
};
