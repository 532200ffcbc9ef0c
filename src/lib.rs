//! Facade crate for the Wayfinder recommendation engine.
//!
//! This crate re-exports the core domain types, the relevance scorer and the
//! search pipeline. The SQLite place store and JSON snapshot reader sit behind
//! feature flags.

#![forbid(unsafe_code)]

pub use wayfinder_core::{
    BudgetGate, BudgetPreference, Place, PlaceStore, PriceTier, Rating, RatingSummary, Review,
    ReviewError, ReviewStore, Reviewer, Scorer, UnknownTierPolicy, UserProfile,
};

#[cfg(feature = "serde")]
pub use wayfinder_core::{PlaceRecord, read_place_records};

#[cfg(feature = "store-sqlite")]
pub use wayfinder_core::{SqlitePlaceStore, SqlitePlaceStoreError};

pub use wayfinder_scorer::{RelevanceError, RelevanceScorer, RelevanceWeights};

pub use wayfinder_search::{
    FuzzyMatcher, NearbyPlace, Origin, Recommendation, RecommendationPipeline,
    RecommendationRequest, StructuredFilters, rank_by_distance,
};
