//! Core domain types for the Wayfinder recommendation engine.
//!
//! The crate models landmarks ([`Place`]), visitor reviews ([`Review`]) and
//! per-request visitor preferences ([`UserProfile`]). It also hosts the leaf
//! rules every other crate builds on: the price tier classifier, the budget
//! gate, rating aggregation, and the storage seams used to load snapshots.
//!
//! Everything here is pure and synchronous. Storage implementations live
//! behind the [`PlaceStore`] and [`ReviewStore`] traits so callers can swap an
//! in-memory fixture for the SQLite-backed store.

#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]

pub mod budget;
pub mod location;
pub mod place;
pub mod price;
pub mod profile;
#[cfg(feature = "serde")]
pub mod record;
pub mod review;
pub mod scorer;
pub mod store;
#[cfg(any(test, feature = "test-support"))]
#[cfg_attr(docsrs, doc(cfg(feature = "test-support")))]
pub mod test_support;

pub use budget::{BudgetGate, BudgetPreference, ParseBudgetError, UnknownTierPolicy};
pub use location::{coord_from_lon_lat, parse_lat_lon_text};
pub use place::Place;
pub use price::{BUDGET_CEILING, MEDIUM_CEILING, ParseTierError, PriceTier};
pub use profile::UserProfile;
#[cfg(feature = "serde")]
pub use record::{PlaceRecord, read_place_records};
pub use review::{Rating, RatingSummary, Review, ReviewError, Reviewer};
pub use scorer::Scorer;
pub use store::{PlaceStore, ReviewStore};
#[cfg(feature = "store-sqlite")]
pub use store::{SqlitePlaceStore, SqlitePlaceStoreError};
