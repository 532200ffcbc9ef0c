//! Storage seams for places and reviews.
//!
//! The recommendation core never touches persistence directly. Callers hand it
//! a snapshot obtained from a [`PlaceStore`], and review submission goes
//! through a [`ReviewStore`] that owns the aggregate update.

use crate::{Place, RatingSummary, Review};

#[cfg(feature = "store-sqlite")]
mod sqlite;

#[cfg(feature = "store-sqlite")]
pub use sqlite::{SqlitePlaceStore, SqlitePlaceStoreError};

/// Read-only access to the place catalogue.
///
/// # Examples
///
/// ```rust
/// use std::convert::Infallible;
/// use wayfinder_core::{Place, PlaceStore};
///
/// struct FixedStore(Vec<Place>);
///
/// impl PlaceStore for FixedStore {
///     type Error = Infallible;
///
///     fn load_places(&self) -> Result<Vec<Place>, Self::Error> {
///         Ok(self.0.clone())
///     }
/// }
///
/// let store = FixedStore(vec![Place::new("p1", "Citadel")]);
/// assert_eq!(store.load_places().map(|p| p.len()), Ok(1));
/// ```
pub trait PlaceStore {
    /// Error raised when the snapshot cannot be read.
    type Error: std::error::Error + Send + Sync + 'static;

    /// Return every stored place in a stable order.
    fn load_places(&self) -> Result<Vec<Place>, Self::Error>;
}

/// Review persistence with atomic aggregate maintenance.
pub trait ReviewStore {
    /// Error raised by the backing store.
    type Error: std::error::Error + Send + Sync + 'static;

    /// Return every review referencing `place_id`, oldest first.
    fn reviews_for(&self, place_id: &str) -> Result<Vec<Review>, Self::Error>;

    /// Store `review` and recompute its place's aggregate.
    ///
    /// Insertion and recomputation form one atomic unit per place, so
    /// concurrent submissions never lose an update. Reviews referencing an
    /// unknown place are rejected without side effects.
    fn submit_review(&self, review: Review) -> Result<RatingSummary, Self::Error>;
}
