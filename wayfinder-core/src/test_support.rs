//! Test-only, in-memory store implementation used by unit and behaviour
//! tests.

use std::sync::Mutex;

use thiserror::Error;

use crate::{Place, PlaceStore, RatingSummary, Review, ReviewStore};

/// In-memory place and review store used in tests.
///
/// Both collections sit behind one mutex so review submission and the
/// aggregate update happen as a single step.
#[derive(Default, Debug)]
pub struct MemoryStore {
    state: Mutex<State>,
}

#[derive(Default, Debug)]
struct State {
    places: Vec<Place>,
    reviews: Vec<Review>,
}

/// Errors raised by [`MemoryStore`].
#[derive(Debug, Error, PartialEq, Eq)]
pub enum MemoryStoreError {
    /// A review referenced a place that is not stored.
    #[error("place {0} does not exist")]
    UnknownPlace(String),
    /// Another thread panicked while holding the lock.
    #[error("memory store lock was poisoned")]
    Poisoned,
}

impl MemoryStore {
    /// Create a store from a collection of places.
    pub fn with_places<I>(places: I) -> Self
    where
        I: IntoIterator<Item = Place>,
    {
        Self {
            state: Mutex::new(State {
                places: places.into_iter().collect(),
                reviews: Vec::new(),
            }),
        }
    }
}

impl PlaceStore for MemoryStore {
    type Error = MemoryStoreError;

    fn load_places(&self) -> Result<Vec<Place>, Self::Error> {
        let state = self.state.lock().map_err(|_| MemoryStoreError::Poisoned)?;
        Ok(state.places.clone())
    }
}

impl ReviewStore for MemoryStore {
    type Error = MemoryStoreError;

    fn reviews_for(&self, place_id: &str) -> Result<Vec<Review>, Self::Error> {
        let state = self.state.lock().map_err(|_| MemoryStoreError::Poisoned)?;
        Ok(state
            .reviews
            .iter()
            .filter(|review| review.place_id == place_id)
            .cloned()
            .collect())
    }

    fn submit_review(&self, review: Review) -> Result<RatingSummary, Self::Error> {
        let mut state = self.state.lock().map_err(|_| MemoryStoreError::Poisoned)?;
        let State { places, reviews } = &mut *state;
        let place = places
            .iter_mut()
            .find(|place| place.id == review.place_id)
            .ok_or_else(|| MemoryStoreError::UnknownPlace(review.place_id.clone()))?;
        reviews.push(review);
        let summary = RatingSummary::from_ratings(
            reviews
                .iter()
                .filter(|r| r.place_id == place.id)
                .map(|r| r.rating),
        );
        place.average_rating = summary.average_rating;
        place.ratings_count = summary.ratings_count;
        Ok(summary)
    }
}
