//! Visitor reviews and the rating aggregation formula.
//!
//! Reviews are immutable once written. Whenever one is stored, the owning
//! place's aggregate is recomputed from every review referencing it using
//! [`RatingSummary::from_ratings`]. The storage collaborator owns the
//! read-modify-write cycle; this module only supplies the formula.

use thiserror::Error;

/// A star rating in `1..=5`.
///
/// # Examples
/// ```
/// use wayfinder_core::Rating;
///
/// assert_eq!(Rating::new(4).map(Rating::get), Ok(4));
/// assert!(Rating::new(0).is_err());
/// assert!(Rating::new(6).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(try_from = "u8", into = "u8")
)]
pub struct Rating(u8);

impl Rating {
    /// Lowest accepted rating.
    pub const MIN: u8 = 1;
    /// Highest accepted rating.
    pub const MAX: u8 = 5;

    /// Validate and wrap a raw star count.
    pub const fn new(stars: u8) -> Result<Self, ReviewError> {
        if stars < Self::MIN || stars > Self::MAX {
            return Err(ReviewError::RatingOutOfRange { stars });
        }
        Ok(Self(stars))
    }

    /// The star count.
    pub const fn get(self) -> u8 {
        self.0
    }
}

impl TryFrom<u8> for Rating {
    type Error = ReviewError;

    fn try_from(stars: u8) -> Result<Self, Self::Error> {
        Self::new(stars)
    }
}

impl From<Rating> for u8 {
    fn from(rating: Rating) -> Self {
        rating.0
    }
}

/// Who wrote a review.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "snake_case")
)]
pub enum Reviewer {
    /// A registered user, by identifier.
    User(String),
    /// An anonymous visitor, by the name they typed.
    Anonymous(String),
}

/// A rating and comment for one place.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Review {
    /// Identifier of the reviewed place.
    pub place_id: String,
    /// Author of the review.
    pub reviewer: Reviewer,
    /// Star rating.
    pub rating: Rating,
    /// Free-text comment; may be empty.
    pub comment: String,
    /// Creation time as seconds since the Unix epoch.
    pub created_at: i64,
}

/// Errors raised while validating a review.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ReviewError {
    /// The star count was outside `1..=5`.
    #[error("rating must be between 1 and 5, got {stars}")]
    RatingOutOfRange {
        /// Rejected star count.
        stars: u8,
    },
    /// The review did not reference a place.
    #[error("review must reference a place")]
    MissingPlace,
}

impl Review {
    /// Validate and construct a review.
    ///
    /// # Examples
    /// ```
    /// use wayfinder_core::{Rating, Review, Reviewer};
    ///
    /// # fn main() -> Result<(), wayfinder_core::ReviewError> {
    /// let review = Review::new(
    ///     "p1",
    ///     Reviewer::Anonymous("Mona".into()),
    ///     Rating::new(5)?,
    ///     "Stunning at sunset",
    ///     1_700_000_000,
    /// )?;
    /// assert_eq!(review.rating.get(), 5);
    /// # Ok(())
    /// # }
    /// ```
    pub fn new(
        place_id: impl Into<String>,
        reviewer: Reviewer,
        rating: Rating,
        comment: impl Into<String>,
        created_at: i64,
    ) -> Result<Self, ReviewError> {
        let place = place_id.into();
        if place.trim().is_empty() {
            return Err(ReviewError::MissingPlace);
        }
        Ok(Self {
            place_id: place,
            reviewer,
            rating,
            comment: comment.into(),
            created_at,
        })
    }
}

/// Aggregate rating of a place: rounded mean and review count.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RatingSummary {
    /// Mean rating rounded to one decimal, `0.0` when there are no reviews.
    pub average_rating: f64,
    /// Number of reviews.
    pub ratings_count: u32,
}

impl RatingSummary {
    /// Compute the aggregate over every rating of one place.
    ///
    /// # Examples
    /// ```
    /// use wayfinder_core::{Rating, RatingSummary};
    ///
    /// # fn main() -> Result<(), wayfinder_core::ReviewError> {
    /// let ratings = [Rating::new(5)?, Rating::new(4)?, Rating::new(4)?];
    /// let summary = RatingSummary::from_ratings(ratings);
    /// assert_eq!(summary.average_rating, 4.3);
    /// assert_eq!(summary.ratings_count, 3);
    /// # Ok(())
    /// # }
    /// ```
    pub fn from_ratings<I>(ratings: I) -> Self
    where
        I: IntoIterator<Item = Rating>,
    {
        let (total, count) = ratings
            .into_iter()
            .fold((0_u64, 0_u32), |(total, count), rating| {
                (
                    total.saturating_add(u64::from(rating.get())),
                    count.saturating_add(1),
                )
            });
        if count == 0 {
            return Self::default();
        }
        let mean = total as f64 / f64::from(count);
        let average_rating = (mean * 10.0).round() / 10.0;
        Self {
            average_rating,
            ratings_count: count,
        }
    }

    /// Aggregate the ratings of a slice of reviews.
    pub fn from_reviews(reviews: &[Review]) -> Self {
        Self::from_ratings(reviews.iter().map(|review| review.rating))
    }
}
