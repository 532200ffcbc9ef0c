//! Approximate keyword matching over weighted place fields.
//!
//! Each field is compared against the query with normalised Levenshtein
//! similarity: a field containing the query scores `1.0`, otherwise the best of
//! the whole field and every window of field words as long as the query. A
//! place matches when any weighted field reaches the threshold. Matches are
//! ordered by the weighted mean similarity across fields.

use serde::{Deserialize, Serialize};
use strsim::normalized_levenshtein;
use thiserror::Error;
use wayfinder_core::Place;

/// Minimum field similarity for a place to count as a match.
pub const DEFAULT_THRESHOLD: f64 = 0.6_f64;

/// Errors raised when configuring the fuzzy matcher.
#[derive(Debug, Error, PartialEq)]
pub enum FuzzyConfigError {
    /// Field weights were negative, non-finite, or all zero.
    #[error("field weights must be finite, non-negative and not all zero")]
    InvalidWeights,
    /// Threshold outside `0.0..=1.0`.
    #[error("similarity threshold {threshold} must lie within 0.0..=1.0")]
    InvalidThreshold {
        /// Rejected threshold.
        threshold: f64,
    },
}

/// Relative importance of each searchable field.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FieldWeights {
    /// Weight of [`Place::name`].
    pub name: f64,
    /// Weight of [`Place::localized_name`].
    pub localized_name: f64,
    /// Weight of [`Place::category`].
    pub category: f64,
    /// Weight of [`Place::city`].
    pub city: f64,
}

impl Default for FieldWeights {
    fn default() -> Self {
        Self {
            name: 0.6_f64,
            localized_name: 0.2_f64,
            category: 0.1_f64,
            city: 0.1_f64,
        }
    }
}

impl FieldWeights {
    /// Validate the weights and return a copy.
    ///
    /// # Errors
    /// Returns [`FuzzyConfigError::InvalidWeights`] when any weight is negative
    /// or non-finite, or when every weight is zero.
    pub fn validate(self) -> Result<Self, FuzzyConfigError> {
        let weights = self.as_array();
        let each_ok = weights.iter().all(|w| w.is_finite() && *w >= 0.0_f64);
        let any_positive = weights.iter().any(|w| *w > 0.0_f64);
        if each_ok && any_positive {
            Ok(self)
        } else {
            Err(FuzzyConfigError::InvalidWeights)
        }
    }

    const fn as_array(&self) -> [f64; 4] {
        [self.name, self.localized_name, self.category, self.city]
    }
}

/// A matched place and its weighted similarity in `0.0..=1.0`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FuzzyMatch<'a> {
    /// The matched place.
    pub place: &'a Place,
    /// Weighted mean similarity across fields.
    pub quality: f64,
}

/// Weighted, typo-tolerant matcher for free-text queries.
///
/// # Examples
/// ```
/// use wayfinder_core::Place;
/// use wayfinder_search::FuzzyMatcher;
///
/// let places = [
///     Place::new("1", "Pyramids of Giza"),
///     Place::new("2", "Egyptian Museum"),
/// ];
/// let hits = FuzzyMatcher::default().search("piramids", &places);
/// assert_eq!(hits.len(), 1);
/// assert_eq!(hits[0].place.id, "1");
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FuzzyMatcher {
    weights: FieldWeights,
    threshold: f64,
}

impl Default for FuzzyMatcher {
    fn default() -> Self {
        Self {
            weights: FieldWeights::default(),
            threshold: DEFAULT_THRESHOLD,
        }
    }
}

impl FuzzyMatcher {
    /// Construct a matcher with custom weights and threshold.
    ///
    /// Lower thresholds tolerate more spelling mistakes at the cost of
    /// precision.
    ///
    /// # Errors
    /// Returns [`FuzzyConfigError`] when the weights are invalid or the
    /// threshold is outside `0.0..=1.0`.
    pub fn new(weights: FieldWeights, threshold: f64) -> Result<Self, FuzzyConfigError> {
        if !(0.0_f64..=1.0_f64).contains(&threshold) {
            return Err(FuzzyConfigError::InvalidThreshold { threshold });
        }
        Ok(Self {
            weights: weights.validate()?,
            threshold,
        })
    }

    /// The field weights in use.
    #[must_use]
    pub const fn weights(&self) -> &FieldWeights {
        &self.weights
    }

    /// The minimum field similarity for a match.
    #[must_use]
    pub const fn threshold(&self) -> f64 {
        self.threshold
    }

    /// Match `query` against `places`, best matches first.
    ///
    /// A blank query returns every place in input order with quality `1.0`.
    /// Equal qualities keep their input order.
    #[must_use]
    pub fn search<'a>(&self, query: &str, places: &'a [Place]) -> Vec<FuzzyMatch<'a>> {
        let needle = normalise(query);
        if needle.is_empty() {
            return places
                .iter()
                .map(|place| FuzzyMatch {
                    place,
                    quality: 1.0_f64,
                })
                .collect();
        }
        let words = needle.split(' ').count();
        let mut matches: Vec<FuzzyMatch<'a>> = places
            .iter()
            .filter_map(|place| self.match_place(&needle, words, place))
            .collect();
        matches.sort_by(|left, right| right.quality.total_cmp(&left.quality));
        log::debug!(
            "fuzzy query '{needle}' matched {} of {} places",
            matches.len(),
            places.len()
        );
        matches
    }

    #[expect(
        clippy::float_arithmetic,
        reason = "weighted mean of field similarities"
    )]
    fn match_place<'a>(
        &self,
        needle: &str,
        words: usize,
        place: &'a Place,
    ) -> Option<FuzzyMatch<'a>> {
        let fields = [
            place.name.as_str(),
            place.localized_name.as_str(),
            place.category.as_str(),
            place.city.as_str(),
        ];
        let mut matched = false;
        let mut weighted = 0.0_f64;
        let mut total_weight = 0.0_f64;
        for (field, weight) in fields.into_iter().zip(self.weights.as_array()) {
            if weight <= 0.0_f64 {
                continue;
            }
            let similarity = field_similarity(needle, words, field);
            matched |= similarity >= self.threshold;
            weighted += weight * similarity;
            total_weight += weight;
        }
        (matched && total_weight > 0.0_f64).then(|| FuzzyMatch {
            place,
            quality: weighted / total_weight,
        })
    }
}

fn normalise(text: &str) -> String {
    text.split_whitespace()
        .map(str::to_lowercase)
        .collect::<Vec<_>>()
        .join(" ")
}

fn field_similarity(needle: &str, words: usize, field: &str) -> f64 {
    let haystack = normalise(field);
    if haystack.is_empty() {
        return 0.0_f64;
    }
    if haystack.contains(needle) {
        return 1.0_f64;
    }
    let tokens: Vec<&str> = haystack.split(' ').collect();
    let window = words.clamp(1, tokens.len());
    tokens
        .windows(window)
        .map(|span| normalized_levenshtein(needle, &span.join(" ")))
        .fold(normalized_levenshtein(needle, &haystack), f64::max)
}
