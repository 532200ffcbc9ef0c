//! Error types raised while configuring relevance scoring.
#![forbid(unsafe_code)]

use thiserror::Error;

/// Errors raised when configuring the relevance scorer.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RelevanceError {
    /// Provided weights would let a signal move the score the wrong way.
    #[error(
        "bonuses must be non-negative, the history penalty non-positive, and rating thresholds finite and ordered"
    )]
    InvalidWeights,
}
