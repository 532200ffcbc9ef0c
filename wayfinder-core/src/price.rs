//! Price tier classification.
//!
//! Landmark prices arrive as free text ("60 EGP", "Free", "Budget"). The
//! classifier folds that text onto a small ordinal scale so budget filtering
//! can compare places without caring about the original wording.
//!
//! # Examples
//! ```
//! use wayfinder_core::PriceTier;
//!
//! assert_eq!(PriceTier::classify("Free entry"), PriceTier::Free);
//! assert_eq!(PriceTier::classify("60 EGP"), PriceTier::Budget);
//! assert_eq!(PriceTier::classify("151 EGP"), PriceTier::Fancy);
//! assert_eq!(PriceTier::classify("ask at the gate"), PriceTier::Unknown);
//! ```

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

/// Highest amount still classified as [`PriceTier::Budget`].
pub const BUDGET_CEILING: u64 = 60;

/// Highest amount still classified as [`PriceTier::Medium`].
pub const MEDIUM_CEILING: u64 = 150;

/// Ordinal price classification derived from a place's price text.
///
/// Known tiers are totally ordered `Free < Budget < Medium < Fancy`.
/// [`PriceTier::Unknown`] sits outside that order; see [`PriceTier::rank`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "lowercase")
)]
pub enum PriceTier {
    /// No admission charge.
    Free,
    /// Cheap entry, up to [`BUDGET_CEILING`].
    Budget,
    /// Mid-range entry, up to [`MEDIUM_CEILING`].
    Medium,
    /// Anything above [`MEDIUM_CEILING`].
    Fancy,
    /// The price text carried no usable signal.
    Unknown,
}

/// Error returned when a tier name is not recognised.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown price tier '{0}'")]
pub struct ParseTierError(pub String);

impl PriceTier {
    /// Classify free-form price text.
    ///
    /// Keywords win over numbers: text mentioning "free", "budget" or
    /// "medium" (case-insensitive, checked in that order) maps straight to the
    /// matching tier. Otherwise the first run of ASCII digits is read as an
    /// amount and bucketed with [`PriceTier::from_amount`]. Text without
    /// digits is [`PriceTier::Unknown`].
    pub fn classify(raw: &str) -> Self {
        let lowered = raw.trim().to_lowercase();
        if lowered.is_empty() {
            return Self::Unknown;
        }
        if lowered.contains("free") {
            return Self::Free;
        }
        if lowered.contains("budget") {
            return Self::Budget;
        }
        if lowered.contains("medium") {
            return Self::Medium;
        }
        match first_digit_run(&lowered) {
            // A digit-only string only fails to parse on overflow, which is
            // still an amount far above every ceiling.
            Some(digits) => digits.parse::<u64>().map_or(Self::Fancy, Self::from_amount),
            None => Self::Unknown,
        }
    }

    /// Bucket a whole-unit amount using the fixed tier ceilings.
    ///
    /// # Examples
    /// ```
    /// use wayfinder_core::PriceTier;
    ///
    /// assert_eq!(PriceTier::from_amount(0), PriceTier::Free);
    /// assert_eq!(PriceTier::from_amount(150), PriceTier::Medium);
    /// ```
    pub const fn from_amount(amount: u64) -> Self {
        if amount == 0 {
            Self::Free
        } else if amount <= BUDGET_CEILING {
            Self::Budget
        } else if amount <= MEDIUM_CEILING {
            Self::Medium
        } else {
            Self::Fancy
        }
    }

    /// Position in the total order, or `None` for [`PriceTier::Unknown`].
    pub const fn rank(self) -> Option<u8> {
        match self {
            Self::Free => Some(0),
            Self::Budget => Some(1),
            Self::Medium => Some(2),
            Self::Fancy => Some(3),
            Self::Unknown => None,
        }
    }

    /// Return the tier as a lowercase `&str`.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Free => "free",
            Self::Budget => "budget",
            Self::Medium => "medium",
            Self::Fancy => "fancy",
            Self::Unknown => "unknown",
        }
    }
}

fn first_digit_run(text: &str) -> Option<&str> {
    let start = text.find(|c: char| c.is_ascii_digit())?;
    let tail = text.get(start..)?;
    let len = tail
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(tail.len());
    tail.get(..len)
}

impl fmt::Display for PriceTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PriceTier {
    type Err = ParseTierError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "free" => Ok(Self::Free),
            "budget" => Ok(Self::Budget),
            "medium" => Ok(Self::Medium),
            "fancy" => Ok(Self::Fancy),
            "unknown" => Ok(Self::Unknown),
            _ => Err(ParseTierError(s.to_owned())),
        }
    }
}
