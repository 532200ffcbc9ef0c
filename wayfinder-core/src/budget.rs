//! Budget gate: admit or reject places by price tier.
//!
//! A visitor picks a ceiling ([`BudgetPreference`]); a place passes when its
//! derived [`PriceTier`] does not exceed that ceiling. Places whose price text
//! cannot be classified are handled by an explicit [`UnknownTierPolicy`].

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

use crate::PriceTier;

/// The most expensive tier a visitor is willing to pay for.
///
/// # Examples
/// ```
/// use wayfinder_core::BudgetPreference;
///
/// let pref: BudgetPreference = "Budget".parse().unwrap();
/// assert_eq!(pref, BudgetPreference::Budget);
/// assert_eq!(BudgetPreference::default(), BudgetPreference::Any);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "lowercase")
)]
pub enum BudgetPreference {
    /// No restriction.
    #[default]
    Any,
    /// Only free places.
    Free,
    /// Free or budget places.
    Budget,
    /// Anything up to medium.
    Medium,
    /// Anything, including unclassified prices.
    Fancy,
}

/// Error returned when a budget preference string is not recognised.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown budget preference '{0}' (expected any, free, budget, medium or fancy)")]
pub struct ParseBudgetError(pub String);

impl BudgetPreference {
    /// The tier acting as the ceiling, or `None` when unrestricted.
    pub const fn ceiling(self) -> Option<PriceTier> {
        match self {
            Self::Any => None,
            Self::Free => Some(PriceTier::Free),
            Self::Budget => Some(PriceTier::Budget),
            Self::Medium => Some(PriceTier::Medium),
            Self::Fancy => Some(PriceTier::Fancy),
        }
    }

    /// Return the preference as a lowercase `&str`.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Any => "any",
            Self::Free => "free",
            Self::Budget => "budget",
            Self::Medium => "medium",
            Self::Fancy => "fancy",
        }
    }
}

impl fmt::Display for BudgetPreference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BudgetPreference {
    type Err = ParseBudgetError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "" | "any" => Ok(Self::Any),
            "free" => Ok(Self::Free),
            "budget" => Ok(Self::Budget),
            "medium" => Ok(Self::Medium),
            "fancy" => Ok(Self::Fancy),
            _ => Err(ParseBudgetError(s.to_owned())),
        }
    }
}

/// How the gate treats places whose price could not be classified.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "lowercase")
)]
pub enum UnknownTierPolicy {
    /// Admit unclassified places under every preference.
    #[default]
    Admit,
    /// Reject unclassified places under `free`, `budget` and `medium`.
    /// `any` and `fancy` still admit them.
    Exclude,
}

/// Predicate deciding whether a place fits a visitor's budget.
///
/// # Examples
/// ```
/// use wayfinder_core::{BudgetGate, BudgetPreference};
///
/// let gate = BudgetGate::default();
/// assert!(gate.allows(Some(BudgetPreference::Budget), "Free"));
/// assert!(!gate.allows(Some(BudgetPreference::Budget), "540 EGP"));
/// assert!(gate.allows(None, "540 EGP"));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct BudgetGate {
    unknown: UnknownTierPolicy,
}

impl BudgetGate {
    /// Build a gate with an explicit unknown-tier policy.
    pub const fn new(unknown: UnknownTierPolicy) -> Self {
        Self { unknown }
    }

    /// The policy applied to unclassified prices.
    pub const fn unknown_policy(&self) -> UnknownTierPolicy {
        self.unknown
    }

    /// Classify `price_raw` and decide admission under `preference`.
    ///
    /// An absent preference behaves like [`BudgetPreference::Any`].
    pub fn allows(&self, preference: Option<BudgetPreference>, price_raw: &str) -> bool {
        self.allows_tier(preference, PriceTier::classify(price_raw))
    }

    /// Decide admission for an already classified tier.
    pub fn allows_tier(&self, preference: Option<BudgetPreference>, tier: PriceTier) -> bool {
        let Some(ceiling) = preference.and_then(BudgetPreference::ceiling) else {
            return true;
        };
        if ceiling == PriceTier::Fancy {
            return true;
        }
        match (tier.rank(), ceiling.rank()) {
            (Some(place), Some(limit)) => place <= limit,
            _ => self.unknown == UnknownTierPolicy::Admit,
        }
    }
}
