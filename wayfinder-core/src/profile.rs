//! Visitor profiles: interests, visit history, home city and budget.
//!
//! A profile is a per-request value object. It is never persisted by the core.

use std::collections::HashSet;

use crate::BudgetPreference;

/// What the engine knows about the visitor for one request.
///
/// # Examples
/// ```
/// use wayfinder_core::{BudgetPreference, UserProfile};
///
/// let profile = UserProfile::new()
///     .with_interest("mosque")
///     .with_visited("Pyramids of Giza")
///     .with_home_city("Cairo")
///     .with_budget(BudgetPreference::Budget);
///
/// assert!(profile.has_visited("Pyramids of Giza"));
/// assert_eq!(profile.home_city(), Some("Cairo"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct UserProfile {
    #[cfg_attr(feature = "serde", serde(default))]
    interests: Vec<String>,
    #[cfg_attr(feature = "serde", serde(default))]
    history: HashSet<String>,
    #[cfg_attr(feature = "serde", serde(default))]
    home_city: Option<String>,
    #[cfg_attr(feature = "serde", serde(default))]
    budget: BudgetPreference,
}

impl UserProfile {
    /// Construct an empty profile. Interest and location signals stay inert
    /// for an empty profile.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an interest token. Blank tokens are ignored.
    pub fn with_interest(mut self, interest: impl Into<String>) -> Self {
        let token = interest.into();
        if !token.trim().is_empty() {
            self.interests.push(token);
        }
        self
    }

    /// Record a previously visited place name or id.
    pub fn with_visited(mut self, place: impl Into<String>) -> Self {
        self.history.insert(place.into());
        self
    }

    /// Set the visitor's home city.
    pub fn with_home_city(mut self, city: impl Into<String>) -> Self {
        self.home_city = Some(city.into());
        self
    }

    /// Set the visitor's budget ceiling.
    pub const fn with_budget(mut self, budget: BudgetPreference) -> Self {
        self.budget = budget;
        self
    }

    /// Interest tokens, in insertion order, skipping blank entries.
    pub fn interests(&self) -> impl Iterator<Item = &str> {
        self.interests
            .iter()
            .map(String::as_str)
            .filter(|token| !token.trim().is_empty())
    }

    /// Report whether `name_or_id` appears in the visit history.
    pub fn has_visited(&self, name_or_id: &str) -> bool {
        self.history.contains(name_or_id)
    }

    /// Home city, when set to something non-blank.
    pub fn home_city(&self) -> Option<&str> {
        self.home_city
            .as_deref()
            .filter(|city| !city.trim().is_empty())
    }

    /// Budget ceiling; [`BudgetPreference::Any`] when unset.
    pub const fn budget(&self) -> BudgetPreference {
        self.budget
    }
}
