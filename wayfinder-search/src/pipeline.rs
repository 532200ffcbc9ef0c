//! Recommendation pipeline: text match, structured filters, score, rank.
//!
//! Stages run in a fixed order over a read-only snapshot:
//! 1. narrow by free-text query with [`FuzzyMatcher`];
//! 2. apply the city, category and budget filters;
//! 3. score survivors with the configured [`Scorer`];
//! 4. sort by descending score, keeping the stage-2 order for ties;
//! 5. truncate to the requested limit.

use serde::{Deserialize, Serialize};
use wayfinder_core::{BudgetGate, BudgetPreference, Place, PriceTier, Scorer, UserProfile};
use wayfinder_scorer::RelevanceScorer;

use crate::{CategoryAliases, FuzzyMatcher};

/// Number of recommendations returned when the request sets no limit.
pub const DEFAULT_RECOMMENDATION_LIMIT: usize = 10;

/// Optional structured narrowing applied after text matching.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StructuredFilters {
    /// Case-insensitive substring of [`Place::city`].
    pub city: Option<String>,
    /// Requested category, resolved through [`CategoryAliases`].
    pub category: Option<String>,
    /// Budget ceiling; overrides the profile's preference when set.
    pub budget: Option<BudgetPreference>,
}

/// Input to [`RecommendationPipeline::recommend`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RecommendationRequest {
    /// Visitor profile; an empty profile is used when absent.
    pub profile: Option<UserProfile>,
    /// Free-text query matched against names, category and city.
    pub query: Option<String>,
    /// Structured filters.
    pub filters: StructuredFilters,
    /// Maximum number of results, [`DEFAULT_RECOMMENDATION_LIMIT`] when absent.
    pub limit: Option<usize>,
}

/// A place annotated with its derived tier and relevance score.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Recommendation {
    /// The recommended place.
    #[serde(flatten)]
    pub place: Place,
    /// Tier derived from the place's price text.
    pub price_tier: PriceTier,
    /// Relevance score for the requesting visitor.
    pub score: i32,
}

/// Stateless orchestrator combining matching, filtering and scoring.
///
/// # Examples
/// ```
/// use wayfinder_core::{BudgetPreference, Place, UserProfile};
/// use wayfinder_search::{RecommendationPipeline, RecommendationRequest};
///
/// let places = [
///     Place::new("fath", "Al Fath Mosque")
///         .with_category("Historical Mosques")
///         .with_city("Cairo")
///         .with_price("Free"),
///     Place::new("giza", "Pyramids of Giza")
///         .with_category("Ancient Monuments")
///         .with_city("Giza")
///         .with_price("540 EGP"),
/// ];
/// let request = RecommendationRequest {
///     profile: Some(
///         UserProfile::new()
///             .with_interest("mosque")
///             .with_home_city("Cairo")
///             .with_budget(BudgetPreference::Budget),
///     ),
///     ..RecommendationRequest::default()
/// };
/// let results = RecommendationPipeline::default().recommend(&places, &request);
/// assert_eq!(results.len(), 1);
/// assert_eq!(results[0].score, 5);
/// ```
#[derive(Debug, Clone)]
pub struct RecommendationPipeline<S = RelevanceScorer> {
    matcher: FuzzyMatcher,
    aliases: CategoryAliases,
    gate: BudgetGate,
    scorer: S,
}

impl Default for RecommendationPipeline<RelevanceScorer> {
    fn default() -> Self {
        Self::new(RelevanceScorer::default())
    }
}

impl<S: Scorer> RecommendationPipeline<S> {
    /// Build a pipeline around `scorer` with default matching and filtering.
    #[must_use]
    pub fn new(scorer: S) -> Self {
        Self {
            matcher: FuzzyMatcher::default(),
            aliases: CategoryAliases::default(),
            gate: BudgetGate::default(),
            scorer,
        }
    }

    /// Replace the fuzzy matcher.
    #[must_use]
    pub const fn with_matcher(mut self, matcher: FuzzyMatcher) -> Self {
        self.matcher = matcher;
        self
    }

    /// Replace the category alias table.
    #[must_use]
    pub fn with_aliases(mut self, aliases: CategoryAliases) -> Self {
        self.aliases = aliases;
        self
    }

    /// Replace the budget gate.
    #[must_use]
    pub const fn with_budget_gate(mut self, gate: BudgetGate) -> Self {
        self.gate = gate;
        self
    }

    /// The scorer in use.
    #[must_use]
    pub const fn scorer(&self) -> &S {
        &self.scorer
    }

    /// Recommend places from `places` for `request`, best first.
    ///
    /// An empty result is a valid outcome, not an error.
    #[must_use]
    pub fn recommend(
        &self,
        places: &[Place],
        request: &RecommendationRequest,
    ) -> Vec<Recommendation> {
        let anonymous = UserProfile::new();
        let profile = request.profile.as_ref().unwrap_or(&anonymous);

        let matched: Vec<&Place> = match request.query.as_deref() {
            Some(query) => self
                .matcher
                .search(query, places)
                .into_iter()
                .map(|hit| hit.place)
                .collect(),
            None => places.iter().collect(),
        };
        let text_matches = matched.len();

        let budget = request.filters.budget.unwrap_or_else(|| profile.budget());
        let mut ranked: Vec<Recommendation> = matched
            .into_iter()
            .filter(|place| self.passes_filters(place, &request.filters, budget))
            .map(|place| {
                let price_tier = place.price_tier();
                Recommendation {
                    place: place.clone(),
                    price_tier,
                    score: self.scorer.score(place, profile),
                }
            })
            .collect();
        log::debug!(
            "recommendation over {} places: {text_matches} matched text, {} passed filters",
            places.len(),
            ranked.len()
        );

        ranked.sort_by(|left, right| right.score.cmp(&left.score));
        ranked.truncate(request.limit.unwrap_or(DEFAULT_RECOMMENDATION_LIMIT));
        ranked
    }

    fn passes_filters(
        &self,
        place: &Place,
        filters: &StructuredFilters,
        budget: BudgetPreference,
    ) -> bool {
        let city_ok = filters
            .city
            .as_deref()
            .map(|city| city.trim().to_lowercase())
            .is_none_or(|city| place.city.to_lowercase().contains(city.as_str()));
        let category_ok = filters
            .category
            .as_deref()
            .is_none_or(|category| self.aliases.matches(category, &place.category));
        city_ok && category_ok && self.gate.allows_tier(Some(budget), place.price_tier())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::{fixture, rstest};
    use wayfinder_core::UnknownTierPolicy;

    #[fixture]
    fn places() -> Vec<Place> {
        vec![
            Place::new("giza", "Pyramids of Giza")
                .with_category("Ancient Monuments")
                .with_city("Giza")
                .with_price("540 EGP")
                .with_rating(4.8, 120),
            Place::new("fath", "Al Fath Mosque")
                .with_category("Historical Mosques")
                .with_city("Cairo")
                .with_price("Free"),
            Place::new("hanging", "Hanging Church")
                .with_category("Coptic Cairo")
                .with_city("Cairo, Old Cairo")
                .with_price("Free")
                .with_rating(4.1, 15),
            Place::new("museum", "Egyptian Museum")
                .with_category("Museums")
                .with_city("Cairo, Tahrir")
                .with_price("ask at the gate"),
        ]
    }

    fn ids(results: &[Recommendation]) -> Vec<&str> {
        results.iter().map(|r| r.place.id.as_str()).collect()
    }

    #[rstest]
    fn anonymous_request_ranks_by_rating_then_input_order(places: Vec<Place>) {
        let results =
            RecommendationPipeline::default().recommend(&places, &RecommendationRequest::default());
        assert_eq!(ids(&results), ["giza", "hanging", "fath", "museum"]);
        assert_eq!(results.first().map(|r| r.score), Some(2));
        assert_eq!(results.first().map(|r| r.price_tier), Some(PriceTier::Fancy));
    }

    #[rstest]
    fn query_narrows_before_scoring(places: Vec<Place>) {
        let request = RecommendationRequest {
            query: Some("hanging chruch".to_owned()),
            ..RecommendationRequest::default()
        };
        let results = RecommendationPipeline::default().recommend(&places, &request);
        assert_eq!(ids(&results), ["hanging"]);
    }

    #[rstest]
    fn category_filter_uses_aliases(places: Vec<Place>) {
        let request = RecommendationRequest {
            filters: StructuredFilters {
                category: Some("church".to_owned()),
                ..StructuredFilters::default()
            },
            ..RecommendationRequest::default()
        };
        let results = RecommendationPipeline::default().recommend(&places, &request);
        assert_eq!(ids(&results), ["hanging"]);
    }

    #[rstest]
    fn city_filter_is_case_insensitive_substring(places: Vec<Place>) {
        let request = RecommendationRequest {
            filters: StructuredFilters {
                city: Some(" CAIRO ".to_owned()),
                ..StructuredFilters::default()
            },
            ..RecommendationRequest::default()
        };
        let results = RecommendationPipeline::default().recommend(&places, &request);
        assert_eq!(ids(&results), ["hanging", "fath", "museum"]);
    }

    #[rstest]
    fn filter_budget_overrides_profile(places: Vec<Place>) {
        let request = RecommendationRequest {
            profile: Some(UserProfile::new().with_budget(BudgetPreference::Fancy)),
            filters: StructuredFilters {
                budget: Some(BudgetPreference::Free),
                ..StructuredFilters::default()
            },
            ..RecommendationRequest::default()
        };
        let results = RecommendationPipeline::default().recommend(&places, &request);
        assert!(!ids(&results).contains(&"giza"));
        assert!(ids(&results).contains(&"museum"));
    }

    #[rstest]
    fn excluding_unknown_tiers_drops_unpriced_places(places: Vec<Place>) {
        let request = RecommendationRequest {
            profile: Some(UserProfile::new().with_budget(BudgetPreference::Budget)),
            ..RecommendationRequest::default()
        };
        let pipeline = RecommendationPipeline::default()
            .with_budget_gate(BudgetGate::new(UnknownTierPolicy::Exclude));
        assert_eq!(ids(&pipeline.recommend(&places, &request)), ["hanging", "fath"]);
    }

    #[rstest]
    #[case(Some(2), 2)]
    #[case(Some(0), 0)]
    #[case(None, 4)]
    fn limit_truncates(
        places: Vec<Place>,
        #[case] limit: Option<usize>,
        #[case] expected: usize,
    ) {
        let request = RecommendationRequest {
            limit,
            ..RecommendationRequest::default()
        };
        let results = RecommendationPipeline::default().recommend(&places, &request);
        assert_eq!(results.len(), expected);
    }

    #[rstest]
    fn custom_scorer_drives_order(places: Vec<Place>) {
        struct NameLength;
        impl Scorer for NameLength {
            fn score(&self, place: &Place, _profile: &UserProfile) -> i32 {
                i32::try_from(place.name.len()).unwrap_or(i32::MAX)
            }
        }
        let pipeline = RecommendationPipeline::new(NameLength);
        let results = pipeline.recommend(&places, &RecommendationRequest::default());
        assert_eq!(ids(&results).first(), Some(&"giza"));
    }

    #[rstest]
    #[expect(clippy::expect_used, reason = "literal request is valid JSON")]
    fn request_deserialises_from_json() {
        let request: RecommendationRequest = serde_json::from_str(
            r#"{"profile":{"interests":["mosque"],"budget":"budget"},"filters":{"city":"Cairo"},"limit":3}"#,
        )
        .expect("valid request");
        assert_eq!(request.limit, Some(3));
        assert_eq!(request.filters.city.as_deref(), Some("Cairo"));
        assert_eq!(
            request.profile.map(|p| p.budget()),
            Some(BudgetPreference::Budget)
        );
    }
}
