//! Recommend command: run the recommendation pipeline over the place database.

use std::io::Write;

use camino::Utf8PathBuf;
use clap::Parser;
use ortho_config::{OrthoConfig, SubcmdConfigMerge};
use serde::{Deserialize, Serialize};
use wayfinder_core::{BudgetGate, PlaceStore, SqlitePlaceStore, UnknownTierPolicy};
use wayfinder_search::{
    DEFAULT_THRESHOLD, FieldWeights, FuzzyMatcher, Recommendation, RecommendationPipeline,
    RecommendationRequest,
};

use crate::{
    ARG_PLACES_DB, ARG_RECOMMEND_REQUEST, CliError, ENV_RECOMMEND_PLACES_DB, load_json,
    require_existing, write_json,
};

/// CLI arguments for the `recommend` subcommand.
#[derive(Debug, Clone, Parser, Deserialize, Serialize, OrthoConfig, Default)]
#[command(
    name = "recommend",
    long_about = "Recommend places from the place database. The optional \
                 request file holds a JSON object with `profile`, `query`, \
                 `filters` and `limit`; without it every place is ranked for \
                 an anonymous visitor.",
    about = "Recommend places for a visitor"
)]
#[ortho_config(prefix = "WAYFINDER")]
pub(crate) struct RecommendArgs {
    /// Path to a JSON recommendation request.
    #[arg(value_name = "path")]
    #[serde(default)]
    pub(crate) request: Option<Utf8PathBuf>,
    /// Path to the SQLite place database.
    #[arg(long = ARG_PLACES_DB, value_name = "path")]
    #[serde(default)]
    pub(crate) places_db: Option<Utf8PathBuf>,
    /// Maximum number of recommendations; overrides the request's limit.
    #[arg(long, value_name = "count")]
    #[serde(default)]
    pub(crate) limit: Option<usize>,
    /// Minimum field similarity (0.0 to 1.0) for free-text matches.
    #[arg(long, value_name = "similarity")]
    #[serde(default)]
    pub(crate) fuzzy_threshold: Option<f64>,
    /// Drop places with unclassifiable prices under strict budgets.
    #[arg(long)]
    #[serde(default)]
    pub(crate) exclude_unpriced: bool,
}

impl RecommendArgs {
    fn into_config(self) -> Result<RecommendConfig, CliError> {
        let merged = self.load_and_merge().map_err(CliError::Configuration)?;
        RecommendConfig::try_from(merged)
    }
}

/// Resolved `recommend` command configuration.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct RecommendConfig {
    pub(crate) request: Option<Utf8PathBuf>,
    pub(crate) places_db: Utf8PathBuf,
    pub(crate) limit: Option<usize>,
    pub(crate) fuzzy_threshold: f64,
    pub(crate) unknown_tiers: UnknownTierPolicy,
}

impl TryFrom<RecommendArgs> for RecommendConfig {
    type Error = CliError;

    fn try_from(args: RecommendArgs) -> Result<Self, Self::Error> {
        let places_db = args.places_db.ok_or(CliError::MissingArgument {
            field: ARG_PLACES_DB,
            env: ENV_RECOMMEND_PLACES_DB,
        })?;
        let unknown_tiers = if args.exclude_unpriced {
            UnknownTierPolicy::Exclude
        } else {
            UnknownTierPolicy::Admit
        };
        Ok(Self {
            request: args.request,
            places_db,
            limit: args.limit,
            fuzzy_threshold: args.fuzzy_threshold.unwrap_or(DEFAULT_THRESHOLD),
            unknown_tiers,
        })
    }
}

impl RecommendConfig {
    fn pipeline(&self) -> Result<RecommendationPipeline, CliError> {
        let matcher = FuzzyMatcher::new(FieldWeights::default(), self.fuzzy_threshold)?;
        Ok(RecommendationPipeline::default()
            .with_matcher(matcher)
            .with_budget_gate(BudgetGate::new(self.unknown_tiers)))
    }

    fn request(&self) -> Result<RecommendationRequest, CliError> {
        let mut request: RecommendationRequest = match &self.request {
            Some(path) => {
                require_existing(path, ARG_RECOMMEND_REQUEST)?;
                load_json(path)?
            }
            None => RecommendationRequest::default(),
        };
        if self.limit.is_some() {
            request.limit = self.limit;
        }
        Ok(request)
    }
}

pub(crate) fn run_recommend(args: RecommendArgs, writer: &mut dyn Write) -> Result<(), CliError> {
    let config = args.into_config()?;
    let recommendations = execute_recommend(&config)?;
    write_json(writer, &recommendations)
}

pub(crate) fn execute_recommend(config: &RecommendConfig) -> Result<Vec<Recommendation>, CliError> {
    let pipeline = config.pipeline()?;
    let request = config.request()?;
    require_existing(&config.places_db, ARG_PLACES_DB)?;
    let store = SqlitePlaceStore::open(config.places_db.as_std_path())?;
    let places = store.load_places()?;
    Ok(pipeline.recommend(&places, &request))
}

#[cfg(test)]
pub(crate) fn config_from_layers_for_test(
    layers: Vec<ortho_config::MergeLayer<'static>>,
) -> Result<RecommendConfig, CliError> {
    let merged = RecommendArgs::merge_from_layers(layers).map_err(CliError::from)?;
    RecommendConfig::try_from(merged)
}
