//! Review command: submit a review and report the new rating aggregate.

use std::io::Write;
use std::time::{SystemTime, UNIX_EPOCH};

use camino::Utf8PathBuf;
use clap::Parser;
use ortho_config::{OrthoConfig, SubcmdConfigMerge};
use serde::{Deserialize, Serialize};
use wayfinder_core::{Rating, RatingSummary, Review, ReviewStore, Reviewer, SqlitePlaceStore};

use crate::{
    ARG_PLACES_DB, ARG_REVIEW_PLACE_ID, ARG_REVIEW_RATING, ARG_REVIEW_USER_ID,
    ARG_REVIEW_USERNAME, CliError, ENV_REVIEW_PLACE_ID, ENV_REVIEW_PLACES_DB, ENV_REVIEW_RATING,
    ENV_REVIEW_USER_ID, require_existing, write_json,
};

/// CLI arguments for the `review` subcommand.
#[derive(Debug, Clone, Parser, Deserialize, Serialize, OrthoConfig, Default)]
#[command(
    name = "review",
    long_about = "Record a 1-5 star review for a stored place and print the \
                 place's recomputed average rating and review count. Reviews \
                 come from a registered user id or an anonymous username.",
    about = "Review a place"
)]
#[ortho_config(prefix = "WAYFINDER")]
pub(crate) struct ReviewArgs {
    /// Identifier of the reviewed place.
    #[arg(long = ARG_REVIEW_PLACE_ID, value_name = "id")]
    #[serde(default)]
    pub(crate) place_id: Option<String>,
    /// Star rating from 1 to 5.
    #[arg(long = ARG_REVIEW_RATING, value_name = "stars")]
    #[serde(default)]
    pub(crate) rating: Option<u8>,
    /// Registered user identifier.
    #[arg(long = ARG_REVIEW_USER_ID, value_name = "id", conflicts_with = "username")]
    #[serde(default)]
    pub(crate) user_id: Option<String>,
    /// Display name for an anonymous review.
    #[arg(long = ARG_REVIEW_USERNAME, value_name = "name")]
    #[serde(default)]
    pub(crate) username: Option<String>,
    /// Free-text comment.
    #[arg(long, value_name = "text")]
    #[serde(default)]
    pub(crate) comment: Option<String>,
    /// Path to the SQLite place database.
    #[arg(long = ARG_PLACES_DB, value_name = "path")]
    #[serde(default)]
    pub(crate) places_db: Option<Utf8PathBuf>,
}

impl ReviewArgs {
    fn into_config(self) -> Result<ReviewConfig, CliError> {
        let merged = self.load_and_merge().map_err(CliError::Configuration)?;
        ReviewConfig::try_from(merged)
    }
}

/// Resolved `review` command configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct ReviewConfig {
    pub(crate) place_id: String,
    pub(crate) rating: Rating,
    pub(crate) reviewer: Reviewer,
    pub(crate) comment: String,
    pub(crate) places_db: Utf8PathBuf,
}

impl TryFrom<ReviewArgs> for ReviewConfig {
    type Error = CliError;

    fn try_from(args: ReviewArgs) -> Result<Self, Self::Error> {
        let place_id = args.place_id.ok_or(CliError::MissingArgument {
            field: ARG_REVIEW_PLACE_ID,
            env: ENV_REVIEW_PLACE_ID,
        })?;
        let stars = args.rating.ok_or(CliError::MissingArgument {
            field: ARG_REVIEW_RATING,
            env: ENV_REVIEW_RATING,
        })?;
        let reviewer = match (args.user_id, args.username) {
            (Some(id), _) => Reviewer::User(id),
            (None, Some(name)) => Reviewer::Anonymous(name),
            (None, None) => {
                return Err(CliError::MissingArgument {
                    field: ARG_REVIEW_USER_ID,
                    env: ENV_REVIEW_USER_ID,
                });
            }
        };
        let places_db = args.places_db.ok_or(CliError::MissingArgument {
            field: ARG_PLACES_DB,
            env: ENV_REVIEW_PLACES_DB,
        })?;
        Ok(Self {
            place_id,
            rating: Rating::new(stars)?,
            reviewer,
            comment: args.comment.unwrap_or_default(),
            places_db,
        })
    }
}

pub(crate) fn run_review(args: ReviewArgs, writer: &mut dyn Write) -> Result<(), CliError> {
    let config = args.into_config()?;
    let summary = execute_review(&config, unix_now())?;
    write_json(writer, &summary)
}

pub(crate) fn execute_review(
    config: &ReviewConfig,
    created_at: i64,
) -> Result<RatingSummary, CliError> {
    let review = Review::new(
        config.place_id.clone(),
        config.reviewer.clone(),
        config.rating,
        config.comment.clone(),
        created_at,
    )?;
    require_existing(&config.places_db, ARG_PLACES_DB)?;
    let store = SqlitePlaceStore::open(config.places_db.as_std_path())?;
    Ok(store.submit_review(review)?)
}

fn unix_now() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_or(0, |elapsed| i64::try_from(elapsed.as_secs()).unwrap_or(i64::MAX))
}
