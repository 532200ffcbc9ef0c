//! Nearby command: list places nearest to a coordinate.

use std::io::Write;

use camino::Utf8PathBuf;
use clap::Parser;
use ortho_config::{OrthoConfig, SubcmdConfigMerge};
use serde::{Deserialize, Serialize};
use wayfinder_core::{PlaceStore, SqlitePlaceStore};
use wayfinder_search::{NearbyPlace, Origin, rank_by_distance};

use crate::{
    ARG_NEARBY_LAT, ARG_NEARBY_LON, ARG_PLACES_DB, CliError, ENV_NEARBY_LAT, ENV_NEARBY_LON,
    ENV_NEARBY_PLACES_DB, require_existing, write_json,
};

/// CLI arguments for the `nearby` subcommand.
///
/// Coordinates stay textual until validation so malformed values surface as
/// origin errors rather than generic parse failures.
#[derive(Debug, Clone, Parser, Deserialize, Serialize, OrthoConfig, Default)]
#[command(
    name = "nearby",
    about = "List places nearest to a longitude/latitude"
)]
#[ortho_config(prefix = "WAYFINDER")]
pub(crate) struct NearbyArgs {
    /// Longitude of the origin in decimal degrees.
    #[arg(long = ARG_NEARBY_LON, value_name = "degrees", allow_hyphen_values = true)]
    #[serde(default)]
    pub(crate) lon: Option<String>,
    /// Latitude of the origin in decimal degrees.
    #[arg(long = ARG_NEARBY_LAT, value_name = "degrees", allow_hyphen_values = true)]
    #[serde(default)]
    pub(crate) lat: Option<String>,
    /// Maximum number of places to list.
    #[arg(long, value_name = "count")]
    #[serde(default)]
    pub(crate) limit: Option<usize>,
    /// Path to the SQLite place database.
    #[arg(long = ARG_PLACES_DB, value_name = "path")]
    #[serde(default)]
    pub(crate) places_db: Option<Utf8PathBuf>,
}

impl NearbyArgs {
    fn into_config(self) -> Result<NearbyConfig, CliError> {
        let merged = self.load_and_merge().map_err(CliError::Configuration)?;
        NearbyConfig::try_from(merged)
    }
}

/// Resolved `nearby` command configuration.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct NearbyConfig {
    pub(crate) origin: Origin,
    pub(crate) limit: Option<usize>,
    pub(crate) places_db: Utf8PathBuf,
}

impl TryFrom<NearbyArgs> for NearbyConfig {
    type Error = CliError;

    fn try_from(args: NearbyArgs) -> Result<Self, Self::Error> {
        let lon = args.lon.ok_or(CliError::MissingArgument {
            field: ARG_NEARBY_LON,
            env: ENV_NEARBY_LON,
        })?;
        let lat = args.lat.ok_or(CliError::MissingArgument {
            field: ARG_NEARBY_LAT,
            env: ENV_NEARBY_LAT,
        })?;
        let places_db = args.places_db.ok_or(CliError::MissingArgument {
            field: ARG_PLACES_DB,
            env: ENV_NEARBY_PLACES_DB,
        })?;
        Ok(Self {
            origin: Origin::parse(&lon, &lat)?,
            limit: args.limit,
            places_db,
        })
    }
}

pub(crate) fn run_nearby(args: NearbyArgs, writer: &mut dyn Write) -> Result<(), CliError> {
    let config = args.into_config()?;
    let nearby = execute_nearby(&config)?;
    write_json(writer, &nearby)
}

pub(crate) fn execute_nearby(config: &NearbyConfig) -> Result<Vec<NearbyPlace>, CliError> {
    require_existing(&config.places_db, ARG_PLACES_DB)?;
    let store = SqlitePlaceStore::open(config.places_db.as_std_path())?;
    let places = store.load_places()?;
    Ok(rank_by_distance(config.origin, &places, config.limit))
}
