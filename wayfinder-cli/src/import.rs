//! Import command: load a legacy JSON place snapshot into SQLite.

use std::io::{BufReader, Write};

use camino::{Utf8Path, Utf8PathBuf};
use clap::Parser;
use ortho_config::{OrthoConfig, SubcmdConfigMerge};
use serde::{Deserialize, Serialize};
use wayfinder_core::{Place, SqlitePlaceStore, read_place_records};

use crate::{
    ARG_IMPORT_SOURCE, ARG_PLACES_DB, CliError, ENV_IMPORT_PLACES_DB, ENV_IMPORT_SOURCE, fs,
    require_existing, write_json,
};

/// CLI arguments for the `import` subcommand.
#[derive(Debug, Clone, Parser, Deserialize, Serialize, OrthoConfig, Default)]
#[command(
    name = "import",
    long_about = "Normalise a JSON array of place records and upsert them into \
                 the place database. Structured [lon, lat] coordinates win over \
                 legacy \"lat, lon\" text; unusable coordinates are dropped.",
    about = "Import places from a JSON snapshot"
)]
#[ortho_config(prefix = "WAYFINDER")]
pub(crate) struct ImportArgs {
    /// Path to a JSON array of place records.
    #[arg(value_name = "path")]
    #[serde(default)]
    pub(crate) source: Option<Utf8PathBuf>,
    /// Path to the SQLite place database; created when missing.
    #[arg(long = ARG_PLACES_DB, value_name = "path")]
    #[serde(default)]
    pub(crate) places_db: Option<Utf8PathBuf>,
}

impl ImportArgs {
    fn into_config(self) -> Result<ImportConfig, CliError> {
        let merged = self.load_and_merge().map_err(CliError::Configuration)?;
        ImportConfig::try_from(merged)
    }
}

/// Resolved `import` command configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct ImportConfig {
    pub(crate) source: Utf8PathBuf,
    pub(crate) places_db: Utf8PathBuf,
}

impl TryFrom<ImportArgs> for ImportConfig {
    type Error = CliError;

    fn try_from(args: ImportArgs) -> Result<Self, Self::Error> {
        let source = args.source.ok_or(CliError::MissingArgument {
            field: ARG_IMPORT_SOURCE,
            env: ENV_IMPORT_SOURCE,
        })?;
        let places_db = args.places_db.ok_or(CliError::MissingArgument {
            field: ARG_PLACES_DB,
            env: ENV_IMPORT_PLACES_DB,
        })?;
        Ok(Self { source, places_db })
    }
}

/// Summary printed after a successful import.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub(crate) struct ImportSummary {
    pub(crate) imported: usize,
    pub(crate) without_location: usize,
}

pub(crate) fn run_import(args: ImportArgs, writer: &mut dyn Write) -> Result<(), CliError> {
    let config = args.into_config()?;
    let summary = execute_import(&config)?;
    write_json(writer, &summary)
}

pub(crate) fn execute_import(config: &ImportConfig) -> Result<ImportSummary, CliError> {
    require_existing(&config.source, ARG_IMPORT_SOURCE)?;
    let places = load_places(&config.source)?;
    let without_location = places.iter().filter(|p| p.location.is_none()).count();
    let store = SqlitePlaceStore::open(config.places_db.as_std_path())?;
    let imported = store.upsert_places(&places)?;
    Ok(ImportSummary {
        imported,
        without_location,
    })
}

fn load_places(path: &Utf8Path) -> Result<Vec<Place>, CliError> {
    let file = fs::open_utf8_file(path).map_err(|source| CliError::OpenInput {
        path: path.to_path_buf(),
        source,
    })?;
    let records =
        read_place_records(BufReader::new(file)).map_err(|source| CliError::ParseInput {
            path: path.to_path_buf(),
            source,
        })?;
    Ok(records.into_iter().map(Place::from).collect())
}

#[cfg(test)]
pub(crate) fn config_from_layers_for_test(
    layers: Vec<ortho_config::MergeLayer<'static>>,
) -> Result<ImportConfig, CliError> {
    let merged = ImportArgs::merge_from_layers(layers).map_err(CliError::from)?;
    ImportConfig::try_from(merged)
}
