//! Command-line interface for the Wayfinder recommendation engine.
//!
//! Every subcommand works against a SQLite place database. Options layer
//! from command-line flags, `WAYFINDER_CMDS_<SUBCOMMAND>_<FIELD>` environment
//! variables and configuration files via `ortho_config`.
#![forbid(unsafe_code)]

use std::io::{BufReader, Write};

use camino::Utf8Path;
use clap::{Parser, Subcommand};
use serde::Serialize;
use serde::de::DeserializeOwned;

mod error;
mod fs;
mod import;
mod nearby;
mod recommend;
mod review;

pub use error::CliError;

use import::ImportArgs;
use nearby::NearbyArgs;
use recommend::RecommendArgs;
use review::ReviewArgs;

const ARG_PLACES_DB: &str = "places-db";
const ARG_IMPORT_SOURCE: &str = "source";
const ARG_RECOMMEND_REQUEST: &str = "request";
const ARG_NEARBY_LON: &str = "lon";
const ARG_NEARBY_LAT: &str = "lat";
const ARG_REVIEW_PLACE_ID: &str = "place-id";
const ARG_REVIEW_RATING: &str = "rating";
const ARG_REVIEW_USER_ID: &str = "user-id";
const ARG_REVIEW_USERNAME: &str = "username";

const ENV_IMPORT_SOURCE: &str = "WAYFINDER_CMDS_IMPORT_SOURCE";
const ENV_IMPORT_PLACES_DB: &str = "WAYFINDER_CMDS_IMPORT_PLACES_DB";
const ENV_RECOMMEND_PLACES_DB: &str = "WAYFINDER_CMDS_RECOMMEND_PLACES_DB";
const ENV_NEARBY_PLACES_DB: &str = "WAYFINDER_CMDS_NEARBY_PLACES_DB";
const ENV_NEARBY_LON: &str = "WAYFINDER_CMDS_NEARBY_LON";
const ENV_NEARBY_LAT: &str = "WAYFINDER_CMDS_NEARBY_LAT";
const ENV_REVIEW_PLACES_DB: &str = "WAYFINDER_CMDS_REVIEW_PLACES_DB";
const ENV_REVIEW_PLACE_ID: &str = "WAYFINDER_CMDS_REVIEW_PLACE_ID";
const ENV_REVIEW_RATING: &str = "WAYFINDER_CMDS_REVIEW_RATING";
const ENV_REVIEW_USER_ID: &str = "WAYFINDER_CMDS_REVIEW_USER_ID";

/// Run the Wayfinder CLI with the current process arguments and environment.
///
/// Command output is written to standard output as JSON.
pub fn run() -> Result<(), CliError> {
    let cli = Cli::try_parse().map_err(CliError::ArgumentParsing)?;
    let mut stdout = std::io::stdout().lock();
    run_command(cli.command, &mut stdout)
}

fn run_command(command: Command, writer: &mut dyn Write) -> Result<(), CliError> {
    match command {
        Command::Import(args) => import::run_import(args, writer),
        Command::Recommend(args) => recommend::run_recommend(args, writer),
        Command::Nearby(args) => nearby::run_nearby(args, writer),
        Command::Review(args) => review::run_review(args, writer),
    }
}

#[derive(Debug, Parser)]
#[command(
    name = "wayfinder",
    about = "Recommend, search and review landmarks from a Wayfinder place database",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Load a JSON place snapshot into the place database.
    Import(ImportArgs),
    /// Recommend places for a visitor profile and optional query.
    Recommend(RecommendArgs),
    /// List the places nearest to a coordinate.
    Nearby(NearbyArgs),
    /// Submit a review and print the place's new rating aggregate.
    Review(ReviewArgs),
}

fn require_existing(path: &Utf8Path, field: &'static str) -> Result<(), CliError> {
    match fs::file_is_file(path) {
        Ok(true) => Ok(()),
        Ok(false) => Err(CliError::SourcePathNotFile {
            field,
            path: path.to_path_buf(),
        }),
        Err(source) if source.kind() == std::io::ErrorKind::NotFound => {
            Err(CliError::MissingSourceFile {
                field,
                path: path.to_path_buf(),
            })
        }
        Err(source) => Err(CliError::InspectSourcePath {
            field,
            path: path.to_path_buf(),
            source,
        }),
    }
}

fn load_json<T: DeserializeOwned>(path: &Utf8Path) -> Result<T, CliError> {
    let file = fs::open_utf8_file(path).map_err(|source| CliError::OpenInput {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_reader(BufReader::new(file)).map_err(|source| CliError::ParseInput {
        path: path.to_path_buf(),
        source,
    })
}

fn write_json<T: Serialize + ?Sized>(writer: &mut dyn Write, value: &T) -> Result<(), CliError> {
    let payload = serde_json::to_string_pretty(value).map_err(CliError::SerialiseOutput)?;
    writer
        .write_all(payload.as_bytes())
        .map_err(CliError::WriteOutput)?;
    writer.write_all(b"\n").map_err(CliError::WriteOutput)?;
    Ok(())
}

#[cfg(test)]
mod tests;
