//! Focused unit tests covering the import command.

use super::helpers::{workspace, write_utf8};
use super::*;
use crate::import::{
    ImportArgs, ImportConfig, ImportSummary, config_from_layers_for_test, execute_import,
};
use rstest::rstest;
use wayfinder_core::{PlaceStore, SqlitePlaceStore};

const SNAPSHOT: &str = r#"[
  {"_id": "fath", "name": "Al Fath Mosque", "nameAr": "مسجد الفتح",
   "category": "Historical Mosques", "cityText": "Cairo",
   "coordinates": [31.2466, 30.0626], "priceRaw": "Free"},
  {"_id": "citadel", "name": "Saladin Citadel", "category": "Castles",
   "city": "Cairo", "location": "30.0299, 31.2611", "price": "450 EGP",
   "averageRating": 4.6, "ratingsCount": 12},
  {"_id": "museum", "name": "Egyptian Museum", "category": "Museums",
   "city": "Cairo, Tahrir", "location": "somewhere downtown"}
]"#;

#[rstest]
#[case(None, Some("places.db"), ARG_IMPORT_SOURCE, ENV_IMPORT_SOURCE)]
#[case(Some("places.json"), None, ARG_PLACES_DB, ENV_IMPORT_PLACES_DB)]
fn converting_without_required_fields_errors(
    #[case] source: Option<&str>,
    #[case] places_db: Option<&str>,
    #[case] field: &'static str,
    #[case] env_var: &'static str,
) {
    let args = ImportArgs {
        source: source.map(Into::into),
        places_db: places_db.map(Into::into),
    };
    let err = ImportConfig::try_from(args).expect_err("missing field should error");
    match err {
        CliError::MissingArgument {
            field: missing,
            env,
        } => {
            assert_eq!(missing, field);
            assert_eq!(env, env_var);
        }
        other => panic!("expected MissingArgument, found {other:?}"),
    }
}

#[rstest]
fn import_normalises_both_coordinate_layouts() {
    let (_tmp, root) = workspace();
    let source = root.join("places.json");
    write_utf8(&source, SNAPSHOT.as_bytes());
    let config = ImportConfig {
        source,
        places_db: root.join("places.db"),
    };

    let summary = execute_import(&config).expect("import should succeed");
    assert_eq!(
        summary,
        ImportSummary {
            imported: 3,
            without_location: 1,
        }
    );

    let store = SqlitePlaceStore::open(config.places_db.as_std_path()).expect("open store");
    let places = store.load_places().expect("load places");
    let citadel = places
        .iter()
        .find(|p| p.id == "citadel")
        .expect("citadel imported");
    let location = citadel.location.expect("legacy text parsed");
    assert_eq!((location.x, location.y), (31.2611, 30.0299));
    assert_eq!(citadel.ratings_count, 12);
    let fath = places.iter().find(|p| p.id == "fath").expect("fath imported");
    assert_eq!(fath.localized_name, "مسجد الفتح");
}

#[rstest]
fn reimport_updates_in_place() {
    let (_tmp, root) = workspace();
    let source = root.join("places.json");
    write_utf8(&source, SNAPSHOT.as_bytes());
    let config = ImportConfig {
        source,
        places_db: root.join("places.db"),
    };
    execute_import(&config).expect("first import");
    execute_import(&config).expect("second import");

    let store = SqlitePlaceStore::open(config.places_db.as_std_path()).expect("open store");
    assert_eq!(store.load_places().expect("load places").len(), 3);
}

#[rstest]
fn import_rejects_invalid_json() {
    let (_tmp, root) = workspace();
    let source = root.join("places.json");
    write_utf8(&source, b"{ not a list");
    let config = ImportConfig {
        source: source.clone(),
        places_db: root.join("places.db"),
    };
    match execute_import(&config).expect_err("invalid json should error") {
        CliError::ParseInput { path, .. } => assert_eq!(path, source),
        other => panic!("expected ParseInput, found {other:?}"),
    }
}

#[rstest]
fn import_reports_missing_source() {
    let (_tmp, root) = workspace();
    let config = ImportConfig {
        source: root.join("absent.json"),
        places_db: root.join("places.db"),
    };
    match execute_import(&config).expect_err("missing source should error") {
        CliError::MissingSourceFile { field, .. } => assert_eq!(field, ARG_IMPORT_SOURCE),
        other => panic!("expected MissingSourceFile, found {other:?}"),
    }
}

#[rstest]
fn import_rejects_directory_source() {
    let (_tmp, root) = workspace();
    let config = ImportConfig {
        source: root.clone(),
        places_db: root.join("places.db"),
    };
    match execute_import(&config).expect_err("directory source should error") {
        CliError::SourcePathNotFile { field, path } => {
            assert_eq!(field, ARG_IMPORT_SOURCE);
            assert_eq!(path, root);
        }
        other => panic!("expected SourcePathNotFile, found {other:?}"),
    }
}

#[rstest]
fn merge_layers_honours_precedence() {
    use ortho_config::MergeComposer;
    use serde_json::json;

    let mut composer = MergeComposer::new();
    composer.push_file(
        json!({ "source": "from-file.json", "places_db": "from-file.db" }),
        None,
    );
    composer.push_environment(json!({ "places_db": "from-env.db" }));
    composer.push_cli(json!({ "source": "from-cli.json" }));

    let config = config_from_layers_for_test(composer.layers()).expect("merged config");
    assert_eq!(config.source, "from-cli.json");
    assert_eq!(config.places_db, "from-env.db");
}
