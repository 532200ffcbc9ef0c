//! Test helpers for building temporary place databases and input files.

use camino::{Utf8Path, Utf8PathBuf};
use geo::Coord;
use tempfile::TempDir;
use wayfinder_core::{Place, SqlitePlaceStore};

/// Central Cairo as `(longitude, latitude)` text.
pub(super) const CAIRO: (&str, &str) = ("31.2357", "30.0444");

/// Write `contents` to `path`, creating the file.
pub(super) fn write_utf8(path: &Utf8Path, contents: &[u8]) {
    std::fs::write(path.as_std_path(), contents).expect("write test file");
}

/// Create a temporary directory with a UTF-8 root path.
pub(super) fn workspace() -> (TempDir, Utf8PathBuf) {
    let tmp = TempDir::new().expect("tempdir");
    let root = Utf8PathBuf::from_path_buf(tmp.path().to_path_buf()).expect("utf-8 workspace");
    (tmp, root)
}

/// Three Cairo-area places: a fancy monument, a free mosque and an unpriced
/// museum without coordinates.
pub(super) fn cairo_places() -> Vec<Place> {
    vec![
        Place::new("giza", "Pyramids of Giza")
            .with_category("Ancient Monuments")
            .with_city("Giza")
            .with_price("540 EGP")
            .with_location(Coord {
                x: 31.1342,
                y: 29.9792,
            }),
        Place::new("fath", "Al Fath Mosque")
            .with_category("Historical Mosques")
            .with_city("Cairo")
            .with_price("Free")
            .with_location(Coord {
                x: 31.2466,
                y: 30.0626,
            }),
        Place::new("museum", "Egyptian Museum")
            .with_category("Museums")
            .with_city("Cairo, Tahrir")
            .with_price("ask at the gate"),
    ]
}

/// Create `places.db` under `root` holding [`cairo_places`].
pub(super) fn seeded_db(root: &Utf8Path) -> Utf8PathBuf {
    let path = root.join("places.db");
    let store = SqlitePlaceStore::open(path.as_std_path()).expect("open place store");
    store
        .upsert_places(&cairo_places())
        .expect("seed place store");
    path
}
