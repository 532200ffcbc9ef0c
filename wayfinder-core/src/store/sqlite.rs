//! SQLite-backed store for places and reviews.

use std::{
    fmt,
    path::{Path, PathBuf},
    sync::{Mutex, MutexGuard},
};

use geo::Coord;
use rusqlite::{Connection, OptionalExtension, Row, Transaction, TransactionBehavior, params};
use thiserror::Error;

use crate::{Place, Rating, RatingSummary, Review, Reviewer, coord_from_lon_lat};

use super::{PlaceStore, ReviewStore};

const SCHEMA: &str = "
CREATE TABLE IF NOT EXISTS places (
    id TEXT PRIMARY KEY,
    name TEXT NOT NULL,
    localized_name TEXT NOT NULL DEFAULT '',
    category TEXT NOT NULL DEFAULT '',
    city TEXT NOT NULL DEFAULT '',
    lon REAL,
    lat REAL,
    price TEXT NOT NULL DEFAULT '',
    average_rating REAL NOT NULL DEFAULT 0,
    ratings_count INTEGER NOT NULL DEFAULT 0,
    image TEXT
);
CREATE TABLE IF NOT EXISTS reviews (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    place_id TEXT NOT NULL REFERENCES places(id),
    user_id TEXT,
    username TEXT,
    rating INTEGER NOT NULL,
    comment TEXT NOT NULL DEFAULT '',
    created_at INTEGER NOT NULL
);
CREATE INDEX IF NOT EXISTS reviews_by_place ON reviews(place_id);
";

const SELECT_PLACES_SQL: &str = "SELECT id, name, localized_name, category, city, lon, lat, \
     price, average_rating, ratings_count, image FROM places ORDER BY rowid";

const UPSERT_PLACE_SQL: &str = "INSERT INTO places (id, name, localized_name, category, city, \
     lon, lat, price, average_rating, ratings_count, image) \
     VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11) \
     ON CONFLICT(id) DO UPDATE SET name = excluded.name, \
     localized_name = excluded.localized_name, category = excluded.category, \
     city = excluded.city, lon = excluded.lon, lat = excluded.lat, price = excluded.price, \
     average_rating = CASE WHEN EXISTS (SELECT 1 FROM reviews WHERE place_id = excluded.id) \
     THEN places.average_rating ELSE excluded.average_rating END, \
     ratings_count = CASE WHEN EXISTS (SELECT 1 FROM reviews WHERE place_id = excluded.id) \
     THEN places.ratings_count ELSE excluded.ratings_count END, \
     image = excluded.image";

const SELECT_REVIEWS_SQL: &str = "SELECT place_id, user_id, username, rating, comment, \
     created_at FROM reviews WHERE place_id = ?1 ORDER BY created_at, id";

/// Error raised when reading or writing the SQLite place database.
#[derive(Debug, Error)]
pub enum SqlitePlaceStoreError {
    /// Opening the SQLite database failed.
    #[error("failed to open SQLite database at {path}: {source}")]
    OpenDatabase {
        /// Location of the SQLite database on disk.
        path: PathBuf,
        /// Source error returned by `rusqlite`.
        #[source]
        source: rusqlite::Error,
    },
    /// Creating the tables failed.
    #[error("failed to initialise place schema: {0}")]
    InitialiseSchema(#[source] rusqlite::Error),
    /// A review referenced a place that is not stored.
    #[error("place {id} does not exist")]
    UnknownPlace {
        /// Identifier from the rejected review.
        id: String,
    },
    /// A review row had neither a user id nor a username.
    #[error("review row for place {place_id} has no author")]
    MissingReviewer {
        /// Place the orphaned review belongs to.
        place_id: String,
    },
    /// Another thread panicked while holding the connection.
    #[error("SQLite connection lock was poisoned")]
    Poisoned,
    /// Generic SQLite error when reading or writing rows.
    #[error(transparent)]
    Database(#[from] rusqlite::Error),
}

/// Place and review store backed by a single SQLite database.
///
/// The connection sits behind a mutex so the store can be shared across
/// threads. Review submission runs inside an `IMMEDIATE` transaction, which
/// takes the database write lock before reading existing ratings.
pub struct SqlitePlaceStore {
    connection: Mutex<Connection>,
}

impl fmt::Debug for SqlitePlaceStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SqlitePlaceStore").finish_non_exhaustive()
    }
}

impl SqlitePlaceStore {
    /// Open (or create) the database at `path` and ensure the schema exists.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, SqlitePlaceStoreError> {
        let path = path.as_ref();
        let connection =
            Connection::open(path).map_err(|source| SqlitePlaceStoreError::OpenDatabase {
                path: path.to_path_buf(),
                source,
            })?;
        Self::with_connection(connection)
    }

    /// Create a private in-memory database, mainly for tests.
    pub fn open_in_memory() -> Result<Self, SqlitePlaceStoreError> {
        let connection =
            Connection::open_in_memory().map_err(|source| SqlitePlaceStoreError::OpenDatabase {
                path: PathBuf::from(":memory:"),
                source,
            })?;
        Self::with_connection(connection)
    }

    fn with_connection(connection: Connection) -> Result<Self, SqlitePlaceStoreError> {
        connection
            .execute_batch(SCHEMA)
            .map_err(SqlitePlaceStoreError::InitialiseSchema)?;
        Ok(Self {
            connection: Mutex::new(connection),
        })
    }

    /// Insert places, replacing any stored place with the same id.
    ///
    /// A replaced place keeps its review-derived rating aggregate when reviews
    /// are stored for it; the snapshot's aggregate only applies to places
    /// without reviews.
    ///
    /// Returns the number of rows written.
    pub fn upsert_places(&self, places: &[Place]) -> Result<usize, SqlitePlaceStoreError> {
        let mut connection = self.lock()?;
        let tx = connection.transaction()?;
        {
            let mut statement = tx.prepare_cached(UPSERT_PLACE_SQL)?;
            for place in places {
                statement.execute(params![
                    place.id,
                    place.name,
                    place.localized_name,
                    place.category,
                    place.city,
                    place.location.map(|c| c.x),
                    place.location.map(|c| c.y),
                    place.price,
                    place.average_rating,
                    place.ratings_count,
                    place.image,
                ])?;
            }
        }
        tx.commit()?;
        Ok(places.len())
    }

    fn lock(&self) -> Result<MutexGuard<'_, Connection>, SqlitePlaceStoreError> {
        self.connection
            .lock()
            .map_err(|_| SqlitePlaceStoreError::Poisoned)
    }
}

impl PlaceStore for SqlitePlaceStore {
    type Error = SqlitePlaceStoreError;

    fn load_places(&self) -> Result<Vec<Place>, Self::Error> {
        let connection = self.lock()?;
        let mut statement = connection.prepare_cached(SELECT_PLACES_SQL)?;
        let rows = statement.query_map([], place_from_row)?;
        rows.collect::<Result<Vec<_>, _>>().map_err(Into::into)
    }
}

impl ReviewStore for SqlitePlaceStore {
    type Error = SqlitePlaceStoreError;

    fn reviews_for(&self, place_id: &str) -> Result<Vec<Review>, Self::Error> {
        let connection = self.lock()?;
        read_reviews(&connection, place_id)
    }

    fn submit_review(&self, review: Review) -> Result<RatingSummary, Self::Error> {
        let mut connection = self.lock()?;
        let tx = connection.transaction_with_behavior(TransactionBehavior::Immediate)?;
        ensure_place_exists(&tx, &review.place_id)?;
        insert_review(&tx, &review)?;
        let reviews = read_reviews(&tx, &review.place_id)?;
        let summary = RatingSummary::from_reviews(&reviews);
        tx.execute(
            "UPDATE places SET average_rating = ?1, ratings_count = ?2 WHERE id = ?3",
            params![summary.average_rating, summary.ratings_count, review.place_id],
        )?;
        tx.commit()?;
        Ok(summary)
    }
}

fn ensure_place_exists(tx: &Transaction<'_>, place_id: &str) -> Result<(), SqlitePlaceStoreError> {
    let found = tx
        .query_row("SELECT 1 FROM places WHERE id = ?1", [place_id], |_| Ok(()))
        .optional()?;
    found.ok_or_else(|| SqlitePlaceStoreError::UnknownPlace {
        id: place_id.to_owned(),
    })
}

fn insert_review(tx: &Transaction<'_>, review: &Review) -> Result<(), SqlitePlaceStoreError> {
    let (user_id, username) = match &review.reviewer {
        Reviewer::User(id) => (Some(id.as_str()), None),
        Reviewer::Anonymous(name) => (None, Some(name.as_str())),
    };
    tx.execute(
        "INSERT INTO reviews (place_id, user_id, username, rating, comment, created_at) \
         VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
        params![
            review.place_id,
            user_id,
            username,
            review.rating.get(),
            review.comment,
            review.created_at,
        ],
    )?;
    Ok(())
}

fn read_reviews(
    connection: &Connection,
    place_id: &str,
) -> Result<Vec<Review>, SqlitePlaceStoreError> {
    let mut statement = connection.prepare_cached(SELECT_REVIEWS_SQL)?;
    let rows = statement.query_map([place_id], |row| {
        Ok((
            row.get::<_, String>(0)?,
            row.get::<_, Option<String>>(1)?,
            row.get::<_, Option<String>>(2)?,
            row.get::<_, i64>(3)?,
            row.get::<_, String>(4)?,
            row.get::<_, i64>(5)?,
        ))
    })?;

    let mut reviews = Vec::new();
    for row in rows {
        let (place, user_id, username, stars, comment, created_at) = row?;
        let Some(rating) = u8::try_from(stars).ok().and_then(|s| Rating::new(s).ok()) else {
            log::warn!("skipping review of place {place} with out-of-range rating {stars}");
            continue;
        };
        let reviewer = match (user_id, username) {
            (Some(id), _) => Reviewer::User(id),
            (None, Some(name)) => Reviewer::Anonymous(name),
            (None, None) => {
                return Err(SqlitePlaceStoreError::MissingReviewer { place_id: place });
            }
        };
        reviews.push(Review {
            place_id: place,
            reviewer,
            rating,
            comment,
            created_at,
        });
    }
    Ok(reviews)
}

fn place_from_row(row: &Row<'_>) -> rusqlite::Result<Place> {
    let lon: Option<f64> = row.get(5)?;
    let lat: Option<f64> = row.get(6)?;
    let location: Option<Coord<f64>> = lon.zip(lat).and_then(|(x, y)| coord_from_lon_lat(x, y));
    Ok(Place {
        id: row.get(0)?,
        name: row.get(1)?,
        localized_name: row.get(2)?,
        category: row.get(3)?,
        city: row.get(4)?,
        location,
        price: row.get(7)?,
        average_rating: row.get(8)?,
        ratings_count: row.get(9)?,
        image: row.get(10)?,
    })
}
