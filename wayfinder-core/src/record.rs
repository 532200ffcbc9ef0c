//! Legacy JSON place records.
//!
//! Place snapshots exported from the original datastore use camel-cased keys,
//! Mongo-style `_id` identifiers and two coordinate layouts. [`PlaceRecord`]
//! accepts that shape verbatim; converting it into a [`Place`] normalises the
//! coordinates with one explicit parser per layout.

use std::io::Read;

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::{Place, coord_from_lon_lat, parse_lat_lon_text};

/// A place as found in legacy JSON exports.
///
/// Field values are read leniently: a number where text is expected becomes
/// its decimal text, and `null` or any other unexpected shape becomes empty.
/// Unusable data degrades rather than rejecting the record.
///
/// # Examples
/// ```
/// use wayfinder_core::{Place, PlaceRecord};
///
/// let json = r#"{"_id":"p1","name":"Citadel","location":"30.0299, 31.2611","price":"450 EGP"}"#;
/// let record: PlaceRecord = serde_json::from_str(json).unwrap();
/// let place = Place::from(record);
/// assert_eq!(place.location.map(|c| c.x), Some(31.2611));
/// ```
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PlaceRecord {
    /// Identifier.
    #[serde(alias = "_id", deserialize_with = "lenient_text")]
    pub id: String,
    /// English name.
    #[serde(deserialize_with = "lenient_text")]
    pub name: String,
    /// Arabic name.
    #[serde(alias = "nameAr", alias = "name_ar", deserialize_with = "lenient_text")]
    pub localized_name: String,
    /// Category tag.
    #[serde(deserialize_with = "lenient_text")]
    pub category: String,
    /// City label.
    #[serde(alias = "cityText", deserialize_with = "lenient_text")]
    pub city: String,
    /// Structured `[longitude, latitude]` pair, kept raw until
    /// [`PlaceRecord::coordinate`] interprets it.
    pub coordinates: Option<Value>,
    /// Legacy `"latitude, longitude"` text.
    #[serde(deserialize_with = "lenient_optional_text")]
    pub location: Option<String>,
    /// Price text.
    #[serde(alias = "priceRaw", deserialize_with = "lenient_text")]
    pub price: String,
    /// Aggregate rating.
    #[serde(deserialize_with = "lenient_rating")]
    pub average_rating: f64,
    /// Review count.
    #[serde(deserialize_with = "lenient_count")]
    pub ratings_count: u32,
    /// Hosted image reference.
    #[serde(deserialize_with = "lenient_optional_text")]
    pub image: Option<String>,
}

fn text_of(value: Value) -> Option<String> {
    match value {
        Value::String(text) => Some(text),
        Value::Number(number) => Some(number.to_string()),
        _ => None,
    }
}

fn lenient_text<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    Ok(text_of(Value::deserialize(deserializer)?).unwrap_or_default())
}

fn lenient_optional_text<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<Option<String>, D::Error> {
    Ok(text_of(Value::deserialize(deserializer)?))
}

fn lenient_rating<'de, D: Deserializer<'de>>(deserializer: D) -> Result<f64, D::Error> {
    let rating = match Value::deserialize(deserializer)? {
        Value::Number(number) => number.as_f64(),
        Value::String(text) => text.trim().parse().ok(),
        _ => None,
    };
    Ok(rating
        .filter(|value| (0.0..=5.0).contains(value))
        .unwrap_or_default())
}

fn lenient_count<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u32, D::Error> {
    let count = match Value::deserialize(deserializer)? {
        Value::Number(number) => number.as_u64(),
        Value::String(text) => text.trim().parse().ok(),
        _ => None,
    };
    Ok(count.and_then(|n| u32::try_from(n).ok()).unwrap_or_default())
}

fn axis_value(value: &Value) -> Option<f64> {
    match value {
        Value::Number(number) => number.as_f64(),
        Value::String(text) => text.trim().parse().ok(),
        _ => None,
    }
}

impl PlaceRecord {
    /// Resolve the record's coordinates.
    ///
    /// The structured pair wins when it is a two-element array of numbers or
    /// numeric strings within range. Otherwise the legacy text is parsed.
    /// Records with neither yield `None`.
    pub fn coordinate(&self) -> Option<geo::Coord<f64>> {
        let structured = match self.coordinates.as_ref().and_then(Value::as_array) {
            Some(pair) => match pair.as_slice() {
                [lon, lat] => axis_value(lon)
                    .zip(axis_value(lat))
                    .and_then(|(x, y)| coord_from_lon_lat(x, y)),
                _ => None,
            },
            None => None,
        };
        structured.or_else(|| self.location.as_deref().and_then(parse_lat_lon_text))
    }
}

impl From<PlaceRecord> for Place {
    fn from(record: PlaceRecord) -> Self {
        let location = record.coordinate();
        if location.is_none() && (record.coordinates.is_some() || record.location.is_some()) {
            log::warn!(
                "place {} has unusable coordinates; it will be skipped by proximity ranking",
                record.id
            );
        }
        Self {
            id: record.id,
            name: record.name,
            localized_name: record.localized_name,
            category: record.category,
            city: record.city,
            location,
            price: record.price,
            average_rating: record.average_rating,
            ratings_count: record.ratings_count,
            image: record.image,
        }
    }
}

/// Read a JSON array of legacy records.
///
/// Array entries that are not JSON objects are skipped with a warning, so one
/// bad entry never costs the rest of the snapshot.
///
/// # Errors
/// Returns [`serde_json::Error`] when the input is not valid JSON or its top
/// level is not an array.
pub fn read_place_records<R: Read>(reader: R) -> Result<Vec<PlaceRecord>, serde_json::Error> {
    let entries: Vec<Value> = serde_json::from_reader(reader)?;
    Ok(entries
        .into_iter()
        .enumerate()
        .filter_map(|(index, entry)| match PlaceRecord::deserialize(entry) {
            Ok(record) => Some(record),
            Err(err) => {
                log::warn!("skipping place record {index}: {err}");
                None
            }
        })
        .collect())
}
