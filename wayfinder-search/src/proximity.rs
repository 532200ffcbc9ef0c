//! Great-circle proximity ranking.
//!
//! Distances use the Haversine formula on a sphere of radius
//! [`EARTH_RADIUS_KM`]. Places without a usable location are dropped from the
//! ranking rather than sorted last.

use std::fmt;

use geo::Coord;
use serde::Serialize;
use thiserror::Error;
use wayfinder_core::Place;

/// Mean Earth radius used for every distance, in kilometres.
pub const EARTH_RADIUS_KM: f64 = 6371.0_f64;

/// Number of places returned when the caller does not set a limit.
pub const DEFAULT_NEARBY_LIMIT: usize = 5;

/// Coordinate axis named in origin validation errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    /// East-west position.
    Longitude,
    /// North-south position.
    Latitude,
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Longitude => "longitude",
            Self::Latitude => "latitude",
        })
    }
}

/// Errors raised when validating a proximity origin.
#[derive(Debug, Error, PartialEq)]
pub enum OriginError {
    /// The supplied text was not a number.
    #[error("{axis} '{raw}' is not a number")]
    NotANumber {
        /// Offending axis.
        axis: Axis,
        /// Text supplied by the caller.
        raw: String,
    },
    /// The number was not finite or fell outside the WGS84 range.
    #[error("{axis} {value} is outside the valid range")]
    OutOfRange {
        /// Offending axis.
        axis: Axis,
        /// Value supplied by the caller.
        value: f64,
    },
}

/// A validated starting point for proximity queries.
///
/// # Examples
/// ```
/// use wayfinder_search::Origin;
///
/// let cairo = Origin::new(31.2357, 30.0444).unwrap();
/// assert_eq!(cairo.coord().y, 30.0444);
/// assert!(Origin::parse("31.2", "north").is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Origin(Coord<f64>);

impl Origin {
    /// Validate a longitude/latitude pair.
    ///
    /// # Errors
    /// Returns [`OriginError::OutOfRange`] for non-finite or out-of-range
    /// values.
    pub fn new(lon: f64, lat: f64) -> Result<Self, OriginError> {
        if !lon.is_finite() || !(-180.0_f64..=180.0_f64).contains(&lon) {
            return Err(OriginError::OutOfRange {
                axis: Axis::Longitude,
                value: lon,
            });
        }
        if !lat.is_finite() || !(-90.0_f64..=90.0_f64).contains(&lat) {
            return Err(OriginError::OutOfRange {
                axis: Axis::Latitude,
                value: lat,
            });
        }
        Ok(Self(Coord { x: lon, y: lat }))
    }

    /// Parse and validate textual query parameters.
    ///
    /// # Errors
    /// Returns [`OriginError::NotANumber`] when either value does not parse,
    /// or any error from [`Origin::new`].
    pub fn parse(lon: &str, lat: &str) -> Result<Self, OriginError> {
        let parse = |axis: Axis, raw: &str| {
            raw.trim()
                .parse::<f64>()
                .map_err(|_| OriginError::NotANumber {
                    axis,
                    raw: raw.to_owned(),
                })
        };
        Self::new(parse(Axis::Longitude, lon)?, parse(Axis::Latitude, lat)?)
    }

    /// The origin as a coordinate (`x = longitude`, `y = latitude`).
    #[must_use]
    pub const fn coord(self) -> Coord<f64> {
        self.0
    }
}

/// Great-circle distance between two WGS84 coordinates, in kilometres.
///
/// # Examples
/// ```
/// use geo::Coord;
/// use wayfinder_search::haversine_km;
///
/// let cairo = Coord { x: 31.2357, y: 30.0444 };
/// let giza = Coord { x: 31.1342, y: 29.9792 };
/// let d = haversine_km(cairo, giza);
/// assert!((11.0..13.0).contains(&d));
/// assert_eq!(haversine_km(cairo, cairo), 0.0);
/// ```
#[must_use]
#[expect(
    clippy::float_arithmetic,
    reason = "the Haversine formula is floating-point trigonometry"
)]
pub fn haversine_km(from: Coord<f64>, to: Coord<f64>) -> f64 {
    let lat1 = from.y.to_radians();
    let lat2 = to.y.to_radians();
    let half_dlat = (to.y - from.y).to_radians() / 2.0_f64;
    let half_dlon = (to.x - from.x).to_radians() / 2.0_f64;
    let a = (half_dlat.sin().powi(2) + lat1.cos() * lat2.cos() * half_dlon.sin().powi(2))
        .clamp(0.0_f64, 1.0_f64);
    EARTH_RADIUS_KM * 2.0_f64 * a.sqrt().atan2((1.0_f64 - a).sqrt())
}

/// A place annotated with its distance from the query origin.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NearbyPlace {
    /// The ranked place.
    #[serde(flatten)]
    pub place: Place,
    /// Great-circle distance from the origin in kilometres.
    pub distance_km: f64,
}

/// Order places nearest-first from `origin`.
///
/// Places without a location are excluded. Ties keep their input order. At
/// most `limit` places are returned, [`DEFAULT_NEARBY_LIMIT`] when `None`.
#[must_use]
pub fn rank_by_distance(
    origin: Origin,
    places: &[Place],
    limit: Option<usize>,
) -> Vec<NearbyPlace> {
    let mut ranked: Vec<NearbyPlace> = places
        .iter()
        .filter_map(|place| {
            place.location.map(|location| NearbyPlace {
                place: place.clone(),
                distance_km: haversine_km(origin.coord(), location),
            })
        })
        .collect();
    let skipped = places.len().saturating_sub(ranked.len());
    if skipped > 0 {
        log::debug!("proximity ranking skipped {skipped} places without coordinates");
    }
    ranked.sort_by(|a, b| a.distance_km.total_cmp(&b.distance_km));
    ranked.truncate(limit.unwrap_or(DEFAULT_NEARBY_LIMIT));
    ranked
}

#[cfg(test)]
#[expect(
    clippy::expect_used,
    clippy::float_arithmetic,
    reason = "tests use float maths and fail fast on invalid fixtures"
)]
mod tests {
    use super::*;
    use rstest::rstest;

    const CAIRO: Coord<f64> = Coord {
        x: 31.2357,
        y: 30.0444,
    };

    fn place_at(id: &str, lon: f64, lat: f64) -> Place {
        Place::new(id, id).with_location(Coord { x: lon, y: lat })
    }

    #[rstest]
    fn distance_is_symmetric() {
        let alexandria = Coord {
            x: 29.9187,
            y: 31.2001,
        };
        let there = haversine_km(CAIRO, alexandria);
        let back = haversine_km(alexandria, CAIRO);
        assert!((there - back).abs() < 1e-9);
        assert!((170.0..190.0).contains(&there), "got {there}");
    }

    #[rstest]
    fn antipodes_are_half_the_circumference() {
        let antipode = Coord {
            x: CAIRO.x - 180.0,
            y: -CAIRO.y,
        };
        let expected = EARTH_RADIUS_KM * std::f64::consts::PI;
        assert!((haversine_km(CAIRO, antipode) - expected).abs() < 1e-3);
    }

    #[rstest]
    fn ranks_nearest_first_and_skips_unlocated() {
        let origin = Origin::new(CAIRO.x, CAIRO.y).expect("valid origin");
        let places = [
            place_at("aswan", 32.8998, 24.0889),
            Place::new("legacy", "legacy"),
            place_at("giza", 31.1342, 29.9792),
        ];
        let ranked = rank_by_distance(origin, &places, None);
        let ids: Vec<_> = ranked.iter().map(|n| n.place.id.as_str()).collect();
        assert_eq!(ids, ["giza", "aswan"]);
    }

    #[rstest]
    fn equal_distances_keep_input_order() {
        let origin = Origin::new(0.0, 0.0).expect("valid origin");
        let places = [
            place_at("east", 1.0, 0.0),
            place_at("west", -1.0, 0.0),
            place_at("here", 0.0, 0.0),
        ];
        let ranked = rank_by_distance(origin, &places, Some(3));
        let ids: Vec<_> = ranked.iter().map(|n| n.place.id.as_str()).collect();
        assert_eq!(ids, ["here", "east", "west"]);
    }

    #[rstest]
    fn default_limit_is_five() {
        let origin = Origin::new(0.0, 0.0).expect("valid origin");
        let places: Vec<_> = (0..8)
            .map(|i| place_at(&format!("p{i}"), f64::from(i) / 10.0, 0.0))
            .collect();
        assert_eq!(rank_by_distance(origin, &places, None).len(), DEFAULT_NEARBY_LIMIT);
    }

    #[rstest]
    #[case("abc", "30.0", Axis::Longitude)]
    #[case("31.0", "", Axis::Latitude)]
    fn non_numeric_origin_is_rejected(#[case] lon: &str, #[case] lat: &str, #[case] axis: Axis) {
        let err = Origin::parse(lon, lat).expect_err("non-numeric origin");
        assert!(matches!(err, OriginError::NotANumber { axis: a, .. } if a == axis));
    }

    #[rstest]
    #[case(181.0, 0.0)]
    #[case(0.0, 91.0)]
    #[case(f64::NAN, 0.0)]
    fn out_of_range_origin_is_rejected(#[case] lon: f64, #[case] lat: f64) {
        assert!(matches!(
            Origin::new(lon, lat),
            Err(OriginError::OutOfRange { .. })
        ));
    }
}
