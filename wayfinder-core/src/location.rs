//! Coordinate normalisation at the data boundary.
//!
//! Places arrive with coordinates in two layouts: a structured
//! `[longitude, latitude]` pair and a legacy `"latitude, longitude"` string.
//! Both are folded into a single [`geo::Coord`] with `x = longitude` and
//! `y = latitude` by an explicit parser per layout. Nothing downstream ever
//! guesses the axis order.

use geo::Coord;

/// Build a coordinate from a structured longitude/latitude pair.
///
/// Returns `None` when either value is not finite or falls outside the WGS84
/// range (`|lon| <= 180`, `|lat| <= 90`).
///
/// # Examples
/// ```
/// use wayfinder_core::coord_from_lon_lat;
///
/// let cairo = coord_from_lon_lat(31.2357, 30.0444).unwrap();
/// assert_eq!(cairo.x, 31.2357);
/// assert!(coord_from_lon_lat(31.0, 95.0).is_none());
/// ```
pub fn coord_from_lon_lat(lon: f64, lat: f64) -> Option<Coord<f64>> {
    let lon_ok = lon.is_finite() && (-180.0..=180.0).contains(&lon);
    let lat_ok = lat.is_finite() && (-90.0..=90.0).contains(&lat);
    (lon_ok && lat_ok).then_some(Coord { x: lon, y: lat })
}

/// Parse the legacy `"lat, lon"` text layout.
///
/// The text must contain exactly two comma-separated floats. Latitude comes
/// first. Malformed text yields `None`.
///
/// # Examples
/// ```
/// use wayfinder_core::parse_lat_lon_text;
///
/// let coord = parse_lat_lon_text(" 30.0444 , 31.2357 ").unwrap();
/// assert_eq!((coord.x, coord.y), (31.2357, 30.0444));
/// assert!(parse_lat_lon_text("somewhere in Giza").is_none());
/// ```
pub fn parse_lat_lon_text(text: &str) -> Option<Coord<f64>> {
    let mut parts = text.split(',').map(str::trim);
    let lat = parts.next()?.parse::<f64>().ok()?;
    let lon = parts.next()?.parse::<f64>().ok()?;
    if parts.next().is_some() {
        return None;
    }
    coord_from_lon_lat(lon, lat)
}
