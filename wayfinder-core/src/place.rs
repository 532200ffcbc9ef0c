use geo::Coord;

use crate::PriceTier;

/// A landmark or venue worth visiting.
///
/// Coordinates are WGS84 with `x = longitude` and `y = latitude`. Legacy
/// records without usable coordinates carry `None`.
///
/// The price tier is never stored; [`Place::price_tier`] derives it from the
/// free-text price on every call.
///
/// # Examples
/// ```
/// use geo::Coord;
/// use wayfinder_core::{Place, PriceTier};
///
/// let place = Place::new("p1", "Al Fath Mosque")
///     .with_category("Historical Mosques")
///     .with_city("Cairo")
///     .with_price("Free")
///     .with_location(Coord { x: 31.25, y: 30.05 });
///
/// assert_eq!(place.price_tier(), PriceTier::Free);
/// assert_eq!(place.location.map(|c| c.y), Some(30.05));
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Place {
    /// Opaque unique identifier.
    pub id: String,
    /// English display name.
    pub name: String,
    /// Arabic display name.
    #[cfg_attr(feature = "serde", serde(default))]
    pub localized_name: String,
    /// Free-text classification such as "Historical Mosques".
    #[cfg_attr(feature = "serde", serde(default))]
    pub category: String,
    /// Free-text location label.
    #[cfg_attr(feature = "serde", serde(default))]
    pub city: String,
    /// Normalised position, if known.
    #[cfg_attr(feature = "serde", serde(default))]
    pub location: Option<Coord<f64>>,
    /// Free-text price description such as "60 EGP".
    #[cfg_attr(feature = "serde", serde(default))]
    pub price: String,
    /// Mean review rating in `0.0..=5.0`, rounded to one decimal.
    #[cfg_attr(feature = "serde", serde(default))]
    pub average_rating: f64,
    /// Number of reviews behind [`Place::average_rating`].
    #[cfg_attr(feature = "serde", serde(default))]
    pub ratings_count: u32,
    /// Reference to a hosted image, carried as opaque data.
    #[cfg_attr(feature = "serde", serde(default))]
    pub image: Option<String>,
}

impl Place {
    /// Construct a place with an identifier and name; every other field
    /// starts empty.
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            localized_name: String::new(),
            category: String::new(),
            city: String::new(),
            location: None,
            price: String::new(),
            average_rating: 0.0,
            ratings_count: 0,
            image: None,
        }
    }

    /// Set the localised display name.
    pub fn with_localized_name(mut self, name: impl Into<String>) -> Self {
        self.localized_name = name.into();
        self
    }

    /// Set the category tag.
    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = category.into();
        self
    }

    /// Set the city label.
    pub fn with_city(mut self, city: impl Into<String>) -> Self {
        self.city = city.into();
        self
    }

    /// Set the normalised location.
    pub fn with_location(mut self, location: Coord<f64>) -> Self {
        self.location = Some(location);
        self
    }

    /// Set the free-text price.
    pub fn with_price(mut self, price: impl Into<String>) -> Self {
        self.price = price.into();
        self
    }

    /// Set the aggregate rating.
    pub fn with_rating(mut self, average_rating: f64, ratings_count: u32) -> Self {
        self.average_rating = average_rating;
        self.ratings_count = ratings_count;
        self
    }

    /// Derive the price tier from [`Place::price`].
    pub fn price_tier(&self) -> PriceTier {
        PriceTier::classify(&self.price)
    }
}
