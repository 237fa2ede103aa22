/// Geo-distance query construction
///
/// Only assembles the query descriptor. Distance computation and index
/// traversal belong to the store.
use crate::error::{AppError, Result};
use crate::models::Location;
use serde_json::{json, Value};
use std::fmt;

/// Document field holding the `geo_point`
pub const LOCATION_FIELD: &str = "location";

/// A non-negative search radius in kilometres
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Radius {
    km: f64,
}

impl Radius {
    pub fn from_km(km: f64) -> Result<Self> {
        if !km.is_finite() || km < 0.0 {
            return Err(AppError::Validation(format!(
                "range must be a non-negative number of kilometres, got {}",
                km
            )));
        }
        Ok(Self { km })
    }

    /// Parses a bare number of kilometres, e.g. `"50"` or `"2.5"`.
    pub fn parse(raw: &str) -> Result<Self> {
        let km: f64 = raw.trim().parse().map_err(|_| {
            AppError::BadRequest(format!("query parameter `range` is not a number: '{}'", raw))
        })?;
        Self::from_km(km)
    }

    pub fn km(&self) -> f64 {
        self.km
    }
}

/// Renders the store distance string, e.g. `50km`.
impl fmt::Display for Radius {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}km", self.km)
    }
}

/// Selects every post whose location lies within `radius` of `center`.
/// No ordering is requested; hits come back in store order.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeoQuery {
    center: Location,
    radius: Radius,
}

impl GeoQuery {
    pub fn within(center: Location, radius: Radius) -> Self {
        Self { center, radius }
    }

    pub fn center(&self) -> Location {
        self.center
    }

    pub fn radius(&self) -> Radius {
        self.radius
    }

    /// Distance string sent to the store
    pub fn distance(&self) -> String {
        self.radius.to_string()
    }

    /// Inclusive containment test matching `geo_distance` semantics.
    pub fn contains(&self, location: &Location) -> bool {
        self.center.distance_km(location) <= self.radius.km()
    }

    /// Elasticsearch `_search` request body
    pub fn to_body(&self) -> Value {
        json!({
            "query": {
                "geo_distance": {
                    "distance": self.distance(),
                    LOCATION_FIELD: {
                        "lat": self.center.lat,
                        "lon": self.center.lon,
                    }
                }
            }
        })
    }
}
