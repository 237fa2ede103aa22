/// Data structures exchanged with clients and stored in the post index
pub mod search;

pub use search::SearchParams;

use crate::error::{AppError, Result};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Mean earth radius used by Elasticsearch for `arc` distances
pub const EARTH_MEAN_RADIUS_KM: f64 = 6_371.008_771_4;

/// A latitude/longitude pair in degrees
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Location {
    pub lat: f64,
    pub lon: f64,
}

impl Location {
    pub fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }

    /// Rejects coordinates outside `[-90, 90]` x `[-180, 180]`.
    pub fn validate(&self) -> Result<()> {
        if !self.lat.is_finite() || !(-90.0..=90.0).contains(&self.lat) {
            return Err(AppError::Validation(format!(
                "lat must be within [-90, 90], got {}",
                self.lat
            )));
        }
        if !self.lon.is_finite() || !(-180.0..=180.0).contains(&self.lon) {
            return Err(AppError::Validation(format!(
                "lon must be within [-180, 180], got {}",
                self.lon
            )));
        }
        Ok(())
    }

    /// Great-circle distance in kilometres (haversine).
    pub fn distance_km(&self, other: &Location) -> f64 {
        let (lat1, lat2) = (self.lat.to_radians(), other.lat.to_radians());
        let d_lat = lat2 - lat1;
        let d_lon = (other.lon - self.lon).to_radians();

        let h = (d_lat / 2.0).sin().powi(2) + lat1.cos() * lat2.cos() * (d_lon / 2.0).sin().powi(2);
        2.0 * EARTH_MEAN_RADIUS_KM * h.sqrt().min(1.0).asin()
    }
}

/// A short geo-tagged message
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Post {
    pub user: String,
    pub message: String,
    pub location: Location,
}

impl Post {
    pub fn validate(&self) -> Result<()> {
        self.location.validate()
    }
}

/// Response body for a created post
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct CreatedPost {
    /// Identifier the post is stored under
    pub id: String,
}
