/// Query string of `GET /search`
use super::Location;
use crate::config::SearchConfig;
use crate::error::{AppError, Result};
use crate::services::geo_query::{GeoQuery, Radius};
use serde::Deserialize;
use utoipa::IntoParams;

/// Raw search parameters; parsed and validated by `into_query`.
#[derive(Debug, Default, Clone, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct SearchParams {
    /// Latitude of the search center, degrees
    pub lat: Option<String>,
    /// Longitude of the search center, degrees
    pub lon: Option<String>,
    /// Search radius in kilometres, as a bare number
    pub range: Option<String>,
}

impl SearchParams {
    /// Validates the parameters and builds the geo query they describe.
    pub fn into_query(self, config: &SearchConfig) -> Result<GeoQuery> {
        let lat = parse_coordinate("lat", self.lat.as_deref())?;
        let lon = parse_coordinate("lon", self.lon.as_deref())?;
        let center = Location::new(lat, lon);
        center.validate()?;

        let radius = match self.range.as_deref().map(str::trim) {
            None | Some("") => Radius::from_km(config.default_radius_km)?,
            Some(raw) => Radius::parse(raw)?,
        };

        Ok(GeoQuery::within(center, radius))
    }
}

fn parse_coordinate(name: &str, raw: Option<&str>) -> Result<f64> {
    let raw = raw
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .ok_or_else(|| AppError::BadRequest(format!("missing query parameter `{}`", name)))?;

    let value: f64 = raw.parse().map_err(|_| {
        AppError::BadRequest(format!("query parameter `{}` is not a number: '{}'", name, raw))
    })?;

    if !value.is_finite() {
        return Err(AppError::BadRequest(format!(
            "query parameter `{}` must be finite: '{}'",
            name, raw
        )));
    }

    Ok(value)
}
