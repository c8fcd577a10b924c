//! National Weather Service response models
//!
//! Only the fields the client reads are modelled. Everything is optional so
//! that a missing field surfaces as a domain error instead of a decode error.

use serde::{Deserialize, Serialize};

/// `GET /points/{lat},{lng}` response
#[derive(Debug, Clone, Default, Deserialize)]
pub(crate) struct PointsResponse {
    #[serde(default)]
    pub properties: Option<PointProperties>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct PointProperties {
    #[serde(default)]
    pub forecast: Option<String>,
    #[serde(default)]
    pub forecast_hourly: Option<String>,
    #[serde(default)]
    pub grid_id: Option<String>,
    #[serde(default)]
    pub grid_x: Option<u32>,
    #[serde(default)]
    pub grid_y: Option<u32>,
    #[serde(default)]
    pub time_zone: Option<String>,
}

/// `GET {forecast}` response
///
/// `periods` stays a raw value so that a present-but-not-a-list field can be
/// told apart from a list with bad entries.
#[derive(Debug, Clone, Default, Deserialize)]
pub(crate) struct ForecastResponse {
    #[serde(default)]
    pub properties: Option<ForecastProperties>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub(crate) struct ForecastProperties {
    #[serde(default)]
    pub periods: Option<serde_json::Value>,
}

/// Forecast office grid cell for a point
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GridPoint {
    /// Twelve-hour forecast URL
    pub forecast_url: String,
    /// Hourly forecast URL
    pub forecast_hourly_url: Option<String>,
    /// Forecast office identifier, e.g. "LWX"
    pub grid_id: Option<String>,
    /// Grid column
    pub grid_x: Option<u32>,
    /// Grid row
    pub grid_y: Option<u32>,
    /// IANA time zone of the point
    pub time_zone: Option<String>,
}

impl PointProperties {
    /// Convert into a [`GridPoint`] when a forecast URL is present
    pub(crate) fn into_grid_point(self) -> Option<GridPoint> {
        let forecast_url = self.forecast.filter(|url| !url.trim().is_empty())?;
        Some(GridPoint {
            forecast_url,
            forecast_hourly_url: self.forecast_hourly,
            grid_id: self.grid_id,
            grid_x: self.grid_x,
            grid_y: self.grid_y,
            time_zone: self.time_zone,
        })
    }
}
