//! National Weather Service client
//!
//! HTTP client for `api.weather.gov`. A forecast takes two requests: the
//! points endpoint maps coordinates to a forecast office grid cell, then the
//! grid cell's forecast URL returns the ordered periods.

use async_trait::async_trait;
use domain::coverage::{describe_region, ensure_supported};
use domain::{ApiError, Coordinates, WeatherPeriod};
use reqwest::header::{ACCEPT, HeaderMap, HeaderValue};
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, error, instrument, warn};

use crate::models::{ForecastResponse, GridPoint, PointsResponse};

/// Public NWS API host that forecast URLs point at
pub const PUBLIC_BASE_URL: &str = "https://api.weather.gov";

const GEO_JSON: &str = "application/geo+json";

const BODY_SNIPPET_LEN: usize = 200;

const POINTS_TRANSPORT_MESSAGE: &str =
    "Failed to get weather information. Please check your internet connection and try again.";

const FORECAST_TRANSPORT_MESSAGE: &str =
    "Failed to get weather forecast. Please check your internet connection and try again.";

const MISSING_FORECAST_URL_MESSAGE: &str =
    "Invalid weather service response. Forecast data is not available.";

const INVALID_PERIODS_MESSAGE: &str =
    "Invalid forecast data format received from weather service.";

/// Failures below the HTTP status level, mapped per stage
#[derive(Debug, Error)]
enum FetchError {
    #[error("request failed: {0}")]
    Request(String),

    #[error("undecodable body: {0}")]
    Decode(String),
}

/// Weather service configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeatherConfig {
    /// NWS API base URL (default: <https://api.weather.gov>)
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Request timeout in seconds (default: 10)
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,

    /// Identifying User-Agent, required by the NWS
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

fn default_base_url() -> String {
    PUBLIC_BASE_URL.to_string()
}

const fn default_timeout() -> u64 {
    10
}

fn default_user_agent() -> String {
    "Weather Forecast Geocoder App (contact: developer@example.com)".to_string()
}

impl Default for WeatherConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_secs: default_timeout(),
            user_agent: default_user_agent(),
        }
    }
}

impl WeatherConfig {
    /// Create a configuration suitable for testing
    #[must_use]
    pub fn for_testing() -> Self {
        Self {
            timeout_secs: 5,
            ..Default::default()
        }
    }

    /// Whether requests go through a relay instead of the public host
    #[must_use]
    pub fn is_relayed(&self) -> bool {
        self.base_url.trim_end_matches('/') != PUBLIC_BASE_URL
    }

    /// Validate the configuration
    ///
    /// # Errors
    ///
    /// Returns an error message if a value is unusable.
    pub fn validate(&self) -> Result<(), String> {
        if !self.base_url.starts_with("http://") && !self.base_url.starts_with("https://") {
            return Err(format!(
                "weather.base_url must be an http(s) URL, got '{}'",
                self.base_url
            ));
        }
        if self.timeout_secs == 0 {
            return Err("weather.timeout_secs must be greater than 0".to_string());
        }
        if self.user_agent.trim().is_empty() {
            return Err("weather.user_agent must not be empty".to_string());
        }
        if HeaderValue::from_str(&self.user_agent).is_err() {
            return Err("weather.user_agent is not a valid header value".to_string());
        }
        Ok(())
    }
}

/// Weather client trait for fetching forecasts
#[async_trait]
pub trait WeatherClient: Send + Sync {
    /// Resolve coordinates to a forecast office grid cell
    async fn resolve_grid(&self, coordinates: &Coordinates) -> Result<GridPoint, ApiError>;

    /// Fetch the ordered periods behind a forecast URL
    async fn fetch_periods(&self, forecast_url: &str) -> Result<Vec<WeatherPeriod>, ApiError>;

    /// Coverage check, grid resolution, then forecast retrieval
    async fn get_forecast(
        &self,
        coordinates: &Coordinates,
    ) -> Result<Vec<WeatherPeriod>, ApiError> {
        ensure_supported(coordinates)?;
        let grid = self.resolve_grid(coordinates).await?;
        self.fetch_periods(&grid.forecast_url).await
    }
}

/// NWS HTTP client implementation
#[derive(Debug)]
pub struct NwsWeatherClient {
    client: Client,
    config: WeatherConfig,
}

impl NwsWeatherClient {
    /// Create a new NWS client with the given configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the User-Agent is not a valid header value or the
    /// HTTP client cannot be initialized.
    pub fn new(config: WeatherConfig) -> Result<Self, ApiError> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static(GEO_JSON));

        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .user_agent(config.user_agent.clone())
            .default_headers(headers)
            .build()
            .map_err(|e| ApiError::transport(format!("HTTP client initialization failed: {e}")))?;

        Ok(Self { client, config })
    }

    /// Create a new client with default configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be initialized.
    pub fn with_defaults() -> Result<Self, ApiError> {
        Self::new(WeatherConfig::default())
    }

    /// Points URL for coordinates rounded to four decimals
    fn points_url(&self, coordinates: &Coordinates) -> String {
        let rounded = coordinates.rounded();
        format!(
            "{}/points/{},{}",
            self.config.base_url.trim_end_matches('/'),
            rounded.latitude(),
            rounded.longitude()
        )
    }

    /// Route a forecast URL through the configured base when relayed
    fn route_forecast_url(&self, forecast_url: &str) -> String {
        if !self.config.is_relayed() {
            return forecast_url.to_string();
        }
        forecast_url.strip_prefix(PUBLIC_BASE_URL).map_or_else(
            || forecast_url.to_string(),
            |rest| format!("{}{rest}", self.config.base_url.trim_end_matches('/')),
        )
    }

    async fn get_json<T: serde::de::DeserializeOwned>(
        response: reqwest::Response,
    ) -> Result<T, FetchError> {
        response
            .json()
            .await
            .map_err(|e| FetchError::Decode(e.to_string()))
    }
}

fn snippet(body: &str) -> String {
    body.chars().take(BODY_SNIPPET_LEN).collect()
}

#[async_trait]
impl WeatherClient for NwsWeatherClient {
    #[instrument(skip(self), fields(lat = %coordinates.latitude(), lon = %coordinates.longitude()))]
    async fn resolve_grid(&self, coordinates: &Coordinates) -> Result<GridPoint, ApiError> {
        let url = self.points_url(coordinates);
        debug!(url = %url, "Resolving forecast grid");

        let transport_failure = |e: FetchError| {
            error!(stage = "points", url = %url, error = %e, "Weather points request failed");
            ApiError::invalid_response(POINTS_TRANSPORT_MESSAGE)
        };

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| transport_failure(FetchError::Request(e.to_string())))?;

        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            let region = describe_region(coordinates);
            warn!(stage = "points", url = %url, region = %region, "No forecast grid for point");
            return Err(ApiError::not_found(format!(
                "Weather data not available for this location ({region}). The National Weather Service may not cover this area or there might be a temporary grid data issue."
            )));
        }
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            error!(
                stage = "points",
                status = status.as_u16(),
                url = %url,
                body = %snippet(&body),
                "Weather points API error"
            );
            return Err(ApiError::upstream(
                status.as_u16(),
                format!(
                    "Weather service temporarily unavailable ({}). Please try again in a few moments.",
                    status.as_u16()
                ),
            ));
        }

        let points: PointsResponse = Self::get_json(response).await.map_err(transport_failure)?;

        let Some(grid) = points.properties.and_then(|p| p.into_grid_point()) else {
            error!(stage = "points", url = %url, "Points response has no forecast URL");
            return Err(ApiError::invalid_response(MISSING_FORECAST_URL_MESSAGE));
        };

        debug!(
            grid_id = ?grid.grid_id,
            grid_x = ?grid.grid_x,
            grid_y = ?grid.grid_y,
            forecast_url = %grid.forecast_url,
            "Resolved forecast grid"
        );
        Ok(grid)
    }

    #[instrument(skip(self))]
    async fn fetch_periods(&self, forecast_url: &str) -> Result<Vec<WeatherPeriod>, ApiError> {
        let url = self.route_forecast_url(forecast_url);
        debug!(url = %url, original_url = %forecast_url, "Fetching forecast");

        let transport_failure = |e: FetchError| {
            error!(stage = "forecast", url = %url, error = %e, "Weather forecast request failed");
            ApiError::invalid_response(FORECAST_TRANSPORT_MESSAGE)
        };

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| transport_failure(FetchError::Request(e.to_string())))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            error!(
                stage = "forecast",
                status = status.as_u16(),
                url = %url,
                original_url = %forecast_url,
                body = %snippet(&body),
                "Weather forecast API error"
            );
            return Err(ApiError::upstream(
                status.as_u16(),
                format!(
                    "Failed to fetch weather forecast ({}). Please try again.",
                    status.as_u16()
                ),
            ));
        }

        let forecast: ForecastResponse = Self::get_json(response).await.map_err(transport_failure)?;

        let periods = match forecast.properties.and_then(|p| p.periods) {
            Some(periods @ serde_json::Value::Array(_)) => periods,
            other => {
                error!(
                    stage = "forecast",
                    url = %url,
                    periods = ?other.map(|v| snippet(&v.to_string())),
                    "Forecast has no period list"
                );
                return Err(ApiError::invalid_response(INVALID_PERIODS_MESSAGE));
            }
        };

        let periods: Vec<WeatherPeriod> = serde_json::from_value(periods).map_err(|e| {
            error!(stage = "forecast", url = %url, error = %e, "Forecast period did not parse");
            ApiError::invalid_response(INVALID_PERIODS_MESSAGE)
        })?;

        debug!(count = periods.len(), "Fetched forecast periods");
        Ok(periods)
    }
}
