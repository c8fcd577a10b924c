//! Weather adapter - Implements WeatherPort using integration_weather

use std::sync::Arc;

use application::ports::WeatherPort;
use async_trait::async_trait;
use domain::{ApiError, Coordinates, WeatherPeriod};
use integration_weather::{NwsWeatherClient, WeatherClient, WeatherConfig};
use tracing::{debug, instrument};

/// Adapter for the National Weather Service API
pub struct WeatherAdapter {
    client: Arc<dyn WeatherClient>,
}

impl std::fmt::Debug for WeatherAdapter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WeatherAdapter")
            .field("client", &"WeatherClient")
            .finish()
    }
}

impl WeatherAdapter {
    /// Create a new adapter with default configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client fails to initialize.
    pub fn new() -> Result<Self, ApiError> {
        Self::with_config(WeatherConfig::default())
    }

    /// Create with custom configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client fails to initialize.
    pub fn with_config(config: WeatherConfig) -> Result<Self, ApiError> {
        let client = NwsWeatherClient::new(config)?;
        Ok(Self::with_client(Arc::new(client)))
    }

    /// Wrap an existing client
    #[must_use]
    pub fn with_client(client: Arc<dyn WeatherClient>) -> Self {
        Self { client }
    }
}

#[async_trait]
impl WeatherPort for WeatherAdapter {
    #[instrument(skip(self), fields(lat = coordinates.latitude(), lon = coordinates.longitude()))]
    async fn get_forecast(
        &self,
        coordinates: &Coordinates,
    ) -> Result<Vec<WeatherPeriod>, ApiError> {
        let result = self.client.get_forecast(coordinates).await;

        match &result {
            Ok(periods) => {
                debug!(
                    periods = periods.len(),
                    first = periods.first().map(|p| p.name.as_str()),
                    "Retrieved weather forecast"
                );
            }
            Err(e) => {
                debug!(status = ?e.status(), error = %e, "Failed to get weather forecast");
            }
        }

        result
    }
}
