//! Forecast service
//!
//! Turns a raw address string into the ordered forecast for that address:
//! geocode, check coverage, fetch the forecast. The first failing stage ends
//! the run and its error is returned unchanged.

use std::fmt;
use std::sync::Arc;

use domain::coverage::ensure_supported;
use domain::{AddressInput, ApiError, Coordinates, GeocodeOptions, ReturnType, WeatherPeriod};
use serde::{Deserialize, Serialize};
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info, instrument, warn};

use crate::ports::{GeocodingPort, WeatherPort};

const CANCELLED_MESSAGE: &str = "Forecast request was cancelled.";

/// Result of a successful run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Forecast {
    /// The address as given, trimmed
    pub address: String,
    /// Where the address resolved to
    pub coordinates: Coordinates,
    /// Forecast periods in upstream order
    pub periods: Vec<WeatherPeriod>,
}

/// Orchestrates geocoding and weather lookups
pub struct ForecastService {
    geocoding: Arc<dyn GeocodingPort>,
    weather: Arc<dyn WeatherPort>,
    options: GeocodeOptions,
}

impl fmt::Debug for ForecastService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ForecastService")
            .field("options", &self.options)
            .finish_non_exhaustive()
    }
}

impl ForecastService {
    /// Create a service that geocodes with the geographies return type
    #[must_use]
    pub fn new(geocoding: Arc<dyn GeocodingPort>, weather: Arc<dyn WeatherPort>) -> Self {
        Self {
            geocoding,
            weather,
            options: GeocodeOptions::with_return_type(ReturnType::Geographies),
        }
    }

    /// Override the geocoding options
    #[must_use]
    pub fn with_options(mut self, options: GeocodeOptions) -> Self {
        self.options = options;
        self
    }

    /// Geocoding options used for every run
    #[must_use]
    pub const fn options(&self) -> &GeocodeOptions {
        &self.options
    }

    /// Resolve an address and fetch its forecast
    ///
    /// # Errors
    ///
    /// Returns the [`ApiError`] of the first stage that fails: 400 for a
    /// rejected address or an uncovered location, 404 when nothing matches
    /// or the point has no grid, upstream statuses as reported, 0 or 500
    /// for transport failures.
    #[instrument(skip(self))]
    pub async fn run(&self, address: &str) -> Result<Forecast, ApiError> {
        let input = AddressInput::from(address);

        let coordinates = self
            .geocoding
            .geocode(&input, &self.options)
            .await
            .inspect_err(|e| log_failure("geocode", e))?;
        debug!(%coordinates, "Address geocoded");

        ensure_supported(&coordinates).inspect_err(|e| log_failure("coverage", e))?;

        let periods = self
            .weather
            .get_forecast(&coordinates)
            .await
            .inspect_err(|e| log_failure("forecast", e))?;

        info!(%coordinates, periods = periods.len(), "Forecast ready");
        Ok(Forecast {
            address: address.trim().to_string(),
            coordinates,
            periods,
        })
    }

    /// Like [`run`](Self::run), but stops as soon as `token` is cancelled
    ///
    /// Cancelling drops the in-flight request. No partial result is
    /// returned.
    ///
    /// # Errors
    ///
    /// Returns a status-0 error when cancelled, otherwise whatever
    /// [`run`](Self::run) returns.
    pub async fn run_with_cancellation(
        &self,
        address: &str,
        token: &CancellationToken,
    ) -> Result<Forecast, ApiError> {
        tokio::select! {
            biased;
            () = token.cancelled() => {
                info!("Forecast run cancelled");
                Err(ApiError::transport(CANCELLED_MESSAGE))
            },
            result = self.run(address) => result,
        }
    }
}

/// Log a failed stage, at error level when upstream is at fault
fn log_failure(stage: &'static str, err: &ApiError) {
    let status = err.status();
    if err.is_server_error() {
        error!(stage, ?status, error = %err, "Forecast run failed upstream");
    } else if err.is_client_error() {
        warn!(stage, ?status, error = %err, "Forecast run rejected");
    } else {
        warn!(stage, ?status, error = %err, "Forecast run failed");
    }
}
