//! Weather service port
//!
//! Defines the interface for forecast retrieval.

use async_trait::async_trait;
use domain::{ApiError, Coordinates, WeatherPeriod};
#[cfg(test)]
use mockall::automock;

/// Port for weather service operations
#[cfg_attr(test, automock)]
#[async_trait]
pub trait WeatherPort: Send + Sync {
    /// Ordered forecast periods for a location
    ///
    /// Periods come back in upstream order, which is chronological. They
    /// are never filtered or re-sorted.
    async fn get_forecast(&self, coordinates: &Coordinates) -> Result<Vec<WeatherPeriod>, ApiError>;
}
