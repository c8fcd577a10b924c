//! Geocoding adapter - Implements GeocodingPort using integration_geocoding

use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

use application::ports::{GeocodedAddress, GeocodingPort};
use async_trait::async_trait;
use domain::{AddressInput, ApiError, Coordinates, GeocodeOptions};
use integration_geocoding::{
    AddressMatch, CensusGeocodingClient, GeocodingClient, GeocodingConfig,
};
use tracing::{debug, instrument};

/// Adapter for the Census geocoder
pub struct GeocodingAdapter {
    client: Arc<dyn GeocodingClient>,
}

impl std::fmt::Debug for GeocodingAdapter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GeocodingAdapter")
            .field("client", &"GeocodingClient")
            .finish()
    }
}

impl GeocodingAdapter {
    /// Create a new adapter with default configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client fails to initialize.
    pub fn new() -> Result<Self, ApiError> {
        Self::with_config(GeocodingConfig::default())
    }

    /// Create with custom configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client fails to initialize.
    pub fn with_config(config: GeocodingConfig) -> Result<Self, ApiError> {
        let client = CensusGeocodingClient::new(config)?;
        Ok(Self::with_client(Arc::new(client)))
    }

    /// Wrap an existing client
    #[must_use]
    pub fn with_client(client: Arc<dyn GeocodingClient>) -> Self {
        Self { client }
    }

    fn to_geocoded(found: AddressMatch) -> Result<GeocodedAddress, ApiError> {
        let coordinates = found.require_location()?;
        let areas: BTreeMap<String, String> = found
            .geographies
            .iter()
            .flat_map(HashMap::keys)
            .filter_map(|layer| {
                let name = found.geography_name(layer)?;
                Some((layer.clone(), name.to_string()))
            })
            .collect();

        Ok(GeocodedAddress {
            coordinates,
            matched_address: found.matched_address,
            areas,
        })
    }
}

#[async_trait]
impl GeocodingPort for GeocodingAdapter {
    #[instrument(skip(self, options), fields(address = %input, return_type = %options.return_type))]
    async fn geocode(
        &self,
        input: &AddressInput,
        options: &GeocodeOptions,
    ) -> Result<Coordinates, ApiError> {
        let result = self.client.geocode(input, options).await;

        match &result {
            Ok(coordinates) => debug!(%coordinates, "Geocoded address"),
            Err(e) => debug!(status = ?e.status(), error = %e, "Failed to geocode address"),
        }

        result
    }

    #[instrument(skip(self, options), fields(address = %input, return_type = %options.return_type))]
    async fn lookup(
        &self,
        input: &AddressInput,
        options: &GeocodeOptions,
    ) -> Result<GeocodedAddress, ApiError> {
        let result = self
            .client
            .lookup(input, options)
            .await
            .and_then(Self::to_geocoded);

        match &result {
            Ok(found) => debug!(
                matched = %found.matched_address,
                areas = found.areas.len(),
                "Looked up address"
            ),
            Err(e) => debug!(status = ?e.status(), error = %e, "Failed to look up address"),
        }

        result
    }
}
