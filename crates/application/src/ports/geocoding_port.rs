//! Geocoding port
//!
//! Defines the interface for resolving addresses to coordinates.

use std::collections::BTreeMap;

use async_trait::async_trait;
use domain::{AddressInput, ApiError, Coordinates, GeocodeOptions};
#[cfg(test)]
use mockall::automock;
use serde::{Deserialize, Serialize};

/// Best match for an address
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeocodedAddress {
    /// Where the address is
    pub coordinates: Coordinates,
    /// Normalized address as matched by the geocoder
    pub matched_address: String,
    /// Census area names keyed by layer, e.g. "Counties" → "Prince George's County"
    ///
    /// Empty unless the lookup asked for geographies.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub areas: BTreeMap<String, String>,
}

/// Port for geocoding operations
#[cfg_attr(test, automock)]
#[async_trait]
pub trait GeocodingPort: Send + Sync {
    /// Resolve an address to coordinates
    async fn geocode(
        &self,
        input: &AddressInput,
        options: &GeocodeOptions,
    ) -> Result<Coordinates, ApiError>;

    /// Resolve an address to its best match with match details
    async fn lookup(
        &self,
        input: &AddressInput,
        options: &GeocodeOptions,
    ) -> Result<GeocodedAddress, ApiError>;
}
