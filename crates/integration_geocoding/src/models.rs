//! Census geocoder response models

use std::collections::HashMap;

use domain::{ApiError, Coordinates};
use serde::{Deserialize, Serialize};

const MALFORMED_MATCH_MESSAGE: &str =
    "Invalid geocoding response. The matched address has no usable coordinates.";

/// Top-level geocoder response
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CensusResponse {
    /// Absent when the geocoder rejected the request
    #[serde(default)]
    pub result: Option<CensusResult>,
}

impl CensusResponse {
    /// Consume the response and return its first address match
    #[must_use]
    pub fn into_first_match(self) -> Option<AddressMatch> {
        self.result?.address_matches?.into_iter().next()
    }
}

/// Geocoder result block
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CensusResult {
    /// Echo of the request parameters, kept opaque
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub input: Option<serde_json::Value>,
    /// Candidate matches, best first
    #[serde(default)]
    pub address_matches: Option<Vec<AddressMatch>>,
}

/// A single candidate match
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddressMatch {
    /// Normalized address as matched by the geocoder
    #[serde(default)]
    pub matched_address: String,
    /// Point on the matched segment (`x` = longitude, `y` = latitude)
    #[serde(default)]
    pub coordinates: Option<MatchPoint>,
    /// TIGER/Line segment the address was interpolated on
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tiger_line: Option<TigerLine>,
    /// Parsed address components
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address_components: Option<AddressComponents>,
    /// Census geographies keyed by layer name (geographies return type only)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub geographies: Option<HashMap<String, Vec<GeographyLayer>>>,
}

impl AddressMatch {
    /// Coordinates of the match, if both axes are present and in range
    ///
    /// The geocoder reports longitude as `x` and latitude as `y`.
    #[must_use]
    pub fn location(&self) -> Option<Coordinates> {
        let point = self.coordinates.as_ref()?;
        Coordinates::new(point.y?, point.x?).ok()
    }

    /// Coordinates of the match, or a 500 error when they are unusable
    pub fn require_location(&self) -> Result<Coordinates, ApiError> {
        self.location()
            .ok_or_else(|| ApiError::invalid_response(MALFORMED_MATCH_MESSAGE))
    }

    /// Name of the first entry in the given geography layer
    #[must_use]
    pub fn geography_name(&self, layer: &str) -> Option<&str> {
        self.geographies
            .as_ref()?
            .get(layer)?
            .first()?
            .name
            .as_deref()
    }
}

/// Raw match point
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct MatchPoint {
    /// Longitude
    #[serde(default)]
    pub x: Option<f64>,
    /// Latitude
    #[serde(default)]
    pub y: Option<f64>,
}

/// TIGER/Line reference
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TigerLine {
    #[serde(default)]
    pub side: String,
    #[serde(default)]
    pub tiger_line_id: String,
}

/// Address components as parsed by the geocoder
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddressComponents {
    #[serde(default)]
    pub zip: String,
    #[serde(default)]
    pub street_name: String,
    #[serde(default)]
    pub pre_type: String,
    #[serde(default)]
    pub city: String,
    #[serde(default)]
    pub pre_direction: String,
    #[serde(default)]
    pub suffix_direction: String,
    #[serde(default)]
    pub from_address: String,
    #[serde(default)]
    pub state: String,
    #[serde(default)]
    pub suffix_type: String,
    #[serde(default)]
    pub to_address: String,
    #[serde(default)]
    pub suffix_qualifier: String,
    #[serde(default)]
    pub pre_qualifier: String,
}

/// One entry of a census geography layer
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub struct GeographyLayer {
    #[serde(default)]
    pub geoid: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub basename: Option<String>,
    #[serde(default)]
    pub state: Option<String>,
    #[serde(default)]
    pub county: Option<String>,
    #[serde(default)]
    pub tract: Option<String>,
    #[serde(default)]
    pub centlat: Option<String>,
    #[serde(default)]
    pub centlon: Option<String>,
}
