//! Address input value objects
//!
//! Holds the two shapes a geocoding request can take (a single free-text
//! line or structured parts) together with the cheap syntactic checks that
//! run before any network call.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::errors::ApiError;

/// Minimum trimmed length accepted for a one-line address
pub const MIN_ADDRESS_LEN: usize = 5;

/// ZIP prefixes assigned to Puerto Rico
pub const PUERTO_RICO_ZIP_PREFIXES: [&str; 3] = ["006", "007", "009"];

/// Syntactic pre-check for a free-text address
///
/// Trims whitespace and rejects empty strings, strings shorter than five
/// UTF-16 code units and strings without a single alphanumeric character.
/// This is a guard against obviously empty input, not an address parser.
#[must_use]
pub fn validate_address(address: &str) -> bool {
    let trimmed = address.trim();
    trimmed.encode_utf16().count() >= MIN_ADDRESS_LEN
        && trimmed.chars().any(|c| c.is_ascii_alphanumeric())
}

/// Geocoder search type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SearchType {
    /// Single free-text line
    #[default]
    #[serde(rename = "onelineaddress")]
    OneLineAddress,
    /// Structured street/city/state/zip
    #[serde(rename = "address")]
    Address,
    /// Structured Puerto Rico address with urbanization and municipio
    #[serde(rename = "addressPR")]
    AddressPr,
}

impl SearchType {
    /// Path segment used by the geocoder
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::OneLineAddress => "onelineaddress",
            Self::Address => "address",
            Self::AddressPr => "addressPR",
        }
    }
}

impl fmt::Display for SearchType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Geocoder return type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReturnType {
    /// Coordinates and matched address only
    #[default]
    Locations,
    /// Coordinates plus census geographies
    Geographies,
}

impl ReturnType {
    /// Path segment used by the geocoder
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Locations => "locations",
            Self::Geographies => "geographies",
        }
    }
}

impl fmt::Display for ReturnType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for ReturnType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "locations" => Ok(Self::Locations),
            "geographies" => Ok(Self::Geographies),
            _ => Err(format!(
                "Invalid return type: {s}. Use 'locations' or 'geographies'"
            )),
        }
    }
}

/// Options for a single geocoding call
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeocodeOptions {
    /// Return type path segment
    #[serde(default)]
    pub return_type: ReturnType,
    /// Search type path segment (ignored for one-line input)
    #[serde(default)]
    pub search_type: SearchType,
    /// Geography vintage, only sent with [`ReturnType::Geographies`]
    #[serde(default)]
    pub vintage: Option<String>,
}

impl GeocodeOptions {
    /// Options with the given return type and defaults elsewhere
    #[must_use]
    pub fn with_return_type(return_type: ReturnType) -> Self {
        Self {
            return_type,
            ..Self::default()
        }
    }
}

/// Structured address parts
///
/// Blank parts are treated as absent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StructuredAddress {
    /// House number and street name
    #[serde(default)]
    pub street: Option<String>,
    /// City
    #[serde(default)]
    pub city: Option<String>,
    /// State name or abbreviation
    #[serde(default)]
    pub state: Option<String>,
    /// ZIP code
    #[serde(default)]
    pub zip: Option<String>,
    /// Puerto Rico urbanization
    #[serde(default)]
    pub urb: Option<String>,
    /// Puerto Rico municipio
    #[serde(default)]
    pub municipio: Option<String>,
}

fn present(part: Option<&String>) -> Option<&str> {
    part.map(|s| s.trim()).filter(|s| !s.is_empty())
}

impl StructuredAddress {
    /// Trimmed street, if present
    #[must_use]
    pub fn street(&self) -> Option<&str> {
        present(self.street.as_ref())
    }

    /// Trimmed city, if present
    #[must_use]
    pub fn city(&self) -> Option<&str> {
        present(self.city.as_ref())
    }

    /// Trimmed state, if present
    #[must_use]
    pub fn state(&self) -> Option<&str> {
        present(self.state.as_ref())
    }

    /// Trimmed ZIP code, if present
    #[must_use]
    pub fn zip(&self) -> Option<&str> {
        present(self.zip.as_ref())
    }

    /// Trimmed urbanization, if present
    #[must_use]
    pub fn urb(&self) -> Option<&str> {
        present(self.urb.as_ref())
    }

    /// Trimmed municipio, if present
    #[must_use]
    pub fn municipio(&self) -> Option<&str> {
        present(self.municipio.as_ref())
    }

    /// Check the minimum-field policy for the given search type
    ///
    /// `address` needs street + zip or street + city + state. `addressPR`
    /// needs a street, and a ZIP (when given) must carry a Puerto Rico prefix.
    ///
    /// # Errors
    ///
    /// Returns a 400 [`ApiError`] when the policy is not met.
    pub fn check_minimum_fields(&self, search_type: SearchType) -> Result<(), ApiError> {
        match search_type {
            SearchType::Address => {
                let street = self.street().is_some();
                let complete = (street && self.zip().is_some())
                    || (street && self.city().is_some() && self.state().is_some());
                if !complete {
                    return Err(ApiError::invalid_input(
                        "For address searchtype, minimum requirements are: street + zip OR street + city + state",
                    ));
                }
            }
            SearchType::AddressPr => {
                if self.street().is_none() {
                    return Err(ApiError::invalid_input(
                        "Street parameter is required for Puerto Rico addresses",
                    ));
                }
                if let Some(zip) = self.zip() {
                    if !PUERTO_RICO_ZIP_PREFIXES.iter().any(|p| zip.starts_with(p)) {
                        return Err(ApiError::invalid_input(
                            "Puerto Rico ZIP codes must start with 006, 007, or 009",
                        ));
                    }
                }
            }
            SearchType::OneLineAddress => {},
        }
        Ok(())
    }

    /// Join the present parts into one comma-separated line
    #[must_use]
    pub fn to_one_line(&self) -> String {
        [
            self.street(),
            self.urb(),
            self.city(),
            self.municipio(),
            self.state(),
            self.zip(),
        ]
        .into_iter()
        .flatten()
        .collect::<Vec<_>>()
        .join(", ")
    }
}

/// What the caller asked to geocode
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AddressInput {
    /// Single free-text line
    OneLine(String),
    /// Structured parts
    Structured(StructuredAddress),
}

impl From<&str> for AddressInput {
    fn from(address: &str) -> Self {
        Self::OneLine(address.to_string())
    }
}

impl From<String> for AddressInput {
    fn from(address: String) -> Self {
        Self::OneLine(address)
    }
}

impl From<StructuredAddress> for AddressInput {
    fn from(address: StructuredAddress) -> Self {
        Self::Structured(address)
    }
}

impl fmt::Display for AddressInput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::OneLine(line) => f.write_str(line.trim()),
            Self::Structured(parts) => f.write_str(&parts.to_one_line()),
        }
    }
}
