//! US Census geocoder integration
//!
//! Resolves US addresses to coordinates through the
//! [Census Geocoder](https://geocoding.geo.census.gov) REST API. No API key
//! is required.
//!
//! # Architecture
//!
//! [`GeocodingClient`] is the interface consumed by the adapters and
//! [`CensusGeocodingClient`] is the HTTP implementation. A request goes out
//! as plain JSON first; when that answer is not a success (or direct
//! requests are disabled) the same request is repeated in JSONP format with
//! a unique callback name.
//!
//! # Example
//!
//! ```rust,ignore
//! use domain::{AddressInput, GeocodeOptions};
//! use integration_geocoding::{CensusGeocodingClient, GeocodingClient, GeocodingConfig};
//!
//! let client = CensusGeocodingClient::new(GeocodingConfig::default())?;
//! let coords = client
//!     .geocode(&AddressInput::from("4600 Silver Hill Rd, Washington, DC 20233"), &GeocodeOptions::default())
//!     .await?;
//! ```

mod client;
mod config;
mod error;
mod jsonp;
mod models;

pub use client::{CensusGeocodingClient, GeocodingClient};
pub use config::GeocodingConfig;
pub use models::{
    AddressComponents, AddressMatch, CensusResponse, CensusResult, GeographyLayer, MatchPoint,
    TigerLine,
};
