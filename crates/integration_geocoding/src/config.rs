//! Geocoder configuration

use domain::ReturnType;
use serde::{Deserialize, Serialize};

/// Vintage used for geographies lookups when none is configured
pub const DEFAULT_VINTAGE: &str = "Current_Current";

/// Configuration for the Census geocoder
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeocodingConfig {
    /// Base URL of the geocoder (default: <https://geocoding.geo.census.gov>)
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Timeout for the direct JSON request in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Timeout for the JSONP fallback request in seconds
    #[serde(default = "default_fallback_timeout_secs")]
    pub fallback_timeout_secs: u64,

    /// Address benchmark
    #[serde(default = "default_benchmark")]
    pub benchmark: String,

    /// Try a plain JSON request before the JSONP fallback
    #[serde(default = "default_direct_requests")]
    pub direct_requests: bool,

    /// Return type used by the forecast pipeline
    #[serde(default = "default_return_type")]
    pub return_type: ReturnType,

    /// Geography vintage (default: `Current_Current`)
    #[serde(default)]
    pub vintage: Option<String>,
}

fn default_base_url() -> String {
    "https://geocoding.geo.census.gov".to_string()
}

const fn default_timeout_secs() -> u64 {
    10
}

const fn default_fallback_timeout_secs() -> u64 {
    15
}

fn default_benchmark() -> String {
    "Public_AR_Current".to_string()
}

const fn default_direct_requests() -> bool {
    true
}

const fn default_return_type() -> ReturnType {
    ReturnType::Geographies
}

impl Default for GeocodingConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_secs: default_timeout_secs(),
            fallback_timeout_secs: default_fallback_timeout_secs(),
            benchmark: default_benchmark(),
            direct_requests: default_direct_requests(),
            return_type: default_return_type(),
            vintage: None,
        }
    }
}

impl GeocodingConfig {
    /// Create a configuration suitable for testing
    #[must_use]
    pub fn for_testing() -> Self {
        Self {
            timeout_secs: 5,
            fallback_timeout_secs: 5,
            ..Default::default()
        }
    }

    /// Vintage to send with geographies lookups
    #[must_use]
    pub fn vintage_or_default(&self) -> &str {
        self.vintage.as_deref().unwrap_or(DEFAULT_VINTAGE)
    }

    /// Validate the configuration
    ///
    /// # Errors
    ///
    /// Returns an error message if a value is unusable.
    pub fn validate(&self) -> Result<(), String> {
        if self.base_url.trim().is_empty() {
            return Err("geocoding.base_url must not be empty".to_string());
        }
        if !self.base_url.starts_with("http://") && !self.base_url.starts_with("https://") {
            return Err(format!(
                "geocoding.base_url must be an http(s) URL, got '{}'",
                self.base_url
            ));
        }
        if self.timeout_secs == 0 {
            return Err("geocoding.timeout_secs must be greater than 0".to_string());
        }
        if self.fallback_timeout_secs == 0 {
            return Err("geocoding.fallback_timeout_secs must be greater than 0".to_string());
        }
        if self.benchmark.trim().is_empty() {
            return Err("geocoding.benchmark must not be empty".to_string());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = GeocodingConfig::default();
        assert_eq!(config.base_url, "https://geocoding.geo.census.gov");
        assert_eq!(config.timeout_secs, 10);
        assert_eq!(config.fallback_timeout_secs, 15);
        assert_eq!(config.benchmark, "Public_AR_Current");
        assert!(config.direct_requests);
        assert_eq!(config.return_type, ReturnType::Geographies);
        assert_eq!(config.vintage_or_default(), "Current_Current");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_deserialize_with_defaults() {
        let json = r#"{"base_url": "http://localhost:9000", "return_type": "locations"}"#;
        let config: GeocodingConfig = serde_json::from_str(json).unwrap();
        assert_eq!(config.base_url, "http://localhost:9000");
        assert_eq!(config.return_type, ReturnType::Locations);
        assert_eq!(config.fallback_timeout_secs, 15);
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let config = GeocodingConfig {
            base_url: "geocoding.geo.census.gov".to_string(),
            ..Default::default()
        };
        assert!(config.validate().is_err());

        let config = GeocodingConfig {
            fallback_timeout_secs: 0,
            ..Default::default()
        };
        let reason = config.validate().unwrap_err();
        assert!(reason.contains("fallback_timeout_secs"));
    }

    #[test]
    fn test_custom_vintage() {
        let config = GeocodingConfig {
            vintage: Some("ACS2023_Current".to_string()),
            ..GeocodingConfig::for_testing()
        };
        assert_eq!(config.vintage_or_default(), "ACS2023_Current");
    }
}
