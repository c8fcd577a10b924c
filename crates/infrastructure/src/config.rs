//! Application configuration

use std::path::Path;

use integration_geocoding::GeocodingConfig;
use integration_weather::WeatherConfig;
use serde::{Deserialize, Serialize};

use crate::telemetry::TelemetryAppConfig;

/// Prefix for environment overrides (e.g., `ADDRCAST_WEATHER__BASE_URL`)
pub const ENV_PREFIX: &str = "ADDRCAST";

/// Separator between nested keys in environment overrides
pub const ENV_SEPARATOR: &str = "__";

/// Application configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    /// Census geocoder settings
    #[serde(default)]
    pub geocoding: GeocodingConfig,

    /// National Weather Service settings
    #[serde(default)]
    pub weather: WeatherConfig,

    /// Log output settings
    #[serde(default)]
    pub telemetry: TelemetryAppConfig,
}

impl AppConfig {
    /// Load configuration from `config.toml` (if present) and the environment
    pub fn load() -> Result<Self, config::ConfigError> {
        Self::from_builder(
            config::Config::builder()
                .add_source(config::File::with_name("config").required(false))
                .add_source(Self::environment()),
        )
    }

    /// Load configuration from an explicit file, then the environment
    ///
    /// Unlike [`load`](Self::load), the file must exist.
    pub fn load_from(path: &Path) -> Result<Self, config::ConfigError> {
        Self::from_builder(
            config::Config::builder()
                .add_source(config::File::from(path).required(true))
                .add_source(Self::environment()),
        )
    }

    fn environment() -> config::Environment {
        config::Environment::with_prefix(ENV_PREFIX)
            .prefix_separator("_")
            .separator(ENV_SEPARATOR)
            .try_parsing(true)
    }

    fn from_builder(
        builder: config::ConfigBuilder<config::builder::DefaultState>,
    ) -> Result<Self, config::ConfigError> {
        let config = builder.build()?;
        config.try_deserialize()
    }

    /// Validate every section
    ///
    /// # Errors
    ///
    /// Returns the first section error found.
    pub fn validate(&self) -> Result<(), String> {
        self.geocoding.validate()?;
        self.weather.validate()?;
        self.telemetry.validate()
    }
}
