//! Census geocoder client
//!
//! HTTP client for the `/geocoder/{returntype}/{searchtype}` endpoints.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use domain::{
    AddressInput, ApiError, Coordinates, GeocodeOptions, ReturnType, SearchType, StructuredAddress,
    validate_address,
};
use reqwest::Client;
use tracing::{debug, error, instrument, warn};

use crate::config::GeocodingConfig;
use crate::error::TransportError;
use crate::jsonp::{CallbackRegistry, unwrap_payload};
use crate::models::{AddressMatch, CensusResponse};

const INVALID_ADDRESS_MESSAGE: &str = "Invalid address format. Please provide a complete US address with street number, street name, city, and state.";

const NO_MATCH_MESSAGE: &str =
    "No matching addresses found. Please check your address and try again.";

/// Characters of an error body kept in logs
const BODY_SNIPPET_LEN: usize = 200;

/// Trait for geocoding clients
#[async_trait]
pub trait GeocodingClient: Send + Sync {
    /// Resolve an address to its best match
    async fn lookup(
        &self,
        input: &AddressInput,
        options: &GeocodeOptions,
    ) -> Result<AddressMatch, ApiError>;

    /// Resolve an address to coordinates
    async fn geocode(
        &self,
        input: &AddressInput,
        options: &GeocodeOptions,
    ) -> Result<Coordinates, ApiError> {
        self.lookup(input, options).await?.require_location()
    }
}

/// Request shape after validation
#[derive(Debug, Clone, PartialEq, Eq)]
struct PreparedRequest {
    search_type: SearchType,
    fields: Vec<(&'static str, String)>,
}

impl PreparedRequest {
    fn from_input(input: &AddressInput, search_type: SearchType) -> Result<Self, ApiError> {
        match input {
            AddressInput::OneLine(line) => Self::one_line(line),
            AddressInput::Structured(parts) => Self::structured(parts, search_type),
        }
    }

    fn one_line(line: &str) -> Result<Self, ApiError> {
        if !validate_address(line) {
            return Err(ApiError::invalid_input(INVALID_ADDRESS_MESSAGE));
        }
        Ok(Self {
            search_type: SearchType::OneLineAddress,
            fields: vec![("address", line.trim().to_string())],
        })
    }

    fn structured(parts: &StructuredAddress, search_type: SearchType) -> Result<Self, ApiError> {
        parts.check_minimum_fields(search_type)?;

        let fields: Vec<(&'static str, Option<&str>)> = match search_type {
            SearchType::OneLineAddress => return Self::one_line(&parts.to_one_line()),
            SearchType::Address => vec![
                ("street", parts.street()),
                ("city", parts.city()),
                ("state", parts.state()),
                ("zip", parts.zip()),
            ],
            SearchType::AddressPr => vec![
                ("street", parts.street()),
                ("urb", parts.urb()),
                ("city", parts.city()),
                ("municipio", parts.municipio()),
                ("state", parts.state()),
                ("zip", parts.zip()),
            ],
        };

        Ok(Self {
            search_type,
            fields: fields
                .into_iter()
                .filter_map(|(key, value)| value.map(|v| (key, v.to_string())))
                .collect(),
        })
    }
}

/// Census geocoder HTTP client
#[derive(Debug)]
pub struct CensusGeocodingClient {
    client: Client,
    config: GeocodingConfig,
    callbacks: Arc<CallbackRegistry>,
}

impl CensusGeocodingClient {
    /// Create a new geocoder client with the given configuration
    ///
    /// # Errors
    ///
    /// Returns a status-0 error if the HTTP client cannot be initialized.
    pub fn new(config: GeocodingConfig) -> Result<Self, ApiError> {
        let client = Client::builder()
            .user_agent(concat!("addrcast/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| TransportError::ClientInit(e.to_string()))?;

        Ok(Self {
            client,
            config,
            callbacks: Arc::new(CallbackRegistry::default()),
        })
    }

    /// Create a new client with default configuration
    ///
    /// # Errors
    ///
    /// Returns a status-0 error if the HTTP client cannot be initialized.
    pub fn with_defaults() -> Result<Self, ApiError> {
        Self::new(GeocodingConfig::default())
    }

    /// The active configuration
    #[must_use]
    pub const fn config(&self) -> &GeocodingConfig {
        &self.config
    }

    /// Number of fallback callbacks currently registered
    #[must_use]
    pub fn pending_callbacks(&self) -> usize {
        self.callbacks.len()
    }

    fn endpoint(&self, return_type: ReturnType, search_type: SearchType) -> String {
        format!(
            "{}/geocoder/{}/{}",
            self.config.base_url.trim_end_matches('/'),
            return_type.as_str(),
            search_type.as_str()
        )
    }

    /// Query parameters in the order the geocoder documents them
    fn query_params(
        &self,
        request: &PreparedRequest,
        options: &GeocodeOptions,
        callback: Option<&str>,
    ) -> Vec<(&'static str, String)> {
        let mut params = vec![("benchmark", self.config.benchmark.clone())];
        match callback {
            Some(name) => {
                params.push(("format", "jsonp".to_string()));
                params.push(("callback", name.to_string()));
            }
            None => params.push(("format", "json".to_string())),
        }
        if options.return_type == ReturnType::Geographies {
            let vintage = options
                .vintage
                .as_deref()
                .unwrap_or_else(|| self.config.vintage_or_default());
            params.push(("vintage", vintage.to_string()));
        }
        params.extend(request.fields.iter().cloned());
        params
    }

    async fn fetch(
        &self,
        request: &PreparedRequest,
        options: &GeocodeOptions,
    ) -> Result<CensusResponse, TransportError> {
        if !self.config.direct_requests {
            return self.fetch_jsonp(request, options).await;
        }

        let url = self.endpoint(options.return_type, request.search_type);
        debug!(url = %url, "Sending direct geocoding request");

        let response = self
            .client
            .get(&url)
            .query(&self.query_params(request, options, None))
            .timeout(Duration::from_secs(self.config.timeout_secs))
            .send()
            .await
            .map_err(|e| TransportError::Request(e.to_string()))?;

        let status = response.status();
        if status.is_success() {
            return response
                .json()
                .await
                .map_err(|e| TransportError::Decode(e.to_string()));
        }

        let body = response.text().await.unwrap_or_default();
        warn!(
            stage = "geocoding",
            status = status.as_u16(),
            url = %url,
            body = %snippet(&body),
            "Direct geocoding request failed, retrying as JSONP"
        );
        self.fetch_jsonp(request, options).await
    }

    async fn fetch_jsonp(
        &self,
        request: &PreparedRequest,
        options: &GeocodeOptions,
    ) -> Result<CensusResponse, TransportError> {
        let guard = self.callbacks.register();
        let url = self.endpoint(options.return_type, request.search_type);
        let params = self.query_params(request, options, Some(guard.name()));
        debug!(url = %url, callback = %guard.name(), "Sending JSONP geocoding request");

        let exchange = async {
            let response = self
                .client
                .get(&url)
                .query(&params)
                .send()
                .await
                .map_err(|e| TransportError::FallbackNetwork(e.to_string()))?;

            let status = response.status();
            if !status.is_success() {
                return Err(TransportError::FallbackStatus(status.as_u16()));
            }

            let body = response
                .text()
                .await
                .map_err(|e| TransportError::FallbackNetwork(e.to_string()))?;
            let payload =
                unwrap_payload(&body, guard.name()).ok_or(TransportError::FallbackPayload)?;
            let parsed: CensusResponse =
                serde_json::from_str(payload).map_err(|e| TransportError::Decode(e.to_string()))?;
            Ok::<_, TransportError>(parsed)
        };

        tokio::time::timeout(
            Duration::from_secs(self.config.fallback_timeout_secs),
            exchange,
        )
        .await
        .map_err(|_| TransportError::FallbackTimeout)?
    }
}

/// Leading part of a response body, for logging
fn snippet(body: &str) -> String {
    body.chars().take(BODY_SNIPPET_LEN).collect()
}

#[async_trait]
impl GeocodingClient for CensusGeocodingClient {
    #[instrument(
        skip(self, input),
        fields(return_type = %options.return_type, search_type = %options.search_type)
    )]
    async fn lookup(
        &self,
        input: &AddressInput,
        options: &GeocodeOptions,
    ) -> Result<AddressMatch, ApiError> {
        let request = PreparedRequest::from_input(input, options.search_type).inspect_err(|e| {
            warn!(status = ?e.status(), error = %e, "Rejected address input");
        })?;

        let response = self.fetch(&request, options).await.map_err(|e| {
            error!(stage = "geocoding", error = %e, detail = ?e, "Geocoding transport failure");
            ApiError::from(e)
        })?;

        let Some(found) = response.into_first_match() else {
            warn!(address = %input, "No geocoding match");
            return Err(ApiError::not_found(NO_MATCH_MESSAGE));
        };

        if let Err(e) = found.require_location() {
            error!(matched = %found.matched_address, "Geocoding match without usable coordinates");
            return Err(e);
        }

        debug!(matched = %found.matched_address, "Geocoded address");
        Ok(found)
    }
}
