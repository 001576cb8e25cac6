//! Nominatim geocoding client
//!
//! This module provides HTTP client functionality for the public Nominatim
//! search endpoint: wire types, the structured (city + street filter) query
//! and the free-text fallback query. Transient failures are retried with
//! exponential backoff; every failure surfaces as a recoverable network
//! error to the caller.

use std::time::Duration;

use reqwest::Client;
use reqwest_middleware::{ClientBuilder, ClientWithMiddleware};
use reqwest_retry::{RetryTransientMiddleware, policies::ExponentialBackoff};
use serde::Deserialize;
use tracing::{debug, info, warn};

use crate::LavandaError;
use crate::config::GeocodingConfig;
use crate::models::ParsedAddress;

/// Nominatim search API client
pub struct NominatimClient {
    client: ClientWithMiddleware,
    config: GeocodingConfig,
}

/// One candidate from the Nominatim search response (`format=jsonv2`)
#[derive(Debug, Clone, Deserialize)]
pub struct NominatimPlace {
    /// Latitude, returned by the service as a string
    pub lat: String,
    /// Longitude, returned by the service as a string
    pub lon: String,
    pub display_name: String,
    /// Record type, e.g. "house", "residential"
    #[serde(rename = "type")]
    pub place_type: Option<String>,
    #[serde(default)]
    pub address: NominatimAddress,
}

/// Address detail object attached to a candidate (`addressdetails=1`)
#[derive(Debug, Clone, Default, Deserialize)]
pub struct NominatimAddress {
    pub house_number: Option<String>,
    pub road: Option<String>,
    pub pedestrian: Option<String>,
    pub footway: Option<String>,
    pub residential: Option<String>,
    pub suburb: Option<String>,
    pub neighbourhood: Option<String>,
    pub city_district: Option<String>,
    pub quarter: Option<String>,
    pub city: Option<String>,
    pub town: Option<String>,
}

impl NominatimPlace {
    /// Parse the string-typed coordinates; `None` when the service sent junk
    #[must_use]
    pub fn coordinates(&self) -> Option<(f64, f64)> {
        let lat = self.lat.parse::<f64>().ok()?;
        let lon = self.lon.parse::<f64>().ok()?;
        Some((lat, lon))
    }

    /// Best available roadway name, falling through the alternate fields
    #[must_use]
    pub fn road_name(&self) -> Option<&str> {
        self.address
            .road
            .as_deref()
            .or(self.address.pedestrian.as_deref())
            .or(self.address.footway.as_deref())
            .or(self.address.residential.as_deref())
    }

    /// Best available neighbourhood name, falling through the alternate fields
    #[must_use]
    pub fn neighbourhood_name(&self) -> Option<&str> {
        self.address
            .suburb
            .as_deref()
            .or(self.address.neighbourhood.as_deref())
            .or(self.address.city_district.as_deref())
            .or(self.address.quarter.as_deref())
    }
}

impl NominatimClient {
    /// Create a new client with timeout and retry middleware
    pub fn new(config: &GeocodingConfig) -> Result<Self, LavandaError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds.into()))
            .user_agent("Lavanda/0.1.0")
            .build()
            .map_err(|e| LavandaError::network(format!("Failed to create HTTP client: {e}")))?;

        let retry_policy =
            ExponentialBackoff::builder().build_with_max_retries(config.max_retries);
        let client = ClientBuilder::new(client)
            .with(RetryTransientMiddleware::new_with_policy(retry_policy))
            .build();

        Ok(Self {
            client,
            config: config.clone(),
        })
    }

    /// Structured query: city-restricted with a street filter
    pub async fn search_structured(
        &self,
        parsed: &ParsedAddress,
    ) -> Result<Vec<NominatimPlace>, LavandaError> {
        let street = parsed.street_filter();
        info!("Structured geocoding query for street '{}'", street);

        let url = format!(
            "{}/search?format=jsonv2&addressdetails=1&limit={}&accept-language={}&countrycodes={}&city={}&street={}",
            self.config.base_url,
            self.config.result_limit,
            self.config.language,
            self.config.country_code,
            urlencoding::encode(&self.config.city),
            urlencoding::encode(&street),
        );

        self.fetch(&url).await
    }

    /// Free-text fallback query: "{street} {number}, {city}, {country}"
    pub async fn search_freeform(
        &self,
        parsed: &ParsedAddress,
    ) -> Result<Vec<NominatimPlace>, LavandaError> {
        let q = format!(
            "{}, {}, {}",
            parsed.street_filter(),
            self.config.city,
            self.config.country
        );
        info!("Free-text geocoding fallback for '{}'", q);

        let url = format!(
            "{}/search?format=jsonv2&addressdetails=1&limit={}&accept-language={}&countrycodes={}&q={}",
            self.config.base_url,
            self.config.result_limit,
            self.config.language,
            self.config.country_code,
            urlencoding::encode(&q),
        );

        self.fetch(&url).await
    }

    async fn fetch(&self, url: &str) -> Result<Vec<NominatimPlace>, LavandaError> {
        debug!("Geocoding request URL: {}", url);

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| LavandaError::network(format!("Geocoding request failed: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            warn!("Geocoding service returned HTTP {}", status);
            return Err(LavandaError::network(format!(
                "Geocoding service returned HTTP {status}"
            )));
        }

        let places: Vec<NominatimPlace> = response.json().await.map_err(|e| {
            LavandaError::network(format!("Failed to parse geocoding response: {e}"))
        })?;

        info!("Geocoding returned {} candidates", places.len());
        Ok(places)
    }
}
