//! Astronomy Picture of the Day API client
//!
//! Fetches the daily picture record from api.nasa.gov, consulting the disk
//! cache first so repeat launches within the TTL window never hit the
//! network.

use reqwest::Client;
use thiserror::Error;

use super::Apod;
use crate::cache::CacheStore;

/// Base URL for the APOD API
const APOD_BASE_URL: &str = "https://api.nasa.gov/planetary/apod";

/// Cache key for the daily record
const CACHE_KEY: &str = "apod";

/// Errors that can occur when fetching the picture of the day
#[derive(Debug, Error)]
pub enum ApodError {
    /// HTTP request failed
    #[error("HTTP request failed: {0}")]
    RequestFailed(#[from] reqwest::Error),

    /// The API answered with a non-success status
    #[error("unexpected HTTP status: {0}")]
    Status(reqwest::StatusCode),

    /// Failed to parse the JSON response
    #[error("Failed to parse APOD response: {0}")]
    ParseError(#[from] serde_json::Error),
}

/// Client for fetching the Astronomy Picture of the Day
#[derive(Debug, Clone)]
pub struct ApodClient {
    /// HTTP client for making requests
    http_client: Client,
    /// Cache store for persisting responses
    cache: Option<CacheStore>,
    /// Base URL for the API (allows override for testing)
    base_url: String,
    /// API key sent with every request
    api_key: String,
}

impl ApodClient {
    /// Creates a new ApodClient with the default cache location
    #[allow(dead_code)]
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            http_client: Client::new(),
            cache: CacheStore::new(),
            base_url: APOD_BASE_URL.to_string(),
            api_key: api_key.into(),
        }
    }

    /// Creates a new ApodClient with a specific cache store (or none)
    pub fn with_cache(api_key: impl Into<String>, cache: Option<CacheStore>) -> Self {
        Self {
            http_client: Client::new(),
            cache,
            base_url: APOD_BASE_URL.to_string(),
            api_key: api_key.into(),
        }
    }

    /// Creates a new ApodClient with a custom base URL (for testing)
    #[cfg(test)]
    pub fn with_base_url(base_url: String, cache: Option<CacheStore>) -> Self {
        Self {
            http_client: Client::new(),
            cache,
            base_url,
            api_key: "DEMO_KEY".to_string(),
        }
    }

    /// Fetches the picture of the day
    ///
    /// # Returns
    /// * `Ok(Apod)` - Today's record, from cache or the network
    /// * `Err(ApodError)` - If the request fails and nothing fresh is cached
    ///
    /// # Behavior
    /// - A fresh cache entry under `"apod"` short-circuits the network call
    /// - On a miss, issues one GET, validates the status, parses the JSON
    /// - Successful responses are cached regardless of media type; the
    ///   renderer decides how to present non-image records
    pub async fn fetch_apod(&self) -> Result<Apod, ApodError> {
        if let Some(ref cache) = self.cache {
            if let Some(apod) = cache.get::<Apod>(CACHE_KEY) {
                return Ok(apod);
            }
        }

        let apod = self.fetch_from_api().await?;

        if let Some(ref cache) = self.cache {
            if let Err(err) = cache.set(CACHE_KEY, &apod) {
                log::warn!("failed to cache APOD response: {err}");
            }
        }

        Ok(apod)
    }

    /// Fetches the record directly from the API
    async fn fetch_from_api(&self) -> Result<Apod, ApodError> {
        let url = format!("{}?api_key={}", self.base_url, self.api_key);

        let response = self.http_client.get(&url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(ApodError::Status(status));
        }

        let text = response.text().await?;
        let apod: Apod = serde_json::from_str(&text)?;
        Ok(apod)
    }
}
