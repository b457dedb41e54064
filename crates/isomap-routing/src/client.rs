//! HTTP client for the reachable-range routing endpoint.
//!
//! Wraps `reqwest` with subscription-key handling, request validation and
//! status classification. Every call is a single GET: no caching, no retry.

use std::time::Duration;

use isomap_core::{
    AppConfig, LatLng, Ring, DEFAULT_ROUTING_API_VERSION, DEFAULT_ROUTING_BASE_URL,
    DEFAULT_USER_AGENT,
};
use reqwest::{Client, Url};

use crate::error::FetchError;
use crate::normalize::normalize;
use crate::types::ReachableRangeResponse;

const RANGE_PATH: &str = "route/range/json";

/// Client for the reachable-range API.
///
/// Use [`RoutingClient::from_app_config`] in the application or
/// [`RoutingClient::with_base_url`] to point at a mock server in tests.
pub struct RoutingClient {
    client: Client,
    subscription_key: String,
    endpoint: Url,
    api_version: String,
}

impl std::fmt::Debug for RoutingClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RoutingClient")
            .field("subscription_key", &"[redacted]")
            .field("endpoint", &self.endpoint.as_str())
            .field("api_version", &self.api_version)
            .finish_non_exhaustive()
    }
}

impl RoutingClient {
    /// Creates a client pointed at the production routing host.
    ///
    /// The key is not validated here; an empty key surfaces as
    /// [`FetchError::Auth`] on the first fetch.
    ///
    /// # Errors
    ///
    /// Returns [`FetchError::Transport`] if the underlying `reqwest::Client`
    /// cannot be constructed.
    pub fn new(subscription_key: &str, timeout_secs: u64) -> Result<Self, FetchError> {
        Self::with_base_url(subscription_key, timeout_secs, DEFAULT_ROUTING_BASE_URL)
    }

    /// Creates a client with a custom base URL (for testing with wiremock).
    ///
    /// # Errors
    ///
    /// Returns [`FetchError::Transport`] if the `reqwest::Client` cannot be
    /// built, or [`FetchError::InvalidBaseUrl`] if `base_url` does not parse.
    pub fn with_base_url(
        subscription_key: &str,
        timeout_secs: u64,
        base_url: &str,
    ) -> Result<Self, FetchError> {
        Self::build(
            subscription_key,
            timeout_secs,
            base_url,
            DEFAULT_ROUTING_API_VERSION,
            DEFAULT_USER_AGENT,
        )
    }

    /// Creates a client from the loaded application configuration.
    ///
    /// A missing subscription key yields a client whose fetches fail with
    /// [`FetchError::Auth`], so the caller can still render the fallback
    /// polygon.
    ///
    /// # Errors
    ///
    /// Same as [`RoutingClient::with_base_url`].
    pub fn from_app_config(config: &AppConfig) -> Result<Self, FetchError> {
        Self::build(
            config.routing_subscription_key.as_deref().unwrap_or_default(),
            config.request_timeout_secs,
            &config.routing_base_url,
            &config.routing_api_version,
            &config.user_agent,
        )
    }

    fn build(
        subscription_key: &str,
        timeout_secs: u64,
        base_url: &str,
        api_version: &str,
        user_agent: &str,
    ) -> Result<Self, FetchError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(user_agent)
            .build()
            .map_err(FetchError::transport)?;

        // Exactly one trailing slash, otherwise `join` replaces the last
        // path segment of the base.
        let normalised = format!("{}/", base_url.trim_end_matches('/'));
        let endpoint = Url::parse(&normalised)
            .and_then(|base| base.join(RANGE_PATH))
            .map_err(|e| FetchError::InvalidBaseUrl {
                url: base_url.to_string(),
                reason: e.to_string(),
            })?;

        Ok(Self {
            client,
            subscription_key: subscription_key.trim().to_owned(),
            endpoint,
            api_version: api_version.to_owned(),
        })
    }

    /// Fetches the isochrone around `origin` and returns it as a closed ring.
    ///
    /// # Errors
    ///
    /// - [`FetchError::Auth`] if no subscription key is configured; no
    ///   request is sent.
    /// - [`FetchError::InvalidRequest`] for an out-of-range origin or a zero
    ///   time budget; no request is sent.
    /// - [`FetchError::HttpStatus`] on a non-2xx response.
    /// - [`FetchError::Deserialize`] if the body is not the expected JSON.
    /// - [`FetchError::Data`] if the boundary is missing or degenerate.
    /// - [`FetchError::Transport`] on network failure or timeout.
    pub async fn fetch_isochrone(
        &self,
        origin: LatLng,
        time_budget_secs: u32,
    ) -> Result<Ring, FetchError> {
        let response = self.fetch_reachable_range(origin, time_budget_secs).await?;
        let ring = normalize(&response)?;
        tracing::info!(
            %origin,
            time_budget_secs,
            points = ring.len(),
            "isochrone fetched"
        );
        Ok(ring)
    }

    /// Fetches the raw reachable-range payload without normalizing it.
    ///
    /// # Errors
    ///
    /// Same as [`RoutingClient::fetch_isochrone`] except
    /// [`FetchError::Data`].
    pub async fn fetch_reachable_range(
        &self,
        origin: LatLng,
        time_budget_secs: u32,
    ) -> Result<ReachableRangeResponse, FetchError> {
        if self.subscription_key.is_empty() {
            return Err(FetchError::Auth);
        }
        if time_budget_secs == 0 {
            return Err(FetchError::InvalidRequest(
                "time budget must be greater than zero".to_string(),
            ));
        }
        let origin = LatLng::new(origin.lat, origin.lng)
            .map_err(|e| FetchError::InvalidRequest(e.to_string()))?;

        tracing::debug!(%origin, time_budget_secs, "requesting reachable range");

        let url = self.build_url(origin, time_budget_secs);
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(FetchError::transport)?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::HttpStatus {
                status: status.as_u16(),
            });
        }

        let body = response.text().await.map_err(FetchError::transport)?;
        serde_json::from_str(&body).map_err(|e| FetchError::Deserialize { source: e })
    }

    /// Builds the request URL with percent-encoded query parameters.
    fn build_url(&self, origin: LatLng, time_budget_secs: u32) -> Url {
        let mut url = self.endpoint.clone();
        url.query_pairs_mut()
            .append_pair("subscription-key", &self.subscription_key)
            .append_pair("api-version", &self.api_version)
            .append_pair("query", &origin.to_string())
            .append_pair("timeBudgetInSec", &time_budget_secs.to_string());
        url
    }
}

#[cfg(test)]
#[path = "client_test.rs"]
mod tests;
