//! OSRM HTTP client.
//!
//! Requests the full route geometry as an encoded polyline
//! (`overview=full&geometries=polyline&steps=false`) and decodes it to
//! `[lon, lat]` pairs.

use serde::Deserialize;
use tracing::debug;

use crate::domain::{self, LonLat, TravelMode};

use super::RouteService;
use super::error::RoutingError;

/// Default base URL: the public OSRM demo server.
const DEFAULT_BASE_URL: &str = "https://router.project-osrm.org";

/// Configuration for the OSRM client.
#[derive(Debug, Clone)]
pub struct OsrmConfig {
    /// Base URL for the routing server
    pub base_url: String,
    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl OsrmConfig {
    pub fn new() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_secs: 30,
        }
    }

    /// Set a custom base URL (for testing or a self-hosted server).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Set request timeout.
    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }
}

impl Default for OsrmConfig {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug, Deserialize)]
struct RouteResponse {
    code: String,
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    routes: Vec<OsrmRoute>,
}

#[derive(Debug, Deserialize)]
struct OsrmRoute {
    geometry: String,
}

/// OSRM routing client.
#[derive(Debug, Clone)]
pub struct OsrmClient {
    http: reqwest::Client,
    base_url: String,
}

impl OsrmClient {
    /// Create a new client with the given configuration.
    pub fn new(config: OsrmConfig) -> Result<Self, RoutingError> {
        let http = reqwest::Client::builder()
            .user_agent(concat!("spec-autofill/", env!("CARGO_PKG_VERSION")))
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            http,
            base_url: config.base_url,
        })
    }
}

impl RouteService for OsrmClient {
    async fn route(
        &self,
        mode: TravelMode,
        waypoints: &[LonLat],
    ) -> Result<Vec<LonLat>, RoutingError> {
        let profile = mode
            .osrm_profile()
            .ok_or(RoutingError::UnsupportedMode(mode))?;

        let coord_path = waypoints
            .iter()
            .map(|c| format!("{},{}", c[0], c[1]))
            .collect::<Vec<_>>()
            .join(";");
        let url = format!("{}/route/v1/{}/{}", self.base_url, profile, coord_path);
        debug!("GET {url}");

        let response = self
            .http
            .get(&url)
            .query(&[
                ("overview", "full"),
                ("geometries", "polyline"),
                ("steps", "false"),
            ])
            .send()
            .await?;

        let body = response.text().await?;
        let parsed: RouteResponse =
            serde_json::from_str(&body).map_err(|e| RoutingError::Json {
                message: e.to_string(),
            })?;

        if parsed.code != "Ok" {
            return Err(RoutingError::NoRoute {
                code: parsed.code,
                message: parsed.message.unwrap_or_default(),
            });
        }

        let route = parsed.routes.into_iter().next().ok_or(RoutingError::NoRoute {
            code: "Ok".to_string(),
            message: "response contained no routes".to_string(),
        })?;

        Ok(domain::decode_polyline(&route.geometry)?)
    }
}
