//! OSM API 0.6 HTTP client.
//!
//! Thin wrapper over the public editing API's read endpoints. Requests are
//! issued one at a time by the pipeline; there is no caching, so resolving
//! the same node twice re-issues the call.

use tracing::debug;

use super::MapService;
use super::error::{ElementKind, OsmError};
use super::types::{OsmElement, OsmNode, OsmRelation, OsmResponse, WayGeometry};

/// Default base URL for the OSM API.
const DEFAULT_BASE_URL: &str = "https://api.openstreetmap.org/api/0.6";

/// Configuration for the OSM client.
#[derive(Debug, Clone)]
pub struct OsmConfig {
    /// Base URL for the API (defaults to the public OSM API)
    pub base_url: String,
    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl OsmConfig {
    pub fn new() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_secs: 30,
        }
    }

    /// Set a custom base URL (for testing).
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

impl Default for OsmConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// OSM API client.
#[derive(Debug, Clone)]
pub struct OsmClient {
    http: reqwest::Client,
    base_url: String,
}

impl OsmClient {
    /// Create a new client with the given configuration.
    pub fn new(config: OsmConfig) -> Result<Self, OsmError> {
        // The public API rejects requests without a User-Agent
        let http = reqwest::Client::builder()
            .user_agent(concat!("spec-autofill/", env!("CARGO_PKG_VERSION")))
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            http,
            base_url: config.base_url,
        })
    }

    async fn fetch(
        &self,
        path: &str,
        kind: ElementKind,
        id: i64,
    ) -> Result<OsmResponse, OsmError> {
        let url = format!("{}/{}", self.base_url, path);
        debug!("GET {url}");

        let response = self.http.get(&url).send().await?;
        let status = response.status();

        if status == reqwest::StatusCode::NOT_FOUND || status == reqwest::StatusCode::GONE {
            return Err(OsmError::NotFound { kind, id });
        }

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(OsmError::Api {
                status: status.as_u16(),
                message: body,
            });
        }

        let body = response.text().await?;

        serde_json::from_str(&body).map_err(|e| OsmError::Json {
            message: e.to_string(),
            body: Some(body.chars().take(500).collect()),
        })
    }
}

impl MapService for OsmClient {
    async fn node(&self, id: i64) -> Result<OsmNode, OsmError> {
        let resp = self
            .fetch(&format!("node/{id}.json"), ElementKind::Node, id)
            .await?;

        resp.elements
            .into_iter()
            .find_map(|e| match e {
                OsmElement::Node(n) if n.id == id => Some(n),
                _ => None,
            })
            .ok_or_else(|| OsmError::Json {
                message: format!("node {id} missing from response"),
                body: None,
            })
    }

    async fn way_full(&self, id: i64) -> Result<WayGeometry, OsmError> {
        let resp = self
            .fetch(&format!("way/{id}/full.json"), ElementKind::Way, id)
            .await?;

        let mut coords = std::collections::HashMap::new();
        let mut node_order = None;
        for element in resp.elements {
            match element {
                OsmElement::Node(n) => {
                    coords.insert(n.id, (n.lat, n.lon));
                }
                OsmElement::Way(w) if w.id == id => node_order = Some(w.nodes),
                _ => {}
            }
        }

        let node_order = node_order.ok_or_else(|| OsmError::Json {
            message: format!("way {id} missing from response"),
            body: None,
        })?;

        Ok(WayGeometry {
            id,
            node_order,
            coords,
        })
    }

    async fn relation(&self, id: i64) -> Result<OsmRelation, OsmError> {
        let resp = self
            .fetch(&format!("relation/{id}.json"), ElementKind::Relation, id)
            .await?;

        resp.elements
            .into_iter()
            .find_map(|e| match e {
                OsmElement::Relation(r) if r.id == id => Some(r),
                _ => None,
            })
            .ok_or_else(|| OsmError::Json {
                message: format!("relation {id} missing from response"),
                body: None,
            })
    }
}
