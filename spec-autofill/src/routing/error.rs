//! Routing client error types.

use crate::domain::{PolylineDecodeError, TravelMode};

/// Errors from the routing service.
#[derive(Debug, thiserror::Error)]
pub enum RoutingError {
    /// HTTP request failed (network error, timeout, etc.)
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// JSON deserialization failed
    #[error("JSON parse error: {message}")]
    Json { message: String },

    /// The routing service has no profile for this mode
    #[error("routing does not support mode {0}")]
    UnsupportedMode(TravelMode),

    /// The service answered but found no route
    #[error("no route found ({code}): {message}")]
    NoRoute { code: String, message: String },

    /// The route geometry could not be decoded
    #[error("failed to decode route geometry: {0}")]
    Geometry(#[from] PolylineDecodeError),
}
