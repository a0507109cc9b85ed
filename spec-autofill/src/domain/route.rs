//! Materialized routes and the encoded-polyline codec.
//!
//! A normalized leg carries `route_coords`: a list of LineString features,
//! each valid for its own time window. Route geometry arrives either as
//! Google encoded polylines on the leg itself or from the routing service.

use serde::{Deserialize, Serialize};

use super::location::LonLat;
use super::time::{self, TimeError};

/// Precision of encoded polylines (Google standard: 5 decimal places).
pub const POLYLINE_PRECISION: u32 = 5;

/// Error from decoding an encoded polyline.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid encoded polyline: {0}")]
pub struct PolylineDecodeError(pub String);

/// Decode an encoded polyline into `[lon, lat]` pairs.
pub fn decode_polyline(encoded: &str) -> Result<Vec<LonLat>, PolylineDecodeError> {
    let line: geo_types::LineString<f64> = polyline::decode_polyline(encoded, POLYLINE_PRECISION)
        .map_err(|e| PolylineDecodeError(e.to_string()))?;
    Ok(line.coords().map(|c| [c.x, c.y]).collect())
}

/// The validity window attached to a route feature.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidityWindow {
    pub valid_start_fmt_date: String,
    pub valid_start_ts: i64,
    pub valid_end_fmt_date: String,
    pub valid_end_ts: i64,
}

impl ValidityWindow {
    /// Build a window from two date strings, deriving the timestamps.
    pub fn from_dates(start_fmt_date: &str, end_fmt_date: &str) -> Result<Self, TimeError> {
        Ok(Self {
            valid_start_fmt_date: start_fmt_date.to_string(),
            valid_start_ts: time::timestamp(start_fmt_date)?,
            valid_end_fmt_date: end_fmt_date.to_string(),
            valid_end_ts: time::timestamp(end_fmt_date)?,
        })
    }
}

/// LineString geometry of a route feature.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineStringGeometry {
    #[serde(rename = "type")]
    pub geometry_type: String,
    pub coordinates: Vec<LonLat>,
}

/// One time-sliced route: a LineString feature with a validity window.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RouteFeature {
    #[serde(rename = "type")]
    pub feature_type: String,
    pub properties: ValidityWindow,
    pub geometry: LineStringGeometry,
}

impl RouteFeature {
    pub fn new(window: ValidityWindow, coordinates: Vec<LonLat>) -> Self {
        Self {
            feature_type: "Feature".to_string(),
            properties: window,
            geometry: LineStringGeometry {
                geometry_type: "LineString".to_string(),
                coordinates,
            },
        }
    }

    pub fn coordinates(&self) -> &[LonLat] {
        &self.geometry.coordinates
    }
}

/// An encoded polyline valid for an explicit time window.
///
/// Both dates are required; time-sliced polylines never fall back to the
/// trip's default window.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimedPolyline {
    pub valid_start_fmt_date: String,
    pub valid_end_fmt_date: String,
    pub polyline: String,
}
