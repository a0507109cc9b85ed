//! The top-level spec document.
//!
//! The document is read once, pushed through four fill passes and written
//! back out. All structs flatten unrecognized keys into an `extra` map so
//! the output keeps whatever else the author put in the file.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::leg::{Leg, TravelMode};
use super::location::{Location, LonLat};

/// The geographic region under evaluation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Region {
    /// IANA timezone name, e.g. `America/Los_Angeles`
    pub timezone: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// A travel-evaluation specification document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpecDocument {
    pub region: Region,
    pub start_fmt_date: String,
    pub end_fmt_date: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_ts: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_ts: Option<i64>,
    #[serde(default)]
    pub calibration_tests: Vec<CalibrationTest>,
    #[serde(default)]
    pub evaluation_trips: Vec<TripSpec>,
    #[serde(default)]
    pub sensing_settings: Vec<SensingSetting>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// A pre-declared multi-leg trip.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Trip {
    pub id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub legs: Vec<Leg>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// An evaluation trip as authored.
///
/// Trips with an explicit `legs` list are multi-leg; trips without one are
/// implicit single-leg trips whose leg fields sit at the trip level. After
/// filling, every trip is in the multi-leg form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TripSpec {
    MultiLeg(Trip),
    SingleLeg(Leg),
}

impl TripSpec {
    pub fn id(&self) -> &str {
        match self {
            TripSpec::MultiLeg(t) => &t.id,
            TripSpec::SingleLeg(l) => &l.id,
        }
    }
}

/// A standalone route used to validate sensing accuracy.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalibrationTest {
    pub id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mode: Option<TravelMode>,
    /// On input, a `{ "id": ... }` reference into the sensing-configuration
    /// catalog; replaced by the full configuration body when filled.
    pub config: Value,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_loc: Option<Location>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_loc: Option<Location>,
    /// OSM node ids of intermediate route waypoints.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub route_waypoints: Option<Vec<i64>>,
    /// Pre-supplied waypoint coordinates as a polygon feature.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub waypoint_coords: Option<Location>,
    /// Route along an OSM relation between two of its nodes.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub relation_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_node: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_node: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub route_coords: Option<Vec<LonLat>>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Per-phone-OS comparison of sensing configurations.
pub type SensingSetting = BTreeMap<String, PhoneComparison>;

/// A comparison entry: a bare id list on input, expanded on output.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PhoneComparison {
    Expanded(ComparisonSetting),
    Ids(Vec<String>),
}

/// An expanded comparison with full configuration bodies.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComparisonSetting {
    pub compare: Vec<String>,
    pub name: String,
    pub sensing_configs: Vec<Value>,
}
