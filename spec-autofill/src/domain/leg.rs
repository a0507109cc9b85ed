//! Trip legs and travel modes.
//!
//! A `Leg` is one mode-homogeneous segment of a trip. User-authored legs
//! carry endpoints and a route source (`polyline` / `polylines`);
//! synthesized shim legs carry only an anchor location `loc`. The same
//! struct covers both shapes since the filled document mixes them in one
//! leg list.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::location::{Location, Stops};
use super::route::{RouteFeature, TimedPolyline};

/// Travel mode of a leg.
///
/// `Stopped` is only used by synthesized WAITING shims; it never appears on
/// user-authored legs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TravelMode {
    Car,
    Walking,
    Bicycling,
    Bus,
    Train,
    LightRail,
    Subway,
    Stopped,
}

impl TravelMode {
    /// The document spelling of this mode.
    pub fn as_str(&self) -> &'static str {
        match self {
            TravelMode::Car => "CAR",
            TravelMode::Walking => "WALKING",
            TravelMode::Bicycling => "BICYCLING",
            TravelMode::Bus => "BUS",
            TravelMode::Train => "TRAIN",
            TravelMode::LightRail => "LIGHT_RAIL",
            TravelMode::Subway => "SUBWAY",
            TravelMode::Stopped => "STOPPED",
        }
    }

    pub fn is_walking(&self) -> bool {
        matches!(self, TravelMode::Walking)
    }

    /// OSRM profile for this mode, or `None` when the routing service does
    /// not support it (rail modes, stopped).
    pub fn osrm_profile(&self) -> Option<&'static str> {
        match self {
            TravelMode::Car | TravelMode::Bus => Some("driving"),
            TravelMode::Walking => Some("walking"),
            TravelMode::Bicycling => Some("cycling"),
            TravelMode::Train | TravelMode::LightRail | TravelMode::Subway | TravelMode::Stopped => {
                None
            }
        }
    }
}

impl fmt::Display for TravelMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Kind of leg in a filled trip.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LegType {
    /// A user-authored travel segment
    Travel,
    /// Walk to/from a parked vehicle at a trip boundary
    Access,
    /// Walk between vehicles at an internal boundary
    Transfer,
    /// Wait for a shared vehicle
    Waiting,
}

/// One segment of travel.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Leg {
    pub id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub mode: TravelMode,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub leg_type: Option<LegType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_loc: Option<Stops>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_loc: Option<Stops>,
    /// Anchor location(s) of a shim leg.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub loc: Option<Vec<Location>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub multiple_occupancy: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub polyline: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub polylines: Option<Vec<TimedPolyline>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub route_coords: Option<Vec<RouteFeature>>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Leg {
    /// A synthesized shim leg anchored at `loc`.
    pub fn shim(
        id: impl Into<String>,
        leg_type: LegType,
        mode: TravelMode,
        name: impl Into<String>,
        loc: Vec<Location>,
    ) -> Self {
        Self {
            id: id.into(),
            name: Some(name.into()),
            mode,
            leg_type: Some(leg_type),
            start_loc: None,
            end_loc: None,
            loc: Some(loc),
            multiple_occupancy: None,
            polyline: None,
            polylines: None,
            route_coords: None,
            extra: Map::new(),
        }
    }

    pub fn is_multiple_occupancy(&self) -> bool {
        self.multiple_occupancy == Some(true)
    }
}
