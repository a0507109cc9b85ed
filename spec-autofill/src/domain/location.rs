//! Geographic locations.
//!
//! A `Location` is a GeoJSON-like feature: a point or polygon with
//! properties carrying a display name, an optional OSM feature id and the
//! temporal validity window filled in by the annotator. Coordinates are
//! `[longitude, latitude]` pairs.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A `[longitude, latitude]` coordinate pair.
pub type LonLat = [f64; 2];

/// Feature geometry. A location is either a single point or a polygon ring.
///
/// `coordinates` may be absent on input when the feature carries an
/// `osm_id`; resolution fills them in.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Geometry {
    Point {
        #[serde(skip_serializing_if = "Option::is_none")]
        coordinates: Option<LonLat>,
    },
    Polygon {
        #[serde(skip_serializing_if = "Option::is_none")]
        coordinates: Option<Vec<LonLat>>,
    },
}

/// Feature properties. Unknown keys are preserved in `extra`.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct LocationProperties {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub osm_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub valid_start_fmt_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub valid_start_ts: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub valid_end_fmt_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub valid_end_ts: Option<i64>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// A geographic feature with properties and geometry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Location {
    #[serde(rename = "type", default = "feature_tag")]
    pub feature_type: String,
    #[serde(default)]
    pub properties: LocationProperties,
    pub geometry: Geometry,
}

fn feature_tag() -> String {
    "Feature".to_string()
}

impl Location {
    /// A named point feature with explicit coordinates.
    pub fn named_point(name: impl Into<String>, coordinates: LonLat) -> Self {
        Self {
            feature_type: feature_tag(),
            properties: LocationProperties {
                name: Some(name.into()),
                ..LocationProperties::default()
            },
            geometry: Geometry::Point {
                coordinates: Some(coordinates),
            },
        }
    }

    /// A named point feature whose coordinates come from an OSM node.
    pub fn with_osm_id(name: impl Into<String>, osm_id: i64) -> Self {
        Self {
            feature_type: feature_tag(),
            properties: LocationProperties {
                name: Some(name.into()),
                osm_id: Some(osm_id),
                ..LocationProperties::default()
            },
            geometry: Geometry::Point { coordinates: None },
        }
    }

    /// The display name, if one is set.
    pub fn display_name(&self) -> Option<&str> {
        self.properties.name.as_deref()
    }

    /// The point coordinates, for point features that have them.
    pub fn point_coordinates(&self) -> Option<LonLat> {
        match &self.geometry {
            Geometry::Point { coordinates } => *coordinates,
            Geometry::Polygon { .. } => None,
        }
    }

    /// True when the geometry carries explicit coordinates.
    pub fn has_coordinates(&self) -> bool {
        match &self.geometry {
            Geometry::Point { coordinates } => coordinates.is_some(),
            Geometry::Polygon { coordinates } => coordinates.is_some(),
        }
    }
}

/// A location field that may be a single stop or a list of stops.
///
/// Multi-stop fields appear on transit legs whose ground truth covers
/// several adjacent stops. Consumers go through [`Stops::as_slice`] so both
/// shapes are handled uniformly.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Stops {
    One(Box<Location>),
    Many(Vec<Location>),
}

impl Stops {
    pub fn as_slice(&self) -> &[Location] {
        match self {
            Stops::One(loc) => std::slice::from_ref(loc.as_ref()),
            Stops::Many(locs) => locs,
        }
    }

    pub fn into_vec(self) -> Vec<Location> {
        match self {
            Stops::One(loc) => vec![*loc],
            Stops::Many(locs) => locs,
        }
    }
}

impl From<Location> for Stops {
    fn from(loc: Location) -> Self {
        Stops::One(Box::new(loc))
    }
}

impl From<Vec<Location>> for Stops {
    fn from(locs: Vec<Location>) -> Self {
        Stops::Many(locs)
    }
}
