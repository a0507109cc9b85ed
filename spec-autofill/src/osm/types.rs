//! Wire types for the OSM API 0.6 JSON format.
//!
//! Responses carry a flat `elements` array mixing nodes, ways and
//! relations; `way/{id}/full` returns the way plus one node element per
//! referenced node.

use std::collections::HashMap;

use serde::Deserialize;

/// A full API response.
#[derive(Debug, Clone, Deserialize)]
pub struct OsmResponse {
    #[serde(default)]
    pub elements: Vec<OsmElement>,
}

/// One element of a response.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum OsmElement {
    Node(OsmNode),
    Way(OsmWay),
    Relation(OsmRelation),
}

/// A map node: a single coordinate.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct OsmNode {
    pub id: i64,
    pub lat: f64,
    pub lon: f64,
}

/// A way: an ordered chain of node references.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct OsmWay {
    pub id: i64,
    #[serde(default)]
    pub nodes: Vec<i64>,
}

/// A relation: an ordered group of members.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct OsmRelation {
    pub id: i64,
    #[serde(default)]
    pub members: Vec<OsmMember>,
}

/// One member of a relation.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct OsmMember {
    #[serde(rename = "type")]
    pub member_type: MemberType,
    #[serde(rename = "ref")]
    pub member_ref: i64,
    #[serde(default)]
    pub role: String,
}

/// Member kind within a relation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MemberType {
    Node,
    Way,
    Relation,
}

/// A way digested into its node order plus an id → `(lat, lon)` lookup.
///
/// Node elements in a `full` response are not necessarily in way order;
/// the way's own `nodes` array is authoritative.
#[derive(Debug, Clone, PartialEq)]
pub struct WayGeometry {
    pub id: i64,
    pub node_order: Vec<i64>,
    pub coords: HashMap<i64, (f64, f64)>,
}
