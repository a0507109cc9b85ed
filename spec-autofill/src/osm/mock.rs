//! Mock map service for testing without API access.
//!
//! Holds nodes, ways and relations in memory and serves them through the
//! same [`MapService`] interface as the real client.

use std::collections::HashMap;

use super::MapService;
use super::error::{ElementKind, OsmError};
use super::types::{MemberType, OsmMember, OsmNode, OsmRelation, WayGeometry};

/// In-memory map fixture.
#[derive(Debug, Clone, Default)]
pub struct MockOsmClient {
    nodes: HashMap<i64, (f64, f64)>,
    ways: HashMap<i64, Vec<i64>>,
    relations: HashMap<i64, Vec<OsmMember>>,
}

impl MockOsmClient {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a node at `(lat, lon)`.
    pub fn with_node(mut self, id: i64, lat: f64, lon: f64) -> Self {
        self.nodes.insert(id, (lat, lon));
        self
    }

    /// Add a way over previously added nodes.
    pub fn with_way(mut self, id: i64, nodes: Vec<i64>) -> Self {
        self.ways.insert(id, nodes);
        self
    }

    /// Add a relation from `(member type, ref, role)` triples.
    pub fn with_relation(mut self, id: i64, members: Vec<(MemberType, i64, &str)>) -> Self {
        self.relations.insert(
            id,
            members
                .into_iter()
                .map(|(member_type, member_ref, role)| OsmMember {
                    member_type,
                    member_ref,
                    role: role.to_string(),
                })
                .collect(),
        );
        self
    }
}

impl MapService for MockOsmClient {
    async fn node(&self, id: i64) -> Result<OsmNode, OsmError> {
        let (lat, lon) = self.nodes.get(&id).copied().ok_or(OsmError::NotFound {
            kind: ElementKind::Node,
            id,
        })?;
        Ok(OsmNode { id, lat, lon })
    }

    async fn way_full(&self, id: i64) -> Result<WayGeometry, OsmError> {
        let node_order = self.ways.get(&id).cloned().ok_or(OsmError::NotFound {
            kind: ElementKind::Way,
            id,
        })?;

        let mut coords = HashMap::new();
        for node_id in &node_order {
            let (lat, lon) = self
                .nodes
                .get(node_id)
                .copied()
                .ok_or(OsmError::NotFound {
                    kind: ElementKind::Node,
                    id: *node_id,
                })?;
            coords.insert(*node_id, (lat, lon));
        }

        Ok(WayGeometry {
            id,
            node_order,
            coords,
        })
    }

    async fn relation(&self, id: i64) -> Result<OsmRelation, OsmError> {
        let members = self.relations.get(&id).cloned().ok_or(OsmError::NotFound {
            kind: ElementKind::Relation,
            id,
        })?;
        Ok(OsmRelation { id, members })
    }
}
