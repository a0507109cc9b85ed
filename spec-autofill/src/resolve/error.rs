//! Resolution error types.

use crate::osm::OsmError;
use crate::routing::RoutingError;

/// Errors from geographic resolution.
#[derive(Debug, thiserror::Error)]
pub enum ResolveError {
    /// Map database failure (includes missing features)
    #[error(transparent)]
    Map(#[from] OsmError),

    /// Routing service failure (includes unsupported modes)
    #[error(transparent)]
    Routing(#[from] RoutingError),

    /// A relation contained a nested relation member
    #[error("relation {relation_id} has nested relation member {member_ref}, expecting only ways")]
    Shape { relation_id: i64, member_ref: i64 },

    /// Start node appears after end node in the resolved relation
    #[error("relation {relation_id}: start node {start_node} appears after end node {end_node}")]
    Order {
        relation_id: i64,
        start_node: i64,
        end_node: i64,
    },

    /// A requested segment endpoint is not part of the relation
    #[error("relation {relation_id} does not contain node {node}")]
    NodeNotInRelation { relation_id: i64, node: i64 },

    /// A location has neither an osm_id nor explicit coordinates
    #[error("location {name:?} does not have either an osm_id or a set of coordinates")]
    MissingLocationData { name: Option<String> },
}
