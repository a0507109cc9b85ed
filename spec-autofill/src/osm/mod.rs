//! OpenStreetMap data access.
//!
//! The autofiller reads nodes, ways and relations from the OSM editing API.
//! [`MapService`] is the seam: the real [`OsmClient`] talks HTTP, the
//! [`MockOsmClient`] serves in-memory fixtures for tests.

mod client;
mod error;
mod mock;
mod types;

pub use client::{OsmClient, OsmConfig};
pub use error::{ElementKind, OsmError};
pub use mock::MockOsmClient;
pub use types::{MemberType, OsmMember, OsmNode, OsmRelation, OsmWay, WayGeometry};

/// Read access to map features.
#[allow(async_fn_in_trait)]
pub trait MapService {
    /// Fetch a single node.
    async fn node(&self, id: i64) -> Result<OsmNode, OsmError>;

    /// Fetch a way together with the coordinates of all its nodes.
    async fn way_full(&self, id: i64) -> Result<WayGeometry, OsmError>;

    /// Fetch a relation and its member list.
    async fn relation(&self, id: i64) -> Result<OsmRelation, OsmError>;
}
