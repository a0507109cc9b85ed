//! Route computation between waypoints.
//!
//! [`RouteService`] is the seam between the pipeline and the routing
//! backend. The real [`OsrmClient`] calls an OSRM HTTP server; the
//! [`MockRouter`] echoes waypoints back for tests. Rail modes are not
//! routable and fail with [`RoutingError::UnsupportedMode`].

mod client;
mod error;
mod mock;

pub use client::{OsrmClient, OsrmConfig};
pub use error::RoutingError;
pub use mock::MockRouter;

use crate::domain::{LonLat, TravelMode};

/// Route computation over an ordered list of waypoints.
#[allow(async_fn_in_trait)]
pub trait RouteService {
    /// Compute an ordered coordinate sequence visiting `waypoints` in order.
    async fn route(
        &self,
        mode: TravelMode,
        waypoints: &[LonLat],
    ) -> Result<Vec<LonLat>, RoutingError>;
}
