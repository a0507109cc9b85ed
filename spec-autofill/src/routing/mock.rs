//! Mock route service for testing without a routing server.

use crate::domain::{LonLat, TravelMode};

use super::RouteService;
use super::error::RoutingError;

/// Echoes the requested waypoints back as the route.
///
/// Applies the same mode support check as the real client, so tests see
/// `UnsupportedMode` for rail modes.
#[derive(Debug, Clone, Default)]
pub struct MockRouter;

impl MockRouter {
    pub fn new() -> Self {
        Self
    }
}

impl RouteService for MockRouter {
    async fn route(
        &self,
        mode: TravelMode,
        waypoints: &[LonLat],
    ) -> Result<Vec<LonLat>, RoutingError> {
        mode.osrm_profile()
            .ok_or(RoutingError::UnsupportedMode(mode))?;
        Ok(waypoints.to_vec())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn echoes_waypoints() {
        let router = MockRouter::new();
        let route = router
            .route(TravelMode::Car, &[[0.0, 0.0], [1.0, 2.0]])
            .await
            .unwrap();
        assert_eq!(route, vec![[0.0, 0.0], [1.0, 2.0]]);
    }

    #[tokio::test]
    async fn rejects_rail_modes() {
        let router = MockRouter::new();
        assert!(matches!(
            router.route(TravelMode::Subway, &[[0.0, 0.0]]).await,
            Err(RoutingError::UnsupportedMode(TravelMode::Subway))
        ));
    }
}
