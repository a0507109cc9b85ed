//! Calibration test filling.
//!
//! The second pass: resolves each test's endpoint geometry against the map
//! service, swaps its configuration reference for the full body, and
//! materializes its route when the test describes one.

use serde_json::Value;
use tracing::info;

use crate::domain::{CalibrationTest, SpecDocument};
use crate::osm::MapService;
use crate::resolve::GeometryResolver;
use crate::routing::RouteService;

use super::AutofillError;
use super::sensing::SensingCatalog;

pub async fn fill_calibration_tests<M: MapService, R: RouteService>(
    mut doc: SpecDocument,
    resolver: &GeometryResolver<M, R>,
    catalog: &SensingCatalog,
) -> Result<SpecDocument, AutofillError> {
    for test in &mut doc.calibration_tests {
        info!("filling calibration test {}", test.id);
        fill_test(test, resolver, catalog).await?;
    }
    Ok(doc)
}

async fn fill_test<M: MapService, R: RouteService>(
    test: &mut CalibrationTest,
    resolver: &GeometryResolver<M, R>,
    catalog: &SensingCatalog,
) -> Result<(), AutofillError> {
    if let Some(start) = &mut test.start_loc {
        resolver.fill_location(start).await?;
    }
    if let Some(end) = &mut test.end_loc {
        resolver.fill_location(end).await?;
    }

    let id = test
        .config
        .get("id")
        .and_then(Value::as_str)
        .ok_or_else(|| AutofillError::MissingConfigId {
            test_id: test.id.clone(),
        })?;
    test.config = catalog.expand(id)?;

    if let Some(coords) = resolver.route_for_test(test).await? {
        test.route_coords = Some(coords);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Location, TravelMode};
    use crate::osm::MockOsmClient;
    use crate::routing::MockRouter;
    use serde_json::{Map, json};

    fn catalog() -> SensingCatalog {
        SensingCatalog::from_value(json!({
            "HAMFDC": { "accuracy": "high" }
        }))
        .unwrap()
    }

    fn resolver() -> GeometryResolver<MockOsmClient, MockRouter> {
        let map = MockOsmClient::new()
            .with_node(100, 37.0, -122.0)
            .with_node(200, 37.5, -122.5);
        GeometryResolver::new(map, MockRouter::new())
    }

    fn test_with_endpoints() -> CalibrationTest {
        CalibrationTest {
            id: "loop_1".to_string(),
            name: None,
            mode: Some(TravelMode::Car),
            config: json!({ "id": "HAMFDC" }),
            start_loc: Some(Location::with_osm_id("start", 100)),
            end_loc: Some(Location::with_osm_id("end", 200)),
            route_waypoints: None,
            waypoint_coords: None,
            relation_id: None,
            start_node: None,
            end_node: None,
            route_coords: None,
            extra: Map::new(),
        }
    }

    #[tokio::test]
    async fn endpoints_config_and_route_are_filled() {
        let mut test = test_with_endpoints();
        fill_test(&mut test, &resolver(), &catalog()).await.unwrap();

        assert_eq!(
            test.start_loc.as_ref().unwrap().point_coordinates(),
            Some([-122.0, 37.0])
        );
        assert_eq!(test.config, json!({ "accuracy": "high" }));
        // mock router echoes its waypoints
        assert_eq!(
            test.route_coords,
            Some(vec![[-122.0, 37.0], [-122.5, 37.5]])
        );
    }

    #[tokio::test]
    async fn config_without_id_is_fatal() {
        let mut test = test_with_endpoints();
        test.config = json!({ "accuracy": "high" });
        let result = fill_test(&mut test, &resolver(), &catalog()).await;
        assert!(matches!(
            result,
            Err(AutofillError::MissingConfigId { ref test_id }) if test_id == "loop_1"
        ));
    }

    #[tokio::test]
    async fn stationary_test_gets_no_route() {
        let mut test = test_with_endpoints();
        test.mode = None;
        fill_test(&mut test, &resolver(), &catalog()).await.unwrap();
        assert!(test.route_coords.is_none());
    }
}
