//! The geometry resolver.

use tracing::debug;

use crate::domain::{CalibrationTest, Geometry, Location, LonLat, TravelMode};
use crate::osm::{MapService, MemberType};
use crate::routing::RouteService;

use super::error::ResolveError;

/// Resolves location references into concrete coordinates.
///
/// Holds the map and routing services as explicit dependencies; every
/// lookup is a fresh call, nothing is cached across invocations.
#[derive(Debug, Clone)]
pub struct GeometryResolver<M, R> {
    map: M,
    router: R,
}

impl<M: MapService, R: RouteService> GeometryResolver<M, R> {
    pub fn new(map: M, router: R) -> Self {
        Self { map, router }
    }

    /// Resolve a node id to its `[lon, lat]` coordinates.
    pub async fn point(&self, osm_id: i64) -> Result<LonLat, ResolveError> {
        let node = self.map.node(osm_id).await?;
        Ok([node.lon, node.lat])
    }

    /// Resolve a closed way to its ordered ring of `[lon, lat]` pairs.
    pub async fn polygon_ring(&self, way_id: i64) -> Result<Vec<LonLat>, ResolveError> {
        let way = self.map.way_full(way_id).await?;
        let mut ring = Vec::with_capacity(way.node_order.len());
        for node_id in &way.node_order {
            let (lat, lon) = way_coord(&way, *node_id)?;
            // internal order is [lat, lon]; swap on the way out
            ring.push([lon, lat]);
        }
        Ok(ring)
    }

    /// Compute a route visiting `waypoints` in order.
    pub async fn route(
        &self,
        mode: TravelMode,
        waypoints: &[LonLat],
    ) -> Result<Vec<LonLat>, ResolveError> {
        Ok(self.router.route(mode, waypoints).await?)
    }

    /// Resolve the stretch of a relation between two of its nodes.
    ///
    /// The relation's ways are chained in member order. A way stored in the
    /// reverse direction is detected by its last node matching the previous
    /// way's last node and flipped; the joint node shared between
    /// consecutive ways is emitted once. Members with role `platform` are
    /// skipped; a nested relation member is malformed.
    pub async fn relation_segment(
        &self,
        relation_id: i64,
        start_node: i64,
        end_node: i64,
    ) -> Result<Vec<LonLat>, ResolveError> {
        let relation = self.map.relation(relation_id).await?;

        let mut way_ids = Vec::new();
        for member in &relation.members {
            match member.member_type {
                MemberType::Relation => {
                    return Err(ResolveError::Shape {
                        relation_id,
                        member_ref: member.member_ref,
                    });
                }
                MemberType::Way if member.role != "platform" => {
                    way_ids.push(member.member_ref);
                }
                _ => {}
            }
        }
        debug!("relation {relation_id} mapped to {} ways", way_ids.len());

        let mut node_order: Vec<i64> = Vec::new();
        // accumulated as [lat, lon]; swapped once at the end
        let mut coords: Vec<(f64, f64)> = Vec::new();
        let mut prev_last: Option<i64> = None;

        for way_id in way_ids {
            let way = self.map.way_full(way_id).await?;
            let mut order = way.node_order.clone();

            if let Some(last) = prev_last {
                if order.last() == Some(&last) {
                    debug!("way {way_id} is reversed relative to its predecessor, flipping");
                    order.reverse();
                }
                if order.first() == Some(&last) {
                    order.remove(0);
                }
            }

            for node_id in &order {
                coords.push(way_coord(&way, *node_id)?);
                node_order.push(*node_id);
            }
            prev_last = node_order.last().copied();
            debug!(
                "after way {way_id}, relation {relation_id} has {} nodes",
                node_order.len()
            );
        }

        let start_index = node_order
            .iter()
            .position(|&n| n == start_node)
            .ok_or(ResolveError::NodeNotInRelation {
                relation_id,
                node: start_node,
            })?;
        let end_index = node_order
            .iter()
            .position(|&n| n == end_node)
            .ok_or(ResolveError::NodeNotInRelation {
                relation_id,
                node: end_node,
            })?;

        if start_index > end_index {
            return Err(ResolveError::Order {
                relation_id,
                start_node,
                end_node,
            });
        }

        Ok(coords[start_index..=end_index]
            .iter()
            .map(|&(lat, lon)| [lon, lat])
            .collect())
    }

    /// Fill a location's coordinates from its `osm_id`, if it has one.
    ///
    /// Locations without an `osm_id` must already carry coordinates.
    pub async fn fill_location(&self, loc: &mut Location) -> Result<(), ResolveError> {
        match loc.properties.osm_id {
            Some(osm_id) => match &mut loc.geometry {
                Geometry::Point { coordinates } => {
                    *coordinates = Some(self.point(osm_id).await?);
                }
                Geometry::Polygon { coordinates } => {
                    *coordinates = Some(self.polygon_ring(osm_id).await?);
                }
            },
            None => {
                if !loc.has_coordinates() {
                    return Err(ResolveError::MissingLocationData {
                        name: loc.display_name().map(String::from),
                    });
                }
            }
        }
        Ok(())
    }

    /// Materialize the route of a calibration test, when it describes one.
    ///
    /// Relation-backed tests route straight off the map data. Otherwise the
    /// routing service is called with intermediate waypoints taken from
    /// `route_waypoints` (node ids, resolved here), else `waypoint_coords`
    /// (a pre-supplied polygon feature), else none. Returns `Ok(None)` for
    /// tests without a mode or resolvable endpoints.
    pub async fn route_for_test(
        &self,
        test: &CalibrationTest,
    ) -> Result<Option<Vec<LonLat>>, ResolveError> {
        if test.route_waypoints.is_none() && test.waypoint_coords.is_none() {
            if let (Some(relation_id), Some(start), Some(end)) =
                (test.relation_id, test.start_node, test.end_node)
            {
                return self.relation_segment(relation_id, start, end).await.map(Some);
            }
        }

        let Some(mode) = test.mode else {
            return Ok(None);
        };
        let (Some(start), Some(end)) = (
            test.start_loc.as_ref().and_then(Location::point_coordinates),
            test.end_loc.as_ref().and_then(Location::point_coordinates),
        ) else {
            return Ok(None);
        };

        let mut waypoints = vec![start];
        if let Some(node_ids) = &test.route_waypoints {
            for node_id in node_ids {
                waypoints.push(self.point(*node_id).await?);
            }
        } else if let Some(feature) = &test.waypoint_coords {
            if let Geometry::Polygon {
                coordinates: Some(ring),
            } = &feature.geometry
            {
                waypoints.extend(ring.iter().copied());
            }
        }
        waypoints.push(end);

        debug!(
            "routing calibration test {} over {} waypoints",
            test.id,
            waypoints.len()
        );
        self.route(mode, &waypoints).await.map(Some)
    }
}

fn way_coord(
    way: &crate::osm::WayGeometry,
    node_id: i64,
) -> Result<(f64, f64), ResolveError> {
    way.coords
        .get(&node_id)
        .copied()
        .ok_or(ResolveError::Map(crate::osm::OsmError::NotFound {
            kind: crate::osm::ElementKind::Node,
            id: node_id,
        }))
}
