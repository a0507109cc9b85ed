//! Evaluation trip expansion.
//!
//! The third pass: each authored trip is rewritten into a fully-shimmed leg
//! list. Multi-leg trips get shims woven between their travel legs;
//! single-leg trips are promoted to the multi-leg form first.

use std::collections::HashSet;

use serde_json::Map;
use tracing::{debug, info};

use crate::domain::{Leg, SpecDocument, SpecError, Trip, TripSpec};

use super::AutofillError;
use super::annotate::Window;
use super::leg::fill_travel_leg;
use super::shim::boundary_legs;

pub fn fill_evaluation_trips(mut doc: SpecDocument) -> Result<SpecDocument, AutofillError> {
    let window = Window::of(&doc);
    let mut filled = Vec::with_capacity(doc.evaluation_trips.len());
    for spec in &doc.evaluation_trips {
        info!("filling trip {}", spec.id());
        let trip = match spec {
            TripSpec::MultiLeg(trip) => fill_multi_leg(trip, &window)?,
            TripSpec::SingleLeg(leg) => fill_single_leg(leg, &window)?,
        };
        filled.push(TripSpec::MultiLeg(trip));
    }
    doc.evaluation_trips = filled;
    Ok(doc)
}

fn check_unique_ids(trip_id: &str, legs: &[Leg]) -> Result<(), SpecError> {
    let mut seen = HashSet::new();
    for leg in legs {
        if !seen.insert(leg.id.as_str()) {
            return Err(SpecError::DuplicateLegId {
                trip_id: trip_id.to_string(),
            });
        }
    }
    Ok(())
}

/// Expand a multi-leg trip: shims at every boundary, each travel leg
/// normalized. Leg ids are checked for uniqueness before and after, since
/// synthesized ids could collide with authored ones.
fn fill_multi_leg(trip: &Trip, window: &Window) -> Result<Trip, AutofillError> {
    check_unique_ids(&trip.id, &trip.legs)?;

    let mut legs = Vec::new();
    let mut prev: Option<&Leg> = None;
    for leg in &trip.legs {
        legs.extend(boundary_legs(prev, Some(leg), window)?);
        legs.push(fill_travel_leg(leg, window)?);
        prev = Some(leg);
    }
    legs.extend(boundary_legs(prev, None, window)?);

    check_unique_ids(&trip.id, &legs)?;
    debug!("trip {}: {} legs after expansion", trip.id, legs.len());

    Ok(Trip {
        id: trip.id.clone(),
        name: trip.name.clone(),
        legs,
        extra: trip.extra.clone(),
    })
}

/// Promote a single-leg trip to a trip with the same id and name. Either
/// boundary of a lone leg can produce at most one ACCESS shim, and the
/// authored id must not collide with a synthesized one.
fn fill_single_leg(leg: &Leg, window: &Window) -> Result<Trip, AutofillError> {
    let before = boundary_legs(None, Some(leg), window)?;
    if before.len() > 1 {
        return Err(SpecError::UnexpectedShimCount {
            trip_id: leg.id.clone(),
            count: before.len(),
        }
        .into());
    }
    let after = boundary_legs(Some(leg), None, window)?;
    if after.len() > 1 {
        return Err(SpecError::UnexpectedShimCount {
            trip_id: leg.id.clone(),
            count: after.len(),
        }
        .into());
    }

    let mut legs = before;
    legs.push(fill_travel_leg(leg, window)?);
    legs.extend(after);
    check_unique_ids(&leg.id, &legs)?;

    Ok(Trip {
        id: leg.id.clone(),
        name: leg.name.clone(),
        legs,
        extra: Map::new(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{LegType, Location, Region, TravelMode};

    fn window() -> Window {
        Window {
            start_fmt_date: "2019-07-22".to_string(),
            end_fmt_date: "2019-07-25".to_string(),
        }
    }

    fn leg(id: &str, mode: TravelMode) -> Leg {
        Leg {
            id: id.to_string(),
            name: Some(format!("{id} leg")),
            mode,
            leg_type: None,
            start_loc: Some(Location::named_point(&format!("{id} start"), [1.0, 2.0]).into()),
            end_loc: Some(Location::named_point(&format!("{id} end"), [3.0, 4.0]).into()),
            loc: None,
            multiple_occupancy: None,
            polyline: Some("_p~iF~ps|U".to_string()),
            polylines: None,
            route_coords: None,
            extra: Map::new(),
        }
    }

    fn trip(id: &str, legs: Vec<Leg>) -> Trip {
        Trip {
            id: id.to_string(),
            name: None,
            legs,
            extra: Map::new(),
        }
    }

    fn leg_ids(trip: &Trip) -> Vec<&str> {
        trip.legs.iter().map(|l| l.id.as_str()).collect()
    }

    #[test]
    fn car_then_train_expands_fully() {
        let authored = trip(
            "commute",
            vec![leg("drive", TravelMode::Car), leg("ride", TravelMode::Train)],
        );
        let filled = fill_multi_leg(&authored, &window()).unwrap();
        assert_eq!(
            leg_ids(&filled),
            vec!["walk_start", "drive", "tt_drive_ride", "ride", "walk_end"]
        );
        // authored legs all became TRAVEL
        assert_eq!(filled.legs[1].leg_type, Some(LegType::Travel));
        assert_eq!(filled.legs[3].leg_type, Some(LegType::Travel));
    }

    #[test]
    fn shared_leg_inserts_waiting() {
        let mut bus = leg("bus_ride", TravelMode::Bus);
        bus.multiple_occupancy = Some(true);
        let authored = trip("to_town", vec![leg("drive", TravelMode::Car), bus]);
        let filled = fill_multi_leg(&authored, &window()).unwrap();
        assert_eq!(
            leg_ids(&filled),
            vec![
                "walk_start",
                "drive",
                "tt_drive_bus_ride",
                "wait_for_bus_ride",
                "bus_ride",
                "walk_end"
            ]
        );
    }

    #[test]
    fn walking_legs_suppress_shims() {
        let authored = trip(
            "errand",
            vec![leg("stroll", TravelMode::Walking), leg("drive", TravelMode::Car)],
        );
        let filled = fill_multi_leg(&authored, &window()).unwrap();
        assert_eq!(leg_ids(&filled), vec!["stroll", "drive", "walk_end"]);
    }

    #[test]
    fn duplicate_authored_ids_are_rejected() {
        let authored = trip(
            "commute",
            vec![leg("drive", TravelMode::Car), leg("drive", TravelMode::Car)],
        );
        assert!(matches!(
            fill_multi_leg(&authored, &window()),
            Err(AutofillError::Spec(SpecError::DuplicateLegId { ref trip_id })) if trip_id == "commute"
        ));
    }

    #[test]
    fn authored_id_colliding_with_shim_is_rejected() {
        let authored = trip(
            "commute",
            vec![leg("walk_start", TravelMode::Car), leg("ride", TravelMode::Train)],
        );
        // ids are unique as authored but collide after expansion
        assert!(matches!(
            fill_multi_leg(&authored, &window()),
            Err(AutofillError::Spec(SpecError::DuplicateLegId { .. }))
        ));
    }

    #[test]
    fn single_leg_trip_is_promoted() {
        let filled = fill_single_leg(&leg("drive", TravelMode::Car), &window()).unwrap();
        assert_eq!(filled.id, "drive");
        assert_eq!(filled.name.as_deref(), Some("drive leg"));
        assert_eq!(leg_ids(&filled), vec!["walk_start", "drive", "walk_end"]);
    }

    #[test]
    fn single_leg_id_colliding_with_shim_is_rejected() {
        let result = fill_single_leg(&leg("walk_start", TravelMode::Car), &window());
        assert!(matches!(
            result,
            Err(AutofillError::Spec(SpecError::DuplicateLegId { ref trip_id })) if trip_id == "walk_start"
        ));
    }

    #[test]
    fn single_walking_trip_has_no_shims() {
        let filled = fill_single_leg(&leg("stroll", TravelMode::Walking), &window()).unwrap();
        assert_eq!(leg_ids(&filled), vec!["stroll"]);
    }

    #[test]
    fn document_pass_rewrites_every_trip() {
        let doc = SpecDocument {
            region: Region {
                timezone: "UTC".to_string(),
                extra: Map::new(),
            },
            start_fmt_date: "2019-07-22".to_string(),
            end_fmt_date: "2019-07-25".to_string(),
            start_ts: None,
            end_ts: None,
            calibration_tests: Vec::new(),
            evaluation_trips: vec![
                TripSpec::MultiLeg(trip("commute", vec![leg("drive", TravelMode::Car)])),
                TripSpec::SingleLeg(leg("stroll", TravelMode::Walking)),
            ],
            sensing_settings: Vec::new(),
            extra: Map::new(),
        };
        let filled = fill_evaluation_trips(doc).unwrap();
        assert_eq!(filled.evaluation_trips.len(), 2);
        assert!(filled
            .evaluation_trips
            .iter()
            .all(|t| matches!(t, TripSpec::MultiLeg(_))));
    }
}
