//! Shim-leg synthesis.
//!
//! Shim legs are the implied movements between travel legs: walking to and
//! from a parked vehicle at trip boundaries, transferring between vehicles,
//! and waiting for shared ones. They are synthesized at every boundary of
//! the expanded leg list.

use crate::domain::{Leg, LegType, SpecError, TravelMode};

use super::AutofillError;
use super::annotate::{Window, annotate, merge_stops};

/// Synthesize the shim legs for the boundary between `prev` and `cur`.
///
/// `prev` is `None` at the start of a trip and `cur` is `None` at its end.
/// At most two legs come back (a TRANSFER followed by a WAITING, in that
/// order); boundaries adjacent to a WALKING leg produce none, since walking
/// legs need no access or transfer on their walking side.
pub fn boundary_legs(
    prev: Option<&Leg>,
    cur: Option<&Leg>,
    window: &Window,
) -> Result<Vec<Leg>, AutofillError> {
    match (prev, cur) {
        (None, None) => Err(SpecError::EmptyBoundary.into()),
        (None, Some(leg)) => trip_start(leg, window),
        (Some(leg), None) => trip_end(leg, window),
        (Some(prev), Some(cur)) => internal(prev, cur, window),
    }
}

fn trip_start(leg: &Leg, window: &Window) -> Result<Vec<Leg>, AutofillError> {
    if leg.mode.is_walking() {
        return Ok(Vec::new());
    }
    let start = leg
        .start_loc
        .as_ref()
        .ok_or_else(|| SpecError::MissingEndpoint {
            leg_id: leg.id.clone(),
            field: "start_loc",
        })?;
    Ok(vec![Leg::shim(
        "walk_start",
        LegType::Access,
        TravelMode::Walking,
        "Walk from the building to your vehicle",
        annotate(start, window)?,
    )])
}

fn trip_end(leg: &Leg, window: &Window) -> Result<Vec<Leg>, AutofillError> {
    if leg.mode.is_walking() {
        return Ok(Vec::new());
    }
    let end = leg
        .end_loc
        .as_ref()
        .ok_or_else(|| SpecError::MissingEndpoint {
            leg_id: leg.id.clone(),
            field: "end_loc",
        })?;
    Ok(vec![Leg::shim(
        "walk_end",
        LegType::Access,
        TravelMode::Walking,
        "Walk from your vehicle to the building",
        annotate(end, window)?,
    )])
}

fn internal(prev: &Leg, cur: &Leg, window: &Window) -> Result<Vec<Leg>, AutofillError> {
    let mut shims = Vec::new();

    if !prev.mode.is_walking() && !cur.mode.is_walking() {
        let arrival = prev
            .end_loc
            .as_ref()
            .ok_or_else(|| SpecError::MissingEndpoint {
                leg_id: prev.id.clone(),
                field: "end_loc",
            })?;
        let (loc, names) = merge_stops(&prev.id, arrival, window)?;
        shims.push(Leg::shim(
            format!("tt_{}_{}", prev.id, cur.id),
            LegType::Transfer,
            TravelMode::Walking,
            format!("Transfer between {} and {} at {}", prev.mode, cur.mode, names),
            loc,
        ));
    }

    if cur.is_multiple_occupancy() {
        let departure = cur
            .start_loc
            .as_ref()
            .ok_or_else(|| SpecError::MissingEndpoint {
                leg_id: cur.id.clone(),
                field: "start_loc",
            })?;
        let (loc, names) = merge_stops(&cur.id, departure, window)?;
        shims.push(Leg::shim(
            format!("wait_for_{}", cur.id),
            LegType::Waiting,
            TravelMode::Stopped,
            format!("Wait for {} at {}", cur.mode, names),
            loc,
        ));
    }

    Ok(shims)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Location;
    use serde_json::Map;

    fn window() -> Window {
        Window {
            start_fmt_date: "2019-07-22".to_string(),
            end_fmt_date: "2019-07-25".to_string(),
        }
    }

    fn leg(id: &str, mode: TravelMode) -> Leg {
        Leg {
            id: id.to_string(),
            name: None,
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

    #[test]
    fn vehicle_trip_gets_access_legs() {
        let car = leg("drive", TravelMode::Car);

        let start = boundary_legs(None, Some(&car), &window()).unwrap();
        assert_eq!(start.len(), 1);
        assert_eq!(start[0].id, "walk_start");
        assert_eq!(start[0].leg_type, Some(LegType::Access));
        assert_eq!(start[0].mode, TravelMode::Walking);
        // anchored at the first leg's departure, already annotated
        let loc = start[0].loc.as_ref().unwrap();
        assert_eq!(loc[0].display_name(), Some("drive start"));
        assert!(loc[0].properties.valid_start_ts.is_some());

        let end = boundary_legs(Some(&car), None, &window()).unwrap();
        assert_eq!(end.len(), 1);
        assert_eq!(end[0].id, "walk_end");
        assert_eq!(
            end[0].loc.as_ref().unwrap()[0].display_name(),
            Some("drive end")
        );
    }

    #[test]
    fn walking_trip_gets_no_access_legs() {
        let walk = leg("stroll", TravelMode::Walking);
        assert!(boundary_legs(None, Some(&walk), &window()).unwrap().is_empty());
        assert!(boundary_legs(Some(&walk), None, &window()).unwrap().is_empty());
    }

    #[test]
    fn vehicle_to_vehicle_gets_transfer() {
        let car = leg("drive", TravelMode::Car);
        let train = leg("ride", TravelMode::Train);

        let shims = boundary_legs(Some(&car), Some(&train), &window()).unwrap();
        assert_eq!(shims.len(), 1);
        assert_eq!(shims[0].id, "tt_drive_ride");
        assert_eq!(shims[0].leg_type, Some(LegType::Transfer));
        assert_eq!(shims[0].mode, TravelMode::Walking);
        assert_eq!(
            shims[0].name.as_deref(),
            Some("Transfer between CAR and TRAIN at drive end")
        );
        // anchored at the previous leg's arrival
        assert_eq!(
            shims[0].loc.as_ref().unwrap()[0].display_name(),
            Some("drive end")
        );
    }

    #[test]
    fn walking_neighbor_suppresses_transfer() {
        let walk = leg("stroll", TravelMode::Walking);
        let car = leg("drive", TravelMode::Car);
        assert!(boundary_legs(Some(&walk), Some(&car), &window()).unwrap().is_empty());
        assert!(boundary_legs(Some(&car), Some(&walk), &window()).unwrap().is_empty());
    }

    #[test]
    fn shared_vehicle_gets_waiting_after_transfer() {
        let car = leg("drive", TravelMode::Car);
        let mut bus = leg("bus_ride", TravelMode::Bus);
        bus.multiple_occupancy = Some(true);

        let shims = boundary_legs(Some(&car), Some(&bus), &window()).unwrap();
        assert_eq!(shims.len(), 2);
        assert_eq!(shims[0].leg_type, Some(LegType::Transfer));
        assert_eq!(shims[1].id, "wait_for_bus_ride");
        assert_eq!(shims[1].leg_type, Some(LegType::Waiting));
        assert_eq!(shims[1].mode, TravelMode::Stopped);
        assert_eq!(
            shims[1].name.as_deref(),
            Some("Wait for BUS at bus_ride start")
        );
        // waiting happens where the shared vehicle departs
        assert_eq!(
            shims[1].loc.as_ref().unwrap()[0].display_name(),
            Some("bus_ride start")
        );
    }

    #[test]
    fn waiting_survives_walking_approach() {
        let walk = leg("stroll", TravelMode::Walking);
        let mut bus = leg("bus_ride", TravelMode::Bus);
        bus.multiple_occupancy = Some(true);

        let shims = boundary_legs(Some(&walk), Some(&bus), &window()).unwrap();
        assert_eq!(shims.len(), 1);
        assert_eq!(shims[0].leg_type, Some(LegType::Waiting));
    }

    #[test]
    fn multi_stop_arrival_names_all_stops() {
        let mut bus = leg("bus_ride", TravelMode::Bus);
        bus.end_loc = Some(
            vec![
                Location::named_point("5th Ave", [1.0, 2.0]),
                Location::named_point("Main St", [1.1, 2.1]),
            ]
            .into(),
        );
        let train = leg("ride", TravelMode::Train);

        let shims = boundary_legs(Some(&bus), Some(&train), &window()).unwrap();
        assert_eq!(
            shims[0].name.as_deref(),
            Some("Transfer between BUS and TRAIN at 5th Ave & Main St")
        );
        assert_eq!(shims[0].loc.as_ref().unwrap().len(), 2);
    }

    #[test]
    fn empty_boundary_is_rejected() {
        assert!(matches!(
            boundary_legs(None, None, &window()),
            Err(AutofillError::Spec(SpecError::EmptyBoundary))
        ));
    }
}
