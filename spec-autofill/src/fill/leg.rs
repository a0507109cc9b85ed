//! Leg normalization.
//!
//! Converts a user-authored leg into its canonical form: type forced to
//! TRAVEL, endpoints temporally annotated, and the route materialized from
//! whichever route source the leg declares.

use tracing::debug;

use crate::domain::{self, Leg, LegType, RouteFeature, SpecError, Stops, ValidityWindow};

use super::AutofillError;
use super::annotate::{Window, annotate};

/// Normalize one travel leg.
///
/// Route sources are tried in fixed priority: `polylines` (each entry with
/// its own, mandatory window), then `polyline` (trip default window). A leg
/// with neither is rejected — every TRAVEL leg must specify a route.
pub fn fill_travel_leg(leg: &Leg, window: &Window) -> Result<Leg, AutofillError> {
    debug!("filling leg {}", leg.id);

    let mut filled = leg.clone();
    filled.leg_type = Some(LegType::Travel);

    let start = leg
        .start_loc
        .as_ref()
        .ok_or_else(|| SpecError::MissingEndpoint {
            leg_id: leg.id.clone(),
            field: "start_loc",
        })?;
    filled.start_loc = Some(Stops::Many(annotate(start, window)?));

    let end = leg
        .end_loc
        .as_ref()
        .ok_or_else(|| SpecError::MissingEndpoint {
            leg_id: leg.id.clone(),
            field: "end_loc",
        })?;
    filled.end_loc = Some(Stops::Many(annotate(end, window)?));

    let mut route_coords = Vec::new();
    if let Some(polylines) = &leg.polylines {
        for timed in polylines {
            let validity =
                ValidityWindow::from_dates(&timed.valid_start_fmt_date, &timed.valid_end_fmt_date)?;
            let coords = domain::decode_polyline(&timed.polyline).map_err(|source| {
                AutofillError::Polyline {
                    leg_id: leg.id.clone(),
                    source,
                }
            })?;
            route_coords.push(RouteFeature::new(validity, coords));
        }
    } else if let Some(polyline) = &leg.polyline {
        let coords =
            domain::decode_polyline(polyline).map_err(|source| AutofillError::Polyline {
                leg_id: leg.id.clone(),
                source,
            })?;
        route_coords.push(RouteFeature::new(window.validity()?, coords));
    } else {
        return Err(SpecError::MissingRouteSource {
            leg_id: leg.id.clone(),
        }
        .into());
    }
    filled.route_coords = Some(route_coords);

    Ok(filled)
}
