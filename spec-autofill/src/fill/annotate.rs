//! Temporal annotation of locations.
//!
//! Every ground-truth location carries a validity window: the span of time
//! for which its geometry is known to be correct. Locations that do not
//! declare their own window inherit the enclosing trip's.

use crate::domain::time::{self, TimeError};
use crate::domain::{Location, SpecDocument, SpecError, Stops, ValidityWindow};

use super::AutofillError;

/// The default validity window of a document: its overall date range.
#[derive(Debug, Clone)]
pub struct Window {
    pub start_fmt_date: String,
    pub end_fmt_date: String,
}

impl Window {
    pub fn of(doc: &SpecDocument) -> Self {
        Self {
            start_fmt_date: doc.start_fmt_date.clone(),
            end_fmt_date: doc.end_fmt_date.clone(),
        }
    }

    /// The window as route-feature properties.
    pub fn validity(&self) -> Result<ValidityWindow, TimeError> {
        ValidityWindow::from_dates(&self.start_fmt_date, &self.end_fmt_date)
    }
}

/// Annotate a location field with validity dates and timestamps.
///
/// Always returns a list: a bare location is wrapped. Dates already present
/// are kept as-is and only their timestamp is recomputed, which makes the
/// operation idempotent.
pub fn annotate(stops: &Stops, window: &Window) -> Result<Vec<Location>, TimeError> {
    let mut out = stops.clone().into_vec();
    for loc in &mut out {
        annotate_location(loc, window)?;
    }
    Ok(out)
}

fn annotate_location(loc: &mut Location, window: &Window) -> Result<(), TimeError> {
    let props = &mut loc.properties;

    match &props.valid_start_fmt_date {
        None => {
            props.valid_start_ts = Some(time::timestamp(&window.start_fmt_date)?);
            props.valid_start_fmt_date = Some(window.start_fmt_date.clone());
        }
        Some(date) => props.valid_start_ts = Some(time::timestamp(date)?),
    }

    match &props.valid_end_fmt_date {
        None => {
            props.valid_end_ts = Some(time::timestamp(&window.end_fmt_date)?);
            props.valid_end_fmt_date = Some(window.end_fmt_date.clone());
        }
        Some(date) => props.valid_end_ts = Some(time::timestamp(date)?),
    }

    Ok(())
}

/// Annotate a multi-stop field and join the stop names for display.
///
/// Each stop is validated independently and the results concatenated; names
/// are joined with `" & "`. A stop without a display name is fatal, since
/// shim legs are named after their anchors.
pub fn merge_stops(
    leg_id: &str,
    stops: &Stops,
    window: &Window,
) -> Result<(Vec<Location>, String), AutofillError> {
    let annotated = annotate(stops, window)?;
    let names = annotated
        .iter()
        .map(|loc| {
            loc.display_name()
                .map(String::from)
                .ok_or(SpecError::MissingLocationName {
                    leg_id: leg_id.to_string(),
                })
        })
        .collect::<Result<Vec<_>, _>>()?;
    Ok((annotated, names.join(" & ")))
}
