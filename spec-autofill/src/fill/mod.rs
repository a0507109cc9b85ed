//! The autofill pipeline.
//!
//! Four passes over the document, in a fixed order: date range validation,
//! calibration tests, evaluation trips, sensing settings. Each pass takes
//! the document by value and hands back the filled copy, so a failure
//! anywhere leaves no partially-written output.

use tracing::info;

use crate::domain::time::TimeError;
use crate::domain::{PolylineDecodeError, SpecDocument, SpecError};
use crate::osm::MapService;
use crate::resolve::{GeometryResolver, ResolveError};
use crate::routing::RouteService;

mod annotate;
mod calibration;
mod datetime;
mod leg;
mod sensing;
mod shim;
mod trips;

pub use annotate::{Window, annotate, merge_stops};
pub use calibration::fill_calibration_tests;
pub use datetime::fill_datetime;
pub use leg::fill_travel_leg;
pub use sensing::{SensingCatalog, fill_sensing_settings};
pub use shim::boundary_legs;
pub use trips::fill_evaluation_trips;

/// Any failure while filling a document.
#[derive(Debug, thiserror::Error)]
pub enum AutofillError {
    #[error(transparent)]
    Resolve(#[from] ResolveError),

    #[error(transparent)]
    Spec(#[from] SpecError),

    #[error(transparent)]
    Time(#[from] TimeError),

    /// The region names a timezone the tz database does not know
    #[error("unknown timezone {timezone:?} in region")]
    InvalidTimezone { timezone: String },

    /// A comparison references a configuration id missing from the catalog
    #[error("unknown sensing configuration {id:?}")]
    UnknownSensingConfig { id: String },

    /// A calibration test's config reference has no `id` key
    #[error("calibration test {test_id}: config reference has no 'id'")]
    MissingConfigId { test_id: String },

    /// A leg's polyline failed to decode
    #[error("leg {leg_id}: invalid polyline")]
    Polyline {
        leg_id: String,
        #[source]
        source: PolylineDecodeError,
    },

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

/// The full pipeline with its external dependencies.
#[derive(Debug)]
pub struct Autofill<M, R> {
    resolver: GeometryResolver<M, R>,
    catalog: SensingCatalog,
}

impl<M: MapService, R: RouteService> Autofill<M, R> {
    pub fn new(map: M, router: R, catalog: SensingCatalog) -> Self {
        Self {
            resolver: GeometryResolver::new(map, router),
            catalog,
        }
    }

    /// Run every fill pass over `doc`.
    pub async fn run(&self, doc: SpecDocument) -> Result<SpecDocument, AutofillError> {
        info!(
            "filling document: {} calibration tests, {} trips, {} sensing settings",
            doc.calibration_tests.len(),
            doc.evaluation_trips.len(),
            doc.sensing_settings.len()
        );
        let doc = fill_datetime(doc)?;
        let doc = fill_calibration_tests(doc, &self.resolver, &self.catalog).await?;
        let doc = fill_evaluation_trips(doc)?;
        fill_sensing_settings(doc, &self.catalog)
    }
}
