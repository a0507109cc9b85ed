//! Domain validation errors.
//!
//! These represent structural problems in the spec document itself, as
//! opposed to failures talking to the map or routing services.

/// Validation failures in trips and legs.
#[derive(Debug, Clone, thiserror::Error)]
pub enum SpecError {
    /// A TRAVEL leg declares neither `polyline` nor `polylines`
    #[error("leg {leg_id} has no 'polyline' or 'polylines' route source")]
    MissingRouteSource { leg_id: String },

    /// Two legs in one trip share an id
    #[error("found duplicate leg ids in trip {trip_id}")]
    DuplicateLegId { trip_id: String },

    /// A single-leg trip boundary produced more than one shim
    #[error("trip {trip_id}: expected at most one shim at a trip boundary, got {count}")]
    UnexpectedShimCount { trip_id: String, count: usize },

    /// A leg is missing a required endpoint field
    #[error("leg {leg_id} is missing required field {field}")]
    MissingEndpoint {
        leg_id: String,
        field: &'static str,
    },

    /// A shim anchor stop has no display name to merge
    #[error("leg {leg_id} references a stop without a display name")]
    MissingLocationName { leg_id: String },

    /// Both sides of a shim boundary were absent
    #[error("shim boundary must have at least one adjacent leg")]
    EmptyBoundary,
}
