//! Domain types for the specification autofiller.
//!
//! This module contains the document model for evaluation specs: trips,
//! legs, locations and their temporal validity windows. Types preserve
//! unknown input fields through a flattened map so a filled document keeps
//! the general structure of its source.

mod document;
mod error;
mod leg;
mod location;
mod route;
pub mod time;

pub use document::{
    CalibrationTest, ComparisonSetting, PhoneComparison, Region, SensingSetting, SpecDocument,
    Trip, TripSpec,
};
pub use error::SpecError;
pub use leg::{Leg, LegType, TravelMode};
pub use location::{Geometry, Location, LocationProperties, LonLat, Stops};
pub use route::{
    LineStringGeometry, PolylineDecodeError, RouteFeature, TimedPolyline, ValidityWindow,
    decode_polyline,
};
