//! Travel-spec autofiller.
//!
//! Reads a partially-authored travel evaluation spec, resolves geography
//! against OpenStreetMap and OSRM, synthesizes the shim legs between
//! travel legs, and writes the fully-expanded spec back out.

pub mod domain;
pub mod fill;
pub mod osm;
pub mod resolve;
pub mod routing;
