//! Geographic resolution.
//!
//! The [`GeometryResolver`] turns location references (OSM feature ids,
//! waypoint lists, relations) into concrete coordinate sequences, using the
//! injected map and routing services.

mod error;
mod resolver;

pub use error::ResolveError;
pub use resolver::GeometryResolver;
