//! Curated internal API for bindings and tools (UNSTABLE).
//!
//! Important
//! - This is the surface the Python bindings and the CLI import from. Breaking
//!   changes are allowed; keep both callers in step.

// Array-level operations
pub use crate::ops::{
    azimuth, distance_and_azimuth, distance_to_arc, geodetic_distance, geodetic_distance_mode,
    min_distance, min_geodetic_distance, point_to_polygon_distance, Measure,
};
// Broadcasting
pub use crate::broadcast::{broadcast_shapes, zip_map, zip_map2, ArrayView, BroadcastPlan, NdArray};
// Searches and geometry
pub use crate::hull::ConvexHull;
pub use crate::message::{MessageSink, NoopSink, TracingSink};
pub use crate::polygon::point_to_polygon_distance_with;
pub use crate::search::{ClosestPoints, Mesh, Nearest, PointSet};
pub use crate::sphere::{Arc, Point};
// Errors and config
pub use crate::cfg::{HullCfg, EARTH_RADIUS};
pub use crate::error::{GeodeticError, Result};

/// Convert a degree array to radians; the only unit conversion this crate offers.
pub fn radians(degrees: &[f64]) -> Vec<f64> {
    degrees.iter().map(|d| d.to_radians()).collect()
}
