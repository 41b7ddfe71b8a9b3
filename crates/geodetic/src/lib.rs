//! Spherical distance and bearing kernels over broadcastable arrays.
//!
//! The numerical layer beneath the hazard-modeling code: great-circle
//! distances, azimuths, cross-track distances, nearest-mesh-point searches
//! with depth, and planar distance to a mesh's convex hull.
//!
//! Conventions
//! - Sphere of radius [`EARTH_RADIUS`] km; no ellipsoid.
//! - Longitudes/latitudes/azimuths are radians everywhere in this crate.
//!   Callers holding degrees convert before calling (see the CLI `--degrees`).
//! - Depth is km, positive below the surface.
//! - Inputs broadcast numpy-style; outputs are freshly allocated.
//!
//! API Policy
//! - `api` is a curated re-export surface for bindings and tools; internal
//!   module paths may move.

pub mod api;
pub mod broadcast;
pub mod cfg;
pub mod error;
pub mod hull;
pub mod message;
pub mod ops;
pub mod polygon;
pub mod search;
pub mod sphere;

/// Library version string.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub use broadcast::{ArrayView, NdArray};
pub use cfg::{HullCfg, EARTH_RADIUS};
pub use error::{GeodeticError, Result};
pub use nalgebra::Vector2 as Vec2;

/// Common imports for callers.
pub mod prelude {
    pub use crate::broadcast::{broadcast_shapes, zip_map, zip_map2, ArrayView, NdArray};
    pub use crate::hull::ConvexHull;
    pub use crate::message::{MessageSink, NoopSink, TracingSink};
    pub use crate::ops::{
        azimuth, distance_and_azimuth, distance_to_arc, geodetic_distance,
        geodetic_distance_mode, min_distance, min_geodetic_distance, point_to_polygon_distance,
        Measure,
    };
    pub use crate::search::{ClosestPoints, Mesh, Nearest, PointSet};
    pub use crate::sphere::{Arc, Point};
    pub use crate::{GeodeticError, HullCfg, EARTH_RADIUS};
}
