//! Planar convex hull of a mesh and point-to-hull distance.
//!
//! Purpose
//! - Build the hull once per call, then answer "how far is this point from
//!   the hull" for every query point (0 inside or on the boundary).
//!
//! Shapes
//! - 1 distinct mesh location → `Point`, collinear locations → `Segment`,
//!   otherwise a CCW `Polygon` with no collinear vertices.
//! - Coordinates are treated as flat (x, y); no spherical correction.

mod chain;

use nalgebra::Vector2;

use crate::cfg::HullCfg;
use crate::error::{GeodeticError, Result};
use crate::message::{MessageSink, NoopSink};
use chain::{cross, monotone_chain, segment_distance};

/// Convex hull of a non-empty planar point set.
#[derive(Clone, Debug, PartialEq)]
pub enum ConvexHull {
    Point(Vector2<f64>),
    Segment([Vector2<f64>; 2]),
    /// Vertices in CCW order, at least 3, strictly convex.
    Polygon(Vec<Vector2<f64>>),
}

impl ConvexHull {
    /// Hull with default tolerances and no diagnostics.
    pub fn from_points(points: &[Vector2<f64>]) -> Result<Self> {
        Self::from_points_with(points, HullCfg::default(), &NoopSink)
    }

    /// Hull with explicit tolerances; degeneracy and failures are reported to `sink`.
    pub fn from_points_with(
        points: &[Vector2<f64>],
        cfg: HullCfg,
        sink: &dyn MessageSink,
    ) -> Result<Self> {
        if points.is_empty() {
            let msg = "cannot build a convex hull of an empty point set";
            sink.error(msg);
            return Err(GeodeticError::geometry(msg));
        }
        if let Some(bad) = points.iter().position(|p| !(p.x.is_finite() && p.y.is_finite())) {
            let msg = format!("mesh point {bad} has non-finite coordinates");
            sink.error(&msg);
            return Err(GeodeticError::geometry(msg));
        }
        let mut hull = monotone_chain(points, cfg.dedup_eps)?;
        match hull.len() {
            1 => {
                sink.notice(&format!(
                    "convex hull of {} points degenerates to a point",
                    points.len()
                ));
                Ok(ConvexHull::Point(hull[0]))
            }
            2 => {
                sink.notice(&format!(
                    "convex hull of {} points degenerates to a segment",
                    points.len()
                ));
                Ok(ConvexHull::Segment([hull[0], hull[1]]))
            }
            _ => {
                hull.shrink_to_fit();
                Ok(ConvexHull::Polygon(hull))
            }
        }
    }

    /// Hull vertices (CCW for polygons).
    pub fn vertices(&self) -> &[Vector2<f64>] {
        match self {
            ConvexHull::Point(p) => std::slice::from_ref(p),
            ConvexHull::Segment(s) => s,
            ConvexHull::Polygon(v) => v,
        }
    }

    /// Enclosed area (0 for degenerate hulls).
    pub fn area(&self) -> f64 {
        match self {
            ConvexHull::Polygon(v) => {
                let origin = v[0];
                v.windows(2)
                    .skip(1)
                    .map(|w| cross(origin, w[0], w[1]))
                    .sum::<f64>()
                    * 0.5
            }
            _ => 0.0,
        }
    }

    /// Closed-set membership: boundary points count as inside.
    pub fn contains(&self, p: Vector2<f64>) -> bool {
        match self {
            ConvexHull::Point(a) => *a == p,
            ConvexHull::Segment([a, b]) => segment_distance(p, *a, *b) == 0.0,
            ConvexHull::Polygon(v) => {
                let n = v.len();
                (0..n).all(|k| cross(v[k], v[(k + 1) % n], p) >= 0.0)
            }
        }
    }

    /// Planar distance from `p` to the hull; 0 inside or on the boundary.
    ///
    /// A NaN coordinate gives NaN and an infinite one gives `+∞`, whatever the
    /// hull shape.
    pub fn distance_to(&self, p: Vector2<f64>) -> f64 {
        if p.x.is_nan() || p.y.is_nan() {
            return f64::NAN;
        }
        if p.x.is_infinite() || p.y.is_infinite() {
            return f64::INFINITY;
        }
        match self {
            ConvexHull::Point(a) => (p - a).norm(),
            ConvexHull::Segment([a, b]) => segment_distance(p, *a, *b),
            ConvexHull::Polygon(v) => {
                if self.contains(p) {
                    return 0.0;
                }
                let n = v.len();
                (0..n)
                    .map(|k| segment_distance(p, v[k], v[(k + 1) % n]))
                    .fold(f64::INFINITY, f64::min)
            }
        }
    }
}
