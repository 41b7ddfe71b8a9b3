use std::cmp::Ordering;

use nalgebra::Vector2;

use crate::error::{alloc_output, Result};

/// Andrew's monotone chain (returns hull in CCW order, collinear points dropped).
///
/// Input must be non-empty and finite. Returns 1 vertex for a single distinct
/// point and 2 for collinear input.
pub(super) fn monotone_chain(
    points: &[Vector2<f64>],
    dedup_eps: f64,
) -> Result<Vec<Vector2<f64>>> {
    let mut pts: Vec<Vector2<f64>> = alloc_output(points.len())?;
    pts.extend_from_slice(points);
    pts.sort_by(|a, b| match a.x.partial_cmp(&b.x).unwrap_or(Ordering::Equal) {
        Ordering::Equal => a.y.partial_cmp(&b.y).unwrap_or(Ordering::Equal),
        o => o,
    });
    pts.dedup_by(|a, b| (*a - *b).norm() < dedup_eps);
    if pts.len() < 3 {
        return Ok(pts);
    }
    let mut lower: Vec<Vector2<f64>> = alloc_output(pts.len())?;
    for p in &pts {
        while lower.len() >= 2 && cross(lower[lower.len() - 2], lower[lower.len() - 1], *p) <= 0.0 {
            lower.pop();
        }
        lower.push(*p);
    }
    let mut upper: Vec<Vector2<f64>> = alloc_output(pts.len())?;
    for p in pts.iter().rev() {
        while upper.len() >= 2 && cross(upper[upper.len() - 2], upper[upper.len() - 1], *p) <= 0.0 {
            upper.pop();
        }
        upper.push(*p);
    }
    lower.pop();
    upper.pop();
    let mut hull = lower;
    hull.extend(upper);
    Ok(hull)
}

/// z-component of `(b - a) × (c - a)`; positive when `a → b → c` turns left.
#[inline]
pub(super) fn cross(a: Vector2<f64>, b: Vector2<f64>, c: Vector2<f64>) -> f64 {
    let ab = b - a;
    let ac = c - a;
    ab.x * ac.y - ab.y * ac.x
}

/// Euclidean distance from `p` to the closed segment `[a, b]`.
pub(super) fn segment_distance(p: Vector2<f64>, a: Vector2<f64>, b: Vector2<f64>) -> f64 {
    let ab = b - a;
    let len2 = ab.norm_squared();
    if len2 == 0.0 {
        return (p - a).norm();
    }
    let t = ((p - a).dot(&ab) / len2).clamp(0.0, 1.0);
    (p - (a + ab * t)).norm()
}
