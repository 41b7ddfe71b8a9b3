//! Point-to-polygon distance against the convex hull of a mesh.
//!
//! The hull is built once per call from the mesh's (x, y) pairs, the mesh
//! points are dropped right after, and the hull lives only until the query
//! pass finishes. Every exit path releases what it built.

use nalgebra::Vector2;

use crate::broadcast::{ArrayView, BroadcastPlan, NdArray};
use crate::cfg::HullCfg;
use crate::error::{alloc_output, Result};
use crate::hull::ConvexHull;
use crate::message::MessageSink;

/// Planar distance from every query point to the convex hull of the mesh.
///
/// Mesh arrays broadcast against each other and are flattened; query arrays
/// broadcast against each other and shape the output. Both shape checks run
/// before the hull is built.
pub fn point_to_polygon_distance_with(
    mesh_x: &ArrayView<'_>,
    mesh_y: &ArrayView<'_>,
    query_x: &ArrayView<'_>,
    query_y: &ArrayView<'_>,
    cfg: HullCfg,
    sink: &dyn MessageSink,
) -> Result<NdArray<f64>> {
    let mesh_plan = BroadcastPlan::new([mesh_x, mesh_y])?;
    let query_plan = BroadcastPlan::new([query_x, query_y])?;

    let hull = {
        let mut points: Vec<Vector2<f64>> = alloc_output(mesh_plan.len())?;
        mesh_plan.for_each(|[x, y]| points.push(Vector2::new(x, y)));
        ConvexHull::from_points_with(&points, cfg, sink)?
    };
    tracing::debug!(
        mesh = mesh_plan.len(),
        hull_vertices = hull.vertices().len(),
        queries = query_plan.len(),
        "point_to_polygon_distance"
    );

    let mut out = alloc_output(query_plan.len())?;
    query_plan.for_each(|[x, y]| out.push(hull.distance_to(Vector2::new(x, y))));
    NdArray::from_shape_vec(query_plan.shape().to_vec(), out)
}
