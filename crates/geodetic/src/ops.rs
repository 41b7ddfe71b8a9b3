//! Array-level operations: each scalar kernel lifted over broadcastable inputs.
//!
//! Every function validates all shapes before touching an element and returns
//! a freshly allocated array shaped like the broadcast of its inputs (or, for
//! mesh searches, like the broadcast of the query inputs). Angles are radians.

use crate::broadcast::{zip_map, zip_map2, ArrayView, NdArray};
use crate::cfg::HullCfg;
use crate::error::Result;
use crate::message::NoopSink;
use crate::polygon::point_to_polygon_distance_with;
use crate::search::{Mesh, Nearest, PointSet};
use crate::sphere;

/// What [`geodetic_distance_mode`] emits per element.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Measure {
    /// Great-circle distance, km.
    #[default]
    Distance,
    /// Initial bearing from point 1 toward point 2, radians in `[0, 2π)`.
    Azimuth,
}

/// Great-circle distance (km) between two broadcastable point sets.
pub fn geodetic_distance<'a>(
    lons1: impl Into<ArrayView<'a>>,
    lats1: impl Into<ArrayView<'a>>,
    lons2: impl Into<ArrayView<'a>>,
    lats2: impl Into<ArrayView<'a>>,
) -> Result<NdArray<f64>> {
    geodetic_distance_mode(lons1, lats1, lons2, lats2, Measure::Distance)
}

/// Distance or azimuth over the same broadcast iteration, selected by `measure`.
pub fn geodetic_distance_mode<'a>(
    lons1: impl Into<ArrayView<'a>>,
    lats1: impl Into<ArrayView<'a>>,
    lons2: impl Into<ArrayView<'a>>,
    lats2: impl Into<ArrayView<'a>>,
    measure: Measure,
) -> Result<NdArray<f64>> {
    let (lons1, lats1, lons2, lats2) = (lons1.into(), lats1.into(), lons2.into(), lats2.into());
    let kernel: fn(f64, f64, f64, f64) -> f64 = match measure {
        Measure::Distance => sphere::geodetic_distance,
        Measure::Azimuth => sphere::azimuth,
    };
    zip_map([&lons1, &lats1, &lons2, &lats2], |[x1, y1, x2, y2]| {
        kernel(x1, y1, x2, y2)
    })
}

/// Initial bearing (radians, clockwise from north) from points 1 toward points 2.
pub fn azimuth<'a>(
    lons1: impl Into<ArrayView<'a>>,
    lats1: impl Into<ArrayView<'a>>,
    lons2: impl Into<ArrayView<'a>>,
    lats2: impl Into<ArrayView<'a>>,
) -> Result<NdArray<f64>> {
    geodetic_distance_mode(lons1, lats1, lons2, lats2, Measure::Azimuth)
}

/// Distances (km) and azimuths (radians) from one pass: `(distances, azimuths)`.
pub fn distance_and_azimuth<'a>(
    lons1: impl Into<ArrayView<'a>>,
    lats1: impl Into<ArrayView<'a>>,
    lons2: impl Into<ArrayView<'a>>,
    lats2: impl Into<ArrayView<'a>>,
) -> Result<(NdArray<f64>, NdArray<f64>)> {
    let (lons1, lats1, lons2, lats2) = (lons1.into(), lats1.into(), lons2.into(), lats2.into());
    zip_map2([&lons1, &lats1, &lons2, &lats2], |[x1, y1, x2, y2]| {
        (
            sphere::geodetic_distance(x1, y1, x2, y2),
            sphere::azimuth(x1, y1, x2, y2),
        )
    })
}

/// Signed cross-track distance (km) from each point to each arc's great circle.
pub fn distance_to_arc<'a>(
    arc_lons: impl Into<ArrayView<'a>>,
    arc_lats: impl Into<ArrayView<'a>>,
    arc_azimuths: impl Into<ArrayView<'a>>,
    point_lons: impl Into<ArrayView<'a>>,
    point_lats: impl Into<ArrayView<'a>>,
) -> Result<NdArray<f64>> {
    let inputs = [
        arc_lons.into(),
        arc_lats.into(),
        arc_azimuths.into(),
        point_lons.into(),
        point_lats.into(),
    ];
    let [a, b, c, d, e] = &inputs;
    zip_map([a, b, c, d, e], |[alon, alat, az, lon, lat]| {
        sphere::distance_to_arc(alon, alat, az, lon, lat)
    })
}

/// Nearest mesh distance (km) or flattened mesh index for every query point, depth-aware.
pub fn min_distance<'a>(
    mesh_lons: impl Into<ArrayView<'a>>,
    mesh_lats: impl Into<ArrayView<'a>>,
    mesh_depths: impl Into<ArrayView<'a>>,
    query_lons: impl Into<ArrayView<'a>>,
    query_lats: impl Into<ArrayView<'a>>,
    query_depths: impl Into<ArrayView<'a>>,
    report_index: bool,
) -> Result<Nearest> {
    let query = PointSet::new(query_lons, query_lats).with_depths(query_depths);
    let mesh = Mesh::new(&mesh_lons.into(), &mesh_lats.into(), Some(&mesh_depths.into()))?;
    mesh.min_distance(&query, report_index)
}

/// Surface-only nearest mesh distance (km) for every query point.
pub fn min_geodetic_distance<'a>(
    mesh_lons: impl Into<ArrayView<'a>>,
    mesh_lats: impl Into<ArrayView<'a>>,
    query_lons: impl Into<ArrayView<'a>>,
    query_lats: impl Into<ArrayView<'a>>,
) -> Result<NdArray<f64>> {
    let query = PointSet::new(query_lons, query_lats);
    let mesh = Mesh::new(&mesh_lons.into(), &mesh_lats.into(), None)?;
    mesh.nearest_distances(&query)
}

/// Planar distance from each query point to the convex hull of the mesh (0 inside).
pub fn point_to_polygon_distance<'a>(
    mesh_x: impl Into<ArrayView<'a>>,
    mesh_y: impl Into<ArrayView<'a>>,
    query_x: impl Into<ArrayView<'a>>,
    query_y: impl Into<ArrayView<'a>>,
) -> Result<NdArray<f64>> {
    point_to_polygon_distance_with(
        &mesh_x.into(),
        &mesh_y.into(),
        &query_x.into(),
        &query_y.into(),
        HullCfg::default(),
        &NoopSink,
    )
}
