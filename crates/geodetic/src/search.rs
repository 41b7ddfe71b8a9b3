//! Minimum-distance search: nearest mesh point for every query point.
//!
//! Purpose
//! - For each query point, scan the whole mesh once and keep the running
//!   minimum of the depth-aware distance (and optionally where it occurred).
//!
//! Semantics
//! - Surface distance is the haversine formula; depth difference is combined
//!   as `sqrt(surface² + vertical²)`, skipped when the vertical offset is 0.
//! - The mesh is flattened row-major; reported indices refer to that order.
//! - Replacement is on strict `<` only, so ties keep the earliest index.
//! - A query whose every candidate distance is NaN reports NaN / index `-1`.
//! - Linear scan, O(|query| × |mesh|); no spatial index.

use crate::broadcast::{ArrayView, BroadcastPlan, NdArray};
use crate::cfg::EARTH_RADIUS;
use crate::error::{alloc_output, GeodeticError, Result};
use crate::sphere::{combine_vertical, haversine_term, Point};

/// Per-mesh-point values computed once per call.
#[derive(Clone, Copy, Debug)]
struct MeshPoint {
    lon: f64,
    lat: f64,
    cos_lat: f64,
    depth: f64,
}

/// Reference point set searched for nearest neighbours.
///
/// Built from broadcast-compatible lon/lat(/depth) arrays and flattened to a
/// single ordered sequence.
#[derive(Clone, Debug)]
pub struct Mesh {
    points: Vec<MeshPoint>,
}

impl Mesh {
    /// Mesh from lon/lat (radians) and optional depth (km) arrays.
    pub fn new(lons: &ArrayView<'_>, lats: &ArrayView<'_>, depths: Option<&ArrayView<'_>>) -> Result<Self> {
        let zero = 0.0;
        let surface = ArrayView::scalar(&zero);
        let depths = depths.unwrap_or(&surface);
        let plan = BroadcastPlan::new([lons, lats, depths])?;
        if plan.is_empty() {
            return Err(GeodeticError::shape("mesh has no points"));
        }
        let mut points = alloc_output(plan.len())?;
        plan.for_each(|[lon, lat, depth]| {
            points.push(MeshPoint {
                lon,
                lat,
                cos_lat: lat.cos(),
                depth,
            })
        });
        Ok(Self { points })
    }

    /// Mesh from individual points, in order.
    pub fn from_points(points: &[Point]) -> Result<Self> {
        if points.is_empty() {
            return Err(GeodeticError::shape("mesh has no points"));
        }
        let mut mesh = alloc_output(points.len())?;
        mesh.extend(points.iter().map(|p| MeshPoint {
            lon: p.lon,
            lat: p.lat,
            cos_lat: p.lat.cos(),
            depth: p.depth,
        }));
        Ok(Self { points: mesh })
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// The mesh point at flattened position `index`.
    pub fn point(&self, index: usize) -> Option<Point> {
        self.points
            .get(index)
            .map(|m| Point::with_depth(m.lon, m.lat, m.depth))
    }

    /// Nearest mesh point to one query point: `(distance, index)`.
    ///
    /// Index is `None` only when no candidate distance compares (NaN input).
    pub fn nearest(&self, query: &Point) -> (f64, Option<usize>) {
        let cos_lat = query.lat.cos();
        let mut min_dist = f64::INFINITY;
        let mut min_idx = None;
        for (idx, m) in self.points.iter().enumerate() {
            let h = haversine_term(query.lon, query.lat, cos_lat, m.lon, m.lat, m.cos_lat);
            let surface = EARTH_RADIUS * (2.0 * h.sqrt().asin());
            let dist = combine_vertical(surface, query.depth - m.depth);
            if dist < min_dist {
                min_dist = dist;
                min_idx = Some(idx);
            }
        }
        match min_idx {
            Some(_) => (min_dist, min_idx),
            None => (f64::NAN, None),
        }
    }

    /// Nearest distance (km) or flattened mesh index for every query point.
    pub fn min_distance(&self, query: &PointSet<'_>, report_index: bool) -> Result<Nearest> {
        if report_index {
            self.nearest_indices(query).map(Nearest::Indices)
        } else {
            self.nearest_distances(query).map(Nearest::Distances)
        }
    }

    /// Nearest distance (km) for every query point.
    pub fn nearest_distances(&self, query: &PointSet<'_>) -> Result<NdArray<f64>> {
        self.scan(query, |(dist, _)| dist)
    }

    /// Flattened index of the nearest mesh point for every query point.
    pub fn nearest_indices(&self, query: &PointSet<'_>) -> Result<NdArray<i64>> {
        self.scan(query, |(_, idx)| idx.map_or(-1, |i| i as i64))
    }

    /// Coordinates of the nearest mesh point for every query point.
    pub fn closest_points(&self, query: &PointSet<'_>) -> Result<ClosestPoints> {
        let indices = self.nearest_indices(query)?;
        let pick = |f: fn(&MeshPoint) -> f64| {
            indices.map(|&i| {
                usize::try_from(i)
                    .ok()
                    .and_then(|i| self.points.get(i))
                    .map_or(f64::NAN, f)
            })
        };
        Ok(ClosestPoints {
            lons: pick(|m| m.lon),
            lats: pick(|m| m.lat),
            depths: pick(|m| m.depth),
        })
    }

    fn scan<T, F>(&self, query: &PointSet<'_>, mut emit: F) -> Result<NdArray<T>>
    where
        F: FnMut((f64, Option<usize>)) -> T,
    {
        let zero = 0.0;
        let surface = ArrayView::scalar(&zero);
        let depths = query.depths.as_ref().unwrap_or(&surface);
        let plan = BroadcastPlan::new([&query.lons, &query.lats, depths])?;
        tracing::debug!(mesh = self.len(), queries = plan.len(), "nearest mesh scan");
        let mut out = alloc_output(plan.len())?;
        plan.for_each(|[lon, lat, depth]| {
            out.push(emit(self.nearest(&Point::with_depth(lon, lat, depth))));
        });
        NdArray::from_shape_vec(plan.shape().to_vec(), out)
    }
}

/// Query side of a search: lon/lat(/depth) arrays broadcast against each other.
#[derive(Clone, Debug)]
pub struct PointSet<'a> {
    pub lons: ArrayView<'a>,
    pub lats: ArrayView<'a>,
    pub depths: Option<ArrayView<'a>>,
}

impl<'a> PointSet<'a> {
    /// Surface points.
    pub fn new(lons: impl Into<ArrayView<'a>>, lats: impl Into<ArrayView<'a>>) -> Self {
        Self {
            lons: lons.into(),
            lats: lats.into(),
            depths: None,
        }
    }

    pub fn with_depths(mut self, depths: impl Into<ArrayView<'a>>) -> Self {
        self.depths = Some(depths.into());
        self
    }
}

/// Search output: one element per query point, never mixed.
#[derive(Clone, Debug, PartialEq)]
pub enum Nearest {
    Distances(NdArray<f64>),
    Indices(NdArray<i64>),
}

impl Nearest {
    pub fn distances(self) -> Option<NdArray<f64>> {
        match self {
            Nearest::Distances(d) => Some(d),
            Nearest::Indices(_) => None,
        }
    }

    pub fn indices(self) -> Option<NdArray<i64>> {
        match self {
            Nearest::Indices(i) => Some(i),
            Nearest::Distances(_) => None,
        }
    }

    pub fn shape(&self) -> &[usize] {
        match self {
            Nearest::Distances(d) => d.shape(),
            Nearest::Indices(i) => i.shape(),
        }
    }
}

/// Coordinates of the nearest mesh points, shaped like the query.
#[derive(Clone, Debug, PartialEq)]
pub struct ClosestPoints {
    pub lons: NdArray<f64>,
    pub lats: NdArray<f64>,
    pub depths: NdArray<f64>,
}

#[cfg(test)]
mod tests;
