//! Mesh searches and the polygon distance.

use crate::common::{into_numpy, map_geodetic_err, Owned};
use geodetic::api::{
    min_distance as search_kernel, min_geodetic_distance as surface_kernel,
    point_to_polygon_distance_with, HullCfg, Nearest, TracingSink,
};
use numpy::PyArrayDyn;
use pyo3::prelude::*;

/// Distance in km to the nearest mesh point, or its flattened index when `indices` is set.
#[pyfunction]
#[pyo3(signature = (mesh_lons, mesh_lats, mesh_depths, lons, lats, depths, indices = false))]
#[allow(clippy::too_many_arguments)]
pub fn min_distance<'py>(
    py: Python<'py>,
    mesh_lons: &Bound<'py, PyAny>,
    mesh_lats: &Bound<'py, PyAny>,
    mesh_depths: &Bound<'py, PyAny>,
    lons: &Bound<'py, PyAny>,
    lats: &Bound<'py, PyAny>,
    depths: &Bound<'py, PyAny>,
    indices: bool,
) -> PyResult<PyObject> {
    let args = [
        Owned::extract("mesh_lons", mesh_lons)?,
        Owned::extract("mesh_lats", mesh_lats)?,
        Owned::extract("mesh_depths", mesh_depths)?,
        Owned::extract("lons", lons)?,
        Owned::extract("lats", lats)?,
        Owned::extract("depths", depths)?,
    ];
    let nearest = py
        .allow_threads(|| {
            let [a, b, c, d, e, f] = &args;
            search_kernel(
                a.view()?,
                b.view()?,
                c.view()?,
                d.view()?,
                e.view()?,
                f.view()?,
                indices,
            )
        })
        .map_err(map_geodetic_err)?;
    Ok(match nearest {
        Nearest::Distances(d) => into_numpy(py, d)?.into_any().unbind(),
        Nearest::Indices(i) => into_numpy(py, i)?.into_any().unbind(),
    })
}

/// Surface-only distance in km to the nearest mesh point.
#[pyfunction]
pub fn min_geodetic_distance<'py>(
    py: Python<'py>,
    mesh_lons: &Bound<'py, PyAny>,
    mesh_lats: &Bound<'py, PyAny>,
    lons: &Bound<'py, PyAny>,
    lats: &Bound<'py, PyAny>,
) -> PyResult<Bound<'py, PyArrayDyn<f64>>> {
    let args = [
        Owned::extract("mesh_lons", mesh_lons)?,
        Owned::extract("mesh_lats", mesh_lats)?,
        Owned::extract("lons", lons)?,
        Owned::extract("lats", lats)?,
    ];
    let out = py
        .allow_threads(|| {
            let [a, b, c, d] = &args;
            surface_kernel(a.view()?, b.view()?, c.view()?, d.view()?)
        })
        .map_err(map_geodetic_err)?;
    into_numpy(py, out)
}

/// Planar distance from each point to the convex hull of the mesh; 0 inside.
#[pyfunction]
pub fn point_to_polygon_distance<'py>(
    py: Python<'py>,
    mesh_x: &Bound<'py, PyAny>,
    mesh_y: &Bound<'py, PyAny>,
    x: &Bound<'py, PyAny>,
    y: &Bound<'py, PyAny>,
) -> PyResult<Bound<'py, PyArrayDyn<f64>>> {
    let args = [
        Owned::extract("mesh_x", mesh_x)?,
        Owned::extract("mesh_y", mesh_y)?,
        Owned::extract("x", x)?,
        Owned::extract("y", y)?,
    ];
    let out = py
        .allow_threads(|| {
            let [a, b, c, d] = &args;
            point_to_polygon_distance_with(
                &a.view()?,
                &b.view()?,
                &c.view()?,
                &d.view()?,
                HullCfg::default(),
                &TracingSink,
            )
        })
        .map_err(map_geodetic_err)?;
    into_numpy(py, out)
}

pub fn register(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_function(wrap_pyfunction!(min_distance, m)?)?;
    m.add_function(wrap_pyfunction!(min_geodetic_distance, m)?)?;
    m.add_function(wrap_pyfunction!(point_to_polygon_distance, m)?)?;
    Ok(())
}
