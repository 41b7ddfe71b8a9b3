//! Point-pair kernels: distance, azimuth, cross-track distance.

use crate::common::{into_numpy, map_geodetic_err, Owned};
use geodetic::api::{distance_to_arc as arc_kernel, geodetic_distance_mode, Measure};
use numpy::PyArrayDyn;
use pyo3::prelude::*;

/// Great-circle distance in km, or the azimuth in radians when `azimuth` is set.
#[pyfunction]
#[pyo3(signature = (lons1, lats1, lons2, lats2, azimuth = false))]
pub fn geodetic_distance<'py>(
    py: Python<'py>,
    lons1: &Bound<'py, PyAny>,
    lats1: &Bound<'py, PyAny>,
    lons2: &Bound<'py, PyAny>,
    lats2: &Bound<'py, PyAny>,
    azimuth: bool,
) -> PyResult<Bound<'py, PyArrayDyn<f64>>> {
    let args = [
        Owned::extract("lons1", lons1)?,
        Owned::extract("lats1", lats1)?,
        Owned::extract("lons2", lons2)?,
        Owned::extract("lats2", lats2)?,
    ];
    let measure = if azimuth {
        Measure::Azimuth
    } else {
        Measure::Distance
    };
    let out = py
        .allow_threads(|| {
            let [a, b, c, d] = &args;
            geodetic_distance_mode(a.view()?, b.view()?, c.view()?, d.view()?, measure)
        })
        .map_err(map_geodetic_err)?;
    into_numpy(py, out)
}

/// Signed distance in km from each point to the great circle of each arc.
#[pyfunction]
pub fn distance_to_arc<'py>(
    py: Python<'py>,
    arc_lons: &Bound<'py, PyAny>,
    arc_lats: &Bound<'py, PyAny>,
    arc_azimuths: &Bound<'py, PyAny>,
    point_lons: &Bound<'py, PyAny>,
    point_lats: &Bound<'py, PyAny>,
) -> PyResult<Bound<'py, PyArrayDyn<f64>>> {
    let args = [
        Owned::extract("arc_lons", arc_lons)?,
        Owned::extract("arc_lats", arc_lats)?,
        Owned::extract("arc_azimuths", arc_azimuths)?,
        Owned::extract("point_lons", point_lons)?,
        Owned::extract("point_lats", point_lats)?,
    ];
    let out = py
        .allow_threads(|| {
            let [a, b, c, d, e] = &args;
            arc_kernel(a.view()?, b.view()?, c.view()?, d.view()?, e.view()?)
        })
        .map_err(map_geodetic_err)?;
    into_numpy(py, out)
}

pub fn register(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_function(wrap_pyfunction!(geodetic_distance, m)?)?;
    m.add_function(wrap_pyfunction!(distance_to_arc, m)?)?;
    Ok(())
}
