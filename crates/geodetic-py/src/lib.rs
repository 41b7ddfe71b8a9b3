//! PyO3 bindings for the `geodetic` kernels.
//!
//! Notes
//! - Keep bindings thin: coerce arguments to float64 arrays, hand them to the
//!   `geodetic::api` surface with the GIL released, and map errors to the
//!   matching Python exception.
//! - Angles are radians on both sides; the Python wrapper owns any degree handling.

use pyo3::prelude::*;

mod common;
mod distance;
mod search;

#[pymodule]
fn geodetic_speedups(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add("EARTH_RADIUS", geodetic::EARTH_RADIUS)?;
    distance::register(m)?;
    search::register(m)?;
    Ok(())
}
