use geodetic::api::{ArrayView, GeodeticError, NdArray};
use numpy::ndarray::{ArrayD, IxDyn};
use numpy::{AllowTypeChange, Element, IntoPyArray, PyArrayDyn, PyArrayLikeDyn};
use pyo3::exceptions::{PyMemoryError, PyTypeError, PyValueError};
use pyo3::prelude::*;

/// Any array-like numpy can coerce to float64 (lists, scalars, int arrays).
type FloatArg<'py> = PyArrayLikeDyn<'py, f64, AllowTypeChange>;

/// Row-major copy of a Python argument, owned so the GIL can be released.
pub struct Owned {
    shape: Vec<usize>,
    data: Vec<f64>,
}

impl Owned {
    /// Coerce `arg` with `numpy.asarray` semantics; failures become `TypeError`s naming `name`.
    pub fn extract<'py>(name: &str, arg: &Bound<'py, PyAny>) -> PyResult<Self> {
        let coerced: FloatArg<'py> = arg.extract().map_err(|err| {
            map_geodetic_err(GeodeticError::type_error(format!("{name}: {err}")))
        })?;
        let array = coerced.as_array();
        Ok(Self {
            shape: array.shape().to_vec(),
            data: array.iter().copied().collect(),
        })
    }

    pub fn view(&self) -> geodetic::Result<ArrayView<'_>> {
        ArrayView::new(&self.data, &self.shape)
    }
}

pub fn map_geodetic_err(err: GeodeticError) -> PyErr {
    match err {
        GeodeticError::Type { .. } => PyTypeError::new_err(err.to_string()),
        GeodeticError::Allocation { .. } => PyMemoryError::new_err(err.to_string()),
        GeodeticError::Shape { .. } | GeodeticError::Geometry { .. } => {
            PyValueError::new_err(err.to_string())
        }
    }
}

pub fn into_numpy<T: Element>(py: Python<'_>, array: NdArray<T>) -> PyResult<Bound<'_, PyArrayDyn<T>>> {
    let (shape, data) = array.into_parts();
    let array = ArrayD::from_shape_vec(IxDyn(&shape), data)
        .map_err(|err| PyValueError::new_err(err.to_string()))?;
    Ok(array.into_pyarray_bound(py))
}
