//! Owned and borrowed row-major `f64` arrays with an explicit shape.

use crate::error::{GeodeticError, Result};

/// Owned, row-major N-dimensional array.
///
/// The output type of every kernel. A zero-dimensional array (`shape == []`)
/// holds exactly one element.
#[derive(Clone, Debug, PartialEq)]
pub struct NdArray<T> {
    shape: Vec<usize>,
    data: Vec<T>,
}

impl<T> NdArray<T> {
    /// One-dimensional array over `data`.
    pub fn from_vec(data: Vec<T>) -> Self {
        Self {
            shape: vec![data.len()],
            data,
        }
    }

    /// Array with an explicit shape; the element count must match.
    pub fn from_shape_vec(shape: Vec<usize>, data: Vec<T>) -> Result<Self> {
        let expected: usize = shape.iter().product();
        if expected != data.len() {
            return Err(GeodeticError::shape(format!(
                "shape {shape:?} needs {expected} elements, got {}",
                data.len()
            )));
        }
        Ok(Self { shape, data })
    }

    /// Zero-dimensional array holding `value`.
    pub fn scalar(value: T) -> Self {
        Self {
            shape: Vec::new(),
            data: vec![value],
        }
    }

    #[inline]
    pub fn shape(&self) -> &[usize] {
        &self.shape
    }

    #[inline]
    pub fn ndim(&self) -> usize {
        self.shape.len()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    #[inline]
    pub fn as_slice(&self) -> &[T] {
        &self.data
    }

    pub fn into_vec(self) -> Vec<T> {
        self.data
    }

    pub fn into_parts(self) -> (Vec<usize>, Vec<T>) {
        (self.shape, self.data)
    }

    /// Element at a full multi-index, `None` when out of bounds.
    pub fn get(&self, index: &[usize]) -> Option<&T> {
        if index.len() != self.shape.len() {
            return None;
        }
        let mut flat = 0usize;
        for (&i, &dim) in index.iter().zip(&self.shape) {
            if i >= dim {
                return None;
            }
            flat = flat * dim + i;
        }
        self.data.get(flat)
    }

    /// Element-wise map preserving the shape.
    pub fn map<U, F: FnMut(&T) -> U>(&self, f: F) -> NdArray<U> {
        NdArray {
            shape: self.shape.clone(),
            data: self.data.iter().map(f).collect(),
        }
    }
}

impl NdArray<f64> {
    /// Borrow as a broadcastable input.
    pub fn view(&self) -> ArrayView<'_> {
        ArrayView {
            data: &self.data,
            shape: self.shape.clone(),
        }
    }
}

/// Borrowed, read-only `f64` input array.
///
/// Kernels never mutate their inputs; a view is all they need.
#[derive(Clone, Debug, PartialEq)]
pub struct ArrayView<'a> {
    data: &'a [f64],
    shape: Vec<usize>,
}

impl<'a> ArrayView<'a> {
    /// View `data` under `shape`; the element count must match.
    pub fn new(data: &'a [f64], shape: &[usize]) -> Result<Self> {
        let expected: usize = shape.iter().product();
        if expected != data.len() {
            return Err(GeodeticError::shape(format!(
                "shape {shape:?} needs {expected} elements, got {}",
                data.len()
            )));
        }
        Ok(Self {
            data,
            shape: shape.to_vec(),
        })
    }

    /// Zero-dimensional view of a single value.
    pub fn scalar(value: &'a f64) -> Self {
        Self {
            data: std::slice::from_ref(value),
            shape: Vec::new(),
        }
    }

    #[inline]
    pub fn shape(&self) -> &[usize] {
        &self.shape
    }

    #[inline]
    pub fn data(&self) -> &'a [f64] {
        self.data
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

impl<'a> From<&'a [f64]> for ArrayView<'a> {
    fn from(data: &'a [f64]) -> Self {
        Self {
            data,
            shape: vec![data.len()],
        }
    }
}

impl<'a, const N: usize> From<&'a [f64; N]> for ArrayView<'a> {
    fn from(data: &'a [f64; N]) -> Self {
        Self::from(&data[..])
    }
}

impl<'a> From<&'a Vec<f64>> for ArrayView<'a> {
    fn from(data: &'a Vec<f64>) -> Self {
        Self::from(data.as_slice())
    }
}

impl<'a> From<&'a f64> for ArrayView<'a> {
    fn from(value: &'a f64) -> Self {
        Self::scalar(value)
    }
}

impl<'a> From<&'a NdArray<f64>> for ArrayView<'a> {
    fn from(array: &'a NdArray<f64>) -> Self {
        array.view()
    }
}
