//! Shape broadcasting and the strided co-iteration behind every kernel.

use super::array::{ArrayView, NdArray};
use crate::error::{alloc_output, GeodeticError, Result};

/// Broadcast shape of all `shapes` (right-aligned; each dim equal or 1).
pub fn broadcast_shapes(shapes: &[&[usize]]) -> Result<Vec<usize>> {
    let ndim = shapes.iter().map(|s| s.len()).max().unwrap_or(0);
    let mut out = vec![1usize; ndim];
    for shape in shapes {
        let offset = ndim - shape.len();
        for (axis, &dim) in shape.iter().enumerate() {
            let slot = &mut out[offset + axis];
            if *slot == dim || dim == 1 {
                continue;
            }
            if *slot == 1 {
                *slot = dim;
                continue;
            }
            return Err(GeodeticError::shape(format!(
                "operands could not be broadcast together with shapes {shapes:?}"
            )));
        }
    }
    Ok(out)
}

/// Element strides of `shape` read under the broadcast shape `out` (0 on stretched axes).
fn broadcast_strides(shape: &[usize], out: &[usize]) -> Vec<usize> {
    let offset = out.len() - shape.len();
    let mut strides = vec![0usize; out.len()];
    let mut step = 1usize;
    for axis in (0..shape.len()).rev() {
        if shape[axis] != 1 {
            strides[offset + axis] = step;
        }
        step *= shape[axis];
    }
    strides
}

/// A validated co-iteration over `K` broadcast-compatible inputs.
///
/// The shape check happens in [`BroadcastPlan::new`], so no element is read
/// before every operand is known to fit. Traversal is row-major over the
/// broadcast shape.
pub struct BroadcastPlan<'a, const K: usize> {
    shape: Vec<usize>,
    len: usize,
    data: [&'a [f64]; K],
    strides: [Vec<usize>; K],
    contiguous: bool,
}

impl<'a, const K: usize> BroadcastPlan<'a, K> {
    pub fn new(inputs: [&ArrayView<'a>; K]) -> Result<Self> {
        let shapes: Vec<&[usize]> = inputs.iter().map(|v| v.shape()).collect();
        let shape = broadcast_shapes(&shapes)?;
        let len = shape.iter().product();
        let contiguous = inputs.iter().all(|v| v.shape() == shape.as_slice());
        let data = inputs.map(|v| v.data());
        let strides = inputs.map(|v| broadcast_strides(v.shape(), &shape));
        Ok(Self {
            shape,
            len,
            data,
            strides,
            contiguous,
        })
    }

    #[inline]
    pub fn shape(&self) -> &[usize] {
        &self.shape
    }

    /// Number of elements in the broadcast result.
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Visit every broadcast element once, in row-major order.
    pub fn for_each<F: FnMut([f64; K])>(&self, mut f: F) {
        if self.len == 0 {
            return;
        }
        if self.contiguous {
            for i in 0..self.len {
                f(std::array::from_fn(|k| self.data[k][i]));
            }
            return;
        }
        let ndim = self.shape.len();
        let mut index = vec![0usize; ndim];
        let mut offsets = [0usize; K];
        for _ in 0..self.len {
            f(std::array::from_fn(|k| self.data[k][offsets[k]]));
            // odometer step
            for axis in (0..ndim).rev() {
                index[axis] += 1;
                for (offset, strides) in offsets.iter_mut().zip(&self.strides) {
                    *offset += strides[axis];
                }
                if index[axis] < self.shape[axis] {
                    break;
                }
                for (offset, strides) in offsets.iter_mut().zip(&self.strides) {
                    *offset -= strides[axis] * self.shape[axis];
                }
                index[axis] = 0;
            }
        }
    }
}

/// Map `f` element-wise over broadcast-compatible inputs into one fresh array.
pub fn zip_map<const K: usize, T, F>(inputs: [&ArrayView<'_>; K], mut f: F) -> Result<NdArray<T>>
where
    F: FnMut([f64; K]) -> T,
{
    let plan = BroadcastPlan::new(inputs)?;
    let mut out = alloc_output(plan.len())?;
    plan.for_each(|vals| out.push(f(vals)));
    NdArray::from_shape_vec(plan.shape().to_vec(), out)
}

/// Like [`zip_map`] but producing two arrays from a single pass.
pub fn zip_map2<const K: usize, A, B, F>(
    inputs: [&ArrayView<'_>; K],
    mut f: F,
) -> Result<(NdArray<A>, NdArray<B>)>
where
    F: FnMut([f64; K]) -> (A, B),
{
    let plan = BroadcastPlan::new(inputs)?;
    let mut out_a = alloc_output(plan.len())?;
    let mut out_b = alloc_output(plan.len())?;
    plan.for_each(|vals| {
        let (a, b) = f(vals);
        out_a.push(a);
        out_b.push(b);
    });
    let shape = plan.shape().to_vec();
    Ok((
        NdArray::from_shape_vec(shape.clone(), out_a)?,
        NdArray::from_shape_vec(shape, out_b)?,
    ))
}
