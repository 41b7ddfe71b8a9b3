//! Broadcast evaluator: zip-map over arrays of compatible shapes.
//!
//! Purpose
//! - Every kernel in this crate is "one scalar formula applied element-wise".
//!   This module owns the shape rules and the iteration so the kernels don't.
//!
//! Rules
//! - Shapes are right-aligned; each dim must match or be 1 in one operand.
//! - Outputs are allocated once (fallibly) and filled in row-major order.
//! - Inputs are borrowed read-only (`ArrayView`); nothing is copied.

mod array;
mod plan;

pub use array::{ArrayView, NdArray};
pub use plan::{broadcast_shapes, zip_map, zip_map2, BroadcastPlan};
