//! Error type shared by every kernel in this crate.
//!
//! All failures are detected before any output is handed back; a call either
//! returns a complete result or one of these variants, never a partial array.

use std::collections::TryReserveError;
use std::fmt;

/// Errors surfaced by the array kernels.
#[derive(Debug, Clone, PartialEq)]
pub enum GeodeticError {
    /// Input arrays are not broadcast-compatible, or a buffer does not match its shape.
    Shape { reason: String },
    /// An input could not be coerced to a `f64` array.
    Type { reason: String },
    /// An output buffer could not be reserved.
    Allocation { elements: usize },
    /// The convex hull of a mesh could not be built (empty mesh, non-finite coordinates).
    Geometry { reason: String },
}

impl GeodeticError {
    pub(crate) fn shape(reason: impl Into<String>) -> Self {
        Self::Shape {
            reason: reason.into(),
        }
    }

    pub fn type_error(reason: impl Into<String>) -> Self {
        Self::Type {
            reason: reason.into(),
        }
    }

    pub(crate) fn geometry(reason: impl Into<String>) -> Self {
        Self::Geometry {
            reason: reason.into(),
        }
    }
}

impl fmt::Display for GeodeticError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Shape { reason } => write!(f, "shape mismatch: {reason}"),
            Self::Type { reason } => write!(f, "invalid input type: {reason}"),
            Self::Allocation { elements } => {
                write!(f, "could not allocate output of {elements} elements")
            }
            Self::Geometry { reason } => write!(f, "geometry error: {reason}"),
        }
    }
}

impl std::error::Error for GeodeticError {}

/// Shorthand result type for the crate.
pub type Result<T> = std::result::Result<T, GeodeticError>;

/// Reserve an output buffer of exactly `len` elements, mapping allocator failure.
pub(crate) fn alloc_output<T>(len: usize) -> Result<Vec<T>> {
    let mut out = Vec::new();
    out.try_reserve_exact(len)
        .map_err(|_: TryReserveError| GeodeticError::Allocation { elements: len })?;
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn oversized_buffer_is_an_allocation_error() {
        let err = alloc_output::<f64>(usize::MAX).unwrap_err();
        assert_eq!(err, GeodeticError::Allocation { elements: usize::MAX });
        assert!(alloc_output::<f64>(4).unwrap().capacity() >= 4);
    }

    #[test]
    fn type_error_names_the_argument() {
        let err = GeodeticError::type_error("lons1: could not convert 'abc' to float64");
        assert!(matches!(err, GeodeticError::Type { .. }));
        assert_eq!(
            err.to_string(),
            "invalid input type: lons1: could not convert 'abc' to float64"
        );
    }
}
