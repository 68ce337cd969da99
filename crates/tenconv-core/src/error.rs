//! Error types for tensor construction and manipulation
//!
//! Every constructor that accepts a caller-provided buffer validates it against the
//! declared shape, so a tensor value in hand always satisfies its length invariant.

use thiserror::Error;

/// Error type for tensor operations in `tenconv-core`
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TensorError {
    /// Backing buffer length disagrees with the declared shape
    #[error("{what}: shape {shape:?} requires {expected} elements, got {actual}")]
    BufferLength {
        what: &'static str,
        shape: Vec<usize>,
        expected: usize,
        actual: usize,
    },

    /// Row stride smaller than the logical column count
    #[error("Row stride {stride} is smaller than column count {cols}")]
    InvalidStride { stride: usize, cols: usize },

    /// Two operands of an elementwise operation have different shapes
    #[error("{operation}: shape mismatch {left:?} vs {right:?}")]
    ShapeMismatch {
        operation: &'static str,
        left: Vec<usize>,
        right: Vec<usize>,
    },

    /// Crop margins remove more rows or columns than the image has
    #[error("Cannot crop {margin} {axis} from an image with {size} {axis}")]
    CropOutOfRange {
        axis: &'static str,
        margin: usize,
        size: usize,
    },

    /// Index outside the tensor bounds
    #[error("Index {index:?} out of bounds for shape {shape:?}")]
    IndexOutOfBounds { index: Vec<usize>, shape: Vec<usize> },

    /// Invalid distribution parameters for random initialization
    #[error("Invalid distribution parameters: {0}")]
    InvalidDistribution(String),
}

/// Result type for tensor operations
pub type TensorResult<T> = Result<T, TensorError>;

impl TensorError {
    /// Create a buffer length error
    pub fn buffer_length(
        what: &'static str,
        shape: &[usize],
        expected: usize,
        actual: usize,
    ) -> Self {
        TensorError::BufferLength {
            what,
            shape: shape.to_vec(),
            expected,
            actual,
        }
    }

    /// Check that a buffer of `actual` elements fills `shape` exactly
    ///
    /// A shape whose element count overflows `usize` can never be filled; it is
    /// reported with `expected == usize::MAX`.
    pub(crate) fn check_buffer(what: &'static str, shape: &[usize], actual: usize) -> TensorResult<()> {
        let expected = shape.iter().try_fold(1usize, |acc, &d| acc.checked_mul(d));
        match expected {
            Some(expected) if expected == actual => Ok(()),
            Some(expected) => Err(Self::buffer_length(what, shape, expected, actual)),
            None => Err(Self::buffer_length(what, shape, usize::MAX, actual)),
        }
    }

    /// Create a shape mismatch error
    pub fn shape_mismatch(operation: &'static str, left: &[usize], right: &[usize]) -> Self {
        TensorError::ShapeMismatch {
            operation,
            left: left.to_vec(),
            right: right.to_vec(),
        }
    }
}
