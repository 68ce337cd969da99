//! Error types for the convolution engine
//!
//! Every variant names one broken dimension contract. None of them is recovered
//! from internally: the engine is a pure function of its inputs, so a retry would
//! fail the same way.

use tenconv_core::{PatchLayout, TensorError};
use thiserror::Error;

/// Error type for convolution kernels
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConvError {
    /// Container construction or manipulation failed
    #[error("Tensor error: {0}")]
    Tensor(#[from] TensorError),

    /// Bias length field disagrees with the number of stored values
    #[error("Bias declares {declared} values but holds {actual}")]
    BiasLengthMismatch { declared: usize, actual: usize },

    /// Bias length disagrees with the number of output channels
    #[error("Bias has {bias} values but the filter bank has {batches} output channels")]
    BiasBatchMismatch { bias: usize, batches: usize },

    /// Filters expect a different number of input channels than the image has
    #[error("Filters expect {filter} input channels but the image has {image}")]
    ChannelMismatch { image: usize, filter: usize },

    /// Filter is empty or larger than the (padded) image
    #[error(
        "Filter {filter_rows}x{filter_cols} does not fit image {image_rows}x{image_cols}"
    )]
    FilterDoesNotFit {
        image_rows: usize,
        image_cols: usize,
        filter_rows: usize,
        filter_cols: usize,
    },

    /// Patch matrix and filter matrix order their columns differently
    #[error("Column layouts disagree: image patches {image:?}, filters {filter:?}")]
    LayoutMismatch {
        image: PatchLayout,
        filter: PatchLayout,
    },

    /// GEMM operands have incompatible dimensions
    #[error(
        "GEMM dimension mismatch: op(A) is {a_rows}x{a_cols}, op(B) is {b_rows}x{b_cols}, C is {c_rows}x{c_cols}"
    )]
    GemmShape {
        a_rows: usize,
        a_cols: usize,
        b_rows: usize,
        b_cols: usize,
        c_rows: usize,
        c_cols: usize,
    },

    /// Multiply result does not have one row per output position
    #[error("Result has {actual} rows, expected {expected} ({out_rows}x{out_cols} output positions)")]
    ResultRowMismatch {
        expected: usize,
        actual: usize,
        out_rows: usize,
        out_cols: usize,
    },
}

/// Result type for convolution kernels
pub type ConvResult<T> = Result<T, ConvError>;
