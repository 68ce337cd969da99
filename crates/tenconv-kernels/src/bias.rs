//! Bias broadcast and bias-seeded GEMM
//!
//! The result matrix is pre-loaded with the bias (every row holds the whole bias
//! vector, one value per output channel) and the GEMM then accumulates onto it with
//! `beta = 1`. That folds `patches · filtersᵀ + bias` into a single pass with no
//! separate addition afterwards.

use crate::error::{ConvError, ConvResult};
use crate::gemm::{Gemm, Transpose};
use crate::im2col::PatchMatrix;
use scirs2_core::numeric::Float;
use tenconv_core::{BiasVector, StridedMatrix};

/// Matrix of `positions` rows, each a copy of `bias`
pub fn broadcast_bias<T: Float>(positions: usize, bias: &BiasVector<T>) -> StridedMatrix<T> {
    let mut seeded = StridedMatrix::zeros(positions, bias.len());
    for row in 0..positions {
        seeded.row_mut(row).copy_from_slice(bias.values());
    }
    seeded
}

/// Compute `patches · filtersᵀ + bias` as one bias-seeded GEMM
///
/// `patches` is `(positions, width)` and `filters` is `(batches, width)`; the result is
/// `(positions, batches)`.
///
/// # Errors
///
/// - [`ConvError::BiasBatchMismatch`] if the bias length differs from the number of
///   filter rows
/// - [`ConvError::LayoutMismatch`] if the two operands order their columns differently
/// - [`ConvError::GemmShape`] if the GEMM rejects the operand shapes
pub fn bias_seeded_gemm<T, G>(
    gemm: &G,
    patches: &PatchMatrix<T>,
    filters: &PatchMatrix<T>,
    bias: &BiasVector<T>,
) -> ConvResult<StridedMatrix<T>>
where
    T: Float,
    G: Gemm<T> + ?Sized,
{
    let batches = filters.matrix().rows();
    if bias.len() != batches {
        return Err(ConvError::BiasBatchMismatch {
            bias: bias.len(),
            batches,
        });
    }
    if patches.layout() != filters.layout() {
        return Err(ConvError::LayoutMismatch {
            image: patches.layout(),
            filter: filters.layout(),
        });
    }

    let mut result = broadcast_bias(patches.matrix().rows(), bias);
    gemm.gemm(
        Transpose::No,
        Transpose::Yes,
        T::one(),
        patches.matrix(),
        filters.matrix(),
        T::one(),
        &mut result,
    )?;
    Ok(result)
}
