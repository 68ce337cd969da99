//! Injectable dense matrix multiply (GEMM)
//!
//! The convolution engine needs exactly one linear-algebra capability:
//!
//! ```text
//! C = alpha · op(A) · op(B) + beta · C
//! ```
//!
//! where `op(X)` is `X` or `Xᵀ`. [`Gemm`] captures that contract so the engine can run
//! on any backend. Two implementations ship here:
//!
//! - [`ReferenceGemm`]: plain triple loop, the yardstick for tests
//! - [`ArrayGemm`]: multiplies through `scirs2_core::ndarray_ext` (`dot`), which can
//!   dispatch to an optimized matrix product
//!
//! Following the BLAS convention, `beta == 0` means `C` is written without being read,
//! so stale NaNs in the destination do not leak into the result.

use crate::error::{ConvError, ConvResult};
use scirs2_core::numeric::Float;
use tenconv_core::StridedMatrix;

/// Whether an operand enters the product transposed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transpose {
    /// Use the operand as stored
    No,
    /// Use the transpose of the operand
    Yes,
}

impl Transpose {
    /// Shape of `op(X)` for a stored shape `(rows, cols)`
    pub fn apply(self, (rows, cols): (usize, usize)) -> (usize, usize) {
        match self {
            Transpose::No => (rows, cols),
            Transpose::Yes => (cols, rows),
        }
    }
}

/// Scaled accumulate-multiply `C = alpha · op(A) · op(B) + beta · C`
pub trait Gemm<T> {
    /// Compute the product in place on `c`
    ///
    /// # Errors
    ///
    /// Returns [`ConvError::GemmShape`] when `op(A)` is `m×k`, `op(B)` is not `k×n`,
    /// or `C` is not `m×n`. `C` is left untouched in that case.
    #[allow(clippy::too_many_arguments)]
    fn gemm(
        &self,
        trans_a: Transpose,
        trans_b: Transpose,
        alpha: T,
        a: &StridedMatrix<T>,
        b: &StridedMatrix<T>,
        beta: T,
        c: &mut StridedMatrix<T>,
    ) -> ConvResult<()>;
}

/// Validate operand shapes and return `(m, n, k)`
pub fn gemm_dims<T>(
    trans_a: Transpose,
    trans_b: Transpose,
    a: &StridedMatrix<T>,
    b: &StridedMatrix<T>,
    c: &StridedMatrix<T>,
) -> ConvResult<(usize, usize, usize)> {
    let (a_rows, a_cols) = trans_a.apply(a.shape());
    let (b_rows, b_cols) = trans_b.apply(b.shape());
    let (c_rows, c_cols) = c.shape();
    if a_cols != b_rows || a_rows != c_rows || b_cols != c_cols {
        return Err(ConvError::GemmShape {
            a_rows,
            a_cols,
            b_rows,
            b_cols,
            c_rows,
            c_cols,
        });
    }
    Ok((a_rows, b_cols, a_cols))
}

#[inline]
fn op_at<T: Copy>(m: &StridedMatrix<T>, trans: Transpose, row: usize, col: usize) -> T {
    match trans {
        Transpose::No => m.as_slice()[m.index_of(row, col)],
        Transpose::Yes => m.as_slice()[m.index_of(col, row)],
    }
}

#[inline]
fn blend<T: Float>(alpha: T, product: T, beta: T, existing: T) -> T {
    if beta.is_zero() {
        alpha * product
    } else {
        alpha * product + beta * existing
    }
}

/// Triple-loop GEMM with no dependencies beyond the element type
#[derive(Debug, Clone, Copy, Default)]
pub struct ReferenceGemm;

impl<T: Float> Gemm<T> for ReferenceGemm {
    fn gemm(
        &self,
        trans_a: Transpose,
        trans_b: Transpose,
        alpha: T,
        a: &StridedMatrix<T>,
        b: &StridedMatrix<T>,
        beta: T,
        c: &mut StridedMatrix<T>,
    ) -> ConvResult<()> {
        let (m, n, k) = gemm_dims(trans_a, trans_b, a, b, c)?;
        for i in 0..m {
            let c_row = c.row_mut(i);
            for (j, cij) in c_row.iter_mut().enumerate().take(n) {
                let mut acc = T::zero();
                for p in 0..k {
                    acc = acc + op_at(a, trans_a, i, p) * op_at(b, trans_b, p, j);
                }
                *cij = blend(alpha, acc, beta, *cij);
            }
        }
        Ok(())
    }
}

/// GEMM through `scirs2_core::ndarray_ext` matrix products
#[derive(Debug, Clone, Copy, Default)]
pub struct ArrayGemm;

impl<T: Float + 'static> Gemm<T> for ArrayGemm {
    fn gemm(
        &self,
        trans_a: Transpose,
        trans_b: Transpose,
        alpha: T,
        a: &StridedMatrix<T>,
        b: &StridedMatrix<T>,
        beta: T,
        c: &mut StridedMatrix<T>,
    ) -> ConvResult<()> {
        let (m, n, _) = gemm_dims(trans_a, trans_b, a, b, c)?;
        let a_arr = a.to_array2();
        let b_arr = b.to_array2();
        let product = match (trans_a, trans_b) {
            (Transpose::No, Transpose::No) => a_arr.dot(&b_arr),
            (Transpose::No, Transpose::Yes) => a_arr.dot(&b_arr.t()),
            (Transpose::Yes, Transpose::No) => a_arr.t().dot(&b_arr),
            (Transpose::Yes, Transpose::Yes) => a_arr.t().dot(&b_arr.t()),
        };
        for i in 0..m {
            let c_row = c.row_mut(i);
            for (j, cij) in c_row.iter_mut().enumerate().take(n) {
                *cij = blend(alpha, product[[i, j]], beta, *cij);
            }
        }
        Ok(())
    }
}
