//! Result reconstruction
//!
//! The multiply result has one row per output position and one column per output
//! channel. Reconstruction scatters it into channel-major planes:
//! `result[row·out_cols + col][ch] → image[ch][row][col]`.

use crate::error::{ConvError, ConvResult};
use crate::im2col::OutputDims;
use scirs2_core::numeric::Float;
use tenconv_core::{ImageTensor, StridedMatrix};

/// Map a `(positions, channels)` result matrix back to an image of shape
/// `(channels, out.rows, out.cols)`
///
/// # Errors
///
/// Returns [`ConvError::ResultRowMismatch`] unless the result has exactly
/// `out.rows * out.cols` rows; a mismatch is never truncated or padded.
///
/// # Examples
///
/// ```
/// use tenconv_core::StridedMatrix;
/// use tenconv_kernels::{reconstruct_image, OutputDims};
///
/// // 2 positions x 2 channels
/// let result = StridedMatrix::from_vec(2, 2, vec![1.0, 10.0, 2.0, 20.0]).unwrap();
/// let img = reconstruct_image(&result, OutputDims { rows: 1, cols: 2 }).unwrap();
/// assert_eq!(img.shape(), [2, 1, 2]);
/// assert_eq!(img.as_slice(), &[1.0, 2.0, 10.0, 20.0]);
/// ```
pub fn reconstruct_image<T: Float>(
    result: &StridedMatrix<T>,
    out: OutputDims,
) -> ConvResult<ImageTensor<T>> {
    if result.rows() != out.positions() {
        return Err(ConvError::ResultRowMismatch {
            expected: out.positions(),
            actual: result.rows(),
            out_rows: out.rows,
            out_cols: out.cols,
        });
    }
    Ok(ImageTensor::from_fn(
        result.cols(),
        out.rows,
        out.cols,
        |ch, row, col| result.row(out.position(row, col))[ch],
    ))
}
