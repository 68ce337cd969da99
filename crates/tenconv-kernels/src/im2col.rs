//! Image-to-column expansion
//!
//! `im2col` turns a valid 2D convolution into one matrix product. Every output
//! position `(out_row, out_col)` becomes one matrix row (row-major over positions),
//! holding the receptive field under the kernel at that position. Inside a row the
//! columns follow [`PatchLayout::channel_row_col`]: channel outermost, then kernel
//! row, then kernel column. Filter flattening must produce the same layout; the
//! layout travels with the matrix in [`PatchMatrix`] so consumers can check it.
//!
//! ```text
//! image (C, R, W), kernel (Fr, Fc)
//!   → matrix ((R-Fr+1)·(W-Fc+1), C·Fr·Fc)
//!   row    = out_row·(W-Fc+1) + out_col
//!   column = (ch·Fr + kr)·Fc + kc
//!   value  = image[ch][out_row + kr][out_col + kc]
//! ```

use crate::error::{ConvError, ConvResult};
use scirs2_core::numeric::Float;
use tenconv_core::{ImageTensor, PatchLayout, StridedMatrix};

/// Spatial size of a valid convolution output
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OutputDims {
    /// Output rows (`image_rows - filter_rows + 1`)
    pub rows: usize,
    /// Output columns (`image_cols - filter_cols + 1`)
    pub cols: usize,
}

impl OutputDims {
    /// Output dims of a valid convolution
    ///
    /// # Errors
    ///
    /// Returns [`ConvError::FilterDoesNotFit`] when either filter dimension is zero or
    /// exceeds the corresponding image dimension, i.e. when an output dimension would
    /// not be positive.
    ///
    /// # Examples
    ///
    /// ```
    /// use tenconv_kernels::OutputDims;
    ///
    /// let dims = OutputDims::valid(5, 7, 3, 3).unwrap();
    /// assert_eq!((dims.rows, dims.cols), (3, 5));
    /// assert!(OutputDims::valid(2, 7, 3, 3).is_err());
    /// ```
    pub fn valid(
        image_rows: usize,
        image_cols: usize,
        filter_rows: usize,
        filter_cols: usize,
    ) -> ConvResult<Self> {
        let fits = filter_rows > 0
            && filter_cols > 0
            && filter_rows <= image_rows
            && filter_cols <= image_cols;
        if !fits {
            return Err(ConvError::FilterDoesNotFit {
                image_rows,
                image_cols,
                filter_rows,
                filter_cols,
            });
        }
        Ok(Self {
            rows: image_rows - filter_rows + 1,
            cols: image_cols - filter_cols + 1,
        })
    }

    /// Number of output positions (`rows * cols`)
    pub fn positions(&self) -> usize {
        self.rows * self.cols
    }

    /// Matrix row of output position `(row, col)`
    #[inline]
    pub fn position(&self, row: usize, col: usize) -> usize {
        row * self.cols + col
    }
}

/// Matrix of flattened receptive fields tagged with its column layout
#[derive(Debug, Clone, PartialEq)]
pub struct PatchMatrix<T> {
    matrix: StridedMatrix<T>,
    layout: PatchLayout,
}

impl<T> PatchMatrix<T> {
    /// Tag `matrix` with `layout`
    ///
    /// # Errors
    ///
    /// Returns [`ConvError::GemmShape`] if the matrix is not exactly `layout.width()`
    /// columns wide.
    pub fn new(matrix: StridedMatrix<T>, layout: PatchLayout) -> ConvResult<Self> {
        if matrix.cols() != layout.width() {
            return Err(ConvError::GemmShape {
                a_rows: matrix.rows(),
                a_cols: matrix.cols(),
                b_rows: layout.width(),
                b_cols: 1,
                c_rows: matrix.rows(),
                c_cols: 1,
            });
        }
        Ok(Self { matrix, layout })
    }

    /// Underlying matrix
    pub fn matrix(&self) -> &StridedMatrix<T> {
        &self.matrix
    }

    /// Column layout of every row
    pub fn layout(&self) -> PatchLayout {
        self.layout
    }

    /// Drop the layout tag
    pub fn into_matrix(self) -> StridedMatrix<T> {
        self.matrix
    }
}

/// Expand `image` into one row per output position of a valid
/// `filter_rows × filter_cols` convolution
///
/// # Errors
///
/// Returns [`ConvError::FilterDoesNotFit`] if the kernel does not fit the image.
/// Pad the image first when the output should keep its size.
///
/// # Examples
///
/// ```
/// use tenconv_core::ImageTensor;
/// use tenconv_kernels::im2col;
///
/// let img = ImageTensor::from_vec(1, 3, 3, (1..=9).map(|v| v as f64).collect()).unwrap();
/// let patches = im2col(&img, 2, 2).unwrap();
/// assert_eq!(patches.matrix().shape(), (4, 4));
/// assert_eq!(patches.matrix().row(0), &[1.0, 2.0, 4.0, 5.0]);
/// assert_eq!(patches.matrix().row(3), &[5.0, 6.0, 8.0, 9.0]);
/// ```
pub fn im2col<T: Float>(
    image: &ImageTensor<T>,
    filter_rows: usize,
    filter_cols: usize,
) -> ConvResult<PatchMatrix<T>> {
    let out = OutputDims::valid(image.rows(), image.cols(), filter_rows, filter_cols)?;
    let layout = PatchLayout::channel_row_col(image.channels(), filter_rows, filter_cols);
    let mut matrix = StridedMatrix::zeros(out.positions(), layout.width());
    let source = image.as_slice();

    for out_row in 0..out.rows {
        for out_col in 0..out.cols {
            let dst = matrix.row_mut(out.position(out_row, out_col));
            for ch in 0..image.channels() {
                for kr in 0..filter_rows {
                    // One kernel row is a contiguous run in both buffers
                    let src = image.index_of(ch, out_row + kr, out_col);
                    let col = layout.column(ch, kr, 0);
                    dst[col..col + filter_cols].copy_from_slice(&source[src..src + filter_cols]);
                }
            }
        }
    }

    PatchMatrix::new(matrix, layout)
}
