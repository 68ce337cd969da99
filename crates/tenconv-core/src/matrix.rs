//! Row-major dense matrix with an explicit row stride
//!
//! [`StridedMatrix`] is the exchange type at the GEMM boundary. Rows are `stride`
//! elements apart in the backing buffer; only the first `cols` elements of each
//! physical row belong to the logical matrix, the rest is padding that GEMM
//! implementations must neither read nor write.

use crate::error::{TensorError, TensorResult};
use scirs2_core::ndarray_ext::Array2;
use scirs2_core::numeric::Float;

/// Dense `rows × cols` matrix, row-major, with `stride >= cols`
///
/// # Invariant
///
/// `stride >= cols` and `data.len() == rows * stride`.
///
/// # Examples
///
/// ```
/// use tenconv_core::StridedMatrix;
///
/// // 2x2 logical matrix stored in rows of 3
/// let m = StridedMatrix::from_vec_strided(2, 2, 3, vec![1.0, 2.0, 0.0, 3.0, 4.0, 0.0]).unwrap();
/// assert_eq!(m.row(1), &[3.0, 4.0]);
/// assert_eq!(m.get(0, 1), Some(2.0));
/// assert_eq!(m.get(0, 2), None);
/// ```
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(
    feature = "serde",
    serde(
        try_from = "StridedMatrixParts<T>",
        bound(deserialize = "T: serde::Deserialize<'de>")
    )
)]
pub struct StridedMatrix<T> {
    rows: usize,
    cols: usize,
    stride: usize,
    data: Vec<T>,
}

/// Wire form of [`StridedMatrix`], validated on the way in
#[cfg(feature = "serde")]
#[derive(serde::Deserialize)]
struct StridedMatrixParts<T> {
    rows: usize,
    cols: usize,
    stride: usize,
    data: Vec<T>,
}

#[cfg(feature = "serde")]
impl<T> TryFrom<StridedMatrixParts<T>> for StridedMatrix<T> {
    type Error = TensorError;

    fn try_from(parts: StridedMatrixParts<T>) -> TensorResult<Self> {
        Self::from_vec_strided(parts.rows, parts.cols, parts.stride, parts.data)
    }
}

impl<T> StridedMatrix<T> {
    /// Matrix over a tightly packed buffer (`stride == cols`)
    pub fn from_vec(rows: usize, cols: usize, data: Vec<T>) -> TensorResult<Self> {
        Self::from_vec_strided(rows, cols, cols, data)
    }

    /// Matrix over a buffer whose rows are `stride` elements apart
    ///
    /// # Errors
    ///
    /// - [`TensorError::InvalidStride`] if `stride < cols`
    /// - [`TensorError::BufferLength`] if `data.len() != rows * stride`
    pub fn from_vec_strided(
        rows: usize,
        cols: usize,
        stride: usize,
        data: Vec<T>,
    ) -> TensorResult<Self> {
        if stride < cols {
            return Err(TensorError::InvalidStride { stride, cols });
        }
        TensorError::check_buffer("StridedMatrix", &[rows, stride], data.len())?;
        Ok(Self {
            rows,
            cols,
            stride,
            data,
        })
    }

    /// Number of rows
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Number of logical columns
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Distance between consecutive rows in the buffer
    pub fn stride(&self) -> usize {
        self.stride
    }

    /// Logical shape `(rows, cols)`
    pub fn shape(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }

    /// Buffer offset of element `(row, col)`
    #[inline]
    pub fn index_of(&self, row: usize, col: usize) -> usize {
        row * self.stride + col
    }

    /// Checked element read
    pub fn get(&self, row: usize, col: usize) -> Option<T>
    where
        T: Copy,
    {
        if row < self.rows && col < self.cols {
            Some(self.data[self.index_of(row, col)])
        } else {
            None
        }
    }

    /// Checked element write
    pub fn set(&mut self, row: usize, col: usize, value: T) -> TensorResult<()> {
        if row >= self.rows || col >= self.cols {
            return Err(TensorError::IndexOutOfBounds {
                index: vec![row, col],
                shape: vec![self.rows, self.cols],
            });
        }
        let idx = self.index_of(row, col);
        self.data[idx] = value;
        Ok(())
    }

    /// Logical elements of row `row`
    ///
    /// # Panics
    ///
    /// Panics if `row >= self.rows()`.
    pub fn row(&self, row: usize) -> &[T] {
        let start = row * self.stride;
        &self.data[start..start + self.cols]
    }

    /// Mutable logical elements of row `row`
    ///
    /// # Panics
    ///
    /// Panics if `row >= self.rows()`.
    pub fn row_mut(&mut self, row: usize) -> &mut [T] {
        let start = row * self.stride;
        &mut self.data[start..start + self.cols]
    }

    /// Iterator over logical rows
    pub fn row_iter(&self) -> impl Iterator<Item = &[T]> + '_ {
        (0..self.rows).map(move |r| self.row(r))
    }

    /// Full backing buffer, including stride padding
    pub fn as_slice(&self) -> &[T] {
        &self.data
    }

    /// Consume the matrix and return the backing buffer
    pub fn into_vec(self) -> Vec<T> {
        self.data
    }
}

impl<T: Float> StridedMatrix<T> {
    /// Zero matrix with `stride == cols`
    pub fn zeros(rows: usize, cols: usize) -> Self {
        Self {
            rows,
            cols,
            stride: cols,
            data: vec![T::zero(); rows * cols],
        }
    }

    /// Zero matrix with padded rows
    pub fn zeros_strided(rows: usize, cols: usize, stride: usize) -> TensorResult<Self> {
        Self::from_vec_strided(rows, cols, stride, vec![T::zero(); rows * stride])
    }

    /// Copy of this matrix with `stride == cols`
    pub fn to_packed(&self) -> Self {
        let mut data = Vec::with_capacity(self.rows * self.cols);
        for row in self.row_iter() {
            data.extend_from_slice(row);
        }
        Self {
            rows: self.rows,
            cols: self.cols,
            stride: self.cols,
            data,
        }
    }

    /// Transposed copy (packed)
    pub fn transpose(&self) -> Self {
        let mut out = Self::zeros(self.cols, self.rows);
        for r in 0..self.rows {
            for (c, &v) in self.row(r).iter().enumerate() {
                out.data[c * self.rows + r] = v;
            }
        }
        out
    }

    /// Copy the logical matrix into an `Array2`
    pub fn to_array2(&self) -> Array2<T> {
        Array2::from_shape_fn((self.rows, self.cols), |(r, c)| {
            self.data[self.index_of(r, c)]
        })
    }

    /// Packed matrix from an `Array2`
    pub fn from_array2(array: &Array2<T>) -> Self {
        let (rows, cols) = array.dim();
        let data = array.iter().copied().collect();
        Self {
            rows,
            cols,
            stride: cols,
            data,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stride_smaller_than_cols_rejected() {
        let err = StridedMatrix::from_vec_strided(2, 3, 2, vec![0.0_f64; 4]).unwrap_err();
        assert_eq!(err, TensorError::InvalidStride { stride: 2, cols: 3 });
    }

    #[test]
    fn test_buffer_length_checked_against_stride() {
        assert!(StridedMatrix::from_vec_strided(2, 2, 4, vec![0.0_f64; 6]).is_err());
        assert!(StridedMatrix::from_vec_strided(2, 2, 4, vec![0.0_f64; 8]).is_ok());
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_deserialize_checks_stride_and_length() {
        let narrow = r#"{"rows":1,"cols":3,"stride":1,"data":[1.0]}"#;
        assert!(serde_json::from_str::<StridedMatrix<f64>>(narrow).is_err());
        let short = r#"{"rows":2,"cols":2,"stride":3,"data":[1.0,2.0,0.0,3.0]}"#;
        assert!(serde_json::from_str::<StridedMatrix<f64>>(short).is_err());

        let m = StridedMatrix::from_vec_strided(2, 2, 3, vec![1.0, 2.0, 0.0, 3.0, 4.0, 0.0]).unwrap();
        let back: StridedMatrix<f64> = serde_json::from_str(&serde_json::to_string(&m).unwrap()).unwrap();
        assert_eq!(back, m);
    }

    #[test]
    fn test_overflowing_rows_times_stride_rejected() {
        let huge = usize::MAX / 2 + 1;
        assert!(matches!(
            StridedMatrix::<f64>::from_vec_strided(2, 1, huge, Vec::new()),
            Err(TensorError::BufferLength { expected: usize::MAX, .. })
        ));
    }

    #[test]
    fn test_rows_skip_padding() {
        let m = StridedMatrix::from_vec_strided(
            3,
            2,
            4,
            vec![
                1.0, 2.0, -9.0, -9.0, //
                3.0, 4.0, -9.0, -9.0, //
                5.0, 6.0, -9.0, -9.0,
            ],
        )
        .unwrap();
        let rows: Vec<&[f64]> = m.row_iter().collect();
        assert_eq!(rows, vec![&[1.0, 2.0][..], &[3.0, 4.0][..], &[5.0, 6.0][..]]);

        let packed = m.to_packed();
        assert_eq!(packed.stride(), 2);
        assert_eq!(packed.as_slice(), &[1.0, 2.0, 3.0, 4.0, 5.0, 6.0]);
    }

    #[test]
    fn test_transpose() {
        let m = StridedMatrix::from_vec(2, 3, vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0]).unwrap();
        let t = m.transpose();
        assert_eq!(t.shape(), (3, 2));
        assert_eq!(t.as_slice(), &[1.0, 4.0, 2.0, 5.0, 3.0, 6.0]);
    }

    #[test]
    fn test_array2_interop() {
        let m = StridedMatrix::from_vec_strided(2, 2, 3, vec![1.0, 2.0, 0.0, 3.0, 4.0, 0.0])
            .unwrap();
        let arr = m.to_array2();
        assert_eq!(arr.dim(), (2, 2));
        assert_eq!(arr[[1, 0]], 3.0);
        let back = StridedMatrix::from_array2(&arr);
        assert_eq!(back, m.to_packed());
    }

    #[test]
    fn test_set_bounds() {
        let mut m = StridedMatrix::<f64>::zeros(2, 2);
        m.set(1, 1, 7.0).unwrap();
        assert_eq!(m.get(1, 1), Some(7.0));
        assert!(m.set(2, 0, 1.0).is_err());
    }
}
