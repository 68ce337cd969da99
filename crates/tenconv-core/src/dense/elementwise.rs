//! Elementwise container arithmetic
//!
//! All operations allocate a new tensor; operands are never modified.

use super::filter::FilterBank;
use super::image::ImageTensor;
use crate::error::{TensorError, TensorResult};
use scirs2_core::numeric::Float;

fn zip_buffers<T, F>(
    operation: &'static str,
    left_shape: &[usize],
    right_shape: &[usize],
    left: &[T],
    right: &[T],
    f: F,
) -> TensorResult<Vec<T>>
where
    T: Float,
    F: Fn(T, T) -> T,
{
    if left_shape != right_shape {
        return Err(TensorError::shape_mismatch(
            operation,
            left_shape,
            right_shape,
        ));
    }
    Ok(left.iter().zip(right).map(|(&a, &b)| f(a, b)).collect())
}

impl<T: Float> ImageTensor<T> {
    /// Elementwise sum
    ///
    /// # Errors
    ///
    /// Returns [`TensorError::ShapeMismatch`] if the shapes differ.
    pub fn add(&self, other: &Self) -> TensorResult<Self> {
        let [c, r, k] = self.shape();
        let data = zip_buffers(
            "add",
            &self.shape(),
            &other.shape(),
            self.as_slice(),
            other.as_slice(),
            |a, b| a + b,
        )?;
        Self::from_vec(c, r, k, data)
    }

    /// Elementwise difference `self - other`
    pub fn sub(&self, other: &Self) -> TensorResult<Self> {
        let [c, r, k] = self.shape();
        let data = zip_buffers(
            "sub",
            &self.shape(),
            &other.shape(),
            self.as_slice(),
            other.as_slice(),
            |a, b| a - b,
        )?;
        Self::from_vec(c, r, k, data)
    }

    /// Multiply every element by `factor`
    pub fn scale(&self, factor: T) -> Self {
        self.map(|v| v * factor)
    }

    /// Apply `f` to every element
    pub fn map<F>(&self, f: F) -> Self
    where
        F: Fn(T) -> T,
    {
        let source = self.as_slice();
        Self::from_fn(self.channels(), self.rows(), self.cols(), |ch, row, col| {
            f(source[self.index_of(ch, row, col)])
        })
    }
}

impl<T: Float> FilterBank<T> {
    /// Elementwise sum
    pub fn add(&self, other: &Self) -> TensorResult<Self> {
        let [b, c, r, k] = self.shape();
        let data = zip_buffers(
            "add",
            &self.shape(),
            &other.shape(),
            self.as_slice(),
            other.as_slice(),
            |x, y| x + y,
        )?;
        Self::from_vec(b, c, r, k, data)
    }

    /// Elementwise difference `self - other`
    pub fn sub(&self, other: &Self) -> TensorResult<Self> {
        let [b, c, r, k] = self.shape();
        let data = zip_buffers(
            "sub",
            &self.shape(),
            &other.shape(),
            self.as_slice(),
            other.as_slice(),
            |x, y| x - y,
        )?;
        Self::from_vec(b, c, r, k, data)
    }

    /// Multiply every element by `factor`
    pub fn scale(&self, factor: T) -> Self {
        self.map(|v| v * factor)
    }

    /// Apply `f` to every element
    pub fn map<F>(&self, f: F) -> Self
    where
        F: Fn(T) -> T,
    {
        let source = self.as_slice();
        Self::from_fn(
            self.batches(),
            self.channels(),
            self.rows(),
            self.cols(),
            |b, ch, row, col| f(source[self.index_of(b, ch, row, col)]),
        )
    }
}
