//! Filter banks and per-output-channel bias vectors

use crate::error::{TensorError, TensorResult};
use crate::layout::PatchLayout;
use scirs2_core::numeric::Float;

/// Stack of convolution kernels, one per output channel
///
/// Shape is `(batches, channels, rows, cols)`. The flat buffer stores each kernel
/// contiguously (`batch_stride = channels·rows·cols` elements), and inside a kernel the
/// elements are nested channel → row → col. That nesting is exactly
/// [`PatchLayout::channel_row_col`], which is what lets the bank be flattened into a
/// GEMM operand without reordering.
///
/// # Examples
///
/// ```
/// use tenconv_core::FilterBank;
///
/// let bank = FilterBank::from_vec(2, 1, 2, 2, vec![1.0, 1.0, 1.0, 1.0, 0.0, 1.0, 0.0, 1.0]).unwrap();
/// assert_eq!(bank.batch_stride(), 4);
/// assert_eq!(bank.filter(1).unwrap(), &[0.0, 1.0, 0.0, 1.0]);
/// ```
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(
    feature = "serde",
    serde(
        try_from = "FilterBankParts<T>",
        bound(deserialize = "T: serde::Deserialize<'de>")
    )
)]
pub struct FilterBank<T> {
    batches: usize,
    channels: usize,
    rows: usize,
    cols: usize,
    data: Vec<T>,
}

/// Wire form of [`FilterBank`], validated on the way in
#[cfg(feature = "serde")]
#[derive(serde::Deserialize)]
struct FilterBankParts<T> {
    batches: usize,
    channels: usize,
    rows: usize,
    cols: usize,
    data: Vec<T>,
}

#[cfg(feature = "serde")]
impl<T> TryFrom<FilterBankParts<T>> for FilterBank<T> {
    type Error = TensorError;

    fn try_from(parts: FilterBankParts<T>) -> TensorResult<Self> {
        Self::from_vec(parts.batches, parts.channels, parts.rows, parts.cols, parts.data)
    }
}

impl<T> FilterBank<T> {
    /// Create a filter bank from a flat buffer
    ///
    /// # Errors
    ///
    /// Returns [`TensorError::BufferLength`] if the buffer does not hold exactly
    /// `batches * channels * rows * cols` elements.
    pub fn from_vec(
        batches: usize,
        channels: usize,
        rows: usize,
        cols: usize,
        data: Vec<T>,
    ) -> TensorResult<Self> {
        TensorError::check_buffer("FilterBank", &[batches, channels, rows, cols], data.len())?;
        Ok(Self {
            batches,
            channels,
            rows,
            cols,
            data,
        })
    }

    /// Build a bank by evaluating `f(batch, ch, row, col)` in storage order
    pub fn from_fn<F>(batches: usize, channels: usize, rows: usize, cols: usize, mut f: F) -> Self
    where
        F: FnMut(usize, usize, usize, usize) -> T,
    {
        let mut data = Vec::with_capacity(batches * channels * rows * cols);
        for b in 0..batches {
            for ch in 0..channels {
                for row in 0..rows {
                    for col in 0..cols {
                        data.push(f(b, ch, row, col));
                    }
                }
            }
        }
        Self {
            batches,
            channels,
            rows,
            cols,
            data,
        }
    }

    /// Number of kernels (output channels)
    pub fn batches(&self) -> usize {
        self.batches
    }

    /// Input channels per kernel
    pub fn channels(&self) -> usize {
        self.channels
    }

    /// Kernel rows
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Kernel columns
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Shape as `[batches, channels, rows, cols]`
    pub fn shape(&self) -> [usize; 4] {
        [self.batches, self.channels, self.rows, self.cols]
    }

    /// Elements per kernel (`channels * rows * cols`)
    pub fn batch_stride(&self) -> usize {
        self.channels * self.rows * self.cols
    }

    /// Total number of elements
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// True when the bank holds no elements
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Column layout of one flattened kernel
    pub fn patch_layout(&self) -> PatchLayout {
        PatchLayout::channel_row_col(self.channels, self.rows, self.cols)
    }

    /// Flat offset of `(batch, ch, row, col)`
    #[inline]
    pub fn index_of(&self, batch: usize, ch: usize, row: usize, col: usize) -> usize {
        batch * self.batch_stride() + self.patch_layout().column(ch, row, col)
    }

    /// Checked element read
    pub fn get(&self, batch: usize, ch: usize, row: usize, col: usize) -> Option<T>
    where
        T: Copy,
    {
        if batch < self.batches && ch < self.channels && row < self.rows && col < self.cols {
            Some(self.data[self.index_of(batch, ch, row, col)])
        } else {
            None
        }
    }

    /// Contiguous slice holding kernel `batch`
    pub fn filter(&self, batch: usize) -> Option<&[T]> {
        if batch >= self.batches {
            return None;
        }
        let stride = self.batch_stride();
        Some(&self.data[batch * stride..(batch + 1) * stride])
    }

    /// Flat backing buffer
    pub fn as_slice(&self) -> &[T] {
        &self.data
    }

    /// Mutable flat backing buffer (length is fixed)
    pub fn as_mut_slice(&mut self) -> &mut [T] {
        &mut self.data
    }

    /// Consume the bank and return its buffer
    pub fn into_vec(self) -> Vec<T> {
        self.data
    }
}

impl<T: Float> FilterBank<T> {
    /// Zero-filled bank
    pub fn zeros(batches: usize, channels: usize, rows: usize, cols: usize) -> Self {
        Self::from_elem(batches, channels, rows, cols, T::zero())
    }

    /// Bank filled with a single value
    pub fn from_elem(batches: usize, channels: usize, rows: usize, cols: usize, value: T) -> Self {
        Self {
            batches,
            channels,
            rows,
            cols,
            data: vec![value; batches * channels * rows * cols],
        }
    }
}

/// One bias value per output channel
///
/// The vector carries a declared length next to its values. Both normally agree;
/// [`BiasVector::from_parts`] allows them to differ so that a consumer can detect
/// the inconsistency instead of silently truncating or padding.
///
/// # Examples
///
/// ```
/// use tenconv_core::BiasVector;
///
/// let bias = BiasVector::new(vec![0.5, -1.0]);
/// assert_eq!(bias.len(), 2);
/// assert!(bias.is_consistent());
///
/// let broken = BiasVector::from_parts(3, vec![0.5, -1.0]);
/// assert!(!broken.is_consistent());
/// ```
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BiasVector<T> {
    declared_len: usize,
    values: Vec<T>,
}

impl<T> BiasVector<T> {
    /// Bias vector whose declared length is taken from `values`
    pub fn new(values: Vec<T>) -> Self {
        Self {
            declared_len: values.len(),
            values,
        }
    }

    /// Bias vector with an explicit declared length; not validated here
    pub fn from_parts(declared_len: usize, values: Vec<T>) -> Self {
        Self {
            declared_len,
            values,
        }
    }

    /// Declared length field
    pub fn declared_len(&self) -> usize {
        self.declared_len
    }

    /// Number of stored values
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// True when no values are stored
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// True when the declared length matches the stored values
    pub fn is_consistent(&self) -> bool {
        self.declared_len == self.values.len()
    }

    /// Bias values
    pub fn values(&self) -> &[T] {
        &self.values
    }

    /// Mutable bias values (length is fixed)
    pub fn as_mut_slice(&mut self) -> &mut [T] {
        &mut self.values
    }
}

impl<T: Float> BiasVector<T> {
    /// Zero bias for `len` output channels
    pub fn zeros(len: usize) -> Self {
        Self::new(vec![T::zero(); len])
    }
}
