//! Channel-major 3D image tensor
//!
//! An [`ImageTensor`] stores one multi-channel 2D feature map in a single flat
//! buffer. Element `(ch, row, col)` lives at `ch·rows·cols + row·cols + col`, so
//! every channel plane is contiguous and planes follow each other in channel order.

use crate::error::{TensorError, TensorResult};
use scirs2_core::ndarray_ext::Array3;
use scirs2_core::numeric::Float;

/// Multi-channel 2D feature map with channel-major storage
///
/// # Invariant
///
/// `data.len() == channels * rows * cols` holds for every value of this type.
/// All constructors either compute the buffer themselves or validate it.
///
/// # Examples
///
/// ```
/// use tenconv_core::ImageTensor;
///
/// let img = ImageTensor::from_vec(2, 2, 2, (1..=8).map(|v| v as f64).collect()).unwrap();
/// assert_eq!(img.shape(), [2, 2, 2]);
/// assert_eq!(img.get(1, 0, 1), Some(6.0));
/// assert_eq!(img.channel(1).unwrap(), &[5.0, 6.0, 7.0, 8.0]);
/// ```
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(
    feature = "serde",
    serde(
        try_from = "ImageTensorParts<T>",
        bound(deserialize = "T: serde::Deserialize<'de>")
    )
)]
pub struct ImageTensor<T> {
    channels: usize,
    rows: usize,
    cols: usize,
    data: Vec<T>,
}

/// Wire form of [`ImageTensor`], validated on the way in
#[cfg(feature = "serde")]
#[derive(serde::Deserialize)]
struct ImageTensorParts<T> {
    channels: usize,
    rows: usize,
    cols: usize,
    data: Vec<T>,
}

#[cfg(feature = "serde")]
impl<T> TryFrom<ImageTensorParts<T>> for ImageTensor<T> {
    type Error = TensorError;

    fn try_from(parts: ImageTensorParts<T>) -> TensorResult<Self> {
        Self::from_vec(parts.channels, parts.rows, parts.cols, parts.data)
    }
}

impl<T> ImageTensor<T> {
    /// Create an image from a channel-major buffer
    ///
    /// # Errors
    ///
    /// Returns [`TensorError::BufferLength`] if `data.len() != channels * rows * cols`.
    pub fn from_vec(channels: usize, rows: usize, cols: usize, data: Vec<T>) -> TensorResult<Self> {
        TensorError::check_buffer("ImageTensor", &[channels, rows, cols], data.len())?;
        Ok(Self {
            channels,
            rows,
            cols,
            data,
        })
    }

    /// Build an image by evaluating `f(ch, row, col)` for every element in storage order
    pub fn from_fn<F>(channels: usize, rows: usize, cols: usize, mut f: F) -> Self
    where
        F: FnMut(usize, usize, usize) -> T,
    {
        let mut data = Vec::with_capacity(channels * rows * cols);
        for ch in 0..channels {
            for row in 0..rows {
                for col in 0..cols {
                    data.push(f(ch, row, col));
                }
            }
        }
        Self {
            channels,
            rows,
            cols,
            data,
        }
    }

    /// Number of channels
    pub fn channels(&self) -> usize {
        self.channels
    }

    /// Number of rows per channel plane
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Number of columns per channel plane
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Shape as `[channels, rows, cols]`
    pub fn shape(&self) -> [usize; 3] {
        [self.channels, self.rows, self.cols]
    }

    /// Elements in one channel plane (`rows * cols`)
    pub fn plane_len(&self) -> usize {
        self.rows * self.cols
    }

    /// Total number of elements
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// True when the image holds no elements
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Flat offset of `(ch, row, col)` in the channel-major buffer
    ///
    /// The coordinates are not bounds-checked; use [`ImageTensor::get`] for checked access.
    #[inline]
    pub fn index_of(&self, ch: usize, row: usize, col: usize) -> usize {
        (ch * self.rows + row) * self.cols + col
    }

    fn in_bounds(&self, ch: usize, row: usize, col: usize) -> bool {
        ch < self.channels && row < self.rows && col < self.cols
    }

    /// Checked element read
    pub fn get(&self, ch: usize, row: usize, col: usize) -> Option<T>
    where
        T: Copy,
    {
        if self.in_bounds(ch, row, col) {
            Some(self.data[self.index_of(ch, row, col)])
        } else {
            None
        }
    }

    /// Checked element write
    pub fn set(&mut self, ch: usize, row: usize, col: usize, value: T) -> TensorResult<()> {
        if !self.in_bounds(ch, row, col) {
            return Err(TensorError::IndexOutOfBounds {
                index: vec![ch, row, col],
                shape: self.shape().to_vec(),
            });
        }
        let idx = self.index_of(ch, row, col);
        self.data[idx] = value;
        Ok(())
    }

    /// Contiguous plane of one channel
    pub fn channel(&self, ch: usize) -> Option<&[T]> {
        if ch >= self.channels {
            return None;
        }
        let plane = self.plane_len();
        Some(&self.data[ch * plane..(ch + 1) * plane])
    }

    /// Channel-major backing buffer
    pub fn as_slice(&self) -> &[T] {
        &self.data
    }

    /// Mutable channel-major backing buffer (length is fixed)
    pub fn as_mut_slice(&mut self) -> &mut [T] {
        &mut self.data
    }

    /// Consume the image and return its buffer
    pub fn into_vec(self) -> Vec<T> {
        self.data
    }
}

impl<T: Float> ImageTensor<T> {
    /// Zero-filled image
    pub fn zeros(channels: usize, rows: usize, cols: usize) -> Self {
        Self::from_elem(channels, rows, cols, T::zero())
    }

    /// Image filled with a single value
    pub fn from_elem(channels: usize, rows: usize, cols: usize, value: T) -> Self {
        Self {
            channels,
            rows,
            cols,
            data: vec![value; channels * rows * cols],
        }
    }

    /// Copy into an `Array3` of shape `(channels, rows, cols)`
    ///
    /// # Examples
    ///
    /// ```
    /// use tenconv_core::ImageTensor;
    ///
    /// let img = ImageTensor::from_vec(1, 2, 3, vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0]).unwrap();
    /// let arr = img.to_array3();
    /// assert_eq!(arr.dim(), (1, 2, 3));
    /// assert_eq!(arr[[0, 1, 2]], 6.0);
    /// ```
    pub fn to_array3(&self) -> Array3<T> {
        Array3::from_shape_fn((self.channels, self.rows, self.cols), |(ch, row, col)| {
            self.data[self.index_of(ch, row, col)]
        })
    }

    /// Copy an `Array3` laid out as `(channels, rows, cols)` into an image
    ///
    /// Works for any memory order of the source array; elements are read logically.
    pub fn from_array3(array: &Array3<T>) -> Self {
        let (channels, rows, cols) = array.dim();
        Self::from_fn(channels, rows, cols, |ch, row, col| array[[ch, row, col]])
    }
}
