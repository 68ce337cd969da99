//! Zero padding and cropping of image tensors
//!
//! # Same-padding convention
//!
//! [`Margins::same`] splits the `F - 1` rows (or columns) of padding that a size-`F`
//! kernel needs as `low = (F - 1) / 2` and `high = F - 1 - low`. For odd `F` the split
//! is symmetric. For even `F` the low side (top/left) receives one element less than the
//! high side (bottom/right). This is a convention, not a law: other libraries place the
//! extra element on the low side. The total is always `F - 1`, so a valid convolution of
//! the padded image has the same spatial size as the unpadded input for every `F >= 1`.

use super::image::ImageTensor;
use crate::error::{TensorError, TensorResult};
use scirs2_core::numeric::Float;

/// Padding (or cropping) amounts on each side of the spatial plane
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Margins {
    /// Rows added above
    pub top: usize,
    /// Rows added below
    pub bottom: usize,
    /// Columns added on the left
    pub left: usize,
    /// Columns added on the right
    pub right: usize,
}

impl Margins {
    /// Explicit margins
    pub fn new(top: usize, bottom: usize, left: usize, right: usize) -> Self {
        Self {
            top,
            bottom,
            left,
            right,
        }
    }

    /// Same margin on all four sides
    pub fn uniform(amount: usize) -> Self {
        Self::new(amount, amount, amount, amount)
    }

    /// Margins that keep the spatial size under a valid convolution with a
    /// `filter_rows × filter_cols` kernel (see the module docs for the even-size split)
    ///
    /// # Examples
    ///
    /// ```
    /// use tenconv_core::Margins;
    ///
    /// assert_eq!(Margins::same(3, 3), Margins::new(1, 1, 1, 1));
    /// // Even kernels pad less on the top/left side
    /// assert_eq!(Margins::same(4, 2), Margins::new(1, 2, 0, 1));
    /// ```
    pub fn same(filter_rows: usize, filter_cols: usize) -> Self {
        let (top, bottom) = split_same(filter_rows);
        let (left, right) = split_same(filter_cols);
        Self::new(top, bottom, left, right)
    }

    /// Rows added in total
    pub fn vertical(&self) -> usize {
        self.top + self.bottom
    }

    /// Columns added in total
    pub fn horizontal(&self) -> usize {
        self.left + self.right
    }

    /// True when no side is padded
    pub fn is_zero(&self) -> bool {
        *self == Self::default()
    }

    /// True when opposite sides receive equal amounts
    pub fn is_symmetric(&self) -> bool {
        self.top == self.bottom && self.left == self.right
    }
}

fn split_same(filter_size: usize) -> (usize, usize) {
    let total = filter_size.saturating_sub(1);
    let low = total / 2;
    (low, total - low)
}

impl<T: Float> ImageTensor<T> {
    /// Zero-pad every channel plane by `margins`
    ///
    /// Returns a new image of shape
    /// `(channels, rows + top + bottom, cols + left + right)` holding the original
    /// values at offset `(top, left)` and zeros elsewhere. Zero margins produce a copy.
    ///
    /// # Examples
    ///
    /// ```
    /// use tenconv_core::{ImageTensor, Margins};
    ///
    /// let img = ImageTensor::from_vec(1, 1, 2, vec![1.0, 2.0]).unwrap();
    /// let padded = img.zero_pad2d(Margins::new(1, 0, 0, 1));
    /// assert_eq!(padded.shape(), [1, 2, 3]);
    /// assert_eq!(padded.as_slice(), &[0.0, 0.0, 0.0, 1.0, 2.0, 0.0]);
    /// ```
    pub fn zero_pad2d(&self, margins: Margins) -> Self {
        let rows = self.rows() + margins.vertical();
        let cols = self.cols() + margins.horizontal();
        let mut padded = Self::zeros(self.channels(), rows, cols);
        if self.cols() == 0 {
            return padded;
        }
        for ch in 0..self.channels() {
            for row in 0..self.rows() {
                let src = self.index_of(ch, row, 0);
                let dst = padded.index_of(ch, row + margins.top, margins.left);
                padded.as_mut_slice()[dst..dst + self.cols()]
                    .copy_from_slice(&self.as_slice()[src..src + self.cols()]);
            }
        }
        padded
    }

    /// Zero-pad so that a valid convolution with the given kernel size keeps the
    /// spatial shape; margins come from [`Margins::same`]
    pub fn same_zero_pad2d(&self, filter_rows: usize, filter_cols: usize) -> Self {
        self.zero_pad2d(Margins::same(filter_rows, filter_cols))
    }

    /// Remove `margins` from every channel plane (inverse of [`ImageTensor::zero_pad2d`])
    ///
    /// # Errors
    ///
    /// Returns [`TensorError::CropOutOfRange`] if the margins remove more rows or
    /// columns than the image has.
    pub fn crop2d(&self, margins: Margins) -> TensorResult<Self> {
        if margins.vertical() > self.rows() {
            return Err(TensorError::CropOutOfRange {
                axis: "rows",
                margin: margins.vertical(),
                size: self.rows(),
            });
        }
        if margins.horizontal() > self.cols() {
            return Err(TensorError::CropOutOfRange {
                axis: "cols",
                margin: margins.horizontal(),
                size: self.cols(),
            });
        }
        let rows = self.rows() - margins.vertical();
        let cols = self.cols() - margins.horizontal();
        let source = self.as_slice();
        Ok(Self::from_fn(self.channels(), rows, cols, |ch, row, col| {
            source[self.index_of(ch, row + margins.top, col + margins.left)]
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ramp(channels: usize, rows: usize, cols: usize) -> ImageTensor<f64> {
        ImageTensor::from_fn(channels, rows, cols, |ch, row, col| {
            (ch * 100 + row * 10 + col + 1) as f64
        })
    }

    #[test]
    fn test_same_margins_odd() {
        assert_eq!(Margins::same(1, 1), Margins::default());
        assert_eq!(Margins::same(3, 5), Margins::new(1, 1, 2, 2));
        assert!(Margins::same(7, 7).is_symmetric());
    }

    #[test]
    fn test_same_margins_even_pad_high_more() {
        let m = Margins::same(2, 6);
        assert_eq!(m, Margins::new(0, 1, 2, 3));
        assert!(!m.is_symmetric());
        assert_eq!(m.vertical(), 1);
        assert_eq!(m.horizontal(), 5);
    }

    #[test]
    fn test_same_margins_zero_sized_filter() {
        assert!(Margins::same(0, 0).is_zero());
    }

    #[test]
    fn test_zero_pad_places_original_at_offset() {
        let img = ramp(2, 2, 2);
        let padded = img.zero_pad2d(Margins::new(1, 2, 3, 0));
        assert_eq!(padded.shape(), [2, 5, 5]);
        for ch in 0..2 {
            for row in 0..5 {
                for col in 0..5 {
                    let inside = (1..3).contains(&row) && (3..5).contains(&col);
                    let expected = if inside {
                        img.get(ch, row - 1, col - 3).unwrap()
                    } else {
                        0.0
                    };
                    assert_eq!(padded.get(ch, row, col), Some(expected));
                }
            }
        }
    }

    #[test]
    fn test_zero_margins_copy() {
        let img = ramp(3, 4, 2);
        let padded = img.zero_pad2d(Margins::default());
        assert_eq!(padded, img);
    }

    #[test]
    fn test_same_pad_shape() {
        let img = ramp(1, 5, 6);
        assert_eq!(img.same_zero_pad2d(3, 3).shape(), [1, 7, 8]);
        assert_eq!(img.same_zero_pad2d(2, 4).shape(), [1, 6, 9]);
    }

    #[test]
    fn test_crop_inverts_pad() {
        let img = ramp(2, 3, 4);
        let margins = Margins::new(2, 1, 0, 3);
        let restored = img.zero_pad2d(margins).crop2d(margins).unwrap();
        assert_eq!(restored, img);
    }

    #[test]
    fn test_crop_out_of_range() {
        let img = ramp(1, 2, 2);
        assert!(matches!(
            img.crop2d(Margins::new(1, 2, 0, 0)),
            Err(TensorError::CropOutOfRange { axis: "rows", .. })
        ));
        assert!(matches!(
            img.crop2d(Margins::new(0, 0, 3, 0)),
            Err(TensorError::CropOutOfRange { axis: "cols", .. })
        ));
        assert_eq!(img.crop2d(Margins::uniform(1)).unwrap().shape(), [1, 0, 0]);
    }
}
