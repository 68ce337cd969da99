//! Column layout of flattened receptive fields
//!
//! GEMM-based convolution multiplies two independently built matrices: the
//! column-expanded image and the flattened filter bank. Their dot products are only
//! meaningful when column `k` of both refers to the same `(channel, row, col)` patch
//! element. [`PatchLayout`] names that agreement so producers can attach it to their
//! output and consumers can compare it instead of trusting incidental memory order.

/// Nesting order of patch elements along a matrix row
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ColumnOrder {
    /// Channel outermost, then patch row, then patch column (innermost)
    ChannelRowCol,
}

/// Shape and nesting order of one flattened receptive field
///
/// # Examples
///
/// ```
/// use tenconv_core::{ColumnOrder, PatchLayout};
///
/// let layout = PatchLayout::channel_row_col(2, 3, 3);
/// assert_eq!(layout.width(), 18);
/// assert_eq!(layout.column(1, 0, 2), 11);
/// assert_eq!(layout.coordinates(11), Some((1, 0, 2)));
/// assert_eq!(layout.order(), ColumnOrder::ChannelRowCol);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PatchLayout {
    channels: usize,
    rows: usize,
    cols: usize,
    order: ColumnOrder,
}

impl PatchLayout {
    /// Layout with channel → row → col nesting
    pub fn channel_row_col(channels: usize, rows: usize, cols: usize) -> Self {
        Self {
            channels,
            rows,
            cols,
            order: ColumnOrder::ChannelRowCol,
        }
    }

    /// Channels covered by one patch
    pub fn channels(&self) -> usize {
        self.channels
    }

    /// Patch rows
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Patch columns
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Nesting order
    pub fn order(&self) -> ColumnOrder {
        self.order
    }

    /// Number of matrix columns occupied by one patch
    pub fn width(&self) -> usize {
        self.channels * self.rows * self.cols
    }

    /// Matrix column holding patch element `(ch, row, col)`
    #[inline]
    pub fn column(&self, ch: usize, row: usize, col: usize) -> usize {
        match self.order {
            ColumnOrder::ChannelRowCol => (ch * self.rows + row) * self.cols + col,
        }
    }

    /// Inverse of [`PatchLayout::column`]
    ///
    /// Returns `None` for a column outside `0..width()`, which covers every column of
    /// a layout with an empty dimension.
    pub fn coordinates(&self, column: usize) -> Option<(usize, usize, usize)> {
        if column >= self.width() {
            return None;
        }
        match self.order {
            ColumnOrder::ChannelRowCol => {
                let plane = self.rows * self.cols;
                let ch = column / plane;
                let rem = column % plane;
                Some((ch, rem / self.cols, rem % self.cols))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_channel_outermost_col_innermost() {
        let layout = PatchLayout::channel_row_col(3, 2, 2);
        let mut expected = 0;
        for ch in 0..3 {
            for row in 0..2 {
                for col in 0..2 {
                    assert_eq!(layout.column(ch, row, col), expected);
                    assert_eq!(layout.coordinates(expected), Some((ch, row, col)));
                    expected += 1;
                }
            }
        }
        assert_eq!(expected, layout.width());
    }

    #[test]
    fn test_coordinates_out_of_range() {
        let layout = PatchLayout::channel_row_col(2, 2, 2);
        assert_eq!(layout.coordinates(8), None);

        // empty kernel dimensions have no columns at all
        for empty in [
            PatchLayout::channel_row_col(1, 0, 1),
            PatchLayout::channel_row_col(1, 1, 0),
            PatchLayout::channel_row_col(0, 3, 3),
        ] {
            assert_eq!(empty.width(), 0);
            assert_eq!(empty.coordinates(0), None);
        }
    }

    #[test]
    fn test_layouts_with_different_shapes_differ() {
        let a = PatchLayout::channel_row_col(1, 2, 3);
        let b = PatchLayout::channel_row_col(1, 3, 2);
        assert_eq!(a.width(), b.width());
        assert_ne!(a, b);
    }
}
