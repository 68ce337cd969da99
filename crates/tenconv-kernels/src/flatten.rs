//! Filter-bank flattening
//!
//! A [`FilterBank`] already stores each kernel contiguously in channel → row → col
//! order, which is the [`PatchLayout`] produced by [`crate::im2col`]. Flattening is
//! therefore an identity reshape to `(batches, channels·rows·cols)`: the buffer is
//! copied (never aliased) and tagged with the bank's layout.

use crate::error::ConvResult;
use crate::im2col::PatchMatrix;
use scirs2_core::numeric::Float;
use tenconv_core::{FilterBank, StridedMatrix};

/// Reshape `filters` into a `(batches, channels·rows·cols)` matrix, one kernel per row
///
/// # Examples
///
/// ```
/// use tenconv_core::FilterBank;
/// use tenconv_kernels::flatten_filters;
///
/// let bank = FilterBank::from_vec(2, 1, 1, 2, vec![1.0, 2.0, 3.0, 4.0]).unwrap();
/// let flat = flatten_filters(&bank).unwrap();
/// assert_eq!(flat.matrix().shape(), (2, 2));
/// assert_eq!(flat.matrix().row(1), &[3.0, 4.0]);
/// ```
pub fn flatten_filters<T: Float>(filters: &FilterBank<T>) -> ConvResult<PatchMatrix<T>> {
    let matrix = StridedMatrix::from_vec(
        filters.batches(),
        filters.batch_stride(),
        filters.as_slice().to_vec(),
    )?;
    PatchMatrix::new(matrix, filters.patch_layout())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tenconv_core::PatchLayout;

    #[test]
    fn test_flatten_is_identity_reshape() {
        let bank = FilterBank::from_fn(3, 2, 2, 2, |b, ch, row, col| {
            (b * 1000 + ch * 100 + row * 10 + col) as f64
        });
        let flat = flatten_filters(&bank).unwrap();
        assert_eq!(flat.matrix().shape(), (3, 8));
        assert_eq!(flat.matrix().stride(), 8);
        assert_eq!(flat.matrix().as_slice(), bank.as_slice());
        for b in 0..3 {
            assert_eq!(flat.matrix().row(b), bank.filter(b).unwrap());
        }
    }

    #[test]
    fn test_flatten_layout_tag() {
        let bank = FilterBank::<f64>::zeros(4, 3, 5, 1);
        let flat = flatten_filters(&bank).unwrap();
        assert_eq!(flat.layout(), PatchLayout::channel_row_col(3, 5, 1));
    }

    #[test]
    fn test_flatten_copies() {
        let mut bank = FilterBank::from_elem(1, 1, 1, 2, 1.0);
        let flat = flatten_filters(&bank).unwrap();
        bank.as_mut_slice()[0] = 9.0;
        assert_eq!(flat.matrix().row(0), &[1.0, 1.0]);
    }
}
