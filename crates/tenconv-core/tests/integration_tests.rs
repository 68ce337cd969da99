//! Integration tests for tenconv-core
//!
//! These tests verify end-to-end functionality and cross-module interactions.

use scirs2_core::ndarray_ext::{Array2, Array3};
use tenconv_core::{
    BiasVector, FilterBank, ImageTensor, Margins, PatchLayout, StridedMatrix, TensorError,
};

#[test]
fn test_pad_crop_roundtrip_per_channel() {
    let image = ImageTensor::<f64>::random_uniform(3, 5, 4, -1.0, 1.0, 17).unwrap();
    for margins in [Margins::same(4, 4), Margins::new(0, 3, 2, 0), Margins::uniform(1)] {
        let padded = image.zero_pad2d(margins);
        assert_eq!(
            padded.shape(),
            [3, 5 + margins.vertical(), 4 + margins.horizontal()]
        );
        assert_eq!(padded.crop2d(margins).unwrap(), image);

        // the padded border of every channel is zero
        for ch in 0..3 {
            for col in 0..padded.cols() {
                for row in 0..margins.top {
                    assert_eq!(padded.get(ch, row, col), Some(0.0));
                }
            }
        }
    }
}

#[test]
fn test_crop_too_large() {
    let image = ImageTensor::<f64>::zeros(1, 2, 5);
    let err = image.crop2d(Margins::new(1, 2, 0, 0)).unwrap_err();
    assert_eq!(
        err,
        TensorError::CropOutOfRange {
            axis: "rows",
            margin: 3,
            size: 2
        }
    );
    assert_eq!(err.to_string(), "Cannot crop 3 rows from an image with 2 rows");
    // cropping everything away leaves an empty image
    let empty = image.crop2d(Margins::new(1, 1, 0, 0)).unwrap();
    assert!(empty.is_empty());
}

#[test]
fn test_random_init_is_reproducible() {
    let a = FilterBank::<f64>::random_normal(2, 3, 3, 3, 0.0, 1.0, 99).unwrap();
    let b = FilterBank::<f64>::random_normal(2, 3, 3, 3, 0.0, 1.0, 99).unwrap();
    let c = FilterBank::<f64>::random_normal(2, 3, 3, 3, 0.0, 1.0, 100).unwrap();
    assert_eq!(a, b);
    assert_ne!(a, c);
    assert!(ImageTensor::<f64>::random_uniform(1, 2, 2, 1.0, 0.0, 0).is_err());
}

#[test]
fn test_filter_slices_follow_patch_layout() {
    let bank = FilterBank::from_fn(2, 2, 2, 3, |b, ch, r, c| (b * 100 + ch * 10 + r * 3 + c) as f64);
    let layout: PatchLayout = bank.patch_layout();
    assert_eq!(layout.width(), bank.batch_stride());
    let second = bank.filter(1).unwrap();
    for column in 0..layout.width() {
        let (ch, r, c) = layout.coordinates(column).unwrap();
        assert_eq!(second[column], bank.get(1, ch, r, c).unwrap());
    }
    assert!(bank.filter(2).is_none());
}

#[test]
fn test_strided_matrix_interop() {
    // two rows of three values, each row padded to a stride of four
    let m = StridedMatrix::from_vec_strided(2, 3, 4, vec![1.0, 2.0, 3.0, -9.0, 4.0, 5.0, 6.0, -9.0])
        .unwrap();
    let array = m.to_array2();
    assert_eq!(array, Array2::from_shape_vec((2, 3), vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0]).unwrap());
    assert_eq!(m.transpose().row(2), &[3.0, 6.0]);
    assert_eq!(StridedMatrix::from_array2(&array).stride(), 3);
    assert!(matches!(
        StridedMatrix::from_vec_strided(2, 3, 2, vec![0.0; 4]),
        Err(TensorError::InvalidStride { stride: 2, cols: 3 })
    ));
}

#[test]
fn test_image_array3_roundtrip_and_arithmetic() {
    let array = Array3::<f64>::from_shape_fn((2, 3, 4), |(c, r, k)| (c * 12 + r * 4 + k) as f64);
    let image = ImageTensor::from_array3(&array);
    assert_eq!(image.get(1, 2, 3), Some(23.0));
    assert_eq!(image.to_array3(), array);

    let doubled = image.add(&image).unwrap();
    assert_eq!(doubled, image.scale(2.0));
    assert!(doubled.sub(&ImageTensor::zeros(2, 3, 3)).is_err());

    let bias = BiasVector::new(vec![1.0, 2.0]);
    assert!(bias.is_consistent());
    assert!(!BiasVector::from_parts(3, vec![1.0]).is_consistent());
}
