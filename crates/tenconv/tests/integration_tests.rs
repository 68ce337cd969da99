//! End-to-end tests through the meta crate

use anyhow::Result;
use scirs2_core::ndarray_ext::Array3;
use tenconv::prelude::*;

/// 3x3 image holding 1..9, one 2x2 all-ones filter, zero bias, no padding
#[test]
fn test_window_sum_scenario() -> Result<()> {
    let image = ImageTensor::from_vec(1, 3, 3, (1..=9).map(|v| v as f64).collect())?;
    let filters = FilterBank::from_elem(1, 1, 2, 2, 1.0);
    let bias = BiasVector::new(vec![0.0]);

    let out = conv2d_add_channel(&image, &filters, &bias, false)?;
    assert_eq!(out.shape(), [1, 2, 2]);
    assert_eq!(out.as_slice(), &[12.0, 16.0, 24.0, 28.0]);
    Ok(())
}

#[test]
fn test_two_layer_forward_pass() -> Result<()> {
    let image = ImageTensor::from_array3(&Array3::<f32>::from_elem((3, 12, 12), 0.5));
    let conv1 = FilterBank::<f32>::random_normal(8, 3, 3, 3, 0.0, 0.2, 1)?;
    let conv2 = FilterBank::<f32>::random_normal(4, 8, 5, 5, 0.0, 0.2, 2)?;

    let hidden = conv2d_add_channel(&image, &conv1, &BiasVector::zeros(8), true)?;
    let hidden = Activation::Relu.apply_image(&hidden);
    assert_eq!(hidden.shape(), [8, 12, 12]);
    assert!(hidden.as_slice().iter().all(|&v| v >= 0.0));

    let out = conv2d_add_channel(&hidden, &conv2, &BiasVector::zeros(4), false)?;
    assert_eq!(out.shape(), [4, 8, 8]);
    Ok(())
}

#[test]
fn test_error_is_reported_through_anyhow() {
    let image = ImageTensor::<f64>::zeros(2, 4, 4);
    let filters = FilterBank::<f64>::zeros(1, 3, 3, 3);
    let err: anyhow::Error = conv2d_add_channel(&image, &filters, &BiasVector::zeros(1), true)
        .unwrap_err()
        .into();
    assert!(err.downcast_ref::<ConvError>().is_some());
    assert!(err.to_string().contains("channel"));
}

#[test]
fn test_default_tracing_config() {
    let config = TracingConfig::default();
    assert!(!config.filter.is_empty());
    let _ = TracingFormat::parse("compact");
}
