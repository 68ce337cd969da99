//! Integration tests for tenconv-nn
//!
//! These tests drive the toolkit together with the convolution engine.

use anyhow::Result;
use tenconv_core::{BiasVector, FilterBank, ImageTensor};
use tenconv_kernels::conv2d_add_channel;
use tenconv_nn::{
    clip_by_norm, mse, mse_gradient, Activation, Momentum, Optimizer, OptimizerConfig,
};

/// A 1x1 convolution is linear in its weights, so its weight gradient under MSE is
/// `Σ_positions dL/dout · x`; repeated momentum steps drive the loss down.
#[test]
fn test_fit_pointwise_filter() -> Result<()> {
    let image = ImageTensor::<f64>::random_uniform(2, 4, 4, -1.0, 1.0, 9)?;
    let target_filters = FilterBank::from_vec(1, 2, 1, 1, vec![0.7, -0.3])?;
    let bias = BiasVector::zeros(1);
    let target = conv2d_add_channel(&image, &target_filters, &bias, false)?;

    let mut filters = FilterBank::<f64>::zeros(1, 2, 1, 1);
    let config = OptimizerConfig::default().learning_rate(0.2).momentum(0.5);
    config.validate()?;
    let mut optimizer = Momentum::new(config);

    let initial = mse(
        conv2d_add_channel(&image, &filters, &bias, false)?.as_slice(),
        target.as_slice(),
    )?;
    for _ in 0..200 {
        let out = conv2d_add_channel(&image, &filters, &bias, false)?;
        let d_out = mse_gradient(out.as_slice(), target.as_slice())?;
        let mut grads: Vec<f64> = (0..2)
            .map(|ch| {
                let plane = image.channel(ch).unwrap_or_default();
                plane.iter().zip(&d_out).map(|(x, d)| x * d).sum()
            })
            .collect();
        clip_by_norm(&mut grads, 10.0)?;
        optimizer.step(filters.as_mut_slice(), &grads)?;
    }
    let final_loss = mse(
        conv2d_add_channel(&image, &filters, &bias, false)?.as_slice(),
        target.as_slice(),
    )?;

    assert!(final_loss < initial * 1e-3);
    assert!((filters.as_slice()[0] - 0.7).abs() < 1e-2);
    assert!((filters.as_slice()[1] + 0.3).abs() < 1e-2);
    assert_eq!(optimizer.num_steps(), 200);
    Ok(())
}

#[test]
fn test_activation_after_convolution() -> Result<()> {
    let image = ImageTensor::from_vec(1, 2, 2, vec![1.0, -2.0, 3.0, -4.0])?;
    let filters = FilterBank::from_elem(1, 1, 1, 1, 1.0);
    let bias = BiasVector::new(vec![-0.5]);
    let out = conv2d_add_channel(&image, &filters, &bias, true)?;
    let relu = Activation::Relu.apply_image(&out);
    assert_eq!(relu.as_slice(), &[0.5, 0.0, 2.5, 0.0]);
    Ok(())
}
