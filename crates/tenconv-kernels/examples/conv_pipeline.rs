//! Example walking through the im2col + GEMM convolution pipeline
//!
//! Each stage is run by hand and then compared with the single-call engine.
//!
//! Run with: cargo run --example conv_pipeline

use tenconv_core::{BiasVector, FilterBank, ImageTensor};
use tenconv_kernels::{
    bias_seeded_gemm, conv2d_add_channel, flatten_filters, im2col, reconstruct_image, ArrayGemm,
    OutputDims,
};

fn main() {
    println!("=== im2col Convolution Example ===\n");

    let image = ImageTensor::from_vec(1, 3, 3, (1..=9).map(|v| v as f64).collect()).unwrap();
    let filters = FilterBank::from_elem(2, 1, 2, 2, 1.0);
    let bias = BiasVector::new(vec![0.0, 100.0]);

    println!("1. Unfold receptive fields");
    println!("--------------------------");
    let patches = im2col(&image, 2, 2).unwrap();
    for (i, row) in patches.matrix().row_iter().enumerate() {
        println!("  patch {}: {:?}", i, row);
    }
    println!();

    println!("2. Flatten filters");
    println!("------------------");
    let kernels = flatten_filters(&filters).unwrap();
    for (b, row) in kernels.matrix().row_iter().enumerate() {
        println!("  filter {}: {:?}", b, row);
    }
    println!();

    println!("3. Bias-seeded multiply");
    println!("-----------------------");
    let result = bias_seeded_gemm(&ArrayGemm, &patches, &kernels, &bias).unwrap();
    for (p, row) in result.row_iter().enumerate() {
        println!("  position {}: {:?}", p, row);
    }
    println!();

    println!("4. Reconstruct output image");
    println!("---------------------------");
    let out = reconstruct_image(&result, OutputDims::valid(3, 3, 2, 2).unwrap()).unwrap();
    println!("  shape: {:?}", out.shape());
    for ch in 0..out.channels() {
        println!("  channel {}: {:?}", ch, out.channel(ch).unwrap());
    }
    println!();

    println!("5. Single call, valid and same padding");
    println!("--------------------------------------");
    let valid = conv2d_add_channel(&image, &filters, &bias, false).unwrap();
    assert_eq!(valid, out);
    println!("  valid: {:?}", valid.shape());
    let same = conv2d_add_channel(&image, &filters, &bias, true).unwrap();
    println!("  same:  {:?}", same.shape());
    println!("  same channel 0: {:?}", same.channel(0).unwrap());
}
