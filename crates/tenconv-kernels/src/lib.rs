//! # tenconv-kernels
//!
//! im2col + GEMM 2D convolution with per-channel bias.
//!
//! ## Overview
//!
//! A convolution over an image of `C` channels with `B` filters of size `Fr × Fc` is
//! lowered to one matrix multiply:
//!
//! - [`im2col`] - unfold every receptive field into one row of a `P × (C·Fr·Fc)` matrix
//! - [`flatten_filters`] - lay each filter out as one row of a `B × (C·Fr·Fc)` matrix
//! - [`bias_seeded_gemm`] - seed a `P × B` result with the bias and accumulate
//!   `patches · filtersᵀ` into it
//! - [`reconstruct_image`] - fold the result back into a `(B, outRows, outCols)` image
//! - [`ConvEngine`] / [`conv2d_add_channel`] - the whole pipeline, with optional same padding
//!
//! The multiply goes through the [`Gemm`] trait. [`ArrayGemm`] (the default) uses
//! `scirs2_core::ndarray_ext`; [`ReferenceGemm`] is a dependency-free triple loop.
//!
//! ## Quick Start
//!
//! ```rust
//! use tenconv_core::{BiasVector, FilterBank, ImageTensor};
//! use tenconv_kernels::conv2d_add_channel;
//!
//! let image = ImageTensor::from_vec(1, 3, 3, (1..=9).map(|v| v as f64).collect()).unwrap();
//! let filters = FilterBank::from_elem(1, 1, 2, 2, 1.0);
//! let bias = BiasVector::new(vec![0.0]);
//!
//! let out = conv2d_add_channel(&image, &filters, &bias, false).unwrap();
//! assert_eq!(out.as_slice(), &[12.0, 16.0, 24.0, 28.0]);
//! ```
//!
//! ## Column layout
//!
//! Patch rows and filter rows both order their columns channel → kernel row → kernel
//! column ([`tenconv_core::PatchLayout`]). Each [`PatchMatrix`] carries its layout and
//! [`bias_seeded_gemm`] refuses to multiply matrices whose layouts differ.
//!
//! ## Logging
//!
//! The engine logs through the `log` facade: `debug` for each convolution call and for
//! asymmetric same padding, `trace` for intermediate matrix shapes.
//!
//! ## Features
//!
//! - `serde`: Serialize/deserialize [`ConvPadding`] and the core data types

pub mod bias;
pub mod conv;
pub mod error;
pub mod flatten;
pub mod gemm;
pub mod im2col;
pub mod reconstruct;


// Re-exports
pub use bias::{bias_seeded_gemm, broadcast_bias};
pub use conv::{conv2d_add_channel, ConvEngine, ConvPadding};
pub use error::{ConvError, ConvResult};
pub use flatten::flatten_filters;
pub use gemm::{gemm_dims, ArrayGemm, Gemm, ReferenceGemm, Transpose};
pub use im2col::{im2col, OutputDims, PatchMatrix};
pub use reconstruct::reconstruct_image;
