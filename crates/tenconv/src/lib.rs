//! # TenConv - im2col convolution engine and neural-network toolkit
//!
//! This is the **meta crate** that re-exports all TenConv components for convenient access.
//!
//! ## Quick Start
//!
//! ```
//! use tenconv::prelude::*;
//!
//! let image = ImageTensor::from_vec(1, 3, 3, (1..=9).map(|v| v as f64).collect())?;
//! let filters = FilterBank::from_elem(1, 1, 2, 2, 1.0);
//! let bias = BiasVector::new(vec![0.0]);
//!
//! let out = conv2d_add_channel(&image, &filters, &bias, false)?;
//! assert_eq!(out.shape(), [1, 2, 2]);
//! assert_eq!(out.as_slice(), &[12.0, 16.0, 24.0, 28.0]);
//! # Ok::<(), anyhow::Error>(())
//! ```
//!
//! ## Components
//!
//! ### Data Model ([`core`])
//!
//! Channel-major images, filter banks, bias vectors, strided matrices, zero padding
//! and cropping.
//!
//! ```
//! use tenconv::core::{ImageTensor, Margins};
//!
//! let image = ImageTensor::<f64>::from_elem(2, 4, 4, 1.0);
//! let padded = image.zero_pad2d(Margins::uniform(1));
//! assert_eq!(padded.shape(), [2, 6, 6]);
//! ```
//!
//! ### Convolution ([`kernels`])
//!
//! im2col, filter flattening, bias-seeded GEMM and output reconstruction, with an
//! injectable GEMM.
//!
//! ```
//! use tenconv::core::{BiasVector, FilterBank, ImageTensor};
//! use tenconv::kernels::{ConvEngine, ConvPadding, ReferenceGemm};
//!
//! let image = ImageTensor::<f64>::random_normal(3, 8, 8, 0.0, 1.0, 42).unwrap();
//! let filters = FilterBank::<f64>::random_normal(4, 3, 3, 3, 0.0, 0.1, 7).unwrap();
//! let engine = ConvEngine::new(ReferenceGemm);
//! let out = engine
//!     .conv2d_add_channel(&image, &filters, &BiasVector::zeros(4), ConvPadding::Same)
//!     .unwrap();
//! assert_eq!(out.shape(), [4, 8, 8]);
//! ```
//!
//! ### Toolkit ([`nn`])
//!
//! Activations, losses, momentum optimizer, Q-learning and UCB1.
//!
//! ```
//! use tenconv::nn::{select_ucb, Activation};
//!
//! assert_eq!(Activation::Relu.apply(-1.0f64), 0.0);
//! assert_eq!(select_ucb(&[(0.5, 3), (0.1, 0)], 3, 1.4), Some(1));
//! ```
//!
//! ## Features
//!
//! - `tracing`: Structured log output through [`tracing_support::init_tracing`]
//! - `serde`: Serialization for data-model types and configurations
//! - `full`: Enable all features

// Re-export all components
pub use tenconv_core as core;
pub use tenconv_kernels as kernels;
pub use tenconv_nn as nn;

pub mod tracing_support;

pub mod prelude {
    //! Prelude module for convenient imports
    //!
    //! # Example
    //!
    //! ```
    //! use tenconv::prelude::*;
    //!
    //! let image = ImageTensor::<f64>::zeros(3, 32, 32);
    //! ```

    // Core types
    pub use crate::core::{
        BiasVector, FilterBank, ImageTensor, Margins, PatchLayout, StridedMatrix, TensorError,
    };

    // Convolution
    pub use crate::kernels::{
        conv2d_add_channel, ArrayGemm, ConvEngine, ConvError, ConvPadding, Gemm, ReferenceGemm,
    };

    // Toolkit
    pub use crate::nn::{
        Activation, Momentum, Optimizer, OptimizerConfig, QLearningConfig, QTable,
    };

    // Logging
    pub use crate::tracing_support::{init_tracing, TracingConfig, TracingFormat};
}
