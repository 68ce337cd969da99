//! # tenconv-core
//!
//! Data model for the TenConv convolution stack.
//!
//! - **Image tensors** ([`ImageTensor`]): one multi-channel 2D feature map in
//!   channel-major order, `index(ch, row, col) = ch·rows·cols + row·cols + col`
//! - **Filter banks** ([`FilterBank`]): `(batches, channels, rows, cols)` kernels,
//!   one per output channel, each stored contiguously
//! - **Bias vectors** ([`BiasVector`]): one value per output channel
//! - **Strided matrices** ([`StridedMatrix`]): row-major matrices with an explicit
//!   row stride, exchanged with GEMM implementations
//! - **Patch layouts** ([`PatchLayout`]): the named column ordering shared by every
//!   matrix that holds flattened receptive fields
//! - **Padding** ([`Margins`], [`ImageTensor::zero_pad2d`], [`ImageTensor::same_zero_pad2d`],
//!   [`ImageTensor::crop2d`])
//!
//! ## Quick Start
//!
//! ```
//! use tenconv_core::{ImageTensor, Margins};
//!
//! let img = ImageTensor::from_vec(1, 3, 3, (1..=9).map(|v| v as f64).collect()).unwrap();
//! let padded = img.same_zero_pad2d(3, 3);
//! assert_eq!(padded.shape(), [1, 5, 5]);
//! assert_eq!(padded.crop2d(Margins::same(3, 3)).unwrap(), img);
//! ```
//!
//! ## Ownership
//!
//! Transforms never modify their input: padding, cropping and arithmetic allocate a
//! new tensor and return it.
//!
//! ## SciRS2 Integration
//!
//! Element types are bounded by `scirs2_core::numeric::Float`, random initialization
//! uses `scirs2_core::random`, and array interop goes through `scirs2_core::ndarray_ext`.
//!
//! ## Features
//!
//! - `serde`: Enable serialization/deserialization support

pub mod dense;
pub mod error;
pub mod layout;
pub mod matrix;


pub use dense::{BiasVector, FilterBank, ImageTensor, Margins};
pub use error::{TensorError, TensorResult};
pub use layout::{ColumnOrder, PatchLayout};
pub use matrix::StridedMatrix;
