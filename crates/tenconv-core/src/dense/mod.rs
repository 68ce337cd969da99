//! Dense containers and their transforms
//!
//! Each concern lives in its own sub-module; the types are re-exported here.

pub mod filter;
pub mod image;
pub mod padding;

mod creation;
mod elementwise;

pub use filter::{BiasVector, FilterBank};
pub use image::ImageTensor;
pub use padding::Margins;
