//! Activation functions and their derivatives
//!
//! Scalar functions are written against `scirs2_core::numeric::Float` and work for `f32`
//! and `f64`. Derivatives are taken with respect to the pre-activation input `x`.
//!
//! # Example
//!
//! ```rust
//! use tenconv_core::ImageTensor;
//! use tenconv_nn::activation::Activation;
//!
//! let feature_map = ImageTensor::from_vec(1, 1, 3, vec![-1.0, 0.0, 2.0]).unwrap();
//! let activated = Activation::Relu.apply_image(&feature_map);
//! assert_eq!(activated.as_slice(), &[0.0, 0.0, 2.0]);
//! ```

use anyhow::{ensure, Result};
use scirs2_core::numeric::Float;
use tenconv_core::ImageTensor;

/// Logistic sigmoid `1 / (1 + e^-x)`
pub fn sigmoid<T: Float>(x: T) -> T {
    if x >= T::zero() {
        T::one() / (T::one() + (-x).exp())
    } else {
        // avoids overflow of e^-x for large negative x
        let e = x.exp();
        e / (T::one() + e)
    }
}

/// `σ(x)·(1 - σ(x))`
pub fn sigmoid_derivative<T: Float>(x: T) -> T {
    let s = sigmoid(x);
    s * (T::one() - s)
}

/// Hyperbolic tangent
pub fn tanh<T: Float>(x: T) -> T {
    x.tanh()
}

/// `1 - tanh²(x)`
pub fn tanh_derivative<T: Float>(x: T) -> T {
    let t = x.tanh();
    T::one() - t * t
}

/// `max(0, x)`
pub fn relu<T: Float>(x: T) -> T {
    if x > T::zero() {
        x
    } else {
        T::zero()
    }
}

/// Step function; the derivative at zero is taken as 0
pub fn relu_derivative<T: Float>(x: T) -> T {
    if x > T::zero() {
        T::one()
    } else {
        T::zero()
    }
}

/// `x` for positive inputs, `alpha·x` otherwise
pub fn leaky_relu<T: Float>(x: T, alpha: T) -> T {
    if x > T::zero() {
        x
    } else {
        alpha * x
    }
}

pub fn leaky_relu_derivative<T: Float>(x: T, alpha: T) -> T {
    if x > T::zero() {
        T::one()
    } else {
        alpha
    }
}

/// Exponential linear unit: `x` for positive inputs, `alpha·(e^x - 1)` otherwise
pub fn elu<T: Float>(x: T, alpha: T) -> T {
    if x > T::zero() {
        x
    } else {
        alpha * x.exp_m1()
    }
}

pub fn elu_derivative<T: Float>(x: T, alpha: T) -> T {
    if x > T::zero() {
        T::one()
    } else {
        alpha * x.exp()
    }
}

/// `ln(1 + e^x)`, computed as `max(x, 0) + ln(1 + e^-|x|)`
pub fn softplus<T: Float>(x: T) -> T {
    x.max(T::zero()) + (-x.abs()).exp().ln_1p()
}

/// Derivative of softplus, which is the sigmoid
pub fn softplus_derivative<T: Float>(x: T) -> T {
    sigmoid(x)
}

/// Softmax over a slice, shifted by the maximum for stability
///
/// # Errors
///
/// Fails on an empty slice.
pub fn softmax<T: Float>(logits: &[T]) -> Result<Vec<T>> {
    ensure!(!logits.is_empty(), "softmax of an empty slice");
    let max = logits
        .iter()
        .copied()
        .fold(T::neg_infinity(), |acc, v| acc.max(v));
    let exps: Vec<T> = logits.iter().map(|&v| (v - max).exp()).collect();
    let sum = exps.iter().copied().fold(T::zero(), |acc, v| acc + v);
    Ok(exps.into_iter().map(|e| e / sum).collect())
}

/// Activation selector
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Activation<T> {
    Sigmoid,
    Tanh,
    Relu,
    /// Leaky ReLU with the given negative slope
    LeakyRelu(T),
    /// ELU with the given saturation scale
    Elu(T),
    Identity,
}

impl<T: Float> Activation<T> {
    /// Apply to one value
    pub fn apply(&self, x: T) -> T {
        match *self {
            Activation::Sigmoid => sigmoid(x),
            Activation::Tanh => tanh(x),
            Activation::Relu => relu(x),
            Activation::LeakyRelu(alpha) => leaky_relu(x, alpha),
            Activation::Elu(alpha) => elu(x, alpha),
            Activation::Identity => x,
        }
    }

    /// Derivative at the pre-activation value `x`
    pub fn derivative(&self, x: T) -> T {
        match *self {
            Activation::Sigmoid => sigmoid_derivative(x),
            Activation::Tanh => tanh_derivative(x),
            Activation::Relu => relu_derivative(x),
            Activation::LeakyRelu(alpha) => leaky_relu_derivative(x, alpha),
            Activation::Elu(alpha) => elu_derivative(x, alpha),
            Activation::Identity => T::one(),
        }
    }

    /// Apply to every element of a slice, returning a new vector
    pub fn apply_slice(&self, values: &[T]) -> Vec<T> {
        values.iter().map(|&x| self.apply(x)).collect()
    }

    /// Apply to every element of an image, returning a new image of the same shape
    pub fn apply_image(&self, image: &ImageTensor<T>) -> ImageTensor<T> {
        image.map(|x| self.apply(x))
    }
}
