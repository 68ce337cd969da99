//! Loss functions, L2 regularization and gradient clipping
//!
//! All functions take flat slices so they apply equally to image buffers
//! ([`tenconv_core::ImageTensor::as_slice`]) and filter banks. Mismatched lengths and empty
//! inputs are rejected.

use anyhow::{ensure, Context, Result};
use scirs2_core::numeric::Float;

use crate::activation::softmax;

/// Probabilities are clamped to `[EPSILON, 1 - EPSILON]` before taking logarithms
pub const EPSILON: f64 = 1e-12;

fn check_pair<T>(pred: &[T], target: &[T]) -> Result<()> {
    ensure!(!pred.is_empty(), "loss of an empty prediction");
    ensure!(
        pred.len() == target.len(),
        "prediction has {} values but target has {}",
        pred.len(),
        target.len()
    );
    Ok(())
}

fn count<T: Float>(n: usize) -> Result<T> {
    T::from(n).context("Failed to convert element count")
}

/// Mean squared error `Σ(p - t)² / n`
pub fn mse<T: Float>(pred: &[T], target: &[T]) -> Result<T> {
    check_pair(pred, target)?;
    let sum = pred
        .iter()
        .zip(target)
        .fold(T::zero(), |acc, (&p, &t)| acc + (p - t) * (p - t));
    Ok(sum / count(pred.len())?)
}

/// Gradient of [`mse`] with respect to the prediction: `2(p - t) / n`
pub fn mse_gradient<T: Float>(pred: &[T], target: &[T]) -> Result<Vec<T>> {
    check_pair(pred, target)?;
    let scale = (T::one() + T::one()) / count(pred.len())?;
    Ok(pred
        .iter()
        .zip(target)
        .map(|(&p, &t)| scale * (p - t))
        .collect())
}

/// Cross entropy `-Σ t·ln(p)` between a predicted distribution and a target distribution
pub fn cross_entropy<T: Float>(pred: &[T], target: &[T]) -> Result<T> {
    check_pair(pred, target)?;
    let eps = T::from(EPSILON).context("Failed to convert epsilon")?;
    let hi = T::one() - eps;
    let loss = pred.iter().zip(target).fold(T::zero(), |acc, (&p, &t)| {
        acc - t * p.max(eps).min(hi).ln()
    });
    Ok(loss)
}

/// Gradient of `cross_entropy(softmax(logits), target)` with respect to the logits
///
/// For a target that sums to one this is `softmax(logits) - target`.
pub fn softmax_cross_entropy_gradient<T: Float>(logits: &[T], target: &[T]) -> Result<Vec<T>> {
    check_pair(logits, target)?;
    let probs = softmax(logits)?;
    Ok(probs.into_iter().zip(target).map(|(p, &t)| p - t).collect())
}

/// L2 penalty `λ/2 · Σw²`
pub fn l2_penalty<T: Float>(weights: &[T], lambda: T) -> T {
    let half = lambda / (T::one() + T::one());
    half * weights.iter().fold(T::zero(), |acc, &w| acc + w * w)
}

/// Gradient of [`l2_penalty`]: `λ·w`
pub fn l2_gradient<T: Float>(weights: &[T], lambda: T) -> Vec<T> {
    weights.iter().map(|&w| lambda * w).collect()
}

/// Clamp every gradient to `[-limit, limit]` in place
pub fn clip_by_value<T: Float>(grads: &mut [T], limit: T) -> Result<()> {
    ensure!(limit >= T::zero(), "clip limit must be non-negative");
    for g in grads.iter_mut() {
        *g = g.max(-limit).min(limit);
    }
    Ok(())
}

/// Rescale gradients in place so their L2 norm does not exceed `max_norm`
///
/// Returns the factor applied (`1` when the norm was already within bounds).
pub fn clip_by_norm<T: Float>(grads: &mut [T], max_norm: T) -> Result<T> {
    ensure!(max_norm > T::zero(), "max_norm must be positive");
    let norm = grads
        .iter()
        .fold(T::zero(), |acc, &g| acc + g * g)
        .sqrt();
    if norm <= max_norm {
        return Ok(T::one());
    }
    let scale = max_norm / norm;
    for g in grads.iter_mut() {
        *g = *g * scale;
    }
    Ok(scale)
}
