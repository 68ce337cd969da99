//! Random initialization of image tensors and filter banks
//!
//! Uses `scirs2_core::random` for RNG (never rand/rand_distr directly). All
//! generators take an explicit seed so initializations are reproducible.

use super::filter::FilterBank;
use super::image::ImageTensor;
use crate::error::{TensorError, TensorResult};
use scirs2_core::numeric::Float;
use scirs2_core::random::{rngs::StdRng, Rng, SeedableRng};

fn cast<T: Float>(value: f64) -> T {
    T::from(value).unwrap_or_else(T::zero)
}

pub(crate) fn uniform_buffer<T: Float>(
    len: usize,
    low: f64,
    high: f64,
    seed: u64,
) -> TensorResult<Vec<T>> {
    if !(low < high) || !low.is_finite() || !high.is_finite() {
        return Err(TensorError::InvalidDistribution(format!(
            "uniform bounds must be finite with low < high, got [{}, {})",
            low, high
        )));
    }
    let mut rng = StdRng::seed_from_u64(seed);
    Ok((0..len)
        .map(|_| cast(rng.random_range(low..high)))
        .collect())
}

pub(crate) fn normal_buffer<T: Float>(
    len: usize,
    mean: f64,
    std: f64,
    seed: u64,
) -> TensorResult<Vec<T>> {
    if !(std >= 0.0) || !mean.is_finite() || !std.is_finite() {
        return Err(TensorError::InvalidDistribution(format!(
            "normal distribution needs finite mean and std >= 0, got mean {} std {}",
            mean, std
        )));
    }
    let mut rng = StdRng::seed_from_u64(seed);
    let mut data = Vec::with_capacity(len);
    while data.len() < len {
        // Box-Muller; u1 in (0, 1] keeps ln finite
        let u1: f64 = 1.0 - rng.random::<f64>();
        let u2: f64 = rng.random::<f64>();
        let radius = (-2.0 * u1.ln()).sqrt();
        let angle = 2.0 * std::f64::consts::PI * u2;
        data.push(cast(mean + std * radius * angle.cos()));
        if data.len() < len {
            data.push(cast(mean + std * radius * angle.sin()));
        }
    }
    Ok(data)
}

impl<T: Float> ImageTensor<T> {
    /// Image with values drawn uniformly from `[low, high)`
    ///
    /// # Examples
    ///
    /// ```
    /// use tenconv_core::ImageTensor;
    ///
    /// let img = ImageTensor::<f64>::random_uniform(2, 4, 4, -1.0, 1.0, 7).unwrap();
    /// assert_eq!(img.shape(), [2, 4, 4]);
    /// assert!(img.as_slice().iter().all(|v| (-1.0..1.0).contains(v)));
    /// ```
    pub fn random_uniform(
        channels: usize,
        rows: usize,
        cols: usize,
        low: f64,
        high: f64,
        seed: u64,
    ) -> TensorResult<Self> {
        let data = uniform_buffer(channels * rows * cols, low, high, seed)?;
        Self::from_vec(channels, rows, cols, data)
    }

    /// Image with normally distributed values
    pub fn random_normal(
        channels: usize,
        rows: usize,
        cols: usize,
        mean: f64,
        std: f64,
        seed: u64,
    ) -> TensorResult<Self> {
        let data = normal_buffer(channels * rows * cols, mean, std, seed)?;
        Self::from_vec(channels, rows, cols, data)
    }
}

impl<T: Float> FilterBank<T> {
    /// Bank with values drawn uniformly from `[low, high)`
    pub fn random_uniform(
        batches: usize,
        channels: usize,
        rows: usize,
        cols: usize,
        low: f64,
        high: f64,
        seed: u64,
    ) -> TensorResult<Self> {
        let data = uniform_buffer(batches * channels * rows * cols, low, high, seed)?;
        Self::from_vec(batches, channels, rows, cols, data)
    }

    /// Bank with normally distributed values
    pub fn random_normal(
        batches: usize,
        channels: usize,
        rows: usize,
        cols: usize,
        mean: f64,
        std: f64,
        seed: u64,
    ) -> TensorResult<Self> {
        let data = normal_buffer(batches * channels * rows * cols, mean, std, seed)?;
        Self::from_vec(batches, channels, rows, cols, data)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_uniform_is_seeded() {
        let a = ImageTensor::<f64>::random_uniform(1, 3, 3, 0.0, 1.0, 42).unwrap();
        let b = ImageTensor::<f64>::random_uniform(1, 3, 3, 0.0, 1.0, 42).unwrap();
        let c = ImageTensor::<f64>::random_uniform(1, 3, 3, 0.0, 1.0, 43).unwrap();
        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn test_uniform_bounds() {
        let bank = FilterBank::<f32>::random_uniform(4, 2, 3, 3, 2.0, 3.0, 1).unwrap();
        assert_eq!(bank.len(), 72);
        assert!(bank.as_slice().iter().all(|&v| (2.0..=3.0).contains(&v)));
    }

    #[test]
    fn test_invalid_uniform_bounds() {
        assert!(ImageTensor::<f64>::random_uniform(1, 2, 2, 1.0, 1.0, 0).is_err());
        assert!(ImageTensor::<f64>::random_uniform(1, 2, 2, 0.0, f64::NAN, 0).is_err());
    }

    #[test]
    fn test_normal_odd_length_and_moments() {
        let img = ImageTensor::<f64>::random_normal(1, 101, 101, 3.0, 0.5, 9).unwrap();
        assert_eq!(img.len(), 10201);
        let n = img.len() as f64;
        let mean = img.as_slice().iter().sum::<f64>() / n;
        let var = img.as_slice().iter().map(|v| (v - mean).powi(2)).sum::<f64>() / n;
        assert!((mean - 3.0).abs() < 0.05, "mean {}", mean);
        assert!((var.sqrt() - 0.5).abs() < 0.05, "std {}", var.sqrt());
    }

    #[test]
    fn test_normal_rejects_negative_std() {
        assert!(FilterBank::<f64>::random_normal(1, 1, 1, 1, 0.0, -1.0, 0).is_err());
    }

    #[test]
    fn test_zero_std_is_constant() {
        let img = ImageTensor::<f64>::random_normal(1, 2, 3, 1.5, 0.0, 5).unwrap();
        assert!(img.as_slice().iter().all(|&v| v == 1.5));
    }
}
