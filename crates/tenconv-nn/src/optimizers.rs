//! Gradient-descent optimizers over flat parameter buffers.
//!
//! Parameters are plain slices, so a filter bank is updated in place through
//! [`tenconv_core::FilterBank::as_mut_slice`] and a bias through
//! [`tenconv_core::BiasVector::as_mut_slice`].
//!
//! # Example
//!
//! ```rust
//! use tenconv_nn::optimizers::{Momentum, Optimizer, OptimizerConfig};
//!
//! let config = OptimizerConfig::default()
//!     .learning_rate(0.1)
//!     .momentum(0.9);
//! let mut optimizer = Momentum::<f64>::new(config);
//!
//! let mut params = vec![1.0, 2.0];
//! optimizer.step(&mut params, &[0.5, -0.5]).unwrap();
//! assert_eq!(optimizer.num_steps(), 1);
//! assert!((params[0] - 0.95).abs() < 1e-12);
//! ```

use anyhow::{ensure, Context, Result};
use scirs2_core::numeric::Float;

/// Configuration for optimizers
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct OptimizerConfig {
    /// Learning rate
    pub learning_rate: f64,
    /// Momentum coefficient
    pub momentum: f64,
    /// Weight decay (L2 regularization)
    pub weight_decay: f64,
    /// Dampening for momentum
    pub dampening: f64,
    /// Nesterov momentum
    pub nesterov: bool,
}

impl Default for OptimizerConfig {
    fn default() -> Self {
        Self {
            learning_rate: 0.01,
            momentum: 0.9,
            weight_decay: 0.0,
            dampening: 0.0,
            nesterov: false,
        }
    }
}

impl OptimizerConfig {
    /// Plain gradient descent: no momentum, no decay
    pub fn sgd() -> Self {
        Self {
            momentum: 0.0,
            ..Self::default()
        }
    }

    /// Set learning rate
    pub fn learning_rate(mut self, lr: f64) -> Self {
        self.learning_rate = lr;
        self
    }

    /// Set momentum
    pub fn momentum(mut self, m: f64) -> Self {
        self.momentum = m;
        self
    }

    /// Set weight decay
    pub fn weight_decay(mut self, wd: f64) -> Self {
        self.weight_decay = wd;
        self
    }

    /// Set dampening
    pub fn dampening(mut self, d: f64) -> Self {
        self.dampening = d;
        self
    }

    /// Enable Nesterov momentum
    pub fn nesterov(mut self) -> Self {
        self.nesterov = true;
        self
    }

    /// Check that every coefficient is in range
    pub fn validate(&self) -> Result<()> {
        ensure!(
            self.learning_rate > 0.0 && self.learning_rate.is_finite(),
            "learning rate must be positive, got {}",
            self.learning_rate
        );
        ensure!(
            (0.0..1.0).contains(&self.momentum),
            "momentum must be in [0, 1), got {}",
            self.momentum
        );
        ensure!(
            self.weight_decay >= 0.0,
            "weight decay must be non-negative, got {}",
            self.weight_decay
        );
        ensure!(
            (0.0..=1.0).contains(&self.dampening),
            "dampening must be in [0, 1], got {}",
            self.dampening
        );
        Ok(())
    }
}

/// Optimizer trait for parameter updates
pub trait Optimizer<T: Float> {
    /// Perform single optimization step
    fn step(&mut self, params: &mut [T], gradients: &[T]) -> Result<()>;

    /// Get current learning rate
    fn get_lr(&self) -> f64;

    /// Set learning rate
    fn set_lr(&mut self, lr: f64);

    /// Reset optimizer state
    fn reset(&mut self);

    /// Get number of steps performed
    fn num_steps(&self) -> usize;
}

/// Gradient descent with momentum, weight decay and optional Nesterov look-ahead
///
/// With `g' = g + wd·p`:
///
/// ```text
/// v = momentum·v + (1 - dampening)·g'     (v = g' on the first step)
/// p -= lr·v                               (classic)
/// p -= lr·(g' + momentum·v)               (Nesterov)
/// ```
///
/// A momentum of zero reduces to `p -= lr·g'`.
#[derive(Debug, Clone)]
pub struct Momentum<T: Float> {
    config: OptimizerConfig,
    velocity: Option<Vec<T>>,
    step_count: usize,
}

impl<T: Float> Momentum<T> {
    /// Create new momentum optimizer, rejecting an out-of-range config
    ///
    /// # Errors
    ///
    /// Whatever [`OptimizerConfig::validate`] reports.
    pub fn try_new(config: OptimizerConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self::new(config))
    }

    /// Create new momentum optimizer
    ///
    /// The config is taken as-is; a momentum of 1 or more never decays the
    /// velocity. Use [`Momentum::try_new`] for untrusted settings.
    pub fn new(config: OptimizerConfig) -> Self {
        Self {
            config,
            velocity: None,
            step_count: 0,
        }
    }

    pub fn config(&self) -> &OptimizerConfig {
        &self.config
    }

    /// Current velocity, `None` before the first step
    pub fn velocity(&self) -> Option<&[T]> {
        self.velocity.as_deref()
    }
}

impl<T: Float> Optimizer<T> for Momentum<T> {
    fn step(&mut self, params: &mut [T], gradients: &[T]) -> Result<()> {
        ensure!(
            params.len() == gradients.len(),
            "{} parameters but {} gradients",
            params.len(),
            gradients.len()
        );
        let lr = T::from(self.config.learning_rate).context("Failed to convert learning rate")?;
        let momentum = T::from(self.config.momentum).context("Failed to convert momentum")?;
        let weight_decay =
            T::from(self.config.weight_decay).context("Failed to convert weight decay")?;
        let dampening = T::from(self.config.dampening).context("Failed to convert dampening")?;

        // Add weight decay
        let grad: Vec<T> = params
            .iter()
            .zip(gradients)
            .map(|(&p, &g)| g + weight_decay * p)
            .collect();

        let direction = if self.config.momentum > 0.0 {
            match self.velocity.as_mut() {
                Some(v) => {
                    ensure!(
                        v.len() == grad.len(),
                        "optimizer was initialised for {} parameters, got {}",
                        v.len(),
                        grad.len()
                    );
                    for (vi, &gi) in v.iter_mut().zip(&grad) {
                        *vi = momentum * *vi + (T::one() - dampening) * gi;
                    }
                }
                None => self.velocity = Some(grad.clone()),
            }
            let v = self.velocity.as_deref().unwrap_or_default();
            if self.config.nesterov {
                grad.iter()
                    .zip(v)
                    .map(|(&g, &vi)| g + momentum * vi)
                    .collect()
            } else {
                v.to_vec()
            }
        } else {
            grad
        };

        // Update parameters: params = params - lr * direction
        for (p, d) in params.iter_mut().zip(direction) {
            *p = *p - lr * d;
        }

        self.step_count += 1;
        Ok(())
    }

    fn get_lr(&self) -> f64 {
        self.config.learning_rate
    }

    fn set_lr(&mut self, lr: f64) {
        self.config.learning_rate = lr;
    }

    fn reset(&mut self) {
        self.velocity = None;
        self.step_count = 0;
    }

    fn num_steps(&self) -> usize {
        self.step_count
    }
}
