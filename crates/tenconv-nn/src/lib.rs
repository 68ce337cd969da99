//! # tenconv-nn
//!
//! Training-side toolkit around the TenConv convolution engine.
//!
//! This crate provides:
//! - Activation functions with derivatives and an [`Activation`] selector that maps whole
//!   feature maps
//! - Loss functions (MSE, cross entropy), L2 regularization and gradient clipping
//! - A momentum optimizer over flat parameter buffers
//! - Tabular Q-learning and UCB1 action selection
//!
//! Errors are reported through `anyhow::Result`.

pub mod activation;
pub mod loss;
pub mod optimizers;
pub mod rl;

// Re-exports
pub use activation::{softmax, Activation};
pub use loss::{
    clip_by_norm, clip_by_value, cross_entropy, l2_gradient, l2_penalty, mse, mse_gradient,
    softmax_cross_entropy_gradient, EPSILON,
};
pub use optimizers::{Momentum, Optimizer, OptimizerConfig};
pub use rl::{q_update, select_ucb, ucb_score, QLearningConfig, QTable};
