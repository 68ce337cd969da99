//! Property-based tests for activations, losses and the RL helpers
//!
//! Uses proptest to verify invariants across random inputs

use proptest::prelude::*;
use tenconv_nn::activation::{sigmoid, softplus};
use tenconv_nn::{clip_by_norm, clip_by_value, mse, softmax, ucb_score, Activation};

proptest! {
    /// Softmax outputs form a probability distribution
    #[test]
    fn test_softmax_is_distribution(logits in prop::collection::vec(-50.0f64..50.0, 1..16)) {
        let p = softmax(&logits).unwrap();
        let sum: f64 = p.iter().sum();
        prop_assert!((sum - 1.0).abs() < 1e-9);
        prop_assert!(p.iter().all(|&v| (0.0..=1.0).contains(&v)));
    }

    /// Sigmoid stays in [0, 1] and is symmetric about zero
    #[test]
    fn test_sigmoid_symmetry(x in -100.0f64..100.0) {
        let s = sigmoid(x);
        prop_assert!((0.0..=1.0).contains(&s));
        prop_assert!((s + sigmoid(-x) - 1.0).abs() < 1e-12);
    }

    /// Softplus is a smooth upper bound of ReLU
    #[test]
    fn test_softplus_bounds_relu(x in -50.0f64..50.0) {
        let relu = Activation::Relu.apply(x);
        prop_assert!(softplus(x) >= relu);
        prop_assert!(softplus(x) - relu <= 2f64.ln() + 1e-12);
    }

    /// MSE is non-negative and zero only against itself
    #[test]
    fn test_mse_non_negative(values in prop::collection::vec(-10.0f64..10.0, 1..32)) {
        prop_assert_eq!(mse(&values, &values).unwrap(), 0.0);
        let shifted: Vec<f64> = values.iter().map(|v| v + 1.0).collect();
        prop_assert!((mse(&values, &shifted).unwrap() - 1.0).abs() < 1e-9);
    }

    /// Clipping bounds the gradient by value and by norm
    #[test]
    fn test_clipping_bounds(mut grads in prop::collection::vec(-100.0f64..100.0, 1..32), limit in 0.1f64..10.0) {
        let mut by_norm = grads.clone();
        clip_by_value(&mut grads, limit).unwrap();
        prop_assert!(grads.iter().all(|g| g.abs() <= limit));

        let scale = clip_by_norm(&mut by_norm, limit).unwrap();
        let norm: f64 = by_norm.iter().map(|g| g * g).sum::<f64>().sqrt();
        prop_assert!(norm <= limit * (1.0 + 1e-9));
        prop_assert!(scale > 0.0 && scale <= 1.0);
    }

    /// The UCB exploration bonus shrinks as a child is visited more
    #[test]
    fn test_ucb_decreases_with_visits(mean in 0.0f64..1.0, parent in 2u64..1000, visits in 1u64..500) {
        prop_assert!(ucb_score(mean, parent, visits, 1.4) >= ucb_score(mean, parent, visits + 1, 1.4));
        prop_assert!(ucb_score(mean, parent, visits, 1.4) >= mean);
    }
}
