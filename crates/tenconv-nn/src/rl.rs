//! Tabular Q-learning and UCB1 action selection
//!
//! # Example
//!
//! ```rust
//! use tenconv_nn::rl::{QLearningConfig, QTable};
//!
//! let config = QLearningConfig::default();
//! let mut table = QTable::<f64>::new(2, 3).unwrap();
//! table.update(0, 1, 1.0, Some(1), &config).unwrap();
//! assert_eq!(table.best_action(0), Some(1));
//! ```

use anyhow::{ensure, Context, Result};
use scirs2_core::numeric::Float;

/// Step size and discount for the Q-learning update
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct QLearningConfig {
    /// Learning rate α
    pub alpha: f64,
    /// Discount factor γ
    pub gamma: f64,
}

impl Default for QLearningConfig {
    fn default() -> Self {
        Self {
            alpha: 0.1,
            gamma: 0.9,
        }
    }
}

impl QLearningConfig {
    pub fn new(alpha: f64, gamma: f64) -> Result<Self> {
        let config = Self { alpha, gamma };
        config.validate()?;
        Ok(config)
    }

    /// Both coefficients must lie in `[0, 1]`
    pub fn validate(&self) -> Result<()> {
        ensure!(
            (0.0..=1.0).contains(&self.alpha),
            "alpha must be in [0, 1], got {}",
            self.alpha
        );
        ensure!(
            (0.0..=1.0).contains(&self.gamma),
            "gamma must be in [0, 1], got {}",
            self.gamma
        );
        Ok(())
    }
}

/// One Q-learning update: `q + α·(reward + γ·next_max_q - q)`
///
/// Terminal transitions pass `next_max_q = 0`.
pub fn q_update<T: Float>(q: T, reward: T, next_max_q: T, config: &QLearningConfig) -> Result<T> {
    let alpha = T::from(config.alpha).context("Failed to convert alpha")?;
    let gamma = T::from(config.gamma).context("Failed to convert gamma")?;
    Ok(q + alpha * (reward + gamma * next_max_q - q))
}

/// Dense `states × actions` table of action values, initialised to zero
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(
    feature = "serde",
    serde(
        try_from = "QTableParts<T>",
        bound(deserialize = "T: serde::Deserialize<'de>")
    )
)]
pub struct QTable<T> {
    states: usize,
    actions: usize,
    values: Vec<T>,
}

#[cfg(feature = "serde")]
#[derive(serde::Deserialize)]
struct QTableParts<T> {
    states: usize,
    actions: usize,
    values: Vec<T>,
}

#[cfg(feature = "serde")]
impl<T> TryFrom<QTableParts<T>> for QTable<T> {
    type Error = anyhow::Error;

    fn try_from(parts: QTableParts<T>) -> Result<Self> {
        Self::from_values(parts.states, parts.actions, parts.values)
    }
}

impl<T> QTable<T> {
    /// Table over existing action values, row-major by state
    pub fn from_values(states: usize, actions: usize, values: Vec<T>) -> Result<Self> {
        ensure!(states > 0, "Q-table needs at least one state");
        ensure!(actions > 0, "Q-table needs at least one action");
        let expected = states
            .checked_mul(actions)
            .context("Q-table shape overflows usize")?;
        ensure!(
            values.len() == expected,
            "Q-table of {states}x{actions} needs {expected} values, got {}",
            values.len()
        );
        Ok(Self {
            states,
            actions,
            values,
        })
    }
}

impl<T: Float> QTable<T> {
    pub fn new(states: usize, actions: usize) -> Result<Self> {
        ensure!(states > 0, "Q-table needs at least one state");
        ensure!(actions > 0, "Q-table needs at least one action");
        let len = states
            .checked_mul(actions)
            .context("Q-table shape overflows usize")?;
        Self::from_values(states, actions, vec![T::zero(); len])
    }

    pub fn states(&self) -> usize {
        self.states
    }

    pub fn actions(&self) -> usize {
        self.actions
    }

    /// Action values of one state
    pub fn row(&self, state: usize) -> Option<&[T]> {
        if state >= self.states {
            return None;
        }
        let start = state * self.actions;
        Some(&self.values[start..start + self.actions])
    }

    pub fn get(&self, state: usize, action: usize) -> Option<T> {
        self.row(state).and_then(|r| r.get(action).copied())
    }

    /// Greedy action; the lowest index wins ties
    pub fn best_action(&self, state: usize) -> Option<usize> {
        let row = self.row(state)?;
        let mut best = 0;
        for (a, &v) in row.iter().enumerate().skip(1) {
            if v > row[best] {
                best = a;
            }
        }
        Some(best)
    }

    /// Largest action value of a state
    pub fn max_value(&self, state: usize) -> Option<T> {
        self.best_action(state).and_then(|a| self.get(state, a))
    }

    /// Apply [`q_update`] to `(state, action)` and return the new value
    ///
    /// `next_state` is `None` for terminal transitions.
    pub fn update(
        &mut self,
        state: usize,
        action: usize,
        reward: T,
        next_state: Option<usize>,
        config: &QLearningConfig,
    ) -> Result<T> {
        ensure!(
            state < self.states && action < self.actions,
            "(state {}, action {}) outside a {}x{} Q-table",
            state,
            action,
            self.states,
            self.actions
        );
        let next_max = match next_state {
            Some(s) => self
                .max_value(s)
                .with_context(|| format!("next state {} outside the Q-table", s))?,
            None => T::zero(),
        };
        let idx = state * self.actions + action;
        let updated = q_update(self.values[idx], reward, next_max, config)?;
        self.values[idx] = updated;
        Ok(updated)
    }
}

/// UCB1 score `mean + c·sqrt(ln(parent_visits) / child_visits)`
///
/// Unvisited children score `+∞` so each is tried once. A parent with no visits
/// contributes no exploration bonus.
pub fn ucb_score(mean: f64, parent_visits: u64, child_visits: u64, c: f64) -> f64 {
    if child_visits == 0 {
        return f64::INFINITY;
    }
    let parent = parent_visits.max(1) as f64;
    mean + c * (parent.ln() / child_visits as f64).sqrt()
}

/// Index of the child with the highest [`ucb_score`]; the first one wins ties
///
/// `children` holds `(mean reward, visit count)` pairs.
pub fn select_ucb(children: &[(f64, u64)], parent_visits: u64, c: f64) -> Option<usize> {
    let mut best: Option<(usize, f64)> = None;
    for (i, &(mean, visits)) in children.iter().enumerate() {
        let score = ucb_score(mean, parent_visits, visits, c);
        match best {
            Some((_, s)) if score <= s => {}
            _ => best = Some((i, score)),
        }
    }
    best.map(|(i, _)| i)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_q_update() {
        let config = QLearningConfig::new(0.5, 0.9).unwrap();
        let q = q_update(1.0f64, 2.0, 10.0, &config).unwrap();
        // 1 + 0.5 * (2 + 9 - 1)
        assert!((q - 6.0).abs() < 1e-12);
        let terminal = q_update(1.0f64, 2.0, 0.0, &config).unwrap();
        assert!((terminal - 1.5).abs() < 1e-12);
    }

    #[test]
    fn test_config_validation() {
        assert!(QLearningConfig::new(1.5, 0.9).is_err());
        assert!(QLearningConfig::new(0.1, -0.1).is_err());
        assert!(QLearningConfig::default().validate().is_ok());
    }

    #[test]
    fn test_qtable_update_and_greedy() {
        let config = QLearningConfig::new(1.0, 0.5).unwrap();
        let mut table = QTable::<f64>::new(2, 2).unwrap();
        table.update(1, 0, 4.0, None, &config).unwrap();
        assert_eq!(table.max_value(1), Some(4.0));
        // bootstraps from state 1
        let v = table.update(0, 1, 1.0, Some(1), &config).unwrap();
        assert_eq!(v, 3.0);
        assert_eq!(table.best_action(0), Some(1));
        assert_eq!(table.row(0), Some(&[0.0, 3.0][..]));
    }

    #[test]
    fn test_qtable_bounds() {
        let config = QLearningConfig::default();
        let mut table = QTable::<f64>::new(1, 2).unwrap();
        assert!(table.update(1, 0, 1.0, None, &config).is_err());
        assert!(table.update(0, 2, 1.0, None, &config).is_err());
        assert!(table.update(0, 0, 1.0, Some(5), &config).is_err());
        assert_eq!(table.best_action(3), None);
        assert!(QTable::<f64>::new(0, 1).is_err());
        // ties go to the first action
        assert_eq!(table.best_action(0), Some(0));
    }

    #[test]
    fn test_qtable_from_values_checks_length() {
        let table = QTable::from_values(2, 2, vec![0.0f64, 1.0, 2.0, 0.5]).unwrap();
        assert_eq!(table.best_action(0), Some(1));
        assert_eq!(table.max_value(1), Some(2.0));
        assert!(QTable::from_values(2, 2, vec![0.0f64; 3]).is_err());
        assert!(QTable::<f64>::from_values(0, 2, vec![]).is_err());
        assert!(QTable::<f64>::from_values(usize::MAX, 2, vec![]).is_err());
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_qtable_deserialize_rejects_short_values() {
        let err = serde_json::from_str::<QTable<f64>>(r#"{"states":2,"actions":3,"values":[1.0]}"#);
        assert!(err.is_err());
        let err = serde_json::from_str::<QTable<f64>>(r#"{"states":0,"actions":3,"values":[]}"#);
        assert!(err.is_err());

        let mut table = QTable::<f64>::new(2, 2).unwrap();
        table
            .update(1, 0, 4.0, None, &QLearningConfig::default())
            .unwrap();
        let json = serde_json::to_string(&table).unwrap();
        let back: QTable<f64> = serde_json::from_str(&json).unwrap();
        assert_eq!(back, table);
    }

    #[test]
    fn test_ucb() {
        assert_eq!(ucb_score(0.3, 10, 0, 1.4), f64::INFINITY);
        assert_eq!(ucb_score(0.3, 0, 2, 1.4), 0.3);
        let s = ucb_score(0.5, 100, 10, 2.0);
        assert!((s - (0.5 + 2.0 * (100f64.ln() / 10.0).sqrt())).abs() < 1e-12);

        let children = [(0.9, 50), (0.2, 0), (0.5, 1)];
        assert_eq!(select_ucb(&children, 51, 1.0), Some(1));
        let visited = [(0.9, 50), (0.1, 2), (0.95, 48)];
        assert_eq!(select_ucb(&visited, 100, 0.0), Some(2));
        assert_eq!(select_ucb(&[], 1, 1.0), None);
    }
}
