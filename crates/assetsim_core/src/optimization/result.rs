//! Optimization result types
//!
//! Contains types for tracking optimization progress and final results.

use serde::{Deserialize, Serialize};

/// Best objective value seen after each iteration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ConvergenceHistory {
    /// Best objective value found at each iteration (monotonically improving)
    pub best_values: Vec<f64>,
}

impl ConvergenceHistory {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the best objective of the current simplex
    pub fn record(&mut self, objective: f64) {
        let current_best = self
            .best_values
            .last()
            .copied()
            .unwrap_or(f64::NEG_INFINITY);
        self.best_values.push(current_best.max(objective));
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.best_values.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.best_values.is_empty()
    }
}

/// Reason why optimization terminated
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TerminationReason {
    /// Simplex or objective spread fell below tolerance
    Converged,

    /// Maximum iterations reached without convergence
    MaxIterationsReached,
}

/// Final result from an optimization run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OptimizationResult {
    /// Best point found
    pub best: Vec<f64>,

    /// The objective function value at `best`
    pub objective_value: f64,

    pub converged: bool,

    pub termination_reason: TerminationReason,

    /// Number of iterations performed
    pub iterations: usize,

    /// Number of objective evaluations
    pub evaluations: usize,

    pub history: ConvergenceHistory,
}
