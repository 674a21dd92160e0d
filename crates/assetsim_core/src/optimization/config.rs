//! Optimizer settings and search-space description

use serde::{Deserialize, Serialize};

use crate::error::OptimizationError;

fn default_max_iterations() -> usize {
    5_000
}

fn default_tolerance() -> f64 {
    1e-6
}

fn default_objective_tolerance() -> f64 {
    1e-8
}

/// Termination settings for Nelder-Mead
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NelderMeadConfig {
    /// Maximum optimization iterations
    #[serde(default = "default_max_iterations")]
    pub max_iterations: usize,

    /// Converged once the simplex is smaller than this (max distance from centroid)
    #[serde(default = "default_tolerance")]
    pub tolerance: f64,

    /// Converged once best and worst objective values differ by less than
    /// this, scaled by `1 + |best|`
    #[serde(default = "default_objective_tolerance")]
    pub objective_tolerance: f64,
}

impl Default for NelderMeadConfig {
    fn default() -> Self {
        Self {
            max_iterations: default_max_iterations(),
            tolerance: default_tolerance(),
            objective_tolerance: default_objective_tolerance(),
        }
    }
}

/// Where to start and how far the search may go
#[derive(Debug, Clone, PartialEq)]
pub struct SearchSpace {
    /// Initial point
    pub start: Vec<f64>,
    /// Initial simplex edge length per dimension
    pub step: Vec<f64>,
    /// (min, max) per dimension
    pub bounds: Vec<(f64, f64)>,
}

impl SearchSpace {
    #[must_use]
    pub fn dimensions(&self) -> usize {
        self.start.len()
    }

    pub fn validate(&self) -> Result<(), OptimizationError> {
        if self.start.is_empty() {
            return Err(OptimizationError::NoParameters);
        }
        if self.step.len() != self.start.len() || self.bounds.len() != self.start.len() {
            return Err(OptimizationError::DimensionMismatch {
                parameters: self.start.len(),
                steps: self.step.len(),
                bounds: self.bounds.len(),
            });
        }
        for (index, &(min, max)) in self.bounds.iter().enumerate() {
            if !(min.is_finite() && max.is_finite() && min < max) {
                return Err(OptimizationError::InvalidBounds { index, min, max });
            }
        }
        Ok(())
    }
}
