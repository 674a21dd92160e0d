//! Integration tests for the expected-return engine
//!
//! Tests are organized by topic:
//! - `sampling` - Johnson SU variates against analytical moments
//! - `fitting` - Maximum-likelihood fits of simulated histories
//! - `simulation` - End-to-end runs, determinism and failure scoping

mod fitting;

use std::cell::Cell;

use rand::SeedableRng;
use rand::rngs::StdRng;
use rand_distr::{Distribution, Normal, StudentT};

use crate::distribution::{DistributionFitter, JohnsonSu, JohnsonSuParams};
use crate::error::FitError;

/// Johnson SU parameters with the given mean and standard deviation and a
/// mildly skewed, fat-tailed shape.
pub(crate) fn params_with_moments(mean: f64, sd: f64) -> JohnsonSuParams {
    let (gamma, delta) = (-0.2, 2.5);
    let unit = JohnsonSu::new(JohnsonSuParams::new(gamma, delta, 0.0, 1.0)).unwrap();
    let lambda = sd / unit.variance().sqrt();
    let xi = mean - lambda * unit.mean();
    JohnsonSuParams::new(gamma, delta, xi, lambda)
}

/// `n` simulated monthly returns with the given mean and standard deviation
pub(crate) fn history(n: usize, mean: f64, sd: f64, seed: u64) -> Vec<f64> {
    let dist = JohnsonSu::new(params_with_moments(mean, sd)).unwrap();
    dist.sample_n(&mut StdRng::seed_from_u64(seed), n)
}

/// `n` normally distributed returns
pub(crate) fn normal_history(n: usize, mean: f64, sd: f64, seed: u64) -> Vec<f64> {
    let normal = Normal::new(mean, sd).unwrap();
    let mut rng = StdRng::seed_from_u64(seed);
    (0..n).map(|_| normal.sample(&mut rng)).collect()
}

/// `n` returns following a Student-t with `dof` degrees of freedom, scaled by `scale`
pub(crate) fn student_t_history(n: usize, mean: f64, scale: f64, dof: f64, seed: u64) -> Vec<f64> {
    let t = StudentT::new(dof).unwrap();
    let mut rng = StdRng::seed_from_u64(seed);
    (0..n).map(|_| mean + scale * t.sample(&mut rng)).collect()
}

/// Fitter that skips estimation and counts how often it is asked
pub(crate) struct FixedFitter {
    params: JohnsonSuParams,
    calls: Cell<usize>,
}

impl FixedFitter {
    pub(crate) fn new(params: JohnsonSuParams) -> Self {
        Self {
            params,
            calls: Cell::new(0),
        }
    }

    pub(crate) fn calls(&self) -> usize {
        self.calls.get()
    }
}

impl DistributionFitter for FixedFitter {
    fn fit(&self, _sample: &[f64]) -> Result<JohnsonSuParams, FitError> {
        self.calls.set(self.calls.get() + 1);
        Ok(self.params)
    }
}
