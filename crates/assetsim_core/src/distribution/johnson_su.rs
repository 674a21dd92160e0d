use std::f64::consts::PI;

use rand::Rng;
use rand::distr::Distribution;
use rand_distr::StandardNormal;
use serde::{Deserialize, Serialize};

use crate::error::DistributionError;

/// Raw Johnson SU parameters as produced by a fitter.
///
/// `gamma` and `delta` are the two shape parameters, `xi` the location and
/// `lambda` the scale. Nothing here is validated; see [`JohnsonSu`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct JohnsonSuParams {
    pub gamma: f64,
    pub delta: f64,
    pub xi: f64,
    pub lambda: f64,
}

impl JohnsonSuParams {
    #[must_use]
    pub fn new(gamma: f64, delta: f64, xi: f64, lambda: f64) -> Self {
        Self {
            gamma,
            delta,
            xi,
            lambda,
        }
    }

    fn invalid(&self, reason: &'static str) -> DistributionError {
        DistributionError::InvalidParameters {
            gamma: self.gamma,
            delta: self.delta,
            xi: self.xi,
            lambda: self.lambda,
            reason,
        }
    }
}

/// A Johnson SU distribution with checked parameters
///
/// If `Z` is standard normal then `X = xi + lambda * sinh((Z - gamma) / delta)`
/// follows this distribution.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct JohnsonSu {
    params: JohnsonSuParams,
}

impl JohnsonSu {
    pub fn new(params: JohnsonSuParams) -> Result<Self, DistributionError> {
        let JohnsonSuParams {
            gamma,
            delta,
            xi,
            lambda,
        } = params;

        if !(gamma.is_finite() && delta.is_finite() && xi.is_finite() && lambda.is_finite()) {
            return Err(params.invalid("parameters must be finite"));
        }
        if delta <= 0.0 {
            return Err(params.invalid("delta must be positive"));
        }
        if lambda <= 0.0 {
            return Err(params.invalid("lambda must be positive"));
        }

        Ok(Self { params })
    }

    #[must_use]
    pub fn params(&self) -> JohnsonSuParams {
        self.params
    }

    /// Natural log of the density at `x`
    #[must_use]
    pub fn ln_pdf(&self, x: f64) -> f64 {
        let p = &self.params;
        ln_pdf_unchecked(x, p.gamma, p.delta, p.xi, p.lambda)
    }

    #[must_use]
    pub fn pdf(&self, x: f64) -> f64 {
        self.ln_pdf(x).exp()
    }

    /// Sum of [`ln_pdf`](Self::ln_pdf) over the sample
    #[must_use]
    pub fn log_likelihood(&self, sample: &[f64]) -> f64 {
        let p = &self.params;
        log_likelihood_unchecked(sample, p.gamma, p.delta, p.xi, p.lambda)
    }

    #[must_use]
    pub fn mean(&self) -> f64 {
        let p = &self.params;
        let omega = (1.0 / (p.delta * p.delta)).exp();
        p.xi - p.lambda * omega.sqrt() * (p.gamma / p.delta).sinh()
    }

    #[must_use]
    pub fn variance(&self) -> f64 {
        let p = &self.params;
        let omega = (1.0 / (p.delta * p.delta)).exp();
        0.5 * p.lambda * p.lambda * (omega - 1.0) * (omega * (2.0 * p.gamma / p.delta).cosh() + 1.0)
    }

    /// Fill `out` with independent variates
    pub fn fill<R: Rng + ?Sized>(&self, rng: &mut R, out: &mut [f64]) {
        for slot in out.iter_mut() {
            *slot = self.sample(rng);
        }
    }

    #[must_use]
    pub fn sample_n<R: Rng + ?Sized>(&self, rng: &mut R, count: usize) -> Vec<f64> {
        let mut out = vec![0.0; count];
        self.fill(rng, &mut out);
        out
    }
}

impl TryFrom<JohnsonSuParams> for JohnsonSu {
    type Error = DistributionError;

    fn try_from(params: JohnsonSuParams) -> Result<Self, Self::Error> {
        JohnsonSu::new(params)
    }
}

impl Distribution<f64> for JohnsonSu {
    #[inline]
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> f64 {
        let p = &self.params;
        let z: f64 = rng.sample(StandardNormal);
        p.xi + p.lambda * ((z - p.gamma) / p.delta).sinh()
    }
}

/// Draw `count` independent Johnson SU variates from `rng`.
pub fn sample<R: Rng + ?Sized>(
    params: &JohnsonSuParams,
    count: usize,
    rng: &mut R,
) -> Result<Vec<f64>, DistributionError> {
    if count == 0 {
        return Err(DistributionError::ZeroCount);
    }
    let dist = JohnsonSu::new(*params)?;
    Ok(dist.sample_n(rng, count))
}

#[inline]
pub(crate) fn ln_pdf_unchecked(x: f64, gamma: f64, delta: f64, xi: f64, lambda: f64) -> f64 {
    let z = (x - xi) / lambda;
    let t = gamma + delta * z.asinh();
    delta.ln() - lambda.ln() - 0.5 * (2.0 * PI).ln() - z.hypot(1.0).ln() - 0.5 * t * t
}

pub(crate) fn log_likelihood_unchecked(
    sample: &[f64],
    gamma: f64,
    delta: f64,
    xi: f64,
    lambda: f64,
) -> f64 {
    let n = sample.len() as f64;
    let constant = n * (delta.ln() - lambda.ln() - 0.5 * (2.0 * PI).ln());
    let kernel: f64 = sample
        .iter()
        .map(|&x| {
            let z = (x - xi) / lambda;
            let t = gamma + delta * z.asinh();
            z.hypot(1.0).ln() + 0.5 * t * t
        })
        .sum();
    constant - kernel
}

/// Mean and variance of the standardized distribution (`xi = 0`, `lambda = 1`)
pub(crate) fn standardized_moments(gamma: f64, delta: f64) -> (f64, f64) {
    let omega = (1.0 / (delta * delta)).exp();
    let shape = gamma / delta;
    let mean = -omega.sqrt() * shape.sinh();
    let variance = 0.5 * (omega - 1.0) * (omega * (2.0 * shape).cosh() + 1.0);
    (mean, variance)
}

/// Kurtosis (not excess) of a Johnson SU with `omega = exp(1 / delta^2)` and `shape = gamma / delta`
pub(crate) fn kurtosis(omega: f64, shape: f64) -> f64 {
    let w2 = omega * omega;
    let numerator = w2 * (w2 * w2 + 2.0 * w2 * omega + 3.0 * w2 - 3.0) * (4.0 * shape).cosh()
        + 4.0 * w2 * (omega + 2.0) * (2.0 * shape).cosh()
        + 3.0 * (2.0 * omega + 1.0);
    let denominator = 2.0 * (omega * (2.0 * shape).cosh() + 1.0).powi(2);
    numerator / denominator
}
