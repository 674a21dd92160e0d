//! Johnson SU distribution: density, sampling and maximum-likelihood fitting

mod fit;
mod johnson_su;

pub use fit::{DistributionFitter, MaximumLikelihoodFitter, fit_johnson_su};
pub use johnson_su::{JohnsonSu, JohnsonSuParams, sample};
