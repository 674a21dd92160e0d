//! Tests for maximum-likelihood fitting
//!
//! These tests verify that:
//! - A fit of a large simulated sample recovers the generating distribution
//! - Fits never return a non-positive or non-finite scale
//! - Normal and fat-tailed histories of realistic length always converge
//! - Sample checks reject short and degenerate histories

use rand::SeedableRng;
use rand::rngs::StdRng;

use crate::config::FitConfig;
use crate::distribution::{
    DistributionFitter, JohnsonSu, JohnsonSuParams, MaximumLikelihoodFitter, fit_johnson_su,
    sample,
};
use crate::error::FitError;

use super::{history, normal_history, student_t_history};

#[test]
fn test_recovers_generating_distribution() {
    let truth = JohnsonSuParams::new(0.5, 2.0, 0.01, 0.04);
    let truth_dist = JohnsonSu::new(truth).unwrap();
    let draws = sample(&truth, 5_000, &mut StdRng::seed_from_u64(2024)).unwrap();

    let fitted = JohnsonSu::new(fit_johnson_su(&draws).unwrap()).unwrap();

    // The maximum cannot be below the likelihood of the true parameters
    assert!(fitted.log_likelihood(&draws) >= truth_dist.log_likelihood(&draws) - 1e-3);

    let sd = truth_dist.variance().sqrt();
    assert!(
        (fitted.mean() - truth_dist.mean()).abs() < 0.1 * sd,
        "fitted mean {} vs {}",
        fitted.mean(),
        truth_dist.mean()
    );
    assert!(
        (fitted.variance().sqrt() / sd - 1.0).abs() < 0.1,
        "fitted sd {} vs {}",
        fitted.variance().sqrt(),
        sd
    );

    let params = fitted.params();
    assert!((params.delta - truth.delta).abs() < 0.6, "delta = {}", params.delta);
    assert!((params.gamma - truth.gamma).abs() < 0.6, "gamma = {}", params.gamma);
}

#[test]
fn test_scale_is_always_positive() {
    let mut samples: Vec<Vec<f64>> = Vec::new();
    for seed in 0..4 {
        samples.push(history(240, 0.006, 0.04, seed));
        samples.push(normal_history(120, 0.005, 0.02, 50 + seed));
        samples.push(student_t_history(360, 0.0, 0.01, 3.0, 60 + seed));
    }

    for (i, returns) in samples.iter().enumerate() {
        let params = fit_johnson_su(returns).unwrap_or_else(|e| panic!("sample {i}: {e}"));
        assert!(
            params.lambda > 0.0 && params.lambda.is_finite(),
            "sample {i}: lambda = {}",
            params.lambda
        );
        assert!(
            params.delta > 0.0 && params.delta.is_finite(),
            "sample {i}: delta = {}",
            params.delta
        );
    }
}

#[test]
fn test_normal_histories_always_converge() {
    for seed in 0..100 {
        let returns = normal_history(300, 0.006, 0.04, seed);
        let params = fit_johnson_su(&returns).unwrap_or_else(|e| panic!("seed {seed}: {e}"));
        assert!(params.lambda > 0.0 && params.lambda.is_finite(), "seed {seed}");
        assert!(params.delta > 0.0 && params.delta.is_finite(), "seed {seed}");

        // A near-normal fit reproduces the sample's first two moments
        let fitted = JohnsonSu::new(params).unwrap();
        let mean = returns.iter().sum::<f64>() / returns.len() as f64;
        assert!((fitted.mean() - mean).abs() < 0.01, "seed {seed}: mean {}", fitted.mean());
        assert!(
            (fitted.variance().sqrt() - 0.04).abs() < 0.01,
            "seed {seed}: sd {}",
            fitted.variance().sqrt()
        );
    }
}

#[test]
fn test_fat_tailed_histories_always_converge() {
    for seed in 0..50 {
        let returns = student_t_history(290, 0.006, 0.03, 4.0, seed);
        let params = fit_johnson_su(&returns).unwrap_or_else(|e| panic!("seed {seed}: {e}"));
        assert!(params.lambda > 0.0 && params.lambda.is_finite(), "seed {seed}");
        assert!(params.delta > 0.0 && params.delta.is_finite(), "seed {seed}");
    }
}

#[test]
fn test_short_history_is_rejected() {
    let fitter = MaximumLikelihoodFitter::new(FitConfig::default());
    let returns = history(29, 0.006, 0.04, 1);
    assert_eq!(
        fitter.fit(&returns).unwrap_err(),
        FitError::InsufficientSample {
            observations: 29,
            required: 30
        }
    );
    assert!(!matches!(
        fitter.fit(&history(30, 0.006, 0.04, 1)),
        Err(FitError::InsufficientSample { .. })
    ));
}

#[test]
fn test_tiny_iteration_budget_fails_to_converge() {
    let mut config = FitConfig::default();
    config.optimizer.max_iterations = 2;
    let fitter = MaximumLikelihoodFitter::new(config);

    // Two iterations for the first search and each of the two restarts
    let err = fitter.fit(&history(300, 0.006, 0.04, 4)).unwrap_err();
    assert!(matches!(err, FitError::NotConverged { iterations: 6, .. }), "{err}");
}
