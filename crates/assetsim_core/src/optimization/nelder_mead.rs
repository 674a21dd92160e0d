//! Nelder-Mead simplex optimization
//!
//! The Nelder-Mead algorithm is a derivative-free optimization method that
//! works well for continuous, multi-parameter optimization problems. It
//! maintains a simplex of N+1 points in N-dimensional space and iteratively
//! transforms the simplex toward the optimum.

use crate::error::OptimizationError;

use super::config::{NelderMeadConfig, SearchSpace};
use super::result::{ConvergenceHistory, OptimizationResult, TerminationReason};

/// Progress callback for Nelder-Mead optimization
///
/// Arguments: (iteration, best_objective, current_simplex_size)
pub type ProgressCallback = Box<dyn Fn(usize, f64, f64) + Send + Sync>;

/// Standard Nelder-Mead coefficients
const REFLECTION_COEF: f64 = 1.0;
const EXPANSION_COEF: f64 = 2.0;
const CONTRACTION_COEF: f64 = 0.5;
const SHRINK_COEF: f64 = 0.5;

/// A point in parameter space with its evaluation
#[derive(Debug, Clone)]
struct SimplexVertex {
    values: Vec<f64>,
    objective: f64,
}

/// NaN objectives rank below every real value
#[inline]
fn sanitize(objective: f64) -> f64 {
    if objective.is_nan() {
        f64::NEG_INFINITY
    } else {
        objective
    }
}

/// Initialize the simplex with N+1 points
fn initialize_simplex<F: FnMut(&[f64]) -> f64>(
    evaluate: &mut F,
    space: &SearchSpace,
) -> Vec<SimplexVertex> {
    let n = space.dimensions();
    let mut simplex = Vec::with_capacity(n + 1);

    let mut start = space.start.clone();
    clamp_to_bounds(&mut start, &space.bounds);
    simplex.push(SimplexVertex {
        objective: evaluate(&start),
        values: start.clone(),
    });

    // Create n additional points by perturbing each dimension
    for i in 0..n {
        let mut point = start.clone();
        let (min, max) = space.bounds[i];
        let step = space.step[i].abs().min(max - min);

        // Step toward the upper bound unless that leaves the box
        if point[i] + step <= max {
            point[i] += step;
        } else {
            point[i] = (point[i] - step).max(min);
        }

        simplex.push(SimplexVertex {
            objective: evaluate(&point),
            values: point,
        });
    }

    simplex
}

/// Sort simplex by objective (best first, worst last)
fn sort_simplex(simplex: &mut [SimplexVertex]) {
    simplex.sort_by(|a, b| {
        b.objective
            .partial_cmp(&a.objective)
            .unwrap_or(std::cmp::Ordering::Equal)
    });
}

/// Calculate the centroid of all points except the worst
fn centroid(simplex: &[SimplexVertex]) -> Vec<f64> {
    let n = simplex[0].values.len();
    let mut center = vec![0.0; n];

    // Exclude the last (worst) point
    for vertex in simplex.iter().take(simplex.len() - 1) {
        for (i, val) in vertex.values.iter().enumerate() {
            center[i] += val;
        }
    }

    let count = (simplex.len() - 1) as f64;
    for val in &mut center {
        *val /= count;
    }

    center
}

/// Reflect a point through the centroid
fn reflect(point: &[f64], centroid: &[f64], coef: f64) -> Vec<f64> {
    point
        .iter()
        .zip(centroid.iter())
        .map(|(p, c)| c + coef * (c - p))
        .collect()
}

/// Move a point toward an anchor by `coef` of the distance
fn contract(anchor: &[f64], point: &[f64], coef: f64) -> Vec<f64> {
    anchor
        .iter()
        .zip(point.iter())
        .map(|(a, p)| a + coef * (p - a))
        .collect()
}

/// Clamp values to bounds
fn clamp_to_bounds(values: &mut [f64], bounds: &[(f64, f64)]) {
    for (val, (min, max)) in values.iter_mut().zip(bounds.iter()) {
        *val = val.clamp(*min, *max);
    }
}

/// Calculate simplex size (max distance from centroid)
fn simplex_size(simplex: &[SimplexVertex], centroid: &[f64]) -> f64 {
    simplex
        .iter()
        .map(|v| {
            v.values
                .iter()
                .zip(centroid.iter())
                .map(|(a, b)| (a - b).powi(2))
                .sum::<f64>()
                .sqrt()
        })
        .fold(0.0_f64, |a, b| a.max(b))
}

/// Difference between best and worst objective of a sorted simplex
fn objective_spread(simplex: &[SimplexVertex]) -> f64 {
    let spread = simplex[0].objective - simplex[simplex.len() - 1].objective;
    if spread.is_nan() { f64::INFINITY } else { spread }
}

/// Objective spread small relative to the best value of a sorted simplex
fn objective_settled(simplex: &[SimplexVertex], config: &NelderMeadConfig) -> bool {
    let best = simplex[0].objective;
    best.is_finite()
        && objective_spread(simplex) <= config.objective_tolerance * (1.0 + best.abs())
}

fn is_converged(simplex: &[SimplexVertex], config: &NelderMeadConfig) -> bool {
    let cent = centroid(simplex);
    simplex_size(simplex, &cent) < config.tolerance || objective_settled(simplex, config)
}

/// Maximize `objective` over a bounded box with the Nelder-Mead simplex method.
///
/// # Arguments
/// * `objective` - Function to maximize; NaN is treated as negative infinity
/// * `space` - Start point, initial step per dimension and bounds
/// * `config` - Iteration budget and convergence tolerances
/// * `progress_callback` - Optional callback for progress updates
pub fn maximize_nelder_mead<F: FnMut(&[f64]) -> f64>(
    mut objective: F,
    space: &SearchSpace,
    config: &NelderMeadConfig,
    progress_callback: Option<ProgressCallback>,
) -> Result<OptimizationResult, OptimizationError> {
    space.validate()?;

    let bounds = &space.bounds;
    let mut evaluations = 0usize;
    let mut evaluate = |point: &[f64]| {
        evaluations += 1;
        sanitize(objective(point))
    };

    let mut history = ConvergenceHistory::new();
    let mut simplex = initialize_simplex(&mut evaluate, space);
    let mut iteration = 0;
    let mut converged = false;

    // Main optimization loop
    while iteration < config.max_iterations {
        sort_simplex(&mut simplex);
        history.record(simplex[0].objective);

        let cent = centroid(&simplex);
        let size = simplex_size(&simplex, &cent);

        // Check convergence
        if size < config.tolerance || objective_settled(&simplex, config) {
            converged = true;
            break;
        }

        iteration += 1;

        // Progress callback
        if let Some(ref callback) = progress_callback {
            callback(iteration, simplex[0].objective, size);
        }

        // Extract values we need before mutating simplex
        let best_objective = simplex[0].objective;
        let worst_idx = simplex.len() - 1;
        let second_worst_objective = simplex[worst_idx - 1].objective;
        let worst_objective = simplex[worst_idx].objective;
        let worst_values = simplex[worst_idx].values.clone();

        // Try reflection
        let mut reflected = reflect(&worst_values, &cent, REFLECTION_COEF);
        clamp_to_bounds(&mut reflected, bounds);
        let reflected_obj = evaluate(&reflected);

        if reflected_obj > best_objective {
            // Reflected is best so far - try expansion
            let mut expanded = reflect(&worst_values, &cent, EXPANSION_COEF);
            clamp_to_bounds(&mut expanded, bounds);
            let expanded_obj = evaluate(&expanded);

            simplex[worst_idx] = if expanded_obj > reflected_obj {
                SimplexVertex {
                    values: expanded,
                    objective: expanded_obj,
                }
            } else {
                SimplexVertex {
                    values: reflected,
                    objective: reflected_obj,
                }
            };
        } else if reflected_obj > second_worst_objective {
            // Reflected is better than second worst - accept it
            simplex[worst_idx] = SimplexVertex {
                values: reflected,
                objective: reflected_obj,
            };
        } else {
            // Try contraction
            let contract_point = if reflected_obj > worst_objective {
                &reflected
            } else {
                &worst_values
            };

            let mut contracted = contract(&cent, contract_point, CONTRACTION_COEF);
            clamp_to_bounds(&mut contracted, bounds);
            let contracted_obj = evaluate(&contracted);

            if contracted_obj > worst_objective.max(reflected_obj) {
                simplex[worst_idx] = SimplexVertex {
                    values: contracted,
                    objective: contracted_obj,
                };
            } else {
                // Shrink the simplex toward the best point
                let best_values = simplex[0].values.clone();
                for vertex in simplex.iter_mut().skip(1) {
                    let mut shrunk = contract(&best_values, &vertex.values, SHRINK_COEF);
                    clamp_to_bounds(&mut shrunk, bounds);
                    let shrunk_obj = evaluate(&shrunk);
                    *vertex = SimplexVertex {
                        values: shrunk,
                        objective: shrunk_obj,
                    };
                }
            }
        }
    }

    sort_simplex(&mut simplex);
    if !converged {
        converged = is_converged(&simplex, config);
    }

    let best = simplex.swap_remove(0);
    Ok(OptimizationResult {
        best: best.values,
        objective_value: best.objective,
        converged,
        termination_reason: if converged {
            TerminationReason::Converged
        } else {
            TerminationReason::MaxIterationsReached
        },
        iterations: iteration,
        evaluations,
        history,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn quadratic_space() -> SearchSpace {
        SearchSpace {
            start: vec![0.0, 0.0],
            step: vec![0.5, 0.5],
            bounds: vec![(-10.0, 10.0), (-10.0, 10.0)],
        }
    }

    #[test]
    fn test_reflect() {
        let point = vec![0.0, 0.0];
        let centroid = vec![1.0, 1.0];

        let reflected = reflect(&point, &centroid, 1.0);
        assert!((reflected[0] - 2.0).abs() < 0.001);
        assert!((reflected[1] - 2.0).abs() < 0.001);
    }

    #[test]
    fn test_clamp_to_bounds() {
        let mut values = vec![-5.0, 15.0, 5.0];
        let bounds = vec![(0.0, 10.0), (0.0, 10.0), (0.0, 10.0)];

        clamp_to_bounds(&mut values, &bounds);

        assert!((values[0] - 0.0).abs() < 0.001);
        assert!((values[1] - 10.0).abs() < 0.001);
        assert!((values[2] - 5.0).abs() < 0.001);
    }

    #[test]
    fn test_centroid() {
        let simplex = vec![
            SimplexVertex {
                values: vec![0.0, 0.0],
                objective: 0.0,
            },
            SimplexVertex {
                values: vec![2.0, 0.0],
                objective: 0.0,
            },
            SimplexVertex {
                values: vec![1.0, 2.0], // This is the worst (last), excluded
                objective: -1.0,
            },
        ];

        let cent = centroid(&simplex);
        // Centroid of (0,0) and (2,0) = (1, 0)
        assert!((cent[0] - 1.0).abs() < 0.001);
        assert!((cent[1] - 0.0).abs() < 0.001);
    }

    #[test]
    fn test_maximizes_concave_quadratic() {
        let objective = |x: &[f64]| -((x[0] - 3.0).powi(2) + 2.0 * (x[1] + 1.5).powi(2));
        let result = maximize_nelder_mead(
            objective,
            &quadratic_space(),
            &NelderMeadConfig::default(),
            None,
        )
        .unwrap();

        assert!(result.converged);
        assert_eq!(result.termination_reason, TerminationReason::Converged);
        assert!((result.best[0] - 3.0).abs() < 1e-3, "x = {:?}", result.best);
        assert!((result.best[1] + 1.5).abs() < 1e-3, "x = {:?}", result.best);
        assert!(result.objective_value > -1e-6);
        assert!(result.evaluations > result.iterations);
    }

    #[test]
    fn test_history_never_decreases() {
        let objective = |x: &[f64]| -(x[0] - 1.0).powi(2) - (x[1] - 2.0).powi(2);
        let result =
            maximize_nelder_mead(objective, &quadratic_space(), &NelderMeadConfig::default(), None)
                .unwrap();

        assert!(!result.history.is_empty());
        assert!(
            result
                .history
                .best_values
                .windows(2)
                .all(|w| w[1] >= w[0])
        );
    }

    #[test]
    fn test_respects_bounds() {
        // Unconstrained optimum at x = 20 lies outside the box
        let objective = |x: &[f64]| -(x[0] - 20.0).powi(2);
        let space = SearchSpace {
            start: vec![0.0],
            step: vec![1.0],
            bounds: vec![(-5.0, 5.0)],
        };
        let result =
            maximize_nelder_mead(objective, &space, &NelderMeadConfig::default(), None).unwrap();
        assert!((result.best[0] - 5.0).abs() < 1e-6, "x = {:?}", result.best);
    }

    #[test]
    fn test_iteration_budget() {
        let objective = |x: &[f64]| -((x[0] - 3.0).powi(2) + (x[1] - 4.0).powi(2));
        let config = NelderMeadConfig {
            max_iterations: 3,
            ..Default::default()
        };
        let result = maximize_nelder_mead(objective, &quadratic_space(), &config, None).unwrap();

        assert!(!result.converged);
        assert_eq!(
            result.termination_reason,
            TerminationReason::MaxIterationsReached
        );
        assert_eq!(result.iterations, 3);
    }

    #[test]
    fn test_nan_objective_is_worst() {
        // NaN everywhere left of zero must not attract the search
        let objective = |x: &[f64]| {
            if x[0] < 0.0 {
                f64::NAN
            } else {
                -(x[0] - 1.0).powi(2)
            }
        };
        let space = SearchSpace {
            start: vec![0.5],
            step: vec![0.25],
            bounds: vec![(-10.0, 10.0)],
        };
        let result =
            maximize_nelder_mead(objective, &space, &NelderMeadConfig::default(), None).unwrap();
        assert!((result.best[0] - 1.0).abs() < 1e-3);
    }

    #[test]
    fn test_objective_tolerance_scales_with_objective() {
        // A shallow ridge far from zero: the simplex keeps creeping along x[1]
        // but the objective is settled relative to its magnitude.
        let objective = |x: &[f64]| 750.0 - (x[0] - 1.0).powi(2) - 1e-9 * (x[1] - 10.0).powi(2);
        let space = SearchSpace {
            start: vec![0.0, 0.0],
            step: vec![0.5, 0.5],
            bounds: vec![(-10.0, 10.0), (-1e6, 1e6)],
        };
        let result =
            maximize_nelder_mead(objective, &space, &NelderMeadConfig::default(), None).unwrap();

        assert!(result.converged);
        assert!((result.best[0] - 1.0).abs() < 1e-2, "x = {:?}", result.best);
        assert!(result.objective_value > 750.0 - 1e-4);
    }

    #[test]
    fn test_all_infinite_simplex_is_not_converged() {
        let objective = |_: &[f64]| f64::NEG_INFINITY;
        let config = NelderMeadConfig {
            max_iterations: 10,
            ..Default::default()
        };
        let result = maximize_nelder_mead(objective, &quadratic_space(), &config, None).unwrap();
        assert!(!result.converged);
    }

    #[test]
    fn test_invalid_search_space() {
        let objective = |_: &[f64]| 0.0;
        let config = NelderMeadConfig::default();

        let empty = SearchSpace {
            start: vec![],
            step: vec![],
            bounds: vec![],
        };
        assert_eq!(
            maximize_nelder_mead(objective, &empty, &config, None).unwrap_err(),
            OptimizationError::NoParameters
        );

        let mismatched = SearchSpace {
            start: vec![0.0, 0.0],
            step: vec![0.1],
            bounds: vec![(-1.0, 1.0), (-1.0, 1.0)],
        };
        assert!(matches!(
            maximize_nelder_mead(objective, &mismatched, &config, None).unwrap_err(),
            OptimizationError::DimensionMismatch { .. }
        ));

        let inverted = SearchSpace {
            start: vec![0.0],
            step: vec![0.1],
            bounds: vec![(1.0, -1.0)],
        };
        assert!(matches!(
            maximize_nelder_mead(objective, &inverted, &config, None).unwrap_err(),
            OptimizationError::InvalidBounds { index: 0, .. }
        ));
    }

    #[test]
    fn test_progress_callback_invoked() {
        use std::sync::Arc;
        use std::sync::atomic::{AtomicUsize, Ordering};

        let calls = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&calls);
        let callback: ProgressCallback = Box::new(move |_, _, _| {
            counter.fetch_add(1, Ordering::Relaxed);
        });

        let objective = |x: &[f64]| -(x[0] - 2.0).powi(2) - x[1].powi(2);
        let result = maximize_nelder_mead(
            objective,
            &quadratic_space(),
            &NelderMeadConfig::default(),
            Some(callback),
        )
        .unwrap();

        assert_eq!(calls.load(Ordering::Relaxed), result.iterations);
    }
}
