//! Monte Carlo expected-return estimation
//!
//! For each asset class, in table column order: fit a Johnson SU to the
//! historical returns, draw `num_simulations` paths of
//! `num_years * periods_per_year` returns, annualize each path and average.

use std::num::NonZeroUsize;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::annualize::annualize;
use crate::config::SimulationConfig;
use crate::distribution::{DistributionFitter, JohnsonSu, MaximumLikelihoodFitter};
use crate::error::{AssetFailure, ConfigError, FitError};
use crate::model::{
    AssetEstimate, EstimateOutcome, ExpectedReturn, ExpectedReturnTable, PeriodReturnTable,
};

/// Estimate expected returns with the default maximum-likelihood fitter.
///
/// Configuration errors are returned before any fitting starts. Failures of a
/// single asset class are recorded in the returned table.
pub fn simulate(
    table: &PeriodReturnTable,
    config: &SimulationConfig,
) -> Result<ExpectedReturnTable, ConfigError> {
    ExpectedReturnSimulator::new().run(table, config)
}

#[derive(Debug, Clone, Default)]
pub struct ExpectedReturnSimulator<F = MaximumLikelihoodFitter> {
    fitter: F,
}

impl ExpectedReturnSimulator {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl<F: DistributionFitter> ExpectedReturnSimulator<F> {
    #[must_use]
    pub fn with_fitter(fitter: F) -> Self {
        Self { fitter }
    }

    #[must_use]
    pub fn fitter(&self) -> &F {
        &self.fitter
    }

    /// Run with a generator seeded from `config.random_seed`, or from OS
    /// entropy when no seed is set.
    pub fn run(
        &self,
        table: &PeriodReturnTable,
        config: &SimulationConfig,
    ) -> Result<ExpectedReturnTable, ConfigError> {
        config.validate()?;
        let mut rng = match config.random_seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        self.run_with_rng(table, config, &mut rng)
    }

    /// Run drawing every variate from `rng`; `config.random_seed` is ignored.
    pub fn run_with_rng<R: Rng + ?Sized>(
        &self,
        table: &PeriodReturnTable,
        config: &SimulationConfig,
        rng: &mut R,
    ) -> Result<ExpectedReturnTable, ConfigError> {
        let frequency = config.validate()?;
        let path_length = config.path_length()?;
        let num_simulations =
            NonZeroUsize::new(config.num_simulations).ok_or(ConfigError::ZeroSimulations)?;

        let _span = tracing::info_span!(
            "simulate",
            assets = table.num_assets(),
            num_simulations = config.num_simulations,
            num_years = config.num_years,
            frequency = %frequency,
        )
        .entered();

        let mut entries = Vec::with_capacity(table.num_assets());
        for column in table.columns() {
            let asset = column.asset();
            let outcome = match self.estimate(
                &column.observations(),
                num_simulations,
                config.periods_per_year,
                path_length,
                rng,
            ) {
                Ok(estimate) => {
                    tracing::debug!(
                        asset = %asset,
                        expected_return_pct = estimate.expected_return_pct,
                        "Estimated expected return"
                    );
                    EstimateOutcome::Estimated(estimate)
                }
                Err(failure) => {
                    tracing::warn!(
                        asset = %asset,
                        kind = %failure.kind(),
                        error = %failure,
                        "Asset class estimate failed"
                    );
                    EstimateOutcome::Failed(failure)
                }
            };
            entries.push(AssetEstimate {
                asset: asset.clone(),
                outcome,
            });
        }

        Ok(ExpectedReturnTable::new(entries))
    }

    /// Fit one sample and average the annualized rates of simulated paths.
    ///
    /// `path_length` is the number of periods per path. The generator is only
    /// advanced once the fit has succeeded.
    fn estimate<R: Rng + ?Sized>(
        &self,
        observations: &[f64],
        num_simulations: NonZeroUsize,
        periods_per_year: u32,
        path_length: usize,
        rng: &mut R,
    ) -> Result<ExpectedReturn, AssetFailure> {
        let params = self.fitter.fit(observations)?;
        let dist = JohnsonSu::new(params).map_err(FitError::InvalidEstimate)?;

        let mut path = vec![0.0; path_length];
        let mut total = 0.0;
        for simulation in 0..num_simulations.get() {
            dist.fill(rng, &mut path);
            total += annualize(&path, periods_per_year)
                .map_err(|error| AssetFailure::InvalidPath { simulation, error })?;
        }

        Ok(ExpectedReturn::from_mean(
            total / num_simulations.get() as f64,
            num_simulations.get(),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tests::{FixedFitter, params_with_moments};

    #[test]
    fn test_estimate_averages_annualized_paths() {
        let params = params_with_moments(0.006, 0.03);
        let simulator = ExpectedReturnSimulator::with_fitter(FixedFitter::new(params));
        let num_simulations = NonZeroUsize::new(25).unwrap();

        let estimate = simulator
            .estimate(&[0.0; 40], num_simulations, 12, 24, &mut StdRng::seed_from_u64(3))
            .unwrap();

        let dist = JohnsonSu::new(params).unwrap();
        let mut rng = StdRng::seed_from_u64(3);
        let rates: Vec<f64> = (0..25)
            .map(|_| annualize(&dist.sample_n(&mut rng, 24), 12).unwrap())
            .collect();
        let expected = ExpectedReturn::from_rates(&rates).unwrap();

        assert_eq!(estimate.num_simulations, 25);
        assert!((estimate.mean_annualized - expected.mean_annualized).abs() < 1e-12);
        assert_eq!(estimate.expected_return_pct, expected.expected_return_pct);
    }

    #[test]
    fn test_zero_simulations_is_a_config_error() {
        let table = PeriodReturnTable::new(vec![("A", vec![0.01; 40])]).unwrap();
        let config = SimulationConfig {
            num_simulations: 0,
            ..Default::default()
        };
        let simulator = ExpectedReturnSimulator::with_fitter(FixedFitter::new(
            params_with_moments(0.006, 0.03),
        ));

        assert_eq!(
            simulator.run_with_rng(&table, &config, &mut StdRng::seed_from_u64(1)),
            Err(ConfigError::ZeroSimulations)
        );
        assert_eq!(simulator.fitter().calls(), 0);
    }
}
