//! Fluent builder for [`SimulationConfig`]

use crate::config::{Frequency, SimulationConfig};
use crate::error::ConfigError;

#[derive(Debug, Clone, Default)]
pub struct SimulationConfigBuilder {
    config: SimulationConfig,
}

impl SimulationConfigBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn simulations(mut self, num_simulations: usize) -> Self {
        self.config.num_simulations = num_simulations;
        self
    }

    #[must_use]
    pub fn years(mut self, num_years: usize) -> Self {
        self.config.num_years = num_years;
        self
    }

    #[must_use]
    pub fn frequency(mut self, frequency: Frequency) -> Self {
        self.config.periods_per_year = frequency.periods_per_year();
        self
    }

    /// Set the raw periods-per-year value; checked by [`build`](Self::build)
    #[must_use]
    pub fn periods_per_year(mut self, periods_per_year: u32) -> Self {
        self.config.periods_per_year = periods_per_year;
        self
    }

    #[must_use]
    pub fn seed(mut self, seed: u64) -> Self {
        self.config.random_seed = Some(seed);
        self
    }

    #[must_use]
    pub fn entropy(mut self) -> Self {
        self.config.random_seed = None;
        self
    }

    pub fn build(self) -> Result<SimulationConfig, ConfigError> {
        self.config.validate()?;
        Ok(self.config)
    }
}
