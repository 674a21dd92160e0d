//! Simulation configuration
//!
//! The main configuration type is [`SimulationConfig`], which holds the four
//! knobs of an expected-return run: simulation count, horizon, sampling
//! frequency and an optional seed.
//!
//! ```ignore
//! use assetsim_core::config::{Frequency, SimulationConfigBuilder};
//!
//! let config = SimulationConfigBuilder::new()
//!     .simulations(2_000)
//!     .years(10)
//!     .frequency(Frequency::Monthly)
//!     .seed(42)
//!     .build()?;
//! ```

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::optimization::NelderMeadConfig;

pub mod builder;

pub use builder::SimulationConfigBuilder;

/// Sampling frequency of period returns
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Frequency {
    Monthly,
    Daily,
    Quarterly,
}

impl Frequency {
    #[must_use]
    pub fn periods_per_year(self) -> u32 {
        match self {
            Frequency::Monthly => 12,
            Frequency::Daily => 252,
            Frequency::Quarterly => 4,
        }
    }

    /// Single-letter code: `M`, `D` or `Q`
    #[must_use]
    pub fn code(self) -> &'static str {
        match self {
            Frequency::Monthly => "M",
            Frequency::Daily => "D",
            Frequency::Quarterly => "Q",
        }
    }
}

impl fmt::Display for Frequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Frequency {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "m" | "monthly" => Ok(Frequency::Monthly),
            "d" | "daily" => Ok(Frequency::Daily),
            "q" | "quarterly" => Ok(Frequency::Quarterly),
            _ => Err(ConfigError::UnsupportedFrequency(s.to_string())),
        }
    }
}

impl TryFrom<u32> for Frequency {
    type Error = ConfigError;

    fn try_from(periods_per_year: u32) -> Result<Self, Self::Error> {
        match periods_per_year {
            12 => Ok(Frequency::Monthly),
            252 => Ok(Frequency::Daily),
            4 => Ok(Frequency::Quarterly),
            other => Err(ConfigError::UnsupportedPeriodsPerYear(other)),
        }
    }
}

impl TryFrom<String> for Frequency {
    type Error = ConfigError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<Frequency> for String {
    fn from(f: Frequency) -> Self {
        f.code().to_string()
    }
}

fn default_num_simulations() -> usize {
    2_000
}

fn default_num_years() -> usize {
    10
}

fn default_periods_per_year() -> u32 {
    Frequency::Monthly.periods_per_year()
}

/// Complete configuration of an expected-return run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SimulationConfig {
    /// Number of simulated paths per asset class
    #[serde(default = "default_num_simulations")]
    pub num_simulations: usize,

    /// Horizon of each path in years
    #[serde(default = "default_num_years")]
    pub num_years: usize,

    /// 12 (monthly), 252 (daily) or 4 (quarterly)
    #[serde(default = "default_periods_per_year")]
    pub periods_per_year: u32,

    /// Seed for a reproducible run; `None` draws entropy from the OS
    #[serde(default)]
    pub random_seed: Option<u64>,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            num_simulations: default_num_simulations(),
            num_years: default_num_years(),
            periods_per_year: default_periods_per_year(),
            random_seed: None,
        }
    }
}

impl SimulationConfig {
    /// Check every field, returning the sampling frequency on success.
    pub fn validate(&self) -> Result<Frequency, ConfigError> {
        let frequency = Frequency::try_from(self.periods_per_year)?;
        if self.num_simulations == 0 {
            return Err(ConfigError::ZeroSimulations);
        }
        if self.num_years == 0 {
            return Err(ConfigError::ZeroYears);
        }
        self.path_length()?;
        Ok(frequency)
    }

    /// Number of periods in one simulated path
    pub fn path_length(&self) -> Result<usize, ConfigError> {
        self.num_years
            .checked_mul(self.periods_per_year as usize)
            .ok_or(ConfigError::HorizonTooLong {
                num_years: self.num_years,
                periods_per_year: self.periods_per_year,
            })
    }
}

fn default_min_observations() -> usize {
    30
}

fn default_restarts() -> usize {
    2
}

/// Settings of the maximum-likelihood fitter
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FitConfig {
    /// Smallest sample accepted for fitting
    #[serde(default = "default_min_observations")]
    pub min_observations: usize,

    #[serde(default)]
    pub optimizer: NelderMeadConfig,

    /// Fresh simplexes started from the best point when a search runs out of iterations
    #[serde(default = "default_restarts")]
    pub restarts: usize,
}

impl Default for FitConfig {
    fn default() -> Self {
        Self {
            min_observations: default_min_observations(),
            optimizer: NelderMeadConfig::default(),
            restarts: default_restarts(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_frequency_parsing() {
        assert_eq!("M".parse::<Frequency>().unwrap(), Frequency::Monthly);
        assert_eq!("d".parse::<Frequency>().unwrap(), Frequency::Daily);
        assert_eq!("Quarterly".parse::<Frequency>().unwrap(), Frequency::Quarterly);
        assert_eq!(
            "W".parse::<Frequency>().unwrap_err(),
            ConfigError::UnsupportedFrequency("W".to_string())
        );
    }

    #[test]
    fn test_frequency_periods_per_year() {
        for frequency in [Frequency::Monthly, Frequency::Daily, Frequency::Quarterly] {
            assert_eq!(
                Frequency::try_from(frequency.periods_per_year()).unwrap(),
                frequency
            );
        }
        assert_eq!(
            Frequency::try_from(52).unwrap_err(),
            ConfigError::UnsupportedPeriodsPerYear(52)
        );
    }

    #[test]
    fn test_frequency_serde() {
        let json = serde_json::to_string(&Frequency::Quarterly).unwrap();
        assert_eq!(json, "\"Q\"");
        let parsed: Frequency = serde_json::from_str("\"monthly\"").unwrap();
        assert_eq!(parsed, Frequency::Monthly);
        assert!(serde_json::from_str::<Frequency>("\"W\"").is_err());
    }

    #[test]
    fn test_default_config_is_valid() {
        let config = SimulationConfig::default();
        assert_eq!(config.validate().unwrap(), Frequency::Monthly);
        assert_eq!(config.path_length().unwrap(), 120);
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let config = SimulationConfig {
            num_simulations: 0,
            ..Default::default()
        };
        assert_eq!(config.validate().unwrap_err(), ConfigError::ZeroSimulations);

        let config = SimulationConfig {
            num_years: 0,
            ..Default::default()
        };
        assert_eq!(config.validate().unwrap_err(), ConfigError::ZeroYears);

        let config = SimulationConfig {
            periods_per_year: 52,
            ..Default::default()
        };
        assert_eq!(
            config.validate().unwrap_err(),
            ConfigError::UnsupportedPeriodsPerYear(52)
        );

        let config = SimulationConfig {
            num_years: usize::MAX,
            ..Default::default()
        };
        assert!(matches!(
            config.validate().unwrap_err(),
            ConfigError::HorizonTooLong { .. }
        ));
    }

    #[test]
    fn test_config_deserialize_defaults() {
        let config: SimulationConfig =
            serde_json::from_str(r#"{ "num_simulations": 500, "random_seed": 7 }"#).unwrap();
        assert_eq!(config.num_simulations, 500);
        assert_eq!(config.num_years, 10);
        assert_eq!(config.periods_per_year, 12);
        assert_eq!(config.random_seed, Some(7));
    }

    #[test]
    fn test_fit_config_deserialize_defaults() {
        let config: FitConfig = serde_json::from_str(r#"{ "min_observations": 60 }"#).unwrap();
        assert_eq!(config.min_observations, 60);
        assert_eq!(config.restarts, 2);
        assert_eq!(config.optimizer, NelderMeadConfig::default());
    }
}
