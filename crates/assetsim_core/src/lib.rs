//! Expected-return estimation for asset classes
//!
//! This crate turns a table of historical period returns into a forward-looking
//! expected annual return per asset class:
//! - Fit a Johnson SU distribution to each asset class by maximum likelihood
//! - Draw Monte Carlo paths of period returns from the fitted distribution
//! - Annualize each path geometrically and average across paths
//!
//! # Example
//!
//! ```ignore
//! use assetsim_core::{PeriodReturnTable, SimulationConfigBuilder, simulate};
//!
//! let table = PeriodReturnTable::new(vec![("SPY", spy_returns), ("AGG", agg_returns)])?;
//! let config = SimulationConfigBuilder::new()
//!     .simulations(2_000)
//!     .years(10)
//!     .seed(42)
//!     .build()?;
//!
//! let results = simulate(&table, &config)?;
//! println!("SPY: {:?}%", results.expected_return_pct("SPY"));
//! ```

#![warn(clippy::all)]

// ============================================================================
// Core modules
// ============================================================================

pub mod annualize;
pub mod distribution;
pub mod error;
pub mod optimization;
pub mod simulation;
pub mod statistics;

// ============================================================================
// Type definition modules
// ============================================================================

pub mod config;
pub mod model;

// ============================================================================
// Test modules
// ============================================================================

#[cfg(test)]
mod tests;

// ============================================================================
// Public re-exports for convenience
// ============================================================================

pub use annualize::annualize;
pub use config::{FitConfig, Frequency, SimulationConfig, SimulationConfigBuilder};
pub use distribution::{
    DistributionFitter, JohnsonSu, JohnsonSuParams, MaximumLikelihoodFitter, fit_johnson_su,
    sample,
};
pub use error::{
    AssetFailure, ConfigError, DistributionError, FailureKind, FitError, InvalidPathError,
    TableError,
};
pub use model::{
    AssetClass, AssetEstimate, EstimateOutcome, ExpectedReturn, ExpectedReturnTable,
    PeriodReturnTable, ReturnColumn,
};
pub use simulation::{ExpectedReturnSimulator, simulate};
pub use statistics::HistoricalStatistics;
