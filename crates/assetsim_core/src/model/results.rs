use serde::{Deserialize, Serialize};

use crate::error::{AssetFailure, FailureKind};
use crate::model::AssetClass;

/// Round a fractional rate to a percentage with two decimals.
///
/// Uses round-half-to-even so that values sitting exactly on a half cent are
/// not biased upwards.
#[must_use]
pub fn round_percent(rate: f64) -> f64 {
    (rate * 100.0 * 100.0).round_ties_even() / 100.0
}

/// Simulated expected return of one asset class
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ExpectedReturn {
    /// Mean of the per-path annualized rates, as a fraction, unrounded
    pub mean_annualized: f64,
    /// `mean_annualized` on a percentage scale, rounded to two decimals
    pub expected_return_pct: f64,
    pub num_simulations: usize,
}

impl ExpectedReturn {
    /// Rounds the mean once, at construction
    #[must_use]
    pub fn from_mean(mean_annualized: f64, num_simulations: usize) -> Self {
        Self {
            mean_annualized,
            expected_return_pct: round_percent(mean_annualized),
            num_simulations,
        }
    }

    #[must_use]
    pub fn from_rates(rates: &[f64]) -> Option<Self> {
        if rates.is_empty() {
            return None;
        }
        let mean_annualized = rates.iter().sum::<f64>() / rates.len() as f64;
        Some(Self::from_mean(mean_annualized, rates.len()))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum EstimateOutcome {
    Estimated(ExpectedReturn),
    Failed(AssetFailure),
}

#[derive(Debug, Clone, PartialEq)]
pub struct AssetEstimate {
    pub asset: AssetClass,
    pub outcome: EstimateOutcome,
}

impl AssetEstimate {
    #[must_use]
    pub fn expected_return(&self) -> Option<&ExpectedReturn> {
        match &self.outcome {
            EstimateOutcome::Estimated(er) => Some(er),
            EstimateOutcome::Failed(_) => None,
        }
    }

    #[must_use]
    pub fn failure(&self) -> Option<&AssetFailure> {
        match &self.outcome {
            EstimateOutcome::Estimated(_) => None,
            EstimateOutcome::Failed(f) => Some(f),
        }
    }
}

/// Expected returns for every asset class of the input, in input column order.
///
/// Failed asset classes stay in the table with their failure attached.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ExpectedReturnTable {
    entries: Vec<AssetEstimate>,
}

impl ExpectedReturnTable {
    #[must_use]
    pub fn new(entries: Vec<AssetEstimate>) -> Self {
        Self { entries }
    }

    #[must_use]
    pub fn entries(&self) -> &[AssetEstimate] {
        &self.entries
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[must_use]
    pub fn get(&self, asset: &str) -> Option<&AssetEstimate> {
        self.entries.iter().find(|e| e.asset.as_str() == asset)
    }

    /// Rounded percentage for an asset class, if it was estimated
    #[must_use]
    pub fn expected_return_pct(&self, asset: &str) -> Option<f64> {
        self.get(asset)
            .and_then(AssetEstimate::expected_return)
            .map(|er| er.expected_return_pct)
    }

    pub fn estimates(&self) -> impl Iterator<Item = (&AssetClass, &ExpectedReturn)> {
        self.entries
            .iter()
            .filter_map(|e| e.expected_return().map(|er| (&e.asset, er)))
    }

    pub fn failures(&self) -> impl Iterator<Item = (&AssetClass, &AssetFailure)> {
        self.entries
            .iter()
            .filter_map(|e| e.failure().map(|f| (&e.asset, f)))
    }

    #[must_use]
    pub fn failure_kind(&self, asset: &str) -> Option<FailureKind> {
        self.get(asset)
            .and_then(AssetEstimate::failure)
            .map(AssetFailure::kind)
    }

    /// True when every asset class produced an estimate
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.failures().next().is_none()
    }
}
