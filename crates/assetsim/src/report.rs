//! Rendering of expected-return results

use assetsim_core::model::round_percent;
use assetsim_core::{
    EstimateOutcome, ExpectedReturnTable, FailureKind, PeriodReturnTable, SimulationConfig,
    annualize,
};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RowStatus {
    Ok,
    FitFailure,
    InvalidPath,
}

impl RowStatus {
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            RowStatus::Ok => "ok",
            RowStatus::FitFailure => "fit-failure",
            RowStatus::InvalidPath => "invalid-path",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportRow {
    pub asset: String,
    pub observations: usize,
    /// Simulated expected annual return in percent
    pub expected_return_pct: Option<f64>,
    /// Geometric annualized return of the asset's own history in percent
    pub historical_return_pct: Option<f64>,
    pub status: RowStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Report {
    pub config: SimulationConfig,
    pub rows: Vec<ReportRow>,
}

impl Report {
    /// Pair every simulated estimate with the history it came from
    #[must_use]
    pub fn new(
        table: &PeriodReturnTable,
        results: &ExpectedReturnTable,
        config: &SimulationConfig,
    ) -> Self {
        let rows = results
            .entries()
            .iter()
            .map(|entry| {
                let observations = table
                    .column(entry.asset.as_str())
                    .map(|c| c.observations())
                    .unwrap_or_default();
                let historical_return_pct = annualize(&observations, config.periods_per_year)
                    .ok()
                    .map(round_percent);

                let (expected_return_pct, status, message) = match &entry.outcome {
                    EstimateOutcome::Estimated(er) => {
                        (Some(er.expected_return_pct), RowStatus::Ok, None)
                    }
                    EstimateOutcome::Failed(failure) => {
                        let status = match failure.kind() {
                            FailureKind::FitFailure => RowStatus::FitFailure,
                            FailureKind::InvalidPath => RowStatus::InvalidPath,
                        };
                        (None, status, Some(failure.to_string()))
                    }
                };

                ReportRow {
                    asset: entry.asset.to_string(),
                    observations: observations.len(),
                    expected_return_pct,
                    historical_return_pct,
                    status,
                    message,
                }
            })
            .collect();

        Self {
            config: config.clone(),
            rows,
        }
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Fixed-width text table
    #[must_use]
    pub fn to_text(&self) -> String {
        let asset_width = self
            .rows
            .iter()
            .map(|r| r.asset.len())
            .max()
            .unwrap_or(0)
            .max("Asset".len());

        let seed = self
            .config
            .random_seed
            .map_or_else(|| "none".to_string(), |s| s.to_string());

        let mut out = format!(
            "Expected annual returns ({} simulations, {} years, {} periods/year, seed {})\n",
            self.config.num_simulations, self.config.num_years, self.config.periods_per_year, seed,
        );
        out.push_str(&format!(
            "{:<asset_width$}  {:>12}  {:>12}  {:>6}  {:<12}  Message\n",
            "Asset", "Simulated %", "Historical %", "Obs", "Status"
        ));

        for row in &self.rows {
            out.push_str(&format!(
                "{:<asset_width$}  {:>12}  {:>12}  {:>6}  {:<12}  {}\n",
                row.asset,
                format_pct(row.expected_return_pct),
                format_pct(row.historical_return_pct),
                row.observations,
                row.status.label(),
                row.message.as_deref().unwrap_or(""),
            ));
        }
        out
    }
}

fn format_pct(value: Option<f64>) -> String {
    value.map_or_else(|| "-".to_string(), |v| format!("{v:.2}"))
}
