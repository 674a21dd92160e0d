use std::fmt;

use crate::model::AssetClass;

/// Errors in the run configuration. Raised before any fitting or sampling.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// Frequency code or name that is not one of monthly, daily or quarterly
    UnsupportedFrequency(String),
    /// Periods-per-year value other than 12, 252 or 4
    UnsupportedPeriodsPerYear(u32),
    ZeroSimulations,
    ZeroYears,
    /// `num_years * periods_per_year` does not fit in `usize`
    HorizonTooLong { num_years: usize, periods_per_year: u32 },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::UnsupportedFrequency(code) => write!(
                f,
                "unsupported frequency {code:?}; use 'M' (monthly), 'D' (daily) or 'Q' (quarterly)"
            ),
            ConfigError::UnsupportedPeriodsPerYear(n) => write!(
                f,
                "unsupported periods per year {n}; use 12 (monthly), 252 (daily) or 4 (quarterly)"
            ),
            ConfigError::ZeroSimulations => write!(f, "number of simulations must be positive"),
            ConfigError::ZeroYears => write!(f, "number of years must be positive"),
            ConfigError::HorizonTooLong {
                num_years,
                periods_per_year,
            } => write!(
                f,
                "horizon of {num_years} years at {periods_per_year} periods per year is too long"
            ),
        }
    }
}

impl std::error::Error for ConfigError {}

/// Errors building a [`PeriodReturnTable`](crate::model::PeriodReturnTable)
#[derive(Debug, Clone, PartialEq)]
pub enum TableError {
    NoColumns,
    NoRows,
    DuplicateAsset(AssetClass),
    RaggedColumn {
        asset: AssetClass,
        expected: usize,
        found: usize,
    },
    NonFiniteValue {
        asset: AssetClass,
        row: usize,
        value: f64,
    },
    PeriodEndsLength {
        expected: usize,
        found: usize,
    },
    /// Period-end dates must be strictly increasing
    PeriodEndsNotIncreasing { row: usize },
}

impl fmt::Display for TableError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TableError::NoColumns => write!(f, "return table has no asset columns"),
            TableError::NoRows => write!(f, "return table has no periods"),
            TableError::DuplicateAsset(asset) => {
                write!(f, "asset class {asset} appears more than once")
            }
            TableError::RaggedColumn {
                asset,
                expected,
                found,
            } => write!(
                f,
                "column {asset} has {found} periods, expected {expected}"
            ),
            TableError::NonFiniteValue { asset, row, value } => {
                write!(f, "column {asset} has non-finite value {value} at row {row}")
            }
            TableError::PeriodEndsLength { expected, found } => {
                write!(f, "{found} period-end dates given for {expected} periods")
            }
            TableError::PeriodEndsNotIncreasing { row } => {
                write!(f, "period-end date at row {row} is not after the previous one")
            }
        }
    }
}

impl std::error::Error for TableError {}

/// Errors related to Johnson SU parameters and sampling
#[derive(Debug, Clone, PartialEq)]
pub enum DistributionError {
    InvalidParameters {
        gamma: f64,
        delta: f64,
        xi: f64,
        lambda: f64,
        reason: &'static str,
    },
    /// At least one variate must be requested
    ZeroCount,
}

impl fmt::Display for DistributionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DistributionError::InvalidParameters {
                gamma,
                delta,
                xi,
                lambda,
                reason,
            } => write!(
                f,
                "invalid Johnson SU parameters (gamma={gamma}, delta={delta}, xi={xi}, lambda={lambda}): {reason}"
            ),
            DistributionError::ZeroCount => write!(f, "sample count must be at least 1"),
        }
    }
}

impl std::error::Error for DistributionError {}

/// Errors from misuse of the Nelder-Mead optimizer
#[derive(Debug, Clone, PartialEq)]
pub enum OptimizationError {
    NoParameters,
    DimensionMismatch {
        parameters: usize,
        steps: usize,
        bounds: usize,
    },
    InvalidBounds { index: usize, min: f64, max: f64 },
}

impl fmt::Display for OptimizationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OptimizationError::NoParameters => write!(f, "no parameters to optimize"),
            OptimizationError::DimensionMismatch {
                parameters,
                steps,
                bounds,
            } => write!(
                f,
                "search space has {parameters} start values, {steps} steps and {bounds} bounds"
            ),
            OptimizationError::InvalidBounds { index, min, max } => {
                write!(f, "invalid bounds [{min}, {max}] for parameter {index}")
            }
        }
    }
}

impl std::error::Error for OptimizationError {}

/// Reasons a distribution could not be fitted to a sample
#[derive(Debug, Clone, PartialEq)]
pub enum FitError {
    InsufficientSample { observations: usize, required: usize },
    NonFiniteSample { index: usize },
    /// All observations identical; the likelihood has no maximum
    DegenerateSample,
    NotConverged {
        iterations: usize,
        log_likelihood: f64,
    },
    /// The optimizer finished on a point that is not a valid distribution
    InvalidEstimate(DistributionError),
    Optimization(OptimizationError),
}

impl fmt::Display for FitError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FitError::InsufficientSample {
                observations,
                required,
            } => write!(
                f,
                "sample has {observations} observations, at least {required} are required"
            ),
            FitError::NonFiniteSample { index } => {
                write!(f, "sample value at index {index} is not finite")
            }
            FitError::DegenerateSample => write!(f, "sample has zero variance"),
            FitError::NotConverged {
                iterations,
                log_likelihood,
            } => write!(
                f,
                "maximum likelihood did not converge after {iterations} iterations (log-likelihood {log_likelihood})"
            ),
            FitError::InvalidEstimate(e) => write!(f, "fit produced invalid parameters: {e}"),
            FitError::Optimization(e) => write!(f, "{e}"),
        }
    }
}

impl std::error::Error for FitError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            FitError::InvalidEstimate(e) => Some(e),
            FitError::Optimization(e) => Some(e),
            _ => None,
        }
    }
}

impl From<OptimizationError> for FitError {
    fn from(e: OptimizationError) -> Self {
        FitError::Optimization(e)
    }
}

/// A path that cannot be compounded into an annualized rate
#[derive(Debug, Clone, PartialEq)]
pub enum InvalidPathError {
    Empty,
    ZeroPeriodsPerYear,
    /// A period return at or below -100%
    TotalLoss { period: usize, value: f64 },
    NonFinite { period: usize, value: f64 },
}

impl fmt::Display for InvalidPathError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InvalidPathError::Empty => write!(f, "path has no periods"),
            InvalidPathError::ZeroPeriodsPerYear => {
                write!(f, "periods per year must be positive")
            }
            InvalidPathError::TotalLoss { period, value } => write!(
                f,
                "period {period} has return {value}, at or below -100%"
            ),
            InvalidPathError::NonFinite { period, value } => {
                write!(f, "period {period} has non-finite return {value}")
            }
        }
    }
}

impl std::error::Error for InvalidPathError {}

/// Which kind of failure stopped an asset class estimate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FailureKind {
    FitFailure,
    InvalidPath,
}

impl FailureKind {
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            FailureKind::FitFailure => "fit-failure",
            FailureKind::InvalidPath => "invalid-path",
        }
    }
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Failure scoped to a single asset class; other asset classes still complete
#[derive(Debug, Clone, PartialEq)]
pub enum AssetFailure {
    Fit(FitError),
    InvalidPath {
        simulation: usize,
        error: InvalidPathError,
    },
}

impl AssetFailure {
    #[must_use]
    pub fn kind(&self) -> FailureKind {
        match self {
            AssetFailure::Fit(_) => FailureKind::FitFailure,
            AssetFailure::InvalidPath { .. } => FailureKind::InvalidPath,
        }
    }
}

impl fmt::Display for AssetFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AssetFailure::Fit(e) => write!(f, "fit failed: {e}"),
            AssetFailure::InvalidPath { simulation, error } => {
                write!(f, "simulation {simulation} produced an invalid path: {error}")
            }
        }
    }
}

impl std::error::Error for AssetFailure {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            AssetFailure::Fit(e) => Some(e),
            AssetFailure::InvalidPath { error, .. } => Some(error),
        }
    }
}

impl From<FitError> for AssetFailure {
    fn from(e: FitError) -> Self {
        AssetFailure::Fit(e)
    }
}
