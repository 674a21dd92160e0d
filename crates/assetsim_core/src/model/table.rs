//! Historical period-return table
//!
//! The table is the input to the simulation: one column per asset class, one row
//! per period. Column order is preserved and is the order in which asset classes
//! are simulated, which makes seeded runs reproducible.

use jiff::civil::Date;
use rustc_hash::FxHashMap;

use crate::error::TableError;
use crate::model::AssetClass;

/// Period returns of a single asset class in chronological order.
///
/// A cell is `None` when the asset has no observation for that period (for
/// example before a fund's inception).
#[derive(Debug, Clone, PartialEq)]
pub struct ReturnColumn {
    asset: AssetClass,
    values: Vec<Option<f64>>,
}

impl ReturnColumn {
    #[must_use]
    pub fn asset(&self) -> &AssetClass {
        &self.asset
    }

    /// All cells, including missing ones
    #[must_use]
    pub fn values(&self) -> &[Option<f64>] {
        &self.values
    }

    /// Present observations in chronological order
    #[must_use]
    pub fn observations(&self) -> Vec<f64> {
        self.values.iter().flatten().copied().collect()
    }

    #[must_use]
    pub fn observation_count(&self) -> usize {
        self.values.iter().filter(|v| v.is_some()).count()
    }

    #[must_use]
    pub fn missing_count(&self) -> usize {
        self.values.len() - self.observation_count()
    }
}

/// Rectangular table of historical period returns, immutable once built.
#[derive(Debug, Clone, PartialEq)]
pub struct PeriodReturnTable {
    columns: Vec<ReturnColumn>,
    index: FxHashMap<AssetClass, usize>,
    period_ends: Option<Vec<Date>>,
    rows: usize,
}

impl PeriodReturnTable {
    /// Build a table with no missing values.
    pub fn new<A: Into<AssetClass>>(columns: Vec<(A, Vec<f64>)>) -> Result<Self, TableError> {
        Self::with_gaps(
            columns
                .into_iter()
                .map(|(asset, values)| (asset, values.into_iter().map(Some).collect()))
                .collect(),
        )
    }

    /// Build a table whose cells may be missing.
    pub fn with_gaps<A: Into<AssetClass>>(
        columns: Vec<(A, Vec<Option<f64>>)>,
    ) -> Result<Self, TableError> {
        if columns.is_empty() {
            return Err(TableError::NoColumns);
        }

        let mut built = Vec::with_capacity(columns.len());
        let mut index = FxHashMap::default();
        let mut rows = None;

        for (asset, values) in columns {
            let asset = asset.into();
            let expected = *rows.get_or_insert(values.len());
            if expected == 0 {
                return Err(TableError::NoRows);
            }
            if values.len() != expected {
                return Err(TableError::RaggedColumn {
                    asset,
                    expected,
                    found: values.len(),
                });
            }
            if let Some((row, value)) = values
                .iter()
                .enumerate()
                .find_map(|(row, v)| v.filter(|x| !x.is_finite()).map(|x| (row, x)))
            {
                return Err(TableError::NonFiniteValue { asset, row, value });
            }
            if index.insert(asset.clone(), built.len()).is_some() {
                return Err(TableError::DuplicateAsset(asset));
            }
            built.push(ReturnColumn { asset, values });
        }

        Ok(Self {
            columns: built,
            index,
            period_ends: None,
            rows: rows.unwrap_or(0),
        })
    }

    /// Attach period-end dates, one per row, strictly increasing.
    pub fn with_period_ends(mut self, period_ends: Vec<Date>) -> Result<Self, TableError> {
        if period_ends.len() != self.rows {
            return Err(TableError::PeriodEndsLength {
                expected: self.rows,
                found: period_ends.len(),
            });
        }
        if let Some(row) = period_ends
            .windows(2)
            .position(|w| w[1] <= w[0])
            .map(|i| i + 1)
        {
            return Err(TableError::PeriodEndsNotIncreasing { row });
        }
        self.period_ends = Some(period_ends);
        Ok(self)
    }

    #[must_use]
    pub fn rows(&self) -> usize {
        self.rows
    }

    #[must_use]
    pub fn num_assets(&self) -> usize {
        self.columns.len()
    }

    /// Columns in simulation order
    #[must_use]
    pub fn columns(&self) -> &[ReturnColumn] {
        &self.columns
    }

    pub fn assets(&self) -> impl Iterator<Item = &AssetClass> {
        self.columns.iter().map(ReturnColumn::asset)
    }

    #[must_use]
    pub fn column(&self, asset: &str) -> Option<&ReturnColumn> {
        self.index.get(asset).map(|&i| &self.columns[i])
    }

    #[must_use]
    pub fn period_ends(&self) -> Option<&[Date]> {
        self.period_ends.as_deref()
    }

    /// True when no column has a missing cell
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.columns.iter().all(|c| c.missing_count() == 0)
    }
}
