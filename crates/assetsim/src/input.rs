//! Loading period-return tables from CSV, YAML and JSON files
//!
//! CSV layout: a header row, an optional leading `date` column (ISO dates) and
//! one column per asset class. Empty or `NaN` cells are missing observations.
//!
//! YAML/JSON layout:
//!
//! ```yaml
//! period_ends: [2020-01-31, 2020-02-29]   # optional
//! columns:
//!   - asset: SPY
//!     returns: [0.012, -0.004]
//!   - asset: IBND
//!     returns: [null, 0.002]
//! ```

use std::fs::File;
use std::path::Path;

use assetsim_core::{PeriodReturnTable, TableError};
use jiff::civil::Date;
use serde::{Deserialize, Serialize};

/// Error types for input loading
#[derive(Debug)]
pub enum InputError {
    Io(String),
    Parse(String),
    UnsupportedFormat(String),
    Table(TableError),
}

impl std::fmt::Display for InputError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            InputError::Io(msg) => write!(f, "IO error: {}", msg),
            InputError::Parse(msg) => write!(f, "Parse error: {}", msg),
            InputError::UnsupportedFormat(ext) => write!(
                f,
                "Unsupported input format '{}': use .csv, .yaml, .yml or .json",
                ext
            ),
            InputError::Table(e) => write!(f, "Invalid return table: {}", e),
        }
    }
}

impl std::error::Error for InputError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            InputError::Table(e) => Some(e),
            _ => None,
        }
    }
}

impl From<TableError> for InputError {
    fn from(e: TableError) -> Self {
        InputError::Table(e)
    }
}

/// Serialized form of a return table
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReturnTableFile {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub period_ends: Option<Vec<Date>>,
    pub columns: Vec<ColumnFile>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ColumnFile {
    pub asset: String,
    pub returns: Vec<Option<f64>>,
}

impl TryFrom<ReturnTableFile> for PeriodReturnTable {
    type Error = TableError;

    fn try_from(file: ReturnTableFile) -> Result<Self, Self::Error> {
        let table = PeriodReturnTable::with_gaps(
            file.columns
                .into_iter()
                .map(|c| (c.asset, c.returns))
                .collect(),
        )?;
        match file.period_ends {
            Some(dates) => table.with_period_ends(dates),
            None => Ok(table),
        }
    }
}

/// Load a table, picking the format from the file extension
pub fn load_table(path: &Path) -> Result<PeriodReturnTable, InputError> {
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase)
        .unwrap_or_default();

    let table = match extension.as_str() {
        "csv" => {
            let file = File::open(path)
                .map_err(|e| InputError::Io(format!("{}: {}", path.display(), e)))?;
            read_csv(file)?
        }
        "yaml" | "yml" => {
            let content = read_to_string(path)?;
            let file: ReturnTableFile = serde_saphyr::from_str(&content)
                .map_err(|e| InputError::Parse(format!("{}: {}", path.display(), e)))?;
            PeriodReturnTable::try_from(file)?
        }
        "json" => {
            let content = read_to_string(path)?;
            let file: ReturnTableFile = serde_json::from_str(&content)
                .map_err(|e| InputError::Parse(format!("{}: {}", path.display(), e)))?;
            PeriodReturnTable::try_from(file)?
        }
        other => return Err(InputError::UnsupportedFormat(other.to_string())),
    };

    tracing::info!(
        path = %path.display(),
        assets = table.num_assets(),
        periods = table.rows(),
        "Loaded return table"
    );
    Ok(table)
}

fn read_to_string(path: &Path) -> Result<String, InputError> {
    std::fs::read_to_string(path).map_err(|e| InputError::Io(format!("{}: {}", path.display(), e)))
}

/// Read a CSV return table from any reader
pub fn read_csv<R: std::io::Read>(reader: R) -> Result<PeriodReturnTable, InputError> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);

    let headers = reader
        .headers()
        .map_err(|e| InputError::Parse(format!("failed to read CSV headers: {}", e)))?
        .clone();

    let has_dates = headers
        .get(0)
        .is_some_and(|h| h.eq_ignore_ascii_case("date"));
    let first_asset = usize::from(has_dates);
    let assets: Vec<String> = headers.iter().skip(first_asset).map(String::from).collect();
    if assets.is_empty() {
        return Err(TableError::NoColumns.into());
    }

    let mut dates = Vec::new();
    let mut columns: Vec<Vec<Option<f64>>> = vec![Vec::new(); assets.len()];

    for (row, record) in reader.records().enumerate() {
        // Header is line 1
        let line = row + 2;
        let record =
            record.map_err(|e| InputError::Parse(format!("line {}: {}", line, e)))?;

        if has_dates {
            let cell = record.get(0).unwrap_or_default();
            let date: Date = cell.parse().map_err(|e| {
                InputError::Parse(format!("line {}: invalid date '{}': {}", line, cell, e))
            })?;
            dates.push(date);
        }

        for (i, column) in columns.iter_mut().enumerate() {
            let cell = record.get(first_asset + i).unwrap_or_default();
            column.push(parse_cell(cell).ok_or_else(|| {
                InputError::Parse(format!(
                    "line {}: invalid return '{}' for {}",
                    line, cell, assets[i]
                ))
            })?);
        }
    }

    let table = PeriodReturnTable::with_gaps(assets.into_iter().zip(columns).collect())?;
    if has_dates {
        Ok(table.with_period_ends(dates)?)
    } else {
        Ok(table)
    }
}

/// `Some(None)` for a missing cell, `None` when the cell is not a number
fn parse_cell(cell: &str) -> Option<Option<f64>> {
    if cell.is_empty() || cell.eq_ignore_ascii_case("nan") {
        return Some(None);
    }
    cell.parse::<f64>().ok().map(Some)
}
