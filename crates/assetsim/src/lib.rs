//! Command-line front end for assetsim
//!
//! Loads a table of historical period returns, runs the expected-return
//! simulation and renders the result as a text table or JSON.

pub mod cli;
pub mod input;
pub mod logging;
pub mod report;

pub use cli::{Args, OutputFormat, run};
pub use input::{InputError, load_table};
pub use logging::init_logging;
pub use report::{Report, ReportRow, RowStatus};
