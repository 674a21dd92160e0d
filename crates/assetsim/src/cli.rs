use std::path::PathBuf;

use assetsim_core::{Frequency, SimulationConfigBuilder, simulate};
use clap::{Parser, ValueEnum};

use crate::input::load_table;
use crate::report::Report;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Parser, Debug)]
#[command(name = "assetsim")]
#[command(about = "Estimate expected annual returns per asset class by Monte Carlo simulation")]
pub struct Args {
    /// Period-return table (.csv, .yaml, .yml or .json)
    pub input: PathBuf,

    /// Simulated paths per asset class
    #[arg(short = 'n', long, default_value_t = 2_000)]
    pub simulations: usize,

    /// Horizon of each path in years
    #[arg(short, long, default_value_t = 10)]
    pub years: usize,

    /// Sampling frequency of the input: M (monthly), D (daily) or Q (quarterly)
    #[arg(short, long, default_value = "M")]
    pub frequency: Frequency,

    /// Seed for a reproducible run (OS entropy when omitted)
    #[arg(short, long)]
    pub seed: Option<u64>,

    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,

    /// Log level (debug, info, warn, error)
    #[arg(short, long, default_value = "info")]
    pub log_level: String,

    /// Write logs to this file instead of stderr
    #[arg(long)]
    pub log_file: Option<PathBuf>,
}

/// Load the input, simulate and render the report
pub fn run(args: &Args) -> color_eyre::Result<String> {
    let mut builder = SimulationConfigBuilder::new()
        .simulations(args.simulations)
        .years(args.years)
        .frequency(args.frequency);
    if let Some(seed) = args.seed {
        builder = builder.seed(seed);
    }
    let config = builder.build()?;

    let table = load_table(&args.input)?;
    let results = simulate(&table, &config)?;

    for (asset, failure) in results.failures() {
        tracing::warn!(asset = %asset, kind = %failure.kind(), "No estimate for asset class");
    }

    let report = Report::new(&table, &results, &config);
    let output = match args.format {
        OutputFormat::Text => report.to_text(),
        OutputFormat::Json => report.to_json()? + "\n",
    };
    Ok(output)
}
