use assetsim::{Args, init_logging, run};
use clap::Parser;

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;

    let args = Args::parse();
    let _guard = init_logging(args.log_file.as_deref(), &args.log_level)?;

    let output = run(&args)?;
    print!("{output}");

    tracing::info!("assetsim finished");
    Ok(())
}
