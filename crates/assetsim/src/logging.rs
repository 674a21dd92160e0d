use std::path::Path;

use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Default filter when `RUST_LOG` is not set
fn default_filter(level: &str) -> String {
    format!("assetsim={level},assetsim_core=warn")
}

/// Appender writing to exactly `log_path`, appending across runs
fn file_appender(log_path: &Path) -> color_eyre::Result<RollingFileAppender> {
    let file_name = log_path
        .file_name()
        .ok_or_else(|| color_eyre::eyre::eyre!("log path has no file name: {}", log_path.display()))?;
    let directory = log_path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));

    let appender = RollingFileAppender::builder()
        .rotation(Rotation::NEVER)
        .filename_prefix(file_name.to_string_lossy())
        .build(directory)?;
    Ok(appender)
}

/// Initialize logging to stderr, or to `log_file` when given.
///
/// File logging goes through a non-blocking writer; keep the returned guard
/// alive until exit so buffered lines are flushed. The level can be
/// overridden with the `RUST_LOG` environment variable.
pub fn init_logging(log_file: Option<&Path>, level: &str) -> color_eyre::Result<Option<WorkerGuard>> {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_filter(level)));

    let Some(log_path) = log_file else {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(fmt::layer().with_writer(std::io::stderr).with_target(true))
            .init();
        return Ok(None);
    };

    let (writer, guard) = tracing_appender::non_blocking(file_appender(log_path)?);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(
            fmt::layer()
                .with_writer(writer)
                .with_ansi(false)
                .with_target(true)
                .with_thread_ids(false),
        )
        .init();

    tracing::info!(
        "assetsim logging initialized (log_path={})",
        log_path.display()
    );
    Ok(Some(guard))
}
