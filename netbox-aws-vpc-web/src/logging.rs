//! tracing 初始化

use anyhow::Context;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter};

use crate::config::{LogFormat, LogSection};

const LOG_FILE_PREFIX: &str = "netbox-aws-vpc.log";

/// Build the filter: `RUST_LOG` when set, otherwise the configured level.
pub fn env_filter(level: &str) -> anyhow::Result<EnvFilter> {
    match EnvFilter::try_from_default_env() {
        Ok(filter) => Ok(filter),
        Err(_) => EnvFilter::try_new(level).with_context(|| format!("invalid log level {level:?}")),
    }
}

/// Install the global subscriber. `log` records from the library crates are
/// forwarded into it.
///
/// The returned guard flushes the file writer and must live until shutdown.
pub fn init(config: &LogSection) -> anyhow::Result<Option<WorkerGuard>> {
    let filter = env_filter(&config.level)?;

    let (file_writer, guard) = match &config.directory {
        Some(dir) => {
            std::fs::create_dir_all(dir)
                .with_context(|| format!("failed to create log directory {}", dir.display()))?;
            let appender = tracing_appender::rolling::daily(dir, LOG_FILE_PREFIX);
            let (writer, guard) = tracing_appender::non_blocking(appender);
            (Some(writer), Some(guard))
        }
        None => (None, None),
    };

    let registry = tracing_subscriber::registry().with(filter);
    match config.format {
        LogFormat::Text => {
            let file_layer =
                file_writer.map(|writer| fmt::layer().with_writer(writer).with_ansi(false));
            registry
                .with(fmt::layer().with_target(true))
                .with(file_layer)
                .try_init()?;
        }
        LogFormat::Json => {
            let file_layer = file_writer.map(|writer| fmt::layer().json().with_writer(writer));
            registry
                .with(fmt::layer().json())
                .with(file_layer)
                .try_init()?;
        }
    }

    Ok(guard)
}
