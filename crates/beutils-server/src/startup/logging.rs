//! Logging startup
//!
//! A stdout fmt layer with env-filter, plus an optional daily-rolling file
//! appender. The `log` bridge routes actix's request logger into `tracing`.

use tracing_appender::non_blocking::WorkerGuard;
use tracing_log::LogTracer;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Registry, fmt};

/// Initialize logging. The returned guard must be held for the lifetime of
/// the process to keep the file appender flushing.
pub fn init_logging(debug: bool, log_dir: Option<&str>) -> anyhow::Result<Option<WorkerGuard>> {
    LogTracer::init()?;

    let default_level = if debug { "debug" } else { "info" };
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    let stdout_layer = fmt::layer().with_target(true);
    let registry = Registry::default().with(env_filter).with(stdout_layer);

    match log_dir {
        Some(dir) => {
            let appender = tracing_appender::rolling::daily(dir, "beutils.log");
            let (writer, guard) = tracing_appender::non_blocking(appender);
            registry
                .with(fmt::layer().with_writer(writer).with_ansi(false))
                .init();
            Ok(Some(guard))
        }
        None => {
            registry.init();
            Ok(None)
        }
    }
}
