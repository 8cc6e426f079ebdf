use anyhow::Result;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use sitewatch::config::MonitorConfig;
use sitewatch::engine::Monitor;

const CONFIG_FILE: &str = "config.json";
const STATE_FILE: &str = "website_status.json";
const LOG_FILE: &str = "website_monitor.log";

/// Logs to the console and appends to the log file. The guard must stay
/// alive for the duration of the run or buffered lines are dropped.
fn init_logging() -> WorkerGuard {
    let file_appender = tracing_appender::rolling::never(".", LOG_FILE);
    let (file_writer, guard) = tracing_appender::non_blocking(file_appender);

    tracing_subscriber::registry()
        .with(EnvFilter::from_default_env().add_directive(tracing::Level::INFO.into()))
        .with(fmt::layer().with_ansi(true))
        .with(fmt::layer().with_writer(file_writer).with_ansi(false))
        .init();

    guard
}

#[tokio::main]
async fn main() -> Result<()> {
    let _guard = init_logging();

    let config = MonitorConfig::load(CONFIG_FILE)?;
    let monitor = Monitor::new(config, STATE_FILE.into())?;
    monitor.run_once().await;

    Ok(())
}
