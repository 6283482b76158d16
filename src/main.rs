use anyhow::Result;
use chaos_loadgen::config::{LogFormat, LoggingSettings, RunMode, Settings};
use chaos_loadgen::Application;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    let settings = Settings::new()?;
    init_tracing(&settings.logging);

    let mode = std::env::args()
        .nth(1)
        .map(|arg| arg.parse::<RunMode>())
        .transpose()?;

    Application::new(settings, mode).run().await?;

    Ok(())
}

/// `RUST_LOG` takes precedence over `logging.level`; logs go to stderr so
/// stdout carries only generated events
fn init_tracing(logging: &LoggingSettings) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&logging.level));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);

    match logging.format {
        LogFormat::Json => builder.json().init(),
        LogFormat::Pretty => builder.pretty().init(),
        LogFormat::Compact => builder.compact().init(),
    }
}
