use std::io;
use std::path::PathBuf;
use std::sync::Arc;

use tokio::spawn;
use tracing::{error, info, Level};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::{filter::LevelFilter, fmt, EnvFilter, Layer};

use crate::config::get_config;
use crate::database::SettingsRepository;
use crate::flags::Flags;
use crate::server::run_server;
use crate::service::{create_services, restore_snapshot, take_snapshot};
use crate::util::Shutdown;

mod commands;
mod config;
mod constants;
mod database;
mod flags;
mod server;
mod service;
mod util;

fn setup_logging(flags: &Flags) -> anyhow::Result<WorkerGuard> {
    let file_appender = tracing_appender::rolling::daily(&flags.logs_path, "settings.log");
    let (non_blocking_log, guard) = tracing_appender::non_blocking(file_appender);

    let subscriber = tracing_subscriber::registry()
        .with(EnvFilter::from_default_env().add_directive(Level::TRACE.into()))
        .with(
            fmt::Layer::new()
                .json()
                .with_writer(non_blocking_log)
                .with_filter(LevelFilter::INFO),
        )
        .with(
            fmt::Layer::new()
                .with_writer(io::stdout)
                .with_filter(LevelFilter::WARN),
        );

    tracing::subscriber::set_global_default(subscriber)?;

    Ok(guard)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let flags = argh::from_env::<Flags>();
    let _guard = setup_logging(&flags)?;

    let config = Arc::new(get_config()?);
    let services = Arc::new(create_services(config.clone())?);

    let repository = SettingsRepository(PathBuf::from(&flags.settings_path));
    restore_snapshot(&services, repository.load().await?).await?;

    let shutdown = Shutdown::new();
    let signal_shutdown = shutdown.clone();
    spawn(async move {
        if let Err(err) = tokio::signal::ctrl_c().await {
            error!("failed to listen for shutdown signal {}", err);
        }

        info!("shutting down");
        signal_shutdown.shutdown();
    });

    let server_result = run_server(config, services.clone(), shutdown).await;

    // saved even when the server failed so accepted changes aren't lost
    let snapshot = take_snapshot(&services).await?;
    repository.save(&snapshot).await?;

    server_result
}
