//! Runs the periodic task advancer until the process is asked to stop.
//!
//! Usage:
//!
//! ```text
//! RUST_LOG=tasklane=debug TASKLANE_SWEEP_PERIOD_SECS=30 tasklane
//! ```
//!
//! The process wires an in-memory task store, the lifecycle service and the
//! advancer, then waits for Ctrl-C (or SIGTERM on Unix) and shuts the
//! advancer down, letting an in-flight sweep finish first.

use mockable::DefaultClock;
use std::sync::Arc;
use tasklane::config::AdvancerConfig;
use tasklane::task::{
    adapters::memory::InMemoryTaskRepository,
    services::{PeriodicAdvancer, TaskLifecycleService},
};
use tracing::info;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// Boxed error type for the main result.
type BoxError = Box<dyn std::error::Error + Send + Sync>;

fn main() -> Result<(), BoxError> {
    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()?;
    runtime.block_on(async_main())
}

async fn async_main() -> Result<(), BoxError> {
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("tasklane=info")),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = AdvancerConfig::from_env()?;
    info!(
        sweep_period_secs = config.sweep_period.as_secs(),
        pending_threshold_secs = config.pending_threshold.as_secs(),
        default_due_days = config.default_due_days,
        "loaded configuration"
    );

    let service = TaskLifecycleService::with_policy(
        Arc::new(InMemoryTaskRepository::new()),
        Arc::new(DefaultClock),
        config.lifecycle_policy()?,
    );
    let handle = PeriodicAdvancer::with_period(service, config.sweep_period).start();

    shutdown_signal().await?;
    info!("shutdown signal received, stopping advancer");

    let stats = handle.shutdown().await?;
    info!(
        firings = stats.firings,
        started = stats.started,
        failed_records = stats.failed_records,
        failed_firings = stats.failed_firings,
        "shutdown complete"
    );
    Ok(())
}

#[cfg(unix)]
async fn shutdown_signal() -> Result<(), BoxError> {
    use tokio::signal::unix::{SignalKind, signal};

    let mut terminate = signal(SignalKind::terminate())?;
    tokio::select! {
        result = tokio::signal::ctrl_c() => result?,
        _ = terminate.recv() => {}
    }
    Ok(())
}

#[cfg(not(unix))]
async fn shutdown_signal() -> Result<(), BoxError> {
    tokio::signal::ctrl_c().await?;
    Ok(())
}
