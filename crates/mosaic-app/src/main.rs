use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use clap::Parser;
use tokio::runtime::Handle;
use tokio::signal;
use tracing_subscriber::EnvFilter;

mod controller;
mod events;
mod io;
mod profile;
mod state;

use self::controller::AppController;
use self::state::AppState;

#[derive(Debug, Parser)]
#[command(
    name = "mosaic",
    version,
    about = "iTunes artwork mosaic with a random-swap slideshow"
)]
struct Args {
    /// Path to a JSON config file
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,
    /// More logging, repeat for trace output (ignored when RUST_LOG is set)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
    /// Emit logs as JSON lines
    #[arg(long)]
    json_logs: bool,
}

fn main() -> anyhow::Result<()> {
    // a missing .env is fine
    let _ = dotenvy::dotenv();

    let args = Args::parse();
    init_tracing(args.verbose, args.json_logs);

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .thread_name("mosaic-worker")
        .build()?;
    let result = runtime.block_on(run(args));

    // the stdin reader can stay parked in a blocking read
    runtime.shutdown_timeout(Duration::from_millis(500));
    result
}

async fn run(args: Args) -> anyhow::Result<()> {
    let config = profile::load_config(args.config.as_deref())?;
    tracing::debug!("Loaded configuration:\n{config:#?}");

    let state = Arc::new(AppState::new(config)?);
    let controller = AppController::new(state);

    let mut tasks = controller.spawn_tasks();
    let ui = controller.spawn_ui(Handle::current())?;

    tokio::select! {
        result = signal::ctrl_c() => match result {
            Ok(()) => tracing::info!("Shutdown requested"),
            Err(e) => tracing::error!("failed to listen for ctrl+c: {e}"),
        },
        Some(result) = tasks.join_next() => log_task_exit(result),
    }

    controller.shutdown();
    while let Some(result) = tasks.join_next().await {
        log_task_exit(result);
    }

    match tokio::task::spawn_blocking(move || ui.join()).await {
        Ok(Ok(Ok(()))) => {}
        Ok(Ok(Err(e))) => tracing::error!("ui loop exited: {e:#}"),
        Ok(Err(_)) => tracing::error!("ui thread panicked"),
        Err(e) => tracing::error!("failed to join ui thread: {e}"),
    }

    tracing::info!("Bye");
    Ok(())
}

fn init_tracing(verbosity: u8, json: bool) {
    let default_level = match verbosity {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    // frames go to stdout
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr);

    if json {
        builder.json().init();
    } else {
        builder.compact().init();
    }
}

fn log_task_exit(result: Result<anyhow::Result<()>, tokio::task::JoinError>) {
    match result {
        Ok(Ok(())) => tracing::debug!("task exited"),
        Ok(Err(e)) => tracing::error!("task failed: {e:#}"),
        Err(e) => tracing::error!("task panicked: {e}"),
    }
}

#[cfg(test)]
mod tests;
