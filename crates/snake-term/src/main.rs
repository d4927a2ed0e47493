//! Terminal front-end for the random-walk snake.
//!
//! While running, type settings such as `cols 40` or `wrap on` followed by
//! Enter, `restart` to start over with an empty log, `quit` to leave.

mod clock;
mod display;
mod input;
mod telemetry;

use anyhow::{Context, Result};
use clap::Parser;
use clock::StatsClock;
use display::TerminalObserver;
use input::Input;
use snake_core::{AppConfig, SettingsStore};
use snake_sim::{RandomSource, SimulationController, TickOutcome};
use std::path::PathBuf;
use std::time::Duration;
use tokio::signal;
use tokio::time::{sleep, Instant};
use tracing::{info, warn};

#[derive(Parser, Debug)]
#[command(name = "snake-term")]
#[command(version)]
#[command(about = "Random-walk snake on a grid, drawn in the terminal")]
struct Cli {
    /// Configuration file (JSON)
    #[arg(env = "SNAKE_CONFIG")]
    config: Option<PathBuf>,

    /// Random seed for reproducible walks
    #[arg(long, env = "SNAKE_SEED")]
    seed: Option<u64>,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Load configuration
    let config = load_config(&cli)?;

    // Initialize telemetry
    telemetry::init_telemetry(config.log_format)?;

    info!(
        seed = ?config.seed,
        clock_interval_ms = config.clock_interval_ms,
        render = config.render,
        "Starting snake-term"
    );

    let mut settings = SettingsStore::new(config.settings.clone())?;
    let rng = match config.seed {
        Some(seed) => RandomSource::seeded(seed),
        None => RandomSource::from_entropy(),
    };

    let mut controller =
        SimulationController::new(&settings, rng, TerminalObserver::new(config.render));
    controller.initialize(&settings, true);

    let mut inputs = input::spawn_stdin_reader();
    let mut stdout = std::io::stdout();

    // Stats clock: fixed period, display only, restarted with every run
    let mut clock = StatsClock::new(Duration::from_millis(config.clock_interval_ms));

    // Step trigger: the period is re-read from the settings every cycle
    let step = sleep(step_period(&settings));
    tokio::pin!(step);

    let shutdown = shutdown_signal();
    tokio::pin!(shutdown);

    loop {
        tokio::select! {
            _ = &mut shutdown => break,
            _ = clock.tick() => {
                controller.tick_clock(clock.period_ms());
            }
            () = &mut step => {
                if let TickOutcome::RunFinished { .. } = controller.tick(&settings) {
                    clock.restart();
                }
                step.as_mut().reset(Instant::now() + step_period(&settings));
            }
            Some(input) = inputs.recv() => match input {
                Ok(Input::Settings(command)) => match settings.apply(command) {
                    Ok(()) => info!(?command, "Settings updated, applied on next run"),
                    Err(e) => warn!(?command, error = %e, "Settings change rejected"),
                },
                Ok(Input::Restart) => {
                    info!("Manual restart");
                    controller.restart(&settings);
                    clock.restart();
                }
                Ok(Input::Quit) => break,
                Err(e) => warn!(error = %e, "Ignoring input"),
            },
        }

        controller
            .observer_mut()
            .present(&mut stdout)
            .context("failed to draw frame")?;
    }

    let stats = controller.stats();
    info!(
        runs_finished = controller.runs_finished(),
        best_steps = ?stats.best_run().map(|r| r.step_count),
        current_steps = stats.step_count(),
        "Shutting down"
    );

    Ok(())
}

fn step_period(settings: &SettingsStore) -> Duration {
    Duration::from_millis(settings.settings().step_interval_ms)
}

fn load_config(cli: &Cli) -> Result<AppConfig> {
    let mut config = match &cli.config {
        Some(path) => AppConfig::load(path)
            .with_context(|| format!("failed to load config from {}", path.display()))?,
        None => AppConfig::default(),
    };

    if cli.seed.is_some() {
        config.seed = cli.seed;
    }

    Ok(config)
}

async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("Shutdown signal received");
}
