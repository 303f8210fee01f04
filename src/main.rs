//! Standup Timer - a one-minute meeting countdown
//! 
//! This is the main entry point for the standup-timer application.

use std::sync::Arc;
use tokio::io::stdout;
use tracing::{error, info};

use standup_timer::{
    config::Config,
    console::{render_updates, run_commands, spawn_stdin_reader},
    state::{SeededRandom, TimerEngine},
    tasks::TokioScheduler,
    utils::shutdown_signal,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::parse();

    // Logs go to stderr so the rendered timer owns stdout
    tracing_subscriber::fmt()
        .with_env_filter(format!("standup_timer={}", config.log_level()))
        .with_writer(std::io::stderr)
        .init();

    info!("Starting standup-timer v1.0.0");
    info!("Commands: <enter>/s toggle, n next, q quit");

    let scheduler = TokioScheduler::from_current().map_err(anyhow::Error::msg)?;
    let engine = Arc::new(match config.seed {
        Some(seed) => TimerEngine::with_random(scheduler, SeededRandom::new(seed)),
        None => TimerEngine::new(scheduler),
    });

    let renderer = tokio::spawn(render_updates(
        engine.subscribe(),
        config.output_format(),
        stdout(),
    ));

    if config.autostart {
        engine.start();
    }

    tokio::select! {
        _ = run_commands(&engine, spawn_stdin_reader()) => {}
        _ = shutdown_signal() => {
            info!("Shutdown signal received");
        }
    }

    engine.stop();
    renderer.abort();
    if let Ok(Err(e)) = renderer.await {
        error!("Renderer error: {}", e);
    }

    info!("Standup timer closed");
    Ok(())
}
