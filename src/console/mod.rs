//! Terminal front end
//! 
//! Renders engine updates and turns typed lines into timer actions.

pub mod commands;
pub mod view;

use std::{io::BufRead, thread};
use tokio::{
    io::{AsyncWrite, AsyncWriteExt},
    sync::{mpsc, watch},
};
use tracing::{debug, info, warn};

use crate::state::{TimerEngine, TimerState};

pub use commands::Command;
pub use view::{OutputFormat, TimerView};

/// Apply a command to the engine. Returns `false` when the session should end.
pub fn apply_command(engine: &TimerEngine, command: Command) -> bool {
    debug!("Applying command: {}", command);
    match command {
        Command::Toggle => engine.toggle(),
        Command::Next => engine.next(),
        Command::Quit => return false,
    }
    true
}

/// Forward stdin lines from a dedicated thread.
///
/// Blocking reads stay off the runtime so shutdown never waits on the terminal.
pub fn spawn_stdin_reader() -> mpsc::Receiver<String> {
    let (tx, rx) = mpsc::channel(16);

    thread::spawn(move || {
        for line in std::io::stdin().lock().lines() {
            match line {
                Ok(line) => {
                    if tx.blocking_send(line).is_err() {
                        break;
                    }
                }
                Err(e) => {
                    warn!("Failed to read command: {}", e);
                    break;
                }
            }
        }
        debug!("Stdin reader finished");
    });

    rx
}

/// Apply incoming lines until `quit` or the input closes
pub async fn run_commands(engine: &TimerEngine, mut lines: mpsc::Receiver<String>) {
    while let Some(line) = lines.recv().await {
        match line.parse::<Command>() {
            Ok(command) => {
                if !apply_command(engine, command) {
                    info!("Quit requested");
                    return;
                }
            }
            Err(e) => warn!("{}", e),
        }
    }

    info!("Input closed");
}

/// Write the current state, then one line per update until the engine goes away
pub async fn render_updates<W>(
    mut updates: watch::Receiver<TimerState>,
    format: OutputFormat,
    mut output: W,
) -> Result<(), String>
where
    W: AsyncWrite + Unpin,
{
    loop {
        let view = TimerView::new(&updates.borrow_and_update());
        let mut line = view.render(format)?;
        line.push('\n');

        output
            .write_all(line.as_bytes())
            .await
            .map_err(|e| format!("Failed to write timer view: {}", e))?;
        output
            .flush()
            .await
            .map_err(|e| format!("Failed to flush timer view: {}", e))?;

        if updates.changed().await.is_err() {
            debug!("Timer engine closed, stopping renderer");
            return Ok(());
        }
    }
}
