//! Game loop thread: drains host commands and ticks the engine through its
//! frame gate, publishing a snapshot after every completed tick.
//!
//! The engine is built by the caller and moved into the thread, so
//! configuration errors surface before anything is spawned.

use std::sync::mpsc;
use std::thread::JoinHandle;
use std::time::{Duration, Instant};

use tracing::{debug, info, trace};

use skirmish_core::commands::PlayerCommand;
use skirmish_core::constants::MIN_TICK_INTERVAL_MS;
use skirmish_sim::SimulationEngine;

use crate::error::AppError;
use crate::state::{GameLoopCommand, SharedSnapshot};

/// How long the loop sleeps between frame-gate polls.
const POLL_INTERVAL: Duration = Duration::from_millis(MIN_TICK_INTERVAL_MS / 4);

/// Running game loop: its command sender and thread.
pub struct GameLoopHandle {
    commands: mpsc::Sender<GameLoopCommand>,
    thread: JoinHandle<SimulationEngine>,
}

impl GameLoopHandle {
    /// Forward a player command. Returns false once the loop has stopped.
    pub fn send(&self, command: PlayerCommand) -> bool {
        self.commands
            .send(GameLoopCommand::PlayerCommand(command))
            .is_ok()
    }

    pub fn sender(&self) -> mpsc::Sender<GameLoopCommand> {
        self.commands.clone()
    }

    /// Stop the loop and hand back the engine.
    pub fn shutdown(self) -> Result<SimulationEngine, AppError> {
        // Already gone if the loop exited on its own.
        let _ = self.commands.send(GameLoopCommand::Shutdown);
        self.thread.join().map_err(|_| AppError::LoopPanicked)
    }
}

/// Spawns the game loop in a new thread.
pub fn spawn_game_loop(
    engine: SimulationEngine,
    latest_snapshot: SharedSnapshot,
) -> Result<GameLoopHandle, AppError> {
    let (cmd_tx, cmd_rx) = mpsc::channel::<GameLoopCommand>();

    let thread = std::thread::Builder::new()
        .name("skirmish-game-loop".into())
        .spawn(move || run_game_loop(engine, cmd_rx, &latest_snapshot))
        .map_err(AppError::Thread)?;

    Ok(GameLoopHandle {
        commands: cmd_tx,
        thread,
    })
}

/// The game loop. Runs until Shutdown command or channel disconnect.
fn run_game_loop(
    mut engine: SimulationEngine,
    cmd_rx: mpsc::Receiver<GameLoopCommand>,
    latest_snapshot: &SharedSnapshot,
) -> SimulationEngine {
    let start = Instant::now();
    info!("game loop started");

    loop {
        // 1. Drain all pending commands
        loop {
            match cmd_rx.try_recv() {
                Ok(GameLoopCommand::PlayerCommand(cmd)) => engine.queue_command(cmd),
                Ok(GameLoopCommand::Shutdown) | Err(mpsc::TryRecvError::Disconnected) => {
                    info!(ticks = engine.time().tick, "game loop stopped");
                    return engine;
                }
                Err(mpsc::TryRecvError::Empty) => break,
            }
        }

        // 2. Tick if the frame gate allows it
        if let Some(report) = engine.tick_if_due(start.elapsed()) {
            if report.is_quiet() {
                trace!(tick = report.tick, "tick");
            } else {
                debug!(
                    tick = report.tick,
                    moved = report.moved,
                    arrived = report.arrived.len(),
                    frozen = report.frozen.len(),
                    selected = report.selected,
                    "tick"
                );
            }

            // 3. Store latest snapshot for polling
            if let Ok(mut lock) = latest_snapshot.lock() {
                *lock = Some(engine.snapshot());
            }
        }

        std::thread::sleep(POLL_INTERVAL);
    }
}
