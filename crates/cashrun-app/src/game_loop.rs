//! Game loop thread: runs the simulation engine at 30Hz and forwards snapshots.
//!
//! The engine is built inside the thread because its collaborators are not
//! `Send`. Commands arrive over an `mpsc` channel. Snapshots go out over a
//! second channel and are kept in shared state for synchronous polling.

use std::io;
use std::sync::mpsc;
use std::sync::{Arc, Mutex};
use std::thread::JoinHandle;
use std::time::{Duration, Instant};

use cashrun_core::commands::PlayerCommand;
use cashrun_core::constants::TICK_RATE;
use cashrun_core::enums::GamePhase;
use cashrun_core::state::GameStateSnapshot;
use cashrun_sim::config::GameConfig;
use cashrun_sim::SimulationEngine;

/// Nominal duration of one tick.
pub const TICK_DURATION: Duration = Duration::from_nanos(1_000_000_000 / TICK_RATE as u64);

/// Messages from the host to the game loop thread.
#[derive(Debug)]
pub enum GameLoopCommand {
    /// Queued on the engine for the next tick.
    PlayerCommand(PlayerCommand),
    /// Tear the level down and stop the loop.
    Shutdown,
}

/// How the loop paces and bounds itself.
#[derive(Debug, Clone, Copy)]
pub struct LoopOptions {
    /// Stop after this many ticks. `None` runs until exit or shutdown.
    pub max_ticks: Option<u64>,
    /// Sleep between ticks to hold the nominal rate.
    pub realtime: bool,
}

impl Default for LoopOptions {
    fn default() -> Self {
        Self {
            max_ticks: None,
            realtime: true,
        }
    }
}

/// Spawns the game loop in a new thread.
///
/// Returns the command sender and the thread handle. The thread stops on
/// `Shutdown`, when the game exits, when `max_ticks` is reached, or when
/// either channel disconnects.
pub fn spawn_game_loop(
    config: GameConfig,
    options: LoopOptions,
    latest_snapshot: Arc<Mutex<Option<GameStateSnapshot>>>,
    snapshot_tx: mpsc::Sender<GameStateSnapshot>,
) -> io::Result<(mpsc::Sender<GameLoopCommand>, JoinHandle<()>)> {
    let (cmd_tx, cmd_rx) = mpsc::channel::<GameLoopCommand>();

    let handle = std::thread::Builder::new()
        .name("cashrun-game-loop".into())
        .spawn(move || {
            let engine = match SimulationEngine::new(config) {
                Ok(engine) => engine,
                Err(err) => {
                    log::error!("failed to build simulation: {err}");
                    return;
                }
            };
            run_game_loop(engine, options, cmd_rx, &latest_snapshot, &snapshot_tx);
        })?;

    Ok((cmd_tx, handle))
}

/// The game loop. Returns the number of ticks run.
pub fn run_game_loop(
    mut engine: SimulationEngine,
    options: LoopOptions,
    cmd_rx: mpsc::Receiver<GameLoopCommand>,
    latest_snapshot: &Mutex<Option<GameStateSnapshot>>,
    snapshot_tx: &mpsc::Sender<GameStateSnapshot>,
) -> u64 {
    let mut ticks = 0u64;
    let mut next_tick_time = Instant::now();

    loop {
        // 1. Drain all pending commands
        loop {
            match cmd_rx.try_recv() {
                Ok(GameLoopCommand::PlayerCommand(cmd)) => {
                    engine.queue_command(cmd);
                }
                Ok(GameLoopCommand::Shutdown) => {
                    log::info!("shutdown requested after {ticks} ticks");
                    engine.teardown();
                    return ticks;
                }
                Err(mpsc::TryRecvError::Empty) => break,
                Err(mpsc::TryRecvError::Disconnected) => {
                    engine.teardown();
                    return ticks;
                }
            }
        }

        // 2. Advance one tick
        let snapshot = engine.tick();
        ticks += 1;
        let exited = snapshot.phase == GamePhase::Exited;

        // 3. Store latest snapshot for synchronous polling
        if let Ok(mut lock) = latest_snapshot.lock() {
            *lock = Some(snapshot.clone());
        }

        // 4. Hand the snapshot to the host
        if snapshot_tx.send(snapshot).is_err() {
            log::debug!("snapshot receiver dropped");
            engine.teardown();
            return ticks;
        }

        if exited || options.max_ticks.is_some_and(|max| ticks >= max) {
            engine.teardown();
            return ticks;
        }

        // 5. Sleep until next tick
        if options.realtime {
            next_tick_time += TICK_DURATION;
            let now = Instant::now();
            if next_tick_time > now {
                std::thread::sleep(next_tick_time - now);
            } else if now - next_tick_time > TICK_DURATION * 2 {
                // Too far behind; reset instead of catching up
                next_tick_time = now;
            }
        }
    }
}
