//! Host side of the game loop.
//!
//! `Host` owns the command channel and the loop thread, and mirrors the most
//! recent snapshot so any thread can poll it. It is `Sync`, so the stdin
//! reader and the snapshot printer can share one behind an `Arc`.

use std::sync::mpsc;
use std::sync::{Arc, Mutex, MutexGuard};
use std::thread::JoinHandle;

use cashrun_core::commands::PlayerCommand;
use cashrun_core::state::GameStateSnapshot;
use cashrun_sim::config::GameConfig;

use crate::game_loop::{self, GameLoopCommand, LoopOptions};

/// Channel and thread of a running simulation.
struct Session {
    commands: mpsc::Sender<GameLoopCommand>,
    thread: JoinHandle<()>,
}

#[derive(Default)]
pub struct Host {
    session: Mutex<Option<Session>>,
    latest_snapshot: Arc<Mutex<Option<GameStateSnapshot>>>,
}

impl Host {
    pub fn new() -> Self {
        Self::default()
    }

    /// Validate `config` and start the game loop. Returns the snapshot
    /// stream; it ends when the loop stops.
    pub fn start(
        &self,
        config: GameConfig,
        options: LoopOptions,
    ) -> Result<mpsc::Receiver<GameStateSnapshot>, String> {
        let mut session = self.session()?;
        if session.is_some() {
            return Err("Simulation already running".into());
        }
        config.validate().map_err(|e| e.to_string())?;

        let (snapshot_tx, snapshot_rx) = mpsc::channel();
        let (commands, thread) = game_loop::spawn_game_loop(
            config,
            options,
            Arc::clone(&self.latest_snapshot),
            snapshot_tx,
        )
        .map_err(|e| format!("Failed to spawn game loop: {}", e))?;

        log::info!("simulation started");
        *session = Some(Session { commands, thread });
        Ok(snapshot_rx)
    }

    pub fn is_running(&self) -> bool {
        self.session
            .lock()
            .map(|session| session.is_some())
            .unwrap_or(false)
    }

    /// Forward a player command to the next tick.
    pub fn send(&self, command: PlayerCommand) -> Result<(), String> {
        let session = self.session()?;
        match session.as_ref() {
            Some(session) => session
                .commands
                .send(GameLoopCommand::PlayerCommand(command))
                .map_err(|e| format!("Failed to send command: {}", e)),
            None => Err("Simulation not started".into()),
        }
    }

    /// Ask the loop to tear down, then wait for its thread. Stopping a loop
    /// that already ended, or was never started, is fine.
    pub fn stop(&self) -> Result<(), String> {
        let Some(session) = self.session()?.take() else {
            return Ok(());
        };
        let _ = session.commands.send(GameLoopCommand::Shutdown);
        session
            .thread
            .join()
            .map_err(|_| "game loop thread panicked".to_string())?;
        log::info!("simulation stopped");
        Ok(())
    }

    /// Most recent snapshot, if the loop has ticked at least once.
    pub fn latest_snapshot(&self) -> Result<Option<GameStateSnapshot>, String> {
        let lock = self.latest_snapshot.lock().map_err(|e| e.to_string())?;
        Ok(lock.clone())
    }

    fn session(&self) -> Result<MutexGuard<'_, Option<Session>>, String> {
        self.session.lock().map_err(|e| e.to_string())
    }
}
