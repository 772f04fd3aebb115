//! Simulation engine: the core of the game.
//!
//! `SimulationEngine` owns the game context, processes player commands,
//! runs all systems, and produces `GameStateSnapshot`s. Completely headless,
//! enabling deterministic testing.

use std::collections::VecDeque;

use glam::Vec3;
use hecs::{Entity, World};

use cashrun_core::commands::PlayerCommand;
use cashrun_core::enums::{EnemyState, EnemyType, GamePhase};
use cashrun_core::error::GameResult;
use cashrun_core::events::GameEvent;
use cashrun_core::notify::EventBus;
use cashrun_core::state::GameStateSnapshot;
use cashrun_core::types::{SimTime, Transform};

use crate::collaborators::{Navigator, OpenFieldNavigator, Physics, SphereColliders};
use crate::components::Player;
use crate::config::GameConfig;
use crate::context::{GameContext, SceneRequest};
use crate::persistence::{JsonFileStore, SaveStore};
use crate::systems;
use crate::systems::weapons::FireOutcome;
use crate::world_setup;

/// The outside-world services the simulation depends on.
pub struct Collaborators {
    pub navigator: Box<dyn Navigator>,
    pub physics: Box<dyn Physics>,
    pub store: Box<dyn SaveStore>,
}

impl Collaborators {
    /// Open-field navigation, sphere hit tests and JSON files on disk.
    pub fn headless(seed: u64) -> Self {
        Self {
            navigator: Box::new(OpenFieldNavigator::new(seed)),
            physics: Box::new(SphereColliders::default()),
            store: Box::new(JsonFileStore),
        }
    }
}

/// The simulation engine. Owns the game context and the command queue.
pub struct SimulationEngine {
    ctx: GameContext,
    command_queue: VecDeque<PlayerCommand>,
}

impl SimulationEngine {
    /// Create an engine with the built-in headless collaborators.
    pub fn new(config: GameConfig) -> GameResult<Self> {
        let collaborators = Collaborators::headless(config.seed);
        Self::with_collaborators(config, collaborators)
    }

    /// Validate `config`, then build the level with the given services.
    pub fn with_collaborators(
        config: GameConfig,
        collaborators: Collaborators,
    ) -> GameResult<Self> {
        config.validate()?;
        let ctx = GameContext::new(
            config,
            collaborators.navigator,
            collaborators.physics,
            collaborators.store,
        );
        let mut engine = Self {
            ctx,
            command_queue: VecDeque::new(),
        };
        world_setup::subscribe_manager(&mut engine.ctx);
        world_setup::setup_level(&mut engine.ctx)?;
        Ok(engine)
    }

    /// Queue a player command for processing at the next tick boundary.
    pub fn queue_command(&mut self, command: PlayerCommand) {
        self.command_queue.push_back(command);
    }

    /// Queue multiple commands.
    pub fn queue_commands(&mut self, commands: impl IntoIterator<Item = PlayerCommand>) {
        self.command_queue.extend(commands);
    }

    /// Advance the simulation by one tick and return the resulting snapshot.
    pub fn tick(&mut self) -> GameStateSnapshot {
        self.process_commands();

        if matches!(self.ctx.phase, GamePhase::Playing | GamePhase::PlayerDead) {
            self.run_systems();
            self.ctx.time.advance();
        }

        self.apply_scene_request();

        let audio_events = std::mem::take(&mut self.ctx.audio_events);
        let notifications = std::mem::take(&mut self.ctx.published);
        systems::snapshot::build_snapshot(&self.ctx, audio_events, notifications)
    }

    /// Get the current game phase.
    pub fn phase(&self) -> GamePhase {
        self.ctx.phase
    }

    /// Get the current simulation time.
    pub fn time(&self) -> SimTime {
        self.ctx.time
    }

    /// Get a read-only reference to the ECS world.
    pub fn world(&self) -> &World {
        &self.ctx.world
    }

    pub fn bus(&self) -> &EventBus<Entity> {
        &self.ctx.bus
    }

    pub fn player(&self) -> Option<Entity> {
        self.ctx.player
    }

    pub fn context(&self) -> &GameContext {
        &self.ctx
    }

    /// Direct access for hosts that drive systems themselves.
    pub fn context_mut(&mut self) -> &mut GameContext {
        &mut self.ctx
    }

    /// Spawn an extra enemy into the running level.
    pub fn spawn_enemy(&mut self, enemy_type: EnemyType, position: Vec3) -> GameResult<Entity> {
        world_setup::spawn_enemy(&mut self.ctx, enemy_type, position)
    }

    pub fn change_enemy_state(&mut self, enemy: Entity, state: EnemyState) -> GameResult<()> {
        systems::enemy_ai::change_state(&mut self.ctx, enemy, state)
    }

    /// Change state by raw index. Unknown indices are rejected.
    pub fn change_enemy_state_by_index(&mut self, enemy: Entity, index: u8) -> GameResult<()> {
        systems::enemy_ai::change_state_by_index(&mut self.ctx, enemy, index)
    }

    /// Returns true if the blow killed the enemy.
    pub fn damage_enemy(&mut self, enemy: Entity, amount: i32) -> bool {
        systems::enemy_ai::apply_damage(&mut self.ctx, enemy, amount)
    }

    /// Evict despawned listeners from the bus. Returns how many went.
    pub fn compact_listeners(&mut self) -> usize {
        self.ctx.compact_listeners()
    }

    /// Tear the whole level down, manager included. The engine is inert
    /// afterwards.
    pub fn teardown(&mut self) {
        world_setup::teardown_scene(&mut self.ctx);
        let manager = self.ctx.manager;
        let _ = self.ctx.world.despawn(manager);
        self.ctx.bus.clear();
        self.command_queue.clear();
        self.ctx.phase = GamePhase::Exited;
        log::info!("engine torn down at tick {}", self.ctx.time.tick);
    }

    /// Process all queued commands.
    fn process_commands(&mut self) {
        while let Some(command) = self.command_queue.pop_front() {
            self.handle_command(command);
        }
    }

    /// Handle a single player command.
    fn handle_command(&mut self, command: PlayerCommand) {
        if self.ctx.phase == GamePhase::Exited {
            return;
        }
        let manager = self.ctx.manager;
        match command {
            PlayerCommand::SetPlayerTransform { transform } => {
                if let Some(player) = self.ctx.player {
                    if let Ok(mut current) = self.ctx.world.get::<&mut Transform>(player) {
                        *current = transform;
                    }
                }
            }
            PlayerCommand::SetMovementInput {
                horizontal,
                vertical,
            } => {
                self.ctx.movement = systems::motion::movement_magnitude(horizontal, vertical);
            }
            PlayerCommand::Fire => {
                if self.accepts_input() {
                    let outcome = self.fire();
                    log::trace!("fire: {outcome:?}");
                }
            }
            PlayerCommand::EquipNextWeapon => {
                if self.accepts_input() {
                    if let Some(player) = self.ctx.player {
                        if let Err(err) = systems::weapons::equip_next(&mut self.ctx, player) {
                            log::warn!("equip next weapon failed: {err}");
                        }
                    }
                }
            }
            PlayerCommand::SetInputAllowed { allowed } => {
                systems::manager::set_input_allowed(&mut self.ctx, allowed);
            }
            PlayerCommand::SaveGame => {
                self.ctx.publish(manager, GameEvent::SaveGame);
            }
            PlayerCommand::LoadGame => {
                self.ctx.publish(manager, GameEvent::LoadGame);
            }
            PlayerCommand::RestartGame => {
                self.ctx.publish(manager, GameEvent::RestartGame);
            }
            PlayerCommand::ExitGame => {
                self.ctx.publish(manager, GameEvent::ExitGame);
            }
        }
    }

    fn accepts_input(&self) -> bool {
        self.ctx.input_allowed && self.ctx.phase == GamePhase::Playing
    }

    fn fire(&mut self) -> FireOutcome {
        let weapon = self
            .ctx
            .player
            .and_then(|player| self.ctx.world.get::<&Player>(player).ok()?.active_weapon);
        match weapon {
            Some(weapon) => systems::weapons::fire(&mut self.ctx, weapon),
            None => FireOutcome::Rejected,
        }
    }

    /// Run all systems in order.
    fn run_systems(&mut self) {
        let dt = self.ctx.dt();
        // 1. Navigation (agent movement, transform + collider sync)
        systems::navigation::run(&mut self.ctx);
        // 2. Scheduled tasks (AI behaviors, animation, recovery, effects)
        crate::tasks::run(&mut self.ctx);
        // 3. Cosmetic motion
        systems::motion::run_ping_pong(&mut self.ctx.world, dt);
        systems::motion::run_head_bob(
            &mut self.ctx.world,
            self.ctx.input_allowed,
            self.ctx.movement,
            dt,
        );
        if let Some(camera) = self.ctx.player_transform() {
            systems::motion::run_billboards(&mut self.ctx.world, camera.position);
        }
        // 4. Pickups
        systems::pickups::run(&mut self.ctx);
    }

    /// Apply a restart or load requested during this tick.
    fn apply_scene_request(&mut self) {
        let Some(request) = self.ctx.pending_scene.take() else {
            return;
        };
        log::info!("{request:?} at tick {}", self.ctx.time.tick);
        world_setup::teardown_scene(&mut self.ctx);
        self.ctx.phase = GamePhase::Playing;
        if let Err(err) = world_setup::setup_level(&mut self.ctx) {
            log::error!("level rebuild failed: {err}");
            return;
        }
        systems::manager::set_input_allowed(&mut self.ctx, true);
        if request == SceneRequest::Load {
            systems::manager::load_game(&mut self.ctx);
        }
    }
}
