//! Per-level game context.
//!
//! Everything a system may touch during a tick lives here: the ECS world,
//! the notification bus, the task scheduler and the injected collaborators.
//! Systems receive `&mut GameContext` explicitly; there are no globals.

use hecs::{Entity, World};

use cashrun_core::enums::GamePhase;
use cashrun_core::events::{AudioEvent, EventKind, GameEvent};
use cashrun_core::notify::{self, Dispatch, EventBus, Notification};
use cashrun_core::state::SaveState;
use cashrun_core::types::{SimTime, Transform};

use crate::collaborators::{Navigator, Physics};
use crate::components::{ListenerRole, Manager, Player};
use crate::config::GameConfig;
use crate::persistence::SaveStore;
use crate::scheduler::Scheduler;
use crate::systems;
use crate::tasks::Task;

/// Scene change requested during a tick, applied once the tick is over.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SceneRequest {
    Restart,
    /// Restart, then apply the stored save document.
    Load,
}

pub struct GameContext {
    pub world: World,
    pub bus: EventBus<Entity>,
    pub scheduler: Scheduler<Task>,
    pub navigator: Box<dyn Navigator>,
    pub physics: Box<dyn Physics>,
    pub store: Box<dyn SaveStore>,
    pub config: GameConfig,
    pub time: SimTime,
    pub phase: GamePhase,
    pub input_allowed: bool,
    /// Combined movement axis magnitude in [0, 1], for head bob.
    pub movement: f32,
    /// The game manager. Survives scene restarts.
    pub manager: Entity,
    pub player: Option<Entity>,
    /// Save slot filled on `SaveGamePrepare` and read on `LoadGameComplete`.
    pub save_state: SaveState,
    pub pending_scene: Option<SceneRequest>,
    pub audio_events: Vec<AudioEvent>,
    /// Kind of every notification published since the last snapshot.
    pub published: Vec<EventKind>,
}

impl GameContext {
    pub fn new(
        config: GameConfig,
        navigator: Box<dyn Navigator>,
        physics: Box<dyn Physics>,
        store: Box<dyn SaveStore>,
    ) -> Self {
        let mut world = World::new();
        let manager = world.spawn((Manager::default(), ListenerRole::Manager));
        Self {
            world,
            bus: EventBus::new(),
            scheduler: Scheduler::new(),
            navigator,
            physics,
            store,
            config,
            time: SimTime::default(),
            phase: GamePhase::default(),
            input_allowed: true,
            movement: 0.0,
            manager,
            player: None,
            save_state: SaveState::default(),
            pending_scene: None,
            audio_events: Vec::new(),
            published: Vec::new(),
        }
    }

    /// Publish `event` from `sender` on the bus. Returns the delivery count.
    pub fn publish(&mut self, sender: Entity, event: GameEvent) -> usize {
        notify::publish(self, sender, event)
    }

    pub fn subscribe(&mut self, listener: Entity, kinds: &[EventKind]) {
        for kind in kinds {
            self.bus.subscribe(listener, *kind);
        }
    }

    /// Evict despawned listeners from the bus.
    pub fn compact_listeners(&mut self) -> usize {
        let world = &self.world;
        self.bus.compact(|listener| world.contains(listener))
    }

    pub fn dt(&self) -> f32 {
        self.time.dt()
    }

    pub fn play_sound(&mut self, event: AudioEvent) {
        if self.config.sfx_enabled {
            self.audio_events.push(event);
        }
    }

    /// A later `Load` wins over an earlier `Restart` in the same tick.
    pub fn request_scene(&mut self, request: SceneRequest) {
        if self.pending_scene != Some(SceneRequest::Load) {
            self.pending_scene = Some(request);
        }
    }

    pub fn player_transform(&self) -> Option<Transform> {
        let player = self.player?;
        self.world.get::<&Transform>(player).ok().map(|t| *t)
    }

    /// Origin and direction of the player's view ray.
    pub fn player_view_ray(&self) -> Option<(glam::Vec3, glam::Vec3)> {
        let player = self.player?;
        let transform = self.player_transform()?;
        let eye_height = self.world.get::<&Player>(player).ok()?.eye_height;
        Some((
            transform.position + glam::Vec3::Y * eye_height,
            transform.forward(),
        ))
    }
}

impl Dispatch<Entity> for GameContext {
    fn bus(&self) -> &EventBus<Entity> {
        &self.bus
    }

    fn is_alive(&self, listener: Entity) -> bool {
        self.world.contains(listener)
    }

    fn deliver(&mut self, listener: Entity, note: &Notification<Entity>) {
        let role = match self.world.get::<&ListenerRole>(listener) {
            Ok(role) => *role,
            Err(_) => return,
        };
        match role {
            ListenerRole::Manager => systems::manager::on_notification(self, listener, note),
            ListenerRole::Player => systems::player::on_notification(self, listener, note),
            ListenerRole::Enemy => systems::enemy_ai::on_notification(self, listener, note),
            ListenerRole::Weapon => systems::weapons::on_notification(self, listener, note),
        }
    }

    fn on_publish(&mut self, note: &Notification<Entity>) {
        log::trace!("{:?} from {:?}", note.event, note.sender);
        self.published.push(note.event.kind());
    }
}
