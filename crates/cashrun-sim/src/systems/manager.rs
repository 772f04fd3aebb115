//! Game manager: level completion, scene control, save/load, input gating.
//!
//! The manager entity is the one listener that survives scene restarts.

use hecs::Entity;

use cashrun_core::enums::GamePhase;
use cashrun_core::events::{EventKind, GameEvent};
use cashrun_core::notify::Notification;

use crate::components::Manager;
use crate::context::{GameContext, SceneRequest};

/// Kinds the manager listens to.
pub const MANAGER_SUBSCRIPTIONS: [EventKind; 6] = [
    EventKind::CashCollected,
    EventKind::EnemyDestroyed,
    EventKind::RestartGame,
    EventKind::ExitGame,
    EventKind::SaveGame,
    EventKind::LoadGame,
];

pub fn on_notification(ctx: &mut GameContext, manager: Entity, note: &Notification<Entity>) {
    match note.event {
        GameEvent::CashCollected { cash } => {
            log::info!("level complete with {cash} cash");
            ctx.phase = GamePhase::LevelComplete;
        }
        GameEvent::EnemyDestroyed { .. } => {
            if let Ok(mut m) = ctx.world.get::<&mut Manager>(manager) {
                m.enemies_destroyed += 1;
            }
        }
        GameEvent::RestartGame => ctx.request_scene(SceneRequest::Restart),
        GameEvent::LoadGame => ctx.request_scene(SceneRequest::Load),
        GameEvent::ExitGame => {
            log::info!("exit requested");
            ctx.phase = GamePhase::Exited;
        }
        GameEvent::SaveGame => save_game(ctx, manager),
        _ => {}
    }
}

/// Gate player input and tell everyone about it.
pub fn set_input_allowed(ctx: &mut GameContext, allowed: bool) {
    ctx.input_allowed = allowed;
    let manager = ctx.manager;
    ctx.publish(manager, GameEvent::InputChanged { allowed });
}

/// Ask listeners to fill the save slot, then write it out.
fn save_game(ctx: &mut GameContext, manager: Entity) {
    ctx.publish(manager, GameEvent::SaveGamePrepare);
    let path = ctx.config.save_path.clone();
    match ctx.store.save_state(&path, &ctx.save_state) {
        Ok(()) => log::info!("game saved to {}", path.display()),
        Err(err) => log::warn!("save to {} failed: {err}", path.display()),
    }
}

/// Read the save document into the slot and tell listeners to apply it.
/// A missing or unreadable save leaves the fresh scene as it is.
pub fn load_game(ctx: &mut GameContext) {
    let path = ctx.config.save_path.clone();
    match ctx.store.load_state(&path) {
        Ok(state) => {
            ctx.save_state = state;
            let manager = ctx.manager;
            ctx.publish(manager, GameEvent::LoadGameComplete);
            log::info!("game loaded from {}", path.display());
        }
        Err(err) => log::warn!("load from {} failed: {err}", path.display()),
    }
}

pub fn enemies_destroyed(ctx: &GameContext) -> u32 {
    ctx.world
        .get::<&Manager>(ctx.manager)
        .map(|m| m.enemies_destroyed)
        .unwrap_or_default()
}
