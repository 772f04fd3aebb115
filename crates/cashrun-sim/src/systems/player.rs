//! Player system: cash, health, damage, death and the save slot.

use hecs::Entity;

use cashrun_core::enums::{GamePhase, WeaponType};
use cashrun_core::events::{EventKind, GameEvent};
use cashrun_core::notify::Notification;
use cashrun_core::types::Transform;

use crate::components::{Player, Weapon};
use crate::context::{GameContext, SceneRequest};
use crate::scheduler::Lane;
use crate::systems::{effects, manager, pickups, weapons};
use crate::tasks::{Step, Task};

/// Kinds the player listens to.
pub const PLAYER_SUBSCRIPTIONS: [EventKind; 5] = [
    EventKind::Strike,
    EventKind::AmmoExpired,
    EventKind::InputChanged,
    EventKind::SaveGamePrepare,
    EventKind::LoadGameComplete,
];

pub fn on_notification(ctx: &mut GameContext, player: Entity, note: &Notification<Entity>) {
    match note.event {
        GameEvent::Strike { damage } => apply_damage(ctx, player, damage),
        GameEvent::AmmoExpired { .. } => {
            if let Err(err) = weapons::equip_next(ctx, player) {
                log::warn!("could not switch weapon after running dry: {err}");
            }
        }
        GameEvent::InputChanged { allowed } => {
            log::debug!("player input allowed: {allowed}");
        }
        GameEvent::SaveGamePrepare => prepare_save(ctx, player),
        GameEvent::LoadGameComplete => apply_save(ctx, player),
        _ => {}
    }
}

/// Set cash. Crossing the level total publishes `CashCollected` once;
/// dropping back below the total re-arms it.
pub fn set_cash(ctx: &mut GameContext, player: Entity, value: f32) {
    let completed = {
        let Ok(mut p) = ctx.world.get::<&mut Player>(player) else {
            return;
        };
        p.cash = value;
        if p.cash >= p.cash_total {
            let first = !p.completion_sent;
            p.completion_sent = true;
            first
        } else {
            p.completion_sent = false;
            false
        }
    };
    if completed {
        log::info!("all cash collected ({value})");
        ctx.publish(player, GameEvent::CashCollected { cash: value });
    }
}

pub fn add_cash(ctx: &mut GameContext, player: Entity, amount: f32) {
    let Ok(cash) = ctx.world.get::<&Player>(player).map(|p| p.cash) else {
        return;
    };
    set_cash(ctx, player, cash + amount);
}

/// Set health. Reaching zero kills the player, once.
pub fn set_health(ctx: &mut GameContext, player: Entity, value: i32) {
    let died = {
        let Ok(mut p) = ctx.world.get::<&mut Player>(player) else {
            return;
        };
        p.health = value;
        if p.health <= 0 && !p.dead {
            p.dead = true;
            true
        } else {
            false
        }
    };
    if died {
        die(ctx, player);
    }
}

/// Take a hit. Ignored once dead.
pub fn apply_damage(ctx: &mut GameContext, player: Entity, amount: i32) {
    let health = match ctx.world.get::<&Player>(player) {
        Ok(p) if !p.dead => p.health - amount,
        _ => return,
    };
    set_health(ctx, player, health);
    effects::show_damage_overlay(ctx, player);
    ctx.publish(player, GameEvent::PlayerDamaged { amount, health });
}

fn die(ctx: &mut GameContext, player: Entity) {
    log::info!("player died");
    manager::set_input_allowed(ctx, false);
    ctx.phase = GamePhase::PlayerDead;

    let respawn_time = ctx
        .world
        .get::<&Player>(player)
        .map(|p| p.respawn_time)
        .unwrap_or_default();
    ctx.scheduler.spawn(
        player,
        Lane::Behavior,
        Task::Respawn {
            remaining: respawn_time,
        },
    );
    ctx.publish(player, GameEvent::PlayerDied);
}

pub fn resume_respawn(ctx: &mut GameContext, _player: Entity, remaining: f32) -> Step<f32> {
    let remaining = remaining - ctx.dt();
    if remaining > 0.0 {
        return Step::Pending(remaining);
    }
    ctx.request_scene(SceneRequest::Restart);
    Step::Done
}

/// Copy the player into the save slot.
fn prepare_save(ctx: &mut GameContext, player: Entity) {
    let (transform, health, cash) = {
        let Ok(mut query) = ctx.world.query_one::<(&Transform, &Player)>(player) else {
            return;
        };
        let Some((transform, p)) = query.get() else {
            return;
        };
        (*transform, p.health, p.cash)
    };

    let mut collected = Vec::new();
    for (_entity, weapon) in ctx.world.query_mut::<&Weapon>() {
        collected.push((weapon.weapon_type, weapon.collected));
    }

    let slot = &mut ctx.save_state;
    slot.set_transform(&transform);
    slot.health = health;
    slot.cash = cash;
    for (weapon_type, is_collected) in collected {
        slot.set_collected(weapon_type, is_collected);
    }
    log::debug!("save slot filled: health {health}, cash {cash}");
}

/// Restore the player from the save slot.
fn apply_save(ctx: &mut GameContext, player: Entity) {
    let state = ctx.save_state.clone();
    set_cash(ctx, player, state.cash);
    for weapon_type in [WeaponType::Punch, WeaponType::Gun] {
        if state.collected(weapon_type) {
            pickups::grant_weapon(ctx, player, weapon_type);
        }
    }
    set_health(ctx, player, state.health);
    if let Ok(mut transform) = ctx.world.get::<&mut Transform>(player) {
        *transform = state.transform();
    }
    log::info!("save applied: health {}, cash {}", state.health, state.cash);
}
