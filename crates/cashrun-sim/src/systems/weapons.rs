//! Weapon system: equipping, firing, fire recovery and ring cycling.
//!
//! Weapons are linked in a ring through `Weapon::next_weapon`. Equipping
//! one publishes `WeaponChange`; every other weapon hears it and puts
//! itself away, so at most one weapon is ever equipped.

use hecs::Entity;

use cashrun_core::enums::{HitTag, WeaponType};
use cashrun_core::error::{GameError, GameResult};
use cashrun_core::events::{AudioEvent, EventKind, GameEvent};
use cashrun_core::notify::Notification;

use crate::components::{Player, Weapon};
use crate::context::GameContext;
use crate::scheduler::Lane;
use crate::systems::{animation, enemy_ai};
use crate::tasks::{Step, Task};

/// Kinds every weapon listens to.
pub const WEAPON_SUBSCRIPTIONS: [EventKind; 2] =
    [EventKind::WeaponChange, EventKind::AnimationStopped];

/// What happened when the player pulled the trigger.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FireOutcome {
    /// Not equipped, recovering, or out of ammo. Nothing happened.
    Rejected,
    Missed,
    Hit { target: Entity, killed: bool },
}

/// A weapon only equips when asked for its own kind, once collected, with
/// ammo left and not already in hand.
pub fn can_equip(weapon: &Weapon, requested: WeaponType) -> bool {
    weapon.weapon_type == requested && weapon.collected && weapon.has_ammo() && !weapon.equipped
}

/// Equip `weapon` if it matches `requested`. Returns false when refused.
pub fn equip(ctx: &mut GameContext, weapon: Entity, requested: WeaponType) -> bool {
    {
        let Ok(mut w) = ctx.world.get::<&mut Weapon>(weapon) else {
            return false;
        };
        if !can_equip(&w, requested) {
            return false;
        }
        w.equipped = true;
        w.can_fire = true;
        w.default_sprite_visible = true;
    }
    log::debug!("equipped {requested:?}");
    ctx.publish(
        weapon,
        GameEvent::WeaponChange {
            weapon_type: requested,
        },
    );
    true
}

pub fn on_notification(ctx: &mut GameContext, weapon: Entity, note: &Notification<Entity>) {
    match note.event {
        GameEvent::WeaponChange { .. } if note.sender != weapon => put_away(ctx, weapon),
        GameEvent::AnimationStopped { .. } if note.sender == weapon => {
            if let Ok(mut w) = ctx.world.get::<&mut Weapon>(weapon) {
                if w.equipped {
                    w.default_sprite_visible = true;
                }
            }
        }
        _ => {}
    }
}

fn put_away(ctx: &mut GameContext, weapon: Entity) {
    animation::stop(ctx, weapon);
    ctx.scheduler.cancel_owner(weapon);
    if let Ok(mut w) = ctx.world.get::<&mut Weapon>(weapon) {
        w.equipped = false;
        w.default_sprite_visible = false;
    }
    animation::hide_all(ctx, weapon);
}

/// Fire `weapon` along the player's view ray.
pub fn fire(ctx: &mut GameContext, weapon: Entity) -> FireOutcome {
    let (weapon_type, damage, range, recovery_delay) = {
        let Ok(mut w) = ctx.world.get::<&mut Weapon>(weapon) else {
            return FireOutcome::Rejected;
        };
        if !(w.equipped && w.can_fire && w.has_ammo()) {
            return FireOutcome::Rejected;
        }
        w.can_fire = false;
        w.default_sprite_visible = false;
        (w.weapon_type, w.damage, w.range, w.recovery_delay)
    };

    animation::play(ctx, weapon);
    if weapon_type == WeaponType::Gun {
        ctx.play_sound(AudioEvent::WeaponFired { weapon_type });
    }

    let hit = ctx
        .player_view_ray()
        .and_then(|(origin, direction)| ctx.physics.raycast_forward(origin, direction, range));
    let outcome = match hit {
        Some(hit) if hit.tag == HitTag::Enemy => {
            if weapon_type == WeaponType::Punch {
                ctx.play_sound(AudioEvent::WeaponFired { weapon_type });
            }
            let killed = enemy_ai::apply_damage(ctx, hit.target, damage);
            FireOutcome::Hit {
                target: hit.target,
                killed,
            }
        }
        _ => FireOutcome::Missed,
    };

    let expired = match ctx.world.get::<&mut Weapon>(weapon) {
        Ok(mut w) if w.ammo > 0 => {
            w.ammo -= 1;
            w.ammo == 0
        }
        _ => false,
    };

    ctx.scheduler.spawn(
        weapon,
        Lane::Recovery,
        Task::FireRecovery {
            remaining: recovery_delay,
        },
    );
    if expired {
        log::info!("{weapon_type:?} is out of ammo");
        ctx.publish(weapon, GameEvent::AmmoExpired { weapon_type });
    }
    outcome
}

pub fn resume_recovery(ctx: &mut GameContext, weapon: Entity, remaining: f32) -> Step<f32> {
    let remaining = remaining - ctx.dt();
    if remaining > 0.0 {
        return Step::Pending(remaining);
    }
    if let Ok(mut w) = ctx.world.get::<&mut Weapon>(weapon) {
        w.can_fire = true;
    }
    Step::Done
}

/// Walk the ring from the player's active weapon and equip the first
/// weapon that accepts. Reaching a weapon that is already equipped also
/// ends the walk. Gives up after one full lap with `NoEquippableWeapon`;
/// a dangling link is `BrokenWeaponRing`.
pub fn equip_next(ctx: &mut GameContext, player: Entity) -> GameResult<Entity> {
    let start = ctx
        .world
        .get::<&Player>(player)
        .map_err(|_| GameError::EntityNotFound(format!("player {player:?}")))?
        .active_weapon
        .ok_or_else(|| GameError::EntityNotFound("player has no active weapon".to_string()))?;

    let ring_len = ctx.world.query::<&Weapon>().iter().count();
    let mut current = start;
    for _ in 0..ring_len {
        let next = successor(ctx, current)?;
        let weapon_type = match ctx.world.get::<&Weapon>(next) {
            Ok(w) => w.weapon_type,
            Err(_) => return Err(broken_link(current)),
        };
        equip(ctx, next, weapon_type);

        let equipped = ctx
            .world
            .get::<&Weapon>(next)
            .map(|w| w.equipped)
            .unwrap_or(false);
        if equipped {
            if let Ok(mut p) = ctx.world.get::<&mut Player>(player) {
                p.active_weapon = Some(next);
            }
            log::debug!("active weapon is now {weapon_type:?}");
            return Ok(next);
        }
        current = next;
    }
    Err(GameError::NoEquippableWeapon(ring_len))
}

fn successor(ctx: &GameContext, weapon: Entity) -> GameResult<Entity> {
    ctx.world
        .get::<&Weapon>(weapon)
        .ok()
        .and_then(|w| w.next_weapon)
        .filter(|next| ctx.world.contains(*next))
        .ok_or_else(|| broken_link(weapon))
}

fn broken_link(weapon: Entity) -> GameError {
    GameError::BrokenWeaponRing(format!("{weapon:?} has no live successor"))
}

/// The weapon entity of kind `weapon_type`, if the ring has one.
pub fn find_weapon(ctx: &GameContext, weapon_type: WeaponType) -> Option<Entity> {
    let mut query = ctx.world.query::<&Weapon>();
    let found = query
        .iter()
        .find(|(_, w)| w.weapon_type == weapon_type)
        .map(|(entity, _)| entity);
    found
}
