//! Pickup system: the player collects power-ups by walking into them.

use hecs::Entity;

use cashrun_core::enums::{PickupKind, WeaponType};
use cashrun_core::events::{AudioEvent, GameEvent};
use cashrun_core::types::Transform;

use crate::components::{Pickup, Player, Weapon};
use crate::context::GameContext;
use crate::systems::{player, weapons};

/// Collect every active pickup within reach of the player.
pub fn run(ctx: &mut GameContext) {
    let Some(player) = ctx.player else {
        return;
    };
    let Some(player_position) = ctx.player_transform().map(|t| t.position) else {
        return;
    };
    let reach = match ctx.world.get::<&Player>(player) {
        Ok(p) if !p.dead => p.pickup_radius,
        _ => return,
    };

    let mut touched = Vec::new();
    for (entity, (pickup, transform)) in ctx.world.query_mut::<(&Pickup, &Transform)>() {
        if pickup.active && transform.position.distance(player_position) <= reach {
            touched.push(entity);
        }
    }
    for pickup in touched {
        collect(ctx, pickup, player);
    }
}

/// Hand `pickup` to the player. Returns false if it was already taken.
pub fn collect(ctx: &mut GameContext, pickup: Entity, player: Entity) -> bool {
    let (kind, amount) = {
        let Ok(mut p) = ctx.world.get::<&mut Pickup>(pickup) else {
            return false;
        };
        if !p.active {
            return false;
        }
        p.active = false;
        (p.kind, p.amount)
    };

    log::debug!("collected {kind:?}");
    ctx.play_sound(AudioEvent::PickupCollected { kind });
    match kind {
        PickupKind::Cash => player::add_cash(ctx, player, amount),
        PickupKind::Weapon(weapon_type) => {
            grant_weapon(ctx, player, weapon_type);
        }
    }
    ctx.publish(pickup, GameEvent::PowerupCollected { kind });
    true
}

/// Mark a weapon collected, retire its pickup and equip it.
pub fn grant_weapon(ctx: &mut GameContext, player: Entity, weapon_type: WeaponType) -> bool {
    let Some(weapon) = weapons::find_weapon(ctx, weapon_type) else {
        log::warn!("no {weapon_type:?} in the weapon ring");
        return false;
    };
    if let Ok(mut w) = ctx.world.get::<&mut Weapon>(weapon) {
        w.collected = true;
    }
    for (_entity, pickup) in ctx.world.query_mut::<&mut Pickup>() {
        if pickup.kind == PickupKind::Weapon(weapon_type) {
            pickup.active = false;
        }
    }

    let already_equipped = ctx
        .world
        .get::<&Weapon>(weapon)
        .map(|w| w.equipped)
        .unwrap_or(false);
    if already_equipped || weapons::equip(ctx, weapon, weapon_type) {
        if let Ok(mut p) = ctx.world.get::<&mut Player>(player) {
            p.active_weapon = Some(weapon);
        }
    }
    true
}
