//! Snapshot system: queries the ECS world and builds a complete
//! GameStateSnapshot.
//!
//! This system is read-only. It never modifies the world.

use hecs::{Entity, World};

use cashrun_core::events::{AudioEvent, EventKind};
use cashrun_core::state::*;
use cashrun_core::types::Transform;

use crate::components::*;
use crate::context::GameContext;
use crate::systems::manager;

/// Stable numeric id for an entity in views.
pub fn entity_id(entity: Entity) -> u64 {
    entity.to_bits().get()
}

/// Build a complete GameStateSnapshot from the current context.
pub fn build_snapshot(
    ctx: &GameContext,
    audio_events: Vec<AudioEvent>,
    notifications: Vec<EventKind>,
) -> GameStateSnapshot {
    GameStateSnapshot {
        time: ctx.time,
        phase: ctx.phase,
        input_allowed: ctx.input_allowed,
        player: ctx.player.and_then(|player| build_player(&ctx.world, player)),
        enemies: build_enemies(&ctx.world),
        weapons: build_weapons(&ctx.world),
        pickups: build_pickups(&ctx.world),
        enemies_destroyed: manager::enemies_destroyed(ctx),
        audio_events,
        notifications,
    }
}

fn build_player(world: &World, player: Entity) -> Option<PlayerView> {
    let mut query = world
        .query_one::<(&Player, &Transform, Option<&HeadBob>)>(player)
        .ok()?;
    let (p, transform, bob) = query.get()?;
    let active_weapon = p
        .active_weapon
        .and_then(|weapon| world.get::<&Weapon>(weapon).ok().map(|w| w.weapon_type));
    Some(PlayerView {
        transform: *transform,
        health: p.health,
        cash: p.cash,
        cash_total: p.cash_total,
        active_weapon,
        show_damage: p.show_damage,
        camera_y: bob.map(|b| b.camera_y).unwrap_or(p.eye_height),
    })
}

fn build_enemies(world: &World) -> Vec<EnemyView> {
    let mut enemies: Vec<EnemyView> = world
        .query::<(&Enemy, &Transform, Option<&SpriteTint>, Option<&Billboard>)>()
        .iter()
        .filter(|(_, (enemy, ..))| enemy.alive)
        .map(|(entity, (enemy, transform, tint, billboard))| EnemyView {
            id: entity_id(entity),
            enemy_type: enemy.enemy_type,
            state: enemy.state,
            health: enemy.health,
            position: transform.position,
            tint: tint.copied().unwrap_or_default().color,
            billboard_yaw: billboard.map(|b| b.yaw).unwrap_or_default(),
        })
        .collect();
    enemies.sort_by_key(|e| e.id);
    enemies
}

fn build_weapons(world: &World) -> Vec<WeaponView> {
    let mut weapons: Vec<WeaponView> = world
        .query::<(&Weapon, Option<&SpriteAnimator>)>()
        .iter()
        .map(|(entity, (weapon, animator))| WeaponView {
            id: entity_id(entity),
            weapon_type: weapon.weapon_type,
            ammo: weapon.ammo,
            collected: weapon.collected,
            equipped: weapon.equipped,
            can_fire: weapon.can_fire,
            default_sprite_visible: weapon.default_sprite_visible,
            visible_frame: animator.and_then(SpriteAnimator::visible_frame),
        })
        .collect();
    weapons.sort_by_key(|w| w.id);
    weapons
}

fn build_pickups(world: &World) -> Vec<PickupView> {
    let mut pickups: Vec<PickupView> = world
        .query::<(&Pickup, &Transform)>()
        .iter()
        .map(|(entity, (pickup, transform))| PickupView {
            id: entity_id(entity),
            kind: pickup.kind,
            position: transform.position,
            active: pickup.active,
        })
        .collect();
    pickups.sort_by_key(|p| p.id);
    pickups
}
