//! Entity spawn factories for building and tearing down a level.
//!
//! Creates the weapon ring, the player, enemies with their animators, and
//! pickups, and subscribes each listener to the kinds it handles.

use glam::Vec3;
use hecs::Entity;

use cashrun_core::constants::ENEMY_COLLIDER_RADIUS;
use cashrun_core::enums::{EnemyState, EnemyType, HitTag, PickupKind, WeaponType};
use cashrun_core::error::GameResult;
use cashrun_core::types::Transform;

use crate::components::*;
use crate::config::{AnimatorConfig, WeaponConfig};
use crate::context::GameContext;
use crate::systems::{enemy_ai, manager, player, weapons};

/// Build the configured level: weapons, player, enemies, pickups.
pub fn setup_level(ctx: &mut GameContext) -> GameResult<()> {
    let weapon_configs = ctx.config.weapons.clone();
    let level = ctx.config.level.clone();

    let ring = spawn_weapon_ring(ctx, &weapon_configs);
    spawn_player(ctx, level.player_start, &ring);

    for spawn in &level.enemies {
        spawn_enemy(ctx, spawn.enemy_type, spawn.position)?;
    }
    for spawn in &level.cash {
        spawn_pickup(ctx, PickupKind::Cash, spawn.amount, spawn.position);
    }
    for spawn in &level.weapon_pickups {
        spawn_pickup(ctx, PickupKind::Weapon(spawn.weapon_type), 0.0, spawn.position);
    }
    log::info!(
        "level ready: {} enemies, {} cash pickups",
        level.enemies.len(),
        level.cash.len()
    );
    Ok(())
}

/// Despawn everything but the manager and evict the dead listeners.
pub fn teardown_scene(ctx: &mut GameContext) {
    let manager = ctx.manager;
    let doomed: Vec<Entity> = ctx
        .world
        .iter()
        .map(|entity_ref| entity_ref.entity())
        .filter(|entity| *entity != manager)
        .collect();
    for entity in &doomed {
        ctx.navigator.remove_agent(*entity);
        ctx.physics.remove_collider(*entity);
        let _ = ctx.world.despawn(*entity);
    }
    ctx.scheduler.clear();
    ctx.player = None;
    let evicted = ctx.compact_listeners();
    log::debug!(
        "scene torn down: {} entities, {evicted} listener registrations",
        doomed.len()
    );
}

/// Subscribe the manager entity. Called once per engine.
pub fn subscribe_manager(ctx: &mut GameContext) {
    let manager = ctx.manager;
    ctx.subscribe(manager, &manager::MANAGER_SUBSCRIPTIONS);
}

fn animator(animation_id: u32, config: &AnimatorConfig) -> SpriteAnimator {
    SpriteAnimator {
        hide_on_start: config.hide_on_start,
        ..SpriteAnimator::new(animation_id, config.mode, config.fps, config.frame_count)
    }
}

/// Spawn the weapons and link them into a ring in config order.
pub fn spawn_weapon_ring(ctx: &mut GameContext, configs: &[WeaponConfig]) -> Vec<Entity> {
    let ring: Vec<Entity> = configs
        .iter()
        .enumerate()
        .map(|(index, config)| {
            ctx.world.spawn((
                Weapon {
                    weapon_type: config.weapon_type,
                    damage: config.damage,
                    range: config.range,
                    ammo: config.ammo,
                    recovery_delay: config.recovery_delay,
                    collected: config.collected,
                    equipped: false,
                    can_fire: false,
                    next_weapon: None,
                    default_sprite_visible: false,
                },
                animator(index as u32, &config.animation),
                ListenerRole::Weapon,
            ))
        })
        .collect();

    for (index, weapon) in ring.iter().enumerate() {
        let next = ring[(index + 1) % ring.len()];
        if let Ok(mut w) = ctx.world.get::<&mut Weapon>(*weapon) {
            w.next_weapon = Some(next);
        }
        ctx.subscribe(*weapon, &weapons::WEAPON_SUBSCRIPTIONS);
    }
    ring
}

/// Spawn the player and equip the default weapon.
pub fn spawn_player(ctx: &mut GameContext, start: Transform, ring: &[Entity]) -> Entity {
    let config = ctx.config.player.clone();
    let bob = ctx.config.head_bob;
    let player = ctx.world.spawn((
        Player {
            health: config.health,
            cash: 0.0,
            cash_total: config.cash_total,
            active_weapon: None,
            completion_sent: false,
            dead: false,
            show_damage: false,
            respawn_time: config.respawn_time,
            damage_interval: config.damage_interval,
            eye_height: config.eye_height,
            pickup_radius: config.pickup_radius,
        },
        start,
        HeadBob {
            strength: bob.strength,
            frequency: bob.frequency,
            neutral_y: bob.neutral_y,
            camera_y: bob.neutral_y,
            ..HeadBob::default()
        },
        ListenerRole::Player,
    ));
    ctx.subscribe(player, &player::PLAYER_SUBSCRIPTIONS);
    ctx.player = Some(player);

    let default_weapon = ring.iter().copied().find(|weapon| {
        ctx.world
            .get::<&Weapon>(*weapon)
            .map(|w| w.weapon_type == config.default_weapon)
            .unwrap_or(false)
    });
    if let Some(weapon) = default_weapon {
        if let Ok(mut p) = ctx.world.get::<&mut Player>(player) {
            p.active_weapon = Some(weapon);
        }
        if !weapons::equip(ctx, weapon, config.default_weapon) {
            log::warn!("default weapon {:?} is not collected", config.default_weapon);
        }
    }
    player
}

/// Spawn an enemy of `enemy_type` and start it patrolling.
pub fn spawn_enemy(
    ctx: &mut GameContext,
    enemy_type: EnemyType,
    position: Vec3,
) -> GameResult<Entity> {
    let profile = ctx.config.enemy_profile(enemy_type);
    let animations = ctx.config.enemy_animation;

    let patrol_animator = ctx.world.spawn((animator(0, &animations.patrol),));
    let attack_animator = ctx.world.spawn((animator(1, &animations.attack),));
    let enemy = ctx.world.spawn((
        Enemy {
            enemy_type,
            state: EnemyState::Patrol,
            health: profile.health,
            alive: true,
            patrol_animator,
            attack_animator,
        },
        profile.clone(),
        Transform::at(position),
        SpriteTint::default(),
        ctx.config.damage_flash,
        Billboard::default(),
        ListenerRole::Enemy,
    ));
    ctx.subscribe(enemy, &enemy_ai::ENEMY_SUBSCRIPTIONS);
    ctx.navigator
        .register_agent(enemy, position, profile.move_speed);
    ctx.physics
        .sync_collider(enemy, position, ENEMY_COLLIDER_RADIUS, HitTag::Enemy);

    enemy_ai::change_state(ctx, enemy, EnemyState::Patrol)?;
    log::debug!("spawned {enemy_type:?} at {position}");
    Ok(enemy)
}

pub fn spawn_pickup(
    ctx: &mut GameContext,
    kind: PickupKind,
    amount: f32,
    position: Vec3,
) -> Entity {
    let bob = ctx.config.pickup_bob;
    let collected_already = match kind {
        PickupKind::Weapon(weapon_type) => weapon_collected(ctx, weapon_type),
        PickupKind::Cash => false,
    };
    ctx.world.spawn((
        Pickup {
            kind,
            amount,
            active: !collected_already,
        },
        Transform::at(position),
        PingPongMovement::new(bob.direction, bob.speed, bob.travel_distance),
        Billboard::default(),
    ))
}

fn weapon_collected(ctx: &GameContext, weapon_type: WeaponType) -> bool {
    weapons::find_weapon(ctx, weapon_type)
        .and_then(|weapon| ctx.world.get::<&Weapon>(weapon).ok().map(|w| w.collected))
        .unwrap_or(false)
}
