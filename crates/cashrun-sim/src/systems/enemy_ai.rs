//! Enemy AI system: state changes, behavior resumption, damage and death.
//!
//! Each enemy runs exactly one behavior task in its `Behavior` lane.
//! Changing state cancels that task before starting the next, so an old
//! state's work never runs after the switch.

use glam::Vec3;
use hecs::Entity;

use cashrun_ai::behavior::{Behavior, Perception, Steering};
use cashrun_ai::profiles::EnemyProfile;
use cashrun_core::enums::{EnemyState, EnemyType};
use cashrun_core::error::{GameError, GameResult};
use cashrun_core::events::{AudioEvent, EventKind, GameEvent};
use cashrun_core::notify::Notification;
use cashrun_core::types::Transform;

use crate::collaborators::Navigator;
use crate::components::Enemy;
use crate::context::GameContext;
use crate::scheduler::Lane;
use crate::systems::{animation, effects};
use crate::tasks::{Step, Task};

/// Kinds every enemy listens to. Enemies only react to their own.
pub const ENEMY_SUBSCRIPTIONS: [EventKind; 3] =
    [EventKind::Patrol, EventKind::Chase, EventKind::Attack];

/// One navigation agent seen through the `Steering` interface.
struct AgentSteering<'a> {
    navigator: &'a mut dyn Navigator,
    agent: Entity,
}

impl Steering for AgentSteering<'_> {
    fn sample_reachable_point(&mut self, center: Vec3, radius: f32) -> Option<Vec3> {
        self.navigator.sample_reachable_point(center, radius)
    }

    fn set_move_target(&mut self, target: Vec3) {
        self.navigator.set_move_target(self.agent, target);
    }

    fn stop_movement(&mut self) {
        self.navigator.stop_movement(self.agent);
    }
}

/// Switch `enemy` to `state`: cancel the running behavior, stop the agent,
/// start the new behavior and announce the state on the bus.
pub fn change_state(ctx: &mut GameContext, enemy: Entity, state: EnemyState) -> GameResult<()> {
    {
        let mut e = ctx
            .world
            .get::<&mut Enemy>(enemy)
            .map_err(|_| GameError::EntityNotFound(format!("enemy {enemy:?}")))?;
        if !e.alive {
            return Err(GameError::EntityNotFound(format!("enemy {enemy:?} is dead")));
        }
        e.state = state;
    }
    let profile = profile_of(ctx, enemy)?;

    ctx.scheduler.cancel_lane(enemy, Lane::Behavior);
    // Entry halts the agent now, before the next navigation step.
    ctx.navigator.stop_movement(enemy);
    ctx.scheduler.spawn(
        enemy,
        Lane::Behavior,
        Task::Behavior(Behavior::for_state(state, &profile)),
    );
    log::debug!("{enemy:?} entered {state:?}");
    ctx.publish(enemy, GameEvent::state_entered(state));
    Ok(())
}

/// [`change_state`] from a raw state index, as stored by external tools.
pub fn change_state_by_index(ctx: &mut GameContext, enemy: Entity, index: u8) -> GameResult<()> {
    let state = EnemyState::try_from(index)?;
    change_state(ctx, enemy, state)
}

fn profile_of(ctx: &GameContext, enemy: Entity) -> GameResult<EnemyProfile> {
    ctx.world
        .get::<&EnemyProfile>(enemy)
        .map(|profile| (*profile).clone())
        .map_err(|_| GameError::EntityNotFound(format!("profile of enemy {enemy:?}")))
}

pub fn resume_behavior(
    ctx: &mut GameContext,
    enemy: Entity,
    mut behavior: Behavior,
) -> Step<Behavior> {
    // No player in the scene: nothing to react to.
    let Some(player) = ctx.player_transform() else {
        return Step::Pending(behavior);
    };
    let Ok(position) = ctx.world.get::<&Transform>(enemy).map(|t| t.position) else {
        return Step::Done;
    };
    let Ok(profile) = profile_of(ctx, enemy) else {
        return Step::Done;
    };

    let perception = Perception {
        position,
        player_position: player.position,
        dt: ctx.dt(),
    };
    let outcome = {
        let mut steering = AgentSteering {
            navigator: ctx.navigator.as_mut(),
            agent: enemy,
        };
        behavior.resume(&profile, &perception, &mut steering)
    };

    if let Some(next) = outcome.transition {
        if let Err(err) = change_state(ctx, enemy, next) {
            log::warn!("state change to {next:?} failed: {err}");
        }
        return Step::Done;
    }
    if outcome.strike {
        log::debug!("{enemy:?} strikes for {}", profile.attack_damage);
        ctx.publish(
            enemy,
            GameEvent::Strike {
                damage: profile.attack_damage,
            },
        );
    }
    Step::Pending(behavior)
}

/// Swap animations when this enemy announces its own state change.
pub fn on_notification(ctx: &mut GameContext, enemy: Entity, note: &Notification<Entity>) {
    if note.sender != enemy {
        return;
    }
    match note.event {
        GameEvent::Patrol | GameEvent::Chase => switch_animation(ctx, enemy, false),
        GameEvent::Attack => switch_animation(ctx, enemy, true),
        _ => {}
    }
}

fn switch_animation(ctx: &mut GameContext, enemy: Entity, attacking: bool) {
    let (patrol, attack) = match ctx.world.get::<&Enemy>(enemy) {
        Ok(e) => (e.patrol_animator, e.attack_animator),
        Err(_) => return,
    };
    let (hidden, shown) = if attacking {
        (patrol, attack)
    } else {
        (attack, patrol)
    };
    animation::stop(ctx, hidden);
    animation::hide_all(ctx, hidden);
    animation::play(ctx, shown);
}

/// Apply weapon damage. Returns true if this blow killed the enemy; blows
/// against a dead or despawned enemy do nothing.
pub fn apply_damage(ctx: &mut GameContext, enemy: Entity, amount: i32) -> bool {
    let killed = {
        let Ok(mut e) = ctx.world.get::<&mut Enemy>(enemy) else {
            return false;
        };
        if !e.alive {
            return false;
        }
        e.health -= amount;
        log::debug!("{enemy:?} took {amount} damage, {} left", e.health);
        if e.health <= 0 {
            e.alive = false;
            true
        } else {
            false
        }
    };

    if killed {
        destroy(ctx, enemy);
    } else {
        effects::start_color_flash(ctx, enemy);
    }
    killed
}

fn destroy(ctx: &mut GameContext, enemy: Entity) {
    let Ok((enemy_type, animators)) = ctx
        .world
        .get::<&Enemy>(enemy)
        .map(|e| (e.enemy_type, [e.patrol_animator, e.attack_animator]))
    else {
        return;
    };

    ctx.scheduler.cancel_owner(enemy);
    for animator in animators {
        ctx.scheduler.cancel_owner(animator);
    }
    ctx.navigator.remove_agent(enemy);
    ctx.physics.remove_collider(enemy);

    log::info!("{enemy_type:?} destroyed");
    ctx.play_sound(AudioEvent::EnemyDestroyed { enemy_type });
    ctx.publish(enemy, GameEvent::EnemyDestroyed { enemy_type });

    for entity in animators.into_iter().chain([enemy]) {
        let _ = ctx.world.despawn(entity);
    }
    let evicted = ctx.compact_listeners();
    log::trace!("evicted {evicted} listener registrations");
}

/// Enemy type and state, if `enemy` is alive.
pub fn enemy_status(ctx: &GameContext, enemy: Entity) -> Option<(EnemyType, EnemyState)> {
    let e = ctx.world.get::<&Enemy>(enemy).ok()?;
    e.alive.then_some((e.enemy_type, e.state))
}
