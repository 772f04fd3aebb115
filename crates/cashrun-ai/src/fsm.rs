//! Enemy state transition table.
//!
//! Pure functions that decide the next AI state from the current state and
//! the distance to the player. No ECS dependency, no navigation.

use cashrun_core::enums::EnemyState;

/// Input to the FSM for a single enemy.
pub struct EnemyContext {
    pub state: EnemyState,
    pub distance_to_player: f32,
    pub chase_radius: f32,
    pub attack_radius: f32,
}

/// Output from the FSM.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StateUpdate {
    pub new_state: EnemyState,
    pub state_changed: bool,
}

/// Evaluate the FSM for one enemy.
pub fn evaluate(ctx: &EnemyContext) -> StateUpdate {
    let next = match ctx.state {
        EnemyState::Patrol => evaluate_patrol(ctx),
        EnemyState::Chase => evaluate_chase(ctx),
        EnemyState::Attack => evaluate_attack(ctx),
    };

    match next {
        Some(new_state) => StateUpdate {
            new_state,
            state_changed: true,
        },
        None => StateUpdate {
            new_state: ctx.state,
            state_changed: false,
        },
    }
}

fn evaluate_patrol(ctx: &EnemyContext) -> Option<EnemyState> {
    (ctx.distance_to_player < ctx.chase_radius).then_some(EnemyState::Chase)
}

fn evaluate_chase(ctx: &EnemyContext) -> Option<EnemyState> {
    // Attack range wins when both radii are inverted in config.
    if ctx.distance_to_player < ctx.attack_radius {
        return Some(EnemyState::Attack);
    }
    if ctx.distance_to_player > ctx.chase_radius {
        return Some(EnemyState::Patrol);
    }
    None
}

fn evaluate_attack(ctx: &EnemyContext) -> Option<EnemyState> {
    if ctx.distance_to_player > ctx.chase_radius {
        return Some(EnemyState::Patrol);
    }
    if ctx.distance_to_player > ctx.attack_radius {
        return Some(EnemyState::Chase);
    }
    None
}
