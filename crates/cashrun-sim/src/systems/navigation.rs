//! Navigation sync: advance the navigator and copy agent positions back
//! into enemy transforms and hit spheres.

use cashrun_core::constants::ENEMY_COLLIDER_RADIUS;
use cashrun_core::enums::HitTag;
use cashrun_core::types::Transform;

use crate::components::Enemy;
use crate::context::GameContext;

pub fn run(ctx: &mut GameContext) {
    let dt = ctx.dt();
    ctx.navigator.advance(dt);
    for (entity, (_enemy, transform)) in ctx.world.query_mut::<(&Enemy, &mut Transform)>() {
        if let Some(position) = ctx.navigator.agent_position(entity) {
            transform.position = position;
        }
        ctx.physics
            .sync_collider(entity, transform.position, ENEMY_COLLIDER_RADIUS, HitTag::Enemy);
    }
}
