//! Timed visual effects: the enemy damage flash and the player damage
//! overlay.

use hecs::Entity;

use crate::components::{ColorFlash, Player, SpriteTint};
use crate::context::GameContext;
use crate::scheduler::Lane;
use crate::tasks::{Step, Task};

/// Which leg of the flash is running and how far into it.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct FlashProgress {
    returning: bool,
    elapsed: f32,
}

/// Flash `entity` from source to dest colour and back. Restarts a running
/// flash.
pub fn start_color_flash(ctx: &mut GameContext, entity: Entity) {
    if ctx.world.get::<&ColorFlash>(entity).is_err() {
        return;
    }
    ctx.scheduler.spawn(
        entity,
        Lane::Effect,
        Task::ColorFlash(FlashProgress::default()),
    );
}

pub fn resume_color_flash(
    ctx: &mut GameContext,
    entity: Entity,
    mut progress: FlashProgress,
) -> Step<FlashProgress> {
    let dt = ctx.dt();
    let Ok((flash, tint)) = ctx
        .world
        .query_one_mut::<(&ColorFlash, &mut SpriteTint)>(entity)
    else {
        return Step::Done;
    };

    progress.elapsed += dt;
    let (from, to) = if progress.returning {
        (flash.dest, flash.source)
    } else {
        (flash.source, flash.dest)
    };
    let t = if flash.transition_time > 0.0 {
        (progress.elapsed / flash.transition_time).min(1.0)
    } else {
        1.0
    };
    tint.color = from.lerp(to, t);

    if progress.elapsed < flash.transition_time {
        return Step::Pending(progress);
    }
    if progress.returning {
        return Step::Done;
    }
    progress.returning = true;
    progress.elapsed = 0.0;
    Step::Pending(progress)
}

/// Raise the player's damage overlay for `damage_interval` seconds.
pub fn show_damage_overlay(ctx: &mut GameContext, player: Entity) {
    let interval = {
        let Ok(mut p) = ctx.world.get::<&mut Player>(player) else {
            return;
        };
        p.show_damage = true;
        p.damage_interval
    };
    ctx.scheduler.spawn(
        player,
        Lane::Effect,
        Task::DamageOverlay {
            remaining: interval,
        },
    );
}

pub fn resume_damage_overlay(ctx: &mut GameContext, player: Entity, remaining: f32) -> Step<f32> {
    let remaining = remaining - ctx.dt();
    if remaining > 0.0 {
        return Step::Pending(remaining);
    }
    if let Ok(mut p) = ctx.world.get::<&mut Player>(player) {
        p.show_damage = false;
    }
    Step::Done
}
