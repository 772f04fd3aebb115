//! Sprite animator: shows one frame at a time on the scheduler.
//!
//! Playback is a task in the owner's `Animation` lane. `PlayOnce` ends by
//! stopping itself, which publishes `AnimationStopped`; `PlayLoop` runs
//! until someone calls [`stop`].

use hecs::Entity;

use cashrun_core::enums::PlaybackMode;
use cashrun_core::events::GameEvent;

use crate::components::SpriteAnimator;
use crate::context::GameContext;
use crate::scheduler::Lane;
use crate::tasks::{Step, Task};

/// Playback cursor.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Playback {
    frame: usize,
    showing: bool,
    remaining: f32,
}

/// Start playback from the first frame. Restarting a running animator
/// replaces its playback.
pub fn play(ctx: &mut GameContext, entity: Entity) -> bool {
    {
        let Ok(mut animator) = ctx.world.get::<&mut SpriteAnimator>(entity) else {
            return false;
        };
        if animator.hide_on_start {
            animator.hide_all();
        }
        animator.playing = true;
    }
    ctx.scheduler
        .spawn(entity, Lane::Animation, Task::Playback(Playback::default()));
    true
}

/// Stop playback. Publishes `AnimationStopped` only if it was playing.
pub fn stop(ctx: &mut GameContext, entity: Entity) -> bool {
    let animation_id = {
        let Ok(mut animator) = ctx.world.get::<&mut SpriteAnimator>(entity) else {
            return false;
        };
        if !animator.playing {
            return false;
        }
        animator.playing = false;
        animator.animation_id
    };
    ctx.scheduler.cancel_lane(entity, Lane::Animation);
    ctx.publish(entity, GameEvent::AnimationStopped { animation_id });
    true
}

pub fn hide_all(ctx: &mut GameContext, entity: Entity) {
    if let Ok(mut animator) = ctx.world.get::<&mut SpriteAnimator>(entity) {
        animator.hide_all();
    }
}

pub fn resume_playback(
    ctx: &mut GameContext,
    entity: Entity,
    mut playback: Playback,
) -> Step<Playback> {
    let dt = ctx.dt();
    let finished = {
        let Ok(mut animator) = ctx.world.get::<&mut SpriteAnimator>(entity) else {
            return Step::Done;
        };
        advance(&mut animator, &mut playback, dt)
    };
    if finished {
        stop(ctx, entity);
        return Step::Done;
    }
    Step::Pending(playback)
}

/// Move the cursor forward by `dt`. Returns true when a `PlayOnce`
/// animation has shown its last frame.
fn advance(animator: &mut SpriteAnimator, playback: &mut Playback, dt: f32) -> bool {
    let frame_count = animator.frames.len();
    if frame_count == 0 {
        return animator.mode == PlaybackMode::PlayOnce;
    }

    if !playback.showing {
        animator.frames[playback.frame] = true;
        playback.showing = true;
        playback.remaining = animator.frame_delay();
        return false;
    }

    playback.remaining -= dt;
    if playback.remaining > 0.0 {
        return false;
    }

    animator.frames[playback.frame] = false;
    playback.frame += 1;
    if playback.frame >= frame_count {
        if animator.mode == PlaybackMode::PlayOnce {
            playback.showing = false;
            return true;
        }
        playback.frame = 0;
    }
    animator.frames[playback.frame] = true;
    playback.remaining = animator.frame_delay();
    false
}
