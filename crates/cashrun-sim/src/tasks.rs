//! Scheduled task values and the per-tick driver that resumes them.

use hecs::Entity;

use cashrun_ai::behavior::Behavior;

use crate::context::GameContext;
use crate::systems::{animation, effects, enemy_ai, player, weapons};

/// Every kind of long-running work the simulation schedules.
#[derive(Debug, Clone, PartialEq)]
pub enum Task {
    /// Enemy AI state behavior.
    Behavior(Behavior),
    /// Weapon fire cooldown.
    FireRecovery { remaining: f32 },
    /// Sprite animation playback.
    Playback(animation::Playback),
    /// Enemy damage colour flash.
    ColorFlash(effects::FlashProgress),
    /// Player damage overlay.
    DamageOverlay { remaining: f32 },
    /// Player death countdown before the level restarts.
    Respawn { remaining: f32 },
}

/// Outcome of resuming a task for one tick.
#[derive(Debug, Clone, PartialEq)]
pub enum Step<T> {
    Pending(T),
    Done,
}

impl<T> Step<T> {
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Step<U> {
        match self {
            Step::Pending(task) => Step::Pending(f(task)),
            Step::Done => Step::Done,
        }
    }
}

/// Resume every task that was scheduled before this tick's pass began.
pub fn run(ctx: &mut GameContext) {
    for id in ctx.scheduler.pending_ids() {
        let Some((owner, task)) = ctx.scheduler.take(id) else {
            continue;
        };
        if !ctx.world.contains(owner) {
            ctx.scheduler.finish(id);
            continue;
        }
        match resume(ctx, owner, task) {
            Step::Pending(task) => {
                ctx.scheduler.park(id, task);
            }
            Step::Done => ctx.scheduler.finish(id),
        }
    }
}

fn resume(ctx: &mut GameContext, owner: Entity, task: Task) -> Step<Task> {
    match task {
        Task::Behavior(behavior) => {
            enemy_ai::resume_behavior(ctx, owner, behavior).map(Task::Behavior)
        }
        Task::FireRecovery { remaining } => weapons::resume_recovery(ctx, owner, remaining)
            .map(|remaining| Task::FireRecovery { remaining }),
        Task::Playback(playback) => {
            animation::resume_playback(ctx, owner, playback).map(Task::Playback)
        }
        Task::ColorFlash(progress) => {
            effects::resume_color_flash(ctx, owner, progress).map(Task::ColorFlash)
        }
        Task::DamageOverlay { remaining } => effects::resume_damage_overlay(ctx, owner, remaining)
            .map(|remaining| Task::DamageOverlay { remaining }),
        Task::Respawn { remaining } => player::resume_respawn(ctx, owner, remaining)
            .map(|remaining| Task::Respawn { remaining }),
    }
}
