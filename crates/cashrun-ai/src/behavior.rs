//! Per-state behavior tasks.
//!
//! Each enemy state owns one long-running task. The simulation resumes the
//! active task once per tick; a task never blocks. It reads the world
//! through a [`Perception`], drives the agent through [`Steering`], and
//! reports back in a [`Resume`]. Switching state replaces the task, so a
//! cancelled task is simply dropped and never observed again.

use cashrun_core::constants::{PATROL_ARRIVAL_DISTANCE, PATROL_TIMEOUT_SECS};
use cashrun_core::enums::EnemyState;
use glam::Vec3;

use crate::fsm::{evaluate, EnemyContext};
use crate::profiles::EnemyProfile;

/// Movement capability of a single navigation agent.
pub trait Steering {
    /// A random reachable point within `radius` of `center`, if any.
    fn sample_reachable_point(&mut self, center: Vec3, radius: f32) -> Option<Vec3>;
    fn set_move_target(&mut self, target: Vec3);
    fn stop_movement(&mut self);
}

/// What a task can see this tick.
#[derive(Debug, Clone, Copy)]
pub struct Perception {
    pub position: Vec3,
    pub player_position: Vec3,
    /// Simulated seconds since the previous resume.
    pub dt: f32,
}

impl Perception {
    pub fn distance_to_player(&self) -> f32 {
        self.position.distance(self.player_position)
    }
}

/// Result of resuming a task for one tick.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Resume {
    /// State the enemy should switch to. The task must not be resumed again.
    pub transition: Option<EnemyState>,
    /// The enemy struck the player this tick.
    pub strike: bool,
}

/// The running task of an enemy, one variant per state.
#[derive(Debug, Clone, PartialEq)]
pub enum Behavior {
    Patrol(PatrolTask),
    Chase(ChaseTask),
    Attack(AttackTask),
}

impl Behavior {
    /// Fresh task for entering `state`.
    pub fn for_state(state: EnemyState, profile: &EnemyProfile) -> Self {
        match state {
            EnemyState::Patrol => Behavior::Patrol(PatrolTask::default()),
            EnemyState::Chase => Behavior::Chase(ChaseTask::default()),
            EnemyState::Attack => Behavior::Attack(AttackTask::new(profile.recovery_delay)),
        }
    }

    pub fn state(&self) -> EnemyState {
        match self {
            Behavior::Patrol(_) => EnemyState::Patrol,
            Behavior::Chase(_) => EnemyState::Chase,
            Behavior::Attack(_) => EnemyState::Attack,
        }
    }

    pub fn resume(
        &mut self,
        profile: &EnemyProfile,
        perception: &Perception,
        steering: &mut dyn Steering,
    ) -> Resume {
        match self {
            Behavior::Patrol(task) => task.resume(profile, perception, steering),
            Behavior::Chase(task) => task.resume(profile, perception, steering),
            Behavior::Attack(task) => task.resume(profile, perception, steering),
        }
    }
}

/// Wander between random reachable points until the player comes close.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PatrolTask {
    started: bool,
    waypoint: Option<Vec3>,
    leg_elapsed: f32,
}

impl PatrolTask {
    pub fn waypoint(&self) -> Option<Vec3> {
        self.waypoint
    }

    pub fn resume(
        &mut self,
        profile: &EnemyProfile,
        perception: &Perception,
        steering: &mut dyn Steering,
    ) -> Resume {
        if !self.started {
            steering.stop_movement();
            self.started = true;
        }

        let leg_done = match self.waypoint {
            None => true,
            Some(waypoint) => {
                perception.position.distance(waypoint) <= PATROL_ARRIVAL_DISTANCE
                    || self.leg_elapsed >= PATROL_TIMEOUT_SECS
            }
        };

        if leg_done {
            self.leg_elapsed = 0.0;
            // A failed sample leaves no waypoint, so the next tick retries.
            self.waypoint =
                steering.sample_reachable_point(perception.position, profile.patrol_radius);
            match self.waypoint {
                Some(waypoint) => steering.set_move_target(waypoint),
                None => log::debug!("no reachable patrol point near {}", perception.position),
            }
        } else {
            self.leg_elapsed += perception.dt;
        }

        check_transition(EnemyState::Patrol, profile, perception)
    }
}

/// Follow the player's live position.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ChaseTask {
    started: bool,
}

impl ChaseTask {
    pub fn resume(
        &mut self,
        profile: &EnemyProfile,
        perception: &Perception,
        steering: &mut dyn Steering,
    ) -> Resume {
        if !self.started {
            steering.stop_movement();
            self.started = true;
        }
        steering.set_move_target(perception.player_position);
        check_transition(EnemyState::Chase, profile, perception)
    }
}

/// Stand still and strike once per recovery period.
#[derive(Debug, Clone, PartialEq)]
pub struct AttackTask {
    started: bool,
    since_strike: f32,
}

impl AttackTask {
    /// Starts fully recovered so the first strike lands on the first resume.
    pub fn new(recovery_delay: f32) -> Self {
        Self {
            started: false,
            since_strike: recovery_delay,
        }
    }

    pub fn resume(
        &mut self,
        profile: &EnemyProfile,
        perception: &Perception,
        steering: &mut dyn Steering,
    ) -> Resume {
        if !self.started {
            steering.stop_movement();
            self.started = true;
        } else {
            self.since_strike += perception.dt;
        }

        let resume = check_transition(EnemyState::Attack, profile, perception);
        if resume.transition.is_some() {
            return resume;
        }

        if self.since_strike >= profile.recovery_delay {
            self.since_strike = 0.0;
            return Resume {
                transition: None,
                strike: true,
            };
        }
        resume
    }
}

fn check_transition(state: EnemyState, profile: &EnemyProfile, perception: &Perception) -> Resume {
    let update = evaluate(&EnemyContext {
        state,
        distance_to_player: perception.distance_to_player(),
        chase_radius: profile.chase_radius,
        attack_radius: profile.attack_radius,
    });
    Resume {
        transition: update.state_changed.then_some(update.new_state),
        strike: false,
    }
}
