//! Type-specific enemy profiles.
//!
//! Consolidates per-type tuning for the enemy FSM and combat.

use cashrun_core::enums::EnemyType;
use cashrun_core::error::{GameError, GameResult};
use serde::{Deserialize, Serialize};

/// Tuning for one enemy type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnemyProfile {
    pub enemy_type: EnemyType,
    /// Starting health.
    pub health: i32,
    /// Damage dealt to the player per strike.
    pub attack_damage: i32,
    /// Seconds between strikes.
    pub recovery_delay: f32,
    /// How far from its current position the enemy wanders on patrol.
    pub patrol_radius: f32,
    /// Player closer than this is chased.
    pub chase_radius: f32,
    /// Player closer than this is attacked.
    pub attack_radius: f32,
    /// Navigation speed (units/second).
    pub move_speed: f32,
}

/// Get the default profile for a given enemy type.
pub fn get_profile(enemy_type: EnemyType) -> EnemyProfile {
    match enemy_type {
        EnemyType::Drone => EnemyProfile {
            enemy_type,
            health: 100,
            attack_damage: 10,
            recovery_delay: 1.0,
            patrol_radius: 10.0,
            chase_radius: 10.0,
            attack_radius: 1.0,
            move_speed: 3.5,
        },
        EnemyType::ToughGuy => EnemyProfile {
            enemy_type,
            health: 200,
            attack_damage: 15,
            recovery_delay: 1.5,
            patrol_radius: 8.0,
            chase_radius: 12.0,
            attack_radius: 1.5,
            move_speed: 2.5,
        },
        EnemyType::Boss => EnemyProfile {
            enemy_type,
            health: 500,
            attack_damage: 25,
            recovery_delay: 2.0,
            patrol_radius: 5.0,
            chase_radius: 15.0,
            attack_radius: 2.0,
            move_speed: 2.0,
        },
    }
}

impl EnemyProfile {
    /// Reject negative or non-finite tuning values.
    pub fn validate(&self) -> GameResult<()> {
        let checks = [
            ("recovery_delay", self.recovery_delay),
            ("patrol_radius", self.patrol_radius),
            ("chase_radius", self.chase_radius),
            ("attack_radius", self.attack_radius),
            ("move_speed", self.move_speed),
        ];
        for (name, value) in checks {
            if !value.is_finite() || value < 0.0 {
                return Err(GameError::InvalidConfig(format!(
                    "{:?} {name} must be a non-negative number, got {value}",
                    self.enemy_type
                )));
            }
        }
        if self.health <= 0 {
            return Err(GameError::InvalidConfig(format!(
                "{:?} health must be positive, got {}",
                self.enemy_type, self.health
            )));
        }
        if self.attack_damage < 0 {
            return Err(GameError::InvalidConfig(format!(
                "{:?} attack_damage must be non-negative, got {}",
                self.enemy_type, self.attack_damage
            )));
        }
        Ok(())
    }
}
