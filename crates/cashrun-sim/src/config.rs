//! Game configuration: tuning values, the weapon ring and the level layout.
//!
//! Loaded from JSON where every field is optional, then validated once when
//! the engine is built. Bad values are rejected, never clamped.

use std::fs;
use std::path::{Path, PathBuf};

use glam::{Vec3, Vec4};
use serde::{Deserialize, Serialize};

use cashrun_ai::profiles::{get_profile, EnemyProfile};
use cashrun_core::constants::*;
use cashrun_core::enums::{EnemyType, PlaybackMode, WeaponType};
use cashrun_core::error::{GameError, GameResult};
use cashrun_core::types::Transform;

use crate::components::ColorFlash;

/// Everything needed to build and run a level.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// RNG seed for the built-in navigator. Same seed = same patrol routes.
    pub seed: u64,
    /// Emit audio events in snapshots.
    pub sfx_enabled: bool,
    pub save_path: PathBuf,
    pub player: PlayerConfig,
    /// Weapons in ring order. Each links to the next; the last links back.
    pub weapons: Vec<WeaponConfig>,
    /// Per-type overrides. Types not listed use the built-in profile.
    pub enemy_profiles: Vec<EnemyProfile>,
    pub enemy_animation: EnemyAnimationConfig,
    pub damage_flash: ColorFlash,
    pub head_bob: HeadBobConfig,
    pub pickup_bob: PingPongConfig,
    pub level: LevelConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerConfig {
    pub health: i32,
    pub cash_total: f32,
    pub respawn_time: f32,
    /// How long the damage overlay stays up.
    pub damage_interval: f32,
    pub eye_height: f32,
    pub pickup_radius: f32,
    /// Weapon equipped when the level starts.
    pub default_weapon: WeaponType,
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            health: PLAYER_START_HEALTH,
            cash_total: PLAYER_CASH_TOTAL,
            respawn_time: PLAYER_RESPAWN_SECS,
            damage_interval: PLAYER_DAMAGE_OVERLAY_SECS,
            eye_height: PLAYER_EYE_HEIGHT,
            pickup_radius: PICKUP_RADIUS,
            default_weapon: WeaponType::Punch,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeaponConfig {
    pub weapon_type: WeaponType,
    pub damage: i32,
    pub range: f32,
    /// -1 for unlimited.
    pub ammo: i32,
    pub recovery_delay: f32,
    /// Already picked up when the level starts.
    pub collected: bool,
    pub animation: AnimatorConfig,
}

impl WeaponConfig {
    pub fn punch() -> Self {
        Self {
            weapon_type: WeaponType::Punch,
            damage: 10,
            range: 1.5,
            ammo: -1,
            recovery_delay: 0.5,
            collected: true,
            animation: AnimatorConfig {
                fps: 10,
                frame_count: 3,
                ..AnimatorConfig::default()
            },
        }
    }

    pub fn gun() -> Self {
        Self {
            weapon_type: WeaponType::Gun,
            damage: 35,
            range: 50.0,
            ammo: 20,
            recovery_delay: 0.25,
            collected: false,
            animation: AnimatorConfig {
                fps: 15,
                frame_count: 3,
                ..AnimatorConfig::default()
            },
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(default)]
pub struct AnimatorConfig {
    pub fps: u32,
    pub frame_count: usize,
    pub mode: PlaybackMode,
    pub hide_on_start: bool,
}

impl Default for AnimatorConfig {
    fn default() -> Self {
        Self {
            fps: DEFAULT_ANIMATION_FPS,
            frame_count: 1,
            mode: PlaybackMode::PlayOnce,
            hide_on_start: true,
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(default)]
pub struct EnemyAnimationConfig {
    pub patrol: AnimatorConfig,
    pub attack: AnimatorConfig,
}

impl Default for EnemyAnimationConfig {
    fn default() -> Self {
        Self {
            patrol: AnimatorConfig {
                frame_count: 4,
                mode: PlaybackMode::PlayLoop,
                ..AnimatorConfig::default()
            },
            attack: AnimatorConfig {
                frame_count: 3,
                mode: PlaybackMode::PlayLoop,
                ..AnimatorConfig::default()
            },
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(default)]
pub struct HeadBobConfig {
    pub strength: f32,
    pub frequency: f32,
    pub neutral_y: f32,
}

impl Default for HeadBobConfig {
    fn default() -> Self {
        Self {
            strength: HEAD_BOB_STRENGTH,
            frequency: HEAD_BOB_FREQUENCY,
            neutral_y: HEAD_BOB_NEUTRAL_Y,
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(default)]
pub struct PingPongConfig {
    pub direction: Vec3,
    pub speed: f32,
    pub travel_distance: f32,
}

impl Default for PingPongConfig {
    fn default() -> Self {
        Self {
            direction: Vec3::Y,
            speed: PICKUP_BOB_SPEED,
            travel_distance: PICKUP_BOB_DISTANCE,
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct EnemySpawn {
    pub enemy_type: EnemyType,
    pub position: Vec3,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct CashSpawn {
    pub position: Vec3,
    pub amount: f32,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct WeaponPickupSpawn {
    pub weapon_type: WeaponType,
    pub position: Vec3,
}

/// Level layout.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct LevelConfig {
    pub player_start: Transform,
    pub enemies: Vec<EnemySpawn>,
    pub cash: Vec<CashSpawn>,
    pub weapon_pickups: Vec<WeaponPickupSpawn>,
}

impl LevelConfig {
    /// The stock level: fourteen cash bundles on a ring, a gun pickup and
    /// a handful of enemies guarding them.
    pub fn default_level() -> Self {
        let cash = (0..14)
            .map(|i| {
                let angle = i as f32 / 14.0 * std::f32::consts::TAU;
                CashSpawn {
                    position: Vec3::new(angle.cos() * 20.0, 0.5, angle.sin() * 20.0),
                    amount: CASH_PICKUP_AMOUNT,
                }
            })
            .collect();
        let enemies = vec![
            EnemySpawn {
                enemy_type: EnemyType::Drone,
                position: Vec3::new(15.0, 0.0, 0.0),
            },
            EnemySpawn {
                enemy_type: EnemyType::Drone,
                position: Vec3::new(-15.0, 0.0, 5.0),
            },
            EnemySpawn {
                enemy_type: EnemyType::Drone,
                position: Vec3::new(0.0, 0.0, -18.0),
            },
            EnemySpawn {
                enemy_type: EnemyType::ToughGuy,
                position: Vec3::new(10.0, 0.0, 18.0),
            },
            EnemySpawn {
                enemy_type: EnemyType::Boss,
                position: Vec3::new(-22.0, 0.0, -22.0),
            },
        ];
        Self {
            player_start: Transform::default(),
            enemies,
            cash,
            weapon_pickups: vec![WeaponPickupSpawn {
                weapon_type: WeaponType::Gun,
                position: Vec3::new(0.0, 0.5, 8.0),
            }],
        }
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            sfx_enabled: true,
            save_path: PathBuf::from(SAVE_FILE_NAME),
            player: PlayerConfig::default(),
            weapons: vec![WeaponConfig::punch(), WeaponConfig::gun()],
            enemy_profiles: Vec::new(),
            enemy_animation: EnemyAnimationConfig::default(),
            damage_flash: ColorFlash {
                source: Vec4::ONE,
                dest: Vec4::new(1.0, 0.0, 0.0, 1.0),
                transition_time: DAMAGE_FLASH_SECS,
            },
            head_bob: HeadBobConfig::default(),
            pickup_bob: PingPongConfig::default(),
            level: LevelConfig::default_level(),
        }
    }
}

impl GameConfig {
    /// Parse and validate a JSON config.
    pub fn from_json(json: &str) -> GameResult<Self> {
        let config: GameConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: &Path) -> GameResult<Self> {
        let json = fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// Profile for `enemy_type`: the configured override, else the default.
    pub fn enemy_profile(&self, enemy_type: EnemyType) -> EnemyProfile {
        self.enemy_profiles
            .iter()
            .find(|profile| profile.enemy_type == enemy_type)
            .cloned()
            .unwrap_or_else(|| get_profile(enemy_type))
    }

    pub fn validate(&self) -> GameResult<()> {
        let player = &self.player;
        if player.health <= 0 {
            return Err(invalid(format!(
                "player health must be positive, got {}",
                player.health
            )));
        }
        non_negative("player.cash_total", player.cash_total)?;
        non_negative("player.respawn_time", player.respawn_time)?;
        non_negative("player.damage_interval", player.damage_interval)?;
        non_negative("player.pickup_radius", player.pickup_radius)?;

        if self.weapons.is_empty() {
            return Err(invalid("weapon ring is empty".to_string()));
        }
        if !self
            .weapons
            .iter()
            .any(|w| w.weapon_type == player.default_weapon)
        {
            return Err(invalid(format!(
                "default weapon {:?} is not in the ring",
                player.default_weapon
            )));
        }
        for weapon in &self.weapons {
            let name = format!("{:?}", weapon.weapon_type);
            if weapon.ammo < -1 {
                return Err(invalid(format!(
                    "{name} ammo must be -1 (unlimited) or more, got {}",
                    weapon.ammo
                )));
            }
            if weapon.damage < 0 {
                return Err(invalid(format!(
                    "{name} damage must be non-negative, got {}",
                    weapon.damage
                )));
            }
            non_negative(&format!("{name}.range"), weapon.range)?;
            non_negative(&format!("{name}.recovery_delay"), weapon.recovery_delay)?;
            validate_animator(&format!("{name}.animation"), &weapon.animation)?;
        }

        for profile in &self.enemy_profiles {
            profile.validate()?;
        }
        validate_animator("enemy_animation.patrol", &self.enemy_animation.patrol)?;
        validate_animator("enemy_animation.attack", &self.enemy_animation.attack)?;

        non_negative("damage_flash.transition_time", self.damage_flash.transition_time)?;
        non_negative("head_bob.strength", self.head_bob.strength)?;
        non_negative("head_bob.frequency", self.head_bob.frequency)?;
        non_negative("pickup_bob.speed", self.pickup_bob.speed)?;
        non_negative("pickup_bob.travel_distance", self.pickup_bob.travel_distance)?;

        for spawn in &self.level.cash {
            non_negative("level.cash.amount", spawn.amount)?;
        }
        Ok(())
    }
}

fn invalid(message: String) -> GameError {
    GameError::InvalidConfig(message)
}

fn non_negative(name: &str, value: f32) -> GameResult<()> {
    if !value.is_finite() || value < 0.0 {
        return Err(invalid(format!(
            "{name} must be a non-negative number, got {value}"
        )));
    }
    Ok(())
}

fn validate_animator(name: &str, animator: &AnimatorConfig) -> GameResult<()> {
    if animator.fps == 0 {
        return Err(invalid(format!("{name}.fps must be at least 1")));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = GameConfig::default();
        assert!(config.validate().is_ok());
        let total: f32 = config.level.cash.iter().map(|c| c.amount).sum();
        assert_eq!(total, config.player.cash_total);
    }

    #[test]
    fn test_partial_json_fills_defaults() {
        let config = GameConfig::from_json(r#"{ "seed": 7, "player": { "health": 50 } }"#).unwrap();
        assert_eq!(config.seed, 7);
        assert_eq!(config.player.health, 50);
        assert_eq!(config.player.cash_total, PLAYER_CASH_TOTAL);
        assert_eq!(config.weapons.len(), 2);
    }

    #[test]
    fn test_zero_fps_rejected() {
        let mut config = GameConfig::default();
        config.weapons[1].animation.fps = 0;
        assert!(matches!(config.validate(), Err(GameError::InvalidConfig(_))));
    }

    #[test]
    fn test_negative_values_rejected() {
        let mut config = GameConfig::default();
        config.weapons[0].recovery_delay = -0.5;
        assert!(config.validate().is_err());

        let mut config = GameConfig::default();
        config.weapons[0].ammo = -2;
        assert!(config.validate().is_err());

        let mut config = GameConfig::default();
        config.pickup_bob.speed = -1.0;
        assert!(config.validate().is_err());

        let mut config = GameConfig::default();
        config.enemy_profiles.push(EnemyProfile {
            move_speed: -3.0,
            ..get_profile(EnemyType::Drone)
        });
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_empty_ring_rejected() {
        let config = GameConfig {
            weapons: Vec::new(),
            ..GameConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_profile_override() {
        let mut config = GameConfig::default();
        config.enemy_profiles.push(EnemyProfile {
            attack_radius: 0.1,
            ..get_profile(EnemyType::Drone)
        });
        assert_eq!(config.enemy_profile(EnemyType::Drone).attack_radius, 0.1);
        assert_eq!(
            config.enemy_profile(EnemyType::Boss),
            get_profile(EnemyType::Boss)
        );
    }

    #[test]
    fn test_malformed_json_is_serialization_error() {
        assert!(matches!(
            GameConfig::from_json("{ seed: }"),
            Err(GameError::Serialization(_))
        ));
    }
}
