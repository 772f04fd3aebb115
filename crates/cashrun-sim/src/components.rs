//! ECS components for hecs entities.
//!
//! Components are plain data structs. Game logic lives in systems.
//! `cashrun_core::types::Transform` is used as the position component.

use glam::{Vec3, Vec4};
use hecs::Entity;
use serde::{Deserialize, Serialize};

use cashrun_core::constants::*;
use cashrun_core::enums::{EnemyState, EnemyType, PickupKind, PlaybackMode, WeaponType};

/// Which handler the bus routes a notification to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListenerRole {
    Manager,
    Player,
    Enemy,
    Weapon,
}

/// Level-wide bookkeeping owned by the game manager entity.
#[derive(Debug, Clone, Default)]
pub struct Manager {
    pub enemies_destroyed: u32,
}

/// Enemy marker and combat state. AI tuning lives in `EnemyProfile`.
#[derive(Debug, Clone)]
pub struct Enemy {
    pub enemy_type: EnemyType,
    pub state: EnemyState,
    pub health: i32,
    /// Cleared exactly once, on the killing blow.
    pub alive: bool,
    pub patrol_animator: Entity,
    pub attack_animator: Entity,
}

/// A weapon in the player's ring.
#[derive(Debug, Clone)]
pub struct Weapon {
    pub weapon_type: WeaponType,
    pub damage: i32,
    pub range: f32,
    /// Remaining ammunition. -1 means unlimited.
    pub ammo: i32,
    pub recovery_delay: f32,
    pub collected: bool,
    pub equipped: bool,
    pub can_fire: bool,
    /// Successor in the ring.
    pub next_weapon: Option<Entity>,
    pub default_sprite_visible: bool,
}

impl Weapon {
    pub fn has_ammo(&self) -> bool {
        self.ammo != 0
    }
}

/// The player's gameplay state.
#[derive(Debug, Clone)]
pub struct Player {
    pub health: i32,
    pub cash: f32,
    pub cash_total: f32,
    pub active_weapon: Option<Entity>,
    /// Latched once the completion notification is sent; re-armed when cash
    /// drops back below the total.
    pub completion_sent: bool,
    /// Latched on death so `PlayerDied` is sent once.
    pub dead: bool,
    pub show_damage: bool,
    pub respawn_time: f32,
    pub damage_interval: f32,
    pub eye_height: f32,
    pub pickup_radius: f32,
}

/// A flip-book of sprites. `frames[i]` is the visibility of frame `i`.
#[derive(Debug, Clone)]
pub struct SpriteAnimator {
    pub animation_id: u32,
    pub mode: PlaybackMode,
    pub fps: u32,
    pub frames: Vec<bool>,
    pub hide_on_start: bool,
    pub playing: bool,
}

impl SpriteAnimator {
    pub fn new(animation_id: u32, mode: PlaybackMode, fps: u32, frame_count: usize) -> Self {
        Self {
            animation_id,
            mode,
            fps,
            frames: vec![false; frame_count],
            hide_on_start: true,
            playing: false,
        }
    }

    /// Seconds each frame stays visible.
    pub fn frame_delay(&self) -> f32 {
        1.0 / self.fps.max(1) as f32
    }

    pub fn visible_frame(&self) -> Option<usize> {
        self.frames.iter().position(|visible| *visible)
    }

    pub fn hide_all(&mut self) {
        self.frames.iter_mut().for_each(|frame| *frame = false);
    }
}

/// Current sprite colour.
#[derive(Debug, Clone, Copy)]
pub struct SpriteTint {
    pub color: Vec4,
}

impl Default for SpriteTint {
    fn default() -> Self {
        Self { color: Vec4::ONE }
    }
}

/// Two-leg colour flash played when an enemy takes damage.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct ColorFlash {
    pub source: Vec4,
    pub dest: Vec4,
    pub transition_time: f32,
}

impl Default for ColorFlash {
    fn default() -> Self {
        Self {
            source: Vec4::ONE,
            dest: Vec4::new(1.0, 0.0, 0.0, 1.0),
            transition_time: DAMAGE_FLASH_SECS,
        }
    }
}

/// A collectable power-up.
#[derive(Debug, Clone, Copy)]
pub struct Pickup {
    pub kind: PickupKind,
    /// Cash granted for `PickupKind::Cash`.
    pub amount: f32,
    pub active: bool,
}

/// Back-and-forth motion along a fixed direction.
#[derive(Debug, Clone, Copy)]
pub struct PingPongMovement {
    /// Unit direction of the current leg.
    pub direction: Vec3,
    pub speed: f32,
    pub travel_distance: f32,
    pub travelled: f32,
}

impl PingPongMovement {
    pub fn new(direction: Vec3, speed: f32, travel_distance: f32) -> Self {
        Self {
            direction: direction.normalize_or_zero(),
            speed,
            travel_distance,
            travelled: 0.0,
        }
    }
}

/// Camera bob while the player moves.
#[derive(Debug, Clone, Copy)]
pub struct HeadBob {
    pub strength: f32,
    pub frequency: f32,
    pub neutral_y: f32,
    pub elapsed: f32,
    pub camera_y: f32,
}

impl Default for HeadBob {
    fn default() -> Self {
        Self {
            strength: HEAD_BOB_STRENGTH,
            frequency: HEAD_BOB_FREQUENCY,
            neutral_y: HEAD_BOB_NEUTRAL_Y,
            elapsed: 0.0,
            camera_y: HEAD_BOB_NEUTRAL_Y,
        }
    }
}

/// Sprite that turns to face the camera around the vertical axis.
#[derive(Debug, Clone, Copy, Default)]
pub struct Billboard {
    pub yaw: f32,
}
