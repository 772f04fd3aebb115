//! Snapshots handed to the host each tick, and the save document.

use glam::{Vec3, Vec4};
use serde::{Deserialize, Serialize};

use crate::enums::*;
use crate::events::{AudioEvent, EventKind};
use crate::types::{SimTime, Transform};

/// Flat save document: player transform, health, cash and which weapons
/// have been picked up. Written and read as one unit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SaveState {
    pub x: f32,
    pub y: f32,
    pub z: f32,
    pub rot_x: f32,
    pub rot_y: f32,
    pub rot_z: f32,
    pub scale_x: f32,
    pub scale_y: f32,
    pub scale_z: f32,
    pub health: i32,
    pub cash: f32,
    #[serde(default)]
    pub collected_punch: bool,
    #[serde(default)]
    pub collected_gun: bool,
}

impl Default for SaveState {
    fn default() -> Self {
        let mut state = Self {
            x: 0.0,
            y: 0.0,
            z: 0.0,
            rot_x: 0.0,
            rot_y: 0.0,
            rot_z: 0.0,
            scale_x: 0.0,
            scale_y: 0.0,
            scale_z: 0.0,
            health: 0,
            cash: 0.0,
            collected_punch: false,
            collected_gun: false,
        };
        state.set_transform(&Transform::default());
        state
    }
}

impl SaveState {
    pub fn transform(&self) -> Transform {
        Transform {
            position: Vec3::new(self.x, self.y, self.z),
            rotation: Vec3::new(self.rot_x, self.rot_y, self.rot_z),
            scale: Vec3::new(self.scale_x, self.scale_y, self.scale_z),
        }
    }

    pub fn set_transform(&mut self, transform: &Transform) {
        self.x = transform.position.x;
        self.y = transform.position.y;
        self.z = transform.position.z;
        self.rot_x = transform.rotation.x;
        self.rot_y = transform.rotation.y;
        self.rot_z = transform.rotation.z;
        self.scale_x = transform.scale.x;
        self.scale_y = transform.scale.y;
        self.scale_z = transform.scale.z;
    }

    pub fn collected(&self, weapon_type: WeaponType) -> bool {
        match weapon_type {
            WeaponType::Punch => self.collected_punch,
            WeaponType::Gun => self.collected_gun,
        }
    }

    pub fn set_collected(&mut self, weapon_type: WeaponType, collected: bool) {
        match weapon_type {
            WeaponType::Punch => self.collected_punch = collected,
            WeaponType::Gun => self.collected_gun = collected,
        }
    }
}

/// Complete game state sent to the host after every tick.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameStateSnapshot {
    pub time: SimTime,
    pub phase: GamePhase,
    pub input_allowed: bool,
    pub player: Option<PlayerView>,
    pub enemies: Vec<EnemyView>,
    pub weapons: Vec<WeaponView>,
    pub pickups: Vec<PickupView>,
    pub enemies_destroyed: u32,
    /// Audio cues raised during this tick.
    pub audio_events: Vec<AudioEvent>,
    /// Kinds of every notification published during this tick, in order.
    pub notifications: Vec<EventKind>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlayerView {
    pub transform: Transform,
    pub health: i32,
    pub cash: f32,
    pub cash_total: f32,
    pub active_weapon: Option<WeaponType>,
    /// Red damage overlay visible.
    pub show_damage: bool,
    /// Camera height after head bob.
    pub camera_y: f32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EnemyView {
    pub id: u64,
    pub enemy_type: EnemyType,
    pub state: EnemyState,
    pub health: i32,
    pub position: Vec3,
    /// Sprite tint (rgba), animated by the damage flash.
    pub tint: Vec4,
    /// Yaw (radians) that turns the sprite toward the player camera.
    pub billboard_yaw: f32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeaponView {
    pub id: u64,
    pub weapon_type: WeaponType,
    pub ammo: i32,
    pub collected: bool,
    pub equipped: bool,
    pub can_fire: bool,
    pub default_sprite_visible: bool,
    /// Index of the fire-animation frame currently shown, if any.
    pub visible_frame: Option<usize>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PickupView {
    pub id: u64,
    pub kind: PickupKind,
    pub position: Vec3,
    pub active: bool,
}
