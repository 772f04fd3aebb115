//! Simulation constants and tuning parameters.

/// Simulation tick rate (Hz).
pub const TICK_RATE: u32 = 30;

/// Seconds per tick.
pub const DT: f32 = 1.0 / TICK_RATE as f32;

// --- Enemy AI ---

/// Distance at which a patrol waypoint counts as reached (world units).
pub const PATROL_ARRIVAL_DISTANCE: f32 = 2.0;

/// Simulated seconds before an unreached patrol waypoint is abandoned.
pub const PATROL_TIMEOUT_SECS: f32 = 5.0;

/// Radius of the hit sphere registered for each enemy.
pub const ENEMY_COLLIDER_RADIUS: f32 = 0.5;

/// Duration of one leg of the damage colour flash (source -> dest).
pub const DAMAGE_FLASH_SECS: f32 = 1.0;

// --- Player ---

pub const PLAYER_START_HEALTH: i32 = 100;

/// Cash needed to complete the level.
pub const PLAYER_CASH_TOTAL: f32 = 1400.0;

/// Seconds between death and level restart.
pub const PLAYER_RESPAWN_SECS: f32 = 2.0;

/// Seconds the red damage overlay stays up after a hit.
pub const PLAYER_DAMAGE_OVERLAY_SECS: f32 = 0.2;

/// Height of the camera above the player origin. Weapon rays start here.
pub const PLAYER_EYE_HEIGHT: f32 = 1.0;

// --- Head bob ---

pub const HEAD_BOB_STRENGTH: f32 = 0.1;
pub const HEAD_BOB_FREQUENCY: f32 = 2.0;
pub const HEAD_BOB_NEUTRAL_Y: f32 = 1.0;

// --- Pickups ---

/// Cash granted by a single dollar pickup.
pub const CASH_PICKUP_AMOUNT: f32 = 100.0;

/// Distance at which the player collects a pickup.
pub const PICKUP_RADIUS: f32 = 1.0;

/// Pickup bobbing speed (units/second).
pub const PICKUP_BOB_SPEED: f32 = 0.5;

/// Pickup bobbing travel before reversing.
pub const PICKUP_BOB_DISTANCE: f32 = 0.25;

// --- Animation ---

pub const DEFAULT_ANIMATION_FPS: u32 = 5;

// --- Persistence ---

/// Default save document file name.
pub const SAVE_FILE_NAME: &str = "SaveGame.json";
