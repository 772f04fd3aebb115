//! Enumeration types used throughout the simulation.

use serde::{Deserialize, Serialize};

use crate::error::GameError;

/// Enemy archetype.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EnemyType {
    Drone,
    ToughGuy,
    Boss,
}

/// Enemy AI state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EnemyState {
    /// Wandering between random reachable points.
    #[default]
    Patrol,
    /// Following the player's live position.
    Chase,
    /// Standing still and striking on a recovery timer.
    Attack,
}

/// Weapon kind. A weapon only equips when asked for its own kind.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WeaponType {
    #[default]
    Punch,
    Gun,
}

/// Sprite animation playback type.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum PlaybackMode {
    /// Run through the frames once, then stop.
    #[default]
    PlayOnce,
    /// Repeat until explicitly stopped.
    PlayLoop,
}

/// Tag carried by anything a weapon ray can hit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HitTag {
    Enemy,
    Player,
    Pickup,
    Scenery,
}

/// Collectable power-up kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PickupKind {
    Cash,
    Weapon(WeaponType),
}

/// Game phase (top-level state).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    #[default]
    Playing,
    /// Player died; waiting for the respawn timer.
    PlayerDead,
    /// All cash collected.
    LevelComplete,
    /// Host asked to quit.
    Exited,
}

impl TryFrom<u8> for EnemyState {
    type Error = GameError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(EnemyState::Patrol),
            1 => Ok(EnemyState::Chase),
            2 => Ok(EnemyState::Attack),
            other => Err(GameError::UnknownEnemyState(other)),
        }
    }
}

impl TryFrom<u8> for WeaponType {
    type Error = GameError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(WeaponType::Punch),
            1 => Ok(WeaponType::Gun),
            other => Err(GameError::UnknownWeaponType(other)),
        }
    }
}
