//! Notifications carried by the bus, and audio cues for the host.

use serde::{Deserialize, Serialize};

use crate::enums::*;

/// Subscription key. One per `GameEvent` variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EventKind {
    Patrol,
    Chase,
    Attack,
    Strike,
    EnemyDestroyed,
    WeaponChange,
    AmmoExpired,
    AnimationStopped,
    PlayerDamaged,
    PlayerDied,
    CashCollected,
    PowerupCollected,
    InputChanged,
    SaveGamePrepare,
    LoadGameComplete,
    RestartGame,
    ExitGame,
    SaveGame,
    LoadGame,
}

/// A typed notification payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum GameEvent {
    /// Enemy entered Patrol.
    Patrol,
    /// Enemy entered Chase.
    Chase,
    /// Enemy entered Attack.
    Attack,
    /// Enemy landed a blow; whoever owns the player applies the damage.
    Strike { damage: i32 },
    EnemyDestroyed { enemy_type: EnemyType },
    /// A weapon was equipped. Every other weapon de-equips itself.
    WeaponChange { weapon_type: WeaponType },
    AmmoExpired { weapon_type: WeaponType },
    AnimationStopped { animation_id: u32 },
    PlayerDamaged { amount: i32, health: i32 },
    PlayerDied,
    CashCollected { cash: f32 },
    PowerupCollected { kind: PickupKind },
    InputChanged { allowed: bool },
    SaveGamePrepare,
    LoadGameComplete,
    RestartGame,
    ExitGame,
    SaveGame,
    LoadGame,
}

impl GameEvent {
    pub fn kind(&self) -> EventKind {
        match self {
            GameEvent::Patrol => EventKind::Patrol,
            GameEvent::Chase => EventKind::Chase,
            GameEvent::Attack => EventKind::Attack,
            GameEvent::Strike { .. } => EventKind::Strike,
            GameEvent::EnemyDestroyed { .. } => EventKind::EnemyDestroyed,
            GameEvent::WeaponChange { .. } => EventKind::WeaponChange,
            GameEvent::AmmoExpired { .. } => EventKind::AmmoExpired,
            GameEvent::AnimationStopped { .. } => EventKind::AnimationStopped,
            GameEvent::PlayerDamaged { .. } => EventKind::PlayerDamaged,
            GameEvent::PlayerDied => EventKind::PlayerDied,
            GameEvent::CashCollected { .. } => EventKind::CashCollected,
            GameEvent::PowerupCollected { .. } => EventKind::PowerupCollected,
            GameEvent::InputChanged { .. } => EventKind::InputChanged,
            GameEvent::SaveGamePrepare => EventKind::SaveGamePrepare,
            GameEvent::LoadGameComplete => EventKind::LoadGameComplete,
            GameEvent::RestartGame => EventKind::RestartGame,
            GameEvent::ExitGame => EventKind::ExitGame,
            GameEvent::SaveGame => EventKind::SaveGame,
            GameEvent::LoadGame => EventKind::LoadGame,
        }
    }

    /// The notification an enemy publishes on entering `state`.
    pub fn state_entered(state: EnemyState) -> Self {
        match state {
            EnemyState::Patrol => GameEvent::Patrol,
            EnemyState::Chase => GameEvent::Chase,
            EnemyState::Attack => GameEvent::Attack,
        }
    }
}

/// Audio events for the host sound system. Fire-and-forget.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum AudioEvent {
    /// Weapon swung or fired (guns always, fists only on contact).
    WeaponFired { weapon_type: WeaponType },
    EnemyDestroyed { enemy_type: EnemyType },
    PickupCollected { kind: PickupKind },
}
