//! Error types shared by every CASHRUN crate.

use thiserror::Error;

/// Errors surfaced to callers of the simulation.
#[derive(Error, Debug)]
pub enum GameError {
    /// Configuration rejected at construction time.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// A state transition named a state index that does not exist.
    #[error("unknown enemy state index {0}")]
    UnknownEnemyState(u8),

    /// A weapon index that does not exist.
    #[error("unknown weapon type index {0}")]
    UnknownWeaponType(u8),

    /// The entity is gone or never carried the expected components.
    #[error("entity not found: {0}")]
    EntityNotFound(String),

    /// A weapon's successor link points at nothing.
    #[error("weapon ring is broken: {0}")]
    BrokenWeaponRing(String),

    /// The ring is intact but no weapon in it would equip.
    #[error("no equippable weapon in a ring of {0}")]
    NoEquippableWeapon(usize),

    /// Save document could not be read or written.
    #[error("save I/O failed: {0}")]
    Io(#[from] std::io::Error),

    /// Save document or config is not valid JSON for the expected shape.
    #[error("malformed document: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Result type for simulation operations.
pub type GameResult<T> = Result<T, GameError>;
