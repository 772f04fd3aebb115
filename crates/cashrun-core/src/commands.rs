//! Commands sent from the host to the simulation.
//!
//! Commands are queued and processed at the next tick boundary.

use serde::{Deserialize, Serialize};

use crate::types::Transform;

/// All host-driven actions.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum PlayerCommand {
    // --- Player input ---
    /// Host-side character controller moved or turned the player.
    SetPlayerTransform { transform: Transform },
    /// Raw movement axes this frame, used for head bob.
    SetMovementInput { horizontal: f32, vertical: f32 },
    /// Fire button held.
    Fire,
    /// Cycle to the next usable weapon.
    EquipNextWeapon,

    // --- Game control ---
    SetInputAllowed { allowed: bool },
    SaveGame,
    LoadGame,
    RestartGame,
    ExitGame,
}
