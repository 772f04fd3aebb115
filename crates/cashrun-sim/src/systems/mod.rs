//! ECS systems that operate on the game context each tick.
//!
//! Systems are free functions over `&mut GameContext` (or `&mut World` when
//! they need nothing else). They do not own state: all state lives in
//! components, scheduled tasks, or the context itself.

pub mod animation;
pub mod effects;
pub mod enemy_ai;
pub mod manager;
pub mod motion;
pub mod navigation;
pub mod pickups;
pub mod player;
pub mod snapshot;
pub mod weapons;
