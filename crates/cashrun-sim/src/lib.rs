//! Simulation engine for CASHRUN.
//!
//! Owns the hecs ECS world, the notification bus and the task scheduler.
//! Runs every system once per tick and produces `GameStateSnapshot`s.
//! Completely headless: navigation, physics and save storage are injected.

pub mod collaborators;
pub mod components;
pub mod config;
pub mod context;
pub mod engine;
pub mod persistence;
pub mod scheduler;
pub mod systems;
pub mod tasks;
pub mod world_setup;

pub use engine::{Collaborators, SimulationEngine};
