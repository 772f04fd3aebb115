//! Enemy AI for CASHRUN.
//!
//! Implements the Patrol / Chase / Attack state machine, the per-state
//! behavior tasks the simulation resumes every tick, and per-type profiles.

pub mod behavior;
pub mod fsm;
pub mod profiles;

pub use cashrun_core as core;

#[cfg(test)]
mod tests;
