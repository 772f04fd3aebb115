//! CASHRUN headless host.
//!
//! Wires the simulation crates to a game loop thread driven over channels.
//! The binary feeds it JSON commands from stdin and prints snapshots.

pub mod game_loop;
pub mod host;
pub mod logging;

pub use cashrun_core as core;
