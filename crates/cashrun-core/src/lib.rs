//! Core types and definitions for CASHRUN.
//!
//! This crate defines the vocabulary shared across all other crates:
//! events, commands, state snapshots, save documents, errors, constants,
//! and the notification bus. It has no dependency on the ECS or any host.

pub mod commands;
pub mod constants;
pub mod enums;
pub mod error;
pub mod events;
pub mod notify;
pub mod state;
pub mod types;

#[cfg(test)]
mod tests;
