//! Neon Beats CLI library.
//!
//! This crate provides the command implementations behind the `neonbeats`
//! binary, plus the configuration, history and logging layers they share.

pub mod commands;
pub mod config;
pub mod history;
pub mod logging;
