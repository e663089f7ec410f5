//! I/O helpers for catalog commands.

pub mod config;
