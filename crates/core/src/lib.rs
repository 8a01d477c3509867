//! Core types and configuration for trove
//!
//! This crate contains domain types shared across all other crates.

mod artifact;
mod config;
pub mod constants;
mod coord;
mod env_config;
mod inventory;

pub use artifact::*;
pub use config::*;
pub use coord::*;
pub use env_config::*;
pub use inventory::*;
