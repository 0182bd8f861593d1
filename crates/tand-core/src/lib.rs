//! # tand-core
//!
//! Core types and configuration for the Solteq Tand data-access workspace.
//!
//! This crate provides the building blocks shared by the other crates:
//! - Identifier types (`Id`, `Cpr`)
//! - Configuration loading

pub mod config;
pub mod types;

pub use config::{AppConfig, DatabaseConfig};
pub use types::{Cpr, CprError, Id};
