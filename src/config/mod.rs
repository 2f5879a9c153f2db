// src/config/mod.rs

//! Configuration loading and validation.
//!
//! - TOML-backed data model (`model.rs`).
//! - Loading from disk (`loader.rs`).
//! - Validation into a [`ConfigFile`] (`validate.rs`).

pub mod loader;
pub mod model;
pub mod validate;

pub use loader::{load_and_validate, load_from_fs, load_from_path};
pub use model::{
    ConfigFile, ConfigSection, DefaultSection, LiveUpdateConfig, RawConfigFile, ResourceConfig,
    RunConfig, SyncConfig,
};
