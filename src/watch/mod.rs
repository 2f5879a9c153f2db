// src/watch/mod.rs

//! File watching.
//!
//! - Compiling per-resource include/ignore rules (`profile.rs`).
//! - Turning notify events into change batches (`event_handler.rs`).
//! - Running the cross-platform watcher (`watcher.rs`).
//!
//! Deciding what a batch means is left to [`crate::engine`].

pub mod event_handler;
pub mod profile;
pub mod watcher;

pub use profile::{
    anchor_patterns, build_resource_profiles, LiveUpdateProfile, ResourceName, ResourceProfile,
    RunStep, SyncStep,
};
pub use watcher::{spawn_watcher, WatcherHandle};
