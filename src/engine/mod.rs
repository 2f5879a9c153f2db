// src/engine/mod.rs

//! Change-to-action decisions.
//!
//! This module turns a batch of changed paths into, per affected resource,
//! a [`BuildDecision`]: nothing, a full rebuild, or a live update. It is
//! synchronous and does no IO; the watcher feeds it and reports the result.
//!
//! - [`decision`]: what to do for one resource given its changed files.
//! - [`dispatch`]: which resources a batch touches, in dependency order.

pub mod decision;
pub mod dispatch;

pub use decision::{decide, BuildDecision, FileSync, FullRebuildReason};
pub use dispatch::{dispatch_batch, BatchOutcome, ChangedPath, ResourceDecision, WatchPlan};
