// src/watch/event_handler.rs

//! Turning notify events into change batches, and reporting decisions.

use std::path::Path;

use notify::event::{CreateKind, RemoveKind};
use notify::{Event, EventKind};
use tracing::{debug, info, warn};

use crate::engine::{dispatch_batch, BatchOutcome, ChangedPath, WatchPlan};
use crate::matcher::path_utils::child_relative;

/// Changed paths carried by a notify event.
///
/// Pure access events are dropped; they never change content.
pub fn changed_paths(event: &Event) -> Vec<ChangedPath> {
    let is_dir = match event.kind {
        EventKind::Access(_) => return Vec::new(),
        EventKind::Create(CreateKind::Folder) | EventKind::Remove(RemoveKind::Folder) => true,
        _ => false,
    };
    event
        .paths
        .iter()
        .map(|p| ChangedPath {
            path: p.clone(),
            is_dir,
        })
        .collect()
}

/// Append `incoming` to `batch`, keeping only the first occurrence of each
/// path so batch order reflects when a path was first seen.
pub fn coalesce(batch: &mut Vec<ChangedPath>, incoming: Vec<ChangedPath>) {
    for change in incoming {
        match batch.iter_mut().find(|c| c.path == change.path) {
            Some(existing) => existing.is_dir |= change.is_dir,
            None => batch.push(change),
        }
    }
}

/// Dispatch one batch and report the outcome.
///
/// Returns `None` when matching failed; the batch is skipped rather than
/// guessed at.
pub fn handle_batch(plan: &WatchPlan, root: &Path, batch: &[ChangedPath]) -> Option<BatchOutcome> {
    debug!(paths = batch.len(), "dispatching change batch");

    let outcome = match dispatch_batch(plan, batch) {
        Ok(outcome) => outcome,
        Err(err) => {
            warn!(error = %err, "path matching failed; skipping change batch");
            return None;
        }
    };

    for line in report_lines(root, &outcome) {
        println!("{line}");
    }
    if outcome.config_changed {
        info!("configuration file changed; restart devloop to apply it");
    }
    Some(outcome)
}

/// User-facing lines for a batch outcome. Paths are shown relative to
/// `root` when possible.
pub fn report_lines(root: &Path, outcome: &BatchOutcome) -> Vec<String> {
    let mut lines = Vec::new();
    if outcome.config_changed {
        lines.push("[devloop] configuration changed (restart to reload)".to_string());
    }
    for d in &outcome.decisions {
        let first = d
            .changed
            .first()
            .map(|p| display_path(root, p))
            .unwrap_or_default();
        lines.push(format!(
            "[devloop] {}: {} [{} changed, first '{}']",
            d.resource,
            d.decision,
            d.changed.len(),
            first
        ));
    }
    lines
}

fn display_path(root: &Path, path: &Path) -> String {
    match child_relative(root, path) {
        Some(rel) if !rel.is_empty() => rel,
        _ => path.display().to_string(),
    }
}
