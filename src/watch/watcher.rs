// src/watch/watcher.rs

use std::path::PathBuf;
use std::time::Duration;

use anyhow::Result;
use notify::{Config, Event, RecommendedWatcher, RecursiveMode, Watcher};
use tracing::{debug, info};

use crate::engine::WatchPlan;
use crate::matcher::path_utils::resolve_absolute;
use crate::watch::event_handler::{changed_paths, coalesce, handle_batch};

/// Handle for the filesystem watcher.
///
/// Keeps the underlying `RecommendedWatcher` alive. Dropping this handle
/// stops file watching.
pub struct WatcherHandle {
    _inner: RecommendedWatcher,
}

impl std::fmt::Debug for WatcherHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WatcherHandle").finish()
    }
}

/// Watch `root` recursively and print a decision for every resource a
/// change batch touches.
///
/// Events arriving within `debounce` of each other are coalesced into one
/// batch before dispatch.
pub fn spawn_watcher(
    root: impl Into<PathBuf>,
    plan: WatchPlan,
    debounce: Duration,
) -> Result<WatcherHandle> {
    let root = root.into();
    // Matchers hold absolute, non-canonicalized paths; watch the same form
    // so event paths line up with them.
    let root = resolve_absolute(&root)?;

    let (event_tx, mut event_rx) = tokio::sync::mpsc::unbounded_channel::<Event>();

    let mut watcher = RecommendedWatcher::new(
        move |res: notify::Result<Event>| match res {
            Ok(event) => {
                if let Err(err) = event_tx.send(event) {
                    eprintln!("devloop: failed to forward notify event: {err}");
                }
            }
            Err(err) => {
                eprintln!("devloop: file watch error: {err}");
            }
        },
        Config::default(),
    )?;

    watcher.watch(&root, RecursiveMode::Recursive)?;

    info!(root = ?root, resources = plan.profiles().len(), "file watcher started");

    tokio::spawn(async move {
        while let Some(event) = event_rx.recv().await {
            debug!(?event, "received notify event");
            let mut batch = changed_paths(&event);

            loop {
                match tokio::time::timeout(debounce, event_rx.recv()).await {
                    Ok(Some(event)) => coalesce(&mut batch, changed_paths(&event)),
                    Ok(None) | Err(_) => break,
                }
            }

            if batch.is_empty() {
                continue;
            }
            handle_batch(&plan, &root, &batch);
        }
        debug!("watcher event loop finished");
    });

    Ok(WatcherHandle { _inner: watcher })
}
