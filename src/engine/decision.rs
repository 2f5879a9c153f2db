// src/engine/decision.rs

use std::fmt;
use std::path::PathBuf;

use tracing::trace;

use crate::errors::MatchError;
use crate::watch::profile::ResourceProfile;

/// Why a change could not be applied as a live update.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FullRebuildReason {
    /// The resource declares no live update.
    NoLiveUpdate,
    /// A changed file is listed in `fall_back_on`.
    FallBackOn,
    /// A changed file is not under any sync step's local path.
    NotSynced,
}

impl fmt::Display for FullRebuildReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            FullRebuildReason::NoLiveUpdate => "no live update configured",
            FullRebuildReason::FallBackOn => "matched fall_back_on",
            FullRebuildReason::NotSynced => "not covered by any sync step",
        };
        f.write_str(s)
    }
}

/// One file to copy into the running container.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileSync {
    pub local: PathBuf,
    pub remote: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BuildDecision {
    NoChange,
    FullRebuild {
        reason: FullRebuildReason,
        /// The changed path that forced the rebuild.
        path: PathBuf,
    },
    LiveUpdate {
        files: Vec<FileSync>,
        /// Commands of the run steps whose triggers were hit, in order.
        runs: Vec<String>,
    },
}

impl BuildDecision {
    pub fn is_full_rebuild(&self) -> bool {
        matches!(self, BuildDecision::FullRebuild { .. })
    }

    pub fn is_live_update(&self) -> bool {
        matches!(self, BuildDecision::LiveUpdate { .. })
    }
}

impl fmt::Display for BuildDecision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BuildDecision::NoChange => f.write_str("no change"),
            BuildDecision::FullRebuild { reason, path } => {
                write!(f, "full rebuild ({reason}: {})", path.display())
            }
            BuildDecision::LiveUpdate { files, runs } => {
                write!(f, "live update ({} file(s)", files.len())?;
                if !runs.is_empty() {
                    write!(f, ", run: {}", runs.join("; "))?;
                }
                f.write_str(")")
            }
        }
    }
}

/// Decide how to apply `changed` (paths already known to concern
/// `profile`) to the resource.
///
/// Rules, in order:
/// 1. nothing changed: [`BuildDecision::NoChange`];
/// 2. no live update configured: full rebuild;
/// 3. any changed path under `fall_back_on`: full rebuild, reporting the
///    first such path in `changed` order;
/// 4. any changed path outside every sync step: full rebuild;
/// 5. otherwise a live update syncing every changed path, running each run
///    step that has no triggers or whose triggers were hit.
pub fn decide(profile: &ResourceProfile, changed: &[PathBuf]) -> Result<BuildDecision, MatchError> {
    let Some(first) = changed.first() else {
        return Ok(BuildDecision::NoChange);
    };

    let Some(live_update) = profile.live_update() else {
        return Ok(BuildDecision::FullRebuild {
            reason: FullRebuildReason::NoLiveUpdate,
            path: first.clone(),
        });
    };

    if let Some(hit) = live_update.fall_back_on().any_match(changed)? {
        trace!(resource = profile.name(), path = ?hit, "fall_back_on hit");
        return Ok(BuildDecision::FullRebuild {
            reason: FullRebuildReason::FallBackOn,
            path: hit.to_path_buf(),
        });
    }

    let mut files = Vec::with_capacity(changed.len());
    for path in changed {
        match live_update.remote_path_for(path) {
            Some(remote) => files.push(FileSync {
                local: path.clone(),
                remote,
            }),
            None => {
                return Ok(BuildDecision::FullRebuild {
                    reason: FullRebuildReason::NotSynced,
                    path: path.clone(),
                });
            }
        }
    }

    let mut runs = Vec::new();
    for step in live_update.runs() {
        if step.triggers.is_empty() || step.triggers.any_match(changed)?.is_some() {
            runs.push(step.cmd.clone());
        }
    }

    Ok(BuildDecision::LiveUpdate { files, runs })
}
