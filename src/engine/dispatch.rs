// src/engine/dispatch.rs

use std::path::{Path, PathBuf};

use petgraph::algo::toposort;
use petgraph::graphmap::DiGraphMap;
use tracing::debug;

use crate::config::model::ConfigFile;
use crate::engine::decision::{decide, BuildDecision};
use crate::errors::{DevloopError, MatchError, Result};
use crate::matcher::{ExactSetMatcher, Matcher, PathMatcher};
use crate::watch::profile::{build_resource_profiles, ResourceProfile};

/// A path reported by the watcher, with its directory hint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChangedPath {
    pub path: PathBuf,
    pub is_dir: bool,
}

impl ChangedPath {
    pub fn file(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            is_dir: false,
        }
    }

    pub fn dir(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            is_dir: true,
        }
    }
}

/// Everything needed to turn change batches into decisions.
///
/// Profiles are stored in resource dependency order (dependencies first).
#[derive(Debug, Clone)]
pub struct WatchPlan {
    profiles: Vec<ResourceProfile>,
    config_files: Matcher,
}

impl WatchPlan {
    /// Order `profiles` by `resource_deps` and remember which files are the
    /// configuration itself.
    ///
    /// `config_files` are resolved against the working directory.
    pub fn new<I, P>(profiles: Vec<ResourceProfile>, config_files: I) -> Result<Self>
    where
        I: IntoIterator<Item = P>,
        P: AsRef<Path>,
    {
        let config_files = ExactSetMatcher::new(config_files)?;
        Ok(Self {
            profiles: dependency_order(profiles)?,
            config_files: config_files.into(),
        })
    }

    /// Compile a plan from a validated config located at `config_path`.
    ///
    /// Relative resource paths are resolved against the config file's
    /// directory.
    pub fn from_config(cfg: &ConfigFile, config_path: &Path, base_dir: &Path) -> Result<Self> {
        let profiles = build_resource_profiles(cfg, base_dir)?;
        Self::new(profiles, [config_path])
    }

    pub fn profiles(&self) -> &[ResourceProfile] {
        &self.profiles
    }

    pub fn profile(&self, name: &str) -> Option<&ResourceProfile> {
        self.profiles.iter().find(|p| p.name() == name)
    }
}

fn dependency_order(profiles: Vec<ResourceProfile>) -> Result<Vec<ResourceProfile>> {
    let order: Vec<String> = {
        // Edge direction: dep -> resource.
        let mut graph: DiGraphMap<&str, ()> = DiGraphMap::new();
        for p in profiles.iter() {
            graph.add_node(p.name());
        }
        for p in profiles.iter() {
            for dep in p.resource_deps() {
                if !profiles.iter().any(|other| other.name() == dep) {
                    return Err(DevloopError::ResourceNotFound(format!(
                        "resource '{}' has unknown dependency '{}' in `resource_deps`",
                        p.name(),
                        dep
                    )));
                }
                graph.add_edge(dep.as_str(), p.name(), ());
            }
        }
        let sorted = toposort(&graph, None).map_err(|cycle| {
            DevloopError::DependencyCycle(format!(
                "cycle detected in resource_deps involving resource '{}'",
                cycle.node_id()
            ))
        })?;
        sorted.into_iter().map(str::to_string).collect()
    };

    let mut profiles = profiles;
    profiles.sort_by_key(|p| order.iter().position(|n| n == p.name()));
    Ok(profiles)
}

/// Decision for one resource touched by a batch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceDecision {
    pub resource: String,
    /// Changed paths that concern the resource, in batch order.
    pub changed: Vec<PathBuf>,
    pub decision: BuildDecision,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BatchOutcome {
    /// The batch touched the configuration file.
    pub config_changed: bool,
    /// Affected resources, dependencies first.
    pub decisions: Vec<ResourceDecision>,
}

impl BatchOutcome {
    pub fn is_empty(&self) -> bool {
        !self.config_changed && self.decisions.is_empty()
    }
}

/// Classify one batch of changes.
///
/// Every resource is checked against every path in the batch; resources
/// with at least one matching path get a [`BuildDecision`]. The first
/// matcher error aborts the whole batch.
pub fn dispatch_batch(
    plan: &WatchPlan,
    batch: &[ChangedPath],
) -> std::result::Result<BatchOutcome, MatchError> {
    let mut outcome = BatchOutcome::default();

    for change in batch {
        if plan.config_files.matches(&change.path, change.is_dir)? {
            outcome.config_changed = true;
            break;
        }
    }

    for profile in plan.profiles() {
        let mut changed = Vec::new();
        for change in batch {
            if profile.matches(&change.path, change.is_dir)? {
                changed.push(change.path.clone());
            }
        }
        if changed.is_empty() {
            continue;
        }

        let decision = decide(profile, &changed)?;
        debug!(
            resource = profile.name(),
            files = changed.len(),
            %decision,
            "resource affected by change batch"
        );
        outcome.decisions.push(ResourceDecision {
            resource: profile.name().to_string(),
            changed,
            decision,
        });
    }

    Ok(outcome)
}
