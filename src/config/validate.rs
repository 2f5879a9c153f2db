// src/config/validate.rs

use std::path::Path;

use petgraph::algo::toposort;
use petgraph::graphmap::DiGraphMap;

use crate::config::model::{ConfigFile, RawConfigFile};
use crate::errors::{DevloopError, Result};
use crate::matcher::GlobMatcher;

/// Name used in errors for patterns declared under `[default]`.
pub const DEFAULT_SECTION_NAME: &str = "[default]";

impl TryFrom<RawConfigFile> for ConfigFile {
    type Error = DevloopError;

    fn try_from(raw: RawConfigFile) -> std::result::Result<Self, Self::Error> {
        validate_raw_config(&raw)?;
        Ok(ConfigFile::new_unchecked(raw.config, raw.default, raw.resource))
    }
}

fn validate_raw_config(cfg: &RawConfigFile) -> Result<()> {
    ensure_has_resources(cfg)?;
    validate_global_config(cfg)?;
    validate_resources(cfg)?;
    validate_ignore_patterns(cfg)?;
    validate_resource_dependencies(cfg)?;
    validate_dependency_graph(cfg)?;
    Ok(())
}

fn ensure_has_resources(cfg: &RawConfigFile) -> Result<()> {
    if cfg.resource.is_empty() {
        return Err(DevloopError::ConfigError(
            "config must contain at least one [resource.<name>] section".to_string(),
        ));
    }
    Ok(())
}

fn validate_global_config(cfg: &RawConfigFile) -> Result<()> {
    if cfg.config.debounce_ms == 0 {
        return Err(DevloopError::ConfigError(
            "[config].debounce_ms must be >= 1 (got 0)".to_string(),
        ));
    }
    Ok(())
}

fn validate_resources(cfg: &RawConfigFile) -> Result<()> {
    for (name, resource) in cfg.resource.iter() {
        if resource.deps.is_empty() {
            return Err(DevloopError::ConfigError(format!(
                "resource '{}' must declare at least one path in `deps`",
                name
            )));
        }

        if let Some(live_update) = &resource.live_update {
            for sync in live_update.sync.iter() {
                // Container paths are always POSIX.
                if !sync.remote.starts_with('/') {
                    return Err(DevloopError::ConfigError(format!(
                        "resource '{}': live_update sync remote path '{}' must be absolute",
                        name, sync.remote
                    )));
                }
                if Path::new(&sync.local).as_os_str().is_empty() {
                    return Err(DevloopError::ConfigError(format!(
                        "resource '{}': live_update sync local path must not be empty",
                        name
                    )));
                }
            }
            for run in live_update.run.iter() {
                if run.cmd.trim().is_empty() {
                    return Err(DevloopError::ConfigError(format!(
                        "resource '{}': live_update run step has an empty `cmd`",
                        name
                    )));
                }
            }
        }
    }
    Ok(())
}

/// Compile every ignore glob once so a bad pattern is reported here, naming
/// the resource that declared it, rather than when the watcher starts.
fn validate_ignore_patterns(cfg: &RawConfigFile) -> Result<()> {
    GlobMatcher::new(&cfg.default.ignore)
        .map_err(|e| DevloopError::for_resource(DEFAULT_SECTION_NAME, e))?;

    for (name, resource) in cfg.resource.iter() {
        GlobMatcher::new(&resource.ignore).map_err(|e| DevloopError::for_resource(name, e))?;
    }
    Ok(())
}

fn validate_resource_dependencies(cfg: &RawConfigFile) -> Result<()> {
    for (name, resource) in cfg.resource.iter() {
        for dep in resource.resource_deps.iter() {
            if dep == name {
                return Err(DevloopError::ConfigError(format!(
                    "resource '{}' cannot depend on itself in `resource_deps`",
                    name
                )));
            }
            if !cfg.resource.contains_key(dep) {
                return Err(DevloopError::ResourceNotFound(format!(
                    "resource '{}' has unknown dependency '{}' in `resource_deps`",
                    name, dep
                )));
            }
        }
    }
    Ok(())
}

fn validate_dependency_graph(cfg: &RawConfigFile) -> Result<()> {
    // Edge direction: dep -> resource.
    let mut graph: DiGraphMap<&str, ()> = DiGraphMap::new();

    for name in cfg.resource.keys() {
        graph.add_node(name.as_str());
    }
    for (name, resource) in cfg.resource.iter() {
        for dep in resource.resource_deps.iter() {
            graph.add_edge(dep.as_str(), name.as_str(), ());
        }
    }

    match toposort(&graph, None) {
        Ok(_order) => Ok(()),
        Err(cycle) => Err(DevloopError::DependencyCycle(format!(
            "cycle detected in resource_deps involving resource '{}'",
            cycle.node_id()
        ))),
    }
}
