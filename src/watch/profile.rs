// src/watch/profile.rs

use std::fmt;
use std::path::{Path, PathBuf};

use crate::config::model::{ConfigFile, LiveUpdateConfig, ResourceConfig};
use crate::config::validate::DEFAULT_SECTION_NAME;
use crate::errors::{DevloopError, MatchError, Result};
use crate::matcher::path_utils::{child_relative, join_onto};
use crate::matcher::{
    build_composite, GlobMatcher, Matcher, PathMatcher, PathSet, SetOrDescendantMatcher,
};

pub type ResourceName = String;

/// Compiled include/ignore rules and live-update triggers for one resource.
///
/// Built once when the config is loaded; queried for every changed path.
#[derive(Debug, Clone)]
pub struct ResourceProfile {
    name: ResourceName,
    resource_deps: Vec<ResourceName>,
    context_dir: PathBuf,
    include: Matcher,
    ignore: Matcher,
    live_update: Option<LiveUpdateProfile>,
}

impl ResourceProfile {
    /// Compile a profile for `resource`, resolving relative paths and
    /// anchoring relative ignore globs at `base_dir`.
    pub fn build(
        name: impl Into<ResourceName>,
        resource: &ResourceConfig,
        default_ignore: &[String],
        base_dir: &Path,
    ) -> Result<Self> {
        let name = name.into();

        let include: Matcher = SetOrDescendantMatcher::new(base_dir, &resource.deps).into();

        let mut ignore_members: Vec<Matcher> = Vec::new();
        if resource.append_default_ignore && !default_ignore.is_empty() {
            let globs = GlobMatcher::new(anchor_patterns(base_dir, default_ignore))
                .map_err(|e| DevloopError::for_resource(DEFAULT_SECTION_NAME, e))?;
            ignore_members.push(globs.into());
        }
        if !resource.ignore.is_empty() {
            let globs = GlobMatcher::new(anchor_patterns(base_dir, &resource.ignore))
                .map_err(|e| DevloopError::for_resource(&name, e))?;
            ignore_members.push(globs.into());
        }
        if !resource.ignore_dirs.is_empty() {
            let dirs = SetOrDescendantMatcher::new(base_dir, &resource.ignore_dirs);
            ignore_members.push(dirs.into());
        }
        let ignore = build_composite(ignore_members);

        let context_dir = match &resource.context {
            Some(ctx) => join_onto(base_dir, ctx),
            None => base_dir.to_path_buf(),
        };

        let live_update = resource
            .live_update
            .as_ref()
            .map(|lu| LiveUpdateProfile::build(lu, base_dir));

        Ok(Self {
            name,
            resource_deps: resource.resource_deps.clone(),
            context_dir,
            include,
            ignore,
            live_update,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Resources that must be handled before this one.
    pub fn resource_deps(&self) -> &[ResourceName] {
        &self.resource_deps
    }

    /// Directory an exported ignore file belongs in.
    pub fn context_dir(&self) -> &Path {
        &self.context_dir
    }

    pub fn ignore_matcher(&self) -> &Matcher {
        &self.ignore
    }

    /// The resource's ignore rules as glob patterns, or `None` if some rule
    /// (e.g. `ignore_dirs`) cannot be expressed that way.
    pub fn ignore_patterns(&self) -> Option<Vec<String>> {
        self.ignore.as_patterns()
    }

    pub fn live_update(&self) -> Option<&LiveUpdateProfile> {
        self.live_update.as_ref()
    }

    /// True if a change at `path` concerns this resource: it is under one of
    /// the resource's `deps` and not ignored.
    pub fn matches(&self, path: &Path, is_dir: bool) -> std::result::Result<bool, MatchError> {
        if !self.include.matches(path, is_dir)? {
            return Ok(false);
        }
        Ok(!self.ignore.matches(path, is_dir)?)
    }
}

/// Compiled `[resource.<name>.live_update]` section.
#[derive(Debug, Clone)]
pub struct LiveUpdateProfile {
    fall_back_on: PathSet,
    syncs: Vec<SyncStep>,
    runs: Vec<RunStep>,
}

impl LiveUpdateProfile {
    fn build(cfg: &LiveUpdateConfig, base_dir: &Path) -> Self {
        let syncs = cfg
            .sync
            .iter()
            .map(|s| SyncStep {
                local: join_onto(base_dir, &s.local),
                remote: s.remote.clone(),
            })
            .collect();
        let runs = cfg
            .run
            .iter()
            .map(|r| RunStep {
                cmd: r.cmd.clone(),
                triggers: PathSet::new(&r.triggers, base_dir),
            })
            .collect();
        Self {
            fall_back_on: PathSet::new(&cfg.fall_back_on, base_dir),
            syncs,
            runs,
        }
    }

    pub fn fall_back_on(&self) -> &PathSet {
        &self.fall_back_on
    }

    pub fn syncs(&self) -> &[SyncStep] {
        &self.syncs
    }

    pub fn runs(&self) -> &[RunStep] {
        &self.runs
    }

    /// Container destination for `path`, using the first sync step (in
    /// declaration order) whose local directory contains it.
    pub fn remote_path_for(&self, path: &Path) -> Option<String> {
        self.syncs.iter().find_map(|s| s.remote_path_for(path))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyncStep {
    pub local: PathBuf,
    pub remote: String,
}

impl SyncStep {
    fn remote_path_for(&self, path: &Path) -> Option<String> {
        let rel = child_relative(&self.local, path)?;
        if rel.is_empty() {
            return Some(self.remote.clone());
        }
        Some(format!("{}/{}", self.remote.trim_end_matches('/'), rel))
    }
}

#[derive(Debug, Clone)]
pub struct RunStep {
    pub cmd: String,
    pub triggers: PathSet,
}

impl fmt::Display for RunStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.cmd)
    }
}

/// Anchor relative glob patterns at `base_dir` so they can be matched
/// against absolute paths. Absolute patterns are kept as written.
///
/// `base_dir` is escaped, so glob metacharacters in directory names are
/// matched literally.
pub fn anchor_patterns(base_dir: &Path, patterns: &[String]) -> Vec<String> {
    let base = globset::escape(&base_dir.to_string_lossy().replace('\\', "/"));
    let base = base.trim_end_matches('/');
    patterns
        .iter()
        .map(|pat| {
            if Path::new(pat).is_absolute() {
                pat.clone()
            } else {
                format!("{}/{}", base, pat.trim_start_matches("./"))
            }
        })
        .collect()
}

/// Compile a profile for every resource in the config.
///
/// `base_dir` is the directory relative config paths are relative to
/// (normally the directory holding the config file).
pub fn build_resource_profiles(cfg: &ConfigFile, base_dir: &Path) -> Result<Vec<ResourceProfile>> {
    let default_ignore = &cfg.default_section().ignore;
    cfg.resources()
        .iter()
        .map(|(name, resource)| {
            ResourceProfile::build(name.clone(), resource, default_ignore, base_dir)
        })
        .collect()
}
