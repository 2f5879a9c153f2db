// src/config/model.rs

use std::collections::BTreeMap;

use serde::Deserialize;

/// Configuration exactly as deserialized from TOML, before validation.
///
/// ```toml
/// [config]
/// debounce_ms = 50
///
/// [default]
/// ignore = [".git/**"]
///
/// [resource.api]
/// deps = ["src/", "go.mod"]
/// ignore = ["*.tmp"]
///
/// [resource.api.live_update]
/// fall_back_on = ["go.mod"]
/// sync = [{ local = "src", remote = "/app/src" }]
/// run = [{ cmd = "go build ./...", triggers = ["src/"] }]
/// ```
#[derive(Debug, Clone, Deserialize)]
pub struct RawConfigFile {
    #[serde(default)]
    pub config: ConfigSection,

    #[serde(default)]
    pub default: DefaultSection,

    /// All resources from `[resource.<name>]`, keyed by name.
    #[serde(default)]
    pub resource: BTreeMap<String, ResourceConfig>,
}

/// A configuration that passed validation.
///
/// Only obtainable through `TryFrom<RawConfigFile>`.
#[derive(Debug, Clone)]
pub struct ConfigFile {
    config: ConfigSection,
    default: DefaultSection,
    resource: BTreeMap<String, ResourceConfig>,
}

impl ConfigFile {
    pub(crate) fn new_unchecked(
        config: ConfigSection,
        default: DefaultSection,
        resource: BTreeMap<String, ResourceConfig>,
    ) -> Self {
        Self {
            config,
            default,
            resource,
        }
    }

    pub fn config_section(&self) -> &ConfigSection {
        &self.config
    }

    pub fn default_section(&self) -> &DefaultSection {
        &self.default
    }

    pub fn resources(&self) -> &BTreeMap<String, ResourceConfig> {
        &self.resource
    }

    pub fn resource(&self, name: &str) -> Option<&ResourceConfig> {
        self.resource.get(name)
    }
}

/// `[config]` section.
#[derive(Debug, Clone, Deserialize)]
pub struct ConfigSection {
    /// Window in which watcher events are coalesced into one batch.
    #[serde(default = "default_debounce_ms")]
    pub debounce_ms: u64,
}

fn default_debounce_ms() -> u64 {
    50
}

impl Default for ConfigSection {
    fn default() -> Self {
        Self {
            debounce_ms: default_debounce_ms(),
        }
    }
}

/// `[default]` section.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct DefaultSection {
    /// Ignore globs applied to every resource that does not opt out.
    #[serde(default)]
    pub ignore: Vec<String>,
}

/// `[resource.<name>]` section.
#[derive(Debug, Clone, Deserialize)]
pub struct ResourceConfig {
    /// Files or directories whose changes affect this resource. Relative
    /// entries are relative to the config file's directory.
    pub deps: Vec<String>,

    /// Ignore globs. Relative patterns are anchored at the config directory.
    #[serde(default)]
    pub ignore: Vec<String>,

    /// Directories whose whole subtree is ignored.
    ///
    /// These cannot be exported as ignore-file patterns; declaring any makes
    /// the resource's ignore rules non-exportable.
    #[serde(default)]
    pub ignore_dirs: Vec<String>,

    /// Whether `[default].ignore` is added to this resource's ignores.
    #[serde(default = "default_true")]
    pub append_default_ignore: bool,

    /// Image build context; the directory an exported ignore file goes into.
    #[serde(default)]
    pub context: Option<String>,

    /// Resources that must be handled before this one.
    #[serde(default)]
    pub resource_deps: Vec<String>,

    #[serde(default)]
    pub live_update: Option<LiveUpdateConfig>,
}

fn default_true() -> bool {
    true
}

/// `[resource.<name>.live_update]` section.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct LiveUpdateConfig {
    /// Changes under any of these force a full rebuild.
    #[serde(default)]
    pub fall_back_on: Vec<String>,

    #[serde(default)]
    pub sync: Vec<SyncConfig>,

    #[serde(default)]
    pub run: Vec<RunConfig>,
}

/// Copy files under `local` (host) to `remote` (container).
#[derive(Debug, Clone, Deserialize)]
pub struct SyncConfig {
    pub local: String,
    pub remote: String,
}

/// Command run in the container after syncing.
#[derive(Debug, Clone, Deserialize)]
pub struct RunConfig {
    pub cmd: String,

    /// Only run when a changed file is under one of these. Empty means
    /// always.
    #[serde(default)]
    pub triggers: Vec<String>,
}
