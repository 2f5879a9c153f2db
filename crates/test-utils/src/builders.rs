#![allow(dead_code)]

use std::collections::BTreeMap;
use devloop::config::{
    ConfigFile, ConfigSection, DefaultSection, LiveUpdateConfig, RawConfigFile, ResourceConfig,
    RunConfig, SyncConfig,
};

/// Builder for `ConfigFile` to simplify test setup.
pub struct ConfigFileBuilder {
    config: RawConfigFile,
}

impl ConfigFileBuilder {
    pub fn new() -> Self {
        Self {
            config: RawConfigFile {
                config: ConfigSection::default(),
                default: DefaultSection::default(),
                resource: BTreeMap::new(),
            },
        }
    }

    pub fn with_resource(mut self, name: &str, resource: ResourceConfig) -> Self {
        self.config.resource.insert(name.to_string(), resource);
        self
    }

    pub fn with_default_ignore(mut self, pattern: &str) -> Self {
        self.config.default.ignore.push(pattern.to_string());
        self
    }

    pub fn with_debounce_ms(mut self, ms: u64) -> Self {
        self.config.config.debounce_ms = ms;
        self
    }

    /// The raw config, for tests that expect validation to fail.
    pub fn build_raw(self) -> RawConfigFile {
        self.config
    }

    pub fn build(self) -> ConfigFile {
        ConfigFile::try_from(self.config).expect("Failed to build valid config from builder")
    }
}

impl Default for ConfigFileBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Builder for `ResourceConfig`.
pub struct ResourceConfigBuilder {
    resource: ResourceConfig,
}

impl ResourceConfigBuilder {
    pub fn new(deps: &[&str]) -> Self {
        Self {
            resource: ResourceConfig {
                deps: deps.iter().map(|s| s.to_string()).collect(),
                ignore: vec![],
                ignore_dirs: vec![],
                append_default_ignore: true,
                context: None,
                resource_deps: vec![],
                live_update: None,
            },
        }
    }

    pub fn ignore(mut self, pattern: &str) -> Self {
        self.resource.ignore.push(pattern.to_string());
        self
    }

    pub fn ignore_dir(mut self, dir: &str) -> Self {
        self.resource.ignore_dirs.push(dir.to_string());
        self
    }

    pub fn append_default_ignore(mut self, val: bool) -> Self {
        self.resource.append_default_ignore = val;
        self
    }

    pub fn context(mut self, dir: &str) -> Self {
        self.resource.context = Some(dir.to_string());
        self
    }

    pub fn after(mut self, dep: &str) -> Self {
        self.resource.resource_deps.push(dep.to_string());
        self
    }

    pub fn fall_back_on(mut self, path: &str) -> Self {
        self.live_update().fall_back_on.push(path.to_string());
        self
    }

    pub fn sync(mut self, local: &str, remote: &str) -> Self {
        self.live_update().sync.push(SyncConfig {
            local: local.to_string(),
            remote: remote.to_string(),
        });
        self
    }

    pub fn run(mut self, cmd: &str, triggers: &[&str]) -> Self {
        self.live_update().run.push(RunConfig {
            cmd: cmd.to_string(),
            triggers: triggers.iter().map(|s| s.to_string()).collect(),
        });
        self
    }

    fn live_update(&mut self) -> &mut LiveUpdateConfig {
        self.resource
            .live_update
            .get_or_insert_with(LiveUpdateConfig::default)
    }

    pub fn build(self) -> ResourceConfig {
        self.resource
    }
}
