// src/config/loader.rs

use std::path::Path;

use crate::config::model::{ConfigFile, RawConfigFile};
use crate::errors::Result;
use crate::fs::{FileSystem, RealFileSystem};

/// Read and deserialize a config file without semantic validation.
///
/// Use [`load_and_validate`] to get a [`ConfigFile`].
pub fn load_from_path(path: impl AsRef<Path>) -> Result<RawConfigFile> {
    load_from_fs(&RealFileSystem, path.as_ref())
}

/// Same as [`load_from_path`], reading through `fs`.
pub fn load_from_fs(fs: &dyn FileSystem, path: &Path) -> Result<RawConfigFile> {
    let contents = fs.read_to_string(path)?;
    let config: RawConfigFile = toml::from_str(&contents)?;
    Ok(config)
}

/// Load a config file and validate it.
///
/// Validation covers unknown or cyclic `resource_deps`, empty `deps`,
/// malformed ignore globs (reported with the resource name) and basic
/// `[config]` sanity.
pub fn load_and_validate(path: impl AsRef<Path>) -> Result<ConfigFile> {
    let raw_config = load_from_path(&path)?;
    let config = ConfigFile::try_from(raw_config)?;
    Ok(config)
}

