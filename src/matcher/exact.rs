// src/matcher/exact.rs

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use tracing::trace;

use super::path_utils::resolve_absolute;
use super::PathMatcher;
use crate::errors::MatchError;

/// Matches a path iff it is exactly one of a fixed set of absolute paths.
#[derive(Debug, Clone, Default)]
pub struct ExactSetMatcher {
    paths: HashSet<PathBuf>,
}

impl ExactSetMatcher {
    /// Build the matcher, resolving relative paths against the current
    /// working directory.
    ///
    /// Fails if any path cannot be made absolute; no partially-built matcher
    /// is ever returned.
    pub fn new<I, P>(paths: I) -> Result<Self, MatchError>
    where
        I: IntoIterator<Item = P>,
        P: AsRef<Path>,
    {
        let mut set = HashSet::new();
        for path in paths {
            let path = path.as_ref();
            let abs = resolve_absolute(path).map_err(|source| MatchError::PathResolution {
                path: path.to_path_buf(),
                source,
            })?;
            set.insert(abs);
        }
        trace!(count = set.len(), "built exact-set matcher");
        Ok(Self { paths: set })
    }

    pub fn len(&self) -> usize {
        self.paths.len()
    }

    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }
}

impl PathMatcher for ExactSetMatcher {
    fn matches(&self, path: &Path, _is_dir: bool) -> Result<bool, MatchError> {
        Ok(self.paths.contains(path))
    }
}
