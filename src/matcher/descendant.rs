// src/matcher/descendant.rs

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use super::path_utils::{is_child, join_onto};
use super::PathMatcher;
use crate::errors::MatchError;

/// Matches a path if it is one of the member paths or lives underneath one.
///
/// With members `{"/r/foo.txt", "/r/baz"}`:
/// - `/r/foo.txt` matches (exact),
/// - `/r/baz/qux` matches (descendant),
/// - `/r/bazinga` does not (shares a string prefix, not a path segment).
#[derive(Debug, Clone, Default)]
pub struct SetOrDescendantMatcher {
    paths: HashSet<PathBuf>,
}

impl SetOrDescendantMatcher {
    /// Build the matcher, joining relative paths onto `base_dir`.
    pub fn new<I, P>(base_dir: impl AsRef<Path>, paths: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: AsRef<Path>,
    {
        let base_dir = base_dir.as_ref();
        let paths = paths
            .into_iter()
            .map(|p| join_onto(base_dir, p))
            .collect();
        Self { paths }
    }

    pub fn paths(&self) -> impl Iterator<Item = &Path> {
        self.paths.iter().map(PathBuf::as_path)
    }

    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }

    /// The member `path` equals or descends from, if any.
    ///
    /// When members nest (`/r/a` and `/r/a/b`), which of them is reported is
    /// unspecified; whether *some* member is found is not.
    pub fn containing(&self, path: &Path) -> Option<&Path> {
        if let Some(hit) = self.paths.get(path) {
            return Some(hit.as_path());
        }
        self.paths
            .iter()
            .find(|member| is_child(member, path))
            .map(PathBuf::as_path)
    }
}

impl PathMatcher for SetOrDescendantMatcher {
    fn matches(&self, path: &Path, _is_dir: bool) -> Result<bool, MatchError> {
        Ok(self.containing(path).is_some())
    }
}
