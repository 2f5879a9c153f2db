// src/matcher/path_set.rs

use std::path::{Path, PathBuf};

use super::{PathMatcher, SetOrDescendantMatcher};
use crate::errors::MatchError;

/// A list of trigger paths plus the directory relative entries are
/// relative to.
///
/// Used for live-update `fall_back_on` lists and run-step triggers: "did any
/// of these changed files touch one of my paths?"
#[derive(Debug, Clone)]
pub struct PathSet {
    paths: Vec<PathBuf>,
    base_directory: PathBuf,
    matcher: SetOrDescendantMatcher,
}

impl PathSet {
    pub fn new<I, P>(paths: I, base_directory: impl Into<PathBuf>) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        let paths: Vec<PathBuf> = paths.into_iter().map(Into::into).collect();
        let base_directory = base_directory.into();
        let matcher = SetOrDescendantMatcher::new(&base_directory, &paths);
        Self {
            paths,
            base_directory,
            matcher,
        }
    }

    /// Paths as declared (possibly relative).
    pub fn paths(&self) -> &[PathBuf] {
        &self.paths
    }

    pub fn base_directory(&self) -> &Path {
        &self.base_directory
    }

    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }

    /// The first of `candidates`, in the order given, that equals or lives
    /// under one of this set's paths.
    ///
    /// Stops at the first matcher error.
    pub fn any_match<'a, P>(&self, candidates: &'a [P]) -> Result<Option<&'a Path>, MatchError>
    where
        P: AsRef<Path>,
    {
        for candidate in candidates {
            let candidate = candidate.as_ref();
            if self.matcher.matches(candidate, false)? {
                return Ok(Some(candidate));
            }
        }
        Ok(None)
    }
}
