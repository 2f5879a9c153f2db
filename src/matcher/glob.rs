// src/matcher/glob.rs

use std::fmt;
use std::path::Path;

use globset::{Glob, GlobSet, GlobSetBuilder};

use super::{PathMatcher, PatternMatcher};
use crate::errors::MatchError;

/// Matches a path if it satisfies any of a fixed list of glob patterns.
///
/// Patterns are matched against the whole absolute path with globset's
/// default options, so `*` also crosses `/` (`*.go` matches `/x/main.go`).
/// Use `**` where the intent is "any depth" to keep patterns portable.
#[derive(Clone)]
pub struct GlobMatcher {
    patterns: Vec<String>,
    set: GlobSet,
}

impl fmt::Debug for GlobMatcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GlobMatcher")
            .field("patterns", &self.patterns)
            .finish_non_exhaustive()
    }
}

impl GlobMatcher {
    /// Compile every pattern up front.
    ///
    /// The first malformed pattern is returned as
    /// [`MatchError::InvalidPattern`].
    pub fn new<I, S>(patterns: I) -> Result<Self, MatchError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let patterns: Vec<String> = patterns.into_iter().map(Into::into).collect();
        let set = build_globset(&patterns)?;
        Ok(Self { patterns, set })
    }

    pub fn patterns(&self) -> &[String] {
        &self.patterns
    }
}

impl PathMatcher for GlobMatcher {
    fn matches(&self, path: &Path, _is_dir: bool) -> Result<bool, MatchError> {
        Ok(self.set.is_match(path))
    }
}

impl PatternMatcher for GlobMatcher {
    fn as_patterns(&self) -> Vec<String> {
        self.patterns.clone()
    }
}

fn build_globset(patterns: &[String]) -> Result<GlobSet, MatchError> {
    let mut builder = GlobSetBuilder::new();
    for pat in patterns {
        let glob = Glob::new(pat).map_err(|source| MatchError::InvalidPattern {
            pattern: pat.clone(),
            source,
        })?;
        builder.add(glob);
    }
    // Every glob compiled on its own; a failure here is the combined set
    // exceeding globset's size limits.
    builder.build().map_err(|source| MatchError::InvalidPattern {
        pattern: patterns.join(", "),
        source,
    })
}
