// src/matcher/composite.rs

use std::path::Path;
use std::sync::Arc;

use tracing::trace;

use super::{Matcher, PathMatcher, PatternMatcher};
use crate::errors::MatchError;

/// Logical OR over an ordered list of matchers.
///
/// Members are tried in order; the first match wins and the first error
/// aborts the scan.
#[derive(Debug, Clone)]
pub struct CompositeMatcher {
    matchers: Vec<Matcher>,
}

impl CompositeMatcher {
    pub fn new(matchers: Vec<Matcher>) -> Self {
        Self { matchers }
    }

    pub fn len(&self) -> usize {
        self.matchers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.matchers.is_empty()
    }
}

impl PathMatcher for CompositeMatcher {
    fn matches(&self, path: &Path, is_dir: bool) -> Result<bool, MatchError> {
        for m in &self.matchers {
            if m.matches(path, is_dir)? {
                return Ok(true);
            }
        }
        Ok(false)
    }
}

/// A [`CompositeMatcher`] whose members can all export patterns.
///
/// Only [`build_composite`] creates one, after checking every member.
#[derive(Debug, Clone)]
pub struct CompositePatternMatcher {
    composite: CompositeMatcher,
    matchers: Vec<Arc<dyn PatternMatcher>>,
}

impl PathMatcher for CompositePatternMatcher {
    fn matches(&self, path: &Path, is_dir: bool) -> Result<bool, MatchError> {
        self.composite.matches(path, is_dir)
    }
}

impl PatternMatcher for CompositePatternMatcher {
    fn as_patterns(&self) -> Vec<String> {
        self.matchers.iter().flat_map(|m| m.as_patterns()).collect()
    }
}

/// Compose matchers into one.
///
/// - no matchers: the empty matcher;
/// - all members pattern-capable: a [`CompositePatternMatcher`];
/// - otherwise: a plain [`CompositeMatcher`]. Pattern capability is dropped
///   for the whole group, because exporting only some members' patterns
///   would under-report what is ignored.
pub fn build_composite(matchers: Vec<Matcher>) -> Matcher {
    if matchers.is_empty() {
        return Matcher::empty();
    }

    let pattern_members: Option<Vec<Arc<dyn PatternMatcher>>> = matchers
        .iter()
        .map(|m| match m {
            Matcher::Pattern(p) => Some(Arc::clone(p)),
            Matcher::Plain(_) => None,
        })
        .collect();

    let composite = CompositeMatcher::new(matchers);
    match pattern_members {
        Some(members) => Matcher::pattern(CompositePatternMatcher {
            composite,
            matchers: members,
        }),
        None => {
            trace!(
                members = composite.len(),
                "composite has a plain member; pattern export unavailable"
            );
            Matcher::plain(composite)
        }
    }
}
