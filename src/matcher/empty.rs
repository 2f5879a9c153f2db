// src/matcher/empty.rs

use std::path::Path;

use super::{PathMatcher, PatternMatcher};
use crate::errors::MatchError;

/// Matches nothing and exports no patterns.
///
/// Composing it with other matchers never changes their answers, which makes
/// it the natural result of composing zero matchers.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EmptyMatcher;

impl PathMatcher for EmptyMatcher {
    fn matches(&self, _path: &Path, _is_dir: bool) -> Result<bool, MatchError> {
        Ok(false)
    }
}

impl PatternMatcher for EmptyMatcher {
    fn as_patterns(&self) -> Vec<String> {
        Vec::new()
    }
}
