//! Matcher test doubles.

use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use devloop::errors::MatchError;
use devloop::matcher::{PathMatcher, PatternMatcher};

/// Always fails with a query error.
#[derive(Debug, Clone, Default)]
pub struct FailingMatcher;

impl PathMatcher for FailingMatcher {
    fn matches(&self, path: &Path, _is_dir: bool) -> Result<bool, MatchError> {
        Err(MatchError::Query {
            path: path.to_path_buf(),
            reason: "simulated failure".to_string(),
        })
    }
}

/// Plain matcher (no pattern export) that matches exactly one path.
#[derive(Debug, Clone)]
pub struct OnlyPath(pub PathBuf);

impl PathMatcher for OnlyPath {
    fn matches(&self, path: &Path, _is_dir: bool) -> Result<bool, MatchError> {
        Ok(path == self.0)
    }
}

/// Pattern-capable matcher with a fixed answer and fixed patterns.
#[derive(Debug, Clone)]
pub struct FixedPatterns {
    pub answer: bool,
    pub patterns: Vec<String>,
}

impl FixedPatterns {
    pub fn new(answer: bool, patterns: &[&str]) -> Self {
        Self {
            answer,
            patterns: patterns.iter().map(|s| s.to_string()).collect(),
        }
    }
}

impl PathMatcher for FixedPatterns {
    fn matches(&self, _path: &Path, _is_dir: bool) -> Result<bool, MatchError> {
        Ok(self.answer)
    }
}

impl PatternMatcher for FixedPatterns {
    fn as_patterns(&self) -> Vec<String> {
        self.patterns.clone()
    }
}

/// Counts how often it is queried; used to check short-circuiting.
#[derive(Debug, Clone)]
pub struct CountingMatcher {
    pub answer: bool,
    calls: Arc<AtomicUsize>,
}

impl CountingMatcher {
    pub fn new(answer: bool) -> Self {
        Self {
            answer,
            calls: Arc::new(AtomicUsize::new(0)),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl PathMatcher for CountingMatcher {
    fn matches(&self, _path: &Path, _is_dir: bool) -> Result<bool, MatchError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.answer)
    }
}
