// src/matcher/mod.rs

//! Path-matching engine.
//!
//! Every matcher is an immutable predicate over *absolute* paths. Relative
//! inputs are resolved once, when the matcher is built, and never again at
//! query time. Matchers hold no interior state, so a built matcher can be
//! shared behind an `Arc` and queried from any number of tasks at once.
//!
//! Two capabilities exist:
//! - [`PathMatcher`]: "does this path match?"
//! - [`PatternMatcher`]: a `PathMatcher` that can also express itself as a
//!   list of glob patterns (for an image-build ignore file).
//!
//! [`Matcher`] tags a built matcher with its capability. The tag is fixed by
//! the concrete type the matcher was built from, and [`build_composite`]
//! keeps the pattern capability only if *every* member has it.

use std::fmt;
use std::path::Path;
use std::sync::Arc;

use crate::errors::MatchError;

pub mod composite;
pub mod descendant;
pub mod empty;
pub mod exact;
pub mod glob;
pub mod path_set;
pub mod path_utils;

pub use composite::{build_composite, CompositeMatcher, CompositePatternMatcher};
pub use descendant::SetOrDescendantMatcher;
pub use empty::EmptyMatcher;
pub use exact::ExactSetMatcher;
pub use glob::GlobMatcher;
pub use path_set::PathSet;

/// Answers whether an absolute path matches.
///
/// `is_dir` is a hint from the watcher. None of the matchers in this module
/// look at it, but it stays in the signature so directory-aware matchers can
/// be composed with the existing ones.
///
/// An `Err` is authoritative: it is not a non-match, and composites stop at
/// the first one.
pub trait PathMatcher: fmt::Debug + Send + Sync {
    fn matches(&self, path: &Path, is_dir: bool) -> Result<bool, MatchError>;
}

/// A [`PathMatcher`] that can be exported as glob patterns, e.g. lines of a
/// `.dockerignore` file.
pub trait PatternMatcher: PathMatcher {
    /// Patterns in evaluation order.
    fn as_patterns(&self) -> Vec<String>;
}

/// A built matcher tagged with its capability.
#[derive(Debug, Clone)]
pub enum Matcher {
    Plain(Arc<dyn PathMatcher>),
    Pattern(Arc<dyn PatternMatcher>),
}

impl Matcher {
    pub fn plain<M: PathMatcher + 'static>(matcher: M) -> Self {
        Matcher::Plain(Arc::new(matcher))
    }

    pub fn pattern<M: PatternMatcher + 'static>(matcher: M) -> Self {
        Matcher::Pattern(Arc::new(matcher))
    }

    /// The matcher that matches nothing.
    pub fn empty() -> Self {
        Matcher::pattern(EmptyMatcher)
    }

    pub fn is_pattern_capable(&self) -> bool {
        matches!(self, Matcher::Pattern(_))
    }

    pub fn as_pattern_matcher(&self) -> Option<&dyn PatternMatcher> {
        match self {
            Matcher::Pattern(p) => Some(p.as_ref()),
            Matcher::Plain(_) => None,
        }
    }

    /// Exported patterns, or `None` if this matcher cannot be expressed as
    /// patterns.
    pub fn as_patterns(&self) -> Option<Vec<String>> {
        self.as_pattern_matcher().map(|p| p.as_patterns())
    }
}

impl PathMatcher for Matcher {
    fn matches(&self, path: &Path, is_dir: bool) -> Result<bool, MatchError> {
        match self {
            Matcher::Plain(m) => m.matches(path, is_dir),
            Matcher::Pattern(m) => m.matches(path, is_dir),
        }
    }
}

impl From<EmptyMatcher> for Matcher {
    fn from(m: EmptyMatcher) -> Self {
        Matcher::pattern(m)
    }
}

impl From<GlobMatcher> for Matcher {
    fn from(m: GlobMatcher) -> Self {
        Matcher::pattern(m)
    }
}

impl From<ExactSetMatcher> for Matcher {
    fn from(m: ExactSetMatcher) -> Self {
        Matcher::plain(m)
    }
}

impl From<SetOrDescendantMatcher> for Matcher {
    fn from(m: SetOrDescendantMatcher) -> Self {
        Matcher::plain(m)
    }
}
