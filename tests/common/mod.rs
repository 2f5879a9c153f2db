#![allow(dead_code)]

pub use devloop_test_utils::builders;
pub use devloop_test_utils::doubles;
pub use devloop_test_utils::init_tracing;

use std::path::PathBuf;

/// Shorthand for building absolute test paths.
pub fn p(s: &str) -> PathBuf {
    PathBuf::from(s)
}
