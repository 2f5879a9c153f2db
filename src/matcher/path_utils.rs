// src/matcher/path_utils.rs

//! Path resolution helpers shared by the matchers.
//!
//! Everything here is component-based (`Path::starts_with`, `Path == Path`),
//! never a raw string prefix test, so `/a/bc` is not considered to live under
//! `/a/b` and a trailing separator never changes an answer.

use std::io;
use std::path::{Path, PathBuf};

/// Resolve `path` against the process working directory.
///
/// Absolute paths are returned unchanged (apart from separator cleanup).
/// Fails only when the working directory itself cannot be determined.
pub fn resolve_absolute(path: impl AsRef<Path>) -> io::Result<PathBuf> {
    std::path::absolute(path)
}

/// Join a possibly-relative `path` onto `base`. Pure; never touches the
/// filesystem.
pub fn join_onto(base: &Path, path: impl AsRef<Path>) -> PathBuf {
    let path = path.as_ref();
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        base.join(path)
    }
}

/// True if `child` lies strictly inside the subtree rooted at `parent`.
pub fn is_child(parent: &Path, child: &Path) -> bool {
    child != parent && child.starts_with(parent)
}

/// `child` relative to `parent`, with forward slashes.
///
/// Returns `None` when `child` is not `parent` itself or one of its
/// descendants. `parent` itself maps to the empty string.
pub fn child_relative(parent: &Path, child: &Path) -> Option<String> {
    child
        .strip_prefix(parent)
        .ok()
        .map(|rel| rel.to_string_lossy().replace('\\', "/"))
}
