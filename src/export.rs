// src/export.rs

//! Export a resource's ignore rules as an image-build ignore file.

use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::errors::{DevloopError, Result};
use crate::fs::FileSystem;
use crate::watch::profile::ResourceProfile;

pub const IGNORE_FILE_NAME: &str = ".dockerignore";

/// Render `patterns` as ignore-file lines relative to `context_dir`.
///
/// Patterns anchored inside the context have the context prefix removed;
/// anything else is kept absolute. Single `*` wildcards are widened with
/// [`widen_wildcards`] so each rendered line covers every path the watcher
/// ignores for it.
pub fn ignore_file_contents(context_dir: &Path, patterns: &[String]) -> String {
    let context = context_dir.to_string_lossy().replace('\\', "/");
    let prefix = format!("{}/", globset::escape(&context).trim_end_matches('/'));

    let mut out = String::new();
    for pat in patterns {
        let rel = match pat.strip_prefix(&prefix) {
            Some(rel) if !rel.is_empty() => rel,
            _ => {
                debug!(pattern = %pat, context = ?context_dir, "pattern outside build context");
                pat.as_str()
            }
        };
        for line in widen_wildcards(rel) {
            out.push_str(&line);
            out.push('\n');
        }
    }
    out
}

/// Rewrite a watcher glob, where `*` also matches `/`, into ignore-file
/// lines where `*` stops at `/`.
///
/// A `*` opening a path segment becomes `**/*`. A `*` inside a segment
/// yields two lines: one where it stays within the segment and one where
/// it spans directories (`*/**/*`). `**`, bracket classes and escaped
/// characters are copied unchanged.
pub fn widen_wildcards(pattern: &str) -> Vec<String> {
    let chars: Vec<char> = pattern.chars().collect();
    let mut lines = vec![String::new()];
    let mut i = 0;
    let mut in_class = false;

    while i < chars.len() {
        let c = chars[i];
        if in_class {
            if c == ']' {
                in_class = false;
            }
            push_all(&mut lines, c);
            i += 1;
            continue;
        }
        match c {
            '\\' => {
                push_all(&mut lines, c);
                if let Some(&next) = chars.get(i + 1) {
                    push_all(&mut lines, next);
                    i += 1;
                }
            }
            '[' => {
                in_class = true;
                push_all(&mut lines, c);
                // `]` right after `[` (or `[!`) is part of the class.
                if chars.get(i + 1) == Some(&'!') {
                    push_all(&mut lines, '!');
                    i += 1;
                }
                if chars.get(i + 1) == Some(&']') {
                    push_all(&mut lines, ']');
                    i += 1;
                }
            }
            '*' => {
                let run = chars[i..].iter().take_while(|&&ch| ch == '*').count();
                if run > 1 {
                    for line in &mut lines {
                        line.extend(std::iter::repeat_n('*', run));
                    }
                    i += run;
                    continue;
                }
                // Variants only differ before the latest split, so any one of
                // them tells whether this `*` opens a segment.
                let before = &lines[0];
                let segment_start = before.is_empty() || before.ends_with('/');
                if segment_start && !before.ends_with("**/") {
                    for line in &mut lines {
                        line.push_str("**/*");
                    }
                } else if segment_start {
                    push_all(&mut lines, '*');
                } else {
                    lines = lines
                        .into_iter()
                        .flat_map(|line| [format!("{line}*"), format!("{line}*/**/*")])
                        .collect();
                }
            }
            _ => push_all(&mut lines, c),
        }
        i += 1;
    }
    lines
}

fn push_all(lines: &mut [String], c: char) {
    for line in lines {
        line.push(c);
    }
}

/// The ignore-file text for `profile`.
///
/// Fails if the resource's ignore rules cannot be expressed as patterns.
pub fn render_ignore_file(profile: &ResourceProfile) -> Result<String> {
    let patterns = profile.ignore_patterns().ok_or_else(|| {
        DevloopError::ConfigError(format!(
            "resource '{}': ignore rules include `ignore_dirs` and cannot be exported as patterns",
            profile.name()
        ))
    })?;
    Ok(ignore_file_contents(profile.context_dir(), &patterns))
}

/// Write `<context>/.dockerignore` for `profile` and return its path.
pub fn write_ignore_file(fs: &dyn FileSystem, profile: &ResourceProfile) -> Result<PathBuf> {
    let contents = render_ignore_file(profile)?;
    let path = profile.context_dir().join(IGNORE_FILE_NAME);
    if fs.exists(&path) {
        info!(path = ?path, "overwriting existing ignore file");
    }
    fs.write(&path, contents.as_bytes())?;
    Ok(path)
}
