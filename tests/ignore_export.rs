// tests/ignore_export.rs

mod common;
use crate::common::builders::ResourceConfigBuilder;
use crate::common::p;

use std::path::Path;

use devloop::errors::DevloopError;
use devloop::export::{
    ignore_file_contents, render_ignore_file, widen_wildcards, write_ignore_file,
};
use devloop::fs::mock::MockFileSystem;
use devloop::fs::FileSystem;
use devloop::matcher::PathMatcher;
use globset::{GlobBuilder, GlobSet, GlobSetBuilder};
use devloop::watch::{anchor_patterns, ResourceProfile};

#[test]
fn relative_patterns_are_anchored_at_base() {
    let anchored = anchor_patterns(
        Path::new("/repo"),
        &["*.tmp".to_string(), "./build/**".to_string(), "/abs/**".to_string()],
    );
    assert_eq!(anchored, vec!["/repo/*.tmp", "/repo/build/**", "/abs/**"]);
}

#[test]
fn anchoring_escapes_glob_characters_in_base() {
    let anchored = anchor_patterns(Path::new("/work/[tmp]"), &["*.log".to_string()]);
    assert_eq!(anchored, vec!["/work/[[]tmp[]]/*.log"]);
}

#[test]
fn contents_are_relative_to_context() {
    let patterns = vec![
        "/repo/.git/**".to_string(),
        "/repo/*.tmp".to_string(),
        "/elsewhere/*.log".to_string(),
    ];
    let text = ignore_file_contents(Path::new("/repo"), &patterns);
    assert_eq!(text, ".git/**\n**/*.tmp\n/elsewhere/**/*.log\n");
}

#[test]
fn renders_default_then_resource_patterns() {
    let defaults = vec![".git/**".to_string()];
    let cfg = ResourceConfigBuilder::new(&["src"]).ignore("*.tmp").build();
    let profile = ResourceProfile::build("api", &cfg, &defaults, Path::new("/repo")).unwrap();

    assert_eq!(
        profile.ignore_patterns().unwrap(),
        vec!["/repo/.git/**".to_string(), "/repo/*.tmp".to_string()]
    );
    assert_eq!(render_ignore_file(&profile).unwrap(), ".git/**\n**/*.tmp\n");
}

#[test]
fn nested_context_strips_its_own_prefix() {
    let cfg = ResourceConfigBuilder::new(&["api"])
        .context("api")
        .ignore("api/**/*.log")
        .build();
    let profile = ResourceProfile::build("api", &cfg, &[], Path::new("/repo")).unwrap();
    assert_eq!(profile.context_dir(), Path::new("/repo/api"));
    assert_eq!(render_ignore_file(&profile).unwrap(), "**/*.log\n");
}

#[test]
fn resource_without_ignores_exports_empty_file() {
    let cfg = ResourceConfigBuilder::new(&["src"]).build();
    let profile = ResourceProfile::build("api", &cfg, &[], Path::new("/repo")).unwrap();
    assert_eq!(profile.ignore_patterns(), Some(vec![]));
    assert_eq!(render_ignore_file(&profile).unwrap(), "");
}

#[test]
fn ignore_dirs_make_export_unavailable() {
    let cfg = ResourceConfigBuilder::new(&["src"])
        .ignore("*.tmp")
        .ignore_dir("src/generated")
        .build();
    let profile = ResourceProfile::build("api", &cfg, &[], Path::new("/repo")).unwrap();

    assert!(profile.ignore_patterns().is_none());
    match render_ignore_file(&profile) {
        Err(DevloopError::ConfigError(msg)) => {
            assert!(msg.contains("api"));
            assert!(msg.contains("ignore_dirs"));
        }
        other => panic!("Expected ConfigError, got: {:?}", other),
    }

    let fs = MockFileSystem::new();
    assert!(write_ignore_file(&fs, &profile).is_err());
    assert!(fs.paths().is_empty(), "nothing may be written on failure");
}

#[test]
fn writes_ignore_file_into_context() {
    let cfg = ResourceConfigBuilder::new(&["src"]).ignore("*.tmp").build();
    let profile = ResourceProfile::build("api", &cfg, &[], Path::new("/repo")).unwrap();

    let fs = MockFileSystem::new();
    fs.add_file("/repo/.dockerignore", "stale\n");

    let written = write_ignore_file(&fs, &profile).unwrap();
    assert_eq!(written, p("/repo/.dockerignore"));
    assert_eq!(fs.read_to_string(&written).unwrap(), "**/*.tmp\n");
}

/// Compile ignore-file lines the way image builders read them: `*` stops at `/`.
fn ignore_file_set(text: &str) -> GlobSet {
    let mut builder = GlobSetBuilder::new();
    for line in text.lines() {
        builder.add(GlobBuilder::new(line).literal_separator(true).build().unwrap());
    }
    builder.build().unwrap()
}

#[test]
fn exported_lines_cover_nested_paths_the_watcher_ignores() {
    let cfg = ResourceConfigBuilder::new(&["src"])
        .ignore("*.tmp")
        .ignore("src/gen*.go")
        .build();
    let profile = ResourceProfile::build("api", &cfg, &[], Path::new("/repo")).unwrap();
    let exported = ignore_file_set(&render_ignore_file(&profile).unwrap());

    let ignored = [
        "scratch.tmp",
        "src/scratch.tmp",
        "src/a/b/scratch.tmp",
        "src/gen.go",
        "src/generated/x.go",
    ];
    for rel in ignored {
        let abs = Path::new("/repo").join(rel);
        assert!(profile.ignore_matcher().matches(&abs, false).unwrap(), "watcher: {rel}");
        assert!(exported.is_match(rel), "ignore file: {rel}");
    }

    for rel in ["src/main.go", "docs/tmp.md"] {
        let abs = Path::new("/repo").join(rel);
        assert!(!profile.ignore_matcher().matches(&abs, false).unwrap(), "watcher: {rel}");
        assert!(!exported.is_match(rel), "ignore file: {rel}");
    }
}

#[test]
fn wildcard_widening() {
    assert_eq!(widen_wildcards("*.tmp"), vec!["**/*.tmp"]);
    assert_eq!(widen_wildcards("build/*"), vec!["build/**/*"]);
    assert_eq!(widen_wildcards("**/*.log"), vec!["**/*.log"]);
    assert_eq!(widen_wildcards(".git/**"), vec![".git/**"]);
    assert_eq!(widen_wildcards("gen*.go"), vec!["gen*.go", "gen*/**/*.go"]);
    // Literal stars stay literal.
    assert_eq!(widen_wildcards("a[*]b"), vec!["a[*]b"]);
    assert_eq!(widen_wildcards("a\\*b"), vec!["a\\*b"]);
}
