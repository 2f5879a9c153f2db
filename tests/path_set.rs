// tests/path_set.rs

mod common;
use crate::common::p;

use std::path::{Path, PathBuf};

use devloop::matcher::PathSet;

#[test]
fn any_match_returns_first_matching_candidate() {
    let set = PathSet::new(["a", "b"], "/r");
    let candidates = vec![p("/r/c"), p("/r/b/x")];
    assert_eq!(set.any_match(&candidates).unwrap(), Some(Path::new("/r/b/x")));
}

#[test]
fn any_match_follows_candidate_order_not_member_order() {
    let set = PathSet::new(["a", "b"], "/r");
    let candidates = vec![p("/r/b/1"), p("/r/a/2")];
    assert_eq!(set.any_match(&candidates).unwrap(), Some(Path::new("/r/b/1")));

    let reversed = vec![p("/r/a/2"), p("/r/b/1")];
    assert_eq!(set.any_match(&reversed).unwrap(), Some(Path::new("/r/a/2")));
}

#[test]
fn any_match_none_when_nothing_matches() {
    let set = PathSet::new(["a"], "/r");
    assert_eq!(set.any_match(&["/r/ab", "/other/a"]).unwrap(), None);
    assert_eq!(set.any_match::<PathBuf>(&[]).unwrap(), None);
}

#[test]
fn empty_path_set() {
    let set = PathSet::new(Vec::<PathBuf>::new(), "/r");
    assert!(set.is_empty());
    assert_eq!(set.any_match(&["/r", "/r/a"]).unwrap(), None);

    let set = PathSet::new(["go.mod"], "/r");
    assert!(!set.is_empty());
}

#[test]
fn keeps_declared_paths_and_base() {
    let set = PathSet::new(["src/", "/abs/dir"], "/repo");
    assert_eq!(set.paths(), &[p("src/"), p("/abs/dir")]);
    assert_eq!(set.base_directory(), Path::new("/repo"));

    assert_eq!(set.any_match(&["/abs/dir/x"]).unwrap(), Some(Path::new("/abs/dir/x")));
    assert_eq!(set.any_match(&["/repo/src"]).unwrap(), Some(Path::new("/repo/src")));
}

#[test]
fn any_match_is_pure() {
    let set = PathSet::new(["a"], "/r");
    let candidates = vec![p("/r/a/x")];
    let first = set.any_match(&candidates).unwrap();
    let second = set.any_match(&candidates).unwrap();
    assert_eq!(first, second);
}
