// tests/live_update_decisions.rs

mod common;
use crate::common::builders::{ConfigFileBuilder, ResourceConfigBuilder};
use crate::common::{init_tracing, p};

use std::path::Path;

use devloop::engine::{
    decide, dispatch_batch, BuildDecision, ChangedPath, FileSync, FullRebuildReason, WatchPlan,
};
use devloop::watch::ResourceProfile;

const REPO: &str = "/repo";

fn profile(builder: ResourceConfigBuilder) -> ResourceProfile {
    ResourceProfile::build("api", &builder.build(), &[], Path::new(REPO)).unwrap()
}

#[test]
fn include_and_ignore_classify_changes() {
    init_tracing();
    let api = profile(ResourceConfigBuilder::new(&["src/"]).ignore("*.tmp"));

    assert!(api.matches(&p("/repo/src/main.go"), false).unwrap());
    assert!(!api.matches(&p("/repo/src/scratch.tmp"), false).unwrap());
    assert!(!api.matches(&p("/repo/docs/readme.md"), false).unwrap());
    assert!(!api.matches(&p("/repo/srcs/main.go"), false).unwrap());
}

#[test]
fn ignore_dirs_exclude_whole_subtrees() {
    let api = profile(ResourceConfigBuilder::new(&["src"]).ignore_dir("src/generated"));
    assert!(api.matches(&p("/repo/src/main.go"), false).unwrap());
    assert!(!api.matches(&p("/repo/src/generated/api.pb.go"), false).unwrap());
    assert!(!api.matches(&p("/repo/src/generated"), true).unwrap());
    assert!(api.matches(&p("/repo/src/generated_by_hand.go"), false).unwrap());
}

#[test]
fn default_ignores_apply_unless_opted_out() {
    let defaults = vec![".git/**".to_string()];
    let cfg = ResourceConfigBuilder::new(&["."]).build();
    let with = ResourceProfile::build("a", &cfg, &defaults, Path::new(REPO)).unwrap();
    assert!(!with.matches(&p("/repo/.git/HEAD"), false).unwrap());

    let cfg = ResourceConfigBuilder::new(&["."]).append_default_ignore(false).build();
    let without = ResourceProfile::build("a", &cfg, &defaults, Path::new(REPO)).unwrap();
    assert!(without.matches(&p("/repo/.git/HEAD"), false).unwrap());
}

#[test]
fn no_changes_means_no_change() {
    let api = profile(ResourceConfigBuilder::new(&["src"]));
    assert_eq!(decide(&api, &[]).unwrap(), BuildDecision::NoChange);
}

#[test]
fn without_live_update_every_change_is_a_full_rebuild() {
    let api = profile(ResourceConfigBuilder::new(&["src"]));
    let changed = vec![p("/repo/src/a.go"), p("/repo/src/b.go")];
    assert_eq!(
        decide(&api, &changed).unwrap(),
        BuildDecision::FullRebuild {
            reason: FullRebuildReason::NoLiveUpdate,
            path: p("/repo/src/a.go"),
        }
    );
}

#[test]
fn fall_back_on_forces_full_rebuild() {
    let api = profile(
        ResourceConfigBuilder::new(&["src", "go.mod"])
            .fall_back_on("go.mod")
            .sync("src", "/app/src"),
    );
    let changed = vec![p("/repo/src/a.go"), p("/repo/go.mod")];
    assert_eq!(
        decide(&api, &changed).unwrap(),
        BuildDecision::FullRebuild {
            reason: FullRebuildReason::FallBackOn,
            path: p("/repo/go.mod"),
        }
    );
}

#[test]
fn synced_changes_become_a_live_update() {
    let api = profile(ResourceConfigBuilder::new(&["src"]).sync("src", "/app/src/"));
    let changed = vec![p("/repo/src/a.go"), p("/repo/src/pkg/b.go")];

    assert_eq!(
        decide(&api, &changed).unwrap(),
        BuildDecision::LiveUpdate {
            files: vec![
                FileSync {
                    local: p("/repo/src/a.go"),
                    remote: "/app/src/a.go".to_string(),
                },
                FileSync {
                    local: p("/repo/src/pkg/b.go"),
                    remote: "/app/src/pkg/b.go".to_string(),
                },
            ],
            runs: vec![],
        }
    );
}

#[test]
fn unsynced_change_forces_full_rebuild() {
    let api = profile(ResourceConfigBuilder::new(&["src", "assets"]).sync("src", "/app/src"));
    let changed = vec![p("/repo/src/a.go"), p("/repo/assets/logo.png")];
    assert_eq!(
        decide(&api, &changed).unwrap(),
        BuildDecision::FullRebuild {
            reason: FullRebuildReason::NotSynced,
            path: p("/repo/assets/logo.png"),
        }
    );
}

#[test]
fn run_steps_fire_on_their_triggers() {
    let api = profile(
        ResourceConfigBuilder::new(&["src"])
            .sync("src", "/app/src")
            .run("make proto", &["src/proto"])
            .run("touch /tmp/reload", &[]),
    );

    let plain = decide(&api, &[p("/repo/src/a.go")]).unwrap();
    match plain {
        BuildDecision::LiveUpdate { runs, .. } => {
            assert_eq!(runs, vec!["touch /tmp/reload".to_string()])
        }
        other => panic!("Expected LiveUpdate, got: {:?}", other),
    }

    let proto = decide(&api, &[p("/repo/src/a.go"), p("/repo/src/proto/x.proto")]).unwrap();
    match proto {
        BuildDecision::LiveUpdate { runs, files } => {
            assert_eq!(files.len(), 2);
            assert_eq!(
                runs,
                vec!["make proto".to_string(), "touch /tmp/reload".to_string()]
            );
        }
        other => panic!("Expected LiveUpdate, got: {:?}", other),
    }
}

fn two_resource_plan() -> WatchPlan {
    // `alpha` depends on `zeta`, so `zeta` is reported first even though it
    // sorts last by name.
    let cfg = ConfigFileBuilder::new()
        .with_default_ignore("**/*.swp")
        .with_resource(
            "alpha",
            ResourceConfigBuilder::new(&["shared", "alpha"])
                .after("zeta")
                .sync("alpha", "/srv/alpha")
                .build(),
        )
        .with_resource("zeta", ResourceConfigBuilder::new(&["shared"]).build())
        .build();
    WatchPlan::from_config(&cfg, Path::new("/repo/Devloop.toml"), Path::new(REPO)).unwrap()
}

#[test]
fn dispatch_reports_affected_resources_in_dependency_order() {
    let plan = two_resource_plan();
    let names: Vec<&str> = plan.profiles().iter().map(|p| p.name()).collect();
    assert_eq!(names, vec!["zeta", "alpha"]);

    let outcome = dispatch_batch(
        &plan,
        &[
            ChangedPath::file("/repo/shared/lib.go"),
            ChangedPath::file("/repo/alpha/main.go"),
            ChangedPath::file("/repo/shared/.lib.go.swp"),
        ],
    )
    .unwrap();

    assert!(!outcome.config_changed);
    let resources: Vec<&str> = outcome.decisions.iter().map(|d| d.resource.as_str()).collect();
    assert_eq!(resources, vec!["zeta", "alpha"]);

    let zeta = &outcome.decisions[0];
    assert_eq!(zeta.changed, vec![p("/repo/shared/lib.go")]);
    assert!(zeta.decision.is_full_rebuild());

    let alpha = &outcome.decisions[1];
    assert_eq!(alpha.changed, vec![p("/repo/shared/lib.go"), p("/repo/alpha/main.go")]);
    assert_eq!(
        alpha.decision,
        BuildDecision::FullRebuild {
            reason: FullRebuildReason::NotSynced,
            path: p("/repo/shared/lib.go"),
        }
    );
}

#[test]
fn dispatch_skips_unaffected_resources() {
    let plan = two_resource_plan();
    let outcome = dispatch_batch(&plan, &[ChangedPath::file("/repo/alpha/main.go")]).unwrap();
    assert_eq!(outcome.decisions.len(), 1);
    assert_eq!(outcome.decisions[0].resource, "alpha");
    assert!(outcome.decisions[0].decision.is_live_update());

    let outcome = dispatch_batch(&plan, &[ChangedPath::file("/repo/README.md")]).unwrap();
    assert!(outcome.is_empty());
}

#[test]
fn dispatch_flags_config_file_changes() {
    let plan = two_resource_plan();
    let outcome = dispatch_batch(
        &plan,
        &[
            ChangedPath::file("/repo/README.md"),
            ChangedPath::file("/repo/Devloop.toml"),
        ],
    )
    .unwrap();
    assert!(outcome.config_changed);
    assert!(outcome.decisions.is_empty());
    assert!(!outcome.is_empty());
}

#[test]
fn end_to_end_include_and_ignore() {
    let cfg = ConfigFileBuilder::new()
        .with_resource("app", ResourceConfigBuilder::new(&["src/"]).ignore("*.tmp").build())
        .build();
    let plan =
        WatchPlan::from_config(&cfg, Path::new("/repo/Devloop.toml"), Path::new(REPO)).unwrap();

    let hit = dispatch_batch(&plan, &[ChangedPath::file("/repo/src/main.go")]).unwrap();
    assert_eq!(hit.decisions.len(), 1);

    let tmp = dispatch_batch(&plan, &[ChangedPath::file("/repo/src/scratch.tmp")]).unwrap();
    assert!(tmp.decisions.is_empty());

    let docs = dispatch_batch(&plan, &[ChangedPath::file("/repo/docs/readme.md")]).unwrap();
    assert!(docs.decisions.is_empty());
}
