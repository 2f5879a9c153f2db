// src/lib.rs

pub mod cli;
pub mod config;
pub mod engine;
pub mod errors;
pub mod export;
pub mod fs;
pub mod logging;
pub mod matcher;
pub mod watch;

use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use tracing::{debug, info};

use crate::cli::CliArgs;
use crate::config::loader::load_and_validate;
use crate::config::model::ConfigFile;
use crate::engine::{dispatch_batch, ChangedPath, WatchPlan};
use crate::errors::DevloopError;
use crate::fs::RealFileSystem;
use crate::matcher::path_utils::resolve_absolute;
use crate::watch::event_handler::report_lines;

/// High-level entry point used by `main.rs`.
///
/// Loads and validates the config, compiles the per-resource matchers once,
/// then either answers a one-shot query (`--dry-run`, `--explain`,
/// `--print-ignore`, `--write-ignore`) or watches until Ctrl-C.
pub async fn run(args: CliArgs) -> Result<()> {
    let config_path = PathBuf::from(&args.config);
    let cfg = load_and_validate(&config_path)?;

    let root_dir = resolve_absolute(config_root_dir(&config_path))
        .context("resolving project root")?;
    let plan = WatchPlan::from_config(&cfg, &config_path, &root_dir)?;

    if args.dry_run {
        print_dry_run(&cfg, &plan);
        return Ok(());
    }

    if let Some(name) = args.print_ignore.as_deref() {
        let profile = find_profile(&plan, name)?;
        let contents = export::render_ignore_file(profile)?;
        print!("{contents}");
        return Ok(());
    }

    if let Some(name) = args.write_ignore.as_deref() {
        let profile = find_profile(&plan, name)?;
        let path = export::write_ignore_file(&RealFileSystem, profile)?;
        println!("[devloop] wrote {}", path.display());
        return Ok(());
    }

    if !args.explain.is_empty() {
        let batch = args
            .explain
            .iter()
            .map(|p| resolve_absolute(p).map(|abs| ChangedPath { is_dir: abs.is_dir(), path: abs }))
            .collect::<std::io::Result<Vec<_>>>()
            .context("resolving --explain paths")?;
        let outcome = dispatch_batch(&plan, &batch).map_err(DevloopError::from)?;
        if outcome.is_empty() {
            println!("[devloop] no resource is affected");
        }
        for line in report_lines(&root_dir, &outcome) {
            println!("{line}");
        }
        return Ok(());
    }

    let debounce = Duration::from_millis(cfg.config_section().debounce_ms);
    let _watcher_handle = watch::spawn_watcher(&root_dir, plan, debounce)?;

    tokio::signal::ctrl_c()
        .await
        .context("failed to listen for Ctrl+C")?;
    info!("shutdown requested");
    Ok(())
}

fn find_profile<'a>(plan: &'a WatchPlan, name: &str) -> Result<&'a watch::ResourceProfile> {
    plan.profile(name)
        .ok_or_else(|| DevloopError::ResourceNotFound(name.to_string()).into())
}

/// Directory relative resource paths are resolved against.
///
/// - `configs/Devloop.toml` → `configs`
/// - bare `Devloop.toml` (parent = "") → current working directory
fn config_root_dir(config_path: &Path) -> PathBuf {
    match config_path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    }
}

fn print_dry_run(cfg: &ConfigFile, plan: &WatchPlan) {
    println!("devloop dry-run");
    println!("  config.debounce_ms = {}", cfg.config_section().debounce_ms);
    if !cfg.default_section().ignore.is_empty() {
        println!("  default.ignore = {:?}", cfg.default_section().ignore);
    }
    println!();

    println!("resources ({}), in dependency order:", plan.profiles().len());
    for profile in plan.profiles() {
        let name = profile.name();
        println!("  - {name}");
        if let Some(resource) = cfg.resource(name) {
            println!("      deps: {:?}", resource.deps);
            if !resource.ignore.is_empty() {
                println!("      ignore: {:?}", resource.ignore);
            }
            if !resource.ignore_dirs.is_empty() {
                println!("      ignore_dirs: {:?}", resource.ignore_dirs);
            }
        }
        if !profile.resource_deps().is_empty() {
            println!("      resource_deps: {:?}", profile.resource_deps());
        }
        match profile.ignore_patterns() {
            Some(_) => println!("      ignore export: available"),
            None => println!("      ignore export: unavailable (non-pattern ignore rules)"),
        }
        if let Some(lu) = profile.live_update() {
            if !lu.fall_back_on().is_empty() {
                println!("      fall_back_on: {:?}", lu.fall_back_on().paths());
            }
            for sync in lu.syncs() {
                println!("      sync: {} -> {}", sync.local.display(), sync.remote);
            }
            for run in lu.runs() {
                println!("      run: {run}");
            }
        }
    }

    debug!("dry-run complete (no watching)");
}
