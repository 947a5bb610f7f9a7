//! Run command: execute the full pipeline for one trigger event
//!
//! Control flow: resolve event → evaluate gates → run build/deploy/release
//! through the stage graph. The release stage reads the pre-bump version,
//! publishes tag + release at that version, then proposes the bumped
//! version on a review branch.

use crate::commands::resolve_event;
use crate::core::config::{ComponentConfig, ShiplineConfig};
use crate::core::error::{ShipError, ShipResult, StageError};
use crate::core::vcs::SystemGit;
use crate::pipeline::{PipelineReport, StageDefinition, StageGraph, StageOutcome};
use crate::release::{ledger, proposal, publisher};
use crate::store::GitStore;
use crate::trigger::{self, BumpKind, EventKind, GateDecision, TriggerEvent};
use rayon::prelude::*;
use serde::Serialize;
use std::env;
use std::path::Path;
use std::process::Command;

/// Machine-readable summary of one pipeline run
#[derive(Serialize)]
struct RunSummary<'a> {
  event: &'a TriggerEvent,
  decision: &'a GateDecision,
  stages: &'a [crate::pipeline::StageRun],
}

pub fn run_pipeline(
  event_type: Option<EventKind>,
  branch: Option<String>,
  message: Option<String>,
  sha: Option<String>,
  dry_run: bool,
  json: bool,
) -> ShipResult<()> {
  let workspace_root = env::current_dir()?;
  let config = ShiplineConfig::load(&workspace_root)?;
  let git = SystemGit::open(&workspace_root)?;

  let event = resolve_event(&git, event_type, branch, message, sha)?;
  let decision = trigger::evaluate(&event);

  if !json {
    print_header(&event, &decision);
  }

  if dry_run {
    return print_plan(&config, &event, &decision, json);
  }

  let mut store = GitStore::open(&workspace_root, &config)?;

  let stages = vec![
    build_stage(&config, &workspace_root, json),
    deploy_stage(&config, &workspace_root, json),
    release_stage(&config, &event, decision.bump, &mut store, json),
  ];

  let report = StageGraph::new(stages).run(&decision)?;

  if json {
    let summary = RunSummary {
      event: &event,
      decision: &decision,
      stages: &report.runs,
    };
    println!("{}", serde_json::to_string_pretty(&summary)?);
  } else {
    print_report(&report);
  }

  match report.into_failure() {
    Some(err) => Err(err),
    None => Ok(()),
  }
}

fn build_stage<'run>(config: &'run ShiplineConfig, root: &'run Path, quiet: bool) -> StageDefinition<'run> {
  StageDefinition {
    name: "build",
    depends_on: &[],
    gate: |_| true,
    work: Box::new(move || {
      // Components have no ordering dependency on each other
      let results: Vec<ShipResult<()>> = config
        .components
        .par_iter()
        .map(|component| build_component(component, root, quiet))
        .collect();

      results.into_iter().collect()
    }),
  }
}

fn build_component(component: &ComponentConfig, root: &Path, quiet: bool) -> ShipResult<()> {
  if !quiet {
    println!("🔨 building {}: {}", component.name, component.build);
  }
  run_stage_command("build", &component.build, &[], root)
}

fn deploy_stage<'run>(config: &'run ShiplineConfig, root: &'run Path, quiet: bool) -> StageDefinition<'run> {
  StageDefinition {
    name: "deploy",
    depends_on: &["build"],
    gate: |d| d.run_deploy,
    work: Box::new(move || {
      if !quiet {
        println!("🚀 deploying: {}", config.deploy.command);
      }
      run_stage_command("deploy", &config.deploy.command, &config.deploy.env_vars(), root)
    }),
  }
}

fn release_stage<'run>(
  config: &'run ShiplineConfig,
  event: &'run TriggerEvent,
  bump: BumpKind,
  store: &'run mut GitStore,
  quiet: bool,
) -> StageDefinition<'run> {
  StageDefinition {
    name: "release",
    depends_on: &["deploy"],
    gate: |d| d.run_release,
    work: Box::new(move || {
      // A malformed stored version halts here, before any tag work
      let current = ledger::current(&*store)?;
      let next = ledger::next(&current, bump);
      let notes = release_notes(&current, event);

      if !quiet {
        println!("🏷  publishing tag v{} at {}", current, short_sha(&event.commit_sha));
      }
      let release = publisher::publish(&mut *store, &current, &event.commit_sha, &notes)?;
      if !quiet {
        println!(
          "📦 {} published: {}",
          release.tag_name,
          release.notes.lines().next().unwrap_or("")
        );
      }

      if !quiet {
        println!(
          "🔀 proposing version update {} → {} (branch {})",
          current,
          next,
          proposal::branch_name(&next)
        );
      }
      proposal::propose_version_update(&mut *store, &next, &config.pipeline.mainline)?;

      Ok(())
    }),
  }
}

/// Run a stage's shell command, streaming its output
fn run_stage_command(stage: &str, command: &str, envs: &[(&str, &str)], root: &Path) -> ShipResult<()> {
  let status = Command::new("sh")
    .arg("-c")
    .arg(command)
    .current_dir(root)
    .envs(envs.iter().copied())
    .status()
    .map_err(|e| {
      ShipError::Stage(StageError {
        stage: stage.to_string(),
        reason: format!("failed to execute `{}`: {}", command, e),
      })
    })?;

  if !status.success() {
    return Err(ShipError::Stage(StageError {
      stage: stage.to_string(),
      reason: format!("`{}` exited with {}", command, status),
    }));
  }

  Ok(())
}

fn release_notes(version: &semver::Version, event: &TriggerEvent) -> String {
  let subject = event.commit_message.lines().next().unwrap_or("");
  format!(
    "Automated release of v{} from commit {} on {}.\n\nTriggering change: {}",
    version,
    short_sha(&event.commit_sha),
    chrono::Utc::now().format("%Y-%m-%d"),
    subject
  )
}

fn short_sha(sha: &str) -> &str {
  &sha[..7.min(sha.len())]
}

fn print_header(event: &TriggerEvent, decision: &GateDecision) {
  let event_name = match event.event_type {
    EventKind::Push => "push",
    EventKind::PullRequest => "pull_request",
  };

  println!("🚦 shipline run");
  println!("   event:   {} @ {} ({})", event_name, event.branch, short_sha(&event.commit_sha));
  println!(
    "   message: {}",
    event.commit_message.lines().next().unwrap_or("(empty)")
  );
  println!();
  println!("   deploy:  {}", if decision.run_deploy { "run" } else { "skip" });
  println!(
    "   release: {}{}",
    if decision.run_release { "run" } else { "skip" },
    if decision.run_release {
      match decision.bump {
        BumpKind::Minor => " (minor bump)",
        BumpKind::Patch => " (patch bump)",
      }
    } else {
      ""
    }
  );
  println!();
}

fn print_plan(config: &ShiplineConfig, event: &TriggerEvent, decision: &GateDecision, json: bool) -> ShipResult<()> {
  if json {
    let summary = serde_json::json!({
      "event": event,
      "decision": decision,
      "dry_run": true,
    });
    println!("{}", serde_json::to_string_pretty(&summary)?);
    return Ok(());
  }

  println!("🔍 Dry-run plan");
  println!("   build:   {} component(s)", config.components.len());
  println!("   deploy:  {}", if decision.run_deploy { "would run" } else { "skipped" });

  if decision.run_release {
    let workspace_root = env::current_dir()?;
    let store = GitStore::open(&workspace_root, config)?;
    match ledger::current(&store) {
      Ok(current) => {
        let next = ledger::next(&current, decision.bump);
        println!("   release: would tag v{} and propose {}", current, next);
      }
      Err(err) => println!("   release: would fail ({})", err),
    }
  } else {
    println!("   release: skipped");
  }

  println!();
  println!("💡 This was a dry-run. Re-run without --dry-run to execute.");
  Ok(())
}

fn print_report(report: &PipelineReport) {
  println!();
  for run in &report.runs {
    let icon = match run.outcome {
      StageOutcome::Succeeded => "✅",
      StageOutcome::Skipped => "⏭ ",
      StageOutcome::Failed => "❌",
    };
    match &run.detail {
      Some(detail) if run.outcome != StageOutcome::Succeeded => {
        println!("{} {} ({})", icon, run.stage, detail);
      }
      _ => println!("{} {}", icon, run.stage),
    }
  }
}
