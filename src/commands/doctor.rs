//! Health check command for diagnosing issues

use crate::core::config::ShiplineConfig;
use crate::core::error::{ExitCode, ShipResult};
use crate::core::vcs::SystemGit;
use crate::release::ledger;
use crate::store::GitStore;
use std::env;
use std::process::Command;

struct CheckResult {
  name: &'static str,
  passed: bool,
  message: String,
  suggestion: Option<String>,
}

fn check(name: &'static str, result: Result<String, (String, String)>) -> CheckResult {
  match result {
    Ok(message) => CheckResult {
      name,
      passed: true,
      message,
      suggestion: None,
    },
    Err((message, suggestion)) => CheckResult {
      name,
      passed: false,
      message,
      suggestion: Some(suggestion),
    },
  }
}

/// Run all health checks and report any issues found
pub fn run_doctor() -> ShipResult<()> {
  let workspace_root = env::current_dir()?;

  println!("🏥 Running health checks...\n");

  let mut results = Vec::new();

  results.push(check(
    "git",
    match Command::new("git").arg("--version").output() {
      Ok(output) if output.status.success() => Ok(String::from_utf8_lossy(&output.stdout).trim().to_string()),
      _ => Err((
        "git binary not found".to_string(),
        "Install git; shipline drives all repository operations through it.".to_string(),
      )),
    },
  ));

  let git = SystemGit::open(&workspace_root);
  results.push(check(
    "repository",
    match &git {
      Ok(git) => match git.current_branch() {
        Ok(branch) => Ok(format!("on branch {}", branch)),
        Err(e) => Err((e.to_string(), "Check the repository state.".to_string())),
      },
      Err(e) => Err((
        e.to_string(),
        "Run shipline from inside the service repository.".to_string(),
      )),
    },
  ));

  let config = ShiplineConfig::load(&workspace_root);
  results.push(check(
    "config",
    match &config {
      Ok(config) => Ok(format!(
        "{} component(s), mainline '{}'",
        config.components.len(),
        config.pipeline.mainline
      )),
      Err(e) => Err((e.to_string(), "Run `shipline init` or fix shipline.toml.".to_string())),
    },
  ));

  results.push(check(
    "version file",
    match &config {
      Ok(config) => match GitStore::open(&workspace_root, config).and_then(|store| ledger::current(&store)) {
        Ok(version) => Ok(format!("current version {}", version)),
        Err(e) => Err((
          e.to_string(),
          "The version file must contain exactly one line like 1.4.2.".to_string(),
        )),
      },
      Err(_) => Err((
        "skipped (config unavailable)".to_string(),
        "Fix the configuration first.".to_string(),
      )),
    },
  ));

  results.push(check(
    "origin remote",
    match &git {
      Ok(git) => match git.remote_url("origin") {
        Ok(Some(url)) => Ok(url),
        _ => Err((
          "no origin remote configured".to_string(),
          "Tags and proposal branches are pushed to origin; add the remote.".to_string(),
        )),
      },
      Err(_) => Err((
        "skipped (no repository)".to_string(),
        "Fix the repository first.".to_string(),
      )),
    },
  ));

  results.push(check(
    "gh CLI",
    match Command::new("gh").arg("--version").output() {
      Ok(output) if output.status.success() => Ok(
        String::from_utf8_lossy(&output.stdout)
          .lines()
          .next()
          .unwrap_or("available")
          .to_string(),
      ),
      _ => Err((
        "gh binary not found".to_string(),
        "Releases and pull requests are created through the gh CLI; install and authenticate it.".to_string(),
      )),
    },
  ));

  let mut has_errors = false;
  for result in &results {
    let icon = if result.passed { "✅" } else { "❌" };
    println!("{} {}: {}", icon, result.name, result.message);
    if !result.passed {
      has_errors = true;
      if let Some(suggestion) = &result.suggestion {
        println!("   💡 Fix: {}", suggestion);
      }
    }
  }

  let passed = results.iter().filter(|r| r.passed).count();
  println!();
  println!("Summary: {}/{} checks passed", passed, results.len());

  if has_errors {
    println!("\n⚠️  Issues found. Fix them before running the pipeline.");
    std::process::exit(ExitCode::Pipeline.as_i32());
  }

  println!("\n✨ All checks passed! Your setup looks healthy.");
  Ok(())
}
