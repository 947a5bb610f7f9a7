//! Test helpers for integration tests

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use std::process::{Command, Output};
use tempfile::TempDir;

pub const DEFAULT_CONFIG: &str = r#"
[pipeline]
mainline = "main"
version_file = "VERSION"

[commit]
name = "Test Bot"
email = "bot@test.invalid"

[[components]]
name = "service"
build = "true"

[deploy]
command = "true"
environment = "test"
"#;

/// A test workspace: a git repo with a version file and shipline config,
/// a bare origin remote, and a stubbed `gh` binary on PATH
pub struct TestWorkspace {
  _root: TempDir,
  pub path: PathBuf,
  pub origin: PathBuf,
  stub_dir: PathBuf,
}

impl TestWorkspace {
  /// Create a workspace seeded with the given stored version
  pub fn new(version: &str) -> Result<Self> {
    let root = TempDir::new()?;
    let path = root.path().join("repo");
    let origin = root.path().join("origin.git");
    let stub_dir = root.path().join("bin");

    std::fs::create_dir_all(&path)?;
    std::fs::create_dir_all(&stub_dir)?;

    // Bare origin for pushed tags and branches
    git(root.path(), &["init", "--bare", "origin.git"])?;

    git(&path, &["init", "--initial-branch=main"])?;
    git(&path, &["config", "user.name", "Test User"])?;
    git(&path, &["config", "user.email", "test@example.com"])?;
    git(&path, &["remote", "add", "origin", origin.to_str().unwrap()])?;

    std::fs::write(path.join("VERSION"), format!("{}\n", version))?;
    std::fs::write(path.join("shipline.toml"), DEFAULT_CONFIG)?;

    let ws = Self {
      _root: root,
      path,
      origin,
      stub_dir,
    };

    ws.commit("Initial workspace setup")?;
    ws.write_gh_stub()?;

    Ok(ws)
  }

  /// Replace the shipline configuration
  pub fn set_config(&self, config: &str) -> Result<()> {
    std::fs::write(self.path.join("shipline.toml"), config)?;
    Ok(())
  }

  /// Overwrite the version file without committing
  pub fn set_version(&self, value: &str) -> Result<()> {
    std::fs::write(self.path.join("VERSION"), value)?;
    Ok(())
  }

  /// Commit current changes, returning the commit SHA
  pub fn commit(&self, message: &str) -> Result<String> {
    git(&self.path, &["add", "."])?;
    git(&self.path, &["commit", "--allow-empty", "-m", message])?;

    let output = git(&self.path, &["rev-parse", "HEAD"])?;
    Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
  }

  /// Check if a tag was pushed to origin
  pub fn origin_has_tag(&self, name: &str) -> Result<bool> {
    let output = git(&self.origin, &["tag", "--list"])?;
    Ok(
      String::from_utf8_lossy(&output.stdout)
        .lines()
        .any(|line| line.trim() == name),
    )
  }

  /// Check if a branch was pushed to origin
  pub fn origin_has_branch(&self, name: &str) -> Result<bool> {
    let output = git(&self.origin, &["branch", "--list", name])?;
    Ok(!String::from_utf8_lossy(&output.stdout).trim().is_empty())
  }

  /// Read a file as it exists on a branch in origin
  pub fn origin_file(&self, branch: &str, file: &str) -> Result<String> {
    let spec = format!("{}:{}", branch, file);
    let output = git(&self.origin, &["show", &spec])?;
    Ok(String::from_utf8_lossy(&output.stdout).to_string())
  }

  /// Branch currently checked out in the working repo
  pub fn current_branch(&self) -> Result<String> {
    let output = git(&self.path, &["rev-parse", "--abbrev-ref", "HEAD"])?;
    Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
  }

  /// Read a file from the working tree
  pub fn read_file(&self, file: &str) -> Result<String> {
    Ok(std::fs::read_to_string(self.path.join(file))?)
  }

  /// Arguments the stubbed gh binary was invoked with, one call per line
  pub fn gh_calls(&self) -> Result<Vec<String>> {
    let log = self.path.join("gh-calls.log");
    if !log.exists() {
      return Ok(Vec::new());
    }
    Ok(
      std::fs::read_to_string(log)?
        .lines()
        .map(String::from)
        .collect(),
    )
  }

  /// Run shipline in this workspace, returning the raw output
  pub fn shipline(&self, args: &[&str]) -> Result<Output> {
    let bin = env!("CARGO_BIN_EXE_shipline");
    let path_var = format!(
      "{}:{}",
      self.stub_dir.display(),
      std::env::var("PATH").unwrap_or_default()
    );

    Command::new(bin)
      .current_dir(&self.path)
      .args(args)
      .env("PATH", path_var)
      // The host CI environment must not leak into event resolution
      .env_remove("GITHUB_EVENT_NAME")
      .env_remove("GITHUB_REF_NAME")
      .env_remove("GITHUB_SHA")
      .output()
      .context("Failed to run shipline")
  }

  /// Run shipline and fail the test if it exits unsuccessfully
  pub fn shipline_ok(&self, args: &[&str]) -> Result<Output> {
    let output = self.shipline(args)?;

    if !output.status.success() {
      let stderr = String::from_utf8_lossy(&output.stderr);
      let stdout = String::from_utf8_lossy(&output.stdout);
      anyhow::bail!(
        "shipline command failed: shipline {}\nstdout: {}\nstderr: {}",
        args.join(" "),
        stdout,
        stderr
      );
    }

    Ok(output)
  }

  /// Write a gh stub that records its arguments and succeeds
  fn write_gh_stub(&self) -> Result<()> {
    let stub = self.stub_dir.join("gh");
    std::fs::write(&stub, "#!/bin/sh\necho \"$@\" >> gh-calls.log\nexit 0\n")?;

    #[cfg(unix)]
    {
      use std::os::unix::fs::PermissionsExt;
      std::fs::set_permissions(&stub, std::fs::Permissions::from_mode(0o755))?;
    }

    Ok(())
  }
}

/// Run git command in a directory
pub fn git(cwd: &Path, args: &[&str]) -> Result<Output> {
  let output = Command::new("git")
    .current_dir(cwd)
    .args(args)
    .output()
    .context("Failed to run git command")?;

  if !output.status.success() {
    let stderr = String::from_utf8_lossy(&output.stderr);
    anyhow::bail!("Git command failed: git {}\n{}", args.join(" "), stderr);
  }

  Ok(output)
}

/// Parse stdout as JSON
pub fn json_stdout(output: &Output) -> Result<serde_json::Value> {
  let stdout = String::from_utf8_lossy(&output.stdout);
  serde_json::from_str(&stdout).with_context(|| format!("stdout was not JSON: {}", stdout))
}
