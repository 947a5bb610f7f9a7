//! System git backend - zero dependencies
//!
//! Uses git plumbing commands for all operations, executed in an isolated
//! environment so user configuration cannot change behavior mid-run.

use crate::core::config::CommitIdentity;
use crate::core::error::{GitError, ShipError, ShipResult, ResultExt};
use std::path::{Path, PathBuf};
use std::process::Command;

/// Git backend using system git (zero crate dependencies)
pub struct SystemGit {
  /// Repository working directory
  repo_path: PathBuf,
}

impl SystemGit {
  /// Open a git repository
  pub fn open(path: &Path) -> ShipResult<Self> {
    let output = Command::new("git")
      .arg("-C")
      .arg(path)
      .args(["rev-parse", "--show-toplevel"])
      .output()
      .context("Failed to execute git rev-parse")?;

    if !output.status.success() {
      let stderr = String::from_utf8_lossy(&output.stderr);
      if stderr.contains("not a git repository") {
        return Err(ShipError::Git(GitError::RepoNotFound {
          path: path.to_path_buf(),
        }));
      }
      return Err(ShipError::message(format!("Failed to open git repository: {}", stderr)));
    }

    Ok(Self {
      repo_path: path.to_path_buf(),
    })
  }

  /// Get HEAD commit SHA
  pub fn head_commit(&self) -> ShipResult<String> {
    let output = self.run(&["rev-parse", "HEAD"])?;
    Ok(output.trim().to_string())
  }

  /// Get current branch name ("HEAD" when detached)
  pub fn current_branch(&self) -> ShipResult<String> {
    let output = self
      .git_cmd()
      .args(["rev-parse", "--abbrev-ref", "HEAD"])
      .output()
      .context("Failed to get current branch")?;

    if !output.status.success() {
      return Ok("HEAD".to_string());
    }

    Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
  }

  /// Get the full message of the HEAD commit
  pub fn head_message(&self) -> ShipResult<String> {
    let output = self.run(&["log", "-1", "--format=%B"])?;
    Ok(output.trim_end().to_string())
  }

  /// Check whether an annotated or lightweight tag exists
  pub fn tag_exists(&self, name: &str) -> ShipResult<bool> {
    self.ref_exists(&format!("refs/tags/{}", name))
  }

  /// Check whether a local branch exists
  pub fn branch_exists(&self, name: &str) -> ShipResult<bool> {
    self.ref_exists(&format!("refs/heads/{}", name))
  }

  fn ref_exists(&self, refname: &str) -> ShipResult<bool> {
    let output = self
      .git_cmd()
      .args(["rev-parse", "-q", "--verify", refname])
      .output()
      .context("Failed to verify ref")?;

    Ok(output.status.success())
  }

  /// Create an annotated tag at a commit
  pub fn create_tag(&self, name: &str, commit_sha: &str, message: &str, identity: &CommitIdentity) -> ShipResult<()> {
    let output = self
      .identified_cmd(identity)
      .args(["tag", "-a", name, "-m", message, commit_sha])
      .output()
      .context("Failed to run git tag")?;

    if !output.status.success() {
      let stderr = String::from_utf8_lossy(&output.stderr);
      return Err(ShipError::Git(GitError::CommandFailed {
        command: format!("git tag -a {}", name),
        stderr: stderr.to_string(),
      }));
    }

    Ok(())
  }

  /// Create a branch at the current head and check it out
  pub fn create_branch(&self, name: &str) -> ShipResult<()> {
    self.run(&["checkout", "-b", name]).map(|_| ())
  }

  /// Check out an existing branch
  pub fn checkout(&self, name: &str) -> ShipResult<()> {
    self.run(&["checkout", name]).map(|_| ())
  }

  /// Stage a path for commit
  pub fn stage(&self, path: &Path) -> ShipResult<()> {
    let spec = path.display().to_string();
    self.run(&["add", "--", &spec]).map(|_| ())
  }

  /// Commit staged changes with an explicit identity
  pub fn commit(&self, message: &str, identity: &CommitIdentity) -> ShipResult<()> {
    let output = self
      .identified_cmd(identity)
      .args(["commit", "-m", message])
      .output()
      .context("Failed to run git commit")?;

    if !output.status.success() {
      let stderr = String::from_utf8_lossy(&output.stderr);
      return Err(ShipError::Git(GitError::CommandFailed {
        command: "git commit".to_string(),
        stderr: stderr.to_string(),
      }));
    }

    Ok(())
  }

  /// Push a branch to a remote, setting upstream
  pub fn push_branch(&self, remote: &str, branch: &str) -> ShipResult<()> {
    self.push(remote, branch, true)
  }

  /// Push an arbitrary refspec (e.g. refs/tags/v1.2.3) to a remote
  pub fn push_ref(&self, remote: &str, refspec: &str) -> ShipResult<()> {
    self.push(remote, refspec, false)
  }

  fn push(&self, remote: &str, refspec: &str, set_upstream: bool) -> ShipResult<()> {
    let mut cmd = self.git_cmd();
    cmd.arg("push");
    if set_upstream {
      cmd.arg("-u");
    }
    cmd.arg(remote).arg(refspec);

    let output = cmd.output().context("Failed to run git push")?;

    if !output.status.success() {
      let stderr = String::from_utf8_lossy(&output.stderr);
      return Err(ShipError::Git(GitError::PushFailed {
        remote: remote.to_string(),
        refspec: refspec.to_string(),
        reason: stderr.to_string(),
      }));
    }

    Ok(())
  }

  /// Get the URL of a remote, if configured
  pub fn remote_url(&self, remote: &str) -> ShipResult<Option<String>> {
    let output = self
      .git_cmd()
      .args(["remote", "get-url", remote])
      .output()
      .context("Failed to query remote")?;

    if !output.status.success() {
      return Ok(None);
    }

    Ok(Some(String::from_utf8_lossy(&output.stdout).trim().to_string()))
  }

  /// Run a git command, returning stdout on success
  fn run(&self, args: &[&str]) -> ShipResult<String> {
    let output = self
      .git_cmd()
      .args(args)
      .output()
      .with_context(|| format!("Failed to run git {}", args.join(" ")))?;

    if !output.status.success() {
      let stderr = String::from_utf8_lossy(&output.stderr);
      return Err(ShipError::Git(GitError::CommandFailed {
        command: format!("git {}", args.join(" ")),
        stderr: stderr.to_string(),
      }));
    }

    Ok(String::from_utf8_lossy(&output.stdout).to_string())
  }

  /// Git command with an explicit commit/tagger identity
  fn identified_cmd(&self, identity: &CommitIdentity) -> Command {
    let mut cmd = self.git_cmd();
    cmd.arg("-c").arg(format!("user.name={}", identity.name));
    cmd.arg("-c").arg(format!("user.email={}", identity.email));
    cmd
  }

  /// Create a safe git command with isolated environment
  ///
  /// - Sets working directory to repo path
  /// - Clears environment variables, whitelisting only PATH and HOME
  /// - Adds safe configuration overrides
  fn git_cmd(&self) -> Command {
    let mut cmd = Command::new("git");

    cmd.arg("-C").arg(&self.repo_path);

    cmd.env_clear();
    if let Ok(path) = std::env::var("PATH") {
      cmd.env("PATH", path);
    }
    if let Ok(home) = std::env::var("HOME") {
      cmd.env("HOME", home);
    }

    cmd.arg("-c").arg("protocol.version=2");
    cmd.arg("-c").arg("advice.detachedHead=false");

    cmd
  }
}
