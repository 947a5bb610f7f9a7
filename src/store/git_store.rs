//! Production [`RepoStore`] over system git and the gh CLI

use crate::core::config::{CommitIdentity, ShiplineConfig};
use crate::core::error::{ProposeError, PublishError, ShipError, ShipResult, ResultExt};
use crate::core::vcs::SystemGit;
use crate::store::{PullRequestRequest, RepoStore};
use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;

/// Repository store backed by system git plus the gh CLI for releases/PRs
pub struct GitStore {
  git: SystemGit,
  root: PathBuf,
  version_file: PathBuf,
  identity: CommitIdentity,
  /// Branch checked out before a proposal branch was created; restored
  /// after the proposal is pushed
  prior_branch: Option<String>,
}

impl GitStore {
  pub fn open(root: &Path, config: &ShiplineConfig) -> ShipResult<Self> {
    let git = SystemGit::open(root)?;
    Ok(Self {
      git,
      root: root.to_path_buf(),
      version_file: config.pipeline.version_file.clone(),
      identity: config.commit.clone(),
      prior_branch: None,
    })
  }

  fn version_path(&self) -> PathBuf {
    self.root.join(&self.version_file)
  }

  /// Run a gh subcommand, returning stderr on failure
  fn gh(&self, args: &[&str]) -> Result<(), String> {
    let output = Command::new("gh")
      .current_dir(&self.root)
      .args(args)
      .output()
      .map_err(|e| format!("failed to execute gh: {}", e))?;

    if !output.status.success() {
      return Err(String::from_utf8_lossy(&output.stderr).trim().to_string());
    }

    Ok(())
  }
}

impl RepoStore for GitStore {
  fn read_version(&self) -> ShipResult<String> {
    fs::read_to_string(self.version_path())
      .with_context(|| format!("Failed to read version file {}", self.version_path().display()))
  }

  fn write_version(&mut self, value: &str) -> ShipResult<()> {
    fs::write(self.version_path(), format!("{}\n", value))
      .with_context(|| format!("Failed to write version file {}", self.version_path().display()))
  }

  fn create_tag(&mut self, name: &str, commit_sha: &str, message: &str) -> ShipResult<()> {
    if self.git.tag_exists(name)? {
      return Err(ShipError::Publish(PublishError::TagAlreadyExists {
        tag: name.to_string(),
      }));
    }

    // A concurrent run can still win the race between the check and the
    // creation; git itself then refuses the duplicate.
    self.git.create_tag(name, commit_sha, message, &self.identity).map_err(|err| match err {
      ShipError::Git(ref git_err) if git_err.to_string().contains("already exists") => {
        ShipError::Publish(PublishError::TagAlreadyExists {
          tag: name.to_string(),
        })
      }
      other => other,
    })?;

    self.git.push_ref("origin", &format!("refs/tags/{}", name))
  }

  fn create_release(&mut self, tag_name: &str, notes: &str) -> ShipResult<()> {
    self
      .gh(&["release", "create", tag_name, "--title", tag_name, "--notes", notes])
      .map_err(|reason| {
        ShipError::Publish(PublishError::ReleaseFailed {
          tag: tag_name.to_string(),
          reason,
        })
      })
  }

  fn create_branch(&mut self, name: &str) -> ShipResult<()> {
    if self.git.branch_exists(name)? {
      return Err(ShipError::Propose(ProposeError::BranchAlreadyExists {
        branch: name.to_string(),
      }));
    }

    self.prior_branch = Some(self.git.current_branch()?);
    self.git.create_branch(name)
  }

  fn commit_and_push(&mut self, branch: &str, message: &str) -> ShipResult<()> {
    self.git.stage(&self.version_file)?;
    self.git.commit(message, &self.identity)?;
    self.git.push_branch("origin", branch)?;

    // Leave the working tree where the operator had it
    if let Some(prior) = self.prior_branch.take() {
      self.git.checkout(&prior)?;
    }

    Ok(())
  }

  fn open_pull_request(&mut self, request: &PullRequestRequest) -> ShipResult<()> {
    self
      .gh(&[
        "pr",
        "create",
        "--head",
        &request.head_branch,
        "--base",
        &request.base_branch,
        "--title",
        &request.title,
        "--body",
        &request.body,
      ])
      .map_err(|reason| ShipError::Propose(ProposeError::PullRequestFailed { reason }))
  }
}
