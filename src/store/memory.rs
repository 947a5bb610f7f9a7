//! In-memory [`RepoStore`] fake for unit tests

use crate::core::error::{ProposeError, PublishError, ShipError, ShipResult, VersionError};
use crate::store::{PullRequestRequest, RepoStore};

/// A recorded tag: (name, commit SHA, message)
pub type TagRecord = (String, String, String);

/// In-memory repository state; satisfies the [`RepoStore`] contract without
/// touching a real repository
#[derive(Debug, Default)]
pub struct MemoryStore {
  pub version: String,
  pub tags: Vec<TagRecord>,
  pub releases: Vec<(String, String)>,
  pub branches: Vec<String>,
  pub commits: Vec<(String, String)>,
  pub pull_requests: Vec<PullRequestRequest>,
  /// Simulate the release API failing after the tag succeeded
  pub fail_release: bool,
}

impl MemoryStore {
  pub fn new(version: &str) -> Self {
    Self {
      version: version.to_string(),
      ..Default::default()
    }
  }

  pub fn has_tag(&self, name: &str) -> bool {
    self.tags.iter().any(|(tag, _, _)| tag == name)
  }
}

impl RepoStore for MemoryStore {
  fn read_version(&self) -> ShipResult<String> {
    Ok(self.version.clone())
  }

  fn write_version(&mut self, value: &str) -> ShipResult<()> {
    // Mirror the strictness of durable storage: never persist garbage
    if value.is_empty() {
      return Err(ShipError::Version(VersionError::Malformed {
        value: value.to_string(),
      }));
    }
    self.version = value.to_string();
    Ok(())
  }

  fn create_tag(&mut self, name: &str, commit_sha: &str, message: &str) -> ShipResult<()> {
    if self.has_tag(name) {
      return Err(ShipError::Publish(PublishError::TagAlreadyExists {
        tag: name.to_string(),
      }));
    }
    self.tags.push((name.to_string(), commit_sha.to_string(), message.to_string()));
    Ok(())
  }

  fn create_release(&mut self, tag_name: &str, notes: &str) -> ShipResult<()> {
    if self.fail_release {
      return Err(ShipError::Publish(PublishError::ReleaseFailed {
        tag: tag_name.to_string(),
        reason: "simulated release failure".to_string(),
      }));
    }
    self.releases.push((tag_name.to_string(), notes.to_string()));
    Ok(())
  }

  fn create_branch(&mut self, name: &str) -> ShipResult<()> {
    if self.branches.iter().any(|b| b == name) {
      return Err(ShipError::Propose(ProposeError::BranchAlreadyExists {
        branch: name.to_string(),
      }));
    }
    self.branches.push(name.to_string());
    Ok(())
  }

  fn commit_and_push(&mut self, branch: &str, message: &str) -> ShipResult<()> {
    self.commits.push((branch.to_string(), message.to_string()));
    Ok(())
  }

  fn open_pull_request(&mut self, request: &PullRequestRequest) -> ShipResult<()> {
    self.pull_requests.push(request.clone());
    Ok(())
  }
}
