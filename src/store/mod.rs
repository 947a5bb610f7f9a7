//! Narrow storage port over the repository's mutable state
//!
//! Version file, tags, branches, and pull requests are the only durable
//! state the pipeline touches. Hiding them behind [`RepoStore`] keeps the
//! release orchestration testable without a real repository.

pub mod git_store;
#[cfg(test)]
pub mod memory;

pub use git_store::GitStore;

use crate::core::error::ShipResult;
use serde::Serialize;

/// A request to open a pull request proposing the bumped version
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PullRequestRequest {
  pub head_branch: String,
  pub base_branch: String,
  pub title: String,
  pub body: String,
}

/// Port over the repository state shared between pipeline runs
///
/// Single-writer assumption: at most one run mutates version/tag/branch
/// state at a time. There is no locking; concurrent runs are failed by the
/// tag/branch collision errors, not serialized.
pub trait RepoStore {
  /// Read the raw stored version value
  fn read_version(&self) -> ShipResult<String>;

  /// Write a new version value to durable storage
  fn write_version(&mut self, value: &str) -> ShipResult<()>;

  /// Create an immutable tag at a commit; fails if the name is taken
  fn create_tag(&mut self, name: &str, commit_sha: &str, message: &str) -> ShipResult<()>;

  /// Publish a release record referencing an existing tag
  fn create_release(&mut self, tag_name: &str, notes: &str) -> ShipResult<()>;

  /// Create a branch at the current head; fails if the name is taken
  fn create_branch(&mut self, name: &str) -> ShipResult<()>;

  /// Commit the pending version change on a branch and push it
  fn commit_and_push(&mut self, branch: &str, message: &str) -> ShipResult<()>;

  /// Open a pull request against the mainline branch
  fn open_pull_request(&mut self, request: &PullRequestRequest) -> ShipResult<()>;
}
