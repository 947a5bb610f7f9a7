//! Version-update branch and pull request

use crate::core::error::ShipResult;
use crate::store::{PullRequestRequest, RepoStore};
use semver::Version;

/// Fixed commit message for version-update commits; its `release:` prefix
/// gates the follow-up pipeline run out of deploy and release
pub const VERSION_COMMIT_MESSAGE: &str = "release: version update";

/// Proposal branch name for a version
pub fn branch_name(version: &Version) -> String {
  format!("version-update-{}", version)
}

/// Persist the bumped version on a new branch and open a review PR
///
/// A colliding branch name (the same version proposed twice) fails the run;
/// there is no retry or renaming.
pub fn propose_version_update(
  store: &mut dyn RepoStore,
  new_version: &Version,
  mainline: &str,
) -> ShipResult<PullRequestRequest> {
  let branch = branch_name(new_version);

  store.create_branch(&branch)?;
  store.write_version(&new_version.to_string())?;
  store.commit_and_push(&branch, VERSION_COMMIT_MESSAGE)?;

  let request = PullRequestRequest {
    head_branch: branch,
    base_branch: mainline.to_string(),
    title: format!("release: version update to {}", new_version),
    body: format!(
      "Automated version bump to {} proposed by shipline on {}.",
      new_version,
      chrono::Utc::now().format("%Y-%m-%d")
    ),
  };

  store.open_pull_request(&request)?;

  Ok(request)
}
