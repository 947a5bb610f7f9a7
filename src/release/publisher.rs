//! Tag and release publication

use crate::core::error::ShipResult;
use crate::store::RepoStore;
use semver::Version;

/// A published release record, one-to-one with its tag
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Release {
  pub tag_name: String,
  pub notes: String,
}

/// Tag name for a version
pub fn tag_name(version: &Version) -> String {
  format!("v{}", version)
}

/// Create the tag for a version at a commit, then publish the release
/// referencing it
///
/// Tags are append-only: an existing tag name fails the run. If release
/// creation fails after the tag succeeded, the tag remains in place and the
/// error is surfaced; operators reconcile manually.
pub fn publish(store: &mut dyn RepoStore, version: &Version, commit_sha: &str, notes: &str) -> ShipResult<Release> {
  let tag = tag_name(version);
  let message = format!("Release v{}", version);

  store.create_tag(&tag, commit_sha, &message)?;
  store.create_release(&tag, notes)?;

  Ok(Release {
    tag_name: tag,
    notes: notes.to_string(),
  })
}
