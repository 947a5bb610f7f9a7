//! Version ledger: parse the stored version, compute the next one
//!
//! The ledger is a pure computation over a value read from durable storage
//! it does not own; persisting a new value is the proposal's job.

use crate::core::error::{ShipError, ShipResult, VersionError};
use crate::store::RepoStore;
use crate::trigger::BumpKind;
use semver::Version;

/// Read and parse the current version from the store
///
/// Fails with a malformed-version error before any tag/release/branch work
/// can happen; the value is surfaced, never guessed at.
pub fn current(store: &dyn RepoStore) -> ShipResult<Version> {
  let raw = store.read_version()?;
  parse(&raw)
}

/// Parse a stored version value
///
/// Accepts exactly one line of the form MAJOR.MINOR.PATCH. Pre-release and
/// build metadata are rejected: the ledger only ever writes bare versions,
/// so anything else means the file was edited out from under us.
pub fn parse(raw: &str) -> ShipResult<Version> {
  let malformed = || {
    ShipError::Version(VersionError::Malformed {
      value: raw.to_string(),
    })
  };

  let value = raw.trim_end_matches(['\n', '\r']);
  if value.contains('\n') {
    return Err(malformed());
  }

  let version = Version::parse(value).map_err(|_| malformed())?;
  if !version.pre.is_empty() || !version.build.is_empty() {
    return Err(malformed());
  }

  Ok(version)
}

/// Compute the next version for a bump kind
///
/// Minor resets patch to 0; patch leaves major/minor unchanged. There is no
/// major path: the commit convention carries no breaking-change signal.
pub fn next(current: &Version, bump: BumpKind) -> Version {
  match bump {
    BumpKind::Minor => Version::new(current.major, current.minor + 1, 0),
    BumpKind::Patch => Version::new(current.major, current.minor, current.patch + 1),
  }
}
