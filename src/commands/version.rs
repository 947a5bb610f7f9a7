//! Version command: inspect the version ledger

use crate::core::config::ShiplineConfig;
use crate::core::error::{ShipError, ShipResult};
use crate::release::ledger;
use crate::store::GitStore;
use crate::trigger::{BumpKind, MessagePrefix};
use std::env;

/// Print the current stored version
pub fn run_version_show() -> ShipResult<()> {
  let workspace_root = env::current_dir()?;
  let config = ShiplineConfig::load(&workspace_root)?;
  let store = GitStore::open(&workspace_root, &config)?;

  let current = ledger::current(&store)?;
  println!("{}", current);

  Ok(())
}

/// Print the version a release would advance to
///
/// The bump kind comes from `--bump`, or is derived from `--message` the
/// same way a pipeline run would derive it.
pub fn run_version_next(message: Option<String>, bump: Option<BumpKind>) -> ShipResult<()> {
  let bump = match (bump, message) {
    (Some(bump), _) => bump,
    (None, Some(message)) => {
      if MessagePrefix::detect(&message) == Some(MessagePrefix::Feat) {
        BumpKind::Minor
      } else {
        BumpKind::Patch
      }
    }
    (None, None) => {
      return Err(ShipError::with_help(
        "Cannot determine bump kind",
        "Pass --bump minor|patch, or --message to derive it from a commit message.",
      ));
    }
  };

  let workspace_root = env::current_dir()?;
  let config = ShiplineConfig::load(&workspace_root)?;
  let store = GitStore::open(&workspace_root, &config)?;

  let current = ledger::current(&store)?;
  let next = ledger::next(&current, bump);
  println!("{}", next);

  Ok(())
}
