//! CLI commands for shipline
//!
//! - **run**: execute the full pipeline for a trigger event
//! - **gates**: evaluate and print the gate decision only
//! - **version**: inspect the version ledger (show/next)
//! - **init**: scaffold shipline.toml and the version file
//! - **doctor**: health checks for the environment

pub mod doctor;
pub mod gates;
pub mod init;
pub mod run;
pub mod version;

pub use doctor::run_doctor;
pub use gates::run_gates;
pub use init::run_init;
pub use run::run_pipeline;
pub use version::{run_version_next, run_version_show};

use crate::core::error::{ShipError, ShipResult};
use crate::core::vcs::SystemGit;
use crate::trigger::{EventKind, TriggerEvent};
use std::env;

/// Resolve the trigger event from flags, CI environment, and the repository
///
/// Fallback order per field: explicit flag, then the hosted-CI environment
/// (GITHUB_EVENT_NAME / GITHUB_REF_NAME / GITHUB_SHA), then git itself.
pub(crate) fn resolve_event(
  git: &SystemGit,
  event_type: Option<EventKind>,
  branch: Option<String>,
  message: Option<String>,
  sha: Option<String>,
) -> ShipResult<TriggerEvent> {
  let event_type = match event_type {
    Some(kind) => kind,
    None => match env::var("GITHUB_EVENT_NAME") {
      Ok(name) => EventKind::from_event_name(&name).ok_or_else(|| {
        ShipError::with_help(
          format!("Unsupported event type '{}'", name),
          "Only push and pull_request events drive the pipeline. Pass --event-type explicitly.",
        )
      })?,
      Err(_) => EventKind::Push,
    },
  };

  let branch = match branch {
    Some(branch) => branch,
    None => match env::var("GITHUB_REF_NAME") {
      Ok(name) => name,
      Err(_) => git.current_branch()?,
    },
  };

  let commit_sha = match sha {
    Some(sha) => sha,
    None => match env::var("GITHUB_SHA") {
      Ok(sha) => sha,
      Err(_) => git.head_commit()?,
    },
  };

  let commit_message = match message {
    Some(message) => message,
    None => git.head_message()?,
  };

  Ok(TriggerEvent {
    event_type,
    branch,
    commit_message,
    commit_sha,
  })
}
