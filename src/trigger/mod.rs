//! Trigger evaluation: raw event → structured gate decision
//!
//! The only place commit-message prefixes are inspected. Stages consume the
//! resulting [`GateDecision`]; they never look at the message themselves.

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

/// Kind of event that triggered the pipeline run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum EventKind {
  Push,
  #[value(name = "pull_request")]
  PullRequest,
}

impl EventKind {
  /// Parse a hosted-CI event name (e.g. GITHUB_EVENT_NAME)
  pub fn from_event_name(name: &str) -> Option<Self> {
    match name {
      "push" => Some(EventKind::Push),
      "pull_request" => Some(EventKind::PullRequest),
      _ => None,
    }
  }
}

/// The event a pipeline run is triggered by. Immutable, one per run.
#[derive(Debug, Clone, Serialize)]
pub struct TriggerEvent {
  pub event_type: EventKind,
  pub branch: String,
  pub commit_message: String,
  pub commit_sha: String,
}

/// Which version component a release increments
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum BumpKind {
  /// Minor bump (new features); resets patch to 0
  Minor,
  /// Patch bump (everything else)
  Patch,
}

/// Structured gate decision for one pipeline run
///
/// `bump` is computed unconditionally but only consumed when the release
/// stage actually runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct GateDecision {
  pub run_deploy: bool,
  pub run_release: bool,
  pub bump: BumpKind,
}

/// Commit-message prefixes that influence gating
///
/// Matching is exact, case-sensitive, and anchored at the start of the
/// message. This is the single string-matching adapter; everything else
/// works on the enum.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessagePrefix {
  Feat,
  Doc,
  Format,
  Release,
}

impl MessagePrefix {
  const TABLE: [(&'static str, MessagePrefix); 4] = [
    ("feat:", MessagePrefix::Feat),
    ("doc:", MessagePrefix::Doc),
    ("format:", MessagePrefix::Format),
    ("release:", MessagePrefix::Release),
  ];

  /// Detect the gating prefix of a commit message, if any
  pub fn detect(message: &str) -> Option<Self> {
    Self::TABLE
      .iter()
      .find(|(prefix, _)| message.starts_with(prefix))
      .map(|(_, kind)| *kind)
  }
}

/// Evaluate an event into gate decisions
///
/// Pure and total: malformed or empty commit messages simply fail all prefix
/// checks. Never errors.
pub fn evaluate(event: &TriggerEvent) -> GateDecision {
  let prefix = MessagePrefix::detect(&event.commit_message);
  let is_push = event.event_type == EventKind::Push;

  let run_deploy = is_push && prefix != Some(MessagePrefix::Release);
  let run_release = run_deploy
    && !matches!(
      prefix,
      Some(MessagePrefix::Doc) | Some(MessagePrefix::Format) | Some(MessagePrefix::Release)
    );

  let bump = if prefix == Some(MessagePrefix::Feat) {
    BumpKind::Minor
  } else {
    BumpKind::Patch
  };

  GateDecision {
    run_deploy,
    run_release,
    bump,
  }
}
