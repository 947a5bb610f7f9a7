//! Error types for shipline with contextual messages and exit codes
//!
//! A single `ShipError` enum categorizes every failure the pipeline can hit.
//! Each category maps to a process exit code and, where it helps, carries a
//! suggestion for the operator.

use std::fmt;
use std::io;
use std::path::PathBuf;

/// Exit codes for shipline
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitCode {
  /// User error (config, invalid args, missing files)
  User = 1,
  /// System error (git, subprocess, I/O)
  System = 2,
  /// Pipeline failure (stage failed, version/tag/branch conflict)
  Pipeline = 3,
}

impl ExitCode {
  /// Convert to i32 for process exit
  pub fn as_i32(self) -> i32 {
    self as i32
  }
}

/// Main error type for shipline
#[derive(Debug)]
pub enum ShipError {
  /// Configuration errors
  Config(ConfigError),

  /// Git operation errors
  Git(GitError),

  /// External toolchain failure inside a pipeline stage
  Stage(StageError),

  /// Version ledger errors
  Version(VersionError),

  /// Tag/release publication errors
  Publish(PublishError),

  /// Version-update branch/PR errors
  Propose(ProposeError),

  /// I/O errors
  Io(io::Error),

  /// Generic error with message and optional context
  Message {
    message: String,
    context: Option<String>,
    help: Option<String>,
  },
}

impl ShipError {
  /// Create a simple error message
  pub fn message(msg: impl Into<String>) -> Self {
    ShipError::Message {
      message: msg.into(),
      context: None,
      help: None,
    }
  }

  /// Create an error with help text
  pub fn with_help(msg: impl Into<String>, help: impl Into<String>) -> Self {
    ShipError::Message {
      message: msg.into(),
      context: None,
      help: Some(help.into()),
    }
  }

  /// Add context to an existing error
  pub fn context(self, ctx: impl Into<String>) -> Self {
    let ctx_str = ctx.into();
    match self {
      ShipError::Message { message, context, help } => ShipError::Message {
        message,
        context: Some(context.map(|c| format!("{}\n{}", ctx_str, c)).unwrap_or(ctx_str)),
        help,
      },
      _ => self,
    }
  }

  /// Get the appropriate exit code for this error
  pub fn exit_code(&self) -> ExitCode {
    match self {
      ShipError::Config(_) => ExitCode::User,
      ShipError::Git(_) => ExitCode::System,
      ShipError::Io(_) => ExitCode::System,
      ShipError::Stage(_) => ExitCode::Pipeline,
      ShipError::Version(_) => ExitCode::Pipeline,
      ShipError::Publish(_) => ExitCode::Pipeline,
      ShipError::Propose(_) => ExitCode::Pipeline,
      ShipError::Message { .. } => ExitCode::User,
    }
  }

  /// Get contextual help message for this error
  pub fn help_message(&self) -> Option<String> {
    match self {
      ShipError::Config(e) => e.help_message(),
      ShipError::Git(e) => e.help_message(),
      ShipError::Stage(_) => Some("Inspect the toolchain output above. Completed stages are not undone.".to_string()),
      ShipError::Version(e) => e.help_message(),
      ShipError::Publish(e) => e.help_message(),
      ShipError::Propose(e) => e.help_message(),
      ShipError::Message { help, .. } => help.clone(),
      _ => None,
    }
  }
}

impl fmt::Display for ShipError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      ShipError::Config(e) => write!(f, "{}", e),
      ShipError::Git(e) => write!(f, "{}", e),
      ShipError::Stage(e) => write!(f, "{}", e),
      ShipError::Version(e) => write!(f, "{}", e),
      ShipError::Publish(e) => write!(f, "{}", e),
      ShipError::Propose(e) => write!(f, "{}", e),
      ShipError::Io(e) => write!(f, "I/O error: {}", e),
      ShipError::Message { message, context, .. } => {
        write!(f, "{}", message)?;
        if let Some(ctx) = context {
          write!(f, "\n{}", ctx)?;
        }
        Ok(())
      }
    }
  }
}

impl std::error::Error for ShipError {
  fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
    match self {
      ShipError::Io(e) => Some(e),
      _ => None,
    }
  }
}

impl From<io::Error> for ShipError {
  fn from(err: io::Error) -> Self {
    ShipError::Io(err)
  }
}

impl From<String> for ShipError {
  fn from(msg: String) -> Self {
    ShipError::message(msg)
  }
}

impl From<&str> for ShipError {
  fn from(msg: &str) -> Self {
    ShipError::message(msg)
  }
}

impl From<toml_edit::de::Error> for ShipError {
  fn from(err: toml_edit::de::Error) -> Self {
    ShipError::message(format!("TOML deserialization error: {}", err))
  }
}

impl From<toml_edit::ser::Error> for ShipError {
  fn from(err: toml_edit::ser::Error) -> Self {
    ShipError::message(format!("TOML serialization error: {}", err))
  }
}

impl From<serde_json::Error> for ShipError {
  fn from(err: serde_json::Error) -> Self {
    ShipError::message(format!("JSON error: {}", err))
  }
}

/// Configuration-related errors
#[derive(Debug)]
pub enum ConfigError {
  /// shipline.toml not found
  NotFound { workspace_root: PathBuf },

  /// Configuration failed validation
  Invalid { reason: String },
}

impl ConfigError {
  fn help_message(&self) -> Option<String> {
    match self {
      ConfigError::NotFound { .. } => Some("Run `shipline init` to create a configuration file.".to_string()),
      ConfigError::Invalid { .. } => Some("Edit shipline.toml and re-run `shipline doctor` to verify.".to_string()),
    }
  }
}

impl fmt::Display for ConfigError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      ConfigError::NotFound { workspace_root } => {
        write!(
          f,
          "No shipline configuration found.\nExpected file: {}/shipline.toml",
          workspace_root.display()
        )
      }
      ConfigError::Invalid { reason } => {
        write!(f, "Invalid shipline configuration: {}", reason)
      }
    }
  }
}

/// Git operation errors
#[derive(Debug)]
pub enum GitError {
  /// Git command failed
  CommandFailed { command: String, stderr: String },

  /// Repository not found
  RepoNotFound { path: PathBuf },

  /// Push failed
  PushFailed {
    remote: String,
    refspec: String,
    reason: String,
  },
}

impl GitError {
  fn help_message(&self) -> Option<String> {
    match self {
      GitError::PushFailed { reason, .. } => {
        if reason.contains("non-fast-forward") {
          Some("The remote has commits you don't have. Another pipeline run may have raced this one.".to_string())
        } else if reason.contains("permission denied") || reason.contains("403") {
          Some("Check the credentials available to this run. Run `shipline doctor` to diagnose.".to_string())
        } else {
          None
        }
      }
      GitError::RepoNotFound { path } => Some(format!(
        "shipline must run inside a git repository: {}",
        path.display()
      )),
      _ => None,
    }
  }
}

impl fmt::Display for GitError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      GitError::CommandFailed { command, stderr } => {
        write!(f, "Git command failed: {}\n{}", command, stderr)
      }
      GitError::RepoNotFound { path } => {
        write!(f, "Git repository not found at: {}", path.display())
      }
      GitError::PushFailed { remote, refspec, reason } => {
        write!(f, "Push of {} to {} failed: {}", refspec, remote, reason)
      }
    }
  }
}

/// External toolchain failure inside a stage
///
/// Aborts the remaining stages of the run. Effects of already-completed
/// stages are not undone.
#[derive(Debug)]
pub struct StageError {
  pub stage: String,
  pub reason: String,
}

impl fmt::Display for StageError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "Stage '{}' failed: {}", self.stage, self.reason)
  }
}

/// Version ledger errors
#[derive(Debug)]
pub enum VersionError {
  /// Stored version value does not parse as MAJOR.MINOR.PATCH
  Malformed { value: String },
}

impl VersionError {
  fn help_message(&self) -> Option<String> {
    match self {
      VersionError::Malformed { .. } => Some(
        "The version file must contain exactly one line of the form 1.4.2. Fix it manually before re-running."
          .to_string(),
      ),
    }
  }
}

impl fmt::Display for VersionError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      VersionError::Malformed { value } => {
        write!(f, "Malformed version value {:?} (expected MAJOR.MINOR.PATCH)", value)
      }
    }
  }
}

/// Tag/release publication errors
#[derive(Debug)]
pub enum PublishError {
  /// Tag name is already taken (tags are append-only, never overwritten)
  TagAlreadyExists { tag: String },

  /// Release record creation failed after the tag was created
  ReleaseFailed { tag: String, reason: String },
}

impl PublishError {
  fn help_message(&self) -> Option<String> {
    match self {
      PublishError::TagAlreadyExists { tag } => Some(format!(
        "Tag {} was already published, likely by a concurrent or earlier run. Tags are never overwritten.",
        tag
      )),
      PublishError::ReleaseFailed { tag, .. } => Some(format!(
        "The tag {} was created and remains in place. Create the release manually or delete the tag before re-running.",
        tag
      )),
    }
  }
}

impl fmt::Display for PublishError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      PublishError::TagAlreadyExists { tag } => {
        write!(f, "Tag already exists: {}", tag)
      }
      PublishError::ReleaseFailed { tag, reason } => {
        write!(f, "Release creation for tag {} failed: {}", tag, reason)
      }
    }
  }
}

/// Version-update branch/PR errors
#[derive(Debug)]
pub enum ProposeError {
  /// Proposal branch name is already taken
  BranchAlreadyExists { branch: String },

  /// Pull request creation failed after the branch was pushed
  PullRequestFailed { reason: String },
}

impl ProposeError {
  fn help_message(&self) -> Option<String> {
    match self {
      ProposeError::BranchAlreadyExists { branch } => Some(format!(
        "Branch {} already exists; the same version was likely proposed by an earlier run. Resolve it manually.",
        branch
      )),
      ProposeError::PullRequestFailed { .. } => {
        Some("The proposal branch was pushed. Open the pull request manually.".to_string())
      }
    }
  }
}

impl fmt::Display for ProposeError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      ProposeError::BranchAlreadyExists { branch } => {
        write!(f, "Branch already exists: {}", branch)
      }
      ProposeError::PullRequestFailed { reason } => {
        write!(f, "Pull request creation failed: {}", reason)
      }
    }
  }
}

/// Result type alias for shipline
pub type ShipResult<T> = Result<T, ShipError>;

/// Helper trait to add context to Results
pub trait ResultExt<T> {
  /// Add context to an error result
  fn context(self, ctx: impl Into<String>) -> ShipResult<T>;

  /// Add context using a closure (lazy evaluation)
  fn with_context<F>(self, f: F) -> ShipResult<T>
  where
    F: FnOnce() -> String;
}

impl<T, E> ResultExt<T> for Result<T, E>
where
  E: Into<ShipError>,
{
  fn context(self, ctx: impl Into<String>) -> ShipResult<T> {
    self.map_err(|e| e.into().context(ctx))
  }

  fn with_context<F>(self, f: F) -> ShipResult<T>
  where
    F: FnOnce() -> String,
  {
    self.map_err(|e| e.into().context(f()))
  }
}

/// Pretty-print an error to stderr with help text
pub fn print_error(error: &ShipError) {
  eprintln!("\n❌ {}\n", error);

  if let Some(help) = error.help_message() {
    eprintln!("💡 Help: {}\n", help);
  }
}
