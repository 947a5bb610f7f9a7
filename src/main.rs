mod commands;
mod core;
mod pipeline;
mod release;
mod store;
mod trigger;

use clap::{Parser, Subcommand};
use core::error::{ShipError, print_error};
use trigger::{BumpKind, EventKind};

/// Stage-gated deployment pipeline orchestrator with release automation
#[derive(Parser)]
#[command(name = "shipline")]
#[command(version, about, long_about = None)]
#[command(propagate_version = true)]
#[command(styles = get_styles())]
struct Cli {
  #[command(subcommand)]
  command: Commands,
}

#[derive(Subcommand)]
enum Commands {
  /// Execute the full pipeline for a trigger event
  Run {
    /// Event type (defaults to GITHUB_EVENT_NAME, then push)
    #[arg(long, value_enum)]
    event_type: Option<EventKind>,
    /// Branch the event targets (defaults to GITHUB_REF_NAME, then the current branch)
    #[arg(long)]
    branch: Option<String>,
    /// Commit message of the triggering commit (defaults to the HEAD message)
    #[arg(long)]
    message: Option<String>,
    /// SHA of the triggering commit (defaults to GITHUB_SHA, then HEAD)
    #[arg(long)]
    sha: Option<String>,
    /// Show what would happen without making changes
    #[arg(long)]
    dry_run: bool,
    /// Output the stage report in JSON format (useful for CI/automation)
    #[arg(long)]
    json: bool,
  },

  /// Evaluate and print the gate decision for an event
  Gates {
    /// Event type (defaults to GITHUB_EVENT_NAME, then push)
    #[arg(long, value_enum)]
    event_type: Option<EventKind>,
    /// Branch the event targets
    #[arg(long)]
    branch: Option<String>,
    /// Commit message to evaluate (defaults to the HEAD message)
    #[arg(long)]
    message: Option<String>,
    /// SHA of the triggering commit
    #[arg(long)]
    sha: Option<String>,
    /// Output the decision in JSON format
    #[arg(long)]
    json: bool,
  },

  /// Inspect the version ledger
  #[command(subcommand)]
  Version(VersionCommands),

  /// Scaffold shipline.toml and the version file
  Init,

  /// Run health checks and diagnostics
  Doctor,
}

#[derive(Subcommand)]
enum VersionCommands {
  /// Print the current stored version
  Show,

  /// Print the version a release would advance to
  Next {
    /// Commit message to derive the bump kind from
    #[arg(long)]
    message: Option<String>,
    /// Bump kind (overrides --message)
    #[arg(long, value_enum)]
    bump: Option<BumpKind>,
  },
}

fn get_styles() -> clap::builder::Styles {
  clap::builder::Styles::styled()
    .usage(
      anstyle::Style::new()
        .bold()
        .underline()
        .fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::Yellow))),
    )
    .header(
      anstyle::Style::new()
        .bold()
        .underline()
        .fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::Yellow))),
    )
    .literal(anstyle::Style::new().fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::Green))))
    .invalid(
      anstyle::Style::new()
        .bold()
        .fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::Red))),
    )
    .error(
      anstyle::Style::new()
        .bold()
        .fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::Red))),
    )
    .valid(
      anstyle::Style::new()
        .bold()
        .underline()
        .fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::Green))),
    )
    .placeholder(anstyle::Style::new().fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::White))))
}

fn main() {
  let cli = Cli::parse();

  let result = match cli.command {
    Commands::Run {
      event_type,
      branch,
      message,
      sha,
      dry_run,
      json,
    } => commands::run_pipeline(event_type, branch, message, sha, dry_run, json),

    Commands::Gates {
      event_type,
      branch,
      message,
      sha,
      json,
    } => commands::run_gates(event_type, branch, message, sha, json),

    Commands::Version(version_cmd) => match version_cmd {
      VersionCommands::Show => commands::run_version_show(),
      VersionCommands::Next { message, bump } => commands::run_version_next(message, bump),
    },

    Commands::Init => commands::run_init(),
    Commands::Doctor => commands::run_doctor(),
  };

  if let Err(err) = result {
    handle_error(err);
  }
}

fn handle_error(err: ShipError) -> ! {
  print_error(&err);
  std::process::exit(err.exit_code().as_i32());
}
