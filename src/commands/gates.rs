//! Gates command: evaluate the gate decision without running anything

use crate::commands::resolve_event;
use crate::core::error::ShipResult;
use crate::core::vcs::SystemGit;
use crate::trigger::{self, BumpKind, EventKind};
use std::env;

pub fn run_gates(
  event_type: Option<EventKind>,
  branch: Option<String>,
  message: Option<String>,
  sha: Option<String>,
  json: bool,
) -> ShipResult<()> {
  let workspace_root = env::current_dir()?;
  let git = SystemGit::open(&workspace_root)?;

  let event = resolve_event(&git, event_type, branch, message, sha)?;
  let decision = trigger::evaluate(&event);

  if json {
    let summary = serde_json::json!({
      "event": event,
      "decision": decision,
    });
    println!("{}", serde_json::to_string_pretty(&summary)?);
    return Ok(());
  }

  println!("📋 Gate decision");
  println!(
    "   message: {}",
    event.commit_message.lines().next().unwrap_or("(empty)")
  );
  println!("   deploy:  {}", if decision.run_deploy { "✅ run" } else { "⏭  skip" });
  println!("   release: {}", if decision.run_release { "✅ run" } else { "⏭  skip" });
  println!(
    "   bump:    {}",
    match decision.bump {
      BumpKind::Minor => "minor",
      BumpKind::Patch => "patch",
    }
  );

  Ok(())
}
