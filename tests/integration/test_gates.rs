//! Integration tests for `shipline gates`

use crate::helpers::{TestWorkspace, json_stdout};
use anyhow::Result;

#[test]
fn test_gates_feat_message_json() -> Result<()> {
  let ws = TestWorkspace::new("1.4.2")?;

  let output = ws.shipline_ok(&["gates", "--message", "feat: add cache", "--json"])?;
  let json = json_stdout(&output)?;

  assert_eq!(json["decision"]["run_deploy"], true);
  assert_eq!(json["decision"]["run_release"], true);
  assert_eq!(json["decision"]["bump"], "minor");

  Ok(())
}

#[test]
fn test_gates_release_message_json() -> Result<()> {
  let ws = TestWorkspace::new("1.4.2")?;

  let output = ws.shipline_ok(&["gates", "--message", "release: version update", "--json"])?;
  let json = json_stdout(&output)?;

  assert_eq!(json["decision"]["run_deploy"], false);
  assert_eq!(json["decision"]["run_release"], false);
  assert_eq!(json["decision"]["bump"], "patch");

  Ok(())
}

#[test]
fn test_gates_format_message_deploys_only() -> Result<()> {
  let ws = TestWorkspace::new("1.4.2")?;

  let output = ws.shipline_ok(&["gates", "--message", "format: rustfmt pass", "--json"])?;
  let json = json_stdout(&output)?;

  assert_eq!(json["decision"]["run_deploy"], true);
  assert_eq!(json["decision"]["run_release"], false);

  Ok(())
}

#[test]
fn test_gates_defaults_to_head_message() -> Result<()> {
  let ws = TestWorkspace::new("1.4.2")?;
  ws.commit("feat: taken from HEAD")?;

  let output = ws.shipline_ok(&["gates", "--json"])?;
  let json = json_stdout(&output)?;

  assert_eq!(json["event"]["commit_message"], "feat: taken from HEAD");
  assert_eq!(json["decision"]["bump"], "minor");

  Ok(())
}

#[test]
fn test_gates_text_output() -> Result<()> {
  let ws = TestWorkspace::new("1.4.2")?;

  let output = ws.shipline_ok(&["gates", "--message", "feat: add cache"])?;
  let stdout = String::from_utf8_lossy(&output.stdout);

  assert!(stdout.contains("Gate decision"), "stdout: {}", stdout);
  assert!(stdout.contains("minor"), "stdout: {}", stdout);

  Ok(())
}
