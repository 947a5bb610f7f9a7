//! Integration tests for `shipline version`

use crate::helpers::TestWorkspace;
use anyhow::Result;

#[test]
fn test_version_show() -> Result<()> {
  let ws = TestWorkspace::new("1.4.2")?;

  let output = ws.shipline_ok(&["version", "show"])?;
  assert_eq!(String::from_utf8_lossy(&output.stdout).trim(), "1.4.2");

  Ok(())
}

#[test]
fn test_version_next_from_feat_message() -> Result<()> {
  let ws = TestWorkspace::new("1.4.2")?;

  let output = ws.shipline_ok(&["version", "next", "--message", "feat: add cache"])?;
  assert_eq!(String::from_utf8_lossy(&output.stdout).trim(), "1.5.0");

  Ok(())
}

#[test]
fn test_version_next_with_explicit_bump() -> Result<()> {
  let ws = TestWorkspace::new("1.4.2")?;

  let output = ws.shipline_ok(&["version", "next", "--bump", "patch"])?;
  assert_eq!(String::from_utf8_lossy(&output.stdout).trim(), "1.4.3");

  Ok(())
}

#[test]
fn test_version_next_requires_message_or_bump() -> Result<()> {
  let ws = TestWorkspace::new("1.4.2")?;

  let output = ws.shipline(&["version", "next"])?;
  assert_eq!(output.status.code(), Some(1));

  Ok(())
}

#[test]
fn test_version_show_surfaces_malformed_value() -> Result<()> {
  let ws = TestWorkspace::new("1.4.2")?;
  ws.set_version("one.two.three\n")?;

  let output = ws.shipline(&["version", "show"])?;
  assert_eq!(output.status.code(), Some(3));

  let stderr = String::from_utf8_lossy(&output.stderr);
  assert!(stderr.contains("Malformed version"), "stderr: {}", stderr);

  Ok(())
}
