//! Integration tests for `shipline doctor`

use crate::helpers::TestWorkspace;
use anyhow::Result;

#[test]
fn test_doctor_passes_in_healthy_workspace() -> Result<()> {
  let ws = TestWorkspace::new("1.4.2")?;

  let output = ws.shipline_ok(&["doctor"])?;
  let stdout = String::from_utf8_lossy(&output.stdout);

  assert!(stdout.contains("All checks passed"), "stdout: {}", stdout);
  assert!(stdout.contains("current version 1.4.2"), "stdout: {}", stdout);

  Ok(())
}

#[test]
fn test_doctor_flags_missing_config() -> Result<()> {
  let ws = TestWorkspace::new("1.4.2")?;
  std::fs::remove_file(ws.path.join("shipline.toml"))?;

  let output = ws.shipline(&["doctor"])?;
  assert_eq!(output.status.code(), Some(3));

  let stdout = String::from_utf8_lossy(&output.stdout);
  assert!(stdout.contains("❌ config"), "stdout: {}", stdout);

  Ok(())
}

#[test]
fn test_doctor_flags_malformed_version() -> Result<()> {
  let ws = TestWorkspace::new("1.4.2")?;
  ws.set_version("not-a-version\n")?;

  let output = ws.shipline(&["doctor"])?;
  assert_eq!(output.status.code(), Some(3));

  let stdout = String::from_utf8_lossy(&output.stdout);
  assert!(stdout.contains("❌ version file"), "stdout: {}", stdout);

  Ok(())
}
