//! Integration tests for `shipline init`

use crate::helpers::TestWorkspace;
use anyhow::Result;

#[test]
fn test_init_refuses_existing_config() -> Result<()> {
  let ws = TestWorkspace::new("1.4.2")?;

  let output = ws.shipline(&["init"])?;
  assert_eq!(output.status.code(), Some(1));

  let stderr = String::from_utf8_lossy(&output.stderr);
  assert!(stderr.contains("already exists"), "stderr: {}", stderr);

  Ok(())
}

#[test]
fn test_init_scaffolds_config_and_version() -> Result<()> {
  let ws = TestWorkspace::new("1.4.2")?;
  std::fs::remove_file(ws.path.join("shipline.toml"))?;
  std::fs::remove_file(ws.path.join("VERSION"))?;

  let output = ws.shipline_ok(&["init"])?;
  let stdout = String::from_utf8_lossy(&output.stdout);
  assert!(stdout.contains("Created"), "stdout: {}", stdout);

  assert!(ws.path.join("shipline.toml").exists());
  assert_eq!(ws.read_file("VERSION")?.trim(), "0.1.0");

  // The scaffolded config parses and the ledger reads the new version
  let show = ws.shipline_ok(&["version", "show"])?;
  assert_eq!(String::from_utf8_lossy(&show.stdout).trim(), "0.1.0");

  Ok(())
}

#[test]
fn test_init_keeps_existing_version_file() -> Result<()> {
  let ws = TestWorkspace::new("2.7.1")?;
  std::fs::remove_file(ws.path.join("shipline.toml"))?;

  ws.shipline_ok(&["init"])?;

  // Only the config is scaffolded; the version value is untouched
  assert_eq!(ws.read_file("VERSION")?.trim(), "2.7.1");

  Ok(())
}
