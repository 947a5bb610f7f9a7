//! Init command: scaffold shipline.toml and the version file

use crate::core::config::ShiplineConfig;
use crate::core::error::{ShipError, ShipResult, ResultExt};
use std::env;
use std::fs;

const CONFIG_TEMPLATE: &str = r#"# shipline configuration

[pipeline]
# Base branch that version-update pull requests target
mainline = "main"
# File holding the persisted version (one line, MAJOR.MINOR.PATCH)
version_file = "VERSION"

[commit]
# Identity for automated commits and tags
name = "shipline-bot"
email = "shipline-bot@example.invalid"

# One entry per independently buildable component
[[components]]
name = "service"
build = "cargo build --release"

[deploy]
# Opaque pass-through: shipline runs this command and exports the
# SHIPLINE_ENVIRONMENT / SHIPLINE_REGION / SHIPLINE_ACCOUNT variables
command = "npx cdk deploy --require-approval never"
environment = "production"
region = ""
account = ""
"#;

pub fn run_init() -> ShipResult<()> {
  let workspace_root = env::current_dir()?;

  if ShiplineConfig::exists(&workspace_root) {
    return Err(ShipError::with_help(
      "shipline configuration already exists",
      "Edit the existing shipline.toml, or delete it to start over.",
    ));
  }

  let config_path = workspace_root.join("shipline.toml");
  fs::write(&config_path, CONFIG_TEMPLATE)
    .with_context(|| format!("Failed to write {}", config_path.display()))?;
  println!("📦 Created {}", config_path.display());

  let version_path = workspace_root.join("VERSION");
  if !version_path.exists() {
    fs::write(&version_path, "0.1.0\n").with_context(|| format!("Failed to write {}", version_path.display()))?;
    println!("📦 Created {} (0.1.0)", version_path.display());
  }

  println!();
  println!("Next steps:");
  println!("  1. Edit shipline.toml: components, deploy command, commit identity");
  println!("  2. Run `shipline doctor` to verify the setup");
  println!("  3. Run `shipline run --dry-run` to preview a pipeline run");

  Ok(())
}
