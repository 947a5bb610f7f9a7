use crate::core::error::{ConfigError, ShipError, ShipResult, ResultExt};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Configuration for shipline
/// Searched in order: shipline.toml, .shipline.toml, .config/shipline.toml
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShiplineConfig {
  pub pipeline: PipelineConfig,
  pub commit: CommitIdentity,
  #[serde(default)]
  pub components: Vec<ComponentConfig>,
  pub deploy: DeployConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PipelineConfig {
  /// Mainline branch that version-update PRs target
  #[serde(default = "default_mainline")]
  pub mainline: String,

  /// File holding the persisted version value (one line, MAJOR.MINOR.PATCH)
  #[serde(default = "default_version_file")]
  pub version_file: PathBuf,
}

fn default_mainline() -> String {
  "main".to_string()
}

fn default_version_file() -> PathBuf {
  PathBuf::from("VERSION")
}

/// Commit identity for automated commits and tags
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommitIdentity {
  pub name: String,
  pub email: String,
}

/// One independently buildable component of the service
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComponentConfig {
  pub name: String,
  /// Shell command invoked by the build stage
  pub build: String,
}

/// Deploy stage configuration
///
/// `environment`, `region` and `account` are opaque to shipline: they are
/// exported to the deploy command as SHIPLINE_* environment variables and
/// never interpreted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeployConfig {
  /// Shell command invoked by the deploy stage
  pub command: String,

  #[serde(default)]
  pub environment: Option<String>,

  #[serde(default)]
  pub region: Option<String>,

  #[serde(default)]
  pub account: Option<String>,
}

impl DeployConfig {
  /// Environment variables exported to the deploy command
  pub fn env_vars(&self) -> Vec<(&'static str, &str)> {
    let mut vars = Vec::new();
    if let Some(env) = &self.environment {
      vars.push(("SHIPLINE_ENVIRONMENT", env.as_str()));
    }
    if let Some(region) = &self.region {
      vars.push(("SHIPLINE_REGION", region.as_str()));
    }
    if let Some(account) = &self.account {
      vars.push(("SHIPLINE_ACCOUNT", account.as_str()));
    }
    vars
  }
}

impl ShiplineConfig {
  /// Find config file in search order: shipline.toml, .shipline.toml, .config/shipline.toml
  pub fn find_config_path(path: &Path) -> Option<PathBuf> {
    let candidates = vec![
      path.join("shipline.toml"),
      path.join(".shipline.toml"),
      path.join(".config").join("shipline.toml"),
    ];

    candidates.into_iter().find(|p| p.exists())
  }

  /// Load config from shipline.toml (searches multiple locations)
  pub fn load(path: &Path) -> ShipResult<Self> {
    let config_path = Self::find_config_path(path).ok_or_else(|| {
      ShipError::Config(ConfigError::NotFound {
        workspace_root: path.to_path_buf(),
      })
    })?;

    let content = fs::read_to_string(&config_path)
      .with_context(|| format!("Failed to read config from {}", config_path.display()))?;
    let config: ShiplineConfig = toml_edit::de::from_str(&content)
      .with_context(|| format!("Failed to parse config from {}", config_path.display()))?;

    config.validate()?;

    Ok(config)
  }

  /// Check if config exists at the given path
  pub fn exists(path: &Path) -> bool {
    Self::find_config_path(path).is_some()
  }

  /// Validate the configuration
  pub fn validate(&self) -> ShipResult<()> {
    if self.pipeline.mainline.is_empty() {
      return Err(invalid("pipeline.mainline must not be empty"));
    }
    if self.pipeline.version_file.as_os_str().is_empty() {
      return Err(invalid("pipeline.version_file must not be empty"));
    }
    if self.commit.name.is_empty() || self.commit.email.is_empty() {
      return Err(invalid("commit.name and commit.email must both be set"));
    }
    if self.components.is_empty() {
      return Err(invalid("at least one [[components]] entry is required"));
    }
    for component in &self.components {
      if component.build.is_empty() {
        return Err(invalid(format!(
          "component '{}' has an empty build command",
          component.name
        )));
      }
    }
    if self.deploy.command.is_empty() {
      return Err(invalid("deploy.command must not be empty"));
    }
    Ok(())
  }
}

fn invalid(reason: impl Into<String>) -> ShipError {
  ShipError::Config(ConfigError::Invalid { reason: reason.into() })
}
