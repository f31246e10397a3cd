//! Runtime configuration, layered from an optional TOML file and `ALMA_*`
//! environment variables.

use std::path::Path;

use anyhow::Context as _;
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
  #[serde(default = "default_host")]
  pub host:            String,
  #[serde(default = "default_port")]
  pub port:            u16,
  /// Origins allowed by CORS. Comma-separated in `ALMA_ALLOWED_ORIGINS`.
  #[serde(default = "default_allowed_origins")]
  pub allowed_origins: Vec<String>,
  /// Start with the program's sites already registered.
  #[serde(default = "default_seed")]
  pub seed:            bool,
}

fn default_host() -> String { "0.0.0.0".to_owned() }

fn default_port() -> u16 { 8081 }

fn default_allowed_origins() -> Vec<String> {
  vec![
    "https://todoporunalma.org".to_owned(),
    "https://www.todoporunalma.org".to_owned(),
  ]
}

fn default_seed() -> bool { true }

impl ServerConfig {
  /// Read `path` (if it exists) and overlay the environment on top.
  pub fn load(path: &Path) -> anyhow::Result<Self> {
    let settings = config::Config::builder()
      .add_source(config::File::from(path).required(false))
      .add_source(
        config::Environment::with_prefix("ALMA")
          .try_parsing(true)
          .list_separator(",")
          .with_list_parse_key("allowed_origins"),
      )
      .build()
      .context("failed to read configuration")?;

    settings
      .try_deserialize()
      .context("failed to deserialise ServerConfig")
  }

  pub fn address(&self) -> String { format!("{}:{}", self.host, self.port) }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn missing_file_falls_back_to_defaults() {
    let cfg = ServerConfig::load(Path::new("does-not-exist.toml")).unwrap();
    assert_eq!(cfg.port, 8081);
    assert!(cfg.seed);
    assert_eq!(cfg.allowed_origins.len(), 2);
    assert_eq!(cfg.address(), format!("{}:8081", cfg.host));
  }
}
