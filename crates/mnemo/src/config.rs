//! Explicit configuration, read once from the environment and handed into
//! each client constructor. No module-level clients, no ambient state.

use anyhow::{Context, Result};
use std::env;
use std::time::Duration;

pub const DEFAULT_OPENAI_URL: &str = "https://api.openai.com/v1/chat/completions";
pub const DEFAULT_OPENAI_MODEL: &str = "gpt-4";
pub const DEFAULT_NOTION_URL: &str = "https://api.notion.com";

/// Delay between consecutive generator calls, to stay inside the service's
/// throughput limits.
pub const DEFAULT_PACING: Duration = Duration::from_secs(2);

/// Credentials and endpoint for the text-generation service.
#[derive(Debug, Clone)]
pub struct GeneratorConfig {
  pub api_key: String,
  pub url: String,
  pub model: String,
}

impl GeneratorConfig {
  pub fn from_env() -> Result<Self> {
    Ok(Self {
      api_key: required("OPENAI_API_KEY")?,
      url: optional("MNEMO_OPENAI_URL", DEFAULT_OPENAI_URL),
      model: optional("MNEMO_OPENAI_MODEL", DEFAULT_OPENAI_MODEL),
    })
  }
}

/// Credentials, endpoint and target database for the notes store.
#[derive(Debug, Clone)]
pub struct StoreConfig {
  pub token: String,
  pub url: String,
  pub database_id: String,
}

impl StoreConfig {
  pub fn from_env() -> Result<Self> {
    Ok(Self {
      token: required("NOTION_TOKEN")?,
      url: optional("MNEMO_NOTION_URL", DEFAULT_NOTION_URL),
      database_id: required("NOTION_DATABASE_ID")?,
    })
  }
}

/// Pacing between generator calls, overridable for impatient test setups.
pub fn pacing_from_env() -> Duration {
  env::var("MNEMO_PACING_MS")
    .ok()
    .and_then(|ms| ms.parse::<u64>().ok())
    .map(Duration::from_millis)
    .unwrap_or(DEFAULT_PACING)
}

fn required(name: &str) -> Result<String> {
  env::var(name).with_context(|| format!("environment variable {name} is not set"))
}

fn optional(name: &str, default: &str) -> String {
  env::var(name).unwrap_or_else(|_| default.to_string())
}

#[cfg(test)]
mod tests {
  use super::*;
  use serial_test::serial;

  #[test]
  #[serial]
  fn generator_config_requires_the_api_key() {
    env::remove_var("OPENAI_API_KEY");
    let err = GeneratorConfig::from_env().unwrap_err();
    assert!(err.to_string().contains("OPENAI_API_KEY"));
  }

  #[test]
  #[serial]
  fn generator_config_applies_defaults_and_overrides() {
    env::set_var("OPENAI_API_KEY", "sk-test");
    env::remove_var("MNEMO_OPENAI_URL");
    env::set_var("MNEMO_OPENAI_MODEL", "gpt-4o-mini");

    let config = GeneratorConfig::from_env().unwrap();
    assert_eq!(config.url, DEFAULT_OPENAI_URL);
    assert_eq!(config.model, "gpt-4o-mini");

    env::remove_var("OPENAI_API_KEY");
    env::remove_var("MNEMO_OPENAI_MODEL");
  }

  #[test]
  #[serial]
  fn store_config_reads_all_three_values() {
    env::set_var("NOTION_TOKEN", "secret");
    env::set_var("NOTION_DATABASE_ID", "db123");
    env::remove_var("MNEMO_NOTION_URL");

    let config = StoreConfig::from_env().unwrap();
    assert_eq!(config.token, "secret");
    assert_eq!(config.database_id, "db123");
    assert_eq!(config.url, DEFAULT_NOTION_URL);

    env::remove_var("NOTION_TOKEN");
    env::remove_var("NOTION_DATABASE_ID");
  }

  #[test]
  #[serial]
  fn pacing_falls_back_on_garbage() {
    env::set_var("MNEMO_PACING_MS", "not-a-number");
    assert_eq!(pacing_from_env(), DEFAULT_PACING);
    env::set_var("MNEMO_PACING_MS", "250");
    assert_eq!(pacing_from_env(), Duration::from_millis(250));
    env::remove_var("MNEMO_PACING_MS");
  }
}
