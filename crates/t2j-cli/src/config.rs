//! Configuration loading and management.

use std::fmt;
use std::path::{Path, PathBuf};
use std::time::Duration;

use figment::Figment;
use figment::providers::{Env, Format, Serialized, Toml};
use serde::{Deserialize, Serialize};

use t2j_jira::JiraConfig;

/// Application configuration.
#[derive(Clone, Serialize, Deserialize)]
pub struct Config {
    /// Base URL of the Jira instance, e.g. `https://jira.example.com`.
    pub jira_url: String,
    /// Account username for basic authentication.
    pub username: String,
    /// Account password or API token.
    pub password: String,
    /// Request timeout in seconds.
    pub timeout_secs: u64,
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("jira_url", &self.jira_url)
            .field("username", &self.username)
            .field("password", &"[REDACTED]")
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            jira_url: String::new(),
            username: String::new(),
            password: String::new(),
            timeout_secs: t2j_jira::DEFAULT_TIMEOUT_SECS,
        }
    }
}

impl Config {
    /// Loads configuration from default locations.
    #[expect(
        clippy::result_large_err,
        reason = "figment::Error is large but only returned at startup"
    )]
    pub fn load() -> Result<Self, figment::Error> {
        Self::load_from(None)
    }

    /// Loads configuration, optionally from a specific file.
    ///
    /// Layering, later sources winning: defaults, then the platform config
    /// file, then `config_path` if given, then `T2J_*` environment
    /// variables.
    #[expect(
        clippy::result_large_err,
        reason = "figment::Error is large but only returned at startup"
    )]
    pub fn load_from(config_path: Option<&Path>) -> Result<Self, figment::Error> {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        if let Some(config_dir) = dirs_config_path() {
            figment = figment.merge(Toml::file(config_dir.join("config.toml")));
        }

        if let Some(path) = config_path {
            figment = figment.merge(Toml::file(path));
        }

        figment = figment.merge(Env::prefixed("T2J_"));

        figment.extract()
    }

    /// Connection settings for the Jira client.
    pub fn jira_config(&self) -> JiraConfig {
        JiraConfig::new(
            self.jira_url.as_str(),
            self.username.as_str(),
            self.password.as_str(),
        )
        .with_timeout(Duration::from_secs(self.timeout_secs))
    }
}

/// Returns the platform-specific config directory for t2j.
fn dirs_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|p| p.join("t2j"))
}
