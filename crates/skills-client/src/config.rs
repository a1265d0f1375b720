//! Client configuration.
//!
//! A [`SkillsClientConfig`] can be built in code, read from `SKILLS_*`
//! environment variables, or loaded from the `[skills]` table of a TOML
//! file:
//!
//! ```toml
//! [skills]
//! base_url = "https://skills.example.com"
//! token = "..."
//! api_key = "..."
//! timeout_secs = 10
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};
use url::Url;

use crate::error::{Result, SkillsClientError};
use crate::transport::DEFAULT_TIMEOUT_SECS;

/// Environment variable holding the service base URL.
pub const ENV_BASE_URL: &str = "SKILLS_BASE_URL";
/// Environment variable holding the bearer token.
pub const ENV_TOKEN: &str = "SKILLS_TOKEN";
/// Environment variable holding the API key.
pub const ENV_API_KEY: &str = "SKILLS_API_KEY";
/// Optional environment variable overriding the request timeout.
pub const ENV_TIMEOUT_SECS: &str = "SKILLS_TIMEOUT_SECS";

fn default_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

/// Everything needed to construct a [`SkillsClient`](crate::SkillsClient).
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkillsClientConfig {
    /// Service root, e.g. `https://skills.example.com`.
    pub base_url: String,
    /// Sent as `Authorization: Bearer <token>`.
    pub token: String,
    /// Sent as `x-api-key`.
    pub api_key: String,
    /// Per-request timeout for the default transport.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl std::fmt::Debug for SkillsClientConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SkillsClientConfig")
            .field("base_url", &self.base_url)
            .field("token", &"<redacted>")
            .field("api_key", &"<redacted>")
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

/// Shape of a TOML config file.
#[derive(Deserialize)]
struct ConfigFile {
    skills: SkillsClientConfig,
}

impl SkillsClientConfig {
    pub fn new(
        base_url: impl Into<String>,
        token: impl Into<String>,
        api_key: impl Into<String>,
    ) -> Self {
        Self {
            base_url: base_url.into(),
            token: token.into(),
            api_key: api_key.into(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }

    pub fn with_timeout_secs(mut self, timeout_secs: u64) -> Self {
        self.timeout_secs = timeout_secs;
        self
    }

    /// Read the configuration from `SKILLS_*` environment variables.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read the configuration through an arbitrary key lookup.
    ///
    /// [`from_env`](Self::from_env) is this with `std::env::var`.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let required = |key: &str| {
            lookup(key).ok_or_else(|| SkillsClientError::Config {
                reason: format!("missing environment variable {key}"),
            })
        };

        let timeout_secs = match lookup(ENV_TIMEOUT_SECS) {
            Some(raw) => raw
                .trim()
                .parse::<u64>()
                .map_err(|e| SkillsClientError::Config {
                    reason: format!("invalid {ENV_TIMEOUT_SECS} `{raw}`: {e}"),
                })?,
            None => DEFAULT_TIMEOUT_SECS,
        };

        let config = Self {
            base_url: required(ENV_BASE_URL)?,
            token: required(ENV_TOKEN)?,
            api_key: required(ENV_API_KEY)?,
            timeout_secs,
        };
        config.validate()?;
        Ok(config)
    }

    /// Parse the `[skills]` table of a TOML document.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let file: ConfigFile = toml::from_str(content).map_err(|e| SkillsClientError::Config {
            reason: format!("invalid config: {e}"),
        })?;
        file.skills.validate()?;
        Ok(file.skills)
    }

    /// Load the `[skills]` table from a TOML file on disk.
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| SkillsClientError::Config {
            reason: format!("failed to read {}: {e}", path.display()),
        })?;
        Self::from_toml_str(&content)
    }

    /// Check that the values can produce a working client.
    pub fn validate(&self) -> Result<()> {
        let url = Url::parse(&self.base_url).map_err(|e| SkillsClientError::Config {
            reason: format!("invalid base_url `{}`: {e}", self.base_url),
        })?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(SkillsClientError::Config {
                reason: format!("base_url must be http or https, got `{}`", url.scheme()),
            });
        }
        if self.token.is_empty() {
            return Err(SkillsClientError::Config {
                reason: "token must not be empty".into(),
            });
        }
        if self.api_key.is_empty() {
            return Err(SkillsClientError::Config {
                reason: "api_key must not be empty".into(),
            });
        }
        if self.timeout_secs == 0 {
            return Err(SkillsClientError::Config {
                reason: "timeout_secs must be greater than zero".into(),
            });
        }
        Ok(())
    }
}
