use std::path::Path;

use feedline_identity::IdentityLimits;
use feedline_types::DEFAULT_MAX_POST_CHARS;
use serde::{Deserialize, Serialize};

/// Tunable limits for a [`crate::Feedline`] instance.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FeedlineConfig {
    pub max_post_chars: usize,
    pub max_username_chars: usize,
    pub max_email_chars: usize,
}

impl Default for FeedlineConfig {
    fn default() -> Self {
        let identity = IdentityLimits::default();
        Self {
            max_post_chars: DEFAULT_MAX_POST_CHARS,
            max_username_chars: identity.max_username_chars,
            max_email_chars: identity.max_email_chars,
        }
    }
}

impl FeedlineConfig {
    /// Parse from TOML. Missing keys take their defaults.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(s).map_err(|e| ConfigError::Parse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Read and parse a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let raw = std::fs::read_to_string(path.as_ref())?;
        Self::from_toml_str(&raw)
    }

    pub fn to_toml_string(&self) -> Result<String, ConfigError> {
        toml::to_string(self).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    /// Reject limits that would make every request fail.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (name, value) in [
            ("max_post_chars", self.max_post_chars),
            ("max_username_chars", self.max_username_chars),
            ("max_email_chars", self.max_email_chars),
        ] {
            if value == 0 {
                return Err(ConfigError::Invalid(format!("{name} must be greater than zero")));
            }
        }
        Ok(())
    }

    pub fn identity_limits(&self) -> IdentityLimits {
        IdentityLimits {
            max_username_chars: self.max_username_chars,
            max_email_chars: self.max_email_chars,
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("config parse error: {0}")]
    Parse(String),

    #[error("invalid config: {0}")]
    Invalid(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
