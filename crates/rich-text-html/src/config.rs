use crate::mode::{ESCAPE_ENV_VAR, EscapeMode};
use serde::{Deserialize, Serialize};
use std::env;
use thiserror::Error;

pub const RENDERER_CONFIG_SCHEMA_VERSION: u32 = 1;
pub const DEFAULT_MAX_DEPTH: usize = 64;
pub const MAX_DEPTH_LIMIT: usize = 512;
pub const DEFAULT_EMBEDDED_PLACEHOLDER: &str = "[Embedded content]";
pub const MAX_DEPTH_ENV_VAR: &str = "RICH_TEXT_HTML_MAX_DEPTH";

fn default_schema_version() -> u32 {
    RENDERER_CONFIG_SCHEMA_VERSION
}

fn default_max_depth() -> usize {
    DEFAULT_MAX_DEPTH
}

fn default_embedded_placeholder() -> String {
    DEFAULT_EMBEDDED_PLACEHOLDER.to_string()
}

/// Versioned renderer configuration as stored alongside app parameters.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct RendererConfig {
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,
    #[serde(default)]
    pub escape: EscapeMode,
    #[serde(default = "default_max_depth")]
    pub max_depth: usize,
    #[serde(default = "default_embedded_placeholder")]
    pub embedded_placeholder: String,
}

impl Default for RendererConfig {
    fn default() -> Self {
        Self {
            schema_version: RENDERER_CONFIG_SCHEMA_VERSION,
            escape: EscapeMode::default(),
            max_depth: DEFAULT_MAX_DEPTH,
            embedded_placeholder: default_embedded_placeholder(),
        }
    }
}

impl RendererConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.schema_version != RENDERER_CONFIG_SCHEMA_VERSION {
            return Err(ConfigError::UnsupportedSchemaVersion {
                expected: RENDERER_CONFIG_SCHEMA_VERSION,
                got: self.schema_version,
            });
        }
        if self.max_depth == 0 || self.max_depth > MAX_DEPTH_LIMIT {
            return Err(ConfigError::MaxDepthOutOfRange {
                got: self.max_depth,
                limit: MAX_DEPTH_LIMIT,
            });
        }
        if self.embedded_placeholder.is_empty() {
            return Err(ConfigError::EmptyPlaceholder);
        }
        Ok(())
    }

    /// Defaults overridden by `RICH_TEXT_HTML_ESCAPE` and `RICH_TEXT_HTML_MAX_DEPTH`.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::default().with_env(|name| env::var(name).ok())
    }

    /// Applies overrides from `lookup`, then validates the result.
    pub fn with_env(
        mut self,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, ConfigError> {
        if let Some(raw) = lookup(ESCAPE_ENV_VAR) {
            self.escape = EscapeMode::parse(&raw).ok_or_else(|| ConfigError::InvalidEnv {
                name: ESCAPE_ENV_VAR,
                value: raw.clone(),
            })?;
        }
        if let Some(raw) = lookup(MAX_DEPTH_ENV_VAR) {
            self.max_depth = raw
                .trim()
                .parse()
                .map_err(|_| ConfigError::InvalidEnv {
                    name: MAX_DEPTH_ENV_VAR,
                    value: raw.clone(),
                })?;
        }
        self.validate()?;
        Ok(self)
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("unsupported schema version: expected {expected}, got {got}")]
    UnsupportedSchemaVersion { expected: u32, got: u32 },

    #[error("max_depth must be between 1 and {limit}, got {got}")]
    MaxDepthOutOfRange { got: usize, limit: usize },

    #[error("embedded_placeholder must not be empty")]
    EmptyPlaceholder,

    #[error("invalid value {value:?} for {name}")]
    InvalidEnv { name: &'static str, value: String },
}

/// Settings consulted on every render call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderOptions {
    pub escape: EscapeMode,
    pub max_depth: usize,
    pub embedded_placeholder: String,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self::from(&RendererConfig::default())
    }
}

impl From<&RendererConfig> for RenderOptions {
    fn from(config: &RendererConfig) -> Self {
        Self {
            escape: config.escape,
            max_depth: config.max_depth,
            embedded_placeholder: config.embedded_placeholder.clone(),
        }
    }
}

impl RenderOptions {
    pub fn escaped() -> Self {
        Self {
            escape: EscapeMode::Escape,
            ..Self::default()
        }
    }

    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }
}
