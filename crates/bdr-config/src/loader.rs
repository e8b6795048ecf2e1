//! Layered configuration loading

use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, warn};

use crate::config::{BdrConfig, LogFormat};

/// Set to skip loading the user's default config file (used by tests).
pub const TEST_MODE_ENV: &str = "BDR_MCP_TEST_MODE";

/// Errors raised while loading or validating configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Config file could not be read.
    #[error("Failed to read config file {path}: {source}")]
    Io {
        /// Path that failed to load
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// Config file is not valid TOML for [`BdrConfig`].
    #[error("Failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    /// A value failed validation.
    #[error("Invalid configuration: {0}")]
    Invalid(String),

    /// The platform has no per-user config directory.
    #[error("Could not determine config directory")]
    NoConfigDir,
}

/// Result type for configuration operations.
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

/// Values supplied on the command line; these win over everything else.
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    /// Replacement API base URL
    pub base_url: Option<String>,
    /// Replacement request timeout in seconds
    pub timeout_secs: Option<u64>,
    /// Replacement log filter
    pub log_level: Option<String>,
}

impl BdrConfig {
    /// Load configuration with precedence `defaults < file < env < overrides`.
    ///
    /// An explicit `config_file` must exist. Without one, the default path
    /// is used when present and skipped otherwise.
    pub fn load(config_file: Option<PathBuf>, overrides: ConfigOverrides) -> ConfigResult<Self> {
        let mut config = Self::from_file_or_default(config_file)?;
        config.apply_env_with(|key| std::env::var(key).ok());
        config.apply_overrides(overrides);
        config.validate()?;
        Ok(config)
    }

    /// Parse a TOML document.
    pub fn from_toml_str(contents: &str) -> ConfigResult<Self> {
        Ok(toml::from_str(contents)?)
    }

    /// Read and parse a TOML file.
    pub fn from_file(path: &Path) -> ConfigResult<Self> {
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        debug!(path = %path.display(), "Loaded config file");
        Self::from_toml_str(&contents)
    }

    /// `~/.config/bdr-mcp/config.toml` or the platform equivalent.
    pub fn default_config_path() -> ConfigResult<PathBuf> {
        let dir = dirs::config_dir().ok_or(ConfigError::NoConfigDir)?;
        Ok(dir.join("bdr-mcp").join("config.toml"))
    }

    fn from_file_or_default(config_file: Option<PathBuf>) -> ConfigResult<Self> {
        if let Some(path) = config_file {
            return Self::from_file(&path);
        }

        if std::env::var(TEST_MODE_ENV).is_ok() {
            return Ok(Self::default());
        }

        match Self::default_config_path() {
            Ok(path) if path.exists() => Self::from_file(&path),
            Ok(_) | Err(ConfigError::NoConfigDir) => Ok(Self::default()),
            Err(e) => Err(e),
        }
    }

    /// Apply `BDR_*` environment variables through `lookup`.
    ///
    /// Values that fail to parse are logged and ignored.
    pub fn apply_env_with<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(url) = lookup("BDR_API_BASE") {
            self.api.base_url = url;
        }
        if let Some(timeout) = lookup("BDR_TIMEOUT_SECS") {
            match timeout.trim().parse() {
                Ok(secs) => self.api.timeout_secs = secs,
                Err(_) => warn!(value = %timeout, "Ignoring unparseable BDR_TIMEOUT_SECS"),
            }
        }
        if let Some(agent) = lookup("BDR_USER_AGENT") {
            self.api.user_agent = agent;
        }
        if let Some(level) = lookup("BDR_LOG_LEVEL") {
            self.logging.level = level;
        }
        if let Some(format) = lookup("BDR_LOG_FORMAT") {
            match LogFormat::parse(&format) {
                Some(format) => self.logging.format = format,
                None => warn!(value = %format, "Ignoring unknown BDR_LOG_FORMAT"),
            }
        }
        if let Some(path) = lookup("BDR_LOG_FILE") {
            self.logging.file_path = Some(PathBuf::from(path));
        }
    }

    /// Apply command-line overrides.
    pub fn apply_overrides(&mut self, overrides: ConfigOverrides) {
        if let Some(url) = overrides.base_url {
            self.api.base_url = url;
        }
        if let Some(secs) = overrides.timeout_secs {
            self.api.timeout_secs = secs;
        }
        if let Some(level) = overrides.log_level {
            self.logging.level = level;
        }
    }

    /// Check that the configuration can be used.
    pub fn validate(&self) -> ConfigResult<()> {
        let base = self.api.base_url.trim();
        if base.is_empty() {
            return Err(ConfigError::Invalid("API base URL cannot be empty".to_string()));
        }
        if !(base.starts_with("http://") || base.starts_with("https://")) {
            return Err(ConfigError::Invalid(format!(
                "API base URL must start with http:// or https://, got {base}"
            )));
        }
        if self.api.timeout_secs == 0 {
            return Err(ConfigError::Invalid(
                "Timeout must be greater than 0".to_string(),
            ));
        }
        if self.logging.level.trim().is_empty() {
            return Err(ConfigError::Invalid("Log level cannot be empty".to_string()));
        }
        Ok(())
    }

    /// Commented example config file.
    pub fn example_toml() -> &'static str {
        r#"# BDR MCP server configuration
# Location: ~/.config/bdr-mcp/config.toml

[api]
# Repository API root (env: BDR_API_BASE)
base_url = "https://repository.library.brown.edu/api"

# Upstream request timeout in seconds (env: BDR_TIMEOUT_SECS)
timeout_secs = 30

# User-Agent header (env: BDR_USER_AGENT)
# user_agent = "bdr-mcp/0.1.0"

[logging]
# Filter directive, RUST_LOG takes precedence (env: BDR_LOG_LEVEL)
level = "info"

# text, pretty or json (env: BDR_LOG_FORMAT)
format = "text"

# Log to a file instead of stderr (env: BDR_LOG_FILE)
# file_path = "/tmp/bdr-mcp.log"
"#
    }
}
