//! Configuration system for the Faith Hub relay
//!
//! Supports multiple configuration sources with the following precedence (highest to lowest):
//! 1. CLI arguments
//! 2. Environment variables (FAITH_HUB_* prefix, plus OPENAI_API_KEY)
//! 3. Configuration file (TOML)
//! 4. Default values

use std::fs;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::error::{Error, Result};

/// Environment variable holding the completion API credential
pub const API_KEY_ENV: &str = "OPENAI_API_KEY";

/// Main relay configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct HubConfig {
    /// Listener and service identity
    pub server: ServerSettings,

    /// Shared access code gate
    pub access: AccessSettings,

    /// Completion API settings
    pub openai: OpenAiSettings,

    /// Logging configuration
    pub logging: LoggingSettings,
}

/// HTTP listener settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerSettings {
    /// Interface to bind
    pub host: String,

    /// TCP port to bind
    pub port: u16,

    /// Name reported by the health endpoint
    pub service_name: String,
}

/// Access code settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AccessSettings {
    /// Shared secret every chat request must carry
    pub code: String,

    /// Who users should ask for the code (shown in the 403 message)
    pub operator: String,
}

/// Completion API settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OpenAiSettings {
    /// API base URL
    pub base_url: String,

    /// Bearer credential, normally supplied through OPENAI_API_KEY
    #[serde(skip_serializing)]
    pub api_key: String,

    /// Request timeout in seconds
    pub timeout_secs: u64,
}

/// Logging settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingSettings {
    /// Log level: trace, debug, info, warn, error
    pub level: String,

    /// One JSON object per line instead of compact text
    pub json_format: bool,
}

// Default implementations

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8000,
            service_name: "Halifax Elim Faith Hub".to_string(),
        }
    }
}

impl Default for AccessSettings {
    fn default() -> Self {
        Self {
            code: "Halifax-elim".to_string(),
            operator: "Halifax Elim".to_string(),
        }
    }
}

impl Default for OpenAiSettings {
    fn default() -> Self {
        Self {
            base_url: "https://api.openai.com/v1".to_string(),
            api_key: String::new(),
            timeout_secs: 60,
        }
    }
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            json_format: false,
        }
    }
}

impl HubConfig {
    /// Load configuration from file with environment variable overrides
    pub fn load(config_path: Option<&str>) -> Result<Self> {
        let mut config = Self::default();

        // 1. Load from config file if it exists
        if let Some(path) = Self::find_config_file(config_path)? {
            debug!(path = %path.display(), "Loading configuration file");
            let content = fs::read_to_string(&path).map_err(|e| Error::IoRead {
                path: path.clone(),
                source: e,
            })?;
            config = toml::from_str(&content).map_err(|e| Error::ConfigParse {
                message: format!("{}: {}", path.display(), e.message()),
                source: Some(e),
            })?;
            info!(path = %path.display(), "Configuration loaded from file");
        }

        // 2. Apply environment variable overrides
        config.apply_env_overrides();

        // 3. Validate
        config.validate()?;

        Ok(config)
    }

    /// Find the configuration file to use
    fn find_config_file(explicit_path: Option<&str>) -> Result<Option<PathBuf>> {
        // An explicit path must exist
        if let Some(path) = explicit_path {
            let path = PathBuf::from(expand_path(path));
            if path.exists() {
                return Ok(Some(path));
            }
            return Err(Error::config_not_found(path));
        }

        let search_paths = [
            // Current directory
            PathBuf::from("faith-hub.toml"),
            // User config directory
            dirs::config_dir()
                .map(|p| p.join("faith-hub").join("config.toml"))
                .unwrap_or_default(),
            // Home directory
            dirs::home_dir()
                .map(|p| p.join(".faith-hub").join("config.toml"))
                .unwrap_or_default(),
            // System config (Linux)
            PathBuf::from("/etc/faith-hub/config.toml"),
        ];

        for path in &search_paths {
            if !path.as_os_str().is_empty() && path.exists() {
                debug!(path = %path.display(), "Found configuration file");
                return Ok(Some(path.clone()));
            }
        }

        debug!("No configuration file found, using defaults");
        Ok(None)
    }

    /// Apply environment variable overrides
    fn apply_env_overrides(&mut self) {
        if let Ok(val) = std::env::var(API_KEY_ENV) {
            self.openai.api_key = val;
        }

        // Server settings
        if let Ok(val) = std::env::var("FAITH_HUB_HOST") {
            self.server.host = val;
        }
        if let Ok(val) = std::env::var("FAITH_HUB_PORT") {
            if let Ok(n) = val.parse() {
                self.server.port = n;
            }
        }
        if let Ok(val) = std::env::var("FAITH_HUB_SERVICE_NAME") {
            self.server.service_name = val;
        }

        // Access settings
        if let Ok(val) = std::env::var("FAITH_HUB_ACCESS_CODE") {
            self.access.code = val;
        }
        if let Ok(val) = std::env::var("FAITH_HUB_OPERATOR") {
            self.access.operator = val;
        }

        // OpenAI settings
        if let Ok(val) = std::env::var("FAITH_HUB_OPENAI_BASE_URL") {
            self.openai.base_url = val;
        }
        if let Ok(val) = std::env::var("FAITH_HUB_OPENAI_TIMEOUT_SECS") {
            if let Ok(n) = val.parse() {
                self.openai.timeout_secs = n;
            }
        }

        // Logging settings
        if let Ok(val) = std::env::var("FAITH_HUB_LOG_LEVEL") {
            self.logging.level = val;
        }
        if let Ok(val) = std::env::var("FAITH_HUB_LOG_JSON") {
            self.logging.json_format = val.to_lowercase() == "true" || val == "1";
        }
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        if self.server.host.trim().is_empty() {
            return Err(Error::config_field_invalid("server.host", "Host cannot be empty"));
        }
        if self.server.port == 0 {
            return Err(Error::config_field_invalid("server.port", "Port must be between 1 and 65535"));
        }

        if self.access.code.trim().is_empty() {
            return Err(Error::config_field_invalid("access.code", "Access code cannot be empty"));
        }

        let base_url = &self.openai.base_url;
        if !base_url.starts_with("http://") && !base_url.starts_with("https://") {
            return Err(Error::config_field_invalid(
                "openai.base_url",
                "OpenAI base URL must start with http:// or https://",
            ));
        }
        if self.openai.timeout_secs == 0 {
            return Err(Error::config_field_invalid(
                "openai.timeout_secs",
                "timeout_secs must be greater than 0",
            ));
        }

        let valid_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_levels.contains(&self.logging.level.to_lowercase().as_str()) {
            return Err(Error::config_field_invalid(
                "logging.level",
                format!(
                    "Invalid log level '{}'. Must be one of: {}",
                    self.logging.level,
                    valid_levels.join(", ")
                ),
            ));
        }

        Ok(())
    }

    /// Socket address string for the listener
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }

    /// Whether a completion API credential is configured
    pub fn has_api_key(&self) -> bool {
        !self.openai.api_key.trim().is_empty()
    }
}

/// Expand ~ and environment variables in a config or init path
fn expand_path(path: &str) -> String {
    shellexpand::full(path)
        .unwrap_or_else(|_| std::borrow::Cow::Borrowed(path))
        .into_owned()
}

/// Initialize a new configuration file
pub fn init_config(path: Option<&str>, force: bool) -> Result<PathBuf> {
    let config_path = path
        .map(|p| PathBuf::from(expand_path(p)))
        .unwrap_or_else(|| {
            dirs::home_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join(".faith-hub")
                .join("config.toml")
        });

    if config_path.exists() && !force {
        return Err(Error::Config(format!(
            "Configuration file already exists: {}. Use --force to overwrite.",
            config_path.display()
        )));
    }

    if let Some(parent) = config_path.parent() {
        fs::create_dir_all(parent).map_err(|e| Error::IoWrite {
            path: parent.to_path_buf(),
            source: e,
        })?;
    }

    fs::write(&config_path, generate_default_config()).map_err(|e| Error::IoWrite {
        path: config_path.clone(),
        source: e,
    })?;

    Ok(config_path)
}

/// Generate default configuration content with comments
fn generate_default_config() -> String {
    r#"# Faith Hub Relay Configuration

[server]
# Interface to bind
host = "0.0.0.0"

# TCP port to bind
port = 8000

# Name reported by GET /
service_name = "Halifax Elim Faith Hub"

[access]
# Shared access code required on every chat request
code = "Halifax-elim"

# Who users should ask for the access code
operator = "Halifax Elim"

[openai]
# Completion API base URL
base_url = "https://api.openai.com/v1"

# Request timeout in seconds
timeout_secs = 60

# The API key is read from the OPENAI_API_KEY environment variable.

[logging]
# Log level: trace, debug, info, warn, error
# RUST_LOG, when set, takes precedence.
level = "info"

# One JSON object per line on stderr
json_format = false
"#
    .to_string()
}
