use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use super::client_config::{ClientConfig, DEFAULT_API_VERSION, DEFAULT_BASE_URL, DEFAULT_TIMEOUT};
use crate::utils::app_paths::AppPaths;

/// On-disk settings, `config.toml` in the platform config directory.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    pub connection: ConnectionConfig,
    pub credentials: CredentialsConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ConnectionConfig {
    /// API root, without the version segment
    pub base_url: String,

    /// API version number inserted into every path
    pub version: u32,

    /// Timezone sent with every request (IANA name or offset)
    pub timezone: Option<String>,

    /// Request timeout in seconds
    pub timeout_secs: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(default)]
pub struct CredentialsConfig {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct LoggingConfig {
    /// Default tracing filter when RUST_LOG is unset
    pub filter: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            connection: ConnectionConfig::default(),
            credentials: CredentialsConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

impl Default for ConnectionConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            version: DEFAULT_API_VERSION,
            timezone: None,
            timeout_secs: DEFAULT_TIMEOUT.as_secs(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: "warn".to_string(),
        }
    }
}

impl Config {
    /// Load config from the default location, or defaults if there is no file
    pub fn load() -> Result<Self> {
        let config_path = Self::get_config_path()?;
        if !config_path.exists() {
            return Ok(Self::default());
        }
        Self::load_from(&config_path)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("reading config file {}", path.display()))?;
        let config: Config = toml::from_str(&contents)
            .with_context(|| format!("parsing config file {}", path.display()))?;
        Ok(config)
    }

    /// Save config to the default location
    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::get_config_path()?)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let contents = toml::to_string_pretty(self)?;
        fs::write(path, contents)?;
        Ok(())
    }

    pub fn get_config_path() -> Result<PathBuf> {
        AppPaths::config_file()
    }

    /// Build the client configuration these settings describe.
    pub fn client_config(&self) -> Result<ClientConfig> {
        let credentials = &self.credentials;
        let mut config = ClientConfig::new(&credentials.username, &credentials.password)
            .context("credentials missing from config file")?
            .with_base_url(&self.connection.base_url)
            .context("invalid base_url in config file")?
            .with_version(self.connection.version)
            .with_timeout(Duration::from_secs(self.connection.timeout_secs));

        if let Some(timezone) = &self.connection.timezone {
            config = config.with_timezone(timezone);
        }
        Ok(config)
    }

    /// A default config file with comments
    pub fn create_default_with_comments() -> String {
        format!(
            r#"# StatCounter client configuration
# Location: ~/.config/statcounter-client/config.toml (Linux)
#           ~/Library/Application Support/statcounter-client/config.toml (macOS)
#           %APPDATA%\statcounter-client\config.toml (Windows)

[connection]
# API root; the version number is appended as a path segment
base_url = "{base_url}"
version = {version}

# Timezone sent with every request (leave commented to use the account default)
# timezone = "Europe/Dublin"

# Request timeout in seconds
timeout_secs = {timeout}

[credentials]
username = ""
password = ""

[logging]
# tracing filter used when RUST_LOG is not set
filter = "warn"
"#,
            base_url = DEFAULT_BASE_URL,
            version = DEFAULT_API_VERSION,
            timeout = DEFAULT_TIMEOUT.as_secs(),
        )
    }
}
