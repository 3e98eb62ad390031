use crate::error::{DocketError, Result};
use crate::scrape::client::ClientConfig;
use dirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;
use url::Url;

const CONFIG_DIR_NAME: &str = ".docket";
const CONFIG_FILE_NAME: &str = "config.yaml";

/// Application configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub search: SearchConfig,

    #[serde(default)]
    pub database: DatabaseConfig,
}

/// Settings for the search client. Unset fields fall back to the built-in
/// defaults in [`ClientConfig`].
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct SearchConfig {
    /// Search endpoint of the court data portal
    #[serde(skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,

    /// User-Agent header sent with every request
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_agent: Option<String>,

    /// Request timeout in seconds
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timeout_secs: Option<u64>,

    /// Lower bound of the pre-request delay, in milliseconds
    #[serde(skip_serializing_if = "Option::is_none")]
    pub delay_min_ms: Option<u64>,

    /// Upper bound of the pre-request delay, in milliseconds
    #[serde(skip_serializing_if = "Option::is_none")]
    pub delay_max_ms: Option<u64>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct DatabaseConfig {
    /// Path of the SQLite case archive
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<PathBuf>,
}

impl SearchConfig {
    /// Resolve into a full client configuration, filling unset fields with
    /// the built-in defaults.
    pub fn to_client_config(&self) -> ClientConfig {
        let defaults = ClientConfig::default();
        ClientConfig {
            base_url: self.base_url.clone().unwrap_or(defaults.base_url),
            user_agent: self.user_agent.clone().unwrap_or(defaults.user_agent),
            timeout_secs: self.timeout_secs.unwrap_or(defaults.timeout_secs),
            delay_min_ms: self.delay_min_ms.unwrap_or(defaults.delay_min_ms),
            delay_max_ms: self.delay_max_ms.unwrap_or(defaults.delay_max_ms),
        }
    }
}

impl Config {
    /// Keys accepted by [`Config::set`] and [`Config::get`]
    pub const KEYS: [&'static str; 6] = [
        "search.base_url",
        "search.user_agent",
        "search.timeout_secs",
        "search.delay_min_ms",
        "search.delay_max_ms",
        "database.path",
    ];

    /// Get the configuration directory path
    pub fn config_path() -> Result<PathBuf> {
        let home_dir = dirs::home_dir()
            .ok_or_else(|| DocketError::Config("Could not determine home directory".to_string()))?;

        Ok(home_dir.join(CONFIG_DIR_NAME))
    }

    /// Get the configuration file full path
    pub fn config_file_path() -> Result<PathBuf> {
        Ok(Self::config_path()?.join(CONFIG_FILE_NAME))
    }

    /// Default location of the case archive
    pub fn default_db_path() -> Result<PathBuf> {
        let data_dir = dirs::data_dir()
            .ok_or_else(|| DocketError::Config("Could not determine data directory".to_string()))?;

        Ok(data_dir.join("docket").join("cases.db"))
    }

    /// Effective database path: configured, or the default location
    pub fn db_path(&self) -> Result<PathBuf> {
        match &self.database.path {
            Some(path) => Ok(path.clone()),
            None => Self::default_db_path(),
        }
    }

    /// Initialize configuration directory and file
    pub fn initialize() -> Result<()> {
        let config_dir = Self::config_path()?;

        // Create config directory with restricted permissions
        if !config_dir.exists() {
            fs::create_dir_all(&config_dir).map_err(|e| {
                DocketError::Config(format!("Failed to create config directory: {}", e))
            })?;

            // Set directory permissions to 0700 on Unix
            #[cfg(unix)]
            {
                use std::os::unix::fs::PermissionsExt;
                let permissions = fs::Permissions::from_mode(0o700);
                fs::set_permissions(&config_dir, permissions).map_err(|e| {
                    DocketError::Config(format!("Failed to set directory permissions: {}", e))
                })?;
            }
        }

        let config_file = Self::config_file_path()?;

        // Create default config file if it doesn't exist
        if !config_file.exists() {
            let default_config = Self::default();
            let yaml = serde_yaml::to_string(&default_config)
                .map_err(|e| DocketError::Config(format!("Failed to serialize config: {}", e)))?;

            fs::write(&config_file, yaml)
                .map_err(|e| DocketError::Config(format!("Failed to write config file: {}", e)))?;

            // Set file permissions to 0600 on Unix
            #[cfg(unix)]
            {
                use std::os::unix::fs::PermissionsExt;
                let permissions = fs::Permissions::from_mode(0o600);
                fs::set_permissions(&config_file, permissions).map_err(|e| {
                    DocketError::Config(format!("Failed to set file permissions: {}", e))
                })?;
            }
        }

        Ok(())
    }

    /// Load configuration from file
    pub fn load() -> Result<Self> {
        Self::initialize()?;

        let config_file = Self::config_file_path()?;
        let contents = fs::read_to_string(&config_file)
            .map_err(|e| DocketError::Config(format!("Failed to read config file: {}", e)))?;

        let config: Self = serde_yaml::from_str(&contents)
            .map_err(|e| DocketError::Config(format!("Failed to parse config file: {}", e)))?;

        Ok(config)
    }

    /// Save configuration to file
    pub fn save(&self) -> Result<()> {
        Self::initialize()?;

        let config_file = Self::config_file_path()?;
        let yaml = serde_yaml::to_string(self)
            .map_err(|e| DocketError::Config(format!("Failed to serialize config: {}", e)))?;

        fs::write(&config_file, yaml)
            .map_err(|e| DocketError::Config(format!("Failed to write config file: {}", e)))?;

        // Set file permissions to 0600 on Unix
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            let permissions = fs::Permissions::from_mode(0o600);
            fs::set_permissions(&config_file, permissions).map_err(|e| {
                DocketError::Config(format!("Failed to set file permissions: {}", e))
            })?;
        }

        Ok(())
    }

    /// Set a configuration value by key path and persist it
    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        self.apply(key, value)?;
        self.save()?;
        Ok(())
    }

    /// Validate and apply a configuration value without saving
    pub fn apply(&mut self, key: &str, value: &str) -> Result<()> {
        match key {
            "search.base_url" => {
                let url = Url::parse(value).map_err(|e| {
                    DocketError::Config(format!("'{}' is not a valid URL: {}", value, e))
                })?;
                if !matches!(url.scheme(), "http" | "https") {
                    return Err(DocketError::Config(format!(
                        "search.base_url must be an http(s) URL, got '{}'",
                        value
                    )));
                }
                self.search.base_url = Some(value.to_string());
            }
            "search.user_agent" => {
                self.search.user_agent = Some(value.to_string());
            }
            "search.timeout_secs" => {
                let secs = parse_number(key, value)?;
                if secs == 0 {
                    return Err(DocketError::Config(
                        "search.timeout_secs must be at least 1".to_string(),
                    ));
                }
                self.search.timeout_secs = Some(secs);
            }
            "search.delay_min_ms" => {
                let min = parse_number(key, value)?;
                let max = self.search.to_client_config().delay_max_ms;
                if min > max {
                    return Err(DocketError::Config(format!(
                        "delay_min_ms ({}) cannot exceed delay_max_ms ({})",
                        min, max
                    )));
                }
                self.search.delay_min_ms = Some(min);
            }
            "search.delay_max_ms" => {
                let max = parse_number(key, value)?;
                let min = self.search.to_client_config().delay_min_ms;
                if max < min {
                    return Err(DocketError::Config(format!(
                        "delay_max_ms ({}) cannot be below delay_min_ms ({})",
                        max, min
                    )));
                }
                self.search.delay_max_ms = Some(max);
            }
            "database.path" => {
                if value.trim().is_empty() {
                    return Err(DocketError::Config(
                        "database.path cannot be empty".to_string(),
                    ));
                }
                self.database.path = Some(PathBuf::from(value));
            }
            _ => {
                return Err(DocketError::Config(format!(
                    "Unknown configuration key: {}",
                    key
                )));
            }
        }

        Ok(())
    }

    /// Get the effective value for a configuration key
    pub fn get(&self, key: &str) -> Option<String> {
        let effective = self.search.to_client_config();
        match key {
            "search.base_url" => Some(effective.base_url),
            "search.user_agent" => Some(effective.user_agent),
            "search.timeout_secs" => Some(effective.timeout_secs.to_string()),
            "search.delay_min_ms" => Some(effective.delay_min_ms.to_string()),
            "search.delay_max_ms" => Some(effective.delay_max_ms.to_string()),
            "database.path" => self.db_path().ok().map(|p| p.display().to_string()),
            _ => None,
        }
    }
}

fn parse_number(key: &str, value: &str) -> Result<u64> {
    value.parse::<u64>().map_err(|_| {
        DocketError::Config(format!(
            "Value for {} must be a whole number, got '{}'",
            key, value
        ))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scrape::client::{DEFAULT_BASE_URL, DEFAULT_USER_AGENT};

    #[test]
    fn unset_search_config_resolves_to_defaults() {
        let client_config = SearchConfig::default().to_client_config();
        assert_eq!(client_config.base_url, DEFAULT_BASE_URL);
        assert_eq!(client_config.user_agent, DEFAULT_USER_AGENT);
        assert_eq!(client_config.timeout_secs, 15);
        assert_eq!(client_config.delay_min_ms, 2000);
        assert_eq!(client_config.delay_max_ms, 5000);
    }

    #[test]
    fn overrides_flow_into_client_config() {
        let mut config = Config::default();
        config.apply("search.base_url", "https://courts.test/search").unwrap();
        config.apply("search.timeout_secs", "30").unwrap();

        let client_config = config.search.to_client_config();
        assert_eq!(client_config.base_url, "https://courts.test/search");
        assert_eq!(client_config.timeout_secs, 30);
        assert_eq!(client_config.delay_min_ms, 2000);
    }

    #[test]
    fn rejects_unknown_keys() {
        let mut config = Config::default();
        let err = config.apply("search.retries", "3").unwrap_err();
        assert!(err.to_string().contains("Unknown configuration key"));
    }

    #[test]
    fn rejects_malformed_base_url() {
        let mut config = Config::default();
        assert!(config.apply("search.base_url", "not a url").is_err());
    }

    #[test]
    fn rejects_non_http_base_url() {
        let mut config = Config::default();
        let err = config
            .apply("search.base_url", "ftp://courts.test/search")
            .unwrap_err();
        assert!(err.to_string().contains("http"));

        assert!(config.apply("search.base_url", "file:///results.html").is_err());
        assert!(config.search.base_url.is_none());
    }

    #[test]
    fn rejects_inverted_delay_window() {
        let mut config = Config::default();
        assert!(config.apply("search.delay_min_ms", "6000").is_err());
        assert!(config.apply("search.delay_max_ms", "1000").is_err());

        // Shrinking from the right order works
        config.apply("search.delay_min_ms", "1000").unwrap();
        config.apply("search.delay_max_ms", "1500").unwrap();
        let client_config = config.search.to_client_config();
        assert_eq!(client_config.delay_min_ms, 1000);
        assert_eq!(client_config.delay_max_ms, 1500);
    }

    #[test]
    fn rejects_non_numeric_values() {
        let mut config = Config::default();
        let err = config.apply("search.timeout_secs", "soon").unwrap_err();
        assert!(err.to_string().contains("whole number"));
    }

    #[test]
    fn effective_values_are_visible_through_get() {
        let config = Config::default();
        assert_eq!(config.get("search.timeout_secs").as_deref(), Some("15"));
        assert_eq!(config.get("search.base_url").as_deref(), Some(DEFAULT_BASE_URL));
        assert!(config.get("does.not.exist").is_none());
    }
}
