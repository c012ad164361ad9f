use mini_apis_core::DEFAULT_RESET_HASH;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Application configuration shared by the server and the admin CLI.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Port the HTTP server listens on
    pub port: u16,
    /// Directory holding the service documents
    pub data_dir: PathBuf,
    /// base64(SHA-256) of the quotemaster reset password
    pub reset_hash: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            port: 5678,
            data_dir: dirs::data_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join("mini-apis"),
            reset_hash: DEFAULT_RESET_HASH.to_string(),
        }
    }
}

impl Config {
    /// Load configuration with priority: env vars > config file > defaults
    pub fn load(config_path: Option<PathBuf>) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        let path = config_path.unwrap_or_else(Self::default_config_path);
        if path.exists() {
            let contents = std::fs::read_to_string(&path)
                .map_err(|e| ConfigError::ReadError(path.clone(), e))?;
            config = serde_yaml::from_str(&contents)
                .map_err(|e| ConfigError::ParseError(path.clone(), e))?;
        }

        if let Ok(port) = std::env::var("MINI_APIS_PORT") {
            config.port = port
                .parse()
                .map_err(|_| ConfigError::InvalidValue("MINI_APIS_PORT", port))?;
        }
        if let Ok(data_dir) = std::env::var("MINI_APIS_DATA_DIR") {
            config.data_dir = PathBuf::from(data_dir);
        }
        if let Ok(reset_hash) = std::env::var("MINI_APIS_RESET_HASH") {
            config.reset_hash = reset_hash;
        }

        Ok(config)
    }

    /// Config file path: `$MINI_APIS_CONFIG`, or ~/.config/mini-apis/config.yaml
    pub fn default_config_path() -> PathBuf {
        std::env::var("MINI_APIS_CONFIG")
            .map(PathBuf::from)
            .unwrap_or_else(|_| {
                dirs::config_dir()
                    .unwrap_or_else(|| PathBuf::from("."))
                    .join("mini-apis")
                    .join("config.yaml")
            })
    }

    /// Path of the quotemaster document
    pub fn quotes_path(&self) -> PathBuf {
        self.data_dir.join("quotemaster").join("quotes.json")
    }

    /// Path of the myPlanner document
    pub fn planner_path(&self) -> PathBuf {
        self.data_dir.join("myplanner").join("data.json")
    }
}

#[derive(Debug)]
pub enum ConfigError {
    ReadError(PathBuf, std::io::Error),
    ParseError(PathBuf, serde_yaml::Error),
    InvalidValue(&'static str, String),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::ReadError(path, e) => {
                write!(f, "Failed to read config file '{}': {}", path.display(), e)
            }
            ConfigError::ParseError(path, e) => {
                write!(
                    f,
                    "Failed to parse config file '{}': {}",
                    path.display(),
                    e
                )
            }
            ConfigError::InvalidValue(var, value) => {
                write!(f, "Invalid value '{}' for {}", value, var)
            }
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::ReadError(_, e) => Some(e),
            ConfigError::ParseError(_, e) => Some(e),
            ConfigError::InvalidValue(_, _) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::tempdir;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.port, 5678);
        assert!(config.data_dir.ends_with("mini-apis"));
        assert_eq!(config.reset_hash, DEFAULT_RESET_HASH);
    }

    #[test]
    fn test_document_paths() {
        let config = Config {
            data_dir: PathBuf::from("/srv/mini-apis"),
            ..Config::default()
        };
        assert_eq!(
            config.quotes_path(),
            PathBuf::from("/srv/mini-apis/quotemaster/quotes.json")
        );
        assert_eq!(
            config.planner_path(),
            PathBuf::from("/srv/mini-apis/myplanner/data.json")
        );
    }

    #[test]
    fn test_load_no_file_uses_defaults() {
        let temp_dir = tempdir().unwrap();
        let config_path = temp_dir.path().join("nonexistent.yaml");

        let config = Config::load(Some(config_path)).unwrap();
        assert!(config.data_dir.ends_with("mini-apis"));
    }

    #[test]
    fn test_load_from_file() {
        let temp_dir = tempdir().unwrap();
        let config_path = temp_dir.path().join("config.yaml");

        let mut file = std::fs::File::create(&config_path).unwrap();
        writeln!(file, "data_dir: /custom/data").unwrap();

        let config = Config::load(Some(config_path)).unwrap();
        assert_eq!(config.data_dir, PathBuf::from("/custom/data"));
    }

    #[test]
    fn test_env_var_overrides_file() {
        let temp_dir = tempdir().unwrap();
        let config_path = temp_dir.path().join("config.yaml");

        let mut file = std::fs::File::create(&config_path).unwrap();
        writeln!(file, "reset_hash: fromfile").unwrap();

        std::env::set_var("MINI_APIS_RESET_HASH", "fromenv");

        let config = Config::load(Some(config_path)).unwrap();
        assert_eq!(config.reset_hash, "fromenv");

        std::env::remove_var("MINI_APIS_RESET_HASH");
    }

    #[test]
    fn test_invalid_yaml_error() {
        let temp_dir = tempdir().unwrap();
        let config_path = temp_dir.path().join("config.yaml");

        let mut file = std::fs::File::create(&config_path).unwrap();
        writeln!(file, "invalid: yaml: content: [").unwrap();

        let result = Config::load(Some(config_path));
        assert!(result.is_err());
        let err = result.unwrap_err();
        assert!(err.to_string().contains("Failed to parse config file"));
    }
}
