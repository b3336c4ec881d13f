use std::net::SocketAddr;
use std::path::{Path, PathBuf};

use c4_engine::SearchConfig;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Environment variable naming the config file.
pub const CONFIG_ENV: &str = "CONNECT4_CONFIG";
const DEFAULT_CONFIG_PATH: &str = "connect4.toml";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    FileRead {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to parse TOML: {0}")]
    TomlParse(#[from] toml::de::Error),
    #[error("config validation error: {0}")]
    Validation(String),
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub addr: String,
    pub save_path: PathBuf,
    pub log_filter: String,
    pub search: SearchConfig,
}

impl Default for ServerConfig {
    fn default() -> Self {
        ServerConfig {
            addr: "0.0.0.0:3000".to_string(),
            save_path: PathBuf::from("connect4_save.json"),
            log_filter: "info,tower_http=debug".to_string(),
            search: SearchConfig::default(),
        }
    }
}

impl ServerConfig {
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::FileRead {
            path: path.to_path_buf(),
            source: e,
        })?;
        let config: ServerConfig = toml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Falls back to defaults when the file does not exist.
    pub fn load_or_default(path: &Path) -> Result<Self, ConfigError> {
        if path.exists() {
            Self::load(path)
        } else {
            Ok(Self::default())
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.addr.parse::<SocketAddr>().is_err() {
            return Err(ConfigError::Validation(format!(
                "addr must be a socket address, got {:?}",
                self.addr
            )));
        }
        if self.save_path.as_os_str().is_empty() {
            return Err(ConfigError::Validation("save_path must not be empty".into()));
        }
        self.search
            .validate()
            .map_err(|e| ConfigError::Validation(format!("search: {e}")))
    }
}

pub fn config_path() -> PathBuf {
    std::env::var_os(CONFIG_ENV)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_PATH))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        let config = ServerConfig::default();
        config.validate().unwrap();
        assert_eq!(config.search.depth, 3);
        assert!(!config.search.pruning);
    }

    #[test]
    fn missing_file_uses_defaults() {
        let config = ServerConfig::load_or_default(Path::new("no_such_connect4.toml")).unwrap();
        assert_eq!(config.addr, "0.0.0.0:3000");
    }

    #[test]
    fn partial_file_keeps_other_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("connect4.toml");
        std::fs::write(
            &path,
            r#"
save_path = "games/current.json"

[search]
pruning = true
"#,
        )
        .unwrap();

        let config = ServerConfig::load(&path).unwrap();
        assert_eq!(config.save_path, PathBuf::from("games/current.json"));
        assert!(config.search.pruning);
        assert_eq!(config.search.depth, 3);
        assert_eq!(config.addr, "0.0.0.0:3000");
    }

    #[test]
    fn rejects_deep_search() {
        let mut config = ServerConfig::default();
        config.search.depth = 12;
        let err = config.validate().unwrap_err();
        assert_eq!(
            err.to_string(),
            "config validation error: search: depth 12 is out of range (1-8)"
        );
    }

    #[test]
    fn rejects_bad_address() {
        let mut config = ServerConfig::default();
        config.addr = "localhost".into();
        assert!(config.validate().is_err());
    }

    #[test]
    fn bad_toml_is_a_parse_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("connect4.toml");
        std::fs::write(&path, "addr = [").unwrap();
        assert!(matches!(
            ServerConfig::load(&path),
            Err(ConfigError::TomlParse(_))
        ));
    }
}
