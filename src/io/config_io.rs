use std::fs;
use std::path::{Path, PathBuf};

use crate::model::config::Config;

/// Error type for configuration loading
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("could not read {path}: {source}")]
    ReadError {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("could not parse {path}: {source}")]
    ParseError {
        path: PathBuf,
        source: toml::de::Error,
    },
    #[error("no data directory available; pass --db")]
    NoDataDir,
}

/// Default location: `<config_dir>/todo/config.toml`
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("todo").join("config.toml"))
}

/// Default database: `<data_dir>/todocli/todos.db`
pub fn default_db_path() -> Option<PathBuf> {
    dirs::data_dir().map(|d| d.join("todocli").join("todos.db"))
}

/// Read a config file. A missing file yields the defaults.
pub fn load_config(path: &Path) -> Result<Config, ConfigError> {
    let text = match fs::read_to_string(path) {
        Ok(text) => text,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Config::default()),
        Err(e) => {
            return Err(ConfigError::ReadError {
                path: path.to_path_buf(),
                source: e,
            });
        }
    };
    toml::from_str(&text).map_err(|e| ConfigError::ParseError {
        path: path.to_path_buf(),
        source: e,
    })
}

/// Pick the database path: explicit override, then config, then platform default.
pub fn resolve_db_path(override_path: Option<&Path>, config: &Config) -> Result<PathBuf, ConfigError> {
    if let Some(p) = override_path {
        return Ok(p.to_path_buf());
    }
    if let Some(p) = &config.storage.path {
        return Ok(p.clone());
    }
    default_db_path().ok_or(ConfigError::NoDataDir)
}
