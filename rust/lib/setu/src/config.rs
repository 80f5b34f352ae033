//! Client configuration.
//!
//! Reads/writes `~/.swasthya/config.toml`. Environment variables override
//! the file.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const ENV_GRAPHQL_ENDPOINT: &str = "SWASTHYA_GRAPHQL_ENDPOINT";
pub const ENV_ADMIN_SECRET: &str = "SWASTHYA_ADMIN_SECRET";
pub const ENV_FIREBASE_API_KEY: &str = "SWASTHYA_FIREBASE_API_KEY";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("parse {}: {message}", path.display())]
    Parse { path: PathBuf, message: String },

    /// A value needed to reach the remote services is not configured.
    #[error("{key} is not configured (set it in the config file or {env})")]
    Missing { key: &'static str, env: &'static str },
}

/// Where the collaborators live.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientConfig {
    /// GraphQL endpoint, e.g. `https://<project>.hasura.app/v1/graphql`.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub graphql_endpoint: String,

    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub admin_secret: String,

    /// Web API key of the Firebase project.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub firebase_api_key: String,
}

/// A config with every remote value present.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoteConfig {
    pub graphql_endpoint: String,
    pub admin_secret: String,
    pub firebase_api_key: String,
}

impl ClientConfig {
    /// Default config file path: ~/.swasthya/config.toml.
    pub fn default_path() -> PathBuf {
        dirs_path().join("config.toml")
    }

    /// Load config from disk, or return default if the file doesn't exist.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        toml::from_str(&content).map_err(|e| ConfigError::Parse {
            path: path.to_path_buf(),
            message: e.to_string(),
        })
    }

    /// Load from disk, then apply the process environment.
    pub fn load_with_env(path: &Path) -> Result<Self, ConfigError> {
        let mut config = Self::load(path)?;
        config.apply_env(|key| std::env::var(key).ok());
        Ok(config)
    }

    /// Save config to disk.
    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        let write_err = |source| ConfigError::Write {
            path: path.to_path_buf(),
            source,
        };
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(write_err)?;
        }
        let content = toml::to_string_pretty(self).map_err(|e| ConfigError::Parse {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        std::fs::write(path, content).map_err(write_err)
    }

    /// Override fields with non-empty values from `lookup`.
    pub fn apply_env<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        let fields = [
            (ENV_GRAPHQL_ENDPOINT, &mut self.graphql_endpoint),
            (ENV_ADMIN_SECRET, &mut self.admin_secret),
            (ENV_FIREBASE_API_KEY, &mut self.firebase_api_key),
        ];
        for (key, field) in fields {
            if let Some(value) = lookup(key).filter(|v| !v.trim().is_empty()) {
                *field = value;
            }
        }
    }

    /// Set a field by its config-file key.
    pub fn set(&mut self, key: &str, value: &str) -> bool {
        match key {
            "graphql_endpoint" => self.graphql_endpoint = value.to_string(),
            "admin_secret" => self.admin_secret = value.to_string(),
            "firebase_api_key" => self.firebase_api_key = value.to_string(),
            _ => return false,
        }
        true
    }

    pub fn require_remote(&self) -> Result<RemoteConfig, ConfigError> {
        let required = |value: &str, key, env| {
            if value.trim().is_empty() {
                Err(ConfigError::Missing { key, env })
            } else {
                Ok(value.to_string())
            }
        };
        Ok(RemoteConfig {
            graphql_endpoint: required(&self.graphql_endpoint, "graphql_endpoint", ENV_GRAPHQL_ENDPOINT)?,
            admin_secret: required(&self.admin_secret, "admin_secret", ENV_ADMIN_SECRET)?,
            firebase_api_key: required(&self.firebase_api_key, "firebase_api_key", ENV_FIREBASE_API_KEY)?,
        })
    }
}

/// Return the Swasthya config directory (~/.swasthya).
fn dirs_path() -> PathBuf {
    let home = std::env::var("HOME")
        .or_else(|_| std::env::var("USERPROFILE"))
        .unwrap_or_else(|_| ".".to_string());
    PathBuf::from(home).join(".swasthya")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn full() -> ClientConfig {
        ClientConfig {
            graphql_endpoint: "https://demo.hasura.app/v1/graphql".into(),
            admin_secret: "s3cret".into(),
            firebase_api_key: "AIza-demo".into(),
        }
    }

    #[test]
    fn missing_file_is_default() {
        let dir = tempfile::tempdir().unwrap();
        let config = ClientConfig::load(&dir.path().join("config.toml")).unwrap();
        assert_eq!(config, ClientConfig::default());
    }

    #[test]
    fn save_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");
        full().save(&path).unwrap();
        assert_eq!(ClientConfig::load(&path).unwrap(), full());
    }

    #[test]
    fn bad_toml_is_parse_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "graphql_endpoint = [").unwrap();
        assert!(matches!(ClientConfig::load(&path), Err(ConfigError::Parse { .. })));
    }

    #[test]
    fn env_overrides_file_values() {
        let mut config = full();
        config.apply_env(|key| match key {
            ENV_ADMIN_SECRET => Some("from-env".into()),
            ENV_FIREBASE_API_KEY => Some("  ".into()),
            _ => None,
        });
        assert_eq!(config.admin_secret, "from-env");
        assert_eq!(config.firebase_api_key, "AIza-demo");
        assert_eq!(config.graphql_endpoint, "https://demo.hasura.app/v1/graphql");
    }

    #[test]
    fn require_remote_names_the_gap() {
        assert!(full().require_remote().is_ok());

        let mut config = full();
        config.admin_secret.clear();
        match config.require_remote() {
            Err(ConfigError::Missing { key, env }) => {
                assert_eq!(key, "admin_secret");
                assert_eq!(env, ENV_ADMIN_SECRET);
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn set_by_key() {
        let mut config = ClientConfig::default();
        assert!(config.set("firebase_api_key", "k"));
        assert!(!config.set("nope", "k"));
        assert_eq!(config.firebase_api_key, "k");
    }
}
