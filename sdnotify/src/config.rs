//! Configuration for locating the supervisor's notification socket
//!
//! `NOTIFY_SOCKET` is set by the supervisor and always wins. A config file
//! only supplies the socket when the environment does not.

use eyre::{Context, Result};
use serde::{Deserialize, Serialize};
use std::ffi::OsString;
use std::path::{Path, PathBuf};

use crate::address::NotifyAddress;
use crate::error::NotifyError;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Notification socket address; a leading `@` selects the abstract namespace
    #[serde(default)]
    pub socket: Option<PathBuf>,
}

impl Config {
    /// Resolve the socket from the process environment
    pub fn from_env() -> Self {
        Self::from_lookup(env_lookup)
    }

    /// Resolve the socket through an arbitrary key lookup
    ///
    /// An empty value counts as unset.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: FnOnce(&str) -> Option<OsString>,
    {
        Self {
            socket: lookup(crate::SOCKET).filter(|v| !v.is_empty()).map(PathBuf::from),
        }
    }

    /// Use an explicit socket address
    pub fn with_socket(socket: impl Into<PathBuf>) -> Self {
        Self {
            socket: Some(socket.into()),
        }
    }

    /// Load config, preferring `NOTIFY_SOCKET` over the config file
    pub fn load(path: Option<&PathBuf>) -> Result<Self> {
        Self::load_with_lookup(path, env_lookup)
    }

    /// Same as [`Config::load`] but with a custom key lookup
    pub fn load_with_lookup<F>(path: Option<&PathBuf>, lookup: F) -> Result<Self>
    where
        F: FnOnce(&str) -> Option<OsString>,
    {
        let env = Self::from_lookup(lookup);

        let file = match path {
            Some(config_path) => Self::load_file(config_path)?,
            None if env.socket.is_some() => Config::default(),
            None => Self::load_default_locations()?,
        };
        let file_socket = file.socket.filter(|s| !s.as_os_str().is_empty());

        Ok(Self {
            socket: env.socket.or(file_socket),
        })
    }

    fn load_default_locations() -> Result<Self> {
        let default_paths = [
            dirs::config_dir().map(|p| p.join("sdnotify").join("config.yml")),
            Some(PathBuf::from("sdnotify.yml")),
        ];

        for path in default_paths.iter().flatten() {
            if path.exists() {
                return Self::load_file(path);
            }
        }

        Ok(Config::default())
    }

    fn load_file(path: &Path) -> Result<Self> {
        let content =
            std::fs::read_to_string(path).with_context(|| format!("Failed to read config {}", path.display()))?;
        let config: Config =
            serde_yaml::from_str(&content).with_context(|| format!("Failed to parse config {}", path.display()))?;
        Ok(config)
    }

    /// Resolve the configured socket into an address
    ///
    /// An unset or empty value means no supervisor is listening.
    pub fn address(&self) -> crate::Result<NotifyAddress> {
        self.socket
            .as_deref()
            .and_then(NotifyAddress::parse)
            .ok_or(NotifyError::NotConfigured { key: crate::SOCKET })
    }
}

fn env_lookup(key: &str) -> Option<OsString> {
    std::env::var_os(key)
}
