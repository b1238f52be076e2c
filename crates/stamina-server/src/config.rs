//! RON configuration for the static server

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use stamina_core::LogConfig;
use std::fs;
use std::io::ErrorKind;
use std::net::SocketAddr;
use std::path::{Path, PathBuf};

/// Root configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct Config {
    /// Logger level and active namespaces
    #[serde(default)]
    pub log: LogConfig,
    /// Listener and served files
    #[serde(default)]
    pub server: ServerConfig,
}

/// Listener and the two files the server knows about
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct ServerConfig {
    /// Listen address (e.g., "127.0.0.1:3000")
    #[serde(default = "default_listen")]
    pub listen: String,
    /// Directory the files are read from
    #[serde(default = "default_root")]
    pub root: String,
    /// Entry HTML document, relative to `root`
    #[serde(default = "default_entry")]
    pub entry: String,
    /// Bundled script, relative to `root`
    #[serde(default = "default_script")]
    pub script: String,
}

fn default_listen() -> String {
    "127.0.0.1:3000".to_string()
}

fn default_root() -> String {
    "www".to_string()
}

fn default_entry() -> String {
    "index.html".to_string()
}

fn default_script() -> String {
    "js/stamina.js".to_string()
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            listen: default_listen(),
            root: default_root(),
            entry: default_entry(),
            script: default_script(),
        }
    }
}

impl ServerConfig {
    pub fn listen_addr(&self) -> Result<SocketAddr> {
        self.listen
            .parse()
            .map_err(|_| Error::Addr(self.listen.clone()))
    }

    pub fn entry_path(&self) -> PathBuf {
        Path::new(&self.root).join(&self.entry)
    }

    pub fn script_path(&self) -> PathBuf {
        Path::new(&self.root).join(&self.script)
    }
}

impl Config {
    pub fn from_ron(source: &str) -> Result<Self> {
        ron::from_str(source).map_err(|e| Error::Config(e.to_string()))
    }

    /// Load configuration from a RON file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let content = fs::read_to_string(path.as_ref())?;
        Self::from_ron(&content)
    }

    /// Like [`load`](Self::load), but a missing file yields the defaults
    pub fn load_or_default(path: impl AsRef<Path>) -> Result<Self> {
        match fs::read_to_string(path.as_ref()) {
            Ok(content) => Self::from_ron(&content),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(Self::default()),
            Err(e) => Err(e.into()),
        }
    }
}
