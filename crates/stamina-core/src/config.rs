//! Process-wide logging configuration
//!
//! [`LogConfig`] is the plain, serializable shape found under `log` in the
//! site's RON configuration. [`LogSettings`] is the shared handle every
//! [`Logger`](crate::Logger) reads on each call, so a change made through
//! it is picked up by the next log line without a restart.

use crate::{Error, LogLevel, Result};
use serde::{Deserialize, Serialize};
use std::sync::{Arc, PoisonError, RwLock};

/// Namespace used by loggers created without an explicit one
pub const DEFAULT_NAMESPACE: &str = "default";

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogConfig {
    /// Minimum level that gets emitted
    #[serde(default)]
    pub level: LogLevel,
    /// Namespaces allowed to emit
    #[serde(default = "default_namespaces")]
    pub active_namespaces: Vec<String>,
}

fn default_namespaces() -> Vec<String> {
    [
        DEFAULT_NAMESPACE,
        "Actions",
        "Dispatchers",
        "Stores",
        "Components",
        "Server",
    ]
    .iter()
    .map(|ns| ns.to_string())
    .collect()
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: LogLevel::default(),
            active_namespaces: default_namespaces(),
        }
    }
}

impl LogConfig {
    /// Parse a configuration from RON text
    pub fn from_ron(source: &str) -> Result<Self> {
        ron::from_str(source).map_err(|e| Error::Config(e.to_string()))
    }

    /// Check whether a namespace is in the allow-list
    pub fn is_active(&self, namespace: &str) -> bool {
        self.active_namespaces.iter().any(|ns| ns == namespace)
    }

    /// Check whether a message at `level` in `namespace` passes both filters
    pub fn allows(&self, level: LogLevel, namespace: &str) -> bool {
        level >= self.level && self.is_active(namespace)
    }
}

/// Shared, live-editable handle to a [`LogConfig`]
#[derive(Debug, Clone, Default)]
pub struct LogSettings {
    inner: Arc<RwLock<LogConfig>>,
}

impl LogSettings {
    pub fn new(config: LogConfig) -> Self {
        Self {
            inner: Arc::new(RwLock::new(config)),
        }
    }

    /// Copy of the current configuration
    pub fn snapshot(&self) -> LogConfig {
        self.inner
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn allows(&self, level: LogLevel, namespace: &str) -> bool {
        self.inner
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .allows(level, namespace)
    }

    pub fn set_level(&self, level: LogLevel) {
        self.inner
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .level = level;
    }

    /// Add a namespace to the allow-list
    pub fn activate(&self, namespace: impl Into<String>) {
        let namespace = namespace.into();
        let mut config = self.inner.write().unwrap_or_else(PoisonError::into_inner);
        if !config.is_active(&namespace) {
            config.active_namespaces.push(namespace);
        }
    }

    /// Remove a namespace from the allow-list
    pub fn deactivate(&self, namespace: &str) {
        self.inner
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .active_namespaces
            .retain(|ns| ns != namespace);
    }

    /// Swap in a whole new configuration
    pub fn replace(&self, config: LogConfig) {
        *self.inner.write().unwrap_or_else(PoisonError::into_inner) = config;
    }
}
