//! Leveled, namespace-filtered logger
//!
//! Each component owns a [`Logger`] built from a module name and a
//! namespace. A line is emitted only when its level reaches the configured
//! minimum and its namespace is on the allow-list; both are read from the
//! shared [`LogSettings`] on every call. Emitted lines are forwarded to
//! `tracing` with a `[namespace][module]` prefix.

use crate::{Error, LogSettings};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Log severity, ordered from least to most severe
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub enum LogLevel {
    #[default]
    #[serde(alias = "DEBUG")]
    Debug,
    #[serde(alias = "INFO")]
    Info,
    #[serde(alias = "WARN")]
    Warn,
    #[serde(alias = "ERROR")]
    Error,
}

impl LogLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            LogLevel::Debug => "DEBUG",
            LogLevel::Info => "INFO",
            LogLevel::Warn => "WARN",
            LogLevel::Error => "ERROR",
        }
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LogLevel {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "DEBUG" => Ok(LogLevel::Debug),
            "INFO" => Ok(LogLevel::Info),
            "WARN" => Ok(LogLevel::Warn),
            "ERROR" => Ok(LogLevel::Error),
            other => Err(Error::Config(format!("unknown log level: {}", other))),
        }
    }
}

/// A named logger bound to the shared settings
#[derive(Debug, Clone)]
pub struct Logger {
    settings: LogSettings,
    module: String,
    namespace: String,
}

impl Logger {
    pub fn new(
        settings: LogSettings,
        module: impl Into<String>,
        namespace: impl Into<String>,
    ) -> Self {
        Self {
            settings,
            module: module.into(),
            namespace: namespace.into(),
        }
    }

    /// Create a logger in the default namespace
    pub fn with_default_namespace(settings: LogSettings, module: impl Into<String>) -> Self {
        Self::new(settings, module, crate::config::DEFAULT_NAMESPACE)
    }

    pub fn module(&self) -> &str {
        &self.module
    }

    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    pub fn prefix(&self) -> String {
        format!("[{}][{}]", self.namespace, self.module)
    }

    /// Whether a message at `level` would currently be emitted
    pub fn enabled(&self, level: LogLevel) -> bool {
        self.settings.allows(level, &self.namespace)
    }

    /// Emit `message` at `level` if the filters allow it
    pub fn log(&self, level: LogLevel, message: impl fmt::Display) {
        if !self.enabled(level) {
            return;
        }
        let prefix = self.prefix();
        match level {
            LogLevel::Debug => tracing::debug!(
                namespace = %self.namespace,
                module = %self.module,
                "{} {}",
                prefix,
                message
            ),
            LogLevel::Info => tracing::info!(
                namespace = %self.namespace,
                module = %self.module,
                "{} {}",
                prefix,
                message
            ),
            LogLevel::Warn => tracing::warn!(
                namespace = %self.namespace,
                module = %self.module,
                "{} {}",
                prefix,
                message
            ),
            LogLevel::Error => tracing::error!(
                namespace = %self.namespace,
                module = %self.module,
                "{} {}",
                prefix,
                message
            ),
        }
    }

    pub fn debug(&self, message: impl fmt::Display) {
        self.log(LogLevel::Debug, message);
    }

    pub fn info(&self, message: impl fmt::Display) {
        self.log(LogLevel::Info, message);
    }

    pub fn warn(&self, message: impl fmt::Display) {
        self.log(LogLevel::Warn, message);
    }

    pub fn error(&self, message: impl fmt::Display) {
        self.log(LogLevel::Error, message);
    }
}

/// Install a console subscriber that prints every line the loggers let through.
///
/// Filtering is done by [`LogSettings`], so the subscriber itself accepts
/// everything. Returns `false` if a global subscriber was already set.
pub fn install_console() -> bool {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::TRACE)
        .with_target(false)
        .try_init()
        .is_ok()
}
