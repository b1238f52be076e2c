//! Error types for stamina-core

use crate::Language;
use thiserror::Error;

/// Core error type
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    #[error("Unknown dictionary key: {0}")]
    UnknownKey(String),

    #[error("Cannot dispatch in the middle of a dispatch")]
    DispatchInProgress,

    #[error("Missing {language} translation for key: {key}")]
    MissingTranslation { key: String, language: Language },

    #[error("Dictionary error: {0}")]
    Dictionary(String),

    #[error("Configuration error: {0}")]
    Config(String),

    /// A dispatcher callback reported a failure
    #[error("Subscriber error: {0}")]
    Subscriber(String),
}

/// Result type alias
pub type Result<T> = std::result::Result<T, Error>;
