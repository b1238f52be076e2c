//! Fixed enumerations shared by actions, the dispatcher and the stores

use serde::{Deserialize, Serialize};
use std::fmt;

/// Tag identifying the kind of an [`Action`](crate::Action)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ActionType {
    /// The active language was changed
    LanguageChanged,
    /// The displayed page was changed
    RouteChanged,
}

impl ActionType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ActionType::LanguageChanged => "LANGUAGE_CHANGED",
            ActionType::RouteChanged => "ROUTE_CHANGED",
        }
    }
}

impl fmt::Display for ActionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Provenance of a dispatched payload
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PayloadSource {
    /// Triggered by the environment (start-up, server push)
    ServerSource,
    /// Triggered by a user interaction in a view
    ViewSource,
}

impl PayloadSource {
    pub fn as_str(&self) -> &'static str {
        match self {
            PayloadSource::ServerSource => "SERVER_SOURCE",
            PayloadSource::ViewSource => "VIEW_SOURCE",
        }
    }
}

impl fmt::Display for PayloadSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Events published by stores to their listeners
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum StoreEvent {
    Change,
}

impl StoreEvent {
    pub fn as_str(&self) -> &'static str {
        match self {
            StoreEvent::Change => "CHANGE_EVENT",
        }
    }
}

impl fmt::Display for StoreEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
