//! Action and payload types flowing through the dispatcher

use crate::{ActionType, PayloadSource};
use serde::{Deserialize, Serialize};

/// An intent to change application state
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Action {
    /// Request a language; validation is left to the dictionary store
    LanguageChanged { language: Option<String> },
    /// Request a page by its path
    RouteChanged { path: String },
}

impl Action {
    /// Create a language change action
    pub fn language_changed(language: impl Into<String>) -> Self {
        Action::LanguageChanged {
            language: Some(language.into()),
        }
    }

    /// Create a route change action
    pub fn route_changed(path: impl Into<String>) -> Self {
        Action::RouteChanged { path: path.into() }
    }

    /// The type tag of this action
    pub fn action_type(&self) -> ActionType {
        match self {
            Action::LanguageChanged { .. } => ActionType::LanguageChanged,
            Action::RouteChanged { .. } => ActionType::RouteChanged,
        }
    }
}

/// An action wrapped with its provenance
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Payload {
    pub source: PayloadSource,
    pub action: Action,
}

impl Payload {
    pub fn new(source: PayloadSource, action: Action) -> Self {
        Self { source, action }
    }

    pub fn from_server(action: Action) -> Self {
        Self::new(PayloadSource::ServerSource, action)
    }

    pub fn from_view(action: Action) -> Self {
        Self::new(PayloadSource::ViewSource, action)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_action_type() {
        assert_eq!(
            Action::language_changed("fr").action_type(),
            ActionType::LanguageChanged
        );
        assert_eq!(
            Action::route_changed("/gsim").action_type(),
            ActionType::RouteChanged
        );
    }

    #[test]
    fn test_payload_source() {
        let payload = Payload::from_view(Action::language_changed("en"));
        assert_eq!(payload.source, PayloadSource::ViewSource);
        assert_eq!(
            payload.action,
            Action::LanguageChanged {
                language: Some("en".to_string())
            }
        );

        let payload = Payload::from_server(Action::route_changed("/"));
        assert_eq!(payload.source, PayloadSource::ServerSource);
    }
}
