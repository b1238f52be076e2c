//! Action creators: the only way views ask for a state change

use crate::{Action, DispatchReport, Dispatcher, Language, LogSettings, Logger, Result};
use std::rc::Rc;

/// Packages intents and hands them to the dispatcher as view actions
#[derive(Debug, Clone)]
pub struct Actions {
    dispatcher: Rc<Dispatcher>,
    logger: Logger,
}

impl Actions {
    pub fn new(dispatcher: Rc<Dispatcher>, settings: LogSettings) -> Self {
        Self {
            dispatcher,
            logger: Logger::new(settings, "StaminaActions", "Actions"),
        }
    }

    /// Request a language. The code is passed through unchecked.
    pub fn set_language(&self, language: impl Into<String>) -> Result<DispatchReport> {
        let language = language.into();
        self.logger
            .info(format_args!("Set language to: {}", language));
        self.dispatcher
            .dispatch_from_view(Action::language_changed(language))
    }

    /// Request a page
    pub fn navigate(&self, path: impl Into<String>) -> Result<DispatchReport> {
        let path = path.into();
        self.logger.info(format_args!("Navigate to: {}", path));
        self.dispatcher.dispatch_from_view(Action::route_changed(path))
    }
}

/// Pick the site language from a browser language tag (`fr-FR`, `en_US`)
///
/// Only the primary subtag counts; anything other than French is English.
pub fn detect_language(tag: &str) -> Language {
    let primary = tag
        .split(['-', '_'])
        .next()
        .unwrap_or_default()
        .trim()
        .to_ascii_lowercase();
    Language::resolve(Some(&primary))
}
