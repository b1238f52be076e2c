//! Application context wiring the dispatcher, stores and actions together

use crate::actions::detect_language;
use crate::{
    Actions, Dictionary, DictionaryStore, Dispatcher, Language, LogSettings, Logger, Result,
    RouteStore,
};
use std::rc::Rc;

/// Everything a view needs, constructed once and passed by handle
#[derive(Debug, Clone)]
pub struct AppContext {
    settings: LogSettings,
    dispatcher: Rc<Dispatcher>,
    dictionary: Rc<DictionaryStore>,
    routes: Rc<RouteStore>,
    actions: Actions,
}

impl AppContext {
    /// Build a context around the builtin dictionary
    pub fn new(settings: LogSettings) -> Result<Self> {
        Self::with_dictionary(Dictionary::builtin(), settings)
    }

    pub fn with_dictionary(dictionary: Dictionary, settings: LogSettings) -> Result<Self> {
        let dispatcher = Rc::new(Dispatcher::new(settings.clone()));

        let dictionary = Rc::new(DictionaryStore::new(dictionary, settings.clone()));
        dictionary.register(&dispatcher)?;

        let routes = Rc::new(RouteStore::new(settings.clone()));
        routes.register(&dispatcher)?;

        let actions = Actions::new(Rc::clone(&dispatcher), settings.clone());

        Ok(Self {
            settings,
            dispatcher,
            dictionary,
            routes,
            actions,
        })
    }

    /// Apply the start-up language from a browser-style tag
    ///
    /// Without a tag the default language is dispatched.
    pub fn start(&self, language_tag: Option<&str>) -> Result<Language> {
        let language = language_tag.map(detect_language).unwrap_or_default();
        Logger::new(self.settings.clone(), "StaminaApp", "Components").info(format_args!(
            "Starting with language {} (from {:?})",
            language, language_tag
        ));
        self.actions.set_language(language.code())?;
        Ok(self.dictionary.language())
    }

    pub fn settings(&self) -> &LogSettings {
        &self.settings
    }

    pub fn dispatcher(&self) -> &Rc<Dispatcher> {
        &self.dispatcher
    }

    pub fn dictionary(&self) -> &Rc<DictionaryStore> {
        &self.dictionary
    }

    pub fn routes(&self) -> &Rc<RouteStore> {
        &self.routes
    }

    pub fn actions(&self) -> &Actions {
        &self.actions
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Route;

    fn context() -> AppContext {
        AppContext::new(LogSettings::default()).unwrap()
    }

    #[test]
    fn test_initial_welcome() {
        let ctx = context();
        assert_eq!(
            ctx.dictionary().get_entry("welcome").unwrap(),
            "Welcome to Stamina"
        );
        assert_eq!(ctx.dispatcher().subscriber_count(), 2);
    }

    #[test]
    fn test_set_language_scenarios() {
        let ctx = context();

        ctx.actions().set_language("fr").unwrap();
        assert_eq!(
            ctx.dictionary().get_entry("welcome").unwrap(),
            "Bienvenue dans Stamina"
        );

        ctx.actions().set_language("de").unwrap();
        assert_eq!(
            ctx.dictionary().get_entry("welcome").unwrap(),
            "Welcome to Stamina"
        );
    }

    #[test]
    fn test_every_key_matches_language() {
        let ctx = context();
        for language in Language::ALL {
            ctx.actions().set_language(language.code()).unwrap();
            let snapshot = ctx.dictionary().get_dictionary();
            let source = ctx.dictionary().source();
            assert_eq!(snapshot.len(), source.len());
            for (key, value) in snapshot.iter() {
                assert_eq!(Some(value), source.translation(key, language));
            }
        }
    }

    #[test]
    fn test_contexts_are_isolated() {
        let first = context();
        let second = context();

        first.actions().set_language("fr").unwrap();
        first.actions().navigate("/gsim").unwrap();

        assert_eq!(second.dictionary().language(), Language::En);
        assert_eq!(second.routes().route(), Route::Home);
    }

    #[test]
    fn test_start() {
        let ctx = context();
        assert_eq!(ctx.start(Some("fr-FR")).unwrap(), Language::Fr);
        assert_eq!(ctx.start(Some("pt-BR")).unwrap(), Language::En);
        assert_eq!(ctx.start(None).unwrap(), Language::En);
    }
}
