//! Dictionary store: the active language and its locale snapshot

use crate::emitter::{ChangeEmitter, ListenerId};
use crate::{
    Action, Dictionary, Dispatcher, Error, Language, LocaleSnapshot, LogSettings, Logger, Payload,
    Result, StoreEvent, SubscriptionId,
};
use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};

/// Single source of truth for the site language
///
/// Reacts to [`Action::LanguageChanged`] only: the requested code is
/// resolved (anything but `fr` becomes `en`), the locale is rebuilt and
/// swapped in whole, then one [`StoreEvent::Change`] goes out to listeners.
/// Other actions leave the store untouched and emit nothing.
#[derive(Debug)]
pub struct DictionaryStore {
    dictionary: Dictionary,
    locale: RefCell<LocaleSnapshot>,
    listeners: ChangeEmitter,
    dispatcher_index: Cell<Option<SubscriptionId>>,
    logger: Logger,
}

impl DictionaryStore {
    /// Create a store in the default language
    pub fn new(dictionary: Dictionary, settings: LogSettings) -> Self {
        let locale = dictionary.locale(Language::default());
        Self {
            dictionary,
            locale: RefCell::new(locale),
            listeners: ChangeEmitter::new(),
            dispatcher_index: Cell::new(None),
            logger: Logger::new(settings, "DictionaryStore", "Stores"),
        }
    }

    /// Subscribe this store to `dispatcher`
    ///
    /// The dispatcher only keeps a weak reference, so dropping the last
    /// handle to the store turns its callback into a no-op.
    pub fn register(self: &Rc<Self>, dispatcher: &Dispatcher) -> Result<SubscriptionId> {
        let store: Weak<Self> = Rc::downgrade(self);
        let id = dispatcher.register(move |payload| match store.upgrade() {
            Some(store) => store.handle(payload),
            None => Ok(()),
        })?;
        self.dispatcher_index.set(Some(id));
        Ok(id)
    }

    /// Slot held in the dispatcher, once registered
    pub fn dispatcher_index(&self) -> Option<SubscriptionId> {
        self.dispatcher_index.get()
    }

    fn handle(&self, payload: &Payload) -> Result<()> {
        self.logger
            .debug(format_args!("Received dispatched payload: {:?}", payload));
        match &payload.action {
            Action::LanguageChanged { language } => {
                let language = self.resolve(language.as_deref());
                self.switch_to(language);
            }
            Action::RouteChanged { .. } => return Ok(()),
        }
        self.logger.debug(format_args!(
            "Store will emit change, language is: {}",
            self.language()
        ));
        self.emit_change();
        Ok(())
    }

    fn resolve(&self, requested: Option<&str>) -> Language {
        match requested {
            Some(code) => Language::from_code(code).unwrap_or_else(|| {
                self.logger.warn(format_args!(
                    "Invalid language '{}', falling back to {}",
                    code,
                    Language::default()
                ));
                Language::default()
            }),
            None => {
                self.logger.debug(format_args!(
                    "No language requested, using {}",
                    Language::default()
                ));
                Language::default()
            }
        }
    }

    fn switch_to(&self, language: Language) {
        let locale = self.dictionary.locale(language);
        *self.locale.borrow_mut() = locale;
    }

    /// Change the language directly, without a change event
    ///
    /// Returns the language actually applied.
    pub fn set_language(&self, language: &str) -> Language {
        let language = self.resolve(Some(language));
        self.switch_to(language);
        language
    }

    pub fn language(&self) -> Language {
        self.locale.borrow().language()
    }

    /// Localized string for `key` in the current language
    pub fn get_entry(&self, key: &str) -> Result<String> {
        self.locale
            .borrow()
            .get(key)
            .map(str::to_string)
            .ok_or_else(|| Error::UnknownKey(key.to_string()))
    }

    /// Like [`get_entry`](Self::get_entry), but renders unknown keys as an empty string
    pub fn entry_or_blank(&self, key: &str) -> String {
        self.get_entry(key).unwrap_or_else(|e| {
            self.logger.warn(e);
            String::new()
        })
    }

    /// The full locale for the current language
    pub fn get_dictionary(&self) -> LocaleSnapshot {
        self.locale.borrow().clone()
    }

    /// The underlying bilingual table
    pub fn source(&self) -> &Dictionary {
        &self.dictionary
    }

    pub fn emit_change(&self) {
        self.logger.debug("Store emitting change event");
        self.listeners.emit(StoreEvent::Change);
    }

    pub fn subscribe(&self, listener: impl Fn(StoreEvent) + 'static) -> ListenerId {
        self.listeners.subscribe(listener)
    }

    pub fn unsubscribe(&self, id: ListenerId) -> bool {
        self.listeners.unsubscribe(id)
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.listener_count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn setup() -> (Rc<Dispatcher>, Rc<DictionaryStore>) {
        let settings = LogSettings::default();
        let dispatcher = Rc::new(Dispatcher::new(settings.clone()));
        let store = Rc::new(DictionaryStore::new(Dictionary::builtin(), settings));
        store.register(&dispatcher).unwrap();
        (dispatcher, store)
    }

    fn counter(store: &DictionaryStore) -> Rc<Cell<usize>> {
        let count = Rc::new(Cell::new(0));
        let c = Rc::clone(&count);
        store.subscribe(move |_| c.set(c.get() + 1));
        count
    }

    #[test]
    fn test_initial_state() {
        let (_, store) = setup();
        assert_eq!(store.language(), Language::En);
        assert_eq!(store.get_entry("welcome").unwrap(), "Welcome to Stamina");
        assert_eq!(store.dispatcher_index().map(|id| id.index()), Some(0));
    }

    #[test]
    fn test_language_changed_switches_locale() {
        let (dispatcher, store) = setup();
        let changes = counter(&store);

        dispatcher
            .dispatch_from_view(Action::language_changed("fr"))
            .unwrap();

        assert_eq!(store.language(), Language::Fr);
        assert_eq!(store.get_entry("welcome").unwrap(), "Bienvenue dans Stamina");
        assert_eq!(changes.get(), 1);
    }

    #[test]
    fn test_unsupported_or_missing_language_falls_back() {
        let (dispatcher, store) = setup();
        let english = store.source().locale(Language::En);

        dispatcher
            .dispatch_from_view(Action::language_changed("fr"))
            .unwrap();
        dispatcher
            .dispatch_from_view(Action::language_changed("de"))
            .unwrap();
        assert_eq!(store.get_dictionary(), english);

        dispatcher
            .dispatch_from_view(Action::language_changed("fr"))
            .unwrap();
        dispatcher
            .dispatch_from_server(Action::LanguageChanged { language: None })
            .unwrap();
        assert_eq!(store.get_dictionary(), english);
    }

    #[test]
    fn test_other_actions_are_ignored() {
        let (dispatcher, store) = setup();
        dispatcher
            .dispatch_from_view(Action::language_changed("fr"))
            .unwrap();
        let changes = counter(&store);
        let before = store.get_dictionary();

        let report = dispatcher
            .dispatch_from_view(Action::route_changed("/gsbpm"))
            .unwrap();

        assert!(report.is_clean());
        assert_eq!(store.get_dictionary(), before);
        assert_eq!(changes.get(), 0);
    }

    #[test]
    fn test_round_trip_restores_english_snapshot() {
        let (dispatcher, store) = setup();
        let original = store.get_dictionary();

        dispatcher
            .dispatch_from_view(Action::language_changed("fr"))
            .unwrap();
        assert_ne!(store.get_dictionary(), original);
        dispatcher
            .dispatch_from_view(Action::language_changed("en"))
            .unwrap();

        assert_eq!(store.get_dictionary(), original);
    }

    #[test]
    fn test_each_listener_notified_once() {
        let (dispatcher, store) = setup();
        let first = counter(&store);
        let second = counter(&store);

        dispatcher
            .dispatch_from_view(Action::language_changed("fr"))
            .unwrap();

        assert_eq!(first.get(), 1);
        assert_eq!(second.get(), 1);
    }

    #[test]
    fn test_same_language_still_emits() {
        let (dispatcher, store) = setup();
        let changes = counter(&store);

        dispatcher
            .dispatch_from_view(Action::language_changed("en"))
            .unwrap();

        assert_eq!(changes.get(), 1);
    }

    #[test]
    fn test_unknown_key() {
        let (_, store) = setup();
        assert_eq!(
            store.get_entry("nope"),
            Err(Error::UnknownKey("nope".to_string()))
        );
        assert_eq!(store.entry_or_blank("nope"), "");
        assert_eq!(store.entry_or_blank("models"), "Models");
    }

    #[test]
    fn test_direct_set_language_does_not_emit() {
        let (_, store) = setup();
        let changes = counter(&store);

        assert_eq!(store.set_language("fr"), Language::Fr);
        assert_eq!(store.get_entry("models").unwrap(), "Modèles");
        assert_eq!(store.set_language("es"), Language::En);
        assert_eq!(changes.get(), 0);

        store.emit_change();
        assert_eq!(changes.get(), 1);
    }

    #[test]
    fn test_listener_reads_new_state() {
        let (dispatcher, store) = setup();
        let seen = Rc::new(RefCell::new(None));

        let s = Rc::clone(&seen);
        let weak = Rc::downgrade(&store);
        store.subscribe(move |_| {
            if let Some(store) = weak.upgrade() {
                *s.borrow_mut() = store.get_entry("glossaries").ok();
            }
        });

        dispatcher
            .dispatch_from_view(Action::language_changed("fr"))
            .unwrap();

        assert_eq!(seen.borrow().as_deref(), Some("Glossaires"));
    }

    #[test]
    fn test_unsubscribe_stops_notifications() {
        let (dispatcher, store) = setup();
        let count = Rc::new(Cell::new(0));
        let c = Rc::clone(&count);
        let id = store.subscribe(move |_| c.set(c.get() + 1));

        assert!(store.unsubscribe(id));
        dispatcher
            .dispatch_from_view(Action::language_changed("fr"))
            .unwrap();

        assert_eq!(count.get(), 0);
        assert_eq!(store.listener_count(), 0);
    }

    #[test]
    fn test_dropped_store_is_skipped() {
        let (dispatcher, store) = setup();
        drop(store);

        let report = dispatcher
            .dispatch_from_view(Action::language_changed("fr"))
            .unwrap();
        assert_eq!(report, crate::DispatchReport { delivered: 1, failed: 0 });
    }
}
