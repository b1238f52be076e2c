//! Route store: which page of the site is displayed

use crate::emitter::{ChangeEmitter, ListenerId};
use crate::{Action, Dispatcher, LogSettings, Logger, Payload, Result, StoreEvent, SubscriptionId};
use serde::{Deserialize, Serialize};
use std::cell::Cell;
use std::fmt;
use std::rc::{Rc, Weak};

/// A page of the site
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Route {
    #[default]
    Home,
    Gsbpm,
    Gsim,
}

impl Route {
    pub const ALL: [Route; 3] = [Route::Home, Route::Gsbpm, Route::Gsim];

    pub fn path(&self) -> &'static str {
        match self {
            Route::Home => "/",
            Route::Gsbpm => "/gsbpm",
            Route::Gsim => "/gsim",
        }
    }

    /// Parse a path or hash fragment (`/gsim`, `#/gsim`, `gsim/`)
    pub fn from_path(path: &str) -> Option<Route> {
        let path = path.trim_start_matches('#').trim_matches('/');
        match path {
            "" => Some(Route::Home),
            "gsbpm" => Some(Route::Gsbpm),
            "gsim" => Some(Route::Gsim),
            _ => None,
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path())
    }
}

/// Holds the current [`Route`]; reacts to [`Action::RouteChanged`] only
#[derive(Debug)]
pub struct RouteStore {
    route: Cell<Route>,
    listeners: ChangeEmitter,
    dispatcher_index: Cell<Option<SubscriptionId>>,
    logger: Logger,
}

impl RouteStore {
    pub fn new(settings: LogSettings) -> Self {
        Self {
            route: Cell::new(Route::default()),
            listeners: ChangeEmitter::new(),
            dispatcher_index: Cell::new(None),
            logger: Logger::new(settings, "RouteStore", "Stores"),
        }
    }

    pub fn register(self: &Rc<Self>, dispatcher: &Dispatcher) -> Result<SubscriptionId> {
        let store: Weak<Self> = Rc::downgrade(self);
        let id = dispatcher.register(move |payload| match store.upgrade() {
            Some(store) => store.handle(payload),
            None => Ok(()),
        })?;
        self.dispatcher_index.set(Some(id));
        Ok(id)
    }

    pub fn dispatcher_index(&self) -> Option<SubscriptionId> {
        self.dispatcher_index.get()
    }

    fn handle(&self, payload: &Payload) -> Result<()> {
        let Action::RouteChanged { path } = &payload.action else {
            return Ok(());
        };
        let route = Route::from_path(path).unwrap_or_else(|| {
            self.logger.warn(format_args!(
                "Unknown route '{}', showing {}",
                path,
                Route::Home
            ));
            Route::Home
        });
        self.route.set(route);
        self.logger
            .debug(format_args!("Store will emit change, route is: {}", route));
        self.listeners.emit(StoreEvent::Change);
        Ok(())
    }

    pub fn route(&self) -> Route {
        self.route.get()
    }

    /// Change the route directly, without a change event
    pub fn set_route(&self, route: Route) {
        self.route.set(route);
    }

    pub fn subscribe(&self, listener: impl Fn(StoreEvent) + 'static) -> ListenerId {
        self.listeners.subscribe(listener)
    }

    pub fn unsubscribe(&self, id: ListenerId) -> bool {
        self.listeners.unsubscribe(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_path() {
        assert_eq!(Route::from_path("/"), Some(Route::Home));
        assert_eq!(Route::from_path(""), Some(Route::Home));
        assert_eq!(Route::from_path("#/gsbpm"), Some(Route::Gsbpm));
        assert_eq!(Route::from_path("/gsim/"), Some(Route::Gsim));
        assert_eq!(Route::from_path("/gamso"), None);
        for route in Route::ALL {
            assert_eq!(Route::from_path(route.path()), Some(route));
        }
    }

    #[test]
    fn test_route_changed() {
        let settings = LogSettings::default();
        let dispatcher = Dispatcher::new(settings.clone());
        let store = Rc::new(RouteStore::new(settings));
        store.register(&dispatcher).unwrap();

        let changes = Rc::new(Cell::new(0));
        let c = Rc::clone(&changes);
        store.subscribe(move |_| c.set(c.get() + 1));

        dispatcher
            .dispatch_from_view(Action::route_changed("/gsim"))
            .unwrap();
        assert_eq!(store.route(), Route::Gsim);

        dispatcher
            .dispatch_from_view(Action::route_changed("/unknown"))
            .unwrap();
        assert_eq!(store.route(), Route::Home);

        dispatcher
            .dispatch_from_view(Action::language_changed("fr"))
            .unwrap();
        assert_eq!(changes.get(), 2);
    }
}
