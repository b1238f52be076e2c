//! Views: render the current locale and re-render on store changes

use crate::emitter::ListenerId;
use crate::{AppContext, DictionaryStore, LogSettings, Logger, Route, RouteStore};
use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::{Rc, Weak};

/// A component that renders an HTML fragment from store state
pub trait View {
    fn name(&self) -> &'static str;

    fn render(&self, dictionary: &DictionaryStore, routes: &RouteStore) -> String;
}

/// Escape text for inclusion in HTML
pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

fn text(dictionary: &DictionaryStore, key: &str) -> String {
    escape(&dictionary.entry_or_blank(key))
}

/// Site title and top-level sections
pub struct GlobalMenu;

impl View for GlobalMenu {
    fn name(&self) -> &'static str {
        "GlobalMenu"
    }

    fn render(&self, dictionary: &DictionaryStore, _routes: &RouteStore) -> String {
        let items: String = ["models", "services", "classifications", "glossaries"]
            .iter()
            .map(|key| format!("<li>{}</li>", text(dictionary, key)))
            .collect();
        format!("<div><p>Stamina</p><ul>{}</ul></div>", items)
    }
}

pub struct GsbpmView;

impl View for GsbpmView {
    fn name(&self) -> &'static str {
        "GSBPMView"
    }

    fn render(&self, dictionary: &DictionaryStore, _routes: &RouteStore) -> String {
        format!("<div><h1>{}</h1></div>", text(dictionary, "welcome_gsbpm"))
    }
}

pub struct GsimView;

impl View for GsimView {
    fn name(&self) -> &'static str {
        "GSIMView"
    }

    fn render(&self, dictionary: &DictionaryStore, _routes: &RouteStore) -> String {
        format!("<div><h1>{}</h1></div>", text(dictionary, "welcome_gsim"))
    }
}

/// Welcome line and links to the model pages
pub struct HomeView;

impl View for HomeView {
    fn name(&self) -> &'static str {
        "HomeView"
    }

    fn render(&self, dictionary: &DictionaryStore, _routes: &RouteStore) -> String {
        format!(
            "<h2>{}</h2><ul>\
             <li><a href=\"#{}\">GSBPM</a></li>\
             <li><a href=\"#{}\">GSIM</a></li>\
             </ul>",
            text(dictionary, "welcome"),
            Route::Gsbpm.path(),
            Route::Gsim.path(),
        )
    }
}

/// Root page: menu, home section and the active child page
pub struct StaminaApp;

impl View for StaminaApp {
    fn name(&self) -> &'static str {
        "StaminaApp"
    }

    fn render(&self, dictionary: &DictionaryStore, routes: &RouteStore) -> String {
        let child = match routes.route() {
            Route::Home => String::new(),
            Route::Gsbpm => GsbpmView.render(dictionary, routes),
            Route::Gsim => GsimView.render(dictionary, routes),
        };
        format!(
            "<div>{}{}{}</div>",
            GlobalMenu.render(dictionary, routes),
            HomeView.render(dictionary, routes),
            child
        )
    }
}

struct MountedInner {
    view: Box<dyn View>,
    dictionary: Rc<DictionaryStore>,
    routes: Rc<RouteStore>,
    html: RefCell<String>,
    renders: Cell<usize>,
    logger: Logger,
}

impl MountedInner {
    fn rerender(&self) {
        self.logger
            .debug(format_args!("Rendering {}", self.view.name()));
        let html = self.view.render(&self.dictionary, &self.routes);
        *self.html.borrow_mut() = html;
        self.renders.set(self.renders.get() + 1);
    }
}

/// A view subscribed to both stores
///
/// Renders once when mounted and again on every change event.
/// Dropping it removes the subscriptions.
pub struct Mounted {
    inner: Rc<MountedInner>,
    dictionary_listener: ListenerId,
    route_listener: ListenerId,
}

impl Mounted {
    pub fn new(
        view: impl View + 'static,
        dictionary: Rc<DictionaryStore>,
        routes: Rc<RouteStore>,
        settings: LogSettings,
    ) -> Self {
        let inner = Rc::new(MountedInner {
            view: Box::new(view),
            dictionary: Rc::clone(&dictionary),
            routes: Rc::clone(&routes),
            html: RefCell::new(String::new()),
            renders: Cell::new(0),
            logger: Logger::new(settings, "ViewHost", "Components"),
        });
        inner.rerender();

        let weak: Weak<MountedInner> = Rc::downgrade(&inner);
        let dictionary_listener = dictionary.subscribe(move |_| {
            if let Some(inner) = weak.upgrade() {
                inner.rerender();
            }
        });
        let weak: Weak<MountedInner> = Rc::downgrade(&inner);
        let route_listener = routes.subscribe(move |_| {
            if let Some(inner) = weak.upgrade() {
                inner.rerender();
            }
        });

        Self {
            inner,
            dictionary_listener,
            route_listener,
        }
    }

    /// Mount a view on the stores of `ctx`
    pub fn mount(ctx: &AppContext, view: impl View + 'static) -> Self {
        Self::new(
            view,
            Rc::clone(ctx.dictionary()),
            Rc::clone(ctx.routes()),
            ctx.settings().clone(),
        )
    }

    /// Latest rendered HTML
    pub fn html(&self) -> String {
        self.inner.html.borrow().clone()
    }

    /// Number of renders so far, including the initial one
    pub fn render_count(&self) -> usize {
        self.inner.renders.get()
    }

    pub fn name(&self) -> &'static str {
        self.inner.view.name()
    }
}

impl Drop for Mounted {
    fn drop(&mut self) {
        self.inner.dictionary.unsubscribe(self.dictionary_listener);
        self.inner.routes.unsubscribe(self.route_listener);
    }
}

impl fmt::Debug for Mounted {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Mounted")
            .field("view", &self.name())
            .field("renders", &self.render_count())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn context() -> AppContext {
        AppContext::new(LogSettings::default()).unwrap()
    }

    #[test]
    fn test_escape() {
        assert_eq!(escape("a < b & \"c\""), "a &lt; b &amp; &quot;c&quot;");
        assert_eq!(escape("Modèles"), "Modèles");
    }

    #[test]
    fn test_global_menu_follows_language() {
        let ctx = context();
        let menu = Mounted::mount(&ctx, GlobalMenu);
        assert!(menu.html().contains("<li>Classifications</li>"));

        ctx.actions().set_language("fr").unwrap();
        assert!(menu.html().contains("<li>Nomenclatures</li>"));
        assert!(menu.html().contains("<li>Modèles</li>"));
        assert_eq!(menu.render_count(), 2);
    }

    #[test]
    fn test_app_renders_active_route() {
        let ctx = context();
        let app = Mounted::mount(&ctx, StaminaApp);
        assert!(app.html().contains("<h2>Welcome to Stamina</h2>"));
        assert!(!app.html().contains("<h1>"));

        ctx.actions().navigate("/gsbpm").unwrap();
        assert!(app.html().contains("<h1>Welcome to the GSBPM</h1>"));

        ctx.actions().set_language("fr").unwrap();
        assert!(app.html().contains("<h1>Bienvenue dans le GSBPM</h1>"));
        assert!(app.html().contains("<h2>Bienvenue dans Stamina</h2>"));
        assert_eq!(app.render_count(), 3);
    }

    #[test]
    fn test_home_view_links_model_pages() {
        let ctx = context();
        let home = Mounted::mount(&ctx, HomeView);
        assert_eq!(
            home.html(),
            "<h2>Welcome to Stamina</h2><ul>\
             <li><a href=\"#/gsbpm\">GSBPM</a></li>\
             <li><a href=\"#/gsim\">GSIM</a></li></ul>"
        );

        ctx.actions().set_language("fr").unwrap();
        assert!(home.html().starts_with("<h2>Bienvenue dans Stamina</h2>"));
    }

    #[test]
    fn test_drop_unsubscribes() {
        let ctx = context();
        let view = Mounted::mount(&ctx, GsimView);
        assert_eq!(ctx.dictionary().listener_count(), 1);

        drop(view);
        assert_eq!(ctx.dictionary().listener_count(), 0);
        ctx.actions().set_language("fr").unwrap();
    }
}
