//! Stamina Core - Flux-style state layer for the Stamina site
//!
//! Data flows one way:
//! - [`Actions`] turn an intent into an [`Action`]
//! - the [`Dispatcher`] wraps it in a source-tagged [`Payload`] and hands it
//!   to every registered store, in registration order
//! - stores ([`DictionaryStore`], [`RouteStore`]) update their state and
//!   notify their own listeners
//! - mounted [`View`]s re-render from the stores
//!
//! Nothing is global: an [`AppContext`] owns one dispatcher and its stores,
//! and everything else receives handles to them. The core is
//! single-threaded; every call runs to completion before returning.

mod action;
mod actions;
pub mod config;
mod constants;
mod context;
mod dictionary;
mod dispatcher;
mod emitter;
mod error;
mod logger;
mod route;
mod store;
pub mod view;

pub use action::{Action, Payload};
pub use actions::{detect_language, Actions};
pub use config::{LogConfig, LogSettings};
pub use constants::{ActionType, PayloadSource, StoreEvent};
pub use context::AppContext;
pub use dictionary::{Dictionary, Language, LocaleSnapshot};
pub use dispatcher::{DispatchReport, Dispatcher, SubscriptionId};
pub use emitter::{ChangeEmitter, ListenerId};
pub use error::{Error, Result};
pub use logger::{install_console, LogLevel, Logger};
pub use route::{Route, RouteStore};
pub use store::DictionaryStore;
pub use view::{Mounted, View};
