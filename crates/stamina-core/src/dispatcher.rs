//! Synchronous broadcast hub between actions and stores
//!
//! Every registered callback receives every payload, in registration order,
//! each one running to completion before the next starts. Dispatching from
//! inside a callback is rejected with [`Error::DispatchInProgress`]; so is
//! changing the registry while a dispatch is running.
//!
//! A callback that returns an error is logged and counted in the
//! [`DispatchReport`]; the remaining callbacks still run.

use crate::{Action, Error, LogSettings, Logger, Payload, Result};
use std::cell::{Cell, RefCell};
use std::fmt;

/// Handle returned by [`Dispatcher::register`]: the callback's slot index
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SubscriptionId(usize);

impl SubscriptionId {
    pub fn index(&self) -> usize {
        self.0
    }
}

type Callback = Box<dyn Fn(&Payload) -> Result<()>>;

/// Outcome of a single dispatch
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DispatchReport {
    /// Callbacks invoked
    pub delivered: usize,
    /// Invoked callbacks that returned an error
    pub failed: usize,
}

impl DispatchReport {
    pub fn is_clean(&self) -> bool {
        self.failed == 0
    }
}

/// Clears the in-flight flag even if a callback panics
struct InFlight<'a>(&'a Cell<bool>);

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        self.0.set(false);
    }
}

pub struct Dispatcher {
    /// Slots keep their index after unregistration
    callbacks: RefCell<Vec<Option<Callback>>>,
    dispatching: Cell<bool>,
    logger: Logger,
}

impl Dispatcher {
    pub fn new(settings: LogSettings) -> Self {
        Self {
            callbacks: RefCell::new(Vec::new()),
            dispatching: Cell::new(false),
            logger: Logger::new(settings, "StaminaDispatcher", "Dispatchers"),
        }
    }

    /// Append a callback to the registry
    pub fn register<F>(&self, callback: F) -> Result<SubscriptionId>
    where
        F: Fn(&Payload) -> Result<()> + 'static,
    {
        if self.dispatching.get() {
            self.logger
                .error("Cannot register a callback in the middle of a dispatch");
            return Err(Error::DispatchInProgress);
        }
        let mut callbacks = self.callbacks.borrow_mut();
        let id = SubscriptionId(callbacks.len());
        callbacks.push(Some(Box::new(callback)));
        self.logger
            .debug(format_args!("Registered callback #{}", id.index()));
        Ok(id)
    }

    /// Remove a callback; returns `false` if the slot was already empty
    pub fn unregister(&self, id: SubscriptionId) -> Result<bool> {
        if self.dispatching.get() {
            self.logger
                .error("Cannot unregister a callback in the middle of a dispatch");
            return Err(Error::DispatchInProgress);
        }
        let removed = self
            .callbacks
            .borrow_mut()
            .get_mut(id.index())
            .and_then(Option::take)
            .is_some();
        if removed {
            self.logger
                .debug(format_args!("Unregistered callback #{}", id.index()));
        }
        Ok(removed)
    }

    /// Broadcast an action tagged as coming from the server
    pub fn dispatch_from_server(&self, action: Action) -> Result<DispatchReport> {
        self.dispatch(Payload::from_server(action))
    }

    /// Broadcast an action tagged as coming from a view
    pub fn dispatch_from_view(&self, action: Action) -> Result<DispatchReport> {
        self.dispatch(Payload::from_view(action))
    }

    /// Broadcast a payload to every registered callback
    pub fn dispatch(&self, payload: Payload) -> Result<DispatchReport> {
        if self.dispatching.replace(true) {
            self.logger.error(format_args!(
                "Rejected {} dispatch of {}: a dispatch is already in progress",
                payload.source,
                payload.action.action_type()
            ));
            return Err(Error::DispatchInProgress);
        }
        let _in_flight = InFlight(&self.dispatching);

        self.logger.info(format_args!(
            "StaminaDispatcher dispatching {} payload {:?}",
            payload.source, payload.action
        ));

        let mut report = DispatchReport::default();
        let callbacks = self.callbacks.borrow();
        for (index, callback) in callbacks.iter().enumerate() {
            let Some(callback) = callback else {
                continue;
            };
            report.delivered += 1;
            if let Err(e) = callback(&payload) {
                report.failed += 1;
                self.logger
                    .error(format_args!("Callback #{} failed: {}", index, e));
            }
        }
        Ok(report)
    }

    pub fn is_dispatching(&self) -> bool {
        self.dispatching.get()
    }

    /// Number of live callbacks
    pub fn subscriber_count(&self) -> usize {
        self.callbacks.borrow().iter().filter(|c| c.is_some()).count()
    }
}

impl fmt::Debug for Dispatcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Dispatcher")
            .field("subscribers", &self.subscriber_count())
            .field("dispatching", &self.dispatching.get())
            .finish()
    }
}
