//! Readiness gate.
//!
//! Mirrors whether the engine's style document is loaded. Readiness drops
//! the instant a style (re)load starts and comes back when it completes.
//! Observers subscribe to transitions; nothing is queued while not ready.

use mapsync_engine::StyleEngine;
use tracing::info;

/// Handle returned by [`ReadinessGate::on_ready_change`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Subscription(u64);

type Listener = Box<dyn FnMut(bool)>;

/// Tracks the engine's style readiness.
pub struct ReadinessGate {
    ready: bool,
    /// Number of not-ready to ready transitions observed.
    generation: u64,
    next_subscription: u64,
    listeners: Vec<(Subscription, Listener)>,
}

impl std::fmt::Debug for ReadinessGate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ReadinessGate")
            .field("ready", &self.ready)
            .field("generation", &self.generation)
            .field("listeners", &self.listeners.len())
            .finish()
    }
}

impl ReadinessGate {
    pub fn new(ready: bool) -> Self {
        Self {
            ready,
            generation: 0,
            next_subscription: 0,
            listeners: Vec::new(),
        }
    }

    pub fn is_ready(&self) -> bool {
        self.ready
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Registers `callback`, invoked with the new state on every transition.
    pub fn on_ready_change(&mut self, callback: impl FnMut(bool) + 'static) -> Subscription {
        let subscription = Subscription(self.next_subscription);
        self.next_subscription += 1;
        self.listeners.push((subscription, Box::new(callback)));
        subscription
    }

    /// Removes a listener. Returns false if it was already gone.
    pub fn unsubscribe(&mut self, subscription: Subscription) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(s, _)| *s != subscription);
        self.listeners.len() != before
    }

    /// Sets readiness. Returns true, after notifying listeners, if the state
    /// changed.
    pub fn set_ready(&mut self, ready: bool) -> bool {
        if self.ready == ready {
            return false;
        }
        self.ready = ready;
        if ready {
            self.generation += 1;
        }
        info!(ready, generation = self.generation, "style readiness changed");
        for (_, listener) in &mut self.listeners {
            listener(ready);
        }
        true
    }

    /// Reads readiness from the engine. Returns true if it changed.
    pub fn sync_with<E: StyleEngine + ?Sized>(&mut self, engine: &E) -> bool {
        self.set_ready(engine.is_style_loaded())
    }
}
