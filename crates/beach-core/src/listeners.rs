//! Listener Registry
//!
//! Observers attached to specific octopuses. A listener is fired when one of
//! its octopuses falls asleep from tiredness and reset once per night.

use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::Rc;

use tracing::trace;

use crate::components::Octopus;

/// Observer of octopus state transitions
pub trait Listener {
    /// Called once per falling transition of an attached octopus.
    fn fire(&mut self, octopus: &Octopus);

    /// Clears internal state at the start of a night.
    fn reset(&mut self);
}

/// Handle to a listener registered on a beach
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(usize);

impl ListenerId {
    pub(crate) fn new(index: usize) -> Self {
        Self(index)
    }

    pub fn index(&self) -> usize {
        self.0
    }
}

/// Owns every listener attached to a beach
#[derive(Default)]
pub struct ListenerRegistry {
    listeners: Vec<Box<dyn Listener>>,
}

impl ListenerRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, listener: Box<dyn Listener>) -> ListenerId {
        self.listeners.push(listener);
        ListenerId::new(self.listeners.len() - 1)
    }

    pub fn contains(&self, id: ListenerId) -> bool {
        id.0 < self.listeners.len()
    }

    /// Fires each listed listener for `octopus`. Returns how many fired.
    pub fn fire(&mut self, ids: &[ListenerId], octopus: &Octopus) -> usize {
        let mut fired = 0;
        for id in ids {
            if let Some(listener) = self.listeners.get_mut(id.0) {
                trace!(listener = id.0, octopus = octopus.id(), "listener fired");
                listener.fire(octopus);
                fired += 1;
            }
        }
        fired
    }

    pub fn reset_all(&mut self) {
        for listener in &mut self.listeners {
            listener.reset();
        }
    }

    pub fn len(&self) -> usize {
        self.listeners.len()
    }

    pub fn is_empty(&self) -> bool {
        self.listeners.is_empty()
    }
}

impl fmt::Debug for ListenerRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ListenerRegistry")
            .field("listeners", &self.listeners.len())
            .finish()
    }
}

/// Listener that records which octopuses fell asleep since the last night.
///
/// Clones share the same log, so keep one clone to inspect after handing
/// the other to the beach.
#[derive(Debug, Clone, Default)]
pub struct FireLog {
    fired: Rc<RefCell<Vec<usize>>>,
    total: Rc<Cell<usize>>,
    resets: Rc<Cell<usize>>,
}

impl FireLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Octopus ids fired since the last reset, in firing order.
    pub fn fired(&self) -> Vec<usize> {
        self.fired.borrow().clone()
    }

    /// Fires since the last reset.
    pub fn count(&self) -> usize {
        self.fired.borrow().len()
    }

    /// Fires over the whole lifetime, resets included.
    pub fn total(&self) -> usize {
        self.total.get()
    }

    pub fn resets(&self) -> usize {
        self.resets.get()
    }
}

impl Listener for FireLog {
    fn fire(&mut self, octopus: &Octopus) {
        self.fired.borrow_mut().push(octopus.id());
        self.total.set(self.total.get() + 1);
    }

    fn reset(&mut self) {
        self.fired.borrow_mut().clear();
        self.resets.set(self.resets.get() + 1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::capabilities::Capabilities;

    #[test]
    fn test_register_and_fire() {
        let log = FireLog::new();
        let mut registry = ListenerRegistry::new();
        let id = registry.register(Box::new(log.clone()));

        assert!(registry.contains(id));
        assert!(!registry.contains(ListenerId::new(5)));

        let octopus = Octopus::new(4, Capabilities::default());
        assert_eq!(registry.fire(&[id], &octopus), 1);
        assert_eq!(registry.fire(&[id], &octopus), 1);

        assert_eq!(log.fired(), vec![4, 4]);
        assert_eq!(log.total(), 2);
    }

    #[test]
    fn test_reset_clears_log_but_keeps_total() {
        let log = FireLog::new();
        let mut registry = ListenerRegistry::new();
        let id = registry.register(Box::new(log.clone()));
        let octopus = Octopus::new(0, Capabilities::default());

        registry.fire(&[id], &octopus);
        registry.reset_all();

        assert_eq!(log.count(), 0);
        assert_eq!(log.total(), 1);
        assert_eq!(log.resets(), 1);
    }

    #[test]
    fn test_unknown_ids_are_skipped() {
        let mut registry = ListenerRegistry::new();
        let octopus = Octopus::new(0, Capabilities::default());
        assert_eq!(registry.fire(&[ListenerId::new(3)], &octopus), 0);
        assert!(registry.is_empty());
    }
}
