//! Notification bus.
//!
//! Listeners subscribe to an [`EventKind`] and receive every
//! [`Notification`] of that kind, synchronously and in subscription order.
//! The bus never owns its listeners: it stores their ids and asks the
//! dispatcher whether they are still alive. Dead ids are skipped on
//! delivery and evicted by [`EventBus::compact`].

use std::collections::HashMap;

use crate::events::{EventKind, GameEvent};

/// A published event together with the id of whoever published it.
#[derive(Debug, Clone, PartialEq)]
pub struct Notification<L> {
    pub sender: L,
    pub event: GameEvent,
}

/// Listener registry keyed by event kind.
#[derive(Debug, Clone)]
pub struct EventBus<L> {
    listeners: HashMap<EventKind, Vec<L>>,
}

impl<L> Default for EventBus<L> {
    fn default() -> Self {
        Self {
            listeners: HashMap::new(),
        }
    }
}

impl<L: Copy + Eq> EventBus<L> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append `listener` to the list for `kind`. Subscribing twice means
    /// two deliveries per publish.
    pub fn subscribe(&mut self, listener: L, kind: EventKind) {
        self.listeners.entry(kind).or_default().push(listener);
    }

    /// Remove every occurrence of `listener` under `kind`.
    pub fn unsubscribe(&mut self, listener: L, kind: EventKind) {
        if let Some(list) = self.listeners.get_mut(&kind) {
            list.retain(|l| *l != listener);
        }
    }

    /// Current listeners for `kind`, in delivery order.
    pub fn listeners(&self, kind: EventKind) -> &[L] {
        self.listeners.get(&kind).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn is_subscribed(&self, listener: L, kind: EventKind) -> bool {
        self.listeners(kind).contains(&listener)
    }

    /// Number of event kinds with a registry entry.
    pub fn kind_count(&self) -> usize {
        self.listeners.len()
    }

    /// Total registrations across all kinds (duplicates counted).
    pub fn len(&self) -> usize {
        self.listeners.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Drop listeners for which `is_alive` returns false, preserving the
    /// order of the survivors, and drop kinds left with no listeners.
    /// Returns how many registrations were removed.
    pub fn compact(&mut self, is_alive: impl Fn(L) -> bool) -> usize {
        let before = self.len();
        for list in self.listeners.values_mut() {
            list.retain(|l| is_alive(*l));
        }
        self.listeners.retain(|_, list| !list.is_empty());
        before - self.len()
    }

    pub fn clear(&mut self) {
        self.listeners.clear();
    }
}

/// Something that owns an [`EventBus`] and knows how to hand a
/// notification to one of its listeners.
pub trait Dispatch<L> {
    fn bus(&self) -> &EventBus<L>;

    /// Whether `listener` still refers to a live object.
    fn is_alive(&self, listener: L) -> bool;

    /// Handle `note` on behalf of `listener`. May publish, subscribe or
    /// unsubscribe.
    fn deliver(&mut self, listener: L, note: &Notification<L>);

    /// Hook called once per publish, before delivery. Default does nothing.
    fn on_publish(&mut self, _note: &Notification<L>) {}
}

/// Publish `event` from `sender` to every listener subscribed to its kind.
///
/// The listener list is copied before the first delivery, so handlers may
/// freely mutate the bus: listeners added during dispatch wait for the next
/// publish, and nothing is skipped or delivered twice. Dead listeners are
/// skipped silently. Returns the number of deliveries made.
pub fn publish<L, D>(target: &mut D, sender: L, event: GameEvent) -> usize
where
    L: Copy + Eq + std::fmt::Debug,
    D: Dispatch<L> + ?Sized,
{
    let kind = event.kind();
    let note = Notification { sender, event };
    target.on_publish(&note);

    let snapshot: Vec<L> = target.bus().listeners(kind).to_vec();
    if snapshot.is_empty() {
        return 0;
    }

    let mut delivered = 0;
    for listener in snapshot {
        if !target.is_alive(listener) {
            log::trace!("skipping stale {kind:?} listener {listener:?}");
            continue;
        }
        target.deliver(listener, &note);
        delivered += 1;
    }
    delivered
}
