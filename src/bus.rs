//! Change notification.
//!
//! The [`NotificationBus`] keeps an ordered list of observers and hands each
//! of them the new state snapshot after every mutation. Observers run
//! synchronously on the caller's thread, in the order they subscribed.
//!
//! A failing observer never stops the others: returned errors and panics
//! are logged and counted in the [`NotifyReport`].

use std::panic::{catch_unwind, AssertUnwindSafe};

use crate::state::AppState;

/// Something that reacts to state changes.
pub trait Observer {
    /// Called with the new snapshot after each change.
    fn update(&self, state: &AppState) -> anyhow::Result<()>;
}

impl<F> Observer for F
where
    F: Fn(&AppState) -> anyhow::Result<()>,
{
    fn update(&self, state: &AppState) -> anyhow::Result<()> {
        self(state)
    }
}

/// Handle returned by [`NotificationBus::subscribe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

/// Outcome of one notification round.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NotifyReport {
    /// Observers that returned `Ok`.
    pub delivered: usize,
    /// Observers that returned an error or panicked.
    pub failed: usize,
}

/// Ordered observer list.
#[derive(Default)]
pub struct NotificationBus {
    observers: Vec<(SubscriptionId, Box<dyn Observer>)>,
    next_id: u64,
}

impl NotificationBus {
    /// Create an empty bus.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an observer at the end of the list.
    pub fn subscribe(&mut self, observer: impl Observer + 'static) -> SubscriptionId {
        let id = SubscriptionId(self.next_id);
        self.next_id += 1;
        self.observers.push((id, Box::new(observer)));
        tracing::debug!(subscription = id.0, "Observer subscribed");
        id
    }

    /// Remove an observer. Returns `false` if it was already gone.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.observers.len();
        self.observers.retain(|(sub, _)| *sub != id);
        let removed = self.observers.len() != before;
        if removed {
            tracing::debug!(subscription = id.0, "Observer unsubscribed");
        }
        removed
    }

    /// Hand `state` to every observer in registration order.
    pub fn notify(&self, state: &AppState) -> NotifyReport {
        let mut report = NotifyReport::default();

        for (id, observer) in &self.observers {
            match catch_unwind(AssertUnwindSafe(|| observer.update(state))) {
                Ok(Ok(())) => report.delivered += 1,
                Ok(Err(e)) => {
                    tracing::warn!(subscription = id.0, "Observer failed: {:#}", e);
                    report.failed += 1;
                }
                Err(_) => {
                    tracing::warn!(subscription = id.0, "Observer panicked");
                    report.failed += 1;
                }
            }
        }

        report
    }

    /// Number of registered observers.
    pub fn len(&self) -> usize {
        self.observers.len()
    }

    /// Whether no observers are registered.
    pub fn is_empty(&self) -> bool {
        self.observers.is_empty()
    }
}

impl std::fmt::Debug for NotificationBus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NotificationBus")
            .field("observers", &self.observers.len())
            .finish()
    }
}
