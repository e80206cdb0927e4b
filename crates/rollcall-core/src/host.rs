//! Traits at the host boundary.
//!
//! A host implements [`EventSource`] for its connection hooks and [`Roster`]
//! for its player table. Collectors only ever see these traits.

use std::sync::Arc;

use crate::event::{ConnectionEvent, EventKind, PlayerIdentity, SlotIndex};

/// Handle returned by [`EventSource::subscribe`], kept for unsubscription.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SubscriptionId(pub u64);

/// Callback fired on the host's dispatch thread.
///
/// Implementations must return quickly and must not block or panic: a
/// failure here would abort dispatch for every other subscriber.
pub trait ConnectionHandler: Send + Sync {
    fn handle(&self, event: ConnectionEvent);
}

impl<F> ConnectionHandler for F
where
    F: Fn(ConnectionEvent) + Send + Sync,
{
    fn handle(&self, event: ConnectionEvent) {
        self(event)
    }
}

/// Host-side event hook registration.
pub trait EventSource: Send + Sync {
    fn subscribe(&self, kind: EventKind, handler: Arc<dyn ConnectionHandler>) -> SubscriptionId;

    /// Returns false when `id` was not subscribed.
    fn unsubscribe(&self, id: SubscriptionId) -> bool;
}

/// Host player table.
pub trait Roster: Send + Sync {
    /// `None` means the host has no record for the slot right now. During
    /// join and leave dispatch this is an expected race, not an error.
    fn lookup(&self, slot: SlotIndex) -> Option<PlayerIdentity>;
}
