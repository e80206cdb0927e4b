use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use dashmap::DashMap;

use rollcall_core::event::{ConnectionEvent, EventKind};
use rollcall_core::host::{ConnectionHandler, EventSource, SubscriptionId};

struct Subscriber {
    kind: EventKind,
    handler: Arc<dyn ConnectionHandler>,
}

/// In-process connection hook table.
///
/// Hosts that embed the exporter call [`EventHub::emit`] from their dispatch
/// thread; collectors register through the [`EventSource`] impl.
pub struct EventHub {
    subscribers: DashMap<SubscriptionId, Subscriber>,
    seq: AtomicU64,
}

impl EventHub {
    pub fn new() -> Self {
        Self {
            subscribers: DashMap::new(),
            seq: AtomicU64::new(1),
        }
    }

    /// Deliver one event to every handler subscribed to its kind, in
    /// subscription order.
    pub fn emit(&self, event: ConnectionEvent) {
        // Snapshot first so handlers may (un)subscribe without deadlocking the map.
        let mut targets: Vec<(SubscriptionId, Arc<dyn ConnectionHandler>)> = self
            .subscribers
            .iter()
            .filter(|e| e.value().kind == event.kind)
            .map(|e| (*e.key(), Arc::clone(&e.value().handler)))
            .collect();
        targets.sort_by_key(|(id, _)| *id);

        for (_, handler) in targets {
            handler.handle(event);
        }
    }

    pub fn join(&self, slot: impl Into<rollcall_core::SlotIndex>) {
        self.emit(ConnectionEvent::join(slot));
    }

    pub fn leave(&self, slot: impl Into<rollcall_core::SlotIndex>) {
        self.emit(ConnectionEvent::leave(slot));
    }

    pub fn subscriber_count(&self, kind: EventKind) -> usize {
        self.subscribers.iter().filter(|e| e.value().kind == kind).count()
    }
}

impl Default for EventHub {
    fn default() -> Self {
        Self::new()
    }
}

impl EventSource for EventHub {
    fn subscribe(&self, kind: EventKind, handler: Arc<dyn ConnectionHandler>) -> SubscriptionId {
        let id = SubscriptionId(self.seq.fetch_add(1, Ordering::Relaxed));
        self.subscribers.insert(id, Subscriber { kind, handler });
        id
    }

    fn unsubscribe(&self, id: SubscriptionId) -> bool {
        self.subscribers.remove(&id).is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    #[test]
    fn delivers_by_kind_in_order() {
        let hub = EventHub::new();
        let seen = Arc::new(Mutex::new(Vec::new()));

        let s1 = Arc::clone(&seen);
        hub.subscribe(EventKind::Join, Arc::new(move |ev: ConnectionEvent| {
            s1.lock().unwrap().push(("first", ev));
        }));
        let s2 = Arc::clone(&seen);
        hub.subscribe(EventKind::Join, Arc::new(move |ev: ConnectionEvent| {
            s2.lock().unwrap().push(("second", ev));
        }));
        let s3 = Arc::clone(&seen);
        hub.subscribe(EventKind::Leave, Arc::new(move |ev: ConnectionEvent| {
            s3.lock().unwrap().push(("leave", ev));
        }));

        hub.join(4u32);
        let got = seen.lock().unwrap().clone();
        assert_eq!(
            got,
            vec![("first", ConnectionEvent::join(4u32)), ("second", ConnectionEvent::join(4u32))]
        );
    }

    #[test]
    fn ids_start_at_one_either_way() {
        let noop = |_ev: ConnectionEvent| {};
        let a = EventHub::new().subscribe(EventKind::Join, Arc::new(noop));
        let b = EventHub::default().subscribe(EventKind::Join, Arc::new(noop));
        assert_eq!(a, SubscriptionId(1));
        assert_eq!(b, SubscriptionId(1));
    }

    #[test]
    fn unsubscribe_stops_delivery() {
        let hub = EventHub::new();
        let hits = Arc::new(AtomicU64::new(0));
        let h = Arc::clone(&hits);
        let id = hub.subscribe(EventKind::Leave, Arc::new(move |_ev: ConnectionEvent| {
            h.fetch_add(1, Ordering::Relaxed);
        }));

        hub.leave(1u32);
        assert!(hub.unsubscribe(id));
        assert!(!hub.unsubscribe(id));
        hub.leave(1u32);

        assert_eq!(hits.load(Ordering::Relaxed), 1);
        assert_eq!(hub.subscriber_count(EventKind::Leave), 0);
    }
}
