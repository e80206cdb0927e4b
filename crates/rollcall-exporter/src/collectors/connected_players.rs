//! Connected-player presence.
//!
//! Two families, both registered once per process:
//! - `<prefix>connected_player_count`: players currently connected.
//! - `<prefix>connected_player{name}`: 1 while the named player is connected,
//!   0 after they leave. The label is the sanitized display name.
//!
//! Both join and leave resolve the player through the roster at the moment
//! the event is handled. A miss drops the event entirely, including the
//! aggregate update, so a join that missed followed by a leave that resolved
//! drives the count below zero. The guard is kept the same on both sides.

use std::sync::{Arc, Mutex, PoisonError};

use prometheus::core::Collector as _;
use prometheus::{IntGauge, IntGaugeVec};

use rollcall_core::error::Result;
use rollcall_core::event::{ConnectionEvent, EventKind, SlotIndex};
use rollcall_core::host::{EventSource, Roster, SubscriptionId};
use rollcall_core::label::Label;

use crate::obs::ExporterMetrics;

use super::Collector;

pub const COUNT_METRIC: &str = "connected_player_count";
pub const PLAYER_METRIC: &str = "connected_player";
pub const NAME_LABEL: &str = "name";

/// Aggregate counter plus the per-player family.
#[derive(Clone)]
pub struct PresenceMetrics {
    count: IntGauge,
    players: IntGaugeVec,
}

impl PresenceMetrics {
    /// Register both families under the exporter prefix.
    ///
    /// Fails with `DuplicateMetric` if called twice against the same registry.
    pub fn register(metrics: &ExporterMetrics) -> Result<Self> {
        let count = metrics.register_gauge(COUNT_METRIC, "connected players")?;
        let players = metrics.register_gauge_vec(PLAYER_METRIC, "connected player", &[NAME_LABEL])?;
        Ok(Self { count, players })
    }

    pub fn connected(&self) -> i64 {
        self.count.get()
    }

    /// Value of the series for an already sanitized label, `None` if it was never written.
    pub fn player(&self, label: &str) -> Option<i64> {
        self.players
            .collect()
            .iter()
            .flat_map(|mf| mf.get_metric())
            .find(|m| {
                m.get_label()
                    .iter()
                    .any(|l| l.get_name() == NAME_LABEL && l.get_value() == label)
            })
            .map(|m| m.get_gauge().get_value() as i64)
    }

    /// Number of distinct per-player series.
    pub fn player_series(&self) -> usize {
        self.players
            .collect()
            .iter()
            .map(|mf| mf.get_metric().len())
            .sum()
    }

    fn mark(&self, label: &Label, v: i64) {
        match self.players.get_metric_with_label_values(&[label.as_str()]) {
            Ok(g) => g.set(v),
            Err(e) => tracing::warn!(%label, error = %e, "player series unavailable"),
        }
    }
}

struct PresenceTracker {
    metrics: PresenceMetrics,
    roster: Arc<dyn Roster>,
}

impl PresenceTracker {
    fn resolve(&self, kind: EventKind, slot: SlotIndex) -> Option<Label> {
        match self.roster.lookup(slot) {
            Some(player) => Some(Label::from_raw(&player.name)),
            None => {
                tracing::debug!(%slot, kind = kind.as_str(), "no roster entry, event dropped");
                None
            }
        }
    }

    fn on_join(&self, event: ConnectionEvent) {
        let Some(label) = self.resolve(event.kind, event.slot) else { return; };
        self.metrics.count.inc();
        self.metrics.mark(&label, 1);
        tracing::trace!(slot = %event.slot, %label, "player joined");
    }

    fn on_leave(&self, event: ConnectionEvent) {
        let Some(label) = self.resolve(event.kind, event.slot) else { return; };
        self.metrics.count.dec();
        self.metrics.mark(&label, 0);
        tracing::trace!(slot = %event.slot, %label, "player left");
    }
}

#[derive(Debug, Clone, Copy)]
struct Subscriptions {
    join: SubscriptionId,
    leave: SubscriptionId,
}

/// Presence collector: keeps the join and leave hooks registered while enabled.
pub struct ConnectedPlayers {
    tracker: Arc<PresenceTracker>,
    events: Arc<dyn EventSource>,
    subscriptions: Mutex<Option<Subscriptions>>,
}

impl ConnectedPlayers {
    pub fn new(metrics: PresenceMetrics, events: Arc<dyn EventSource>, roster: Arc<dyn Roster>) -> Self {
        Self {
            tracker: Arc::new(PresenceTracker { metrics, roster }),
            events,
            subscriptions: Mutex::new(None),
        }
    }

    pub fn metrics(&self) -> &PresenceMetrics {
        &self.tracker.metrics
    }
}

impl Collector for ConnectedPlayers {
    fn name(&self) -> &'static str {
        "connected_players"
    }

    fn enable(&self) {
        let mut subs = self.subscriptions.lock().unwrap_or_else(PoisonError::into_inner);
        if subs.is_some() {
            tracing::debug!(collector = self.name(), "already enabled");
            return;
        }

        let t = Arc::clone(&self.tracker);
        let join = self
            .events
            .subscribe(EventKind::Join, Arc::new(move |ev: ConnectionEvent| t.on_join(ev)));
        let t = Arc::clone(&self.tracker);
        let leave = self
            .events
            .subscribe(EventKind::Leave, Arc::new(move |ev: ConnectionEvent| t.on_leave(ev)));

        *subs = Some(Subscriptions { join, leave });
        tracing::info!(collector = self.name(), "collector enabled");
    }

    fn disable(&self) {
        let mut subs = self.subscriptions.lock().unwrap_or_else(PoisonError::into_inner);
        let Some(s) = subs.take() else {
            tracing::debug!(collector = self.name(), "already disabled");
            return;
        };

        self.events.unsubscribe(s.join);
        self.events.unsubscribe(s.leave);
        tracing::info!(collector = self.name(), "collector disabled");
    }

    fn is_enabled(&self) -> bool {
        self.subscriptions
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::{EventHub, SlotRoster};

    fn fixture() -> (Arc<EventHub>, Arc<SlotRoster>, ConnectedPlayers) {
        let hub = Arc::new(EventHub::new());
        let roster = Arc::new(SlotRoster::new());
        let metrics = ExporterMetrics::new("t_").unwrap();
        let presence = PresenceMetrics::register(&metrics).unwrap();
        let c = ConnectedPlayers::new(presence, hub.clone(), roster.clone());
        (hub, roster, c)
    }

    #[test]
    fn registers_once_per_registry() {
        let metrics = ExporterMetrics::new("t_").unwrap();
        PresenceMetrics::register(&metrics).unwrap();
        let err = PresenceMetrics::register(&metrics).err().unwrap();
        assert_eq!(err.code().as_str(), "DUPLICATE_METRIC");
        assert!(metrics.render().contains("# TYPE t_connected_player_count gauge\nt_connected_player_count 0\n"));
    }

    #[test]
    fn starts_disabled_and_subscribes_once() {
        let (hub, _roster, c) = fixture();
        assert!(!c.is_enabled());
        assert_eq!(hub.subscriber_count(EventKind::Join), 0);

        c.enable();
        c.enable();
        assert!(c.is_enabled());
        assert_eq!(hub.subscriber_count(EventKind::Join), 1);
        assert_eq!(hub.subscriber_count(EventKind::Leave), 1);

        c.disable();
        c.disable();
        assert!(!c.is_enabled());
        assert_eq!(hub.subscriber_count(EventKind::Join), 0);
        assert_eq!(hub.subscriber_count(EventKind::Leave), 0);
    }

    #[test]
    fn disabled_collector_ignores_events() {
        let (hub, roster, c) = fixture();
        roster.assign(1u32, "Steve");
        hub.join(1u32);
        assert_eq!(c.metrics().connected(), 0);
        assert_eq!(c.metrics().player_series(), 0);
    }

    #[test]
    fn leave_miss_keeps_count_high() {
        let (hub, roster, c) = fixture();
        c.enable();
        roster.assign(3u32, "Alex");
        hub.join(3u32);
        roster.clear(3u32);
        hub.leave(3u32);
        assert_eq!(c.metrics().connected(), 1);
        assert_eq!(c.metrics().player("Alex"), Some(1));
    }
}
