//! Shared application state for the rollcall exporter.
//!
//! Metric families are registered here, once, when the state is built.
//! Collectors are constructed with them but stay disabled until
//! [`AppState::enable_collectors`] runs.

use std::future::Future;
use std::sync::Arc;

use rollcall_core::error::Result;

use crate::collectors::{Collector, ConnectedPlayers, PresenceMetrics};
use crate::config::ExporterConfig;
use crate::host::{EventHub, SlotRoster};
use crate::obs::ExporterMetrics;

#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    metrics: ExporterMetrics,
    hub: Arc<EventHub>,
    roster: Arc<SlotRoster>,
    presence: Option<Arc<ConnectedPlayers>>,
    collectors: Vec<Arc<dyn Collector>>,
}

impl AppState {
    /// Build application state.
    /// Returns Result so main can handle errors gracefully (no panic).
    pub fn new(cfg: ExporterConfig) -> Result<Self> {
        let metrics = ExporterMetrics::new(cfg.exporter.prefix.clone())?;
        let hub = Arc::new(EventHub::new());
        let roster = Arc::new(SlotRoster::new());

        let mut collectors: Vec<Arc<dyn Collector>> = Vec::new();
        let mut presence = None;

        if cfg.collectors.connected_players {
            let c = Arc::new(ConnectedPlayers::new(
                PresenceMetrics::register(&metrics)?,
                hub.clone(),
                roster.clone(),
            ));
            collectors.push(c.clone());
            presence = Some(c);
        } else {
            tracing::info!("connected_players collector disabled by config");
        }

        Ok(Self {
            inner: Arc::new(AppStateInner { metrics, hub, roster, presence, collectors }),
        })
    }

    pub fn metrics(&self) -> &ExporterMetrics {
        &self.inner.metrics
    }

    /// Host connection hooks. The host calls `emit`/`join`/`leave` on this.
    pub fn hub(&self) -> Arc<EventHub> {
        Arc::clone(&self.inner.hub)
    }

    /// Host player table consulted by collectors.
    pub fn roster(&self) -> Arc<SlotRoster> {
        Arc::clone(&self.inner.roster)
    }

    pub fn presence(&self) -> Option<Arc<ConnectedPlayers>> {
        self.inner.presence.clone()
    }

    pub fn collectors(&self) -> &[Arc<dyn Collector>] {
        &self.inner.collectors
    }

    pub fn enable_collectors(&self) {
        for c in &self.inner.collectors {
            c.enable();
        }
    }

    pub fn disable_collectors(&self) {
        for c in &self.inner.collectors {
            c.disable();
        }
    }

    pub fn is_draining(&self) -> bool {
        self.inner.metrics.is_draining()
    }

    /// Stop reporting ready and drop host subscriptions. Metric values are kept.
    pub fn begin_drain(&self) {
        self.inner.metrics.set_draining();
        self.disable_collectors();
    }

    /// Wait for `signal`, then drain.
    ///
    /// If the signal source cannot be installed this never returns, so the
    /// server keeps serving instead of exiting at once.
    pub async fn drain_on<F>(&self, signal: F)
    where
        F: Future<Output = std::io::Result<()>>,
    {
        if let Err(e) = signal.await {
            tracing::error!(error = %e, "cannot listen for shutdown signal, serving until killed");
            std::future::pending::<()>().await;
        }
        tracing::info!("shutdown requested, draining");
        self.begin_drain();
    }
}
