//! Collectors: units that subscribe to host events and keep metrics current.

pub mod connected_players;

pub use connected_players::{ConnectedPlayers, PresenceMetrics};

/// A collector owns a subscription relationship with the host.
///
/// `enable` and `disable` are idempotent: hosts may call them from load and
/// unload paths that are not guaranteed to run once. Metric values survive a
/// disable.
pub trait Collector: Send + Sync {
    fn name(&self) -> &'static str;
    fn enable(&self);
    fn disable(&self);
    fn is_enabled(&self) -> bool;
}
