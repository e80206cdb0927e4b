//! In-process host adapters.
//!
//! `EventHub` stands in for a host's connection hooks and `SlotRoster` for its
//! player table. Embedding hosts may use these directly or implement the core
//! traits over their own structures.

mod hub;
mod roster;

pub use hub::EventHub;
pub use roster::SlotRoster;
