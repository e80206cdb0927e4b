//! rollcall exporter library entry.
//!
//! Wires the host adapters, presence collector, metric registry, and ops
//! endpoints into one exporter. Consumed by the binary (`main.rs`), by hosts
//! embedding the exporter in-process, and by integration tests.

pub mod app_state;
pub mod collectors;
pub mod config;
pub mod host;
pub mod obs;
pub mod ops;
pub mod router;
