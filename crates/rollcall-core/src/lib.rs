//! rollcall core: host-facing contracts, label sanitization, and error types.
//!
//! This crate defines the event model a host emits, the roster and
//! subscription traits the presence collector consumes, and the shared error
//! surface. It carries no runtime or transport dependencies so any host
//! process can implement the traits directly.
//!
//! # Defensive guarantees
//! Panics, `unwrap`, and `expect` are compile-denied here. Event handlers run
//! on the host's dispatch thread, so nothing on that path may unwind.

#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]

pub mod error;
pub mod event;
pub mod host;
pub mod label;

/// Shared result type.
pub use error::{Result, RollcallError};
pub use event::{ConnectionEvent, EventKind, PlayerIdentity, SlotIndex};
pub use host::{ConnectionHandler, EventSource, Roster, SubscriptionId};
pub use label::{sanitize, Label};
