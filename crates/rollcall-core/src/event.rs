//! Connection events as emitted by the host.

use std::fmt;

use serde::Deserialize;

/// Host-assigned connection slot.
///
/// Slots are reused across sessions, so a slot never identifies a player on
/// its own; the roster has to be asked at the moment an event is handled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Deserialize)]
#[serde(transparent)]
pub struct SlotIndex(pub u32);

impl fmt::Display for SlotIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl From<u32> for SlotIndex {
    fn from(v: u32) -> Self {
        SlotIndex(v)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EventKind {
    Join,
    Leave,
}

impl EventKind {
    pub fn as_str(self) -> &'static str {
        match self {
            EventKind::Join => "join",
            EventKind::Leave => "leave",
        }
    }
}

/// One connect or disconnect notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct ConnectionEvent {
    pub kind: EventKind,
    pub slot: SlotIndex,
}

impl ConnectionEvent {
    pub fn join(slot: impl Into<SlotIndex>) -> Self {
        Self { kind: EventKind::Join, slot: slot.into() }
    }

    pub fn leave(slot: impl Into<SlotIndex>) -> Self {
        Self { kind: EventKind::Leave, slot: slot.into() }
    }
}

/// Identity the roster resolved for a slot.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct PlayerIdentity {
    pub name: String,
}

impl PlayerIdentity {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}
