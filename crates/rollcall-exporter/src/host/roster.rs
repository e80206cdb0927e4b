use dashmap::DashMap;

use rollcall_core::event::{PlayerIdentity, SlotIndex};
use rollcall_core::host::Roster;

/// Slot -> player table.
///
/// A host assigns a name once the player record is populated and clears it
/// when the record is torn down. Lookups between those points see nothing.
#[derive(Default)]
pub struct SlotRoster {
    slots: DashMap<SlotIndex, PlayerIdentity>,
}

impl SlotRoster {
    pub fn new() -> Self {
        Self { slots: DashMap::new() }
    }

    /// Returns the identity previously held by the slot, if any.
    pub fn assign(&self, slot: impl Into<SlotIndex>, name: impl Into<String>) -> Option<PlayerIdentity> {
        self.slots.insert(slot.into(), PlayerIdentity::new(name))
    }

    pub fn clear(&self, slot: impl Into<SlotIndex>) -> Option<PlayerIdentity> {
        self.slots.remove(&slot.into()).map(|(_, p)| p)
    }
}

impl Roster for SlotRoster {
    fn lookup(&self, slot: SlotIndex) -> Option<PlayerIdentity> {
        self.slots.get(&slot).map(|r| r.value().clone())
    }
}
