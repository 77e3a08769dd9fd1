//! # Slots
//!
//! Names of the slots the store owns, and the in-memory backend.

use crate::traits::SlotStore;
use dashmap::DashMap;

/// The named slots backing a store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Slot {
    Articles,
    Comments,
    Analytics,
    Settings,
    /// Published articles copied out for the public feed
    Snapshot,
}

impl Slot {
    /// The four slots `export_all` / `clear_all` operate on.
    pub const BUNDLED: [Slot; 4] = [Slot::Articles, Slot::Comments, Slot::Analytics, Slot::Settings];

    pub fn key(&self) -> &'static str {
        match self {
            Self::Articles => "articles",
            Self::Comments => "comments",
            Self::Analytics => "analytics",
            Self::Settings => "settings",
            Self::Snapshot => "published_snapshot",
        }
    }
}

impl std::fmt::Display for Slot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.key())
    }
}

/// Process-local backend. Nothing survives a restart.
#[derive(Debug, Default)]
pub struct MemorySlots {
    slots: DashMap<String, String>,
}

impl MemorySlots {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }
}

impl SlotStore for MemorySlots {
    fn read(&self, slot: &str) -> anyhow::Result<Option<String>> {
        Ok(self.slots.get(slot).map(|v| v.value().clone()))
    }

    fn write(&self, slot: &str, value: &str) -> anyhow::Result<()> {
        self.slots.insert(slot.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, slot: &str) -> anyhow::Result<()> {
        self.slots.remove(slot);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn memory_slots_read_write_remove() {
        let slots = MemorySlots::new();
        assert_eq!(slots.read("articles").unwrap(), None);

        slots.write("articles", "[]").unwrap();
        assert_eq!(slots.read("articles").unwrap().as_deref(), Some("[]"));

        slots.remove("articles").unwrap();
        slots.remove("articles").unwrap();
        assert!(slots.is_empty());
    }
}
