//! # Core Traits (Ports)
//!
//! Any backend plugin must implement these traits to be used by the binary.

use crate::models::FeedArticle;
use async_trait::async_trait;

/// Durable key-value storage holding one JSON document per named slot.
///
/// Implementations only move strings; parsing belongs to the store so a
/// backend can never half-understand a record.
#[cfg_attr(feature = "testing", mockall::automock)]
pub trait SlotStore: Send + Sync {
    /// Returns `None` when the slot was never written or has been removed.
    fn read(&self, slot: &str) -> anyhow::Result<Option<String>>;
    /// Replaces the whole slot value.
    fn write(&self, slot: &str, value: &str) -> anyhow::Result<()>;
    /// Removing a missing slot is not an error.
    fn remove(&self, slot: &str) -> anyhow::Result<()>;
}

/// One link in the public feed's source chain.
#[async_trait]
pub trait FeedSource: Send + Sync {
    /// Short label used in logs and in the load report.
    fn name(&self) -> &str;

    /// `Ok(None)` means the source has nothing to offer; the loader moves on.
    async fn fetch(&self) -> anyhow::Result<Option<Vec<FeedArticle>>>;
}

impl<T: SlotStore + ?Sized> SlotStore for std::sync::Arc<T> {
    fn read(&self, slot: &str) -> anyhow::Result<Option<String>> {
        (**self).read(slot)
    }

    fn write(&self, slot: &str, value: &str) -> anyhow::Result<()> {
        (**self).write(slot, value)
    }

    fn remove(&self, slot: &str) -> anyhow::Result<()> {
        (**self).remove(slot)
    }
}
