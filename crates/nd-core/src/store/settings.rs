use super::RecordStore;
use crate::error::Result;
use crate::settings::{Settings, SettingsPatch};
use crate::slots::Slot;
use tracing::info;

impl RecordStore {
    /// Stored settings, or the defaults when the slot is missing or unreadable.
    pub fn settings(&self) -> Settings {
        self.load_degraded(Slot::Settings)
    }

    /// Merges `patch` over the current settings and stores the result.
    /// Unreadable settings are replaced by defaults before merging.
    pub fn set_settings(&mut self, patch: SettingsPatch) -> Result<Settings> {
        let mut settings = self.settings();
        settings.merge(patch);
        self.save(Slot::Settings, &settings)?;
        info!("settings saved");
        Ok(settings)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::StoreOptions;
    use crate::traits::SlotStore;
    use crate::MemorySlots;
    use std::sync::Arc;

    #[test]
    fn set_settings_merges() {
        let mut store = RecordStore::open(MemorySlots::new(), StoreOptions::default()).unwrap();
        store
            .set_settings(SettingsPatch { theme: Some("dark".into()), ..SettingsPatch::default() })
            .unwrap();
        let saved = store
            .set_settings(SettingsPatch { max_news_per_page: Some(50), ..SettingsPatch::default() })
            .unwrap();

        assert_eq!(saved.theme, "dark");
        assert_eq!(saved.max_news_per_page, 50);
        assert_eq!(store.settings(), saved);
    }

    #[test]
    fn corrupt_settings_read_as_defaults() {
        let slots = Arc::new(MemorySlots::new());
        slots.write("settings", "[1, 2").unwrap();
        let store = RecordStore::open(slots, StoreOptions::default()).unwrap();
        assert_eq!(store.settings(), Settings::default());
    }
}
