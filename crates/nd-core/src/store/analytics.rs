use super::RecordStore;
use crate::error::Result;
use crate::models::{new_id, Analytics, AnalyticsEvent};
use crate::slots::Slot;
use chrono::Utc;
use tracing::debug;

impl RecordStore {
    /// Appends an event and bumps the counter for its type.
    pub fn track_event(&mut self, kind: &str, data: serde_json::Value) -> Result<AnalyticsEvent> {
        let mut analytics: Analytics = self.load_or_default(Slot::Analytics)?;
        let now = Utc::now();
        let event = AnalyticsEvent {
            id: new_id(),
            kind: kind.to_string(),
            data,
            timestamp: now,
            user_agent: self.options.event_context.user_agent.clone(),
            url: self.options.event_context.location.clone(),
        };

        analytics.events.push(event.clone());
        let max = self.options.limits.max_events;
        if analytics.events.len() > max {
            analytics.events.drain(..analytics.events.len() - max);
        }
        *analytics.counters.entry(kind.to_string()).or_insert(0) += 1;
        analytics.last_updated = Some(now);
        self.save(Slot::Analytics, &analytics)?;

        debug!(kind, "event tracked");
        Ok(event)
    }

    /// The whole analytics slot. Unreadable data reads as empty.
    pub fn analytics(&self) -> Analytics {
        self.load_degraded(Slot::Analytics)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::EventContext;
    use crate::store::{StoreLimits, StoreOptions};
    use crate::MemorySlots;
    use serde_json::json;

    #[test]
    fn counters_track_every_event_of_a_type() {
        let mut store = RecordStore::open(MemorySlots::new(), StoreOptions::default()).unwrap();
        store.track_event("article_view", json!({ "id": "a" })).unwrap();
        store.track_event("article_view", json!({ "id": "b" })).unwrap();
        store.track_event("search", json!({ "q": "lluvia" })).unwrap();

        let analytics = store.analytics();
        assert_eq!(analytics.events.len(), 3);
        assert_eq!(analytics.counters["article_view"], 2);
        assert_eq!(analytics.counters["search"], 1);
        assert!(analytics.last_updated.is_some());
    }

    #[test]
    fn events_carry_the_store_context() {
        let options = StoreOptions {
            event_context: EventContext {
                user_agent: Some("newsdesk-cli".into()),
                location: Some("cli://track".into()),
            },
            ..StoreOptions::default()
        };
        let mut store = RecordStore::open(MemorySlots::new(), options).unwrap();
        let event = store.track_event("share", json!(null)).unwrap();
        assert_eq!(event.user_agent.as_deref(), Some("newsdesk-cli"));
        assert_eq!(event.url.as_deref(), Some("cli://track"));
    }

    #[test]
    fn event_cap_keeps_counters() {
        let options = StoreOptions {
            limits: StoreLimits { max_events: 2, ..StoreLimits::default() },
            ..StoreOptions::default()
        };
        let mut store = RecordStore::open(MemorySlots::new(), options).unwrap();
        for _ in 0..5 {
            store.track_event("click", json!({})).unwrap();
        }
        let analytics = store.analytics();
        assert_eq!(analytics.events.len(), 2);
        assert_eq!(analytics.counters["click"], 5);
    }
}
