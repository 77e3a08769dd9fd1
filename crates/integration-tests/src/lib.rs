//! Shared fixtures for the cross-crate tests.

use chrono::{DateTime, Duration, Utc};
use fake::faker::lorem::en::Sentence;
use fake::Fake;
use nd_core::{MemorySlots, NewArticle, RecordStore, StoreLimits, StoreOptions};
use std::sync::Arc;

/// Options for a store that starts with no articles at all.
pub fn empty_options() -> StoreOptions {
    StoreOptions {
        seed_welcome: false,
        ..StoreOptions::default()
    }
}

pub fn capped_options(max_articles: usize) -> StoreOptions {
    StoreOptions {
        limits: StoreLimits {
            max_articles,
            ..StoreLimits::default()
        },
        ..empty_options()
    }
}

/// An empty store plus a handle on its backend for inspecting raw slots.
pub fn memory_store() -> (RecordStore, Arc<MemorySlots>) {
    let slots = Arc::new(MemorySlots::new());
    let store = RecordStore::open(slots.clone(), empty_options()).expect("open memory store");
    (store, slots)
}

/// A valid article with generated text.
pub fn fake_article() -> NewArticle {
    NewArticle {
        title: Sentence(3..6).fake(),
        description: Sentence(8..14).fake(),
        ..NewArticle::default()
    }
}

pub fn fake_article_in(category: &str) -> NewArticle {
    NewArticle {
        category: Some(category.to_string()),
        ..fake_article()
    }
}

/// A fake article published `minutes` ago.
pub fn fake_article_aged(minutes: i64) -> NewArticle {
    NewArticle {
        published_at: Some(minutes_ago(minutes)),
        ..fake_article()
    }
}

pub fn minutes_ago(minutes: i64) -> DateTime<Utc> {
    Utc::now() - Duration::minutes(minutes)
}
