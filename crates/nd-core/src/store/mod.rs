//! # Record Store
//!
//! The persistence + query facade over articles, comments, analytics and
//! settings. Each entity kind lives in its own slot as one JSON value; every
//! operation is a single read-modify-write against that slot.
//!
//! Lifecycle: construct with a [`SlotStore`] backend, `open` seeds whatever is
//! missing (default settings, the welcome article), then the store is ready.
//! Mutating operations take `&mut self`, so two writes can never interleave.

mod analytics;
mod articles;
mod bundle;
mod comments;
mod settings;

pub use bundle::{Bundle, ImportReport};

use crate::error::{Result, StoreError};
use crate::models::{Article, ArticleStatus, EventContext};
use crate::query::ArticleFilter;
use crate::settings::Settings;
use crate::slots::Slot;
use crate::traits::SlotStore;
use chrono::Utc;
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, info, warn};

/// Id of the article seeded into an empty store.
pub const WELCOME_ARTICLE_ID: &str = "welcome";

/// Collection caps. Oldest records are dropped once a cap is exceeded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StoreLimits {
    pub max_articles: usize,
    pub max_comments: usize,
    pub max_events: usize,
}

impl Default for StoreLimits {
    fn default() -> Self {
        Self {
            max_articles: 10_000,
            max_comments: 50_000,
            max_events: 100_000,
        }
    }
}

/// Values filled in when a caller leaves a field out.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArticleDefaults {
    pub source: String,
    pub image: String,
    pub url: String,
    pub category: String,
    /// Comment/reply author when none is given
    pub author: String,
    /// Appended to the title of duplicated articles
    pub duplicate_suffix: String,
}

impl Default for ArticleDefaults {
    fn default() -> Self {
        Self {
            source: "ELONCE".to_string(),
            image: "https://via.placeholder.com/400x200?text=Sin+Imagen".to_string(),
            url: "#".to_string(),
            category: "general".to_string(),
            author: "Anónimo".to_string(),
            duplicate_suffix: " (Copia)".to_string(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct StoreOptions {
    pub limits: StoreLimits,
    pub defaults: ArticleDefaults,
    /// Stamped onto every tracked analytics event
    pub event_context: EventContext,
    /// Seed the welcome article when the articles slot is empty
    pub seed_welcome: bool,
}

impl Default for StoreOptions {
    fn default() -> Self {
        Self {
            limits: StoreLimits::default(),
            defaults: ArticleDefaults::default(),
            event_context: EventContext::default(),
            seed_welcome: true,
        }
    }
}

pub struct RecordStore {
    slots: Box<dyn SlotStore>,
    options: StoreOptions,
}

impl std::fmt::Debug for RecordStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RecordStore")
            .field("options", &self.options)
            .finish_non_exhaustive()
    }
}

impl RecordStore {
    /// Opens a store over `slots`, seeding defaults into empty slots.
    pub fn open(slots: impl SlotStore + 'static, options: StoreOptions) -> Result<Self> {
        let store = Self {
            slots: Box::new(slots),
            options,
        };
        store.seed_missing()?;
        info!(limits = ?store.options.limits, "record store ready");
        Ok(store)
    }

    pub fn options(&self) -> &StoreOptions {
        &self.options
    }

    fn seed_missing(&self) -> Result<()> {
        if self.options.seed_welcome && self.slots.read(Slot::Articles.key())?.is_none() {
            self.save_articles(&[self.welcome_article()])?;
            debug!("seeded welcome article");
        }
        if self.slots.read(Slot::Settings.key())?.is_none() {
            self.save(Slot::Settings, &Settings::default())?;
            debug!("seeded default settings");
        }
        Ok(())
    }

    fn welcome_article(&self) -> Article {
        let now = Utc::now();
        let source = self.options.defaults.source.clone();
        Article {
            id: WELCOME_ARTICLE_ID.to_string(),
            title: format!("Bienvenido a {source}"),
            description: "Tu fuente de noticias confiable las 24 horas del día.".to_string(),
            content: format!(
                "{source} te brinda las últimas noticias de Paraná, Argentina y el mundo."
            ),
            url: self.options.defaults.url.clone(),
            image: format!("https://via.placeholder.com/400x200?text={source}"),
            source,
            category: self.options.defaults.category.clone(),
            status: ArticleStatus::Published,
            published_at: now,
            created_at: now,
            updated_at: now,
            views: 0,
            likes: 0,
            shares: 0,
        }
    }

    /// Reads and parses a slot. A missing or blank slot is `None`.
    fn load<T: DeserializeOwned>(&self, slot: Slot) -> Result<Option<T>> {
        let Some(raw) = self.slots.read(slot.key())? else {
            return Ok(None);
        };
        if raw.trim().is_empty() {
            return Ok(None);
        }
        serde_json::from_str(&raw)
            .map(Some)
            .map_err(|source| StoreError::Corrupt {
                slot: slot.key().to_string(),
                source,
            })
    }

    fn load_or_default<T: DeserializeOwned + Default>(&self, slot: Slot) -> Result<T> {
        Ok(self.load(slot)?.unwrap_or_default())
    }

    /// Read path for slots whose failures must not reach the reader.
    fn load_degraded<T: DeserializeOwned + Default>(&self, slot: Slot) -> T {
        self.load_or_default(slot).unwrap_or_else(|err| {
            warn!(%slot, error = %err, "slot unreadable, using empty value");
            T::default()
        })
    }

    fn save<T: Serialize + ?Sized>(&self, slot: Slot, value: &T) -> Result<()> {
        let raw = serde_json::to_string(value).map_err(|e| StoreError::Internal(e.to_string()))?;
        self.slots.write(slot.key(), &raw)?;
        Ok(())
    }

    /// Writes the articles slot and keeps an existing snapshot in step with it.
    fn save_articles(&self, articles: &[Article]) -> Result<()> {
        self.save(Slot::Articles, articles)?;
        self.refresh_snapshot(articles)
    }

    /// Rewrites the snapshot from `articles`. A store that never published
    /// one is left without it.
    fn refresh_snapshot(&self, articles: &[Article]) -> Result<()> {
        if self.slots.read(Slot::Snapshot.key())?.is_none() {
            return Ok(());
        }
        let published = ArticleFilter::status(ArticleStatus::Published)
            .apply(articles)
            .data;
        self.save(Slot::Snapshot, &published)?;
        debug!(count = published.len(), "published snapshot refreshed");
        Ok(())
    }

    fn remove(&self, slot: Slot) -> Result<()> {
        self.slots.remove(slot.key())?;
        Ok(())
    }
}

/// Treats blank strings like absent ones, the way form input arrives.
fn filled_or(value: Option<String>, fallback: &str) -> String {
    match value {
        Some(v) if !v.trim().is_empty() => v,
        _ => fallback.to_string(),
    }
}
