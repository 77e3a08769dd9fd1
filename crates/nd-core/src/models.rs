//! # Domain Models
//!
//! These structs represent the records held by the Newsdesk store.
//! Field names serialize in camelCase so persisted slots stay readable by
//! the web front end that shares them.
//! Ids are opaque strings; the store mints UUID v7 values (time-ordered,
//! monotonic within a process) but accepts anything on import.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use uuid::Uuid;

/// Mints a fresh record id.
pub fn new_id() -> String {
    Uuid::now_v7().simple().to_string()
}

/// Publication state of an article.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ArticleStatus {
    Draft,
    Published,
}

impl ArticleStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Draft => "draft",
            Self::Published => "published",
        }
    }
}

impl std::str::FromStr for ArticleStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "draft" => Ok(Self::Draft),
            "published" => Ok(Self::Published),
            other => Err(format!("unknown article status `{other}`")),
        }
    }
}

/// A news article as stored in the articles slot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Article {
    pub id: String,
    pub title: String,
    pub description: String,
    #[serde(default)]
    pub content: String,
    /// Link to the full story; `#` when the article only lives here
    #[serde(default)]
    pub url: String,
    /// Image URL or data URI
    #[serde(default)]
    pub image: String,
    #[serde(default)]
    pub source: String,
    pub category: String,
    pub status: ArticleStatus,
    /// Sort key for every listing
    pub published_at: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(default)]
    pub views: u64,
    #[serde(default)]
    pub likes: u64,
    #[serde(default)]
    pub shares: u64,
}

/// Fields accepted by `RecordStore::create`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewArticle {
    pub title: String,
    pub description: String,
    pub content: Option<String>,
    pub url: Option<String>,
    pub image: Option<String>,
    pub source: Option<String>,
    pub category: Option<String>,
    pub status: Option<ArticleStatus>,
    pub published_at: Option<DateTime<Utc>>,
}

/// A partial update: only the fields that are `Some` overwrite the record.
///
/// `id`, `createdAt` and `updatedAt` are deliberately absent; the store owns them.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ArticlePatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<ArticleStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub published_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub views: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub likes: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shares: Option<u64>,
}

impl ArticlePatch {
    pub fn status(status: ArticleStatus) -> Self {
        Self {
            status: Some(status),
            ..Self::default()
        }
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Shallow merge over `article`. Does not touch `updated_at`.
    pub fn apply_to(self, article: &mut Article) {
        fn set<T>(slot: &mut T, value: Option<T>) {
            if let Some(v) = value {
                *slot = v;
            }
        }

        set(&mut article.title, self.title);
        set(&mut article.description, self.description);
        set(&mut article.content, self.content);
        set(&mut article.url, self.url);
        set(&mut article.image, self.image);
        set(&mut article.source, self.source);
        set(&mut article.category, self.category);
        set(&mut article.status, self.status);
        set(&mut article.published_at, self.published_at);
        set(&mut article.views, self.views);
        set(&mut article.likes, self.likes);
        set(&mut article.shares, self.shares);
    }
}

/// A reader comment attached to exactly one article.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Comment {
    pub id: String,
    /// Written as `articleId`; `newsId` is what the web front end stores
    #[serde(alias = "newsId")]
    pub article_id: String,
    pub author: String,
    pub content: String,
    pub timestamp: DateTime<Utc>,
    #[serde(default)]
    pub likes: u64,
    #[serde(default)]
    pub dislikes: u64,
    /// Kept in arrival order
    #[serde(default)]
    pub replies: Vec<Reply>,
}

/// A reply nested under a comment. Not addressable on its own.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Reply {
    pub id: String,
    pub content: String,
    pub author: String,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewComment {
    pub article_id: String,
    pub author: Option<String>,
    pub content: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NewReply {
    pub author: Option<String>,
    pub content: String,
}

/// Reader reaction on a comment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Reaction {
    Like,
    Dislike,
}

/// One tracked analytics event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyticsEvent {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: String,
    /// Free-form payload supplied by the caller
    #[serde(default)]
    pub data: serde_json::Value,
    pub timestamp: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_agent: Option<String>,
    /// Location the event originated from (page URL)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

/// The analytics slot: an event log plus per-type totals.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Analytics {
    #[serde(default)]
    pub events: Vec<AnalyticsEvent>,
    /// Cumulative per-type totals; not reduced when old events are evicted
    #[serde(default)]
    pub counters: BTreeMap<String, u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_updated: Option<DateTime<Utc>>,
}

/// Contextual fields stamped onto every tracked event.
#[derive(Debug, Clone, Default)]
pub struct EventContext {
    pub user_agent: Option<String>,
    pub location: Option<String>,
}

/// Document written for the public site: the shared `cms-news.json` file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeedDocument {
    pub version: String,
    pub name: String,
    pub description: String,
    pub last_update: DateTime<Utc>,
    pub articles: Vec<Article>,
}

impl FeedDocument {
    pub const VERSION: &'static str = "1.0.0";

    pub fn new(articles: Vec<Article>) -> Self {
        Self {
            version: Self::VERSION.to_string(),
            name: "Noticias del CMS".to_string(),
            description: "Archivo compartido de noticias del CMS".to_string(),
            last_update: Utc::now(),
            articles,
        }
    }
}

/// An article as found in a feed source, before normalization.
///
/// Every field is optional because sources range from our own snapshot to
/// third-party headline APIs. `source` may be a plain label or an object
/// with a `name` (the shape headline APIs use).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FeedArticle {
    pub id: Option<serde_json::Value>,
    pub title: Option<String>,
    pub description: Option<String>,
    pub url: Option<String>,
    pub image: Option<String>,
    pub source: Option<serde_json::Value>,
    pub published_at: Option<DateTime<Utc>>,
    pub category: Option<String>,
}

impl FeedArticle {
    /// A feed entry is shown only with a non-blank title and description.
    pub fn is_displayable(&self) -> bool {
        let filled = |s: &Option<String>| s.as_deref().is_some_and(|v| !v.trim().is_empty());
        filled(&self.title) && filled(&self.description)
    }

    pub fn source_label(&self) -> Option<String> {
        match self.source.as_ref()? {
            serde_json::Value::String(s) if !s.trim().is_empty() => Some(s.clone()),
            serde_json::Value::Object(map) => map
                .get("name")
                .and_then(|v| v.as_str())
                .filter(|s| !s.trim().is_empty())
                .map(str::to_string),
            _ => None,
        }
    }

    /// Ids may be strings or numbers depending on who wrote the feed.
    pub fn id_label(&self) -> Option<String> {
        match self.id.as_ref()? {
            serde_json::Value::String(s) if !s.is_empty() => Some(s.clone()),
            serde_json::Value::Number(n) => Some(n.to_string()),
            _ => None,
        }
    }
}

impl From<&Article> for FeedArticle {
    fn from(article: &Article) -> Self {
        Self {
            id: Some(serde_json::Value::String(article.id.clone())),
            title: Some(article.title.clone()),
            description: Some(article.description.clone()),
            url: Some(article.url.clone()),
            image: Some(article.image.clone()),
            source: Some(serde_json::Value::String(article.source.clone())),
            published_at: Some(article.published_at),
            category: Some(article.category.clone()),
        }
    }
}

/// Aggregate counts shown on the admin dashboard.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StoreStats {
    pub total: usize,
    pub published: usize,
    pub drafts: usize,
    pub comments: usize,
    pub events: usize,
    pub by_category: BTreeMap<String, usize>,
}
