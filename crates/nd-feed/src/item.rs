//! Normalized feed entries as the public site renders them.

use chrono::{DateTime, Utc};
use nd_core::{new_id, FeedArticle};
use serde::{Deserialize, Serialize};

/// Inline SVG card with the site name, shown when an entry has no image.
pub const PLACEHOLDER_IMAGE: &str = "data:image/svg+xml;base64,PHN2ZyB3aWR0aD0iNDAwIiBoZWlnaHQ9IjIwMCIgeG1sbnM9Imh0dHA6Ly93d3cudzMub3JnLzIwMDAvc3ZnIj48cmVjdCB3aWR0aD0iMTAwJSIgaGVpZ2h0PSIxMDAlIiBmaWxsPSIjZjNmNGY2Ii8+PHRleHQgeD0iNTAlIiB5PSI1MCUiIGZvbnQtZmFtaWx5PSJBcmlhbCwgc2Fucy1zZXJpZiIgZm9udC1zaXplPSIxOCIgZmlsbD0iIzY0NzQ4YiIgdGV4dC1hbmNob3I9Im1pZGRsZSIgZHk9Ii4zZW0iPkVsb25jZTwvdGV4dD48L3N2Zz4=";

/// Values filled in for fields a source leaves out.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeedDefaults {
    pub source: String,
    pub image: String,
    pub url: String,
    pub category: String,
}

impl Default for FeedDefaults {
    fn default() -> Self {
        Self {
            source: "ELONCE".to_string(),
            image: PLACEHOLDER_IMAGE.to_string(),
            url: "#".to_string(),
            category: "general".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeedItem {
    pub id: String,
    pub title: String,
    pub description: String,
    pub url: String,
    pub image: String,
    pub source: String,
    pub published_at: DateTime<Utc>,
    pub category: String,
}

impl FeedItem {
    /// `None` for entries without a title or description.
    pub fn normalize(article: FeedArticle, defaults: &FeedDefaults) -> Option<Self> {
        if !article.is_displayable() {
            return None;
        }
        let id = article.id_label().unwrap_or_else(new_id);
        let source = article.source_label().unwrap_or_else(|| defaults.source.clone());
        let or = |value: Option<String>, fallback: &str| {
            value
                .filter(|v| !v.trim().is_empty())
                .unwrap_or_else(|| fallback.to_string())
        };

        Some(Self {
            id,
            title: article.title.unwrap_or_default(),
            description: article.description.unwrap_or_default(),
            url: or(article.url, &defaults.url),
            image: or(article.image, &defaults.image),
            source,
            published_at: article.published_at.unwrap_or_else(Utc::now),
            category: or(article.category, &defaults.category),
        })
    }
}
