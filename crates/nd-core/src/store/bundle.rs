use super::RecordStore;
use crate::error::{Result, StoreError};
use crate::models::{Analytics, Article, ArticleStatus, Comment, StoreStats};
use crate::settings::Settings;
use crate::slots::Slot;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use tracing::{info, warn};

/// Backup document. Every section is optional on import.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Bundle {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub news: Option<Vec<Article>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comments: Option<Vec<Comment>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub analytics: Option<Analytics>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub settings: Option<Settings>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exported_at: Option<DateTime<Utc>>,
}

/// What `import_all` wrote. `None` means the section was absent and the
/// slot was left alone.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportReport {
    pub articles: Option<usize>,
    pub comments: Option<usize>,
    pub events: Option<usize>,
    pub settings: bool,
}

impl RecordStore {
    pub fn export_all(&self) -> Result<Bundle> {
        Ok(Bundle {
            news: Some(self.load_or_default(Slot::Articles)?),
            comments: Some(self.load_or_default(Slot::Comments)?),
            analytics: Some(self.load_or_default(Slot::Analytics)?),
            settings: Some(self.settings()),
            exported_at: Some(Utc::now()),
        })
    }

    /// Overwrites each slot present in `bundle`. Nothing is written when the
    /// article section repeats an id.
    pub fn import_all(&mut self, bundle: Bundle) -> Result<ImportReport> {
        if let Some(news) = &bundle.news {
            let mut seen = HashSet::new();
            if let Some(dup) = news.iter().find(|a| !seen.insert(a.id.as_str())) {
                return Err(StoreError::ValidationError(format!(
                    "duplicate article id {} in import",
                    dup.id
                )));
            }
        }

        let mut report = ImportReport::default();
        if let Some(news) = bundle.news {
            self.save_articles(&news)?;
            report.articles = Some(news.len());
        }
        if let Some(comments) = bundle.comments {
            self.save(Slot::Comments, &comments)?;
            report.comments = Some(comments.len());
        }
        if let Some(analytics) = bundle.analytics {
            self.save(Slot::Analytics, &analytics)?;
            report.events = Some(analytics.events.len());
        }
        if let Some(settings) = bundle.settings {
            self.save(Slot::Settings, &settings)?;
            report.settings = true;
        }

        info!(?report, "bundle imported");
        Ok(report)
    }

    /// Wipes the bundled slots and seeds them again.
    pub fn clear_all(&mut self) -> Result<()> {
        for slot in Slot::BUNDLED {
            self.remove(slot)?;
        }
        self.refresh_snapshot(&[])?;
        self.seed_missing()?;
        warn!("all data cleared");
        Ok(())
    }

    pub fn stats(&self) -> Result<StoreStats> {
        let articles: Vec<Article> = self.load_or_default(Slot::Articles)?;
        let mut stats = StoreStats {
            total: articles.len(),
            comments: self.comments(None).len(),
            events: self.analytics().events.len(),
            ..StoreStats::default()
        };
        for article in &articles {
            match article.status {
                ArticleStatus::Published => stats.published += 1,
                ArticleStatus::Draft => stats.drafts += 1,
            }
            *stats.by_category.entry(article.category.clone()).or_insert(0) += 1;
        }
        Ok(stats)
    }
}
