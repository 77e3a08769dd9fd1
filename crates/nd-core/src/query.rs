//! # Article queries
//!
//! Structured filter for `RecordStore::list` and the page it returns.

use crate::models::{Article, ArticleStatus};
use serde::{Deserialize, Serialize};

/// Category value that disables category filtering.
pub const ALL_CATEGORIES: &str = "all";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ArticleFilter {
    /// Exact match; `all` or `None` means no filter
    pub category: Option<String>,
    pub status: Option<ArticleStatus>,
    /// Case-insensitive substring over title, description and content
    pub search: Option<String>,
    /// Page size; no pagination when `None` or zero
    pub limit: Option<usize>,
    pub offset: Option<usize>,
}

impl ArticleFilter {
    pub fn category(category: impl Into<String>) -> Self {
        Self {
            category: Some(category.into()),
            ..Self::default()
        }
    }

    pub fn status(status: ArticleStatus) -> Self {
        Self {
            status: Some(status),
            ..Self::default()
        }
    }

    pub fn search(text: impl Into<String>) -> Self {
        Self {
            search: Some(text.into()),
            ..Self::default()
        }
    }

    pub fn page(mut self, limit: usize, offset: usize) -> Self {
        self.limit = Some(limit);
        self.offset = Some(offset);
        self
    }

    pub fn matches(&self, article: &Article) -> bool {
        if let Some(category) = self.category.as_deref() {
            if category != ALL_CATEGORIES && article.category != category {
                return false;
            }
        }
        if let Some(status) = self.status {
            if article.status != status {
                return false;
            }
        }
        if let Some(needle) = self.search.as_deref() {
            let needle = needle.to_lowercase();
            let hit = [&article.title, &article.description, &article.content]
                .iter()
                .any(|field| field.to_lowercase().contains(&needle));
            if !hit {
                return false;
            }
        }
        true
    }

    /// Filters, sorts by `published_at` descending, then paginates.
    /// The sort is stable so ties keep collection order (newest created first).
    pub fn apply(&self, articles: &[Article]) -> ArticlePage {
        let mut data: Vec<Article> = articles
            .iter()
            .filter(|a| self.matches(a))
            .cloned()
            .collect();
        data.sort_by(|a, b| b.published_at.cmp(&a.published_at));

        if let Some(limit) = self.limit.filter(|&l| l > 0) {
            let offset = self.offset.unwrap_or(0);
            data = data.into_iter().skip(offset).take(limit).collect();
        }

        ArticlePage {
            total: articles.len(),
            filtered: data.len(),
            data,
        }
    }
}

/// One page of `list` results.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ArticlePage {
    pub data: Vec<Article>,
    /// Size of the whole collection, before filtering
    pub total: usize,
    /// Number of records in `data`
    pub filtered: usize,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, Utc};

    fn article(id: &str, category: &str, minutes_ago: i64) -> Article {
        let at = Utc::now() - Duration::minutes(minutes_ago);
        Article {
            id: id.into(),
            title: format!("Title {id}"),
            description: "Plain description".into(),
            content: String::new(),
            url: "#".into(),
            image: String::new(),
            source: "ELONCE".into(),
            category: category.into(),
            status: ArticleStatus::Published,
            published_at: at,
            created_at: at,
            updated_at: at,
            views: 0,
            likes: 0,
            shares: 0,
        }
    }

    #[test]
    fn sorts_newest_first_then_pages() {
        let articles = vec![
            article("old", "general", 30),
            article("new", "general", 1),
            article("mid", "general", 10),
        ];
        let page = ArticleFilter::default().page(2, 1).apply(&articles);
        let ids: Vec<&str> = page.data.iter().map(|a| a.id.as_str()).collect();
        assert_eq!(ids, ["mid", "old"]);
        assert_eq!(page.total, 3);
        assert_eq!(page.filtered, 2);
    }

    #[test]
    fn all_category_is_no_filter() {
        let articles = vec![article("a", "deportes", 1), article("b", "politica", 2)];
        let all = ArticleFilter::category(ALL_CATEGORIES).apply(&articles);
        let none = ArticleFilter::default().apply(&articles);
        assert_eq!(all, none);
    }

    #[test]
    fn search_is_case_insensitive() {
        let mut a = article("a", "general", 1);
        a.content = "El Partido terminó".into();
        let articles = vec![a, article("b", "general", 2)];
        let page = ArticleFilter::search("partido").apply(&articles);
        assert_eq!(page.filtered, 1);
        assert_eq!(page.data[0].id, "a");
    }

    #[test]
    fn offset_past_end_is_empty() {
        let articles = vec![article("a", "general", 1)];
        let page = ArticleFilter::default().page(10, 5).apply(&articles);
        assert!(page.data.is_empty());
        assert_eq!(page.total, 1);
    }

    #[test]
    fn zero_limit_means_no_paging() {
        let articles = vec![article("a", "general", 1), article("b", "general", 2)];
        let page = ArticleFilter::default().page(0, 1).apply(&articles);
        assert_eq!(page.filtered, 2);
    }
}
