use crate::item::{FeedDefaults, FeedItem};
use crate::sources::{FallbackSource, FileSource, SnapshotSource};
use nd_core::traits::{FeedSource, SlotStore};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Items from the first source that produced any, plus that source's name.
#[derive(Debug, Clone, PartialEq)]
pub struct FeedLoad {
    pub origin: String,
    pub items: Vec<FeedItem>,
}

/// Where the standard chain looks for articles.
#[derive(Debug, Default)]
pub struct FeedLocations {
    /// Feed document written by `newsdesk sync`
    pub shared_file: Option<PathBuf>,
    /// Static `data.json` shipped with the site
    pub local_data: Option<PathBuf>,
    #[cfg(feature = "http")]
    pub api: Option<(String, Option<secrecy::SecretString>)>,
}

/// Tries each source in order and keeps the first non-empty result.
pub struct FeedLoader {
    sources: Vec<Box<dyn FeedSource>>,
    defaults: FeedDefaults,
}

impl FeedLoader {
    pub fn new(defaults: FeedDefaults) -> Self {
        Self {
            sources: Vec::new(),
            defaults,
        }
    }

    pub fn with_source(mut self, source: impl FeedSource + 'static) -> Self {
        self.sources.push(Box::new(source));
        self
    }

    /// Snapshot, shared file, local data, headline API, then the built-in
    /// fallback.
    pub fn standard(
        slots: Arc<dyn SlotStore>,
        locations: FeedLocations,
        defaults: FeedDefaults,
    ) -> Self {
        let mut loader = Self::new(defaults).with_source(SnapshotSource::new(slots));
        if let Some(path) = locations.shared_file {
            loader = loader.with_source(FileSource::new("shared-file", path));
        }
        if let Some(path) = locations.local_data {
            loader = loader.with_source(FileSource::new("local-data", path));
        }
        #[cfg(feature = "http")]
        if let Some((url, token)) = locations.api {
            loader = loader.with_source(crate::sources::HttpSource::new(url, token));
        }
        loader.with_source(FallbackSource)
    }

    pub fn source_names(&self) -> Vec<&str> {
        self.sources.iter().map(|s| s.name()).collect()
    }

    /// `None` only when every source came up empty.
    pub async fn load(&self) -> Option<FeedLoad> {
        for source in &self.sources {
            let name = source.name();
            let articles = match source.fetch().await {
                Ok(Some(articles)) => articles,
                Ok(None) => {
                    debug!(source = name, "feed source has nothing");
                    continue;
                }
                Err(err) => {
                    warn!(source = name, error = %format!("{err:#}"), "feed source failed, skipping");
                    continue;
                }
            };

            let offered = articles.len();
            let items: Vec<FeedItem> = articles
                .into_iter()
                .filter_map(|a| FeedItem::normalize(a, &self.defaults))
                .collect();
            if items.is_empty() {
                warn!(source = name, offered, "no displayable articles, skipping");
                continue;
            }

            info!(source = name, count = items.len(), "feed loaded");
            return Some(FeedLoad {
                origin: name.to_string(),
                items,
            });
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use nd_core::FeedArticle;

    struct Broken;

    #[async_trait]
    impl FeedSource for Broken {
        fn name(&self) -> &str {
            "broken"
        }

        async fn fetch(&self) -> anyhow::Result<Option<Vec<FeedArticle>>> {
            anyhow::bail!("connection refused")
        }
    }

    struct Untitled;

    #[async_trait]
    impl FeedSource for Untitled {
        fn name(&self) -> &str {
            "untitled"
        }

        async fn fetch(&self) -> anyhow::Result<Option<Vec<FeedArticle>>> {
            Ok(Some(vec![FeedArticle::default()]))
        }
    }

    #[tokio::test]
    async fn skips_failing_and_invalid_sources() {
        let loader = FeedLoader::new(FeedDefaults::default())
            .with_source(Broken)
            .with_source(Untitled)
            .with_source(FallbackSource);

        let load = loader.load().await.unwrap();
        assert_eq!(load.origin, "fallback");
        assert_eq!(load.items.len(), 5);
    }

    #[tokio::test]
    async fn empty_chain_loads_nothing() {
        let loader = FeedLoader::new(FeedDefaults::default()).with_source(Broken);
        assert!(loader.load().await.is_none());
    }
}
