use super::{filled_or, RecordStore};
use crate::error::{Result, StoreError};
use crate::models::{new_id, Article, ArticlePatch, ArticleStatus, FeedDocument, NewArticle};
use crate::query::{ArticleFilter, ArticlePage};
use crate::slots::Slot;
use chrono::Utc;
use tracing::{debug, info};

const ARTICLE: &str = "Article";

impl RecordStore {
    fn articles(&self) -> Result<Vec<Article>> {
        self.load_or_default(Slot::Articles)
    }

    pub fn list(&self, filter: &ArticleFilter) -> Result<ArticlePage> {
        let page = filter.apply(&self.articles()?);
        debug!(total = page.total, filtered = page.filtered, "listed articles");
        Ok(page)
    }

    /// Fetches one article and counts the read as a view.
    pub fn get_by_id(&mut self, id: &str) -> Result<Article> {
        let mut articles = self.articles()?;
        let article = articles
            .iter_mut()
            .find(|a| a.id == id)
            .ok_or_else(|| StoreError::not_found(ARTICLE, id))?;
        article.views += 1;
        let found = article.clone();
        self.save_articles(&articles)?;
        Ok(found)
    }

    /// Like `get_by_id` without touching the view counter.
    pub fn find(&self, id: &str) -> Result<Article> {
        self.articles()?
            .into_iter()
            .find(|a| a.id == id)
            .ok_or_else(|| StoreError::not_found(ARTICLE, id))
    }

    pub fn create(&mut self, fields: NewArticle) -> Result<Article> {
        let mut articles = self.articles()?;
        let defaults = &self.options.defaults;
        let now = Utc::now();

        let content = filled_or(fields.content, &fields.description);
        let article = Article {
            id: new_id(),
            title: fields.title,
            description: fields.description,
            content,
            url: filled_or(fields.url, &defaults.url),
            image: filled_or(fields.image, &defaults.image),
            source: filled_or(fields.source, &defaults.source),
            category: filled_or(fields.category, &defaults.category),
            status: fields.status.unwrap_or(ArticleStatus::Published),
            published_at: fields.published_at.unwrap_or(now),
            created_at: now,
            updated_at: now,
            views: 0,
            likes: 0,
            shares: 0,
        };

        articles.insert(0, article.clone());
        articles.truncate(self.options.limits.max_articles);
        self.save_articles(&articles)?;

        info!(id = %article.id, category = %article.category, status = article.status.as_str(), "article created");
        Ok(article)
    }

    pub fn update(&mut self, id: &str, patch: ArticlePatch) -> Result<Article> {
        let mut articles = self.articles()?;
        let article = articles
            .iter_mut()
            .find(|a| a.id == id)
            .ok_or_else(|| StoreError::not_found(ARTICLE, id))?;
        patch.apply_to(article);
        article.updated_at = Utc::now();
        let updated = article.clone();
        self.save_articles(&articles)?;

        info!(id, "article updated");
        Ok(updated)
    }

    pub fn delete(&mut self, id: &str) -> Result<()> {
        let mut articles = self.articles()?;
        let before = articles.len();
        articles.retain(|a| a.id != id);
        if articles.len() == before {
            return Err(StoreError::not_found(ARTICLE, id));
        }
        self.save_articles(&articles)?;

        info!(id, "article deleted");
        Ok(())
    }

    /// Marks an article published as of now.
    pub fn publish(&mut self, id: &str) -> Result<Article> {
        self.update(
            id,
            ArticlePatch {
                status: Some(ArticleStatus::Published),
                published_at: Some(Utc::now()),
                ..ArticlePatch::default()
            },
        )
    }

    pub fn unpublish(&mut self, id: &str) -> Result<Article> {
        self.update(id, ArticlePatch::status(ArticleStatus::Draft))
    }

    /// Copies an article into a new draft. Counters start at zero.
    pub fn duplicate(&mut self, id: &str) -> Result<Article> {
        let original = self.find(id)?;
        let title = format!("{}{}", original.title, self.options.defaults.duplicate_suffix);
        let copy = self.create(NewArticle {
            title,
            description: original.description,
            content: Some(original.content),
            url: Some(original.url),
            image: Some(original.image),
            source: Some(original.source),
            category: Some(original.category),
            status: Some(ArticleStatus::Draft),
            published_at: Some(original.published_at),
        })?;
        debug!(from = id, to = %copy.id, "article duplicated");
        Ok(copy)
    }

    /// Copies every published article into the snapshot slot read by the
    /// public feed, and returns the matching feed document. Later article
    /// writes keep the slot current.
    pub fn publish_snapshot(&mut self) -> Result<FeedDocument> {
        let published = self.list(&ArticleFilter::status(ArticleStatus::Published))?.data;
        self.save(Slot::Snapshot, &published)?;
        info!(count = published.len(), "published snapshot refreshed");
        Ok(FeedDocument::new(published))
    }

    /// The last snapshot written by `publish_snapshot`, if any.
    pub fn snapshot(&self) -> Result<Option<Vec<Article>>> {
        self.load(Slot::Snapshot)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::{StoreLimits, StoreOptions};
    use crate::MemorySlots;

    fn empty_store() -> RecordStore {
        RecordStore::open(
            MemorySlots::new(),
            StoreOptions {
                seed_welcome: false,
                ..StoreOptions::default()
            },
        )
        .unwrap()
    }

    fn new_article(title: &str) -> NewArticle {
        NewArticle {
            title: title.into(),
            description: "Una descripción suficiente".into(),
            ..NewArticle::default()
        }
    }

    #[test]
    fn create_fills_defaults() {
        let mut store = empty_store();
        let article = store
            .create(NewArticle {
                source: Some("".into()),
                ..new_article("Primera nota")
            })
            .unwrap();

        assert_eq!(article.content, article.description);
        assert_eq!(article.url, "#");
        assert_eq!(article.source, "ELONCE");
        assert_eq!(article.category, "general");
        assert_eq!(article.status, ArticleStatus::Published);
        assert_eq!(article.views, 0);
        assert_eq!(article.created_at, article.updated_at);
    }

    #[test]
    fn get_by_id_counts_views() {
        let mut store = empty_store();
        let id = store.create(new_article("Con vistas")).unwrap().id;

        store.get_by_id(&id).unwrap();
        let second = store.get_by_id(&id).unwrap();
        assert_eq!(second.views, 2);
        assert_eq!(store.find(&id).unwrap().views, 2);
    }

    #[test]
    fn unknown_ids_are_not_found() {
        let mut store = empty_store();
        assert!(matches!(store.get_by_id("nope"), Err(StoreError::NotFound(..))));
        assert!(matches!(
            store.update("nope", ArticlePatch::default()),
            Err(StoreError::NotFound(..))
        ));
        assert!(matches!(store.delete("nope"), Err(StoreError::NotFound(..))));
    }

    #[test]
    fn update_keeps_identity_and_bumps_updated_at() {
        let mut store = empty_store();
        let original = store.create(new_article("Antes")).unwrap();
        let updated = store
            .update(
                &original.id,
                ArticlePatch {
                    title: Some("Después".into()),
                    ..ArticlePatch::default()
                },
            )
            .unwrap();

        assert_eq!(updated.id, original.id);
        assert_eq!(updated.created_at, original.created_at);
        assert!(updated.updated_at >= original.updated_at);
        assert_eq!(updated.description, original.description);
    }

    #[test]
    fn duplicate_is_a_fresh_draft() {
        let mut store = empty_store();
        let original = store.create(new_article("Original")).unwrap();
        store.get_by_id(&original.id).unwrap();

        let copy = store.duplicate(&original.id).unwrap();
        assert_ne!(copy.id, original.id);
        assert_eq!(copy.title, "Original (Copia)");
        assert_eq!(copy.status, ArticleStatus::Draft);
        assert_eq!(copy.views, 0);
        assert_eq!(store.find(&original.id).unwrap().views, 1);
    }

    #[test]
    fn publish_and_unpublish_flip_status() {
        let mut store = empty_store();
        let id = store
            .create(NewArticle {
                status: Some(ArticleStatus::Draft),
                ..new_article("Borrador")
            })
            .unwrap()
            .id;

        assert_eq!(store.publish(&id).unwrap().status, ArticleStatus::Published);
        assert_eq!(store.unpublish(&id).unwrap().status, ArticleStatus::Draft);
    }

    #[test]
    fn snapshot_holds_only_published() {
        let mut store = empty_store();
        store.create(new_article("Publicada")).unwrap();
        store
            .create(NewArticle {
                status: Some(ArticleStatus::Draft),
                ..new_article("Borrador")
            })
            .unwrap();

        let doc = store.publish_snapshot().unwrap();
        assert_eq!(doc.version, FeedDocument::VERSION);
        assert_eq!(doc.articles.len(), 1);
        assert_eq!(store.snapshot().unwrap().unwrap().len(), 1);
    }

    fn snapshot_ids(store: &RecordStore) -> Vec<String> {
        let snapshot = store.snapshot().unwrap().unwrap_or_default();
        snapshot.into_iter().map(|a| a.id).collect()
    }

    #[test]
    fn mutations_keep_a_published_snapshot_current() {
        let mut store = empty_store();
        let keep = store.create(new_article("Se queda")).unwrap();
        let hidden = store.create(new_article("Se oculta")).unwrap();
        assert!(store.snapshot().unwrap().is_none());

        store.publish_snapshot().unwrap();
        store.unpublish(&hidden.id).unwrap();
        let ids: Vec<String> = snapshot_ids(&store);
        assert_eq!(ids, [keep.id.clone()]);

        let fresh = store.create(new_article("Recién llegada")).unwrap();
        store.delete(&keep.id).unwrap();
        let ids: Vec<String> = snapshot_ids(&store);
        assert_eq!(ids, [fresh.id]);
    }

    #[test]
    fn article_cap_drops_oldest() {
        let mut store = RecordStore::open(
            MemorySlots::new(),
            StoreOptions {
                seed_welcome: false,
                limits: StoreLimits {
                    max_articles: 2,
                    ..StoreLimits::default()
                },
                ..StoreOptions::default()
            },
        )
        .unwrap();

        let first = store.create(new_article("Uno uno")).unwrap();
        store.create(new_article("Dos dos")).unwrap();
        store.create(new_article("Tres tres")).unwrap();

        assert_eq!(store.list(&ArticleFilter::default()).unwrap().total, 2);
        assert!(store.find(&first.id).is_err());
    }
}
