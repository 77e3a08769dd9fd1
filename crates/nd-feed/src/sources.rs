//! The sources a `FeedLoader` can chain.

use async_trait::async_trait;
use chrono::{Duration, Utc};
use nd_core::traits::{FeedSource, SlotStore};
use nd_core::{FeedArticle, Slot};
use serde::Deserialize;
use std::io::ErrorKind;
use std::path::PathBuf;
use std::sync::Arc;

/// `{ "articles": [...] }`, the envelope shared by the feed document, the
/// static data file and headline APIs.
#[derive(Debug, Default, Deserialize)]
struct Envelope {
    #[serde(default)]
    articles: Vec<FeedArticle>,
}

/// Reads the published snapshot the record store writes.
pub struct SnapshotSource {
    slots: Arc<dyn SlotStore>,
}

impl SnapshotSource {
    pub fn new(slots: Arc<dyn SlotStore>) -> Self {
        Self { slots }
    }
}

#[async_trait]
impl FeedSource for SnapshotSource {
    fn name(&self) -> &str {
        "snapshot"
    }

    async fn fetch(&self) -> anyhow::Result<Option<Vec<FeedArticle>>> {
        let Some(raw) = self.slots.read(Slot::Snapshot.key())? else {
            return Ok(None);
        };
        Ok(Some(serde_json::from_str(&raw)?))
    }
}

/// A JSON file on disk holding an `articles` array.
pub struct FileSource {
    name: String,
    path: PathBuf,
}

impl FileSource {
    pub fn new(name: impl Into<String>, path: impl Into<PathBuf>) -> Self {
        Self {
            name: name.into(),
            path: path.into(),
        }
    }
}

#[async_trait]
impl FeedSource for FileSource {
    fn name(&self) -> &str {
        &self.name
    }

    async fn fetch(&self) -> anyhow::Result<Option<Vec<FeedArticle>>> {
        let raw = match tokio::fs::read_to_string(&self.path).await {
            Ok(raw) => raw,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };
        let envelope: Envelope = serde_json::from_str(&raw)?;
        Ok(Some(envelope.articles))
    }
}

/// Headline API returning `{ "articles": [...] }`.
#[cfg(feature = "http")]
pub struct HttpSource {
    client: reqwest::Client,
    url: String,
    token: Option<secrecy::SecretString>,
}

#[cfg(feature = "http")]
impl HttpSource {
    pub fn new(url: impl Into<String>, token: Option<secrecy::SecretString>) -> Self {
        Self {
            client: reqwest::Client::new(),
            url: url.into(),
            token,
        }
    }
}

#[cfg(feature = "http")]
#[async_trait]
impl FeedSource for HttpSource {
    fn name(&self) -> &str {
        "api"
    }

    async fn fetch(&self) -> anyhow::Result<Option<Vec<FeedArticle>>> {
        use secrecy::ExposeSecret;

        let mut request = self.client.get(&self.url);
        if let Some(token) = &self.token {
            request = request.query(&[("token", token.expose_secret())]);
        }
        let envelope: Envelope = request.send().await?.error_for_status()?.json().await?;
        Ok(Some(envelope.articles))
    }
}

/// Built-in entries shown when nothing else is available.
pub struct FallbackSource;

const FALLBACK: [(&str, &str, &str, &str); 5] = [
    (
        "auto-1",
        "Portal de Noticias Profesional - Sistema Automático",
        "El sistema de noticias automáticas está funcionando correctamente. Cuando no hay noticias cargadas desde el panel de administración, se muestran estas noticias de respaldo.",
        "general",
    ),
    (
        "auto-2",
        "Funcionalidad de CMS Implementada",
        "El panel de administración permite cargar, editar y eliminar noticias. Las noticias del CMS tienen prioridad sobre las automáticas.",
        "tecnologia",
    ),
    (
        "auto-3",
        "Radio en Vivo Disponible",
        "El reproductor de radio está integrado y funcional. Puedes escuchar la transmisión en vivo desde cualquier dispositivo.",
        "entretenimiento",
    ),
    (
        "auto-4",
        "Diseño Responsive y Profesional",
        "El portal está optimizado para todos los dispositivos con un diseño moderno y profesional que se adapta automáticamente.",
        "tecnologia",
    ),
    (
        "auto-5",
        "Sistema de Comentarios Activo",
        "Los usuarios pueden comentar en las noticias, dar likes y respuestas. El sistema incluye moderación automática.",
        "social",
    ),
];

#[async_trait]
impl FeedSource for FallbackSource {
    fn name(&self) -> &str {
        "fallback"
    }

    async fn fetch(&self) -> anyhow::Result<Option<Vec<FeedArticle>>> {
        let now = Utc::now();
        let articles = FALLBACK
            .iter()
            .zip(1i64..)
            .map(|(&(id, title, description, category), n)| FeedArticle {
                id: Some(id.into()),
                title: Some(title.to_string()),
                description: Some(description.to_string()),
                url: Some("#".to_string()),
                image: None,
                source: Some("Sistema Automático".into()),
                published_at: Some(now - Duration::minutes(5 * n)),
                category: Some(category.to_string()),
            })
            .collect();
        Ok(Some(articles))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nd_core::MemorySlots;

    #[tokio::test]
    async fn missing_file_is_empty_not_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let source = FileSource::new("shared", dir.path().join("cms-news.json"));
        assert!(source.fetch().await.unwrap().is_none());
    }

    #[tokio::test]
    async fn malformed_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("data.json");
        std::fs::write(&path, "{ nope").unwrap();
        assert!(FileSource::new("local", path).fetch().await.is_err());
    }

    #[tokio::test]
    async fn snapshot_reads_the_slot() {
        let slots = Arc::new(MemorySlots::new());
        let source = SnapshotSource::new(slots.clone());
        assert!(source.fetch().await.unwrap().is_none());

        slots
            .write("published_snapshot", r#"[{"id":"a","title":"T","description":"D"}]"#)
            .unwrap();
        let articles = source.fetch().await.unwrap().unwrap();
        assert_eq!(articles.len(), 1);
        assert_eq!(articles[0].id_label().as_deref(), Some("a"));
    }

    #[tokio::test]
    async fn fallback_is_newest_first() {
        let articles = FallbackSource.fetch().await.unwrap().unwrap();
        assert_eq!(articles.len(), 5);
        assert!(articles
            .windows(2)
            .all(|pair| pair[0].published_at > pair[1].published_at));
    }
}
