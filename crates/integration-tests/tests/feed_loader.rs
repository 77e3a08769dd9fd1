use integration_tests::{fake_article, memory_store};
use nd_core::{ArticleStatus, FeedDocument, NewArticle, SlotStore};
use nd_feed::{FeedDefaults, FeedLoader, FeedLocations, FeedView, PLACEHOLDER_IMAGE};
use std::sync::Arc;

#[tokio::test]
async fn snapshot_wins_once_published() {
    let (mut store, slots) = memory_store();
    let published = store.create(fake_article()).unwrap();
    store
        .create(NewArticle {
            status: Some(ArticleStatus::Draft),
            ..fake_article()
        })
        .unwrap();
    store.publish_snapshot().unwrap();

    let loader = FeedLoader::standard(slots, FeedLocations::default(), FeedDefaults::default());
    let load = loader.load().await.unwrap();

    assert_eq!(load.origin, "snapshot");
    assert_eq!(load.items.len(), 1);
    assert_eq!(load.items[0].id, published.id);
}

#[tokio::test]
async fn unpublished_and_deleted_articles_leave_the_feed() {
    let (mut store, slots) = memory_store();
    let stays = store.create(fake_article()).unwrap();
    let goes = store.create(fake_article()).unwrap();
    store.publish_snapshot().unwrap();

    store.unpublish(&goes.id).unwrap();
    let loader = FeedLoader::standard(slots, FeedLocations::default(), FeedDefaults::default());
    let load = loader.load().await.unwrap();
    let ids: Vec<String> = load.items.into_iter().map(|i| i.id).collect();
    assert_eq!(ids, [stays.id.clone()]);

    store.publish(&goes.id).unwrap();
    store.delete(&stays.id).unwrap();
    let load = loader.load().await.unwrap();
    assert_eq!(load.origin, "snapshot");
    let ids: Vec<String> = load.items.into_iter().map(|i| i.id).collect();
    assert_eq!(ids, [goes.id]);
}

#[tokio::test]
async fn shared_file_is_next_in_line() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("cms-news.json");

    let (mut store, _) = memory_store();
    store.create(fake_article()).unwrap();
    let doc = store.publish_snapshot().unwrap();
    std::fs::write(&path, serde_json::to_string_pretty(&doc).unwrap()).unwrap();

    let empty_backend = Arc::new(nd_core::MemorySlots::new());
    let loader = FeedLoader::standard(
        empty_backend,
        FeedLocations {
            shared_file: Some(path),
            local_data: Some(dir.path().join("data.json")),
            ..FeedLocations::default()
        },
        FeedDefaults::default(),
    );
    let load = loader.load().await.unwrap();

    assert_eq!(load.origin, "shared-file");
    assert_eq!(load.items[0].title, doc.articles[0].title);
    assert_eq!(doc.version, FeedDocument::VERSION);
}

#[tokio::test]
async fn invalid_entries_fall_through_to_local_data() {
    let dir = tempfile::tempdir().unwrap();
    let shared = dir.path().join("cms-news.json");
    let local = dir.path().join("data.json");
    std::fs::write(&shared, r#"{"articles":[{"title":"  ","description":"x"}]}"#).unwrap();
    std::fs::write(
        &local,
        r#"{"articles":[{"id":7,"title":"Titular","description":"Bajada","source":{"name":"Agencia"}}]}"#,
    )
    .unwrap();

    let loader = FeedLoader::standard(
        Arc::new(nd_core::MemorySlots::new()),
        FeedLocations {
            shared_file: Some(shared),
            local_data: Some(local),
            ..FeedLocations::default()
        },
        FeedDefaults::default(),
    );
    let load = loader.load().await.unwrap();

    assert_eq!(load.origin, "local-data");
    let item = &load.items[0];
    assert_eq!(item.id, "7");
    assert_eq!(item.source, "Agencia");
    assert_eq!(item.url, "#");
    assert_eq!(item.image, PLACEHOLDER_IMAGE);
}

#[tokio::test]
async fn corrupt_snapshot_is_skipped_for_fallback() {
    let slots = Arc::new(nd_core::MemorySlots::new());
    slots.write("published_snapshot", "{{{").unwrap();

    let loader = FeedLoader::standard(slots, FeedLocations::default(), FeedDefaults::default());
    assert_eq!(loader.source_names(), ["snapshot", "fallback"]);

    let load = loader.load().await.unwrap();
    assert_eq!(load.origin, "fallback");

    let view = FeedView::new(&load.items);
    assert_eq!(view.by_category("general").len(), 5);
    assert_eq!(view.by_category("tecnologia").len(), 2);
    assert_eq!(view.search("radio").len(), 1);
}
