use anyhow::Context;
use clap::Subcommand;
use nd_config::AppConfig;
use nd_core::traits::SlotStore;
use nd_core::{
    validate, ArticleFilter, ArticlePatch, ArticleStatus, Bundle, EventContext, FeedDocument,
    NewArticle, NewComment, NewReply, Outcome, Reaction, RecordStore, SettingsPatch,
};
use nd_feed::{FeedDefaults, FeedLoader, FeedLocations, FeedView};
use serde::Serialize;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::info;

#[derive(Debug, Subcommand)]
pub enum Command {
    /// List articles, newest first.
    List {
        #[arg(long)]
        category: Option<String>,
        #[arg(long)]
        status: Option<ArticleStatus>,
        #[arg(long)]
        search: Option<String>,
        #[arg(long)]
        limit: Option<usize>,
        #[arg(long)]
        offset: Option<usize>,
    },
    /// Show one article (counts as a view).
    Show { id: String },
    /// Create an article.
    Create {
        #[command(flatten)]
        fields: ArticleArgs,
        /// Save as draft instead of publishing
        #[arg(long)]
        draft: bool,
        /// Skip the length and URL checks
        #[arg(long)]
        force: bool,
    },
    /// Change some fields of an article.
    Update {
        id: String,
        #[command(flatten)]
        fields: ArticleArgs,
        #[arg(long)]
        status: Option<ArticleStatus>,
    },
    Publish { id: String },
    Unpublish { id: String },
    /// Copy an article into a new draft.
    Duplicate { id: String },
    Delete { id: String },
    /// Dashboard counters.
    Stats,
    /// List comments, optionally for one article.
    Comments {
        #[arg(long)]
        article: Option<String>,
    },
    /// Comment on an article.
    Comment {
        article_id: String,
        content: String,
        #[arg(long)]
        author: Option<String>,
    },
    /// Reply to a comment.
    Reply {
        comment_id: String,
        content: String,
        #[arg(long)]
        author: Option<String>,
    },
    /// Like (or dislike) a comment.
    React {
        comment_id: String,
        #[arg(long)]
        dislike: bool,
    },
    /// Record an analytics event.
    Track {
        kind: String,
        /// JSON payload
        #[arg(long, default_value = "{}")]
        data: String,
    },
    /// Show the analytics log and counters.
    Analytics,
    #[command(subcommand)]
    Settings(SettingsCommand),
    /// Write a backup bundle to a file, or stdout.
    Export {
        #[arg(long)]
        output: Option<PathBuf>,
    },
    /// Restore the sections present in a backup bundle.
    Import { path: PathBuf },
    /// Wipe everything and seed defaults again.
    Reset {
        #[arg(long)]
        yes: bool,
    },
    /// Publish the snapshot and write the shared feed document.
    Sync {
        /// Overrides `feed.shared_file`
        #[arg(long)]
        output: Option<PathBuf>,
    },
    /// Load the public feed the way the site does.
    Feed {
        #[arg(long, default_value = nd_feed::GENERAL)]
        category: String,
        #[arg(long)]
        search: Option<String>,
    },
}

#[derive(Debug, Subcommand)]
pub enum SettingsCommand {
    Show,
    /// Merge a JSON object into the stored settings.
    Set { patch: String },
}

#[derive(Debug, Default, clap::Args)]
pub struct ArticleArgs {
    #[arg(long)]
    title: Option<String>,
    #[arg(long)]
    description: Option<String>,
    #[arg(long)]
    content: Option<String>,
    #[arg(long)]
    url: Option<String>,
    #[arg(long)]
    image: Option<String>,
    #[arg(long)]
    source: Option<String>,
    #[arg(long)]
    category: Option<String>,
}

/// Runs one command and prints its outcome as JSON. Returns whether it succeeded.
pub async fn run(
    cmd: Command,
    config: AppConfig,
    slots: Arc<dyn SlotStore>,
) -> anyhow::Result<bool> {
    let mut options = config.store_options();
    options.event_context = EventContext {
        user_agent: Some(format!("newsdesk/{}", env!("CARGO_PKG_VERSION"))),
        location: Some("cli".to_string()),
    };
    let mut store = RecordStore::open(slots.clone(), options)?;

    match cmd {
        Command::List {
            category,
            status,
            search,
            limit,
            offset,
        } => {
            let filter = ArticleFilter {
                category,
                status,
                search,
                limit,
                offset,
            };
            emit(&Outcome::from_page(store.list(&filter)))
        }
        Command::Show { id } => emit(&Outcome::from_result(store.get_by_id(&id), "")),
        Command::Create {
            fields,
            draft,
            force,
        } => {
            let article = NewArticle {
                title: fields.title.unwrap_or_default(),
                description: fields.description.unwrap_or_default(),
                content: fields.content,
                url: fields.url,
                image: fields.image,
                source: fields.source,
                category: fields.category,
                status: draft.then_some(ArticleStatus::Draft),
                published_at: None,
            };
            let result = if force {
                Ok(())
            } else {
                validate::ensure_new_article(&article)
            };
            let result = result.and_then(|()| store.create(article));
            emit(&Outcome::from_result(result, "Article created"))
        }
        Command::Update { id, fields, status } => {
            let patch = ArticlePatch {
                title: fields.title,
                description: fields.description,
                content: fields.content,
                url: fields.url,
                image: fields.image,
                source: fields.source,
                category: fields.category,
                status,
                ..ArticlePatch::default()
            };
            emit(&Outcome::from_result(store.update(&id, patch), "Article updated"))
        }
        Command::Publish { id } => emit(&Outcome::from_result(store.publish(&id), "Article published")),
        Command::Unpublish { id } => {
            emit(&Outcome::from_result(store.unpublish(&id), "Article unpublished"))
        }
        Command::Duplicate { id } => {
            emit(&Outcome::from_result(store.duplicate(&id), "Article duplicated"))
        }
        Command::Delete { id } => emit(&Outcome::from_result(store.delete(&id), "Article deleted")),
        Command::Stats => emit(&Outcome::from_result(store.stats(), "")),
        Command::Comments { article } => emit(&Outcome::ok(store.comments(article.as_deref()))),
        Command::Comment {
            article_id,
            content,
            author,
        } => {
            let comment = NewComment {
                article_id,
                author,
                content,
            };
            emit(&Outcome::from_result(store.add_comment(comment), "Comment added"))
        }
        Command::Reply {
            comment_id,
            content,
            author,
        } => {
            let reply = NewReply { author, content };
            emit(&Outcome::from_result(store.add_reply(&comment_id, reply), "Reply added"))
        }
        Command::React {
            comment_id,
            dislike,
        } => {
            let reaction = if dislike {
                Reaction::Dislike
            } else {
                Reaction::Like
            };
            emit(&Outcome::from_result(store.react(&comment_id, reaction), ""))
        }
        Command::Track { kind, data } => {
            let data: serde_json::Value =
                serde_json::from_str(&data).context("--data is not valid JSON")?;
            emit(&Outcome::from_result(store.track_event(&kind, data), ""))
        }
        Command::Analytics => emit(&Outcome::ok(store.analytics())),
        Command::Settings(SettingsCommand::Show) => emit(&Outcome::ok(store.settings())),
        Command::Settings(SettingsCommand::Set { patch }) => {
            let patch: SettingsPatch =
                serde_json::from_str(&patch).context("settings patch is not a JSON object")?;
            emit(&Outcome::from_result(store.set_settings(patch), "Settings saved"))
        }
        Command::Export { output } => {
            let bundle = store.export_all()?;
            let json = serde_json::to_string_pretty(&bundle)?;
            match output {
                Some(path) => {
                    tokio::fs::write(&path, json)
                        .await
                        .with_context(|| format!("writing {}", path.display()))?;
                    info!(path = %path.display(), "bundle exported");
                    emit(&Outcome::ok(path).with_message("Data exported"))
                }
                None => {
                    println!("{json}");
                    Ok(true)
                }
            }
        }
        Command::Import { path } => {
            let raw = tokio::fs::read_to_string(&path)
                .await
                .with_context(|| format!("reading {}", path.display()))?;
            let bundle: Bundle = serde_json::from_str(&raw).context("not a backup bundle")?;
            emit(&Outcome::from_result(store.import_all(bundle), "Data imported"))
        }
        Command::Reset { yes } => {
            if !yes {
                return emit(&Outcome::<()>::failed("refusing to reset without --yes"));
            }
            emit(&Outcome::from_result(store.clear_all(), "All data cleared"))
        }
        Command::Sync { output } => {
            let doc = store.publish_snapshot()?;
            let path = output.unwrap_or_else(|| config.feed.shared_file.clone());
            write_feed_document(&path, &doc).await?;
            emit(&Outcome::ok(doc.articles.len()).with_message(format!(
                "Feed written to {}",
                path.display()
            )))
        }
        Command::Feed { category, search } => {
            feed(config, slots, &category, search.as_deref()).await
        }
    }
}

async fn feed(
    config: AppConfig,
    slots: Arc<dyn SlotStore>,
    category: &str,
    search: Option<&str>,
) -> anyhow::Result<bool> {
    let AppConfig { feed, defaults, .. } = config;
    let locations = FeedLocations {
        shared_file: Some(feed.shared_file),
        local_data: Some(feed.local_data),
        #[cfg(feature = "http")]
        api: feed.api_url.map(|url| (url, feed.api_token)),
        ..FeedLocations::default()
    };
    let defaults = FeedDefaults {
        source: defaults.source,
        category: defaults.category,
        ..FeedDefaults::default()
    };

    let Some(load) = FeedLoader::standard(slots, locations, defaults).load().await else {
        return emit(&Outcome::<()>::failed("no feed source produced articles"));
    };
    let view = FeedView::new(&load.items);
    let items = match search {
        Some(query) => view.search(query),
        None => view.by_category(category),
    };
    emit(&Outcome::ok(items).with_message(format!("from {}", load.origin)))
}

/// Saves the feed document as pretty JSON, creating parent directories.
pub async fn write_feed_document(path: &Path, doc: &FeedDocument) -> anyhow::Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        tokio::fs::create_dir_all(parent).await?;
    }
    let json = serde_json::to_string_pretty(doc)?;
    tokio::fs::write(path, json)
        .await
        .with_context(|| format!("writing {}", path.display()))?;
    info!(path = %path.display(), articles = doc.articles.len(), "feed document written");
    Ok(())
}

fn emit<T: Serialize>(outcome: &Outcome<T>) -> anyhow::Result<bool> {
    println!("{}", serde_json::to_string_pretty(outcome)?);
    Ok(outcome.success)
}
