//! Category and search filtering over a loaded feed.

use crate::item::FeedItem;

/// Category that shows the whole feed.
pub const GENERAL: &str = "general";

/// Words that pull an item into a category even when it is filed elsewhere.
fn keywords(category: &str) -> &'static [&'static str] {
    match category {
        "parana" => &["paraná", "parana", "local", "ciudad"],
        "politica" => &["política", "politica", "gobierno", "elecciones"],
        "deportes" => &["deporte", "fútbol", "futbol", "equipo"],
        "economia" => &["economía", "economia", "dinero", "precio"],
        "sociedad" => &["sociedad", "social", "comunidad"],
        "internacionales" => &["internacional", "mundo", "global"],
        "policiales" => &["policial", "crimen", "delito"],
        "espectaculos" => &["espectáculo", "espectaculo", "show", "artista"],
        "tecnologia" => &["tecnología", "tecnologia", "digital", "app"],
        _ => &[],
    }
}

pub struct FeedView<'a> {
    items: &'a [FeedItem],
}

impl<'a> FeedView<'a> {
    pub fn new(items: &'a [FeedItem]) -> Self {
        Self { items }
    }

    pub fn by_category(&self, category: &str) -> Vec<&'a FeedItem> {
        let category = category.to_lowercase();
        if category == GENERAL {
            return self.items.iter().collect();
        }
        let words = keywords(&category);
        self.items
            .iter()
            .filter(|item| {
                if item.category.to_lowercase() == category {
                    return true;
                }
                let text =
                    format!("{} {} {}", item.title, item.description, item.source).to_lowercase();
                words.iter().any(|w| text.contains(w))
            })
            .collect()
    }

    /// Blank queries match everything.
    pub fn search(&self, query: &str) -> Vec<&'a FeedItem> {
        let query = query.trim().to_lowercase();
        if query.is_empty() {
            return self.items.iter().collect();
        }
        self.items
            .iter()
            .filter(|item| {
                format!(
                    "{} {} {} {}",
                    item.title, item.description, item.source, item.category
                )
                .to_lowercase()
                .contains(&query)
            })
            .collect()
    }
}
