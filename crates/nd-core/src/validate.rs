//! Form checks run by front ends before calling the store.
//! The store itself accepts whatever it is given.

use crate::error::StoreError;
use crate::models::NewArticle;

pub const MIN_TITLE_CHARS: usize = 5;
pub const MIN_DESCRIPTION_CHARS: usize = 10;

/// Collects every problem with `article` instead of stopping at the first.
pub fn new_article(article: &NewArticle) -> Vec<String> {
    let mut errors = Vec::new();

    if article.title.trim().chars().count() < MIN_TITLE_CHARS {
        errors.push(format!(
            "title must be at least {MIN_TITLE_CHARS} characters"
        ));
    }
    if article.description.trim().chars().count() < MIN_DESCRIPTION_CHARS {
        errors.push(format!(
            "description must be at least {MIN_DESCRIPTION_CHARS} characters"
        ));
    }
    if let Some(image) = non_blank(&article.image) {
        if url::Url::parse(image).is_err() {
            errors.push("image URL is not valid".to_string());
        }
    }
    if let Some(link) = non_blank(&article.url) {
        if url::Url::parse(link).is_err() {
            errors.push("article URL is not valid".to_string());
        }
    }

    errors
}

/// `new_article` folded into a single `ValidationError`.
pub fn ensure_new_article(article: &NewArticle) -> Result<(), StoreError> {
    let errors = new_article(article);
    if errors.is_empty() {
        Ok(())
    } else {
        Err(StoreError::ValidationError(errors.join(", ")))
    }
}

fn non_blank(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}
