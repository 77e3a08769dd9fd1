//! # Outcome envelope
//!
//! The uniform `{success, data?, error?, message?}` shape front ends consume.
//! Store operations return `Result`; this is only the wire rendering of one.

use crate::error::Result;
use crate::models::Article;
use crate::query::ArticlePage;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Outcome<T> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    /// Only set for article listings
    #[serde(flatten)]
    pub page: Option<PageInfo>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PageInfo {
    pub total: usize,
    pub filtered: usize,
}

impl<T> Outcome<T> {
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
            message: None,
            page: None,
        }
    }

    pub fn failed(error: impl ToString) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(error.to_string()),
            message: None,
            page: None,
        }
    }

    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    /// Renders a store result; a non-empty `message` is attached on success only.
    pub fn from_result(result: Result<T>, message: &str) -> Self {
        match result {
            Ok(data) if message.is_empty() => Self::ok(data),
            Ok(data) => Self::ok(data).with_message(message),
            Err(err) => Self::failed(err),
        }
    }
}

impl Outcome<Vec<Article>> {
    /// Listing envelope: failures still carry an empty `data` array.
    pub fn from_page(result: Result<ArticlePage>) -> Self {
        match result {
            Ok(page) => Self {
                page: Some(PageInfo {
                    total: page.total,
                    filtered: page.filtered,
                }),
                ..Self::ok(page.data)
            },
            Err(err) => Self {
                data: Some(Vec::new()),
                ..Self::failed(err)
            },
        }
    }
}
