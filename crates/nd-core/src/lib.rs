//! newsdesk/crates/nd-core/src/lib.rs
//!
//! The central domain logic and interface definitions for Newsdesk.

pub mod error;
pub mod models;
pub mod outcome;
pub mod query;
pub mod settings;
pub mod slots;
pub mod store;
pub mod traits;
pub mod validate;

// Re-exporting for easier access in other crates
pub use error::{Result, StoreError};
pub use models::*;
pub use outcome::{Outcome, PageInfo};
pub use query::{ArticleFilter, ArticlePage, ALL_CATEGORIES};
pub use settings::{Settings, SettingsPatch};
pub use slots::{MemorySlots, Slot};
pub use store::{
    ArticleDefaults, Bundle, ImportReport, RecordStore, StoreLimits, StoreOptions,
    WELCOME_ARTICLE_ID,
};
pub use traits::*;
