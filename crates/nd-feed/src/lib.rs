//! # nd-feed
//!
//! The public site's feed: a chain of sources tried in order, normalization
//! of whatever they return, and client-side filtering.

pub mod item;
pub mod loader;
pub mod sources;
pub mod view;

pub use item::{FeedDefaults, FeedItem, PLACEHOLDER_IMAGE};
pub use loader::{FeedLoad, FeedLoader, FeedLocations};
pub use sources::{FallbackSource, FileSource, SnapshotSource};
#[cfg(feature = "http")]
pub use sources::HttpSource;
pub use view::{FeedView, GENERAL};
