//! Client-side state for the community prompt feed.
//!
//! The feed keeps a page of prompts fetched from a remote store, layers
//! session-local vote marks over the stored counts, merges favorites into the
//! visitor's collection and tracks "copied" feedback. Remote calls go through
//! the [`PromptApi`] trait so any transport can back it.

pub mod api;
pub mod auth;
pub mod clipboard;
pub mod error;
pub mod favorites;
pub mod feed;
pub mod models;
pub mod notice;
pub mod overlay;
pub mod query;
pub mod store;

pub use api::{Clipboard, PromptApi};
pub use auth::GatedAction;
pub use clipboard::{COPY_FEEDBACK_DELAY, CopyMark, schedule_clear};
pub use error::{ApiError, ClipboardError, FeedError, FeedResult};
pub use favorites::FavoriteOutcome;
pub use feed::{CommunityFeed, FavoriteReport};
pub use models::{
    FavoritesCollection, NOTES_PREVIEW_CHARS, PAGE_SIZE, Prompt, PromptPage, Query, Session,
    SortField, SortOrder, VoteDirection, truncate,
};
pub use notice::{Notice, NoticeLevel};
pub use overlay::VoteOverlay;
pub use query::{FetchRequest, QueryChange};
pub use store::FetchOutcome;
