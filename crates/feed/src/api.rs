//! Contracts for the remote prompt store and the system clipboard.

use std::sync::Arc;

use async_trait::async_trait;

use crate::error::{ApiError, ClipboardError};
use crate::models::{PromptPage, Query, VoteDirection};

#[async_trait]
pub trait PromptApi: Send + Sync {
    /// List one page of prompts for the given query.
    async fn fetch_prompts(&self, query: &Query) -> Result<PromptPage, ApiError>;

    async fn submit_vote(&self, prompt_id: i64, direction: VoteDirection) -> Result<(), ApiError>;

    /// Create a favorites collection and return its identifier.
    async fn create_favorites(&self, prompt_ids: &[i64], community: bool) -> Result<i64, ApiError>;

    /// Replace the ids stored under an existing collection.
    async fn update_favorites(
        &self,
        collection_id: i64,
        prompt_ids: &[i64],
        community: bool,
    ) -> Result<(), ApiError>;
}

pub trait Clipboard: Send + Sync {
    fn write_text(&self, text: &str) -> Result<(), ClipboardError>;
}

impl<T: Clipboard + ?Sized> Clipboard for Arc<T> {
    fn write_text(&self, text: &str) -> Result<(), ClipboardError> {
        (**self).write_text(text)
    }
}
