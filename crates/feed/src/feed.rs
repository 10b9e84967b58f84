//! The community prompt feed: one controller tying query state, the current
//! page, session-local votes, favorites and copy feedback together.

use tracing::{debug, warn};

use crate::api::{Clipboard, PromptApi};
use crate::auth::{GatedAction, require_session};
use crate::clipboard::{CopyFeedback, CopyMark};
use crate::error::{ApiError, FeedError, FeedResult};
use crate::favorites::{FavoriteOutcome, merge_favorite};
use crate::models::{
    Prompt, PromptPage, Query, Session, SortField, SortOrder, VoteDirection,
};
use crate::notice::Notice;
use crate::overlay::VoteOverlay;
use crate::query::{FetchRequest, QueryChange, QueryController};
use crate::store::{FetchOutcome, PromptStore};

/// Result of a favorite gesture. The upvote and the favorite are reported
/// separately since either may fail on its own.
#[derive(Debug)]
pub struct FavoriteReport {
    pub vote: FeedResult<()>,
    pub favorite: FeedResult<FavoriteOutcome>,
}

pub struct CommunityFeed<A, C> {
    api: A,
    clipboard: C,
    query: QueryController,
    store: PromptStore,
    overlay: VoteOverlay,
    copied: CopyFeedback,
    notices: Vec<Notice>,
    login_requested: bool,
}

impl<A: PromptApi, C: Clipboard> CommunityFeed<A, C> {
    pub fn new(api: A, clipboard: C) -> Self {
        Self::with_overlay(api, clipboard, VoteOverlay::new())
    }

    pub fn with_overlay(api: A, clipboard: C, overlay: VoteOverlay) -> Self {
        Self {
            api,
            clipboard,
            query: QueryController::new(),
            store: PromptStore::new(),
            overlay,
            copied: CopyFeedback::new(),
            notices: Vec::new(),
            login_requested: false,
        }
    }

    pub fn api(&self) -> &A {
        &self.api
    }

    pub fn query(&self) -> &Query {
        self.query.query()
    }

    pub fn prompts(&self) -> &[Prompt] {
        self.store.items()
    }

    pub fn total(&self) -> u64 {
        self.store.total()
    }

    pub fn is_loaded(&self) -> bool {
        self.store.is_loaded()
    }

    pub fn page_count(&self) -> u32 {
        self.query().page_count(self.total())
    }

    pub fn displayed_upvotes(&self, prompt: &Prompt) -> u32 {
        self.overlay.displayed_upvotes(prompt)
    }

    pub fn displayed_downvotes(&self, prompt: &Prompt) -> u32 {
        self.overlay.displayed_downvotes(prompt)
    }

    pub fn copied_index(&self) -> Option<usize> {
        self.copied.active_index()
    }

    pub fn take_notices(&mut self) -> Vec<Notice> {
        std::mem::take(&mut self.notices)
    }

    /// Whether the login surface should be opened. Reading resets it.
    pub fn take_login_request(&mut self) -> bool {
        std::mem::take(&mut self.login_requested)
    }

    // ===== Listing =====

    /// Fetch the current query again, e.g. on first display.
    pub async fn refresh(&mut self) -> FetchOutcome {
        let request = self.query.refetch();
        self.run_fetch(request).await
    }

    pub async fn set_page(&mut self, page: u32) -> Option<FetchOutcome> {
        self.change(QueryChange::Page(page)).await
    }

    pub async fn set_sort_field(&mut self, field: SortField) -> Option<FetchOutcome> {
        self.change(QueryChange::SortField(field)).await
    }

    pub async fn set_sort_order(&mut self, order: SortOrder) -> Option<FetchOutcome> {
        self.change(QueryChange::SortOrder(order)).await
    }

    /// Apply a search term. Anonymous visitors are sent to the login surface
    /// and the query is left alone.
    pub async fn search(
        &mut self,
        session: Option<&Session>,
        term: &str,
    ) -> FeedResult<Option<FetchOutcome>> {
        let change = QueryChange::Search(term.to_string());
        let Some(request) = self.begin_fetch(session, change)? else {
            return Ok(None);
        };
        Ok(Some(self.run_fetch(request).await))
    }

    async fn change(&mut self, change: QueryChange) -> Option<FetchOutcome> {
        let request = self.query.apply(&change, self.store.total())?;
        Some(self.run_fetch(request).await)
    }

    /// Update the query and issue its listing without awaiting it. Pair with
    /// [`CommunityFeed::complete_fetch`] once the caller has the result, which
    /// lets several listings be in flight at once.
    pub fn begin_fetch(
        &mut self,
        session: Option<&Session>,
        change: QueryChange,
    ) -> FeedResult<Option<FetchRequest>> {
        if matches!(change, QueryChange::Search(_)) {
            self.gate(session, GatedAction::Search)?;
        }
        Ok(self.query.apply(&change, self.store.total()))
    }

    pub fn complete_fetch(
        &mut self,
        request: &FetchRequest,
        result: Result<PromptPage, ApiError>,
    ) -> FetchOutcome {
        let outcome = self.store.apply(request, result);
        match &outcome {
            FetchOutcome::Empty => self.notices.push(Notice::warning("No data found.")),
            FetchOutcome::Failed(err) => {
                self.notices.push(Notice::error(format!(
                    "Failed to fetch community prompts. Error: {err}"
                )));
            }
            FetchOutcome::Replaced { .. } | FetchOutcome::Stale => {}
        }
        outcome
    }

    async fn run_fetch(&mut self, request: FetchRequest) -> FetchOutcome {
        debug!(
            seq = request.seq,
            page = request.query.page,
            sort = request.query.sort_field.as_str(),
            order = request.query.sort_order.as_str(),
            search = %request.query.search_term,
            "fetching community prompts"
        );
        let result = self.api.fetch_prompts(&request.query).await;
        self.complete_fetch(&request, result)
    }

    // ===== Votes =====

    pub async fn vote(
        &mut self,
        session: Option<&Session>,
        prompt_id: i64,
        direction: VoteDirection,
    ) -> FeedResult<()> {
        self.gate(session, direction.into())?;
        let result = self.api.submit_vote(prompt_id, direction).await;
        self.settle_vote(prompt_id, direction, result)
    }

    fn settle_vote(
        &mut self,
        prompt_id: i64,
        direction: VoteDirection,
        result: Result<(), ApiError>,
    ) -> FeedResult<()> {
        match result {
            Ok(()) => {
                self.overlay.record(prompt_id, direction);
                self.notices.push(Notice::success(format!(
                    "Successfully {}d!",
                    direction.as_str()
                )));
                Ok(())
            }
            Err(source) => {
                warn!(prompt_id, direction = direction.as_str(), "vote failed: {source}");
                self.notices.push(Notice::error(format!(
                    "Failed to {}. Error: {source}",
                    direction.as_str()
                )));
                Err(FeedError::Vote { direction, source })
            }
        }
    }

    // ===== Favorites =====

    /// The heart action: upvote the prompt and add it to favorites. The two
    /// calls run together and neither is rolled back if the other fails.
    pub async fn favorite(
        &mut self,
        session: Option<&mut Session>,
        prompt_id: i64,
    ) -> FeedResult<FavoriteReport> {
        let Some(session) = session else {
            return Err(self.reject(GatedAction::Favorite));
        };

        let (vote, merged) = tokio::join!(
            self.api.submit_vote(prompt_id, VoteDirection::Up),
            merge_favorite(&self.api, session, prompt_id),
        );

        let vote = self.settle_vote(prompt_id, VoteDirection::Up, vote);
        let favorite = match merged {
            Ok(FavoriteOutcome::AlreadyPresent) => Ok(FavoriteOutcome::AlreadyPresent),
            Ok(outcome) => {
                self.notices
                    .push(Notice::success("Added to favorites successfully!"));
                Ok(outcome)
            }
            Err(err) => {
                warn!(prompt_id, "favorite failed: {err}");
                self.notices.push(Notice::error(format!(
                    "Failed to add to favorites. Error: {err}"
                )));
                Err(FeedError::Favorite(err))
            }
        };

        Ok(FavoriteReport { vote, favorite })
    }

    // ===== Clipboard =====

    /// Copy the description shown at `index` on the current page.
    pub fn copy(&mut self, index: usize) -> Option<CopyMark> {
        let prompt = self.store.get(index)?;
        if let Err(err) = self.clipboard.write_text(&prompt.description) {
            debug!(index, "clipboard write failed: {err}");
        }
        Some(self.copied.mark(index))
    }

    /// Called when a copy timer fires.
    pub fn expire_copy(&mut self, mark: CopyMark) -> bool {
        self.copied.clear(mark)
    }

    // ===== Auth =====

    fn gate(&mut self, session: Option<&Session>, action: GatedAction) -> FeedResult<()> {
        match require_session(session, action) {
            Ok(_) => Ok(()),
            Err(_) => Err(self.reject(action)),
        }
    }

    fn reject(&mut self, action: GatedAction) -> FeedError {
        debug!(action = action.verb(), "blocked anonymous action");
        self.login_requested = true;
        self.notices.push(Notice::warning(action.login_warning()));
        FeedError::AuthRequired(action)
    }
}
