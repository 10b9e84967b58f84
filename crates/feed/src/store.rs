use tracing::{debug, error, info};

use crate::error::ApiError;
use crate::models::{Prompt, PromptPage};
use crate::query::FetchRequest;

/// What applying a listing result did to the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchOutcome {
    Replaced { count: usize, total: u64 },
    /// The listing succeeded with no matches.
    Empty,
    /// The listing failed; the previous page is still shown.
    Failed(ApiError),
    /// A newer request already landed.
    Stale,
}

/// The current page of prompts.
#[derive(Debug, Default)]
pub struct PromptStore {
    items: Vec<Prompt>,
    total: u64,
    loaded: bool,
    applied_seq: u64,
}

impl PromptStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn items(&self) -> &[Prompt] {
        &self.items
    }

    pub fn get(&self, index: usize) -> Option<&Prompt> {
        self.items.get(index)
    }

    pub fn total(&self) -> u64 {
        self.total
    }

    /// False until a listing first succeeds.
    pub fn is_loaded(&self) -> bool {
        self.loaded
    }

    /// Apply a listing result. Responses older than the last one settled,
    /// successful or not, are dropped so the most recently issued query wins.
    pub fn apply(
        &mut self,
        request: &FetchRequest,
        result: Result<PromptPage, ApiError>,
    ) -> FetchOutcome {
        if request.seq < self.applied_seq {
            debug!(
                seq = request.seq,
                applied = self.applied_seq,
                "dropping stale listing response"
            );
            return FetchOutcome::Stale;
        }

        match result {
            Ok(page) if page.items.is_empty() => {
                self.applied_seq = request.seq;
                self.loaded = true;
                self.items.clear();
                self.total = 0;
                info!(page = request.query.page, "listing returned no prompts");
                FetchOutcome::Empty
            }
            Ok(page) => {
                self.applied_seq = request.seq;
                self.loaded = true;
                let count = page.items.len();
                self.items = page.items;
                self.total = page.total;
                FetchOutcome::Replaced {
                    count,
                    total: self.total,
                }
            }
            Err(err) => {
                self.applied_seq = request.seq;
                error!("Failed to fetch community prompts: {err}");
                FetchOutcome::Failed(err)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Query;

    fn prompt(id: i64) -> Prompt {
        Prompt {
            id,
            title: format!("Prompt {id}"),
            description: format!("Body {id}"),
            remark: None,
            notes: None,
            owner: "ann".to_string(),
            upvotes: 0,
            downvotes: 0,
        }
    }

    fn request(seq: u64) -> FetchRequest {
        FetchRequest {
            seq,
            query: Query::default(),
        }
    }

    #[test]
    fn success_replaces_items_and_total() {
        let mut store = PromptStore::new();
        assert!(!store.is_loaded());

        let outcome = store.apply(
            &request(1),
            Ok(PromptPage {
                items: vec![prompt(1), prompt(2)],
                total: 40,
            }),
        );

        assert_eq!(outcome, FetchOutcome::Replaced { count: 2, total: 40 });
        assert_eq!(store.items().len(), 2);
        assert_eq!(store.total(), 40);
        assert!(store.is_loaded());
    }

    #[test]
    fn failure_keeps_previous_page() {
        let mut store = PromptStore::new();
        store.apply(
            &request(1),
            Ok(PromptPage {
                items: vec![prompt(1)],
                total: 13,
            }),
        );

        let outcome = store.apply(&request(2), Err(ApiError::Network("reset".into())));

        assert!(matches!(outcome, FetchOutcome::Failed(_)));
        assert_eq!(store.items(), &[prompt(1)]);
        assert_eq!(store.total(), 13);
    }

    #[test]
    fn empty_clears_items() {
        let mut store = PromptStore::new();
        store.apply(
            &request(1),
            Ok(PromptPage {
                items: vec![prompt(1)],
                total: 1,
            }),
        );

        let outcome = store.apply(
            &request(2),
            Ok(PromptPage {
                items: vec![],
                total: 99,
            }),
        );

        assert_eq!(outcome, FetchOutcome::Empty);
        assert!(store.items().is_empty());
        assert_eq!(store.total(), 0);
    }

    #[test]
    fn older_response_resolving_late_is_dropped() {
        let mut store = PromptStore::new();
        store.apply(
            &request(2),
            Ok(PromptPage {
                items: vec![prompt(2)],
                total: 2,
            }),
        );

        let outcome = store.apply(
            &request(1),
            Ok(PromptPage {
                items: vec![prompt(1)],
                total: 1,
            }),
        );

        assert_eq!(outcome, FetchOutcome::Stale);
        assert_eq!(store.items(), &[prompt(2)]);
    }

    #[test]
    fn newer_failure_still_fences_older_success() {
        let mut store = PromptStore::new();
        store.apply(&request(2), Err(ApiError::Network("timeout".into())));

        let outcome = store.apply(
            &request(1),
            Ok(PromptPage {
                items: vec![prompt(1)],
                total: 1,
            }),
        );

        assert_eq!(outcome, FetchOutcome::Stale);
        assert!(store.items().is_empty());
        assert!(!store.is_loaded());
    }
}
