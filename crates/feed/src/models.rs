use serde::{Deserialize, Deserializer, Serialize};

/// Number of prompts shown on one page of the feed.
pub const PAGE_SIZE: u32 = 12;

/// Characters of a prompt's notes shown in the hover detail.
pub const NOTES_PREVIEW_CHARS: usize = 300;

// ===== Prompts =====

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Prompt {
    pub id: i64,
    pub title: String,
    /// The text a visitor copies.
    pub description: String,
    #[serde(default)]
    pub remark: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
    pub owner: String,
    #[serde(default, deserialize_with = "null_as_zero")]
    pub upvotes: u32,
    #[serde(default, deserialize_with = "null_as_zero")]
    pub downvotes: u32,
}

fn null_as_zero<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<u32>::deserialize(deserializer)?.unwrap_or(0))
}

/// One page of prompts as returned by the listing call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PromptPage {
    pub items: Vec<Prompt>,
    pub total: u64,
}

// ===== Query =====

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum SortField {
    #[default]
    #[serde(rename = "id")]
    Recency,
    #[serde(rename = "upvoteDifference")]
    UpvoteMargin,
}

impl SortField {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortField::Recency => "id",
            SortField::UpvoteMargin => "upvoteDifference",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            SortField::Recency => "Published",
            SortField::UpvoteMargin => "Upvotes",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum SortOrder {
    #[serde(rename = "asc")]
    Ascending,
    #[default]
    #[serde(rename = "desc")]
    Descending,
}

impl SortOrder {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortOrder::Ascending => "asc",
            SortOrder::Descending => "desc",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            SortOrder::Ascending => "Ascending",
            SortOrder::Descending => "Descending",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Query {
    pub page: u32,
    pub page_size: u32,
    pub sort_field: SortField,
    pub sort_order: SortOrder,
    /// Empty means no filter.
    pub search_term: String,
}

impl Default for Query {
    fn default() -> Self {
        Self {
            page: 1,
            page_size: PAGE_SIZE,
            sort_field: SortField::default(),
            sort_order: SortOrder::default(),
            search_term: String::new(),
        }
    }
}

impl Query {
    /// Number of pages needed to show `total` prompts.
    pub fn page_count(&self, total: u64) -> u32 {
        let size = u64::from(self.page_size.max(1));
        total.div_ceil(size).min(u64::from(u32::MAX)) as u32
    }
}

// ===== Votes =====

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum VoteDirection {
    #[serde(rename = "upvote")]
    Up,
    #[serde(rename = "downvote")]
    Down,
}

impl VoteDirection {
    pub fn as_str(&self) -> &'static str {
        match self {
            VoteDirection::Up => "upvote",
            VoteDirection::Down => "downvote",
        }
    }
}

// ===== Session & favorites =====

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FavoritesCollection {
    pub id: i64,
    /// Insertion ordered, no duplicates.
    pub prompt_ids: Vec<i64>,
}

/// An authenticated visitor. Passed explicitly to every gated action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub token: String,
    pub username: String,
    pub favorites: Option<FavoritesCollection>,
}

impl Session {
    pub fn new(token: impl Into<String>, username: impl Into<String>) -> Self {
        Self {
            token: token.into(),
            username: username.into(),
            favorites: None,
        }
    }

    pub fn with_favorites(mut self, favorites: FavoritesCollection) -> Self {
        self.favorites = Some(favorites);
        self
    }
}

pub fn truncate(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((cut, _)) => format!("{}...", &text[..cut]),
        None => text.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn page_count_rounds_up() {
        let query = Query::default();
        assert_eq!(query.page_count(0), 0);
        assert_eq!(query.page_count(12), 1);
        assert_eq!(query.page_count(13), 2);
        assert_eq!(query.page_count(40), 4);
    }

    #[test]
    fn prompt_with_null_votes_reads_as_zero() {
        let prompt: Prompt = serde_json::from_value(serde_json::json!({
            "id": 3,
            "title": "Poet",
            "description": "Write a haiku",
            "remark": null,
            "owner": "ann",
            "upvotes": null
        }))
        .unwrap();

        assert_eq!(prompt.upvotes, 0);
        assert_eq!(prompt.downvotes, 0);
        assert_eq!(prompt.notes, None);
    }

    #[test]
    fn prompt_missing_title_is_rejected() {
        let result: Result<Prompt, _> = serde_json::from_value(serde_json::json!({
            "id": 3,
            "description": "Write a haiku",
            "owner": "ann"
        }));
        assert!(result.is_err());
    }

    #[test]
    fn truncate_counts_characters() {
        assert_eq!(truncate("short", 10), "short");
        assert_eq!(truncate("abcdef", 3), "abc...");
        assert_eq!(truncate("提示词很长", 2), "提示...");
    }

    #[test]
    fn wire_names() {
        assert_eq!(SortField::UpvoteMargin.as_str(), "upvoteDifference");
        assert_eq!(SortOrder::Descending.as_str(), "desc");
        assert_eq!(
            serde_json::to_string(&VoteDirection::Down).unwrap(),
            "\"downvote\""
        );
    }
}
