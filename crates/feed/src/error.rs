use thiserror::Error;

use crate::auth::GatedAction;
use crate::models::VoteDirection;

/// Failure of a call to a remote collaborator.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    #[error("network error: {0}")]
    Network(String),

    #[error("HTTP {status}: {message}")]
    Status { status: u16, message: String },

    #[error("unexpected response: {0}")]
    Parse(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("clipboard unavailable: {0}")]
pub struct ClipboardError(pub String);

/// Errors surfaced by feed actions. All of them are recovered in place.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FeedError {
    #[error("login required to {}", .0.verb())]
    AuthRequired(GatedAction),

    #[error("failed to {}: {source}", direction.as_str())]
    Vote {
        direction: VoteDirection,
        source: ApiError,
    },

    #[error("failed to add to favorites: {0}")]
    Favorite(ApiError),
}

pub type FeedResult<T> = std::result::Result<T, FeedError>;
