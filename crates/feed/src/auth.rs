use crate::error::FeedError;
use crate::models::{Session, VoteDirection};

/// Actions that need a logged in visitor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GatedAction {
    Search,
    Upvote,
    Downvote,
    Favorite,
}

impl GatedAction {
    pub fn verb(&self) -> &'static str {
        match self {
            GatedAction::Search => "search",
            GatedAction::Upvote => "upvote",
            GatedAction::Downvote => "downvote",
            GatedAction::Favorite => "bookmark",
        }
    }

    /// Warning shown when the action is attempted anonymously.
    pub fn login_warning(&self) -> &'static str {
        match self {
            GatedAction::Search => "Please log in to search.",
            GatedAction::Upvote | GatedAction::Downvote => "Please log in to vote.",
            GatedAction::Favorite => "Please log in to bookmark.",
        }
    }
}

impl From<VoteDirection> for GatedAction {
    fn from(direction: VoteDirection) -> Self {
        match direction {
            VoteDirection::Up => GatedAction::Upvote,
            VoteDirection::Down => GatedAction::Downvote,
        }
    }
}

pub fn require_session(
    session: Option<&Session>,
    action: GatedAction,
) -> Result<&Session, FeedError> {
    session.ok_or(FeedError::AuthRequired(action))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn anonymous_visitor_is_rejected() {
        let err = require_session(None, GatedAction::Search).unwrap_err();
        assert_eq!(err, FeedError::AuthRequired(GatedAction::Search));
        assert_eq!(err.to_string(), "login required to search");
    }

    #[test]
    fn session_passes_through() {
        let session = Session::new("token", "ann");
        let passed = require_session(Some(&session), GatedAction::Favorite).unwrap();
        assert_eq!(passed.username, "ann");
    }

    #[test]
    fn both_vote_directions_share_a_warning() {
        assert_eq!(
            GatedAction::from(VoteDirection::Down).login_warning(),
            GatedAction::Upvote.login_warning()
        );
    }
}
