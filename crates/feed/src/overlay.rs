use std::collections::{HashSet, VecDeque};

use crate::models::{Prompt, VoteDirection};

/// Ids voted on in one direction, oldest first.
#[derive(Debug, Default)]
struct VotedIds {
    order: VecDeque<i64>,
    members: HashSet<i64>,
}

impl VotedIds {
    fn insert(&mut self, id: i64, cap: Option<usize>) -> bool {
        if !self.members.insert(id) {
            return false;
        }
        self.order.push_back(id);
        if let Some(cap) = cap {
            while self.order.len() > cap {
                if let Some(oldest) = self.order.pop_front() {
                    self.members.remove(&oldest);
                }
            }
        }
        true
    }

    fn contains(&self, id: i64) -> bool {
        self.members.contains(&id)
    }
}

/// Session-local record of votes cast, layered over the stored counts.
///
/// Up and down marks are tracked independently; recording one never clears
/// the other.
#[derive(Debug, Default)]
pub struct VoteOverlay {
    up: VotedIds,
    down: VotedIds,
    cap: Option<usize>,
}

impl VoteOverlay {
    pub fn new() -> Self {
        Self::default()
    }

    /// Keep at most `cap` ids per direction, evicting the oldest. A cap of
    /// zero would forget every vote at once and is treated as unbounded.
    pub fn with_cap(cap: Option<usize>) -> Self {
        Self {
            cap: cap.filter(|&cap| cap > 0),
            ..Self::default()
        }
    }

    /// Returns false when the id was already recorded for `direction`.
    pub fn record(&mut self, prompt_id: i64, direction: VoteDirection) -> bool {
        match direction {
            VoteDirection::Up => self.up.insert(prompt_id, self.cap),
            VoteDirection::Down => self.down.insert(prompt_id, self.cap),
        }
    }

    pub fn has_voted(&self, prompt_id: i64, direction: VoteDirection) -> bool {
        match direction {
            VoteDirection::Up => self.up.contains(prompt_id),
            VoteDirection::Down => self.down.contains(prompt_id),
        }
    }

    pub fn displayed_upvotes(&self, prompt: &Prompt) -> u32 {
        prompt.upvotes + u32::from(self.up.contains(prompt.id))
    }

    pub fn displayed_downvotes(&self, prompt: &Prompt) -> u32 {
        prompt.downvotes + u32::from(self.down.contains(prompt.id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn prompt(id: i64, upvotes: u32, downvotes: u32) -> Prompt {
        Prompt {
            id,
            title: "t".into(),
            description: "d".into(),
            remark: None,
            notes: None,
            owner: "o".into(),
            upvotes,
            downvotes,
        }
    }

    #[test]
    fn repeated_vote_counts_once() {
        let mut overlay = VoteOverlay::new();
        let p = prompt(5, 10, 2);

        assert!(overlay.record(5, VoteDirection::Up));
        assert!(!overlay.record(5, VoteDirection::Up));

        assert_eq!(overlay.displayed_upvotes(&p), 11);
        assert_eq!(overlay.displayed_downvotes(&p), 2);
    }

    #[test]
    fn directions_do_not_exclude_each_other() {
        let mut overlay = VoteOverlay::new();
        let p = prompt(5, 0, 0);

        overlay.record(5, VoteDirection::Up);
        overlay.record(5, VoteDirection::Down);

        assert_eq!(overlay.displayed_upvotes(&p), 1);
        assert_eq!(overlay.displayed_downvotes(&p), 1);
    }

    #[test]
    fn base_record_is_not_mutated() {
        let mut overlay = VoteOverlay::new();
        let p = prompt(1, 3, 0);
        overlay.record(1, VoteDirection::Up);
        assert_eq!(p.upvotes, 3);
    }

    #[test]
    fn cap_evicts_oldest() {
        let mut overlay = VoteOverlay::with_cap(Some(2));
        overlay.record(1, VoteDirection::Up);
        overlay.record(2, VoteDirection::Up);
        overlay.record(3, VoteDirection::Up);

        assert!(!overlay.has_voted(1, VoteDirection::Up));
        assert!(overlay.has_voted(2, VoteDirection::Up));
        assert!(overlay.has_voted(3, VoteDirection::Up));
    }

    #[test]
    fn zero_cap_still_shows_the_vote() {
        let mut overlay = VoteOverlay::with_cap(Some(0));
        let p = prompt(1, 10, 0);

        assert!(overlay.record(1, VoteDirection::Up));
        assert_eq!(overlay.displayed_upvotes(&p), 11);
    }
}
