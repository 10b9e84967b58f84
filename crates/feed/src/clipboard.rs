use std::time::Duration;

use tokio::sync::mpsc::UnboundedSender;
use tokio::task::JoinHandle;

/// How long the "copied" marker stays up.
pub const COPY_FEEDBACK_DELAY: Duration = Duration::from_millis(2000);

/// Identifies one copy action. Two copies of the same index get distinct marks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CopyMark {
    pub index: usize,
    generation: u64,
}

/// Tracks which position on the page was just copied.
#[derive(Debug, Default)]
pub struct CopyFeedback {
    active: Option<CopyMark>,
    generation: u64,
}

impl CopyFeedback {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark `index` as copied, replacing any previous mark.
    pub fn mark(&mut self, index: usize) -> CopyMark {
        self.generation += 1;
        let mark = CopyMark {
            index,
            generation: self.generation,
        };
        self.active = Some(mark);
        mark
    }

    /// Clear `mark` if it is still the active one. Returns whether it was.
    pub fn clear(&mut self, mark: CopyMark) -> bool {
        if self.active == Some(mark) {
            self.active = None;
            true
        } else {
            false
        }
    }

    pub fn active_index(&self) -> Option<usize> {
        self.active.map(|mark| mark.index)
    }
}

/// Send `mark` back on `tx` once `delay` has passed.
pub fn schedule_clear(
    mark: CopyMark,
    delay: Duration,
    tx: UnboundedSender<CopyMark>,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        tokio::time::sleep(delay).await;
        // The receiver is gone when the view has shut down.
        let _ = tx.send(mark);
    })
}
