//! Review status watcher: queues unacknowledged terminal moderation
//! outcomes for the current user's reviews and surfaces them one at a time.
//!
//! The queue is recomputed from scratch every time the host's review list
//! changes; already-acknowledged reviews stay excluded via the ledger's
//! presence check. Administrators author moderation decisions and never
//! receive them, so the watcher is suppressed entirely for the admin role.

use std::sync::{Arc, Mutex, PoisonError};

use crescendo_protocol::{CurrentUser, ReviewStatus, ReviewSummary};

use crate::ledger::{LedgerEntry, LedgerError, NoticeEvent, NotificationLedger};
use crate::sources::ReviewReadSink;

/// One review-status notice. `position`/`total` back the "i of N" counter
/// the host renders when more than one outcome is pending.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReviewNotice {
    pub review_id: String,
    pub album: String,
    pub artist: String,
    pub status: ReviewStatus,
    pub reject_reason: Option<String>,
    /// 1-based position in the current queue.
    pub position: usize,
    pub total: usize,
}

/// How the user acknowledged the current notice.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReviewAck {
    /// "Next"/"close": record and move on.
    Dismiss,
    /// "View review": record, move on, and navigate to the review.
    View,
}

#[derive(Default)]
struct QueueState {
    user_id: Option<String>,
    queue: Vec<ReviewSummary>,
    cursor: usize,
}

pub struct ReviewStatusWatcher {
    ledger: Arc<NotificationLedger>,
    on_read: Arc<dyn ReviewReadSink>,
    state: Mutex<QueueState>,
}

impl ReviewStatusWatcher {
    pub fn new(ledger: Arc<NotificationLedger>, on_read: Arc<dyn ReviewReadSink>) -> Self {
        Self {
            ledger,
            on_read,
            state: Mutex::new(QueueState::default()),
        }
    }

    /// Recompute the queue from the host's current review list. Order is
    /// kept as received; the cursor restarts at the front.
    pub fn sync(&self, user: Option<&CurrentUser>, reviews: &[ReviewSummary]) {
        let mut state = self.lock_state();

        let Some(user) = user.filter(|u| !u.role.is_admin()) else {
            *state = QueueState::default();
            return;
        };

        state.queue = reviews
            .iter()
            .filter(|review| {
                review.status.is_terminal()
                    && !self
                        .ledger
                        .contains(&user.id, NoticeEvent::ReviewStatusShown, &review.id)
            })
            .cloned()
            .collect();
        state.user_id = Some(user.id.clone());
        state.cursor = 0;
    }

    /// The notice at the cursor, if the queue is non-empty.
    pub fn current(&self) -> Option<ReviewNotice> {
        let state = self.lock_state();
        let review = state.queue.get(state.cursor)?;
        Some(ReviewNotice {
            review_id: review.id.clone(),
            album: review.album.clone(),
            artist: review.artist.clone(),
            status: review.status,
            reject_reason: review.reject_reason.clone(),
            position: state.cursor + 1,
            total: state.queue.len(),
        })
    }

    /// Acknowledge the current notice: record it in the ledger, fire the
    /// host's `review_read` hook exactly once, and advance. Returns the
    /// review id to navigate to when the acknowledgment was a `View`.
    pub fn acknowledge(&self, ack: ReviewAck) -> Result<Option<String>, LedgerError> {
        let mut state = self.lock_state();
        let Some(user_id) = state.user_id.clone() else {
            return Ok(None);
        };
        let Some(review) = state.queue.get(state.cursor) else {
            return Ok(None);
        };
        let review_id = review.id.clone();

        self.ledger.put(
            &user_id,
            NoticeEvent::ReviewStatusShown,
            &review_id,
            &LedgerEntry::now(None),
        )?;
        self.on_read.review_read(&review_id);

        if state.cursor + 1 < state.queue.len() {
            state.cursor += 1;
        } else {
            // Queue exhausted: close and reset.
            state.queue.clear();
            state.cursor = 0;
        }

        Ok(match ack {
            ReviewAck::View => Some(review_id),
            ReviewAck::Dismiss => None,
        })
    }

    /// Notices not yet acknowledged in the current queue.
    pub fn remaining(&self) -> usize {
        let state = self.lock_state();
        state.queue.len().saturating_sub(state.cursor)
    }

    fn lock_state(&self) -> std::sync::MutexGuard<'_, QueueState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
