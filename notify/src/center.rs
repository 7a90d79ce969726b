//! Orchestration facade over the three watchers.
//!
//! Owns one shared ledger and enforces the one-modal-at-a-time rule with
//! priority ban > unban > review status. The host calls [`NotificationCenter::evaluate`]
//! on every pushed identity or review-list change and renders whichever
//! notice comes back; acknowledgments go to the individual watchers.

use std::sync::Arc;

use crescendo_protocol::{CurrentUser, ReviewSummary};

use crate::ban::{BanNotice, BanWatcher};
use crate::config::NotifyConfig;
use crate::ledger::{LedgerError, NotificationLedger};
use crate::review_status::{ReviewNotice, ReviewStatusWatcher};
use crate::sources::{ProfileSource, ReviewReadSink};
use crate::unban::{UnbanNotice, UnbanWatcher};

/// The single notice the host should display, if any.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    Ban(BanNotice),
    Unban(UnbanNotice),
    ReviewStatus(ReviewNotice),
}

pub struct NotificationCenter {
    ban: BanWatcher,
    unban: UnbanWatcher,
    review_status: ReviewStatusWatcher,
}

impl NotificationCenter {
    /// Build a center over the ledger directory the config resolves to.
    pub fn new(
        config: &NotifyConfig,
        profiles: Arc<dyn ProfileSource>,
        on_read: Arc<dyn ReviewReadSink>,
    ) -> Result<Self, LedgerError> {
        let ledger = Arc::new(NotificationLedger::open(config)?);
        Ok(Self::with_ledger(ledger, profiles, on_read))
    }

    /// Build a center over an already-opened ledger (used by tests).
    pub fn with_ledger(
        ledger: Arc<NotificationLedger>,
        profiles: Arc<dyn ProfileSource>,
        on_read: Arc<dyn ReviewReadSink>,
    ) -> Self {
        Self {
            ban: BanWatcher::new(Arc::clone(&ledger), Arc::clone(&profiles)),
            unban: UnbanWatcher::new(Arc::clone(&ledger), profiles),
            review_status: ReviewStatusWatcher::new(ledger, on_read),
        }
    }

    /// Re-run all watchers against the current pushed state. At most one
    /// notice is returned; ban outranks unban outranks review status.
    pub async fn evaluate(
        &self,
        user: Option<&CurrentUser>,
        reviews: &[ReviewSummary],
    ) -> Option<Notice> {
        if let Some(notice) = self.ban.on_user_state(user).await {
            return Some(Notice::Ban(notice));
        }
        if let Some(notice) = self.unban.on_user_state(user).await {
            return Some(Notice::Unban(notice));
        }
        self.review_status.sync(user, reviews);
        self.review_status.current().map(Notice::ReviewStatus)
    }

    pub fn ban(&self) -> &BanWatcher {
        &self.ban
    }

    pub fn unban(&self) -> &UnbanWatcher {
        &self.unban
    }

    pub fn review_status(&self) -> &ReviewStatusWatcher {
        &self.review_status
    }
}
