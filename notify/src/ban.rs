//! Ban watcher: surfaces a one-shot dialog when the signed-in account is
//! observed banned.
//!
//! State machine over `{NotShowing, Showing}` per current user. The trigger
//! is the pushed identity snapshot carrying `is_banned = true` (including at
//! initial load). Dismissal is the only affordance the dialog offers; the
//! account stays restricted either way.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, PoisonError};

use chrono::{DateTime, Utc};
use crescendo_protocol::CurrentUser;

use crate::ledger::{LedgerEntry, LedgerError, NoticeEvent, NotificationLedger};
use crate::sources::ProfileSource;

/// Displayable content of a ban dialog. Absent fields degrade the dialog,
/// never block it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BanNotice {
    pub reason: Option<String>,
    pub date: Option<DateTime<Utc>>,
}

/// What `acknowledge` needs to record once the dialog is dismissed.
#[derive(Debug, Clone)]
struct PendingAck {
    user_id: String,
    ban_date: Option<DateTime<Utc>>,
}

pub struct BanWatcher {
    ledger: Arc<NotificationLedger>,
    profiles: Arc<dyn ProfileSource>,
    /// Evaluation epoch; bumped on every pushed state so a fetch that
    /// completes after a newer evaluation began is discarded.
    epoch: AtomicU64,
    showing: Mutex<Option<PendingAck>>,
}

impl BanWatcher {
    pub fn new(ledger: Arc<NotificationLedger>, profiles: Arc<dyn ProfileSource>) -> Self {
        Self {
            ledger,
            profiles,
            epoch: AtomicU64::new(0),
            showing: Mutex::new(None),
        }
    }

    /// Re-evaluate against a freshly pushed identity snapshot. Returns the
    /// dialog to display, if any.
    pub async fn on_user_state(&self, user: Option<&CurrentUser>) -> Option<BanNotice> {
        let epoch = self.epoch.fetch_add(1, Ordering::SeqCst) + 1;

        let Some(user) = user.filter(|u| u.is_banned) else {
            self.clear();
            return None;
        };

        // Record the ban cycle before anything can fail: the unban watcher
        // keys off this marker, and it must exist even when the profile
        // fetch below fails or the dialog is suppressed.
        if let Err(e) = self.ledger.put(
            &user.id,
            NoticeEvent::WasBanned,
            &user.id,
            &LedgerEntry::now(None),
        ) {
            tracing::warn!("Failed to record was-banned marker for {}: {e}", user.id);
        }

        let profile = match self.profiles.fetch_ban_profile(&user.id).await {
            Ok(profile) => profile,
            Err(e) => {
                tracing::warn!("Ban profile fetch failed for {}: {e}", user.id);
                return None;
            }
        };

        if self.epoch.load(Ordering::SeqCst) != epoch {
            tracing::debug!("Discarding stale ban evaluation for {}", user.id);
            return None;
        }

        let last = self
            .ledger
            .get(&user.id, NoticeEvent::BanShown, &user.id);
        if !newer_than_last_shown(profile.ban_date, last.as_ref()) {
            tracing::debug!("Ban for {} already acknowledged, not re-showing", user.id);
            self.clear();
            return None;
        }

        *self.lock_showing() = Some(PendingAck {
            user_id: user.id.clone(),
            ban_date: profile.ban_date,
        });
        Some(BanNotice {
            reason: profile.ban_reason,
            date: profile.ban_date,
        })
    }

    /// The user dismissed the dialog. Records the acknowledgment so the
    /// same ban never re-surfaces.
    pub fn acknowledge(&self) -> Result<(), LedgerError> {
        let Some(pending) = self.lock_showing().take() else {
            return Ok(());
        };
        self.ledger.put(
            &pending.user_id,
            NoticeEvent::BanShown,
            &pending.user_id,
            &LedgerEntry::now(pending.ban_date),
        )
    }

    pub fn is_showing(&self) -> bool {
        self.lock_showing().is_some()
    }

    fn clear(&self) {
        *self.lock_showing() = None;
    }

    fn lock_showing(&self) -> std::sync::MutexGuard<'_, Option<PendingAck>> {
        self.showing.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Pure display decision shared with the unban watcher: show when nothing
/// was ever acknowledged for this subject, or when the subject carries a
/// strictly later timestamp than the acknowledged one. Equal timestamps do
/// not re-trigger, and an undated occurrence never supersedes an
/// acknowledged entry.
pub(crate) fn newer_than_last_shown(
    current: Option<DateTime<Utc>>,
    last: Option<&LedgerEntry>,
) -> bool {
    let Some(last) = last else {
        return true;
    };
    match (current, last.subject_timestamp) {
        (Some(current), Some(shown)) => current > shown,
        // A dated occurrence after an undated acknowledgment is new
        // evidence; show it.
        (Some(_), None) => true,
        (None, _) => false,
    }
}
