//! Unban watcher: mirror of the ban watcher for the transition out of a
//! ban.
//!
//! Gated on the `WasBanned` marker the ban watcher records: without it the
//! account was never observed banned, no profile fetch happens, and no
//! dialog is offered. Acknowledging the dialog deletes the marker, closing
//! the cycle so a later ban→unban pair is detected fresh.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, PoisonError};

use chrono::{DateTime, Utc};
use crescendo_protocol::CurrentUser;

use crate::ban::newer_than_last_shown;
use crate::ledger::{LedgerEntry, LedgerError, NoticeEvent, NotificationLedger};
use crate::sources::ProfileSource;

/// Displayable content of an unban dialog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnbanNotice {
    pub reason: Option<String>,
    /// Reason of the ban the account was released from, for context.
    pub last_ban_reason: Option<String>,
    pub date: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone)]
struct PendingAck {
    user_id: String,
    unban_date: Option<DateTime<Utc>>,
}

pub struct UnbanWatcher {
    ledger: Arc<NotificationLedger>,
    profiles: Arc<dyn ProfileSource>,
    epoch: AtomicU64,
    showing: Mutex<Option<PendingAck>>,
}

impl UnbanWatcher {
    pub fn new(ledger: Arc<NotificationLedger>, profiles: Arc<dyn ProfileSource>) -> Self {
        Self {
            ledger,
            profiles,
            epoch: AtomicU64::new(0),
            showing: Mutex::new(None),
        }
    }

    /// Re-evaluate against a freshly pushed identity snapshot.
    pub async fn on_user_state(&self, user: Option<&CurrentUser>) -> Option<UnbanNotice> {
        let epoch = self.epoch.fetch_add(1, Ordering::SeqCst) + 1;

        let Some(user) = user.filter(|u| !u.is_banned) else {
            self.clear();
            return None;
        };

        // Never-banned users skip the fetch entirely.
        if !self
            .ledger
            .contains(&user.id, NoticeEvent::WasBanned, &user.id)
        {
            self.clear();
            return None;
        }

        let profile = match self.profiles.fetch_ban_profile(&user.id).await {
            Ok(profile) => profile,
            Err(e) => {
                tracing::warn!("Unban profile fetch failed for {}: {e}", user.id);
                return None;
            }
        };

        if self.epoch.load(Ordering::SeqCst) != epoch {
            tracing::debug!("Discarding stale unban evaluation for {}", user.id);
            return None;
        }

        let last = self
            .ledger
            .get(&user.id, NoticeEvent::UnbanShown, &user.id);
        if !newer_than_last_shown(profile.unban_date, last.as_ref()) {
            tracing::debug!("Unban for {} already acknowledged, not re-showing", user.id);
            self.clear();
            return None;
        }

        *self.lock_showing() = Some(PendingAck {
            user_id: user.id.clone(),
            unban_date: profile.unban_date,
        });
        Some(UnbanNotice {
            reason: profile.unban_reason,
            last_ban_reason: profile.last_ban_reason,
            date: profile.unban_date,
        })
    }

    /// The user dismissed the dialog. Records the acknowledgment and
    /// deletes the `WasBanned` marker; this delete is what prevents
    /// duplicate unban dialogs across sessions once acknowledged.
    pub fn acknowledge(&self) -> Result<(), LedgerError> {
        let Some(pending) = self.lock_showing().take() else {
            return Ok(());
        };
        self.ledger.put(
            &pending.user_id,
            NoticeEvent::UnbanShown,
            &pending.user_id,
            &LedgerEntry::now(pending.unban_date),
        )?;
        self.ledger
            .remove(&pending.user_id, NoticeEvent::WasBanned, &pending.user_id)
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
