//! Durable client-local record of which notifications have been shown.
//!
//! One JSON file per `(user, event, subject)` key:
//!
//! ```text
//! {base_dir}/{user_id}/{event}-{subject}.json
//! ```
//!
//! The ledger is the sole owner of "has this been shown" state. Reads are
//! fail-open: a missing, unreadable, or corrupted file counts as "never
//! shown", so a broken entry re-surfaces a notification instead of silently
//! swallowing it. Writes go through a `.tmp` sibling and a rename. There is
//! no cross-process coordination; two concurrent sessions for the same user
//! may each decide to show the same notice, which is accepted.

use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::config::NotifyConfig;

/// Errors from ledger writes. Reads never fail; see the module docs.
#[derive(Debug, thiserror::Error)]
pub enum LedgerError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serde(#[from] serde_json::Error),

    #[error("could not determine a data directory for the ledger")]
    NoDataDir,
}

/// Kinds of one-shot events the ledger records.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum NoticeEvent {
    /// A ban dialog was acknowledged. Subject: the user id.
    BanShown,
    /// An unban dialog was acknowledged. Subject: the user id.
    UnbanShown,
    /// A review moderation outcome was acknowledged. Subject: the review id.
    ReviewStatusShown,
    /// Companion marker: this user has been observed banned and has not yet
    /// acknowledged the matching unban. Subject: the user id.
    WasBanned,
}

impl NoticeEvent {
    fn file_stem(self) -> &'static str {
        match self {
            NoticeEvent::BanShown => "ban_shown",
            NoticeEvent::UnbanShown => "unban_shown",
            NoticeEvent::ReviewStatusShown => "review_status_shown",
            NoticeEvent::WasBanned => "was_banned",
        }
    }
}

/// Value stored per key.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct LedgerEntry {
    /// When the notice was acknowledged (or, for markers, observed).
    pub shown_at: DateTime<Utc>,

    /// Ban/unban date of the subject at the time of showing. Used to detect
    /// a newer occurrence of the same event for the same subject.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subject_timestamp: Option<DateTime<Utc>>,
}

impl LedgerEntry {
    /// Entry acknowledged now, carrying the subject's own timestamp.
    pub fn now(subject_timestamp: Option<DateTime<Utc>>) -> Self {
        Self {
            shown_at: Utc::now(),
            subject_timestamp,
        }
    }
}

/// File-backed notification ledger.
pub struct NotificationLedger {
    base_dir: PathBuf,
}

impl NotificationLedger {
    /// Open the ledger at the directory the config resolves to (XDG data
    /// dir by default).
    pub fn open(config: &NotifyConfig) -> Result<Self, LedgerError> {
        Self::with_base_dir(config.resolve_ledger_dir().ok_or(LedgerError::NoDataDir)?)
    }

    /// Open the ledger at an explicit directory (used by tests).
    pub fn with_base_dir(base_dir: PathBuf) -> Result<Self, LedgerError> {
        std::fs::create_dir_all(&base_dir)?;
        Ok(Self { base_dir })
    }

    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    fn entry_path(&self, user_id: &str, event: NoticeEvent, subject: &str) -> PathBuf {
        self.base_dir
            .join(sanitize(user_id))
            .join(format!("{}-{}.json", event.file_stem(), sanitize(subject)))
    }

    /// Read an entry. Any failure (missing file, unreadable, corrupted
    /// JSON) is reported as absent so the notification fails open.
    pub fn get(&self, user_id: &str, event: NoticeEvent, subject: &str) -> Option<LedgerEntry> {
        let path = self.entry_path(user_id, event, subject);
        let data = match std::fs::read_to_string(&path) {
            Ok(data) => data,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return None,
            Err(e) => {
                tracing::warn!("Ledger read failed for {}: {e}", path.display());
                return None;
            }
        };
        match serde_json::from_str(&data) {
            Ok(entry) => Some(entry),
            Err(e) => {
                tracing::warn!(
                    "Corrupted ledger entry at {}, treating as absent: {e}",
                    path.display()
                );
                None
            }
        }
    }

    pub fn contains(&self, user_id: &str, event: NoticeEvent, subject: &str) -> bool {
        self.get(user_id, event, subject).is_some()
    }

    /// Write (or overwrite) an entry atomically.
    pub fn put(
        &self,
        user_id: &str,
        event: NoticeEvent,
        subject: &str,
        entry: &LedgerEntry,
    ) -> Result<(), LedgerError> {
        let path = self.entry_path(user_id, event, subject);
        if let Some(dir) = path.parent() {
            std::fs::create_dir_all(dir)?;
        }
        let json = serde_json::to_string_pretty(entry)?;
        atomic_write(&path, json.as_bytes())?;
        Ok(())
    }

    /// Remove an entry. Removing an absent entry is a success.
    pub fn remove(
        &self,
        user_id: &str,
        event: NoticeEvent,
        subject: &str,
    ) -> Result<(), LedgerError> {
        let path = self.entry_path(user_id, event, subject);
        match std::fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

/// Atomically write `data` to `path` via a `.tmp` sibling.
fn atomic_write(path: &Path, data: &[u8]) -> Result<(), LedgerError> {
    let tmp = path.with_extension("tmp");
    std::fs::write(&tmp, data)?;
    std::fs::rename(&tmp, path)?;
    Ok(())
}

/// Ids come from an external store; keep them filesystem-safe.
fn sanitize(component: &str) -> String {
    component
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.') {
                c
            } else {
                '_'
            }
        })
        .collect()
}
