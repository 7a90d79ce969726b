//! Review moderation state as supplied by the host's review list.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum ReviewStatus {
    Pending,
    Approved,
    Rejected,
}

impl ReviewStatus {
    /// Terminal outcomes are the ones the notification subsystem reports;
    /// a pending review never notifies.
    pub fn is_terminal(self) -> bool {
        matches!(self, ReviewStatus::Approved | ReviewStatus::Rejected)
    }
}

/// One review as it appears in the current user's review list.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ReviewSummary {
    /// Opaque unique identifier.
    pub id: String,

    pub status: ReviewStatus,

    pub album: String,
    pub artist: String,

    /// Present only when `status` is `Rejected`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reject_reason: Option<String>,
}
