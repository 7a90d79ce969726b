//! Account-facing types: the pushed identity snapshot and the ban/unban
//! metadata fetched from the profile store.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "snake_case")]
pub enum UserRole {
    #[default]
    User,
    Admin,
}

impl UserRole {
    pub fn is_admin(self) -> bool {
        self == UserRole::Admin
    }
}

/// Snapshot of the signed-in account, pushed by the identity provider on
/// every change (including the initial load).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CurrentUser {
    /// Opaque stable identifier assigned by the identity provider.
    pub id: String,

    /// Authoritative current ban state.
    pub is_banned: bool,

    #[serde(default)]
    pub role: UserRole,
}

impl CurrentUser {
    pub fn new(id: impl Into<String>, is_banned: bool, role: UserRole) -> Self {
        Self {
            id: id.into(),
            is_banned,
            role,
        }
    }
}

/// Ban/unban metadata for one account, fetched on demand from the profile
/// document. All fields besides `is_banned` are optional: the store only
/// carries them while the corresponding state (or its history) exists.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct BanProfile {
    pub is_banned: bool,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ban_reason: Option<String>,

    /// RFC3339 timestamp of the ban currently in effect.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ban_date: Option<DateTime<Utc>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unban_reason: Option<String>,

    /// Reason of the ban the account was most recently released from.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_ban_reason: Option<String>,

    /// RFC3339 timestamp of the most recent unban.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unban_date: Option<DateTime<Utc>>,
}
