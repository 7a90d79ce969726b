//! Boundary contracts between the watchers and the hosting application.

use async_trait::async_trait;
use crescendo_protocol::BanProfile;

/// Failures fetching ban/unban metadata from the profile store. Watchers
/// log these and simply skip the notification for the current cycle; there
/// is no retry loop.
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    #[error("profile not found: {user_id}")]
    NotFound { user_id: String },

    #[error("network error: {0}")]
    Network(String),
}

/// On-demand access to a user's ban/unban metadata.
///
/// Implemented by the host over whatever document store it uses; the
/// watchers only ever see this seam.
#[async_trait]
pub trait ProfileSource: Send + Sync {
    async fn fetch_ban_profile(&self, user_id: &str) -> Result<BanProfile, FetchError>;
}

/// Host hook invoked exactly once per review the moment its status notice
/// is acknowledged or navigated to, so the caller can update its own
/// list/badge state.
pub trait ReviewReadSink: Send + Sync {
    fn review_read(&self, review_id: &str);
}

/// No-op sink for hosts that do not track read state.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullReviewReadSink;

impl ReviewReadSink for NullReviewReadSink {
    fn review_read(&self, _review_id: &str) {}
}
