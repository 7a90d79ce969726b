//! Client-side notification subsystem for the Crescendo music-review app.
//!
//! Three watchers observe externally pushed state and surface one-shot
//! modal notices, deduplicated through a durable client-local ledger:
//!
//! - [`ban::BanWatcher`] — the account transitioned into a ban
//! - [`unban::UnbanWatcher`] — the account transitioned out of a ban
//! - [`review_status::ReviewStatusWatcher`] — the user's reviews reached a
//!   terminal moderation outcome
//!
//! [`center::NotificationCenter`] composes the three over one shared ledger
//! and enforces the one-modal-at-a-time rule. The host pushes identity
//! snapshots and review lists in; the subsystem never talks to the backing
//! store beyond the [`sources::ProfileSource`] seam.

pub mod ban;
pub mod center;
pub mod config;
pub mod ledger;
pub mod review_status;
pub mod sources;
pub mod unban;

pub use ban::BanNotice;
pub use ban::BanWatcher;
pub use center::Notice;
pub use center::NotificationCenter;
pub use config::NotifyConfig;
pub use ledger::LedgerEntry;
pub use ledger::NoticeEvent;
pub use ledger::NotificationLedger;
pub use review_status::ReviewAck;
pub use review_status::ReviewNotice;
pub use review_status::ReviewStatusWatcher;
pub use sources::FetchError;
pub use sources::ProfileSource;
pub use sources::ReviewReadSink;
pub use unban::UnbanNotice;
pub use unban::UnbanWatcher;
