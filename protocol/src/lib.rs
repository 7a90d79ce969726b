//! Boundary types shared between the Crescendo host application and the
//! notification subsystem.
//!
//! These mirror what the external identity provider and document store hand
//! the client; the notification crates never talk to either service directly.

pub mod account;
pub mod moderation;

pub use account::BanProfile;
pub use account::CurrentUser;
pub use account::UserRole;
pub use moderation::ReviewStatus;
pub use moderation::ReviewSummary;
