//! Announcement channel port (team chat).

use crate::domain::reporting::Announcement;
use async_trait::async_trait;

/// Fire-and-forget delivery of announcements.
///
/// Delivery problems are reported as `false`, never as errors; the caller
/// only needs to tell the administrator whether to retry.
#[async_trait]
pub trait AnnouncementChannel: Send + Sync {
    async fn announce(&self, announcement: &Announcement) -> bool;
}
