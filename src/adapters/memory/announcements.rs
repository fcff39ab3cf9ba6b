//! Announcement channel that records instead of posting.

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::domain::reporting::Announcement;
use crate::ports::AnnouncementChannel;

/// Keeps every announcement and answers with a fixed delivery result.
pub struct RecordingAnnouncementChannel {
    sent: Mutex<Vec<Announcement>>,
    delivered: bool,
}

impl RecordingAnnouncementChannel {
    /// A channel that reports successful delivery.
    pub fn new() -> Self {
        Self {
            sent: Mutex::new(Vec::new()),
            delivered: true,
        }
    }

    /// A channel that reports failed delivery.
    pub fn failing() -> Self {
        Self {
            sent: Mutex::new(Vec::new()),
            delivered: false,
        }
    }

    pub async fn sent(&self) -> Vec<Announcement> {
        self.sent.lock().await.clone()
    }
}

impl Default for RecordingAnnouncementChannel {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl AnnouncementChannel for RecordingAnnouncementChannel {
    async fn announce(&self, announcement: &Announcement) -> bool {
        self.sent.lock().await.push(announcement.clone());
        self.delivered
    }
}
