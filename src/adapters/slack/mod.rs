//! Slack adapter - Posts period announcements through the Slack Web API.
//!
//! The bot token is held in a `secrecy::Secret` and only exposed when the
//! `Authorization` header is built.

mod slack_announcer;

pub use slack_announcer::{SlackAnnouncer, SlackAnnouncerConfig};
