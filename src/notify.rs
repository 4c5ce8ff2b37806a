//! Notifications (toasts) - the only way an action reports back to the user.

use crate::config::MAX_TOAST_CAPACITY;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Level { Success, Error }

/// Success content: a headline, a body, and an optional link.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notice {
    pub title: String,
    pub body: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,
}

impl Notice {
    pub fn new(title: impl Into<String>, body: impl Into<String>) -> Self {
        Self { title: title.into(), body: body.into(), link: None }
    }
    pub fn with_link(mut self, link: impl Into<String>) -> Self { self.link = Some(link.into()); self }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notification {
    pub level: Level,
    pub title: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,
    pub at: DateTime<Utc>,
}

impl Notification {
    pub fn success(notice: Notice) -> Self {
        Self { level: Level::Success, title: notice.title, message: notice.body, link: notice.link, at: Utc::now() }
    }

    pub fn error(message: &str) -> Self {
        Self { level: Level::Error, title: "Error".into(), message: message.into(), link: None, at: Utc::now() }
    }
}

pub trait Notifier: Send + Sync {
    fn success(&self, notice: Notice);
    fn error(&self, message: &str);
}

/// Toast feed: every notification is broadcast to whoever renders toasts.
#[derive(Clone)]
pub struct ToastFeed {
    sender: broadcast::Sender<Notification>,
}

impl ToastFeed {
    /// `capacity` is clamped to `1..=MAX_TOAST_CAPACITY`.
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity.clamp(1, MAX_TOAST_CAPACITY));
        Self { sender }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<Notification> { self.sender.subscribe() }

    fn publish(&self, notification: Notification) {
        // No subscriber means nobody is showing toasts; dropping is fine.
        let _ = self.sender.send(notification);
    }
}

impl Notifier for ToastFeed {
    fn success(&self, notice: Notice) { self.publish(Notification::success(notice)) }
    fn error(&self, message: &str) { self.publish(Notification::error(message)) }
}

/// Writes notifications to the log instead of a UI.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogNotifier;

impl Notifier for LogNotifier {
    fn success(&self, notice: Notice) {
        tracing::info!(link = notice.link.as_deref().unwrap_or(""), "{}: {}", notice.title, notice.body);
    }
    fn error(&self, message: &str) { tracing::warn!("{}", message) }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn feed_delivers_in_order() {
        let feed = ToastFeed::new(8);
        let mut rx = feed.subscribe();
        feed.success(Notice::new("View on mempool.space", "abc").with_link("https://mempool.space/tx/abc"));
        feed.error("User rejected");

        let first = rx.try_recv().unwrap();
        assert_eq!(first.level, Level::Success);
        assert_eq!(first.message, "abc");
        assert_eq!(first.link.as_deref(), Some("https://mempool.space/tx/abc"));

        let second = rx.try_recv().unwrap();
        assert_eq!(second.level, Level::Error);
        assert_eq!(second.message, "User rejected");
    }

    #[test]
    fn feed_without_subscribers_does_not_panic() {
        ToastFeed::new(0).error("nobody listening");
    }

    #[test]
    fn oversized_capacity_is_clamped() {
        let feed = ToastFeed::new(usize::MAX);
        let mut rx = feed.subscribe();
        feed.error("still delivered");
        assert_eq!(rx.try_recv().unwrap().message, "still delivered");
    }
}
