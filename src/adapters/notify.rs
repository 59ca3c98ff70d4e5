use crate::core::{Notification, NotificationLevel, Notifier};
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};

/// Writes notifications to the log.
#[derive(Debug, Clone, Default)]
pub struct TracingNotifier;

impl Notifier for TracingNotifier {
    fn notify(&self, notification: Notification) {
        match notification.level {
            NotificationLevel::Success => tracing::info!("✅ {}", notification.message),
            NotificationLevel::Error => tracing::error!("❌ {}", notification.message),
        }
    }
}

/// Forwards notifications to whoever holds the receiver, e.g. a UI task.
#[derive(Debug, Clone)]
pub struct ChannelNotifier {
    sender: UnboundedSender<Notification>,
}

impl ChannelNotifier {
    pub fn channel() -> (Self, UnboundedReceiver<Notification>) {
        let (sender, receiver) = mpsc::unbounded_channel();
        (Self { sender }, receiver)
    }
}

impl Notifier for ChannelNotifier {
    fn notify(&self, notification: Notification) {
        if let Err(e) = self.sender.send(notification) {
            tracing::debug!("Notification dropped, receiver closed: {}", e.0.message);
        }
    }
}
