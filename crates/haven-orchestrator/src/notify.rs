//! Alert notification boundary
//!
//! The core hands finished [`AlertEvent`]s to a notifier and moves on;
//! delivery, retries, and channel selection (push, voice, SMS) belong to the
//! external collaborator behind this trait.

use async_trait::async_trait;
use haven_core::AlertEvent;
use tokio::sync::broadcast;

/// Boundary trait for alert delivery
#[async_trait]
pub trait AlertNotifier: Send + Sync {
    /// Hand off an alert for delivery
    async fn notify(&self, event: AlertEvent);
}

/// Broadcast-based notifier for in-process consumers
#[derive(Clone)]
pub struct BroadcastNotifier {
    sender: broadcast::Sender<AlertEvent>,
}

impl BroadcastNotifier {
    /// Create a notifier with the given channel capacity
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self { sender }
    }

    /// Subscribe to alert events
    pub fn subscribe(&self) -> broadcast::Receiver<AlertEvent> {
        self.sender.subscribe()
    }

    /// Number of active subscribers
    pub fn subscriber_count(&self) -> usize {
        self.sender.receiver_count()
    }
}

impl Default for BroadcastNotifier {
    fn default() -> Self {
        Self::new(256)
    }
}

#[async_trait]
impl AlertNotifier for BroadcastNotifier {
    async fn notify(&self, event: AlertEvent) {
        // Ignore send errors (no subscribers)
        let _ = self.sender.send(event);
    }
}
