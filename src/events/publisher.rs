use crate::constants::defaults;
use serde::Serialize;
use serde_json::Value;
use tokio::sync::broadcast;

/// Broadcast publisher for wizard lifecycle events
#[derive(Debug, Clone)]
pub struct EventPublisher {
    sender: broadcast::Sender<PublishedEvent>,
}

/// One lifecycle notification as seen by subscribers
#[derive(Debug, Clone, Serialize)]
pub struct PublishedEvent {
    pub name: String,
    pub context: Value,
    pub published_at: chrono::DateTime<chrono::Utc>,
}

impl EventPublisher {
    /// Slow subscribers lag once more than `capacity` events are buffered
    pub fn new(capacity: usize) -> Self {
        let (sender, _receiver) = broadcast::channel(capacity.max(1));
        Self { sender }
    }

    /// Fire and forget; nobody listening is fine
    pub fn publish(&self, name: impl Into<String>, context: Value) {
        let event = PublishedEvent {
            name: name.into(),
            context,
            published_at: chrono::Utc::now(),
        };

        if self.sender.send(event).is_err() {
            tracing::trace!("Lifecycle event published with no subscribers");
        }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<PublishedEvent> {
        self.sender.subscribe()
    }

    pub fn subscriber_count(&self) -> usize {
        self.sender.receiver_count()
    }
}

impl Default for EventPublisher {
    fn default() -> Self {
        Self::new(defaults::EVENT_CHANNEL_CAPACITY)
    }
}
