// Dashboard events - Publish/subscribe contract between a dashboard and its host UI
use serde::Serialize;
use tokio::sync::broadcast;

const EVENT_CAPACITY: usize = 64;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", content = "payload")]
pub enum DashboardEvent {
    /// Human-readable status line for display
    Status(String),
    /// A new store was published
    DataLoaded {
        kind: String,
        time_frame: String,
        points: usize,
    },
    IngestionFailed { kind: String, error: String },
    /// The chart should be re-rendered from [`crate::application::dashboard_service::Dashboard::frame`]
    ChartInvalidated,
}

/// Per-dashboard event channel. Lagging subscribers lose the oldest events.
#[derive(Debug, Clone)]
pub struct EventBus {
    tx: broadcast::Sender<DashboardEvent>,
}

impl EventBus {
    pub fn new() -> Self {
        let (tx, _) = broadcast::channel(EVENT_CAPACITY);
        Self { tx }
    }

    pub fn publish(&self, event: DashboardEvent) {
        // No subscribers is fine
        let _ = self.tx.send(event);
    }

    pub fn subscribe(&self) -> broadcast::Receiver<DashboardEvent> {
        self.tx.subscribe()
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_publish_reaches_every_subscriber() {
        let bus = EventBus::new();
        let mut first = bus.subscribe();
        let mut second = bus.subscribe();

        bus.publish(DashboardEvent::Status("Fetching ph data...".to_string()));

        assert_eq!(
            first.recv().await.unwrap(),
            DashboardEvent::Status("Fetching ph data...".to_string())
        );
        assert_eq!(
            second.recv().await.unwrap(),
            DashboardEvent::Status("Fetching ph data...".to_string())
        );
    }

    #[test]
    fn test_publish_without_subscribers() {
        EventBus::new().publish(DashboardEvent::ChartInvalidated);
    }

    #[test]
    fn test_event_serialization() {
        let event = DashboardEvent::DataLoaded {
            kind: "ph".to_string(),
            time_frame: "2024-10".to_string(),
            points: 3,
        };
        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["type"], "DataLoaded");
        assert_eq!(json["payload"]["points"], 3);
    }
}
