//! Lifecycle event transport
//!
//! `EventBus` fans created/displayed milestones out to any number of
//! subscribers over a broadcast channel. `LoggingEventSink` writes them to the
//! log instead.

use crate::collaborators::EventSink;
use crate::model::ReceivedNotification;
use tokio::sync::broadcast;
use tokio::sync::broadcast::error::TryRecvError;
use tracing::{info, warn};

/// A lifecycle milestone reported for one notification
#[derive(Debug, Clone, PartialEq)]
pub enum LifecycleEvent {
    Created(ReceivedNotification),
    Displayed(ReceivedNotification),
}

impl LifecycleEvent {
    pub fn event_type(&self) -> &'static str {
        match self {
            Self::Created(_) => "created",
            Self::Displayed(_) => "displayed",
        }
    }

    pub fn notification(&self) -> &ReceivedNotification {
        match self {
            Self::Created(n) | Self::Displayed(n) => n,
        }
    }
}

/// Broadcast bus for lifecycle events
///
/// # Example
///
/// ```rust
/// use herald_core::events::{EventBus, LifecycleEvent};
/// use herald_core::collaborators::EventSink;
/// use herald_core::model::{NotificationRequest, ReceivedNotification};
///
/// #[tokio::main]
/// async fn main() {
///     let bus = EventBus::new(16);
///     let mut subscriber = bus.subscribe();
///
///     let request = NotificationRequest::new(1, "basic").with_title("Hello");
///     bus.notify_created(&ReceivedNotification::from(&request));
///
///     let event = subscriber.recv().await.unwrap();
///     assert_eq!(event.event_type(), "created");
/// }
/// ```
#[derive(Debug, Clone)]
pub struct EventBus {
    sender: broadcast::Sender<LifecycleEvent>,
    capacity: usize,
}

impl EventBus {
    /// Create a new event bus with the specified capacity
    ///
    /// The capacity determines how many events can be buffered before
    /// slow subscribers start losing events.
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self { sender, capacity }
    }

    /// Publish an event, returning how many subscribers will see it
    pub fn publish(&self, event: LifecycleEvent) -> usize {
        self.sender.send(event).unwrap_or(0)
    }

    pub fn subscribe(&self) -> broadcast::Receiver<LifecycleEvent> {
        self.sender.subscribe()
    }

    pub fn subscriber_count(&self) -> usize {
        self.sender.receiver_count()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new(256)
    }
}

impl EventSink for EventBus {
    fn notify_created(&self, notification: &ReceivedNotification) {
        self.publish(LifecycleEvent::Created(notification.clone()));
    }

    fn notify_displayed(&self, notification: &ReceivedNotification) {
        self.publish(LifecycleEvent::Displayed(notification.clone()));
    }
}

/// Take every event buffered on `receiver` without waiting.
///
/// Events the receiver fell behind on are skipped with a warning; draining
/// continues with the oldest event still buffered.
pub fn drain(receiver: &mut broadcast::Receiver<LifecycleEvent>) -> Vec<LifecycleEvent> {
    let mut events = Vec::new();
    loop {
        match receiver.try_recv() {
            Ok(event) => events.push(event),
            Err(TryRecvError::Lagged(skipped)) => {
                warn!(skipped, "Lifecycle event subscriber lagged, events dropped");
            }
            Err(TryRecvError::Empty | TryRecvError::Closed) => break,
        }
    }
    events
}

/// Event sink that only logs milestones
#[derive(Debug, Default, Clone, Copy)]
pub struct LoggingEventSink;

impl EventSink for LoggingEventSink {
    fn notify_created(&self, notification: &ReceivedNotification) {
        info!(
            notification_id = notification.id,
            channel = %notification.channel_key,
            "Notification created"
        );
    }

    fn notify_displayed(&self, notification: &ReceivedNotification) {
        info!(
            notification_id = notification.id,
            channel = %notification.channel_key,
            "Notification displayed"
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::NotificationRequest;

    fn received(id: i32) -> ReceivedNotification {
        ReceivedNotification::from(&NotificationRequest::new(id, "c").with_title("Hi"))
    }

    #[tokio::test]
    async fn test_bus_delivers_to_all_subscribers() {
        let bus = EventBus::new(8);
        let mut first = bus.subscribe();
        let mut second = bus.subscribe();

        bus.notify_displayed(&received(3));

        let a = first.recv().await.unwrap();
        let b = second.recv().await.unwrap();
        assert_eq!(a.event_type(), "displayed");
        assert_eq!(b.notification().id, 3);
    }

    #[tokio::test]
    async fn test_bus_preserves_order() {
        let bus = EventBus::default();
        let mut subscriber = bus.subscribe();

        bus.notify_created(&received(1));
        bus.notify_displayed(&received(1));

        assert!(matches!(subscriber.recv().await.unwrap(), LifecycleEvent::Created(_)));
        assert!(matches!(subscriber.recv().await.unwrap(), LifecycleEvent::Displayed(_)));
    }

    #[test]
    fn test_publish_without_subscribers() {
        let bus = EventBus::new(4);
        assert_eq!(bus.publish(LifecycleEvent::Created(received(1))), 0);
        assert_eq!(bus.subscriber_count(), 0);
        assert_eq!(bus.capacity(), 4);
    }

    #[test]
    fn test_drain_skips_past_lag() {
        let bus = EventBus::new(2);
        let mut subscriber = bus.subscribe();
        for id in 1..=3 {
            bus.notify_created(&received(id));
        }

        let ids: Vec<i32> = drain(&mut subscriber)
            .iter()
            .map(|event| event.notification().id)
            .collect();
        assert_eq!(ids, vec![2, 3]);
        assert!(drain(&mut subscriber).is_empty());
    }

    #[test]
    fn test_drain_after_bus_dropped() {
        let bus = EventBus::new(4);
        let mut subscriber = bus.subscribe();
        bus.notify_displayed(&received(5));
        drop(bus);

        let events = drain(&mut subscriber);
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].event_type(), "displayed");
    }
}
