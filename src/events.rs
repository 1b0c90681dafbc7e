//! Typed subscriptions to backend change notifications.
//!
//! The backend announces changes on named channels (`people-updated`,
//! `calendar-updated`, ...). Pages subscribe to the kinds they render and
//! hold the returned `Subscription` for as long as they are mounted;
//! dropping it unsubscribes.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Weak};

use parking_lot::Mutex;

/// Which channel an event arrived on.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum EventKind {
    PeopleUpdated,
    CalendarUpdated,
    OperationDelivered,
    WorkflowCompleted,
    IntelligenceUpdated,
    PrepReady,
    InboxUpdated,
    Other(String),
}

impl EventKind {
    pub fn from_channel(name: &str) -> Self {
        match name {
            "people-updated" => EventKind::PeopleUpdated,
            "calendar-updated" => EventKind::CalendarUpdated,
            "operation-delivered" => EventKind::OperationDelivered,
            "workflow-completed" => EventKind::WorkflowCompleted,
            "intelligence-updated" => EventKind::IntelligenceUpdated,
            "prep-ready" => EventKind::PrepReady,
            "inbox-updated" => EventKind::InboxUpdated,
            other => EventKind::Other(other.to_string()),
        }
    }

    pub fn channel(&self) -> &str {
        match self {
            EventKind::PeopleUpdated => "people-updated",
            EventKind::CalendarUpdated => "calendar-updated",
            EventKind::OperationDelivered => "operation-delivered",
            EventKind::WorkflowCompleted => "workflow-completed",
            EventKind::IntelligenceUpdated => "intelligence-updated",
            EventKind::PrepReady => "prep-ready",
            EventKind::InboxUpdated => "inbox-updated",
            EventKind::Other(name) => name,
        }
    }
}

/// A notification pushed by the backend.
#[derive(Debug, Clone)]
pub struct BackendEvent {
    pub kind: EventKind,
    pub payload: serde_json::Value,
}

impl BackendEvent {
    pub fn new(channel: &str, payload: serde_json::Value) -> Self {
        Self {
            kind: EventKind::from_channel(channel),
            payload,
        }
    }
}

type Callback = Arc<dyn Fn(&BackendEvent) + Send + Sync>;

#[derive(Default)]
struct Registry {
    subscribers: HashMap<EventKind, Vec<(u64, Callback)>>,
}

/// Fan-out point between the backend bridge and mounted pages.
#[derive(Default)]
pub struct EventHub {
    registry: Arc<Mutex<Registry>>,
    next_id: AtomicU64,
}

impl EventHub {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `callback` for events of `kind`.
    pub fn subscribe<F>(&self, kind: EventKind, callback: F) -> Subscription
    where
        F: Fn(&BackendEvent) + Send + Sync + 'static,
    {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        let callback: Callback = Arc::new(callback);
        self.registry
            .lock()
            .subscribers
            .entry(kind.clone())
            .or_default()
            .push((id, callback));
        log::debug!("Subscribed #{} to {}", id, kind.channel());

        Subscription {
            id,
            kind,
            registry: Arc::downgrade(&self.registry),
        }
    }

    /// Deliver `event` to every subscriber of its kind. Returns how many
    /// callbacks ran.
    pub fn publish(&self, event: &BackendEvent) -> usize {
        // Snapshot under the lock, call outside it, so callbacks may
        // subscribe or unsubscribe.
        let callbacks: Vec<Callback> = self
            .registry
            .lock()
            .subscribers
            .get(&event.kind)
            .map(|subs| subs.iter().map(|(_, cb)| Arc::clone(cb)).collect())
            .unwrap_or_default();

        for callback in &callbacks {
            callback(event);
        }
        if callbacks.is_empty() {
            log::debug!("No subscribers for {}", event.kind.channel());
        }
        callbacks.len()
    }

    pub fn subscriber_count(&self, kind: &EventKind) -> usize {
        self.registry
            .lock()
            .subscribers
            .get(kind)
            .map_or(0, Vec::len)
    }
}

/// Live registration in an `EventHub`. Unsubscribes on drop.
#[must_use = "dropping a Subscription unsubscribes immediately"]
pub struct Subscription {
    id: u64,
    kind: EventKind,
    registry: Weak<Mutex<Registry>>,
}

impl Subscription {
    pub fn unsubscribe(self) {
        // Drop does the work.
    }

    pub fn kind(&self) -> &EventKind {
        &self.kind
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        let Some(shared) = self.registry.upgrade() else {
            return;
        };
        let mut registry = shared.lock();
        if let Some(subs) = registry.subscribers.get_mut(&self.kind) {
            subs.retain(|(id, _)| *id != self.id);
            if subs.is_empty() {
                registry.subscribers.remove(&self.kind);
            }
        }
        log::debug!("Unsubscribed #{} from {}", self.id, self.kind.channel());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::AtomicUsize;

    fn counter() -> (Arc<AtomicUsize>, impl Fn(&BackendEvent) + Send + Sync + 'static) {
        let count = Arc::new(AtomicUsize::new(0));
        let c = Arc::clone(&count);
        (count, move |_: &BackendEvent| {
            c.fetch_add(1, Ordering::SeqCst);
        })
    }

    #[test]
    fn channel_names_round_trip() {
        for name in ["people-updated", "calendar-updated", "prep-ready", "custom-thing"] {
            assert_eq!(EventKind::from_channel(name).channel(), name);
        }
        assert_eq!(
            EventKind::from_channel("custom-thing"),
            EventKind::Other("custom-thing".to_string())
        );
    }

    #[test]
    fn delivers_only_to_matching_kind() {
        let hub = EventHub::new();
        let (people, on_people) = counter();
        let (calendar, on_calendar) = counter();
        let _p = hub.subscribe(EventKind::PeopleUpdated, on_people);
        let _c = hub.subscribe(EventKind::CalendarUpdated, on_calendar);

        let ran = hub.publish(&BackendEvent::new("people-updated", serde_json::Value::Null));
        assert_eq!(ran, 1);
        assert_eq!(people.load(Ordering::SeqCst), 1);
        assert_eq!(calendar.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn dropping_subscription_stops_delivery() {
        let hub = EventHub::new();
        let (count, on_event) = counter();
        let sub = hub.subscribe(EventKind::PrepReady, on_event);
        assert_eq!(hub.subscriber_count(&EventKind::PrepReady), 1);

        hub.publish(&BackendEvent::new("prep-ready", serde_json::json!({"meetingId": "m1"})));
        sub.unsubscribe();
        hub.publish(&BackendEvent::new("prep-ready", serde_json::Value::Null));

        assert_eq!(count.load(Ordering::SeqCst), 1);
        assert_eq!(hub.subscriber_count(&EventKind::PrepReady), 0);
    }

    #[test]
    fn subscription_outliving_hub_is_harmless() {
        let hub = EventHub::new();
        let (_, on_event) = counter();
        let sub = hub.subscribe(EventKind::InboxUpdated, on_event);
        drop(hub);
        drop(sub);
    }

    #[test]
    fn callbacks_see_payload() {
        let hub = EventHub::new();
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&seen);
        let _sub = hub.subscribe(EventKind::WorkflowCompleted, move |event| {
            sink.lock().push(event.payload["workflow"].as_str().unwrap_or("").to_string());
        });

        hub.publish(&BackendEvent::new(
            "workflow-completed",
            serde_json::json!({"workflow": "week"}),
        ));
        assert_eq!(*seen.lock(), vec!["week".to_string()]);
    }
}
