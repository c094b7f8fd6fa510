//! In-process publish/subscribe registry.
//!
//! The swipe detector and the drawer overlay never hold references to each
//! other; they communicate exclusively through this bus. The bus is an
//! injectable service, not a process global, so each test (or each window)
//! can own an isolated instance.
//!
//! Delivery contract:
//!
//! - Listeners for one topic run in subscription order.
//! - The subscriber list is snapshotted before invocation, so a callback may
//!   publish further events or unsubscribe without deadlocking the registry.
//! - Multiple drawers/detectors may share one bus; filtering events that are
//!   not relevant is each subscriber's responsibility.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, Weak};

use indexmap::IndexMap;
use rustc_hash::FxHashMap;
use smallvec::SmallVec;

use crate::events::{BusEvent, Topic};

/// Callback invoked for every event published on a subscribed topic.
pub type BusCallback = Arc<dyn Fn(&BusEvent) + Send + Sync>;

struct BusInner {
    /// Topic -> insertion-ordered subscribers.
    topics: FxHashMap<Topic, IndexMap<u64, BusCallback>>,
}

/// Named-topic publish/subscribe registry.
///
/// Cloning is cheap; clones share the same registry.
#[derive(Clone)]
pub struct EventBus {
    inner: Arc<Mutex<BusInner>>,
    next_id: Arc<AtomicU64>,
}

impl EventBus {
    pub fn new() -> Self {
        Self {
            inner: Arc::new(Mutex::new(BusInner {
                topics: FxHashMap::default(),
            })),
            next_id: Arc::new(AtomicU64::new(1)),
        }
    }

    /// Register a listener for a topic.
    ///
    /// The returned [`Subscription`] unregisters the listener when
    /// [`Subscription::unsubscribe`] is called or when it is dropped.
    pub fn subscribe<F>(&self, topic: Topic, callback: F) -> Subscription
    where
        F: Fn(&BusEvent) + Send + Sync + 'static,
    {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);

        let mut inner = self.inner.lock().unwrap();
        inner
            .topics
            .entry(topic)
            .or_default()
            .insert(id, Arc::new(callback));

        tracing::trace!("EventBus: subscribed {:?} (id={})", topic, id);

        Subscription {
            inner: Arc::downgrade(&self.inner),
            topic,
            id,
        }
    }

    /// Deliver an event to every subscriber of its topic, in subscription
    /// order.
    pub fn publish(&self, event: BusEvent) {
        // Snapshot under the lock, invoke outside it. A listener may publish
        // or unsubscribe from within its callback.
        let listeners: SmallVec<[BusCallback; 4]> = {
            let inner = self.inner.lock().unwrap();
            match inner.topics.get(&event.topic()) {
                Some(subs) => subs.values().cloned().collect(),
                None => SmallVec::new(),
            }
        };

        tracing::trace!(
            "EventBus: publish {:?} to {} listener(s)",
            event.topic(),
            listeners.len()
        );

        for listener in listeners {
            listener(&event);
        }
    }

    /// Number of live subscriptions for a topic.
    pub fn subscriber_count(&self, topic: Topic) -> usize {
        self.inner
            .lock()
            .unwrap()
            .topics
            .get(&topic)
            .map(|subs| subs.len())
            .unwrap_or(0)
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}

/// Handle to one registered listener.
///
/// Holds only a weak reference to the bus, so an outstanding subscription
/// does not keep a dropped bus alive.
pub struct Subscription {
    inner: Weak<Mutex<BusInner>>,
    topic: Topic,
    id: u64,
}

impl Subscription {
    /// Remove the listener from the registry.
    ///
    /// Idempotent, and safe to call after the bus itself is gone; teardown
    /// order between listeners is not guaranteed.
    pub fn unsubscribe(&self) {
        if let Some(inner) = self.inner.upgrade() {
            let mut inner = inner.lock().unwrap();
            if let Some(subs) = inner.topics.get_mut(&self.topic) {
                if subs.shift_remove(&self.id).is_some() {
                    tracing::trace!(
                        "EventBus: unsubscribed {:?} (id={})",
                        self.topic,
                        self.id
                    );
                }
            }
        }
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.unsubscribe();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::{Direction, TouchPoint};
    use std::sync::atomic::AtomicUsize;

    #[test]
    fn test_publish_reaches_subscriber() {
        let bus = EventBus::new();
        let count = Arc::new(AtomicUsize::new(0));

        let count_clone = Arc::clone(&count);
        let _sub = bus.subscribe(Topic::SwipeStart, move |_| {
            count_clone.fetch_add(1, Ordering::SeqCst);
        });

        bus.publish(BusEvent::SwipeStart(TouchPoint::new(1.0, 2.0)));
        bus.publish(BusEvent::SwipeStart(TouchPoint::new(3.0, 4.0)));

        assert_eq!(count.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn test_delivery_in_subscription_order() {
        let bus = EventBus::new();
        let order = Arc::new(Mutex::new(Vec::new()));

        let order_a = Arc::clone(&order);
        let _a = bus.subscribe(Topic::DrawerClosed, move |_| {
            order_a.lock().unwrap().push("a");
        });
        let order_b = Arc::clone(&order);
        let _b = bus.subscribe(Topic::DrawerClosed, move |_| {
            order_b.lock().unwrap().push("b");
        });

        bus.publish(BusEvent::DrawerClosed);

        assert_eq!(*order.lock().unwrap(), vec!["a", "b"]);
    }

    #[test]
    fn test_unsubscribe_is_idempotent() {
        let bus = EventBus::new();
        let count = Arc::new(AtomicUsize::new(0));

        let count_clone = Arc::clone(&count);
        let sub = bus.subscribe(Topic::DismissDrawer, move |_| {
            count_clone.fetch_add(1, Ordering::SeqCst);
        });

        sub.unsubscribe();
        sub.unsubscribe();
        assert_eq!(bus.subscriber_count(Topic::DismissDrawer), 0);

        bus.publish(BusEvent::DismissDrawer);
        assert_eq!(count.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_drop_unsubscribes() {
        let bus = EventBus::new();

        {
            let _sub = bus.subscribe(Topic::SwipeEnd, |_| {});
            assert_eq!(bus.subscriber_count(Topic::SwipeEnd), 1);
        }

        assert_eq!(bus.subscriber_count(Topic::SwipeEnd), 0);
    }

    #[test]
    fn test_only_matching_topic_delivered() {
        let bus = EventBus::new();
        let count = Arc::new(AtomicUsize::new(0));

        let count_clone = Arc::clone(&count);
        let _sub = bus.subscribe(Topic::SwipeMove, move |_| {
            count_clone.fetch_add(1, Ordering::SeqCst);
        });

        bus.publish(BusEvent::SwipeEnd {
            direction: Direction::Left,
        });
        assert_eq!(count.load(Ordering::SeqCst), 0);

        bus.publish(BusEvent::SwipeMove {
            position: TouchPoint::new(10.0, 0.0),
            edge: Direction::Left,
        });
        assert_eq!(count.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_publish_from_within_callback() {
        let bus = EventBus::new();
        let closed = Arc::new(AtomicUsize::new(0));

        let bus_clone = bus.clone();
        let _relay = bus.subscribe(Topic::DismissDrawer, move |_| {
            bus_clone.publish(BusEvent::DrawerClosed);
        });

        let closed_clone = Arc::clone(&closed);
        let _listener = bus.subscribe(Topic::DrawerClosed, move |_| {
            closed_clone.fetch_add(1, Ordering::SeqCst);
        });

        bus.publish(BusEvent::DismissDrawer);
        assert_eq!(closed.load(Ordering::SeqCst), 1);
    }
}
