//! Topic-keyed event bus
//!
//! Cross-widget signalling: subscribe to a topic, publish a payload,
//! every live subscriber hears it exactly once. A subscriber that
//! panics is unregistered at the fan-out boundary so one bad callback
//! never blocks delivery to the rest.

use rustc_hash::FxHashMap;
use slotmap::{new_key_type, SlotMap};
use smallvec::SmallVec;
use std::panic::{catch_unwind, AssertUnwindSafe};

new_key_type! {
    /// Key for one subscriber within a topic.
    pub struct SubscriberId;
}

type Callback<E> = Box<dyn FnMut(&E) + Send>;

/// Handle returned by [`EventBus::subscribe`]; pass it back to
/// [`EventBus::unsubscribe`] to disconnect.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Subscription {
    topic: String,
    id: SubscriberId,
}

impl Subscription {
    /// The topic this subscription listens on.
    pub fn topic(&self) -> &str {
        &self.topic
    }
}

/// Topic-keyed subscriber registry with failure-evicting fan-out.
pub struct EventBus<E> {
    topics: FxHashMap<String, SlotMap<SubscriberId, Callback<E>>>,
    evicted: u64,
}

impl<E> EventBus<E> {
    pub fn new() -> Self {
        Self {
            topics: FxHashMap::default(),
            evicted: 0,
        }
    }

    /// Register `callback` on `topic`.
    pub fn subscribe<F>(&mut self, topic: impl Into<String>, callback: F) -> Subscription
    where
        F: FnMut(&E) + Send + 'static,
    {
        let topic = topic.into();
        let id = self
            .topics
            .entry(topic.clone())
            .or_default()
            .insert(Box::new(callback));
        Subscription { topic, id }
    }

    /// Disconnect a subscription. Unknown subscriptions are ignored.
    pub fn unsubscribe(&mut self, subscription: &Subscription) {
        if let Some(subscribers) = self.topics.get_mut(&subscription.topic) {
            subscribers.remove(subscription.id);
            if subscribers.is_empty() {
                self.topics.remove(&subscription.topic);
            }
        }
    }

    /// Deliver `event` to every subscriber of `topic`. Returns how many
    /// subscribers were reached. Panicking subscribers are removed from
    /// the topic before this call returns.
    pub fn publish(&mut self, topic: &str, event: &E) -> usize {
        let Some(subscribers) = self.topics.get_mut(topic) else {
            return 0;
        };
        let mut delivered = 0;
        let mut dead: SmallVec<[SubscriberId; 2]> = SmallVec::new();
        for (id, callback) in subscribers.iter_mut() {
            if catch_unwind(AssertUnwindSafe(|| callback(event))).is_ok() {
                delivered += 1;
            } else {
                dead.push(id);
            }
        }
        for id in dead {
            subscribers.remove(id);
            self.evicted += 1;
            tracing::warn!(topic, "event subscriber panicked; unregistered");
        }
        if subscribers.is_empty() {
            self.topics.remove(topic);
        }
        delivered
    }

    /// Subscribers currently registered on `topic`.
    pub fn subscriber_count(&self, topic: &str) -> usize {
        self.topics.get(topic).map_or(0, |s| s.len())
    }

    /// Total subscribers dropped after panicking.
    pub fn evicted(&self) -> u64 {
        self.evicted
    }

    /// Drop every subscription on every topic.
    pub fn clear(&mut self) {
        self.topics.clear();
    }
}

impl<E> Default for EventBus<E> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    #[test]
    fn test_publish_reaches_every_subscriber_once() {
        let mut bus: EventBus<u32> = EventBus::new();
        let count = Arc::new(AtomicUsize::new(0));

        for _ in 0..3 {
            let count = count.clone();
            bus.subscribe("resize", move |n: &u32| {
                count.fetch_add(*n as usize, Ordering::SeqCst);
            });
        }

        let delivered = bus.publish("resize", &2);
        assert_eq!(delivered, 3);
        assert_eq!(count.load(Ordering::SeqCst), 6);
    }

    #[test]
    fn test_publish_to_unknown_topic_is_a_noop() {
        let mut bus: EventBus<()> = EventBus::new();
        assert_eq!(bus.publish("nobody-home", &()), 0);
    }

    #[test]
    fn test_unsubscribe_stops_delivery() {
        let mut bus: EventBus<()> = EventBus::new();
        let count = Arc::new(AtomicUsize::new(0));

        let count2 = count.clone();
        let sub = bus.subscribe("click", move |_: &()| {
            count2.fetch_add(1, Ordering::SeqCst);
        });

        bus.publish("click", &());
        bus.unsubscribe(&sub);
        bus.publish("click", &());

        assert_eq!(count.load(Ordering::SeqCst), 1);
        assert_eq!(bus.subscriber_count("click"), 0);
    }

    #[test]
    fn test_panicking_subscriber_is_evicted_and_others_still_run() {
        let mut bus: EventBus<()> = EventBus::new();
        let count = Arc::new(AtomicUsize::new(0));

        bus.subscribe("tick", |_: &()| panic!("bad subscriber"));
        let count2 = count.clone();
        bus.subscribe("tick", move |_: &()| {
            count2.fetch_add(1, Ordering::SeqCst);
        });

        let delivered = bus.publish("tick", &());
        assert_eq!(delivered, 1);
        assert_eq!(bus.subscriber_count("tick"), 1);
        assert_eq!(bus.evicted(), 1);

        // The survivor keeps receiving.
        bus.publish("tick", &());
        assert_eq!(count.load(Ordering::SeqCst), 2);
    }
}
