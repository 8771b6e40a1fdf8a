//! Typed, process-local pub/sub.
//!
//! Every event is a Rust type bound to its `event_type` string at
//! declaration via [`BusEvent`]. `publish` fans out to every subscriber of
//! that type plus every wildcard subscriber, in subscription order, and
//! never fails: a handler that panics or returns an error is logged and the
//! remaining handlers still run. A bus handed to a nested scope (a request
//! handler, a session task) via [`EventBus::scoped`] keeps its own
//! subscribers but also bubbles publishes up to every ancestor scope's
//! subscribers, so a root-level `subscribe_all` still observes everything.

use std::any::{Any, TypeId};
use std::collections::HashMap;
use std::future::Future;
use std::panic::AssertUnwindSafe;
use std::pin::Pin;
use std::sync::atomic::{AtomicU64, Ordering as AtomicOrdering};
use std::sync::{Arc, RwLock};

use futures::FutureExt;

/// A payload type publishable on the bus, tagged with its wire event type.
pub trait BusEvent: Any + Send + Sync + 'static {
    const EVENT_TYPE: &'static str;
}

type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;
type AnyArc = Arc<dyn Any + Send + Sync>;
type TypedHandler = Arc<dyn Fn(AnyArc, &'static str) -> BoxFuture<'static, ()> + Send + Sync>;

#[derive(Clone)]
struct Subscription {
    id: u64,
    handler: TypedHandler,
}

#[derive(Default)]
struct Inner {
    by_type: RwLock<HashMap<TypeId, Vec<Subscription>>>,
    wildcard: RwLock<Vec<Subscription>>,
    next_id: AtomicU64,
}

/// A process-local event bus. Cheaply cloneable; clones share subscribers.
#[derive(Clone, Default)]
pub struct EventBus {
    inner: Arc<Inner>,
    parents: Vec<Arc<Inner>>,
}

/// Handle returned by [`EventBus::subscribe`]/[`EventBus::subscribe_all`].
/// Call [`Unsubscribe::unsubscribe`] to stop receiving events; dropping it
/// without calling that leaves the subscription active.
pub struct Unsubscribe {
    inner: Arc<Inner>,
    type_id: Option<TypeId>,
    id: u64,
}

impl Unsubscribe {
    pub fn unsubscribe(self) {
        match self.type_id {
            Some(type_id) => {
                let mut map = self.inner.by_type.write().unwrap_or_else(|e| e.into_inner());
                if let Some(subs) = map.get_mut(&type_id) {
                    subs.retain(|s| s.id != self.id);
                }
            }
            None => {
                let mut subs = self.inner.wildcard.write().unwrap_or_else(|e| e.into_inner());
                subs.retain(|s| s.id != self.id);
            }
        }
    }
}

impl EventBus {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a child bus for a nested dynamic scope. Its own subscribers
    /// are independent, but publishes on it also notify every ancestor
    /// scope's subscribers (including the root).
    pub fn scoped(&self) -> Self {
        let mut parents = self.parents.clone();
        parents.push(self.inner.clone());
        Self {
            inner: Arc::new(Inner::default()),
            parents,
        }
    }

    pub fn subscribe<E, F, Fut>(&self, handler: F) -> Unsubscribe
    where
        E: BusEvent,
        F: Fn(Arc<E>) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = ()> + Send + 'static,
    {
        let id = self.inner.next_id.fetch_add(1, AtomicOrdering::Relaxed);
        let handler = Arc::new(handler);
        let wrapped: TypedHandler = Arc::new(move |any: AnyArc, _event_type: &'static str| {
            let handler = handler.clone();
            Box::pin(async move {
                if let Ok(event) = any.downcast::<E>() {
                    handler(event).await;
                }
            })
        });
        let type_id = TypeId::of::<E>();
        self.inner
            .by_type
            .write()
            .unwrap_or_else(|e| e.into_inner())
            .entry(type_id)
            .or_default()
            .push(Subscription {
                id,
                handler: wrapped,
            });
        Unsubscribe {
            inner: self.inner.clone(),
            type_id: Some(type_id),
            id,
        }
    }

    pub fn subscribe_all<F, Fut>(&self, handler: F) -> Unsubscribe
    where
        F: Fn(AnyArc, &'static str) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = ()> + Send + 'static,
    {
        let id = self.inner.next_id.fetch_add(1, AtomicOrdering::Relaxed);
        let handler = Arc::new(handler);
        let wrapped: TypedHandler = Arc::new(move |any: AnyArc, event_type: &'static str| {
            let handler = handler.clone();
            Box::pin(async move { handler(any, event_type).await })
        });
        self.inner
            .wildcard
            .write()
            .unwrap_or_else(|e| e.into_inner())
            .push(Subscription {
                id,
                handler: wrapped,
            });
        Unsubscribe {
            inner: self.inner.clone(),
            type_id: None,
            id,
        }
    }

    /// Publish an event. Fans out synchronously from the caller's
    /// perspective (awaited here), in subscription order, to this scope's
    /// typed and wildcard subscribers, then bubbles to every ancestor
    /// scope. Never fails: a handler panic is caught and logged.
    pub async fn publish<E: BusEvent>(&self, event: E) {
        let any: AnyArc = Arc::new(event);
        let type_id = TypeId::of::<E>();

        for inner in std::iter::once(&self.inner).chain(self.parents.iter().rev()) {
            let typed = inner
                .by_type
                .read()
                .unwrap_or_else(|e| e.into_inner())
                .get(&type_id)
                .cloned()
                .unwrap_or_default();
            let wildcard = inner
                .wildcard
                .read()
                .unwrap_or_else(|e| e.into_inner())
                .clone();

            for sub in typed.iter().chain(wildcard.iter()) {
                let fut = (sub.handler)(any.clone(), E::EVENT_TYPE);
                if AssertUnwindSafe(fut).catch_unwind().await.is_err() {
                    tracing::warn!(
                        event_type = E::EVENT_TYPE,
                        "event bus handler panicked; continuing to remaining subscribers"
                    );
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU32, Ordering};
    use tokio::sync::Mutex as AsyncMutex;

    #[derive(Clone)]
    struct Ping(u32);
    impl BusEvent for Ping {
        const EVENT_TYPE: &'static str = "test.ping";
    }

    #[derive(Clone)]
    struct Pong;
    impl BusEvent for Pong {
        const EVENT_TYPE: &'static str = "test.pong";
    }

    #[tokio::test]
    async fn publish_delivers_in_publish_order_to_single_subscriber() {
        let bus = EventBus::new();
        let seen = Arc::new(AsyncMutex::new(Vec::new()));
        let seen2 = seen.clone();
        bus.subscribe::<Ping, _, _>(move |p| {
            let seen = seen2.clone();
            async move { seen.lock().await.push(p.0) }
        });

        bus.publish(Ping(1)).await;
        bus.publish(Ping(2)).await;
        bus.publish(Ping(3)).await;

        assert_eq!(*seen.lock().await, vec![1, 2, 3]);
    }

    #[tokio::test]
    async fn subscriber_of_other_type_is_not_notified() {
        let bus = EventBus::new();
        let count = Arc::new(AtomicU32::new(0));
        let count2 = count.clone();
        bus.subscribe::<Pong, _, _>(move |_| {
            let count = count2.clone();
            async move {
                count.fetch_add(1, Ordering::SeqCst);
            }
        });

        bus.publish(Ping(1)).await;
        assert_eq!(count.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn unsubscribe_stops_delivery() {
        let bus = EventBus::new();
        let count = Arc::new(AtomicU32::new(0));
        let count2 = count.clone();
        let unsub = bus.subscribe::<Ping, _, _>(move |_| {
            let count = count2.clone();
            async move {
                count.fetch_add(1, Ordering::SeqCst);
            }
        });

        bus.publish(Ping(1)).await;
        unsub.unsubscribe();
        bus.publish(Ping(2)).await;

        assert_eq!(count.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn panicking_handler_does_not_stop_other_handlers() {
        let bus = EventBus::new();
        let count = Arc::new(AtomicU32::new(0));
        let count2 = count.clone();

        bus.subscribe::<Ping, _, _>(|_| async {
            panic!("boom");
        });
        bus.subscribe::<Ping, _, _>(move |_| {
            let count = count2.clone();
            async move {
                count.fetch_add(1, Ordering::SeqCst);
            }
        });

        bus.publish(Ping(1)).await;
        assert_eq!(count.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn scoped_publish_bubbles_to_ancestor_subscribers() {
        let root = EventBus::new();
        let count = Arc::new(AtomicU32::new(0));
        let count2 = count.clone();
        root.subscribe::<Ping, _, _>(move |_| {
            let count = count2.clone();
            async move {
                count.fetch_add(1, Ordering::SeqCst);
            }
        });

        let session_scope = root.scoped();
        session_scope.publish(Ping(1)).await;

        assert_eq!(count.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn scoped_subscriber_does_not_see_root_publishes() {
        let root = EventBus::new();
        let scope = root.scoped();
        let count = Arc::new(AtomicU32::new(0));
        let count2 = count.clone();
        scope.subscribe::<Ping, _, _>(move |_| {
            let count = count2.clone();
            async move {
                count.fetch_add(1, Ordering::SeqCst);
            }
        });

        root.publish(Ping(1)).await;
        assert_eq!(count.load(Ordering::SeqCst), 0);
    }
}
