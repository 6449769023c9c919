//! Explicit subscribe/unsubscribe event sources.
//!
//! An [`EventSource`] delivers batches of change records to registered
//! callbacks. Registering returns a [`Subscription`]; dropping it (or calling
//! [`Subscription::unsubscribe`]) stops delivery. Single-threaded by design of
//! the event loop, hence `Rc`.

use std::cell::RefCell;
use std::rc::{Rc, Weak};

type Callback<E> = Box<dyn FnMut(&[E])>;

struct Registry<E> {
    next_id: u64,
    subscribers: Vec<(u64, Callback<E>)>,
}

/// A producer of discrete change notifications
pub struct EventSource<E> {
    registry: Rc<RefCell<Registry<E>>>,
}

impl<E> EventSource<E> {
    pub fn new() -> Self {
        Self {
            registry: Rc::new(RefCell::new(Registry {
                next_id: 0,
                subscribers: Vec::new(),
            })),
        }
    }

    /// Register `callback`; it receives every batch emitted while the returned
    /// handle is alive.
    #[must_use = "dropping the subscription immediately unsubscribes"]
    pub fn subscribe(&self, callback: impl FnMut(&[E]) + 'static) -> Subscription
    where
        E: 'static,
    {
        let mut registry = self.registry.borrow_mut();
        let id = registry.next_id;
        registry.next_id += 1;
        registry.subscribers.push((id, Box::new(callback)));

        let weak: Weak<RefCell<Registry<E>>> = Rc::downgrade(&self.registry);
        Subscription {
            release: Some(Box::new(move || {
                if let Some(registry) = weak.upgrade() {
                    registry.borrow_mut().subscribers.retain(|(sid, _)| *sid != id);
                }
            })),
        }
    }

    /// Deliver a batch to every live subscriber in registration order.
    /// Empty batches are not delivered.
    pub fn emit(&self, batch: &[E]) {
        if batch.is_empty() {
            return;
        }
        // Callbacks must not subscribe or emit on the same source re-entrantly
        let mut registry = self.registry.borrow_mut();
        for (_, callback) in registry.subscribers.iter_mut() {
            callback(batch);
        }
    }

    pub fn emit_one(&self, event: E) {
        self.emit(std::slice::from_ref(&event));
    }

    pub fn subscriber_count(&self) -> usize {
        self.registry.borrow().subscribers.len()
    }
}

impl<E> Default for EventSource<E> {
    fn default() -> Self {
        Self::new()
    }
}

/// Live registration on an [`EventSource`]. Unsubscribes on drop.
pub struct Subscription {
    release: Option<Box<dyn FnOnce()>>,
}

impl Subscription {
    pub fn unsubscribe(mut self) {
        self.release_now();
    }

    fn release_now(&mut self) {
        if let Some(release) = self.release.take() {
            release();
        }
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.release_now();
    }
}

impl std::fmt::Debug for Subscription {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Subscription")
            .field("active", &self.release.is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_delivery_until_dropped() {
        let source = EventSource::<u32>::new();
        let seen = Rc::new(RefCell::new(Vec::new()));

        let sink = seen.clone();
        let sub = source.subscribe(move |batch| sink.borrow_mut().extend_from_slice(batch));
        assert_eq!(source.subscriber_count(), 1);

        source.emit(&[1, 2]);
        source.emit_one(3);
        drop(sub);
        source.emit_one(4);

        assert_eq!(*seen.borrow(), vec![1, 2, 3]);
        assert_eq!(source.subscriber_count(), 0);
    }

    #[test]
    fn test_explicit_unsubscribe_only_removes_own_callback() {
        let source = EventSource::<&'static str>::new();
        let a = Rc::new(RefCell::new(0));
        let b = Rc::new(RefCell::new(0));

        let (ca, cb) = (a.clone(), b.clone());
        let sub_a = source.subscribe(move |batch| *ca.borrow_mut() += batch.len());
        let _sub_b = source.subscribe(move |batch| *cb.borrow_mut() += batch.len());

        source.emit_one("x");
        sub_a.unsubscribe();
        source.emit(&["y", "z"]);

        assert_eq!(*a.borrow(), 1);
        assert_eq!(*b.borrow(), 3);
    }

    #[test]
    fn test_subscription_outliving_source() {
        let source = EventSource::<u8>::new();
        let sub = source.subscribe(|_| {});
        drop(source);
        // Release must not panic once the registry is gone
        drop(sub);
    }

    #[test]
    fn test_empty_batch_not_delivered() {
        let source = EventSource::<u8>::new();
        let calls = Rc::new(RefCell::new(0));
        let c = calls.clone();
        let _sub = source.subscribe(move |_| *c.borrow_mut() += 1);
        source.emit(&[]);
        assert_eq!(*calls.borrow(), 0);
    }
}
