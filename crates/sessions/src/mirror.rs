//! The session mirror: an observable "current identity or none" cell.
//!
//! Readers get the cached value without touching the provider.  Subscribers
//! are called once with the current value when they register and again after
//! every update, in registration order.
//!
//! Writes are serialized through a reentrant dispatch lock.  A write issued
//! from inside a subscriber callback is queued and delivered after the
//! current round finishes, so every subscriber sees updates in the order
//! they were applied.

use std::cell::Cell;
use std::collections::VecDeque;
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Weak};

use parking_lot::{Mutex, ReentrantMutex, RwLock};

use pl_domain::identity::Identity;
use pl_domain::trace::TraceEvent;

type Callback = Arc<dyn Fn(Option<&Identity>) + Send + Sync>;

struct Inner {
    value: RwLock<Option<Identity>>,
    subscribers: Mutex<Vec<(u64, Callback)>>,
    /// Held for the whole of a set/subscribe.  The cell flags an active flush.
    dispatch: ReentrantMutex<Cell<bool>>,
    pending: Mutex<VecDeque<Option<Identity>>>,
    next_id: AtomicU64,
}

/// Shared handle to the mirror.  Clones observe the same cell.
#[derive(Clone)]
pub struct SessionMirror {
    inner: Arc<Inner>,
}

impl Default for SessionMirror {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for SessionMirror {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SessionMirror")
            .field("value", &*self.inner.value.read())
            .field("subscribers", &self.subscriber_count())
            .finish()
    }
}

impl SessionMirror {
    /// A mirror holding `None` with no subscribers.
    pub fn new() -> Self {
        Self {
            inner: Arc::new(Inner {
                value: RwLock::new(None),
                subscribers: Mutex::new(Vec::new()),
                dispatch: ReentrantMutex::new(Cell::new(false)),
                pending: Mutex::new(VecDeque::new()),
                next_id: AtomicU64::new(1),
            }),
        }
    }

    /// Current identity, if any.
    pub fn read(&self) -> Option<Identity> {
        self.inner.value.read().clone()
    }

    pub fn is_authenticated(&self) -> bool {
        self.inner.value.read().is_some()
    }

    pub fn subscriber_count(&self) -> usize {
        self.inner.subscribers.lock().len()
    }

    /// Register `callback`.  It runs once before this returns, with the
    /// current value, and again on every later update.
    pub fn subscribe<F>(&self, callback: F) -> Subscription
    where
        F: Fn(Option<&Identity>) + Send + Sync + 'static,
    {
        let callback: Callback = Arc::new(callback);
        let _dispatch = self.inner.dispatch.lock();

        let id = self.inner.next_id.fetch_add(1, Ordering::Relaxed);
        let subscribers = {
            let mut subs = self.inner.subscribers.lock();
            subs.push((id, Arc::clone(&callback)));
            subs.len()
        };
        TraceEvent::MirrorSubscribed {
            subscriber_id: id,
            subscribers,
        }
        .emit();

        let current = self.read();
        callback(current.as_ref());

        Subscription {
            mirror: Arc::downgrade(&self.inner),
            id,
        }
    }

    /// Overwrite the value and notify every subscriber in registration order.
    ///
    /// Called from inside a subscriber, the update is queued: the value is
    /// written when its round starts, so `read()` inside a callback always
    /// returns the payload that callback was given.
    pub(crate) fn set(&self, value: Option<Identity>) {
        let flushing = self.inner.dispatch.lock();
        self.inner.pending.lock().push_back(value);

        if flushing.replace(true) {
            // Reentrant write: the outer flush delivers it.
            return;
        }
        let _reset = FlushGuard {
            flushing: &*flushing,
            pending: &self.inner.pending,
        };

        loop {
            let Some(next) = self.inner.pending.lock().pop_front() else {
                break;
            };
            *self.inner.value.write() = next.clone();
            let snapshot: Vec<Callback> = self
                .inner
                .subscribers
                .lock()
                .iter()
                .map(|(_, cb)| Arc::clone(cb))
                .collect();
            for cb in snapshot {
                cb(next.as_ref());
            }
        }
    }

    /// [`set`](Self::set), unless `superseded` says otherwise.
    ///
    /// `superseded` runs under the dispatch lock, so no other write can land
    /// between the check and the update.  Returns whether the value was set.
    pub(crate) fn set_unless<F>(&self, value: Option<Identity>, superseded: F) -> bool
    where
        F: FnOnce() -> bool,
    {
        let _dispatch = self.inner.dispatch.lock();
        if superseded() {
            return false;
        }
        self.set(value);
        true
    }
}

/// Clears the flush flag even when a subscriber panics.
struct FlushGuard<'a> {
    flushing: &'a Cell<bool>,
    pending: &'a Mutex<VecDeque<Option<Identity>>>,
}

impl Drop for FlushGuard<'_> {
    fn drop(&mut self) {
        self.pending.lock().clear();
        self.flushing.set(false);
    }
}

/// Returned by [`SessionMirror::subscribe`].
///
/// Dropping it leaves the callback registered; call
/// [`unsubscribe`](Self::unsubscribe) to stop notifications.
#[must_use = "keep the subscription to be able to unsubscribe later"]
pub struct Subscription {
    mirror: Weak<Inner>,
    id: u64,
}

impl Subscription {
    /// Deregister the callback.  Calling this more than once is a no-op.
    pub fn unsubscribe(&self) {
        let Some(inner) = self.mirror.upgrade() else {
            return;
        };
        let remaining = {
            let mut subs = inner.subscribers.lock();
            let before = subs.len();
            subs.retain(|(id, _)| *id != self.id);
            (subs.len() != before).then_some(subs.len())
        };
        if let Some(subscribers) = remaining {
            TraceEvent::MirrorUnsubscribed {
                subscriber_id: self.id,
                subscribers,
            }
            .emit();
        }
    }
}

impl fmt::Debug for Subscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscription").field("id", &self.id).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user(id: &str) -> Identity {
        Identity::new(id).with_email(format!("{id}@example.com"))
    }

    /// Collects every value a subscriber sees, as ids.
    fn recorder(mirror: &SessionMirror) -> (Arc<Mutex<Vec<Option<String>>>>, Subscription) {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&seen);
        let sub = mirror.subscribe(move |v| sink.lock().push(v.map(|i| i.id.clone())));
        (seen, sub)
    }

    #[test]
    fn starts_empty() {
        let mirror = SessionMirror::new();
        assert_eq!(mirror.read(), None);
        assert!(!mirror.is_authenticated());
        assert_eq!(mirror.subscriber_count(), 0);
    }

    #[test]
    fn set_overwrites_value() {
        let mirror = SessionMirror::new();
        mirror.set(Some(user("a")));
        assert_eq!(mirror.read(), Some(user("a")));

        mirror.set(None);
        assert_eq!(mirror.read(), None);
    }

    #[test]
    fn clones_share_the_cell() {
        let mirror = SessionMirror::new();
        let other = mirror.clone();
        mirror.set(Some(user("a")));
        assert_eq!(other.read(), Some(user("a")));
    }

    #[test]
    fn subscribe_delivers_current_value_immediately() {
        let mirror = SessionMirror::new();
        mirror.set(Some(user("a")));

        let (seen, _sub) = recorder(&mirror);
        assert_eq!(*seen.lock(), vec![Some("a".to_string())]);
    }

    #[test]
    fn every_subscriber_gets_each_update_once() {
        let mirror = SessionMirror::new();
        let (first, _s1) = recorder(&mirror);
        let (second, _s2) = recorder(&mirror);

        mirror.set(Some(user("b")));

        let expected = vec![None, Some("b".to_string())];
        assert_eq!(*first.lock(), expected);
        assert_eq!(*second.lock(), expected);
    }

    #[test]
    fn subscribers_run_in_registration_order() {
        let mirror = SessionMirror::new();
        let order = Arc::new(Mutex::new(Vec::new()));
        let mut subs = Vec::new();
        for n in 0..3 {
            let order = Arc::clone(&order);
            subs.push(mirror.subscribe(move |_| order.lock().push(n)));
        }
        order.lock().clear();

        mirror.set(Some(user("c")));
        assert_eq!(*order.lock(), vec![0, 1, 2]);
    }

    #[test]
    fn unsubscribed_callback_is_not_called_again() {
        let mirror = SessionMirror::new();
        let (seen, sub) = recorder(&mirror);
        sub.unsubscribe();
        assert_eq!(mirror.subscriber_count(), 0);

        mirror.set(Some(user("a")));
        mirror.set(None);
        assert_eq!(*seen.lock(), vec![None]);
    }

    #[test]
    fn unsubscribe_is_idempotent_and_targeted() {
        let mirror = SessionMirror::new();
        let (_a, sub_a) = recorder(&mirror);
        let (b, _sub_b) = recorder(&mirror);

        sub_a.unsubscribe();
        sub_a.unsubscribe();
        assert_eq!(mirror.subscriber_count(), 1);

        mirror.set(Some(user("z")));
        assert_eq!(b.lock().last().cloned().flatten().as_deref(), Some("z"));
    }

    #[test]
    fn dropping_subscription_keeps_callback() {
        let mirror = SessionMirror::new();
        let (seen, sub) = recorder(&mirror);
        drop(sub);

        mirror.set(Some(user("a")));
        assert_eq!(seen.lock().len(), 2);
    }

    #[test]
    fn unsubscribe_after_mirror_dropped_is_harmless() {
        let mirror = SessionMirror::new();
        let sub = mirror.subscribe(|_| {});
        drop(mirror);
        sub.unsubscribe();
    }

    #[test]
    fn callback_may_read_the_mirror() {
        let mirror = SessionMirror::new();
        let observed = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&observed);
        let handle = mirror.clone();
        let _sub = mirror.subscribe(move |v| {
            assert_eq!(handle.read().as_ref(), v);
            sink.lock().push(handle.is_authenticated());
        });

        mirror.set(Some(user("a")));
        assert_eq!(*observed.lock(), vec![false, true]);
    }

    #[test]
    fn nested_set_is_delivered_after_current_round() {
        let mirror = SessionMirror::new();

        // First subscriber signs the visitor out whenever "kicked" appears.
        let handle = mirror.clone();
        let _kicker = mirror.subscribe(move |v| {
            if v.is_some_and(|i| i.id == "kicked") {
                handle.set(None);
            }
        });
        let (seen, _sub) = recorder(&mirror);

        mirror.set(Some(user("kicked")));

        assert_eq!(
            *seen.lock(),
            vec![None, Some("kicked".to_string()), None]
        );
        assert_eq!(mirror.read(), None);
    }

    #[test]
    fn read_matches_payload_while_a_nested_set_is_queued() {
        let mirror = SessionMirror::new();

        let handle = mirror.clone();
        let _kicker = mirror.subscribe(move |v| {
            if v.is_some_and(|i| i.id == "kicked") {
                handle.set(None);
            }
        });

        let observed = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&observed);
        let handle = mirror.clone();
        let _sub = mirror.subscribe(move |v| {
            let payload = v.map(|i| i.id.clone());
            let current = handle.read().map(|i| i.id);
            sink.lock().push((payload, current));
        });

        mirror.set(Some(user("kicked")));

        let kicked = Some("kicked".to_string());
        assert_eq!(
            *observed.lock(),
            vec![(None, None), (kicked.clone(), kicked), (None, None)]
        );
    }

    #[test]
    fn set_unless_skips_superseded_value() {
        let mirror = SessionMirror::new();
        let (seen, _sub) = recorder(&mirror);

        assert!(!mirror.set_unless(Some(user("stale")), || true));
        assert_eq!(mirror.read(), None);

        assert!(mirror.set_unless(Some(user("fresh")), || false));
        assert_eq!(mirror.read(), Some(user("fresh")));
        assert_eq!(*seen.lock(), vec![None, Some("fresh".to_string())]);
    }
}
