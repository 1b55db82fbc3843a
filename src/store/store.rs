//! Store that applies commands and publishes snapshots.

use crate::command::Command;
use crate::core::{CounterState, Outcome, State, Transition, UserListState};
use crate::store::snapshot::Snapshot;
use std::cell::RefCell;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, PoisonError, RwLock};

type Subscriber = Arc<dyn Fn(&Snapshot) + Send + Sync>;

thread_local! {
    /// Stores this thread is currently dispatching into.
    static DISPATCHING: RefCell<Vec<usize>> = RefCell::new(Vec::new());
}

/// Marks a store as busy on this thread until dropped.
struct DispatchMark(usize);

impl DispatchMark {
    fn enter(key: usize) -> Option<Self> {
        DISPATCHING.with(|active| {
            let mut active = active.borrow_mut();
            if active.contains(&key) {
                return None;
            }
            active.push(key);
            Some(Self(key))
        })
    }
}

impl Drop for DispatchMark {
    fn drop(&mut self) {
        let _ = DISPATCHING.try_with(|active| active.borrow_mut().retain(|key| *key != self.0));
    }
}

/// Handle returned by [`AppStore::subscribe`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

/// Result of a single dispatch.
#[derive(Clone, Debug, PartialEq)]
pub struct Dispatched {
    pub outcome: Outcome,

    /// Snapshot current right after the command was applied.
    pub snapshot: Arc<Snapshot>,
}

struct Inner {
    /// Serializes dispatches: read old, compute new, publish, notify.
    dispatch: Mutex<()>,
    current: RwLock<Arc<Snapshot>>,
    subscribers: RwLock<Vec<(SubscriptionId, Subscriber)>>,
    next_subscription: AtomicU64,
}

/// The application store.
///
/// Owns the user list and counter. Cloning yields another handle to the
/// same store; pass handles to whoever needs to dispatch or read.
///
/// Commands are applied one at a time. Each dispatch holds a single
/// critical section from reading the old snapshot to notifying
/// subscribers, so every observer sees the same total order of commands.
/// Subscribers run inside that section; a dispatch they make into the same
/// store is refused with [`Outcome::Rejected`] instead of deadlocking.
#[derive(Clone)]
pub struct AppStore {
    inner: Arc<Inner>,
}

impl AppStore {
    /// Create a store holding `initial`.
    pub fn new(initial: Snapshot) -> Self {
        Self {
            inner: Arc::new(Inner {
                dispatch: Mutex::new(()),
                current: RwLock::new(Arc::new(initial)),
                subscribers: RwLock::new(Vec::new()),
                next_subscription: AtomicU64::new(0),
            }),
        }
    }

    /// Apply one command and publish the result.
    ///
    /// Never fails. Remove and edit commands naming an unknown id report
    /// [`Outcome::NoMatch`], publish nothing and notify nobody. A dispatch
    /// made from inside a subscriber of this store reports
    /// [`Outcome::Rejected`] and changes nothing.
    pub fn dispatch(&self, command: impl Into<Command>) -> Dispatched {
        let command = command.into();

        let Some(_mark) = DispatchMark::enter(Arc::as_ptr(&self.inner) as usize) else {
            tracing::error!(
                "dispatch {} rejected: store is already dispatching on this thread",
                command.kind()
            );
            return Dispatched {
                outcome: Outcome::Rejected,
                snapshot: self.snapshot(),
            };
        };

        let _guard = self
            .inner
            .dispatch
            .lock()
            .unwrap_or_else(PoisonError::into_inner);

        let current = self.snapshot();
        let Transition { state, outcome } = current.apply(&command);

        tracing::debug!(
            "dispatch {}: {:?} (revision {})",
            command.kind(),
            outcome,
            state.revision
        );

        if !outcome.is_applied() {
            return Dispatched {
                outcome,
                snapshot: current,
            };
        }

        let next = Arc::new(state);
        *self
            .inner
            .current
            .write()
            .unwrap_or_else(PoisonError::into_inner) = Arc::clone(&next);

        self.notify(&next);

        Dispatched {
            outcome,
            snapshot: next,
        }
    }

    /// Current snapshot.
    pub fn snapshot(&self) -> Arc<Snapshot> {
        let current = self
            .inner
            .current
            .read()
            .unwrap_or_else(PoisonError::into_inner);
        Arc::clone(&*current)
    }

    /// Current user list.
    pub fn users(&self) -> UserListState {
        self.snapshot().users.clone()
    }

    /// Current counter.
    pub fn counter(&self) -> CounterState {
        self.snapshot().counter
    }

    /// Read the current snapshot without cloning it.
    pub fn read<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&Snapshot) -> R,
    {
        f(&self.snapshot())
    }

    /// Subscribe to published snapshots.
    ///
    /// The callback runs after every command that changed the state.
    pub fn subscribe<F>(&self, callback: F) -> SubscriptionId
    where
        F: Fn(&Snapshot) + Send + Sync + 'static,
    {
        let id = SubscriptionId(self.inner.next_subscription.fetch_add(1, Ordering::Relaxed));
        self.inner
            .subscribers
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .push((id, Arc::new(callback)));
        id
    }

    /// Remove a subscriber. Returns `false` if it was already gone.
    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        let mut subscribers = self
            .inner
            .subscribers
            .write()
            .unwrap_or_else(PoisonError::into_inner);
        let before = subscribers.len();
        subscribers.retain(|(existing, _)| *existing != id);
        subscribers.len() != before
    }

    pub fn subscriber_count(&self) -> usize {
        self.inner
            .subscribers
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    fn notify(&self, snapshot: &Snapshot) {
        let subscribers: Vec<Subscriber> = self
            .inner
            .subscribers
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .map(|(_, subscriber)| Arc::clone(subscriber))
            .collect();

        tracing::trace!("notifying {} subscribers", subscribers.len());
        for subscriber in subscribers {
            subscriber(snapshot);
        }
    }
}

impl Default for AppStore {
    fn default() -> Self {
        Self::new(Snapshot::default())
    }
}

impl std::fmt::Debug for AppStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppStore")
            .field("snapshot", &self.snapshot())
            .field("subscribers", &self.subscriber_count())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{UserId, UserRecord};
    use std::sync::atomic::AtomicUsize;
    use std::thread;

    fn ann() -> UserRecord {
        UserRecord::new(1, "Ann", 30, "http://x/a.png")
    }

    #[test]
    fn dispatch_publishes_new_snapshot() {
        let store = AppStore::default();
        let before = store.snapshot();

        let result = store.dispatch(Command::add_user(ann()));

        assert_eq!(result.outcome, Outcome::Applied);
        assert_eq!(store.users().users, vec![ann()]);
        assert!(before.users.is_empty());
        assert_eq!(store.snapshot().revision, 1);
    }

    #[test]
    fn no_match_keeps_same_snapshot() {
        let store = AppStore::default();
        store.dispatch(Command::add_user(ann()));
        let before = store.snapshot();

        let result = store.dispatch(Command::remove_user(UserId(42)));

        assert_eq!(result.outcome, Outcome::NoMatch);
        assert!(Arc::ptr_eq(&before, &store.snapshot()));
    }

    #[test]
    fn subscribers_see_applied_commands_only() {
        let store = AppStore::default();
        let calls = Arc::new(AtomicUsize::new(0));
        let calls_clone = calls.clone();

        store.subscribe(move |_snapshot| {
            calls_clone.fetch_add(1, Ordering::SeqCst);
        });

        store.dispatch(Command::increment(1));
        store.dispatch(Command::remove_user(UserId(9)));
        store.dispatch(Command::add_user(ann()));

        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn unsubscribe_stops_notifications() {
        let store = AppStore::default();
        let calls = Arc::new(AtomicUsize::new(0));
        let calls_clone = calls.clone();

        let id = store.subscribe(move |_| {
            calls_clone.fetch_add(1, Ordering::SeqCst);
        });

        store.dispatch(Command::increment(1));
        assert!(store.unsubscribe(id));
        assert!(!store.unsubscribe(id));
        store.dispatch(Command::increment(1));

        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert_eq!(store.subscriber_count(), 0);
    }

    #[test]
    fn subscriber_receives_published_revision() {
        let store = AppStore::default();
        let seen = Arc::new(Mutex::new(Vec::new()));
        let seen_clone = seen.clone();

        store.subscribe(move |snapshot| {
            seen_clone.lock().unwrap().push(snapshot.revision);
        });

        store.dispatch(Command::increment(2));
        store.dispatch(Command::decrement(1));

        assert_eq!(*seen.lock().unwrap(), vec![1, 2]);
    }

    #[test]
    fn clones_share_state() {
        let store = AppStore::default();
        let handle = store.clone();

        handle.dispatch(Command::add_fixed());

        assert_eq!(store.counter().counter, 100);
    }

    #[test]
    fn concurrent_dispatches_are_totally_ordered() {
        let store = AppStore::default();
        let revisions = Arc::new(Mutex::new(Vec::new()));
        let revisions_clone = revisions.clone();

        store.subscribe(move |snapshot| {
            revisions_clone.lock().unwrap().push(snapshot.revision);
        });

        let handles: Vec<_> = (0..8)
            .map(|_| {
                let store = store.clone();
                thread::spawn(move || {
                    for _ in 0..50 {
                        store.dispatch(Command::increment(1));
                    }
                })
            })
            .collect();

        for handle in handles {
            handle.join().unwrap();
        }

        assert_eq!(store.counter().counter, 400);
        let revisions = revisions.lock().unwrap();
        assert_eq!(*revisions, (1..=400).collect::<Vec<u64>>());
    }

    #[test]
    fn dispatch_from_subscriber_is_rejected() {
        let store = AppStore::default();
        let handle = store.clone();
        let nested = Arc::new(Mutex::new(Vec::new()));
        let nested_clone = nested.clone();

        let id = store.subscribe(move |_snapshot| {
            let result = handle.dispatch(Command::add_fixed());
            nested_clone.lock().unwrap().push(result.outcome);
        });

        let result = store.dispatch(Command::increment(1));
        store.unsubscribe(id);

        assert_eq!(result.outcome, Outcome::Applied);
        assert_eq!(*nested.lock().unwrap(), vec![Outcome::Rejected]);
        assert_eq!(store.counter().counter, 1);
        assert_eq!(store.snapshot().revision, 1);
    }

    #[test]
    fn store_accepts_dispatch_after_rejection() {
        let store = AppStore::default();
        let handle = store.clone();

        let id = store.subscribe(move |_| {
            handle.dispatch(Command::increment(10));
        });
        store.dispatch(Command::increment(1));
        store.unsubscribe(id);

        assert_eq!(store.dispatch(Command::increment(1)).outcome, Outcome::Applied);
        assert_eq!(store.counter().counter, 2);
    }

    #[test]
    fn subscriber_may_dispatch_into_another_store() {
        let store = AppStore::default();
        let audit = AppStore::default();
        let audit_handle = audit.clone();

        store.subscribe(move |snapshot| {
            audit_handle.dispatch(Command::increment(snapshot.counter.counter));
        });
        store.dispatch(Command::increment(3));

        assert_eq!(audit.counter().counter, 3);
    }

    #[test]
    fn read_borrows_current_snapshot() {
        let store = AppStore::default();
        store.dispatch(Command::add_user(ann()));

        let names: Vec<String> = store.read(|s| s.users.iter().map(|u| u.name.clone()).collect());

        assert_eq!(names, vec!["Ann".to_string()]);
    }
}
