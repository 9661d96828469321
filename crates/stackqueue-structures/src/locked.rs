use parking_lot::{Condvar, Mutex};

use crate::container::Container;

/// A [`Container`] shared between threads behind one mutex.
///
/// Three access disciplines over the same storage:
/// - unsynchronized: [`Locked::get_mut`] hands out the container itself; the
///   `&mut` borrow proves no other thread can touch it.
/// - exclusive lock: [`Locked::push`] / [`Locked::pop`] hold the mutex for the
///   duration of the mutation and never wait for items.
/// - blocking: [`Locked::push_notify`] also wakes a waiter, and
///   [`Locked::pop_wait`] sleeps until an item is available.
///
/// For a two-stack queue both internal stacks sit under the same mutex, so
/// enqueue, dequeue and transfer exclude each other.
#[derive(Debug, Default)]
pub struct Locked<C> {
    inner: Mutex<C>,
    not_empty: Condvar,
}

impl<C: Container> Locked<C> {
    pub fn new(inner: C) -> Self {
        Self {
            inner: Mutex::new(inner),
            not_empty: Condvar::new(),
        }
    }

    pub fn push(&self, item: C::Item) {
        self.inner.lock().put(item);
    }

    /// Non-blocking pop; `None` when empty.
    pub fn pop(&self) -> Option<C::Item> {
        self.inner.lock().take()
    }

    /// Insert, release the lock, then wake one waiter.
    ///
    /// One item can satisfy at most one `pop_wait`, so waking a single waiter
    /// is enough; a waiter that loses the race re-checks and sleeps again.
    pub fn push_notify(&self, item: C::Item) {
        {
            let mut guard = self.inner.lock();
            guard.put(item);
        }
        self.not_empty.notify_one();
    }

    /// Block until an item is available and return it. The predicate is
    /// re-checked after every wake, spurious or not.
    pub fn pop_wait(&self) -> C::Item {
        let mut guard = self.inner.lock();
        loop {
            if let Some(item) = guard.take() {
                return item;
            }
            self.not_empty.wait(&mut guard);
        }
    }

    /// Like [`Locked::pop_wait`], but gives up with `None` once
    /// `keep_waiting` returns false. The predicate is evaluated under the lock
    /// before every sleep, so a state change followed by
    /// [`Locked::wake_all`] is never missed.
    pub fn pop_wait_while(&self, mut keep_waiting: impl FnMut() -> bool) -> Option<C::Item> {
        let mut guard = self.inner.lock();
        loop {
            if let Some(item) = guard.take() {
                return Some(item);
            }
            if !keep_waiting() {
                return None;
            }
            self.not_empty.wait(&mut guard);
        }
    }

    /// Wake every waiter so it re-evaluates its predicate.
    ///
    /// The lock is taken first: a waiter that already checked its predicate
    /// is then guaranteed to be asleep and receives the notification.
    pub fn wake_all(&self) {
        drop(self.inner.lock());
        self.not_empty.notify_all();
    }

    pub fn len(&self) -> usize {
        self.inner.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.lock().is_empty()
    }

    /// Run `f` against the container while holding the lock.
    pub fn inspect<R>(&self, f: impl FnOnce(&C) -> R) -> R {
        f(&self.inner.lock())
    }

    pub fn get_mut(&mut self) -> &mut C {
        self.inner.get_mut()
    }

    pub fn into_inner(self) -> C {
        self.inner.into_inner()
    }
}
